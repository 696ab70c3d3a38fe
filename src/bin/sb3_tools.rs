use clap::Parser;
use log::error;
use sb3_tools::cli::args::Cli;
use sb3_tools::cli::CliProcessor;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let cli = Cli::parse();
    let processor = CliProcessor::new(cli.quiet);

    if let Err(e) = processor.process_command(cli.command) {
        error!("{}", e);
        std::process::exit(1);
    }
}
