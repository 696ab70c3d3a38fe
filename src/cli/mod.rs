pub mod args;
pub mod commands;

use log::debug;
use crate::core::api::ConvertApi;
use crate::core::config::{CompressionMode, ConvertConfig, OverwritePolicy};
use crate::error::types::Result;
use self::args::Commands;

pub struct CliProcessor {
    quiet: bool,
}

impl CliProcessor {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn process_command(&self, command: Commands) -> Result<()> {
        debug!("Processing command: {:?}", command);
        match command {
            Commands::Convert { archive, output_dir, extension, no_clobber, store } => {
                let config = ConvertConfig::builder()
                    .target_extension(extension)
                    .overwrite(if no_clobber { OverwritePolicy::Refuse } else { OverwritePolicy::Overwrite })
                    .compression(if store { CompressionMode::Stored } else { CompressionMode::Deflated })
                    .build();
                let api = ConvertApi::builder().with_config(config).build();
                commands::convert_archive(&api, &archive, &output_dir, self.quiet).map(|_| ())
            }
            Commands::Inspect { archive } => {
                commands::inspect_archive(&ConvertApi::new(), &archive)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn sample_archive(path: &std::path::Path) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file("resources/app/main.js", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"main").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_cli_convert_command() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("game.zip");
        sample_archive(&archive);

        let cli = CliProcessor::new(true);
        let result = cli.process_command(Commands::Convert {
            archive,
            output_dir: temp.path().to_path_buf(),
            extension: "sb3".to_string(),
            no_clobber: false,
            store: true,
        });
        assert!(result.is_ok());
        assert!(temp.path().join("game.sb3").exists());
    }

    #[test]
    fn test_cli_inspect_command() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("game.zip");
        sample_archive(&archive);

        let cli = CliProcessor::new(true);
        assert!(cli.process_command(Commands::Inspect { archive }).is_ok());
    }

    #[test]
    fn test_cli_with_invalid_paths() {
        let cli = CliProcessor::new(true);
        let invalid = PathBuf::from("nonexistent.zip");

        let result = cli.process_command(Commands::Inspect { archive: invalid.clone() });
        assert!(result.is_err());

        let result = cli.process_command(Commands::Convert {
            archive: invalid,
            output_dir: PathBuf::from("output"),
            extension: "sb3".to_string(),
            no_clobber: false,
            store: false,
        });
        assert!(result.is_err());
    }
}
