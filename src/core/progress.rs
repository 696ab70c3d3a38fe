use std::sync::mpsc::Sender;
use log::{error, info};

/// Coarse conversion milestones, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Validating,
    Extracting,
    LocatingResources,
    Writing,
    CleaningUp,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Validating,
        Stage::Extracting,
        Stage::LocatingResources,
        Stage::Writing,
        Stage::CleaningUp,
        Stage::Done,
    ];

    pub fn percent(self) -> u8 {
        match self {
            Stage::Validating => 0,
            Stage::Extracting => 20,
            Stage::LocatingResources => 50,
            Stage::Writing => 70,
            Stage::CleaningUp => 90,
            Stage::Done => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Stage::Validating => "Validating input",
            Stage::Extracting => "Extracting archive",
            Stage::LocatingResources => "Locating resource directory",
            Stage::Writing => "Writing archive",
            Stage::CleaningUp => "Cleaning up",
            Stage::Done => "Conversion complete",
        }
    }
}

/// Receives progress and log output from a running conversion.
///
/// Return values are never consulted; implementations may be slow or drop
/// events without affecting the conversion.
pub trait ProgressSink: Send + Sync {
    fn report_progress(&self, percent: u8, message: &str);
    fn log_line(&self, message: &str, is_error: bool);

    fn stage(&self, stage: Stage) {
        self.report_progress(stage.percent(), stage.message());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Progress { percent: u8, message: String },
    Log { message: String, is_error: bool },
}

/// Forwards events over a channel. A disconnected receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelSink {
    fn report_progress(&self, percent: u8, message: &str) {
        let _ = self.sender.send(ProgressEvent::Progress {
            percent: percent.min(100),
            message: message.to_string(),
        });
    }

    fn log_line(&self, message: &str, is_error: bool) {
        let _ = self.sender.send(ProgressEvent::Log {
            message: message.to_string(),
            is_error,
        });
    }
}

/// Writes everything to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report_progress(&self, percent: u8, message: &str) {
        info!("[{:>3}%] {}", percent, message);
    }

    fn log_line(&self, message: &str, is_error: bool) {
        if is_error {
            error!("{}", message);
        } else {
            info!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_stage_percent_monotonic() {
        let percents: Vec<u8> = Stage::ALL.iter().map(|s| s.percent()).collect();
        assert!(percents.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(percents.first(), Some(&0));
        assert_eq!(percents.last(), Some(&100));
    }

    #[test]
    fn test_channel_sink_events() {
        let (tx, rx) = mpsc::channel();
        let sink = ChannelSink::new(tx);
        sink.stage(Stage::Extracting);
        sink.log_line("oops", true);
        drop(sink);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events, vec![
            ProgressEvent::Progress { percent: 20, message: "Extracting archive".to_string() },
            ProgressEvent::Log { message: "oops".to_string(), is_error: true },
        ]);
    }

    #[test]
    fn test_channel_sink_tolerates_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let sink = ChannelSink::new(tx);
        sink.report_progress(150, "still fine");
        sink.log_line("nobody listening", false);
    }
}
