use crate::config::*;
use tracing::Level;

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Log {
    #[serde(default)]
    level: LogLevel,
}

impl Log {
    pub fn log_level(&self) -> LogLevel {
        self.level
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Raises verbosity by the given number of steps, saturating at trace.
    pub fn raised(self, steps: u8) -> Self {
        const LEVELS: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];

        let index = (self as usize + steps as usize).min(LEVELS.len() - 1);
        LEVELS[index]
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
