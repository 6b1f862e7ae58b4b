use crate::config::*;
use crate::dashboard::{Settings, DEFAULT_EAGER};
use crate::report::SeriesFilter;

/// How the report is filtered and which panels open on load.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    series_filter: String,
    #[serde(default = "enabled")]
    filters_only_sample_series: bool,
    #[serde(default)]
    show_controllers_only: bool,
    #[serde(default = "timezone_offset")]
    timezone_offset: String,
    #[serde(default = "eager")]
    eager: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            series_filter: String::new(),
            filters_only_sample_series: enabled(),
            show_controllers_only: false,
            timezone_offset: timezone_offset(),
            eager: eager(),
        }
    }
}

impl ReportConfig {
    pub fn check(&self) -> Result<(), ConfigError> {
        self.filter()?;
        self.timezone_offset()?;
        Ok(())
    }

    pub fn filter(&self) -> Result<SeriesFilter, ConfigError> {
        Ok(SeriesFilter::new(
            &self.series_filter,
            self.filters_only_sample_series,
            self.show_controllers_only,
        )?)
    }

    /// The offset in milliseconds. A leading `-` moves timestamps back.
    pub fn timezone_offset(&self) -> Result<f64, ConfigError> {
        let value = self.timezone_offset.trim();
        let (sign, duration) = match value.strip_prefix('-') {
            Some(rest) => (-1.0, rest.trim()),
            None => (1.0, value),
        };

        let duration =
            humantime::parse_duration(duration).map_err(|source| ConfigError::Duration {
                value: self.timezone_offset.clone(),
                source,
            })?;

        Ok(sign * duration.as_millis() as f64)
    }

    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Ok(Settings {
            eager: self.eager.clone(),
            timezone_offset: self.timezone_offset()?,
        })
    }
}

fn enabled() -> bool {
    true
}

fn timezone_offset() -> String {
    "0s".into()
}

fn eager() -> Vec<String> {
    DEFAULT_EAGER.iter().map(|id| id.to_string()).collect()
}
