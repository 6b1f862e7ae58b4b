use super::*;
use regex::{Regex, RegexBuilder};

/// Whether a panel honors the report-wide series filter. The aggregate total
/// transactions panel always shows everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Apply,
    Ignore,
}

/// Report-wide selection of which series are worth showing at all.
#[derive(Clone, Debug)]
pub struct SeriesFilter {
    pattern: Option<Regex>,
    filters_only_sample_series: bool,
    show_controllers_only: bool,
}

impl Default for SeriesFilter {
    fn default() -> Self {
        Self {
            pattern: None,
            filters_only_sample_series: true,
            show_controllers_only: false,
        }
    }
}

impl SeriesFilter {
    /// Builds a filter from a case-insensitive pattern. An empty pattern
    /// keeps every series.
    pub fn new(
        pattern: &str,
        filters_only_sample_series: bool,
        show_controllers_only: bool,
    ) -> Result<Self, regex::Error> {
        let pattern = if pattern.is_empty() {
            None
        } else {
            Some(RegexBuilder::new(pattern).case_insensitive(true).build()?)
        };

        Ok(Self {
            pattern,
            filters_only_sample_series,
            show_controllers_only,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_ref().map(|p| p.as_str()).unwrap_or("")
    }

    /// Filters, sorts and marks the series of a dataset for drawing.
    pub fn prepare(&self, dataset: &GraphDataset, preparation: &Preparation) -> GraphDataset {
        let mut prepared = dataset.clone();

        if preparation.mode == FilterMode::Apply {
            if let Some(pattern) = &self.pattern {
                if !self.filters_only_sample_series || dataset.supports_controllers_discrimination
                {
                    prepared.series.retain(|s| pattern.is_match(&s.label));
                }
            }

            if dataset.supports_controllers_discrimination && self.show_controllers_only {
                prepared.series.retain(|s| s.is_controller);
            }
        }

        for (index, series) in prepared.series.iter_mut().enumerate() {
            if preparation.x_offset != 0.0 {
                series.shift_x(preparation.x_offset);
            }

            series.sort_by_x();

            if !preparation.fixed_colors {
                series.color = Some(SeriesColor::Index(index));
            }
        }

        if preparation.x_offset != 0.0 {
            prepared.min_x += preparation.x_offset;
            prepared.max_x += preparation.x_offset;
        }

        prepared
    }
}

/// Per-panel knobs applied while preparing a dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Preparation {
    pub mode: FilterMode,
    // keep the colors carried by the dataset instead of palette indices
    pub fixed_colors: bool,
    // added to every x coordinate, used to move timestamps into local time
    pub x_offset: f64,
}
