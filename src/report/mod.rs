use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use thiserror::Error;

mod dataset;
mod filter;
mod series;
mod store;

pub use dataset::{GraphDataset, Tick};
pub use filter::{FilterMode, Preparation, SeriesFilter};
pub use series::{Series, SeriesColor};
#[cfg(test)]
pub use series::Point;
pub use store::{visible, ExcludedSet, SeriesStore};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read report data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse report data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset {dataset} has more than one series labeled {label:?}")]
    DuplicateLabel { dataset: String, label: String },
}

// Each dataset is wrapped exactly like the generator embeds it in the page.
#[derive(Deserialize, Serialize)]
struct Envelope {
    result: GraphDataset,
}

/// The complete set of pre-computed datasets of one test report, keyed by
/// dataset id (`hitsPerSecond`, `responseTimePercentiles`, ...).
#[derive(Clone, Debug, Default)]
pub struct Report {
    datasets: BTreeMap<String, GraphDataset>,
}

impl Report {
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ReportError> {
        let raw: BTreeMap<String, Envelope> = serde_json::from_str(content)?;

        let mut report = Report::default();

        for (id, envelope) in raw {
            report.insert(id, envelope.result)?;
        }

        Ok(report)
    }

    /// Adds a dataset, rejecting it if two of its series share a label.
    pub fn insert<T: Into<String>>(
        &mut self,
        id: T,
        dataset: GraphDataset,
    ) -> Result<(), ReportError> {
        let id = id.into();

        let mut labels = HashSet::new();
        for series in &dataset.series {
            if !labels.insert(series.label.as_str()) {
                return Err(ReportError::DuplicateLabel {
                    dataset: id,
                    label: series.label.clone(),
                });
            }
        }

        self.datasets.insert(id, dataset);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&GraphDataset> {
        self.datasets.get(id)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }
}
