//! Legend checkboxes of a panel.
//!
//! A legend lists one checkbox per prepared series. Unchecked entries form the
//! excluded set the panel subtracts from its series before drawing.

use crate::report::ExcludedSet;
use serde::Serialize;
use thiserror::Error;

const CHECKED_COLOR: &str = "black";
const UNCHECKED_COLOR: &str = "#818181";

#[derive(Debug, Error)]
pub enum LegendError {
    #[error("no series labeled {0:?} in this legend")]
    UnknownSeries(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Legend {
    container: String,
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Creates a legend with every entry checked. Entries are sorted by
    /// label ignoring case and numbered in that order.
    pub fn new<'a, I>(container: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut labels: Vec<&str> = labels.into_iter().collect();
        labels.sort_by_cached_key(|label| label.to_lowercase());

        let entries = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| LegendEntry {
                id: format!("{container}{index}"),
                label: label.to_string(),
                checked: true,
            })
            .collect();

        Self {
            container: container.to_string(),
            entries,
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Flips one checkbox and returns its new state.
    pub fn toggle(&mut self, label: &str) -> Result<bool, LegendError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.label == label)
            .ok_or_else(|| LegendError::UnknownSeries(label.to_string()))?;

        entry.checked = !entry.checked;
        Ok(entry.checked)
    }

    pub fn toggle_all(&mut self, checked: bool) {
        for entry in self.entries.iter_mut() {
            entry.checked = checked;
        }
    }

    pub fn excluded(&self) -> ExcludedSet {
        self.entries
            .iter()
            .filter(|e| !e.checked)
            .map(|e| e.label.clone())
            .collect()
    }

    pub fn label_color(checked: bool) -> &'static str {
        if checked {
            CHECKED_COLOR
        } else {
            UNCHECKED_COLOR
        }
    }
}
