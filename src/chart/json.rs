use super::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::trace;

/// What a container currently shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Drawing {
    Plot {
        series: Vec<Series>,
        options: ChartOptions,
    },
    Placeholder {
        text: String,
    },
    Choices {
        entries: Vec<Choice>,
    },
}

/// One legend checkbox as the page renders it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    pub checked: bool,
    pub color: &'static str,
}

/// A backend that records drawings as JSON documents keyed by container id.
/// The viewer serves these to the page, which hands them to flot; the
/// renderer writes them to disk.
#[derive(Clone, Debug, Default)]
pub struct JsonBackend {
    // when set, drawing into any other container fails
    known: Option<HashSet<String>>,
    drawings: BTreeMap<String, Drawing>,
    counts: HashMap<String, usize>,
}

impl JsonBackend {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the backend to the given container ids, like a page
    /// template that only has these elements.
    pub fn with_containers<I, T>(containers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            known: Some(containers.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn get(&self, container: &str) -> Option<&Drawing> {
        self.drawings.get(container)
    }

    pub fn drawings(&self) -> &BTreeMap<String, Drawing> {
        &self.drawings
    }

    /// How many times a chart was plotted into the container.
    #[cfg(test)]
    pub fn draw_count(&self, container: &str) -> usize {
        self.counts.get(container).copied().unwrap_or(0)
    }

    fn put(&mut self, container: &str, drawing: Drawing) -> Result<(), ChartError> {
        if let Some(known) = &self.known {
            if !known.contains(container) {
                return Err(ChartError::MissingContainer(container.to_string()));
            }
        }

        self.drawings.insert(container.to_string(), drawing);
        Ok(())
    }
}

impl ChartBackend for JsonBackend {
    fn draw(
        &mut self,
        container: &str,
        series: &[&Series],
        options: &ChartOptions,
    ) -> Result<(), ChartError> {
        self.put(
            container,
            Drawing::Plot {
                series: series.iter().map(|s| (*s).clone()).collect(),
                options: options.clone(),
            },
        )?;

        let count = self.counts.entry(container.to_string()).or_default();
        *count += 1;
        trace!("plotted {container} ({count} times)");

        Ok(())
    }

    fn placeholder(&mut self, container: &str, text: &str) -> Result<(), ChartError> {
        self.put(
            container,
            Drawing::Placeholder {
                text: text.to_string(),
            },
        )
    }

    fn choices(&mut self, container: &str, legend: &Legend) -> Result<(), ChartError> {
        let entries = legend
            .entries()
            .iter()
            .map(|entry| Choice {
                id: entry.id.clone(),
                label: entry.label.clone(),
                checked: entry.checked,
                color: Legend::label_color(entry.checked),
            })
            .collect();

        self.put(container, Drawing::Choices { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::series;

    #[test]
    fn unknown_container_is_an_error() {
        let mut backend = JsonBackend::with_containers(["flotHitsPerSecond"]);
        let hits = series("hits", &[(0.0, 1.0)]);

        backend
            .draw("flotHitsPerSecond", &[&hits], &ChartOptions::default())
            .unwrap();

        match backend.placeholder("flotMissing", "nothing") {
            Err(ChartError::MissingContainer(id)) => assert_eq!(id, "flotMissing"),
            other => panic!("expected missing container, got {other:?}"),
        }
        assert!(backend.get("flotMissing").is_none());
    }

    #[test]
    fn counts_plots_only() {
        let mut backend = JsonBackend::new();
        let hits = series("hits", &[(0.0, 1.0)]);

        backend.draw("c", &[&hits], &ChartOptions::default()).unwrap();
        backend.draw("c", &[], &ChartOptions::default()).unwrap();
        backend.placeholder("c", "No graph series selected").unwrap();

        assert_eq!(backend.draw_count("c"), 2);
        assert_eq!(
            backend.get("c"),
            Some(&Drawing::Placeholder {
                text: "No graph series selected".to_string()
            })
        );
    }

    #[test]
    fn serializes_tagged() {
        let drawing = Drawing::Placeholder {
            text: "empty".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&drawing).unwrap(),
            serde_json::json!({"kind": "placeholder", "text": "empty"})
        );
    }
}
