use super::*;

/// A categorical x-axis label: the bar position and its caption.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick(pub f64, pub String);

/// The data and metadata behind one chart panel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDataset {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub min_x: f64,
    #[serde(default)]
    pub max_x: f64,
    #[serde(default)]
    pub min_y: f64,
    #[serde(default)]
    pub max_y: f64,
    // bucket width in milliseconds, only present for aggregated series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<u64>,
    #[serde(default)]
    pub supports_controllers_discrimination: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Vec<Tick>>,
}

impl GraphDataset {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
