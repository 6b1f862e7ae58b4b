use super::*;

/// One `(x, y)` coordinate, encoded as a two element array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }
}

/// A series color is either the palette index assigned during preparation or
/// a fixed color carried by the dataset itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesColor {
    Index(usize),
    Named(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub label: String,
    #[serde(default)]
    pub data: Vec<Point>,
    #[serde(default)]
    pub is_controller: bool,
    #[serde(default)]
    pub is_overall: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SeriesColor>,
}

impl Series {
    pub fn sort_by_x(&mut self) {
        self.data.sort_by(|a, b| a.x().total_cmp(&b.x()));
    }

    pub fn shift_x(&mut self, offset: f64) {
        for point in self.data.iter_mut() {
            point.0 += offset;
        }
    }
}
