use super::*;

/// Smallest span a zoom may narrow an axis to.
pub const MIN_SPAN: f64 = 0.00001;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub from: f64,
    pub to: f64,
}

impl AxisRange {
    fn clamped(self) -> Self {
        if self.to - self.from < MIN_SPAN {
            Self {
                from: self.from,
                to: self.from + MIN_SPAN,
            }
        } else {
            self
        }
    }
}

/// A rectangular selection in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ranges {
    pub xaxis: AxisRange,
    pub yaxis: AxisRange,
}

impl Ranges {
    pub fn clamped(self) -> Self {
        Self {
            xaxis: self.xaxis.clamped(),
            yaxis: self.yaxis.clamped(),
        }
    }

    pub fn of(dataset: &GraphDataset) -> Self {
        Self {
            xaxis: AxisRange {
                from: dataset.min_x,
                to: dataset.max_x,
            },
            yaxis: AxisRange {
                from: dataset.min_y,
                to: dataset.max_y,
            },
        }
    }
}

/// Links a main chart to its overview. Selecting on either chart zooms the
/// main chart and mirrors the selection on the overview; clearing the
/// overview selection restores the overview bounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Viewport {
    bounds: Ranges,
    zoom: Option<Ranges>,
}

impl Viewport {
    pub fn new(bounds: Ranges) -> Self {
        Self { bounds, zoom: None }
    }

    pub fn select(&mut self, ranges: Ranges) -> Ranges {
        let ranges = ranges.clamped();
        self.zoom = Some(ranges);
        ranges
    }

    /// A selection on the overview is forwarded to the main chart.
    pub fn select_overview(&mut self, ranges: Ranges) -> Ranges {
        self.select(ranges)
    }

    pub fn clear_overview(&mut self) {
        self.zoom = None;
    }

    pub fn zoom(&self) -> Option<Ranges> {
        self.zoom
    }

    /// Overrides the axis bounds of the main chart with the current zoom.
    pub fn apply(&self, options: &mut ChartOptions) {
        let ranges = self.zoom().unwrap_or(self.bounds);

        options.xaxis.min = Some(ranges.xaxis.from);
        options.xaxis.max = Some(ranges.xaxis.to);
        options.yaxis.min = Some(ranges.yaxis.from);
        options.yaxis.max = Some(ranges.yaxis.to);
    }
}
