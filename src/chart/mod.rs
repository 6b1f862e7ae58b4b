use crate::legend::Legend;
use crate::report::{GraphDataset, Series};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod adapter;
mod json;
mod options;
mod overview;
mod spec;
mod time;
mod tooltip;
mod zoom;

pub use adapter::ChartAdapter;
pub use json::{Drawing, JsonBackend};
pub use options::*;
pub use overview::overview_options;
pub use spec::{AxisLabel, BarWidth, Bars, ChartSpec, Lines, SeriesStyle, TooltipSpec, XAxis};
pub use time::{elapsed_time_label, time_format};
pub use tooltip::{Formatter, Tooltip};
pub use zoom::{Ranges, Viewport};
#[cfg(test)]
pub use zoom::{AxisRange, MIN_SPAN};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no container with id {0:?} on this page")]
    MissingContainer(String),
}

/// Ids of the template elements one panel draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Containers {
    // whole collapsible panel body, receives the empty dataset placeholder
    pub body: &'static str,
    pub chart: &'static str,
    pub overview: Option<&'static str>,
    pub legend: &'static str,
    pub choices: &'static str,
}

/// A 2-D chart library. Implementations only receive the series and the
/// options for a container and never see panel state.
pub trait ChartBackend {
    fn draw(
        &mut self,
        container: &str,
        series: &[&Series],
        options: &ChartOptions,
    ) -> Result<(), ChartError>;

    /// Replaces whatever the container holds with a text message.
    fn placeholder(&mut self, container: &str, text: &str) -> Result<(), ChartError>;

    /// Publishes the checkbox list for a legend.
    fn choices(&mut self, container: &str, legend: &Legend) -> Result<(), ChartError>;
}
