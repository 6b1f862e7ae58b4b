use super::*;
use crate::report::Tick;

// label styling shared by every axis of the report
const AXIS_LABEL_FONT_SIZE: u8 = 12;
const AXIS_LABEL_FONT_FAMILY: &str = "Verdana, Arial";
const AXIS_LABEL_PADDING: u8 = 20;

/// Options handed to the chart backend alongside the visible series. Field
/// names follow the flot option names so the record can be passed through to
/// the browser untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub canvas: bool,
    pub series: SeriesOptions,
    pub xaxis: AxisOptions,
    pub yaxis: AxisOptions,
    pub legend: LegendOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bars: Option<BarOptions>,
    pub grid: GridOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionOptions>,
    pub tooltip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_opts: Option<TooltipOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_size: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<PointOptions>,
}

impl SeriesOptions {
    /// Lines are drawn unless explicitly hidden.
    pub fn shows_lines(&self) -> bool {
        self.lines.as_ref().and_then(|l| l.show).unwrap_or(true)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PointOptions {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    Time,
}

/// Either a tick count or explicit labeled positions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ticks {
    Count(u32),
    Labels(Vec<Tick>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<AxisMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeformat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label_use_canvas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label_font_size_pixels: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label_font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label_padding: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_length: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AxisOptions {
    pub fn labeled<T: Into<String>>(label: T) -> Self {
        Self {
            axis_label: Some(label.into()),
            axis_label_use_canvas: Some(true),
            axis_label_font_size_pixels: Some(AXIS_LABEL_FONT_SIZE),
            axis_label_font_family: Some(AXIS_LABEL_FONT_FAMILY.to_string()),
            axis_label_padding: Some(AXIS_LABEL_PADDING),
            ..Default::default()
        }
    }

    pub fn is_time(&self) -> bool {
        self.mode == Some(AxisMode::Time)
    }

    /// Sets the bounds unless the panel already pinned them.
    pub fn bound(&mut self, min: f64, max: f64) {
        self.min.get_or_insert(min);
        self.max.get_or_insert(max);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_columns: Option<u8>,
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarOptions {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    pub bar_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GridOptions {
    pub hoverable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectionOptions {
    pub mode: String,
}

impl SelectionOptions {
    pub fn xy() -> Self {
        Self {
            mode: "xy".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipOptions {
    pub content: Tooltip,
}
