use super::*;

/// The chart-specific part of a panel: everything needed to build its
/// options except the dataset and the container ids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSpec {
    pub x_axis: XAxis,
    pub x_label: AxisLabel,
    pub y_label: &'static str,
    pub style: SeriesStyle,
    pub bars: Option<Bars>,
    pub legend_columns: u8,
    pub tooltip: TooltipSpec,
    pub colors: Option<&'static [&'static str]>,
    // range selection on the main chart, needed for zooming
    pub selectable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum XAxis {
    Time,
    Numeric { tick_decimals: Option<u8> },
    // fixed positions labeled by the dataset ticks
    Categorical { min: f64, max: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisLabel {
    Fixed(&'static str),
    // derived from the dataset granularity
    ElapsedTime,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesStyle {
    pub lines: Option<Lines>,
    pub points: Option<bool>,
    pub stack: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lines {
    pub show: bool,
    pub fill: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BarWidth {
    Granularity,
    Fixed(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bars {
    pub width: BarWidth,
    pub align: Option<&'static str>,
    pub fill: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TooltipSpec {
    Template(&'static str),
    Distribution,
    Count,
}

impl TooltipSpec {
    pub fn resolve(&self, granularity: Option<u64>) -> Tooltip {
        match self {
            Self::Template(template) => Tooltip::Template(template.to_string()),
            Self::Distribution => Tooltip::Formatter(Formatter::Distribution {
                granularity: granularity.unwrap_or(0) as f64,
            }),
            Self::Count => Tooltip::Formatter(Formatter::Count),
        }
    }
}

impl SeriesStyle {
    pub const fn lines_and_points() -> Self {
        Self {
            lines: Some(Lines {
                show: true,
                fill: false,
            }),
            points: Some(true),
            stack: false,
        }
    }

    pub const fn filled() -> Self {
        Self {
            lines: Some(Lines {
                show: true,
                fill: true,
            }),
            points: Some(true),
            stack: false,
        }
    }

    pub const fn scatter() -> Self {
        Self {
            lines: Some(Lines {
                show: false,
                fill: false,
            }),
            points: Some(true),
            stack: false,
        }
    }

    pub(crate) fn options(&self) -> SeriesOptions {
        SeriesOptions {
            stack: self.stack.then_some(true),
            shadow_size: None,
            lines: self.lines.map(|l| LineOptions {
                show: Some(l.show),
                fill: l.fill.then_some(true),
                line_width: None,
            }),
            points: self.points.map(|show| PointOptions { show, radius: None }),
        }
    }
}
