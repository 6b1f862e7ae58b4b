use super::*;
use crate::chart::{
    AxisLabel, BarWidth, Bars, ChartSpec, Containers, Lines, SeriesStyle, TooltipSpec, XAxis,
};

// fixed success / failure palette of the aggregate panels
const OUTCOME_COLORS: &[&str] = &["#9ACD32", "#FF6347"];

/// Everything that distinguishes one report graph from another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelConfig {
    /// Dataset id in the report data.
    pub id: &'static str,
    pub title: &'static str,
    pub anchor: &'static str,
    pub containers: Containers,
    pub chart: ChartSpec,
    pub filter: FilterMode,
    pub fixed_colors: bool,
}

impl PanelConfig {
    /// Panels with an overview chart can be zoomed by range selection.
    pub fn zoomable(&self) -> bool {
        self.containers.overview.is_some()
    }

    /// Time axes hold epoch milliseconds that get moved into local time.
    pub fn fixes_timestamps(&self) -> bool {
        self.chart.x_axis == XAxis::Time
    }

    pub fn preparation(&self, timezone_offset: f64) -> Preparation {
        Preparation {
            mode: self.filter,
            fixed_colors: self.fixed_colors,
            x_offset: if self.fixes_timestamps() {
                timezone_offset
            } else {
                0.0
            },
        }
    }
}

/// Looks up a panel by dataset id or by the id of its choices container.
pub fn find(id: &str) -> Option<&'static PanelConfig> {
    CATALOG
        .iter()
        .find(|config| config.id == id || config.containers.choices == id)
}

/// Every container id the report page template provides.
pub fn template_containers() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|config| {
        let c = config.containers;
        [c.body, c.chart, c.legend, c.choices]
            .into_iter()
            .chain(c.overview)
    })
}

const fn containers(
    body: &'static str,
    chart: &'static str,
    overview: Option<&'static str>,
    legend: &'static str,
    choices: &'static str,
) -> Containers {
    Containers {
        body,
        chart,
        overview,
        legend,
        choices,
    }
}

const fn over_time(y_label: &'static str, tooltip: &'static str) -> ChartSpec {
    ChartSpec {
        x_axis: XAxis::Time,
        x_label: AxisLabel::ElapsedTime,
        y_label,
        style: SeriesStyle::lines_and_points(),
        bars: None,
        legend_columns: 2,
        tooltip: TooltipSpec::Template(tooltip),
        colors: None,
        selectable: true,
    }
}

const fn versus(x_label: &'static str, y_label: &'static str, tooltip: &'static str) -> ChartSpec {
    ChartSpec {
        x_axis: XAxis::Numeric {
            tick_decimals: None,
        },
        x_label: AxisLabel::Fixed(x_label),
        y_label,
        style: SeriesStyle::lines_and_points(),
        bars: None,
        legend_columns: 2,
        tooltip: TooltipSpec::Template(tooltip),
        colors: None,
        selectable: true,
    }
}

const fn panel(
    id: &'static str,
    title: &'static str,
    anchor: &'static str,
    containers: Containers,
    chart: ChartSpec,
) -> PanelConfig {
    PanelConfig {
        id,
        title,
        anchor,
        containers,
        chart,
        filter: FilterMode::Apply,
        fixed_colors: false,
    }
}

/// The graphs of a JMeter report, in page order.
pub static CATALOG: &[PanelConfig] = &[
    panel(
        "responseTimePercentiles",
        "Response Time Percentiles",
        "#responseTimePercentiles",
        containers(
            "bodyResponseTimePercentiles",
            "flotResponseTimesPercentiles",
            Some("overviewResponseTimesPercentiles"),
            "legendResponseTimePercentiles",
            "choicesResponseTimePercentiles",
        ),
        ChartSpec {
            x_axis: XAxis::Numeric {
                tick_decimals: Some(1),
            },
            style: SeriesStyle {
                lines: None,
                points: Some(false),
                stack: false,
            },
            ..versus(
                "Percentiles",
                "Percentile value in ms",
                "%s : %x.2 percentile was %y ms",
            )
        },
    ),
    panel(
        "responseTimeDistribution",
        "Response Time Distribution",
        "#responseTimeDistribution",
        containers(
            "bodyResponseTimeDistribution",
            "flotResponseTimeDistribution",
            None,
            "legendResponseTimeDistribution",
            "choicesResponseTimeDistribution",
        ),
        ChartSpec {
            x_axis: XAxis::Numeric {
                tick_decimals: None,
            },
            x_label: AxisLabel::Fixed("Response times in ms"),
            y_label: "Number of responses",
            style: SeriesStyle {
                lines: None,
                points: None,
                stack: false,
            },
            bars: Some(Bars {
                width: BarWidth::Granularity,
                align: None,
                fill: None,
            }),
            legend_columns: 2,
            tooltip: TooltipSpec::Distribution,
            colors: None,
            selectable: false,
        },
    ),
    PanelConfig {
        fixed_colors: true,
        ..panel(
            "syntheticResponseTimeDistribution",
            "Synthetic Response Times Distribution",
            "#syntheticResponseTimeDistribution",
            containers(
                "bodySyntheticResponseTimeDistribution",
                "flotSyntheticResponseTimeDistribution",
                None,
                "legendSyntheticResponseTimeDistribution",
                "choicesSyntheticResponseTimeDistribution",
            ),
            ChartSpec {
                x_axis: XAxis::Categorical {
                    min: -0.5,
                    max: 3.5,
                },
                x_label: AxisLabel::Fixed("Response times ranges"),
                y_label: "Number of responses",
                style: SeriesStyle {
                    lines: None,
                    points: None,
                    stack: false,
                },
                bars: Some(Bars {
                    width: BarWidth::Fixed(0.25),
                    align: Some("center"),
                    fill: Some(0.75),
                }),
                legend_columns: 2,
                tooltip: TooltipSpec::Count,
                colors: None,
                selectable: false,
            },
        )
    },
    panel(
        "activeThreadsOverTime",
        "Active Threads Over Time",
        "#activeThreadsOverTime",
        containers(
            "bodyActiveThreadsOverTime",
            "flotActiveThreadsOverTime",
            Some("overviewActiveThreadsOverTime"),
            "legendActiveThreadsOverTime",
            "choicesActiveThreadsOverTime",
        ),
        ChartSpec {
            style: SeriesStyle {
                lines: Some(Lines {
                    show: true,
                    fill: true,
                }),
                points: Some(true),
                stack: true,
            },
            legend_columns: 6,
            ..over_time(
                "Number of active threads",
                "%s : At %x there were %y active threads",
            )
        },
    ),
    panel(
        "timeVsThreads",
        "Time VS Threads",
        "#timeVsThreads",
        containers(
            "bodyTimeVsThreads",
            "flotTimesVsThreads",
            Some("overviewTimesVsThreads"),
            "legendTimeVsThreads",
            "choicesTimeVsThreads",
        ),
        versus(
            "Number of active threads",
            "Average response times in ms",
            "%s: At %x.2 active threads, Average response time was %y.2 ms",
        ),
    ),
    panel(
        "bytesThroughputOverTime",
        "Bytes Throughput Over Time",
        "#bytesThroughputOverTime",
        containers(
            "bodyBytesThroughputOverTime",
            "flotBytesThroughputOverTime",
            Some("overviewBytesThroughputOverTime"),
            "legendBytesThroughputOverTime",
            "choicesBytesThroughputOverTime",
        ),
        over_time("Bytes / sec", "%s at %x was %y"),
    ),
    panel(
        "responseTimesOverTime",
        "Response Time Over Time",
        "#responseTimesOverTime",
        containers(
            "bodyResponseTimeOverTime",
            "flotResponseTimesOverTime",
            Some("overviewResponseTimesOverTime"),
            "legendResponseTimesOverTime",
            "choicesResponseTimesOverTime",
        ),
        over_time(
            "Average response time in ms",
            "%s : at %x Average response time was %y ms",
        ),
    ),
    panel(
        "latenciesOverTime",
        "Latencies Over Time",
        "#latenciesOverTime",
        containers(
            "bodyLatenciesOverTime",
            "flotLatenciesOverTime",
            Some("overviewLatenciesOverTime"),
            "legendLatenciesOverTime",
            "choicesLatenciesOverTime",
        ),
        over_time(
            "Average response latencies in ms",
            "%s : at %x Average latency was %y ms",
        ),
    ),
    panel(
        "connectTimeOverTime",
        "Connect Time Over Time",
        "#connectTimeOverTime",
        containers(
            "bodyConnectTimeOverTime",
            "flotConnectTimeOverTime",
            Some("overviewConnectTimeOverTime"),
            "legendConnectTimeOverTime",
            "choicesConnectTimeOverTime",
        ),
        over_time(
            "Average Connect Time in ms",
            "%s : at %x Average connect time was %y ms",
        ),
    ),
    panel(
        "responseTimePercentilesOverTime",
        "Response Time Percentiles Over Time (successful requests only)",
        "#responseTimePercentilesOverTime",
        containers(
            "bodyResponseTimePercentilesOverTime",
            "flotResponseTimePercentilesOverTime",
            Some("overviewResponseTimePercentilesOverTime"),
            "legendResponseTimePercentilesOverTime",
            "choicesResponseTimePercentilesOverTime",
        ),
        ChartSpec {
            style: SeriesStyle::filled(),
            ..over_time("Response Time in ms", "%s : at %x Response time was %y ms")
        },
    ),
    panel(
        "responseTimeVsRequest",
        "Response Time Vs Request",
        "#responseTimeVsRequest",
        containers(
            "bodyResponseTimeVsRequest",
            "flotResponseTimeVsRequest",
            Some("overviewResponseTimeVsRequest"),
            "legendResponseTimeVsRequest",
            "choicesResponseTimeVsRequest",
        ),
        ChartSpec {
            style: SeriesStyle::scatter(),
            colors: Some(OUTCOME_COLORS),
            ..versus(
                "Global number of requests per second",
                "Median Response Time in ms",
                "%s : Median response time at %x req/s was %y ms",
            )
        },
    ),
    panel(
        "latenciesVsRequest",
        "Latencies Vs Request",
        "#latencyVsRequest",
        containers(
            "bodyLatenciesVsRequest",
            "flotLatenciesVsRequest",
            Some("overviewLatenciesVsRequest"),
            "legendLatencyVsRequest",
            "choicesLatencyVsRequest",
        ),
        ChartSpec {
            style: SeriesStyle::scatter(),
            colors: Some(OUTCOME_COLORS),
            ..versus(
                "Global number of requests per second",
                "Median Latency in ms",
                "%s : Median Latency time at %x req/s was %y ms",
            )
        },
    ),
    panel(
        "hitsPerSecond",
        "Hits Per Second",
        "#hitsPerSecond",
        containers(
            "bodyHitsPerSecond",
            "flotHitsPerSecond",
            Some("overviewHitsPerSecond"),
            "legendHitsPerSecond",
            "choicesHitsPerSecond",
        ),
        over_time("Number of hits / sec", "%s at %x was %y.2 hits/sec"),
    ),
    panel(
        "codesPerSecond",
        "Codes Per Second",
        "#codesPerSecond",
        containers(
            "bodyCodesPerSecond",
            "flotCodesPerSecond",
            Some("overviewCodesPerSecond"),
            "legendCodesPerSecond",
            "choicesCodesPerSecond",
        ),
        over_time(
            "Number of responses / sec",
            "Number of Response Codes %s at %x was %y.2 responses / sec",
        ),
    ),
    panel(
        "transactionsPerSecond",
        "Transactions Per Second",
        "#transactionsPerSecond",
        containers(
            "bodyTransactionsPerSecond",
            "flotTransactionsPerSecond",
            Some("overviewTransactionsPerSecond"),
            "legendTransactionsPerSecond",
            "choicesTransactionsPerSecond",
        ),
        over_time(
            "Number of transactions / sec",
            "%s at %x was %y transactions / sec",
        ),
    ),
    PanelConfig {
        // the aggregate view always shows both outcomes
        filter: FilterMode::Ignore,
        ..panel(
            "totalTPS",
            "Total Transactions Per Second",
            "#totalTPS",
            containers(
                "bodyTotalTPS",
                "flotTotalTPS",
                Some("overviewTotalTPS"),
                "legendTotalTPS",
                "choicesTotalTPS",
            ),
            ChartSpec {
                colors: Some(OUTCOME_COLORS),
                ..over_time(
                    "Number of transactions / sec",
                    "%s at %x was %y transactions / sec",
                )
            },
        )
    },
];
