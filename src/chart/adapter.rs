use super::*;

// time axes without a granularity fall back to whole seconds
const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Turns a prepared dataset and a panel's chart settings into backend draw
/// calls.
pub struct ChartAdapter<'a> {
    spec: &'a ChartSpec,
    containers: &'a Containers,
}

impl<'a> ChartAdapter<'a> {
    pub fn new(spec: &'a ChartSpec, containers: &'a Containers) -> Self {
        Self { spec, containers }
    }

    /// Builds the full option record for the dataset, including the axis
    /// bounds taken from the dataset where the panel leaves them open.
    pub fn options(&self, dataset: &GraphDataset) -> ChartOptions {
        let spec = self.spec;

        let x_label = match spec.x_label {
            AxisLabel::Fixed(label) => label.to_string(),
            AxisLabel::ElapsedTime => match dataset.granularity {
                Some(granularity) => elapsed_time_label(granularity),
                None => "Elapsed Time".to_string(),
            },
        };

        let mut xaxis = AxisOptions::labeled(x_label);

        match spec.x_axis {
            XAxis::Time => {
                xaxis.mode = Some(AxisMode::Time);
                xaxis.timeformat = Some(
                    dataset
                        .granularity
                        .map(time_format)
                        .unwrap_or(DEFAULT_TIME_FORMAT)
                        .to_string(),
                );
            }
            XAxis::Numeric { tick_decimals } => {
                xaxis.tick_decimals = tick_decimals;
            }
            XAxis::Categorical { min, max } => {
                xaxis.tick_length = Some(0);
                xaxis.min = Some(min);
                xaxis.max = Some(max);
                xaxis.ticks = dataset.ticks.clone().map(Ticks::Labels);
            }
        }

        let bars = spec.bars.map(|bars| BarOptions {
            show: true,
            align: bars.align.map(str::to_string),
            bar_width: match bars.width {
                BarWidth::Granularity => dataset.granularity.unwrap_or(0) as f64,
                BarWidth::Fixed(width) => width,
            },
            fill: bars.fill,
        });

        let mut options = ChartOptions {
            canvas: true,
            series: spec.style.options(),
            xaxis,
            yaxis: AxisOptions::labeled(spec.y_label),
            legend: LegendOptions {
                no_columns: Some(spec.legend_columns),
                show: true,
                container: Some(format!("#{}", self.containers.legend)),
            },
            bars,
            grid: GridOptions { hoverable: true },
            selection: spec.selectable.then(SelectionOptions::xy),
            tooltip: true,
            tooltip_opts: Some(TooltipOptions {
                content: spec.tooltip.resolve(dataset.granularity),
            }),
            colors: spec
                .colors
                .map(|colors| colors.iter().map(|c| c.to_string()).collect()),
        };

        options.xaxis.bound(dataset.min_x, dataset.max_x);
        options.yaxis.bound(dataset.min_y, dataset.max_y);

        options
    }

    /// Draws the main chart, zoomed to the viewport if there is one, and the
    /// overview chart if the panel has one.
    pub fn render<B: ChartBackend + ?Sized>(
        &self,
        backend: &mut B,
        options: &ChartOptions,
        series: &[&Series],
        viewport: Option<&Viewport>,
    ) -> Result<(), ChartError> {
        self.zoom(backend, options, series, viewport)?;

        if let Some(overview) = self.containers.overview {
            backend.draw(overview, series, &overview_options(options))?;
        }

        Ok(())
    }

    /// Redraws only the main chart.
    pub fn zoom<B: ChartBackend + ?Sized>(
        &self,
        backend: &mut B,
        options: &ChartOptions,
        series: &[&Series],
        viewport: Option<&Viewport>,
    ) -> Result<(), ChartError> {
        let mut main = options.clone();

        if let Some(viewport) = viewport {
            viewport.apply(&mut main);
        }

        backend.draw(self.containers.chart, series, &main)
    }
}

impl ChartOptions {
    /// Hover text for a point, formatted like the page tooltip.
    pub fn hover_text(&self, label: &str, x: f64, y: f64) -> Option<String> {
        let time_format = if self.xaxis.is_time() {
            self.xaxis.timeformat.as_deref()
        } else {
            None
        };

        self.tooltip_opts
            .as_ref()
            .map(|t| t.content.format(label, x, y, time_format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{dataset, series};
    use crate::report::Tick;

    const CONTAINERS: Containers = Containers {
        body: "bodyHitsPerSecond",
        chart: "flotHitsPerSecond",
        overview: Some("overviewHitsPerSecond"),
        legend: "legendHitsPerSecond",
        choices: "choicesHitsPerSecond",
    };

    const HITS: ChartSpec = ChartSpec {
        x_axis: XAxis::Time,
        x_label: AxisLabel::ElapsedTime,
        y_label: "Number of hits / sec",
        style: SeriesStyle::lines_and_points(),
        bars: None,
        legend_columns: 2,
        tooltip: TooltipSpec::Template("%s at %x was %y.2 hits/sec"),
        colors: None,
        selectable: true,
    };

    #[test]
    fn time_axis_options() {
        let mut data = dataset("Hits Per Second", vec![series("hits", &[])]);
        data.granularity = Some(60000);

        let options = ChartAdapter::new(&HITS, &CONTAINERS).options(&data);

        assert!(options.canvas);
        assert!(options.xaxis.is_time());
        assert_eq!(options.xaxis.timeformat.as_deref(), Some("%H:%M:%S"));
        assert_eq!(
            options.xaxis.axis_label.as_deref(),
            Some("Elapsed Time (granularity: 1m)")
        );
        assert_eq!(options.yaxis.axis_label.as_deref(), Some("Number of hits / sec"));
        assert_eq!(options.legend.container.as_deref(), Some("#legendHitsPerSecond"));
        assert_eq!(options.legend.no_columns, Some(2));
        assert_eq!(options.selection, Some(SelectionOptions::xy()));
        assert_eq!(options.xaxis.min, Some(0.0));
        assert_eq!(options.xaxis.max, Some(100.0));
        assert_eq!(options.yaxis.max, Some(10000.0));
        assert_eq!(options.bars, None);
    }

    #[test]
    fn sub_second_granularity_shows_millis() {
        let mut data = dataset("Hits Per Second", vec![]);
        data.granularity = Some(500);

        let options = ChartAdapter::new(&HITS, &CONTAINERS).options(&data);

        assert_eq!(options.xaxis.timeformat.as_deref(), Some("%H:%M:%S.%L"));
    }

    #[test]
    fn categorical_bars() {
        let spec = ChartSpec {
            x_axis: XAxis::Categorical {
                min: -0.5,
                max: 3.5,
            },
            x_label: AxisLabel::Fixed("Response times ranges"),
            y_label: "Number of responses",
            style: SeriesStyle::default(),
            bars: Some(Bars {
                width: BarWidth::Fixed(0.25),
                align: Some("center"),
                fill: Some(0.75),
            }),
            legend_columns: 2,
            tooltip: TooltipSpec::Count,
            colors: None,
            selectable: false,
        };
        let mut data = dataset("Synthetic", vec![series("Requests in error", &[])]);
        data.ticks = Some(vec![Tick(0.0, "fast".to_string()), Tick(1.0, "slow".to_string())]);

        let options = ChartAdapter::new(&spec, &CONTAINERS).options(&data);

        // pinned bounds win over the dataset bounds
        assert_eq!(options.xaxis.min, Some(-0.5));
        assert_eq!(options.xaxis.max, Some(3.5));
        assert_eq!(options.xaxis.tick_length, Some(0));
        assert_eq!(
            options.xaxis.ticks,
            Some(Ticks::Labels(vec![
                Tick(0.0, "fast".to_string()),
                Tick(1.0, "slow".to_string())
            ]))
        );
        let bars = options.bars.unwrap();
        assert_eq!(bars.bar_width, 0.25);
        assert_eq!(bars.align.as_deref(), Some("center"));
        assert_eq!(options.selection, None);
    }

    #[test]
    fn bar_width_follows_granularity() {
        let spec = ChartSpec {
            bars: Some(Bars {
                width: BarWidth::Granularity,
                align: None,
                fill: None,
            }),
            tooltip: TooltipSpec::Distribution,
            ..HITS
        };
        let mut data = dataset("Distribution", vec![]);
        data.granularity = Some(100);

        let options = ChartAdapter::new(&spec, &CONTAINERS).options(&data);

        assert_eq!(options.bars.unwrap().bar_width, 100.0);
        assert_eq!(
            options.tooltip_opts.unwrap().content,
            Tooltip::Formatter(Formatter::Distribution { granularity: 100.0 })
        );
    }

    #[test]
    fn hover_text_uses_axis_time_format() {
        let mut data = dataset("Hits Per Second", vec![]);
        data.granularity = Some(60000);
        let options = ChartAdapter::new(&HITS, &CONTAINERS).options(&data);

        // 2026-02-09T09:00:00Z
        assert_eq!(
            options.hover_text("hitsPerSecond", 1_770_627_600_000.0, 3.95),
            Some("hitsPerSecond at 09:00:00 was 3.95 hits/sec".to_string())
        );
    }

    #[test]
    fn render_draws_main_and_overview() {
        let data = dataset("Hits Per Second", vec![series("hits", &[(0.0, 1.0)])]);
        let adapter = ChartAdapter::new(&HITS, &CONTAINERS);
        let options = adapter.options(&data);
        let visible: Vec<&Series> = data.series.iter().collect();

        let mut viewport = Viewport::new(Ranges::of(&data));
        viewport.select(Ranges {
            xaxis: AxisRange { from: 10.0, to: 20.0 },
            yaxis: AxisRange { from: 0.0, to: 5.0 },
        });

        let mut backend = JsonBackend::new();
        adapter
            .render(&mut backend, &options, &visible, Some(&viewport))
            .unwrap();

        match backend.get("flotHitsPerSecond") {
            Some(Drawing::Plot { options, series }) => {
                assert_eq!(series.len(), 1);
                assert_eq!(options.xaxis.min, Some(10.0));
                assert_eq!(options.yaxis.max, Some(5.0));
            }
            other => panic!("expected main plot, got {other:?}"),
        }

        match backend.get("overviewHitsPerSecond") {
            Some(Drawing::Plot { options, .. }) => {
                // the overview keeps the full range
                assert_eq!(options.xaxis.min, Some(0.0));
                assert!(!options.legend.show);
                assert!(!options.tooltip);
            }
            other => panic!("expected overview plot, got {other:?}"),
        }
    }

    #[test]
    fn zoom_redraws_main_only() {
        let data = dataset("Hits Per Second", vec![series("hits", &[(0.0, 1.0)])]);
        let adapter = ChartAdapter::new(&HITS, &CONTAINERS);
        let options = adapter.options(&data);
        let visible: Vec<&Series> = data.series.iter().collect();
        let mut backend = JsonBackend::new();

        adapter.render(&mut backend, &options, &visible, None).unwrap();
        adapter.zoom(&mut backend, &options, &visible, None).unwrap();

        assert_eq!(backend.draw_count("flotHitsPerSecond"), 2);
        assert_eq!(backend.draw_count("overviewHitsPerSecond"), 1);
    }
}
