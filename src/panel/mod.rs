use crate::chart::{ChartAdapter, ChartBackend, ChartError, ChartOptions, Ranges, Viewport};
use crate::legend::{Legend, LegendError};
use crate::report::{visible, FilterMode, GraphDataset, Preparation, SeriesStore};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

mod catalog;

pub use catalog::{find, template_containers, PanelConfig, CATALOG};

/// Shown in the chart container once every legend entry is unchecked.
pub const NO_SERIES_SELECTED: &str = "No graph series selected";

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("report has no dataset {0:?}")]
    MissingDataset(String),
    #[error("panel {0} has not been rendered yet")]
    NotRendered(&'static str),
    #[error("panel {0} has no overview chart to zoom with")]
    NotZoomable(&'static str),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Legend(#[from] LegendError),
}

/// Render lifecycle of a panel. `Rendered` is reached at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderState {
    #[default]
    Collapsed,
    Expanding,
    Rendered,
}

/// The icon in the panel title bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Chevron {
    #[serde(rename = "fa-chevron-up")]
    Up,
    #[serde(rename = "fa-chevron-down")]
    Down,
}

// state that only exists once the panel has rendered
struct Chart {
    dataset: GraphDataset,
    options: ChartOptions,
    legend: Legend,
    viewport: Option<Viewport>,
    empty_text: String,
}

impl Chart {
    fn draw<B: ChartBackend + ?Sized>(
        &self,
        config: &PanelConfig,
        backend: &mut B,
    ) -> Result<(), PanelError> {
        let containers = &config.containers;

        if self.dataset.is_empty() {
            backend.placeholder(containers.body, &self.empty_text)?;
            return Ok(());
        }

        let excluded = self.legend.excluded();
        let series = visible(&self.dataset.series, &excluded);

        if series.is_empty() {
            backend.placeholder(containers.chart, NO_SERIES_SELECTED)?;
            if let Some(overview) = containers.overview {
                backend.placeholder(overview, NO_SERIES_SELECTED)?;
            }
        } else {
            ChartAdapter::new(&config.chart, containers).render(
                backend,
                &self.options,
                &series,
                self.viewport.as_ref(),
            )?;
        }

        backend.choices(containers.choices, &self.legend)?;

        Ok(())
    }

    fn zoom<B: ChartBackend + ?Sized>(
        &self,
        config: &PanelConfig,
        backend: &mut B,
    ) -> Result<(), PanelError> {
        let excluded = self.legend.excluded();
        let series = visible(&self.dataset.series, &excluded);

        // nothing is plotted, so there is nothing to zoom
        if series.is_empty() {
            return Ok(());
        }

        ChartAdapter::new(&config.chart, &config.containers).zoom(
            backend,
            &self.options,
            &series,
            self.viewport.as_ref(),
        )?;

        Ok(())
    }
}

/// One collapsible report panel.
pub struct Panel {
    config: &'static PanelConfig,
    state: RenderState,
    expanded: bool,
    chart: Option<Chart>,
}

impl Panel {
    pub fn new(config: &'static PanelConfig) -> Self {
        Self {
            config,
            state: RenderState::Collapsed,
            expanded: false,
            chart: None,
        }
    }

    pub fn config(&self) -> &'static PanelConfig {
        self.config
    }

    pub fn id(&self) -> &'static str {
        self.config.id
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn chevron(&self) -> Chevron {
        if self.expanded {
            Chevron::Up
        } else {
            Chevron::Down
        }
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.chart.as_ref().map(|c| &c.legend)
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.chart.as_ref().and_then(|c| c.viewport.as_ref())
    }

    /// Renders the panel unless it already has been. A failed render leaves
    /// the panel collapsed so it can be retried.
    pub fn ensure_rendered<B: ChartBackend + ?Sized>(
        &mut self,
        store: &SeriesStore,
        backend: &mut B,
        timezone_offset: f64,
    ) -> Result<(), PanelError> {
        if self.state == RenderState::Rendered {
            return Ok(());
        }

        self.state = RenderState::Expanding;

        match self.render(store, backend, timezone_offset) {
            Ok(chart) => {
                debug!("rendered panel {}", self.config.id);
                self.chart = Some(chart);
                self.state = RenderState::Rendered;
                Ok(())
            }
            Err(e) => {
                self.state = RenderState::Collapsed;
                Err(e)
            }
        }
    }

    fn render<B: ChartBackend + ?Sized>(
        &self,
        store: &SeriesStore,
        backend: &mut B,
        timezone_offset: f64,
    ) -> Result<Chart, PanelError> {
        let config = self.config;
        let preparation = config.preparation(timezone_offset);

        let dataset = store
            .prepare(config.id, &preparation)
            .ok_or_else(|| PanelError::MissingDataset(config.id.to_string()))?;

        let options = ChartAdapter::new(&config.chart, &config.containers).options(&dataset);
        let legend = Legend::new(config.containers.choices, dataset.labels());
        let viewport = config
            .zoomable()
            .then(|| Viewport::new(Ranges::of(&dataset)));

        let empty_text = format!("No graph series with filter={}", filter_text(store, &preparation));

        let chart = Chart {
            dataset,
            options,
            legend,
            viewport,
            empty_text,
        };

        chart.draw(config, backend)?;

        Ok(chart)
    }

    /// Opens the panel, rendering it on first use, and returns the anchor
    /// the page jumps to.
    pub fn expand<B: ChartBackend + ?Sized>(
        &mut self,
        store: &SeriesStore,
        backend: &mut B,
        timezone_offset: f64,
    ) -> Result<&'static str, PanelError> {
        self.ensure_rendered(store, backend, timezone_offset)?;
        self.expanded = true;
        Ok(self.config.anchor)
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// Flips one legend checkbox and redraws. Returns the new checkbox state.
    pub fn toggle_series<B: ChartBackend + ?Sized>(
        &mut self,
        label: &str,
        backend: &mut B,
    ) -> Result<bool, PanelError> {
        let config = self.config;
        let chart = self.rendered()?;

        let checked = chart.legend.toggle(label)?;
        chart.draw(config, backend)?;

        Ok(checked)
    }

    /// Sets every legend checkbox and redraws once.
    pub fn toggle_all<B: ChartBackend + ?Sized>(
        &mut self,
        checked: bool,
        backend: &mut B,
    ) -> Result<(), PanelError> {
        let config = self.config;
        let chart = self.rendered()?;

        chart.legend.toggle_all(checked);
        chart.draw(config, backend)
    }

    /// Range selection on the main chart.
    pub fn select<B: ChartBackend + ?Sized>(
        &mut self,
        ranges: Ranges,
        backend: &mut B,
    ) -> Result<Ranges, PanelError> {
        self.zoom_with(backend, |viewport| Some(viewport.select(ranges)))
            .map(|selected| selected.unwrap_or(ranges))
    }

    /// Range selection on the overview chart.
    pub fn select_overview<B: ChartBackend + ?Sized>(
        &mut self,
        ranges: Ranges,
        backend: &mut B,
    ) -> Result<Ranges, PanelError> {
        self.zoom_with(backend, |viewport| Some(viewport.select_overview(ranges)))
            .map(|selected| selected.unwrap_or(ranges))
    }

    /// Drops the overview selection and shows the whole dataset again.
    pub fn clear_overview<B: ChartBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<(), PanelError> {
        self.zoom_with(backend, |viewport| {
            viewport.clear_overview();
            None
        })
        .map(|_| ())
    }

    fn zoom_with<B, F>(&mut self, backend: &mut B, f: F) -> Result<Option<Ranges>, PanelError>
    where
        B: ChartBackend + ?Sized,
        F: FnOnce(&mut Viewport) -> Option<Ranges>,
    {
        let config = self.config;
        let chart = self.rendered()?;

        let viewport = chart
            .viewport
            .as_mut()
            .ok_or(PanelError::NotZoomable(config.id))?;
        let selected = f(viewport);

        chart.zoom(config, backend)?;

        Ok(selected)
    }

    /// Tooltip text for a hovered point, if the panel shows tooltips.
    pub fn hover_text(&self, label: &str, x: f64, y: f64) -> Result<Option<String>, PanelError> {
        let chart = self
            .chart
            .as_ref()
            .ok_or(PanelError::NotRendered(self.config.id))?;

        Ok(chart.options.hover_text(label, x, y))
    }

    fn rendered(&mut self) -> Result<&mut Chart, PanelError> {
        let id = self.config.id;
        self.chart.as_mut().ok_or(PanelError::NotRendered(id))
    }
}

// the aggregate panels do not filter, so there is no pattern to report
fn filter_text<'a>(store: &'a SeriesStore, preparation: &Preparation) -> &'a str {
    match preparation.mode {
        FilterMode::Apply => store.filter().pattern(),
        FilterMode::Ignore => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisRange, Drawing, JsonBackend, MIN_SPAN};
    use crate::report::tests::{dataset, series, AUTH_REPORT};
    use crate::report::{Report, SeriesFilter};

    fn store(filter: SeriesFilter) -> SeriesStore {
        SeriesStore::new(Report::from_json(AUTH_REPORT).unwrap(), filter)
    }

    fn panel(id: &str) -> Panel {
        Panel::new(find(id).unwrap())
    }

    fn ranges(x: (f64, f64), y: (f64, f64)) -> Ranges {
        Ranges {
            xaxis: AxisRange { from: x.0, to: x.1 },
            yaxis: AxisRange { from: y.0, to: y.1 },
        }
    }

    fn plotted_labels(backend: &JsonBackend, container: &str) -> Vec<String> {
        match backend.get(container) {
            Some(Drawing::Plot { series, .. }) => series.iter().map(|s| s.label.clone()).collect(),
            other => panic!("expected a plot in {container}, got {other:?}"),
        }
    }

    #[test]
    fn renders_once_across_expand_collapse_cycles() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("bytesThroughputOverTime");

        assert_eq!(panel.state(), RenderState::Collapsed);
        assert_eq!(panel.chevron(), Chevron::Down);

        for _ in 0..3 {
            let anchor = panel.expand(&store, &mut backend, 0.0).unwrap();
            assert_eq!(anchor, "#bytesThroughputOverTime");
            assert_eq!(panel.chevron(), Chevron::Up);

            panel.collapse();
            assert_eq!(panel.chevron(), Chevron::Down);
        }

        assert_eq!(panel.state(), RenderState::Rendered);
        assert_eq!(backend.draw_count("flotBytesThroughputOverTime"), 1);
        assert_eq!(backend.draw_count("overviewBytesThroughputOverTime"), 1);
    }

    #[test]
    fn missing_dataset_leaves_panel_collapsed() {
        let store = SeriesStore::new(Report::default(), SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("hitsPerSecond");

        assert!(matches!(
            panel.expand(&store, &mut backend, 0.0),
            Err(PanelError::MissingDataset(id)) if id == "hitsPerSecond"
        ));
        assert_eq!(panel.state(), RenderState::Collapsed);
        assert!(!panel.is_expanded());
        assert!(panel.legend().is_none());
    }

    #[test]
    fn missing_container_can_be_retried() {
        let store = store(SeriesFilter::default());
        let mut panel = panel("hitsPerSecond");

        let mut partial = JsonBackend::with_containers(["flotHitsPerSecond"]);
        assert!(matches!(
            panel.ensure_rendered(&store, &mut partial, 0.0),
            Err(PanelError::Chart(ChartError::MissingContainer(_)))
        ));
        assert_eq!(panel.state(), RenderState::Collapsed);

        let mut full = JsonBackend::new();
        panel.ensure_rendered(&store, &mut full, 0.0).unwrap();
        assert_eq!(panel.state(), RenderState::Rendered);
    }

    #[test]
    fn empty_dataset_shows_body_placeholder() {
        let store = store(SeriesFilter::new("checkout", false, false).unwrap());
        let mut backend = JsonBackend::new();
        let mut panel = panel("responseTimesOverTime");

        panel.expand(&store, &mut backend, 0.0).unwrap();

        assert_eq!(panel.state(), RenderState::Rendered);
        assert_eq!(
            backend.get("bodyResponseTimeOverTime"),
            Some(&Drawing::Placeholder {
                text: "No graph series with filter=checkout".to_string()
            })
        );
        assert_eq!(backend.draw_count("flotResponseTimesOverTime"), 0);
    }

    #[test]
    fn empty_dataset_placeholder_on_every_panel() {
        let mut report = Report::default();
        report
            .insert("syntheticResponseTimeDistribution", dataset("Synthetic", vec![]))
            .unwrap();
        let store = SeriesStore::new(report, SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("syntheticResponseTimeDistribution");

        panel.expand(&store, &mut backend, 0.0).unwrap();

        assert!(matches!(
            backend.get("bodySyntheticResponseTimeDistribution"),
            Some(Drawing::Placeholder { .. })
        ));
        assert_eq!(backend.draw_count("flotSyntheticResponseTimeDistribution"), 0);
    }

    #[test]
    fn toggle_single_series() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("responseTimePercentiles");
        panel.expand(&store, &mut backend, 0.0).unwrap();

        assert_eq!(
            plotted_labels(&backend, "flotResponseTimesPercentiles"),
            vec!["Login Request"]
        );

        assert!(!panel.toggle_series("Login Request", &mut backend).unwrap());
        assert_eq!(
            backend.get("flotResponseTimesPercentiles"),
            Some(&Drawing::Placeholder {
                text: NO_SERIES_SELECTED.to_string()
            })
        );
        // the legend stays usable
        assert!(matches!(
            backend.get("choicesResponseTimePercentiles"),
            Some(Drawing::Choices { entries }) if !entries[0].checked && entries[0].color == "#818181"
        ));

        assert!(panel.toggle_series("Login Request", &mut backend).unwrap());
        assert_eq!(
            plotted_labels(&backend, "flotResponseTimesPercentiles"),
            vec!["Login Request"]
        );
    }

    #[test]
    fn toggle_all_restores_full_set() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("responseTimePercentilesOverTime");
        panel.expand(&store, &mut backend, 0.0).unwrap();

        let container = "flotResponseTimePercentilesOverTime";
        let all = plotted_labels(&backend, container);
        assert_eq!(all.len(), 6);

        panel.toggle_series("Max", &mut backend).unwrap();
        assert_eq!(plotted_labels(&backend, container).len(), 5);

        panel.toggle_all(false, &mut backend).unwrap();
        assert!(matches!(backend.get(container), Some(Drawing::Placeholder { .. })));

        let before = backend.draw_count(container);
        panel.toggle_all(true, &mut backend).unwrap();
        assert_eq!(backend.draw_count(container), before + 1);
        assert_eq!(plotted_labels(&backend, container), all);
    }

    #[test]
    fn unknown_series_is_an_error() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("hitsPerSecond");
        panel.expand(&store, &mut backend, 0.0).unwrap();

        assert!(matches!(
            panel.toggle_series("p99", &mut backend),
            Err(PanelError::Legend(LegendError::UnknownSeries(_)))
        ));
    }

    #[test]
    fn interactions_need_a_rendered_panel() {
        let mut backend = JsonBackend::new();
        let mut panel = panel("hitsPerSecond");

        assert!(matches!(
            panel.toggle_series("hitsPerSecond", &mut backend),
            Err(PanelError::NotRendered("hitsPerSecond"))
        ));
        assert!(matches!(
            panel.toggle_all(true, &mut backend),
            Err(PanelError::NotRendered(_))
        ));
        assert!(matches!(
            panel.clear_overview(&mut backend),
            Err(PanelError::NotRendered(_))
        ));
    }

    #[test]
    fn unchecking_everything_clears_the_overview() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("totalTPS");
        panel.expand(&store, &mut backend, 0.0).unwrap();
        assert!(matches!(
            backend.get("overviewTotalTPS"),
            Some(Drawing::Plot { .. })
        ));

        panel.toggle_all(false, &mut backend).unwrap();

        for container in ["flotTotalTPS", "overviewTotalTPS"] {
            match backend.get(container) {
                Some(Drawing::Placeholder { text }) => assert_eq!(text, NO_SERIES_SELECTED),
                other => panic!("expected placeholder in {container}, got {other:?}"),
            }
        }

        panel.toggle_all(true, &mut backend).unwrap();
        match backend.get("overviewTotalTPS") {
            Some(Drawing::Plot { series, .. }) => assert_eq!(series.len(), 2),
            other => panic!("expected overview plot, got {other:?}"),
        }
    }

    #[test]
    fn zoom_and_reset() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("timeVsThreads");
        panel.expand(&store, &mut backend, 0.0).unwrap();

        let selected = panel
            .select(ranges((10.0, 10.0), (3000.0, 5000.0)), &mut backend)
            .unwrap();
        assert_eq!(selected.xaxis.to, 10.0 + MIN_SPAN);
        assert_eq!(panel.viewport().unwrap().zoom(), Some(selected));

        match backend.get("flotTimesVsThreads") {
            Some(Drawing::Plot { options, .. }) => {
                assert_eq!(options.xaxis.min, Some(10.0));
                assert_eq!(options.yaxis.max, Some(5000.0));
            }
            other => panic!("expected zoomed plot, got {other:?}"),
        }
        // the overview is not redrawn by a zoom
        assert_eq!(backend.draw_count("overviewTimesVsThreads"), 1);

        panel
            .select_overview(ranges((20.0, 40.0), (3000.0, 9000.0)), &mut backend)
            .unwrap();
        match backend.get("flotTimesVsThreads") {
            Some(Drawing::Plot { options, .. }) => assert_eq!(options.xaxis.max, Some(40.0)),
            other => panic!("expected zoomed plot, got {other:?}"),
        }

        panel.clear_overview(&mut backend).unwrap();
        assert_eq!(panel.viewport().unwrap().zoom(), None);
        match backend.get("flotTimesVsThreads") {
            Some(Drawing::Plot { options, .. }) => {
                assert_eq!(options.xaxis.min, Some(1.0));
                assert_eq!(options.xaxis.max, Some(100.0));
            }
            other => panic!("expected full plot, got {other:?}"),
        }
    }

    #[test]
    fn bar_charts_are_not_zoomable() {
        let store = store(SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("responseTimeDistribution");
        panel.expand(&store, &mut backend, 0.0).unwrap();

        assert!(matches!(
            panel.select(ranges((0.0, 1.0), (0.0, 1.0)), &mut backend),
            Err(PanelError::NotZoomable("responseTimeDistribution"))
        ));
    }

    #[test]
    fn timestamps_are_shifted_once() {
        let mut report = Report::default();
        report
            .insert(
                "hitsPerSecond",
                dataset("Hits", vec![series("hitsPerSecond", &[(1000.0, 1.0)])]),
            )
            .unwrap();
        let store = SeriesStore::new(report, SeriesFilter::default());
        let mut backend = JsonBackend::new();
        let mut panel = panel("hitsPerSecond");

        panel.expand(&store, &mut backend, 500.0).unwrap();
        panel.toggle_all(true, &mut backend).unwrap();
        panel.toggle_all(true, &mut backend).unwrap();

        match backend.get("flotHitsPerSecond") {
            Some(Drawing::Plot { series, .. }) => assert_eq!(series[0].data[0].x(), 1500.0),
            other => panic!("expected plot, got {other:?}"),
        }
    }
}
