//! The report page: every panel of the catalog over one report.

use crate::chart::{ChartBackend, Containers, Ranges, Viewport};
use crate::legend::Legend;
use crate::panel::{find, Chevron, Panel, PanelError, RenderState, CATALOG};
use crate::report::{Report, SeriesFilter, SeriesStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Panels rendered on page load unless configured otherwise.
pub const DEFAULT_EAGER: &[&str] = &[
    "hitsPerSecond",
    "responseTimesOverTime",
    "responseTimePercentiles",
];

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no panel with id {0:?}")]
    UnknownPanel(String),
    #[error("panel {id}: {source}")]
    Panel {
        id: &'static str,
        #[source]
        source: PanelError,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub eager: Vec<String>,
    /// Milliseconds added to time-axis x values.
    pub timezone_offset: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            eager: DEFAULT_EAGER.iter().map(|id| id.to_string()).collect(),
            timezone_offset: 0.0,
        }
    }
}

/// A user interaction on the page. Panels are addressed by dataset id or by
/// the id of their choices container.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Expand { panel: String },
    Collapse { panel: String },
    ToggleSeries { panel: String, label: String },
    ToggleAll { panel: String, checked: bool },
    Select { panel: String, ranges: Ranges },
    SelectOverview { panel: String, ranges: Ranges },
    ClearOverview { panel: String },
}

impl Event {
    pub fn panel(&self) -> &str {
        match self {
            Self::Expand { panel }
            | Self::Collapse { panel }
            | Self::ToggleSeries { panel, .. }
            | Self::ToggleAll { panel, .. }
            | Self::Select { panel, .. }
            | Self::SelectOverview { panel, .. }
            | Self::ClearOverview { panel } => panel,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Expanded { anchor: &'static str },
    Collapsed,
    Toggled { checked: bool },
    Redrawn,
    Zoomed { ranges: Ranges },
    Reset,
}

/// Serializable snapshot of one panel.
#[derive(Serialize)]
pub struct PanelView<'a> {
    pub id: &'static str,
    pub title: &'static str,
    pub anchor: &'static str,
    pub state: RenderState,
    pub expanded: bool,
    pub chevron: Chevron,
    pub zoomable: bool,
    pub containers: Containers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<&'a Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<&'a Viewport>,
}

impl<'a> From<&'a Panel> for PanelView<'a> {
    fn from(panel: &'a Panel) -> Self {
        let config = panel.config();

        Self {
            id: config.id,
            title: config.title,
            anchor: config.anchor,
            state: panel.state(),
            expanded: panel.is_expanded(),
            chevron: panel.chevron(),
            zoomable: config.zoomable(),
            containers: config.containers,
            legend: panel.legend(),
            viewport: panel.viewport(),
        }
    }
}

pub struct Dashboard<B> {
    store: SeriesStore,
    settings: Settings,
    panels: Vec<Panel>,
    backend: B,
}

impl<B: ChartBackend> Dashboard<B> {
    pub fn new(report: Report, filter: SeriesFilter, settings: Settings, backend: B) -> Self {
        Self {
            store: SeriesStore::new(report, filter),
            settings,
            panels: CATALOG.iter().map(Panel::new).collect(),
            backend,
        }
    }

    /// Renders and opens the eager panels. A panel that fails to render is
    /// skipped, the page stays usable. Returns how many panels rendered.
    pub fn load(&mut self) -> usize {
        let mut rendered = 0;

        for id in self.settings.eager.clone() {
            match self.handle(Event::Expand { panel: id.clone() }) {
                Ok(_) => rendered += 1,
                Err(e) => debug!("skipping eager panel {id}: {e}"),
            }
        }

        info!("page loaded with {rendered} eager panels");
        rendered
    }

    pub fn handle(&mut self, event: Event) -> Result<Outcome, DashboardError> {
        let index = self.index(event.panel())?;
        let offset = self.settings.timezone_offset;
        let panel = &mut self.panels[index];
        let id = panel.id();
        let backend = &mut self.backend;

        debug!("{event:?}");

        let outcome = match event {
            Event::Expand { .. } => panel
                .expand(&self.store, backend, offset)
                .map(|anchor| Outcome::Expanded { anchor }),
            Event::Collapse { .. } => {
                panel.collapse();
                Ok(Outcome::Collapsed)
            }
            Event::ToggleSeries { label, .. } => panel
                .toggle_series(&label, backend)
                .map(|checked| Outcome::Toggled { checked }),
            Event::ToggleAll { checked, .. } => {
                panel.toggle_all(checked, backend).map(|_| Outcome::Redrawn)
            }
            Event::Select { ranges, .. } => panel
                .select(ranges, backend)
                .map(|ranges| Outcome::Zoomed { ranges }),
            Event::SelectOverview { ranges, .. } => panel
                .select_overview(ranges, backend)
                .map(|ranges| Outcome::Zoomed { ranges }),
            Event::ClearOverview { .. } => panel.clear_overview(backend).map(|_| Outcome::Reset),
        };

        outcome.map_err(|source| DashboardError::Panel { id, source })
    }

    /// Tooltip text for a point of a rendered panel.
    pub fn hover(
        &self,
        id: &str,
        label: &str,
        x: f64,
        y: f64,
    ) -> Result<Option<String>, DashboardError> {
        let panel = &self.panels[self.index(id)?];

        panel
            .hover_text(label, x, y)
            .map_err(|source| DashboardError::Panel {
                id: panel.id(),
                source,
            })
    }

    fn index(&self, id: &str) -> Result<usize, DashboardError> {
        find(id)
            .and_then(|config| {
                self.panels
                    .iter()
                    .position(|p| p.id() == config.id)
            })
            .ok_or_else(|| DashboardError::UnknownPanel(id.to_string()))
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.index(id).ok().map(|index| &self.panels[index])
    }

    pub fn views(&self) -> Vec<PanelView<'_>> {
        self.panels.iter().map(PanelView::from).collect()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
