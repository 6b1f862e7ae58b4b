use crate::chart::{ChartError, Drawing, JsonBackend, Ranges};
use crate::cli::{self, Common};
use crate::config::resolve;
use crate::dashboard::{Dashboard, DashboardError, Event, Outcome, PanelView};
use crate::panel::{template_containers, PanelError};
use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::{Arg, ArgAction, ArgMatches, Command};
use http::StatusCode;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::{debug, info};

pub fn command() -> Command {
    cli::args(Command::new("view").about("View a report in an interactive dashboard")).arg(
        Arg::new("LISTEN")
            .help("Viewer listen address, overrides the config file")
            .action(ArgAction::Set)
            .value_parser(resolve)
            .index(2),
    )
}

pub struct Config {
    common: Common,
    listen: SocketAddr,
}

impl TryFrom<ArgMatches> for Config {
    type Error = anyhow::Error;

    fn try_from(args: ArgMatches) -> Result<Self, Self::Error> {
        let common = Common::try_from(&args)?;

        let listen = match args.get_one::<SocketAddr>("LISTEN") {
            Some(listen) => *listen,
            None => common.config.general().listen()?,
        };

        Ok(Config { common, listen })
    }
}

pub fn run(config: Config) -> anyhow::Result<()> {
    config.common.init_logging();

    ctrlc::set_handler(move || {
        std::process::exit(2);
    })
    .context("failed to set ctrl-c handler")?;

    let backend = JsonBackend::with_containers(template_containers());
    let mut dashboard = config.common.dashboard(backend)?;
    dashboard.load();

    let state = Arc::new(AppState {
        dashboard: Mutex::new(dashboard),
    });

    // one page, one user: a single thread serves every request
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to launch async runtime")?;

    rt.block_on(serve(config.listen, state))
}

async fn serve(listen: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to listen on {listen}"))?;

    info!("viewer listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .await
        .context("viewer stopped")
}

struct AppState {
    dashboard: Mutex<Dashboard<JsonBackend>>,
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/about", get(about))
        .route("/panels", get(panels))
        .route("/panels/{id}", get(panel))
        .route("/panels/{id}/hover", get(hover))
        .route("/data/{file}", get(data))
        .route("/panels/{id}/expand", post(expand))
        .route("/panels/{id}/collapse", post(collapse))
        .route("/panels/{id}/series/{label}/toggle", post(toggle_series))
        .route("/panels/{id}/toggle-all", post(toggle_all))
        .route("/panels/{id}/select", post(select))
        .route("/panels/{id}/overview/select", post(select_overview))
        .route("/panels/{id}/overview/clear", post(clear_overview))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        )
}

enum ApiError {
    NotFound(String),
    Dashboard(DashboardError),
    Json(serde_json::Error),
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        Self::Dashboard(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_)
            | Self::Dashboard(DashboardError::UnknownPanel(_))
            | Self::Dashboard(DashboardError::Panel {
                source: PanelError::Chart(ChartError::MissingContainer(_)),
                ..
            }) => StatusCode::NOT_FOUND,
            Self::Dashboard(_) => StatusCode::BAD_REQUEST,
            Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            Self::NotFound(file) => format!("nothing drawn at {file}"),
            Self::Dashboard(e) => e.to_string(),
            Self::Json(e) => e.to_string(),
        };

        debug!("{status}: {message}");

        (status, format!("{message}\n")).into_response()
    }
}

// Basic /about page handler
async fn about() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("Loadview {version} Viewer\nServes the panels of one JMeter report\n")
}

async fn panels(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let dashboard = state.dashboard.lock();
    let views = serde_json::to_value(dashboard.views()).map_err(ApiError::Json)?;

    Ok(Json(views))
}

async fn panel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dashboard = state.dashboard.lock();
    let panel = dashboard
        .panel(&id)
        .ok_or(DashboardError::UnknownPanel(id))?;
    let view = serde_json::to_value(PanelView::from(panel)).map_err(ApiError::Json)?;

    Ok(Json(view))
}

#[derive(Deserialize)]
struct Point {
    label: String,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct Hover {
    text: Option<String>,
}

/// Tooltip text for the hovered point of a rendered panel.
async fn hover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(point): Query<Point>,
) -> Result<Json<Hover>, ApiError> {
    let dashboard = state.dashboard.lock();
    let text = dashboard.hover(&id, &point.label, point.x, point.y)?;

    Ok(Json(Hover { text }))
}

/// The latest drawing of a container, addressed as `<container>.json`.
async fn data(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Json<Drawing>, ApiError> {
    let container = file
        .strip_suffix(".json")
        .ok_or_else(|| ApiError::NotFound(file.clone()))?;

    let dashboard = state.dashboard.lock();

    dashboard
        .backend()
        .get(container)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound(file))
}

fn handle(state: &AppState, event: Event) -> Result<Json<Outcome>, ApiError> {
    let mut dashboard = state.dashboard.lock();
    Ok(Json(dashboard.handle(event)?))
}

async fn expand(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::Expand { panel })
}

async fn collapse(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::Collapse { panel })
}

async fn toggle_series(
    State(state): State<Arc<AppState>>,
    Path((panel, label)): Path<(String, String)>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::ToggleSeries { panel, label })
}

#[derive(Deserialize)]
struct ToggleAll {
    checked: bool,
}

async fn toggle_all(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Query(ToggleAll { checked }): Query<ToggleAll>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::ToggleAll { panel, checked })
}

async fn select(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Json(ranges): Json<Ranges>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::Select { panel, ranges })
}

async fn select_overview(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Json(ranges): Json<Ranges>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::SelectOverview { panel, ranges })
}

async fn clear_overview(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    handle(&state, Event::ClearOverview { panel })
}
