use crate::chart::JsonBackend;
use crate::cli::{self, Common};
use crate::dashboard::{DashboardError, Event};
use crate::panel::{template_containers, CATALOG};
use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn command() -> Command {
    cli::args(
        Command::new("render").about("Render report panels to JSON draw documents"),
    )
    .arg(
        Arg::new("OUTPUT")
            .long("output")
            .short('o')
            .help("Directory that receives one <container>.json per drawn container")
            .value_parser(value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("PANEL")
            .long("panel")
            .short('p')
            .help("Panel to expand, by dataset id. Defaults to every panel")
            .action(ArgAction::Append),
    )
}

pub struct Config {
    common: Common,
    output: Option<PathBuf>,
    panels: Vec<String>,
}

impl TryFrom<ArgMatches> for Config {
    type Error = anyhow::Error;

    fn try_from(args: ArgMatches) -> Result<Self, Self::Error> {
        Ok(Config {
            common: Common::try_from(&args)?,
            output: args.get_one::<PathBuf>("OUTPUT").cloned(),
            panels: args
                .get_many::<String>("PANEL")
                .map(|panels| panels.cloned().collect())
                .unwrap_or_default(),
        })
    }
}

/// Loads the page like a browser would, then expands the requested panels
/// and writes every resulting drawing.
pub fn run(config: Config) -> anyhow::Result<()> {
    config.common.init_logging();

    let backend = render(&config)?;

    match &config.output {
        Some(dir) => write_documents(&backend, dir),
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, backend.drawings())?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

fn render(config: &Config) -> anyhow::Result<JsonBackend> {
    let backend = JsonBackend::with_containers(template_containers());
    let mut dashboard = config.common.dashboard(backend)?;
    dashboard.load();

    let panels: Vec<String> = if config.panels.is_empty() {
        CATALOG.iter().map(|c| c.id.to_string()).collect()
    } else {
        config.panels.clone()
    };

    for id in panels {
        match dashboard.handle(Event::Expand { panel: id }) {
            Ok(_) => {}
            Err(e @ DashboardError::UnknownPanel(_)) => bail!(e),
            Err(e) => warn!("{e}"),
        }
    }

    Ok(dashboard.into_backend())
}

fn write_documents(backend: &JsonBackend, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    for (container, drawing) in backend.drawings() {
        let path = dir.join(format!("{container}.json"));
        let content = serde_json::to_vec_pretty(drawing)?;

        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(
        "wrote {} documents to {}",
        backend.drawings().len(),
        dir.display()
    );

    Ok(())
}
