use crate::chart::ChartBackend;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::report::Report;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::{debug, Level};

/// Adds the arguments every subcommand takes.
pub fn args(command: Command) -> Command {
    command
        .arg(
            Arg::new("REPORT")
                .help("Report data file with one dataset per graph")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Set)
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("CONFIG")
                .long("config")
                .short('c')
                .help("TOML configuration file")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("VERBOSE")
                .long("verbose")
                .short('v')
                .help("Increase the verbosity")
                .action(ArgAction::Count),
        )
}

/// Settings shared by every subcommand.
pub struct Common {
    pub report: PathBuf,
    pub config: Config,
    pub verbose: u8,
}

impl TryFrom<&ArgMatches> for Common {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> Result<Self, Self::Error> {
        let report = args
            .get_one::<PathBuf>("REPORT")
            .context("a report file is required")?
            .to_path_buf();

        let config = match args.get_one::<PathBuf>("CONFIG") {
            Some(path) => Config::load(path)
                .with_context(|| format!("error loading config file: {}", path.display()))?,
            None => Config::default(),
        };

        Ok(Self {
            report,
            config,
            verbose: *args.get_one::<u8>("VERBOSE").unwrap_or(&0),
        })
    }
}

impl Common {
    /// Installs the stderr log subscriber. The config sets the base level,
    /// each `-v` raises it by one step.
    pub fn init_logging(&self) {
        let level: Level = self.config.log().log_level().raised(self.verbose).into();

        // a subscriber may already be installed when running under a test harness
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(level > Level::INFO)
            .try_init();
    }

    pub fn dashboard<B: ChartBackend>(&self, backend: B) -> anyhow::Result<Dashboard<B>> {
        debug!("loading report data: {}", self.report.display());

        let report = Report::load(&self.report)
            .with_context(|| format!("failed to load report: {}", self.report.display()))?;

        debug!("report has {} datasets", report.len());

        let settings = self.config.report();
        let filter = settings.filter()?;

        Ok(Dashboard::new(report, filter, settings.settings()?, backend))
    }
}
