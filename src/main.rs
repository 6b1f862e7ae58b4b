use backtrace::Backtrace;
use clap::Command;
use tracing::error;

mod chart;
mod cli;
mod config;
mod dashboard;
mod legend;
mod panel;
mod render;
mod report;
mod viewer;

fn main() {
    // custom panic hook to terminate whole process after unwinding
    std::panic::set_hook(Box::new(|s| {
        eprintln!("{s}");
        eprintln!("{:?}", Backtrace::new());
        std::process::exit(101);
    }));

    // parse command line options
    let matches = Command::new(env!("CARGO_BIN_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_about(
            "Replays the datasets of a JMeter HTML report through a chart backend. \
            Panels render lazily, legends hide series and overview charts zoom.",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(render::command())
        .subcommand(viewer::command())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("render", args)) => render::Config::try_from(args.clone()).and_then(render::run),
        Some(("view", args)) => viewer::Config::try_from(args.clone()).and_then(viewer::run),
        _ => unreachable!("a subcommand is required"),
    };

    if let Err(e) = result {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
