use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use increment_build_number::cli::{run_workflow, ExitStatus, RunArgs};
use increment_build_number::config;
use increment_build_number::domain::IncrementMode;
use increment_build_number::git::Git2StatusProbe;
use increment_build_number::report::ConsoleReporter;
use increment_build_number::ui;

#[derive(clap::Parser)]
#[command(
    name = "increment-build-number",
    version,
    about = "Increment the version in AssemblyInfo.cs, project files and package.json",
    after_help = "The build number is incremented unless only --major or --minor is given.\n\
                  The revision number is not used and will always be zero."
)]
struct Args {
    #[arg(help = "Directory containing the solution (defaults to the current directory)")]
    path: Option<PathBuf>,

    #[arg(long, help = "Increment the major version, set minor (and build) to zero")]
    major: bool,

    #[arg(long, help = "Increment the minor version, set build to zero")]
    minor: bool,

    #[arg(long, help = "Also increment the build number with --major or --minor")]
    build: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Skip the solution file and git status checks")]
    force: bool,

    #[arg(long, help = "Preview what would change without writing files")]
    dry_run: bool,

    #[arg(long, help = "Wait for a key press before exiting")]
    pause: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let config = match config::load_config(args.config.as_deref(), &root) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            finish(ExitStatus::ConfigError, args.pause)
        }
    };

    let run_args = RunArgs {
        root,
        mode: IncrementMode::from_flags(args.major, args.minor, args.build),
        force: args.force,
        dry_run: args.dry_run,
    };

    let mut reporter = ConsoleReporter::new(args.dry_run);
    let status = match run_workflow(&run_args, &config, &Git2StatusProbe, &mut reporter) {
        Ok(result) => result.status,
        Err(e) => {
            ui::display_error(&e.to_string());
            ExitStatus::ConfigError
        }
    };

    finish(status, args.pause || config.behavior.pause_before_exit)
}

fn finish(status: ExitStatus, pause: bool) -> ! {
    if pause {
        if let Err(e) = ui::pause_if_required() {
            ui::display_error(&format!("Cannot read from terminal: {}", e));
        }
    }
    std::process::exit(status.code())
}
