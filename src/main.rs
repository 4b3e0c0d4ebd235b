mod cli;
mod config;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use visitlog::TrackerBuilder;

#[derive(Parser)]
#[command(name = "visitlog", about = "Track library check-ins, check-outs and visit history")]
pub struct Args {
    #[arg(long, help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "N", help = "Keep only the newest N history entries")]
    pub history_limit: Option<usize>,

    #[arg(long, value_name = "N", help = "Refuse check-ins beyond N active users")]
    pub max_active: Option<usize>,

    #[arg(long, value_name = "NAME", help = "Locale for dates and times, e.g. de_DE")]
    pub locale: Option<String>,

    #[arg(short, long, help = "Log check-ins, check-outs and ignored requests")]
    pub verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "visitlog=debug" } else { "visitlog=warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut cfg = match &args.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };

    // Command-line values win over the config file
    if args.history_limit.is_some() {
        cfg.history_limit = args.history_limit;
    }
    if args.max_active.is_some() {
        cfg.max_active = args.max_active;
    }
    if args.locale.is_some() {
        cfg.locale = args.locale;
    }

    if let Err(errors) = cfg.validate() {
        for e in &errors {
            eprintln!("Config error {}", e);
        }
        bail!("invalid configuration ({} problem(s))", errors.len());
    }

    let mut builder = TrackerBuilder::new();
    if let Some(limit) = cfg.history_limit {
        builder = builder.history_limit(limit);
    }
    if let Some(max) = cfg.max_active {
        builder = builder.max_active(max);
    }
    let tracker = builder.build()?;

    tracing::debug!(
        history_limit = ?cfg.history_limit,
        max_active = ?cfg.max_active,
        locale = ?cfg.locale,
        "tracker ready"
    );

    cli::run_repl(cli::Session::new(tracker, cfg.time_format()))
}
