// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fairie: install software packages one at a time.

mod color;
mod env;
mod exit_error;
mod logging;
mod plain;
mod plan;
mod tui;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use exit_error::ExitError;
use fairie_core::{JobQueue, OnFailure};
use fairie_engine::{Frontend, JobLogger, RunReport, Runtime, RuntimeConfig};
use fairie_runner::ProcessRunner;
use plain::PlainFrontend;
use plan::SourceArgs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tui::TerminalFrontend;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

#[derive(Parser)]
#[command(
    name = "fairie",
    version,
    long_version = LONG_VERSION,
    about = "Install software packages one at a time",
    styles = color::styles(),
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// After a failed package: `continue` after a short pause, or `pause` until `n`
    #[arg(long, value_name = "POLICY", default_value_t = OnFailure::Continue)]
    on_failure: OnFailure,

    /// How long a failure stays on screen under `continue` [env: FAIRIE_FAILURE_HOLD_MS]
    #[arg(long, value_name = "MS")]
    failure_hold_ms: Option<u64>,

    /// Spinner animation interval [env: FAIRIE_TICK_MS]
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Line-oriented output instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// Diagnostic log file (default: <state dir>/fairie.log)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Directory for logs and per-package output [env: FAIRIE_STATE_DIR]
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Show how each package would be installed, without running anything
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fairie: {e:#}");
            e.downcast_ref::<ExitError>().map_or(1, |e| e.code)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let state_dir = cli.run.state_dir.clone().or_else(env::state_dir);
    let log_path =
        cli.run.log_file.clone().or_else(|| state_dir.as_ref().map(|dir| dir.join("fairie.log")));
    let _guard = log_path.as_deref().and_then(|path| {
        logging::init(path, &env::log_filter())
            .map_err(|e| eprintln!("fairie: warning: {e:#}"))
            .ok()
    });
    tracing::info!(version = LONG_VERSION, "fairie starting");

    match cli.command {
        Some(Command::List { source }) => list(&source),
        None => install(&cli.source, &cli.run, state_dir).await,
    }
}

fn list(source: &SourceArgs) -> anyhow::Result<i32> {
    let rows = plan::plan_rows(source, env::platform())?;
    print!("{}", plan::format_rows(&rows));
    Ok(if rows.iter().all(plan::PlanRow::is_installable) { 0 } else { 1 })
}

fn runtime_config(args: &RunArgs) -> Result<RuntimeConfig, ExitError> {
    let defaults = RuntimeConfig::default();
    let tick = args
        .tick_ms
        .map(Duration::from_millis)
        .or_else(env::tick)
        .unwrap_or(defaults.tick);
    if tick.is_zero() {
        return Err(ExitError::config("tick interval must be greater than zero"));
    }
    let failure_hold = args
        .failure_hold_ms
        .map(Duration::from_millis)
        .or_else(env::failure_hold)
        .unwrap_or(defaults.failure_hold);
    Ok(RuntimeConfig { on_failure: args.on_failure, failure_hold, tick, ..defaults })
}

async fn install(
    source: &SourceArgs,
    args: &RunArgs,
    state_dir: Option<PathBuf>,
) -> anyhow::Result<i32> {
    let config = runtime_config(args)?;
    let queue = source.queue(env::platform())?;
    let logger = state_dir.map(|dir| JobLogger::new(dir.join("logs")));
    tracing::info!(
        packages = queue.len(),
        on_failure = %config.on_failure,
        failure_hold_ms = config.failure_hold.as_millis() as u64,
        "starting install run"
    );

    let (ui_tx, ui_rx) = mpsc::channel(16);
    let report = if args.plain || !std::io::stdout().is_terminal() {
        plain::spawn_input(ui_tx);
        let frontend = PlainFrontend::new(std::io::stdout());
        drive(queue, frontend, config, ui_rx, logger, None).await.0
    } else {
        let frontend = TerminalFrontend::enter().context("cannot start terminal interface")?;
        let viewport = frontend.viewport();
        tui::spawn_input(ui_tx);
        let (report, frontend) =
            drive(queue, frontend, config, ui_rx, logger, Some(viewport)).await;
        // Leave the alternate screen before printing.
        drop(frontend);
        println!("{}", summary(&report));
        report
    };
    Ok(report.exit_code())
}

async fn drive<F: Frontend>(
    queue: JobQueue,
    frontend: F,
    config: RuntimeConfig,
    ui_events: mpsc::Receiver<fairie_engine::UiEvent>,
    logger: Option<JobLogger>,
    viewport: Option<fairie_engine::Viewport>,
) -> (RunReport, F) {
    let mut runtime =
        Runtime::new(queue, ProcessRunner::new(), frontend, config).with_ui_events(ui_events);
    if let Some(logger) = logger {
        runtime = runtime.with_job_logger(logger);
    }
    if let Some(viewport) = viewport {
        runtime = runtime.with_viewport(viewport);
    }
    runtime.run().await
}

fn summary(report: &RunReport) -> String {
    let failed: Vec<&str> = report
        .history
        .iter()
        .filter(|r| r.outcome.is_failed())
        .map(|r| r.name.as_str())
        .collect();
    let mut line = format!("{} installed, {} failed", report.done_count(), failed.len());
    if report.history.len() < report.total {
        line.push_str(&format!(", {} not attempted", report.total - report.history.len()));
    }
    if !failed.is_empty() {
        line.push_str(&format!(" ({})", failed.join(", ")));
    }
    line
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
