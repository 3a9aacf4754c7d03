//! Demo driver for the call interceptor.
//!
//! Wraps a sample ledger service living under the instrumented namespace,
//! runs a fixed scenario against it and lets the advice lines flow to stderr
//! through `tracing`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aoplog::interceptor::Interceptor;
use aoplog::io::config::{InterceptorConfig, load_config};
use aoplog::io::sink::Sink;
use aoplog::ledger::Ledger;
use aoplog::logging;
use clap::{Parser, Subcommand};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "aoplog",
    version,
    about = "Entry/exit/error logging around instrumented calls"
)]
struct Cli {
    /// Path to the TOML config. Defaults apply if the file is missing.
    #[arg(short, long, default_value = "aoplog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the sample ledger scenario with interception enabled (default).
    Run,
    /// Print the effective configuration as TOML.
    PrintConfig,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Run) {
        Command::Run => cmd_run(&cli.config),
        Command::PrintConfig => cmd_print_config(&cli.config),
    }
}

fn cmd_run(config_path: &Path) -> Result<()> {
    let cfg = load_config(config_path)?;
    logging::init(&cfg.filter_directive()?);
    let interceptor = Interceptor::from_config(cfg.tracing_sink()?, &cfg)?;
    let balance = run_scenario(&mut Ledger::new(&interceptor))?;
    println!("{balance}");
    Ok(())
}

fn cmd_print_config(config_path: &Path) -> Result<()> {
    let cfg = load_config(config_path)?;
    print!("{}", render_config(&cfg)?);
    Ok(())
}

fn render_config(cfg: &InterceptorConfig) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config toml")
}

/// Exercise every advice shape once. Returns the final balance.
fn run_scenario<S: Sink>(ledger: &mut Ledger<S>) -> Result<i64> {
    ledger.deposit(100)?;
    ledger.withdraw(30)?;
    if let Err(err) = ledger.withdraw(500) {
        warn!(err = %err, "withdrawal rejected");
    }
    ledger.find_account("savings")?;
    ledger.audit()?;
    ledger.forecast(12)?;
    ledger.summary()?;
    let balance = ledger.balance();
    ledger.reset()?;
    Ok(balance)
}
