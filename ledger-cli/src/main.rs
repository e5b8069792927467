use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::debug;

use ledger_cli::cli::{Cli, Command};
use ledger_cli::config::Config;
use ledger_cli::{app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.log_file {
        config.logging.file = Some(path);
    }
    logging::init_logging(&config.logging, cli.log_level.as_deref())
        .context("failed to configure logging")?;
    debug!(?config, "configuration loaded");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Withholding(args) => {
            app::run_withholding(&args, Local::now().date_naive(), &mut stdout)?;
        }
        Command::Details(args) => {
            app::run_details(&args, &config.formset, &mut stdout)?;
        }
    }

    Ok(())
}
