//! # Drawer-kun Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drawer-kun                                       │
//! │                                                                         │
//! │  main.rs ────► Parses flags, sets up logging                           │
//! │                                                                         │
//! │  lib.rs ─────► Opens the preference store, builds state, runs shell    │
//! │                                                                         │
//! │  shell.rs ───► bundle / manual / reset / copy / download ...           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use drawer_core::Locale;
use drawer_kun::state::AppConfig;

/// Cash-drawer tally calculator.
#[derive(Debug, Parser)]
#[command(name = "drawer-kun", version, about)]
struct Cli {
    /// Preference database path [env: DRAWER_DB_PATH]
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Folder for downloaded summaries [env: DRAWER_DOWNLOAD_DIR]
    #[arg(long, value_name = "DIR")]
    download_dir: Option<PathBuf>,

    /// Label language: ja or en [env: DRAWER_LOCALE]
    #[arg(long)]
    locale: Option<Locale>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    drawer_kun::init_tracing();

    let config = AppConfig::from_env().with_overrides(cli.db, cli.download_dir, cli.locale);

    match drawer_kun::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("drawer-kun: {e}");
            ExitCode::FAILURE
        }
    }
}
