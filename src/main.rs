//! sticky-replay - headless window sizing replay
//!
//! Drives the note window sizing layer over a simulated window and prints the
//! window state after every scenario event.
//!
//! # Usage
//!
//! ```bash
//! sticky-replay scenario.json
//! sticky-replay scenario.json --json
//! sticky-replay scenario.json --db /tmp/window-state.sqlite --config ~/.sticky/config.json
//! sticky-replay scenario.json --persist
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sticky_notes::config::{load_config, load_config_from};
use sticky_notes::logging;
use sticky_notes::replay::{self, Scenario};
use sticky_notes::window_storage::{
    default_db_path, MemoryWindowStorage, SqliteWindowStorage, WindowStorage,
};

#[derive(Parser, Debug)]
#[command(name = "sticky-replay", version, about = "Replay a sticky note window sizing scenario")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Sizing config file (defaults to ~/.sticky/config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Persist window flags in this SQLite database instead of memory
    #[arg(long, conflicts_with = "persist")]
    db: Option<PathBuf>,

    /// Persist window flags in ~/.sticky/db/window-state.sqlite
    #[arg(long)]
    persist: bool,

    /// Print one JSON object per event instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _guard = logging::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_config(),
    };

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario {}", args.scenario.display()))?;

    let storage: Arc<dyn WindowStorage> = match &args.db {
        Some(path) => Arc::new(
            SqliteWindowStorage::open(path)
                .with_context(|| format!("Failed to open window storage {}", path.display()))?,
        ),
        None if args.persist => Arc::new(SqliteWindowStorage::open_default().with_context(
            || format!("Failed to open window storage {}", default_db_path().display()),
        )?),
        None => Arc::new(MemoryWindowStorage::new()),
    };

    info!(
        scenario = %args.scenario.display(),
        events = scenario.events.len(),
        "Replaying scenario"
    );

    for report in replay::run(&scenario, storage, config) {
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", report);
        }
    }

    Ok(())
}
