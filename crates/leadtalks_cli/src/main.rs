//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load the demo data set and print the kanban board with stage totals.
//! - Accept an optional search query as first argument.
//! - Write logs under `LEADTALKS_LOG_DIR` when it is set.
//! - Keep output deterministic for quick local sanity checks.

use leadtalks_core::logging::init_logging_from_config;
use leadtalks_core::{core_version, CoreConfig, CrmStore, SystemClock, TextFilter};
use std::process::ExitCode;

/// Absolute directory for rolling log files; logging stays off when unset.
const LOG_DIR_ENV: &str = "LEADTALKS_LOG_DIR";

fn main() -> ExitCode {
    let query = std::env::args().nth(1).unwrap_or_default();
    let config = CoreConfig::default();

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging_from_config(&config, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = match CrmStore::with_demo_data(config, SystemClock) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to load demo data: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("leadtalks_core version={}", core_version());
    if !query.is_empty() {
        println!("busca={query}");
    }

    for column in store.board(&TextFilter::new(&query)) {
        println!("[{}] {}", column.stage.label, column.summary());
        for lead in &column.leads {
            println!("  - {} ({})", lead.name, lead.company);
        }
    }

    let orphans = store.orphaned_leads();
    if !orphans.is_empty() {
        log::warn!(
            "event=board_render module=cli status=warn orphaned_leads={}",
            orphans.len()
        );
    }

    ExitCode::SUCCESS
}
