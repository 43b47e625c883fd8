//! Boot — logging init, config load, rule table build, state creation.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::batch::Analyzer;
use crate::conf::EngineConfig;
use crate::state::{EngineState, SharedState};

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load config, build the rule table, and create shared engine state.
///
/// Returns `(SharedState, EngineConfig)` on success.
pub fn boot() -> Result<(SharedState, EngineConfig), Box<dyn std::error::Error>> {
    info!("Starting triage engine v0.0.1");

    // Load configuration (file or env)
    let config = EngineConfig::load()?;
    config.validate()?;
    info!(
        "Loaded configuration: ai_assist={}, parallelism={}",
        config.ai_assist, config.parallelism
    );

    // Build the process-wide immutable rule table
    let table = config.load_rule_table()?;
    info!(
        "Rule table ready: {} rules, fallback category '{}'",
        table.len(),
        table.fallback_category()
    );

    let analyzer = Analyzer::new(Arc::new(table));
    let state = Arc::new(EngineState::new(analyzer, config.clone()));
    info!("Initialized shared engine state");

    Ok((state, config))
}
