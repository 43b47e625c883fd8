//! Engine state — shared analyzer, config, and metrics.

use std::sync::Arc;

use crate::batch::Analyzer;
use crate::conf::EngineConfig;
use crate::metrics::EngineMetrics;

pub struct EngineState {
    pub analyzer: Analyzer,
    pub config: EngineConfig,
    pub metrics: Arc<EngineMetrics>,
}

impl EngineState {
    pub fn new(analyzer: Analyzer, config: EngineConfig) -> Self {
        let metrics = Arc::clone(analyzer.metrics());
        Self {
            analyzer,
            config,
            metrics,
        }
    }
}

pub type SharedState = Arc<EngineState>;
