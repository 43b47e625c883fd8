//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::rules::RuleTable;

use super::model::{EngineConfig, RuleFileConfig};

impl EngineConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("TRIAGE_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/triage/triage.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(rules) = std::env::var("TRIAGE_RULES_FILE") {
            config.rules_file = Some(rules);
        }
        if let Ok(ai) = std::env::var("TRIAGE_AI_ASSIST") {
            if let Ok(value) = ai.parse() {
                config.ai_assist = value;
            }
        }
        if let Ok(par) = std::env::var("TRIAGE_PARALLELISM") {
            if let Ok(value) = par.parse() {
                config.parallelism = value;
            }
        }
        if let Ok(pretty) = std::env::var("TRIAGE_OUTPUT_PRETTY") {
            if let Ok(value) = pretty.parse() {
                config.output_pretty = value;
            }
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: EngineConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        Self {
            rules_file: std::env::var("TRIAGE_RULES_FILE").ok(),
            ai_assist: std::env::var("TRIAGE_AI_ASSIST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            parallelism: std::env::var("TRIAGE_PARALLELISM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            output_pretty: std::env::var("TRIAGE_OUTPUT_PRETTY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Build the rule table: the user table from `rules_file` when set,
    /// otherwise the builtin one.
    pub fn load_rule_table(&self) -> Result<RuleTable, Box<dyn std::error::Error>> {
        match &self.rules_file {
            Some(path) => {
                tracing::info!("Loading rule table from: {}", path);
                let mut file = File::open(path)?;
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;

                let rule_file: RuleFileConfig = toml::from_str(&contents)?;
                let table = RuleTable::new(rule_file.rules)?;
                Ok(table)
            }
            None => Ok(RuleTable::builtin()),
        }
    }
}
