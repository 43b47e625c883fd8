//! Model — EngineConfig and the rule-file schema.

use serde::{Deserialize, Serialize};

use crate::rules::Rule;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Optional TOML rule table replacing the builtin one.
    pub rules_file: Option<String>,
    /// Gates suggestion attachment in the driver; the engine itself never
    /// branches on it.
    pub ai_assist: bool,
    /// Worker count for the concurrent batch path; 0 or 1 means sequential.
    pub parallelism: usize,
    /// Pretty-print the JSON report.
    pub output_pretty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            ai_assist: true,
            parallelism: 0,
            output_pretty: true,
        }
    }
}

impl EngineConfig {
    /// Validate configuration values and referenced files.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.rules_file {
            if path.is_empty() {
                return Err("rules_file must not be an empty path".to_string());
            }
            if !std::path::Path::new(path).exists() {
                return Err(format!("rules_file not found at: {}", path));
            }
        }
        Ok(())
    }
}

/// On-disk shape of a user rule table: repeated `[[rules]]` entries with
/// `category` and `patterns`. Validation of table shape (catch-all placement,
/// regex compilation) happens in `RuleTable::new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFileConfig {
    pub rules: Vec<Rule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── EngineConfig Defaults ────────────────────────────────────

    #[test]
    fn test_engine_config_defaults() {
        let cfg = EngineConfig::default();
        assert!(cfg.rules_file.is_none());
        assert!(cfg.ai_assist);
        assert_eq!(cfg.parallelism, 0);
        assert!(cfg.output_pretty);
    }

    // ── Validation ───────────────────────────────────────────────

    #[test]
    fn test_validate_default_passes() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_rules_path() {
        let cfg = EngineConfig {
            rules_file: Some(String::new()),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("rules_file"), "Error should mention rules_file: {}", err);
    }

    #[test]
    fn test_validate_rejects_missing_rules_file() {
        let cfg = EngineConfig {
            rules_file: Some("/nonexistent/rules.toml".to_string()),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("not found"), "Error should mention the path: {}", err);
    }

    // ── Serialization Round-trip ─────────────────────────────────

    #[test]
    fn test_engine_config_toml_round_trip() {
        let cfg = EngineConfig {
            rules_file: Some("rules.toml".to_string()),
            ai_assist: false,
            parallelism: 4,
            output_pretty: false,
        };
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let deserialized: EngineConfig = toml::from_str(&toml_str).expect("Should deserialize");
        assert_eq!(deserialized.rules_file.as_deref(), Some("rules.toml"));
        assert!(!deserialized.ai_assist);
        assert_eq!(deserialized.parallelism, 4);
        assert!(!deserialized.output_pretty);
    }

    #[test]
    fn test_engine_config_deserialize_partial_toml() {
        // Only set parallelism; rest should use defaults via #[serde(default)]
        let toml_str = "parallelism = 8";
        let cfg: EngineConfig = toml::from_str(toml_str).expect("Should accept partial TOML");
        assert_eq!(cfg.parallelism, 8);
        assert!(cfg.ai_assist); // default
        assert!(cfg.rules_file.is_none()); // default
    }

    #[test]
    fn test_rule_file_config_deserialize() {
        let toml_str = r#"
            [[rules]]
            category = "OOM Kill"
            patterns = ["oom-killer", "out of memory"]

            [[rules]]
            category = "Timeout Error"
            patterns = ["timeout"]
        "#;
        let cfg: RuleFileConfig = toml::from_str(toml_str).expect("Should parse rule file");
        assert_eq!(cfg.rules.len(), 2);
        assert_eq!(cfg.rules[0].category, "OOM Kill");
        assert_eq!(cfg.rules[0].patterns, vec!["oom-killer", "out of memory"]);
        assert_eq!(cfg.rules[1].category, "Timeout Error");
    }
}
