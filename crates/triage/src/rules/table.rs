use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

use super::model::Rule;
use super::{FALLBACK_CATEGORY, MATCH_ANY_PATTERN};

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid regex pattern '{pattern}' in category '{category}': {message}")]
    InvalidPattern {
        category: String,
        pattern: String,
        message: String,
    },

    #[error("Rule table must contain at least one rule")]
    Empty,

    #[error("Category '{0}' has no patterns")]
    NoPatterns(String),

    #[error("Catch-all rule '{0}' must be the last rule in the table")]
    MisplacedFallback(String),
}

#[derive(Debug)]
struct CompiledRule {
    category: String,
    matchers: Vec<RegexMatcher>,
}

/// Ordered, first-match-wins rule table.
///
/// Rules are evaluated top-to-bottom and patterns within a rule in
/// declaration order. Construction guarantees the last rule is a catch-all,
/// so `classify` is total over all inputs, including empty lines. The table
/// is immutable once built; share it via `Arc`.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// The default rule set.
    ///
    /// Order matters! Earlier rules shadow later ones, and the catch-all
    /// must stay last or it would short-circuit the whole table.
    pub fn builtin() -> Self {
        let rules = vec![
            Rule::new("Exception Occurred", &["Exception", "ERROR", "CRITICAL"]),
            Rule::new("Timeout Error", &["timeout", "timed out", "connection lost"]),
            Rule::new("Disk Full", &["disk full", "No space left on device"]),
            Rule::new("Permission Denied", &["Permission denied", "Access is denied"]),
            Rule::new(FALLBACK_CATEGORY, &[MATCH_ANY_PATTERN]),
        ];
        Self::new(rules).expect("builtin rule table compiles")
    }

    /// Compile a rule table, validating its shape.
    ///
    /// Rejects empty tables, rules without patterns, invalid regexes, and a
    /// catch-all pattern anywhere but the last rule. If no rule carries a
    /// catch-all pattern, the builtin fallback rule is appended so every
    /// line is guaranteed a category.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::Empty);
        }

        let last_index = rules.len() - 1;
        let mut compiled = Vec::with_capacity(rules.len() + 1);

        for (index, rule) in rules.iter().enumerate() {
            if rule.patterns.is_empty() {
                return Err(RuleError::NoPatterns(rule.category.clone()));
            }

            let is_catch_all = rule.patterns.iter().any(|p| p == MATCH_ANY_PATTERN);
            if is_catch_all && index != last_index {
                return Err(RuleError::MisplacedFallback(rule.category.clone()));
            }

            compiled.push(CompiledRule {
                category: rule.category.clone(),
                matchers: compile_patterns(&rule.category, &rule.patterns)?,
            });
        }

        let has_fallback = rules
            .last()
            .map(|rule| rule.patterns.iter().any(|p| p == MATCH_ANY_PATTERN))
            .unwrap_or(false);

        if !has_fallback {
            compiled.push(CompiledRule {
                category: FALLBACK_CATEGORY.to_string(),
                matchers: compile_patterns(
                    FALLBACK_CATEGORY,
                    &[MATCH_ANY_PATTERN.to_string()],
                )?,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// Classify one line: the category of the first rule with any matching
    /// pattern. Case-insensitive substring search, not full-line match.
    pub fn classify(&self, line: &str) -> &str {
        for rule in &self.rules {
            for matcher in &rule.matchers {
                if matcher.is_match(line.as_bytes()).unwrap_or(false) {
                    return &rule.category;
                }
            }
        }

        // The trailing catch-all makes this unreachable for any input.
        self.fallback_category()
    }

    /// Category of the trailing catch-all rule.
    pub fn fallback_category(&self) -> &str {
        self.rules
            .last()
            .map(|rule| rule.category.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Category names in evaluation order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.category.as_str())
    }
}

fn compile_patterns(category: &str, patterns: &[String]) -> Result<Vec<RegexMatcher>, RuleError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexMatcherBuilder::new()
                .case_insensitive(true)
                .multi_line(false)
                .build(pattern)
                .map_err(|e| RuleError::InvalidPattern {
                    category: category.to_string(),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
        })
        .collect()
}
