use serde::{Deserialize, Serialize};

use super::FALLBACK_CATEGORY;

/// Categories the policy rates High. Everything else is Medium, except the
/// fallback category which is Low.
const HIGH_CONFIDENCE_CATEGORIES: [&str; 4] = [
    "Exception Occurred",
    "Timeout Error",
    "Disk Full",
    "Permission Denied",
];

/// One classification rule: a category and its ordered pattern list.
///
/// Patterns are case-insensitive substring regexes, tried in declaration
/// order. Deserializes from the `[[rules]]` entries of a rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub category: String,
    pub patterns: Vec<String>,
}

impl Rule {
    pub fn new(category: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            category: category.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Trust level attached to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }

    /// Derive the confidence for a category name.
    ///
    /// Total over every possible category: the builtin categories rate High,
    /// the fallback rates Low, and any category outside the builtin set
    /// (reachable only through user-supplied rule tables) rates Medium.
    pub fn for_category(category: &str) -> Confidence {
        if HIGH_CONFIDENCE_CATEGORIES.contains(&category) {
            Confidence::High
        } else if category == FALLBACK_CATEGORY {
            Confidence::Low
        } else {
            Confidence::Medium
        }
    }
}
