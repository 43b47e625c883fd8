//! Rules module — ordered rule table, pattern compilation, and confidence policy.

pub mod model;
pub mod table;

pub use model::{Confidence, Rule};
pub use table::{RuleError, RuleTable};

/// Category assigned by the trailing catch-all rule.
pub const FALLBACK_CATEGORY: &str = "Unknown system error";

/// Pattern that matches every line. Only valid in the last rule of a table.
pub const MATCH_ANY_PATTERN: &str = ".*";
