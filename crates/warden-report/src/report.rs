//! Complete check reports.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use warden_engine::ResultNode;

use crate::flatten::{FlatResult, flatten};
use crate::render::render;

/// Unique identifier for one conformance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rendered outcome of one conformance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Unique run ID.
    pub run_id: RunId,
    /// Number of checks that resolved to pass.
    pub passed: usize,
    /// Total number of checks.
    pub total: usize,
    /// Flattened result lines, preorder.
    pub lines: Vec<FlatResult>,
}

impl CheckReport {
    /// Build a report from a finished result tree.
    pub fn from_tree(tree: &ResultNode) -> Self {
        let lines = flatten(tree);
        let (passed, total) = lines
            .first()
            .map_or((0, 0), |root| (root.pass_count, root.total_count));

        debug!(passed, total, "built check report");
        Self {
            run_id: RunId::new(),
            passed,
            total,
            lines,
        }
    }

    /// Whether every check passed.
    pub fn is_success(&self) -> bool {
        self.passed == self.total
    }

    /// Format as human-readable text.
    pub fn to_text(&self) -> String {
        render(&self.lines)
    }

    /// Format as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Format as pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
