//! The result tree produced by a conformance run.

use serde::{Deserialize, Serialize};

/// The outcome of a single result node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The check passed on its own.
    Pass,
    /// The check failed on its own.
    Fail,
    /// Passes iff every child transitively passes.
    Derived,
}

/// One node of the hierarchical pass/fail report.
///
/// Created during a run and immutable afterwards; the caller owns the tree
/// once it is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultNode {
    pub outcome: Outcome,
    pub message: String,
    pub children: Vec<ResultNode>,
}

impl ResultNode {
    /// A passing leaf result.
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Pass,
            message: message.into(),
            children: Vec::new(),
        }
    }

    /// A failing leaf result.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail,
            message: message.into(),
            children: Vec::new(),
        }
    }

    /// A node whose outcome is derived from its children.
    pub fn derived(message: impl Into<String>, children: Vec<ResultNode>) -> Self {
        Self {
            outcome: Outcome::Derived,
            message: message.into(),
            children,
        }
    }

    /// Resolve this node's outcome to a plain pass/fail.
    ///
    /// `Derived` nodes resolve to pass only when every descendant does.
    pub fn resolved(&self) -> bool {
        match self.outcome {
            Outcome::Pass => true,
            Outcome::Fail => false,
            Outcome::Derived => self.children.iter().all(ResultNode::resolved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_resolution() {
        assert!(ResultNode::pass("ok").resolved());
        assert!(!ResultNode::fail("nope").resolved());
    }

    #[test]
    fn test_derived_with_no_children_passes() {
        assert!(ResultNode::derived("empty", Vec::new()).resolved());
    }

    #[test]
    fn test_derived_follows_descendants() {
        let passing = ResultNode::derived(
            "outer",
            vec![ResultNode::derived("inner", vec![ResultNode::pass("ok")])],
        );
        assert!(passing.resolved());

        let failing = ResultNode::derived(
            "outer",
            vec![ResultNode::derived("inner", vec![ResultNode::fail("bad")])],
        );
        assert!(!failing.resolved());
    }

    #[test]
    fn test_serializes_with_lowercase_outcomes() {
        let json = serde_json::to_value(ResultNode::pass("ok")).unwrap();
        assert_eq!(json["outcome"], "pass");
    }
}
