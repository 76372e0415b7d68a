//! Flattening a result tree into report lines.

use serde::{Deserialize, Serialize};

use warden_engine::{Outcome, ResultNode};

/// One line of the flattened report.
///
/// Counts are computed bottom-up: a node's total is itself plus all
/// descendants, and its pass count includes its own resolved outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatResult {
    pub depth: usize,
    pub passed: bool,
    pub pass_count: usize,
    pub total_count: usize,
    pub message: String,
}

/// Flatten a result tree into preorder lines with bottom-up counts.
pub fn flatten(tree: &ResultNode) -> Vec<FlatResult> {
    let mut lines = Vec::new();
    walk(tree, 0, &mut lines);
    lines
}

fn walk(node: &ResultNode, depth: usize, lines: &mut Vec<FlatResult>) -> (usize, usize) {
    // reserve this node's line before descending so the order stays preorder
    let index = lines.len();
    lines.push(FlatResult {
        depth,
        passed: false,
        pass_count: 0,
        total_count: 0,
        message: node.message.clone(),
    });

    let mut child_pass = 0;
    let mut child_total = 0;
    for child in &node.children {
        let (pass, total) = walk(child, depth + 1, lines);
        child_pass += pass;
        child_total += total;
    }

    let resolved = match node.outcome {
        Outcome::Pass => true,
        Outcome::Fail => false,
        Outcome::Derived => child_pass == child_total,
    };
    let pass_count = child_pass + usize::from(resolved);
    let total_count = child_total + 1;

    lines[index].passed = resolved;
    lines[index].pass_count = pass_count;
    lines[index].total_count = total_count;
    (pass_count, total_count)
}
