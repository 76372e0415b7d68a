//! Human-readable rendering of flattened results.

use crate::flatten::FlatResult;

/// Glyph printed in front of passing lines.
pub const PASS_GLYPH: &str = "✓";

/// Glyph printed in front of failing lines.
pub const FAIL_GLYPH: &str = "✗";

/// Render flattened results as plain text.
///
/// The first line summarizes the grand totals and overall verdict; every
/// following line is one result node, indented three spaces per depth
/// level, prefixed with its glyph and suffixed with its own counts.
pub fn render(lines: &[FlatResult]) -> String {
    let mut out = String::new();

    match lines.first() {
        Some(root) => {
            let verdict = if root.pass_count == root.total_count {
                "PASSED"
            } else {
                "FAILED"
            };
            out.push_str(&format!(
                "{verdict} {}/{} checks\n",
                root.pass_count, root.total_count
            ));
        }
        None => return "PASSED 0/0 checks\n".to_string(),
    }

    for line in lines {
        let glyph = if line.passed { PASS_GLYPH } else { FAIL_GLYPH };
        out.push_str(&format!(
            "{}{glyph} ({}/{}) {}\n",
            " ".repeat(3 * line.depth),
            line.pass_count,
            line.total_count,
            line.message
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use warden_engine::ResultNode;

    #[test]
    fn test_summary_line_reports_verdict() {
        let passing = render(&flatten(&ResultNode::pass("ok")));
        assert!(passing.starts_with("PASSED 1/1 checks\n"));

        let failing = render(&flatten(&ResultNode::fail("bad")));
        assert!(failing.starts_with("FAILED 0/1 checks\n"));
    }

    #[test]
    fn test_lines_are_indented_by_depth() {
        let tree = ResultNode::derived(
            "root",
            vec![ResultNode::derived("mid", vec![ResultNode::pass("leaf")])],
        );
        let text = render(&flatten(&tree));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "✓ (3/3) root");
        assert_eq!(lines[2], "   ✓ (2/2) mid");
        assert_eq!(lines[3], "      ✓ (1/1) leaf");
    }

    #[test]
    fn test_failing_line_carries_fail_glyph() {
        let text = render(&flatten(&ResultNode::fail("expected 2 children, got 3 children")));
        assert!(text.contains("✗ (0/1) expected 2 children, got 3 children"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(&[]), "PASSED 0/0 checks\n");
    }
}
