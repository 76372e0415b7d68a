//! Natural display ordering of sibling nodes.

use std::cmp::Ordering;

use crate::node::Node;

/// Compare two siblings by the source system's display rule: text-like
/// channels always sort above voice-like channels; within a class, numeric
/// position decides.
pub fn natural_order(a: &Node, b: &Node) -> Ordering {
    if a.kind.is_text_like() && b.kind.is_voice_like() {
        return Ordering::Less;
    }
    if a.kind.is_voice_like() && b.kind.is_text_like() {
        return Ordering::Greater;
    }

    a.position.cmp(&b.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use warden_acl::Id;

    fn node(kind: NodeKind, position: i64) -> Node {
        Node {
            id: Id(position as u64),
            kind,
            name: format!("node-{position}"),
            position,
            overrides: Vec::new(),
            children: None,
        }
    }

    #[test]
    fn test_text_before_voice_regardless_of_position() {
        let text = node(NodeKind::Text, 9);
        let voice = node(NodeKind::Voice, 0);
        assert_eq!(natural_order(&text, &voice), Ordering::Less);
        assert_eq!(natural_order(&voice, &text), Ordering::Greater);
    }

    #[test]
    fn test_news_counts_as_text_like() {
        let news = node(NodeKind::News, 5);
        let stage = node(NodeKind::Stage, 1);
        assert_eq!(natural_order(&news, &stage), Ordering::Less);
    }

    #[test]
    fn test_position_breaks_ties_within_class() {
        let first = node(NodeKind::Text, 1);
        let second = node(NodeKind::Text, 2);
        assert_eq!(natural_order(&first, &second), Ordering::Less);
        assert_eq!(natural_order(&second, &first), Ordering::Greater);
        assert_eq!(natural_order(&first, &first.clone()), Ordering::Equal);
    }

    #[test]
    fn test_categories_order_by_position() {
        let a = node(NodeKind::Category, 3);
        let b = node(NodeKind::Category, 7);
        assert_eq!(natural_order(&a, &b), Ordering::Less);
    }
}
