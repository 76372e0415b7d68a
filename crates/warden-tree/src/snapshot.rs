//! Assembling the nested tree from a flat channel snapshot.
//!
//! The upstream service reports channels as one flat list; nesting is
//! reconstructed here from parent ids, with each sibling group sorted into
//! natural display order. Anything that is not part of the guild hierarchy
//! (DMs, threads, forums) is filtered out before assembly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use warden_acl::{Id, Override};

use crate::error::{TreeError, TreeResult};
use crate::node::{Node, NodeKind};
use crate::order::natural_order;

/// Wire codes that are not part of the guild hierarchy.
pub const IGNORED_KIND_CODES: [u8; 7] = [
    1,  // DM
    3,  // group DM
    10, // news thread
    11, // public thread
    12, // private thread
    14, // directory
    15, // forum
];

/// One channel record as reported by the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChannel {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind_code: u8,
    pub name: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub parent_id: Option<Id>,
    #[serde(default, rename = "permission_overwrites")]
    pub overrides: Vec<Override>,
}

impl RawChannel {
    fn into_node(self, kind: NodeKind) -> Node {
        Node {
            id: self.id,
            kind,
            name: self.name,
            position: self.position,
            overrides: self.overrides,
            children: None,
        }
    }
}

/// Build the nested, naturally ordered hierarchy from a flat snapshot.
///
/// Top-level channels come first, then categories carrying their children.
/// Fails if a category is nested, a kept record has an unsupported kind, or
/// the assembled hierarchy does not account for every filtered channel
/// (e.g. a child pointing at a nonexistent category).
pub fn nest(raw: Vec<RawChannel>) -> TreeResult<Vec<Node>> {
    let kept: Vec<RawChannel> = raw
        .into_iter()
        .filter(|channel| !IGNORED_KIND_CODES.contains(&channel.kind_code))
        .collect();
    let received = kept.len();

    let mut top_level: Vec<Node> = Vec::new();
    let mut categories: Vec<Node> = Vec::new();
    let mut child_channels: Vec<(Id, Node)> = Vec::new();

    for channel in kept {
        let kind = NodeKind::from_code(channel.kind_code).ok_or_else(|| {
            TreeError::UnsupportedKind {
                name: channel.name.clone(),
                code: channel.kind_code,
            }
        })?;

        match (kind.is_container(), channel.parent_id) {
            (true, Some(_)) => {
                return Err(TreeError::NestedCategory { name: channel.name });
            }
            (true, None) => categories.push(channel.into_node(kind)),
            (false, None) => top_level.push(channel.into_node(kind)),
            (false, Some(parent)) => child_channels.push((parent, channel.into_node(kind))),
        }
    }

    top_level.sort_by(natural_order);
    categories.sort_by(natural_order);
    child_channels.sort_by(|(_, a), (_, b)| natural_order(a, b));

    let mut hierarchy = top_level;
    let mut remaining = child_channels;
    for mut category in categories {
        let (mine, rest): (Vec<_>, Vec<_>) = remaining
            .into_iter()
            .partition(|(parent, _)| *parent == category.id);
        remaining = rest;
        category.children = Some(mine.into_iter().map(|(_, node)| node).collect());
        hierarchy.push(category);
    }

    // Orphaned children make the counts disagree.
    let assembled = hierarchy.len()
        + hierarchy
            .iter()
            .map(|node| node.children().len())
            .sum::<usize>();
    if assembled != received {
        return Err(TreeError::CountMismatch {
            received,
            assembled,
        });
    }

    debug!(channels = received, top_level = hierarchy.len(), "assembled channel hierarchy");
    Ok(hierarchy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: u64, kind_code: u8, name: &str, position: i64, parent: Option<u64>) -> RawChannel {
        RawChannel {
            id: Id(id),
            kind_code,
            name: name.to_string(),
            position,
            parent_id: parent.map(Id),
            overrides: Vec::new(),
        }
    }

    #[test]
    fn test_nest_builds_expected_hierarchy() {
        let nodes = nest(vec![
            raw(10, 4, "general", 0, None),
            raw(1, 0, "rules", 0, None),
            raw(11, 0, "chat", 0, Some(10)),
            raw(12, 2, "voice", 0, Some(10)),
        ])
        .unwrap();

        // top-level channel first, then the category with its children
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "rules");
        assert_eq!(nodes[1].name, "general");
        let children: Vec<&str> = nodes[1].children().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(children, vec!["chat", "voice"]);
    }

    #[test]
    fn test_children_sorted_text_before_voice() {
        let nodes = nest(vec![
            raw(10, 4, "general", 0, None),
            raw(11, 2, "voice", 0, Some(10)),
            raw(12, 0, "chat", 5, Some(10)),
        ])
        .unwrap();

        let children: Vec<&str> = nodes[0].children().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(children, vec!["chat", "voice"]);
    }

    #[test]
    fn test_ignored_kinds_are_filtered() {
        let nodes = nest(vec![
            raw(1, 0, "chat", 0, None),
            raw(2, 11, "thread", 0, Some(1)),
            raw(3, 15, "forum", 1, None),
        ])
        .unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "chat");
    }

    #[test]
    fn test_orphaned_child_fails_count_check() {
        let result = nest(vec![
            raw(1, 0, "chat", 0, Some(999)),
        ]);
        assert!(matches!(
            result,
            Err(TreeError::CountMismatch { received: 1, assembled: 0 })
        ));
    }

    #[test]
    fn test_nested_category_is_rejected() {
        let result = nest(vec![
            raw(1, 4, "outer", 0, None),
            raw(2, 4, "inner", 0, Some(1)),
        ]);
        assert!(matches!(result, Err(TreeError::NestedCategory { .. })));
    }

    #[test]
    fn test_raw_channel_deserializes_wire_shape() {
        let json = r#"{
            "id": "42",
            "type": 0,
            "name": "chat",
            "position": 3,
            "parent_id": "10",
            "permission_overwrites": [
                { "kind": "role", "id": "10", "allow": "0", "deny": "1024" }
            ]
        }"#;
        let channel: RawChannel = serde_json::from_str(json).unwrap();
        assert_eq!(channel.id, Id(42));
        assert_eq!(channel.parent_id, Some(Id(10)));
        assert_eq!(channel.overrides.len(), 1);
    }
}
