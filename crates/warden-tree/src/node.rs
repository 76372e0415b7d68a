//! The channel tree model.

use std::fmt;

use serde::Serialize;

use warden_acl::{Id, Override};

/// The kind of a node in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Category,
    Text,
    News,
    Voice,
    Stage,
}

impl NodeKind {
    /// Map an upstream wire code to a kind.
    ///
    /// Returns `None` for codes outside the supported hierarchy (DMs,
    /// threads, forums, directories).
    pub fn from_code(code: u8) -> Option<NodeKind> {
        match code {
            0 => Some(NodeKind::Text),
            2 => Some(NodeKind::Voice),
            4 => Some(NodeKind::Category),
            5 => Some(NodeKind::News),
            13 => Some(NodeKind::Stage),
            _ => None,
        }
    }

    /// The upstream wire code of this kind.
    pub fn code(self) -> u8 {
        match self {
            NodeKind::Text => 0,
            NodeKind::Voice => 2,
            NodeKind::Category => 4,
            NodeKind::News => 5,
            NodeKind::Stage => 13,
        }
    }

    /// Whether nodes of this kind may carry children.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Category)
    }

    /// Text-like kinds sort above voice-like kinds in display order.
    pub fn is_text_like(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::News)
    }

    /// Voice-like kinds sort below text-like kinds in display order.
    pub fn is_voice_like(self) -> bool {
        matches!(self, NodeKind::Voice | NodeKind::Stage)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Category => f.write_str("CATEGORY"),
            NodeKind::Text => f.write_str("TEXT CHANNEL"),
            NodeKind::News => f.write_str("NEWS CHANNEL"),
            NodeKind::Voice => f.write_str("VOICE CHANNEL"),
            NodeKind::Stage => f.write_str("STAGE CHANNEL"),
        }
    }
}

/// One node of the actual hierarchy under test.
///
/// Only categories carry `Some(children)`. Sibling order is the source
/// system's display order and is never re-sorted once assembled.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: Id,
    pub kind: NodeKind,
    pub name: String,
    pub position: i64,
    pub overrides: Vec<Override>,
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// This node's children; empty for non-containers.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_code_round_trip() {
        for kind in [
            NodeKind::Category,
            NodeKind::Text,
            NodeKind::News,
            NodeKind::Voice,
            NodeKind::Stage,
        ] {
            assert_eq!(NodeKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_unsupported_codes() {
        // DM, group DM, threads, directory, forum
        for code in [1u8, 3, 10, 11, 12, 14, 15] {
            assert_eq!(NodeKind::from_code(code), None);
        }
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(NodeKind::Category.to_string(), "CATEGORY");
        assert_eq!(NodeKind::Stage.to_string(), "STAGE CHANNEL");
    }

    #[test]
    fn test_only_categories_are_containers() {
        assert!(NodeKind::Category.is_container());
        assert!(!NodeKind::Text.is_container());
        assert!(!NodeKind::Voice.is_container());
    }
}
