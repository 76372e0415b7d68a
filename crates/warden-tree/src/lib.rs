//! Warden Tree Model
//!
//! The ordered channel hierarchy under test: node kinds, the nested
//! [`Node`] model, the natural display ordering, and assembly of the tree
//! from a flat upstream snapshot.
//!
//! The tree is plain data. Whatever fetched it hands it over fully
//! resolved; nothing here performs I/O, and sibling order is never touched
//! after assembly.

pub mod error;
pub mod node;
pub mod order;
pub mod snapshot;

// Re-export main types
pub use error::{TreeError, TreeResult};
pub use node::{Node, NodeKind};
pub use order::natural_order;
pub use snapshot::{IGNORED_KIND_CODES, RawChannel, nest};

#[cfg(test)]
mod tests {
    use super::*;
    use warden_acl::Id;

    #[test]
    fn test_assembled_tree_keeps_sibling_order() {
        let nodes = nest(vec![
            RawChannel {
                id: Id(1),
                kind_code: 0,
                name: "b".to_string(),
                position: 2,
                parent_id: None,
                overrides: Vec::new(),
            },
            RawChannel {
                id: Id(2),
                kind_code: 0,
                name: "a".to_string(),
                position: 1,
                parent_id: None,
                overrides: Vec::new(),
            },
        ])
        .unwrap();

        // ordered by position, not by name or input order
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
