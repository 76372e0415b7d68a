//! Warden Conformance Engine
//!
//! The stack-based matcher comparing a declarative layout spec against the
//! actual channel tree. A spec is ordinary Rust: a closure receiving a
//! [`Runner`] and issuing assertions as method calls.
//!
//! - **Consuming assertions** (`expect_category`, `expect_text_channel`, …)
//!   advance through the current sibling list and recurse into children.
//! - **Verifying assertions** (`expect_name`, `expect_permissions`, …)
//!   check properties of the node whose children are currently under test.
//!
//! Failed expectations become `Fail` nodes in the returned [`ResultNode`]
//! tree and never abort the run. Broken specs and inconsistent input data
//! abort immediately with an [`EngineError`]; a report built on top of
//! either could not be trusted.
//!
//! # Example
//!
//! ```
//! use warden_engine::Runner;
//! use warden_tree::{Node, NodeKind};
//! use warden_acl::Id;
//!
//! let tree = vec![Node {
//!     id: Id(1),
//!     kind: NodeKind::Text,
//!     name: "rules".to_string(),
//!     position: 0,
//!     overrides: Vec::new(),
//!     children: None,
//! }];
//!
//! let results = Runner::run(&tree, None, |t| {
//!     t.expect_text_channel(|t| t.expect_name("rules"))
//! })?;
//! assert!(results.resolved());
//! # Ok::<(), warden_engine::EngineError>(())
//! ```

pub mod error;
pub mod result;
pub mod runner;

// Re-export main types
pub use error::{EngineError, EngineResult};
pub use result::{Outcome, ResultNode};
pub use runner::Runner;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::result::{Outcome, ResultNode};
    pub use crate::runner::Runner;
}
