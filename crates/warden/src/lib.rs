//! # Warden - Guild Layout Conformance Checking
//!
//! Warden verifies that a Discord-style guild actually matches a declared
//! layout: which categories and channels exist, in what order, under which
//! names, and which permissions every role and member effectively holds
//! once all override layers are applied.
//!
//! ## Quick Start
//!
//! ```
//! use warden_guild::prelude::*;
//!
//! # use warden_guild::warden_acl::Id;
//! # let channels: Vec<Node> = vec![Node {
//! #     id: Id(1),
//! #     kind: NodeKind::Text,
//! #     name: "rules".to_string(),
//! #     position: 0,
//! #     overrides: Vec::new(),
//! #     children: None,
//! # }];
//! let report = run_check(&channels, None, |t| {
//!     t.expect_text_channel(|t| t.expect_name("rules"))
//! })?;
//!
//! println!("{}", report.to_text());
//! assert!(report.is_success());
//! # Ok::<(), EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              Your harness (fetch + notify)               │
//! ├──────────────────────────────────────────────────────────┤
//! │                  warden-guild (facade)                   │
//! ├──────────────────────────────────────────────────────────┤
//! │ warden-engine │ warden-acl  │ warden-tree │ warden-report│
//! │ (conformance) │ (resolver)  │ (hierarchy) │ (rendering)  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The core performs no I/O. The channel tree, guild, and member data are
//! plain values handed in by whatever fetched them; the report is a plain
//! value handed back for whatever posts it.

use tracing::info;

use warden_engine::{EngineResult, Runner};
use warden_report::CheckReport;
use warden_tree::Node;

// Re-export from sub-crates
pub use warden_acl;
pub use warden_engine;
pub use warden_report;
pub use warden_tree;

/// Run a conformance spec against an actual channel tree and build the
/// rendered report in one step.
///
/// `guild` is only required when the spec issues role or permission
/// assertions. A returned error means the spec itself or the supplied data
/// is broken; failed expectations land inside the report instead.
pub fn run_check<'a, F>(
    nodes: &'a [Node],
    guild: Option<&'a warden_acl::Guild>,
    spec: F,
) -> EngineResult<CheckReport>
where
    F: FnOnce(&mut Runner<'a>) -> EngineResult<()>,
{
    let tree = Runner::run(nodes, guild, spec)?;
    let report = CheckReport::from_tree(&tree);
    info!(
        run_id = %report.run_id,
        passed = report.passed,
        total = report.total,
        "conformance check finished"
    );
    Ok(report)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::run_check;
    pub use warden_acl::{
        Guild, Member, Override, OverrideKind, Permission, PermissionDiff, PermissionSet, Role,
        diff, effective_permissions,
    };
    pub use warden_engine::{EngineError, EngineResult, Outcome, ResultNode, Runner};
    pub use warden_report::CheckReport;
    pub use warden_tree::{Node, NodeKind, RawChannel, nest};
}
