//! Error types for the conformance engine.
//!
//! Everything here is fatal: a spec-authoring mistake or an impossible
//! engine state. Failed expectations are not errors; they are recorded as
//! `Fail` results and surface in the report.

use thiserror::Error;

use warden_acl::AclError;

/// Fatal authoring or internal-consistency errors.
///
/// When one of these is raised the report cannot be trusted, so the run
/// aborts instead of producing a result tree.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation ran without any open test context.
    #[error("no test context is open; assertions may only run inside a spec body")]
    NoOpenContext,

    /// A verifying assertion ran at the root level, where no node has been
    /// consumed yet.
    #[error("no node is under test; verifying assertions need an enclosing consuming assertion")]
    NoSubject,

    /// A permission or role assertion ran, but the run was started without
    /// guild data.
    #[error("guild data is required for role and permission assertions, but none was supplied")]
    MissingGuild,

    /// A `for_each_remaining` body returned without consuming a node.
    #[error("loop body did not consume a node; aborting instead of looping forever")]
    StalledLoop,

    /// An assertion pushed a number of results other than exactly one.
    #[error("assertion recorded {recorded} results, exactly 1 expected")]
    AssertionResultCount {
        /// How many results the assertion actually pushed.
        recorded: usize,
    },

    /// The context stack was not empty when the run ended.
    #[error("run ended with {depth} context(s) still open")]
    UnbalancedStack {
        /// Number of contexts left on the stack.
        depth: usize,
    },

    /// The actual access-control data is internally inconsistent.
    #[error(transparent)]
    Acl(#[from] AclError),
}

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
