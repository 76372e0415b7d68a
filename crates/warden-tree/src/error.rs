//! Error types for tree assembly.

use thiserror::Error;

/// Errors while assembling the channel tree from a flat snapshot.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A channel record carries a kind code the hierarchy does not support.
    #[error("channel '{name}' has unsupported kind code {code}")]
    UnsupportedKind {
        /// The channel's name.
        name: String,
        /// The offending wire code.
        code: u8,
    },

    /// A category record claims a parent; categories must be top-level.
    #[error("category '{name}' has a parent, but categories cannot be nested")]
    NestedCategory {
        /// The category's name.
        name: String,
    },

    /// The assembled hierarchy lost or duplicated channels.
    #[error("received {received} channels, but the assembled hierarchy contains {assembled}")]
    CountMismatch {
        /// Channels in the filtered input.
        received: usize,
        /// Channels in the assembled hierarchy.
        assembled: usize,
    },
}

/// Result type for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
