//! Error types for the access-control crate.

use thiserror::Error;

use crate::guild::OverrideKind;
use crate::id::Id;

/// Fatal access-control configuration errors.
///
/// These mean the supplied data is internally inconsistent, not that an
/// assertion failed; callers must abort rather than record a soft failure.
#[derive(Debug, Error)]
pub enum AclError {
    /// A role id was referenced that the guild does not contain.
    #[error("could not find role with id '{id}'")]
    UnknownRole {
        /// The unresolved role id.
        id: Id,
    },

    /// No role shares the guild's id.
    #[error("guild '{guild_id}' has no everyone role sharing its id")]
    MissingEveryoneRole {
        /// The guild whose everyone role is missing.
        guild_id: Id,
    },

    /// An override exists for the subject id but has the wrong subject kind.
    #[error("override for subject '{subject_id}' has kind {found}, expected {expected}")]
    OverrideKindMismatch {
        /// The subject id that was looked up.
        subject_id: Id,
        /// The kind the lookup required.
        expected: OverrideKind,
        /// The kind actually stored.
        found: OverrideKind,
    },

    /// A permission bit string contained something other than `0` or `1`.
    #[error("permission bit strings may only contain '0' and '1', found {found:?}")]
    MalformedBitString {
        /// The offending character.
        found: char,
    },
}

/// Result type for access-control operations.
pub type AclResult<T> = std::result::Result<T, AclError>;
