//! Guild-side access-control records.
//!
//! These are plain, already-fetched data: roles with their base grants, the
//! per-resource overrides layered on top, and the members they apply to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AclError, AclResult};
use crate::id::Id;
use crate::set::PermissionSet;

/// A named principal group carrying a base permission grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Id,
    pub name: String,
    pub permissions: PermissionSet,
}

/// The container owning the role list and the channel tree.
///
/// The everyone role shares its id with the guild. Role names are expected
/// to be case-insensitively unique; that expectation is checked by an
/// assertion, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Id,
    pub owner_id: Id,
    pub roles: Vec<Role>,
}

impl Guild {
    /// Find a role by id.
    pub fn role_by_id(&self, id: Id) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// Find a role by exact name.
    pub fn role_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == name)
    }

    /// The everyone role: the role sharing the guild's id.
    ///
    /// Its absence means the guild data is internally inconsistent.
    pub fn everyone_role(&self) -> AclResult<&Role> {
        self.role_by_id(self.id).ok_or(AclError::MissingEveryoneRole {
            guild_id: self.id,
        })
    }
}

/// A principal: a member of the guild holding zero or more roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub role_ids: Vec<Id>,
}

/// What kind of subject an override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    Role,
    Member,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideKind::Role => f.write_str("role"),
            OverrideKind::Member => f.write_str("member"),
        }
    }
}

/// A per-resource allow/deny adjustment for one subject.
///
/// A resource carries at most one override per subject id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    #[serde(rename = "kind")]
    pub subject_kind: OverrideKind,
    #[serde(rename = "id")]
    pub subject_id: Id,
    pub allow: PermissionSet,
    pub deny: PermissionSet,
}
