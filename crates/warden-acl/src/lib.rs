//! Warden Access Control
//!
//! This crate provides the permission side of Warden: the named flag
//! domain, arbitrary-width permission sets, the guild/role/override data
//! model, and the layered resolver reconstructing effective permissions.
//!
//! # Permission Model
//!
//! A principal's effective permissions against a resource compose in fixed
//! order:
//!
//! 1. **Base grant**: the everyone role's grant unioned with the grants of
//!    every role the principal holds.
//! 2. **Everyone override**: the resource's override for the everyone role.
//! 3. **Role overrides**: the overrides for the principal's roles, applied
//!    in the order the role ids are supplied.
//! 4. **Member override**: the principal's own override, applied last.
//!
//! Each override clears its deny bits before setting its allow bits. The
//! guild owner, and any base grant containing `ADMINISTRATOR`, resolve
//! straight to the full grantable set.
//!
//! # Usage
//!
//! ```
//! use warden_acl::{Permission, PermissionSet, diff, PermissionDiff};
//!
//! let actual = Permission::ViewChannel | Permission::SendMessages;
//! let expected: PermissionSet = Permission::ViewChannel.into();
//!
//! match diff(&actual, &expected) {
//!     PermissionDiff::Equal => println!("in sync"),
//!     changed => println!("{changed}"),
//! }
//! ```

pub mod diff;
pub mod error;
pub mod flag;
pub mod guild;
pub mod id;
pub mod resolve;
pub mod set;

// Re-export main types
pub use diff::{PermissionDiff, diff};
pub use error::{AclError, AclResult};
pub use flag::Permission;
pub use guild::{Guild, Member, Override, OverrideKind, Role};
pub use id::Id;
pub use resolve::{
    apply_member_override, apply_role_overrides, effective_permissions, member_base_permissions,
    members_with_flag, role_base_permissions,
};
pub use set::PermissionSet;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::diff::{PermissionDiff, diff};
    pub use crate::error::{AclError, AclResult};
    pub use crate::flag::Permission;
    pub use crate::guild::{Guild, Member, Override, OverrideKind, Role};
    pub use crate::id::Id;
    pub use crate::resolve::effective_permissions;
    pub use crate::set::PermissionSet;
}
