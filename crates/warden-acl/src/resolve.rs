//! Layered permission resolution.
//!
//! Effective permissions compose four layers in fixed order: the base role
//! grant, the everyone-subject override, the role-subject overrides, and
//! finally the member-subject override. Each override clears its deny bits
//! before setting its allow bits, so a later allow wins over any earlier
//! deny of the same flag.
//!
//! The guild owner and any principal whose base grant contains
//! [`Permission::Administrator`] resolve straight to the full grantable set;
//! no override can take anything away from them.

use tracing::{debug, trace};

use crate::error::{AclError, AclResult};
use crate::flag::Permission;
use crate::guild::{Guild, Member, Override, OverrideKind, Role};
use crate::id::Id;
use crate::set::PermissionSet;

fn role_by_id<'a>(guild: &'a Guild, id: Id) -> AclResult<&'a Role> {
    guild.role_by_id(id).ok_or(AclError::UnknownRole { id })
}

/// Find the override for `subject_id`, requiring it to have `kind`.
///
/// A missing override is fine; an override stored under the right id but
/// the wrong kind means the resource data is inconsistent.
fn subject_override<'a>(
    overrides: &'a [Override],
    subject_id: Id,
    kind: OverrideKind,
) -> AclResult<Option<&'a Override>> {
    match overrides.iter().find(|ov| ov.subject_id == subject_id) {
        None => Ok(None),
        Some(ov) if ov.subject_kind == kind => Ok(Some(ov)),
        Some(ov) => Err(AclError::OverrideKindMismatch {
            subject_id,
            expected: kind,
            found: ov.subject_kind,
        }),
    }
}

fn apply(permissions: PermissionSet, ov: &Override) -> PermissionSet {
    permissions.difference(&ov.deny).union(&ov.allow)
}

/// Base grant for a set of roles: the everyone grant unioned with each
/// listed role's grant, with the administrator short-circuit.
pub fn role_base_permissions(guild: &Guild, role_ids: &[Id]) -> AclResult<PermissionSet> {
    let everyone = guild.everyone_role()?;

    let mut permissions = everyone.permissions.clone();
    for id in role_ids {
        permissions = permissions.union(&role_by_id(guild, *id)?.permissions);
    }

    if permissions.contains(Permission::Administrator) {
        debug!(roles = role_ids.len(), "administrator grant, all permissions");
        return Ok(PermissionSet::all_grantable());
    }

    Ok(permissions)
}

/// Base grant for a member. The owner holds everything.
pub fn member_base_permissions(guild: &Guild, member: &Member) -> AclResult<PermissionSet> {
    if member.id == guild.owner_id {
        debug!(member = %member.id, "guild owner, all permissions");
        return Ok(PermissionSet::all_grantable());
    }

    role_base_permissions(guild, &member.role_ids)
}

/// Apply the everyone-subject override, then each listed role's override.
///
/// Overrides are applied in the order the role ids are supplied; when two
/// roles disagree on the same flag, the later one wins.
pub fn apply_role_overrides(
    base: &PermissionSet,
    guild: &Guild,
    overrides: &[Override],
    role_ids: &[Id],
) -> AclResult<PermissionSet> {
    // ADMINISTRATOR wins over any override.
    if base.contains(Permission::Administrator) {
        return Ok(PermissionSet::all_grantable());
    }

    let mut permissions = base.clone();

    // The everyone role shares the guild's id.
    if let Some(ov) = subject_override(overrides, guild.id, OverrideKind::Role)? {
        trace!(subject = %ov.subject_id, "applying everyone override");
        permissions = apply(permissions, ov);
    }

    for id in role_ids {
        if let Some(ov) = subject_override(overrides, *id, OverrideKind::Role)? {
            trace!(subject = %ov.subject_id, "applying role override");
            permissions = apply(permissions, ov);
        }
    }

    Ok(permissions)
}

/// Apply the member's own override last.
///
/// No administrator re-check happens here; that decision was already made
/// on the base grant.
pub fn apply_member_override(
    permissions: &PermissionSet,
    overrides: &[Override],
    member_id: Id,
) -> AclResult<PermissionSet> {
    match subject_override(overrides, member_id, OverrideKind::Member)? {
        Some(ov) => {
            trace!(subject = %ov.subject_id, "applying member override");
            Ok(apply(permissions.clone(), ov))
        }
        None => Ok(permissions.clone()),
    }
}

/// Effective permissions for a member against one resource's overrides.
pub fn effective_permissions(
    guild: &Guild,
    overrides: &[Override],
    member: &Member,
) -> AclResult<PermissionSet> {
    let base = member_base_permissions(guild, member)?;
    let with_roles = apply_role_overrides(&base, guild, overrides, &member.role_ids)?;
    apply_member_override(&with_roles, overrides, member.id)
}

/// Members whose effective permissions contain `flag`.
pub fn members_with_flag<'a>(
    guild: &Guild,
    overrides: &[Override],
    members: &'a [Member],
    flag: Permission,
) -> AclResult<Vec<&'a Member>> {
    let mut matching = Vec::new();
    for member in members {
        if effective_permissions(guild, overrides, member)?.contains(flag) {
            matching.push(member);
        }
    }
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD_ID: Id = Id(100);
    const OWNER_ID: Id = Id(1);
    const MODS_ID: Id = Id(200);
    const BOTS_ID: Id = Id(300);

    fn guild() -> Guild {
        Guild {
            id: GUILD_ID,
            owner_id: OWNER_ID,
            roles: vec![
                Role {
                    id: GUILD_ID,
                    name: "everyone".to_string(),
                    permissions: Permission::ViewChannel.into(),
                },
                Role {
                    id: MODS_ID,
                    name: "mods".to_string(),
                    permissions: Permission::KickMembers | Permission::ManageMessages,
                },
                Role {
                    id: BOTS_ID,
                    name: "bots".to_string(),
                    permissions: PermissionSet::empty(),
                },
            ],
        }
    }

    fn member(id: u64, role_ids: &[Id]) -> Member {
        Member {
            id: Id(id),
            name: format!("member-{id}"),
            role_ids: role_ids.to_vec(),
        }
    }

    fn role_override(subject: Id, allow: PermissionSet, deny: PermissionSet) -> Override {
        Override {
            subject_kind: OverrideKind::Role,
            subject_id: subject,
            allow,
            deny,
        }
    }

    #[test]
    fn test_base_unions_everyone_with_roles() {
        let base = role_base_permissions(&guild(), &[MODS_ID]).unwrap();
        assert!(base.contains(Permission::ViewChannel));
        assert!(base.contains(Permission::KickMembers));
        assert!(base.contains(Permission::ManageMessages));
        assert!(!base.contains(Permission::BanMembers));
    }

    #[test]
    fn test_administrator_short_circuits_base() {
        let mut guild = guild();
        guild.roles[1].permissions = Permission::Administrator.into();
        let base = role_base_permissions(&guild, &[MODS_ID]).unwrap();
        assert_eq!(base, PermissionSet::all_grantable());
    }

    #[test]
    fn test_owner_gets_everything() {
        let base = member_base_permissions(&guild(), &member(1, &[])).unwrap();
        assert_eq!(base, PermissionSet::all_grantable());
    }

    #[test]
    fn test_unknown_role_is_fatal() {
        assert!(matches!(
            role_base_permissions(&guild(), &[Id(999)]),
            Err(AclError::UnknownRole { id }) if id == Id(999)
        ));
    }

    #[test]
    fn test_role_allow_wins_over_everyone_deny() {
        // base = {}, everyone denies VIEW_CHANNEL, mods allow it back
        let mut guild = guild();
        guild.roles[0].permissions = PermissionSet::empty();
        let overrides = vec![
            role_override(GUILD_ID, PermissionSet::empty(), Permission::ViewChannel.into()),
            role_override(MODS_ID, Permission::ViewChannel.into(), PermissionSet::empty()),
        ];

        let base = role_base_permissions(&guild, &[MODS_ID]).unwrap();
        let resolved = apply_role_overrides(&base, &guild, &overrides, &[MODS_ID]).unwrap();
        assert!(resolved.contains(Permission::ViewChannel));
    }

    #[test]
    fn test_later_role_override_wins() {
        // mods deny SPEAK, bots allow it; the later-supplied role decides
        let overrides = vec![
            role_override(MODS_ID, PermissionSet::empty(), Permission::Speak.into()),
            role_override(BOTS_ID, Permission::Speak.into(), PermissionSet::empty()),
        ];
        let guild = guild();
        let base = PermissionSet::empty();

        let mods_last =
            apply_role_overrides(&base, &guild, &overrides, &[BOTS_ID, MODS_ID]).unwrap();
        assert!(!mods_last.contains(Permission::Speak));

        let bots_last =
            apply_role_overrides(&base, &guild, &overrides, &[MODS_ID, BOTS_ID]).unwrap();
        assert!(bots_last.contains(Permission::Speak));
    }

    #[test]
    fn test_administrator_ignores_deny_overrides() {
        let mut guild = guild();
        guild.roles[1].permissions = Permission::Administrator.into();
        let overrides = vec![role_override(
            GUILD_ID,
            PermissionSet::empty(),
            PermissionSet::all_grantable(),
        )];

        let member = member(42, &[MODS_ID]);
        let resolved = effective_permissions(&guild, &overrides, &member).unwrap();
        assert_eq!(resolved, PermissionSet::all_grantable());
    }

    #[test]
    fn test_member_override_applies_last() {
        let guild = guild();
        let member = member(42, &[]);
        let overrides = vec![
            role_override(GUILD_ID, PermissionSet::empty(), Permission::ViewChannel.into()),
            Override {
                subject_kind: OverrideKind::Member,
                subject_id: member.id,
                allow: Permission::ViewChannel.into(),
                deny: PermissionSet::empty(),
            },
        ];

        let resolved = effective_permissions(&guild, &overrides, &member).unwrap();
        assert!(resolved.contains(Permission::ViewChannel));
    }

    #[test]
    fn test_override_kind_mismatch_is_fatal() {
        let guild = guild();
        // stored as a member override, looked up as a role override
        let overrides = vec![Override {
            subject_kind: OverrideKind::Member,
            subject_id: MODS_ID,
            allow: PermissionSet::empty(),
            deny: PermissionSet::empty(),
        }];

        assert!(matches!(
            apply_role_overrides(&PermissionSet::empty(), &guild, &overrides, &[MODS_ID]),
            Err(AclError::OverrideKindMismatch { subject_id, .. }) if subject_id == MODS_ID
        ));
    }

    #[test]
    fn test_members_with_flag_includes_owner() {
        let guild = guild();
        let members = vec![member(1, &[]), member(2, &[]), member(3, &[MODS_ID])];
        let overrides = vec![role_override(
            GUILD_ID,
            PermissionSet::empty(),
            Permission::KickMembers.into(),
        )];

        let kickers =
            members_with_flag(&guild, &overrides, &members, Permission::KickMembers).unwrap();
        let ids: Vec<Id> = kickers.iter().map(|m| m.id).collect();
        // the override denies the flag for role holders; the owner keeps it
        assert_eq!(ids, vec![Id(1)]);
    }
}
