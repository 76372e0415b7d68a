//! Per-member permission tables.
//!
//! A debugging view of the resolver: one row per member showing the base
//! grant next to the fully layered per-channel result, rendered as bit
//! strings so individual flags line up vertically across members. An
//! optional marker brackets one bit position to make a single flag easy to
//! scan.

use warden_acl::{
    AclError, AclResult, Guild, Member, Override, Permission, PermissionSet,
    apply_member_override, apply_role_overrides, member_base_permissions,
};

use crate::table::{Cell, TableSettings, render_table};

/// Bracket the character at `pos`, counted from the start of the string.
pub fn mark_from_start(s: &str, pos: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if pos >= chars.len() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.extend(&chars[..pos]);
    out.push('(');
    out.push(chars[pos]);
    out.push(')');
    out.extend(&chars[pos + 1..]);
    out
}

/// Bracket the character at `pos`, counted from the end of the string.
///
/// Bit 0 of a bit string is its last character, so this marks flag `pos`.
pub fn mark_from_end(s: &str, pos: usize) -> String {
    let len = s.chars().count();
    if pos >= len {
        return s.to_string();
    }
    mark_from_start(s, len - 1 - pos)
}

/// Render the base and per-channel permission bits of every member.
///
/// Members are sorted by name. `marker` brackets that bit position
/// (counted from the end) in every bit string.
pub fn member_permission_table(
    guild: &Guild,
    overrides: &[Override],
    members: &[Member],
    marker: Option<usize>,
) -> AclResult<String> {
    let mut sorted: Vec<&Member> = members.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let width = Permission::COUNT;
    let format_bits = |set: &PermissionSet| {
        let bits = set.to_bit_string(width);
        match marker {
            Some(pos) => mark_from_end(&bits, pos),
            None => bits,
        }
    };

    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(sorted.len());
    for member in sorted {
        let base = member_base_permissions(guild, member)?;
        let with_roles = apply_role_overrides(&base, guild, overrides, &member.role_ids)?;
        let channel = apply_member_override(&with_roles, overrides, member.id)?;

        let role_names = member
            .role_ids
            .iter()
            .map(|id| {
                guild
                    .role_by_id(*id)
                    .map(|role| role.name.clone())
                    .ok_or(AclError::UnknownRole { id: *id })
            })
            .collect::<AclResult<Vec<_>>>()?
            .join(", ");

        rows.push(vec![
            vec![member.name.clone()],
            vec!["base".to_string(), "channel".to_string()],
            vec![format_bits(&base), format_bits(&channel)],
            vec![role_names],
        ]);
    }

    Ok(render_table(&rows, &TableSettings::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_acl::{Id, OverrideKind, Role};

    #[test]
    fn test_mark_from_start() {
        assert_eq!(mark_from_start("10110", 1), "1(0)110");
        assert_eq!(mark_from_start("10110", 9), "10110");
    }

    #[test]
    fn test_mark_from_end_counts_bits() {
        // bit 0 is the last character
        assert_eq!(mark_from_end("10110", 0), "1011(0)");
        assert_eq!(mark_from_end("10110", 4), "(1)0110");
        assert_eq!(mark_from_end("10110", 5), "10110");
    }

    fn guild() -> Guild {
        Guild {
            id: Id(100),
            owner_id: Id(1),
            roles: vec![
                Role {
                    id: Id(100),
                    name: "everyone".to_string(),
                    permissions: Permission::ViewChannel.into(),
                },
                Role {
                    id: Id(200),
                    name: "mods".to_string(),
                    permissions: Permission::KickMembers.into(),
                },
            ],
        }
    }

    fn member(id: u64, name: &str, role_ids: &[Id]) -> Member {
        Member {
            id: Id(id),
            name: name.to_string(),
            role_ids: role_ids.to_vec(),
        }
    }

    #[test]
    fn test_table_sorts_members_by_name() {
        let guild = guild();
        let members = vec![member(2, "zoe", &[]), member(3, "amy", &[Id(200)])];

        let table = member_permission_table(&guild, &[], &members, None).unwrap();
        let amy = table.find("amy").unwrap();
        let zoe = table.find("zoe").unwrap();
        assert!(amy < zoe);
    }

    #[test]
    fn test_table_shows_base_and_channel_rows() {
        let guild = guild();
        let members = vec![member(2, "zoe", &[])];
        let overrides = vec![Override {
            subject_kind: OverrideKind::Role,
            subject_id: Id(100),
            allow: PermissionSet::empty(),
            deny: Permission::ViewChannel.into(),
        }];

        let table = member_permission_table(&guild, &overrides, &members, None).unwrap();
        assert!(table.contains("base"));
        assert!(table.contains("channel"));

        // base keeps VIEW_CHANNEL (bit 10), the channel row loses it
        let base_bits = PermissionSet::from(Permission::ViewChannel);
        assert!(table.contains(&base_bits.to_bit_string(Permission::COUNT)));
        assert!(table.contains(&PermissionSet::empty().to_bit_string(Permission::COUNT)));
    }

    #[test]
    fn test_marker_brackets_the_requested_bit() {
        let guild = guild();
        let members = vec![member(2, "zoe", &[])];

        let table = member_permission_table(
            &guild,
            &[],
            &members,
            Some(Permission::ViewChannel.bit() as usize),
        )
        .unwrap();
        assert!(table.contains("(1)"));
    }

    #[test]
    fn test_unknown_role_id_fails() {
        let guild = guild();
        let members = vec![member(2, "zoe", &[Id(999)])];
        assert!(member_permission_table(&guild, &[], &members, None).is_err());
    }
}
