//! Comparing an actual permission set against an expected one.

use std::fmt;

use crate::set::PermissionSet;

/// The outcome of comparing an actual set against an expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDiff {
    /// Both sets carry exactly the same flags.
    Equal,
    /// The sets disagree; the symmetric difference, partitioned.
    Changed {
        /// Flags set in the actual value but not expected.
        to_remove: Vec<&'static str>,
        /// Flags expected but not set in the actual value.
        to_add: Vec<&'static str>,
    },
}

/// Partition the symmetric difference of `actual` and `expected`.
///
/// Every differing flag lands in exactly one of the two lists.
pub fn diff(actual: &PermissionSet, expected: &PermissionSet) -> PermissionDiff {
    let to_remove = actual.difference(expected);
    let to_add = expected.difference(actual);

    if to_remove.is_empty() && to_add.is_empty() {
        return PermissionDiff::Equal;
    }

    PermissionDiff::Changed {
        to_remove: to_remove.flag_names(),
        to_add: to_add.flag_names(),
    }
}

fn join_or_none(names: &[&'static str]) -> String {
    if names.is_empty() {
        "<none>".to_string()
    } else {
        names.join(", ")
    }
}

impl fmt::Display for PermissionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionDiff::Equal => f.write_str("<equal>"),
            PermissionDiff::Changed { to_remove, to_add } => write!(
                f,
                "to be removed: {}; to be added: {}",
                join_or_none(to_remove),
                join_or_none(to_add)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::Permission;
    use proptest::prelude::*;

    #[test]
    fn test_equal_sets() {
        let set = Permission::ViewChannel | Permission::SendMessages;
        assert_eq!(diff(&set, &set.clone()), PermissionDiff::Equal);
    }

    #[test]
    fn test_partitions_symmetric_difference() {
        let actual = PermissionSet::from(Permission::Administrator);
        let expected = Permission::CreateInstantInvite | Permission::BanMembers;

        match diff(&actual, &expected) {
            PermissionDiff::Changed { to_remove, to_add } => {
                assert_eq!(to_remove, vec!["ADMINISTRATOR"]);
                assert_eq!(to_add, vec!["CREATE_INSTANT_INVITE", "BAN_MEMBERS"]);
            }
            other => panic!("expected Changed, got {other:?}"),
        }
    }

    #[test]
    fn test_display_with_empty_side() {
        let actual = PermissionSet::from(Permission::Speak);
        let expected = PermissionSet::empty();
        assert_eq!(
            diff(&actual, &expected).to_string(),
            "to be removed: SPEAK; to be added: <none>"
        );
    }

    fn arb_set() -> impl Strategy<Value = PermissionSet> {
        prop::collection::vec(0..Permission::COUNT, 0..Permission::COUNT).prop_map(|bits| {
            bits.into_iter()
                .filter_map(|bit| Permission::from_bit(bit as u64))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_diff_of_identical_sets_is_equal(set in arb_set()) {
            prop_assert_eq!(diff(&set, &set.clone()), PermissionDiff::Equal);
        }

        #[test]
        fn prop_diff_partitions_without_overlap(a in arb_set(), b in arb_set()) {
            if let PermissionDiff::Changed { to_remove, to_add } = diff(&a, &b) {
                for name in &to_remove {
                    prop_assert!(!to_add.contains(name));
                }
                let differing = Permission::ALL
                    .iter()
                    .filter(|flag| a.contains(**flag) != b.contains(**flag))
                    .count();
                prop_assert_eq!(to_remove.len() + to_add.len(), differing);
            }
        }
    }
}
