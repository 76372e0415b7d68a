//! Arbitrary-width permission sets.
//!
//! The flag domain already spans more than 32 bits and is free to grow past
//! 64, so sets are backed by an arbitrary-precision integer; no fixed
//! machine word appears anywhere in the arithmetic.

use std::fmt;
use std::ops::BitOr;
use std::sync::LazyLock;

use num_bigint::BigUint;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AclError, AclResult};
use crate::flag::Permission;

static ALL_GRANTABLE: LazyLock<PermissionSet> = LazyLock::new(|| {
    Permission::ALL
        .iter()
        .copied()
        .filter(|flag| *flag != Permission::TimedOut)
        .collect()
});

/// An immutable collection of permission flags.
///
/// All operations return new sets; a value never changes after
/// construction. Serialized as a decimal string, matching the wire format
/// of role grants and overrides.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet {
    bits: BigUint,
}

impl PermissionSet {
    /// The set with no flags.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every grantable flag: the whole domain except [`Permission::TimedOut`].
    ///
    /// This is what owners and administrators resolve to.
    pub fn all_grantable() -> Self {
        ALL_GRANTABLE.clone()
    }

    /// Build a set from individual flags.
    pub fn from_flags(flags: impl IntoIterator<Item = Permission>) -> Self {
        flags.into_iter().collect()
    }

    fn flag_mask(flag: Permission) -> BigUint {
        BigUint::from(1u8) << (flag.bit() as usize)
    }

    /// Check whether a single flag is set.
    pub fn contains(&self, flag: Permission) -> bool {
        let mask = Self::flag_mask(flag);
        (&self.bits & &mask) == mask
    }

    /// Check whether every flag of `other` is set in `self`.
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        (&self.bits & &other.bits) == other.bits
    }

    /// The union of two sets.
    pub fn union(&self, other: &PermissionSet) -> Self {
        Self {
            bits: &self.bits | &other.bits,
        }
    }

    /// The flags of `self` that are not in `other` (mask-out).
    pub fn difference(&self, other: &PermissionSet) -> Self {
        let common = &self.bits & &other.bits;
        Self {
            bits: &self.bits ^ &common,
        }
    }

    /// A copy with one extra flag set.
    pub fn with(&self, flag: Permission) -> Self {
        Self {
            bits: &self.bits | Self::flag_mask(flag),
        }
    }

    /// A copy with one flag cleared.
    pub fn without(&self, flag: Permission) -> Self {
        let common = &self.bits & Self::flag_mask(flag);
        Self {
            bits: &self.bits ^ &common,
        }
    }

    /// True when no flag is set.
    pub fn is_empty(&self) -> bool {
        self.bits == BigUint::default()
    }

    /// Names of all set flags, in bit order.
    ///
    /// Bits outside the known domain render as `<unknown>`.
    pub fn flag_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for bit in 0..self.bits.bits() {
            let mask = BigUint::from(1u8) << (bit as usize);
            if (&self.bits & &mask) == mask {
                names.push(Permission::from_bit(bit).map_or("<unknown>", Permission::name));
            }
        }
        names
    }

    /// Render as a binary string, zero-padded on the left to `width`.
    ///
    /// Bit 0 ends up as the rightmost character.
    pub fn to_bit_string(&self, width: usize) -> String {
        let raw = self.bits.to_str_radix(2);
        if raw.len() >= width {
            raw
        } else {
            let mut padded = "0".repeat(width - raw.len());
            padded.push_str(&raw);
            padded
        }
    }

    /// Parse a string of `0`/`1` characters; the last character is bit 0.
    pub fn from_bit_string(s: &str) -> AclResult<Self> {
        let mut bits = BigUint::default();
        for (i, ch) in s.chars().rev().enumerate() {
            match ch {
                '1' => bits |= BigUint::from(1u8) << i,
                '0' => {}
                other => return Err(AclError::MalformedBitString { found: other }),
            }
        }
        Ok(Self { bits })
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut bits = BigUint::default();
        for flag in iter {
            bits |= Self::flag_mask(flag);
        }
        Self { bits }
    }
}

impl From<Permission> for PermissionSet {
    fn from(flag: Permission) -> Self {
        Self {
            bits: Self::flag_mask(flag),
        }
    }
}

impl BitOr for Permission {
    type Output = PermissionSet;

    fn bitor(self, rhs: Permission) -> PermissionSet {
        PermissionSet::from(self).with(rhs)
    }
}

impl BitOr<Permission> for PermissionSet {
    type Output = PermissionSet;

    fn bitor(self, rhs: Permission) -> PermissionSet {
        self.with(rhs)
    }
}

impl BitOr for PermissionSet {
    type Output = PermissionSet;

    fn bitor(self, rhs: PermissionSet) -> PermissionSet {
        self.union(&rhs)
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "PermissionSet(<empty>)")
        } else {
            write!(f, "PermissionSet({})", self.flag_names().join(" | "))
        }
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bits.to_string())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let bits = raw
            .parse::<BigUint>()
            .map_err(|_| de::Error::custom(format!("'{raw}' is not a decimal permission value")))?;
        Ok(Self { bits })
    }
}
