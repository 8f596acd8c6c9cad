//! Stable 64-bit asset identities

use std::fmt;

use serde::{Deserialize, Serialize};

/// FNV-1a offset basis and prime (64-bit).
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable identity of one asset for its entire lifetime within an
/// [`AssetDatabase`](crate::database::AssetDatabase).
///
/// An `AssetId` is a plain 64-bit value: cheap to copy, hash, and persist
/// inside serialized payloads (e.g. a shader program referring to its
/// stage shaders). The zero value is reserved as the [`EMPTY`](Self::EMPTY)
/// sentinel meaning "no asset".
///
/// Identities are assigned randomly at import time and survive file moves
/// and renames. [`from_stable_name`](Self::from_stable_name) exists for
/// tooling that needs reproducible identities and is never used by the
/// database itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(u64);

impl AssetId {
    /// The "no asset" sentinel.
    pub const EMPTY: AssetId = AssetId(0);

    /// Create an identity from a raw 64-bit value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw 64-bit value.
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Whether this is the [`EMPTY`](Self::EMPTY) sentinel.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Generate a new random, non-empty identity.
    ///
    /// Uniqueness within a database is enforced by the database, not here.
    pub fn random() -> Self {
        loop {
            let raw: u64 = rand::random();
            if raw != 0 {
                return Self(raw);
            }
        }
    }

    /// Derive an identity deterministically from a stable string.
    ///
    /// Uses FNV-1a, which is stable across runs, platforms, and compiler
    /// versions. The result is never [`EMPTY`](Self::EMPTY).
    pub fn from_stable_name(name: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in name.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        if hash == 0 {
            // The sentinel is reserved; nudge the degenerate input away from it.
            hash = FNV_OFFSET_BASIS;
        }
        Self(hash)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::EMPTY
    }
}
