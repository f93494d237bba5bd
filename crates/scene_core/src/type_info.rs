//! Runtime type identity.
//!
//! [`TypeInfo`] pairs a [`std::any::TypeId`] with the type's name. Identity,
//! hashing and ordering use the `TypeId` only, so two `TypeInfo`s are equal
//! iff they denote the same concrete type. The name is informational.
//!
//! ## Archive Tags
//!
//! `TypeId` values are not stable between builds and cannot be written to
//! disk. [`TypeInfo::tag`] derives a `u64` from the type name using the
//! FNV-1a 64-bit hash algorithm, which an archive layer can record next to
//! each polymorphic element.

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a concrete Rust type for the lifetime of the process.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Returns the [`TypeInfo`] of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name, as reported by [`std::any::type_name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// FNV-1a 64-bit digest of [`TypeInfo::name`].
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325
    /// for each byte in name:
    ///     hash = (hash XOR byte) * 0x00000100000001b3
    /// ```
    ///
    /// Stable for a given build of the program. Type names may change across
    /// compiler versions, so archives that must outlive a toolchain should
    /// record their own tags.
    #[must_use]
    pub fn tag(&self) -> u64 {
        fnv1a(self.name, Self::FNV_OFFSET_BASIS, Self::FNV_PRIME)
    }

    /// Returns `true` if this identifies `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

const fn fnv1a(name: &str, basis: u64, prime: u64) -> u64 {
    let bytes = name.as_bytes();
    let mut hash = basis;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(prime);
        i += 1;
    }
    hash
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeInfo({})", self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Health;
    struct Velocity;

    #[test]
    fn test_type_info_is_stable() {
        assert_eq!(TypeInfo::of::<Health>(), TypeInfo::of::<Health>());
    }

    #[test]
    fn test_type_info_differs_between_types() {
        assert_ne!(TypeInfo::of::<Health>(), TypeInfo::of::<Velocity>());
    }

    #[test]
    fn test_type_info_hash_matches_eq() {
        let mut set = HashSet::new();
        set.insert(TypeInfo::of::<Health>());
        set.insert(TypeInfo::of::<Health>());
        set.insert(TypeInfo::of::<Velocity>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_type_info_name() {
        let info = TypeInfo::of::<Health>();
        assert!(info.name().ends_with("Health"));
        assert_eq!(info.to_string(), info.name());
    }

    #[test]
    fn test_type_info_is() {
        let info = TypeInfo::of::<Health>();
        assert!(info.is::<Health>());
        assert!(!info.is::<Velocity>());
    }

    #[test]
    fn test_tag_is_deterministic() {
        let info = TypeInfo::of::<Health>();
        assert_eq!(info.tag(), TypeInfo::of::<Health>().tag());
        assert_ne!(info.tag(), TypeInfo::of::<Velocity>().tag());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of the empty string is the offset basis itself.
        assert_eq!(
            fnv1a("", TypeInfo::FNV_OFFSET_BASIS, TypeInfo::FNV_PRIME),
            0xcbf2_9ce4_8422_2325
        );
        // FNV-1a 64-bit of "a".
        assert_eq!(
            fnv1a("a", TypeInfo::FNV_OFFSET_BASIS, TypeInfo::FNV_PRIME),
            0xaf63_dc4c_8601_ec8c
        );
    }
}
