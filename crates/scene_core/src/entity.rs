//! Entity handles.

use std::fmt;

/// Handle to an entity in a [`SceneRegistry`](crate::SceneRegistry).
///
/// Handles carry no data. Raw value 0 is reserved for [`SceneEntity::NULL`];
/// the registry hands out 1, 2, 3, ... and never reuses a value, so a handle
/// to a destroyed entity stays dead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneEntity(u64);

impl SceneEntity {
    /// The entity returned when there was nothing to materialize.
    pub const NULL: SceneEntity = SceneEntity(0);

    /// Wrap a raw handle value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The handle after this one.
    pub(crate) const fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SceneEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("entity#null")
        } else {
            write!(f, "entity#{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_default() {
        assert!(SceneEntity::NULL.is_null());
        assert_eq!(SceneEntity::default(), SceneEntity::NULL);
        assert!(!SceneEntity::from_raw(3).is_null());
    }

    #[test]
    fn test_successor_skips_null() {
        let first = SceneEntity::NULL.successor();
        assert_eq!(first.raw(), 1);
        assert_eq!(first.successor().raw(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(SceneEntity::from_raw(12).to_string(), "entity#12");
        assert_eq!(SceneEntity::NULL.to_string(), "entity#null");
    }
}
