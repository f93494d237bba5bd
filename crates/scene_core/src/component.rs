//! The [`Component`] trait and the type-erased slot components live in.

use std::any::Any;

use crate::type_info::TypeInfo;

/// Data that can be attached to a [`SceneEntity`](crate::SceneEntity).
///
/// Any `'static` type that is `Send + Sync` is a component; the trait is
/// implemented automatically.
pub trait Component: Any + Send + Sync {}

impl<T: Any + Send + Sync> Component for T {}

/// One component value attached to an entity, stored behind `dyn Any`.
pub(crate) struct ComponentSlot {
    type_info: TypeInfo,
    value: Box<dyn Any + Send + Sync>,
}

impl ComponentSlot {
    pub(crate) fn new<T: Component>(value: T) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            value: Box::new(value),
        }
    }

    pub(crate) fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        &*self.value
    }

    pub(crate) fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.value
    }

    /// Typed access. The slot's `type_info` always describes `value`, so a
    /// mismatch here means the caller looked the slot up under the wrong key.
    pub(crate) fn downcast_ref<T: Component>(&self) -> &T {
        match self.value.downcast_ref::<T>() {
            Some(value) => value,
            None => panic!(
                "component slot holds {}, not {}",
                self.type_info,
                std::any::type_name::<T>()
            ),
        }
    }

    pub(crate) fn downcast_mut<T: Component>(&mut self) -> &mut T {
        let type_info = self.type_info;
        match self.value.downcast_mut::<T>() {
            Some(value) => value,
            None => panic!(
                "component slot holds {}, not {}",
                type_info,
                std::any::type_name::<T>()
            ),
        }
    }

    pub(crate) fn replace<T: Component>(&mut self, value: T) {
        *self.downcast_mut::<T>() = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    #[test]
    fn test_slot_records_type() {
        let slot = ComponentSlot::new(Health {
            current: 80.0,
            max: 100.0,
        });
        assert_eq!(slot.type_info(), TypeInfo::of::<Health>());
        assert!(slot.as_any().is::<Health>());
    }

    #[test]
    fn test_slot_replace() {
        let mut slot = ComponentSlot::new(Health {
            current: 80.0,
            max: 100.0,
        });
        slot.replace(Health {
            current: 10.0,
            max: 100.0,
        });
        assert_eq!(slot.downcast_ref::<Health>().current, 10.0);
    }

    #[test]
    #[should_panic(expected = "component slot holds")]
    fn test_slot_wrong_type_panics() {
        let slot = ComponentSlot::new(1_u32);
        let _ = slot.downcast_ref::<Health>();
    }
}
