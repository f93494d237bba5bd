//! The polymorphic base of every serializable surrogate.
//!
//! A surrogate is the persistence-shaped stand-in for a live component. The
//! registry only ever holds surrogates as `Box<dyn SerializableComponent>`,
//! and dispatches on [`SerializableComponent::type_info`], which always
//! reports the concrete surrogate type.
//!
//! # Examples
//!
//! ```rust
//! use scene_core::TypeInfo;
//! use scene_serialization::SerializableComponent;
//!
//! #[derive(Debug, Default)]
//! struct HealthData {
//!     current: f32,
//! }
//!
//! impl SerializableComponent for HealthData {}
//!
//! let surrogate: Box<dyn SerializableComponent> = Box::new(HealthData { current: 3.0 });
//! assert_eq!(surrogate.type_info(), TypeInfo::of::<HealthData>());
//! assert_eq!(surrogate.downcast_ref::<HealthData>().unwrap().current, 3.0);
//! ```

use std::any::Any;
use std::fmt;

use scene_core::TypeInfo;

mod sealed {
    use std::any::Any;

    use scene_core::TypeInfo;

    /// Concrete-type hooks every surrogate gets for free. Not nameable
    /// outside this crate, so a `Box<dyn SerializableComponent>` can never
    /// pick these up through the blanket impl by mistake. The names differ
    /// from the inherent methods on `dyn SerializableComponent`, which would
    /// otherwise be ambiguous with these supertrait methods.
    pub trait Concrete: Any {
        fn concrete_as_any(&self) -> &dyn Any;
        fn concrete_type_info(&self) -> TypeInfo;
    }

    impl<T: Any> Concrete for T {
        fn concrete_as_any(&self) -> &dyn Any {
            self
        }

        fn concrete_type_info(&self) -> TypeInfo {
            TypeInfo::of::<T>()
        }
    }
}

/// Base trait of all surrogate types.
///
/// Implement it with an empty body; the identity hooks are provided.
pub trait SerializableComponent: sealed::Concrete + Send + Sync + fmt::Debug + 'static {}

impl dyn SerializableComponent {
    /// The concrete type of this surrogate.
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        sealed::Concrete::concrete_type_info(self)
    }

    /// Returns `true` if the concrete surrogate type is `S`.
    #[must_use]
    pub fn is<S: SerializableComponent>(&self) -> bool {
        self.type_info().is::<S>()
    }

    /// The surrogate as `&dyn Any`, for downcasting by archive code.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        sealed::Concrete::concrete_as_any(self)
    }

    /// Downcast to the concrete surrogate type.
    #[must_use]
    pub fn downcast_ref<S: SerializableComponent>(&self) -> Option<&S> {
        self.as_any().downcast_ref::<S>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct PositionData {
        x: f32,
        y: f32,
    }

    impl SerializableComponent for PositionData {}

    #[derive(Debug, Default)]
    struct VelocityData;

    impl SerializableComponent for VelocityData {}

    #[test]
    fn test_type_info_is_concrete_type() {
        let boxed: Box<dyn SerializableComponent> = Box::new(PositionData::default());
        assert_eq!(boxed.type_info(), TypeInfo::of::<PositionData>());
        assert_ne!(boxed.type_info(), TypeInfo::of::<Box<dyn SerializableComponent>>());
    }

    #[test]
    fn test_type_info_through_reference() {
        let value = VelocityData;
        let erased: &dyn SerializableComponent = &value;
        assert!(erased.is::<VelocityData>());
        assert!(!erased.is::<PositionData>());
    }

    #[test]
    fn test_downcast() {
        let boxed: Box<dyn SerializableComponent> = Box::new(PositionData { x: 1.0, y: 2.0 });
        let data = boxed.downcast_ref::<PositionData>().unwrap();
        assert_eq!((data.x, data.y), (1.0, 2.0));
        assert!(boxed.downcast_ref::<VelocityData>().is_none());
    }

    #[test]
    fn test_as_any_reaches_concrete_value() {
        let boxed: Box<dyn SerializableComponent> = Box::new(PositionData { x: 3.0, y: 0.5 });
        let any = boxed.as_any();
        assert!(any.is::<PositionData>());
        assert!(!any.is::<Box<dyn SerializableComponent>>());
        assert_eq!(any.downcast_ref::<PositionData>().map(|p| p.y), Some(0.5));
    }
}
