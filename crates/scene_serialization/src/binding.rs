//! Per-pair component serialization bindings.
//!
//! A [`ComponentSerialization<C, S>`] is the only place that knows both the
//! concrete component type `C` and the concrete surrogate type `S`. It is
//! stored behind [`ErasedBinding`], so the registry can dispatch on
//! [`TypeInfo`] alone. Every erased argument is downcast back to `C` or `S`
//! on entry; the registry only hands a binding the values it was looked up
//! for.

use std::any::Any;
use std::fmt;

use scene_core::{Component, SceneEntity, SceneError, SceneRegistry, TypeInfo};
use tracing::trace;

use crate::serializable_component::SerializableComponent;

/// Converts a live component into its surrogate.
pub type Serializer<C, S> = Box<dyn Fn(&C) -> S + Send + Sync>;

/// Converts a surrogate back into a live component.
pub type Deserializer<C, S> = Box<dyn Fn(&S) -> C + Send + Sync>;

/// The type-erased interface over one (component, surrogate) pair.
pub trait ErasedBinding: Send + Sync {
    /// The live component type this binding bridges.
    fn component_type(&self) -> TypeInfo;

    /// The surrogate type this binding bridges.
    fn surrogate_type(&self) -> TypeInfo;

    /// A default-constructed surrogate, carrying no component data.
    fn make_surrogate_default(&self) -> Box<dyn SerializableComponent>;

    /// A surrogate built from `component`.
    ///
    /// # Panics
    ///
    /// If `component` is not of the bound component type.
    fn make_surrogate_from_component(&self, component: &dyn Any) -> Box<dyn SerializableComponent>;

    /// Attach the component decoded from `source` to `entity`, unless the
    /// entity already has one. An existing component is left untouched and
    /// `source` is not decoded.
    ///
    /// # Panics
    ///
    /// If `source` is not of the bound surrogate type.
    fn emplace_into_entity(
        &self,
        source: &dyn SerializableComponent,
        entity: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError>;

    /// Attach the component decoded from `source` to `entity`, overwriting
    /// any existing one.
    ///
    /// # Panics
    ///
    /// If `source` is not of the bound surrogate type.
    fn emplace_or_replace_into_entity(
        &self,
        source: &dyn SerializableComponent,
        entity: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError>;

    /// Overwrite `target` with the component decoded from `source`.
    ///
    /// Does nothing if `source` is not of the bound surrogate type.
    ///
    /// # Panics
    ///
    /// If `target` is not of the bound component type.
    fn assign_into_existing(&self, source: &dyn SerializableComponent, target: &mut dyn Any);
}

/// The binding between component `C` and surrogate `S`.
pub struct ComponentSerialization<C, S> {
    serializer: Serializer<C, S>,
    deserializer: Deserializer<C, S>,
}

impl<C, S> ComponentSerialization<C, S>
where
    C: Component,
    S: SerializableComponent + Default,
{
    /// Bind `C` to `S` with the given conversions.
    ///
    /// The pair is expected to round-trip: `deserializer(&serializer(&c))`
    /// should equal `c` under `C`'s own notion of equality.
    pub fn new<F, G>(serializer: F, deserializer: G) -> Self
    where
        F: Fn(&C) -> S + Send + Sync + 'static,
        G: Fn(&S) -> C + Send + Sync + 'static,
    {
        Self {
            serializer: Box::new(serializer),
            deserializer: Box::new(deserializer),
        }
    }

    fn surrogate<'a>(&self, source: &'a dyn SerializableComponent) -> &'a S {
        match source.downcast_ref::<S>() {
            Some(surrogate) => surrogate,
            None => panic!(
                "binding for {} received surrogate {}, expected {}",
                TypeInfo::of::<C>(),
                source.type_info(),
                TypeInfo::of::<S>()
            ),
        }
    }
}

impl<C, S> ErasedBinding for ComponentSerialization<C, S>
where
    C: Component,
    S: SerializableComponent + Default,
{
    fn component_type(&self) -> TypeInfo {
        TypeInfo::of::<C>()
    }

    fn surrogate_type(&self) -> TypeInfo {
        TypeInfo::of::<S>()
    }

    fn make_surrogate_default(&self) -> Box<dyn SerializableComponent> {
        Box::new(S::default())
    }

    fn make_surrogate_from_component(&self, component: &dyn Any) -> Box<dyn SerializableComponent> {
        let Some(component) = component.downcast_ref::<C>() else {
            panic!(
                "binding for {} received a component of another type",
                TypeInfo::of::<C>()
            );
        };
        Box::new((self.serializer)(component))
    }

    fn emplace_into_entity(
        &self,
        source: &dyn SerializableComponent,
        entity: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError> {
        let surrogate = self.surrogate(source);
        let (_, inserted) =
            scene.emplace_component_with(entity, || (self.deserializer)(surrogate))?;
        if !inserted {
            // Existing live data wins.
            let component = TypeInfo::of::<C>();
            trace!(%component, %entity, "component already present, emplace skipped");
        }
        Ok(())
    }

    fn emplace_or_replace_into_entity(
        &self,
        source: &dyn SerializableComponent,
        entity: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError> {
        let surrogate = self.surrogate(source);
        scene.emplace_or_replace_component(entity, (self.deserializer)(surrogate))?;
        Ok(())
    }

    fn assign_into_existing(&self, source: &dyn SerializableComponent, target: &mut dyn Any) {
        let Some(surrogate) = source.downcast_ref::<S>() else {
            let surrogate = source.type_info();
            let expected = TypeInfo::of::<S>();
            trace!(%surrogate, %expected, "surrogate type mismatch, assign skipped");
            return;
        };
        let Some(target) = target.downcast_mut::<C>() else {
            panic!(
                "binding for {} received an assignment target of another type",
                TypeInfo::of::<C>()
            );
        };
        *target = (self.deserializer)(surrogate);
    }
}

impl<C, S> fmt::Debug for ComponentSerialization<C, S>
where
    C: Component,
    S: SerializableComponent + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSerialization")
            .field("component", &TypeInfo::of::<C>())
            .field("surrogate", &TypeInfo::of::<S>())
            .finish()
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

    #[derive(Debug, Default, PartialEq)]
    struct HealthData {
        current: f32,
        max: f32,
    }

    impl SerializableComponent for HealthData {}

    #[derive(Debug, Default)]
    struct OtherData;

    impl SerializableComponent for OtherData {}

    fn health_binding() -> ComponentSerialization<Health, HealthData> {
        ComponentSerialization::new(
            |c: &Health| HealthData {
                current: c.current,
                max: c.max,
            },
            |s: &HealthData| Health {
                current: s.current,
                max: s.max,
            },
        )
    }

    fn health(current: f32) -> Health {
        Health {
            current,
            max: 100.0,
        }
    }

    fn data(current: f32) -> HealthData {
        HealthData {
            current,
            max: 100.0,
        }
    }

    #[test]
    fn test_reports_bound_types() {
        let binding = health_binding();
        assert_eq!(binding.component_type(), TypeInfo::of::<Health>());
        assert_eq!(binding.surrogate_type(), TypeInfo::of::<HealthData>());
    }

    #[test]
    fn test_make_surrogate_default() {
        let surrogate = health_binding().make_surrogate_default();
        assert_eq!(surrogate.downcast_ref::<HealthData>(), Some(&HealthData::default()));
    }

    #[test]
    fn test_make_surrogate_from_component() {
        let surrogate = health_binding().make_surrogate_from_component(&health(40.0));
        assert_eq!(surrogate.downcast_ref::<HealthData>(), Some(&data(40.0)));
    }

    #[test]
    #[should_panic(expected = "received a component of another type")]
    fn test_make_surrogate_from_wrong_component_panics() {
        let _ = health_binding().make_surrogate_from_component(&5_u32);
    }

    #[test]
    fn test_emplace_attaches_when_absent() {
        let mut scene = SceneRegistry::new();
        let e = scene.create_entity();
        health_binding()
            .emplace_into_entity(&data(75.0), e, &mut scene)
            .unwrap();
        assert_eq!(scene.get_component::<Health>(e).unwrap(), &health(75.0));
    }

    #[test]
    fn test_emplace_keeps_existing() {
        let mut scene = SceneRegistry::new();
        let e = scene.create_entity();
        scene.emplace_or_replace_component(e, health(10.0)).unwrap();

        health_binding()
            .emplace_into_entity(&data(99.0), e, &mut scene)
            .unwrap();
        assert_eq!(scene.get_component::<Health>(e).unwrap(), &health(10.0));
    }

    #[test]
    fn test_emplace_does_not_decode_when_present() {
        let binding = ComponentSerialization::<Health, HealthData>::new(
            |c: &Health| HealthData {
                current: c.current,
                max: c.max,
            },
            |_: &HealthData| -> Health { panic!("surrogate decoded") },
        );
        let mut scene = SceneRegistry::new();
        let e = scene.create_entity();
        scene.emplace_or_replace_component(e, health(10.0)).unwrap();

        binding.emplace_into_entity(&data(99.0), e, &mut scene).unwrap();
        assert_eq!(scene.get_component::<Health>(e).unwrap(), &health(10.0));
    }

    #[test]
    fn test_emplace_or_replace_overwrites() {
        let mut scene = SceneRegistry::new();
        let e = scene.create_entity();
        scene.emplace_or_replace_component(e, health(10.0)).unwrap();

        health_binding()
            .emplace_or_replace_into_entity(&data(99.0), e, &mut scene)
            .unwrap();
        assert_eq!(scene.get_component::<Health>(e).unwrap(), &health(99.0));
    }

    #[test]
    fn test_emplace_into_missing_entity() {
        let mut scene = SceneRegistry::new();
        let result = health_binding().emplace_into_entity(&data(1.0), SceneEntity::NULL, &mut scene);
        assert!(matches!(result, Err(SceneError::EntityNotFound(_))));
    }

    #[test]
    #[should_panic(expected = "received surrogate")]
    fn test_emplace_wrong_surrogate_panics() {
        let mut scene = SceneRegistry::new();
        let e = scene.create_entity();
        let _ = health_binding().emplace_into_entity(&OtherData, e, &mut scene);
    }

    #[test]
    fn test_assign_into_existing() {
        let mut target = health(1.0);
        health_binding().assign_into_existing(&data(64.0), &mut target);
        assert_eq!(target, health(64.0));
    }

    #[test]
    fn test_assign_wrong_surrogate_is_noop() {
        let mut target = health(1.0);
        health_binding().assign_into_existing(&OtherData, &mut target);
        assert_eq!(target, health(1.0));
    }

    #[test]
    #[should_panic(expected = "assignment target of another type")]
    fn test_assign_wrong_target_panics() {
        let mut target = 0_u32;
        health_binding().assign_into_existing(&data(64.0), &mut target);
    }
}
