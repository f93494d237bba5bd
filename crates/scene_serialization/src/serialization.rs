//! The component serialization registry.
//!
//! [`SceneSerialization`] is populated once at startup with one binding per
//! (component, surrogate) pair and is read-only afterwards. It is an ordinary
//! value: build it in a bootstrap routine and pass `&SceneSerialization` to
//! whatever needs to save or load entities. It has no interior mutability,
//! so `&SceneSerialization` can be shared across threads once populated.
//!
//! Lookups that find no binding are never errors. An unregistered component
//! is left out of a snapshot, and an unknown surrogate is skipped on load, so
//! a scene saved by another build still loads everything this build knows.

use std::any::Any;
use std::collections::HashMap;

use scene_core::{Component, SceneEntity, SceneError, SceneRegistry, TypeInfo};
use tracing::{debug, trace};

use crate::binding::{ComponentSerialization, ErasedBinding};
use crate::serializable_component::SerializableComponent;
use crate::serializable_entity::SerializableEntity;

/// Dual-keyed catalog of component serialization bindings.
#[derive(Default)]
pub struct SceneSerialization {
    bindings: Vec<Box<dyn ErasedBinding>>,
    /// Component type -> index into `bindings`.
    by_component_type: HashMap<TypeInfo, usize>,
    /// Surrogate type -> index into `bindings`.
    by_surrogate_type: HashMap<TypeInfo, usize>,
    /// Surrogate archive tag -> index into `bindings`.
    by_surrogate_tag: HashMap<u64, usize>,
}

impl SceneSerialization {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            by_component_type: HashMap::new(),
            by_surrogate_type: HashMap::new(),
            by_surrogate_tag: HashMap::new(),
        }
    }

    // -- Registration --

    /// Bind component `C` to surrogate `S` with explicit conversions.
    ///
    /// # Panics
    ///
    /// If `C` or `S` already takes part in a binding, or if `S` shares its
    /// archive tag with an already registered surrogate.
    pub fn register_binding<C, S, F, G>(&mut self, serializer: F, deserializer: G)
    where
        C: Component,
        S: SerializableComponent + Default,
        F: Fn(&C) -> S + Send + Sync + 'static,
        G: Fn(&S) -> C + Send + Sync + 'static,
    {
        let component = TypeInfo::of::<C>();
        let surrogate = TypeInfo::of::<S>();
        let tag = surrogate.tag();

        assert!(
            !self.by_component_type.contains_key(&component),
            "component {component} is already registered"
        );
        assert!(
            !self.by_surrogate_type.contains_key(&surrogate),
            "surrogate {surrogate} is already registered"
        );
        if let Some(&index) = self.by_surrogate_tag.get(&tag) {
            panic!(
                "surrogate {surrogate} has the same archive tag as {}",
                self.bindings[index].surrogate_type()
            );
        }

        let index = self.bindings.len();
        self.bindings
            .push(Box::new(ComponentSerialization::<C, S>::new(serializer, deserializer)));
        self.by_component_type.insert(component, index);
        self.by_surrogate_type.insert(surrogate, index);
        self.by_surrogate_tag.insert(tag, index);

        debug!(%component, %surrogate, tag, "registered component serialization");
    }

    /// Bind `C` to itself; the surrogate is a clone of the component.
    ///
    /// # Panics
    ///
    /// As [`SceneSerialization::register_binding`].
    pub fn register_identity<C>(&mut self)
    where
        C: SerializableComponent + Clone + Default,
    {
        self.register_binding::<C, C, _, _>(C::clone, C::clone);
    }

    /// Bind `C` to `S` through their [`From`] conversions.
    ///
    /// # Panics
    ///
    /// As [`SceneSerialization::register_binding`].
    pub fn register_convertible<C, S>(&mut self)
    where
        C: Component + for<'a> From<&'a S>,
        S: SerializableComponent + Default + for<'a> From<&'a C>,
    {
        self.register_binding::<C, S, _, _>(|c: &C| S::from(c), |s: &S| C::from(s));
    }

    // -- Entity-level operations --

    /// Build the serializable form of `entity`.
    ///
    /// Components are visited in attachment order; those without a binding
    /// are left out.
    pub fn snapshot_entity(
        &self,
        entity: SceneEntity,
        scene: &SceneRegistry,
    ) -> Result<SerializableEntity, SceneError> {
        let mut serializable = SerializableEntity::new();
        scene.visit(entity, |component, value| {
            let Some(binding) = self.binding_for_component(component) else {
                trace!(%component, %entity, "no binding, component not persisted");
                return;
            };
            serializable.push(binding.make_surrogate_from_component(value));
        })?;
        Ok(serializable)
    }

    /// Create a new entity in `scene` from `source`.
    ///
    /// Returns [`SceneEntity::NULL`] without touching `scene` when `source`
    /// is `None`. Empty slots and unknown surrogate types are skipped.
    pub fn materialize_entity(
        &self,
        source: Option<&SerializableEntity>,
        scene: &mut SceneRegistry,
    ) -> Result<SceneEntity, SceneError> {
        let Some(source) = source else {
            return Ok(SceneEntity::NULL);
        };
        let entity = scene.create_entity();
        self.emplace_all(source, entity, scene)?;
        Ok(entity)
    }

    /// Attach the components of `source` to an existing entity.
    ///
    /// Components the entity already has are kept as they are. `None` is a
    /// no-op. For any other `source` a dead `target` is an error, even when
    /// every slot is empty or of an unknown surrogate type.
    pub fn merge_into_entity(
        &self,
        source: Option<&SerializableEntity>,
        target: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError> {
        let Some(source) = source else {
            return Ok(());
        };
        ensure_alive(target, scene)?;
        self.emplace_all(source, target, scene)
    }

    /// Attach the component decoded from a single surrogate, overwriting any
    /// existing component of that type. Unknown surrogate types are skipped,
    /// but a dead `target` is still an error.
    pub fn emplace_or_replace_surrogate(
        &self,
        source: &dyn SerializableComponent,
        target: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError> {
        ensure_alive(target, scene)?;
        match self.binding_for_surrogate(source.type_info()) {
            Some(binding) => binding.emplace_or_replace_into_entity(source, target, scene),
            None => {
                let surrogate = source.type_info();
                trace!(%surrogate, entity = %target, "unknown surrogate, replace skipped");
                Ok(())
            }
        }
    }

    fn emplace_all(
        &self,
        source: &SerializableEntity,
        target: SceneEntity,
        scene: &mut SceneRegistry,
    ) -> Result<(), SceneError> {
        for surrogate in source.iter() {
            let surrogate_type = surrogate.type_info();
            let Some(binding) = self.binding_for_surrogate(surrogate_type) else {
                trace!(surrogate = %surrogate_type, entity = %target, "unknown surrogate, skipped");
                continue;
            };
            binding.emplace_into_entity(surrogate, target, scene)?;
        }
        Ok(())
    }

    // -- Component-level operations --

    /// Overwrite `target` with the component decoded from `source`.
    ///
    /// Nothing happens if the type of `source` is unknown, or if its
    /// binding's component type is not `target_type`.
    ///
    /// # Panics
    ///
    /// If `target` is not actually a `target_type`.
    pub fn overwrite_component(
        &self,
        source: &dyn SerializableComponent,
        target_type: TypeInfo,
        target: &mut dyn Any,
    ) {
        let surrogate = source.type_info();
        let Some(binding) = self.binding_for_surrogate(surrogate) else {
            trace!(%surrogate, "unknown surrogate, overwrite skipped");
            return;
        };
        if binding.component_type() != target_type {
            let bound = binding.component_type();
            trace!(%surrogate, %bound, target = %target_type, "component type mismatch, overwrite skipped");
            return;
        }
        binding.assign_into_existing(source, target);
    }

    /// A default surrogate for the given component type, or `None` if the
    /// type has no binding.
    #[must_use]
    pub fn make_surrogate_for_type(
        &self,
        component: TypeInfo,
    ) -> Option<Box<dyn SerializableComponent>> {
        self.binding_for_component(component)
            .map(|binding| binding.make_surrogate_default())
    }

    /// A surrogate built from `value`, or `None` if `component` has no
    /// binding.
    ///
    /// # Panics
    ///
    /// If `value` is not actually a `component`.
    #[must_use]
    pub fn make_surrogate_for_value(
        &self,
        component: TypeInfo,
        value: &dyn Any,
    ) -> Option<Box<dyn SerializableComponent>> {
        self.binding_for_component(component)
            .map(|binding| binding.make_surrogate_from_component(value))
    }

    // -- Type mapping --

    /// The component type bound to the given surrogate type.
    #[must_use]
    pub fn resolve_component_type(&self, surrogate: TypeInfo) -> Option<TypeInfo> {
        self.binding_for_surrogate(surrogate)
            .map(|binding| binding.component_type())
    }

    /// The surrogate type bound to the given component type.
    #[must_use]
    pub fn resolve_surrogate_type(&self, component: TypeInfo) -> Option<TypeInfo> {
        self.binding_for_component(component)
            .map(|binding| binding.surrogate_type())
    }

    /// The surrogate type whose [`TypeInfo::tag`] is `tag`.
    #[must_use]
    pub fn resolve_surrogate_tag(&self, tag: u64) -> Option<TypeInfo> {
        self.by_surrogate_tag
            .get(&tag)
            .map(|&index| self.bindings[index].surrogate_type())
    }

    /// A default surrogate of the type whose tag is `tag`, ready for an
    /// archive reader to fill in.
    #[must_use]
    pub fn make_surrogate_for_tag(&self, tag: u64) -> Option<Box<dyn SerializableComponent>> {
        self.by_surrogate_tag
            .get(&tag)
            .map(|&index| self.bindings[index].make_surrogate_default())
    }

    // -- Introspection --

    /// Number of registered bindings.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if `component` has a binding.
    #[must_use]
    pub fn is_component_registered(&self, component: TypeInfo) -> bool {
        self.by_component_type.contains_key(&component)
    }

    /// Returns `true` if `surrogate` has a binding.
    #[must_use]
    pub fn is_surrogate_registered(&self, surrogate: TypeInfo) -> bool {
        self.by_surrogate_type.contains_key(&surrogate)
    }

    fn binding_for_component(&self, component: TypeInfo) -> Option<&dyn ErasedBinding> {
        self.by_component_type
            .get(&component)
            .map(|&index| &*self.bindings[index])
    }

    fn binding_for_surrogate(&self, surrogate: TypeInfo) -> Option<&dyn ErasedBinding> {
        self.by_surrogate_type
            .get(&surrogate)
            .map(|&index| &*self.bindings[index])
    }
}

fn ensure_alive(entity: SceneEntity, scene: &SceneRegistry) -> Result<(), SceneError> {
    if scene.contains(entity) {
        Ok(())
    } else {
        Err(SceneError::EntityNotFound(entity))
    }
}

impl std::fmt::Debug for SceneSerialization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.bindings
                    .iter()
                    .map(|binding| (binding.component_type(), binding.surrogate_type())),
            )
            .finish()
    }
}
