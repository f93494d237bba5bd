//! The live component store.
//!
//! [`SceneRegistry`] owns every entity and its components. Each entity keeps
//! its components in attachment order, and [`SceneRegistry::visit`] walks
//! them in that order without knowing their concrete types.

use std::any::Any;
use std::collections::HashMap;

use tracing::trace;

use crate::component::{Component, ComponentSlot};
use crate::entity::SceneEntity;
use crate::error::SceneError;
use crate::type_info::TypeInfo;

/// A single entity's component set, in attachment order.
#[derive(Default)]
struct EntityData {
    components: Vec<ComponentSlot>,
}

impl EntityData {
    fn position(&self, type_info: TypeInfo) -> Option<usize> {
        self.components
            .iter()
            .position(|slot| slot.type_info() == type_info)
    }

    fn slot(&self, type_info: TypeInfo) -> Option<&ComponentSlot> {
        self.components
            .iter()
            .find(|slot| slot.type_info() == type_info)
    }

    fn slot_mut(&mut self, type_info: TypeInfo) -> Option<&mut ComponentSlot> {
        self.components
            .iter_mut()
            .find(|slot| slot.type_info() == type_info)
    }
}

/// Entity storage with typed and type-erased component access.
#[derive(Default)]
pub struct SceneRegistry {
    /// Last handle handed out.
    last: SceneEntity,
    entities: HashMap<SceneEntity, EntityData>,
}

impl SceneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: SceneEntity::NULL,
            entities: HashMap::new(),
        }
    }

    // -- Entity lifecycle --

    /// Create a new entity with no components.
    pub fn create_entity(&mut self) -> SceneEntity {
        let entity = self.last.successor();
        self.last = entity;
        self.entities.insert(entity, EntityData::default());
        trace!(%entity, "created entity");
        entity
    }

    /// Destroy an entity and drop all of its components.
    pub fn destroy_entity(&mut self, entity: SceneEntity) -> Result<(), SceneError> {
        if self.entities.remove(&entity).is_none() {
            return Err(SceneError::EntityNotFound(entity));
        }
        trace!(%entity, "destroyed entity");
        Ok(())
    }

    /// Returns `true` if the entity exists.
    #[must_use]
    pub fn contains(&self, entity: SceneEntity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // -- Component operations --

    /// Get the entity's `T`, attaching `make()` first if it has none.
    ///
    /// `make` only runs when the component is missing. The returned flag is
    /// `true` when the component was newly attached and `false` when an
    /// existing one was returned untouched.
    pub fn emplace_component_with<T, F>(
        &mut self,
        entity: SceneEntity,
        make: F,
    ) -> Result<(&mut T, bool), SceneError>
    where
        T: Component,
        F: FnOnce() -> T,
    {
        let data = self.data_mut(entity)?;
        let type_info = TypeInfo::of::<T>();
        let (index, inserted) = match data.position(type_info) {
            Some(index) => (index, false),
            None => {
                data.components.push(ComponentSlot::new(make()));
                (data.components.len() - 1, true)
            }
        };
        Ok((data.components[index].downcast_mut::<T>(), inserted))
    }

    /// Attach `value` as the entity's `T`, overwriting any existing `T` in
    /// place. A replaced component keeps its attachment position.
    pub fn emplace_or_replace_component<T: Component>(
        &mut self,
        entity: SceneEntity,
        value: T,
    ) -> Result<&mut T, SceneError> {
        let data = self.data_mut(entity)?;
        let index = match data.position(TypeInfo::of::<T>()) {
            Some(index) => {
                data.components[index].replace(value);
                index
            }
            None => {
                data.components.push(ComponentSlot::new(value));
                data.components.len() - 1
            }
        };
        Ok(data.components[index].downcast_mut::<T>())
    }

    /// Get a reference to the entity's `T`.
    pub fn get_component<T: Component>(&self, entity: SceneEntity) -> Result<&T, SceneError> {
        self.data(entity)?
            .slot(TypeInfo::of::<T>())
            .map(ComponentSlot::downcast_ref::<T>)
            .ok_or_else(|| SceneError::ComponentNotFound {
                component: std::any::type_name::<T>(),
                entity,
            })
    }

    /// Returns `true` if the entity exists and has a `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: SceneEntity) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|data| data.position(TypeInfo::of::<T>()).is_some())
    }

    /// Detach the entity's `T`. Remaining components keep their relative order.
    pub fn remove_component<T: Component>(&mut self, entity: SceneEntity) -> Result<(), SceneError> {
        let data = self.data_mut(entity)?;
        let index = data
            .position(TypeInfo::of::<T>())
            .ok_or_else(|| SceneError::ComponentNotFound {
                component: std::any::type_name::<T>(),
                entity,
            })?;
        data.components.remove(index);
        Ok(())
    }

    /// Returns the number of components attached to the entity.
    pub fn component_count(&self, entity: SceneEntity) -> Result<usize, SceneError> {
        Ok(self.data(entity)?.components.len())
    }

    /// Returns the types of the entity's components, in attachment order.
    pub fn component_types(&self, entity: SceneEntity) -> Result<Vec<TypeInfo>, SceneError> {
        Ok(self
            .data(entity)?
            .components
            .iter()
            .map(ComponentSlot::type_info)
            .collect())
    }

    // -- Type-erased access --

    /// Call `f` with the type and value of every component on the entity, in
    /// attachment order.
    pub fn visit<F>(&self, entity: SceneEntity, mut f: F) -> Result<(), SceneError>
    where
        F: FnMut(TypeInfo, &dyn Any),
    {
        for slot in &self.data(entity)?.components {
            f(slot.type_info(), slot.as_any());
        }
        Ok(())
    }

    /// Erased read access to the entity's component of the given type.
    #[must_use]
    pub fn get_erased(&self, entity: SceneEntity, type_info: TypeInfo) -> Option<&dyn Any> {
        self.entities
            .get(&entity)?
            .slot(type_info)
            .map(ComponentSlot::as_any)
    }

    /// Erased write access to the entity's component of the given type.
    #[must_use]
    pub fn get_erased_mut(
        &mut self,
        entity: SceneEntity,
        type_info: TypeInfo,
    ) -> Option<&mut dyn Any> {
        self.entities
            .get_mut(&entity)?
            .slot_mut(type_info)
            .map(ComponentSlot::as_any_mut)
    }

    fn data(&self, entity: SceneEntity) -> Result<&EntityData, SceneError> {
        self.entities
            .get(&entity)
            .ok_or(SceneError::EntityNotFound(entity))
    }

    fn data_mut(&mut self, entity: SceneEntity) -> Result<&mut EntityData, SceneError> {
        self.entities
            .get_mut(&entity)
            .ok_or(SceneError::EntityNotFound(entity))
    }
}
