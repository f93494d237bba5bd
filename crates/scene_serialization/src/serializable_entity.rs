//! One entity's persisted component set.

use crate::serializable_component::SerializableComponent;

/// An ordered list of owned surrogates describing one entity.
///
/// Produced by [`SceneSerialization::snapshot_entity`] in the entity's
/// attachment order, and consumed by
/// [`SceneSerialization::materialize_entity`] and
/// [`SceneSerialization::merge_into_entity`]. Empty (`None`) slots are
/// allowed and skipped on load; an archive reader leaves one behind when it
/// meets a surrogate it can not decode.
///
/// [`SceneSerialization::snapshot_entity`]: crate::SceneSerialization::snapshot_entity
/// [`SceneSerialization::materialize_entity`]: crate::SceneSerialization::materialize_entity
/// [`SceneSerialization::merge_into_entity`]: crate::SceneSerialization::merge_into_entity
#[derive(Debug, Default)]
pub struct SerializableEntity {
    /// Surrogate slots in insertion order.
    pub components: Vec<Option<Box<dyn SerializableComponent>>>,
}

impl SerializableEntity {
    /// Create an empty serializable entity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Append a surrogate, taking ownership of it.
    pub fn push(&mut self, surrogate: Box<dyn SerializableComponent>) {
        self.components.push(Some(surrogate));
    }

    /// Builder-style [`SerializableEntity::push`].
    #[must_use]
    pub fn with<S: SerializableComponent>(mut self, surrogate: S) -> Self {
        self.push(Box::new(surrogate));
        self
    }

    /// Number of slots, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if there are no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over the non-empty slots, in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SerializableComponent> + '_ {
        self.components.iter().filter_map(|slot| slot.as_deref())
    }

    /// Take the first surrogate of concrete type `S` out of its slot,
    /// leaving the slot empty.
    pub fn take<S: SerializableComponent>(&mut self) -> Option<Box<dyn SerializableComponent>> {
        self.components
            .iter_mut()
            .find(|slot| slot.as_deref().is_some_and(|s| s.is::<S>()))
            .and_then(Option::take)
    }
}

impl IntoIterator for SerializableEntity {
    type Item = Box<dyn SerializableComponent>;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<Box<dyn SerializableComponent>>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter().flatten()
    }
}

impl FromIterator<Box<dyn SerializableComponent>> for SerializableEntity {
    fn from_iter<I: IntoIterator<Item = Box<dyn SerializableComponent>>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Some).collect(),
        }
    }
}
