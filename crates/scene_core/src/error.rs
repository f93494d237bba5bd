//! Scene-level error types.

use crate::entity::SceneEntity;

/// Errors returned by [`SceneRegistry`](crate::SceneRegistry) operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The entity is null, was never created, or has been destroyed.
    #[error("{0} not found")]
    EntityNotFound(SceneEntity),

    /// The entity exists but has no component of the requested type.
    #[error("component '{component}' not found on {entity}")]
    ComponentNotFound {
        /// Type name of the requested component.
        component: &'static str,
        /// The entity that was queried.
        entity: SceneEntity,
    },
}
