//! # scene_core
//!
//! The entity-component collaborators that scene serialization is built on.
//!
//! This crate provides:
//!
//! - [`TypeInfo`] — process-lifetime runtime type identity.
//! - [`SceneEntity`] — lightweight `u64` entity handles.
//! - [`Component`] — the marker trait for attachable data.
//! - [`SceneRegistry`] — entity storage with typed and type-erased access.
//! - [`SceneError`] — errors for operations on missing entities or components.

pub mod component;
pub mod entity;
pub mod error;
pub mod registry;
pub mod type_info;

pub use component::Component;
pub use entity::SceneEntity;
pub use error::SceneError;
pub use registry::SceneRegistry;
pub use type_info::TypeInfo;
