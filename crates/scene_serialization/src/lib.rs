//! # scene_serialization
//!
//! Persist and restore entities whose component types the core never sees.
//!
//! Each live component type is paired with a serializable surrogate type. A
//! [`SceneSerialization`] registry records, for every pair, how to convert
//! one into the other and how to attach the decoded component to an entity.
//! It dispatches purely on runtime [`TypeInfo`](scene_core::TypeInfo).
//!
//! This crate provides:
//!
//! - [`SerializableComponent`] — the polymorphic base of every surrogate.
//! - [`SerializableEntity`] — one entity's ordered surrogate list.
//! - [`ErasedBinding`] / [`ComponentSerialization`] — the per-pair binding.
//! - [`SceneSerialization`] — the registry and the entity-level operations.
//!
//! ## Usage
//!
//! ```rust
//! use scene_core::SceneRegistry;
//! use scene_serialization::{SceneSerialization, SerializableComponent};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! impl SerializableComponent for Position {}
//!
//! let mut serialization = SceneSerialization::new();
//! serialization.register_identity::<Position>();
//!
//! let mut scene = SceneRegistry::new();
//! let e = scene.create_entity();
//! scene.emplace_or_replace_component(e, Position { x: 1.0, y: 2.0 }).unwrap();
//!
//! let saved = serialization.snapshot_entity(e, &scene).unwrap();
//! let copy = serialization.materialize_entity(Some(&saved), &mut scene).unwrap();
//! assert_eq!(scene.get_component::<Position>(copy).unwrap(), &Position { x: 1.0, y: 2.0 });
//! ```

pub mod binding;
pub mod serializable_component;
pub mod serializable_entity;
pub mod serialization;

pub use binding::{ComponentSerialization, ErasedBinding};
pub use serializable_component::SerializableComponent;
pub use serializable_entity::SerializableEntity;
pub use serialization::SceneSerialization;
