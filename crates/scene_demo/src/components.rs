//! Example components and their surrogates.
//!
//! The live components use `glam` types freely. Their surrogates hold plain
//! arrays and scalars so any archive format can encode them field by field.

use glam::{Quat, Vec3};
use scene_serialization::{SceneSerialization, SerializableComponent};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    /// World-space position.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform3D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// A transform at `position` with default rotation and scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotate the transform by the given quaternion.
    #[must_use]
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation * self.rotation;
        self
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Surrogate for [`Transform3D`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformData {
    /// World-space position as `[x, y, z]`.
    pub position: [f32; 3],
    /// Unit quaternion as `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// Per-axis scale as `[x, y, z]`.
    pub scale: [f32; 3],
}

impl SerializableComponent for TransformData {}

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// World units per second.
    pub linear: Vec3,
}

impl Velocity {
    /// Create a new velocity.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            linear: Vec3::new(x, y, z),
        }
    }
}

/// Surrogate for [`Velocity`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityData {
    /// Units per second as `[x, y, z]`.
    pub linear: [f32; 3],
}

impl SerializableComponent for VelocityData {}

impl From<&Velocity> for VelocityData {
    fn from(velocity: &Velocity) -> Self {
        Self {
            linear: velocity.linear.to_array(),
        }
    }
}

impl From<&VelocityData> for Velocity {
    fn from(data: &VelocityData) -> Self {
        Self {
            linear: Vec3::from_array(data.linear),
        }
    }
}

/// A display name. Serves as its own surrogate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    /// The name as shown in tools and logs.
    pub value: String,
}

impl Name {
    /// Create a new name component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }
}

impl SerializableComponent for Name {}

/// Current and maximum hit points. Serves as its own surrogate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Health {
    /// Remaining hit points, never below zero.
    pub current: f32,
    /// Hit points when fully healed.
    pub max: f32,
}

impl Health {
    /// Full health.
    #[must_use]
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, clamping to zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }
}

impl SerializableComponent for Health {}

/// Editor selection marker. Deliberately never registered, so it is never
/// saved.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selected;

/// Register every persisted component of the demo.
pub fn bootstrap(serialization: &mut SceneSerialization) {
    serialization.register_binding::<Transform3D, TransformData, _, _>(
        |t| TransformData {
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
            scale: t.scale.to_array(),
        },
        |data| Transform3D {
            position: Vec3::from_array(data.position),
            rotation: Quat::from_array(data.rotation),
            scale: Vec3::from_array(data.scale),
        },
    );
    serialization.register_convertible::<Velocity, VelocityData>();
    serialization.register_identity::<Name>();
    serialization.register_identity::<Health>();
}

#[cfg(test)]
mod tests {
    use scene_core::{SceneRegistry, TypeInfo};

    use super::*;

    fn registry() -> SceneSerialization {
        let mut serialization = SceneSerialization::new();
        bootstrap(&mut serialization);
        serialization
    }

    #[test]
    fn test_bootstrap_registers_all_pairs() {
        let serialization = registry();
        assert_eq!(serialization.binding_count(), 4);
        assert_eq!(
            serialization.resolve_surrogate_type(TypeInfo::of::<Transform3D>()),
            Some(TypeInfo::of::<TransformData>())
        );
        assert!(!serialization.is_component_registered(TypeInfo::of::<Selected>()));
    }

    #[test]
    fn test_transform_round_trip() {
        let serialization = registry();
        let mut scene = SceneRegistry::new();
        let e = scene.create_entity();
        let transform = Transform3D::from_position(Vec3::new(1.0, 2.0, 3.0))
            .rotated(Quat::from_rotation_y(0.5));
        scene.emplace_or_replace_component(e, transform).unwrap();
        scene.emplace_or_replace_component(e, Selected).unwrap();

        let saved = serialization.snapshot_entity(e, &scene).unwrap();
        assert_eq!(saved.len(), 1);

        let copy = serialization
            .materialize_entity(Some(&saved), &mut scene)
            .unwrap();
        assert_eq!(scene.get_component::<Transform3D>(copy).unwrap(), &transform);
        assert!(!scene.has_component::<Selected>(copy));
    }

    #[test]
    fn test_velocity_conversions() {
        let velocity = Velocity::new(1.0, 0.0, -2.0);
        let data = VelocityData::from(&velocity);
        assert_eq!(data.linear, [1.0, 0.0, -2.0]);
        assert_eq!(Velocity::from(&data), velocity);
    }

    #[test]
    fn test_transform_data_serialization() {
        let data = TransformData {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        };
        let bytes = rmp_serde::to_vec_named(&data).unwrap();
        let restored: TransformData = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(data, restored);
    }

    #[test]
    fn test_health_damage() {
        let mut health = Health::full(100.0);
        health.damage(60.0);
        assert_eq!(health.current, 40.0);
        health.damage(200.0);
        assert_eq!(health.current, 0.0);
    }
}
