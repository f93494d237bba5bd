//! # scene_demo
//!
//! Bootstraps a [`SceneSerialization`] registry, saves a handful of example
//! entities and restores them into a fresh scene.
//!
//! ## Sequence
//!
//! 1. Register every persisted component pair (see [`components::bootstrap`]).
//! 2. Spawn entities in a source scene, some with unregistered components.
//! 3. Snapshot each entity and materialize it into a target scene.
//! 4. Merge and overwrite saved data onto existing entities.

mod components;
mod config;

use anyhow::{Result, ensure};
use clap::Parser;
use glam::{Quat, Vec3};
use scene_core::{SceneEntity, SceneRegistry, TypeInfo};
use scene_serialization::{SceneSerialization, SerializableEntity};
use tracing::info;
use tracing_subscriber::EnvFilter;

use components::{Health, Name, Selected, Transform3D, Velocity};
use config::{Args, DemoConfig};

fn main() -> Result<()> {
    let config = DemoConfig::from(Args::parse());

    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_directive.parse()?))
        .init();

    info!(entities = config.entity_count, "scene demo starting");

    let mut serialization = SceneSerialization::new();
    components::bootstrap(&mut serialization);
    info!(bindings = serialization.binding_count(), "registry populated");

    let mut source = SceneRegistry::new();
    let spawned = spawn_entities(&mut source, config.entity_count)?;

    let mut saved = Vec::with_capacity(spawned.len());
    for &entity in &spawned {
        let snapshot = serialization.snapshot_entity(entity, &source)?;
        let attached = source.component_count(entity)?;
        info!(%entity, attached, persisted = snapshot.len(), "saved entity");
        saved.push(snapshot);
    }

    let mut target = SceneRegistry::new();
    for (&original, snapshot) in spawned.iter().zip(&saved) {
        let restored = serialization.materialize_entity(Some(snapshot), &mut target)?;
        verify_restored(&source, original, &target, restored)?;
        info!(%original, %restored, "restored entity");
    }

    merge_and_overwrite(&serialization, &mut target, &saved)?;

    info!(restored = target.entity_count(), "scene demo finished");
    Ok(())
}

fn spawn_entities(scene: &mut SceneRegistry, count: usize) -> Result<Vec<SceneEntity>> {
    let mut spawned = Vec::with_capacity(count);
    for i in 0..count {
        let entity = scene.create_entity();
        let offset = i as f32;
        scene.emplace_or_replace_component(entity, Name::new(format!("unit-{i}")))?;
        scene.emplace_or_replace_component(
            entity,
            Transform3D::from_position(Vec3::new(offset, 0.0, -offset))
                .rotated(Quat::from_rotation_y(offset * 0.25)),
        )?;
        if i % 2 == 0 {
            scene.emplace_or_replace_component(entity, Velocity::new(0.0, 1.0, 0.0))?;
        }
        if i % 3 == 0 {
            scene.emplace_or_replace_component(entity, Selected)?;
        }
        let health = scene.emplace_or_replace_component(entity, Health::full(100.0))?;
        health.damage(offset * 10.0);
        spawned.push(entity);
    }
    Ok(spawned)
}

fn verify_restored(
    source: &SceneRegistry,
    original: SceneEntity,
    target: &SceneRegistry,
    restored: SceneEntity,
) -> Result<()> {
    ensure!(
        source.get_component::<Name>(original)? == target.get_component::<Name>(restored)?,
        "name differs after restore"
    );
    ensure!(
        source.get_component::<Transform3D>(original)?
            == target.get_component::<Transform3D>(restored)?,
        "transform differs after restore"
    );
    ensure!(
        source.get_component::<Health>(original)? == target.get_component::<Health>(restored)?,
        "health differs after restore"
    );
    ensure!(
        source.has_component::<Velocity>(original) == target.has_component::<Velocity>(restored),
        "velocity presence differs after restore"
    );
    ensure!(
        !target.has_component::<Selected>(restored),
        "unregistered marker was restored"
    );
    Ok(())
}

fn merge_and_overwrite(
    serialization: &SceneSerialization,
    scene: &mut SceneRegistry,
    saved: &[SerializableEntity],
) -> Result<()> {
    let Some(first) = saved.first() else {
        return Ok(());
    };

    // Merging keeps whatever the entity already has.
    let entity = scene.create_entity();
    scene.emplace_or_replace_component(entity, Name::new("prefab override"))?;
    serialization.merge_into_entity(Some(first), entity, scene)?;
    ensure!(
        scene.get_component::<Name>(entity)?.value == "prefab override",
        "merge overwrote an existing component"
    );
    let components = scene.component_count(entity)?;
    info!(%entity, components, "merged saved data");

    // Overwriting writes straight into component storage.
    let health_type = TypeInfo::of::<Health>();
    let patched = Health {
        current: 55.0,
        max: 120.0,
    };
    if let Some(storage) = scene.get_erased_mut(entity, health_type) {
        serialization.overwrite_component(&patched, health_type, storage);
    }
    ensure!(
        scene.get_component::<Health>(entity)? == &patched,
        "overwrite did not reach component storage"
    );
    info!(%entity, "overwrote health from surrogate");
    Ok(())
}
