use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::WindowResolution;

use crate::configuration::config::{parse_hex, RenderConfig, WindowConfig};
use crate::error::Result;
use crate::simulation::engine::{EngineState, SimulationPlugin, SimulationSet};
use crate::simulation::scenario::Scenario;
use crate::visualization::shading::{layer_z, to_world, FanMesh, Shading};

#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Component)]
struct ShadowIndex(pub usize);

/// Shared material and bookkeeping for the spawned ball entities
#[derive(Resource, Default)]
struct Layer {
    material: Option<Handle<ColorMaterial>>, // white, alpha carries the fade
    spawned: Option<u64>, // scenario generation the entities were built for
    elapsed: f32,
    applied_opacity: Option<f32>,
}

/// Draws the `Scenario` body set: one shadow and one shaded disc per ball.
pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Shading>()
            .init_resource::<Layer>()
            .add_systems(Startup, setup_camera_system)
            .add_systems(
                Update,
                (respawn_visuals_system, sync_transforms_system, fade_in_system)
                    .chain()
                    .after(SimulationSet::Step)
                    .run_if(in_state(EngineState::Running)),
            )
            .add_systems(OnExit(EngineState::Running), despawn_visuals_system);
    }
}

pub fn run_2d(scenario: Scenario, window: &WindowConfig, render: &RenderConfig) -> Result<()> {
    let background = parse_hex(&render.background)?;

    App::new()
        .insert_resource(ClearColor(Color::from(background)))
        .insert_resource(scenario)
        .insert_resource(Shading::from(render))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: WindowResolution::new(window.width, window.height),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins((SimulationPlugin, ViewerPlugin))
        .run();

    Ok(())
}

fn setup_camera_system(mut commands: Commands, scenario: Res<Scenario>) {
    info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.count);
    commands.spawn(Camera2dBundle::default());
}

fn fan_to_mesh(fan: FanMesh) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, fan.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, fan.colors)
        .with_inserted_indices(Indices::U32(fan.indices))
}

// Rebuild every ball entity when the scenario recreated its body set
fn respawn_visuals_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    shading: Res<Shading>,
    mut layer: ResMut<Layer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    existing: Query<Entity, Or<(With<BodyIndex>, With<ShadowIndex>)>>,
) {
    if layer.spawned == Some(scenario.generation()) {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let material = layer
        .material
        .get_or_insert_with(|| materials.add(ColorMaterial::from(Color::WHITE)))
        .clone();

    let (w, h) = (scenario.pit.width, scenario.pit.height);
    let shadow_offset = shading.shadow_offset_world();

    for (i, ball) in scenario.pit.balls.iter().enumerate() {
        let (z_shadow, z_body) = layer_z(i);
        let center = to_world(ball.x, w, h);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(fan_to_mesh(shading.shadow_fan(ball)))),
                material: material.clone(),
                transform: Transform::from_translation((center + shadow_offset).extend(z_shadow)),
                ..Default::default()
            },
            ShadowIndex(i),
        ));
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(fan_to_mesh(shading.body_fan(ball)))),
                material: material.clone(),
                transform: Transform::from_translation(center.extend(z_body)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }

    debug!(
        "viewer: spawned {} balls for generation {}",
        scenario.pit.balls.len(),
        scenario.generation()
    );
    layer.spawned = Some(scenario.generation());
}

fn sync_transforms_system(
    scenario: Res<Scenario>,
    shading: Res<Shading>,
    mut bodies: Query<(&BodyIndex, &mut Transform), Without<ShadowIndex>>,
    mut shadows: Query<(&ShadowIndex, &mut Transform), Without<BodyIndex>>,
) {
    let (w, h) = (scenario.pit.width, scenario.pit.height);
    let shadow_offset = shading.shadow_offset_world();

    for (BodyIndex(i), mut transform) in &mut bodies {
        if let Some(b) = scenario.pit.balls.get(*i) {
            let p = to_world(b.x, w, h);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
    for (ShadowIndex(i), mut transform) in &mut shadows {
        if let Some(b) = scenario.pit.balls.get(*i) {
            let p = to_world(b.x, w, h) + shadow_offset;
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
}

fn fade_in_system(
    time: Res<Time>,
    shading: Res<Shading>,
    mut layer: ResMut<Layer>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    layer.elapsed += time.delta_seconds();
    let opacity = shading.opacity_at(layer.elapsed);
    if layer.applied_opacity == Some(opacity) {
        return;
    }

    let Some(handle) = layer.material.clone() else {
        return;
    };
    if let Some(material) = materials.get_mut(&handle) {
        material.color = Color::srgba(1.0, 1.0, 1.0, opacity);
        layer.applied_opacity = Some(opacity);
    }
}

fn despawn_visuals_system(
    mut commands: Commands,
    mut layer: ResMut<Layer>,
    existing: Query<Entity, Or<(With<BodyIndex>, With<ShadowIndex>)>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    let material = layer.material.take();
    *layer = Layer {
        material,
        ..Default::default()
    };
}
