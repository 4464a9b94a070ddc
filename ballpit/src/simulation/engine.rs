//! Lifecycle and frame loop
//!
//! The engine is `Inactive` until a primary window exists, then `Running`
//! until that window goes away. The per-frame work (event listeners, then
//! the physics step) is one chained system set that only runs while
//! `Running`, so leaving the state is what cancels the loop and detaches the
//! listeners.

use bevy::input::ButtonInput;
use bevy::log::info;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Surface};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineState {
    #[default]
    Inactive, // no surface yet, or torn down
    Running, // surface attached, frame loop scheduled
}

/// Per-frame simulation work, in order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Step,
}

/// Drives a `Scenario` resource from the window and input events.
///
/// Expects `CursorMoved`, `WindowResized` and `ButtonInput<MouseButton>` to be
/// registered, which `DefaultPlugins` does.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<EngineState>()
            .configure_sets(
                Update,
                (SimulationSet::Input, SimulationSet::Step)
                    .chain()
                    .run_if(in_state(EngineState::Running)),
            )
            .add_systems(
                Update,
                activate_on_surface.run_if(in_state(EngineState::Inactive)),
            )
            .add_systems(OnEnter(EngineState::Running), attach_surface)
            .add_systems(OnExit(EngineState::Running), detach_surface)
            .add_systems(
                Update,
                (track_pointer, spawn_impulses, reinit_on_resize)
                    .chain()
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                Update,
                (teardown_on_surface_loss, physics_step)
                    .chain()
                    .in_set(SimulationSet::Step),
            );
    }
}

fn activate_on_surface(
    windows: Query<(), With<PrimaryWindow>>,
    mut next: ResMut<NextState<EngineState>>,
) {
    if !windows.is_empty() {
        next.set(EngineState::Running);
    }
}

fn attach_surface(windows: Query<&Window, With<PrimaryWindow>>, mut scenario: ResMut<Scenario>) {
    // No window, nothing to draw on
    let Ok(window) = windows.get_single() else {
        return;
    };
    info!("engine: running");
    scenario.attach(Surface::new(window.width() as f64, window.height() as f64));
}

fn detach_surface(mut scenario: ResMut<Scenario>) {
    info!("engine: inactive");
    scenario.detach();
}

fn teardown_on_surface_loss(
    windows: Query<(), With<PrimaryWindow>>,
    mut next: ResMut<NextState<EngineState>>,
) {
    if windows.is_empty() {
        next.set(EngineState::Inactive);
    }
}

fn track_pointer(mut moves: EventReader<CursorMoved>, mut scenario: ResMut<Scenario>) {
    for ev in moves.read() {
        scenario.pointer_moved(NVec2::new(ev.position.x as f64, ev.position.y as f64));
    }
}

fn spawn_impulses(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(at) = windows.get_single().ok().and_then(|w| w.cursor_position()) else {
        return;
    };
    scenario.clicked(NVec2::new(at.x as f64, at.y as f64));
}

fn reinit_on_resize(
    mut resizes: EventReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
) {
    let Ok(surface) = primary.get_single() else {
        resizes.clear();
        return;
    };
    // Only the final size of a burst of resizes matters
    if let Some(ev) = resizes.read().filter(|ev| ev.window == surface).last() {
        scenario.resized(ev.width as f64, ev.height as f64);
    }
}

fn physics_step(mut scenario: ResMut<Scenario>) {
    scenario.step();
}
