//! Build and drive a fully-initialized ball pit from configuration
//!
//! Takes a `SimulationConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario`, which owns everything a tick touches:
//! - numerical parameters (`Parameters`) and velocity terms (`TermSet`)
//! - the body set (`Pit`) and its palette
//! - pointer state and active click impulses
//! - the attached drawing surface and the RNG
//!
//! The scenario is inserted into Bevy as a `Resource`. Event systems and
//! the physics step all borrow it mutably, one at a time.

use bevy::log::{debug, info};
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{rng, Rng, SeedableRng};

use crate::configuration::config::SimulationConfig;
use crate::error::Result;
use crate::simulation::collisions::resolve_collisions;
use crate::simulation::effects::Effects;
use crate::simulation::forces::{TermSet, TickContext};
use crate::simulation::integrator::{contain, euler_step};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Palette, Pit, Pointer, Surface};

/// Bevy resource representing a ball pit and its interaction state
///
/// While no surface is attached the scenario is inactive: the body set is
/// empty and `step` does nothing.
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub terms: TermSet,
    pub palette: Palette,
    pub count: usize,
    pub pit: Pit,
    pub pointer: Pointer,
    pub effects: Effects,
    surface: Option<Surface>,
    generation: u64,
    rng: StdRng,
}

impl Scenario {
    pub fn build_scenario(cfg: &SimulationConfig) -> Result<Self> {
        cfg.validate()?;

        let palette = Palette::from_hex(&cfg.colors)?;
        let parameters = Parameters::from(&cfg.physics);
        let terms = TermSet::standard(&parameters);

        // Same seed, same layouts
        let rng: StdRng = match cfg.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        Ok(Self {
            parameters,
            terms,
            palette,
            count: cfg.count,
            pit: Pit::default(),
            pointer: Pointer::default(),
            effects: Effects::new(),
            surface: None,
            generation: 0,
            rng,
        })
    }

    pub fn is_running(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    /// Bumped every time the body set is recreated.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Attach a drawing surface and create the body set on it.
    pub fn attach(&mut self, surface: Surface) {
        info!(
            "ballpit: attached {}x{} surface, {} bodies",
            surface.width, surface.height, self.count
        );
        self.surface = Some(surface);
        self.pointer = Pointer::default();
        self.effects.clear();
        self.reset_bodies(surface.width, surface.height);
    }

    /// Drop the surface and everything that lived on it. Idempotent.
    pub fn detach(&mut self) {
        if self.surface.take().is_some() {
            info!("ballpit: detached surface");
        }
        self.pit = Pit::default();
        self.pointer = Pointer::default();
        self.effects.clear();
    }

    /// Advance one tick: velocities, positions, walls, collisions, then
    /// impulse decay.
    pub fn step(&mut self) {
        if self.surface.is_none() {
            return;
        }

        let ctx = TickContext {
            pointer: self.pointer.position,
            effects: self.effects.active(),
        };
        euler_step(&mut self.pit, &self.terms, &ctx, self.parameters.bounce);
        resolve_collisions(&mut self.pit.balls);
        contain(&mut self.pit);

        self.effects.decay(self.parameters.impulse_cutoff);
    }

    /// Pointer moved to `client` (viewport coordinates). Last write wins.
    pub fn pointer_moved(&mut self, client: NVec2) {
        if let Some(surface) = self.surface {
            self.pointer.position = Some(surface.to_local(client));
        }
    }

    /// Click at `client` (viewport coordinates): queue an impulse burst.
    pub fn clicked(&mut self, client: NVec2) {
        let Some(surface) = self.surface else {
            return;
        };
        let at = surface.to_local(client);
        self.effects.burst(at, &self.parameters, &mut self.rng);
        debug!(
            "ballpit: click at ({:.1}, {:.1}), {} impulses active, fading out in {} ticks",
            at.x,
            at.y,
            self.effects.len(),
            self.effects.remaining_ticks(self.parameters.impulse_cutoff)
        );
    }

    /// Viewport resized: resize the surface and recreate every body.
    pub fn resized(&mut self, width: f64, height: f64) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.width = width;
        surface.height = height;
        info!("ballpit: resized to {}x{}, reinitializing bodies", width, height);
        self.reset_bodies(width, height);
    }

    fn reset_bodies(&mut self, width: f64, height: f64) {
        self.pit = Pit::new(width, height);
        self.pit
            .populate(self.count, &self.palette, &self.parameters, &mut self.rng);
        self.generation += 1;
    }
}
