//! Click impulses
//!
//! A click spawns a small burst of `ImpulseEffect`s scattered around the
//! click point. Each one pushes nearby balls away and loses strength every
//! tick until it falls under the cutoff and is dropped.

use rand::Rng;

use crate::simulation::params::Parameters;
use crate::simulation::states::{uniform, NVec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseEffect {
    pub origin: NVec2,
    pub strength: f64,
    pub decay: f64, // strength factor applied once per tick
}

impl ImpulseEffect {
    pub fn new(origin: NVec2, strength: f64, decay: f64) -> Self {
        Self { origin, strength, decay }
    }

    /// Number of ticks until an effect of strength `strength` is dropped.
    /// `u64::MAX` if it never decays under the cutoff.
    pub fn lifetime(strength: f64, decay: f64, cutoff: f64) -> u64 {
        if strength >= cutoff && !(decay < 1.0 && cutoff > 0.0) {
            return u64::MAX;
        }
        let mut s = strength;
        let mut ticks = 0;
        while s >= cutoff {
            s *= decay;
            ticks += 1;
        }
        ticks
    }
}

/// Active impulse effects, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    active: Vec<ImpulseEffect>,
}

impl Effects {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    pub fn active(&self) -> &[ImpulseEffect] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn push(&mut self, effect: ImpulseEffect) {
        self.active.push(effect);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Ticks until the strongest effect is dropped, 0 when none are active.
    pub fn remaining_ticks(&self, cutoff: f64) -> u64 {
        self.active
            .iter()
            .map(|e| ImpulseEffect::lifetime(e.strength, e.decay, cutoff))
            .max()
            .unwrap_or(0)
    }

    /// Queue `impulse_burst` effects jittered around `at` (surface-local).
    pub fn burst<R: Rng + ?Sized>(&mut self, at: NVec2, params: &Parameters, rng: &mut R) {
        let half = 0.5 * params.impulse_jitter;
        for _ in 0..params.impulse_burst {
            let origin = NVec2::new(
                at.x + uniform(rng, -half, half),
                at.y + uniform(rng, -half, half),
            );
            let strength = uniform(rng, params.strength_min, params.strength_max);
            self.active.push(ImpulseEffect::new(origin, strength, params.impulse_decay));
        }
    }

    /// Decay every effect once and keep those still at or above `cutoff`.
    ///
    /// Runs after the bodies have been processed; the retained list is
    /// rebuilt from the decayed copies rather than spliced in place.
    pub fn decay(&mut self, cutoff: f64) {
        self.active = self
            .active
            .iter()
            .map(|e| ImpulseEffect {
                strength: e.strength * e.decay,
                ..*e
            })
            .filter(|e| e.strength >= cutoff)
            .collect();
    }
}
