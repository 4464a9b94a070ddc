//! Numerical and physical parameters for the ball pit
//!
//! `Parameters` holds the per-tick constants:
//! - gravity, friction and wall bounce,
//! - pointer flow band radii and gains,
//! - click impulse range, gain, decay and burst shape,
//! - spawn ranges for radius and speed
//!
//! All distances are pixels, all velocities pixels per tick.

use crate::configuration::config::PhysicsConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub gravity: f64, // added to vy every tick
    pub friction: f64, // velocity damping factor per tick
    pub bounce: f64, // fraction of axis speed kept after hitting a wall

    pub pointer_range: f64, // pointer has no effect at or beyond this distance
    pub pointer_near: f64, // attract beyond this distance, repel at or inside it
    pub pointer_attract: f64, // far band gain
    pub pointer_repel: f64, // near band gain

    pub impulse_range: f64, // click effects reach this far
    pub impulse_gain: f64, // multiplier on effect strength
    pub impulse_decay: f64, // strength factor per tick
    pub impulse_cutoff: f64, // effects weaker than this are dropped
    pub impulse_jitter: f64, // full width of the origin scatter box
    pub impulse_burst: usize, // effects created per click
    pub strength_min: f64, // initial strength lower bound (inclusive)
    pub strength_max: f64, // initial strength upper bound (exclusive)

    pub radius_min: f64, // spawn radius lower bound (inclusive)
    pub radius_max: f64, // spawn radius upper bound (exclusive)
    pub spawn_speed: f64, // spawn velocity components lie in [-speed, speed)
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from(&PhysicsConfig::default())
    }
}

impl From<&PhysicsConfig> for Parameters {
    fn from(cfg: &PhysicsConfig) -> Self {
        Self {
            gravity: cfg.gravity,
            friction: cfg.friction,
            bounce: cfg.bounce,
            pointer_range: cfg.pointer.range,
            pointer_near: cfg.pointer.near,
            pointer_attract: cfg.pointer.attract,
            pointer_repel: cfg.pointer.repel,
            impulse_range: cfg.impulse.range,
            impulse_gain: cfg.impulse.gain,
            impulse_decay: cfg.impulse.decay,
            impulse_cutoff: cfg.impulse.cutoff,
            impulse_jitter: cfg.impulse.jitter,
            impulse_burst: cfg.impulse.burst,
            strength_min: cfg.impulse.strength_min,
            strength_max: cfg.impulse.strength_max,
            radius_min: cfg.spawn.radius_min,
            radius_max: cfg.spawn.radius_max,
            spawn_speed: cfg.spawn.speed,
        }
    }
}
