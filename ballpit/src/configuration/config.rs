//! Configuration types for loading ball pit scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SimulationConfig`] – top-level wrapper: body count, palette, seed
//! - [`PhysicsConfig`]    – per-tick constants, with [`PointerConfig`], [`ImpulseConfig`] and [`SpawnConfig`]
//! - [`WindowConfig`]     – initial size and title of the viewer window
//! - [`RenderConfig`]     – shading, shadow and fade-in settings
//!
//! Every section falls back to its `Default` when omitted, so an empty file
//! is a valid scenario with 50 bodies and the five-colour palette.
//!
//! # YAML format
//!
//! ```yaml
//! count: 50
//! colors: ["#10b981", "#3b82f6", "#8b5cf6", "#f59e0b", "#ef4444"]
//! seed: 7                   # optional, omit for a fresh layout every run
//!
//! physics:
//!   gravity: 0.1            # px / tick^2
//!   friction: 0.99          # velocity factor per tick
//!   bounce: 0.8             # axis speed kept after a wall hit
//!   pointer:
//!     range: 150.0
//!     near: 50.0
//!     attract: 0.3
//!     repel: 0.8
//!   impulse:
//!     range: 200.0
//!     gain: 2.0
//!     decay: 0.95
//!     cutoff: 0.1
//!     jitter: 50.0
//!     burst: 3
//!     strength_min: 15.0
//!     strength_max: 25.0
//!   spawn:
//!     radius_min: 10.0
//!     radius_max: 30.0
//!     speed: 1.0
//!
//! window:
//!   title: "ballpit"
//!   width: 1280.0
//!   height: 720.0
//!
//! render:
//!   background: "#ffffff"
//!   opacity: 1.0
//!   fade_in: 2.0
//! ```
//!
//! The scenario builder maps this into [`Parameters`](crate::simulation::params::Parameters)
//! and a parsed [`Palette`](crate::simulation::states::Palette).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bevy::color::Srgba;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::simulation::states::Palette;

pub const DEFAULT_COLORS: [&str; 5] = ["#10b981", "#3b82f6", "#8b5cf6", "#f59e0b", "#ef4444"];

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub count: usize, // number of bodies in the pit
    pub colors: Vec<String>, // palette as hex strings, must not be empty
    pub seed: Option<u64>, // RNG seed; None draws one from the OS
    pub physics: PhysicsConfig,
    pub window: WindowConfig,
    pub render: RenderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: 50,
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            seed: None,
            physics: PhysicsConfig::default(),
            window: WindowConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Per-tick physical constants
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub friction: f64,
    pub bounce: f64,
    pub pointer: PointerConfig,
    pub impulse: ImpulseConfig,
    pub spawn: SpawnConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            friction: 0.99,
            bounce: 0.8,
            pointer: PointerConfig::default(),
            impulse: ImpulseConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

/// Pointer flow: attract in the far band, repel in the near band
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    pub range: f64,
    pub near: f64,
    pub attract: f64,
    pub repel: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            range: 150.0,
            near: 50.0,
            attract: 0.3,
            repel: 0.8,
        }
    }
}

/// Click impulses
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImpulseConfig {
    pub range: f64,
    pub gain: f64,
    pub decay: f64,
    pub cutoff: f64,
    pub jitter: f64,
    pub burst: usize,
    pub strength_min: f64,
    pub strength_max: f64,
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        Self {
            range: 200.0,
            gain: 2.0,
            decay: 0.95,
            cutoff: 0.1,
            jitter: 50.0,
            burst: 3,
            strength_min: 15.0,
            strength_max: 25.0,
        }
    }
}

/// Ranges used when the body set is (re)created
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub radius_min: f64,
    pub radius_max: f64,
    pub speed: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            radius_min: 10.0,
            radius_max: 30.0,
            speed: 1.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ballpit".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Shading of the rendered bodies
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub background: String, // clear colour of the surface
    pub highlight_offset: f64, // gradient focus offset, as a fraction of the radius
    pub edge_alpha: f32, // body colour alpha at the rim
    pub shadow: ShadowConfig,
    pub segments: usize, // rim vertices per circle
    pub opacity: f32, // opacity of the whole layer once faded in
    pub fade_in: f32, // seconds to reach `opacity`
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            highlight_offset: 0.3,
            edge_alpha: 128.0 / 255.0,
            shadow: ShadowConfig::default(),
            segments: 48,
            opacity: 1.0,
            fade_in: 2.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ShadowConfig {
    pub alpha: f32,
    pub blur: f64,
    pub offset: [f64; 2], // surface coordinates, +y is down
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            blur: 10.0,
            offset: [3.0, 3.0],
        }
    }
}

fn check(ok: bool, what: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidParam(what.to_string()))
    }
}

impl SimulationConfig {
    /// Reject settings that would make the simulation diverge or the
    /// samplers misbehave. Colours are parsed here so a bad palette fails
    /// before any window opens.
    pub fn validate(&self) -> Result<()> {
        Palette::from_hex(&self.colors)?;
        parse_hex(&self.render.background)?;

        let p = &self.physics;
        check(p.gravity.is_finite(), "gravity must be finite")?;
        check(p.friction > 0.0 && p.friction <= 1.0, "friction must be in (0, 1]")?;
        check((0.0..=1.0).contains(&p.bounce), "bounce must be in [0, 1]")?;

        let ptr = &p.pointer;
        check(ptr.range.is_finite() && ptr.range > 0.0, "pointer.range must be > 0")?;
        check((0.0..=ptr.range).contains(&ptr.near), "pointer.near must be in [0, pointer.range]")?;
        check(ptr.attract.is_finite() && ptr.repel.is_finite(), "pointer gains must be finite")?;

        let imp = &p.impulse;
        check(imp.range.is_finite() && imp.range > 0.0, "impulse.range must be > 0")?;
        check(imp.gain.is_finite(), "impulse.gain must be finite")?;
        check(imp.decay > 0.0 && imp.decay < 1.0, "impulse.decay must be in (0, 1)")?;
        check(imp.cutoff > 0.0, "impulse.cutoff must be > 0")?;
        check(imp.jitter.is_finite() && imp.jitter >= 0.0, "impulse.jitter must be >= 0")?;
        check(
            imp.strength_min.is_finite() && imp.strength_min <= imp.strength_max && imp.strength_max.is_finite(),
            "impulse strength range must be finite with strength_min <= strength_max",
        )?;

        let s = &p.spawn;
        check(
            s.radius_min > 0.0 && s.radius_min <= s.radius_max && s.radius_max.is_finite(),
            "spawn radius range must satisfy 0 < radius_min <= radius_max",
        )?;
        check(s.speed.is_finite() && s.speed >= 0.0, "spawn.speed must be >= 0")?;

        check(self.window.width > 0.0 && self.window.height > 0.0, "window size must be positive")?;

        let r = &self.render;
        check(r.highlight_offset.is_finite(), "render.highlight_offset must be finite")?;
        check((0.0..=1.0).contains(&r.edge_alpha), "render.edge_alpha must be in [0, 1]")?;
        check((0.0..=1.0).contains(&r.shadow.alpha), "render.shadow.alpha must be in [0, 1]")?;
        check(r.shadow.blur.is_finite() && r.shadow.blur >= 0.0, "render.shadow.blur must be >= 0")?;
        check(r.segments >= 3, "render.segments must be at least 3")?;
        check((0.0..=1.0).contains(&r.opacity), "render.opacity must be in [0, 1]")?;
        check(r.fade_in.is_finite() && r.fade_in >= 0.0, "render.fade_in must be >= 0")?;

        Ok(())
    }
}

/// Parse one `#rgb` / `#rrggbb` / `#rrggbbaa` string.
pub fn parse_hex(value: &str) -> Result<Srgba> {
    Srgba::hex(value).map_err(|source| Error::InvalidColor {
        value: value.to_string(),
        source,
    })
}

/// Read and validate a scenario file.
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let cfg: SimulationConfig = serde_yaml::from_reader(reader)?;
    cfg.validate()?;
    Ok(cfg)
}
