//! Core state types for the ball pit.
//!
//! - `Ball`    one body: position, velocity, fixed radius and colour
//! - `Pit`     the body set plus the extent of the plane it lives in
//! - `Surface` bounding rect of the drawable area, in client coordinates
//! - `Palette` parsed, non-empty list of body colours
//!
//! Coordinates follow the drawing surface: origin top-left, +y down.

use bevy::color::Srgba;
use nalgebra::Vector2;
use rand::Rng;

use crate::configuration::config::parse_hex;
use crate::error::{Error, Result};
use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: NVec2, // position
    pub v: NVec2, // velocity, px per tick
    radius: f64,
    color: Srgba,
    id: usize,
}

impl Ball {
    pub fn new(id: usize, x: NVec2, v: NVec2, radius: f64, color: Srgba) -> Self {
        Self { x, v, radius, color, id }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> Srgba {
        self.color
    }

    /// Index of the ball within its body set.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pit {
    pub balls: Vec<Ball>, // draw order is index order
    pub width: f64,
    pub height: f64,
    pub ticks: u64, // ticks since the body set was created
}

impl Pit {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            balls: Vec::new(),
            width,
            height,
            ticks: 0,
        }
    }

    /// Replace the whole body set with `count` fresh random balls.
    pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, palette: &Palette, params: &Parameters, rng: &mut R) {
        let balls = (0..count)
            .map(|id| {
                let radius = uniform(rng, params.radius_min, params.radius_max);
                let x = NVec2::new(
                    spawn_coord(rng, self.width, radius),
                    spawn_coord(rng, self.height, radius),
                );
                let v = NVec2::new(
                    uniform(rng, -params.spawn_speed, params.spawn_speed),
                    uniform(rng, -params.spawn_speed, params.spawn_speed),
                );
                Ball::new(id, x, v, radius, palette.pick(rng))
            })
            .collect();

        self.balls = balls;
        self.ticks = 0;
    }

    /// True when every ball's edge lies on or inside the plane.
    pub fn contains_all(&self) -> bool {
        self.balls.iter().all(|b| {
            let r = b.radius();
            b.x.x >= r && b.x.x <= self.width - r && b.x.y >= r && b.x.y <= self.height - r
        })
    }
}

/// Uniform sample in `[lo, hi)`, or `lo` when the range is empty.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

// Centre coordinate that keeps the whole ball inside `extent`.
// Axes narrower than the diameter get the ball centred on them.
fn spawn_coord<R: Rng + ?Sized>(rng: &mut R, extent: f64, radius: f64) -> f64 {
    if extent > 2.0 * radius {
        rng.random_range(radius..extent - radius)
    } else {
        0.5 * extent
    }
}

/// Surface-local pointer position, `None` until the pointer first moves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub position: Option<NVec2>,
}

/// Bounding rect of the drawable area in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    /// A surface covering the whole viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Client coordinates to surface-local coordinates.
    #[inline]
    pub fn to_local(&self, client: NVec2) -> NVec2 {
        NVec2::new(client.x - self.left, client.y - self.top)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgba>,
}

impl Palette {
    pub fn new(colors: Vec<Srgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let colors = values
            .iter()
            .map(|v| parse_hex(v.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Srgba] {
        &self.colors
    }

    /// Uniformly random entry.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Srgba {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}
