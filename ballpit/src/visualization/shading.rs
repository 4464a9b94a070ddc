//! Geometry and colour of a rendered ball, independent of the renderer.
//!
//! A ball is a triangle fan whose hub sits on the highlight point: opaque
//! body colour at the hub, half-transparent body colour on the rim, which
//! reproduces a radial gradient from an offset focus. Its drop shadow is a
//! second fan, flat in the middle and fading to nothing across the blur
//! width.
//!
//! Fans are built in world-local coordinates (+y up, centred on the ball);
//! `to_world` maps surface coordinates (+y down, origin top-left) onto the
//! 2D camera, whose origin is the window centre.

use std::f32::consts::TAU;

use bevy::color::{LinearRgba, Srgba};
use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::configuration::config::RenderConfig;
use crate::simulation::states::{Ball, NVec2};

/// Depth step between consecutive draw layers
const LAYER_STEP: f32 = 0.001;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Shading {
    pub highlight_offset: f64, // fraction of the radius, towards the top-left
    pub edge_alpha: f32,
    pub shadow_alpha: f32,
    pub shadow_blur: f64,
    pub shadow_offset: NVec2, // surface coordinates
    pub segments: usize,
    pub opacity: f32,
    pub fade_in: f32,
}

impl Default for Shading {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for Shading {
    fn from(cfg: &RenderConfig) -> Self {
        Self {
            highlight_offset: cfg.highlight_offset,
            edge_alpha: cfg.edge_alpha,
            shadow_alpha: cfg.shadow.alpha,
            shadow_blur: cfg.shadow.blur,
            shadow_offset: NVec2::new(cfg.shadow.offset[0], cfg.shadow.offset[1]),
            segments: cfg.segments.max(3),
            opacity: cfg.opacity,
            fade_in: cfg.fade_in,
        }
    }
}

/// Two-stop radial gradient, focus given relative to the ball centre in
/// surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub focus: NVec2,
    pub radius: f64,
    pub inner: Srgba,
    pub outer: Srgba,
}

/// Indexed triangle list with per-vertex linear colours
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FanMesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl Shading {
    pub fn gradient(&self, ball: &Ball) -> RadialGradient {
        let r = ball.radius();
        let color = ball.color();
        RadialGradient {
            focus: NVec2::new(-self.highlight_offset * r, -self.highlight_offset * r),
            radius: r,
            inner: color,
            outer: Srgba {
                alpha: self.edge_alpha,
                ..color
            },
        }
    }

    pub fn body_fan(&self, ball: &Ball) -> FanMesh {
        let g = self.gradient(ball);
        let n = self.segments;
        let inner = linear(g.inner);
        let outer = linear(g.outer);

        let mut fan = FanMesh::default();
        // Hub on the highlight, flipped to +y up
        fan.positions.push([g.focus.x as f32, -g.focus.y as f32, 0.0]);
        fan.colors.push(inner);

        for p in ring(g.radius as f32, n) {
            fan.positions.push([p.x, p.y, 0.0]);
            fan.colors.push(outer);
        }
        for i in 0..n as u32 {
            let next = (i + 1) % n as u32;
            fan.indices.extend_from_slice(&[0, 1 + i, 1 + next]);
        }
        fan
    }

    pub fn shadow_fan(&self, ball: &Ball) -> FanMesh {
        let n = self.segments;
        let half_blur = 0.5 * self.shadow_blur;
        let core = (ball.radius() - half_blur).max(0.0) as f32;
        let fringe = (ball.radius() + half_blur) as f32;
        let solid = [0.0, 0.0, 0.0, self.shadow_alpha];
        let clear = [0.0, 0.0, 0.0, 0.0];

        let mut fan = FanMesh::default();
        fan.positions.push([0.0, 0.0, 0.0]);
        fan.colors.push(solid);
        for p in ring(core, n) {
            fan.positions.push([p.x, p.y, 0.0]);
            fan.colors.push(solid);
        }
        for p in ring(fringe, n) {
            fan.positions.push([p.x, p.y, 0.0]);
            fan.colors.push(clear);
        }

        let n = n as u32;
        for i in 0..n {
            let next = (i + 1) % n;
            let (ci, cn) = (1 + i, 1 + next);
            let (fi, fnext) = (1 + n + i, 1 + n + next);
            fan.indices.extend_from_slice(&[0, ci, cn]);
            fan.indices.extend_from_slice(&[ci, fi, fnext, ci, fnext, cn]);
        }
        fan
    }

    /// Shadow displacement in world units (+y up)
    pub fn shadow_offset_world(&self) -> Vec2 {
        Vec2::new(self.shadow_offset.x as f32, -self.shadow_offset.y as f32)
    }

    /// Layer opacity `elapsed` seconds after the pit started running
    pub fn opacity_at(&self, elapsed: f32) -> f32 {
        if self.fade_in <= 0.0 {
            return self.opacity;
        }
        self.opacity * (elapsed / self.fade_in).clamp(0.0, 1.0)
    }
}

/// Surface position to world position for a camera centred on the surface
pub fn to_world(p: NVec2, width: f64, height: f64) -> Vec2 {
    Vec2::new((p.x - 0.5 * width) as f32, (0.5 * height - p.y) as f32)
}

/// Depths of the shadow and body of the ball drawn `index`-th. Each ball's
/// shadow covers everything drawn before it.
pub fn layer_z(index: usize) -> (f32, f32) {
    let base = 2.0 * index as f32 * LAYER_STEP;
    (base, base + LAYER_STEP)
}

fn linear(c: Srgba) -> [f32; 4] {
    let l = LinearRgba::from(c);
    [l.red, l.green, l.blue, l.alpha]
}

fn ring(radius: f32, segments: usize) -> impl Iterator<Item = Vec2> {
    (0..segments).map(move |i| {
        let a = TAU * i as f32 / segments as f32;
        Vec2::new(radius * a.cos(), radius * a.sin())
    })
}
