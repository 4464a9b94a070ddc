//! Fixed-step integrator for the ball pit
//!
//! One tick is one frame: velocities go through the `TermSet`, positions
//! advance by a full semi-implicit Euler step, and walls reflect whatever
//! crossed them.

use super::forces::{TermSet, TickContext};
use super::states::{Ball, Pit};

/// Advance every ball by one tick, walls included, collisions excluded
pub fn euler_step(pit: &mut Pit, terms: &TermSet, ctx: &TickContext<'_>, bounce: f64) {
    let (width, height) = (pit.width, pit.height);

    for b in pit.balls.iter_mut() {
        // v_n+1 = terms(v_n)
        terms.apply(ctx, b);

        // x_n+1 = x_n + v_n+1
        b.x += b.v;

        reflect_walls(b, width, height, bounce);
    }

    pit.ticks += 1;
}

/// Put a ball that crossed a wall back on it and flip that axis.
///
/// Axes are handled independently; each hit keeps `bounce` of the speed.
pub fn reflect_walls(b: &mut Ball, width: f64, height: f64, bounce: f64) {
    let r = b.radius();

    if b.x.x + r > width {
        b.x.x = width - r;
        b.v.x *= -bounce;
    }
    if b.x.x - r < 0.0 {
        b.x.x = r;
        b.v.x *= -bounce;
    }
    if b.x.y + r > height {
        b.x.y = height - r;
        b.v.y *= -bounce;
    }
    if b.x.y - r < 0.0 {
        b.x.y = r;
        b.v.y *= -bounce;
    }
}

/// Clamp centres back inside the plane without touching velocities.
///
/// Collision separation runs after the walls and can push a ball through
/// one; this restores the bounds for the next frame.
pub fn contain(pit: &mut Pit) {
    let (width, height) = (pit.width, pit.height);
    for b in pit.balls.iter_mut() {
        let r = b.radius();
        b.x.x = clamp_axis(b.x.x, r, width);
        b.x.y = clamp_axis(b.x.y, r, height);
    }
}

// Same precedence as `reflect_walls`: the low wall wins on axes narrower than
// the diameter.
fn clamp_axis(c: f64, r: f64, extent: f64) -> f64 {
    let c = if c + r > extent { extent - r } else { c };
    if c - r < 0.0 {
        r
    } else {
        c
    }
}
