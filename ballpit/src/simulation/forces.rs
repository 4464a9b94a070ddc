//! Velocity contributors for the ball pit
//!
//! Each tick a ball's velocity passes through an ordered list of terms:
//! gravity, friction, pointer flow and click impulses. Unlike summed
//! accelerations, the order matters: friction damps the gravity kick of the
//! same tick, and the pointer and impulse pushes land undamped.

use crate::simulation::effects::ImpulseEffect;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Ball, NVec2};

/// Read-only interaction state seen by every term during one tick
pub struct TickContext<'a> {
    pub pointer: Option<NVec2>,
    pub effects: &'a [ImpulseEffect],
}

/// Trait for per-ball velocity updates
/// Implementations modify `ball.v` in place
pub trait VelocityTerm {
    fn apply(&self, ctx: &TickContext<'_>, ball: &mut Ball);
}

/// Ordered collection of velocity terms
/// Terms run in the order they were added
pub struct TermSet {
    terms: Vec<Box<dyn VelocityTerm + Send + Sync>>,
}

impl TermSet {
    /// Create an empty term set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: VelocityTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Gravity, friction, pointer flow and impulses, wired from `params`
    pub fn standard(params: &Parameters) -> Self {
        Self::new()
            .with(Gravity { g: params.gravity })
            .with(Friction { factor: params.friction })
            .with(PointerFlow {
                range: params.pointer_range,
                near: params.pointer_near,
                attract: params.pointer_attract,
                repel: params.pointer_repel,
            })
            .with(ImpulseField {
                range: params.impulse_range,
                gain: params.impulse_gain,
            })
    }

    /// Run every term on `ball`
    pub fn apply(&self, ctx: &TickContext<'_>, ball: &mut Ball) {
        for term in &self.terms {
            term.apply(ctx, ball);
        }
    }
}

impl Default for TermSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Constant downward pull (+y is down)
pub struct Gravity {
    pub g: f64,
}

impl VelocityTerm for Gravity {
    fn apply(&self, _ctx: &TickContext<'_>, ball: &mut Ball) {
        ball.v.y += self.g;
    }
}

/// Exponential damping of both components
pub struct Friction {
    pub factor: f64,
}

impl VelocityTerm for Friction {
    fn apply(&self, _ctx: &TickContext<'_>, ball: &mut Ball) {
        ball.v *= self.factor;
    }
}

/// Pointer attraction in the far band, repulsion in the near band
///
/// Inside `range` the push scales linearly from 0 at the edge to 1 at the
/// pointer. The sign flips abruptly at `near`; there is no smoothing.
pub struct PointerFlow {
    pub range: f64,
    pub near: f64,
    pub attract: f64,
    pub repel: f64,
}

impl VelocityTerm for PointerFlow {
    fn apply(&self, ctx: &TickContext<'_>, ball: &mut Ball) {
        let Some(pointer) = ctx.pointer else {
            return;
        };

        // d points from the ball to the pointer
        let d = pointer - ball.x;
        let dist = d.norm();
        if dist == 0.0 || dist >= self.range {
            return;
        }

        let force = (self.range - dist) / self.range;
        let dir = d / dist;
        if dist > self.near {
            ball.v += dir * force * self.attract;
        } else {
            ball.v -= dir * force * self.repel;
        }
    }
}

/// Repulsion away from every active click impulse
pub struct ImpulseField {
    pub range: f64,
    pub gain: f64,
}

impl VelocityTerm for ImpulseField {
    fn apply(&self, ctx: &TickContext<'_>, ball: &mut Ball) {
        for effect in ctx.effects {
            let d = effect.origin - ball.x;
            let dist = d.norm();
            if dist == 0.0 || dist >= self.range {
                continue;
            }

            let push = (self.range - dist) / self.range * effect.strength * self.gain;
            ball.v -= (d / dist) * push;
        }
    }
}
