//! Pairwise ball collisions
//!
//! Direct O(N^2) sweep over unordered pairs. Fine for tens of balls; there is
//! no broad phase.

use super::states::Ball;

/// Resolve every overlapping pair `(i, j)` with `i < j`, in index order.
///
/// Returns the number of pairs that were in contact.
pub fn resolve_collisions(balls: &mut [Ball]) -> usize {
    let n = balls.len();
    let mut contacts = 0;

    for i in 0..n {
        // Split so that ball i and every ball after it can be borrowed mutably
        let (head, tail) = balls.split_at_mut(i + 1);
        let b1 = &mut head[i];

        for b2 in tail.iter_mut() {
            if resolve_pair(b1, b2) {
                contacts += 1;
            }
        }
    }

    contacts
}

/// Separate two overlapping balls and exchange their normal velocities.
///
/// Returns false (and leaves both untouched) when they do not overlap.
pub fn resolve_pair(b1: &mut Ball, b2: &mut Ball) -> bool {
    let d = b2.x - b1.x;
    let dist = d.norm();
    let reach = b1.radius() + b2.radius();
    if dist >= reach {
        return false;
    }

    // Collision normal from b1 to b2. Coincident centres give angle 0,
    // so they are pushed apart along +x.
    let angle = d.y.atan2(d.x);
    let (sin, cos) = angle.sin_cos();

    // Half the overlap each, along the normal
    let overlap = reach - dist;
    let shift = 0.5 * overlap;
    b1.x.x -= shift * cos;
    b1.x.y -= shift * sin;
    b2.x.x += shift * cos;
    b2.x.y += shift * sin;

    // Rotate into the normal frame: n along the normal, t tangential
    let n1 = b1.v.x * cos + b1.v.y * sin;
    let t1 = b1.v.y * cos - b1.v.x * sin;
    let n2 = b2.v.x * cos + b2.v.y * sin;
    let t2 = b2.v.y * cos - b2.v.x * sin;

    // Equal masses: swap normal components, keep tangential, rotate back
    b1.v.x = n2 * cos - t1 * sin;
    b1.v.y = t1 * cos + n2 * sin;
    b2.v.x = n1 * cos - t2 * sin;
    b2.v.y = t2 * cos + n1 * sin;

    true
}
