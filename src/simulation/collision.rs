// simulation/collision.rs
// Contains collision detection and resolution functions

use crate::body::Body;
use crate::profile_scope;
use ultraviolet::Vec2;

/// Run `iterations` all-pairs passes over `bodies`, resolving every
/// overlapping pair it meets. Returns the number of contacts resolved.
///
/// Pairs are visited in index order and each resolution sees the effect of
/// the ones before it. Overlap left after the last pass is accepted.
pub fn resolve_all(bodies: &mut [Body], iterations: usize) -> usize {
    profile_scope!("collisions");
    let n = bodies.len();
    let mut contacts = 0;
    for _ in 0..iterations {
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = bodies.split_at_mut(j);
                if resolve(&mut head[i], &mut tail[0]) {
                    contacts += 1;
                }
            }
        }
    }
    contacts
}

/// Separate an overlapping pair and, if they approach, exchange an elastic
/// impulse along the contact normal. Returns false when the pair is not in contact.
pub fn resolve(b1: &mut Body, b2: &mut Body) -> bool {
    let d = b2.pos - b1.pos;
    let distance = d.mag();
    let r = b1.radius + b2.radius;
    // NaN separations never count as contact.
    if !(distance < r) {
        return false;
    }

    // Coincident centres have no direction; push them apart along +x.
    let normal = if distance > 0.0 { d / distance } else { Vec2::unit_x() };
    let relative_speed = (b2.vel - b1.vel).dot(normal);

    let m1 = b1.mass;
    let m2 = b2.mass;
    let total = m1 + m2;
    let overlap = r - distance;
    b1.pos -= normal * (overlap * (m2 / total));
    b2.pos += normal * (overlap * (m1 / total));

    // Already separating: leave velocities alone.
    if relative_speed < 0.0 {
        let impulse = 2.0 * relative_speed / total;
        b1.vel += normal * (impulse * m2);
        b2.vel -= normal * (impulse * m1);
    }
    true
}
