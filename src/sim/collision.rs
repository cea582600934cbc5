//! Circle-circle collision detection between entity categories.
//!
//! Detection is a pure scan over a snapshot of the collections; the tick
//! applies removals and splits afterwards, so nothing mutates mid-iteration.

use glam::Vec2;

use super::entity::{Asteroid, Bullet, Ship};

/// Two circles collide when their centers are closer than the sum of
/// their radii. Touching exactly does not count.
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// `(bullet index, asteroid index)` pairs. Each bullet hits at most one
    /// asteroid per tick, and each asteroid is claimed at most once.
    pub bullet_hits: Vec<(usize, usize)>,
    pub ship_hit: bool,
}

pub fn check_collisions(
    bullets: &[Bullet],
    asteroids: &[Asteroid],
    ship: &Ship,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut claimed = vec![false; asteroids.len()];

    for (bullet_idx, bullet) in bullets.iter().enumerate() {
        for (asteroid_idx, asteroid) in asteroids.iter().enumerate() {
            if claimed[asteroid_idx] {
                continue;
            }
            if circles_overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius) {
                claimed[asteroid_idx] = true;
                report.bullet_hits.push((bullet_idx, asteroid_idx));
                break;
            }
        }
    }

    report.ship_hit = asteroids
        .iter()
        .any(|asteroid| circles_overlap(ship.pos, ship.radius, asteroid.pos, asteroid.radius));

    report
}
