//! Pure position and heading math shared by every entity.
//!
//! The playfield is a torus: leaving one edge re-enters the opposite one,
//! so positions always stay within `[0, bound)` on both axes.

use glam::Vec2;

/// Advance a position by one step of linear motion and wrap it back onto
/// the playfield.
pub fn advance(pos: Vec2, vel: Vec2, dt: f32, bounds: Vec2) -> Vec2 {
    wrap(pos + vel * dt, bounds)
}

/// Wrap each axis into `[0, bound)`. Euclidean remainder keeps negative
/// coordinates on the torus instead of leaving them negative.
pub fn wrap(pos: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.x), wrap_axis(pos.y, bounds.y))
}

fn wrap_axis(x: f32, bound: f32) -> f32 {
    // rem_euclid can round up to the bound itself for tiny negative inputs.
    let wrapped = x.rem_euclid(bound);
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector for a heading angle, in screen coordinates (y grows down).
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Acceleration vector for a heading angle and thrust magnitude.
pub fn thrust_vector(angle: f32, magnitude: f32) -> Vec2 {
    heading_vector(angle) * magnitude
}

/// Cap a velocity at `max_speed`, preserving its direction.
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel * (max_speed / speed)
    } else {
        vel
    }
}

/// Normalize an angle into `[0, TAU)`.
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
