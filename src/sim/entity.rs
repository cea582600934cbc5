//! Ship, asteroid, and bullet entities.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::kinematics;
use crate::config::AsteroidConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Next smaller tier, or `None` for the smallest.
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Smaller rocks drift faster.
    pub fn speed_factor(self) -> f32 {
        match self {
            AsteroidSize::Large => 1.0,
            AsteroidSize::Medium => 1.6,
            AsteroidSize::Small => 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians, screen coordinates (y grows downward).
    pub angle: f32,
    pub radius: f32,
    /// Ticks until the next shot is allowed.
    pub fire_cooldown: u32,
}

impl Ship {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            // Facing up.
            angle: -FRAC_PI_2,
            radius,
            fire_cooldown: 0,
        }
    }

    /// Turn by one tick's worth of rotation. `direction` is -1, 0 or +1.
    pub fn rotate(&mut self, direction: f32, turn_rate: f32, dt: f32) {
        self.angle = kinematics::normalize_angle(self.angle + direction * turn_rate * dt);
    }

    /// Accelerate along the current heading. Inertia is preserved: there is
    /// no friction, so the ship keeps drifting once thrust is released.
    pub fn apply_thrust(&mut self, accel: f32, max_speed: f32, dt: f32) {
        self.vel += kinematics::thrust_vector(self.angle, accel) * dt;
        self.vel = kinematics::clamp_speed(self.vel, max_speed);
    }

    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.pos = kinematics::advance(self.pos, self.vel, dt, bounds);
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    /// Muzzle position: the tip of the ship along its heading.
    pub fn nose(&self) -> Vec2 {
        self.pos + kinematics::heading_vector(self.angle) * self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    /// Visual spin only; the collision circle never rotates.
    pub spin_angle: f32,
    pub spin_rate: f32,
    /// Seed for the renderer's per-rock outline variation.
    pub shape_seed: u8,
}

impl Asteroid {
    pub fn spawn(
        pos: Vec2,
        size: AsteroidSize,
        config: &AsteroidConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let heading = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(config.speed_min..config.speed_max) * size.speed_factor();
        let spin_rate = if config.spin_max > 0.0 {
            rng.gen_range(-config.spin_max..config.spin_max)
        } else {
            0.0
        };
        Self {
            pos,
            vel: kinematics::heading_vector(heading) * speed,
            size,
            radius: config.radius(size),
            spin_angle: rng.gen_range(0.0..TAU),
            spin_rate,
            shape_seed: rng.gen(),
        }
    }

    /// Two fragments of the next smaller tier flying apart, or nothing for
    /// the smallest rocks.
    pub fn fragments(&self, config: &AsteroidConfig, rng: &mut impl Rng) -> Vec<Asteroid> {
        let Some(size) = self.size.split() else {
            return Vec::new();
        };
        let heading = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(config.speed_min..config.speed_max) * size.speed_factor();
        let vel = kinematics::heading_vector(heading) * speed;
        [vel, -vel]
            .into_iter()
            .map(|vel| {
                let spin_rate = if config.spin_max > 0.0 {
                    rng.gen_range(-config.spin_max..config.spin_max)
                } else {
                    0.0
                };
                Asteroid {
                    pos: self.pos,
                    vel,
                    size,
                    radius: config.radius(size),
                    spin_angle: rng.gen_range(0.0..TAU),
                    spin_rate,
                    shape_seed: rng.gen(),
                }
            })
            .collect()
    }

    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.pos = kinematics::advance(self.pos, self.vel, dt, bounds);
        self.spin_angle = kinematics::normalize_angle(self.spin_angle + self.spin_rate * dt);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining ticks before the bullet is removed.
    pub life: u32,
}

impl Bullet {
    /// Lifetime counts down once per tick regardless of `dt`, clamping at
    /// zero.
    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.pos = kinematics::advance(self.pos, self.vel, dt, bounds);
        self.life = self.life.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.life == 0
    }
}
