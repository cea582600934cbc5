//! Session state: the screen machine, the live world, and spawn logic.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::entity::{Asteroid, AsteroidSize, Bullet, Ship};
use super::kinematics;
use crate::config::Config;

/// Side effects of one tick, for the presentation layer to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    WaveSpawned { wave: u32, count: usize },
    AsteroidDestroyed { size: AsteroidSize, points: u32 },
    GameOver { final_score: u32 },
    QuitRequested,
}

/// Everything a live run owns. Exists only while Playing or Paused, so a
/// paused screen without a ship cannot be represented.
#[derive(Debug, Clone)]
pub struct World {
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub wave: u32,
    pub ticks: u64,
    pub(super) rng: StdRng,
}

impl World {
    pub(super) fn new(config: &Config, seed: u64) -> Self {
        let bounds = config.world.bounds();
        let mut world = Self {
            ship: Ship::new(bounds / 2.0, config.ship.radius),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            wave: 1,
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        world.spawn_wave(config);
        world
    }

    /// Spawn the current wave's asteroids. Returns how many were spawned.
    pub(super) fn spawn_wave(&mut self, config: &Config) -> usize {
        let count = config.wave.count_for(self.wave);
        for _ in 0..count {
            let pos = self.clear_spawn_pos(config);
            let rock = Asteroid::spawn(pos, AsteroidSize::Large, &config.asteroid, &mut self.rng);
            self.asteroids.push(rock);
        }
        count
    }

    /// A spawn position outside the safe radius around the ship. Bounded
    /// tries, then the point diametrically opposite the ship on the torus.
    fn clear_spawn_pos(&mut self, config: &Config) -> Vec2 {
        let bounds = config.world.bounds();
        for _ in 0..32 {
            let pos = Vec2::new(
                self.rng.gen_range(0.0..bounds.x),
                self.rng.gen_range(0.0..bounds.y),
            );
            if pos.distance(self.ship.pos) >= config.wave.safe_radius {
                return pos;
            }
        }
        kinematics::wrap(self.ship.pos + bounds / 2.0, bounds)
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Start,
    Playing(World),
    Paused(World),
    GameOver { final_score: u32, wave: u32 },
}

pub struct GameSession {
    pub screen: Screen,
    /// Best score of this process run. Nothing is persisted to disk.
    pub high_score: u32,
    pub(super) config: Config,
    pub(super) rng: StdRng,
}

impl GameSession {
    pub fn new(config: Config) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Deterministic constructor: the same seed and input sequence
    /// reproduce the same run.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self {
            screen: Screen::Start,
            high_score: 0,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seed for the next run's world, drawn from the session stream.
    pub(super) fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}
