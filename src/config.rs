use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::sim::entity::AsteroidSize;

pub const CONFIG_FILE_NAME: &str = "asteroids.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// All game tuning in one place. Every field has a sensible default, so a
/// config file only needs the values it wants to override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub world: WorldConfig,
    pub ship: ShipConfig,
    pub bullet: BulletConfig,
    pub asteroid: AsteroidConfig,
    pub wave: WaveConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Milliseconds between simulation ticks (16 is roughly 60 FPS).
    pub tick_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { tick_ms: 16 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl WorldConfig {
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Thrust acceleration in world units per second squared.
    pub accel: f32,
    /// Speed cap under continuous thrust.
    pub max_speed: f32,
    /// Turn rate in radians per second.
    pub turn_rate: f32,
    pub radius: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            accel: 540.0,
            max_speed: 360.0,
            turn_rate: std::f32::consts::PI,
            radius: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub radius: f32,
    /// Ticks a bullet lives before it is removed.
    pub lifetime_ticks: u32,
    /// Ticks between shots.
    pub cooldown_ticks: u32,
    /// Hard cap on bullets in flight at once.
    pub max_live: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 600.0,
            radius: 6.0,
            lifetime_ticks: 120,
            cooldown_ticks: 15,
            max_live: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub large_radius: f32,
    pub medium_radius: f32,
    pub small_radius: f32,
    /// Speed range for large asteroids; smaller tiers scale this up.
    pub speed_min: f32,
    pub speed_max: f32,
    /// Visual spin cap in radians per second.
    pub spin_max: f32,
    pub large_points: u32,
    pub medium_points: u32,
    pub small_points: u32,
}

impl AsteroidConfig {
    pub fn radius(&self, size: AsteroidSize) -> f32 {
        match size {
            AsteroidSize::Large => self.large_radius,
            AsteroidSize::Medium => self.medium_radius,
            AsteroidSize::Small => self.small_radius,
        }
    }

    pub fn points(&self, size: AsteroidSize) -> u32 {
        match size {
            AsteroidSize::Large => self.large_points,
            AsteroidSize::Medium => self.medium_points,
            AsteroidSize::Small => self.small_points,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            large_radius: 50.0,
            medium_radius: 30.0,
            small_radius: 18.0,
            speed_min: 15.0,
            speed_max: 45.0,
            spin_max: 1.5,
            large_points: 20,
            medium_points: 50,
            small_points: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Asteroids in the first wave.
    pub initial_count: u32,
    /// Cap on asteroids per wave as the wave number climbs.
    pub max_count: u32,
    /// Minimum spawn distance from the ship.
    pub safe_radius: f32,
}

impl WaveConfig {
    /// Wave size grows by one per cleared wave, up to the cap.
    pub fn count_for(&self, wave: u32) -> usize {
        (self.initial_count + wave.saturating_sub(1)).min(self.max_count) as usize
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            initial_count: 4,
            max_count: 8,
            safe_radius: 200.0,
        }
    }
}

impl Config {
    /// Load `asteroids.toml` from next to the executable or the working
    /// directory. No file at all is fine; defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_file() {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(config.sanitized())
    }

    fn find_file() -> Option<PathBuf> {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let path = dir.join(CONFIG_FILE_NAME);
                if path.exists() {
                    return Some(path);
                }
            }
        }
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Clamp values that would wedge the simulation: zero-size worlds,
    /// empty random ranges, waves of nothing.
    fn sanitized(mut self) -> Self {
        self.display.tick_ms = self.display.tick_ms.max(1);
        self.world.width = self.world.width.max(100.0);
        self.world.height = self.world.height.max(100.0);
        self.asteroid.spin_max = self.asteroid.spin_max.max(0.0);
        self.asteroid.speed_min = self.asteroid.speed_min.max(0.0);
        self.asteroid.speed_max = self.asteroid.speed_max.max(self.asteroid.speed_min + 1.0);
        self.bullet.lifetime_ticks = self.bullet.lifetime_ticks.max(1);
        self.wave.initial_count = self.wave.initial_count.max(1);
        self.wave.max_count = self.wave.max_count.max(self.wave.initial_count);
        self
    }
}
