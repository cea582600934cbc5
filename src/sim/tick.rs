//! The per-frame simulation step and screen transitions.
//!
//! One `tick` call per rendered frame. All entity mutation happens inside
//! the call, and removals are deferred to the end of the step so no
//! collection is edited mid-iteration.

use std::mem;

use super::collision;
use super::entity::Bullet;
use super::kinematics;
use super::state::{GameEvent, GameSession, Screen, World};
use crate::config::Config;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    Left,
    #[default]
    None,
    Right,
}

impl Rotation {
    /// Sign of the angular step; positive turns clockwise on screen.
    pub fn sign(self) -> f32 {
        match self {
            Rotation::Left => -1.0,
            Rotation::None => 0.0,
            Rotation::Right => 1.0,
        }
    }
}

/// Input snapshot consumed by one tick. Commands that have no meaning on
/// the current screen are silently ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust: bool,
    pub rotate: Rotation,
    pub fire: bool,
    pub pause: bool,
    pub begin: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Advance the session by one step, returning the side effects of the
/// step. The quit request is signaled, not acted on; the presentation
/// loop owns process exit.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let screen = mem::replace(&mut session.screen, Screen::Start);
    session.screen = match screen {
        Screen::Start => {
            if input.begin {
                begin_run(session, &mut events)
            } else {
                Screen::Start
            }
        }
        Screen::Playing(world) if input.pause => Screen::Paused(world),
        Screen::Playing(mut world) => {
            let ship_hit = step_world(&mut world, input, dt, &session.config, &mut events);
            if ship_hit {
                session.high_score = session.high_score.max(world.score);
                events.push(GameEvent::GameOver {
                    final_score: world.score,
                });
                Screen::GameOver {
                    final_score: world.score,
                    wave: world.wave,
                }
            } else {
                Screen::Playing(world)
            }
        }
        // The world is carried over frozen; not even lifetimes advance.
        Screen::Paused(world) if input.pause => Screen::Playing(world),
        Screen::Paused(world) => Screen::Paused(world),
        Screen::GameOver { .. } if input.restart => begin_run(session, &mut events),
        screen @ Screen::GameOver { .. } => {
            if input.quit {
                events.push(GameEvent::QuitRequested);
            }
            screen
        }
    };
    events
}

fn begin_run(session: &mut GameSession, events: &mut Vec<GameEvent>) -> Screen {
    let seed = session.next_seed();
    let world = World::new(&session.config, seed);
    events.push(GameEvent::Started);
    events.push(GameEvent::WaveSpawned {
        wave: world.wave,
        count: world.asteroids.len(),
    });
    Screen::Playing(world)
}

/// One step of the live world. Returns true when the ship was hit, the
/// session's sole terminal signal.
fn step_world(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    config: &Config,
    events: &mut Vec<GameEvent>,
) -> bool {
    let bounds = config.world.bounds();
    world.ticks += 1;

    world
        .ship
        .rotate(input.rotate.sign(), config.ship.turn_rate, dt);
    if input.thrust {
        world
            .ship
            .apply_thrust(config.ship.accel, config.ship.max_speed, dt);
    }

    // Motion. Lifetime and cooldown counters run even at dt = 0.
    world.ship.advance(dt, bounds);
    for asteroid in &mut world.asteroids {
        asteroid.advance(dt, bounds);
    }
    for bullet in &mut world.bullets {
        bullet.advance(dt, bounds);
    }

    if input.fire {
        try_fire(world, config);
    }

    let report = collision::check_collisions(&world.bullets, &world.asteroids, &world.ship);

    let mut dead_bullets = vec![false; world.bullets.len()];
    let mut dead_asteroids = vec![false; world.asteroids.len()];
    let mut fragments = Vec::new();
    for &(bullet_idx, asteroid_idx) in &report.bullet_hits {
        dead_bullets[bullet_idx] = true;
        dead_asteroids[asteroid_idx] = true;

        let rock = world.asteroids[asteroid_idx].clone();
        let points = config.asteroid.points(rock.size);
        world.score += points;
        events.push(GameEvent::AsteroidDestroyed {
            size: rock.size,
            points,
        });
        fragments.extend(rock.fragments(&config.asteroid, &mut world.rng));
    }

    for (idx, bullet) in world.bullets.iter().enumerate() {
        if bullet.expired() {
            dead_bullets[idx] = true;
        }
    }

    retain_unmarked(&mut world.bullets, &dead_bullets);
    retain_unmarked(&mut world.asteroids, &dead_asteroids);
    world.asteroids.extend(fragments);

    if report.ship_hit {
        return true;
    }

    // Wave cleared: respawn in the same tick, before any further
    // collision checks can run.
    if world.asteroids.is_empty() {
        world.wave += 1;
        let count = world.spawn_wave(config);
        events.push(GameEvent::WaveSpawned {
            wave: world.wave,
            count,
        });
    }

    false
}

fn try_fire(world: &mut World, config: &Config) {
    if world.ship.fire_cooldown > 0 || world.bullets.len() >= config.bullet.max_live {
        return;
    }
    let dir = kinematics::heading_vector(world.ship.angle);
    world.bullets.push(Bullet {
        pos: world.ship.nose(),
        vel: dir * config.bullet.speed,
        radius: config.bullet.radius,
        life: config.bullet.lifetime_ticks,
    });
    world.ship.fire_cooldown = config.bullet.cooldown_ticks;
}

fn retain_unmarked<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Asteroid, AsteroidSize};
    use glam::Vec2;

    fn far_rock() -> Asteroid {
        Asteroid {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            size: AsteroidSize::Large,
            radius: 1.0,
            spin_angle: 0.0,
            spin_rate: 0.0,
            shape_seed: 0,
        }
    }

    fn still_bullet(x: f32, y: f32, life: u32) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 6.0,
            life,
        }
    }

    /// A config whose entities cannot collide, for movement-only tests.
    fn ghost_config() -> Config {
        let mut config = Config::default();
        config.ship.radius = 0.0;
        config.asteroid.large_radius = 0.0;
        config.asteroid.medium_radius = 0.0;
        config.asteroid.small_radius = 0.0;
        config.bullet.radius = 0.0;
        config
    }

    fn playing_world(config: &Config) -> World {
        let mut world = World::new(config, 1);
        // One inert far-away rock keeps the wave from respawning.
        world.asteroids = vec![far_rock()];
        world
    }

    #[test]
    fn begin_moves_start_to_playing_with_a_fresh_wave() {
        let config = Config::default();
        let mut session = GameSession::with_seed(config.clone(), 3);

        let input = TickInput {
            begin: true,
            ..Default::default()
        };
        let events = tick(&mut session, &input, 1.0 / 60.0);

        let Screen::Playing(world) = &session.screen else {
            panic!("expected Playing after begin");
        };
        assert_eq!(world.asteroids.len(), config.wave.count_for(1));
        assert_eq!(world.score, 0);
        assert!(events.contains(&GameEvent::Started));
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::WaveSpawned { wave: 1, .. })));
    }

    #[test]
    fn commands_without_meaning_on_start_are_ignored() {
        let mut session = GameSession::with_seed(Config::default(), 3);
        let input = TickInput {
            fire: true,
            restart: true,
            pause: true,
            quit: true,
            ..Default::default()
        };
        let events = tick(&mut session, &input, 1.0 / 60.0);
        assert!(matches!(session.screen, Screen::Start));
        assert!(events.is_empty());
    }

    #[test]
    fn pause_freezes_the_world_in_place() {
        let config = Config::default();
        let mut session = GameSession::with_seed(config.clone(), 3);
        let mut world = playing_world(&config);
        world.bullets.push(still_bullet(700.0, 500.0, 10));
        session.screen = Screen::Playing(world);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut session, &pause, 1.0 / 60.0);
        assert!(matches!(session.screen, Screen::Paused(_)));

        // Ticks while paused change nothing, lifetimes included.
        let busy = TickInput {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut session, &busy, 1.0 / 60.0);
        }
        let Screen::Paused(world) = &session.screen else {
            panic!("expected Paused");
        };
        assert_eq!(world.ticks, 0);
        assert_eq!(world.bullets[0].life, 10);

        tick(&mut session, &pause, 1.0 / 60.0);
        assert!(matches!(session.screen, Screen::Playing(_)));
    }

    #[test]
    fn zero_dt_moves_nothing_but_ages_counters() {
        let config = ghost_config();
        let mut world = playing_world(&config);
        world.bullets.push(still_bullet(700.0, 500.0, 10));
        let ship_pos = world.ship.pos;
        let rock_pos = world.asteroids[0].pos;

        let mut events = Vec::new();
        let hit = step_world(
            &mut world,
            &TickInput::default(),
            0.0,
            &config,
            &mut events,
        );

        assert!(!hit);
        assert_eq!(world.ship.pos, ship_pos);
        assert_eq!(world.asteroids[0].pos, rock_pos);
        assert_eq!(world.bullets[0].life, 9);
        assert_eq!(world.ticks, 1);
    }

    #[test]
    fn ten_ticks_of_thrust_reach_the_speed_cap_law() {
        // From rest, speed after n ticks at dt = 1 is min(n * accel, cap).
        for (accel, expected) in [(30.0, 300.0), (50.0, 360.0)] {
            let mut config = ghost_config();
            config.ship.accel = accel;
            config.ship.max_speed = 360.0;
            let mut world = playing_world(&config);

            let input = TickInput {
                thrust: true,
                ..Default::default()
            };
            let mut events = Vec::new();
            for _ in 0..10 {
                step_world(&mut world, &input, 1.0, &config, &mut events);
            }
            assert!(
                (world.ship.vel.length() - expected).abs() < 1e-2,
                "accel {accel}: got speed {}",
                world.ship.vel.length()
            );
        }
    }

    #[test]
    fn asteroid_wraps_across_the_right_edge() {
        let config = ghost_config();
        let mut world = playing_world(&config);
        world.asteroids[0].pos = Vec2::new(795.0, 300.0);
        world.asteroids[0].vel = Vec2::new(10.0, 0.0);

        let mut events = Vec::new();
        step_world(
            &mut world,
            &TickInput::default(),
            1.0,
            &config,
            &mut events,
        );
        assert!((world.asteroids[0].pos.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn bullet_expires_exactly_after_its_third_tick() {
        let config = Config::default();
        let mut world = playing_world(&config);
        world.bullets.push(still_bullet(700.0, 500.0, 3));

        let mut events = Vec::new();
        for remaining in [1usize, 1, 0] {
            step_world(
                &mut world,
                &TickInput::default(),
                1.0 / 60.0,
                &config,
                &mut events,
            );
            assert_eq!(world.bullets.len(), remaining);
        }
    }

    #[test]
    fn fire_respects_the_cooldown() {
        let mut config = ghost_config();
        config.bullet.cooldown_ticks = 5;
        let mut world = playing_world(&config);

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        let mut counts = Vec::new();
        for _ in 0..6 {
            step_world(&mut world, &input, 1.0 / 60.0, &config, &mut events);
            counts.push(world.bullets.len());
        }
        // One shot on the first tick, the next only once the cooldown ran out.
        assert_eq!(counts, vec![1, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn live_bullets_are_capped() {
        let mut config = ghost_config();
        config.bullet.cooldown_ticks = 0;
        config.bullet.max_live = 3;
        let mut world = playing_world(&config);

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..5 {
            step_world(&mut world, &input, 1.0 / 60.0, &config, &mut events);
        }
        assert_eq!(world.bullets.len(), 3);
    }

    #[test]
    fn destroyed_large_rock_splits_and_scores() {
        let config = Config::default();
        let mut world = playing_world(&config);
        world.asteroids[0].radius = config.asteroid.large_radius;
        world
            .bullets
            .push(still_bullet(50.0, 50.0, 10));

        let mut events = Vec::new();
        step_world(
            &mut world,
            &TickInput::default(),
            0.0,
            &config,
            &mut events,
        );

        assert_eq!(world.score, config.asteroid.large_points);
        assert!(world.bullets.is_empty());
        // The large rock became two mediums.
        assert_eq!(world.asteroids.len(), 2);
        assert!(world
            .asteroids
            .iter()
            .all(|rock| rock.size == AsteroidSize::Medium));
        assert!(events.iter().any(|event| matches!(
            event,
            GameEvent::AsteroidDestroyed {
                size: AsteroidSize::Large,
                ..
            }
        )));
    }

    #[test]
    fn clearing_the_last_rock_spawns_the_next_wave_in_the_same_tick() {
        let config = Config::default();
        let mut world = playing_world(&config);
        world.asteroids[0] = Asteroid {
            size: AsteroidSize::Small,
            radius: config.asteroid.small_radius,
            ..far_rock()
        };
        world.bullets.push(still_bullet(50.0, 50.0, 10));

        let mut events = Vec::new();
        step_world(
            &mut world,
            &TickInput::default(),
            0.0,
            &config,
            &mut events,
        );

        assert_eq!(world.wave, 2);
        assert_eq!(world.asteroids.len(), config.wave.count_for(2));
        assert!(world
            .asteroids
            .iter()
            .all(|rock| rock.size == AsteroidSize::Large));
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::WaveSpawned { wave: 2, .. })));
    }

    #[test]
    fn ship_contact_ends_the_run() {
        let config = Config::default();
        let mut session = GameSession::with_seed(config.clone(), 3);
        let mut world = playing_world(&config);
        world.score = 70;
        world.asteroids[0].pos = world.ship.pos;
        world.asteroids[0].radius = config.asteroid.large_radius;
        session.screen = Screen::Playing(world);

        let events = tick(&mut session, &TickInput::default(), 1.0 / 60.0);

        assert!(matches!(
            session.screen,
            Screen::GameOver { final_score: 70, .. }
        ));
        assert_eq!(session.high_score, 70);
        assert!(events.contains(&GameEvent::GameOver { final_score: 70 }));
    }

    #[test]
    fn restart_starts_a_fresh_run_and_keeps_the_high_score() {
        let config = Config::default();
        let mut session = GameSession::with_seed(config.clone(), 3);
        session.high_score = 70;
        session.screen = Screen::GameOver {
            final_score: 70,
            wave: 2,
        };

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &input, 1.0 / 60.0);

        let Screen::Playing(world) = &session.screen else {
            panic!("expected Playing after restart");
        };
        assert_eq!(world.score, 0);
        assert_eq!(world.wave, 1);
        assert_eq!(world.asteroids.len(), config.wave.count_for(1));
        assert_eq!(session.high_score, 70);
    }

    #[test]
    fn quit_is_signaled_only_from_game_over() {
        let mut session = GameSession::with_seed(Config::default(), 3);
        session.screen = Screen::GameOver {
            final_score: 0,
            wave: 1,
        };

        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        let events = tick(&mut session, &input, 1.0 / 60.0);
        assert!(events.contains(&GameEvent::QuitRequested));
        assert!(matches!(session.screen, Screen::GameOver { .. }));
    }

    #[test]
    fn score_never_decreases_within_a_run() {
        let config = Config::default();
        let mut session = GameSession::with_seed(config, 11);
        tick(
            &mut session,
            &TickInput {
                begin: true,
                ..Default::default()
            },
            1.0 / 60.0,
        );

        let mut last_score = 0;
        for step in 0..600 {
            let input = TickInput {
                thrust: step % 7 == 0,
                fire: step % 3 == 0,
                rotate: if step % 5 == 0 {
                    Rotation::Left
                } else {
                    Rotation::None
                },
                ..Default::default()
            };
            tick(&mut session, &input, 1.0 / 60.0);
            match &session.screen {
                Screen::Playing(world) => {
                    assert!(world.score >= last_score);
                    last_score = world.score;
                }
                Screen::GameOver { final_score, .. } => {
                    assert!(*final_score >= last_score);
                    break;
                }
                _ => {}
            }
        }
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let config = Config::default();
        let mut a = GameSession::with_seed(config.clone(), 42);
        let mut b = GameSession::with_seed(config, 42);

        for step in 0..300u32 {
            let input = TickInput {
                begin: step == 0,
                thrust: step % 4 == 1,
                fire: step % 6 == 2,
                rotate: if step % 3 == 0 {
                    Rotation::Right
                } else {
                    Rotation::None
                },
                ..Default::default()
            };
            tick(&mut a, &input, 1.0 / 60.0);
            tick(&mut b, &input, 1.0 / 60.0);
        }

        match (&a.screen, &b.screen) {
            (Screen::Playing(wa), Screen::Playing(wb)) => {
                assert_eq!(wa.ship, wb.ship);
                assert_eq!(wa.asteroids, wb.asteroids);
                assert_eq!(wa.bullets, wb.bullets);
                assert_eq!(wa.score, wb.score);
            }
            (Screen::GameOver { final_score: fa, .. }, Screen::GameOver { final_score: fb, .. }) => {
                assert_eq!(fa, fb);
            }
            _ => panic!("sessions diverged"),
        }
    }
}
