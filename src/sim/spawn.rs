//! Entity spawning
//!
//! Three accumulators (stars, meteors, powerups) fill up with frame time. When
//! one reaches its level-scaled interval it resets and a spawn attempt is made.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Meteor, Particle, ParticleKind, Powerup, PowerupKind, Star, Tint};
use crate::consts::*;
use crate::rand_range;

/// Stars per second at a level
pub fn star_rate(level: u32) -> f32 {
    STAR_SPAWN_BASE + (level - 1) as f32 * STAR_SPAWN_PER_LEVEL
}

/// Meteors per second at a level (before the spawn chance)
pub fn meteor_rate(level: u32) -> f32 {
    METEOR_SPAWN_BASE + (level - 1) as f32 * METEOR_SPAWN_PER_LEVEL
}

/// Powerups per second at a level (before the spawn chance)
pub fn powerup_rate(level: u32) -> f32 {
    POWERUP_SPAWN_BASE + (level - 1) as f32 * POWERUP_SPAWN_PER_LEVEL
}

/// Points a star is worth at a level
pub fn star_score(level: u32) -> u64 {
    STAR_SCORE_BASE + (level - 1) as u64 * STAR_SCORE_PER_LEVEL
}

impl GameState {
    /// Advance the spawn accumulators and create whatever is due
    pub fn advance_spawners(&mut self, dt: f32) {
        let level = self.level;
        self.spawn_timers.stars += dt;
        self.spawn_timers.meteors += dt;
        self.spawn_timers.powerups += dt;

        if self.spawn_timers.stars >= 1.0 / star_rate(level) {
            self.spawn_timers.stars = 0.0;
            self.spawn_star();
        }

        if self.spawn_timers.meteors >= 1.0 / meteor_rate(level) {
            self.spawn_timers.meteors = 0.0;
            if self.rng.random_bool(METEOR_SPAWN_CHANCE) {
                self.spawn_meteor();
            }
        }

        if self.spawn_timers.powerups >= 1.0 / powerup_rate(level) {
            self.spawn_timers.powerups = 0.0;
            if self.rng.random_bool(POWERUP_SPAWN_CHANCE) {
                self.spawn_powerup();
            }
        }
    }

    /// Append a star just above the top edge
    pub fn spawn_star(&mut self) {
        if self.stars.len() >= MAX_STARS {
            log::debug!("Star pool full ({}), skipping spawn", MAX_STARS);
            return;
        }
        let level = self.level;
        let width = self.config.width;
        let rng = &mut self.rng;

        let radius = rand_range(rng, STAR_RADIUS_MIN, STAR_RADIUS_MAX);
        let x = rand_range(rng, radius, width - radius);
        let jitter = rand_range(rng, STAR_SPEED_JITTER.0, STAR_SPEED_JITTER.1);
        let special = rng.random_bool(SPECIAL_STAR_CHANCE);
        let sparkle = rand_range(rng, 0.0, 100.0);

        self.stars.push(Star {
            pos: Vec2::new(x, -radius * 1.5),
            radius,
            inner_radius: radius * STAR_INNER_RATIO,
            fall_speed: STAR_SPEED_BASE + (level - 1) as f32 * STAR_SPEED_PER_LEVEL + jitter,
            score: star_score(level),
            special,
            sparkle,
        });
    }

    /// Append a meteor just above the top edge
    pub fn spawn_meteor(&mut self) {
        if self.meteors.len() >= MAX_METEORS {
            log::debug!("Meteor pool full ({}), skipping spawn", MAX_METEORS);
            return;
        }
        let level = self.level;
        let width = self.config.width;
        let rng = &mut self.rng;

        let radius = rand_range(rng, METEOR_RADIUS_MIN, METEOR_RADIUS_MAX);
        let x = rand_range(rng, radius, width - radius);
        let jitter = rand_range(rng, METEOR_SPEED_JITTER.0, METEOR_SPEED_JITTER.1);
        let angle = rand_range(rng, 0.0, TAU);
        let angular_vel = rand_range(rng, -METEOR_SPIN_MAX, METEOR_SPIN_MAX);

        self.meteors.push(Meteor {
            pos: Vec2::new(x, -radius * 1.5),
            radius,
            fall_speed: METEOR_SPEED_BASE + (level - 1) as f32 * METEOR_SPEED_PER_LEVEL + jitter,
            angle,
            angular_vel,
        });
    }

    /// Append a powerup of uniformly random kind
    pub fn spawn_powerup(&mut self) {
        if self.powerups.len() >= MAX_POWERUPS {
            log::debug!("Powerup pool full ({}), skipping spawn", MAX_POWERUPS);
            return;
        }
        let width = self.config.width;
        let x = rand_range(&mut self.rng, POWERUP_EDGE_INSET, width - POWERUP_EDGE_INSET);
        let kind = PowerupKind::ALL[self.rng.random_range(0..PowerupKind::ALL.len())];

        self.powerups.push(Powerup {
            pos: Vec2::new(x, POWERUP_SPAWN_Y),
            radius: POWERUP_RADIUS,
            fall_speed: POWERUP_SPEED_BASE + self.level as f32 * POWERUP_SPEED_PER_LEVEL,
            kind,
        });
    }

    /// Scatter the background starfield over the play area
    pub(crate) fn spawn_ambient_particles(&mut self) {
        let count = self.config.ambient_particles.min(self.config.max_particles);
        let (width, height) = (self.config.width, self.config.height);
        let rng = &mut self.rng;

        for _ in 0..count {
            let pos = Vec2::new(rand_range(rng, 0.0, width), rand_range(rng, 0.0, height));
            let radius = rand_range(rng, AMBIENT_RADIUS.0, AMBIENT_RADIUS.1);
            let drift = rand_range(rng, AMBIENT_DRIFT.0, AMBIENT_DRIFT.1);
            let alpha = rand_range(rng, AMBIENT_ALPHA.0, AMBIENT_ALPHA.1);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(0.0, drift),
                radius,
                kind: ParticleKind::Ambient { alpha },
            });
        }
    }

    /// Radial ring of short-lived particles at `pos`
    pub fn emit_burst(&mut self, pos: Vec2, tint: Tint) {
        for i in 0..BURST_COUNT {
            if self.particles.len() >= self.config.max_particles {
                // Evict the oldest burst particle; ambient ones stay
                match self.particles.iter().position(Particle::is_burst) {
                    Some(oldest) => {
                        self.particles.remove(oldest);
                    }
                    None => return,
                }
            }

            let theta = i as f32 / BURST_COUNT as f32 * TAU;
            let speed = rand_range(&mut self.rng, BURST_SPEED.0, BURST_SPEED.1);
            let radius = rand_range(&mut self.rng, BURST_RADIUS.0, BURST_RADIUS.1);
            let max_life = rand_range(&mut self.rng, BURST_LIFE.0, BURST_LIFE.1);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(theta.cos(), theta.sin()) * speed,
                radius,
                kind: ParticleKind::Burst {
                    life: 0.0,
                    max_life,
                    tint,
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimConfig;

    fn empty_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.stars.clear();
        state.particles.clear();
        state
    }

    #[test]
    fn test_rates_scale_with_level() {
        assert!((star_rate(1) - 0.9).abs() < 1e-6);
        assert!((star_rate(3) - 1.4).abs() < 1e-6);
        assert!((meteor_rate(2) - 0.41).abs() < 1e-6);
        assert!((powerup_rate(6) - 0.11).abs() < 1e-6);
        assert_eq!(star_score(1), 10);
        assert_eq!(star_score(4), 25);
    }

    #[test]
    fn test_star_spawn_parameters() {
        let mut state = empty_state(11);
        state.level = 2;
        for _ in 0..50 {
            state.spawn_star();
        }
        for star in &state.stars {
            assert!(star.radius >= STAR_RADIUS_MIN && star.radius <= STAR_RADIUS_MAX);
            assert!(star.pos.x >= star.radius && star.pos.x <= state.width() - star.radius);
            assert!(star.pos.y < 0.0);
            assert!(star.fall_speed >= 90.0 + 18.0 - 6.0 && star.fall_speed <= 90.0 + 18.0 + 18.0);
            assert_eq!(star.score, 15);
            assert!((star.inner_radius - star.radius * 0.45).abs() < 1e-5);
        }
    }

    #[test]
    fn test_meteor_spawn_parameters() {
        let mut state = empty_state(12);
        for _ in 0..30 {
            state.spawn_meteor();
        }
        for m in &state.meteors {
            assert!(m.radius >= METEOR_RADIUS_MIN && m.radius <= METEOR_RADIUS_MAX);
            assert!(m.angular_vel >= -2.0 && m.angular_vel <= 2.0);
            assert!(m.fall_speed >= 130.0 && m.fall_speed <= 190.0);
            assert!(m.pos.y < 0.0);
        }
    }

    #[test]
    fn test_star_interval_fires_and_resets() {
        let mut state = empty_state(13);
        // Interval at level 1 is 1/0.9 ~ 1.11s
        state.advance_spawners(1.0);
        assert!(state.stars.is_empty());
        state.advance_spawners(0.2);
        assert_eq!(state.stars.len(), 1);
        assert_eq!(state.spawn_timers.stars, 0.0);
    }

    #[test]
    fn test_meteor_and_powerup_rolls() {
        let mut state = empty_state(21);
        let trials = 2000;
        let (mut meteors, mut powerups) = (0, 0);
        for _ in 0..trials {
            state.meteors.clear();
            state.powerups.clear();
            state.spawn_timers.meteors = 1.0 / meteor_rate(1);
            state.spawn_timers.powerups = 1.0 / powerup_rate(1);
            state.advance_spawners(0.0);

            // Accumulators reset whether or not the roll succeeded
            assert_eq!(state.spawn_timers.meteors, 0.0);
            assert_eq!(state.spawn_timers.powerups, 0.0);
            meteors += state.meteors.len();
            powerups += state.powerups.len();
        }
        // 0.9 and 0.5 chances, with plenty of slack
        assert!((1700..=1900).contains(&meteors), "meteors {}", meteors);
        assert!((880..=1120).contains(&powerups), "powerups {}", powerups);
    }

    #[test]
    fn test_no_roll_below_interval() {
        let mut state = empty_state(22);
        state.spawn_timers.meteors = 1.0 / meteor_rate(1) - 0.05;
        state.spawn_timers.powerups = 1.0 / powerup_rate(1) - 0.05;
        state.advance_spawners(0.01);
        assert!(state.meteors.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.spawn_timers.meteors > 0.0);
        assert!(state.spawn_timers.powerups > 0.0);
    }

    #[test]
    fn test_powerup_spawn_parameters() {
        let mut state = empty_state(23);
        for (level, speed) in [(1, 98.0), (3, 114.0)] {
            state.level = level;
            for _ in 0..40 {
                state.powerups.clear();
                state.spawn_powerup();
                let p = state.powerups[0];
                assert_eq!(p.radius, 14.0);
                assert_eq!(p.pos.y, -20.0);
                assert!((p.fall_speed - speed).abs() < 1e-4);
                assert!(p.pos.x >= 30.0 && p.pos.x <= state.width() - 30.0);
            }
        }
    }

    #[test]
    fn test_powerup_kinds_all_reachable() {
        let mut state = empty_state(14);
        let mut seen = [false; 3];
        for _ in 0..200 {
            state.powerups.clear();
            state.spawn_powerup();
            let kind = state.powerups[0].kind;
            let idx = PowerupKind::ALL.iter().position(|k| *k == kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_pool_caps() {
        let mut state = empty_state(15);
        for _ in 0..(MAX_STARS + 10) {
            state.spawn_star();
        }
        assert_eq!(state.stars.len(), MAX_STARS);
        for _ in 0..(MAX_POWERUPS + 3) {
            state.spawn_powerup();
        }
        assert_eq!(state.powerups.len(), MAX_POWERUPS);
    }

    #[test]
    fn test_burst_eviction_keeps_ambient() {
        let mut state = GameState::with_config(
            16,
            SimConfig {
                ambient_particles: 10,
                max_particles: 30,
                ..Default::default()
            },
        );
        assert_eq!(state.particles.len(), 10);
        state.emit_burst(Vec2::new(100.0, 100.0), Tint::Primary);
        state.emit_burst(Vec2::new(200.0, 100.0), Tint::Gold);
        assert_eq!(state.particles.len(), 30);
        let ambient = state.particles.iter().filter(|p| !p.is_burst()).count();
        assert_eq!(ambient, 10);
    }

    #[test]
    fn test_burst_is_radial_ring() {
        let mut state = empty_state(17);
        state.emit_burst(Vec2::new(50.0, 50.0), Tint::Primary);
        assert_eq!(state.particles.len(), BURST_COUNT);
        for p in &state.particles {
            let speed = p.vel.length();
            assert!(speed >= BURST_SPEED.0 - 1e-3 && speed <= BURST_SPEED.1 + 1e-3);
            assert_eq!(p.pos, Vec2::new(50.0, 50.0));
        }
    }
}
