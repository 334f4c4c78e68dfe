//! Player craft and timed power modifiers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, PowerupKind, Tint};
use crate::clamp;
use crate::consts::*;

/// Lateral steering command from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    Left,
    Right,
    Idle,
}

impl Steer {
    fn sign(self) -> f32 {
        match self {
            Steer::Left => -1.0,
            Steer::Right => 1.0,
            Steer::Idle => 0.0,
        }
    }
}

/// A timed boolean modifier: `inactive -> active(remaining) -> inactive`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub active: bool,
    pub remaining: f32,
}

impl Modifier {
    /// Activate (or restart) with the full duration
    pub fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    /// Count down; returns true on the frame the modifier expires
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the hitbox
    pub pos: Vec2,
    /// Full width/height of the hitbox
    pub size: Vec2,
    /// Lateral velocity (units/sec)
    pub vx: f32,
    /// Current lateral speed
    pub speed: f32,
    pub invincibility: Modifier,
    pub speed_boost: Modifier,
}

impl Player {
    /// Player at the default position for a play area
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width / 2.0, height - PLAYER_BOTTOM_OFFSET),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vx: 0.0,
            speed: PLAYER_SPEED,
            invincibility: Modifier::default(),
            speed_boost: Modifier::default(),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.active
    }

    /// Set lateral velocity to `-speed`, `0` or `+speed`
    pub fn steer(&mut self, dir: Steer) {
        self.vx = dir.sign() * self.speed;
    }

    /// Keep the craft fully inside `[0, width]`
    pub fn clamp_to(&mut self, width: f32) {
        let half = self.size.x / 2.0;
        self.pos.x = clamp(self.pos.x, half, width - half);
    }

    /// Change lateral speed, carrying over the current steering direction
    fn set_speed(&mut self, speed: f32) {
        if self.vx != 0.0 {
            self.vx = self.vx.signum() * speed;
        }
        self.speed = speed;
    }

    /// Count down both modifiers
    pub fn advance_modifiers(&mut self, dt: f32) {
        if self.invincibility.advance(dt) {
            log::debug!("Invincibility expired");
        }
        if self.speed_boost.advance(dt) {
            self.set_speed(PLAYER_SPEED);
            log::debug!("Speed boost expired");
        }
    }
}

/// Invincibility window for a level
pub fn invincibility_duration(level: u32) -> f32 {
    INVINCIBILITY_BASE + level as f32 * INVINCIBILITY_PER_LEVEL
}

/// Speed boost window for a level
pub fn speed_boost_duration(level: u32) -> f32 {
    SPEED_BOOST_BASE + level as f32 * SPEED_BOOST_PER_LEVEL
}

/// Instant points from a bonus powerup
pub fn bonus_score(level: u32) -> u64 {
    BONUS_SCORE_BASE + level as u64 * BONUS_SCORE_PER_LEVEL
}

impl GameState {
    /// Move the craft to an absolute x, kept inside the play area
    pub fn drag_player_to(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.player.pos.x = x;
        self.player.clamp_to(self.config.width);
    }

    /// Apply a powerup effect to the player/session
    pub fn apply_powerup(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Invincibility => {
                self.player
                    .invincibility
                    .activate(invincibility_duration(self.level));
            }
            PowerupKind::SpeedBoost => {
                self.player
                    .speed_boost
                    .activate(speed_boost_duration(self.level));
                self.player.set_speed(PLAYER_BOOSTED_SPEED);
            }
            PowerupKind::BonusScore => {
                self.score += bonus_score(self.level);
                let at = self.player.pos;
                self.emit_burst(at, Tint::Gold);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ParticleKind;

    #[test]
    fn test_modifier_lifecycle() {
        let mut m = Modifier::default();
        assert!(!m.advance(1.0));
        m.activate(0.1);
        assert!(m.active);
        assert!(!m.advance(0.05));
        assert!(m.active);
        assert!(m.advance(0.06));
        assert!(!m.active);
        assert_eq!(m.remaining, 0.0);
    }

    #[test]
    fn test_modifier_restart_on_reactivate() {
        let mut m = Modifier::default();
        m.activate(5.0);
        m.advance(4.0);
        m.activate(5.0);
        assert_eq!(m.remaining, 5.0);
    }

    #[test]
    fn test_steer_uses_current_speed() {
        let mut player = Player::new(900.0, 600.0);
        player.steer(Steer::Left);
        assert_eq!(player.vx, -PLAYER_SPEED);
        player.steer(Steer::Idle);
        assert_eq!(player.vx, 0.0);
        player.steer(Steer::Right);
        assert_eq!(player.vx, PLAYER_SPEED);
    }

    #[test]
    fn test_clamp_to_width() {
        let mut player = Player::new(900.0, 600.0);
        player.pos.x = -100.0;
        player.clamp_to(900.0);
        assert_eq!(player.pos.x, PLAYER_WIDTH / 2.0);
        player.pos.x = 5000.0;
        player.clamp_to(900.0);
        assert_eq!(player.pos.x, 900.0 - PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn test_speed_boost_and_expiry() {
        let mut state = GameState::new(3);
        state.level = 1;
        state.player.steer(Steer::Right);
        state.apply_powerup(PowerupKind::SpeedBoost);
        assert!(state.player.speed_boost.active);
        assert_eq!(state.player.speed, PLAYER_BOOSTED_SPEED);
        assert_eq!(state.player.vx, PLAYER_BOOSTED_SPEED);
        assert!((state.player.speed_boost.remaining - 4.8).abs() < 1e-5);

        state.player.advance_modifiers(4.81);
        assert!(!state.player.speed_boost.active);
        assert_eq!(state.player.speed, PLAYER_SPEED);
        assert_eq!(state.player.vx, PLAYER_SPEED);
    }

    #[test]
    fn test_bonus_score_is_instant() {
        let mut state = GameState::new(3);
        state.level = 3;
        state.apply_powerup(PowerupKind::BonusScore);
        assert_eq!(state.score, 60);
        assert!(!state.player.invincibility.active);
        assert!(!state.player.speed_boost.active);
    }

    #[test]
    fn test_bonus_score_bursts_gold_at_player() {
        let mut state = GameState::new(3);
        state.particles.clear();
        state.player.pos.x = 200.0;
        state.apply_powerup(PowerupKind::BonusScore);
        assert_eq!(state.particles.len(), BURST_COUNT);
        for p in &state.particles {
            assert_eq!(p.pos, state.player.pos);
            assert!(matches!(
                p.kind,
                ParticleKind::Burst {
                    tint: Tint::Gold,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_drag_clamps_and_ignores_nan() {
        let mut state = GameState::new(3);
        state.drag_player_to(10_000.0);
        assert_eq!(state.player.pos.x, state.width() - PLAYER_WIDTH / 2.0);
        state.drag_player_to(f32::NAN);
        assert_eq!(state.player.pos.x, state.width() - PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn test_durations_scale_with_level() {
        assert!((invincibility_duration(2) - 7.0).abs() < 1e-6);
        assert!((speed_boost_duration(5) - 8.0).abs() < 1e-6);
        assert_eq!(bonus_score(1), 40);
    }
}
