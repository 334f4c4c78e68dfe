//! Per-frame simulation tick
//!
//! Order within a running frame: spawn, motion, collisions, modifier and flash
//! decay, time-based level-up.

use super::player::Steer;
use super::state::{GamePhase, GameState, ParticleKind};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keyboard steering edge (None keeps the current velocity)
    pub steer: Option<Steer>,
    /// Drag target for the player's x (pre-clamp)
    pub drag_x: Option<f32>,
}

/// Advance the game state by `dt` seconds (clamped to `MAX_FRAME_DT`,
/// non-finite deltas count as zero)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Input lands even while paused so held keys survive a resume
    if let Some(dir) = input.steer {
        state.player.steer(dir);
    }
    if let Some(x) = input.drag_x {
        state.drag_player_to(x);
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    match state.phase {
        GamePhase::Running => {}
        // The world is frozen but the damage flash still fades out
        GamePhase::Ended => {
            state.flash.advance(dt);
            return;
        }
        GamePhase::Idle | GamePhase::Paused => return,
    }

    state.elapsed += dt;

    state.advance_spawners(dt);
    advance_entities(state, dt);

    state.resolve_collisions();
    state.flash.advance(dt);
    if state.phase == GamePhase::Ended {
        return;
    }

    state.player.advance_modifiers(dt);
    state.check_time_level_up();
}

/// Motion step: integrate every pool and the player
pub fn advance_entities(state: &mut GameState, dt: f32) {
    for star in &mut state.stars {
        star.pos.y += star.fall_speed * dt;
        star.sparkle += dt * STAR_SPARKLE_RATE;
    }

    for meteor in &mut state.meteors {
        meteor.pos.y += meteor.fall_speed * dt;
        meteor.angle += meteor.angular_vel * dt * METEOR_SPIN_DAMPING;
    }

    for powerup in &mut state.powerups {
        powerup.pos.y += powerup.fall_speed * dt;
    }

    let height = state.config.height;
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        match &mut particle.kind {
            ParticleKind::Ambient { .. } => {
                if particle.pos.y > height + AMBIENT_WRAP_MARGIN {
                    particle.pos.y = -AMBIENT_WRAP_MARGIN;
                }
            }
            ParticleKind::Burst { life, .. } => *life += dt,
        }
    }
    state.particles.retain(|p| match p.kind {
        ParticleKind::Ambient { .. } => true,
        ParticleKind::Burst { life, max_life, .. } => life <= max_life,
    });

    state.player.pos.x += state.player.vx * dt;
    state.player.clamp_to(state.config.width);
}
