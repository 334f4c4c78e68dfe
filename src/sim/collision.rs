//! Collision detection and response
//!
//! Every falling entity is a circle, the player is an axis-aligned box. Overlap
//! uses the closest-point test: clamp the circle centre onto the box and compare
//! the squared distance against the squared radius.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, PowerupKind, Tint};
use crate::consts::*;

/// Circle vs axis-aligned rectangle (given by centre and half extents)
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_center: Vec2, half_extents: Vec2) -> bool {
    let min = rect_center - half_extents;
    let max = rect_center + half_extents;
    let nearest = Vec2::new(
        min.x.max(center.x.min(max.x)),
        min.y.max(center.y.min(max.y)),
    );
    (center - nearest).length_squared() <= radius * radius
}

/// True once an entity is fully past the bottom edge plus the despawn margin
#[inline]
pub fn below_play_area(pos: Vec2, radius: f32, height: f32) -> bool {
    pos.y - radius > height + DESPAWN_MARGIN
}

impl GameState {
    fn player_hit(&self, center: Vec2, radius: f32) -> bool {
        circle_rect_overlap(center, radius, self.player.pos, self.player.half_extents())
    }

    /// Resolve player contacts for every pool and drop entities that fell off
    /// the bottom. Stops early if the session ends.
    pub fn resolve_collisions(&mut self) {
        self.resolve_stars();
        self.resolve_meteors();
        if self.phase == GamePhase::Ended {
            return;
        }
        self.resolve_powerups();
    }

    fn resolve_stars(&mut self) {
        let height = self.config.height;
        for i in (0..self.stars.len()).rev() {
            let star = self.stars[i];
            if self.player_hit(star.pos, star.radius * HITBOX_SHRINK) {
                self.stars.swap_remove(i);
                if star.special {
                    self.apply_powerup(PowerupKind::BonusScore);
                }
                self.score += star.score;
                self.emit_burst(star.pos, Tint::Primary);
                self.push_event(GameEvent::StarCollected {
                    points: star.score,
                    special: star.special,
                });
                self.check_score_level_up();
            } else if below_play_area(star.pos, star.radius, height) {
                self.stars.swap_remove(i);
            }
        }
    }

    fn resolve_meteors(&mut self) {
        let height = self.config.height;
        for i in (0..self.meteors.len()).rev() {
            let meteor = self.meteors[i];
            if self.player_hit(meteor.pos, meteor.radius * HITBOX_SHRINK) {
                self.meteors.swap_remove(i);
                if self.player.is_invincible() {
                    self.score += METEOR_SHIELD_SCORE;
                    self.push_event(GameEvent::MeteorSmashed);
                } else {
                    self.lives = self.lives.saturating_sub(1);
                    self.flash.trigger();
                    self.push_event(GameEvent::MeteorHit {
                        lives_left: self.lives,
                    });
                    if self.lives == 0 {
                        self.end_session();
                        return;
                    }
                }
            } else if below_play_area(meteor.pos, meteor.radius, height) {
                self.meteors.swap_remove(i);
            }
        }
    }

    fn resolve_powerups(&mut self) {
        let height = self.config.height;
        for i in (0..self.powerups.len()).rev() {
            let powerup = self.powerups[i];
            if self.player_hit(powerup.pos, powerup.radius) {
                self.powerups.swap_remove(i);
                self.apply_powerup(powerup.kind);
                self.emit_burst(powerup.pos, Tint::Primary);
                self.push_event(GameEvent::PowerupCollected(powerup.kind));
            } else if below_play_area(powerup.pos, powerup.radius, height) {
                self.powerups.swap_remove(i);
            }
        }
    }
}
