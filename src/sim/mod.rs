//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Delta time supplied by the caller, clamped per frame
//! - No rendering, audio or storage dependencies

pub mod clock;
pub mod collision;
pub mod player;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{below_play_area, circle_rect_overlap};
pub use player::{Modifier, Player, Steer};
pub use progression::{score_threshold, time_threshold};
pub use spawn::{meteor_rate, powerup_rate, star_rate, star_score};
pub use state::{
    DamageFlash, GameEvent, GamePhase, GameState, LevelTrigger, Meteor, Particle, ParticleKind,
    Powerup, PowerupKind, SimConfig, SpawnTimers, Star, Tint,
};
pub use tick::{TickInput, advance_entities, tick};
