//! Star Collector - falling-stars arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, progression)
//! - `session`: Frame-driven session wiring the simulation to its collaborators
//! - `audio`: Sound cues and tone playback
//! - `highscores`: High score persistence
//! - `settings`: Player preferences and simulation configuration
//! - `platform`: Browser/native platform helpers

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::StoreError;
pub use highscores::{HighScoreStore, MemoryStore};
pub use session::{Hud, HudField, Session, SessionSummary, Snapshot};
pub use settings::{QualityPreset, Settings};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame's simulated time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Session defaults
    pub const INITIAL_LIVES: u32 = 3;
    pub const MAX_LEVEL: u32 = 6;
    /// Stars spawned when a session starts
    pub const COLD_START_STARS: usize = 6;
    /// Stars spawned for the idle pre-render warm-up
    pub const WARM_UP_STARS: usize = 4;

    /// Play area
    pub const DEFAULT_WIDTH: f32 = 900.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
    pub const MIN_WIDTH: f32 = 320.0;
    pub const MIN_HEIGHT: f32 = 240.0;
    /// Entities this far below the bottom edge are discarded
    pub const DESPAWN_MARGIN: f32 = 50.0;

    /// Player craft
    pub const PLAYER_WIDTH: f32 = 46.0;
    pub const PLAYER_HEIGHT: f32 = 34.0;
    /// Distance from the bottom edge to the player's centre
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 420.0;
    pub const PLAYER_BOOSTED_SPEED: f32 = 640.0;

    /// Star spawning (rates are per second)
    pub const STAR_SPAWN_BASE: f32 = 0.9;
    pub const STAR_SPAWN_PER_LEVEL: f32 = 0.25;
    pub const STAR_RADIUS_MIN: f32 = 14.0;
    pub const STAR_RADIUS_MAX: f32 = 22.0;
    pub const STAR_INNER_RATIO: f32 = 0.45;
    pub const STAR_SPEED_BASE: f32 = 90.0;
    pub const STAR_SPEED_PER_LEVEL: f32 = 18.0;
    pub const STAR_SPEED_JITTER: (f32, f32) = (-6.0, 18.0);
    pub const STAR_SCORE_BASE: u64 = 10;
    pub const STAR_SCORE_PER_LEVEL: u64 = 5;
    pub const SPECIAL_STAR_CHANCE: f64 = 0.12;
    /// Decorative sparkle phase advance (units/sec)
    pub const STAR_SPARKLE_RATE: f32 = 60.0;

    /// Meteor spawning
    pub const METEOR_SPAWN_BASE: f32 = 0.35;
    pub const METEOR_SPAWN_PER_LEVEL: f32 = 0.06;
    pub const METEOR_SPAWN_CHANCE: f64 = 0.9;
    pub const METEOR_RADIUS_MIN: f32 = 18.0;
    pub const METEOR_RADIUS_MAX: f32 = 40.0;
    pub const METEOR_SPEED_BASE: f32 = 150.0;
    pub const METEOR_SPEED_PER_LEVEL: f32 = 20.0;
    pub const METEOR_SPEED_JITTER: (f32, f32) = (-20.0, 40.0);
    pub const METEOR_SPIN_MAX: f32 = 2.0;
    /// Applied to angular velocity when integrating rotation
    pub const METEOR_SPIN_DAMPING: f32 = 0.6;
    /// Points for smashing a meteor while invincible
    pub const METEOR_SHIELD_SCORE: u64 = 20;

    /// Powerup spawning
    pub const POWERUP_SPAWN_BASE: f32 = 0.06;
    pub const POWERUP_SPAWN_PER_LEVEL: f32 = 0.01;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.5;
    pub const POWERUP_RADIUS: f32 = 14.0;
    pub const POWERUP_SPEED_BASE: f32 = 90.0;
    pub const POWERUP_SPEED_PER_LEVEL: f32 = 8.0;
    pub const POWERUP_EDGE_INSET: f32 = 30.0;
    pub const POWERUP_SPAWN_Y: f32 = -20.0;

    /// Powerup effects
    pub const INVINCIBILITY_BASE: f32 = 5.0;
    pub const INVINCIBILITY_PER_LEVEL: f32 = 1.0;
    pub const SPEED_BOOST_BASE: f32 = 4.0;
    pub const SPEED_BOOST_PER_LEVEL: f32 = 0.8;
    pub const BONUS_SCORE_BASE: u64 = 30;
    pub const BONUS_SCORE_PER_LEVEL: u64 = 10;

    /// Star and meteor radii are scaled by this before hit tests
    pub const HITBOX_SHRINK: f32 = 0.7;

    /// Level thresholds
    pub const LEVEL_SCORE_STEP: u64 = 150;
    pub const LEVEL_SCORE_OFFSET: u64 = 40;
    /// Seconds of play per level for the time-based level-up
    pub const LEVEL_TIME_STEP: f32 = 25.0;

    /// Collection burst particles
    pub const BURST_COUNT: usize = 14;
    pub const BURST_SPEED: (f32, f32) = (40.0, 160.0);
    pub const BURST_RADIUS: (f32, f32) = (1.4, 3.8);
    pub const BURST_LIFE: (f32, f32) = (0.4, 0.9);

    /// Ambient starfield particles
    pub const AMBIENT_DRIFT: (f32, f32) = (2.0, 8.0);
    pub const AMBIENT_RADIUS: (f32, f32) = (0.5, 2.1);
    pub const AMBIENT_ALPHA: (f32, f32) = (0.1, 0.7);
    pub const AMBIENT_WRAP_MARGIN: f32 = 10.0;

    /// Pool capacities
    pub const MAX_STARS: usize = 64;
    pub const MAX_METEORS: usize = 32;
    pub const MAX_POWERUPS: usize = 8;

    /// Damage flash: peak opacity, decrement per step, step length (seconds)
    pub const FLASH_PEAK: f32 = 0.6;
    pub const FLASH_STEP: f32 = 0.08;
    pub const FLASH_STEP_INTERVAL: f32 = 0.05;
}

/// Uniform sample in `[lo, hi)`. Collapses to `lo` when the range is empty.
#[inline]
pub fn rand_range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Clamp `v` into `[lo, hi]`. Unlike `f32::clamp` this never panics; if the
/// bounds cross, `lo` wins.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}
