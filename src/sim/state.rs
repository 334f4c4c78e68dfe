//! Game state and core simulation types
//!
//! Everything a running session mutates lives in [`GameState`]. Entity types
//! are plain data; behaviour lives in the sibling modules.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::consts::*;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Booted, warm-up entities on screen, waiting for start
    Idle,
    /// Active gameplay
    Running,
    /// Simulation suspended, rendering continues
    Paused,
    /// Lives exhausted
    Ended,
}

/// A falling star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Outer radius of the five-point shape
    pub radius: f32,
    pub inner_radius: f32,
    pub fall_speed: f32,
    pub score: u64,
    /// Special stars also grant the bonus-score effect
    pub special: bool,
    /// Decorative oscillation phase (render only)
    pub sparkle: f32,
}

/// A falling, spinning meteor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meteor {
    pub pos: Vec2,
    pub radius: f32,
    pub fall_speed: f32,
    pub angle: f32,
    pub angular_vel: f32,
}

/// Powerup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Invincibility,
    SpeedBoost,
    BonusScore,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::Invincibility,
        PowerupKind::SpeedBoost,
        PowerupKind::BonusScore,
    ];
}

/// A falling powerup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub radius: f32,
    pub fall_speed: f32,
    pub kind: PowerupKind,
}

/// Colour family for burst particles (render lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    /// Brand blue, ordinary collections
    Primary,
    /// Gold, bonus score
    Gold,
}

/// Particle lifetime model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Background starfield dot; lives forever and wraps vertically
    Ambient { alpha: f32 },
    /// One-shot effect particle
    Burst { life: f32, max_life: f32, tint: Tint },
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn is_burst(&self) -> bool {
        matches!(self.kind, ParticleKind::Burst { .. })
    }

    /// Remaining opacity of a burst particle (1 when fresh, 0 when spent)
    pub fn fade(&self) -> f32 {
        match self.kind {
            ParticleKind::Ambient { alpha } => alpha,
            ParticleKind::Burst { life, max_life, .. } => (1.0 - life / max_life).max(0.0),
        }
    }
}

/// Spawn accumulators (seconds since the last spawn attempt)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub stars: f32,
    pub meteors: f32,
    pub powerups: f32,
}

/// Full-screen damage flash, decays in fixed steps on the simulation clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageFlash {
    pub intensity: f32,
    step_timer: f32,
}

impl DamageFlash {
    pub fn trigger(&mut self) {
        self.intensity = FLASH_PEAK;
        self.step_timer = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.intensity <= 0.0 {
            return;
        }
        self.step_timer += dt;
        while self.step_timer >= FLASH_STEP_INTERVAL {
            self.step_timer -= FLASH_STEP_INTERVAL;
            self.intensity -= FLASH_STEP;
            if self.intensity <= 0.0 {
                self.intensity = 0.0;
                self.step_timer = 0.0;
                break;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }
}

/// What pushed the session to the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTrigger {
    Score,
    Time,
}

/// Things that happened during a tick, drained by the session for audio/HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StarCollected { points: u64, special: bool },
    PowerupCollected(PowerupKind),
    /// Meteor absorbed by invincibility
    MeteorSmashed,
    /// Meteor hit an unshielded player
    MeteorHit { lives_left: u32 },
    LevelUp { level: u32, trigger: LevelTrigger },
    SessionStarted,
    GameOver { score: u64 },
}

/// Static parameters of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    /// Background starfield density
    pub ambient_particles: usize,
    /// Particle pool capacity (ambient + burst)
    pub max_particles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ambient_particles: 40,
            max_particles: 512,
        }
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub config: SimConfig,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    /// Seconds simulated while running
    pub elapsed: f32,
    pub spawn_timers: SpawnTimers,
    pub player: Player,
    pub stars: Vec<Star>,
    pub meteors: Vec<Meteor>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    pub flash: DamageFlash,
    /// Pending events, drained by the session
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state with the default play area
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    /// Create an idle state: ambient starfield plus the warm-up stars
    pub fn with_config(seed: u64, config: SimConfig) -> Self {
        let width = config.width.max(MIN_WIDTH);
        let height = config.height.max(MIN_HEIGHT);
        let config = SimConfig {
            width,
            height,
            ..config
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lives: INITIAL_LIVES,
            elapsed: 0.0,
            spawn_timers: SpawnTimers::default(),
            player: Player::new(width, height),
            stars: Vec::new(),
            meteors: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            flash: DamageFlash::default(),
            events: Vec::new(),
        };
        state.reset_world(WARM_UP_STARS);
        state
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Clear counters, pools and timers, then repopulate the starfield and
    /// `initial_stars` stars. Leaves the phase untouched.
    pub(crate) fn reset_world(&mut self, initial_stars: usize) {
        self.score = 0;
        self.level = 1;
        self.lives = INITIAL_LIVES;
        self.elapsed = 0.0;
        self.spawn_timers = SpawnTimers::default();
        self.player = Player::new(self.config.width, self.config.height);
        self.stars.clear();
        self.meteors.clear();
        self.powerups.clear();
        self.particles.clear();
        self.flash = DamageFlash::default();

        self.spawn_ambient_particles();
        for _ in 0..initial_stars {
            self.spawn_star();
        }
    }

    /// Apply a new play-area size (clamped to the minimum)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.width = width.max(MIN_WIDTH);
        self.config.height = height.max(MIN_HEIGHT);
        self.player.pos.y = self.config.height - PLAYER_BOTTOM_OFFSET;
        self.player.clamp_to(self.config.width);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
