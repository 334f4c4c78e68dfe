//! Frame-driven session
//!
//! Owns the simulation state plus its collaborators (audio, HUD, high score
//! store) and the frame clock. External code feeds it timestamps and control
//! commands and reads back a [`Snapshot`] for rendering. Collaborator failures
//! are logged and otherwise ignored.

use serde::Serialize;

use crate::audio::{AudioSink, SoundCue};
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{
    FrameClock, GameEvent, GamePhase, GameState, LevelTrigger, Meteor, Particle, Player, Powerup,
    Star, Steer, TickInput, tick,
};

/// One HUD readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HudField {
    Score(u64),
    Level(u32),
    Lives(u32),
    HighScore(u64),
}

/// End-of-session data for the game-over overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub score: u64,
    pub level: u32,
    /// Seconds survived
    pub elapsed: f32,
    pub high_score: u64,
    pub new_high_score: bool,
}

/// Heads-up display collaborator
pub trait Hud {
    fn update(&mut self, field: HudField);
    fn session_ended(&mut self, summary: &SessionSummary);
}

/// HUD that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHud;

impl Hud for NullHud {
    fn update(&mut self, _field: HudField) {}
    fn session_ended(&mut self, _summary: &SessionSummary) {}
}

/// HUD that writes changes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn update(&mut self, field: HudField) {
        log::debug!("HUD {:?}", field);
    }

    fn session_ended(&mut self, summary: &SessionSummary) {
        log::info!("You scored {} points.", summary.score);
    }
}

/// Read-only view for the renderer
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub stars: &'a [Star],
    pub meteors: &'a [Meteor],
    pub powerups: &'a [Powerup],
    pub particles: &'a [Particle],
    /// Damage flash opacity (0 when reduced motion is on)
    pub flash: f32,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub high_score: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HudValues {
    score: u64,
    level: u32,
    lives: u32,
    high_score: u64,
}

/// A playable session: simulation + clock + collaborators
pub struct Session {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    high_score: u64,
    /// Whether the frame loop should keep calling `frame`
    scheduled: bool,
    damage_flash: bool,
    audio: Box<dyn AudioSink>,
    store: Box<dyn HighScoreStore>,
    hud: Box<dyn Hud>,
    shown: Option<HudValues>,
}

impl Session {
    /// Boot: build the idle warm-up state and read the stored high score
    pub fn new(
        settings: &Settings,
        audio: Box<dyn AudioSink>,
        store: Box<dyn HighScoreStore>,
        hud: Box<dyn Hud>,
    ) -> Self {
        let high_score = store.load().unwrap_or_else(|e| {
            log::warn!("High score unavailable, starting from 0: {}", e);
            0
        });
        let state = GameState::with_config(settings.resolve_seed(), settings.sim_config());
        log::info!("Booted. Highscore: {}", high_score);

        let mut session = Self {
            state,
            clock: FrameClock::new(),
            input: TickInput::default(),
            high_score,
            scheduled: false,
            damage_flash: settings.effective_damage_flash(),
            audio,
            store,
            hud,
            shown: None,
        };
        session.refresh_hud();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// True while the frame loop should keep running
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Start command: new session from idle/ended, resume when paused
    pub fn start(&mut self) {
        let fresh = matches!(self.state.phase, GamePhase::Idle | GamePhase::Ended);
        self.state.start();
        if fresh {
            self.schedule();
        }
        self.dispatch_events();
    }

    /// Pause/resume command
    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    /// Restart command: abandon the current run and start over
    pub fn restart(&mut self) {
        self.state.restart();
        self.schedule();
        self.dispatch_events();
    }

    /// Keyboard steering edge
    pub fn steer(&mut self, dir: Steer) {
        self.input.steer = Some(dir);
    }

    /// Pointer drag to an absolute x. Latched for the next frame while the
    /// loop runs, applied straight away otherwise.
    pub fn drag_to(&mut self, x: f32) {
        if self.scheduled {
            self.input.drag_x = Some(x);
        } else {
            self.state.drag_player_to(x);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Frame callback. Returns whether another frame should be scheduled.
    ///
    /// After game over the loop keeps running only until the damage flash
    /// has faded.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.scheduled {
            return false;
        }
        let dt = self.clock.delta(now_ms);
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, dt);
        self.dispatch_events();

        if self.state.phase == GamePhase::Ended && !self.state.flash.is_active() {
            self.scheduled = false;
        }
        self.scheduled
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            player: &state.player,
            stars: &state.stars,
            meteors: &state.meteors,
            powerups: &state.powerups,
            particles: &state.particles,
            flash: if self.damage_flash {
                state.flash.intensity
            } else {
                0.0
            },
            score: state.score,
            level: state.level,
            lives: state.lives,
            high_score: self.high_score,
        }
    }

    fn schedule(&mut self) {
        self.clock.reset();
        self.input = TickInput::default();
        self.scheduled = true;
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::StarCollected { .. }
                | GameEvent::PowerupCollected(_)
                | GameEvent::MeteorSmashed => self.audio.play(SoundCue::Match),
                GameEvent::MeteorHit { .. } => self.audio.play(SoundCue::Wrong),
                GameEvent::LevelUp { trigger, .. } => self.audio.play(match trigger {
                    LevelTrigger::Score => SoundCue::LevelUp,
                    LevelTrigger::Time => SoundCue::TimedLevelUp,
                }),
                GameEvent::SessionStarted => {}
                GameEvent::GameOver { score } => self.finish(score),
            }
        }
        self.refresh_hud();
    }

    /// Compare against the stored best, persist if beaten, tell the HUD
    fn finish(&mut self, score: u64) {
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            if let Err(e) = self.store.save(score) {
                log::warn!("Could not persist high score {}: {}", score, e);
            }
        }
        self.refresh_hud();

        let summary = SessionSummary {
            score,
            level: self.state.level,
            elapsed: self.state.elapsed,
            high_score: self.high_score,
            new_high_score,
        };
        self.hud.session_ended(&summary);
        self.audio.play(SoundCue::Win);
    }

    /// Push whichever HUD values changed since the last push
    fn refresh_hud(&mut self) {
        let now = HudValues {
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives,
            high_score: self.high_score,
        };
        let prev = self.shown;
        if prev.map(|p| p.score) != Some(now.score) {
            self.hud.update(HudField::Score(now.score));
        }
        if prev.map(|p| p.level) != Some(now.level) {
            self.hud.update(HudField::Level(now.level));
        }
        if prev.map(|p| p.lives) != Some(now.lives) {
            self.hud.update(HudField::Lives(now.lives));
        }
        if prev.map(|p| p.high_score) != Some(now.high_score) {
            self.hud.update(HudField::HighScore(now.high_score));
        }
        self.shown = Some(now);
    }
}
