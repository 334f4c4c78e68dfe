//! Levels and session lifecycle
//!
//! `Idle -> Running <-> Paused -> Ended`, with `Ended -> Running` on restart.
//! Commands that make no sense in the current phase are ignored.

use super::state::{GameEvent, GamePhase, GameState, LevelTrigger};
use crate::consts::*;

/// Score that must be exceeded to leave `level`
pub fn score_threshold(level: u32) -> u64 {
    level as u64 * LEVEL_SCORE_STEP + (level as u64 - 1) * LEVEL_SCORE_OFFSET
}

/// Seconds of play after which `level` advances on its own
pub fn time_threshold(level: u32) -> f32 {
    level as f32 * LEVEL_TIME_STEP
}

impl GameState {
    /// Start a session. Resumes instead if one is already in progress.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Idle | GamePhase::Ended => self.begin(),
            GamePhase::Paused => self.phase = GamePhase::Running,
            GamePhase::Running => {}
        }
    }

    /// Toggle between running and paused; no-op otherwise
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
        log::debug!("Pause toggled, phase now {:?}", self.phase);
    }

    /// Throw away the current session and start a fresh one
    pub fn restart(&mut self) {
        self.begin();
    }

    fn begin(&mut self) {
        self.reset_world(COLD_START_STARS);
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::SessionStarted);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Lives exhausted: freeze the simulation
    pub(crate) fn end_session(&mut self) {
        self.phase = GamePhase::Ended;
        self.push_event(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over: score {} at level {} after {:.1}s",
            self.score,
            self.level,
            self.elapsed
        );
    }

    /// Advance one level, capped at `MAX_LEVEL`
    pub fn level_up(&mut self, trigger: LevelTrigger) {
        if self.level >= MAX_LEVEL {
            return;
        }
        self.level += 1;
        self.push_event(GameEvent::LevelUp {
            level: self.level,
            trigger,
        });
        log::info!("Level up ({:?}): {}", trigger, self.level);
    }

    /// Score-based level-up, evaluated after each star collection
    pub(crate) fn check_score_level_up(&mut self) {
        if self.score > score_threshold(self.level) {
            self.level_up(LevelTrigger::Score);
        }
    }

    /// Time-based level-up, evaluated every frame
    pub(crate) fn check_time_level_up(&mut self) {
        if self.elapsed > time_threshold(self.level) {
            self.level_up(LevelTrigger::Time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(score_threshold(1), 150);
        assert_eq!(score_threshold(2), 340);
        assert_eq!(score_threshold(5), 910);
        assert_eq!(time_threshold(3), 75.0);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut state = GameState::new(5);
        assert_eq!(state.phase, GamePhase::Idle);

        // Pause while idle does nothing
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.stars.len(), COLD_START_STARS);

        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);

        // Start while paused resumes without resetting
        state.score = 77;
        state.toggle_pause();
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 77);

        state.end_session();
        assert_eq!(state.phase, GamePhase::Ended);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Ended);

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(9);
        state.start();
        state.score = 500;
        state.level = 4;
        state.lives = 1;
        state.elapsed = 80.0;
        state.spawn_timers.meteors = 1.5;
        state.player.invincibility.activate(3.0);
        state.player.pos.x = 10.0;
        state.spawn_meteor();

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.spawn_timers.meteors, 0.0);
        assert!(state.meteors.is_empty());
        assert!(state.powerups.is_empty());
        assert!(!state.player.is_invincible());
        assert_eq!(state.player.pos.x, state.width() / 2.0);
        assert_eq!(state.stars.len(), COLD_START_STARS);
    }

    #[test]
    fn test_level_capped() {
        let mut state = GameState::new(1);
        for _ in 0..20 {
            state.level_up(LevelTrigger::Time);
        }
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn test_score_threshold_is_strict() {
        let mut state = GameState::new(1);
        state.score = 150;
        state.check_score_level_up();
        assert_eq!(state.level, 1);
        state.score = 151;
        state.check_score_level_up();
        assert_eq!(state.level, 2);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelUp {
                level: 2,
                trigger: LevelTrigger::Score
            }]
        );
    }
}
