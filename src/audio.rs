//! Sound cues
//!
//! The simulation only says *what* happened; each cue maps to a short chord of
//! procedurally generated tones. On the web they play through the Web Audio
//! API, everywhere else the sink is silent.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Star or powerup collected, meteor smashed while invincible
    Match,
    /// Meteor hit
    Wrong,
    /// Game over fanfare
    Win,
    /// Level reached through score
    LevelUp,
    /// Level reached through survival time
    TimedLevelUp,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One oscillator blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f32,
    /// Gain before master volume
    pub gain: f32,
    pub waveform: Waveform,
}

const fn tone(freq: f32, duration: f32, gain: f32, waveform: Waveform) -> Tone {
    Tone {
        freq,
        duration,
        gain,
        waveform,
    }
}

const MATCH: [Tone; 2] = [
    tone(880.0, 0.12, 0.08, Waveform::Sine),
    tone(1320.0, 0.06, 0.06, Waveform::Sine),
];
const WRONG: [Tone; 1] = [tone(140.0, 0.18, 0.08, Waveform::Triangle)];
const WIN: [Tone; 2] = [
    tone(660.0, 0.18, 0.09, Waveform::Sine),
    tone(880.0, 0.18, 0.07, Waveform::Sine),
];
const LEVEL_UP: [Tone; 1] = [tone(600.0, 0.08, 0.06, Waveform::Sine)];
const TIMED_LEVEL_UP: [Tone; 1] = [tone(700.0, 0.08, 0.06, Waveform::Sine)];

impl SoundCue {
    /// Tones started together for this cue
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundCue::Match => &MATCH,
            SoundCue::Wrong => &WRONG,
            SoundCue::Win => &WIN,
            SoundCue::LevelUp => &LEVEL_UP,
            SoundCue::TimedLevelUp => &TIMED_LEVEL_UP,
        }
    }
}

/// Fire-and-forget audio output
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Silent sink (native builds, audio unavailable)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("(silent) {:?}", cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorType};

    use super::{AudioSink, SoundCue, Tone, Waveform};

    /// Web Audio oscillator player
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl WebAudio {
        /// `volume` is the effective SFX gain (0 mutes)
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context or without an audio device
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, volume: f32) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
            });
            osc.frequency().set_value(tone.freq);
            gain.gain().set_value(tone.gain * volume);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time();
            osc.start().ok()?;
            osc.stop_with_when(t + tone.duration as f64).ok()?;
            Some(())
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: SoundCue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require a user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in cue.tones() {
                if Self::play_tone(ctx, tone, self.volume).is_none() {
                    log::warn!("Dropped {:?} tone at {} Hz", cue, tone.freq);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_tone_table() {
        assert_eq!(SoundCue::Match.tones().len(), 2);
        assert_eq!(SoundCue::Match.tones()[1].freq, 1320.0);
        assert_eq!(SoundCue::Wrong.tones()[0].waveform, Waveform::Triangle);
        assert_eq!(SoundCue::Win.tones()[0].freq, 660.0);
        assert_eq!(SoundCue::LevelUp.tones()[0].freq, 600.0);
        assert_eq!(SoundCue::TimedLevelUp.tones()[0].freq, 700.0);
    }

    #[test]
    fn test_all_tones_audible_and_short() {
        for cue in [
            SoundCue::Match,
            SoundCue::Wrong,
            SoundCue::Win,
            SoundCue::LevelUp,
            SoundCue::TimedLevelUp,
        ] {
            for t in cue.tones() {
                assert!(t.freq > 20.0);
                assert!(t.duration > 0.0 && t.duration < 0.5);
                assert!(t.gain > 0.0 && t.gain <= 0.1);
            }
        }
    }
}
