//! Audio cue capability interface.
//!
//! The simulation triggers cues through an [`AudioHandle`]; the platform supplies
//! the [`AudioBackend`]. Playback is fire-and-forget: nothing reports back to the
//! caller, and cues issued before the handle is running are silently dropped.
//! Nothing in the level pipeline depends on this module.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    Jump,
    Coin,
    Bump,
    Break,
    Stomp,
    Fireball,
    Kick,
    PowerUpAppear,
    PowerUp,
    FlagSlide,
    Die,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Square,
    Triangle,
    Sawtooth,
    Sine,
}

/// One oscillator note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency: f32,
    pub waveform: Waveform,
    /// Seconds
    pub duration: f32,
    pub volume: f32,
    /// Linear frequency ramp target over the note's duration
    pub slide_to: Option<f32>,
    /// Seconds after the cue is triggered
    pub start: f32,
}

const fn tone(frequency: f32, waveform: Waveform, duration: f32, volume: f32, slide_to: Option<f32>, start: f32) -> Tone {
    Tone {
        frequency,
        waveform,
        duration,
        volume,
        slide_to,
        start,
    }
}

use Waveform::{Sawtooth, Sine, Square, Triangle};

const JUMP: [Tone; 1] = [tone(150.0, Square, 0.3, 0.1, Some(300.0), 0.0)];
const COIN: [Tone; 2] = [
    tone(987.0, Square, 0.1, 0.1, None, 0.0),
    tone(1318.0, Square, 0.2, 0.1, None, 0.05),
];
const BUMP: [Tone; 1] = [tone(150.0, Triangle, 0.1, 0.15, Some(50.0), 0.0)];
const BREAK: [Tone; 1] = [tone(100.0, Sawtooth, 0.1, 0.1, None, 0.0)];
const STOMP: [Tone; 1] = [tone(300.0, Sawtooth, 0.1, 0.1, Some(50.0), 0.0)];
const FIREBALL: [Tone; 1] = [tone(400.0, Triangle, 0.1, 0.1, Some(200.0), 0.0)];
const KICK: [Tone; 1] = [tone(100.0, Square, 0.1, 0.1, None, 0.0)];
const POWER_UP_APPEAR: [Tone; 5] = [
    tone(392.0, Triangle, 0.1, 0.1, None, 0.0),
    tone(440.0, Triangle, 0.1, 0.1, None, 0.08),
    tone(494.0, Triangle, 0.1, 0.1, None, 0.16),
    tone(523.0, Triangle, 0.1, 0.1, None, 0.24),
    tone(587.0, Triangle, 0.1, 0.1, None, 0.32),
];
const POWER_UP: [Tone; 5] = [
    tone(300.0, Sine, 0.15, 0.1, Some(400.0), 0.0),
    tone(500.0, Sine, 0.15, 0.1, Some(600.0), 0.08),
    tone(800.0, Sine, 0.15, 0.1, Some(900.0), 0.16),
    tone(1000.0, Sine, 0.15, 0.1, Some(1100.0), 0.24),
    tone(1300.0, Sine, 0.15, 0.1, Some(1400.0), 0.32),
];
const FLAG_SLIDE: [Tone; 1] = [tone(400.0, Square, 0.5, 0.1, Some(100.0), 0.0)];
const DIE: [Tone; 3] = [
    tone(400.0, Square, 0.1, 0.15, None, 0.0),
    tone(300.0, Square, 0.1, 0.15, None, 0.15),
    tone(250.0, Square, 0.4, 0.15, None, 0.3),
];
const VICTORY: [Tone; 6] = [
    tone(659.0, Square, 0.1, 0.1, None, 0.0),
    tone(783.0, Square, 0.1, 0.1, None, 0.1),
    tone(987.0, Square, 0.1, 0.1, None, 0.2),
    tone(783.0, Square, 0.1, 0.1, None, 0.3),
    tone(987.0, Square, 0.1, 0.1, None, 0.4),
    tone(1318.0, Square, 0.1, 0.1, None, 0.5),
];

impl AudioCue {
    pub const ALL: [AudioCue; 12] = [
        AudioCue::Jump,
        AudioCue::Coin,
        AudioCue::Bump,
        AudioCue::Break,
        AudioCue::Stomp,
        AudioCue::Fireball,
        AudioCue::Kick,
        AudioCue::PowerUpAppear,
        AudioCue::PowerUp,
        AudioCue::FlagSlide,
        AudioCue::Die,
        AudioCue::Victory,
    ];

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            Self::Jump => &JUMP,
            Self::Coin => &COIN,
            Self::Bump => &BUMP,
            Self::Break => &BREAK,
            Self::Stomp => &STOMP,
            Self::Fireball => &FIREBALL,
            Self::Kick => &KICK,
            Self::PowerUpAppear => &POWER_UP_APPEAR,
            Self::PowerUp => &POWER_UP,
            Self::FlagSlide => &FLAG_SLIDE,
            Self::Die => &DIE,
            Self::Victory => &VICTORY,
        }
    }

    /// Seconds from trigger until the last tone ends
    pub fn total_duration(&self) -> f32 {
        self.tones()
            .iter()
            .map(|t| t.start + t.duration)
            .fold(0.0, f32::max)
    }
}

/// Platform audio output
pub trait AudioBackend {
    fn resume(&mut self);
    fn suspend(&mut self);
    fn play(&mut self, tone: &Tone);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Uninitialized,
    Running,
    Suspended,
}

/// Explicit audio handle owned by the caller.
///
/// The backend is created lazily by `init`, which the caller invokes on the first
/// user interaction (platforms commonly refuse to start audio before that).
pub struct AudioHandle<B: AudioBackend> {
    factory: Box<dyn Fn() -> B + Send + Sync>,
    backend: Option<B>,
    state: AudioState,
}

impl<B: AudioBackend> AudioHandle<B> {
    pub fn new(factory: impl Fn() -> B + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            backend: None,
            state: AudioState::Uninitialized,
        }
    }

    /// Create the backend on first use, or resume a suspended one
    pub fn init(&mut self) {
        match self.state {
            AudioState::Uninitialized => {
                self.backend = Some((self.factory)());
                self.state = AudioState::Running;
                debug!("Audio backend created");
            }
            AudioState::Suspended => {
                if let Some(backend) = self.backend.as_mut() {
                    backend.resume();
                }
                self.state = AudioState::Running;
            }
            AudioState::Running => {}
        }
    }

    pub fn suspend(&mut self) {
        if self.state == AudioState::Running {
            if let Some(backend) = self.backend.as_mut() {
                backend.suspend();
            }
            self.state = AudioState::Suspended;
        }
    }

    /// No-op unless running
    pub fn play(&mut self, cue: AudioCue) {
        if self.state != AudioState::Running {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            for tone in cue.tones() {
                backend.play(tone);
            }
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<f32>,
        resumes: u32,
        suspends: u32,
    }

    impl AudioBackend for Recorder {
        fn resume(&mut self) {
            self.resumes += 1;
        }
        fn suspend(&mut self) {
            self.suspends += 1;
        }
        fn play(&mut self, tone: &Tone) {
            self.played.push(tone.frequency);
        }
    }

    #[test]
    fn test_play_before_init_is_silent() {
        let mut handle = AudioHandle::new(Recorder::default);
        handle.play(AudioCue::Jump);
        assert_eq!(handle.state(), AudioState::Uninitialized);
        assert!(handle.backend().is_none());
    }

    #[test]
    fn test_lifecycle() {
        let mut handle = AudioHandle::new(Recorder::default);
        handle.init();
        handle.play(AudioCue::Coin);
        assert_eq!(handle.backend().unwrap().played, vec![987.0, 1318.0]);

        handle.suspend();
        handle.play(AudioCue::Jump);
        assert_eq!(handle.backend().unwrap().played.len(), 2);
        assert_eq!(handle.backend().unwrap().suspends, 1);

        handle.init();
        handle.init();
        assert_eq!(handle.state(), AudioState::Running);
        assert_eq!(handle.backend().unwrap().resumes, 1);
    }

    #[test]
    fn test_tone_table() {
        for cue in AudioCue::ALL {
            assert!(!cue.tones().is_empty(), "{cue:?}");
        }
        assert_eq!(AudioCue::Victory.tones().len(), 6);
        assert!((AudioCue::Die.total_duration() - 0.7).abs() < 1e-6);
    }
}
