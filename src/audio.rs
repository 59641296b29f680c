//! Roll sound cues
//!
//! Playback lives with the host; the engine only says which cue and how loud.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Standard dice thrown
    MainDice,
    /// Luck dice thrown
    LuckDice,
}

impl SoundCue {
    /// Asset key the host's sound bank uses
    pub fn key(&self) -> &'static str {
        match self {
            SoundCue::MainDice => "SFX_MainDice",
            SoundCue::LuckDice => "SFX_LuckDice",
        }
    }
}

/// Something that can play a cue
pub trait AudioSink {
    /// Play a one-shot cue at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Drops every cue (tests, headless hosts)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

/// Logs cues instead of playing them
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        if self.muted || volume <= 0.0 {
            return;
        }
        log::info!("♪ {} @ {:.2}", cue.key(), volume.clamp(0.0, 1.0));
    }
}

/// Records cues in order, for assertions
impl AudioSink for Vec<(SoundCue, f32)> {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.push((cue, volume));
    }
}
