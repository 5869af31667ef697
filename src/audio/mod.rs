//! Audio collaborator
//!
//! The core only names the sound to play; playback belongs to the sink.

use tracing::debug;

use crate::game::events::SoundCue;

/// Fire-and-forget sound output with a mute switch
pub trait AudioSink: Send {
    fn play(&mut self, cue: SoundCue);
    fn toggle_mute(&mut self);
    fn is_muted(&self) -> bool;
}

/// Sink that records cues in the log instead of playing them
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        if !self.muted {
            debug!(cue = cue.name(), "play");
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        debug!(muted = self.muted, "sound toggled");
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_mute() {
        let mut audio = LogAudio::new();
        assert!(!audio.is_muted());
        audio.toggle_mute();
        assert!(audio.is_muted());
        audio.play(SoundCue::Eat);
        audio.toggle_mute();
        assert!(!audio.is_muted());
    }
}
