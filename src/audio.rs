//! Audio collaborator contract
//!
//! The core pushes fire-and-forget `GameEvent`s; whatever consumes them is a
//! collaborator detail. A missing or failed audio backend must never crash or
//! pause the simulation, so the contract is a plain sink trait and every
//! provided implementation is infallible.

use crate::sim::GameEvent;

/// Consumer of game events on the audio side. No return value is ever read
/// by the core.
pub trait AudioSink {
    fn handle(&mut self, event: &GameEvent);
}

/// Sink for hosts without audio. Accepts and drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn handle(&mut self, _event: &GameEvent) {}
}

/// Diagnostic sink that narrates events through the logger, honoring the
/// volume/mute preferences a real backend would apply.
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self {
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for LogAudio {
    fn handle(&mut self, event: &GameEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        match event {
            GameEvent::InvaderStep { pitch } => {
                log::debug!("sfx invader-step (pitch {pitch:.2}, vol {vol:.2})")
            }
            other => log::debug!("sfx {other:?} (vol {vol:.2})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = NullAudio;
        for event in [
            GameEvent::PlayerShot,
            GameEvent::InvaderStep { pitch: 1.5 },
            GameEvent::GameOver,
        ] {
            sink.handle(&event);
        }
    }

    #[test]
    fn test_volume_clamps_and_mute() {
        let mut audio = LogAudio::new();
        audio.set_master_volume(2.0);
        assert_eq!(audio.effective_volume(), 1.0);

        audio.set_master_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);

        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.25);

        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
