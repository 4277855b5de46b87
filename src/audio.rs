//! Audio collaborator
//!
//! The core only emits cues; whatever plays them lives behind `AudioSink`.
//! Playback problems never reach the simulation.

use std::io::Write;

use crate::session::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player fired a bullet
    Fire,
    /// Kill, boss hit or player hit
    Explosion,
    /// Bomber or boss released a bomb
    BombDrop,
    /// Elite broke formation
    Dive,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Fire => "fire",
            SoundCue::Explosion => "explosion",
            SoundCue::BombDrop => "bomb_drop",
            SoundCue::Dive => "dive",
        }
    }
}

/// Anything that can play cues and the looping background track.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn start_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);
}

/// Forward the audio-relevant part of a tick's events to a sink.
pub fn route_events(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Sound(cue) => sink.play(*cue),
            GameEvent::Paused => sink.pause_music(),
            GameEvent::Resumed => sink.resume_music(),
            GameEvent::GameOver { .. } => sink.stop_music(),
            _ => {}
        }
    }
}

/// Plays nothing; used when no audio device is available.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("cue: {}", cue.as_str());
    }

    fn start_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Rings the terminal bell on explosions.  Music is not supported.
pub struct TerminalBell<W: Write> {
    out: W,
    muted: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, muted: false }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if self.muted || cue != SoundCue::Explosion {
            return;
        }
        let rang = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(e) = rang {
            log::warn!("Terminal bell failed, muting: {e}");
            self.muted = true;
        }
    }

    fn start_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn stop_music(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_only_for_explosions() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(SoundCue::Fire);
        bell.play(SoundCue::Explosion);
        bell.play(SoundCue::Dive);
        assert_eq!(bell.out, b"\x07");
    }

    #[test]
    fn muted_bell_stays_quiet() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.muted = true;
        bell.play(SoundCue::Explosion);
        assert!(bell.out.is_empty());
    }
}
