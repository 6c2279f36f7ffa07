//! Sound cues
//!
//! The simulation only *requests* cues. Playback is fire-and-forget: a
//! failing backend is logged by the caller and never stops the game.
//! On the web the cues are synthesized with the Web Audio API, so no sound
//! files are needed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Runner left the ground
    Jump,
    /// Runner hit an obstacle
    Collision,
    /// Score milestone
    Point,
}

/// Why a cue could not be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No audio context could be created
    Unavailable,
    /// The host refused playback (e.g. no user gesture yet)
    Rejected(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio unavailable"),
            AudioError::Rejected(reason) => write!(f, "playback rejected: {}", reason),
        }
    }
}

impl std::error::Error for AudioError {}

/// Audio backend
pub trait SoundPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Backend that plays nothing (native builds and tests)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl SoundPlayer for SilentAudio {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioError, Cue, SoundPlayer};

    /// Oscillator-based cue synthesis
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.6 }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), AudioError> {
            let reject = |e: wasm_bindgen::JsValue| AudioError::Rejected(format!("{:?}", e));
            let osc = ctx.create_oscillator().map_err(reject)?;
            let gain = ctx.create_gain().map_err(reject)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(reject)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(reject)?;

            Ok((osc, gain))
        }

        /// Short upward chirp
        fn play_jump(&self, ctx: &AudioContext) -> Result<(), AudioError> {
            let (osc, gain) = Self::create_osc(ctx, 300.0, OscillatorType::Square)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.13).ok();
            Ok(())
        }

        /// Low descending thud
        fn play_collision(&self, ctx: &AudioContext) -> Result<(), AudioError> {
            let (osc, gain) = Self::create_osc(ctx, 220.0, OscillatorType::Sawtooth)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.35)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.45).ok();
            Ok(())
        }

        /// Two-note ding
        fn play_point(&self, ctx: &AudioContext) -> Result<(), AudioError> {
            let t = ctx.current_time();
            for (i, freq) in [880.0, 1320.0].into_iter().enumerate() {
                let (osc, gain) = Self::create_osc(ctx, freq, OscillatorType::Sine)?;
                let start = t + i as f64 * 0.08;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain()
                    .set_value_at_time(self.volume * 0.3, start)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.16).ok();
            }
            Ok(())
        }
    }

    impl SoundPlayer for WebAudio {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            let Some(ctx) = &self.ctx else {
                return Err(AudioError::Unavailable);
            };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                Cue::Jump => self.play_jump(ctx),
                Cue::Collision => self.play_collision(ctx),
                Cue::Point => self.play_point(ctx),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_audio_never_fails() {
        let mut audio = SilentAudio;
        for cue in [Cue::Jump, Cue::Collision, Cue::Point] {
            assert!(audio.play(cue).is_ok());
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AudioError::Unavailable.to_string(), "audio unavailable");
        assert_eq!(
            AudioError::Rejected("NotAllowedError".into()).to_string(),
            "playback rejected: NotAllowedError"
        );
    }
}
