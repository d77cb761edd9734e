//! Sound cues
//!
//! The simulation only emits `GameEvent`s. This module turns them into the
//! four cues the game plays and hands them to whatever sink is attached.
//! On the web the sink synthesizes each cue with the Web Audio API; no
//! sample files are needed.

use crate::settings::{AudioSettings, VolumeKind};
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Bounce off a platform or an enemy
    Jump,
    /// Enemy contact or falling off
    Hit,
    /// Egg picked up
    Collect,
    /// Run ended with a new best score
    Win,
}

impl SoundCue {
    /// Cue for an event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped { .. } | GameEvent::EnemyStomped { .. } => Some(SoundCue::Jump),
            GameEvent::EnemyHit { .. } | GameEvent::FellOff => Some(SoundCue::Hit),
            GameEvent::Collected { .. } => Some(SoundCue::Collect),
            GameEvent::GameOver { new_best: true, .. } => Some(SoundCue::Win),
            GameEvent::GameOver { .. } | GameEvent::PlatformBroken { .. } => None,
        }
    }
}

/// Fire-and-forget playback
pub trait AudioSink {
    /// `gain` is the linear effects volume (0.0 - 1.0), always > 0
    fn play(&mut self, cue: SoundCue, gain: f32);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, gain: f32) {
        log::trace!("cue {:?} at gain {:.2}", cue, gain);
    }
}

/// Routes frame events to a sink at the current effects volume
pub struct CueDispatcher<S: AudioSink> {
    sink: S,
    settings: AudioSettings,
}

impl<S: AudioSink> CueDispatcher<S> {
    pub fn new(sink: S, settings: AudioSettings) -> Self {
        Self { sink, settings }
    }

    pub fn set_settings(&mut self, settings: AudioSettings) {
        self.settings = settings;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play the cues for a frame's events. Returns how many were played.
    pub fn dispatch(&mut self, events: &[GameEvent]) -> usize {
        let gain = self.settings.gain(VolumeKind::Effects);
        if gain <= 0.0 {
            return 0;
        }
        let mut played = 0;
        for cue in events.iter().filter_map(SoundCue::from_event) {
            self.sink.play(cue, gain);
            played += 1;
        }
        played
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue};

    /// Procedural Web Audio playback
    pub struct WebAudioSink {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudioSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioSink {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single tone with a pitch sweep
        fn sweep(ctx: &AudioContext, from: f32, to: f32, len: f64, vol: f32, ty: OscillatorType) {
            let Some((osc, gain)) = Self::create_osc(ctx, from, ty) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }

        /// Short arpeggio
        fn arpeggio(ctx: &AudioContext, notes: &[f32], step: f64, vol: f32, ty: OscillatorType) {
            for (i, freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = Self::create_osc(ctx, *freq, ty) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * step;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + step * 2.0)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + step * 2.5).ok();
            }
        }
    }

    impl AudioSink for WebAudioSink {
        fn play(&mut self, cue: SoundCue, gain: f32) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Jump => {
                    Self::sweep(ctx, 220.0, 660.0, 0.12, gain * 0.3, OscillatorType::Triangle)
                }
                SoundCue::Hit => {
                    Self::sweep(ctx, 300.0, 60.0, 0.35, gain * 0.5, OscillatorType::Sawtooth)
                }
                SoundCue::Collect => Self::arpeggio(
                    ctx,
                    &[600.0, 800.0, 1000.0],
                    0.08,
                    gain * 0.25,
                    OscillatorType::Sine,
                ),
                SoundCue::Win => Self::arpeggio(
                    ctx,
                    &[500.0, 600.0, 700.0, 800.0, 1000.0],
                    0.08,
                    gain * 0.25,
                    OscillatorType::Triangle,
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DeathCause;

    #[derive(Default)]
    struct Recorder(Vec<(SoundCue, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, gain: f32) {
            self.0.push((cue, gain));
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundCue::from_event(&GameEvent::Jumped { platform_id: 1 }),
            Some(SoundCue::Jump)
        );
        assert_eq!(
            SoundCue::from_event(&GameEvent::EnemyStomped { enemy_id: 1 }),
            Some(SoundCue::Jump)
        );
        assert_eq!(SoundCue::from_event(&GameEvent::FellOff), Some(SoundCue::Hit));
        assert_eq!(
            SoundCue::from_event(&GameEvent::PlatformBroken { platform_id: 3 }),
            None
        );
        let lost = GameEvent::GameOver {
            score: 10,
            new_best: false,
            cause: DeathCause::Fell,
        };
        assert_eq!(SoundCue::from_event(&lost), None);
        let won = GameEvent::GameOver {
            score: 10,
            new_best: true,
            cause: DeathCause::Fell,
        };
        assert_eq!(SoundCue::from_event(&won), Some(SoundCue::Win));
    }

    #[test]
    fn test_dispatch_uses_effects_volume() {
        let mut settings = AudioSettings::default();
        settings.set_volume(VolumeKind::Effects, 50);
        let mut dispatcher = CueDispatcher::new(Recorder::default(), settings);

        let events = [
            GameEvent::Jumped { platform_id: 0 },
            GameEvent::PlatformBroken { platform_id: 0 },
            GameEvent::Collected { collectible_id: 2 },
        ];
        assert_eq!(dispatcher.dispatch(&events), 2);
        assert_eq!(
            dispatcher.sink().0,
            vec![(SoundCue::Jump, 0.5), (SoundCue::Collect, 0.5)]
        );
    }

    #[test]
    fn test_muted_effects_play_nothing() {
        let mut settings = AudioSettings::default();
        settings.set_volume(VolumeKind::Effects, 0);
        let mut dispatcher = CueDispatcher::new(Recorder::default(), settings);
        assert_eq!(dispatcher.dispatch(&[GameEvent::FellOff]), 0);
        assert!(dispatcher.sink().0.is_empty());

        settings.set_volume(VolumeKind::Effects, 100);
        dispatcher.set_settings(settings);
        assert_eq!(dispatcher.dispatch(&[GameEvent::FellOff]), 1);
        assert_eq!(dispatcher.sink().0, vec![(SoundCue::Hit, 1.0)]);
    }
}
