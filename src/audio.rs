//! Audio system using the Web Audio API
//!
//! Procedurally generated sound effects - no sound files to load. Every
//! call is best-effort: a missing or suspended AudioContext means silence,
//! never an error.

/// One-shot sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Pointer press
    Pop,
    /// Alex lands on the floor
    Dribble,
    /// Explosive Alex detonates
    Explosion,
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::SoundEffect;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Audio manager for the toy
    ///
    /// Besides one-shots it owns two loops: the wiper drone that runs while
    /// the sweep is active, and a background pad started on the first press.
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
        wiper: Option<(OscillatorNode, GainNode)>,
        music: Vec<OscillatorNode>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                music_volume: 0.7,
                muted: false,
                wiper: None,
                music: Vec::new(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_music_volume(&mut self, vol: f32) {
            self.music_volume = vol.clamp(0.0, 1.0);
        }

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

        /// Play a one-shot sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Pop => self.play_pop(ctx, vol),
                SoundEffect::Dribble => self.play_dribble(ctx, vol),
                SoundEffect::Explosion => self.play_explosion(ctx, vol),
            }
        }

        /// Start the looping wiper drone. No-op if already running.
        pub fn start_wiper(&mut self) {
            if self.wiper.is_some() {
                return;
            }
            let vol = self.effective_volume();
            let Some(ctx) = &self.ctx else { return };
            let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sawtooth) else {
                return;
            };
            gain.gain().set_value(vol * 0.15);
            if osc.start().is_ok() {
                self.wiper = Some((osc, gain));
            }
        }

        /// Stop the wiper drone. No-op if not running.
        pub fn stop_wiper(&mut self) {
            if let Some((osc, _gain)) = self.wiper.take() {
                let _ = osc.stop();
            }
        }

        /// Start the background pad on first call; later calls are no-ops
        pub fn start_music(&mut self) {
            if !self.music.is_empty() {
                return;
            }
            let vol = if self.muted {
                0.0
            } else {
                // The pad sits well under the effects
                self.master_volume * self.music_volume * 0.3
            };
            let Some(ctx) = &self.ctx else { return };

            // Root plus fifth, slightly detuned for width
            for freq in [110.0, 165.5] {
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                    gain.gain().set_value(vol);
                    if osc.start().is_ok() {
                        self.music.push(osc);
                    }
                }
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Pop - short bright blip
        fn play_pop(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(440.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Dribble - low bounce thump
        fn play_dribble(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(70.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Explosion - boom, kept quieter than the effects around it
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let vol = vol * 0.4;
            let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();

            // High frequency crack on top
            if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain2.gain().set_value_at_time(vol * 0.2, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.15).ok();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Native stub - the toy has no native audio backend
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct AudioManager;

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self
    }

    pub fn resume(&self) {}
    pub fn set_master_volume(&mut self, _vol: f32) {}
    pub fn set_sfx_volume(&mut self, _vol: f32) {}
    pub fn set_music_volume(&mut self, _vol: f32) {}
    pub fn set_muted(&mut self, _muted: bool) {}
    pub fn play(&self, _effect: SoundEffect) {}
    pub fn start_wiper(&mut self) {}
    pub fn stop_wiper(&mut self) {}
    pub fn start_music(&mut self) {}
}
