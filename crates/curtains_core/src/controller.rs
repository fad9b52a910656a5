//! Transition controller
//!
//! The [`TransitionController`] is the public face of the effect. It owns the
//! only [`TransitionState`] and the render sink, and it is owned in turn by
//! the host application rather than living in a global.
//!
//! # Example
//! ```ignore
//! let mut curtains = TransitionController::new(MaterialParams::new());
//!
//! curtains.play(&Preset::load("assets/presets/wipe.ron")?)?;
//!
//! // Frame loop
//! curtains.advance(dt);
//! ```
//!
//! Parameters reach the sink in two steps: tint, distortion and texture are
//! written by [`play`](TransitionController::play) so the first frame already
//! shows them, while cutoff and fade are written by every
//! [`advance`](TransitionController::advance).

use crate::error::CurtainsError;
use crate::preset::Preset;
use crate::sink::CurtainsSink;
use crate::state::TransitionState;
use crate::wait::{FinishedSignal, WaitForFinished};

/// What a call to [`TransitionController::play`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A new transition started
    Started,
    /// A transition was already running; nothing changed
    Ignored,
}

/// Drives the single full-screen transition
pub struct TransitionController<S: CurtainsSink> {
    sink: S,
    state: TransitionState,
    signal: FinishedSignal,
}

impl<S: CurtainsSink> TransitionController<S> {
    /// Create an idle controller, clearing cutoff and fade on the sink
    pub fn new(mut sink: S) -> Self {
        sink.set_cutoff(0.0);
        sink.set_fade(0.0);

        Self {
            sink,
            state: TransitionState::new(),
            signal: FinishedSignal::new(true),
        }
    }

    /// Prime the sink with a preset's static parameters without playing it
    pub fn with_preview(mut self, preset: &Preset) -> Self {
        self.push_static_params_from(preset);
        self
    }

    /// True if no transition is running (idle or completed)
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Start a transition
    ///
    /// Does nothing and returns [`PlayOutcome::Ignored`] while another
    /// transition is running. Presets with a non-positive duration are
    /// rejected.
    pub fn play(&mut self, preset: &Preset) -> Result<PlayOutcome, CurtainsError> {
        if !self.is_finished() {
            log::debug!("Transition already running, ignoring play");
            return Ok(PlayOutcome::Ignored);
        }
        preset.validate()?;

        self.state.copy_from(preset);
        self.push_static_params_from(preset);
        self.sync_signal();

        log::debug!(
            "Playing transition ({}s{})",
            preset.duration,
            if preset.reversed { ", reversed" } else { "" }
        );
        Ok(PlayOutcome::Started)
    }

    /// Clear cutoff and fade on the sink
    ///
    /// Only acts while idle; a running transition is left alone.
    pub fn reset_visual(&mut self) {
        if !self.is_finished() {
            return;
        }
        self.sink.set_cutoff(0.0);
        self.sink.set_fade(0.0);
    }

    /// Abandon any running transition and clear the visuals
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            log::debug!(
                "Cancelling transition with {:.3}s left",
                self.state.time_remaining()
            );
        }
        self.state.mark_finished();
        self.sync_signal();
        self.reset_visual();
    }

    /// Step the running transition by `dt` seconds and push cutoff and fade
    pub fn advance(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }

        let sample = self.state.advance(dt);
        self.sink.set_cutoff(sample.cutoff);
        self.sink.set_fade(sample.fade);

        if self.state.is_finished() {
            log::debug!("Transition finished");
        }
        self.sync_signal();
    }

    /// Leave no visual state behind when the host exits
    pub fn shutdown(&mut self) {
        self.sink.set_cutoff(0.0);
        self.sink.set_fade(0.0);
        self.state.mark_finished();
        self.sync_signal();
    }

    /// Future that resolves once no transition is running
    ///
    /// Each call returns a fresh future, so waiting can be restarted for
    /// every new transition.
    pub fn wait_for_finished(&self) -> WaitForFinished {
        self.signal.wait()
    }

    /// Write a cutoff value straight to the sink, clamped to `[0, 1]`
    pub fn set_cutoff_directly(&mut self, cutoff: f32) {
        self.sink.set_cutoff(cutoff.clamp(0.0, 1.0));
    }

    /// Progress of the running transition, `None` while idle
    pub fn progress(&self) -> Option<f32> {
        (!self.is_finished()).then(|| self.state.progress())
    }

    /// The live transition state
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// The render sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn push_static_params_from(&mut self, preset: &Preset) {
        self.sink.set_distort(preset.distort);
        self.sink.set_color(preset.color);
        self.sink.set_texture(preset.texture.as_ref());
    }

    fn sync_signal(&self) {
        self.signal.set(self.state.is_finished());
    }
}
