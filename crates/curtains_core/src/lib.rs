//! Core of the Curtains full-screen transition effect
//!
//! This crate holds the transition timing and state engine:
//!
//! - [`Preset`] - Shape of one transition (duration, curves, tint, texture)
//! - [`AnimationCurve`] - Keyframe curve evaluated over progress
//! - [`TransitionState`] - The single running transition and its clock
//! - [`TransitionController`] - Play/cancel/advance API that feeds a render sink
//! - [`CurtainsSink`] - The five shader parameters the controller writes
//! - [`WaitForFinished`] - Future resolving when the transition completes
//!
//! Rendering lives in `curtains_render`; this crate has no GPU dependency.

mod color;
mod controller;
mod curve;
mod error;
mod preset;
mod sink;
mod state;
mod wait;

pub use color::Color;
pub use controller::{PlayOutcome, TransitionController};
pub use curve::{AnimationCurve, Curve, Keyframe};
pub use error::CurtainsError;
pub use preset::{Preset, PresetError, TextureRef};
pub use sink::{CurtainsSink, MaterialParams};
pub use state::{CurveSample, TransitionState};
pub use wait::WaitForFinished;
