//! Curtains host application
//!
//! Window, configuration, hotkeys and per-frame systems that drive a
//! [`curtains_core::TransitionController`] and draw it with `curtains_render`.

pub mod config;
pub mod input;
pub mod systems;
