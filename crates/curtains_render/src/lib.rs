//! Curtains Rendering Library
//!
//! This crate provides the wgpu-based passes that draw a Curtains transition
//! over a rendered scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`material::CurtainsMaterial`] - CPU-side sink the controller writes into
//! - [`pass::CurtainsPass`] - Full-screen pass applying cutoff, fade and tint
//! - [`backdrop::BackdropPipeline`] - Gradient scene used when the host has none
//! - [`texture::TextureCache`] - Transition textures loaded by asset path

pub mod backdrop;
pub mod context;
pub mod error;
pub mod material;
pub mod pass;
pub mod texture;
pub mod types;

pub use backdrop::BackdropPipeline;
pub use context::RenderContext;
pub use error::RenderError;
pub use material::CurtainsMaterial;
pub use pass::CurtainsPass;
pub use texture::{TextureCache, TRANSITION_TEXTURE_FORMAT};
pub use types::{BackdropUniforms, CurtainsUniforms};

// Re-export core types for convenience
pub use curtains_core::{Color, CurtainsSink, MaterialParams, TextureRef};
