//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;
mod tasks;
mod transition;
mod window;

pub use render::RenderSystem;
pub use tasks::FrameTasks;
pub use transition::TransitionSystem;
pub use window::{title_percent, WindowError, WindowSystem};
