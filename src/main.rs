//! Curtains - full-screen transition effect
//!
//! Draws a gradient scene and plays the configured test preset over it.
//! C plays, X cancels, Z clears the effect, F toggles fullscreen.

use std::error::Error;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use curtains::config::AppConfig;
use curtains::input::{InputAction, InputMapper};
use curtains::systems::{title_percent, FrameTasks, RenderSystem, TransitionSystem, WindowSystem};
use curtains_core::{PlayOutcome, Preset, TransitionController};
use curtains_render::{CurtainsMaterial, RenderError};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Preset played by the test hotkey
    preset: Preset,
    controller: TransitionController<CurtainsMaterial>,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    transition: TransitionSystem,
    tasks: FrameTasks,
    /// Percentage last shown in the title bar, `None` while idle
    shown_progress: Option<u32>,
}

impl App {
    fn new(config: AppConfig, preset: Preset) -> Self {
        let controller = TransitionController::new(CurtainsMaterial::new()).with_preview(&preset);
        let transition = TransitionSystem::new(config.transition.max_frame_dt);

        Self {
            config,
            preset,
            controller,
            window: None,
            renderer: None,
            transition,
            tasks: FrameTasks::new(),
            shown_progress: None,
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::PlayTestPreset => match self.controller.play(&self.preset) {
                Ok(PlayOutcome::Started) => {
                    let wait = self.controller.wait_for_finished();
                    let duration = self.preset.duration;
                    self.tasks.spawn(async move {
                        wait.await;
                        log::info!("Test transition finished ({:.2}s preset)", duration);
                    });
                }
                Ok(PlayOutcome::Ignored) => {
                    log::info!("Transition already running, ignoring play");
                }
                Err(e) => log::error!("Cannot play test preset: {}", e),
            },
            InputAction::CancelTransition => self.controller.cancel(),
            InputAction::ResetVisual => self.controller.reset_visual(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
        }
    }

    fn update_title(&mut self) {
        let progress = self.controller.progress();
        let percent = title_percent(progress);
        if self.shown_progress != percent {
            if let Some(window) = &self.window {
                window.update_title(progress);
            }
            self.shown_progress = percent;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.transition.update(&mut self.controller);
        self.tasks.poll_all();
        self.update_title();

        if let Some(renderer) = &mut self.renderer {
            match renderer.render_frame(self.controller.sink_mut()) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => renderer.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("Frame skipped: {}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            &self.config.transition,
            self.config.window.vsync,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.size();
        log::info!("Renderer ready at {}x{}", width, height);

        let progress = self.controller.progress();
        window.update_title(progress);
        self.shown_progress = title_percent(progress);
        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.transition.reset_clock();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(
                        physical_size.width,
                        physical_size.height,
                        self.controller.sink(),
                    );
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.controller.shutdown();
        log::info!("Shutting down");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load();

    // Initialize logging, RUST_LOG wins over the configured level
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Curtains");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let preset_path = &config.transition.test_preset;
    let preset = Preset::load(preset_path).map_err(|e| {
        log::error!("Failed to load test preset '{}': {}", preset_path.display(), e);
        e
    })?;
    log::info!(
        "Loaded test preset '{}' ({:.2}s)",
        preset_path.display(),
        preset.duration
    );

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config, preset);
    event_loop.run_app(&mut app)?;
    Ok(())
}
