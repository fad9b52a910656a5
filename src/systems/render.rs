//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Backdrop scene and curtains pass
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use curtains_render::{
    BackdropPipeline, BackdropUniforms, CurtainsMaterial, CurtainsPass, RenderContext, RenderError,
};
use crate::config::{RenderingConfig, TransitionConfig};

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    backdrop: BackdropPipeline,
    curtains: CurtainsPass,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        transition_config: &TransitionConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let format = context.config.format;

        let backdrop = BackdropPipeline::new(
            &context.device,
            format,
            BackdropUniforms {
                top: render_config.background_top,
                bottom: render_config.background_bottom,
            },
        );

        let curtains = CurtainsPass::new(
            &context.device,
            &context.queue,
            format,
            context.config.width,
            context.config.height,
            &transition_config.asset_root,
            render_config.fallback_texture_size,
        );

        Ok(Self {
            context,
            backdrop,
            curtains,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32, material: &CurtainsMaterial) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.curtains.resize(
            &self.context.device,
            &self.context.queue,
            self.context.config.width,
            self.context.config.height,
            material,
        );
    }

    /// Render a single frame with the material's current parameters
    pub fn render_frame(&mut self, material: &mut CurtainsMaterial) -> Result<(), RenderError> {
        self.curtains
            .sync(&self.context.device, &self.context.queue, material);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Scene into the offscreen target, then the transition onto the surface
        self.backdrop.render(&mut encoder, self.curtains.scene_view());
        self.curtains.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure the surface at its current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        self.context.resize(self.context.size);
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
