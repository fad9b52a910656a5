//! Curtains post-process pass
//!
//! The host renders its frame into the pass's offscreen scene target. The
//! pass then draws a full-screen triangle onto the surface that samples the
//! scene and the transition texture, applying the cutoff mask, fade and
//! tint from the [`CurtainsMaterial`].

use std::path::PathBuf;

use wgpu::util::DeviceExt;

use crate::material::CurtainsMaterial;
use crate::texture::TextureCache;
use crate::types::CurtainsUniforms;

/// Full-screen pass applying the transition
pub struct CurtainsPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
    scene_view: wgpu::TextureView,
    scene_format: wgpu::TextureFormat,
    scene_size: (u32, u32),
    textures: TextureCache,
}

impl CurtainsPass {
    /// Create the pass for a surface of `format` and size `width` x `height`
    ///
    /// Transition textures are loaded relative to `asset_root`.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        asset_root: impl Into<PathBuf>,
        fallback_texture_size: u32,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Curtains Bind Group Layout"),
            entries: &[
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Scene
                Self::texture_entry(1),
                // Transition pattern
                Self::texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Curtains Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Curtains Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/curtains.wgsl").into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Curtains Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Curtains Uniform Buffer"),
            contents: bytemuck::bytes_of(&CurtainsUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Curtains Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let scene_size = (width.max(1), height.max(1));
        let scene_view = Self::create_scene_target(device, format, scene_size);
        let mut textures = TextureCache::new(device, queue, asset_root, fallback_texture_size);

        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &uniform_buffer,
            &scene_view,
            textures.get_or_load(device, queue, None),
            &sampler,
        );

        log::info!(
            "Created curtains pass ({}x{}, {:?})",
            scene_size.0,
            scene_size.1,
            format
        );

        Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
            sampler,
            bind_group,
            scene_view,
            scene_format: format,
            scene_size,
            textures,
        }
    }

    fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        }
    }

    fn create_scene_target(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        (width, height): (u32, u32),
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Curtains Scene Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        scene_view: &wgpu::TextureView,
        transition_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Curtains Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(transition_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn rebuild_bind_group(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material: &CurtainsMaterial,
    ) {
        let transition_view =
            self.textures
                .get_or_load(device, queue, material.params().texture.as_ref());
        self.bind_group = Self::create_bind_group(
            device,
            &self.bind_group_layout,
            &self.uniform_buffer,
            &self.scene_view,
            transition_view,
            &self.sampler,
        );
    }

    /// Recreate the scene target for a new surface size
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        material: &CurtainsMaterial,
    ) {
        let size = (width.max(1), height.max(1));
        if size == self.scene_size {
            return;
        }
        self.scene_size = size;
        self.scene_view = Self::create_scene_target(device, self.scene_format, size);
        self.rebuild_bind_group(device, queue, material);
    }

    /// Push material changes to the GPU
    ///
    /// Uploads uniforms when a scalar changed and re-binds the transition
    /// texture when the reference changed.
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, material: &mut CurtainsMaterial) {
        if material.take_uniforms_dirty() {
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&material.uniforms()));
        }
        if material.take_texture_dirty() {
            self.rebuild_bind_group(device, queue, material);
        }
    }

    /// Offscreen target the host draws its scene into
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.scene_view
    }

    /// Draw the transitioned scene onto `target`
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Curtains Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
