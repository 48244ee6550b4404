use glam::{Mat4, Vec3};
use morph_core::{BarLayout, Color};
use web_sys as web;

mod bars;
mod helpers;
mod particles;

use bars::{create_bar_resources, BarInstance, BarResources, BarUniforms};
use particles::{create_particle_resources, ParticleResources, ParticleUniforms};

/// Everything the scene pass needs for one frame, in target space.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame {
    pub view_proj: Mat4,
    /// Cloud placement and rotation.
    pub model: Mat4,
    pub right: Vec3,
    pub up: Vec3,
    pub point_size: f32,
    pub opacity: f32,
    pub bar_color: [f32; 4],
    /// When false only the transparent clear is submitted.
    pub visible: bool,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad: wgpu::Buffer,
    particles: ParticleResources,
    bars: BarResources,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        particle_count: usize,
        bar_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the camera feed shows through wherever nothing is drawn
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[render] surface {}x{} {:?} alpha {:?}",
            config.width,
            config.height,
            format,
            alpha_mode
        );

        let quad = helpers::create_quad_buffer(&device);
        let particles = create_particle_resources(&device, format, particle_count);
        let bars = create_bar_resources(&device, format, bar_capacity);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            quad,
            particles,
            bars,
            width,
            height,
        })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn upload_positions(&self, positions: &[Vec3]) {
        let n = positions.len().min(self.particles.count as usize);
        self.queue.write_buffer(
            &self.particles.positions,
            0,
            bytemuck::cast_slice(&positions[..n]),
        );
    }

    pub fn upload_colors(&self, colors: &[Color]) {
        let n = colors.len().min(self.particles.count as usize);
        self.queue
            .write_buffer(&self.particles.colors, 0, bytemuck::cast_slice(&colors[..n]));
    }

    pub fn upload_bars(&mut self, bars: &[BarLayout]) {
        let instances: Vec<BarInstance> = bars
            .iter()
            .take(self.bars.capacity)
            .map(BarInstance::from)
            .collect();
        self.bars.count = instances.len() as u32;
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.bars.instances, 0, bytemuck::cast_slice(&instances));
        }
    }

    pub fn render(&mut self, scene: &SceneFrame) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = scene.view_proj.to_cols_array_2d();
        let pu = ParticleUniforms {
            view_proj,
            model: scene.model.to_cols_array_2d(),
            params: [scene.point_size, scene.opacity, 0.0, 0.0],
            right: scene.right.extend(0.0).to_array(),
            up: scene.up.extend(0.0).to_array(),
        };
        self.queue
            .write_buffer(&self.particles.uniforms.buffer, 0, bytemuck::bytes_of(&pu));
        let bu = BarUniforms {
            view_proj,
            color: scene.bar_color,
        };
        self.queue
            .write_buffer(&self.bars.uniforms.buffer, 0, bytemuck::bytes_of(&bu));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if scene.visible {
                rpass.set_vertex_buffer(0, self.quad.slice(..));

                if self.bars.count > 0 {
                    rpass.set_pipeline(&self.bars.pipeline);
                    rpass.set_bind_group(0, &self.bars.uniforms.bind_group, &[]);
                    rpass.set_vertex_buffer(1, self.bars.instances.slice(..));
                    rpass.draw(0..6, 0..self.bars.count);
                }

                rpass.set_pipeline(&self.particles.pipeline);
                rpass.set_bind_group(0, &self.particles.uniforms.bind_group, &[]);
                rpass.set_vertex_buffer(1, self.particles.positions.slice(..));
                rpass.set_vertex_buffer(2, self.particles.colors.slice(..));
                rpass.draw(0..6, 0..self.particles.count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
