use super::helpers;
use glam::Vec3;
use morph_core::Color;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    // x: point size, y: opacity
    pub(crate) params: [f32; 4],
    pub(crate) right: [f32; 4],
    pub(crate) up: [f32; 4],
}

pub(crate) struct ParticleResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniforms: helpers::UniformBinding,
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    pub(crate) count: u32,
}

const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vec3>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 1,
    }],
};

const COLOR_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Color>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 2,
    }],
};

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    count: usize,
) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(morph_core::PARTICLES_WGSL.into()),
    });
    let uniforms = helpers::create_uniform_binding(
        device,
        "particle_uniforms",
        std::mem::size_of::<ParticleUniforms>() as u64,
        wgpu::ShaderStages::VERTEX_FRAGMENT,
    );
    let pipeline = helpers::make_instanced_pipeline(
        device,
        "particles_pipeline",
        &shader,
        &uniforms.layout,
        &[helpers::QUAD_LAYOUT, POSITION_LAYOUT, COLOR_LAYOUT],
        format,
    );
    let positions = helpers::create_instance_buffer(
        device,
        "particle_positions",
        (count * std::mem::size_of::<Vec3>()) as u64,
    );
    let colors = helpers::create_instance_buffer(
        device,
        "particle_colors",
        (count * std::mem::size_of::<Color>()) as u64,
    );
    ParticleResources {
        pipeline,
        uniforms,
        positions,
        colors,
        count: count as u32,
    }
}
