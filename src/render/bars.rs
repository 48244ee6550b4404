use super::helpers;
use morph_core::BarLayout;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BarUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

/// One equalizer bar as the vertex shader reads it.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BarInstance {
    // xyz: center, w: yaw in radians
    pub(crate) center_yaw: [f32; 4],
    // width, height
    pub(crate) size: [f32; 2],
}

impl From<&BarLayout> for BarInstance {
    fn from(bar: &BarLayout) -> Self {
        Self {
            center_yaw: [
                bar.position.x,
                bar.position.y,
                bar.position.z,
                bar.yaw_deg.to_radians(),
            ],
            size: [bar.width, bar.height],
        }
    }
}

pub(crate) struct BarResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniforms: helpers::UniformBinding,
    pub(crate) instances: wgpu::Buffer,
    pub(crate) capacity: usize,
    pub(crate) count: u32,
}

const INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<BarInstance>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 0,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 16,
            shader_location: 2,
        },
    ],
};

pub(crate) fn create_bar_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    capacity: usize,
) -> BarResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("bars_shader"),
        source: wgpu::ShaderSource::Wgsl(morph_core::BARS_WGSL.into()),
    });
    let uniforms = helpers::create_uniform_binding(
        device,
        "bar_uniforms",
        std::mem::size_of::<BarUniforms>() as u64,
        wgpu::ShaderStages::VERTEX_FRAGMENT,
    );
    let pipeline = helpers::make_instanced_pipeline(
        device,
        "bars_pipeline",
        &shader,
        &uniforms.layout,
        &[helpers::QUAD_LAYOUT, INSTANCE_LAYOUT],
        format,
    );
    let instances = helpers::create_instance_buffer(
        device,
        "bar_instances",
        (capacity * std::mem::size_of::<BarInstance>()) as u64,
    );
    BarResources {
        pipeline,
        uniforms,
        instances,
        capacity,
        count: 0,
    }
}
