use super::helpers;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct StarsUniforms {
    pub(crate) inv_view_proj: [[f32; 4]; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) density: f32,
}

pub(crate) struct StarsResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_stars_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> StarsResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("stars_shader"),
        source: wgpu::ShaderSource::Wgsl(super::STARS_WGSL.into()),
    });
    let bgl = helpers::uniform_layout(device, "stars_bgl", wgpu::ShaderStages::FRAGMENT);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("stars_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_blended_pipeline(
        device,
        "stars_pipeline",
        &pl,
        &shader,
        ("vs_fullscreen", "fs_stars"),
        &[],
        color_format,
    );
    let uniform_buffer = helpers::uniform_buffer::<StarsUniforms>(device, "stars_uniforms");
    let bind_group = helpers::uniform_bind_group(device, "stars_bg", &bgl, &uniform_buffer);

    StarsResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}
