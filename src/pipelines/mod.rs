//! Render pipelines.
//!
//! All pipelines share one shader and one layout:
//!
//! - group 0 is the texture and sampler of the drawn batch
//! - group 1 is the camera uniform (view projection and lighting)
//!
//! They differ only in blending, culling and whether a depth buffer is used.
//! All of them render into the same multisampled target.

pub mod basic;
pub mod gui;
pub mod transparent;

#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub gui: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        sample_count: u32,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[texture_bind_group_layout, camera_bind_group_layout],
            push_constant_ranges: &[],
        });
        Self {
            basic: basic::mk_basic_pipeline(device, config, &layout, sample_count),
            transparent: transparent::mk_transparent_pipeline(
                device,
                config,
                &layout,
                sample_count,
            ),
            gui: gui::mk_gui_pipeline(device, config, &layout, sample_count),
        }
    }
}
