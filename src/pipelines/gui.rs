use crate::pipelines::basic::mk_render_pipeline;

/**
 * The overlay pass has no depth attachment. Elements are drawn in painter's
 * order (panel, swatches, indicator) and always land on top of the block
 * scene.
 */
pub fn mk_gui_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    layout: &wgpu::PipelineLayout,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    mk_render_pipeline(
        device,
        layout,
        config.format,
        sample_count,
        Some(wgpu::BlendState {
            color: wgpu::BlendComponent::OVER,
            alpha: wgpu::BlendComponent::OVER,
        }),
        None,
        None,
        "Overlay Render Pipeline",
    )
}
