use crate::{data_structures::texture::Texture, pipelines::basic::mk_render_pipeline};

/**
 * Alpha blended geometry in the block scene: water blocks and the ghost.
 *
 * Depth is still tested and written, so callers draw these after all opaque
 * geometry and sorted back to front.
 */
pub fn mk_transparent_pipeline(
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
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        Some(wgpu::Face::Back),
        "Transparent Render Pipeline",
    )
}
