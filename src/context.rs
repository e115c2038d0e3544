//! The render context.
//!
//! [`Context`] owns everything the GPU side needs for the lifetime of the
//! window: surface, device and queue, the multisampled colour and depth
//! targets, the pipelines, the texture bank and both cameras with their
//! uniform buffers. Scene logic gets read access to the cameras through it.

use std::sync::Arc;

use anyhow::Context as _;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{CameraUniform, SceneCameras, Viewport},
    config::{Settings, linear_rgb},
    data_structures::texture,
    pipelines::Pipelines,
    resources::texture::TextureBank,
};

/// A camera uniform buffer and the bind group exposing it as group 1.
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraResources {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform: CameraUniform,
        label: &str,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Buffer", label)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} Bind Group", label)),
        });
        Self {
            uniform,
            buffer,
            bind_group,
        }
    }
}

/// Largest count not above `requested` that both the colour and the depth
/// format support. Counts are tried halving from `requested`; 1 always works.
pub fn supported_sample_count(
    requested: u32,
    colour: wgpu::TextureFormatFeatureFlags,
    depth: wgpu::TextureFormatFeatureFlags,
) -> u32 {
    let mut count = requested.max(1).next_power_of_two();
    while count > 1 {
        if count <= requested
            && colour.sample_count_supported(count)
            && depth.sample_count_supported(count)
        {
            return count;
        }
        count /= 2;
    }
    1
}

fn camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    })
}

#[derive(Debug)]
pub struct Context {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub sample_count: u32,
    pub msaa_target: Option<wgpu::TextureView>,
    pub depth_texture: texture::Texture,
    pub clear_colour: wgpu::Color,
    pub cameras: SceneCameras,
    pub block_camera: CameraResources,
    pub overlay_camera: CameraResources,
    pub pipelines: Pipelines,
    pub textures: TextureBank,
}

impl Context {
    pub async fn new(window: Arc<Window>, settings: &Settings) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                ..Default::default()
            })
            .await
            .context("failed to open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are computed in linear space, an sRGB surface encodes them.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = supported_sample_count(
            settings.msaa_samples,
            adapter.get_texture_format_features(config.format).flags,
            adapter
                .get_texture_format_features(texture::Texture::DEPTH_FORMAT)
                .flags,
        );
        log::info!("Rendering with {}x MSAA", sample_count);

        let viewport =
            Viewport::new(config.width, config.height).with_scale_factor(window.scale_factor());
        let cameras = SceneCameras::new(settings, viewport);

        let camera_layout = camera_bind_group_layout(&device);
        let mut block_uniform = CameraUniform::new(settings);
        block_uniform.update_view_proj(cameras.block.view_proj());
        let mut overlay_uniform = CameraUniform::new(settings);
        overlay_uniform.update_view_proj(cameras.overlay.view_proj());
        let block_camera =
            CameraResources::new(&device, &camera_layout, block_uniform, "Block Camera");
        let overlay_camera =
            CameraResources::new(&device, &camera_layout, overlay_uniform, "Overlay Camera");

        let textures = TextureBank::new(&device, &queue);
        let pipelines = Pipelines::new(
            &device,
            &config,
            textures.layout(),
            &camera_layout,
            sample_count,
        );

        let msaa_target = texture::create_msaa_target(&device, &config, sample_count);
        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            sample_count,
            "depth_texture",
        );

        let [r, g, b] = linear_rgb(settings.background_colour);
        let clear_colour = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sample_count,
            msaa_target,
            depth_texture,
            clear_colour,
            cameras,
            block_camera,
            overlay_camera,
            pipelines,
            textures,
        })
    }

    /// Reconfigure surface, render targets and cameras. Zero sizes are
    /// ignored. The window's current scale factor is picked up as well.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.msaa_target =
            texture::create_msaa_target(&self.device, &self.config, self.sample_count);
        self.depth_texture = texture::Texture::create_depth_texture(
            &self.device,
            [width, height],
            self.sample_count,
            "depth_texture",
        );
        self.cameras.resize(
            Viewport::new(width, height).with_scale_factor(self.window.scale_factor()),
        );
    }

    /// Push the current camera matrices to the GPU.
    pub fn write_camera_uniforms(&self) {
        let mut block = self.block_camera.uniform;
        block.update_view_proj(self.cameras.block.view_proj());
        self.queue
            .write_buffer(&self.block_camera.buffer, 0, bytemuck::cast_slice(&[block]));

        let mut overlay = self.overlay_camera.uniform;
        overlay.update_view_proj(self.cameras.overlay.view_proj());
        self.queue.write_buffer(
            &self.overlay_camera.buffer,
            0,
            bytemuck::cast_slice(&[overlay]),
        );
    }
}
