//! Frame composition and drawing.
//!
//! Each frame is described by two [`FrameData`] values, built from plain
//! state without touching the GPU:
//!
//! - [`compose_scene`] mirrors the [`World`]: ground, opaque blocks, then
//!   water blocks and the ghost block sorted back to front
//! - [`compose_overlay`] lays out the texture picker in painter's order
//!
//! The [`Renderer`] uploads both and records two passes into the
//! multisampled target. The first clears colour and depth, the second keeps
//! the colour, has no depth buffer so the overlay always ends up on top, and
//! resolves onto the surface.

use std::ops::Range;

use cgmath::{EuclideanSpace, MetricSpace, Point3, Rotation3};

use crate::{
    config::{Settings, linear_rgba},
    context::{CameraResources, Context},
    data_structures::{
        instance::{Instance, InstanceRaw},
        material::TextureKey,
        mesh::{Geometry, Mesh},
    },
    overlay::{INDICATOR_HEIGHT, INDICATOR_WIDTH, SWATCH_SIZE, TexturePicker},
    world::{ObjectKind, World},
};

/// Which bind group of the texture bank a batch samples from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    /// 1x1 white, the instance tint alone decides the colour.
    Plain,
    Key(TextureKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
    Quad,
}

/// Pipeline a batch is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineKind {
    Opaque,
    Transparent,
    Overlay,
}

/// A run of consecutive instances sharing mesh, texture and pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawBatch {
    pub mesh: MeshKind,
    pub texture: TextureSlot,
    pub pipeline: PipelineKind,
    pub instances: Range<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct FrameData {
    pub instances: Vec<InstanceRaw>,
    pub batches: Vec<DrawBatch>,
}

impl FrameData {
    /// Append one instance, extending the last batch when it matches.
    pub fn push(
        &mut self,
        mesh: MeshKind,
        texture: TextureSlot,
        pipeline: PipelineKind,
        instance: &Instance,
    ) {
        let index = self.instances.len() as u32;
        self.instances.push(instance.to_raw());
        match self.batches.last_mut() {
            Some(batch)
                if batch.mesh == mesh
                    && batch.texture == texture
                    && batch.pipeline == pipeline
                    && batch.instances.end == index =>
            {
                batch.instances.end += 1;
            }
            _ => self.batches.push(DrawBatch {
                mesh,
                texture,
                pipeline,
                instances: index..index + 1,
            }),
        }
    }
}

/// Build the block scene as seen from `eye`.
pub fn compose_scene(world: &World, settings: &Settings, eye: Point3<f32>) -> FrameData {
    let mut frame = FrameData::default();

    let ground = world.ground();
    let size = world.ground_size();
    frame.push(
        MeshKind::Quad,
        TextureSlot::Plain,
        PipelineKind::Opaque,
        &Instance::from(ground.position.to_vec())
            .with_rotation(cgmath::Quaternion::from_angle_x(cgmath::Deg(-90.0)))
            .with_scale(size, size, 1.0)
            .with_tint(linear_rgba(settings.ground_colour, 1.0)),
    );

    let mut see_through = Vec::new();
    for key in TextureKey::ALL {
        for block in world.blocks() {
            let ObjectKind::Block { texture, material } = block.kind else {
                continue;
            };
            if texture != key {
                continue;
            }
            let instance = Instance::from(block.position.to_vec())
                .with_tint([1.0, 1.0, 1.0, material.opacity])
                .lit();
            if material.transparent {
                see_through.push((block.position, TextureSlot::Key(texture), instance));
            } else {
                frame.push(
                    MeshKind::Cube,
                    TextureSlot::Key(texture),
                    PipelineKind::Opaque,
                    &instance,
                );
            }
        }
    }

    let ghost = world.preview();
    see_through.push((
        ghost,
        TextureSlot::Plain,
        Instance::from(ghost.to_vec())
            .with_tint(linear_rgba(settings.ghost_colour, settings.ghost_opacity))
            .lit(),
    ));
    see_through.sort_by(|a, b| eye.distance2(b.0).total_cmp(&eye.distance2(a.0)));
    for (_, texture, instance) in see_through {
        frame.push(MeshKind::Cube, texture, PipelineKind::Transparent, &instance);
    }

    frame
}

/// Build the overlay: panel, swatches, then the indicator on top.
pub fn compose_overlay(picker: &TexturePicker, settings: &Settings) -> FrameData {
    let mut frame = FrameData::default();

    let (width, height) = picker.panel_size();
    frame.push(
        MeshKind::Quad,
        TextureSlot::Plain,
        PipelineKind::Overlay,
        &Instance::new()
            .with_scale(width, height, 1.0)
            .with_tint(linear_rgba(settings.panel_colour, 1.0)),
    );
    for swatch in picker.swatches() {
        frame.push(
            MeshKind::Quad,
            TextureSlot::Key(swatch.key),
            PipelineKind::Overlay,
            &Instance::from(swatch.position.to_vec()).with_scale(
                SWATCH_SIZE,
                SWATCH_SIZE,
                1.0,
            ),
        );
    }
    let indicator = picker.indicator_position();
    frame.push(
        MeshKind::Quad,
        TextureSlot::Plain,
        PipelineKind::Overlay,
        &Instance::from(indicator.to_vec())
            .with_scale(INDICATOR_WIDTH, INDICATOR_HEIGHT, 1.0)
            .with_tint(linear_rgba(settings.indicator_colour, 1.0)),
    );

    frame
}

/// Per-instance vertex buffer that grows to the largest frame seen.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        let capacity = 64;
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceRaw]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
    }
}

/// GPU side of drawing: the two meshes and the instance buffers.
pub struct Renderer {
    cube: Mesh,
    quad: Mesh,
    scene_instances: InstanceBuffer,
    overlay_instances: InstanceBuffer,
}

impl Renderer {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            cube: Mesh::new(device, &Geometry::cube(), "cube"),
            quad: Mesh::new(device, &Geometry::quad(), "quad"),
            scene_instances: InstanceBuffer::new(device, "Scene Instance Buffer"),
            overlay_instances: InstanceBuffer::new(device, "Overlay Instance Buffer"),
        }
    }

    pub fn draw_frame(
        &mut self,
        ctx: &Context,
        scene: &FrameData,
        overlay: &FrameData,
    ) -> Result<(), wgpu::SurfaceError> {
        ctx.write_camera_uniforms();
        self.scene_instances
            .upload(&ctx.device, &ctx.queue, &scene.instances);
        self.overlay_instances
            .upload(&ctx.device, &ctx.queue, &overlay.instances);

        let output = ctx.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        // Without MSAA both passes draw straight onto the surface.
        let (view, resolve_target) = match &ctx.msaa_target {
            Some(msaa) => (msaa, Some(&surface_view)),
            None => (&surface_view, None),
        };
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Block Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.draw_batches(
                &mut pass,
                ctx,
                &ctx.block_camera,
                &self.scene_instances,
                scene,
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.draw_batches(
                &mut pass,
                ctx,
                &ctx.overlay_camera,
                &self.overlay_instances,
                overlay,
            );
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn draw_batches(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        ctx: &Context,
        camera: &CameraResources,
        instances: &InstanceBuffer,
        frame: &FrameData,
    ) {
        if frame.batches.is_empty() {
            return;
        }
        pass.set_bind_group(1, &camera.bind_group, &[]);
        pass.set_vertex_buffer(1, instances.buffer.slice(..));

        let mut current = None;
        for batch in &frame.batches {
            if current != Some(batch.pipeline) {
                pass.set_pipeline(match batch.pipeline {
                    PipelineKind::Opaque => &ctx.pipelines.basic,
                    PipelineKind::Transparent => &ctx.pipelines.transparent,
                    PipelineKind::Overlay => &ctx.pipelines.gui,
                });
                current = Some(batch.pipeline);
            }
            let mesh = match batch.mesh {
                MeshKind::Cube => &self.cube,
                MeshKind::Quad => &self.quad,
            };
            pass.set_bind_group(0, ctx.textures.bind_group(batch.texture), &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..mesh.num_elements, 0, batch.instances.clone());
        }
    }
}
