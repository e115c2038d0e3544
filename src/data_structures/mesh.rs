//! Meshes: CPU-side geometry and its GPU buffers.
//!
//! Only two shapes are ever drawn. A unit cube for blocks and the ghost,
//! and a unit quad in the XY plane facing +Z for the ground (rotated flat)
//! and every overlay element.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

/// Anything that can describe its own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Indexed triangle list, counter-clockwise front faces.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl Geometry {
    /// Cube of edge 1 centred on the origin. Four vertices per face so every
    /// face gets its own normal and full texture.
    pub fn cube() -> Self {
        let faces = [
            (Vector3::unit_x(), -Vector3::unit_z(), Vector3::unit_y()),
            (-Vector3::unit_x(), Vector3::unit_z(), Vector3::unit_y()),
            (Vector3::unit_y(), Vector3::unit_x(), -Vector3::unit_z()),
            (-Vector3::unit_y(), Vector3::unit_x(), Vector3::unit_z()),
            (Vector3::unit_z(), Vector3::unit_x(), Vector3::unit_y()),
            (-Vector3::unit_z(), -Vector3::unit_x(), Vector3::unit_y()),
        ];
        let mut geometry = Geometry::default();
        for (normal, u, v) in faces {
            geometry.push_face(normal * 0.5, normal, u, v);
        }
        geometry
    }

    /// Square of edge 1 in the XY plane, facing +Z.
    pub fn quad() -> Self {
        let mut geometry = Geometry::default();
        geometry.push_face(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::unit_z(),
            Vector3::unit_x(),
            Vector3::unit_y(),
        );
        geometry
    }

    /// `u x v` must equal `normal` for the winding to face outwards.
    fn push_face(
        &mut self,
        centre: Vector3<f32>,
        normal: Vector3<f32>,
        u: Vector3<f32>,
        v: Vector3<f32>,
    ) {
        let base = self.vertices.len() as u16;
        let corners = [
            (-0.5, -0.5, [0.0, 1.0]),
            (0.5, -0.5, [1.0, 1.0]),
            (0.5, 0.5, [1.0, 0.0]),
            (-0.5, 0.5, [0.0, 0.0]),
        ];
        for (a, b, tex_coords) in corners {
            let position = centre + u * a + v * b;
            self.vertices.push(MeshVertex {
                position: position.into(),
                tex_coords,
                normal: normal.into(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Geometry uploaded to the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, geometry: &Geometry, name: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }
}
