//! Mesh data of the obamoid and its GPU buffers.
//!
//! The mesh is a square-based pyramid: two triangles for the base and one per
//! side, every face with its own vertices so each can map its own region of
//! the texture. Positions and texture coordinates live in separate vertex
//! buffers (slots 0 and 1).

use wgpu::util::DeviceExt;

#[rustfmt::skip]
pub const POSITIONS: [[f32; 3]; 16] = [
    // Bottom
    [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0],
    // Right
    [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [0.0, 1.0, 0.0],
    // Back
    [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [0.0, 1.0, 0.0],
    // Left
    [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [0.0, 1.0, 0.0],
    // Front
    [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [0.0, 1.0, 0.0],
];

#[rustfmt::skip]
pub const TEX_COORDS: [[f32; 2]; 16] = [
    [0.51, 0.49], [0.99, 0.49], [0.99, 0.01], [0.51, 0.01],
    [0.49, 0.01], [0.01, 0.01], [0.25, 0.49],
    [0.99, 0.51], [0.51, 0.51], [0.75, 0.99],
    [0.49, 0.51], [0.01, 0.51], [0.25, 0.99],
    [0.51, 0.51], [0.99, 0.51], [0.75, 0.99],
];

#[rustfmt::skip]
pub const INDICES: [u16; 18] = [
    0, 1, 2, 0, 2, 3,
    4, 5, 6,
    7, 8, 9,
    10, 11, 12,
    13, 14, 15,
];

/// The three immutable buffers of a mesh.
#[derive(Debug)]
pub struct Geometry {
    pub positions: wgpu::Buffer,
    pub tex_coords: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub num_indices: u32,
}

impl Geometry {
    /// Upload the mesh once. Indices are trusted, not checked against the
    /// vertex count.
    pub fn build(
        device: &wgpu::Device,
        positions: &[[f32; 3]],
        indices: &[u16],
        tex_coords: &[[f32; 2]],
    ) -> Self {
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Obamoid Position Buffer"),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let tex_coord_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Obamoid Texture Coordinate Buffer"),
            contents: bytemuck::cast_slice(tex_coords),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Obamoid Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            positions: position_buffer,
            tex_coords: tex_coord_buffer,
            indices: index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    pub fn obamoid(device: &wgpu::Device) -> Self {
        Self::build(device, &POSITIONS, &INDICES, &TEX_COORDS)
    }

    pub fn layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
        [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: crate::pipelines::shader::POSITION_LOCATION,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: crate::pipelines::shader::TEX_COORD_LOCATION,
                    format: wgpu::VertexFormat::Float32x2,
                }],
            },
        ]
    }
}
