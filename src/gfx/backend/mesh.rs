//! GPU geometry buffers

use wgpu::util::DeviceExt;

use super::{FrameEncoder, Vertex3D};
use crate::gfx::geometry::GeometryData;
use crate::gfx::traits::Mesh;

/// Vertex and index buffers for one piece of geometry, built eagerly at
/// construction. Submitting it binds the buffers and issues a single
/// indexed draw through whatever pipeline is currently active.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, geometry: &GeometryData, label: &str) -> Self {
        let vertices = interleave(geometry);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertex buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} index buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl Mesh<FrameEncoder> for GpuMesh {
    fn submit_for_draw(&mut self, sink: &mut FrameEncoder) {
        sink.pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        sink.pass
            .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        sink.pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Zips the plain geometry arrays into the interleaved vertex layout.
/// Missing texture coordinates become (0, 0), matching the loader's policy
/// for OBJ files without them.
fn interleave(geometry: &GeometryData) -> Vec<Vertex3D> {
    geometry
        .positions
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex3D {
            position,
            normal: geometry.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
            tex_coords: geometry.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::gfx::geometry;

    use super::*;

    #[test]
    fn interleave_pairs_attributes_by_index() {
        let data = geometry::cube(1.0);
        let vertices = interleave(&data);
        assert_eq!(vertices.len(), data.vertex_count());
        assert_eq!(vertices[5].position, data.positions[5]);
        assert_eq!(vertices[5].normal, data.normals[5]);
        assert_eq!(vertices[5].tex_coords, data.tex_coords[5]);
    }

    #[test]
    fn interleave_fills_missing_tex_coords() {
        let data = GeometryData {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 2],
            tex_coords: Vec::new(),
            indices: vec![0, 1, 0],
        };
        let vertices = interleave(&data);
        assert!(vertices.iter().all(|v| v.tex_coords == [0.0, 0.0]));
    }
}
