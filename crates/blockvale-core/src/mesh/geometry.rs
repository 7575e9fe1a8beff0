//! Flat vertex and index buffers handed to the renderer

use crate::mesh::face::{FACE_INDICES, FaceDescriptor};
use blockvale_blocks::UvRect;
use glam::Vec3;

/// Triangle geometry as flat attribute arrays
///
/// `positions` and `normals` hold three floats per vertex, `uvs` two, and
/// `indices` three per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.vertex_count() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append one quad for `face` of the voxel whose minimum corner is `origin`
    pub fn push_face(&mut self, origin: Vec3, face: &FaceDescriptor, uv: UvRect) {
        let base = self.vertex_count() as u32;
        let normal = face.normal();
        let corner_uvs = [
            [uv.u0, uv.v0],
            [uv.u1, uv.v0],
            [uv.u1, uv.v1],
            [uv.u0, uv.v1],
        ];

        for (corner, corner_uv) in face.corners.iter().zip(corner_uvs) {
            let p = origin + *corner;
            self.positions.extend_from_slice(&p.to_array());
            self.normals.extend_from_slice(&normal.to_array());
            self.uvs.extend_from_slice(&corner_uv);
        }
        self.indices.extend(FACE_INDICES.iter().map(|i| base + i));
    }

    /// Triangles as corner position triples, for order-independent comparison
    pub fn triangles(&self) -> Vec<[[f32; 3]; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                [tri[0], tri[1], tri[2]].map(|i| {
                    let i = i as usize * 3;
                    [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
                })
            })
            .collect()
    }
}

/// Output of meshing one chunk
///
/// A stream with no faces is `None` rather than an empty buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub solid: Option<Geometry>,
    pub liquid: Option<Geometry>,
}

impl ChunkMesh {
    pub fn is_empty(&self) -> bool {
        self.solid.is_none() && self.liquid.is_none()
    }

    /// Faces across both streams
    pub fn face_count(&self) -> usize {
        [&self.solid, &self.liquid]
            .into_iter()
            .flatten()
            .map(Geometry::face_count)
            .sum()
    }

    pub fn triangle_count(&self) -> usize {
        [&self.solid, &self.liquid]
            .into_iter()
            .flatten()
            .map(Geometry::triangle_count)
            .sum()
    }
}
