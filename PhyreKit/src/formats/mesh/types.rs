//! Records extracted from a mesh container

use crate::diagnostics::Diagnostic;
use glam::{Vec2, Vec3};
use serde::Serialize;

/// One sub-mesh's triangle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceSet {
    /// Offset of the first triangle in the container.
    pub address: usize,
    /// Triangles as local vertex indices.
    pub triangles: Vec<[u16; 3]>,
    /// Number of vertices in the paired vertex block.
    pub vertex_count: usize,
    /// One-based offset of this set's first vertex in the output document.
    pub global_offset: usize,
}

impl FaceSet {
    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Positions of one sub-mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSet {
    pub address: usize,
    pub positions: Vec<Vec3>,
}

/// Texture coordinates of one sub-mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct UvSet {
    pub address: usize,
    pub coords: Vec<Vec2>,
}

/// Vertex normals of one sub-mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalSet {
    pub address: usize,
    pub normals: Vec<Vec3>,
}

/// Aligned sets that make up a mesh document.
///
/// `vertex_sets[i]`, `uv_sets[i]` and `normal_sets[i]` all belong to
/// `face_sets[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDocument {
    pub face_sets: Vec<FaceSet>,
    pub vertex_sets: Vec<VertexSet>,
    pub uv_sets: Option<Vec<UvSet>>,
    pub normal_sets: Option<Vec<NormalSet>>,
}

impl MeshDocument {
    /// Sum of vertex counts over all sets.
    #[must_use]
    pub fn total_vertices(&self) -> usize {
        self.face_sets.iter().map(|s| s.vertex_count).sum()
    }

    /// Sum of triangle counts over all sets.
    #[must_use]
    pub fn total_faces(&self) -> usize {
        self.face_sets.iter().map(FaceSet::face_count).sum()
    }

    /// Per-set summary used by reports and the CLI table.
    #[must_use]
    pub fn report(&self) -> MeshReport {
        let sets = self
            .face_sets
            .iter()
            .enumerate()
            .map(|(i, face)| SetSummary {
                id: i,
                faces: face.face_count(),
                vertices: face.vertex_count,
                face_address: face.address,
                vertex_address: self.vertex_sets.get(i).map_or(0, |v| v.address),
                uv_address: self.uv_sets.as_ref().and_then(|s| s.get(i)).map(|s| s.address),
                normal_address: self
                    .normal_sets
                    .as_ref()
                    .and_then(|s| s.get(i))
                    .map(|s| s.address),
            })
            .collect();

        MeshReport {
            total_sets: self.face_sets.len(),
            total_faces: self.total_faces(),
            total_vertices: self.total_vertices(),
            sets,
        }
    }
}

/// Result of a mesh extraction.
#[derive(Debug, Clone)]
pub struct MeshExtraction {
    pub document: MeshDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Summary of one face set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetSummary {
    pub id: usize,
    pub faces: usize,
    pub vertices: usize,
    pub face_address: usize,
    pub vertex_address: usize,
    pub uv_address: Option<usize>,
    pub normal_address: Option<usize>,
}

/// Summary of a whole mesh extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshReport {
    pub total_sets: usize,
    pub total_faces: usize,
    pub total_vertices: usize,
    pub sets: Vec<SetSummary>,
}
