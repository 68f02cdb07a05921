//! Position, UV and normal readers
//!
//! Vertex blocks are planar: positions (3 floats), normals (3 floats) and
//! UVs (2 floats) follow one another, each covering every vertex of the set.

use super::options::MeshOptions;
use super::types::{FaceSet, NormalSet, UvSet, VertexSet};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::formats::scan::{read_vec2s, read_vec3s};

/// Minimum floats per vertex for a block to carry UVs.
pub const UV_PRESENCE_THRESHOLD: f64 = 8.0;

const POSITION_SIZE: usize = 12;
const UV_PLANE_OFFSET: usize = 24;

/// Read the positions of every set.
pub fn read_vertex_sets(
    bytes: &[u8],
    face_sets: &[FaceSet],
    addresses: &[usize],
    options: &MeshOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<VertexSet>> {
    let mut sets = Vec::with_capacity(face_sets.len());
    for (set, (face, &address)) in face_sets.iter().zip(addresses).enumerate() {
        if options.debug {
            tracing::debug!("Vert set {set:2} at {address:#x}");
        }
        let positions = read_vec3s(bytes, address, face.vertex_count, "vertex positions")?;

        if options.show_warnings {
            for (i, p) in positions.iter().enumerate() {
                if p.abs().max_element() > options.max_vertex_magnitude {
                    diagnostics.warn(
                        DiagnosticKind::VertexMagnitude,
                        format!(
                            "Vertex {i} in set {set} has large values! ({:.8} {:.8} {:.8})",
                            p.x, p.y, p.z
                        ),
                    );
                }
            }
        }

        sets.push(VertexSet { address, positions });
    }
    Ok(sets)
}

/// Floats per vertex of the first block, from the spacing of the first two addresses.
#[must_use]
pub fn floats_per_vertex(addresses: &[usize], vertex_count: usize) -> f64 {
    match addresses {
        [first, second, ..] if vertex_count > 0 => {
            second.saturating_sub(*first) as f64 / 4.0 / vertex_count as f64
        }
        _ => 0.0,
    }
}

/// Read texture coordinates, or `None` when the blocks are too narrow to hold them.
pub fn read_uv_sets(
    bytes: &[u8],
    face_sets: &[FaceSet],
    addresses: &[usize],
    options: &MeshOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Vec<UvSet>>> {
    let Some(first) = face_sets.first() else {
        return Ok(None);
    };

    let fpv = floats_per_vertex(addresses, first.vertex_count);
    if fpv < UV_PRESENCE_THRESHOLD {
        if options.show_warnings {
            diagnostics.note(
                DiagnosticKind::UvAbsent,
                format!("UV maps not present ({fpv:.6} floats per vert). Does a texture file exist?"),
            );
        }
        return Ok(None);
    }

    let (lo, hi) = options.uv_bounds;
    let mut sets = Vec::with_capacity(face_sets.len());
    for (set, (face, &base)) in face_sets.iter().zip(addresses).enumerate() {
        let address = base + UV_PLANE_OFFSET * face.vertex_count;
        if options.debug {
            tracing::debug!("UV set {set:2} at {address:#x}");
        }
        let mut coords = read_vec2s(bytes, address, face.vertex_count, "UV coordinates")?;

        for (i, uv) in coords.iter_mut().enumerate() {
            if options.show_warnings && (uv.max_element() > hi || uv.min_element() < lo) {
                diagnostics.warn(
                    DiagnosticKind::UvOutOfBounds,
                    format!(
                        "UV map {i} in set {set} is out of expected bounds! ({:.8} {:.8})",
                        uv.x, uv.y
                    ),
                );
            }
            if options.invert_uv_v {
                uv.y = 1.0 - uv.y;
            }
        }

        sets.push(UvSet { address, coords });
    }

    if options.invert_uv_v {
        tracing::debug!("Inverted vertical component of UV maps");
    }
    Ok(Some(sets))
}

/// Read vertex normals of every set.
pub fn read_normal_sets(
    bytes: &[u8],
    face_sets: &[FaceSet],
    addresses: &[usize],
    options: &MeshOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<NormalSet>> {
    let mut sets = Vec::with_capacity(face_sets.len());
    for (set, (face, &base)) in face_sets.iter().zip(addresses).enumerate() {
        let address = base + POSITION_SIZE * face.vertex_count;
        if options.debug {
            tracing::debug!("Normals set {set:2} at {address:#x}");
        }
        let normals = read_vec3s(bytes, address, face.vertex_count, "vertex normals")?;

        if options.show_warnings {
            for (i, n) in normals.iter().enumerate() {
                let length = n.as_dvec3().length();
                if (length - 1.0).abs() > options.normal_tolerance {
                    diagnostics.warn(
                        DiagnosticKind::NonUnitNormal,
                        format!("Normal {i} in set {set} is outside tolerance! ({length:.8})"),
                    );
                }
            }
        }

        sets.push(NormalSet { address, normals });
    }
    Ok(sets)
}
