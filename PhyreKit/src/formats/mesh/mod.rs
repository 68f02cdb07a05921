//! Mesh container decoding
//!
//! Extraction runs in four phases over one immutable buffer:
//!
//! 1. Face headers and triangle lists ([`face_header`])
//! 2. Vertex block addresses ([`vertex_header`])
//! 3. Positions, UVs and normals ([`attributes`])
//! 4. OBJ output ([`obj_writer`]), done by the caller
//!
//! Any fatal error aborts the call; non-fatal findings are returned with
//! the document.

pub mod attributes;
pub mod face_header;
mod options;
pub mod obj_writer;
mod types;
pub mod vertex_header;

pub use obj_writer::{format_sci, write_obj};
pub use options::MeshOptions;
pub use types::{
    FaceSet, MeshDocument, MeshExtraction, MeshReport, NormalSet, SetSummary, UvSet, VertexSet,
};

use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Decode every sub-mesh in a mesh container.
///
/// # Errors
/// Returns an error if a structural search fails or a face header is inconsistent.
pub fn extract_mesh(bytes: &[u8], options: &MeshOptions) -> Result<MeshExtraction> {
    let mut diagnostics = Diagnostics::new(options.max_warnings);

    tracing::info!("Extracting face sets...");
    let face_sets = face_header::read_face_sets(bytes, options, &mut diagnostics)?;

    tracing::info!("Finding vertex block addresses...");
    let addresses = vertex_header::resolve_vertex_addresses(bytes, &face_sets, options)?;

    tracing::info!("Extracting vertices...");
    let vertex_sets =
        attributes::read_vertex_sets(bytes, &face_sets, &addresses, options, &mut diagnostics)?;

    tracing::info!("Extracting UV maps...");
    let uv_sets =
        attributes::read_uv_sets(bytes, &face_sets, &addresses, options, &mut diagnostics)?;

    let normal_sets = if options.include_normals {
        tracing::info!("Extracting normals...");
        Some(attributes::read_normal_sets(
            bytes,
            &face_sets,
            &addresses,
            options,
            &mut diagnostics,
        )?)
    } else {
        None
    };

    let document = MeshDocument {
        face_sets,
        vertex_sets,
        uv_sets,
        normal_sets,
    };

    tracing::info!(
        "Extracted {} sets ({} faces, {} vertices)",
        document.face_sets.len(),
        document.total_faces(),
        document.total_vertices()
    );

    Ok(MeshExtraction {
        document,
        diagnostics: diagnostics.into_records(),
    })
}
