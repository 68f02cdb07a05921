//! # PhyreKit
//!
//! A pure-Rust decoder for `PhyreEngine` asset containers as shipped with
//! Final Fantasy X/X-2 HD.
//!
//! ## Supported Formats
//!
//! - **Mesh containers** (`.dae.phyre`) - exported as Wavefront OBJ
//! - **Texture containers** (`.dds.phyre`) - exported as DDS (DXT1/3/5, ARGB8)
//!
//! The containers are undocumented. Structural regions are found by scanning
//! for signatures and checking each candidate against numeric constraints;
//! the decoders are best-effort and report what they find through typed
//! diagnostics.
//!
//! ## Quick Start
//!
//! ### Converting Files
//!
//! ```no_run
//! use phyrekit::converter::{convert_mesh_to_obj, convert_texture_to_dds};
//! use phyrekit::formats::{MeshOptions, TextureOptions};
//!
//! convert_mesh_to_obj("tidus.dae.phyre", "tidus.obj", &MeshOptions::default())?;
//! convert_texture_to_dds("tidus.dds.phyre", "tidus.dds", &TextureOptions::default())?;
//! # Ok::<(), phyrekit::Error>(())
//! ```
//!
//! ### Working with Bytes
//!
//! ```no_run
//! use phyrekit::prelude::*;
//!
//! let data = std::fs::read("tidus.dae.phyre")?;
//! let options = MeshOptions::new().with_normals(true);
//! let extraction = extract_mesh(&data, &options)?;
//!
//! for set in extraction.document.report().sets {
//!     println!("set {}: {} faces, {} vertices", set.id, set.faces, set.vertices);
//! }
//! for diagnostic in &extraction.diagnostics {
//!     println!("{diagnostic}");
//! }
//! # Ok::<(), phyrekit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `phyrekit` command-line binary

pub mod converter;
pub mod diagnostics;
pub mod error;
pub mod formats;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::converter::{convert_mesh_to_obj, convert_texture_to_dds};
    pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
    pub use crate::error::{Error, Result};
    pub use crate::formats::mesh::{
        MeshDocument, MeshExtraction, MeshOptions, MeshReport, extract_mesh, write_obj,
    };
    pub use crate::formats::texture::{
        Encoding, TextureExtraction, TextureOptions, TextureReport, extract_texture,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
