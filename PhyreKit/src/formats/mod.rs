//! Container format decoders

pub mod mesh;
pub mod scan;
pub mod texture;

pub use mesh::{MeshDocument, MeshExtraction, MeshOptions, MeshReport, extract_mesh};
pub use texture::{Encoding, TextureExtraction, TextureOptions, TextureReport, extract_texture};
