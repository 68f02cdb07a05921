//! File-level conversions
//!
//! - Mesh container → Wavefront OBJ
//! - Texture container → DDS
//!
//! Each conversion reads the whole container, runs extraction, and only
//! then creates the destination, so a fatal error never leaves a partial
//! file behind.

use crate::error::{Error, Result};
use crate::formats::mesh::{MeshExtraction, MeshOptions, extract_mesh, write_obj};
use crate::formats::texture::{TextureExtraction, TextureOptions, extract_texture};
use ddsfile::Dds;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

fn read_container(path: &Path) -> Result<Vec<u8>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}

/// Render an extracted mesh as OBJ text titled `name`.
pub fn mesh_to_obj_bytes(extraction: &MeshExtraction, name: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_obj(&mut out, name, &extraction.document)?;
    Ok(out)
}

/// Convert a mesh container to an OBJ file.
///
/// The OBJ title comment is the destination's file name.
///
/// # Errors
/// Returns an error if the container cannot be read, extraction fails, or
/// the destination cannot be written.
pub fn convert_mesh_to_obj<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    options: &MeshOptions,
) -> Result<MeshExtraction> {
    let source = source.as_ref();
    let destination = destination.as_ref();
    tracing::info!("Converting {} -> {}", source.display(), destination.display());

    let data = read_container(source)?;
    let extraction = extract_mesh(&data, options)?;

    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let obj = mesh_to_obj_bytes(&extraction, &name)?;

    let mut output = BufWriter::new(File::create(destination)?);
    output.write_all(&obj)?;
    output.flush()?;

    tracing::info!("File written to: {}", destination.display());
    Ok(extraction)
}

/// Convert a texture container to a DDS file.
///
/// # Errors
/// Returns an error if the container cannot be read, extraction fails, or
/// the destination cannot be written.
pub fn convert_texture_to_dds<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    options: &TextureOptions,
) -> Result<TextureExtraction> {
    let source = source.as_ref();
    let destination = destination.as_ref();
    tracing::info!("Converting {} -> {}", source.display(), destination.display());

    let data = read_container(source)?;
    let extraction = extract_texture(&data, options)?;

    let mut output = BufWriter::new(File::create(destination)?);
    output.write_all(&extraction.dds)?;
    output.flush()?;

    tracing::info!("File written to: {}", destination.display());
    Ok(extraction)
}

/// Header summary of a DDS file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DdsInfo {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    /// Legacy format name, if the pixel format maps to one.
    pub format: Option<String>,
    pub data_len: usize,
}

/// Parse a DDS file's header.
///
/// # Errors
/// Returns an error if the data is not a readable DDS file.
pub fn inspect_dds_bytes(data: &[u8]) -> Result<DdsInfo> {
    let dds = Dds::read(&mut std::io::Cursor::new(data))
        .map_err(|e| Error::InvalidDds(format!("Failed to parse DDS: {e}")))?;

    Ok(DdsInfo {
        width: dds.get_width(),
        height: dds.get_height(),
        mip_levels: dds.get_num_mipmap_levels(),
        format: dds.get_d3d_format().map(|f| format!("{f:?}")),
        data_len: dds.data.len(),
    })
}

/// Parse the header of the DDS file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a DDS file.
pub fn inspect_dds<P: AsRef<Path>>(path: P) -> Result<DdsInfo> {
    let data = read_container(path.as_ref())?;
    inspect_dds_bytes(&data)
}
