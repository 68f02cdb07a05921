//! Texture container decoding
//!
//! A texture container carries an ASCII encoding tag a fixed distance before
//! its pixel payload and a `PS3Data` block holding resolution and mip count.
//! Extraction resolves those parameters (or takes them from
//! [`TextureOptions`]), builds a DDS header and appends the payload
//! verbatim.

mod dds_header;
mod encoding;
mod header_fields;
mod options;

pub use dds_header::{
    DDS_HEADER_LEN, DDS_MAGIC, DdsParams, build_dds_header, caps, flags, pixel_flags,
    write_dds_header,
};
pub use encoding::{Encoding, PAYLOAD_OFFSET_PAST_TAG, detect_encoding};
pub use header_fields::{
    HEADER_ANCHOR, HeaderFields, ceil_log2, check_dimensions, read_header_fields,
};
pub use options::TextureOptions;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};
use serde::Serialize;

/// Where a texture parameter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Container,
    Override,
}

impl Provenance {
    fn of<T>(value: Option<T>) -> Self {
        if value.is_some() {
            Self::Override
        } else {
            Self::Container
        }
    }
}

/// Summary of a texture extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureReport {
    pub encoding: Encoding,
    pub encoding_source: Provenance,
    pub payload_start: usize,
    pub payload_start_source: Provenance,
    pub payload_len: usize,
    pub width: u32,
    pub height: u32,
    pub dimensions_source: Provenance,
    pub mip_maps: u32,
    pub mip_maps_source: Provenance,
}

/// Result of a texture extraction.
#[derive(Debug, Clone)]
pub struct TextureExtraction {
    pub params: DdsParams,
    pub report: TextureReport,
    /// Complete DDS file contents.
    pub dds: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

fn resolve_encoding(bytes: &[u8], options: &TextureOptions) -> Result<(Encoding, usize)> {
    match (options.encoding, options.payload_start) {
        (Some(encoding), Some(start)) => Ok((encoding, start)),
        (forced, start) => {
            let (encoding, derived) = detect_encoding(bytes, forced, options.debug)?;
            tracing::debug!("Found {encoding} tag, payload at {derived:#x}");
            Ok((encoding, start.unwrap_or(derived)))
        }
    }
}

/// Decode a texture container into DDS file contents.
///
/// # Errors
/// Returns an error if only one of width/height is forced, if no encoding
/// tag or header anchor is found, or if the payload start lies past the end.
pub fn extract_texture(bytes: &[u8], options: &TextureOptions) -> Result<TextureExtraction> {
    if options.width.is_some() != options.height.is_some() {
        return Err(Error::IncompleteDimensions);
    }

    let mut diagnostics = Diagnostics::new(options.max_warnings);

    let (encoding, payload_start) = resolve_encoding(bytes, options)?;
    tracing::info!("Encoding: {encoding}");
    tracing::info!("DDS start address: {payload_start:#x}");

    let container = if options.width.is_none() || options.mip_maps.is_none() {
        Some(read_header_fields(bytes, options.debug)?)
    } else {
        None
    };

    let (width, height) = match (options.width, options.height, container) {
        (Some(width), Some(height), _) => {
            tracing::info!("User provided resolution: {width}x{height}");
            (width, height)
        }
        (_, _, Some(fields)) => {
            tracing::info!("Extracted resolution: {}x{}", fields.width, fields.height);
            (fields.width, fields.height)
        }
        _ => return Err(Error::IncompleteDimensions),
    };

    let mip_maps = match (options.mip_maps, container) {
        (Some(mip_maps), _) => {
            tracing::info!("User provided number of mip maps: {mip_maps}");
            mip_maps
        }
        (None, Some(fields)) => {
            tracing::info!("Number of mip maps: {}", fields.mip_maps);
            fields.mip_maps
        }
        (None, None) => 0,
    };

    let params = DdsParams {
        encoding,
        width,
        height,
        mip_maps,
    };
    check_dimensions(
        &HeaderFields {
            width,
            height,
            mip_maps,
        },
        &mut diagnostics,
    );

    let payload = bytes.get(payload_start..).ok_or(Error::PayloadOutOfBounds {
        start: payload_start,
        len: bytes.len(),
    })?;

    let mut dds = Vec::with_capacity(DDS_HEADER_LEN + payload.len());
    write_dds_header(&mut dds, &params)?;
    dds.extend_from_slice(payload);

    let report = TextureReport {
        encoding,
        encoding_source: Provenance::of(options.encoding),
        payload_start,
        payload_start_source: Provenance::of(options.payload_start),
        payload_len: payload.len(),
        width,
        height,
        dimensions_source: Provenance::of(options.width),
        mip_maps,
        mip_maps_source: Provenance::of(options.mip_maps),
    };

    Ok(TextureExtraction {
        params,
        report,
        dds,
        diagnostics: diagnostics.into_records(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    fn container() -> Vec<u8> {
        let mut data = b"PS3Data".to_vec();
        data.resize(0x48, 0);
        data[0x30..0x34].copy_from_slice(&1u32.to_le_bytes());
        data[0x40..0x44].copy_from_slice(&4u32.to_le_bytes());
        data[0x44..0x48].copy_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(b"DXT1");
        data.extend(vec![0u8; PAYLOAD_OFFSET_PAST_TAG + 8]);
        data
    }

    #[test]
    fn test_debug_option_enables_search_logging() {
        let data = container();

        let (result, logs) =
            capture_logs(|| extract_texture(&data, &TextureOptions::new().with_debug(true)));
        assert_eq!(result.unwrap().report.payload_start, 0x48 + 4 + 0x26);
        assert!(logs.contains("Encoding tag DXT5 not found"));
        assert!(logs.contains("Found PS3Data at 0x0"));

        let (_, quiet) = capture_logs(|| extract_texture(&data, &TextureOptions::default()));
        assert!(!quiet.contains("Encoding tag"));
        assert!(!quiet.contains("Found PS3Data"));
    }
}
