//! Resolution and mip-map count from the `PS3Data` block

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Error, Result};
use crate::formats::scan::{find_next, read_u32, read_u32_array};

/// Anchor for the texture header fields.
pub const HEADER_ANCHOR: &str = "PS3Data";

/// Mip-map count, relative to the anchor.
pub const MIP_COUNT_OFFSET: usize = 0x30;

/// Width then height, relative to the anchor.
pub const DIMENSIONS_OFFSET: usize = MIP_COUNT_OFFSET + 0x10;

/// Largest expected texture dimension.
pub const MAX_DIMENSION: u32 = 4096;

/// Fields stored in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub width: u32,
    pub height: u32,
    pub mip_maps: u32,
}

/// Read resolution and mip count from the container.
///
/// `debug` logs the anchor offset and the raw words read.
pub fn read_header_fields(bytes: &[u8], debug: bool) -> Result<HeaderFields> {
    let anchor = find_next(bytes, HEADER_ANCHOR.as_bytes(), 0).ok_or(Error::TextureHeaderNotFound {
        anchor: HEADER_ANCHOR,
    })?;
    if debug {
        tracing::debug!("Found {HEADER_ANCHOR} at {anchor:#x}");
    }

    let mip_offset = anchor + MIP_COUNT_OFFSET;
    let dimensions_offset = anchor + DIMENSIONS_OFFSET;
    let mip_maps = read_u32(bytes, mip_offset)?;
    let [width, height] = read_u32_array::<2>(bytes, dimensions_offset)?;
    if debug {
        tracing::debug!("Mip map word at {mip_offset:#x}: {mip_maps:#010x}");
        tracing::debug!(
            "Width/height words at {dimensions_offset:#x}: {width:#010x} {height:#010x}"
        );
    }

    Ok(HeaderFields {
        width,
        height,
        mip_maps,
    })
}

/// Smallest `n` with `2^n >= value`, for `value >= 1`.
#[must_use]
pub fn ceil_log2(value: u32) -> u32 {
    if value <= 1 {
        0
    } else {
        u32::BITS - (value - 1).leading_zeros()
    }
}

/// Record sanity warnings for a resolved resolution and mip count.
///
/// Runs on the values the DDS header is built from, so forced dimensions or
/// mip counts are checked in place of the container's fields.
pub fn check_dimensions(fields: &HeaderFields, diagnostics: &mut Diagnostics) {
    let HeaderFields {
        width,
        height,
        mip_maps,
    } = *fields;
    let largest = width.max(height);

    if !width.is_power_of_two() {
        diagnostics.warn(
            DiagnosticKind::NonPowerOfTwoWidth,
            format!("Width ({width}) not a power of 2"),
        );
    }
    if largest > MAX_DIMENSION {
        diagnostics.warn(
            DiagnosticKind::DimensionOutOfRange,
            format!("Large width or height ({width}x{height})"),
        );
    }
    if width.min(height) < 1 {
        diagnostics.warn(
            DiagnosticKind::DimensionOutOfRange,
            format!("Small width or height ({width}x{height})"),
        );
    }
    if largest > 0 && mip_maps > ceil_log2(largest) {
        diagnostics.warn(
            DiagnosticKind::ExcessMipMaps,
            format!(
                "More mipmaps than expected ({mip_maps} for {width}x{height}, at most {})",
                ceil_log2(largest)
            ),
        );
    }
}
