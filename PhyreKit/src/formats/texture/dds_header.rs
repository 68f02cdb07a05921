//! DDS header construction
//!
//! Layout (all fields little-endian `u32`):
//!
//! ```text
//! "DDS " | size=124 | flags | height | width | pitch | depth | mips
//! reserved[11] | pixel format (32 bytes) | caps[4] | reserved
//! ```

use super::encoding::Encoding;
use crate::error::{Error, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// File magic.
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Size of magic plus header.
pub const DDS_HEADER_LEN: usize = 128;

const HEADER_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

/// Header `flags` bits.
pub mod flags {
    pub const CAPS: u32 = 0x1;
    pub const HEIGHT: u32 = 0x2;
    pub const WIDTH: u32 = 0x4;
    pub const PITCH: u32 = 0x8;
    pub const PIXEL_FORMAT: u32 = 0x1000;
    pub const MIP_MAP_COUNT: u32 = 0x2_0000;
    pub const LINEAR_SIZE: u32 = 0x8_0000;

    pub const REQUIRED: u32 = CAPS | HEIGHT | WIDTH | PIXEL_FORMAT | MIP_MAP_COUNT;
}

/// Header `caps` bits.
pub mod caps {
    pub const COMPLEX: u32 = 0x8;
    pub const TEXTURE: u32 = 0x1000;
    pub const MIP_MAP: u32 = 0x40_0000;
}

/// Pixel format `flags` bits.
pub mod pixel_flags {
    pub const ALPHA_PIXELS: u32 = 0x1;
    pub const FOURCC: u32 = 0x4;
    pub const RGB: u32 = 0x40;
}

/// Resolved parameters of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsParams {
    pub encoding: Encoding,
    pub width: u32,
    pub height: u32,
    pub mip_maps: u32,
}

impl DdsParams {
    /// Header flags for this encoding.
    #[must_use]
    pub fn flags(&self) -> u32 {
        if self.encoding.is_block_compressed() {
            flags::REQUIRED | flags::LINEAR_SIZE
        } else {
            flags::REQUIRED | flags::PITCH
        }
    }

    /// Linear size for block-compressed encodings, row pitch otherwise.
    ///
    /// # Errors
    /// Returns [`Error::PitchOverflow`] when the value does not fit the `u32` field.
    pub fn pitch_or_linear_size(&self) -> Result<u32> {
        let width = u64::from(self.width);
        let bpp = u64::from(self.encoding.bits_per_pixel());
        let value = if self.encoding.is_block_compressed() {
            width.div_ceil(4).max(1) * (bpp * 2)
        } else {
            (width * bpp).div_ceil(8)
        };
        u32::try_from(value).map_err(|_| Error::PitchOverflow {
            encoding: self.encoding.tag(),
            width: self.width,
            pitch: value,
        })
    }
}

fn write_pixel_format<W: Write>(writer: &mut W, encoding: Encoding) -> Result<()> {
    writer.write_u32::<LittleEndian>(PIXEL_FORMAT_SIZE)?;
    if encoding.is_block_compressed() {
        writer.write_u32::<LittleEndian>(pixel_flags::FOURCC)?;
        writer.write_all(encoding.tag().as_bytes())?;
        for _ in 0..5 {
            writer.write_u32::<LittleEndian>(0)?; // bit count and masks
        }
    } else {
        writer.write_u32::<LittleEndian>(pixel_flags::ALPHA_PIXELS | pixel_flags::RGB)?;
        writer.write_u32::<LittleEndian>(0)?;
        writer.write_u32::<LittleEndian>(encoding.bits_per_pixel())?;
        writer.write_u32::<LittleEndian>(0x00ff_0000)?;
        writer.write_u32::<LittleEndian>(0x0000_ff00)?;
        writer.write_u32::<LittleEndian>(0x0000_00ff)?;
        writer.write_u32::<LittleEndian>(0xff00_0000)?;
    }
    Ok(())
}

/// Write the 128-byte DDS header.
pub fn write_dds_header<W: Write>(writer: &mut W, params: &DdsParams) -> Result<()> {
    let pitch = params.pitch_or_linear_size()?;

    writer.write_all(DDS_MAGIC)?;
    writer.write_u32::<LittleEndian>(HEADER_SIZE)?;
    writer.write_u32::<LittleEndian>(params.flags())?;
    writer.write_u32::<LittleEndian>(params.height)?;
    writer.write_u32::<LittleEndian>(params.width)?;
    writer.write_u32::<LittleEndian>(pitch)?;
    writer.write_u32::<LittleEndian>(0)?; // depth
    writer.write_u32::<LittleEndian>(params.mip_maps)?;
    for _ in 0..11 {
        writer.write_u32::<LittleEndian>(0)?;
    }

    write_pixel_format(writer, params.encoding)?;

    writer.write_u32::<LittleEndian>(caps::COMPLEX | caps::TEXTURE | caps::MIP_MAP)?;
    for _ in 0..4 {
        writer.write_u32::<LittleEndian>(0)?; // caps2-4, reserved
    }
    Ok(())
}

/// Build the header into a new buffer.
pub fn build_dds_header(params: &DdsParams) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(DDS_HEADER_LEN);
    write_dds_header(&mut header, params)?;
    Ok(header)
}
