//! Byte-pattern search and fixed-width little-endian record reads
//!
//! Every locator in the mesh and texture decoders is built from
//! [`find_next`] plus a set of validation predicates. Searches are pure and
//! restartable: a rejected candidate resumes with `find_next(.., offset + 1)`.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use glam::{Vec2, Vec3};

/// Return the lowest offset `>= from` where `pattern` occurs in `bytes`.
#[must_use]
pub fn find_next(bytes: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    if pattern.is_empty() || from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| from + pos)
}

/// Borrow `len` bytes at `offset`, or fail with [`Error::Truncated`].
pub fn slice_at<'a>(
    bytes: &'a [u8],
    offset: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8]> {
    let available = bytes.len().saturating_sub(offset);
    if len > available {
        return Err(Error::Truncated {
            what,
            offset,
            needed: len,
            available,
        });
    }
    Ok(&bytes[offset..offset + len])
}

/// Read one little-endian `u32`.
pub fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    slice_at(bytes, offset, 4, "u32 word").map(LittleEndian::read_u32)
}

/// Read `N` consecutive little-endian `u32` words.
pub fn read_u32_array<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u32; N]> {
    let raw = slice_at(bytes, offset, N * 4, "u32 record")?;
    let mut words = [0u32; N];
    LittleEndian::read_u32_into(raw, &mut words);
    Ok(words)
}

/// Read three little-endian `u16` indices (one triangle).
pub fn read_u16_triple(bytes: &[u8], offset: usize) -> Result<[u16; 3]> {
    let raw = slice_at(bytes, offset, 6, "triangle")?;
    let mut tri = [0u16; 3];
    LittleEndian::read_u16_into(raw, &mut tri);
    Ok(tri)
}

/// Read `count` consecutive 2-float records starting at `offset`.
pub fn read_vec2s(bytes: &[u8], offset: usize, count: usize, what: &'static str) -> Result<Vec<Vec2>> {
    let raw = slice_at(bytes, offset, count * 8, what)?;
    Ok(raw
        .chunks_exact(8)
        .map(|c| Vec2::new(LittleEndian::read_f32(&c[0..4]), LittleEndian::read_f32(&c[4..8])))
        .collect())
}

/// Read `count` consecutive 3-float records starting at `offset`.
pub fn read_vec3s(bytes: &[u8], offset: usize, count: usize, what: &'static str) -> Result<Vec<Vec3>> {
    let raw = slice_at(bytes, offset, count * 12, what)?;
    Ok(raw
        .chunks_exact(12)
        .map(|c| {
            Vec3::new(
                LittleEndian::read_f32(&c[0..4]),
                LittleEndian::read_f32(&c[4..8]),
                LittleEndian::read_f32(&c[8..12]),
            )
        })
        .collect())
}
