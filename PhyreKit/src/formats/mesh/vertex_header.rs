//! Vertex attribute headers
//!
//! Each attribute plane of a vertex block is described by a 16-word record:
//! word 0 is the per-vertex byte size of the attribute, word 1 the vertex
//! count, and word 14 the byte length of the plane. Records for one block
//! sit back to back; the run ends at the first record whose vertex count
//! differs. Positions always come first, so a block's first record starts
//! with the marker `12` (three `f32`s).

use super::face_header::TRIANGLE_SIZE;
use super::options::MeshOptions;
use super::types::FaceSet;
use crate::error::{Error, Result};
use crate::formats::scan::{find_next, read_u32_array};

/// Word 0 of a position record.
pub const VERTEX_HEADER_MARKER: u32 = 12;

/// Number of `u32` words in a vertex header record.
pub const VERTEX_HEADER_WORDS: usize = 16;

/// Size of a vertex header record in bytes.
pub const VERTEX_HEADER_SIZE: usize = VERTEX_HEADER_WORDS * 4;

const DECLARED_LENGTH_WORD: usize = 14;

fn read_record(bytes: &[u8], offset: usize) -> Result<[u32; VERTEX_HEADER_WORDS]> {
    read_u32_array::<VERTEX_HEADER_WORDS>(bytes, offset)
}

/// Search pattern for the first set's position record.
fn header_pattern(vertex_count: usize) -> [u8; 8] {
    let mut pattern = [0u8; 8];
    pattern[..4].copy_from_slice(&VERTEX_HEADER_MARKER.to_le_bytes());
    pattern[4..].copy_from_slice(&(vertex_count as u32).to_le_bytes());
    pattern
}

/// Find the position record of the first vertex block.
pub fn find_vertex_header(
    bytes: &[u8],
    from: usize,
    vertex_count: usize,
    debug: bool,
) -> Result<usize> {
    let pattern = header_pattern(vertex_count);
    let declared = u64::from(VERTEX_HEADER_MARKER) * vertex_count as u64;

    let mut cursor = from;
    while let Some(offset) = find_next(bytes, &pattern, cursor) {
        match read_record(bytes, offset) {
            Ok(words) if u64::from(words[DECLARED_LENGTH_WORD]) == declared => return Ok(offset),
            Ok(words) => {
                if debug {
                    tracing::debug!(
                        "Vertex header candidate at {offset:#x} rejected: declared length {} != {declared}",
                        words[DECLARED_LENGTH_WORD]
                    );
                }
            }
            Err(e) => {
                if debug {
                    tracing::debug!("Vertex header candidate at {offset:#x} rejected: {e}");
                }
            }
        }
        cursor = offset + 1;
    }

    Err(Error::VertexHeaderNotFound {
        search_start: from,
        vertex_count,
    })
}

/// Total attribute bytes of the run starting at `offset`.
///
/// Returns the byte count and the offset of the first record past the run.
/// A record that would run past the buffer ends the run.
#[must_use]
pub fn run_block_size(bytes: &[u8], offset: usize, vertex_count: usize) -> (usize, usize) {
    let mut pos = offset;
    let mut size = 0usize;
    while let Ok(words) = read_record(bytes, pos) {
        if words[1] as usize != vertex_count {
            break;
        }
        size += words[0] as usize * words[1] as usize;
        pos += VERTEX_HEADER_SIZE;
    }
    (size, pos)
}

/// Resolve the start address of every set's vertex block.
///
/// Returns `face_sets.len() + 1` addresses; the last one marks the end of
/// the final block. Consecutive sets with the same vertex count share one
/// header run and split its size evenly.
pub fn resolve_vertex_addresses(
    bytes: &[u8],
    face_sets: &[FaceSet],
    options: &MeshOptions,
) -> Result<Vec<usize>> {
    let (Some(first), Some(last)) = (face_sets.first(), face_sets.last()) else {
        return Ok(Vec::new());
    };

    let anchor = find_vertex_header(
        bytes,
        options.vertex_header_search_start,
        first.vertex_count,
        options.debug,
    )?;
    tracing::debug!("Start of vertex header blocks: {anchor:#x}");

    let start = match options.vertex_data_start {
        Some(start) => {
            tracing::info!("User-supplied start address of vertices: {start:#x}");
            start
        }
        None => {
            let start = last.address + last.face_count() * TRIANGLE_SIZE;
            tracing::debug!("Computed start address of vertices: {start:#x}");
            start
        }
    };

    let mut addresses = Vec::with_capacity(face_sets.len() + 1);
    addresses.push(start);
    let mut pos = anchor;
    let mut set = 0;

    while set < face_sets.len() {
        let vertex_count = face_sets[set].vertex_count;
        let run = face_sets[set..]
            .iter()
            .take_while(|s| s.vertex_count == vertex_count)
            .count();
        if options.debug && run > 1 {
            tracing::debug!(
                "Sets {set}-{} have the same vertex count, assuming equal split",
                set + run - 1
            );
        }

        let marker = read_record(bytes, pos)?[0];
        if marker != VERTEX_HEADER_MARKER {
            return Err(Error::VertexHeaderWalkEnded {
                set,
                offset: pos,
                marker,
            });
        }

        let (size, next) = run_block_size(bytes, pos, vertex_count);
        if size == 0 {
            return Err(Error::EmptyVertexBlock { set, offset: pos });
        }

        let stride = size / run;
        for _ in 0..run {
            let previous = addresses[addresses.len() - 1];
            addresses.push(previous + stride);
            if options.debug {
                tracing::debug!(
                    "Set {set} has {} floats per vertex (header info at {pos:#x})",
                    stride / 4 / vertex_count
                );
            }
            set += 1;
        }
        pos = next;
    }

    Ok(addresses)
}
