//! Face header blocks and triangle lists
//!
//! Face headers are 27-word records tagged with an `FF FF FF FF` sentinel,
//! laid out back to back, one per sub-mesh. The first header is found by
//! scanning for the sentinel and checking the anchor predicates; the rest
//! follow at a fixed stride until the sentinel stops repeating.
//!
//! Header words used:
//!
//! | Word | Meaning |
//! |------|---------|
//! | 0    | sentinel `0xFFFFFFFF` |
//! | 12   | highest vertex index (vertex count - 1) |
//! | 13   | index count (3 per triangle) |
//! | 22   | offset of the previous block (0 for the first) |
//! | 24   | byte length of the triangle list |
//!
//! Triangle lists are packed `u16` triples. The first list is not addressed
//! by its header and is located by searching for the triangle (0,1,2).
//! Later lists follow the previous one, with a 2-byte pad after a list of
//! odd length.

use super::options::MeshOptions;
use super::types::FaceSet;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Error, Result};
use crate::formats::scan::{find_next, read_u16_triple, read_u32, read_u32_array};

/// Face header sentinel.
pub const FACE_HEADER_TAG: [u8; 4] = [0xFF; 4];

/// Number of `u32` words in a face header.
pub const FACE_HEADER_WORDS: usize = 27;

/// Size of a face header in bytes.
pub const FACE_HEADER_SIZE: usize = FACE_HEADER_WORDS * 4;

/// Size of one triangle (three `u16` indices).
pub const TRIANGLE_SIZE: usize = 6;

/// Triangle (0,1,2) as packed little-endian `u16`s.
const FIRST_TRIANGLE: [u8; TRIANGLE_SIZE] = [0, 0, 1, 0, 2, 0];

/// Counts must fit in a `u16` index.
const MAX_COUNT: u64 = 0xFFFF;

/// How far a triangle's highest index may run ahead of all earlier ones.
const GROWTH_SLACK: u32 = 3;

/// A decoded face header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceHeader {
    words: [u32; FACE_HEADER_WORDS],
}

impl FaceHeader {
    /// Read the header at `offset`.
    pub fn read(bytes: &[u8], offset: usize) -> Result<Self> {
        Ok(Self {
            words: read_u32_array::<FACE_HEADER_WORDS>(bytes, offset)?,
        })
    }

    #[must_use]
    pub fn has_sentinel(&self) -> bool {
        self.words[0] == u32::MAX
    }

    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.words[13]
    }

    #[must_use]
    pub fn triangle_count(&self) -> u64 {
        u64::from(self.words[13] / 3)
    }

    #[must_use]
    pub fn vertex_count(&self) -> u64 {
        u64::from(self.words[12]) + 1
    }

    #[must_use]
    pub fn previous_block_offset(&self) -> u32 {
        self.words[22]
    }

    #[must_use]
    pub fn index_bytes(&self) -> u32 {
        self.words[24]
    }
}

/// A named header check.
pub type HeaderPredicate = (&'static str, fn(&FaceHeader) -> bool);

pub fn index_count_divisible(header: &FaceHeader) -> bool {
    header.index_count() % 3 == 0
}

pub fn triangle_count_in_range(header: &FaceHeader) -> bool {
    (1..=MAX_COUNT).contains(&header.triangle_count())
}

pub fn vertex_count_in_range(header: &FaceHeader) -> bool {
    (3..=MAX_COUNT).contains(&header.vertex_count())
}

pub fn is_first_block(header: &FaceHeader) -> bool {
    header.previous_block_offset() == 0
}

pub fn index_bytes_consistent(header: &FaceHeader) -> bool {
    u64::from(header.index_bytes()) == header.triangle_count() * TRIANGLE_SIZE as u64
}

/// Checks the first header of the region must pass.
pub const ANCHOR_CHECKS: [HeaderPredicate; 5] = [
    ("index count divisible by 3", index_count_divisible),
    ("triangle count in 1..=65535", triangle_count_in_range),
    ("vertex count in 3..=65535", vertex_count_in_range),
    ("previous block offset is 0", is_first_block),
    ("byte length is 6 x triangle count", index_bytes_consistent),
];

/// Find the first sentinel at or after `from` whose record passes every anchor check.
pub fn find_face_header(bytes: &[u8], from: usize, debug: bool) -> Result<usize> {
    let mut cursor = from;
    while let Some(offset) = find_next(bytes, &FACE_HEADER_TAG, cursor) {
        match FaceHeader::read(bytes, offset) {
            Ok(header) => match ANCHOR_CHECKS.iter().find(|(_, check)| !check(&header)) {
                None => return Ok(offset),
                Some((name, _)) => {
                    if debug {
                        tracing::debug!("Face header candidate at {offset:#x} rejected: {name}");
                    }
                }
            },
            Err(e) => {
                if debug {
                    tracing::debug!("Face header candidate at {offset:#x} rejected: {e}");
                }
            }
        }
        cursor = offset + 1;
    }

    Err(Error::FaceHeaderNotFound { search_start: from })
}

/// Why a triangle-list candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    /// Index of the offending triangle within the candidate run.
    pub triangle: usize,
    pub reason: &'static str,
}

pub fn index_below_vertex_count(max_index: u16, vertex_count: usize) -> bool {
    usize::from(max_index) < vertex_count
}

pub fn index_growth_bounded(max_index: u16, running_max: u16) -> bool {
    u32::from(max_index) <= u32::from(running_max) + GROWTH_SLACK
}

fn highest(triangle: [u16; 3]) -> u16 {
    triangle[0].max(triangle[1]).max(triangle[2])
}

/// Check that `triangles` records starting at `start` look like a real list.
pub fn validate_triangle_run(
    bytes: &[u8],
    start: usize,
    triangles: usize,
    vertex_count: usize,
) -> std::result::Result<(), Rejection> {
    let mut running_max = 0u16;
    for i in 0..triangles {
        let Ok(triangle) = read_u16_triple(bytes, start + i * TRIANGLE_SIZE) else {
            return Err(Rejection {
                triangle: i,
                reason: "runs past end of buffer",
            });
        };
        let max_index = highest(triangle);
        if !index_below_vertex_count(max_index, vertex_count) {
            return Err(Rejection {
                triangle: i,
                reason: "index not below vertex count",
            });
        }
        if !index_growth_bounded(max_index, running_max) {
            return Err(Rejection {
                triangle: i,
                reason: "index exceeds running max + 3",
            });
        }
        running_max = running_max.max(max_index);
    }
    Ok(())
}

/// Locate the first set's triangle list.
pub fn find_triangle_list(
    bytes: &[u8],
    from: usize,
    triangles: usize,
    vertex_count: usize,
    debug: bool,
) -> Result<usize> {
    let mut cursor = from;
    while let Some(candidate) = find_next(bytes, &FIRST_TRIANGLE, cursor) {
        match validate_triangle_run(bytes, candidate, triangles, vertex_count) {
            Ok(()) => {
                tracing::debug!("Found triangle list start: {candidate:#x}");
                return Ok(candidate);
            }
            Err(rejection) => {
                if debug {
                    tracing::debug!(
                        "Triangle list candidate at {candidate:#x} rejected at triangle {}: {}",
                        rejection.triangle,
                        rejection.reason
                    );
                }
            }
        }
        cursor = candidate + 1;
    }

    Err(Error::TriangleListNotFound {
        search_start: from,
        triangles,
        vertices: vertex_count,
    })
}

/// Address of the list that follows one of `previous_faces` triangles at `previous_address`.
#[must_use]
pub fn next_list_address(previous_address: usize, previous_faces: usize) -> usize {
    let pad = if previous_faces % 2 == 1 { 2 } else { 0 };
    previous_address + previous_faces * TRIANGLE_SIZE + pad
}

/// Validate a header's counts, returning (triangles, vertices).
fn checked_counts(header: &FaceHeader, set: usize) -> Result<(usize, usize)> {
    if !index_count_divisible(header) {
        return Err(Error::IndexCountNotDivisible {
            set,
            index_count: header.index_count(),
        });
    }
    if !triangle_count_in_range(header) || !vertex_count_in_range(header) {
        return Err(Error::InvalidFaceCounts {
            set,
            triangles: header.triangle_count(),
            vertices: header.vertex_count(),
        });
    }
    Ok((header.triangle_count() as usize, header.vertex_count() as usize))
}

fn read_triangles(
    bytes: &[u8],
    address: usize,
    triangles: usize,
    vertex_count: usize,
    set: usize,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<[u16; 3]>> {
    let mut list = Vec::with_capacity(triangles);
    let mut max_index = 0u16;

    for i in 0..triangles {
        let triangle = read_u16_triple(bytes, address + i * TRIANGLE_SIZE)?;
        let top = highest(triangle);
        if !index_below_vertex_count(top, vertex_count) {
            return Err(Error::FaceIndexOutOfRange {
                set,
                index: top,
                vertex_count,
            });
        }
        if i == 0 && triangle != [0, 1, 2] {
            diagnostics.warn(
                DiagnosticKind::UnexpectedFirstTriangle,
                format!(
                    "Expected start of faces to be (0,1,2), instead received ({}, {}, {}) for set {set}",
                    triangle[0], triangle[1], triangle[2]
                ),
            );
        }
        max_index = max_index.max(top);
        list.push(triangle);
    }

    if usize::from(max_index) + 1 < vertex_count {
        diagnostics.warn(
            DiagnosticKind::UnusedTrailingVertex,
            format!(
                "Max vert index ({}) less than vertex count ({vertex_count}) for set {set}",
                usize::from(max_index) + 1
            ),
        );
    }

    Ok(list)
}

/// Read every face set, starting from the anchored header region.
pub fn read_face_sets(
    bytes: &[u8],
    options: &MeshOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<FaceSet>> {
    let anchor = find_face_header(bytes, options.face_header_search_start, options.debug)?;
    tracing::debug!("Start of face header blocks: {anchor:#x}");

    let mut sets: Vec<FaceSet> = Vec::new();
    let mut pos = anchor;
    let mut global_offset = 1;

    while read_u32(bytes, pos).is_ok_and(|word| word == u32::MAX) {
        let header = FaceHeader::read(bytes, pos)?;
        let set = sets.len();
        let (triangles, vertex_count) = checked_counts(&header, set)?;

        let address = match sets.last() {
            Some(previous) => next_list_address(previous.address, previous.face_count()),
            None => find_triangle_list(
                bytes,
                options.face_list_search_start,
                triangles,
                vertex_count,
                options.debug,
            )?,
        };

        tracing::debug!(
            "Face ID: {set:2} Address: {address:#10x}  #Faces: {triangles:5}  #Verts: {vertex_count:5}"
        );

        let list = read_triangles(bytes, address, triangles, vertex_count, set, diagnostics)?;
        sets.push(FaceSet {
            address,
            triangles: list,
            vertex_count,
            global_offset,
        });

        global_offset += vertex_count;
        pos += FACE_HEADER_SIZE;
    }

    Ok(sets)
}
