//! Synthetic container builders shared by the integration tests

#![allow(dead_code)]

use phyrekit::formats::mesh::face_header::{FACE_HEADER_SIZE, FACE_HEADER_WORDS};
use phyrekit::formats::mesh::vertex_header::VERTEX_HEADER_WORDS;

/// One sub-mesh of a synthetic mesh container.
#[derive(Debug, Clone)]
pub struct SubMesh {
    pub vertex_count: u32,
    pub triangles: Vec<[u16; 3]>,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl SubMesh {
    /// A strip of `vertex_count - 2` triangles covering every vertex, with
    /// small positions, unit normals and in-range UVs.
    pub fn strip(vertex_count: u32) -> Self {
        let triangles = (0..vertex_count as u16 - 2)
            .map(|i| [i, i + 1, i + 2])
            .collect();
        Self::with_triangles(vertex_count, triangles)
    }

    pub fn with_triangles(vertex_count: u32, triangles: Vec<[u16; 3]>) -> Self {
        let n = vertex_count as usize;
        Self {
            vertex_count,
            triangles,
            positions: (0..n).map(|i| [i as f32, 0.5, -1.0]).collect(),
            normals: vec![[0.0, 0.0, 1.0]; n],
            uvs: (0..n).map(|i| [0.25, i as f32 / n as f32]).collect(),
        }
    }

    pub fn with_positions(mut self, positions: Vec<[f32; 3]>) -> Self {
        self.positions = positions;
        self
    }
}

/// A built mesh container and the offsets of its parts.
#[derive(Debug, Clone)]
pub struct BuiltMesh {
    pub bytes: Vec<u8>,
    pub face_headers: Vec<usize>,
    pub face_lists: Vec<usize>,
    pub vertex_blocks: Vec<usize>,
}

impl BuiltMesh {
    /// Overwrite one word of a face header.
    pub fn patch_face_header(&mut self, set: usize, word: usize, value: u32) {
        let offset = self.face_headers[set] + word * 4;
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

fn push_words(out: &mut Vec<u8>, words: &[u32]) {
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
}

fn push_floats(out: &mut Vec<u8>, values: impl IntoIterator<Item = f32>) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

/// Build a mesh container.
///
/// Layout: a filler prefix, face headers, vertex header records, triangle
/// lists (2-byte pad after odd lists), then planar vertex blocks. With
/// `attributes` off, blocks hold positions only.
pub fn build_mesh(sets: &[SubMesh], attributes: bool) -> BuiltMesh {
    let mut bytes = vec![0xAB; 16];

    let mut face_headers = Vec::new();
    for (i, set) in sets.iter().enumerate() {
        face_headers.push(bytes.len());
        let triangles = set.triangles.len() as u32;
        let mut words = [0u32; FACE_HEADER_WORDS];
        words[0] = u32::MAX;
        words[12] = set.vertex_count - 1;
        words[13] = triangles * 3;
        words[22] = (i * FACE_HEADER_SIZE) as u32;
        words[24] = triangles * 6;
        push_words(&mut bytes, &words);
    }
    bytes.extend(vec![0u8; FACE_HEADER_SIZE]);

    let sizes: &[u32] = if attributes { &[12, 12, 8] } else { &[12] };
    for set in sets {
        for &size in sizes {
            let mut words = [0u32; VERTEX_HEADER_WORDS];
            words[0] = size;
            words[1] = set.vertex_count;
            words[14] = size * set.vertex_count;
            push_words(&mut bytes, &words);
        }
    }
    bytes.extend(vec![0u8; VERTEX_HEADER_WORDS * 4]);

    let mut face_lists = Vec::new();
    for (i, set) in sets.iter().enumerate() {
        face_lists.push(bytes.len());
        for index in set.triangles.iter().flatten() {
            bytes.extend_from_slice(&index.to_le_bytes());
        }
        if set.triangles.len() % 2 == 1 && i + 1 < sets.len() {
            bytes.extend_from_slice(&[0, 0]);
        }
    }

    let mut vertex_blocks = Vec::new();
    for set in sets {
        vertex_blocks.push(bytes.len());
        push_floats(&mut bytes, set.positions.iter().flatten().copied());
        if attributes {
            push_floats(&mut bytes, set.normals.iter().flatten().copied());
            push_floats(&mut bytes, set.uvs.iter().flatten().copied());
        }
    }
    vertex_blocks.push(bytes.len());

    BuiltMesh {
        bytes,
        face_headers,
        face_lists,
        vertex_blocks,
    }
}

/// A built texture container.
#[derive(Debug, Clone)]
pub struct BuiltTexture {
    pub bytes: Vec<u8>,
    pub tag_offset: usize,
    pub payload_start: usize,
}

/// Build a texture container with a `PS3Data` block, the encoding tag and
/// `payload`.
pub fn build_texture(tag: &str, width: u32, height: u32, mip_maps: u32, payload: &[u8]) -> BuiltTexture {
    let mut bytes = vec![0x11; 32];
    let anchor = bytes.len();
    bytes.extend_from_slice(b"PS3Data");
    bytes.resize(anchor + 0x48, 0);
    bytes[anchor + 0x30..anchor + 0x34].copy_from_slice(&mip_maps.to_le_bytes());
    bytes[anchor + 0x40..anchor + 0x44].copy_from_slice(&width.to_le_bytes());
    bytes[anchor + 0x44..anchor + 0x48].copy_from_slice(&height.to_le_bytes());
    bytes.extend(vec![0x22; 24]);

    let tag_offset = bytes.len();
    bytes.extend_from_slice(tag.as_bytes());
    bytes.extend(vec![0u8; 0x26]);
    let payload_start = bytes.len();
    bytes.extend_from_slice(payload);

    BuiltTexture {
        bytes,
        tag_offset,
        payload_start,
    }
}

/// Deterministic filler bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}
