//! Error types for `PhyreKit`

use thiserror::Error;

/// The error type for `PhyreKit` operations.
///
/// Every variant is fatal: the extraction that raised it produces no output.
/// Non-fatal findings are reported through [`crate::diagnostics::Diagnostics`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Scanning Errors ====================
    /// A fixed-width record extends past the end of the buffer.
    #[error("truncated {what} at 0x{offset:x}: need {needed} bytes, {available} available")]
    Truncated {
        /// What was being read.
        what: &'static str,
        /// Offset of the read.
        offset: usize,
        /// Bytes required by the record.
        needed: usize,
        /// Bytes left in the buffer from `offset`.
        available: usize,
    },

    // ==================== Mesh Structure Errors ====================
    /// No face header passed the anchor predicates.
    #[error("face header block not found (searched from 0x{search_start:x})")]
    FaceHeaderNotFound {
        /// Offset the sentinel search started at.
        search_start: usize,
    },

    /// A face header declares an index count that is not a multiple of 3.
    #[error("face set {set}: index count {index_count} is not divisible by 3")]
    IndexCountNotDivisible {
        /// Face set index.
        set: usize,
        /// Raw index count from the header.
        index_count: u32,
    },

    /// A face header declares triangle or vertex counts outside the valid range.
    #[error(
        "face set {set}: unexpected number of triangles ({triangles}) or vertices ({vertices})"
    )]
    InvalidFaceCounts {
        /// Face set index.
        set: usize,
        /// Derived triangle count.
        triangles: u64,
        /// Derived vertex count.
        vertices: u64,
    },

    /// No (0,1,2) candidate passed the triangle-list validation.
    #[error(
        "triangle list start not found (searched from 0x{search_start:x} for {triangles} triangles over {vertices} vertices)"
    )]
    TriangleListNotFound {
        /// Offset the pattern search started at.
        search_start: usize,
        /// Triangle count of the first face set.
        triangles: usize,
        /// Vertex count of the first face set.
        vertices: usize,
    },

    /// A triangle references a vertex beyond the set's vertex count.
    #[error("face set {set}: vertex index {index} out of range (vertex count {vertex_count})")]
    FaceIndexOutOfRange {
        /// Face set index.
        set: usize,
        /// Offending local vertex index.
        index: u16,
        /// Vertex count of the set.
        vertex_count: usize,
    },

    /// No vertex header matched the first set's vertex count and byte length.
    #[error(
        "vertex header block not found (searched from 0x{search_start:x} for vertex count {vertex_count})"
    )]
    VertexHeaderNotFound {
        /// Offset the marker search started at.
        search_start: usize,
        /// Vertex count of the first face set.
        vertex_count: usize,
    },

    /// The vertex header walk ended before every face set had an address.
    #[error(
        "vertex header walk ended at 0x{offset:x} before face set {set} (marker {marker}, expected 12)"
    )]
    VertexHeaderWalkEnded {
        /// First face set left without an address.
        set: usize,
        /// Offset of the mismatching header.
        offset: usize,
        /// Marker word found instead.
        marker: u32,
    },

    /// A vertex header run declared no attribute bytes.
    #[error("face set {set}: vertex header at 0x{offset:x} declares an empty block")]
    EmptyVertexBlock {
        /// First face set of the run.
        set: usize,
        /// Offset of the run's first header.
        offset: usize,
    },

    // ==================== Texture Structure Errors ====================
    /// None of the known encoding tags appear in the container.
    #[error("texture encoding could not be found")]
    EncodingNotFound,

    /// A forced encoding's tag does not appear in the container.
    #[error("encoding tag {tag} not found in texture container")]
    EncodingTagNotFound {
        /// The forced encoding tag.
        tag: &'static str,
    },

    /// An encoding name is not one of the supported tags.
    #[error("unknown texture encoding: {0} (expected DXT1, DXT3, DXT5 or ARGB8)")]
    UnknownEncoding(String),

    /// The header-field anchor marker is missing.
    #[error("texture header anchor {anchor} not found")]
    TextureHeaderNotFound {
        /// The anchor marker searched for.
        anchor: &'static str,
    },

    /// Only one of width/height was overridden.
    #[error("width and height must be specified together")]
    IncompleteDimensions,

    /// The pitch or linear size of the resolved width does not fit the header field.
    #[error("{encoding} width {width} needs a pitch of {pitch} bytes, which does not fit in 32 bits")]
    PitchOverflow {
        /// Encoding tag.
        encoding: &'static str,
        /// Resolved width.
        width: u32,
        /// Computed pitch or linear size.
        pitch: u64,
    },

    /// The payload start lies beyond the end of the container.
    #[error("payload start 0x{start:x} is beyond the end of the container ({len} bytes)")]
    PayloadOutOfBounds {
        /// Resolved payload start.
        start: usize,
        /// Container length.
        len: usize,
    },

    // ==================== DDS Errors ====================
    /// A DDS file could not be parsed.
    #[error("invalid DDS file: {0}")]
    InvalidDds(String),
}

/// A specialized Result type for `PhyreKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
