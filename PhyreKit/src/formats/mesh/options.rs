//! Options for mesh extraction

use crate::diagnostics::DEFAULT_MAX_WARNINGS;

/// Options for a single mesh extraction call.
///
/// Values are owned by the caller and passed by reference into every
/// locator and reader; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOptions {
    /// Offset to start searching for the first face header (default: 0)
    pub face_header_search_start: usize,
    /// Offset to start searching for the first triangle list (default: 0)
    pub face_list_search_start: usize,
    /// Offset to start searching for the vertex header (default: 0)
    pub vertex_header_search_start: usize,
    /// Start of the first vertex block.
    /// If None, the byte after the last triangle list is used
    pub vertex_data_start: Option<usize>,
    /// Export vertex normals (default: false)
    pub include_normals: bool,
    /// Store `1 - v` instead of `v` for texture coordinates (default: true)
    pub invert_uv_v: bool,
    /// Warn about vertices with any component above this magnitude (default: 1000)
    pub max_vertex_magnitude: f32,
    /// Warn about UV coordinates outside `[lo, hi]` (default: [-0.01, 1.01])
    pub uv_bounds: (f32, f32),
    /// Warn about normals whose length differs from 1 by more than this (default: 1e-6)
    pub normal_tolerance: f64,
    /// Emit value-range warnings for vertices, UVs and normals (default: true)
    pub show_warnings: bool,
    /// Maximum warnings recorded per class (default: 25)
    pub max_warnings: usize,
    /// Log every rejected search candidate (default: false)
    pub debug: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            face_header_search_start: 0,
            face_list_search_start: 0,
            vertex_header_search_start: 0,
            vertex_data_start: None,
            include_normals: false,
            invert_uv_v: true,
            max_vertex_magnitude: 1.0e3,
            uv_bounds: (-0.01, 1.01),
            normal_tolerance: 1.0e-6,
            show_warnings: true,
            max_warnings: DEFAULT_MAX_WARNINGS,
            debug: false,
        }
    }
}

impl MeshOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set where the face header search starts.
    #[must_use]
    pub fn with_face_header_search_start(mut self, offset: usize) -> Self {
        self.face_header_search_start = offset;
        self
    }

    /// Set where the triangle list search starts.
    #[must_use]
    pub fn with_face_list_search_start(mut self, offset: usize) -> Self {
        self.face_list_search_start = offset;
        self
    }

    /// Set where the vertex header search starts.
    #[must_use]
    pub fn with_vertex_header_search_start(mut self, offset: usize) -> Self {
        self.vertex_header_search_start = offset;
        self
    }

    /// Override the start of vertex data.
    #[must_use]
    pub fn with_vertex_data_start(mut self, offset: Option<usize>) -> Self {
        self.vertex_data_start = offset;
        self
    }

    /// Set whether normals are exported.
    #[must_use]
    pub fn with_normals(mut self, include: bool) -> Self {
        self.include_normals = include;
        self
    }

    /// Set whether the V coordinate is inverted.
    #[must_use]
    pub fn with_invert_uv_v(mut self, invert: bool) -> Self {
        self.invert_uv_v = invert;
        self
    }

    /// Set the vertex magnitude bound.
    #[must_use]
    pub fn with_max_vertex_magnitude(mut self, bound: f32) -> Self {
        self.max_vertex_magnitude = bound;
        self
    }

    /// Set the accepted UV range.
    #[must_use]
    pub fn with_uv_bounds(mut self, lo: f32, hi: f32) -> Self {
        self.uv_bounds = (lo, hi);
        self
    }

    /// Set the normal length tolerance.
    #[must_use]
    pub fn with_normal_tolerance(mut self, tolerance: f64) -> Self {
        self.normal_tolerance = tolerance;
        self
    }

    /// Set whether value-range warnings are emitted.
    #[must_use]
    pub fn with_show_warnings(mut self, show: bool) -> Self {
        self.show_warnings = show;
        self
    }

    /// Set the per-class warning cap.
    #[must_use]
    pub fn with_max_warnings(mut self, max: usize) -> Self {
        self.max_warnings = max;
        self
    }

    /// Enable candidate-level debug logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
