//! Options for texture extraction

use super::encoding::Encoding;
use crate::diagnostics::DEFAULT_MAX_WARNINGS;

/// Options for a single texture extraction call.
///
/// Every `None` field is derived from the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureOptions {
    /// Start of the pixel payload
    pub payload_start: Option<usize>,
    /// Forced width; must be given together with `height`
    pub width: Option<u32>,
    /// Forced height; must be given together with `width`
    pub height: Option<u32>,
    /// Forced encoding
    pub encoding: Option<Encoding>,
    /// Forced mip-map count
    pub mip_maps: Option<u32>,
    /// Maximum warnings recorded per class (default: 25)
    pub max_warnings: usize,
    /// Log every search step (default: false)
    pub debug: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            payload_start: None,
            width: None,
            height: None,
            encoding: None,
            mip_maps: None,
            max_warnings: DEFAULT_MAX_WARNINGS,
            debug: false,
        }
    }
}

impl TextureOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the payload start.
    #[must_use]
    pub fn with_payload_start(mut self, offset: usize) -> Self {
        self.payload_start = Some(offset);
        self
    }

    /// Force the resolution.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Force the encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Force the mip-map count.
    #[must_use]
    pub fn with_mip_maps(mut self, mip_maps: u32) -> Self {
        self.mip_maps = Some(mip_maps);
        self
    }

    /// Set the per-class warning cap.
    #[must_use]
    pub fn with_max_warnings(mut self, max: usize) -> Self {
        self.max_warnings = max;
        self
    }

    /// Enable search-level debug logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
