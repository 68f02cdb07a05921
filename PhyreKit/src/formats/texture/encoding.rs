//! Texture encodings and tag detection

use crate::error::{Error, Result};
use crate::formats::scan::find_next;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Distance from the end of an encoding tag to the pixel payload.
pub const PAYLOAD_OFFSET_PAST_TAG: usize = 0x26;

/// Pixel encoding of a texture container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Encoding {
    Dxt5,
    Dxt3,
    Dxt1,
    Argb8,
}

impl Encoding {
    /// Detection order.
    pub const PRIORITY: [Self; 4] = [Self::Dxt5, Self::Dxt3, Self::Dxt1, Self::Argb8];

    /// ASCII tag as it appears in the container.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Dxt5 => "DXT5",
            Self::Dxt3 => "DXT3",
            Self::Dxt1 => "DXT1",
            Self::Argb8 => "ARGB8",
        }
    }

    #[must_use]
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Dxt5 | Self::Dxt3 => 8,
            Self::Dxt1 => 4,
            Self::Argb8 => 32,
        }
    }

    /// Whether the encoding stores 4x4 pixel blocks.
    #[must_use]
    pub fn is_block_compressed(self) -> bool {
        !matches!(self, Self::Argb8)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|e| e.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownEncoding(s.to_string()))
    }
}

fn locate(bytes: &[u8], encoding: Encoding, debug: bool) -> Option<usize> {
    let tag = encoding.tag();
    let found = find_next(bytes, tag.as_bytes(), 0);
    if debug {
        match found {
            Some(offset) => tracing::debug!("Encoding tag {tag} found at {offset:#x}"),
            None => tracing::debug!("Encoding tag {tag} not found"),
        }
    }
    found.map(|offset| offset + tag.len() + PAYLOAD_OFFSET_PAST_TAG)
}

/// Find the container's encoding and the payload start it implies.
///
/// With `forced` set, only that encoding's tag is searched for. `debug` logs
/// every tag tried.
pub fn detect_encoding(
    bytes: &[u8],
    forced: Option<Encoding>,
    debug: bool,
) -> Result<(Encoding, usize)> {
    if let Some(encoding) = forced {
        return locate(bytes, encoding, debug)
            .map(|start| (encoding, start))
            .ok_or(Error::EncodingTagNotFound {
                tag: encoding.tag(),
            });
    }

    Encoding::PRIORITY
        .into_iter()
        .find_map(|encoding| locate(bytes, encoding, debug).map(|start| (encoding, start)))
        .ok_or(Error::EncodingNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn test_parse_encoding() {
        assert_eq!("dxt1".parse::<Encoding>().unwrap(), Encoding::Dxt1);
        assert_eq!("ARGB8".parse::<Encoding>().unwrap(), Encoding::Argb8);
        assert!(matches!(
            "BC7".parse::<Encoding>(),
            Err(Error::UnknownEncoding(name)) if name == "BC7"
        ));
    }

    #[test]
    fn test_priority_beats_position() {
        let mut data = vec![0u8; 16];
        data.extend_from_slice(b"DXT1");
        data.extend(vec![0u8; 32]);
        data.extend_from_slice(b"DXT5");
        data.extend(vec![0u8; 64]);

        assert_eq!(detect_encoding(&data, None, false).unwrap(), (Encoding::Dxt5, 52 + 4 + 0x26));
        assert_eq!(
            detect_encoding(&data, Some(Encoding::Dxt1), false).unwrap(),
            (Encoding::Dxt1, 16 + 4 + 0x26)
        );
    }

    #[test]
    fn test_missing_tags() {
        let data = vec![0u8; 64];
        assert!(matches!(detect_encoding(&data, None, false), Err(Error::EncodingNotFound)));
        assert!(matches!(
            detect_encoding(&data, Some(Encoding::Argb8), false),
            Err(Error::EncodingTagNotFound { tag: "ARGB8" })
        ));
    }

    #[test]
    fn test_debug_logs_each_tag_tried() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(b"DXT1");
        data.extend(vec![0u8; 64]);

        let (result, logs) = capture_logs(|| detect_encoding(&data, None, true));
        assert_eq!(result.unwrap(), (Encoding::Dxt1, 8 + 4 + 0x26));
        assert!(logs.contains("Encoding tag DXT5 not found"));
        assert!(logs.contains("Encoding tag DXT3 not found"));
        assert!(logs.contains("Encoding tag DXT1 found at 0x8"));
        assert!(!logs.contains("ARGB8"));

        let (_, quiet) = capture_logs(|| detect_encoding(&data, None, false));
        assert!(!quiet.contains("Encoding tag"));
    }
}
