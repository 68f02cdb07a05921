//! Texture extraction over synthetic containers

mod common;

use byteorder::{ByteOrder, LittleEndian};
use common::{build_texture, payload};
use ddsfile::{D3DFormat, Dds};
use phyrekit::Error;
use phyrekit::converter::{convert_texture_to_dds, inspect_dds};
use phyrekit::diagnostics::DiagnosticKind;
use phyrekit::formats::texture::{Encoding, Provenance, TextureOptions, extract_texture};
use pretty_assertions::assert_eq;

fn header_word(dds: &[u8], index: usize) -> u32 {
    LittleEndian::read_u32(&dds[index * 4..index * 4 + 4])
}

#[test]
fn test_dxt1_scenario() {
    let data = payload(128 * 64 / 2);
    let built = build_texture("DXT1", 128, 64, 1, &data);
    let extraction = extract_texture(&built.bytes, &TextureOptions::default()).unwrap();

    assert_eq!(built.payload_start, built.tag_offset + 4 + 0x26);
    assert_eq!(extraction.report.payload_start, built.payload_start);
    assert_eq!(extraction.report.encoding, Encoding::Dxt1);
    assert_eq!(header_word(&extraction.dds, 5), (128 / 4) * 8);
    assert_eq!(&extraction.dds[128..], &data[..]);
    assert!(extraction.diagnostics.is_empty());

    let dds = Dds::read(&mut std::io::Cursor::new(&extraction.dds)).unwrap();
    assert_eq!(dds.get_width(), 128);
    assert_eq!(dds.get_height(), 64);
    assert_eq!(dds.get_num_mipmap_levels(), 1);
    assert_eq!(dds.get_d3d_format(), Some(D3DFormat::DXT1));
}

#[test]
fn test_header_per_encoding() {
    let cases = [
        ("DXT1", D3DFormat::DXT1, 0xA_1007, 64 / 4 * 8),
        ("DXT3", D3DFormat::DXT3, 0xA_1007, 64 / 4 * 16),
        ("DXT5", D3DFormat::DXT5, 0xA_1007, 64 / 4 * 16),
        ("ARGB8", D3DFormat::A8R8G8B8, 0x2_100F, 64 * 4),
    ];

    for (tag, format, flags, pitch) in cases {
        let built = build_texture(tag, 64, 32, 7, &payload(64));
        let extraction = extract_texture(&built.bytes, &TextureOptions::default()).unwrap();
        let dds = &extraction.dds;

        assert_eq!(&dds[0..4], b"DDS ", "{tag}");
        assert_eq!(header_word(dds, 1), 124, "{tag}");
        assert_eq!(header_word(dds, 2), flags, "{tag}");
        assert_eq!(header_word(dds, 3), 32, "{tag}");
        assert_eq!(header_word(dds, 4), 64, "{tag}");
        assert_eq!(header_word(dds, 5), pitch, "{tag}");
        assert_eq!(header_word(dds, 7), 7, "{tag}");
        assert_eq!(header_word(dds, 19), 32, "{tag}");
        assert_eq!(header_word(dds, 27), 0x40_1008, "{tag}");

        let parsed = Dds::read(&mut std::io::Cursor::new(dds)).unwrap();
        assert_eq!(parsed.get_d3d_format(), Some(format), "{tag}");
        assert_eq!(parsed.get_num_mipmap_levels(), 7, "{tag}");
    }
}

#[test]
fn test_width_without_height_is_fatal() {
    let options = TextureOptions {
        width: Some(256),
        ..TextureOptions::default()
    };
    assert!(matches!(
        extract_texture(&[], &options),
        Err(Error::IncompleteDimensions)
    ));

    let built = build_texture("DXT5", 256, 256, 9, &payload(64));
    assert!(matches!(
        extract_texture(&built.bytes, &options),
        Err(Error::IncompleteDimensions)
    ));
}

#[test]
fn test_overrides_skip_container_fields() {
    let data = payload(32);
    let mut bytes = b"DXT5".to_vec();
    bytes.extend(vec![0u8; 0x26]);
    bytes.extend_from_slice(&data);

    let options = TextureOptions::new().with_dimensions(16, 8).with_mip_maps(3);
    let extraction = extract_texture(&bytes, &options).unwrap();

    assert_eq!(extraction.report.width, 16);
    assert_eq!(extraction.report.height, 8);
    assert_eq!(extraction.report.dimensions_source, Provenance::Override);
    assert_eq!(extraction.report.mip_maps_source, Provenance::Override);
    assert_eq!(extraction.report.encoding_source, Provenance::Container);
    assert_eq!(&extraction.dds[128..], &data[..]);

    // mip count still comes from the container
    assert!(matches!(
        extract_texture(&bytes, &TextureOptions::new().with_dimensions(16, 8)),
        Err(Error::TextureHeaderNotFound { .. })
    ));
}

#[test]
fn test_forced_encoding_and_payload_start() {
    let built = build_texture("DXT5", 32, 32, 1, &payload(256));

    let forced = TextureOptions::new().with_encoding(Encoding::Argb8);
    assert!(matches!(
        extract_texture(&built.bytes, &forced),
        Err(Error::EncodingTagNotFound { tag: "ARGB8" })
    ));

    let start = built.payload_start + 16;
    let options = TextureOptions::new()
        .with_encoding(Encoding::Argb8)
        .with_payload_start(start);
    let extraction = extract_texture(&built.bytes, &options).unwrap();
    assert_eq!(extraction.report.encoding, Encoding::Argb8);
    assert_eq!(extraction.report.payload_start, start);
    assert_eq!(extraction.report.payload_start_source, Provenance::Override);
    assert_eq!(extraction.dds.len(), 128 + built.bytes.len() - start);

    let too_far = TextureOptions::new().with_payload_start(built.bytes.len() + 1);
    assert!(matches!(
        extract_texture(&built.bytes, &too_far),
        Err(Error::PayloadOutOfBounds { .. })
    ));
}

#[test]
fn test_missing_tag_is_fatal() {
    let mut built = build_texture("DXT1", 32, 32, 1, &payload(16));
    built.bytes[built.tag_offset] = b'Q';
    assert!(matches!(
        extract_texture(&built.bytes, &TextureOptions::default()),
        Err(Error::EncodingNotFound)
    ));
}

#[test]
fn test_dimension_diagnostics() {
    let built = build_texture("DXT5", 300, 8192, 20, &payload(16));
    let extraction = extract_texture(&built.bytes, &TextureOptions::default()).unwrap();

    let kinds: Vec<_> = extraction.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::NonPowerOfTwoWidth,
            DiagnosticKind::DimensionOutOfRange,
            DiagnosticKind::ExcessMipMaps,
        ]
    );
}

#[test]
fn test_dimension_diagnostics_use_forced_values() {
    let built = build_texture("DXT1", 64, 64, 1, &payload(16));
    let clean = extract_texture(&built.bytes, &TextureOptions::default()).unwrap();
    assert!(clean.diagnostics.is_empty());

    let options = TextureOptions::new().with_dimensions(48, 16);
    let forced = extract_texture(&built.bytes, &options).unwrap();
    let kinds: Vec<_> = forced.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::NonPowerOfTwoWidth]);
    assert_eq!(forced.report.mip_maps_source, Provenance::Container);
}

#[test]
fn test_convert_texture_to_dds_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("texture.dds.phyre");
    let destination = dir.path().join("texture.dds");
    let data = payload(64 * 64);
    let built = build_texture("DXT5", 64, 64, 1, &data);
    std::fs::write(&source, &built.bytes).unwrap();

    convert_texture_to_dds(&source, &destination, &TextureOptions::default()).unwrap();
    let first = std::fs::read(&destination).unwrap();
    convert_texture_to_dds(&source, &destination, &TextureOptions::default()).unwrap();
    let second = std::fs::read(&destination).unwrap();
    assert_eq!(first, second);

    let info = inspect_dds(&destination).unwrap();
    assert_eq!((info.width, info.height, info.mip_levels), (64, 64, 1));
    assert_eq!(info.format.as_deref(), Some("DXT5"));
    assert_eq!(info.data_len, data.len());
}

#[test]
fn test_failed_texture_conversion_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("broken.dds.phyre");
    let destination = dir.path().join("broken.dds");
    std::fs::write(&source, b"no tags here").unwrap();

    assert!(convert_texture_to_dds(&source, &destination, &TextureOptions::default()).is_err());
    assert!(!destination.exists());
}
