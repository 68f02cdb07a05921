//! CLI commands for texture operations

use std::path::Path;

use crate::converter::{convert_texture_to_dds, inspect_dds};
use crate::formats::texture::TextureOptions;

/// Convert a texture container to DDS.
pub fn convert(
    source: &Path,
    destination: &Path,
    options: &TextureOptions,
    report_path: Option<&Path>,
) -> anyhow::Result<()> {
    println!("Extracting texture: {}", source.display());

    let extraction = convert_texture_to_dds(source, destination, options)?;
    let report = &extraction.report;

    println!();
    println!("Encoding:      {} ({:?})", report.encoding, report.encoding_source);
    println!(
        "Payload start: {:#x} ({:?}, {} bytes)",
        report.payload_start, report.payload_start_source, report.payload_len
    );
    println!(
        "Resolution:    {}x{} ({:?})",
        report.width, report.height, report.dimensions_source
    );
    println!("Mip maps:      {} ({:?})", report.mip_maps, report.mip_maps_source);

    for diagnostic in &extraction.diagnostics {
        println!("{diagnostic}");
    }

    if let Some(report_path) = report_path {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(report_path, json)?;
        println!("Report written to: {}", report_path.display());
    }

    println!("Written to: {}", destination.display());
    Ok(())
}

/// Show info about a DDS texture file
pub fn info(path: &Path) -> anyhow::Result<()> {
    let info = inspect_dds(path)?;

    println!("DDS Information: {}", path.display());
    println!();
    println!("Dimensions: {}x{}", info.width, info.height);
    println!("Mip levels: {}", info.mip_levels);
    match &info.format {
        Some(format) => println!("Format: {format} (D3D)"),
        None => println!("Format: Unknown"),
    }
    println!("Data size: {} bytes", info.data_len);

    Ok(())
}

/// Write DDS header info to a JSON file.
pub fn info_json(path: &Path, output: &Path) -> anyhow::Result<()> {
    let info = inspect_dds(path)?;
    let json = serde_json::to_string_pretty(&info)?;
    std::fs::write(output, json)?;

    println!("Written to: {}", output.display());
    Ok(())
}
