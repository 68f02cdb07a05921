//! CLI commands for mesh containers

use std::path::Path;

use crate::converter::convert_mesh_to_obj;
use crate::formats::mesh::{MeshOptions, MeshReport, extract_mesh};

fn hex(address: usize) -> String {
    format!("{address:#x}")
}

fn hex_or_dash(address: Option<usize>) -> String {
    address.map_or_else(|| "-".to_string(), hex)
}

fn print_summary(report: &MeshReport) {
    println!();
    println!("Summary");
    println!("=======");
    println!("Total sets:     {}", report.total_sets);
    println!("Total faces:    {}", report.total_faces);
    println!("Total vertices: {}", report.total_vertices);
    println!();
    println!("| ID | Faces | Verts | Face Addr | Vert Addr |   UV Addr | Norm Addr |");
    println!("|----|-------|-------|-----------|-----------|-----------|-----------|");
    for set in &report.sets {
        println!(
            "| {:2} | {:5} | {:5} | {:>9} | {:>9} | {:>9} | {:>9} |",
            set.id,
            set.faces,
            set.vertices,
            hex(set.face_address),
            hex(set.vertex_address),
            hex_or_dash(set.uv_address),
            hex_or_dash(set.normal_address),
        );
    }
}

/// Extract a mesh container, writing OBJ output if a destination is given.
pub fn execute(
    source: &Path,
    destination: Option<&Path>,
    options: &MeshOptions,
    report_path: Option<&Path>,
) -> anyhow::Result<()> {
    println!("Extracting mesh: {}", source.display());

    let extraction = match destination {
        Some(destination) => convert_mesh_to_obj(source, destination, options)?,
        None => {
            let data = std::fs::read(source)?;
            extract_mesh(&data, options)?
        }
    };

    let report = extraction.document.report();
    print_summary(&report);

    if !extraction.diagnostics.is_empty() {
        println!();
        println!("Diagnostics ({}):", extraction.diagnostics.len());
        for diagnostic in &extraction.diagnostics {
            println!("  {diagnostic}");
        }
    }

    if let Some(report_path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(report_path, json)?;
        println!("Report written to: {}", report_path.display());
    }

    if let Some(destination) = destination {
        println!("Written to: {}", destination.display());
    }
    Ok(())
}
