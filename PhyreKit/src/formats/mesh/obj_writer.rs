//! Wavefront OBJ serialization of a [`MeshDocument`]

use super::types::MeshDocument;
use crate::error::Result;
use std::io::Write;

/// Format a float as `d.dddddddde±XX`.
#[must_use]
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{value:.8e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

fn sci(value: f32) -> String {
    format_sci(f64::from(value))
}

/// Write `document` as OBJ text, titled `name`.
///
/// Vertex indices are one-based and global: each set's local indices are
/// shifted by the vertex count of every set before it.
pub fn write_obj<W: Write>(writer: &mut W, name: &str, document: &MeshDocument) -> Result<()> {
    writeln!(writer, "# {name}")?;
    writeln!(writer, "# Total vertices: {}", document.total_vertices())?;
    writeln!(writer, "# Total faces: {}", document.total_faces())?;

    writeln!(writer, "#\n# Vertices")?;
    for set in &document.vertex_sets {
        writeln!(
            writer,
            "# Starting Address: {:#x} ({} vertices)",
            set.address,
            set.positions.len()
        )?;
        for p in &set.positions {
            writeln!(writer, "v {} {} {}", sci(p.x), sci(p.y), sci(p.z))?;
        }
    }

    if let Some(uv_sets) = &document.uv_sets {
        writeln!(writer, "#\n# UV Maps")?;
        for set in uv_sets {
            writeln!(
                writer,
                "# Starting Address: {:#x} ({} UV vertices)",
                set.address,
                set.coords.len()
            )?;
            for uv in &set.coords {
                writeln!(writer, "vt {} {}", sci(uv.x), sci(uv.y))?;
            }
        }
    }

    if let Some(normal_sets) = &document.normal_sets {
        writeln!(writer, "#\n# Normals")?;
        for set in normal_sets {
            writeln!(
                writer,
                "# Starting Address: {:#x} ({} normals)",
                set.address,
                set.normals.len()
            )?;
            for n in &set.normals {
                writeln!(writer, "vn {} {} {}", sci(n.x), sci(n.y), sci(n.z))?;
            }
        }
    }

    let has_uvs = document.uv_sets.is_some();
    let has_normals = document.normal_sets.is_some();

    writeln!(writer, "#\n# Face indices")?;
    for (i, set) in document.face_sets.iter().enumerate() {
        writeln!(
            writer,
            "# Starting Address: {:#x} ({} faces, {} vertices)",
            set.address,
            set.face_count(),
            set.vertex_count
        )?;
        writeln!(writer, "g obj_{i}")?;

        for triangle in &set.triangles {
            let [a, b, c] = triangle.map(|index| usize::from(index) + set.global_offset);
            match (has_uvs, has_normals) {
                (false, false) => writeln!(writer, "f {a} {b} {c}")?,
                (true, false) => writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?,
                (false, true) => writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?,
                (true, true) => writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?,
            }
        }
    }

    Ok(())
}
