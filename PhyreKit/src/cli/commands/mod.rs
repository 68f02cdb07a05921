use clap::Subcommand;
use std::path::PathBuf;

use crate::formats::texture::Encoding;

pub mod mesh;
pub mod texture;

/// Parse a byte offset given as `0x`-prefixed hex or decimal.
pub fn parse_address(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse::<usize>(),
    };
    parsed.map_err(|e| format!("Invalid address '{s}': {e}"))
}

fn parse_encoding(s: &str) -> Result<Encoding, String> {
    s.parse::<Encoding>().map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a mesh container to OBJ (summary only if no destination is given)
    Mesh {
        /// Source mesh container (.dae.phyre)
        source: PathBuf,

        /// Output OBJ file
        destination: Option<PathBuf>,

        /// Export vertex normals
        #[arg(short, long)]
        normals: bool,

        /// Keep UV V coordinates as stored instead of flipping them
        #[arg(long)]
        no_invert_v: bool,

        /// Offset to start searching for the face header
        #[arg(long, value_parser = parse_address, default_value = "0")]
        face_header_start: usize,

        /// Offset to start searching for the first triangle list
        #[arg(long, value_parser = parse_address, default_value = "0")]
        face_list_start: usize,

        /// Offset to start searching for the vertex header
        #[arg(long, value_parser = parse_address, default_value = "0")]
        vertex_header_start: usize,

        /// Start of vertex data (derived from the last triangle list if omitted)
        #[arg(long, value_parser = parse_address)]
        vertex_start: Option<usize>,

        /// Warn about vertices with any component above this magnitude
        #[arg(long, default_value_t = 1.0e3)]
        max_vertex: f32,

        /// Lower UV bound
        #[arg(long, default_value_t = -0.01, allow_hyphen_values = true)]
        uv_min: f32,

        /// Upper UV bound
        #[arg(long, default_value_t = 1.01)]
        uv_max: f32,

        /// Normal length tolerance
        #[arg(long, default_value_t = 1.0e-6)]
        normal_tolerance: f64,

        /// Silence value-range warnings
        #[arg(long)]
        no_warnings: bool,

        /// Maximum warnings per class
        #[arg(long, default_value_t = crate::diagnostics::DEFAULT_MAX_WARNINGS)]
        max_warnings: usize,

        /// Write the extraction summary to a JSON file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Extract a texture container to DDS
    Texture {
        /// Source texture container (.dds.phyre)
        source: PathBuf,

        /// Output DDS file
        destination: PathBuf,

        /// Force the pixel payload start
        #[arg(long, value_parser = parse_address)]
        start: Option<usize>,

        /// Force the width (requires --height)
        #[arg(long)]
        width: Option<u32>,

        /// Force the height (requires --width)
        #[arg(long)]
        height: Option<u32>,

        /// Force the encoding (DXT1, DXT3, DXT5, ARGB8)
        #[arg(short, long, value_parser = parse_encoding)]
        encoding: Option<Encoding>,

        /// Force the mip-map count
        #[arg(long)]
        mip_maps: Option<u32>,

        /// Maximum warnings per class
        #[arg(long, default_value_t = crate::diagnostics::DEFAULT_MAX_WARNINGS)]
        max_warnings: usize,

        /// Write the extraction summary to a JSON file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show header information of a DDS file
    #[command(name = "dds-info")]
    DdsInfo {
        /// DDS file
        path: PathBuf,

        /// Output to JSON file (prints to CLI if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, debug: bool) -> anyhow::Result<()> {
        match self {
            Commands::Mesh {
                source,
                destination,
                normals,
                no_invert_v,
                face_header_start,
                face_list_start,
                vertex_header_start,
                vertex_start,
                max_vertex,
                uv_min,
                uv_max,
                normal_tolerance,
                no_warnings,
                max_warnings,
                report,
            } => {
                let options = crate::formats::mesh::MeshOptions::new()
                    .with_normals(*normals)
                    .with_invert_uv_v(!*no_invert_v)
                    .with_face_header_search_start(*face_header_start)
                    .with_face_list_search_start(*face_list_start)
                    .with_vertex_header_search_start(*vertex_header_start)
                    .with_vertex_data_start(*vertex_start)
                    .with_max_vertex_magnitude(*max_vertex)
                    .with_uv_bounds(*uv_min, *uv_max)
                    .with_normal_tolerance(*normal_tolerance)
                    .with_show_warnings(!*no_warnings)
                    .with_max_warnings(*max_warnings)
                    .with_debug(debug);
                mesh::execute(source, destination.as_deref(), &options, report.as_deref())
            }
            Commands::Texture {
                source,
                destination,
                start,
                width,
                height,
                encoding,
                mip_maps,
                max_warnings,
                report,
            } => {
                let options = crate::formats::texture::TextureOptions {
                    payload_start: *start,
                    width: *width,
                    height: *height,
                    encoding: *encoding,
                    mip_maps: *mip_maps,
                    max_warnings: *max_warnings,
                    debug,
                };
                texture::convert(source, destination, &options, report.as_deref())
            }
            Commands::DdsInfo { path, output } => match output {
                Some(output) => texture::info_json(path, output),
                None => texture::info(path),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x1a68"), Ok(0x1a68));
        assert_eq!(parse_address("0XFF"), Ok(255));
        assert_eq!(parse_address("4096"), Ok(4096));
        assert!(parse_address("0xzz").is_err());
        assert!(parse_address("-1").is_err());
    }
}
