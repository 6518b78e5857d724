//! Mesh file I/O for the meshpack pipeline.
//!
//! This crate reads and writes triangle meshes on their way into and out
//! of the compression pipeline:
//!
//! - **STL** (Stereolithography) - reads binary and ASCII, writes binary
//!
//! Decoding is buffer-oriented: files are read whole, then parsed from an
//! in-memory [`DecoderBuffer`]. The decoder tolerates the rough edges of
//! real-world STL - binary files whose header opens with `solid`, face
//! counts that disagree with the actual data, NaN vertices, and streams
//! that concatenate several ASCII solids.
//!
//! # Example
//!
//! ```no_run
//! use meshpack_io::{load_stl, save_stl};
//!
//! let mesh = load_stl("model.stl").unwrap();
//! save_stl(&mesh, "output.stl").unwrap();
//! ```
//!
//! # Format Detection
//!
//! [`load_mesh`] and [`save_mesh`] pick the format from the file
//! extension:
//!
//! ```no_run
//! use meshpack_io::load_mesh;
//!
//! let mesh = load_mesh("model.stl").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod buffer;
mod error;
mod stl;

pub use buffer::DecoderBuffer;
pub use error::{IoError, IoResult};
pub use stl::{decode_stl, encode_stl, load_stl, save_stl};

use std::path::Path;

use meshpack_types::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Reads binary and ASCII variants, writes binary.
    Stl,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            _ => None,
        }
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
        }
    }
}

fn format_for(path: &Path) -> IoResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if the format cannot be determined from the
/// extension, the file cannot be read, or its content is invalid.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    match format_for(path)? {
        MeshFormat::Stl => load_stl(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if the format cannot be determined from the
/// extension or the file cannot be written.
pub fn save_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match format_for(path)? {
        MeshFormat::Stl => save_stl(mesh, path),
    }
}
