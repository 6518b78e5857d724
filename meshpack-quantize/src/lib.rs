//! Quantization preparation for meshpack position attributes.
//!
//! Downstream compression stores positions in fixed point over an
//! axis-aligned cube. This crate derives the three numbers that setup
//! needs from a mesh and a target grid spacing:
//!
//! - `bits` - the smallest width whose fixed-point lattice resolves the
//!   spacing,
//! - `range` - the side length of the quantization cube,
//! - `min_corner` - the cube's origin.
//!
//! When the width lands inside its working interval the cube is widened
//! onto the grid, so meshes whose coordinates already sit on a lattice of
//! the requested spacing survive compression bit-exactly.
//!
//! # Example
//!
//! ```
//! use meshpack_quantize::QuantizationParams;
//! use meshpack_types::{AttributeKind, Mesh, PointAttribute, ScalarType};
//!
//! let mut positions = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
//! positions.resize(2);
//! positions.set_value(0, &[0.0, 0.0, 0.0]);
//! positions.set_value(1, &[1.0, 7.0, 3.0]);
//! let mut mesh = Mesh::new();
//! mesh.set_num_points(2);
//! mesh.add_attribute(positions);
//!
//! let mut params = QuantizationParams::new();
//! params.fill_from_mesh(&mesh, 1.0).unwrap();
//! assert_eq!(params.bits(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;

pub use error::{QuantizeError, QuantizeResult};
pub use params::{QuantizationParams, MAX_QUANTIZATION_BITS, MIN_QUANTIZATION_BITS};
