//! Core mesh container for the meshpack pipeline.
//!
//! This crate provides the attribute-based triangle mesh the I/O and
//! quantization crates operate on:
//!
//! - [`Mesh`] - faces over a shared point pool plus numbered attributes
//! - [`PointAttribute`] - one attribute's values and its point mapping
//! - [`AttributeKind`], [`ScalarType`], [`AttributeElementType`] - tags
//!
//! # Storage Model
//!
//! A mesh is a face table into a pool of points. Each attribute stores a
//! flat run of `f32` components per value and resolves points to values
//! through an optional index map. Decoders emit one point per face corner
//! and then collapse duplicates with the two deduplication passes, which
//! is what turns a triangle soup into an indexed mesh.
//!
//! Components are `f32` because the formats this pipeline speaks (STL and
//! the downstream quantized encoding) are 32-bit on the wire. Attributes
//! with 3 components additionally expose their values as [`Point3`] /
//! [`Vector3`] at the math seams.
//!
//! # Example
//!
//! ```
//! use meshpack_types::{AttributeKind, Mesh, PointAttribute, ScalarType};
//!
//! let mut mesh = Mesh::new();
//! mesh.set_num_faces(1);
//! mesh.set_num_points(3);
//!
//! let mut positions = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
//! positions.resize(3);
//! positions.set_value(0, &[0.0, 0.0, 0.0]);
//! positions.set_value(1, &[1.0, 0.0, 0.0]);
//! positions.set_value(2, &[0.0, 1.0, 0.0]);
//! mesh.add_attribute(positions);
//! mesh.set_face(0, [0, 1, 2]);
//!
//! assert_eq!(mesh.num_points(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod attribute;
mod mesh;

pub use attribute::{AttributeElementType, AttributeKind, PointAttribute, ScalarType};
pub use mesh::Mesh;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
