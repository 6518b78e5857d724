//! Fixed-point grid parameters for a mesh's position attribute.

use meshpack_types::{AttributeKind, Mesh};
use tracing::debug;

use crate::error::{QuantizeError, QuantizeResult};

/// Smallest usable quantization bit width.
pub const MIN_QUANTIZATION_BITS: i32 = 1;

/// Largest bit width the downstream fixed-point encoding supports.
pub const MAX_QUANTIZATION_BITS: i32 = 30;

/// Parameters aligning a uniform grid with a mesh's bounding cube.
///
/// [`fill_from_mesh`](Self::fill_from_mesh) scans the position attribute
/// and derives the smallest bit width `bits` such that a grid of spacing
/// `grid_delta` over the positions' bounding cube is representable in
/// `bits`-bit fixed point. `min_corner` is the grid origin and `range` the
/// side length of the quantization cube; downstream encoders feed all
/// three into their explicit-quantization setup.
///
/// A freshly constructed value is unset (`bits == -1`); filling it a
/// second time discards the previous results.
///
/// # Example
///
/// ```
/// use meshpack_quantize::QuantizationParams;
/// use meshpack_types::{AttributeKind, Mesh, PointAttribute, ScalarType};
///
/// let mut positions = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
/// positions.resize(3);
/// positions.set_value(0, &[0.0, 0.0, -1.0]);
/// positions.set_value(1, &[0.0, 2.0, -1.0]);
/// positions.set_value(2, &[1.0, 0.0, -1.0]);
/// let mut mesh = Mesh::new();
/// mesh.set_num_points(3);
/// mesh.add_attribute(positions);
///
/// let mut params = QuantizationParams::new();
/// params.fill_from_mesh(&mesh, 1.0).unwrap();
///
/// assert_eq!(params.bits(), 2);
/// assert_eq!(params.range(), 3.0);
/// assert_eq!(params.min_corner(), [0.0, 0.0, -1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationParams {
    bits: i32,
    range: f32,
    min_corner: [f32; 3],
}

impl Default for QuantizationParams {
    fn default() -> Self {
        Self {
            bits: -1,
            range: 0.0,
            min_corner: [0.0; 3],
        }
    }
}

impl QuantizationParams {
    /// Create unset parameters.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`fill_from_mesh`](Self::fill_from_mesh) has run.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.bits != -1
    }

    /// Chosen bit width, or `-1` when unset.
    #[inline]
    #[must_use]
    pub const fn bits(&self) -> i32 {
        self.bits
    }

    /// Side length of the quantization cube.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Grid origin: the lowest observed coordinate per axis.
    #[inline]
    #[must_use]
    pub const fn min_corner(&self) -> [f32; 3] {
        self.min_corner
    }

    /// Derive parameters from the mesh's position attribute.
    ///
    /// The cube side starts as the largest axis span of the positions
    /// (quantization is uniform across axes) and, whenever the bit width
    /// lands inside `[1, 30]` unclamped, is widened to
    /// `grid_delta * (2^bits - 1)` so the grid tiles the cube exactly.
    /// Coincident positions get a unit cube, which still quantizes them
    /// all to one value.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative `grid_delta`, a mesh without
    /// position values, or a position attribute that is not 3-component.
    pub fn fill_from_mesh(&mut self, mesh: &Mesh, grid_delta: f32) -> QuantizeResult<()> {
        if grid_delta < 0.0 {
            return Err(QuantizeError::NegativeGridDelta);
        }
        let positions = mesh
            .named_attribute(AttributeKind::Position)
            .filter(|att| !att.is_empty())
            .ok_or(QuantizeError::MissingPositionAttribute)?;
        if positions.num_components() != 3 {
            return Err(QuantizeError::PositionComponentCount {
                found: positions.num_components(),
            });
        }

        let mut min_corner = positions.point3(0);
        let mut max_corner = min_corner;
        for index in 1..positions.len() {
            let point = positions.point3(index);
            min_corner.x = min_corner.x.min(point.x);
            min_corner.y = min_corner.y.min(point.y);
            min_corner.z = min_corner.z.min(point.z);
            max_corner.x = max_corner.x.max(point.x);
            max_corner.y = max_corner.y.max(point.y);
            max_corner.z = max_corner.z.max(point.z);
        }

        // Quantization is uniform across axes: the cube side is the
        // largest axis span of the bounding box.
        let span = max_corner - min_corner;
        let mut range = span.x.max(span.y).max(span.z);
        // All positions coincide; a unit cube still maps them to one value.
        if range == 0.0 {
            range = 1.0;
        }

        // An axis span of `range` at step `grid_delta` holds
        // range/grid_delta + 1 grid values; the width must cover them all.
        #[allow(clippy::cast_possible_truncation)]
        // Saturating cast: an infinite ratio (grid_delta == 0) hits the max clamp below
        let mut bits = ((range / grid_delta) + 1.0).log2().ceil() as i32;
        if bits > MAX_QUANTIZATION_BITS {
            bits = MAX_QUANTIZATION_BITS;
        } else if bits < MIN_QUANTIZATION_BITS {
            bits = MIN_QUANTIZATION_BITS;
        } else {
            // Widen the cube onto the grid: 2^bits - 1 whole steps per side.
            range = grid_delta * (2f32.powi(bits) - 1.0);
        }

        self.bits = bits;
        self.range = range;
        self.min_corner = min_corner.coords.into();
        debug!(bits, range, "computed quantization parameters");
        Ok(())
    }
}
