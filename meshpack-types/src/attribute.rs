//! Point attributes and their classification tags.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semantic meaning of an attribute's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeKind {
    /// 3D vertex position.
    Position,
    /// Surface normal direction.
    Normal,
    /// Per-point color.
    Color,
    /// Texture (UV) coordinate.
    TexCoord,
    /// Application-defined payload.
    Generic,
}

/// Declared storage type of a single attribute component.
///
/// The container keeps every component as `f32` in memory; the tag records
/// the width a downstream codec should encode the component with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScalarType {
    /// 32-bit IEEE-754 float.
    #[default]
    Float32,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
}

impl ScalarType {
    /// Encoded size of one component in bytes.
    #[must_use]
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::Uint8 => 1,
            Self::Uint16 => 2,
            Self::Float32 | Self::Uint32 => 4,
        }
    }
}

/// Granularity at which an attribute varies across the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeElementType {
    /// One value per vertex; all corners meeting at a vertex share it.
    #[default]
    Vertex,
    /// One value per face corner.
    Corner,
    /// One value per face.
    Face,
}

/// A numbered attribute of a [`Mesh`](crate::Mesh).
///
/// Values are stored as flat runs of `num_components` floats. Each mesh
/// point resolves to a value through an optional point-to-value index map:
/// until [`Mesh::deduplicate_attribute_values`](crate::Mesh::deduplicate_attribute_values)
/// builds an explicit map, point `i` reads value `i` directly.
///
/// # Example
///
/// ```
/// use meshpack_types::{AttributeKind, PointAttribute, ScalarType};
///
/// let mut att = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
/// att.resize(2);
/// att.set_value(0, &[1.0, 2.0, 3.0]);
/// att.set_value(1, &[4.0, 5.0, 6.0]);
///
/// assert_eq!(att.len(), 2);
/// assert_eq!(att.value(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointAttribute {
    kind: AttributeKind,
    num_components: usize,
    scalar_type: ScalarType,
    element_type: AttributeElementType,
    values: Vec<f32>,
    /// Point index to value index. `None` means the identity mapping.
    point_map: Option<Vec<u32>>,
}

impl PointAttribute {
    /// Create an empty attribute with the identity point mapping.
    ///
    /// # Panics
    ///
    /// Panics if `num_components` is zero.
    #[must_use]
    pub fn new(kind: AttributeKind, num_components: usize, scalar_type: ScalarType) -> Self {
        assert!(num_components > 0, "attribute needs at least one component");
        Self {
            kind,
            num_components,
            scalar_type,
            element_type: AttributeElementType::default(),
            values: Vec::new(),
            point_map: None,
        }
    }

    /// Semantic kind of this attribute.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Number of components per value.
    #[inline]
    #[must_use]
    pub const fn num_components(&self) -> usize {
        self.num_components
    }

    /// Declared component storage type.
    #[inline]
    #[must_use]
    pub const fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// Granularity tag of this attribute.
    #[inline]
    #[must_use]
    pub const fn element_type(&self) -> AttributeElementType {
        self.element_type
    }

    /// Set the granularity tag.
    #[inline]
    pub fn set_element_type(&mut self, element_type: AttributeElementType) {
        self.element_type = element_type;
    }

    /// Number of stored values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.num_components
    }

    /// Whether the attribute holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grow or shrink the value store to `num_values` entries.
    ///
    /// New entries are zero-filled.
    pub fn resize(&mut self, num_values: usize) {
        self.values.resize(num_values * self.num_components, 0.0);
    }

    /// Components of the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    #[must_use]
    pub fn value(&self, index: usize) -> &[f32] {
        let start = index * self.num_components;
        &self.values[start..start + self.num_components]
    }

    /// Overwrite the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or `components` has the wrong
    /// length.
    #[inline]
    pub fn set_value(&mut self, index: usize, components: &[f32]) {
        let start = index * self.num_components;
        self.values[start..start + self.num_components].copy_from_slice(components);
    }

    /// Value index the given mesh point resolves to.
    ///
    /// # Panics
    ///
    /// Panics if an explicit map exists and `point` is out of bounds.
    #[inline]
    #[must_use]
    pub fn value_index(&self, point: u32) -> u32 {
        self.point_map
            .as_ref()
            .map_or(point, |map| map[point as usize])
    }

    /// Components of the value the given mesh point resolves to.
    ///
    /// # Panics
    ///
    /// Panics if the resolved value index is out of bounds.
    #[inline]
    #[must_use]
    pub fn mapped_value(&self, point: u32) -> &[f32] {
        self.value(self.value_index(point) as usize)
    }

    /// The value at `index` as a 3D point.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the attribute has fewer than
    /// 3 components.
    #[inline]
    #[must_use]
    pub fn point3(&self, index: usize) -> Point3<f32> {
        let v = self.value(index);
        Point3::new(v[0], v[1], v[2])
    }

    /// The value the given mesh point resolves to, as a 3D vector.
    ///
    /// # Panics
    ///
    /// Panics if the resolved value index is out of bounds or the
    /// attribute has fewer than 3 components.
    #[inline]
    #[must_use]
    pub fn mapped_vector3(&self, point: u32) -> Vector3<f32> {
        let v = self.mapped_value(point);
        Vector3::new(v[0], v[1], v[2])
    }

    /// Overwrite the value at `index` with a vector's components.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the attribute does not have
    /// exactly 3 components.
    #[inline]
    pub fn set_vector3(&mut self, index: usize, v: &Vector3<f32>) {
        self.set_value(index, &[v.x, v.y, v.z]);
    }

    /// Unify bit-identical values behind the point map.
    ///
    /// Keeps the first occurrence of every distinct value, drops the rest,
    /// and rebuilds the point map over `num_points` points so every point
    /// still resolves to the same components as before. Comparison is by
    /// bit pattern, so distinct NaN payloads stay distinct and `-0.0` does
    /// not collapse into `0.0`.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: value indices are u32, attributes with >4B values are unsupported
    pub(crate) fn deduplicate_values(&mut self, num_points: usize) {
        let num_values = self.len();
        let mut unique: HashMap<Vec<u32>, u32> = HashMap::with_capacity(num_values);
        let mut remap: Vec<u32> = Vec::with_capacity(num_values);
        let mut deduped: Vec<f32> = Vec::with_capacity(self.values.len());

        for index in 0..num_values {
            let components = self.value(index);
            let key: Vec<u32> = components.iter().map(|c| c.to_bits()).collect();
            if let Some(&target) = unique.get(&key) {
                remap.push(target);
            } else {
                let target = unique.len() as u32;
                unique.insert(key, target);
                deduped.extend_from_slice(components);
                remap.push(target);
            }
        }

        if unique.len() == num_values {
            return;
        }

        let point_map = (0..num_points as u32)
            .map(|point| remap[self.value_index(point) as usize])
            .collect();
        self.values = deduped;
        self.point_map = Some(point_map);
    }

    /// Rebind the point map after mesh points were merged.
    ///
    /// `new_map[p]` must hold the value index for new point `p`.
    pub(crate) fn set_point_map(&mut self, new_map: Vec<u32>) {
        self.point_map = Some(new_map);
    }
}
