//! Attribute-based triangle mesh.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AttributeKind, PointAttribute};

/// A triangle mesh over a shared pool of points.
///
/// Faces index into a set of points; every point resolves to one value in
/// each of the mesh's numbered [`PointAttribute`]s. Decoders typically
/// produce one point per face corner and then collapse duplicates with
/// [`deduplicate_attribute_values`](Self::deduplicate_attribute_values)
/// followed by [`deduplicate_point_ids`](Self::deduplicate_point_ids).
///
/// # Example
///
/// ```
/// use meshpack_types::{AttributeKind, Mesh, PointAttribute, ScalarType};
///
/// let mut mesh = Mesh::new();
/// mesh.set_num_faces(1);
/// mesh.set_num_points(3);
///
/// let mut positions = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
/// positions.resize(3);
/// positions.set_value(0, &[0.0, 0.0, 0.0]);
/// positions.set_value(1, &[1.0, 0.0, 0.0]);
/// positions.set_value(2, &[0.0, 1.0, 0.0]);
/// mesh.add_attribute(positions);
///
/// mesh.set_face(0, [0, 1, 2]);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    num_points: usize,
    faces: Vec<[u32; 3]>,
    attributes: Vec<PointAttribute>,
}

impl Mesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            num_points: 0,
            faces: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a mesh with face capacity pre-allocated.
    #[inline]
    #[must_use]
    pub fn with_capacity(num_faces: usize) -> Self {
        Self {
            num_points: 0,
            faces: Vec::with_capacity(num_faces),
            attributes: Vec::new(),
        }
    }

    /// Number of points in the shared pool.
    #[inline]
    #[must_use]
    pub const fn num_points(&self) -> usize {
        self.num_points
    }

    /// Resize the point pool.
    #[inline]
    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = num_points;
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Resize the face table; new faces are zero-filled.
    pub fn set_num_faces(&mut self, num_faces: usize) {
        self.faces.resize(num_faces, [0; 3]);
    }

    /// Point indices of the face at `index`, if in bounds.
    #[inline]
    #[must_use]
    pub fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    /// Overwrite the face at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn set_face(&mut self, index: usize, face: [u32; 3]) {
        self.faces[index] = face;
    }

    /// Iterate over all faces as point index triples.
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.faces.iter().copied()
    }

    /// Append an attribute and return its id.
    pub fn add_attribute(&mut self, attribute: PointAttribute) -> usize {
        self.attributes.push(attribute);
        self.attributes.len() - 1
    }

    /// Number of attributes.
    #[inline]
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Attribute by id, if in bounds.
    #[inline]
    #[must_use]
    pub fn attribute(&self, id: usize) -> Option<&PointAttribute> {
        self.attributes.get(id)
    }

    /// Mutable attribute by id, if in bounds.
    #[inline]
    pub fn attribute_mut(&mut self, id: usize) -> Option<&mut PointAttribute> {
        self.attributes.get_mut(id)
    }

    /// First attribute of the given kind.
    #[must_use]
    pub fn named_attribute(&self, kind: AttributeKind) -> Option<&PointAttribute> {
        self.attributes.iter().find(|att| att.kind() == kind)
    }

    /// First attribute of the given kind, mutably.
    pub fn named_attribute_mut(&mut self, kind: AttributeKind) -> Option<&mut PointAttribute> {
        self.attributes.iter_mut().find(|att| att.kind() == kind)
    }

    /// Collapse bit-identical values inside every attribute.
    ///
    /// Point identities are unchanged; each attribute's point map is rebuilt
    /// so every point still resolves to the same components.
    pub fn deduplicate_attribute_values(&mut self) {
        for attribute in &mut self.attributes {
            attribute.deduplicate_values(self.num_points);
        }
    }

    /// Merge points that resolve to the same value in every attribute.
    ///
    /// Faces are rewritten onto the surviving points. Run
    /// [`deduplicate_attribute_values`](Self::deduplicate_attribute_values)
    /// first; without it, points only merge when their value *indices*
    /// already coincide.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: point indices are u32, meshes with >4B points are unsupported
    pub fn deduplicate_point_ids(&mut self) {
        if self.attributes.is_empty() || self.num_points == 0 {
            return;
        }

        let mut unique: HashMap<Vec<u32>, u32> = HashMap::with_capacity(self.num_points);
        let mut remap: Vec<u32> = Vec::with_capacity(self.num_points);
        // Old point id that introduced each surviving point.
        let mut representatives: Vec<u32> = Vec::new();

        for point in 0..self.num_points as u32 {
            let signature: Vec<u32> = self
                .attributes
                .iter()
                .map(|att| att.value_index(point))
                .collect();
            match unique.entry(signature) {
                Entry::Occupied(entry) => remap.push(*entry.get()),
                Entry::Vacant(entry) => {
                    let id = representatives.len() as u32;
                    representatives.push(point);
                    entry.insert(id);
                    remap.push(id);
                }
            }
        }

        if representatives.len() == self.num_points {
            return;
        }

        for att in &mut self.attributes {
            let new_map: Vec<u32> = representatives
                .iter()
                .map(|&old_point| att.value_index(old_point))
                .collect();
            att.set_point_map(new_map);
        }
        for face in &mut self.faces {
            for point in face {
                *point = remap[*point as usize];
            }
        }
        self.num_points = representatives.len();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::ScalarType;

    /// Two triangles sharing an edge, stored as a six-point soup.
    fn shared_edge_soup() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.set_num_faces(2);
        mesh.set_num_points(6);

        let mut positions = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
        positions.resize(6);
        positions.set_value(0, &[0.0, 0.0, 0.0]);
        positions.set_value(1, &[1.0, 0.0, 0.0]);
        positions.set_value(2, &[0.0, 1.0, 0.0]);
        positions.set_value(3, &[1.0, 0.0, 0.0]);
        positions.set_value(4, &[1.0, 1.0, 0.0]);
        positions.set_value(5, &[0.0, 1.0, 0.0]);
        mesh.add_attribute(positions);

        mesh.set_face(0, [0, 1, 2]);
        mesh.set_face(1, [3, 4, 5]);
        mesh
    }

    #[test]
    fn named_attribute_lookup() {
        let mesh = shared_edge_soup();
        assert!(mesh.named_attribute(AttributeKind::Position).is_some());
        assert!(mesh.named_attribute(AttributeKind::Normal).is_none());
    }

    #[test]
    fn dedup_merges_shared_corners() {
        let mut mesh = shared_edge_soup();
        mesh.deduplicate_attribute_values();
        mesh.deduplicate_point_ids();

        // Four distinct corner positions survive out of six soup points.
        assert_eq!(mesh.num_points(), 4);
        assert_eq!(mesh.num_faces(), 2);

        let positions = mesh.named_attribute(AttributeKind::Position).unwrap();
        assert_eq!(positions.len(), 4);

        // The shared edge now references the same points from both faces.
        let f0 = mesh.face(0).unwrap();
        let f1 = mesh.face(1).unwrap();
        assert_eq!(f0[1], f1[0]);
        assert_eq!(f0[2], f1[2]);

        // Every face corner still resolves to its original coordinates.
        assert_eq!(positions.mapped_value(f0[0]), &[0.0, 0.0, 0.0]);
        assert_eq!(positions.mapped_value(f1[1]), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn dedup_point_ids_without_value_dedup_is_noop() {
        let mut mesh = shared_edge_soup();
        // Value indices are still the identity, so no two points coincide.
        mesh.deduplicate_point_ids();
        assert_eq!(mesh.num_points(), 6);
    }

    #[test]
    fn dedup_preserves_face_order() {
        let mut mesh = shared_edge_soup();
        mesh.deduplicate_attribute_values();
        mesh.deduplicate_point_ids();

        let positions = mesh.named_attribute(AttributeKind::Position).unwrap();
        let f0 = mesh.face(0).unwrap();
        assert_eq!(positions.mapped_value(f0[0]), &[0.0, 0.0, 0.0]);
        assert_eq!(positions.mapped_value(f0[1]), &[1.0, 0.0, 0.0]);
        assert_eq!(positions.mapped_value(f0[2]), &[0.0, 1.0, 0.0]);
    }
}
