//! STL (Stereolithography) file format support.
//!
//! Reads both ASCII and binary STL into an attribute mesh and writes
//! binary STL back out.
//!
//! # Format Detection
//!
//! The two formats share a leading byte pattern: binary files frequently
//! carry the bytes `solid` inside their 80-byte header. A `solid` prefix
//! therefore only makes a stream *tentatively* ASCII; it must also reach a
//! `facet` keyword within a few tokens of the solid line, otherwise the
//! stream is treated as binary. A stream that passes the probe but fails
//! facet parsing inside its first solid is re-read as binary too.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! All scalars are little-endian.
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! A stream may concatenate several solids; all of their facets land in
//! the output mesh.

use std::fs;
use std::path::Path;

use meshpack_types::{
    AttributeElementType, AttributeKind, Mesh, PointAttribute, ScalarType, Vector3,
};
use tracing::debug;

use crate::buffer::DecoderBuffer;
use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices + attribute).
const FACET_SIZE: usize = 50;

/// Tokens the probe may scan past the `solid` line before giving up on ASCII.
const PROBE_TOKEN_BUDGET: u32 = 4;

/// Outcome of probing the head of an STL stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StlFormat {
    Ascii,
    Binary { face_count: u32 },
}

/// One parsed facet: a normal and three corner positions.
#[derive(Debug, Clone, Copy)]
struct Facet {
    normal: Vector3<f32>,
    vertices: [Vector3<f32>; 3],
}

/// Load a mesh from an STL file.
///
/// Reads the whole file into memory and decodes it with [`decode_stl`],
/// auto-detecting ASCII vs binary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content is not
/// valid STL.
///
/// # Example
///
/// ```no_run
/// use meshpack_io::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("loaded {} faces", mesh.num_faces());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    decode_stl(&data)
}

/// Decode an STL stream held in memory.
///
/// The resulting mesh carries one vertex-level position attribute with
/// three `f32` components. Facet corners are emitted as a point soup and
/// then collapsed through the mesh's two deduplication passes, so shared
/// corners end up shared.
///
/// Non-finite vertex coordinates are repaired per facet by copying the
/// first finite vertex; a facet with no finite vertex at all fails the
/// decode.
///
/// # Errors
///
/// Returns an error for streams shorter than a format marker, truncated
/// binary facet records, malformed ASCII facet blocks in the first solid
/// that also fail binary re-reading, and facets whose every vertex is
/// non-finite.
pub fn decode_stl(data: &[u8]) -> IoResult<Mesh> {
    let mut buf = DecoderBuffer::new(data);
    let mut facets: Vec<Facet> = Vec::new();

    let binary_count = match probe_header(&mut buf, false)? {
        StlFormat::Binary { face_count } => Some(face_count),
        StlFormat::Ascii => collect_ascii_facets(&mut buf, &mut facets)?,
    };
    if let Some(face_count) = binary_count {
        facets.clear();
        // A lying face count must not drive the allocation.
        facets.reserve((face_count as usize).min(buf.remaining() / FACET_SIZE + 1));
        for _ in 0..face_count {
            facets.push(parse_binary_facet(&mut buf)?);
        }
    }
    debug!(
        num_faces = facets.len(),
        binary = binary_count.is_some(),
        "decoded STL stream"
    );
    build_mesh(&facets)
}

/// Determine whether the stream at the cursor is ASCII or binary STL.
///
/// On `Ascii` the cursor is left immediately before the first `facet`
/// token; on `Binary` it is left after the face count at offset 84. With
/// `force_binary` the ASCII probe is skipped entirely.
fn probe_header(buf: &mut DecoderBuffer<'_>, force_binary: bool) -> IoResult<StlFormat> {
    buf.skip_whitespace();
    let tentatively_ascii = if force_binary {
        false
    } else {
        let head = buf.read_bytes(5).ok_or(IoError::InvalidStlHeader)?;
        head == b"solid"
    };
    if tentatively_ascii {
        // A genuine ASCII file reaches `facet` immediately or right after
        // an optional solid-name token. Binary garbage dressed up with a
        // `solid` prefix exhausts the token budget instead.
        let mut tokens_scanned = 0;
        loop {
            buf.skip_whitespace();
            let mark = buf.position();
            let Some(token) = buf.next_token() else {
                return Err(IoError::MissingFaceData);
            };
            if tokens_scanned > PROBE_TOKEN_BUDGET {
                break;
            }
            tokens_scanned += 1;
            if token == b"facet" {
                buf.set_position(mark);
                return Ok(StlFormat::Ascii);
            }
        }
    }
    buf.set_position(HEADER_SIZE);
    let face_count = buf.read_u32().ok_or(IoError::InvalidBinaryHeader)?;
    Ok(StlFormat::Binary { face_count })
}

/// Accumulate facets from one or more ASCII solids.
///
/// Returns `None` when the stream stayed ASCII, or the binary face count
/// when a parse failure in the *first* solid demoted the whole stream to
/// binary. A failure in any later solid terminates the scan cleanly with
/// everything collected so far; falling back to binary mid-stream would
/// re-read facets already accepted.
fn collect_ascii_facets(
    buf: &mut DecoderBuffer<'_>,
    facets: &mut Vec<Facet>,
) -> IoResult<Option<u32>> {
    let mut first_solid = true;
    loop {
        loop {
            match parse_ascii_facet(buf) {
                Ok(Some(facet)) => facets.push(facet),
                Ok(None) => break,
                Err(_) if first_solid => {
                    return match probe_header(buf, true)? {
                        StlFormat::Binary { face_count } => Ok(Some(face_count)),
                        StlFormat::Ascii => Err(IoError::InvalidBinaryHeader),
                    };
                }
                Err(_) => return Ok(None),
            }
        }
        // `endsolid` reached: look for a further solid in the same stream.
        if buf.remaining() < 5 {
            return Ok(None);
        }
        match probe_header(buf, false) {
            Ok(StlFormat::Ascii) => first_solid = false,
            Ok(StlFormat::Binary { .. }) | Err(_) => return Ok(None),
        }
    }
}

/// Read one 50-byte binary facet record at the cursor.
fn parse_binary_facet(buf: &mut DecoderBuffer<'_>) -> IoResult<Facet> {
    let mut scratch = [0.0f32; 12];
    for slot in &mut scratch {
        *slot = buf.read_f32().ok_or(IoError::IncompleteFacet)?;
    }
    // Attribute byte count; ignored.
    buf.advance(2);
    Ok(Facet {
        normal: Vector3::new(scratch[0], scratch[1], scratch[2]),
        vertices: [
            Vector3::new(scratch[3], scratch[4], scratch[5]),
            Vector3::new(scratch[6], scratch[7], scratch[8]),
            Vector3::new(scratch[9], scratch[10], scratch[11]),
        ],
    })
}

/// Parse one ASCII facet block at the cursor.
///
/// Returns `Ok(None)` when the next token is `endsolid`.
fn parse_ascii_facet(buf: &mut DecoderBuffer<'_>) -> IoResult<Option<Facet>> {
    let token = buf.next_token().ok_or(IoError::InvalidFacet)?;
    if token == b"endsolid" {
        return Ok(None);
    }
    if token != b"facet" {
        return Err(IoError::InvalidFacet);
    }
    expect_keyword(buf, b"normal")?;
    let normal = parse_vector(buf)?;
    expect_keyword(buf, b"outer")?;
    expect_keyword(buf, b"loop")?;
    let mut vertices = [Vector3::zeros(); 3];
    for vertex in &mut vertices {
        expect_keyword(buf, b"vertex")?;
        *vertex = parse_vector(buf)?;
    }
    expect_keyword(buf, b"endloop")?;
    expect_keyword(buf, b"endfacet")?;
    Ok(Some(Facet { normal, vertices }))
}

fn expect_keyword(buf: &mut DecoderBuffer<'_>, keyword: &[u8]) -> IoResult<()> {
    match buf.next_token() {
        Some(token) if token == keyword => Ok(()),
        _ => Err(IoError::InvalidFacet),
    }
}

/// Parse three whitespace-delimited float tokens.
fn parse_vector(buf: &mut DecoderBuffer<'_>) -> IoResult<Vector3<f32>> {
    let mut components = [0.0f32; 3];
    for component in &mut components {
        let token = buf.next_token().ok_or(IoError::InvalidFloat)?;
        *component = std::str::from_utf8(token)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(IoError::InvalidFloat)?;
    }
    Ok(Vector3::new(components[0], components[1], components[2]))
}

/// Replace non-finite vertices with the first finite vertex of the facet.
///
/// Normals are never sanitized: orientation lives in the winding order,
/// so a NaN normal is carried through uninterpreted.
fn sanitize_vertices(vertices: [Vector3<f32>; 3]) -> IoResult<[Vector3<f32>; 3]> {
    let finite = vertices.map(|v| v.iter().all(|c| c.is_finite()));
    if finite == [true; 3] {
        return Ok(vertices);
    }
    let Some(replacement) = (0..3).find(|&i| finite[i]).map(|i| vertices[i]) else {
        return Err(IoError::AllVerticesNonFinite);
    };
    let mut repaired = vertices;
    for (vertex, is_finite) in repaired.iter_mut().zip(finite) {
        if !is_finite {
            *vertex = replacement;
        }
    }
    Ok(repaired)
}

/// Assemble the decoded facets into an attribute mesh.
#[allow(clippy::cast_possible_truncation)]
// Truncation: point indices are u32, meshes with >4B corners are unsupported
fn build_mesh(facets: &[Facet]) -> IoResult<Mesh> {
    let num_faces = facets.len();
    let mut mesh = Mesh::with_capacity(num_faces);
    mesh.set_num_faces(num_faces);
    mesh.set_num_points(num_faces * 3);

    let mut positions = PointAttribute::new(AttributeKind::Position, 3, ScalarType::Float32);
    positions.set_element_type(AttributeElementType::Vertex);
    positions.resize(num_faces * 3);

    for (face_index, facet) in facets.iter().enumerate() {
        let vertices = sanitize_vertices(facet.vertices)?;
        let base = face_index * 3;
        for (corner, vertex) in vertices.iter().enumerate() {
            positions.set_vector3(base + corner, vertex);
        }
        mesh.set_face(face_index, [base as u32, base as u32 + 1, base as u32 + 2]);
    }

    mesh.add_attribute(positions);
    mesh.deduplicate_attribute_values();
    mesh.deduplicate_point_ids();
    Ok(mesh)
}

/// Serialize a mesh as binary STL.
///
/// Faces are written in face-index order. When the mesh carries a
/// non-empty 3-component normal attribute, each facet's normal is the
/// value mapped from the face's first point; otherwise the normal is
/// synthesized from the corner positions.
///
/// # Errors
///
/// Returns an error when the mesh has no position values, the position
/// attribute is not 3-component, or the face count does not fit the
/// format's 4-byte counter.
pub fn encode_stl(mesh: &Mesh) -> IoResult<Vec<u8>> {
    let positions = mesh
        .named_attribute(AttributeKind::Position)
        .filter(|att| !att.is_empty())
        .ok_or(IoError::MissingPositionAttribute)?;
    if positions.num_components() != 3 {
        return Err(IoError::invalid_content(
            "position attribute must have 3 components",
        ));
    }
    let normals = mesh
        .named_attribute(AttributeKind::Normal)
        .filter(|att| !att.is_empty() && att.num_components() == 3);
    let face_count = u32::try_from(mesh.num_faces()).map_err(|_| IoError::FaceCountOverflow)?;

    let mut out = Vec::with_capacity(HEADER_SIZE + 4 + mesh.num_faces() * FACET_SIZE);

    // The 80-byte header carries no mandated content; pad a short preamble.
    let mut header = [b' '; HEADER_SIZE];
    let preamble: &[u8] = b"Binary STL written by meshpack; corners ordered for grid quantization.";
    header[..preamble.len()].copy_from_slice(preamble);
    out.extend_from_slice(&header);
    out.extend_from_slice(&face_count.to_le_bytes());

    for face in mesh.faces() {
        let corners = face.map(|point| positions.mapped_vector3(point));
        let normal = match normals {
            Some(att) => att.mapped_vector3(face[0]),
            // This cross order is the winding convention decoders assume;
            // degenerate faces produce a non-finite normal, uninterpreted
            // downstream.
            None => (corners[2] - corners[1])
                .cross(&(corners[0] - corners[1]))
                .normalize(),
        };
        write_vector(&mut out, &normal);
        for corner in &corners {
            write_vector(&mut out, corner);
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    debug!(num_faces = mesh.num_faces(), "encoded binary STL");
    Ok(out)
}

/// Save a mesh to a binary STL file.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use meshpack_io::{load_stl, save_stl};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl").unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P) -> IoResult<()> {
    let bytes = encode_stl(mesh)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_vector(out: &mut Vec<u8>, v: &Vector3<f32>) {
    for component in v.iter() {
        out.extend_from_slice(&component.to_le_bytes());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Serialize facets (`[normal, v0, v1, v2]` each) as a binary STL stream.
    fn binary_stl(facets: &[[[f32; 3]; 4]]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_SIZE];
        out.extend_from_slice(&u32::try_from(facets.len()).unwrap().to_le_bytes());
        for facet in facets {
            for vector in facet {
                for component in vector {
                    out.extend_from_slice(&component.to_le_bytes());
                }
            }
            out.extend_from_slice(&[0, 0]);
        }
        out
    }

    /// The twelve facets of the unit cube, normals zeroed.
    fn cube_facets() -> Vec<[[f32; 3]; 4]> {
        let corners: [[f32; 3]; 8] = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        let faces: [[usize; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        faces
            .iter()
            .map(|&[a, b, c]| [[0.0; 3], corners[a], corners[b], corners[c]])
            .collect()
    }

    fn positions_of(mesh: &Mesh) -> &PointAttribute {
        mesh.named_attribute(AttributeKind::Position).unwrap()
    }

    #[test]
    fn decode_binary_triangle() {
        let data = binary_stl(&[[
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);
        let mesh = decode_stl(&data).unwrap();

        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_points(), 3);
        let positions = positions_of(&mesh);
        assert_eq!(positions.element_type(), AttributeElementType::Vertex);
        let face = mesh.face(0).unwrap();
        assert_eq!(positions.mapped_value(face[1]), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn decode_binary_cube_shares_corners() {
        let mesh = decode_stl(&binary_stl(&cube_facets())).unwrap();
        assert_eq!(mesh.num_faces(), 12);
        // 36 soup corners collapse onto the cube's 8 distinct vertices.
        assert_eq!(mesh.num_points(), 8);
    }

    #[test]
    fn decode_ascii_solid() {
        let data = br#"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test"#;
        let mesh = decode_stl(data).unwrap();
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_points(), 3);
    }

    #[test]
    fn decode_ascii_without_solid_name() {
        let data = b"solid\nfacet normal 0 0 0\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid\n";
        let mesh = decode_stl(data).unwrap();
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn decode_ascii_scientific_notation() {
        let data = b"solid s\nfacet normal 0 0 0\nouter loop\nvertex 1.5e1 -2.5E-1 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid s\n";
        let mesh = decode_stl(data).unwrap();
        let positions = positions_of(&mesh);
        let face = mesh.face(0).unwrap();
        assert_eq!(positions.mapped_value(face[0]), &[15.0, -0.25, 0.0]);
    }

    #[test]
    fn decode_multi_solid_collects_all_facets() {
        let one = "facet normal 0 0 0\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\n";
        let data = format!(
            "solid a\n{one}{one}endsolid\nsolid b\n{one}endsolid\n"
        );
        let mesh = decode_stl(data.as_bytes()).unwrap();
        assert_eq!(mesh.num_faces(), 3);
    }

    #[test]
    fn broken_later_solid_keeps_collected_faces() {
        let one = "facet normal 0 0 0\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\n";
        let data = format!(
            "solid a\n{one}endsolid\nsolid b\nfacet normal 0 0 0\nouter loop\nvertex oops\n"
        );
        let mesh = decode_stl(data.as_bytes()).unwrap();
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn broken_first_solid_falls_back_to_binary() {
        // Too short to carry a binary face count either, so the fallback
        // surfaces the binary header error rather than the ASCII one.
        let data = b"solid s\nfacet normal 0 0 0\nouter loop\nvertex 0 0 0\nendloop\nendfacet\n";
        let err = decode_stl(data).unwrap_err();
        assert!(matches!(err, IoError::InvalidBinaryHeader));
    }

    #[test]
    fn binary_with_solid_header_decodes_as_binary() {
        let mut data = binary_stl(&cube_facets());
        let label = b"solid binary lookalike model v2 build 7";
        data[..label.len()].copy_from_slice(label);
        let mesh = decode_stl(&data).unwrap();
        assert_eq!(mesh.num_faces(), 12);
    }

    #[test]
    fn solid_facet_header_still_decodes_as_binary() {
        // The probe is fooled (it sees `facet` within its token budget) but
        // facet parsing fails immediately, which re-reads the stream as
        // binary because the failure is in the first solid.
        let mut data = binary_stl(&cube_facets());
        let label = b"solid x facet";
        data[..label.len()].copy_from_slice(label);
        let mesh = decode_stl(&data).unwrap();
        assert_eq!(mesh.num_faces(), 12);
    }

    #[test]
    fn nan_vertex_is_replaced_by_first_finite() {
        let nan = f32::NAN;
        let data = binary_stl(&[[
            [0.0, 0.0, 1.0],
            [1.0, 2.0, 3.0],
            [nan, nan, nan],
            [4.0, 5.0, 6.0],
        ]]);
        let mesh = decode_stl(&data).unwrap();
        let positions = positions_of(&mesh);
        let face = mesh.face(0).unwrap();
        assert_eq!(positions.mapped_value(face[1]), &[1.0, 2.0, 3.0]);
        // The repaired corner aliases the donor corner after deduplication.
        assert_eq!(face[0], face[1]);
        assert_eq!(mesh.num_points(), 2);
    }

    #[test]
    fn infinite_vertex_is_replaced_too() {
        let data = binary_stl(&[[
            [0.0; 3],
            [f32::INFINITY, 0.0, 0.0],
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
        ]]);
        let mesh = decode_stl(&data).unwrap();
        let positions = positions_of(&mesh);
        let face = mesh.face(0).unwrap();
        // First finite vertex is v1; it also backfills v0.
        assert_eq!(positions.mapped_value(face[0]), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn all_nan_facet_fails() {
        let nan = f32::NAN;
        let data = binary_stl(&[[[0.0; 3], [nan; 3], [nan; 3], [nan; 3]]]);
        let err = decode_stl(&data).unwrap_err();
        assert_eq!(err.to_string(), "Every vertex in a triangle is NaN.");
    }

    #[test]
    fn declared_count_larger_than_data_fails() {
        let mut data = binary_stl(&cube_facets());
        data[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&13u32.to_le_bytes());
        let err = decode_stl(&data).unwrap_err();
        assert!(matches!(err, IoError::IncompleteFacet));
    }

    #[test]
    fn declared_count_smaller_than_data_wins() {
        let mut data = binary_stl(&cube_facets());
        data[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&5u32.to_le_bytes());
        let mesh = decode_stl(&data).unwrap();
        assert_eq!(mesh.num_faces(), 5);
    }

    #[test]
    fn empty_stream_fails() {
        assert!(matches!(
            decode_stl(b"").unwrap_err(),
            IoError::InvalidStlHeader
        ));
    }

    #[test]
    fn leading_whitespace_before_solid_is_fine() {
        let data = b"\r\n  solid s\nfacet normal 0 0 0\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid s\n";
        assert_eq!(decode_stl(data).unwrap().num_faces(), 1);
    }

    #[test]
    fn encode_decode_roundtrip_preserves_shape() {
        let original = decode_stl(&binary_stl(&cube_facets())).unwrap();
        let bytes = encode_stl(&original).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 4 + 12 * FACET_SIZE);

        let roundtrip = decode_stl(&bytes).unwrap();
        assert_eq!(roundtrip.num_faces(), original.num_faces());
        assert_eq!(roundtrip.num_points(), original.num_points());
    }

    #[test]
    fn encoder_synthesizes_normals_from_winding() {
        let mesh = decode_stl(&binary_stl(&[[
            [0.0; 3],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]))
        .unwrap();
        let bytes = encode_stl(&mesh).unwrap();

        let mut cursor = DecoderBuffer::new(&bytes[HEADER_SIZE + 4..]);
        let nx = cursor.read_f32().unwrap();
        let ny = cursor.read_f32().unwrap();
        let nz = cursor.read_f32().unwrap();
        assert_relative_eq!(nx, 0.0);
        assert_relative_eq!(ny, 0.0);
        assert_relative_eq!(nz, 1.0);
    }

    #[test]
    fn encoder_prefers_normal_attribute() {
        let mut mesh = decode_stl(&binary_stl(&[[
            [0.0; 3],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]))
        .unwrap();

        let mut normals = PointAttribute::new(AttributeKind::Normal, 3, ScalarType::Float32);
        normals.set_element_type(AttributeElementType::Vertex);
        normals.resize(mesh.num_points());
        for i in 0..mesh.num_points() {
            normals.set_value(i, &[0.0, 1.0, 0.0]);
        }
        mesh.add_attribute(normals);

        let bytes = encode_stl(&mesh).unwrap();
        let mut cursor = DecoderBuffer::new(&bytes[HEADER_SIZE + 4..]);
        assert_eq!(cursor.read_f32(), Some(0.0));
        assert_eq!(cursor.read_f32(), Some(1.0));
        assert_eq!(cursor.read_f32(), Some(0.0));
    }

    #[test]
    fn encode_without_positions_fails() {
        let mesh = Mesh::new();
        assert!(matches!(
            encode_stl(&mesh).unwrap_err(),
            IoError::MissingPositionAttribute
        ));
    }
}
