//! STL (stereolithography) parsing, ASCII and binary.
//!
//! # Format Detection
//!
//! ASCII files start with `solid` after optional whitespace. Some binary
//! exporters also write `solid` into their header, so a file whose length
//! matches the binary layout exactly, or whose header contains NUL bytes,
//! is treated as binary regardless.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec3;

use super::TriangleMesh;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header plus the little-endian triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Errors from reading or parsing an STL mesh.
#[derive(Debug)]
pub enum StlError {
    /// The mesh file does not exist.
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// Reading the file failed.
    Io(std::io::Error),
    /// Fewer bytes than any valid STL file.
    TooSmall {
        /// Bytes available.
        len: usize,
    },
    /// Binary body shorter than the declared triangle count.
    Truncated {
        /// Triangles declared in the header.
        expected: u32,
        /// Complete triangles present.
        got: u32,
    },
    /// ASCII file is not valid UTF-8.
    NotUtf8,
    /// An ASCII `vertex` or `facet normal` line with unparsable numbers.
    InvalidNumber {
        /// 1-based line number.
        line: usize,
    },
    /// An ASCII facet that did not contain exactly three vertices.
    FacetVertexCount {
        /// 1-based line number of the `endfacet`.
        line: usize,
        /// Vertices found.
        count: usize,
    },
    /// The file parsed but contains no triangles.
    Empty,
}

impl fmt::Display for StlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TooSmall { len } => {
                write!(f, "{len} bytes is too small to be a valid STL file")
            }
            Self::Truncated { expected, got } => write!(
                f,
                "truncated binary STL: header declares {expected} \
                 triangles, found {got}"
            ),
            Self::NotUtf8 => write!(f, "ASCII STL is not valid UTF-8"),
            Self::InvalidNumber { line } => {
                write!(f, "invalid number on line {line}")
            }
            Self::FacetVertexCount { line, count } => write!(
                f,
                "facet ending on line {line} has {count} vertices, expected 3"
            ),
            Self::Empty => write!(f, "mesh contains no triangles"),
        }
    }
}

impl std::error::Error for StlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Load a mesh from an STL file, detecting ASCII vs binary.
///
/// # Errors
///
/// Returns [`StlError::FileNotFound`] for a missing file, [`StlError::Io`]
/// for other read failures, and a parse error for malformed content.
pub fn load_stl(path: impl AsRef<Path>) -> Result<TriangleMesh, StlError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StlError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StlError::Io(e)
        }
    })?;
    parse_stl(&bytes)
}

/// Parse an in-memory STL file, detecting ASCII vs binary.
///
/// # Errors
///
/// Returns an [`StlError`] when the content is not a valid, non-empty STL
/// mesh.
pub fn parse_stl(bytes: &[u8]) -> Result<TriangleMesh, StlError> {
    if bytes.len() < 6 {
        return Err(StlError::TooSmall { len: bytes.len() });
    }

    let header = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)]);
    let mesh = if header.trim_start().starts_with("solid")
        && !looks_binary(bytes)
    {
        parse_ascii(bytes)?
    } else {
        parse_binary(bytes)?
    };

    if mesh.is_empty() {
        return Err(StlError::Empty);
    }
    Ok(mesh)
}

/// Whether a `solid`-prefixed file is actually binary.
fn looks_binary(bytes: &[u8]) -> bool {
    if bytes.len() < PREAMBLE_SIZE {
        return false;
    }
    let declared = declared_count(bytes) as usize;
    let exact_len = declared
        .checked_mul(TRIANGLE_SIZE)
        .and_then(|body| body.checked_add(PREAMBLE_SIZE));
    exact_len == Some(bytes.len()) || bytes[..HEADER_SIZE].contains(&0)
}

fn declared_count(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ])
}

fn parse_binary(bytes: &[u8]) -> Result<TriangleMesh, StlError> {
    if bytes.len() < PREAMBLE_SIZE {
        return Err(StlError::TooSmall { len: bytes.len() });
    }

    let expected = declared_count(bytes);
    let body = &bytes[PREAMBLE_SIZE..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < expected as usize {
        return Err(StlError::Truncated {
            expected,
            got: available as u32,
        });
    }

    let mut mesh = TriangleMesh::with_capacity(expected as usize);
    for facet in body.chunks_exact(TRIANGLE_SIZE).take(expected as usize) {
        let normal = read_vec3(facet, 0);
        let vertices =
            [read_vec3(facet, 12), read_vec3(facet, 24), read_vec3(facet, 36)];
        mesh.push_triangle(normal, vertices);
    }
    Ok(mesh)
}

/// Read three little-endian `f32`s starting at `offset`.
fn read_vec3(buf: &[u8], offset: usize) -> Vec3 {
    let f = |i: usize| {
        let at = offset + i * 4;
        f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    };
    Vec3::new(f(0), f(1), f(2))
}

fn parse_ascii(bytes: &[u8]) -> Result<TriangleMesh, StlError> {
    let text = std::str::from_utf8(bytes).map_err(|_| StlError::NotUtf8)?;

    let mut mesh = TriangleMesh::new();
    let mut normal = Vec3::ZERO;
    let mut in_loop = false;
    let mut vertices: Vec<Vec3> = Vec::with_capacity(3);

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                vertices.clear();
                // "facet normal nx ny nz"; the normal is optional in practice
                normal = if parts.next().is_some() {
                    parse_triple(&mut parts, line_no)?
                } else {
                    Vec3::ZERO
                };
            }
            "outer" => in_loop = true,
            "vertex" if in_loop => {
                vertices.push(parse_triple(&mut parts, line_no)?);
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                let Ok(tri) = <[Vec3; 3]>::try_from(vertices.as_slice()) else {
                    return Err(StlError::FacetVertexCount {
                        line: line_no,
                        count: vertices.len(),
                    });
                };
                mesh.push_triangle(normal, tri);
                vertices.clear();
                normal = Vec3::ZERO;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(mesh)
}

fn parse_triple<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, StlError> {
    let mut next = || -> Result<f32, StlError> {
        parts
            .next()
            .and_then(|s| s.parse::<f32>().ok())
            .ok_or(StlError::InvalidNumber { line })
    };
    Ok(Vec3::new(next()?, next()?, next()?))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const ASCII_TRIANGLE: &str = "solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test
";

    fn binary_stl(header: &[u8], triangles: &[[Vec3; 4]]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_SIZE];
        out[..header.len()].copy_from_slice(header);
        out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            for v in tri {
                for c in v.to_array() {
                    out.extend_from_slice(&c.to_le_bytes());
                }
            }
            out.extend_from_slice(&0u16.to_le_bytes());
        }
        out
    }

    #[test]
    fn ascii_triangle_parses() {
        let mesh = parse_stl(ASCII_TRIANGLE.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(mesh.face_normals, vec![Vec3::Z]);
    }

    #[test]
    fn binary_triangles_parse() {
        let bytes = binary_stl(
            b"exported",
            &[
                [Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y],
                [Vec3::ZERO, Vec3::ZERO, Vec3::Y, Vec3::Z],
            ],
        );
        let mesh = parse_stl(&bytes).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions[3..], [Vec3::ZERO, Vec3::Y, Vec3::Z]);
        // Zero normal in the file is recomputed from the winding
        assert_eq!(mesh.face_normals[1], Vec3::X);
    }

    #[test]
    fn binary_with_solid_header_is_not_mistaken_for_ascii() {
        let bytes = binary_stl(
            b"solid exported by a cad tool",
            &[[Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y]],
        );
        let mesh = parse_stl(&bytes).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let mut bytes = binary_stl(
            b"tri",
            &[
                [Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y],
                [Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y],
            ],
        );
        bytes.truncate(bytes.len() - 10);
        let err = parse_stl(&bytes).unwrap_err();
        assert!(matches!(err, StlError::Truncated { expected: 2, got: 1 }));
    }

    #[test]
    fn tiny_input_is_rejected() {
        assert!(matches!(
            parse_stl(b"sol"),
            Err(StlError::TooSmall { len: 3 })
        ));
    }

    #[test]
    fn empty_solid_is_rejected() {
        let err = parse_stl(b"solid empty\nendsolid empty\n").unwrap_err();
        assert!(matches!(err, StlError::Empty));
    }

    #[test]
    fn malformed_vertex_reports_line() {
        let text = ASCII_TRIANGLE.replace("vertex 1 0 0", "vertex 1 zero 0");
        let err = parse_stl(text.as_bytes()).unwrap_err();
        assert!(matches!(err, StlError::InvalidNumber { line: 5 }));
    }

    #[test]
    fn facet_with_two_vertices_is_rejected() {
        let text = ASCII_TRIANGLE.replace("      vertex 0 1 0\n", "");
        let err = parse_stl(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StlError::FacetVertexCount { line: 7, count: 2 }
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ASCII_TRIANGLE.as_bytes()).unwrap();
        let mesh = load_stl(file.path()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = load_stl("does/not/exist/turbine.stl").unwrap_err();
        match err {
            StlError::FileNotFound { path } => {
                assert!(path.to_string_lossy().contains("turbine.stl"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shipped_turbine_asset_parses() {
        let path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/single_color.stl");
        let mesh = load_stl(&path).unwrap();
        assert_eq!(mesh.triangle_count(), 60);
        assert!(mesh.bounds().is_some());
    }
}
