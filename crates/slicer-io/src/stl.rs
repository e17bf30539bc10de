//! STL (Stereolithography) file format support.
//!
//! Loads a triangle soup, which is exactly the shape the spatial index
//! consumes; no indexed-mesh reconstruction happens here. Both binary and
//! ASCII variants are supported and auto-detected.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored; often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
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

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use slicer_geometry::{Point3, Triangle, Vector3};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices +
/// attribute count).
const TRIANGLE_SIZE: usize = 50;

/// Load a triangle soup from an STL file.
///
/// Automatically detects ASCII vs binary format.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content is not valid
/// STL.
///
/// # Example
///
/// ```no_run
/// use slicer_io::load_stl;
///
/// let triangles = load_stl("model.stl").unwrap();
/// println!("Loaded {} triangles", triangles.len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Vec<Triangle>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mut reader = BufReader::new(file);

    // Read enough to determine the format.
    let mut header = [0u8; HEADER_SIZE + 4];
    let bytes_read = read_up_to(&mut reader, &mut header)?;

    if bytes_read < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    let header_str = String::from_utf8_lossy(&header[..bytes_read.min(HEADER_SIZE)]);
    if header_str.trim_start().starts_with("solid") && !looks_binary(&header[..bytes_read]) {
        // ASCII: re-read from the start.
        drop(reader);
        let file = File::open(path)?;
        load_stl_ascii(BufReader::new(file))
    } else {
        load_stl_binary(&header[..bytes_read], reader)
    }
}

/// Fill as much of `buf` as the reader can provide.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Some binary files happen to start with "solid"; binary headers usually
/// contain null bytes, ASCII ones never do.
fn looks_binary(header: &[u8]) -> bool {
    if header.len() < HEADER_SIZE + 4 {
        return false;
    }
    header[..HEADER_SIZE].contains(&0)
}

fn load_stl_binary<R: Read>(header: &[u8], mut reader: R) -> IoResult<Vec<Triangle>> {
    if header.len() < HEADER_SIZE + 4 {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got: header.len(),
        });
    }

    let face_count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);

    let mut triangles = Vec::with_capacity(face_count as usize);
    let mut record = [0u8; TRIANGLE_SIZE];
    for i in 0..face_count {
        let bytes_read = read_up_to(&mut reader, &mut record)?;
        if bytes_read < TRIANGLE_SIZE {
            return Err(IoError::InvalidFaceCount {
                expected: face_count,
                got: i,
            });
        }

        // Skip the 12-byte normal; read the three vertices.
        triangles.push(Triangle::new(
            read_point(&record[12..24]),
            read_point(&record[24..36]),
            read_point(&record[36..48]),
        ));
    }

    debug!(triangles = triangles.len(), "Loaded binary STL");
    Ok(triangles)
}

/// Read a point from 12 bytes (3 little-endian f32s).
fn read_point(buf: &[u8]) -> Point3<f32> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(x, y, z)
}

fn load_stl_ascii<R: BufRead>(reader: R) -> IoResult<Vec<Triangle>> {
    let mut triangles = Vec::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut vertices: Vec<Point3<f32>> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_lowercase().as_str() {
            "facet" => {
                in_facet = true;
                // The normal follows, but it is recomputed downstream anyway.
            }
            "outer" => {
                in_loop = true;
                vertices.clear();
            }
            "vertex" => {
                if in_loop {
                    let coords: Vec<&str> = parts.collect();
                    if coords.len() >= 3 {
                        let x: f32 = coords[0].parse()?;
                        let y: f32 = coords[1].parse()?;
                        let z: f32 = coords[2].parse()?;
                        vertices.push(Point3::new(x, y, z));
                    }
                }
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if in_facet && vertices.len() == 3 {
                    triangles.push(Triangle::new(vertices[0], vertices[1], vertices[2]));
                }
                in_facet = false;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    debug!(triangles = triangles.len(), "Loaded ASCII STL");
    Ok(triangles)
}

/// Save a triangle soup to an STL file.
///
/// # Arguments
///
/// * `triangles` - The triangles to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_stl<P: AsRef<Path>>(triangles: &[Triangle], path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if binary {
        save_stl_binary(triangles, writer)
    } else {
        save_stl_ascii(triangles, writer)
    }
}

fn facet_normal(triangle: &Triangle) -> Vector3<f32> {
    let e1 = triangle.v1 - triangle.v0;
    let e2 = triangle.v2 - triangle.v0;
    let normal = e1.cross(&e2);
    let len = normal.norm();
    if len > f32::EPSILON {
        normal / len
    } else {
        Vector3::zeros()
    }
}

fn save_stl_binary<W: Write>(triangles: &[Triangle], mut writer: W) -> IoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text: &[u8] = b"Binary STL triangle soup";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    #[allow(clippy::cast_possible_truncation)] // Soups beyond u32 faces are unsupported
    let face_count = triangles.len() as u32;
    writer.write_all(&face_count.to_le_bytes())?;

    for triangle in triangles {
        let normal = facet_normal(triangle);
        for component in [normal.x, normal.y, normal.z] {
            writer.write_all(&component.to_le_bytes())?;
        }
        for vertex in triangle.vertices() {
            for component in [vertex.x, vertex.y, vertex.z] {
                writer.write_all(&component.to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn save_stl_ascii<W: Write>(triangles: &[Triangle], mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for triangle in triangles {
        let n = facet_normal(triangle);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in triangle.vertices() {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;
    Ok(())
}
