use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Interleaved vertex data produced from an OBJ file.
///
/// Vertices are laid out as `position.xyz`, `texcoord.uv`, `normal.xyz`,
/// eight floats per face corner, ready for upload as a single buffer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjMesh {
    pub vertices: Vec<f32>,
    /// Material library filename named by the `mtllib` line, if any.
    /// The caller resolves it against the OBJ's own directory.
    pub material_lib: Option<String>,
}

/// Typed view of one interleaved vertex, layout-compatible with the
/// flat buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

/// Offset and length (in floats) of one attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexAttribute {
    pub offset: usize,
    pub len: usize,
}

/// Failures the importers can report.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unable to open {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed `{prefix}` statement on line {line}")]
    MalformedLine { prefix: &'static str, line: usize },
    #[error("face on line {line} references `{pool}` index {index}, but only {len} are defined at that point")]
    IndexOutOfRange {
        pool: &'static str,
        index: usize,
        len: usize,
        line: usize,
    },
}

impl ObjMesh {
    /// Stride of the interleaved buffer.
    pub const FLOATS_PER_VERTEX: usize = 8;

    /// Attribute sub-ranges, in buffer order: position, texcoord, normal.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute { offset: 0, len: 3 },
        VertexAttribute { offset: 3, len: 2 },
        VertexAttribute { offset: 5, len: 3 },
    ];

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::FLOATS_PER_VERTEX
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Views the buffer as typed vertices.
    pub fn as_vertices(&self) -> &[Vertex] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Views the buffer as raw bytes for the GPU upload collaborator.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Reads and parses the OBJ file at `path`.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ObjMesh, ImportError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ImportError::FileNotFound {
        path: path.display().to_string(),
        source,
    })?;
    load_obj_from_str(&data)
}

/// Parses an OBJ file from memory into an interleaved vertex buffer.
///
/// The parse is a single forward pass: face lines resolve their indices
/// against the attribute pools accumulated so far, so attributes must
/// precede the faces that reference them. Blank lines are skipped and
/// unrecognized prefixes are ignored. An index outside its pool aborts
/// the whole parse; a truncated buffer is never returned.
pub fn load_obj_from_str(data: &str) -> Result<ObjMesh, ImportError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut texcoords: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut vertices: Vec<f32> = Vec::new();
    let mut material_lib = None;

    for (line_no, line) in data.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };
        match tag {
            "v" => positions.push(parse_vec3(parts, "v", line_no)?),
            "vt" => texcoords.push(parse_vec2(parts, "vt", line_no)?),
            "vn" => normals.push(parse_vec3(parts, "vn", line_no)?),
            "f" => append_face(
                parts,
                line_no,
                &positions,
                &texcoords,
                &normals,
                &mut vertices,
            )?,
            "mtllib" => {
                let name = parts.next().ok_or(ImportError::MalformedLine {
                    prefix: "mtllib",
                    line: line_no,
                })?;
                material_lib = Some(name.to_string());
            }
            _ => {}
        }
    }

    Ok(ObjMesh {
        vertices,
        material_lib,
    })
}

/// Resolves one triangular `v/vt/vn` face and appends its three
/// interleaved vertices.
fn append_face<'a>(
    parts: impl Iterator<Item = &'a str>,
    line: usize,
    positions: &[Vec3],
    texcoords: &[Vec2],
    normals: &[Vec3],
    out: &mut Vec<f32>,
) -> Result<(), ImportError> {
    let corners: Vec<&str> = parts.collect();
    // The format subset is pre-triangulated; anything else is malformed.
    if corners.len() != 3 {
        return Err(ImportError::MalformedLine { prefix: "f", line });
    }
    for corner in corners {
        let mut segments = corner.split('/');
        let vi = parse_index(segments.next(), line)?;
        let ti = parse_index(segments.next(), line)?;
        let ni = parse_index(segments.next(), line)?;
        if segments.next().is_some() {
            return Err(ImportError::MalformedLine { prefix: "f", line });
        }
        let position = resolve(positions, vi, "v", line)?;
        let texcoord = resolve(texcoords, ti, "vt", line)?;
        let normal = resolve(normals, ni, "vn", line)?;
        out.extend_from_slice(&[position.x, position.y, position.z]);
        out.extend_from_slice(&[texcoord.x, texcoord.y]);
        out.extend_from_slice(&[normal.x, normal.y, normal.z]);
    }
    Ok(())
}

fn resolve<T: Copy>(
    pool: &[T],
    index: usize,
    pool_name: &'static str,
    line: usize,
) -> Result<T, ImportError> {
    if index == 0 || index > pool.len() {
        return Err(ImportError::IndexOutOfRange {
            pool: pool_name,
            index,
            len: pool.len(),
            line,
        });
    }
    Ok(pool[index - 1])
}

fn parse_index(segment: Option<&str>, line: usize) -> Result<usize, ImportError> {
    segment
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or(ImportError::MalformedLine { prefix: "f", line })
}

fn parse_vec3<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    prefix: &'static str,
    line: usize,
) -> Result<Vec3, ImportError> {
    let x = parse_float(parts.next(), prefix, line)?;
    let y = parse_float(parts.next(), prefix, line)?;
    let z = parse_float(parts.next(), prefix, line)?;
    Ok(Vec3::new(x, y, z))
}

fn parse_vec2<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    prefix: &'static str,
    line: usize,
) -> Result<Vec2, ImportError> {
    let x = parse_float(parts.next(), prefix, line)?;
    let y = parse_float(parts.next(), prefix, line)?;
    Ok(Vec2::new(x, y))
}

fn parse_float(part: Option<&str>, prefix: &'static str, line: usize) -> Result<f32, ImportError> {
    part.and_then(|s| s.parse::<f32>().ok())
        .ok_or(ImportError::MalformedLine { prefix, line })
}
