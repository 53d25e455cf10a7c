use std::fs;
use std::path::Path;

use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::obj::ImportError;

/// Surface-reflectance parameters plus the diffuse texture reference.
///
/// Fields missing from the material file keep the defaults: black
/// ambient, black specular, zero shininess, no texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// Texture path relative to the material file's directory.
    pub diffuse_texture: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::ZERO,
            specular: Vec3::ZERO,
            shininess: 0.0,
            diffuse_texture: None,
        }
    }
}

/// Reads and parses the material library at `path`.
pub fn load_mtl<P: AsRef<Path>>(path: P) -> Result<Material, ImportError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ImportError::FileNotFound {
        path: path.display().to_string(),
        source,
    })?;
    Ok(load_mtl_from_str(&data))
}

/// Parses a material description from memory.
///
/// Only `Ka`, `Ks`, `Ns` and `map_Kd` are recognized; everything else
/// is ignored. A recognized line whose fields fail to parse keeps the
/// field at its default rather than failing the import, since the
/// viewer treats material data as best-effort.
pub fn load_mtl_from_str(data: &str) -> Material {
    let mut material = Material::default();

    for (line_no, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };
        match tag {
            "map_Kd" => material.diffuse_texture = parts.next().map(str::to_string),
            "Ka" => match read_vec3(parts) {
                Some(value) => material.ambient = value,
                None => warn!("ignoring malformed Ka on line {}", line_no + 1),
            },
            "Ks" => match read_vec3(parts) {
                Some(value) => material.specular = value,
                None => warn!("ignoring malformed Ks on line {}", line_no + 1),
            },
            "Ns" => match read_f32(parts) {
                Some(value) => material.shininess = value,
                None => warn!("ignoring malformed Ns on line {}", line_no + 1),
            },
            _ => {}
        }
    }

    material
}

fn read_vec3<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

fn read_f32<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<f32> {
    parts.next()?.parse().ok()
}
