use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::material::{self, Material};
use crate::obj::{self, ImportError, ObjMesh};

/// A fully imported model: the interleaved mesh, its material, and the
/// diffuse-texture path resolved for the texture collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub mesh: ObjMesh,
    pub material: Material,
    pub texture_path: Option<PathBuf>,
}

impl Model {
    /// Imports the OBJ at `path` together with the material library it
    /// references, both resolved relative to the OBJ's directory.
    ///
    /// OBJ errors are returned to the caller. A missing or unreadable
    /// material library is logged and replaced with
    /// `Material::default()`; the mesh stays usable either way.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let mesh = obj::load_obj(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let material = match mesh.material_lib.as_deref() {
            Some(name) => match material::load_mtl(base.join(name)) {
                Ok(material) => material,
                Err(err) => {
                    warn!("using the default material: {err}");
                    Material::default()
                }
            },
            None => Material::default(),
        };
        let texture_path = material
            .diffuse_texture
            .as_deref()
            .map(|texture| base.join(texture));

        info!(
            "imported {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(Self {
            mesh,
            material,
            texture_path,
        })
    }
}
