//! Import and camera core for a small OBJ model viewer.
//!
//! The crate covers the data side of the viewer: turning an OBJ/MTL
//! pair into a single interleaved vertex buffer, and deriving per-frame
//! view and model transforms from pointer and key input.  Window
//! management, shader compilation, texture decoding and the render loop
//! itself live with the graphics backend, not here; everything in this
//! crate runs headless and is exercised directly by the test suite.

pub mod camera;
pub mod input;
pub mod material;
pub mod model;
pub mod obj;
pub mod transform;

pub use camera::{Camera, MoveDirection};
pub use input::{movement_for_key, InputEvent, InputState, KeyCode, NamedKey};
pub use material::{load_mtl, load_mtl_from_str, Material};
pub use model::Model;
pub use obj::{load_obj, load_obj_from_str, ImportError, ObjMesh, Vertex, VertexAttribute};
pub use transform::{ModelTransform, SpinAxis};
