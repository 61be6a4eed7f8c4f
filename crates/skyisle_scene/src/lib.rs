//! Scene graph module
//!
//! Manages the hierarchy the render step reads and the animation step writes:
//! - [`Node`]: scene node with parent/child links and a transform
//! - [`Transform`]: TRS with cached local and world matrices
//! - [`Mesh`]: drawable primitive with material and shadow flags
//! - [`Scene`]: node and mesh storage, traversal, world matrix propagation
//! - [`CameraRig`]: perspective camera state

pub mod camera;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::CameraRig;
pub use mesh::{Mesh, ShadowFlags, StandardMaterial};
pub use node::Node;
pub use scene::Scene;
pub use skyisle_core::NodeHandle;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct MeshKey;
}
