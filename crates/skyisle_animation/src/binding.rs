use glam::{Quat, Vec3};
use skyisle_core::NodeHandle;

/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
    Scale,       // Maps to transform.scale
}

/// Binding relationship: maps track `track_index` of a clip to the target
/// property of `node` in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeHandle,
    pub target: TargetPath,
}

/// A sampled track value, ready to be written to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}

/// Anything an [`AnimationMixer`](crate::AnimationMixer) can drive.
///
/// The scene graph implements this; tests can implement it with a plain map.
pub trait AnimationTarget {
    /// Finds a node named `name` in the subtree rooted at `root`.
    fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle>;

    /// Writes a sampled value. Returns `false` if the node is gone or the
    /// value does not fit the target path.
    fn apply_track_value(&mut self, node: NodeHandle, target: TargetPath, value: TrackValue) -> bool;
}
