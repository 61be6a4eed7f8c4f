use std::sync::Arc;

use skyisle_animation::AnimationClip;
use skyisle_core::NodeHandle;
use skyisle_scene::{Mesh, Node, Scene, Transform};

/// Data-only node of a loaded model; children are indices into
/// [`Prefab::nodes`].
#[derive(Debug, Clone, Default)]
pub struct PrefabNode {
    pub name: String,
    pub transform: Transform,
    pub children_indices: Vec<usize>,
    /// One entry per primitive of the node's mesh.
    pub meshes: Vec<Mesh>,
}

impl PrefabNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Decoded model, independent of any scene.
///
/// Built on a worker thread and sent to the frame thread, where
/// [`instantiate`](Self::instantiate) turns it into scene nodes.
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    /// Name of the source file, without extension.
    pub name: String,
    pub nodes: Vec<PrefabNode>,
    pub root_indices: Vec<usize>,
    pub animations: Vec<Arc<AnimationClip>>,
}

impl Prefab {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Total number of primitives across all nodes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().map(|n| n.meshes.len()).sum()
    }

    /// Creates the node hierarchy in `scene` under a fresh root node named
    /// after the prefab, and returns that root.
    ///
    /// A node with several primitives keeps the first on itself and gets one
    /// extra child node per remaining primitive.
    pub fn instantiate(&self, scene: &mut Scene) -> NodeHandle {
        let root = scene.create_node_with_name(&self.name);

        let handles: Vec<NodeHandle> = self
            .nodes
            .iter()
            .map(|prefab_node| {
                let mut node = Node::with_name(&prefab_node.name);
                node.transform = prefab_node.transform.clone();
                node.transform.mark_dirty();
                scene.add_node(node)
            })
            .collect();

        for (prefab_node, &handle) in self.nodes.iter().zip(&handles) {
            let mut primitives = prefab_node.meshes.iter();
            if let Some(first) = primitives.next() {
                scene.set_mesh(handle, first.clone());
            }
            for (i, mesh) in primitives.enumerate() {
                let child = scene.create_node_with_name(&format!("{}_primitive_{}", prefab_node.name, i + 1));
                scene.set_mesh(child, mesh.clone());
                scene.attach(child, handle);
            }

            for &child_index in &prefab_node.children_indices {
                if let Some(&child) = handles.get(child_index) {
                    scene.attach(child, handle);
                } else {
                    log::warn!("Prefab '{}': child index {} out of range", self.name, child_index);
                }
            }
        }

        for &index in &self.root_indices {
            if let Some(&handle) = handles.get(index) {
                scene.attach(handle, root);
            }
        }

        // Nodes outside the model's scene list still belong to this instance.
        for &handle in &handles {
            if scene.get_node(handle).is_some_and(|n| n.parent().is_none()) {
                scene.attach(handle, root);
            }
        }

        root
    }
}
