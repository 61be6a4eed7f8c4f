use glam::{Affine3A, Vec3};
use skyisle_animation::{AnimationTarget, TargetPath, TrackValue};
use skyisle_core::NodeHandle;
use slotmap::SlotMap;

use crate::MeshKey;
use crate::mesh::Mesh;
use crate::node::Node;

/// Scene graph.
///
/// Pure data: node hierarchy plus a mesh pool. Nodes reference meshes by key.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
    pub meshes: SlotMap<MeshKey, Mesh>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
        }
    }

    /// Adds a node at the root of the scene.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Makes `child` a child of `parent`, detaching it from its old parent
    /// (or from the root list).
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach a node below its own descendant!");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// True if `ancestor` is `node` or lies on the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    /// World-space position of a node, as of the last [`update_matrix_world`](Self::update_matrix_world).
    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        self.nodes.get(handle).map(|n| n.transform.world_position())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    /// Stores `mesh` and attaches it to `node`, replacing any previous mesh.
    pub fn set_mesh(&mut self, node: NodeHandle, mesh: Mesh) -> Option<MeshKey> {
        let target = self.nodes.get_mut(node)?;
        let key = self.meshes.insert(mesh);
        if let Some(old) = target.mesh.replace(key) {
            self.meshes.remove(old);
        }
        Some(key)
    }

    #[must_use]
    pub fn get_mesh(&self, node: NodeHandle) -> Option<&Mesh> {
        let key = self.nodes.get(node)?.mesh?;
        self.meshes.get(key)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// All handles of the subtree rooted at `root`, parents before children.
    #[must_use]
    pub fn subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Calls `f` for every mesh in the subtree rooted at `root`. Returns how
    /// many meshes were visited.
    pub fn for_each_mesh_mut(&mut self, root: NodeHandle, mut f: impl FnMut(&mut Mesh)) -> usize {
        let mut visited = 0;
        for handle in self.subtree(root) {
            let Some(key) = self.nodes.get(handle).and_then(|n| n.mesh) else {
                continue;
            };
            if let Some(mesh) = self.meshes.get_mut(key) {
                f(mesh);
                visited += 1;
            }
        }
        visited
    }

    // ========================================================================
    // Transform propagation
    // ========================================================================

    /// Recomputes world matrices top-down from every root.
    ///
    /// A node's world matrix is rebuilt when its own local matrix changed or
    /// when any ancestor's did.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = self
            .root_nodes
            .iter()
            .rev()
            .map(|&h| (h, Affine3A::IDENTITY, false))
            .collect();

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let local_changed = node.transform.update_local_matrix();
            let changed = local_changed || parent_changed;
            if changed {
                let world = parent_world * node.transform.local_matrix;
                node.transform.set_world_matrix(world);
            }

            let world = node.transform.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, world, changed));
            }
        }
    }
}

impl AnimationTarget for Scene {
    fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.subtree(root)
            .into_iter()
            .find(|&h| self.nodes.get(h).is_some_and(|n| n.name == name))
    }

    fn apply_track_value(&mut self, node: NodeHandle, target: TargetPath, value: TrackValue) -> bool {
        let Some(node) = self.nodes.get_mut(node) else {
            return false;
        };

        match (target, value) {
            (TargetPath::Translation, TrackValue::Vector3(v)) => node.transform.position = v,
            (TargetPath::Scale, TrackValue::Vector3(v)) => node.transform.scale = v,
            (TargetPath::Rotation, TrackValue::Quaternion(q)) => node.transform.rotation = q,
            _ => return false,
        }
        true
    }
}
