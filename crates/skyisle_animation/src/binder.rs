use skyisle_core::NodeHandle;

use crate::binding::{AnimationTarget, PropertyBinding};
use crate::clip::AnimationClip;

pub struct Binder;

impl Binder {
    /// Resolves each track of `clip` to a node under `root` by name.
    ///
    /// Tracks whose node cannot be found are skipped; the clip still plays for
    /// the rest.
    pub fn bind<T>(target: &T, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding>
    where
        T: AnimationTarget + ?Sized,
    {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            match target.find_node_by_name(root, &track.meta.node_name) {
                Some(node) => bindings.push(PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                }),
                None => log::warn!(
                    "Clip '{}': no node named '{}', track {} left unbound",
                    clip.name,
                    track.meta.node_name,
                    track_index
                ),
            }
        }

        bindings
    }
}
