use skyisle_core::FrameTime;
use skyisle_scene::Scene;

use crate::config::SceneConfig;
use crate::registry::{EntityName, SceneRegistry};

/// What one [`AnimationUpdate::update`] call touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Entity root transforms written by the motion curves.
    pub transforms_written: usize,
    /// Animation mixers advanced by the frame delta.
    pub mixers_advanced: usize,
}

/// Per-frame motion step.
///
/// Moves every present entity along its curve for the frame's elapsed time
/// and advances the bird's clip by the frame delta. Absent entities cost
/// nothing.
pub struct AnimationUpdate;

impl AnimationUpdate {
    pub fn update(
        registry: &mut SceneRegistry,
        scene: &mut Scene,
        config: &SceneConfig,
        time: FrameTime,
    ) -> UpdateStats {
        let mut stats = UpdateStats::default();
        let t = time.elapsed;

        if let Some(island) = registry.get(EntityName::Island)
            && let Some(node) = scene.get_node_mut(island.root)
        {
            node.transform.position.y = config.island.motion.height(t);
            stats.transforms_written += 1;
        }

        if let Some(bird) = registry.get_mut(EntityName::Bird) {
            let pose = config.bird.flight.pose(t);
            if let Some(node) = scene.get_node_mut(bird.root) {
                node.transform.position = pose.position;
                node.transform.set_rotation_euler(0.0, pose.yaw, pose.roll);
                stats.transforms_written += 1;
            }

            if let Some(mixer) = bird.mixer.as_mut()
                && mixer.has_active_clip()
            {
                mixer.update(time.delta, scene);
                stats.mixers_advanced += 1;
            }
        }

        stats
    }
}
