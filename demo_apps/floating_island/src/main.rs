use std::time::Duration;

use glam::Vec3;
use skyisle::prelude::*;
use skyisle::{GROUP_NODE_NAME, Result as SceneResult};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const DEFAULT_FRAMES: u64 = 600;
const REPORT_EVERY: u64 = 60;

/// Render step that reports where the entities are instead of drawing them.
struct TraceRenderer {
    frames: u64,
}

impl TraceRenderer {
    fn describe(scene: &Scene, camera: &CameraRig, name: &str, position: Vec3) -> String {
        match camera.project(position) {
            Some(ndc) => format!("{name} at {position:.2} (ndc {:.2}, {:.2})", ndc.x, ndc.y),
            None => format!("{name} at {position:.2} (behind camera, {} nodes)", scene.node_count()),
        }
    }
}

impl RenderStep for TraceRenderer {
    fn render(&mut self, scene: &Scene, camera: &CameraRig) -> SceneResult<()> {
        self.frames += 1;
        if !self.frames.is_multiple_of(REPORT_EVERY) {
            return Ok(());
        }

        let group = scene
            .root_nodes
            .iter()
            .copied()
            .find(|&h| scene.get_name(h) == Some(GROUP_NODE_NAME));
        let parts: Vec<String> = group
            .and_then(|g| scene.get_node(g))
            .map(|g| {
                g.children()
                    .iter()
                    .filter_map(|&child| scene.get_node(child))
                    .map(|node| Self::describe(scene, camera, &node.name, node.transform.world_position()))
                    .collect()
            })
            .unwrap_or_default();

        if parts.is_empty() {
            log::info!("frame {}: nothing loaded yet", self.frames);
        } else {
            log::info!("frame {}: {}", self.frames, parts.join(", "));
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SceneConfig::from_json_file(&path)?,
        None => SceneConfig::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    let mut world = World::new(config)?;
    let started = world.request_assets();
    log::info!("Requested {started} models, running {frames} frames");

    let mut renderer = TraceRenderer { frames: 0 };
    let mut reported_complete = false;

    for _ in 0..frames {
        world.frame(&mut renderer)?;

        let progress = world.loading_progress();
        if !reported_complete && progress.is_complete() {
            reported_complete = true;
            log::info!(
                "Loading finished: {}/{} models present",
                world.registry.present_count(),
                progress.requested
            );
        }

        std::thread::sleep(FRAME_INTERVAL);
    }

    Ok(())
}
