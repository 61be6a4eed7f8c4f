use std::collections::HashMap;

use skyisle_animation::{AnimationAction, AnimationMixer, Binder};
use skyisle_assets::{AssetServer, LoadEvent, LoadId, Prefab};
use skyisle_core::{Error, FrameClock, FrameTime, NodeHandle, Result};
use skyisle_scene::{CameraRig, Scene, ShadowFlags};

use crate::config::SceneConfig;
use crate::registry::{Entity, EntityName, SceneRegistry, Slot};
use crate::render::RenderStep;
use crate::update::{AnimationUpdate, UpdateStats};

/// Name of the node both models are parented under.
pub const GROUP_NODE_NAME: &str = "island_group";

/// Aggregate progress over every load the world has requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub requested: usize,
    /// Loads that succeeded or failed.
    pub finished: usize,
    pub bytes_loaded: u64,
    /// Sum of the sizes reported so far; grows as loads start reading.
    pub bytes_total: u64,
}

impl LoadProgress {
    /// Finished fraction of requested loads, `1.0` when nothing was requested.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.requested == 0 {
            1.0
        } else {
            self.finished as f32 / self.requested as f32
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finished >= self.requested
    }
}

#[derive(Debug, Clone, Copy)]
struct LoadRecord {
    name: EntityName,
    loaded: u64,
    total: u64,
    last_percent: Option<u64>,
    finished: bool,
}

/// Owns everything a frame touches: scene graph, entity registry, clock,
/// camera and the asset server feeding the registry.
///
/// The frame loop is single-threaded. Load results are only applied inside
/// [`pump_loads`](Self::pump_loads), which every frame calls before the
/// motion step, so the registry never changes mid-update.
pub struct World {
    pub scene: Scene,
    pub registry: SceneRegistry,
    pub clock: FrameClock,
    pub camera: CameraRig,

    config: SceneConfig,
    assets: AssetServer,
    group: NodeHandle,
    loads: HashMap<LoadId, LoadRecord>,
}

impl World {
    /// Builds an empty world. Nothing is loaded until
    /// [`request_assets`](Self::request_assets).
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;

        let mut scene = Scene::new();
        let group = scene.create_node_with_name(GROUP_NODE_NAME);
        let camera = config.camera.to_rig();

        Ok(Self {
            scene,
            registry: SceneRegistry::new(),
            clock: FrameClock::new(),
            camera,
            config,
            assets: AssetServer::new(),
            group,
            loads: HashMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Root node of the island group.
    #[must_use]
    pub fn group(&self) -> NodeHandle {
        self.group
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Starts loading both models. Returns how many loads were started.
    pub fn request_assets(&mut self) -> usize {
        EntityName::ALL
            .into_iter()
            .filter_map(|name| self.request(name))
            .count()
    }

    /// Starts loading the model for `name` unless its slot already left
    /// `Empty`.
    pub fn request(&mut self, name: EntityName) -> Option<LoadId> {
        if !matches!(self.registry.slot(name), Slot::Empty) {
            log::warn!("Ignoring duplicate load request for {name}");
            return None;
        }

        let path = match name {
            EntityName::Island => &self.config.island.asset,
            EntityName::Bird => &self.config.bird.asset,
        };
        let id = self.assets.load_gltf(path);
        self.registry.mark_loading(name);
        self.loads.insert(
            id,
            LoadRecord {
                name,
                loaded: 0,
                total: 0,
                last_percent: None,
                finished: false,
            },
        );
        Some(id)
    }

    /// Applies every load event delivered since the last call. Returns the
    /// number of loads that finished (either way).
    pub fn pump_loads(&mut self) -> usize {
        let mut finished = 0;

        for event in self.assets.poll() {
            let id = event.id();
            let Some(record) = self.loads.get_mut(&id) else {
                log::warn!("Dropping event for unknown {id}");
                continue;
            };
            let name = record.name;

            match event {
                LoadEvent::Progress { loaded, total, .. } => {
                    record.loaded = loaded;
                    record.total = total;
                    if total > 0 {
                        let percent = loaded * 100 / total;
                        if record.last_percent != Some(percent) {
                            record.last_percent = Some(percent);
                            log::debug!("Loading {name}: {percent}%");
                        }
                    }
                }
                LoadEvent::Loaded { prefab, .. } => {
                    record.finished = true;
                    finished += 1;
                    match self.install(name, &prefab) {
                        Ok(_) => log::info!(
                            "Loaded {name}: {} nodes, {} meshes, {} clips",
                            prefab.nodes.len(),
                            prefab.mesh_count(),
                            prefab.animations.len()
                        ),
                        Err(err) => {
                            log::error!("Failed to install {name}: {err}");
                            self.registry.mark_failed(name);
                        }
                    }
                }
                LoadEvent::Failed { error, .. } => {
                    record.finished = true;
                    finished += 1;
                    log::error!("Failed to load {name}: {error}");
                    self.registry.mark_failed(name);
                }
            }
        }

        finished
    }

    /// Instantiates `prefab` as entity `name`: attaches it under the island
    /// group, enables shadows and applies the material override on every
    /// mesh, sets the spawn transform and, for the bird, starts the first
    /// clip.
    pub fn install(&mut self, name: EntityName, prefab: &Prefab) -> Result<NodeHandle> {
        if self.registry.is_present(name) {
            return Err(Error::SlotOccupied(name.as_str()));
        }

        let (material, spawn, scale) = match name {
            EntityName::Island => {
                let island = &self.config.island;
                (island.material, island.spawn_position, 1.0)
            }
            EntityName::Bird => {
                let bird = &self.config.bird;
                (bird.material, bird.spawn_position, bird.scale)
            }
        };

        let root = prefab.instantiate(&mut self.scene);
        self.scene.attach(root, self.group);

        let meshes = self.scene.for_each_mesh_mut(root, |mesh| {
            mesh.shadows = ShadowFlags::BOTH;
            material.apply(&mut mesh.material);
        });
        log::debug!("{name}: shadows and material applied to {meshes} meshes");

        if let Some(node) = self.scene.get_node_mut(root) {
            node.transform.position = spawn;
            node.transform.set_uniform_scale(scale);
        }

        let mut entity = Entity::new(root).with_shadows(ShadowFlags::BOTH);

        match (name, prefab.animations.first()) {
            (EntityName::Bird, Some(clip)) => {
                let mut action = AnimationAction::new(clip.clone());
                action.bindings = Binder::bind(&self.scene, root, clip);
                action.time_scale = self.config.bird.animation_time_scale;

                let mut mixer = AnimationMixer::new();
                mixer.add_action(action);
                entity = entity.with_mixer(mixer);
                log::info!("{name}: playing clip '{}'", clip.name);
            }
            (EntityName::Island, Some(_)) => {
                log::debug!("{name}: model clips are not played");
            }
            (_, None) => {}
        }

        self.registry.set(name, entity)?;
        Ok(root)
    }

    /// Progress over every load requested so far.
    #[must_use]
    pub fn loading_progress(&self) -> LoadProgress {
        self.loads.values().fold(
            LoadProgress {
                requested: self.loads.len(),
                ..LoadProgress::default()
            },
            |mut progress, record| {
                progress.bytes_loaded += record.loaded;
                progress.bytes_total += record.total;
                if record.finished {
                    progress.finished += 1;
                }
                progress
            },
        )
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Applies pending loads, moves present entities for `time` and
    /// propagates world matrices.
    pub fn advance(&mut self, time: FrameTime) -> UpdateStats {
        self.pump_loads();
        let stats = AnimationUpdate::update(&mut self.registry, &mut self.scene, &self.config, time);
        self.scene.update_matrix_world();
        stats
    }

    /// Runs one frame: clock tick, [`advance`](Self::advance), render.
    pub fn frame<R>(&mut self, renderer: &mut R) -> Result<FrameTime>
    where
        R: RenderStep + ?Sized,
    {
        let time = self.clock.tick();
        self.advance(time);
        renderer.render(&self.scene, &self.camera)?;
        Ok(time)
    }
}
