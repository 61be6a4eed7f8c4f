//! # Skyisle
//!
//! A floating island with a falcon circling it: two glTF models loaded in the
//! background, placed under one group node and animated every frame by
//! closed-form motion curves.
//!
//! ## Frame flow
//!
//! ```text
//! FrameClock::tick ─▶ World::pump_loads ─▶ AnimationUpdate ─▶ world matrices ─▶ RenderStep
//! ```
//!
//! Loads run on a background runtime and are applied only at the start of a
//! frame, so the [`SceneRegistry`] is never written while the update reads it.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use skyisle::{NullRenderer, SceneConfig, World};
//!
//! let mut world = World::new(SceneConfig::default())?;
//! world.request_assets();
//! let mut renderer = NullRenderer;
//! loop {
//!     world.frame(&mut renderer)?;
//! }
//! ```

pub mod config;
pub mod motion;
pub mod registry;
pub mod render;
pub mod update;
pub mod world;

pub use config::{BirdConfig, CameraConfig, IslandConfig, MaterialOverride, SceneConfig};
pub use motion::{BirdFlight, FlightPose, IslandMotion, angle_difference, wrap_angle};
pub use registry::{Entity, EntityName, SceneRegistry, Slot};
pub use render::{NullRenderer, RenderStep};
pub use update::{AnimationUpdate, UpdateStats};
pub use world::{GROUP_NODE_NAME, LoadProgress, World};

pub use skyisle_animation as animation;
pub use skyisle_assets as assets;
pub use skyisle_scene as scene;

pub use skyisle_core::{AssetError, Error, FrameClock, FrameTime, NodeHandle, Result};

pub mod prelude {
    pub use crate::{
        AnimationUpdate, EntityName, FrameClock, FrameTime, NullRenderer, RenderStep, SceneConfig,
        SceneRegistry, World,
    };
    pub use skyisle_scene::{CameraRig, Scene, ShadowFlags};
}
