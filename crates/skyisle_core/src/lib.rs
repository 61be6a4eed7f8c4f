//! Skyisle Core
//!
//! Foundational types shared by every Skyisle crate:
//!
//! - [`errors`]: the [`Error`] enum and [`Result`] alias
//! - [`NodeHandle`]: strongly-typed key for scene graph nodes
//! - [`time`]: the monotonic [`FrameClock`]

pub mod errors;
pub mod time;

pub use errors::{AssetError, Error, Result};
pub use time::{FrameClock, FrameTime};

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node in a scene graph.
    pub struct NodeHandle;
}
