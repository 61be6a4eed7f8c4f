//! Asset loading
//!
//! - [`AssetServer`]: background loads delivered as [`LoadEvent`]s
//! - [`AssetReader`] / [`FileAssetReader`]: chunked byte reads with progress
//! - [`GltfLoader`]: glTF 2.0 decoding into a [`Prefab`]
//! - [`Prefab`]: scene-independent model data, instantiated on the frame thread

pub mod io;
pub mod loaders;
pub mod prefab;
pub mod server;

pub use io::{AssetReader, FileAssetReader};
pub use loaders::GltfLoader;
pub use prefab::{Prefab, PrefabNode};
pub use server::{AssetServer, LoadEvent, LoadId};
