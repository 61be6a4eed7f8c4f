use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use skyisle_core::{Error, Result};
use tokio::runtime::Runtime;

use crate::io::{AssetReader, FileAssetReader};
use crate::loaders::GltfLoader;
use crate::prefab::Prefab;

fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create asset loader runtime"))
}

/// Identifies one load request issued by an [`AssetServer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Notification produced by a load in flight.
///
/// Every request produces zero or more `Progress` events followed by exactly
/// one `Loaded` or `Failed`.
#[derive(Debug)]
pub enum LoadEvent {
    Progress { id: LoadId, loaded: u64, total: u64 },
    Loaded { id: LoadId, prefab: Prefab },
    Failed { id: LoadId, error: Error },
}

impl LoadEvent {
    #[must_use]
    pub fn id(&self) -> LoadId {
        match self {
            LoadEvent::Progress { id, .. } | LoadEvent::Loaded { id, .. } | LoadEvent::Failed { id, .. } => *id,
        }
    }

    /// `true` for `Loaded` and `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadEvent::Progress { .. })
    }
}

/// Loads models off the frame thread.
///
/// Reads and decoding run on a shared background runtime; results come back
/// through a channel that the owner drains once per frame with
/// [`poll`](Self::poll). Nothing is delivered between polls, so scene state is
/// only ever touched on the frame thread.
pub struct AssetServer {
    next_id: u64,
    in_flight: usize,
    sender: flume::Sender<LoadEvent>,
    receiver: flume::Receiver<LoadEvent>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            next_id: 0,
            in_flight: 0,
            sender,
            receiver,
        }
    }

    /// Starts loading the glTF model at `path` and returns immediately.
    pub fn load_gltf(&mut self, path: impl AsRef<Path>) -> LoadId {
        let id = LoadId(self.next_id);
        self.next_id += 1;
        self.in_flight += 1;

        let path = path.as_ref().to_path_buf();
        let tx = self.sender.clone();
        log::info!("Loading model '{}' ({id})", path.display());

        get_asset_runtime().spawn(async move {
            let event = match Self::load_gltf_task(id, &path, &tx).await {
                Ok(prefab) => LoadEvent::Loaded { id, prefab },
                Err(error) => LoadEvent::Failed { id, error },
            };
            if tx.send(event).is_err() {
                log::debug!("Result of {id} discarded, asset server dropped");
            }
        });

        id
    }

    async fn load_gltf_task(id: LoadId, path: &Path, tx: &flume::Sender<LoadEvent>) -> Result<Prefab> {
        let reader = FileAssetReader::for_file(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bytes = reader
            .read_bytes(&file_name, |loaded, total| {
                // Progress is best-effort; a closed channel only means nobody listens.
                let _ = tx.send(LoadEvent::Progress { id, loaded, total });
            })
            .await?;

        let base_dir = reader.root_path().to_path_buf();
        tokio::task::spawn_blocking(move || GltfLoader::parse(&bytes, &base_dir, &name)).await?
    }

    /// Drains every event delivered since the last call.
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let events: Vec<LoadEvent> = self.receiver.try_iter().collect();
        let finished = events.iter().filter(|e| e.is_terminal()).count();
        self.in_flight = self.in_flight.saturating_sub(finished);
        events
    }

    /// Requests that have not yet delivered their terminal event to
    /// [`poll`](Self::poll).
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}
