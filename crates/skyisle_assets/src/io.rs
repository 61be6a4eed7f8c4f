use std::path::{Path, PathBuf};

use skyisle_core::{AssetError, Result};
use tokio::io::AsyncReadExt;

/// Read buffer size; one progress report is emitted per chunk.
const CHUNK_SIZE: usize = 64 * 1024;

/// Asynchronous byte source for model resources.
pub trait AssetReader: Send + Sync {
    /// Reads `uri` completely, reporting `(bytes_loaded, bytes_total)` after
    /// every chunk.
    fn read_bytes(
        &self,
        uri: &str,
        on_progress: impl FnMut(u64, u64) + Send,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Reads files relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    /// Reader rooted at the directory containing `file`.
    pub fn for_file(file: &Path) -> Self {
        Self::new(file.parent().unwrap_or(Path::new(".")))
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(
        &self,
        uri: &str,
        mut on_progress: impl FnMut(u64, u64) + Send,
    ) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        let io_error = |source: std::io::Error| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.display().to_string())
            } else {
                AssetError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        };

        let mut file = tokio::fs::File::open(&path).await.map_err(io_error)?;
        let total = file.metadata().await.map_err(io_error)?.len();

        let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
        let mut chunk = vec![0_u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut chunk).await.map_err(io_error)?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..n]);
            on_progress(bytes.len() as u64, total.max(bytes.len() as u64));
        }

        if bytes.is_empty() {
            on_progress(0, 0);
        }

        Ok(bytes)
    }
}
