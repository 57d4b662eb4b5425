//! Per-request scratch directory.
//!
//! A [`Workspace`] owns a uniquely named temporary directory. Releasing or
//! dropping it removes the directory and everything inside. Removal happens
//! once, off the async worker threads, and a failure to remove is logged
//! rather than returned.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::Stream;
use tempfile::{Builder, TempDir};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::runtime::Handle;
use tracing::{debug, warn};

const PREFIX: &str = "pdf2md-";
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    /// Create a fresh workspace under `root`, or the system temp dir.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = Builder::new();
        builder.prefix(PREFIX);
        let created = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        // tempfile errors carry the full path, keep that out of responses
        let dir = created.map_err(|e| {
            warn!(error = %e, "Failed to create workspace");
            io::Error::new(e.kind(), "could not create a temporary workspace")
        })?;
        let path = dir.path().to_path_buf();
        debug!(workspace = %path.display(), "Workspace created");
        Ok(Self { dir: Some(dir), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `file_name` inside the workspace.
    pub fn file(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Remove the directory on the blocking pool and wait until it is gone.
    pub async fn release(mut self) {
        let Some(dir) = self.dir.take() else { return };
        let path = self.path.clone();
        let removal = tokio::task::spawn_blocking(move || remove(dir, &path));
        if let Err(e) = removal.await {
            warn!(workspace = %self.path.display(), error = %e, "Workspace removal task failed");
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else { return };
        let path = self.path.clone();
        // never block an async worker on remove_dir_all
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || remove(dir, &path));
            }
            Err(_) => remove(dir, &path),
        }
    }
}

fn remove(dir: TempDir, path: &Path) {
    match dir.close() {
        Ok(()) => debug!(workspace = %path.display(), "Workspace removed"),
        Err(e) => warn!(
            workspace = %path.display(),
            error = %e,
            "Failed to remove workspace"
        ),
    }
}

/// Stream `file` in chunks and release `workspace` once the last chunk has
/// been handed out. Dropping the stream early drops the workspace instead.
pub fn stream_then_release(
    file: File,
    workspace: Workspace,
) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static {
    futures::stream::try_unfold((file, workspace), |(mut file, workspace)| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let read = file.read(&mut buf).await?;
        if read == 0 {
            // close the handle before the directory goes away
            drop(file);
            workspace.release().await;
            return Ok(None);
        }
        buf.truncate(read);
        Ok::<_, io::Error>(Some((Bytes::from(buf), (file, workspace))))
    })
}
