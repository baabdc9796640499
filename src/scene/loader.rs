//! Background mesh loading.
//!
//! The visual mesh is read and parsed off the UI thread. The load is
//! one-shot: no cancellation, no timeout, no retry. The UI thread observes
//! completion through non-blocking [`MeshLoader::try_recv`].

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crate::error::TwinError;
use crate::mesh::{load_stl, StlError, TriangleMesh};

/// Outcome of checking on a load.
#[derive(Debug)]
pub enum LoadPoll {
    /// Still running.
    Pending,
    /// Finished with a mesh.
    Loaded(TriangleMesh),
    /// Finished with an error, or the loader went away without reporting.
    Failed(String),
}

/// Handle on a single in-flight mesh load.
pub struct MeshLoader {
    result_rx: mpsc::Receiver<Result<TriangleMesh, StlError>>,
}

impl MeshLoader {
    /// Load an STL file on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self, TwinError> {
        let path = path.into();
        log::debug!("loading mesh from {}", path.display());
        Self::spawn_with(move || load_stl(&path))
    }

    /// Run an arbitrary loading function on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn_with<F>(load: F) -> Result<Self, TwinError>
    where
        F: FnOnce() -> Result<TriangleMesh, StlError> + Send + 'static,
    {
        let (result_tx, result_rx) = mpsc::channel();

        // Detached: a load that never finishes leaves the scene loading
        // rather than blocking shutdown.
        let _handle = std::thread::Builder::new()
            .name("mesh-loader".into())
            .spawn(move || {
                let _ = result_tx.send(load());
            })
            .map_err(TwinError::ThreadSpawn)?;

        Ok(Self { result_rx })
    }

    /// A loader whose result is already available.
    #[must_use]
    pub fn preloaded(result: Result<TriangleMesh, StlError>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let _ = result_tx.send(result);
        Self { result_rx }
    }

    /// Non-blocking check for a finished load.
    #[must_use]
    pub fn try_recv(&self) -> LoadPoll {
        match self.result_rx.try_recv() {
            Ok(result) => Self::finish(result),
            Err(mpsc::TryRecvError::Empty) => LoadPoll::Pending,
            Err(mpsc::TryRecvError::Disconnected) => Self::vanished(),
        }
    }

    /// Block for up to `timeout` waiting for the load to finish.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> LoadPoll {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => Self::finish(result),
            Err(mpsc::RecvTimeoutError::Timeout) => LoadPoll::Pending,
            Err(mpsc::RecvTimeoutError::Disconnected) => Self::vanished(),
        }
    }

    fn finish(result: Result<TriangleMesh, StlError>) -> LoadPoll {
        match result {
            Ok(mesh) => LoadPoll::Loaded(mesh),
            Err(e) => LoadPoll::Failed(e.to_string()),
        }
    }

    fn vanished() -> LoadPoll {
        LoadPoll::Failed("mesh loader exited without a result".to_owned())
    }
}
