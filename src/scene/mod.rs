//! Scene composition: one visual mesh plus invisible hit volumes.
//!
//! The [`SceneComposer`] builds one [`HitVolume`] per catalog record when
//! it is created and starts loading the visual mesh in the background.
//! Until the mesh resolves the scene reports [`SceneStatus::Loading`];
//! a failed load is surfaced as [`SceneStatus::Failed`] instead of an
//! endless loading state.
//!
//! Picking is only live while the scene is ready, matching the loading
//! placeholder replacing the whole 3D view.

mod hit_volume;
mod loader;

use std::time::Duration;

use glam::{Affine3A, EulerRot, Quat, Vec3};
pub use hit_volume::HitVolume;
pub use loader::{LoadPoll, MeshLoader};

use crate::catalog::Catalog;
use crate::mesh::{Aabb, TriangleMesh};
use crate::options::SceneOptions;
use crate::picking::{PickHit, Ray};

/// Placeholder for the 3D view while the mesh loads.
pub const LOADING_TEXT: &str = "Loading model...";

/// Coarse state of the visual mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    /// Mesh load in flight.
    Loading,
    /// Mesh available; picking is live.
    Ready,
    /// Mesh load failed; the 3D view shows an error.
    Failed,
}

/// The resolved visual mesh and its placement.
#[derive(Debug, Clone)]
pub struct VisualMesh {
    /// Mesh in model space.
    pub mesh: TriangleMesh,
    /// Model-to-world transform.
    pub transform: Affine3A,
}

impl VisualMesh {
    /// World-space bounds.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.mesh.bounds().map(|b| b.transformed(&self.transform))
    }
}

enum MeshState {
    Loading(MeshLoader),
    Ready(VisualMesh),
    Failed(String),
}

/// What a renderer should draw for the mesh slot.
#[derive(Debug, Clone, Copy)]
pub enum MeshFrame<'a> {
    /// Draw a loading placeholder.
    Loading {
        /// Placeholder text.
        text: &'static str,
    },
    /// Draw an error state with this message.
    Failed {
        /// Human-readable failure.
        message: &'a str,
    },
    /// Draw the mesh.
    Ready {
        /// Triangle soup in model space.
        mesh: &'a TriangleMesh,
        /// Model-to-world transform.
        transform: Affine3A,
    },
}

/// Renderer-facing snapshot of the scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    /// Visual mesh slot.
    pub mesh: MeshFrame<'a>,
    /// Hit volumes; each reports `visible() == false`.
    pub volumes: &'a [HitVolume],
}

/// Builds and owns the scene: the visual mesh slot and one hit volume per
/// catalog record.
pub struct SceneComposer {
    volumes: Vec<HitVolume>,
    mesh: MeshState,
    mesh_transform: Affine3A,
}

impl SceneComposer {
    /// Compose a scene for `catalog`, with the mesh arriving through
    /// `loader`.
    #[must_use]
    pub fn new(
        catalog: &Catalog,
        options: &SceneOptions,
        loader: MeshLoader,
    ) -> Self {
        let volumes: Vec<HitVolume> = catalog
            .iter()
            .enumerate()
            .map(|(index, record)| HitVolume::from_record(index, record))
            .collect();
        log::debug!("composed scene with {} hit volumes", volumes.len());

        let [rx, ry, rz] = options.mesh_rotation;
        let mesh_transform = Affine3A::from_scale_rotation_translation(
            Vec3::splat(options.mesh_scale),
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::ZERO,
        );

        Self {
            volumes,
            mesh: MeshState::Loading(loader),
            mesh_transform,
        }
    }

    /// Current status without checking the loader.
    #[must_use]
    pub fn status(&self) -> SceneStatus {
        match self.mesh {
            MeshState::Loading(_) => SceneStatus::Loading,
            MeshState::Ready(_) => SceneStatus::Ready,
            MeshState::Failed(_) => SceneStatus::Failed,
        }
    }

    /// Check the loader without blocking and advance the mesh state.
    pub fn poll(&mut self) -> SceneStatus {
        let outcome = match &self.mesh {
            MeshState::Loading(loader) => loader.try_recv(),
            _ => return self.status(),
        };
        self.resolve(outcome)
    }

    /// Block for up to `timeout` for the mesh to resolve.
    pub fn wait_for_mesh(&mut self, timeout: Duration) -> SceneStatus {
        let outcome = match &self.mesh {
            MeshState::Loading(loader) => loader.recv_timeout(timeout),
            _ => return self.status(),
        };
        self.resolve(outcome)
    }

    fn resolve(&mut self, outcome: LoadPoll) -> SceneStatus {
        match outcome {
            LoadPoll::Pending => {}
            LoadPoll::Loaded(mesh) => {
                log::info!("mesh ready: {} triangles", mesh.triangle_count());
                self.mesh = MeshState::Ready(VisualMesh {
                    mesh,
                    transform: self.mesh_transform,
                });
            }
            LoadPoll::Failed(message) => {
                log::error!("mesh load failed: {message}");
                self.mesh = MeshState::Failed(message);
            }
        }
        self.status()
    }

    /// The resolved mesh, if ready.
    #[must_use]
    pub fn visual_mesh(&self) -> Option<&VisualMesh> {
        match &self.mesh {
            MeshState::Ready(visual) => Some(visual),
            _ => None,
        }
    }

    /// Failure message, if the load failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match &self.mesh {
            MeshState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Hit volumes in catalog order.
    #[must_use]
    pub fn volumes(&self) -> &[HitVolume] {
        &self.volumes
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn frame(&self) -> SceneFrame<'_> {
        let mesh = match &self.mesh {
            MeshState::Loading(_) => MeshFrame::Loading { text: LOADING_TEXT },
            MeshState::Failed(message) => MeshFrame::Failed { message },
            MeshState::Ready(visual) => MeshFrame::Ready {
                mesh: &visual.mesh,
                transform: visual.transform,
            },
        };
        SceneFrame {
            mesh,
            volumes: &self.volumes,
        }
    }

    /// Nearest hit volume along `ray`, if the scene is ready.
    ///
    /// Volumes behind the nearest one are never reported. When two
    /// volumes are hit at exactly the same distance the one earlier in the
    /// catalog wins; this order is an implementation detail.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        if self.status() != SceneStatus::Ready {
            return None;
        }
        self.pick_volumes(ray)
    }

    fn pick_volumes(&self, ray: &Ray) -> Option<PickHit> {
        let mut nearest: Option<PickHit> = None;
        for volume in self.volumes.iter().filter(|v| v.pickable()) {
            let Some(distance) = volume.intersect(ray) else {
                continue;
            };
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(PickHit {
                    record_index: volume.record_index(),
                    distance,
                    point: ray.at(distance),
                });
            }
        }
        if let Some(hit) = &nearest {
            log::debug!(
                "pick hit record {} at distance {:.3}",
                hit.record_index,
                hit.distance
            );
        }
        nearest
    }
}
