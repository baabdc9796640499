//! Headless viewer core: scene, camera, selection and panel wired together.
//!
//! A front end owns one [`TwinViewer`], forwards window events through
//! [`TwinViewer::handle_event`] (or executes [`ViewerCommand`]s directly),
//! calls [`TwinViewer::poll`] once per frame, and draws
//! [`TwinViewer::scene_frame`] and [`TwinViewer::panel_view`].
//!
//! ```no_run
//! # use turbine_twin::options::Options;
//! # use turbine_twin::viewer::TwinViewer;
//! let mut viewer = TwinViewer::from_options(&Options::default())?;
//! let _ = viewer.poll();
//! println!("{}", viewer.panel_view());
//! # Ok::<(), turbine_twin::error::TwinError>(())
//! ```

mod command;

use std::time::Duration;

pub use command::ViewerCommand;

use crate::camera::OrbitCamera;
use crate::catalog::Catalog;
use crate::error::TwinError;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::panel::{DetailPanel, PanelView, SELECT_HINT};
use crate::picking::{PickHit, Ray};
use crate::scene::{MeshLoader, SceneComposer, SceneFrame, SceneStatus};
use crate::selection::{CursorAffordance, HoverState, SelectionStore};

/// Viewport used until the first resize.
const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// The interactive twin: one scene, one camera, one selection.
pub struct TwinViewer {
    catalog: Catalog,
    scene: SceneComposer,
    camera: OrbitCamera,
    selection: SelectionStore,
    hover: HoverState,
    panel: DetailPanel,
    input: InputProcessor,
    viewport: (u32, u32),
    framed: bool,
}

impl TwinViewer {
    /// Viewer over `catalog` with the mesh arriving through `loader`.
    #[must_use]
    pub fn new(options: &Options, catalog: Catalog, loader: MeshLoader) -> Self {
        let (width, height) = DEFAULT_VIEWPORT;
        let scene = SceneComposer::new(&catalog, &options.scene, loader);
        Self {
            catalog,
            scene,
            camera: OrbitCamera::new(
                &options.camera,
                width as f32 / height as f32,
            ),
            selection: SelectionStore::new(),
            hover: HoverState::default(),
            panel: DetailPanel::new(options.palette.clone()),
            input: InputProcessor::new(&options.input),
            viewport: DEFAULT_VIEWPORT,
            framed: false,
        }
    }

    /// Load the configured catalog and start loading the configured mesh.
    ///
    /// # Errors
    ///
    /// Catalog load failures, or [`TwinError::ThreadSpawn`] if the mesh
    /// loader cannot start. Mesh read or parse failures are reported
    /// later through [`SceneStatus::Failed`].
    pub fn from_options(options: &Options) -> Result<Self, TwinError> {
        let catalog = options.load_catalog()?;
        log::info!("catalog loaded: {} records", catalog.len());
        let loader = MeshLoader::spawn(options.scene.mesh_path.clone())?;
        Ok(Self::new(options, catalog, loader))
    }

    /// Advance the mesh load. The first time the mesh becomes ready the
    /// camera is framed on it.
    pub fn poll(&mut self) -> SceneStatus {
        let status = self.scene.poll();
        self.frame_once(status);
        status
    }

    /// Block for up to `timeout` waiting for the mesh.
    pub fn wait_for_mesh(&mut self, timeout: Duration) -> SceneStatus {
        let status = self.scene.wait_for_mesh(timeout);
        self.frame_once(status);
        status
    }

    fn frame_once(&mut self, status: SceneStatus) {
        if status == SceneStatus::Ready && !self.framed {
            self.framed = true;
            self.recenter_camera();
        }
    }

    /// Translate a raw event and execute the resulting command, if any.
    /// Returns `true` if the selection changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        self.input
            .handle_event(event)
            .is_some_and(|cmd| self.execute(cmd))
    }

    /// Execute a single command. Returns `true` if the selection changed.
    pub fn execute(&mut self, cmd: ViewerCommand) -> bool {
        match cmd {
            ViewerCommand::Hover { x, y } => {
                match self.pick_at(x, y) {
                    Some(hit) => self.hover.enter(hit.record_index),
                    None => self.hover.leave(),
                }
                false
            }
            ViewerCommand::Select { x, y } => self.select_at(x, y),
            ViewerCommand::PointerLeave => {
                self.hover.leave();
                false
            }
            ViewerCommand::Rotate { delta } => {
                self.camera.rotate(delta);
                false
            }
            ViewerCommand::Pan { delta } => {
                self.camera.pan(delta);
                false
            }
            ViewerCommand::Zoom { delta } => {
                self.camera.zoom(delta);
                false
            }
            ViewerCommand::RecenterCamera => {
                self.recenter_camera();
                false
            }
            ViewerCommand::Resize { width, height } => {
                if width > 0 && height > 0 {
                    self.viewport = (width, height);
                    self.camera.resize(width, height);
                }
                false
            }
        }
    }

    /// Pick at a screen point and, on a hit, replace the selection. A miss
    /// leaves the selection as it was.
    fn select_at(&mut self, x: f32, y: f32) -> bool {
        let Some(hit) = self.pick_at(x, y) else {
            return false;
        };
        let Some(record) = self.catalog.get(hit.record_index) else {
            log::warn!("pick resolved to unknown record {}", hit.record_index);
            return false;
        };
        let changed = self.selection.current() != Some(record);
        self.selection.select(record.clone());
        changed
    }

    /// Nearest hit under a screen point.
    #[must_use]
    pub fn pick_at(&self, x: f32, y: f32) -> Option<PickHit> {
        let ray = self.ray_at(x, y)?;
        self.scene.pick(&ray)
    }

    /// World ray through a screen point of the current viewport.
    #[must_use]
    pub fn ray_at(&self, x: f32, y: f32) -> Option<Ray> {
        let (width, height) = self.viewport;
        self.camera
            .camera
            .ray_through(x, y, width as f32, height as f32)
    }

    fn recenter_camera(&mut self) {
        if let Some(bounds) =
            self.scene.visual_mesh().and_then(|mesh| mesh.world_bounds())
        {
            self.camera.fit_to_bounds(&bounds);
        }
    }

    /// Renderer-facing scene snapshot.
    #[must_use]
    pub fn scene_frame(&self) -> SceneFrame<'_> {
        self.scene.frame()
    }

    /// Current mesh status.
    #[must_use]
    pub fn status(&self) -> SceneStatus {
        self.scene.status()
    }

    /// Mesh load failure message, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.scene.failure()
    }

    /// What the detail panel shows.
    #[must_use]
    pub fn panel_view(&self) -> PanelView {
        self.panel.render(&self.selection)
    }

    /// Hint to overlay on the 3D view; shown only until something is
    /// selected.
    #[must_use]
    pub fn overlay_hint(&self) -> Option<&'static str> {
        self.selection.is_empty().then_some(SELECT_HINT)
    }

    /// Catalog index of the record under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered()
    }

    /// Cursor to show over the 3D view.
    #[must_use]
    pub fn cursor(&self) -> CursorAffordance {
        self.hover.cursor()
    }

    /// The selection store.
    #[must_use]
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// The inspection catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The orbit camera.
    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use glam::{Vec2, Vec3};

    use super::*;
    use crate::input::MouseButton;
    use crate::mesh::{StlError, TriangleMesh};
    use crate::options::SceneOptions;
    use crate::panel::BadgeTone;

    /// Two triangles spanning roughly the turbine's extent, unscaled.
    fn turbine_sized_mesh() -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let (lo, hi) = (Vec3::new(-10.0, -12.0, -3.0), Vec3::new(10.0, 18.0, 3.0));
        mesh.push_triangle(
            Vec3::Z,
            [lo, Vec3::new(hi.x, lo.y, lo.z), Vec3::new(lo.x, hi.y, hi.z)],
        );
        mesh.push_triangle(Vec3::Z, [hi, Vec3::new(lo.x, hi.y, lo.z), lo]);
        mesh
    }

    fn options() -> Options {
        Options {
            scene: SceneOptions {
                mesh_scale: 1.0,
                mesh_rotation: [0.0; 3],
                ..SceneOptions::default()
            },
            ..Options::default()
        }
    }

    fn ready_viewer() -> TwinViewer {
        let mut viewer = TwinViewer::new(
            &options(),
            Catalog::builtin().unwrap(),
            MeshLoader::preloaded(Ok(turbine_sized_mesh())),
        );
        assert_eq!(viewer.poll(), SceneStatus::Ready);
        viewer
    }

    fn screen_point_of(viewer: &TwinViewer, world: Vec3) -> Vec2 {
        let (w, h) = viewer.viewport();
        viewer
            .camera()
            .camera
            .project_to_screen(world, w as f32, h as f32)
            .unwrap()
    }

    fn click(viewer: &mut TwinViewer, at: Vec2) -> bool {
        let _ = viewer.handle_event(InputEvent::CursorMoved { x: at.x, y: at.y });
        let _ = viewer.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        viewer.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        })
    }

    #[test]
    fn starts_with_empty_panel() {
        let viewer = ready_viewer();
        assert!(viewer.selection().is_empty());
        assert!(matches!(viewer.panel_view(), PanelView::Empty { .. }));
    }

    #[test]
    fn clicking_blade_one_shows_its_report() {
        let mut viewer = ready_viewer();
        let at = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        assert!(click(&mut viewer, at));

        assert_eq!(viewer.selection().current().unwrap().id, "aspa1");
        let PanelView::Record(view) = viewer.panel_view() else {
            panic!("expected a record view");
        };
        assert_eq!(view.badge.label, "Critical");
        assert_eq!(view.badge.tone, BadgeTone::Critical);
        assert_eq!(view.anomaly_count, 3);
    }

    #[test]
    fn hint_shows_until_first_pick() {
        let mut viewer = ready_viewer();
        assert_eq!(viewer.overlay_hint(), Some(SELECT_HINT));

        assert!(!click(&mut viewer, Vec2::ZERO));
        assert_eq!(viewer.overlay_hint(), Some(SELECT_HINT));

        let at = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        assert!(click(&mut viewer, at));
        assert_eq!(viewer.overlay_hint(), None);
    }

    #[test]
    fn miss_keeps_previous_selection() {
        let mut viewer = ready_viewer();
        let at = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        assert!(click(&mut viewer, at));

        assert!(!click(&mut viewer, Vec2::ZERO));
        assert_eq!(viewer.selection().current().unwrap().id, "aspa1");
    }

    #[test]
    fn second_click_on_same_part_changes_nothing() {
        let mut viewer = ready_viewer();
        let at = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        assert!(click(&mut viewer, at));
        let before = viewer.selection().clone();
        assert!(!click(&mut viewer, at));
        assert_eq!(viewer.selection(), &before);
    }

    #[test]
    fn hover_sets_pointer_until_leave() {
        let mut viewer = ready_viewer();
        let at = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        let _ = viewer.execute(ViewerCommand::Hover { x: at.x, y: at.y });
        assert_eq!(viewer.cursor(), CursorAffordance::Pointer);
        let _ = viewer.execute(ViewerCommand::PointerLeave);
        assert_eq!(viewer.cursor(), CursorAffordance::Default);

        let _ = viewer.execute(ViewerCommand::Hover { x: 0.0, y: 0.0 });
        assert_eq!(viewer.cursor(), CursorAffordance::Default);
        // Hover never selects
        assert!(viewer.selection().is_empty());
    }

    #[test]
    fn hover_moves_between_volumes_directly() {
        let mut viewer = ready_viewer();
        let catalog = viewer.catalog().clone();
        let blade = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        let tower = screen_point_of(&viewer, Vec3::new(0.0, -6.0, 0.0));

        let _ = viewer.execute(ViewerCommand::Hover { x: blade.x, y: blade.y });
        assert_eq!(viewer.hovered(), catalog.index_of("aspa1"));
        let _ = viewer.execute(ViewerCommand::Hover { x: tower.x, y: tower.y });
        assert_eq!(viewer.hovered(), catalog.index_of("torre"));
        assert_eq!(viewer.cursor(), CursorAffordance::Pointer);
    }

    #[test]
    fn first_ready_poll_frames_the_mesh() {
        let viewer = ready_viewer();
        let center = Vec3::new(0.0, 3.0, 0.0);
        assert!((viewer.camera().focus_point() - center).length() < 1e-4);
    }

    #[test]
    fn clicks_while_loading_are_ignored() {
        let (_release_tx, release_rx) = mpsc::channel::<()>();
        let loader = MeshLoader::spawn_with(move || {
            let _ = release_rx.recv();
            Err(StlError::Empty)
        })
        .unwrap();
        let mut viewer =
            TwinViewer::new(&options(), Catalog::builtin().unwrap(), loader);
        assert_eq!(viewer.poll(), SceneStatus::Loading);
        assert!(matches!(
            viewer.scene_frame().mesh,
            crate::scene::MeshFrame::Loading {
                text: crate::scene::LOADING_TEXT
            }
        ));

        let (w, h) = viewer.viewport();
        assert!(!viewer.execute(ViewerCommand::Select {
            x: w as f32 / 2.0,
            y: h as f32 / 2.0,
        }));
        assert!(viewer.selection().is_empty());
    }

    #[test]
    fn resize_updates_viewport_and_aspect() {
        let mut viewer = ready_viewer();
        let _ = viewer.execute(ViewerCommand::Resize {
            width: 600,
            height: 600,
        });
        assert_eq!(viewer.viewport(), (600, 600));
        assert_eq!(viewer.camera().camera.aspect, 1.0);

        let _ = viewer.execute(ViewerCommand::Resize {
            width: 0,
            height: 600,
        });
        assert_eq!(viewer.viewport(), (600, 600));
    }

    #[test]
    fn shipped_assets_end_to_end() {
        let mut options = Options::default();
        options.scene.mesh_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets/single_color.stl");
        let mut viewer = TwinViewer::from_options(&options).unwrap();
        assert_eq!(
            viewer.wait_for_mesh(Duration::from_secs(10)),
            SceneStatus::Ready
        );

        let at = screen_point_of(&viewer, Vec3::new(0.0, 8.0, 2.5));
        assert!(viewer.execute(ViewerCommand::Select { x: at.x, y: at.y }));
        assert_eq!(viewer.selection().current().unwrap().id, "aspa1");
    }

    #[test]
    fn failed_mesh_reports_failure() {
        let mut viewer = TwinViewer::new(
            &options(),
            Catalog::builtin().unwrap(),
            MeshLoader::preloaded(Err(StlError::Empty)),
        );
        assert_eq!(viewer.poll(), SceneStatus::Failed);
        assert!(matches!(
            viewer.scene_frame().mesh,
            crate::scene::MeshFrame::Failed { .. }
        ));
        assert_eq!(viewer.failure(), Some("mesh contains no triangles"));
    }
}
