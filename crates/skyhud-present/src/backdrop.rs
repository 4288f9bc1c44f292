//! What is drawn behind the HUD: a map-tile camera when credentials are
//! available, otherwise a procedural field of stylised peaks.
//!
//! The choice is made once by [`select_backdrop`]. A tile-service failure at
//! that point degrades to the procedural backdrop for the rest of the
//! session; the flight simulation is never told.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use skyhud_config::MapCredentials;
use skyhud_sim::{FlightState, FrameContext, GeoPosition, PresentationSink};
use tracing::{info, warn};

/// Number of peaks in the procedural backdrop.
pub const PEAK_COUNT: usize = 140;

const STATUS_PROCEDURAL: &str =
    "Running in stylized terrain mode. Add an API key for real 3D tiles.";
const STATUS_TILES: &str = "Photorealistic 3D tiles engaged. Fly safe!";
const STATUS_TILE_FAILURE: &str = "Failed to load Google Maps. Staying in stylized terrain mode.";

/// Errors raised by a tile service.
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    /// The service could not be reached or refused the credentials.
    #[error("tile service unavailable: {0}")]
    Unavailable(String),
}

/// Which backdrop is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropKind {
    Tiles,
    Procedural,
}

/// A map camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub center: GeoPosition,
    /// Degrees clockwise from north.
    pub heading: f64,
    /// Degrees from straight down.
    pub tilt: f64,
    pub zoom: f64,
}

impl CameraPose {
    /// Pose used when the tile map is first created.
    pub fn initial(state: &FlightState) -> Self {
        Self {
            center: state.position,
            heading: state.heading,
            tilt: 67.5,
            zoom: 12.0,
        }
    }

    /// Chase pose for the current state: nose-down tilts the view forward,
    /// faster flight zooms in.
    pub fn follow(state: &FlightState) -> Self {
        Self {
            center: state.position,
            heading: state.heading,
            tilt: 68.0 + state.pitch * -0.35,
            zoom: 12.2 + state.speed / 620.0,
        }
    }
}

/// External map-tile service.
pub trait TileService {
    /// Establish the session. Called once.
    fn connect(&mut self, credentials: &MapCredentials, initial: &CameraPose)
    -> Result<(), BackdropError>;

    /// Move the map camera.
    fn move_camera(&mut self, pose: &CameraPose);
}

/// A tile service with nothing attached: accepts any credentials and keeps
/// the last pose it was given.
#[derive(Debug, Default)]
pub struct DetachedTileService {
    last_pose: Option<CameraPose>,
}

impl DetachedTileService {
    /// The last pose the camera was moved to.
    pub fn last_pose(&self) -> Option<&CameraPose> {
        self.last_pose.as_ref()
    }
}

impl TileService for DetachedTileService {
    fn connect(
        &mut self,
        _credentials: &MapCredentials,
        initial: &CameraPose,
    ) -> Result<(), BackdropError> {
        self.last_pose = Some(*initial);
        Ok(())
    }

    fn move_camera(&mut self, pose: &CameraPose) {
        self.last_pose = Some(*pose);
    }
}

/// The active backdrop. Also a presentation sink.
pub trait Backdrop: PresentationSink {
    fn kind(&self) -> BackdropKind;

    /// User-visible status line describing the mode.
    fn status(&self) -> &str;
}

/// Tile-backed map camera.
pub struct TileCamera {
    service: Box<dyn TileService>,
    pose: CameraPose,
}

impl TileCamera {
    /// Latest pose sent to the service.
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }
}

impl PresentationSink for TileCamera {
    fn present(&mut self, state: &FlightState, _frame: &FrameContext) {
        self.pose = CameraPose::follow(state);
        self.service.move_camera(&self.pose);
    }
}

impl Backdrop for TileCamera {
    fn kind(&self) -> BackdropKind {
        BackdropKind::Tiles
    }

    fn status(&self) -> &str {
        STATUS_TILES
    }
}

/// One stylised mountain, in viewport-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Horizontal centre, fraction of width in `[-0.1, 1.1)`.
    pub x: f32,
    /// Vertical centre, fraction of height in `[0.2, 1.0)`.
    pub y: f32,
    /// Depth in `[0, 1)`; larger is closer and bigger.
    pub z: f32,
}

impl Peak {
    /// Half-size of the peak's triangle in pixels.
    pub fn size(&self) -> f32 {
        80.0 + self.z * 220.0
    }

    /// Triangle `[left base, apex, right base]` in pixels for a viewport.
    pub fn triangle(&self, width: f32, height: f32) -> [[f32; 2]; 3] {
        let x = self.x * width;
        let y = self.y * height;
        let size = self.size();
        [[x - size, y + size], [x, y - size], [x + size, y + size]]
    }
}

/// Procedurally drawn terrain. Static: the peaks never move.
pub struct ProceduralBackdrop {
    peaks: Vec<Peak>,
    status: &'static str,
}

impl ProceduralBackdrop {
    /// Generate [`PEAK_COUNT`] peaks from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let peaks = (0..PEAK_COUNT)
            .map(|_| Peak {
                x: rng.gen_range(-0.1..1.1),
                y: rng.gen_range(0.2..1.0),
                z: rng.gen_range(0.0..1.0),
            })
            .collect();
        Self {
            peaks,
            status: STATUS_PROCEDURAL,
        }
    }

    fn after_failure(seed: u64) -> Self {
        Self {
            status: STATUS_TILE_FAILURE,
            ..Self::new(seed)
        }
    }

    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }
}

impl PresentationSink for ProceduralBackdrop {
    fn present(&mut self, _state: &FlightState, _frame: &FrameContext) {}
}

impl Backdrop for ProceduralBackdrop {
    fn kind(&self) -> BackdropKind {
        BackdropKind::Procedural
    }

    fn status(&self) -> &str {
        self.status
    }
}

/// Pick the backdrop for this session.
///
/// Without credentials the procedural backdrop is used and `service` is
/// dropped untouched. A failed connection also falls back, permanently.
pub fn select_backdrop(
    credentials: Option<&MapCredentials>,
    mut service: Box<dyn TileService>,
    state: &FlightState,
    seed: u64,
) -> Box<dyn Backdrop> {
    let backdrop: Box<dyn Backdrop> = match credentials {
        None => Box::new(ProceduralBackdrop::new(seed)),
        Some(credentials) => {
            let initial = CameraPose::initial(state);
            match service.connect(credentials, &initial) {
                Ok(()) => Box::new(TileCamera {
                    service,
                    pose: initial,
                }),
                Err(e) => {
                    warn!("Tile service failed: {e}");
                    Box::new(ProceduralBackdrop::after_failure(seed))
                }
            }
        }
    };
    info!("{}", backdrop.status());
    backdrop
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingService;

    impl TileService for FailingService {
        fn connect(&mut self, _: &MapCredentials, _: &CameraPose) -> Result<(), BackdropError> {
            Err(BackdropError::Unavailable("script load failed".to_string()))
        }

        fn move_camera(&mut self, _: &CameraPose) {
            panic!("camera moved after failed connect");
        }
    }

    fn creds() -> MapCredentials {
        MapCredentials {
            api_key: "key".to_string(),
            map_id: String::new(),
        }
    }

    fn frame() -> FrameContext {
        FrameContext {
            dt: 0.016,
            frame: 1,
            sim_time: 0.016,
            activate_audio: false,
        }
    }

    #[test]
    fn test_follow_pose() {
        let state = FlightState {
            pitch: -10.0,
            speed: 310.0,
            ..FlightState::default()
        };
        let pose = CameraPose::follow(&state);
        assert!((pose.tilt - 71.5).abs() < 1e-9);
        assert!((pose.zoom - 12.7).abs() < 1e-9);
        assert_eq!(pose.center, state.position);
        assert_eq!(pose.heading, state.heading);
    }

    #[test]
    fn test_no_credentials_selects_procedural() {
        let backdrop = select_backdrop(
            None,
            Box::new(DetachedTileService::default()),
            &FlightState::default(),
            1,
        );
        assert_eq!(backdrop.kind(), BackdropKind::Procedural);
        assert_eq!(backdrop.status(), STATUS_PROCEDURAL);
    }

    #[test]
    fn test_credentials_select_tiles() {
        let mut backdrop = select_backdrop(
            Some(&creds()),
            Box::new(DetachedTileService::default()),
            &FlightState::default(),
            1,
        );
        assert_eq!(backdrop.kind(), BackdropKind::Tiles);
        backdrop.present(&FlightState::default(), &frame());
        assert_eq!(backdrop.status(), STATUS_TILES);
    }

    #[test]
    fn test_failed_connect_falls_back() {
        let mut backdrop = select_backdrop(
            Some(&creds()),
            Box::new(FailingService),
            &FlightState::default(),
            1,
        );
        assert_eq!(backdrop.kind(), BackdropKind::Procedural);
        assert_eq!(backdrop.status(), STATUS_TILE_FAILURE);
        backdrop.present(&FlightState::default(), &frame());
    }

    #[test]
    fn test_detached_service_records_pose() {
        let mut service = DetachedTileService::default();
        let state = FlightState::default();
        service.connect(&creds(), &CameraPose::initial(&state)).unwrap();
        assert_eq!(service.last_pose().unwrap().zoom, 12.0);
        service.move_camera(&CameraPose::follow(&state));
        assert!((service.last_pose().unwrap().tilt - 70.1).abs() < 1e-9);
    }

    #[test]
    fn test_peaks_in_range_and_seeded() {
        let a = ProceduralBackdrop::new(9);
        let b = ProceduralBackdrop::new(9);
        assert_eq!(a.peaks().len(), PEAK_COUNT);
        assert_eq!(a.peaks(), b.peaks());
        for peak in a.peaks() {
            assert!((-0.1..1.1).contains(&peak.x));
            assert!((0.2..1.0).contains(&peak.y));
            assert!((0.0..1.0).contains(&peak.z));
        }
    }

    #[test]
    fn test_peak_triangle() {
        let peak = Peak {
            x: 0.5,
            y: 0.5,
            z: 0.0,
        };
        let tri = peak.triangle(800.0, 600.0);
        assert_eq!(tri, [[320.0, 380.0], [400.0, 220.0], [480.0, 380.0]]);
    }
}
