use crate::error::{EngineError, LoadError};
use crate::model::{ImageId, LoadedImage};
use futures::future::LocalBoxFuture;
use std::fmt;
use std::rc::Rc;

/// Handle to one rendering target owned by the external engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Late-bound surface resolution.
///
/// Adapters never cache a surface across calls as authoritative state; they
/// re-resolve through the provider before acting, mirroring how the hosting
/// UI may rebind the underlying drawable between events.
pub trait SurfaceProvider {
    fn resolve(&self) -> SurfaceId;
}

/// Provider for hosts whose surface never rebinds.
#[derive(Debug, Clone, Copy)]
pub struct FixedSurface(pub SurfaceId);

impl SurfaceProvider for FixedSurface {
    fn resolve(&self) -> SurfaceId {
        self.0
    }
}

/// Window width/center pair driving brightness and contrast.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Voi {
    pub window_width: f64,
    pub window_center: f64,
}

/// The engine-side display transform for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub voi: Voi,
    pub invert: bool,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            voi: Voi::default(),
            invert: false,
        }
    }
}

/// Capability interface over the external rendering engine.
///
/// The crate performs no drawing of its own; every pixel-facing operation is
/// delegated through this trait so tests can substitute a recording mock.
pub trait RenderingEngine {
    fn enable(&self, surface: SurfaceId) -> Result<(), EngineError>;

    fn disable(&self, surface: SurfaceId) -> Result<(), EngineError>;

    fn resize(&self, surface: SurfaceId, force: bool);

    /// Engine-chosen default transform for displaying `image` on `surface`.
    fn default_viewport(&self, surface: SurfaceId, image: &LoadedImage) -> ViewportTransform;

    fn display_image(
        &self,
        surface: SurfaceId,
        image: &Rc<LoadedImage>,
        transform: ViewportTransform,
    ) -> Result<(), EngineError>;

    fn fit_to_window(&self, surface: SurfaceId);

    /// Current transform, if anything has been displayed on the surface.
    fn viewport(&self, surface: SurfaceId) -> Option<ViewportTransform>;

    fn set_viewport(
        &self,
        surface: SurfaceId,
        transform: ViewportTransform,
    ) -> Result<(), EngineError>;

    /// Forces a redraw of the currently displayed image.
    fn update_image(&self, surface: SurfaceId);

    /// Fetches and caches one image. The future is driven on the hosting
    /// event loop; completions may arrive in any order.
    fn load_and_cache(
        &self,
        image_id: &ImageId,
    ) -> LocalBoxFuture<'static, Result<Rc<LoadedImage>, LoadError>>;
}
