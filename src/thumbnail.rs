use crate::engine::{RenderingEngine, SurfaceId, SurfaceProvider};
use crate::error::EngineError;
use crate::model::LoadedImage;
use std::rc::Rc;

/// Fits and draws a single image into a small preview surface.
///
/// Deliberately minimal: no navigation, no tool state, no series concept.
/// `refresh` re-runs the same fit/display calls and is cheap and idempotent,
/// so the host may call it on every change-detection cycle.
pub struct ThumbnailAdapter {
    rendering: Rc<dyn RenderingEngine>,
    provider: Box<dyn SurfaceProvider>,
    surface: SurfaceId,
    image: Option<Rc<LoadedImage>>,
}

impl ThumbnailAdapter {
    pub fn new(rendering: Rc<dyn RenderingEngine>, provider: Box<dyn SurfaceProvider>) -> Self {
        let surface = provider.resolve();
        Self {
            rendering,
            provider,
            surface,
            image: None,
        }
    }

    /// Enables the preview surface and draws the current image, if any.
    pub fn attach(&mut self) -> Result<(), EngineError> {
        let surface = self.surface();
        self.rendering.enable(surface)?;
        self.refresh()
    }

    fn surface(&mut self) -> SurfaceId {
        self.surface = self.provider.resolve();
        self.surface
    }

    pub fn image(&self) -> Option<&Rc<LoadedImage>> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<Rc<LoadedImage>>) -> Result<(), EngineError> {
        self.image = image;
        self.refresh()
    }

    /// Redraws the preview. No-op without an image.
    pub fn refresh(&mut self) -> Result<(), EngineError> {
        let surface = self.surface();
        if let Some(image) = self.image.clone() {
            let transform = self.rendering.default_viewport(surface, &image);
            self.rendering.display_image(surface, &image, transform)?;
            self.rendering.fit_to_window(surface);
            self.rendering.resize(surface, true);
        }
        Ok(())
    }
}
