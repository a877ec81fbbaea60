//! Session core for a DICOM study viewer.
//!
//! Binds study/series/image state to an external rendering engine and
//! tool-state engine, both injected as capability traits. The crate decodes
//! nothing and draws nothing itself: it sequences asynchronous image
//! fetches, groups completed images into series by their DICOM tags, decides
//! which series/image a viewport shows, and toggles which interaction tool
//! is bound to which mouse button.

pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod thumbnail;
pub mod utils;
pub mod viewer;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{
    FixedSurface, MouseButtons, RenderingEngine, StackStateKind, StackToolState, SurfaceId,
    SurfaceProvider, Tool, ToolStateEngine, ViewportTransform, Voi,
};
pub use error::{EngineError, LoadError, Result, ViewerError};
pub use loader::{LoadOutcome, LoadRequest};
pub use model::{ImageId, LoadedImage, Series};
pub use thumbnail::ThumbnailAdapter;
pub use viewer::{StudyViewer, ViewerOptions};
pub use viewport::ViewportAdapter;
