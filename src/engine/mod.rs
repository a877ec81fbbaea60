pub mod rendering;
pub mod tools;

pub use rendering::{
    FixedSurface, RenderingEngine, SurfaceId, SurfaceProvider, ViewportTransform, Voi,
};
pub use tools::{MouseButtons, StackStateKind, StackToolState, Tool, ToolStateEngine};
