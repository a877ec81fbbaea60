use super::SurfaceId;
use crate::error::EngineError;
use crate::model::ImageId;

/// Interaction tools the viewer binds to mouse buttons on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    Wwwc,
    Pan,
    Zoom,
    Probe,
    Length,
    Angle,
    EllipticalRoi,
    RectangleRoi,
    DragProbe,
    ZoomTouchPinch,
    PanMultiTouch,
    StackScroll,
    StackScrollMouseWheel,
}

impl Tool {
    /// Every tool the viewport registers with the tool engine at attach time.
    pub const ALL: [Tool; 13] = [
        Tool::Wwwc,
        Tool::Pan,
        Tool::Zoom,
        Tool::Probe,
        Tool::Length,
        Tool::Angle,
        Tool::EllipticalRoi,
        Tool::RectangleRoi,
        Tool::DragProbe,
        Tool::ZoomTouchPinch,
        Tool::PanMultiTouch,
        Tool::StackScroll,
        Tool::StackScrollMouseWheel,
    ];

    /// Measurement/annotation tools whose state `reset_image` clears.
    pub const MEASUREMENT: [Tool; 5] = [
        Tool::Length,
        Tool::Angle,
        Tool::Probe,
        Tool::EllipticalRoi,
        Tool::RectangleRoi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Wwwc => "Wwwc",
            Tool::Pan => "Pan",
            Tool::Zoom => "Zoom",
            Tool::Probe => "Probe",
            Tool::Length => "Length",
            Tool::Angle => "Angle",
            Tool::EllipticalRoi => "EllipticalRoi",
            Tool::RectangleRoi => "RectangleRoi",
            Tool::DragProbe => "DragProbe",
            Tool::ZoomTouchPinch => "ZoomTouchPinch",
            Tool::PanMultiTouch => "PanMultiTouch",
            Tool::StackScroll => "StackScroll",
            Tool::StackScrollMouseWheel => "StackScrollMouseWheel",
        }
    }
}

/// Mouse button mask for tool activation. The values follow the wrapped
/// engine's convention: primary = 1, secondary = 2, middle = 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MouseButtons(u8);

impl MouseButtons {
    /// Activation without a button binding (wheel/keyboard driven tools).
    pub const NONE: MouseButtons = MouseButtons(0);
    pub const PRIMARY: MouseButtons = MouseButtons(1);
    pub const SECONDARY: MouseButtons = MouseButtons(2);
    pub const MIDDLE: MouseButtons = MouseButtons(4);

    pub fn mask(self) -> u8 {
        self.0
    }
}

/// Kinds of per-surface state managers the stack tools rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStateKind {
    Stack,
    PlayClip,
}

impl StackStateKind {
    pub fn name(self) -> &'static str {
        match self {
            StackStateKind::Stack => "stack",
            StackStateKind::PlayClip => "playClip",
        }
    }
}

/// Navigable image stack registered with the tool engine so wheel and
/// keyboard scrolling work, plus the clip frame rate once playback ran.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackToolState {
    pub current_image_index: usize,
    pub image_ids: Vec<ImageId>,
    pub frame_rate: Option<f64>,
}

/// Capability interface over the external tool-state engine.
pub trait ToolStateEngine {
    fn init(&self);

    fn add_tool(&self, tool: Tool);

    fn set_tool_active(
        &self,
        surface: SurfaceId,
        tool: Tool,
        buttons: MouseButtons,
    ) -> Result<(), EngineError>;

    fn set_tool_disabled(&self, surface: SurfaceId, tool: Tool);

    fn add_stack_state_manager(&self, surface: SurfaceId, kind: StackStateKind);

    fn add_tool_state(&self, surface: SurfaceId, state: StackToolState);

    fn stack_state(&self, surface: SurfaceId) -> Option<StackToolState>;

    fn clear_tool_state(&self, surface: SurfaceId, tool: Tool);

    fn play_clip(&self, surface: SurfaceId, frame_rate: f64);

    fn stop_clip(&self, surface: SurfaceId);

    fn save_as(&self, surface: SurfaceId, file_name: &str) -> Result<(), EngineError>;
}
