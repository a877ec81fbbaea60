//! Recording mock engines for exercising the adapters without a real
//! rendering stack. Call logs are plain `RefCell` fields so tests can assert
//! on them directly.

use crate::engine::{
    MouseButtons, RenderingEngine, StackStateKind, StackToolState, SurfaceId, Tool,
    ToolStateEngine, ViewportTransform,
};
use crate::error::{EngineError, LoadError};
use crate::loader::LoadOutcome;
use crate::model::{ImageId, LoadedImage};
use futures::future::{FutureExt, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

#[derive(Default)]
pub struct MockRenderingEngine {
    pub enabled: RefCell<BTreeSet<SurfaceId>>,
    pub displayed: RefCell<Vec<(SurfaceId, ImageId)>>,
    pub resize_calls: RefCell<usize>,
    pub fit_calls: RefCell<usize>,
    pub update_calls: RefCell<usize>,
    pub fail_enable: Cell<bool>,
    pub fail_disable: Cell<bool>,
    defaults: RefCell<BTreeMap<SurfaceId, ViewportTransform>>,
    viewports: RefCell<BTreeMap<SurfaceId, ViewportTransform>>,
    images: RefCell<HashMap<ImageId, LoadOutcome>>,
}

impl MockRenderingEngine {
    /// Sets the transform `default_viewport` hands out for a surface.
    pub fn preset_viewport(&self, surface: SurfaceId, transform: ViewportTransform) {
        self.defaults.borrow_mut().insert(surface, transform);
    }

    /// Registers an image the mock loader resolves successfully.
    pub fn register_image(&self, image: Rc<LoadedImage>) {
        self.images
            .borrow_mut()
            .insert(image.id().clone(), Ok(image));
    }

    /// Registers an identifier whose fetch fails.
    pub fn register_failure(&self, image_id: ImageId, reason: &str) {
        self.images
            .borrow_mut()
            .insert(image_id.clone(), Err(LoadError::new(image_id, reason)));
    }
}

impl RenderingEngine for MockRenderingEngine {
    fn enable(&self, surface: SurfaceId) -> Result<(), EngineError> {
        if self.fail_enable.get() {
            return Err(EngineError::rendering(surface, "enable refused"));
        }
        self.enabled.borrow_mut().insert(surface);
        Ok(())
    }

    fn disable(&self, surface: SurfaceId) -> Result<(), EngineError> {
        if self.fail_disable.get() {
            return Err(EngineError::rendering(surface, "surface was not enabled"));
        }
        self.enabled.borrow_mut().remove(&surface);
        Ok(())
    }

    fn resize(&self, _surface: SurfaceId, _force: bool) {
        *self.resize_calls.borrow_mut() += 1;
    }

    fn default_viewport(&self, surface: SurfaceId, _image: &LoadedImage) -> ViewportTransform {
        self.defaults
            .borrow()
            .get(&surface)
            .copied()
            .unwrap_or_default()
    }

    fn display_image(
        &self,
        surface: SurfaceId,
        image: &Rc<LoadedImage>,
        transform: ViewportTransform,
    ) -> Result<(), EngineError> {
        self.displayed.borrow_mut().push((surface, image.id().clone()));
        self.viewports.borrow_mut().insert(surface, transform);
        Ok(())
    }

    fn fit_to_window(&self, _surface: SurfaceId) {
        *self.fit_calls.borrow_mut() += 1;
    }

    fn viewport(&self, surface: SurfaceId) -> Option<ViewportTransform> {
        self.viewports.borrow().get(&surface).copied()
    }

    fn set_viewport(
        &self,
        surface: SurfaceId,
        transform: ViewportTransform,
    ) -> Result<(), EngineError> {
        self.viewports.borrow_mut().insert(surface, transform);
        Ok(())
    }

    fn update_image(&self, _surface: SurfaceId) {
        *self.update_calls.borrow_mut() += 1;
    }

    fn load_and_cache(&self, image_id: &ImageId) -> LocalBoxFuture<'static, LoadOutcome> {
        let outcome = self
            .images
            .borrow()
            .get(image_id)
            .cloned()
            .unwrap_or_else(|| Err(LoadError::new(image_id.clone(), "image not registered")));
        futures::future::ready(outcome).boxed_local()
    }
}

#[derive(Default)]
pub struct MockToolStateEngine {
    pub init_calls: Cell<usize>,
    pub registered: RefCell<Vec<Tool>>,
    pub stack_managers: RefCell<Vec<(SurfaceId, StackStateKind)>>,
    pub cleared: RefCell<Vec<(SurfaceId, Tool)>>,
    pub playing: RefCell<BTreeMap<SurfaceId, f64>>,
    pub saved: RefCell<Vec<(SurfaceId, String)>>,
    active: RefCell<BTreeMap<(SurfaceId, Tool), MouseButtons>>,
    stack_states: RefCell<BTreeMap<SurfaceId, StackToolState>>,
}

impl MockToolStateEngine {
    /// Currently active tools on a surface with their button bindings.
    pub fn active_tools(&self, surface: SurfaceId) -> Vec<(Tool, MouseButtons)> {
        self.active
            .borrow()
            .iter()
            .filter(|((s, _), _)| *s == surface)
            .map(|((_, tool), buttons)| (*tool, *buttons))
            .collect()
    }

    /// Seeds a stack state carrying a clip frame rate, as if a prior
    /// playback had recorded one.
    pub fn preset_frame_rate(&self, surface: SurfaceId, frame_rate: f64) {
        self.stack_states.borrow_mut().insert(
            surface,
            StackToolState {
                frame_rate: Some(frame_rate),
                ..Default::default()
            },
        );
    }
}

impl ToolStateEngine for MockToolStateEngine {
    fn init(&self) {
        self.init_calls.set(self.init_calls.get() + 1);
    }

    fn add_tool(&self, tool: Tool) {
        self.registered.borrow_mut().push(tool);
    }

    fn set_tool_active(
        &self,
        surface: SurfaceId,
        tool: Tool,
        buttons: MouseButtons,
    ) -> Result<(), EngineError> {
        self.active.borrow_mut().insert((surface, tool), buttons);
        Ok(())
    }

    fn set_tool_disabled(&self, surface: SurfaceId, tool: Tool) {
        self.active.borrow_mut().remove(&(surface, tool));
    }

    fn add_stack_state_manager(&self, surface: SurfaceId, kind: StackStateKind) {
        self.stack_managers.borrow_mut().push((surface, kind));
    }

    fn add_tool_state(&self, surface: SurfaceId, state: StackToolState) {
        // Like the wrapped engine's state list, the first entry sticks.
        self.stack_states.borrow_mut().entry(surface).or_insert(state);
    }

    fn stack_state(&self, surface: SurfaceId) -> Option<StackToolState> {
        self.stack_states.borrow().get(&surface).cloned()
    }

    fn clear_tool_state(&self, surface: SurfaceId, tool: Tool) {
        self.cleared.borrow_mut().push((surface, tool));
    }

    fn play_clip(&self, surface: SurfaceId, frame_rate: f64) {
        self.playing.borrow_mut().insert(surface, frame_rate);
    }

    fn stop_clip(&self, surface: SurfaceId) {
        self.playing.borrow_mut().remove(&surface);
    }

    fn save_as(&self, surface: SurfaceId, file_name: &str) -> Result<(), EngineError> {
        self.saved
            .borrow_mut()
            .push((surface, file_name.to_string()));
        Ok(())
    }
}
