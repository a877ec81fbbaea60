use crate::engine::{
    MouseButtons, RenderingEngine, StackStateKind, StackToolState, SurfaceId, SurfaceProvider,
    Tool, ToolStateEngine,
};
use crate::error::EngineError;
use crate::model::{tags, ImageId, LoadedImage};
use crate::utils::{format_instance_pair, format_windowing, format_zoom, strip_name_separators};
use std::rc::Rc;

/// Bridges one rendering surface to the external engines and keeps the
/// forward-only image stack used for stack-scroll navigation.
///
/// The stack is a transient cache: the orchestrator rebuilds it from scratch
/// whenever the displayed series changes.
pub struct ViewportAdapter {
    rendering: Rc<dyn RenderingEngine>,
    tools: Rc<dyn ToolStateEngine>,
    provider: Box<dyn SurfaceProvider>,
    surface: SurfaceId,
    image_list: Vec<Rc<LoadedImage>>,
    image_id_list: Vec<ImageId>,
    current_index: usize,
    current_image: Option<Rc<LoadedImage>>,
    patient_name: String,
    hospital: String,
    instance_info: String,
    enabled: bool,
}

impl ViewportAdapter {
    /// Creates the adapter and registers the full tool set with the tool
    /// engine. The surface is not enabled until `reset_viewer` runs.
    pub fn new(
        rendering: Rc<dyn RenderingEngine>,
        tools: Rc<dyn ToolStateEngine>,
        provider: Box<dyn SurfaceProvider>,
    ) -> Self {
        let surface = provider.resolve();

        tools.init();
        for tool in Tool::ALL {
            tools.add_tool(tool);
        }

        Self {
            rendering,
            tools,
            provider,
            surface,
            image_list: Vec::new(),
            image_id_list: Vec::new(),
            current_index: 0,
            current_image: None,
            patient_name: String::new(),
            hospital: String::new(),
            instance_info: String::new(),
            enabled: false,
        }
    }

    /// Re-resolves the target surface before acting on it. The hosting UI may
    /// rebind the drawable between events, so the cached id is refreshed at
    /// every mutation boundary.
    pub fn surface(&mut self) -> SurfaceId {
        self.surface = self.provider.resolve();
        self.surface
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn image_count(&self) -> usize {
        self.image_list.len()
    }

    pub fn image_ids(&self) -> &[ImageId] {
        &self.image_id_list
    }

    pub fn current_image(&self) -> Option<&Rc<LoadedImage>> {
        self.current_image.as_ref()
    }

    /// Patient name overlay field, caret separators stripped.
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    /// Institution name overlay field.
    pub fn hospital(&self) -> &str {
        &self.hospital
    }

    /// "seriesNumber/instanceNumber" overlay field.
    pub fn instance_info(&self) -> &str {
        &self.instance_info
    }

    /// Disables the engine on the surface (best effort) and re-enables it,
    /// so this adapter is the only one driving the surface.
    pub fn reset_viewer(&mut self) -> Result<(), EngineError> {
        self.disable_viewer();
        let surface = self.surface;
        self.rendering.enable(surface)?;
        self.enabled = true;
        Ok(())
    }

    /// Best-effort disable; a failure here only means the surface was not
    /// enabled in the first place.
    pub fn disable_viewer(&mut self) {
        let surface = self.surface();
        if let Err(err) = self.rendering.disable(surface) {
            log::debug!("ignoring disable failure during viewer reset: {err}");
        }
        self.enabled = false;
    }

    /// Clears the local image stack and cached overlay fields.
    pub fn reset_image_cache(&mut self) {
        self.image_list.clear();
        self.image_id_list.clear();
        self.current_image = None;
        self.current_index = 0;
        self.patient_name.clear();
        self.hospital.clear();
        self.instance_info.clear();
    }

    /// Appends an image to the navigable stack, displaying it immediately if
    /// it is the first one.
    pub fn add_image_data(&mut self, image: Rc<LoadedImage>) -> Result<(), EngineError> {
        let surface = self.surface();
        self.image_list.push(Rc::clone(&image));
        self.image_id_list.push(image.id().clone());
        if self.image_list.len() == 1 {
            self.current_index = 0;
            self.display_image(&image)?;
        }
        self.rendering.resize(surface, true);
        Ok(())
    }

    /// Displays one image on the surface: default transform, fit, overlay
    /// metadata, default mouse bindings and stack-scroll registration.
    pub fn display_image(&mut self, image: &Rc<LoadedImage>) -> Result<(), EngineError> {
        let surface = self.surface();

        let transform = self.rendering.default_viewport(surface, image);
        self.rendering.display_image(surface, image, transform)?;
        self.current_image = Some(Rc::clone(image));
        self.rendering.fit_to_window(surface);
        self.rendering.resize(surface, true);

        if let Some(name) = image.string(tags::PATIENT_NAME) {
            self.patient_name = strip_name_separators(name);
        }
        self.hospital = image
            .string(tags::INSTITUTION_NAME)
            .unwrap_or_default()
            .to_string();
        self.instance_info = format_instance_pair(
            image.int_string(tags::SERIES_NUMBER),
            image.int_string(tags::INSTANCE_NUMBER),
        );

        // Default bindings: windowing on the primary button, pan on the
        // middle button, zoom on the secondary button.
        self.tools
            .set_tool_active(surface, Tool::Wwwc, MouseButtons::PRIMARY)?;
        self.tools
            .set_tool_active(surface, Tool::Pan, MouseButtons::MIDDLE)?;
        self.tools
            .set_tool_active(surface, Tool::Zoom, MouseButtons::SECONDARY)?;

        self.tools
            .add_stack_state_manager(surface, StackStateKind::PlayClip);
        self.tools
            .add_stack_state_manager(surface, StackStateKind::Stack);
        self.tools.add_tool_state(
            surface,
            StackToolState {
                current_image_index: self.current_index,
                image_ids: self.image_id_list.clone(),
                frame_rate: None,
            },
        );
        self.tools
            .set_tool_active(surface, Tool::StackScroll, MouseButtons::NONE)?;

        Ok(())
    }

    pub fn previous_image(&mut self) -> Result<(), EngineError> {
        if self.image_list.is_empty() {
            return Ok(());
        }
        self.current_index = self.current_index.saturating_sub(1);
        let image = Rc::clone(&self.image_list[self.current_index]);
        self.display_image(&image)
    }

    pub fn next_image(&mut self) -> Result<(), EngineError> {
        if self.image_list.is_empty() {
            return Ok(());
        }
        self.current_index = (self.current_index + 1).min(self.image_list.len() - 1);
        let image = Rc::clone(&self.image_list[self.current_index]);
        self.display_image(&image)
    }

    /// Wheel navigation: positive delta scrolls forward, anything else back.
    pub fn handle_wheel(&mut self, delta: f64) -> Result<(), EngineError> {
        if self.image_list.is_empty() {
            return Ok(());
        }
        if delta > 0.0 {
            self.next_image()
        } else {
            self.previous_image()
        }
    }

    /// Host resize event: force an engine-side relayout.
    pub fn handle_resize(&mut self) {
        if self.enabled {
            let surface = self.surface();
            self.rendering.resize(surface, true);
        }
    }

    /// Disables every registered tool on the surface.
    pub fn reset_all_tools(&mut self) {
        let surface = self.surface();
        for tool in Tool::ALL {
            self.tools.set_tool_disabled(surface, tool);
        }
    }

    /// Live "width/center" windowing string, empty until an image is shown.
    pub fn windowing_value(&self) -> String {
        if self.enabled && self.current_image.is_some() {
            if let Some(transform) = self.rendering.viewport(self.surface) {
                return format_windowing(&transform);
            }
        }
        String::new()
    }

    /// Live zoom factor string, empty until an image is shown.
    pub fn zoom_value(&self) -> String {
        if self.enabled && self.current_image.is_some() {
            if let Some(transform) = self.rendering.viewport(self.surface) {
                return format_zoom(&transform);
            }
        }
        String::new()
    }
}
