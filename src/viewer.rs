use crate::engine::{
    MouseButtons, RenderingEngine, SurfaceProvider, Tool, ToolStateEngine,
};
use crate::error::{Result, ViewerError};
use crate::loader::{drive_batch, LoadOutcome, LoadRequest};
use crate::model::{group_into_series, ImageId, LoadedImage, Series};
use crate::viewport::ViewportAdapter;
use std::rc::Rc;

const DEFAULT_CLIP_FRAME_RATE: f64 = 10.0;

/// Host-supplied configuration for a viewing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Show the interactive tool toolbar.
    pub enable_viewer_tools: bool,
    /// Show the clip playback controls.
    pub enable_play_tools: bool,
    /// URL the host offers for downloading the study images.
    pub download_images_url: String,
    /// Cap on requests issued per batch; zero means load everything at once.
    pub max_images_per_batch: usize,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            enable_viewer_tools: false,
            enable_play_tools: false,
            download_images_url: String::new(),
            max_images_per_batch: 20,
        }
    }
}

/// Orchestrates one study viewing session.
///
/// Owns the series list and session state, issues batched load requests,
/// groups completed images into series, and translates toolbar actions into
/// tool-activation calls scoped to the viewport's surface.
pub struct StudyViewer {
    rendering: Rc<dyn RenderingEngine>,
    tools: Rc<dyn ToolStateEngine>,
    viewport: ViewportAdapter,
    options: ViewerOptions,
    series_list: Vec<Series>,
    current_series_index: usize,
    image_count: usize,
    loading_images: bool,
    loaded_images: Vec<Rc<LoadedImage>>,
    image_id_list: Vec<ImageId>,
    target_image_count: usize,
    /// Session generation; completions stamped with an older value are stale
    /// leftovers of a superseded study and get dropped on arrival.
    generation: u64,
}

impl StudyViewer {
    pub fn new(
        rendering: Rc<dyn RenderingEngine>,
        tools: Rc<dyn ToolStateEngine>,
        provider: Box<dyn SurfaceProvider>,
        options: ViewerOptions,
    ) -> Self {
        let viewport = ViewportAdapter::new(Rc::clone(&rendering), Rc::clone(&tools), provider);
        Self {
            rendering,
            tools,
            viewport,
            options,
            series_list: Vec::new(),
            current_series_index: 0,
            image_count: 0,
            loading_images: false,
            loaded_images: Vec::new(),
            image_id_list: Vec::new(),
            target_image_count: 0,
            generation: 0,
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn viewport(&self) -> &ViewportAdapter {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportAdapter {
        &mut self.viewport
    }

    pub fn series_list(&self) -> &[Series] {
        &self.series_list
    }

    pub fn current_series_index(&self) -> usize {
        self.current_series_index
    }

    /// Total image count of the currently displayed series.
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Progress-indicator flag: a batch is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loading_images
    }

    /// How many images the next `load_more_images` call would request, if
    /// identifiers remain and no batch is in flight.
    pub fn more_images_to_load(&self) -> Option<usize> {
        let remaining = self.image_id_list.len().saturating_sub(self.loaded_images.len());
        if remaining > 0 && !self.loading_images {
            Some(self.batch_size(remaining))
        } else {
            None
        }
    }

    pub fn can_show_previous_image(&self) -> bool {
        self.viewport.current_index() >= 1
    }

    pub fn can_show_next_image(&self) -> bool {
        self.image_count > 0 && self.viewport.current_index() < self.image_count - 1
    }

    fn batch_size(&self, remaining: usize) -> usize {
        if self.options.max_images_per_batch == 0 {
            remaining
        } else {
            remaining.min(self.options.max_images_per_batch)
        }
    }

    /// Starts a fresh session for `image_ids` and returns the first batch of
    /// load requests. Previously issued requests are not cancelled; their
    /// completions become stale through the generation bump.
    pub fn load_study_images(&mut self, image_ids: Vec<ImageId>) -> Result<Vec<LoadRequest>> {
        self.generation += 1;
        self.image_id_list = image_ids;
        self.viewport.reset_viewer()?;
        self.viewport.reset_image_cache();
        self.series_list.clear();
        self.current_series_index = 0;
        self.image_count = 0;
        self.loaded_images.clear();

        let batch = self.batch_size(self.image_id_list.len());
        log::info!(
            "loading study: {} identifier(s), first batch of {batch}",
            self.image_id_list.len()
        );
        self.target_image_count = batch;
        self.loading_images = batch > 0;

        Ok(self.requests_for_range(0, batch))
    }

    /// Issues the next batch of requests for identifiers not yet loaded.
    pub fn load_more_images(&mut self) -> Vec<LoadRequest> {
        let start = self.loaded_images.len();
        let remaining = self.image_id_list.len().saturating_sub(start);
        let batch = self.batch_size(remaining);
        if batch == 0 {
            return Vec::new();
        }

        log::info!("loading {batch} more image(s) starting at index {start}");
        self.loading_images = true;
        self.target_image_count += batch;
        self.requests_for_range(start, batch)
    }

    fn requests_for_range(&self, start: usize, count: usize) -> Vec<LoadRequest> {
        self.image_id_list[start..start + count]
            .iter()
            .map(|image_id| LoadRequest {
                generation: self.generation,
                image_id: image_id.clone(),
            })
            .collect()
    }

    /// Ingestion step for one completed load.
    ///
    /// Tolerates arbitrary completion interleaving: series and image lists
    /// are re-sorted on every arrival, so the final ordering is independent
    /// of arrival order. A failure only decrements the outstanding target so
    /// the completion check still converges.
    pub fn image_loaded(&mut self, generation: u64, outcome: LoadOutcome) -> Result<()> {
        if generation != self.generation {
            log::debug!("dropping stale load completion from generation {generation}");
            return Ok(());
        }

        match outcome {
            Err(err) => {
                log::warn!("{err}");
                self.target_image_count = self.target_image_count.saturating_sub(1);
            }
            Ok(image) => {
                let touched = group_into_series(&mut self.series_list, &image);
                self.loaded_images.push(image);
                if touched == self.current_series_index {
                    self.show_series(self.current_series_index)?;
                }
            }
        }

        if self.loaded_images.len() >= self.target_image_count {
            self.loading_images = false;
        }
        Ok(())
    }

    /// Runs a batch of requests to completion on the current task, feeding
    /// every arrival through `image_loaded`.
    pub async fn run_batch(&mut self, requests: Vec<LoadRequest>) -> Result<()> {
        let rendering = Rc::clone(&self.rendering);
        drive_batch(&rendering, requests, |generation, outcome| {
            self.image_loaded(generation, outcome)
        })
        .await
    }

    /// Makes the series at `index` the displayed one, rebuilding the
    /// viewport's image stack from its (sorted) image list.
    pub fn show_series(&mut self, index: usize) -> Result<()> {
        let series = self
            .series_list
            .get(index)
            .ok_or(ViewerError::SeriesIndexOutOfRange {
                index,
                len: self.series_list.len(),
            })?;
        let images: Vec<_> = series.image_list.to_vec();

        self.current_series_index = index;
        self.image_count = images.len();
        self.viewport.reset_image_cache();
        for image in images {
            self.viewport.add_image_data(image)?;
        }
        Ok(())
    }

    pub fn next_image(&mut self) -> Result<()> {
        if self.viewport.current_index() < self.image_count {
            self.viewport.next_image()?;
        }
        Ok(())
    }

    pub fn previous_image(&mut self) -> Result<()> {
        if self.viewport.current_index() > 0 {
            self.viewport.previous_image()?;
        }
        Ok(())
    }

    /// Deactivates every tool and stops any clip playback.
    pub fn reset_all_tools(&mut self) -> Result<()> {
        if self.image_count > 0 {
            self.viewport.reset_all_tools();
            self.stop_clip();
        }
        Ok(())
    }

    /// Single-active-tool-plus-pan policy: disable everything, activate one
    /// primary tool, and (for most tools) keep pan on the secondary button.
    fn activate_exclusive(&mut self, tool: Tool, bind_secondary_pan: bool) -> Result<()> {
        if self.image_count == 0 {
            return Ok(());
        }
        self.reset_all_tools()?;
        let surface = self.viewport.surface();
        self.tools
            .set_tool_active(surface, tool, MouseButtons::PRIMARY)?;
        if bind_secondary_pan {
            self.tools
                .set_tool_active(surface, Tool::Pan, MouseButtons::SECONDARY)?;
        }
        Ok(())
    }

    pub fn enable_windowing(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::Wwwc, true)
    }

    pub fn enable_zoom(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::Zoom, true)
    }

    pub fn enable_pan(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::Pan, false)
    }

    pub fn enable_scroll(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::StackScroll, false)
    }

    pub fn enable_length(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::Length, true)
    }

    pub fn enable_angle(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::Angle, true)
    }

    pub fn enable_probe(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::Probe, true)
    }

    pub fn enable_elliptical(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::EllipticalRoi, true)
    }

    pub fn enable_rectangle(&mut self) -> Result<()> {
        self.activate_exclusive(Tool::RectangleRoi, true)
    }

    /// Starts clip playback at the stack's frame rate, defaulting to 10 FPS
    /// when unset or zero.
    pub fn play_clip(&mut self) {
        if self.image_count == 0 {
            return;
        }
        let surface = self.viewport.surface();
        let frame_rate = self
            .tools
            .stack_state(surface)
            .and_then(|state| state.frame_rate)
            .filter(|rate| *rate != 0.0)
            .unwrap_or(DEFAULT_CLIP_FRAME_RATE);
        self.tools.play_clip(surface, frame_rate);
    }

    pub fn stop_clip(&mut self) {
        let surface = self.viewport.surface();
        self.tools.stop_clip(surface);
    }

    /// Flips the invert flag on the engine's current viewport transform.
    pub fn invert_image(&mut self) -> Result<()> {
        if self.image_count == 0 {
            return Ok(());
        }
        let surface = self.viewport.surface();
        if let Some(mut transform) = self.rendering.viewport(surface) {
            transform.invert = !transform.invert;
            self.rendering.set_viewport(surface, transform)?;
        }
        Ok(())
    }

    /// Clears all measurement/annotation state, redraws, disables all tools.
    pub fn reset_image(&mut self) -> Result<()> {
        if self.image_count == 0 {
            return Ok(());
        }
        let surface = self.viewport.surface();
        for tool in Tool::MEASUREMENT {
            self.tools.clear_tool_state(surface, tool);
        }
        self.rendering.update_image(surface);
        self.reset_all_tools()
    }

    /// Exports the currently displayed image through the tool engine.
    pub fn save_as(&mut self, file_name: &str) -> Result<()> {
        let surface = self.viewport.surface();
        self.tools.save_as(surface, file_name)?;
        Ok(())
    }

    /// Fully resets the viewport and all session state; used when switching
    /// away from a study entirely. In-flight completions become stale.
    pub fn clear_image(&mut self) -> Result<()> {
        self.generation += 1;
        self.viewport.reset_viewer()?;
        self.viewport.reset_image_cache();
        self.series_list.clear();
        self.current_series_index = 0;
        self.image_count = 0;
        self.loaded_images.clear();
        self.image_id_list.clear();
        self.target_image_count = 0;
        self.loading_images = false;
        Ok(())
    }
}
