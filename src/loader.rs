use crate::engine::RenderingEngine;
use crate::error::{LoadError, Result};
use crate::model::{ImageId, LoadedImage};
use futures::stream::{FuturesUnordered, StreamExt};
use std::rc::Rc;

/// Outcome of one asynchronous image fetch.
pub type LoadOutcome = std::result::Result<Rc<LoadedImage>, LoadError>;

/// One pending fetch, stamped with the session generation that issued it.
///
/// In-flight requests are never cancelled; a superseded session instead drops
/// completions whose generation no longer matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub image_id: ImageId,
}

/// Drives a batch of load requests to completion through the rendering
/// engine's cache, feeding each completion into `on_complete` in arrival
/// order. No ordering guarantee exists between completions; the ingestion
/// step is responsible for keeping the session deterministic regardless.
pub async fn drive_batch(
    rendering: &Rc<dyn RenderingEngine>,
    requests: Vec<LoadRequest>,
    mut on_complete: impl FnMut(u64, LoadOutcome) -> Result<()>,
) -> Result<()> {
    log::debug!("driving load batch of {} request(s)", requests.len());

    let mut pending: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| {
            let fetch = rendering.load_and_cache(&request.image_id);
            async move { (request.generation, fetch.await) }
        })
        .collect();

    while let Some((generation, outcome)) = pending.next().await {
        on_complete(generation, outcome)?;
    }
    Ok(())
}
