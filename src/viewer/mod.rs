mod document;
mod fetch;
mod overlay;

pub use document::{render_markdown, title_for, MarkdownDocument};
pub use fetch::{is_remote, md_location_from_page, DefaultFetcher, ResourceFetcher};
pub use overlay::{Overlay, OverlayEvent};

use crate::error::GameResult;
use log::{info, warn};

/// Fetches Markdown resources and shows them in a single overlay.
pub struct MarkdownViewer<F: ResourceFetcher> {
    fetcher: F,
    overlay: Overlay,
}

impl<F: ResourceFetcher> MarkdownViewer<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            overlay: Overlay::default(),
        }
    }

    /// On failure the overlay is left as it was.
    pub fn open(&mut self, location: &str) -> GameResult<&Overlay> {
        let markdown = self.fetcher.fetch(location).map_err(|err| {
            warn!(target: "viewer", "Failed to load {}: {}", location, err);
            err
        })?;
        info!(target: "viewer", "Loaded {} ({} bytes)", location, markdown.len());
        self.overlay
            .show(MarkdownDocument::from_markdown(location, &markdown));
        Ok(&self.overlay)
    }

    /// Opens the resource named by the page's `?md=` parameter, if any.
    pub fn open_from_page(&mut self, page_url: &str) -> GameResult<Option<&Overlay>> {
        match md_location_from_page(page_url)? {
            Some(location) => self.open(&location).map(Some),
            None => Ok(None),
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn handle(&mut self, event: OverlayEvent) -> bool {
        self.overlay.handle(event)
    }
}
