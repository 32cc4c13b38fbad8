use log::trace;

use super::MarkdownDocument;
use crate::helpers::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseButton,
    /// Click on the backdrop around the content.
    OutsideClick,
    InsideClick,
    Escape,
}

#[derive(Debug, Default)]
pub struct Overlay {
    document: Option<MarkdownDocument>,
    visible: bool,
}

impl Overlay {
    /// Replaces any previous content and makes the overlay visible.
    pub fn show(&mut self, document: MarkdownDocument) {
        trace!(target: "overlay", "Showing {:?}", document.title);
        self.document = Some(document);
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn document(&self) -> Option<&MarkdownDocument> {
        self.document.as_ref()
    }

    /// Returns true when the event closed the overlay.
    pub fn handle(&mut self, event: OverlayEvent) -> bool {
        if !self.visible {
            return false;
        }
        match event {
            OverlayEvent::CloseButton | OverlayEvent::OutsideClick | OverlayEvent::Escape => {
                self.visible = false;
                true
            }
            OverlayEvent::InsideClick => false,
        }
    }

    /// Markup of the visible overlay, `None` while hidden.
    pub fn render_html(&self) -> Option<String> {
        let document = self.document.as_ref().filter(|_| self.visible)?;
        Some(format!(
            concat!(
                "<div id=\"md-content-overlay\">\n",
                "  <div class=\"md-content-container\">\n",
                "    <div class=\"md-header\">\n",
                "      <h1>{}</h1>\n",
                "      <button class=\"md-close-btn\">&times;</button>\n",
                "    </div>\n",
                "    <div class=\"md-content\">\n",
                "{}",
                "    </div>\n",
                "  </div>\n",
                "</div>\n"
            ),
            escape_html(&document.title),
            document.body_html
        ))
    }
}
