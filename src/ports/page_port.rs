/// Read access to the JSON script tags embedded in the page
pub trait PageConfigSource: Send + Sync {
    /// Raw text content of the tag with the given id
    fn text_content(&self, id: &str) -> Option<String>;
}

/// The hosting page
///
/// Calls happen on the page's single event loop, so the port is synchronous.
pub trait PagePort: Send + Sync {
    /// Navigate the page away
    fn navigate(&self, target: &str);

    /// Swap an HTML fragment into the region matched by `target`
    fn render_fragment(&self, target: &str, html: &str);
}

/// A provider approval window opened by the page
pub trait PopupHandle: Send + Sync {
    fn is_closed(&self) -> bool;
}
