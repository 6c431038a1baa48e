//! DOM side-effect boundary
//!
//! The rendering core only produces strings. Everything that touches a live
//! document (deferred code loading, widgets, page glue) goes through
//! `DomEffects`, so it can run against `MemoryDom` in tests and tools.
//!
//! Element methods return `false` / `None` when the element does not exist;
//! callers treat a missing element as a no-op, never as a failure.

pub mod markup;
pub mod memory;
pub mod styles;

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::DomError;

pub use memory::MemoryDom;

/// Document-level nodes that have no id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentPart {
    /// `<html>`
    Root,
    Head,
    Body,
}

/// Window scroll geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

pub type KeyListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by `add_key_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait DomEffects: Send + Sync {
    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    fn exists(&self, id: &str) -> bool;

    fn inner_html(&self, id: &str) -> Option<String>;

    /// Replace an element's children with parsed markup.
    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    /// Append parsed markup as the last children of an element.
    fn append_html(&self, id: &str, html: &str) -> bool;

    /// Append parsed markup to `<head>` or `<body>`.
    fn append_to(&self, part: DocumentPart, html: &str);

    fn remove_element(&self, id: &str) -> bool;

    fn text_content(&self, id: &str) -> Option<String>;

    fn set_text_content(&self, id: &str, text: &str) -> bool;

    // ------------------------------------------------------------------
    // Classes, styles, attributes
    // ------------------------------------------------------------------

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn add_class(&self, id: &str, class: &str) -> bool;

    fn remove_class(&self, id: &str, class: &str) -> bool;

    /// Add or remove a class on `<html>`, `<head>` or `<body>`.
    fn set_part_class(&self, part: DocumentPart, class: &str, enabled: bool);

    fn part_has_class(&self, part: DocumentPart, class: &str) -> bool;

    fn set_part_attribute(&self, part: DocumentPart, name: &str, value: &str);

    fn part_attribute(&self, part: DocumentPart, name: &str) -> Option<String>;

    fn style(&self, id: &str, property: &str) -> Option<String>;

    /// Set an inline style property; `None` removes it.
    fn set_style(&self, id: &str, property: &str, value: Option<&str>) -> bool;

    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> bool;

    /// Ids of descendants of `id` carrying `class`, in document order.
    /// Descendants without an id are skipped.
    fn descendant_ids_with_class(&self, id: &str, class: &str) -> Vec<String>;

    /// Text of the first `h1`..`h6` inside the element.
    fn first_heading_text(&self, id: &str) -> Option<String>;

    // ------------------------------------------------------------------
    // Layout and scrolling
    // ------------------------------------------------------------------

    /// Natural content height of the element.
    fn scroll_height(&self, id: &str) -> Option<f64>;

    /// Top of the element relative to the document.
    fn element_top(&self, id: &str) -> Option<f64>;

    fn scroll_metrics(&self) -> ScrollMetrics;

    fn scroll_to(&self, top: f64);

    // ------------------------------------------------------------------
    // Window
    // ------------------------------------------------------------------

    fn write_clipboard(&self, text: &str) -> Result<(), DomError>;

    /// `window.open(url, "_blank")`
    fn open_window(&self, url: &str);

    fn current_url(&self) -> String;

    /// History replace; no navigation.
    fn replace_url(&self, url: &str);

    fn set_document_title(&self, title: &str);

    /// Create the `<meta name="description">` tag if needed, then set its content.
    fn set_meta_description(&self, description: &str);

    fn add_key_listener(&self, listener: KeyListener) -> ListenerId;

    fn remove_key_listener(&self, id: ListenerId) -> bool;

    /// Counter bumped on every structural mutation of the tree.
    fn mutations(&self) -> watch::Receiver<u64>;
}
