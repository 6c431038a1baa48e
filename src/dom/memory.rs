//! In-memory document
//!
//! Arena-backed tree (`html > head, body`) that parses the markup handed to
//! it with `MarkupTokenizer`. Lookups by id scan in document order, so the
//! first element wins when ids collide, as in a browser.
//!
//! Layout is not computed: element heights and offsets are whatever the test
//! or tool sets with `set_element_layout` (zero otherwise).

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use tokio::sync::watch;

use super::markup::{is_raw_text, is_void, MarkupToken, MarkupTokenizer};
use super::{DocumentPart, DomEffects, KeyListener, ListenerId, ScrollMetrics};
use crate::error::DomError;
use crate::html::escape_html;

type NodeId = usize;

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    top: f64,
    scroll_height: f64,
}

struct Document {
    nodes: Vec<Node>,
    /// Slots of removed subtrees, reused before the arena grows.
    free: Vec<NodeId>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    url: String,
    title: String,
    viewport: ScrollMetrics,
    layout: FxHashMap<String, Layout>,
    scroll_history: Vec<f64>,
    clipboard: Vec<String>,
    clipboard_fails: bool,
    opened: Vec<String>,
    listeners: Vec<(ListenerId, KeyListener)>,
    next_listener: u64,
}

impl Document {
    fn new(url: &str) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: 0,
            head: 0,
            body: 0,
            url: url.to_string(),
            title: String::new(),
            viewport: ScrollMetrics::default(),
            layout: FxHashMap::default(),
            scroll_history: Vec::new(),
            clipboard: Vec::new(),
            clipboard_fails: false,
            opened: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        };
        doc.root = doc.create_element("html", Vec::new());
        doc.head = doc.create_element("head", Vec::new());
        doc.body = doc.create_element("body", Vec::new());
        let (root, head, body) = (doc.root, doc.head, doc.body);
        doc.append_child(root, head);
        doc.append_child(root, body);
        doc
    }

    fn part(&self, part: DocumentPart) -> NodeId {
        match part {
            DocumentPart::Root => self.root,
            DocumentPart::Head => self.head,
            DocumentPart::Body => self.body,
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn create_element(&mut self, tag: &str, attributes: Vec<(String, String)>) -> NodeId {
        self.alloc(NodeKind::Element {
            tag: tag.to_string(),
            attributes,
        })
    }

    fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(NodeKind::Text(text))
    }

    /// Return a detached subtree's slots to the free list.
    fn release(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            stack.extend(std::mem::take(&mut self.nodes[n].children));
            self.nodes[n].parent = None;
            self.nodes[n].kind = NodeKind::Text(String::new());
            self.free.push(n);
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|&c| c != node);
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        for child in std::mem::take(&mut self.nodes[node].children) {
            self.nodes[child].parent = None;
            self.release(child);
        }
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Descendants of `node` (excluding it) in document order.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n].children.iter().rev().copied());
        }
        out
    }

    fn find(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(id))
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node].kind {
            match attributes.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node].kind {
            attributes.retain(|(k, _)| k != name);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        let current = self.attr(node, "class").unwrap_or_default();
        let mut classes: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
        if enabled {
            classes.push(class);
        }
        let joined = classes.join(" ");
        if joined.is_empty() {
            self.remove_attr(node, "class");
        } else {
            self.set_attr(node, "class", &joined);
        }
    }

    fn styles(&self, node: NodeId) -> Vec<(String, String)> {
        self.attr(node, "style")
            .unwrap_or_default()
            .split(';')
            .filter_map(|decl| {
                let (k, v) = decl.split_once(':')?;
                let k = k.trim();
                (!k.is_empty()).then(|| (k.to_string(), v.trim().to_string()))
            })
            .collect()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) {
        let mut styles = self.styles(node);
        styles.retain(|(k, _)| k != property);
        if let Some(v) = value {
            styles.push((property.to_string(), v.to_string()));
        }
        if styles.is_empty() {
            self.remove_attr(node, "style");
        } else {
            let joined = styles
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            self.set_attr(node, "style", &joined);
        }
    }

    fn text_of(&self, node: NodeId) -> String {
        if let NodeKind::Text(t) = &self.nodes[node].kind {
            return t.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match &self.nodes[n].kind {
                NodeKind::Text(t) => Some(t.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Parse `markup` and append the resulting nodes under `parent`.
    fn parse_into(&mut self, parent: NodeId, markup: &str) {
        let mut stack = vec![parent];
        for token in MarkupTokenizer::new(markup) {
            let top = stack.last().copied().unwrap_or(parent);
            match token {
                MarkupToken::StartTag {
                    tag,
                    attributes,
                    self_closing,
                } => {
                    let node = self.create_element(&tag, attributes);
                    self.append_child(top, node);
                    if !self_closing && !is_void(&tag) {
                        stack.push(node);
                    }
                }
                MarkupToken::EndTag { tag } => {
                    // ignore stray end tags; never pop the insertion parent
                    if let Some(pos) = stack.iter().rposition(|&n| self.tag(n) == Some(tag.as_str())) {
                        if pos > 0 {
                            stack.truncate(pos);
                        }
                    }
                }
                MarkupToken::Text(text) => {
                    let node = self.create_text(text);
                    self.append_child(top, node);
                }
            }
        }
    }

    fn serialize_children(&self, node: NodeId, out: &mut String) {
        let raw = self.tag(node).is_some_and(is_raw_text);
        for &child in &self.nodes[node].children {
            match &self.nodes[child].kind {
                NodeKind::Text(t) if raw => out.push_str(t),
                NodeKind::Text(t) => out.push_str(&escape_html(t)),
                NodeKind::Element { tag, attributes } => {
                    out.push('<');
                    out.push_str(tag);
                    for (k, v) in attributes {
                        out.push(' ');
                        out.push_str(k);
                        if !v.is_empty() {
                            out.push_str("=\"");
                            out.push_str(&escape_html(v));
                            out.push('"');
                        }
                    }
                    out.push('>');
                    if !is_void(tag) {
                        self.serialize_children(child, out);
                        out.push_str("</");
                        out.push_str(tag);
                        out.push('>');
                    }
                }
            }
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.serialize_children(node, &mut out);
        out
    }

    fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn meta_description(&self) -> Option<NodeId> {
        self.descendants(self.head)
            .into_iter()
            .find(|&n| self.tag(n) == Some("meta") && self.attr(n, "name") == Some("description"))
    }
}

/// `DomEffects` over an in-memory tree.
pub struct MemoryDom {
    doc: Mutex<Document>,
    mutations: watch::Sender<u64>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.doc();
        f.debug_struct("MemoryDom")
            .field("url", &doc.url)
            .field("nodes", &doc.live_nodes())
            .finish()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::with_url("http://localhost/")
    }

    pub fn with_url(url: &str) -> Self {
        let (mutations, _) = watch::channel(0);
        Self {
            doc: Mutex::new(Document::new(url)),
            mutations,
        }
    }

    /// Document whose body is parsed from `html`.
    pub fn from_body_html(url: &str, html: &str) -> Self {
        let dom = Self::with_url(url);
        dom.append_to(DocumentPart::Body, html);
        dom
    }

    fn doc(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.mutations.send_modify(|n| *n += 1);
    }

    /// Run `f` on the element with `id`, if any.
    fn with_element<T>(&self, id: &str, f: impl FnOnce(&mut Document, NodeId) -> T) -> Option<T> {
        let mut doc = self.doc();
        let node = doc.find(id)?;
        Some(f(&mut *doc, node))
    }

    /// Nodes currently in use, removed subtrees excluded.
    pub fn node_count(&self) -> usize {
        self.doc().live_nodes()
    }

    pub fn body_html(&self) -> String {
        let doc = self.doc();
        doc.inner_html(doc.body)
    }

    pub fn head_html(&self) -> String {
        let doc = self.doc();
        doc.inner_html(doc.head)
    }

    /// Number of elements in the document carrying `class`.
    pub fn count_with_class(&self, class: &str) -> usize {
        let doc = self.doc();
        doc.descendants(doc.root)
            .into_iter()
            .filter(|&n| doc.has_class(n, class))
            .count()
    }

    /// Number of elements with this id (ids are not forced unique).
    pub fn count_with_id(&self, id: &str) -> usize {
        let doc = self.doc();
        doc.descendants(doc.root)
            .into_iter()
            .filter(|&n| doc.attr(n, "id") == Some(id))
            .count()
    }

    pub fn set_element_layout(&self, id: &str, top: f64, scroll_height: f64) {
        self.doc()
            .layout
            .insert(id.to_string(), Layout { top, scroll_height });
    }

    pub fn set_viewport(&self, metrics: ScrollMetrics) {
        self.doc().viewport = metrics;
    }

    /// Every `scroll_to` target so far.
    pub fn scroll_history(&self) -> Vec<f64> {
        self.doc().scroll_history.clone()
    }

    /// Last text written to the clipboard.
    pub fn clipboard(&self) -> Option<String> {
        self.doc().clipboard.last().cloned()
    }

    /// Make clipboard writes fail (permission denied).
    pub fn fail_clipboard(&self, fail: bool) {
        self.doc().clipboard_fails = fail;
    }

    pub fn opened_windows(&self) -> Vec<String> {
        self.doc().opened.clone()
    }

    pub fn document_title(&self) -> String {
        self.doc().title.clone()
    }

    pub fn meta_description(&self) -> Option<String> {
        let doc = self.doc();
        let meta = doc.meta_description()?;
        doc.attr(meta, "content").map(str::to_string)
    }

    pub fn key_listener_count(&self) -> usize {
        self.doc().listeners.len()
    }

    /// Deliver a keydown to every registered listener.
    pub fn dispatch_key(&self, key: &str) {
        // listeners may unregister themselves, so call them outside the lock
        let listeners: Vec<KeyListener> = self
            .doc()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(key);
        }
    }
}

impl DomEffects for MemoryDom {
    fn exists(&self, id: &str) -> bool {
        self.doc().find(id).is_some()
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.with_element(id, |doc, node| doc.inner_html(node))
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        let found = self
            .with_element(id, |doc, node| {
                doc.clear_children(node);
                doc.parse_into(node, html);
            })
            .is_some();
        if found {
            self.bump();
        }
        found
    }

    fn append_html(&self, id: &str, html: &str) -> bool {
        let found = self
            .with_element(id, |doc, node| doc.parse_into(node, html))
            .is_some();
        if found {
            self.bump();
        }
        found
    }

    fn append_to(&self, part: DocumentPart, html: &str) {
        {
            let mut doc = self.doc();
            let node = doc.part(part);
            doc.parse_into(node, html);
        }
        self.bump();
    }

    fn remove_element(&self, id: &str) -> bool {
        let found = self
            .with_element(id, |doc, node| {
                doc.detach(node);
                doc.release(node);
            })
            .is_some();
        if found {
            self.bump();
        }
        found
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.with_element(id, |doc, node| doc.text_of(node))
    }

    fn set_text_content(&self, id: &str, text: &str) -> bool {
        let found = self
            .with_element(id, |doc, node| {
                doc.clear_children(node);
                let child = doc.create_text(text.to_string());
                doc.append_child(node, child);
            })
            .is_some();
        if found {
            self.bump();
        }
        found
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |doc, node| doc.has_class(node, class))
            .unwrap_or(false)
    }

    fn add_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |doc, node| doc.set_class(node, class, true))
            .is_some()
    }

    fn remove_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |doc, node| doc.set_class(node, class, false))
            .is_some()
    }

    fn set_part_class(&self, part: DocumentPart, class: &str, enabled: bool) {
        let mut doc = self.doc();
        let node = doc.part(part);
        doc.set_class(node, class, enabled);
    }

    fn part_has_class(&self, part: DocumentPart, class: &str) -> bool {
        let doc = self.doc();
        doc.has_class(doc.part(part), class)
    }

    fn set_part_attribute(&self, part: DocumentPart, name: &str, value: &str) {
        let mut doc = self.doc();
        let node = doc.part(part);
        doc.set_attr(node, name, value);
    }

    fn part_attribute(&self, part: DocumentPart, name: &str) -> Option<String> {
        let doc = self.doc();
        doc.attr(doc.part(part), name).map(str::to_string)
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.with_element(id, |doc, node| {
            doc.styles(node)
                .into_iter()
                .find(|(k, _)| k == property)
                .map(|(_, v)| v)
        })
        .flatten()
    }

    fn set_style(&self, id: &str, property: &str, value: Option<&str>) -> bool {
        self.with_element(id, |doc, node| doc.set_style(node, property, value))
            .is_some()
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.with_element(id, |doc, node| doc.attr(node, name).map(str::to_string))
            .flatten()
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> bool {
        self.with_element(id, |doc, node| doc.set_attr(node, name, value))
            .is_some()
    }

    fn descendant_ids_with_class(&self, id: &str, class: &str) -> Vec<String> {
        self.with_element(id, |doc, node| {
            doc.descendants(node)
                .into_iter()
                .filter(|&n| doc.has_class(n, class))
                .filter_map(|n| doc.attr(n, "id").map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
    }

    fn first_heading_text(&self, id: &str) -> Option<String> {
        self.with_element(id, |doc, node| {
            doc.descendants(node)
                .into_iter()
                .find(|&n| {
                    matches!(doc.tag(n), Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
                })
                .map(|n| doc.text_of(n).trim().to_string())
        })
        .flatten()
    }

    fn scroll_height(&self, id: &str) -> Option<f64> {
        let doc = self.doc();
        doc.find(id)?;
        Some(doc.layout.get(id).map(|l| l.scroll_height).unwrap_or(0.0))
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        let doc = self.doc();
        doc.find(id)?;
        Some(doc.layout.get(id).map(|l| l.top).unwrap_or(0.0))
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.doc().viewport
    }

    fn scroll_to(&self, top: f64) {
        let mut doc = self.doc();
        doc.viewport.scroll_top = top.max(0.0);
        doc.scroll_history.push(top);
    }

    fn write_clipboard(&self, text: &str) -> Result<(), DomError> {
        let mut doc = self.doc();
        if doc.clipboard_fails {
            return Err(DomError::Clipboard("write permission denied".to_string()));
        }
        doc.clipboard.push(text.to_string());
        Ok(())
    }

    fn open_window(&self, url: &str) {
        self.doc().opened.push(url.to_string());
    }

    fn current_url(&self) -> String {
        self.doc().url.clone()
    }

    fn replace_url(&self, url: &str) {
        self.doc().url = url.to_string();
    }

    fn set_document_title(&self, title: &str) {
        self.doc().title = title.to_string();
    }

    fn set_meta_description(&self, description: &str) {
        let mut doc = self.doc();
        let meta = match doc.meta_description() {
            Some(meta) => meta,
            None => {
                let meta = doc.create_element("meta", vec![("name".to_string(), "description".to_string())]);
                let head = doc.head;
                doc.append_child(head, meta);
                meta
            }
        };
        doc.set_attr(meta, "content", description);
    }

    fn add_key_listener(&self, listener: KeyListener) -> ListenerId {
        let mut doc = self.doc();
        doc.next_listener += 1;
        let id = ListenerId(doc.next_listener);
        doc.listeners.push((id, listener));
        id
    }

    fn remove_key_listener(&self, id: ListenerId) -> bool {
        let mut doc = self.doc();
        let before = doc.listeners.len();
        doc.listeners.retain(|(l, _)| *l != id);
        doc.listeners.len() != before
    }

    fn mutations(&self) -> watch::Receiver<u64> {
        self.mutations.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_parse_and_query() {
        let dom = MemoryDom::from_body_html(
            "http://localhost/",
            r#"<div id="main" class="a b"><h2>Title <em>x</em></h2><p id="p">1 &lt; 2</p><br></div>"#,
        );

        assert!(dom.exists("main"));
        assert!(dom.has_class("main", "b"));
        assert_eq!(dom.text_content("p").as_deref(), Some("1 < 2"));
        assert_eq!(dom.first_heading_text("main").as_deref(), Some("Title x"));
        assert_eq!(
            dom.inner_html("main").unwrap(),
            r#"<h2>Title <em>x</em></h2><p id="p">1 &lt; 2</p><br>"#
        );
    }

    #[test]
    fn test_set_inner_html_and_remove() {
        let dom = MemoryDom::from_body_html("http://localhost/", r#"<div id="c"></div>"#);
        let rx = dom.mutations();
        assert!(dom.set_inner_html("c", r#"<span id="s">x</span>"#));
        assert!(dom.exists("s"));
        assert!(rx.has_changed().unwrap());

        assert!(dom.remove_element("s"));
        assert!(!dom.exists("s"));
        assert!(!dom.remove_element("s"));
    }

    #[test]
    fn test_removed_nodes_are_reused() {
        let dom = MemoryDom::from_body_html("http://localhost/", r#"<div id="c"></div>"#);
        let baseline = dom.node_count();

        for i in 0..50 {
            dom.append_to(
                DocumentPart::Body,
                &format!(r#"<div id="t{}" class="toast"><span>msg</span></div>"#, i),
            );
            dom.set_inner_html("c", "<p>one</p><p>two</p>");
            dom.set_text_content("c", "plain");
            assert!(dom.remove_element(&format!("t{}", i)));
        }

        // "c" keeps one text child
        assert_eq!(dom.node_count(), baseline + 1);
        assert!(dom.doc().nodes.len() < baseline + 10);
        assert_eq!(dom.text_content("c").as_deref(), Some("plain"));
        assert_eq!(dom.body_html(), r#"<div id="c">plain</div>"#);
    }

    #[test]
    fn test_classes_and_styles() {
        let dom = MemoryDom::from_body_html("http://localhost/", r#"<div id="d" class="hidden"></div>"#);
        dom.remove_class("d", "hidden");
        assert_eq!(dom.attribute("d", "class"), None);
        dom.add_class("d", "open");
        dom.add_class("d", "open");
        assert_eq!(dom.attribute("d", "class").as_deref(), Some("open"));

        dom.set_style("d", "max-height", Some("0px"));
        dom.set_style("d", "overflow", Some("hidden"));
        assert_eq!(dom.style("d", "max-height").as_deref(), Some("0px"));
        dom.set_style("d", "max-height", None);
        assert_eq!(dom.attribute("d", "style").as_deref(), Some("overflow: hidden"));
    }

    #[test]
    fn test_stray_end_tag_does_not_escape_container() {
        let dom = MemoryDom::from_body_html("http://localhost/", r#"<div id="c"></div><p id="after"></p>"#);
        dom.set_inner_html("c", "</div><span id=\"inner\"></span>");
        assert_eq!(dom.inner_html("c").unwrap(), r#"<span id="inner"></span>"#);
    }

    #[test]
    fn test_key_listener_can_remove_itself() {
        let dom = Arc::new(MemoryDom::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let id_slot = Arc::new(Mutex::new(None::<ListenerId>));

        let listener: KeyListener = {
            let dom = dom.clone();
            let calls = calls.clone();
            let id_slot = id_slot.clone();
            Arc::new(move |key: &str| {
                if key == "Escape" {
                    calls.fetch_add(1, Ordering::SeqCst);
                    if let Some(id) = *id_slot.lock().unwrap() {
                        dom.remove_key_listener(id);
                    }
                }
            })
        };
        let id = dom.add_key_listener(listener);
        *id_slot.lock().unwrap() = Some(id);

        dom.dispatch_key("Escape");
        dom.dispatch_key("Escape");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(dom.key_listener_count(), 0);
    }

    #[test]
    fn test_meta_description_created_once() {
        let dom = MemoryDom::new();
        dom.set_meta_description("first");
        dom.set_meta_description("second");
        assert_eq!(dom.meta_description().as_deref(), Some("second"));
        assert_eq!(dom.head_html().matches("<meta").count(), 1);
    }
}
