//! Component Registry
//!
//! An immutable mapping from type tag to renderer, handed to the
//! `Dispatcher` explicitly. Tests build their own registries with the
//! builder instead of patching a global table.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::assets::DeferredCodeAsset;
use crate::components::renderers;
use crate::error::RenderError;
use crate::ids::IdGenerator;

/// A renderer: component data in, markup out.
///
/// Renderers never touch the DOM. Anything that must happen after the
/// markup is attached (code loading) is recorded on the `RenderContext`.
pub type RenderFn =
    Arc<dyn Fn(&Value, &mut RenderContext<'_>) -> Result<String, RenderError> + Send + Sync>;

/// Something the render pass noticed but rendered through anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDiagnostic {
    UnknownType {
        index: usize,
        kind: String,
    },
    InvalidData {
        index: usize,
        kind: String,
        message: String,
    },
    /// Table row whose cell count differs from the header count.
    RaggedRow {
        index: usize,
        row: usize,
        cells: usize,
        headers: usize,
    },
}

/// Per-pass state a renderer may use: fallback ids and deferred work.
pub struct RenderContext<'a> {
    ids: &'a IdGenerator,
    index: usize,
    deferred: Vec<DeferredCodeAsset>,
    diagnostics: Vec<RenderDiagnostic>,
}

impl<'a> RenderContext<'a> {
    pub fn new(ids: &'a IdGenerator) -> Self {
        Self {
            ids,
            index: 0,
            deferred: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn ids(&self) -> &IdGenerator {
        self.ids
    }

    /// Fresh fallback id.
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// `ids::section_id` bound to this pass's generator.
    pub fn section_id(&self, title: Option<&str>, prefix: &str) -> String {
        crate::ids::section_id(title, prefix, self.ids)
    }

    /// Position of the component being rendered within its batch.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn defer(&mut self, asset: DeferredCodeAsset) {
        self.deferred.push(asset);
    }

    pub fn diagnose(&mut self, diagnostic: RenderDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn into_parts(self) -> (Vec<DeferredCodeAsset>, Vec<RenderDiagnostic>) {
        (self.deferred, self.diagnostics)
    }
}

#[derive(Clone, Default)]
pub struct ComponentRegistry {
    renderers: FxHashMap<String, RenderFn>,
}

impl ComponentRegistry {
    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::default()
    }

    /// Registry with every built-in variant.
    pub fn standard() -> Self {
        Self::builder()
            .register("moduleHeader", renderers::header::render)
            .alias("header", "moduleHeader")
            .register("info", renderers::info::render)
            .register("material", renderers::material::render)
            .register("code", renderers::code::render)
            .register("command", renderers::command::render)
            .register("cardSection", renderers::cards::render)
            .register("accordionSection", renderers::accordion::render)
            .register("video", renderers::video::render)
            .register("table", renderers::table::render)
            .build()
    }

    pub fn get(&self, kind: &str) -> Option<&RenderFn> {
        self.renderers.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.renderers.contains_key(kind)
    }

    /// Registered tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[derive(Default)]
pub struct ComponentRegistryBuilder {
    renderers: FxHashMap<String, RenderFn>,
}

impl ComponentRegistryBuilder {
    /// Register (or replace) the renderer for `kind`.
    pub fn register<F>(mut self, kind: &str, render: F) -> Self
    where
        F: Fn(&Value, &mut RenderContext<'_>) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.renderers.insert(kind.to_string(), Arc::new(render));
        self
    }

    /// Make `alias` render exactly like the already registered `kind`.
    pub fn alias(mut self, alias: &str, kind: &str) -> Self {
        match self.renderers.get(kind).cloned() {
            Some(render) => {
                self.renderers.insert(alias.to_string(), render);
            }
            None => tracing::warn!("Cannot alias '{}' to unregistered '{}'", alias, kind),
        }
        self
    }

    pub fn build(self) -> ComponentRegistry {
        ComponentRegistry {
            renderers: self.renderers,
        }
    }
}
