//! Dispatcher
//!
//! Looks up each component's renderer, applies the optional wrapper id and
//! folds a batch into one markup string in input order. A component that
//! fails renders an inline error fragment; the rest of the batch still renders.

use std::sync::Arc;

use crate::assets::DeferredCodeAsset;
use crate::components::registry::{ComponentRegistry, RenderContext, RenderDiagnostic};
use crate::components::types::Component;
use crate::html::escape_html;
use crate::ids::IdGenerator;

/// Markup plus the work that must follow once it is attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    pub html: String,
    pub deferred: Vec<DeferredCodeAsset>,
    pub diagnostics: Vec<RenderDiagnostic>,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ComponentRegistry>,
    ids: Arc<IdGenerator>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self::with_ids(registry, Arc::new(IdGenerator::new()))
    }

    /// Share an id generator with widgets so fallback ids never collide.
    pub fn with_ids(registry: Arc<ComponentRegistry>, ids: Arc<IdGenerator>) -> Self {
        Self { registry, ids }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn ids(&self) -> &Arc<IdGenerator> {
        &self.ids
    }

    pub fn render_component(&self, component: &Component) -> RenderOutput {
        let mut ctx = RenderContext::new(&self.ids);
        let html = self.render_into(component, 0, &mut ctx);
        let (deferred, diagnostics) = ctx.into_parts();
        RenderOutput {
            html,
            deferred,
            diagnostics,
        }
    }

    /// Render a batch. Concatenated with no separator, order preserved.
    pub fn render_components(&self, components: &[Component]) -> RenderOutput {
        let mut ctx = RenderContext::new(&self.ids);
        let mut html = String::with_capacity(components.len() * 1024);
        for (index, component) in components.iter().enumerate() {
            html.push_str(&self.render_into(component, index, &mut ctx));
        }
        let (deferred, diagnostics) = ctx.into_parts();

        tracing::debug!(
            "Rendered {} components ({} deferred assets, {} diagnostics)",
            components.len(),
            deferred.len(),
            diagnostics.len()
        );

        RenderOutput {
            html,
            deferred,
            diagnostics,
        }
    }

    pub fn render_component_html(&self, component: &Component) -> String {
        self.render_component(component).html
    }

    pub fn render_components_html(&self, components: &[Component]) -> String {
        self.render_components(components).html
    }

    fn render_into(&self, component: &Component, index: usize, ctx: &mut RenderContext<'_>) -> String {
        ctx.set_index(index);

        let Some(render) = self.registry.get(&component.kind) else {
            tracing::warn!("Unknown component type: {}", component.kind);
            ctx.diagnose(RenderDiagnostic::UnknownType {
                index,
                kind: component.kind.clone(),
            });
            return unknown_type_fragment(&component.kind);
        };

        let rendered = match render(&component.data, ctx) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Component {} ({}) not rendered: {}", index, component.kind, e);
                ctx.diagnose(RenderDiagnostic::InvalidData {
                    index,
                    kind: component.kind.clone(),
                    message: e.to_string(),
                });
                error_fragment(&e.to_string())
            }
        };

        match &component.id {
            Some(id) => format!(
                r#"<div id="{}" class="component-container" data-component-type="{}">{}</div>"#,
                escape_html(id),
                escape_html(&component.kind),
                rendered
            ),
            None => rendered,
        }
    }
}

/// Inline fragment for a tag no renderer claims.
pub fn unknown_type_fragment(kind: &str) -> String {
    format!(
        r#"
            <div class="p-4 bg-red-50 border border-red-200 rounded-lg mb-4">
                <p class="text-red-600">Unknown component type: <strong>{}</strong></p>
            </div>
        "#,
        escape_html(kind)
    )
}

/// Inline fragment for a component whose data could not be rendered.
pub fn error_fragment(message: &str) -> String {
    format!(
        r#"
            <div class="p-4 bg-red-50 border border-red-200 rounded-lg mb-6">
                <p class="text-red-600">Error: {}</p>
            </div>
        "#,
        escape_html(message)
    )
}
