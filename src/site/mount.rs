//! Content mounting: render a component batch, attach it to the document,
//! then start everything that needs the markup to exist.
//!
//! Ordering is explicit instead of timer-guessed: deferred loads are scheduled
//! and deep-link navigation starts only after `set_inner_html` returned.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::assets::{AssetFetcher, DeferredAssetLoader, DeferredCodeAsset, LoadState, SyntaxHighlighter};
use crate::components::{Component, ComponentRegistry, Dispatcher, ModuleDocument, RenderDiagnostic};
use crate::config::PlatformConfig;
use crate::dom::styles::ensure_component_styles;
use crate::dom::DomEffects;
use crate::error::{ContentError, PlatformError, WidgetError};
use crate::ids::IdGenerator;
use crate::site::page::render_module_error;
use crate::widgets::navigation::{NavigationOutcome, SectionNavigator};
use crate::widgets::scroll::update_scroll_progress;
use crate::widgets::toast::{report_unexpected, ToastQueue};

/// What a mount started.
#[derive(Debug)]
pub struct MountReport {
    pub deferred: Vec<DeferredCodeAsset>,
    pub diagnostics: Vec<RenderDiagnostic>,
    /// One handle per deferred code asset, in document order.
    pub loads: Vec<JoinHandle<LoadState>>,
    toasts: ToastQueue,
}

impl MountReport {
    /// Wait for every deferred load. A load task that panicked counts as
    /// errored and raises the generic error toast.
    pub async fn wait_for_loads(&mut self) -> Vec<LoadState> {
        let mut states = Vec::with_capacity(self.loads.len());
        for handle in std::mem::take(&mut self.loads) {
            match handle.await {
                Ok(state) => states.push(state),
                Err(e) => {
                    report_unexpected(&self.toasts, &e);
                    states.push(LoadState::Errored);
                }
            }
        }
        states
    }
}

/// A module document that was loaded and mounted.
#[derive(Debug)]
pub struct ModuleLoad {
    pub document: ModuleDocument,
    pub mount: MountReport,
    pub navigation: NavigationOutcome,
}

pub struct ContentMounter<F> {
    dom: Arc<dyn DomEffects>,
    fetcher: Arc<F>,
    dispatcher: Dispatcher,
    loader: DeferredAssetLoader<F>,
    toasts: ToastQueue,
    navigator: SectionNavigator,
}

impl<F> Clone for ContentMounter<F> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            fetcher: self.fetcher.clone(),
            dispatcher: self.dispatcher.clone(),
            loader: self.loader.clone(),
            toasts: self.toasts.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

impl<F: AssetFetcher> ContentMounter<F> {
    /// Standard registry, one id generator shared by renderers and widgets.
    pub fn new(dom: Arc<dyn DomEffects>, fetcher: Arc<F>, config: &PlatformConfig) -> Self {
        let ids = Arc::new(IdGenerator::new());
        let dispatcher = Dispatcher::with_ids(Arc::new(ComponentRegistry::standard()), ids.clone());
        let toasts = ToastQueue::with_ids(
            dom.clone(),
            ids,
            config.toast_timings(),
            config.toast_capacity,
        );
        let loader = DeferredAssetLoader::new(dom.clone(), fetcher.clone(), config.code_load_delay());
        let navigator = SectionNavigator::new(dom.clone(), toasts.clone(), config);
        Self {
            dom,
            fetcher,
            dispatcher,
            loader,
            toasts,
            navigator,
        }
    }

    pub fn with_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
        self.dispatcher = Dispatcher::with_ids(registry, self.dispatcher.ids().clone());
        self
    }

    pub fn with_highlighter(mut self, highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        self.loader = self.loader.with_highlighter(highlighter);
        self
    }

    pub fn dom(&self) -> &Arc<dyn DomEffects> {
        &self.dom
    }

    pub fn fetcher(&self) -> &Arc<F> {
        &self.fetcher
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn loader(&self) -> &DeferredAssetLoader<F> {
        &self.loader
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn navigator(&self) -> &SectionNavigator {
        &self.navigator
    }

    /// Render `components` into `container_id` and start the follow-up work:
    /// stylesheet, highlighting, deferred code loads, scroll progress.
    ///
    /// Must be called inside a tokio runtime.
    pub fn mount(&self, container_id: &str, components: &[Component]) -> Result<MountReport, WidgetError> {
        if !self.dom.exists(container_id) {
            tracing::error!("Container with ID '{}' not found", container_id);
            self.toasts
                .error(&format!("Container '{}' not found", container_id));
            return Err(WidgetError::ContainerNotFound(container_id.to_string()));
        }

        let output = self.dispatcher.render_components(components);
        self.dom.set_inner_html(container_id, &output.html);

        ensure_component_styles(self.dom.as_ref());
        if let Some(highlighter) = self.loader.highlighter() {
            highlighter.highlight_all(self.dom.as_ref());
        }
        let loads = self.loader.schedule_all(output.deferred.clone());
        update_scroll_progress(self.dom.as_ref());

        tracing::info!(
            "Mounted {} components into {} ({} deferred, {} diagnostics)",
            components.len(),
            container_id,
            output.deferred.len(),
            output.diagnostics.len()
        );
        self.toasts.success("Content loaded successfully!");

        Ok(MountReport {
            deferred: output.deferred,
            diagnostics: output.diagnostics,
            loads,
            toasts: self.toasts.clone(),
        })
    }

    pub async fn fetch_document(&self, json_path: &str) -> Result<ModuleDocument, ContentError> {
        let text = self.fetcher.fetch_text(json_path).await?;
        ModuleDocument::from_json(&text)
    }

    /// Fetch a module document, mount it, update the title and meta
    /// description, then follow any `?section=` deep link.
    ///
    /// On failure the container shows an error panel and an error toast is
    /// raised; the error is still returned to the caller.
    pub async fn load_and_render_module(
        &self,
        json_path: &str,
        container_id: &str,
    ) -> Result<ModuleLoad, PlatformError> {
        self.toasts.info("Loading module...");
        match self.try_load_module(json_path, container_id).await {
            Ok(load) => Ok(load),
            Err(e) => {
                tracing::error!("Failed to load module {}: {}", json_path, e);
                self.dom
                    .set_inner_html(container_id, &render_module_error(&e.to_string()));
                self.toasts.error("Failed to load module");
                Err(e)
            }
        }
    }

    async fn try_load_module(
        &self,
        json_path: &str,
        container_id: &str,
    ) -> Result<ModuleLoad, PlatformError> {
        let document = self.fetch_document(json_path).await?;
        let mount = self.mount(container_id, &document.components)?;

        if let Some(title) = &document.title {
            self.dom.set_document_title(title);
        }
        if let Some(description) = &document.description {
            self.dom.set_meta_description(description);
        }

        let navigation = self.navigator.navigate_to_section().await;
        Ok(ModuleLoad {
            document,
            mount,
            navigation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticFetcher;
    use crate::dom::MemoryDom;
    use crate::dom::styles::STYLE_ELEMENT_ID;
    use crate::error::FetchError;
    use crate::widgets::toast::{Severity, UNEXPECTED_ERROR_MESSAGE};
    use serde_json::json;

    struct PanickingFetcher;

    impl AssetFetcher for PanickingFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            panic!("fetcher crashed on {}", path)
        }
    }

    fn setup(fetcher: StaticFetcher) -> (Arc<MemoryDom>, ContentMounter<StaticFetcher>) {
        let dom = Arc::new(MemoryDom::from_body_html(
            "http://localhost/pages/modul/modul1.html",
            r#"<main id="page-content"></main>"#,
        ));
        let mounter = ContentMounter::new(dom.clone(), Arc::new(fetcher), &PlatformConfig::default());
        (dom, mounter)
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_injects_and_loads() {
        let fetcher = StaticFetcher::new().with_file("/src/a.js", "const x=1;");
        let (dom, mounter) = setup(fetcher);
        let components = vec![
            Component::new("info", json!({"title": "Tips", "content": "<p>Hi</p>"})),
            Component::new("code", json!({"title": "A", "filePath": "./src/a.js"})),
        ];

        let mut report = mounter.mount("page-content", &components).unwrap();
        assert!(dom.exists(STYLE_ELEMENT_ID));
        assert_eq!(report.deferred.len(), 1);

        let content_id = report.deferred[0].content_id.clone();
        assert_eq!(dom.text_content(&content_id).as_deref(), Some("Loading..."));
        assert_eq!(report.wait_for_loads().await, vec![LoadState::Loaded]);
        assert_eq!(dom.text_content(&content_id).as_deref(), Some("const x=1;"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_crashed_load_reports_unexpected_error() {
        let dom = Arc::new(MemoryDom::from_body_html(
            "http://localhost/pages/modul/modul1.html",
            r#"<main id="page-content"></main>"#,
        ));
        let mounter = ContentMounter::new(dom.clone(), Arc::new(PanickingFetcher), &PlatformConfig::default());
        let components = vec![Component::new("code", json!({"title": "A", "filePath": "./src/a.js"}))];

        let mut report = mounter.mount("page-content", &components).unwrap();
        assert_eq!(report.wait_for_loads().await, vec![LoadState::Errored]);

        let last = mounter.toasts().active().pop().unwrap();
        assert_eq!(last.message, UNEXPECTED_ERROR_MESSAGE);
        assert_eq!(last.severity, Severity::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_container() {
        let (_dom, mounter) = setup(StaticFetcher::new());
        let err = mounter.mount("nowhere", &[]).unwrap_err();
        assert!(matches!(err, WidgetError::ContainerNotFound(_)));
        assert_eq!(mounter.toasts().active()[0].message, "Container 'nowhere' not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_module_sets_title_and_description() {
        let doc = json!({
            "title": "Modul 1",
            "description": "Pengenalan",
            "components": [{"type": "info", "data": {"title": "T", "content": "x"}}]
        });
        let fetcher = StaticFetcher::new().with_file("/assets/data/content/modul1.json", &doc.to_string());
        let (dom, mounter) = setup(fetcher);

        let load = mounter
            .load_and_render_module("/assets/data/content/modul1.json", "page-content")
            .await
            .unwrap();
        assert_eq!(load.navigation, NavigationOutcome::NoSection);
        assert_eq!(dom.document_title(), "Modul 1");
        assert_eq!(dom.meta_description().as_deref(), Some("Pengenalan"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_module_failure_shows_panel() {
        let fetcher = StaticFetcher::new().with_file("/bad.json", r#"{"title": "x"}"#);
        let (dom, mounter) = setup(fetcher);

        let err = mounter
            .load_and_render_module("/bad.json", "page-content")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid JSON structure: components array is required"
        );
        let html = dom.inner_html("page-content").unwrap();
        assert!(html.contains("Failed to Load Module"));
        assert!(html.contains("Retry"));

        let messages: Vec<String> = mounter.toasts().active().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["Loading module...", "Failed to load module"]);
    }
}
