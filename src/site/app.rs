//! Page start-up: theme, sidebar, breadcrumb and the page body for whichever
//! page the current URL names. Every step degrades to fallback content.

use std::sync::Arc;

use serde::Serialize;

use crate::assets::AssetFetcher;
use crate::error::ContentError;
use crate::site::catalog::{render_catalog, toggle_bookmark, ModuleCatalog};
use crate::site::mount::ContentMounter;
use crate::site::page::{
    breadcrumb_for, fallback_page_html, loading_breadcrumb, render_breadcrumb,
    render_module_navigation, BreadcrumbItem, PageType,
};
use crate::site::preferences::{KeyValueStore, Preferences, Theme};
use crate::site::sidebar::{render_fallback_sidebar, render_sidebar, SidebarData};
use crate::url::path_of;

pub const CONTENT_ID: &str = "page-content";
pub const BREADCRUMB_ID: &str = "breadcrumb";
pub const SIDEBAR_ID: &str = "sidebar";
pub const SIDEBAR_DATA_PATH: &str = "/assets/data/sidebar.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageOutcome {
    pub page: PageType,
    /// False when fallback content was shown instead of the page document.
    pub loaded: bool,
}

pub struct SiteApp<F, S> {
    mounter: ContentMounter<F>,
    prefs: Arc<Preferences<S>>,
}

impl<F: AssetFetcher, S: KeyValueStore> SiteApp<F, S> {
    pub fn new(mounter: ContentMounter<F>, prefs: Preferences<S>) -> Self {
        Self {
            mounter,
            prefs: Arc::new(prefs),
        }
    }

    pub fn mounter(&self) -> &ContentMounter<F> {
        &self.mounter
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    /// Full start-up for the page at the current URL.
    pub async fn initialize(&self, system_prefers_dark: bool) -> PageOutcome {
        let dom = self.mounter.dom();
        self.prefs.initialize_theme(dom.as_ref(), system_prefers_dark);
        self.set_breadcrumb(&loading_breadcrumb());
        self.load_sidebar().await;
        self.initialize_page().await
    }

    /// Render the sidebar from its document, or the fallback sidebar.
    /// Returns whether the document was used.
    pub async fn load_sidebar(&self) -> bool {
        let dom = self.mounter.dom();
        let url = dom.current_url();
        let result = self
            .fetch_json::<SidebarData>(SIDEBAR_DATA_PATH)
            .await;
        match result {
            Ok(data) => {
                dom.set_inner_html(SIDEBAR_ID, &render_sidebar(&data, path_of(&url)));
                true
            }
            Err(e) => {
                tracing::warn!("Sidebar data unavailable, using fallback: {}", e);
                dom.set_inner_html(SIDEBAR_ID, &render_fallback_sidebar());
                false
            }
        }
    }

    pub async fn initialize_page(&self) -> PageOutcome {
        let url = self.mounter.dom().current_url();
        let path = path_of(&url).to_string();
        let page = PageType::from_path(&path);
        tracing::info!("Initializing {:?} page for {}", page, path);

        let loaded = match page {
            PageType::Module => self.initialize_module_page(&path).await,
            PageType::Modules => self.initialize_catalog_page(&path).await,
            PageType::Home | PageType::About | PageType::Contact => {
                self.initialize_content_page(page, &path).await
            }
        };
        PageOutcome { page, loaded }
    }

    pub fn toggle_bookmark(&self, module_id: &str) -> bool {
        toggle_bookmark(self.mounter.dom().as_ref(), &self.prefs, module_id)
    }

    pub fn toggle_theme(&self) -> Theme {
        self.prefs.toggle_theme(self.mounter.dom().as_ref())
    }

    async fn initialize_module_page(&self, path: &str) -> bool {
        let page = PageType::Module;
        let Some(data_path) = page.data_path(path) else {
            tracing::warn!("Invalid module URL: {}", path);
            self.show_fallback(page, path);
            return false;
        };

        match self.mounter.load_and_render_module(&data_path, CONTENT_ID).await {
            Ok(load) => {
                self.set_breadcrumb(&breadcrumb_for(page, path, load.document.title.as_deref()));
                if let Some(navigation) = &load.document.navigation {
                    self.mounter
                        .dom()
                        .append_html(CONTENT_ID, &render_module_navigation(navigation));
                }
                true
            }
            Err(_) => {
                // the error panel is already in place
                self.set_breadcrumb(&breadcrumb_for(page, path, None));
                false
            }
        }
    }

    async fn initialize_catalog_page(&self, path: &str) -> bool {
        let page = PageType::Modules;
        self.set_breadcrumb(&breadcrumb_for(page, path, None));
        let Some(data_path) = page.data_path(path) else {
            self.show_fallback(page, path);
            return false;
        };
        match self.fetch_json::<ModuleCatalog>(&data_path).await {
            Ok(catalog) => {
                self.mounter
                    .dom()
                    .set_inner_html(CONTENT_ID, &render_catalog(&catalog, &self.prefs));
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load modules data: {}", e);
                self.show_fallback(page, path);
                false
            }
        }
    }

    async fn initialize_content_page(&self, page: PageType, path: &str) -> bool {
        let Some(data_path) = page.data_path(path) else {
            self.show_fallback(page, path);
            return false;
        };
        let document = match self.mounter.fetch_document(&data_path).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Failed to load {} data: {}", page.title(), e);
                self.show_fallback(page, path);
                return false;
            }
        };
        if self.mounter.mount(CONTENT_ID, &document.components).is_err() {
            return false;
        }
        self.set_breadcrumb(&breadcrumb_for(page, path, document.title.as_deref()));
        true
    }

    fn show_fallback(&self, page: PageType, path: &str) {
        self.mounter
            .dom()
            .set_inner_html(CONTENT_ID, &fallback_page_html(page));
        self.set_breadcrumb(&breadcrumb_for(page, path, None));
    }

    fn set_breadcrumb(&self, items: &[BreadcrumbItem]) {
        self.mounter
            .dom()
            .set_inner_html(BREADCRUMB_ID, &render_breadcrumb(items));
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ContentError> {
        let text = self.mounter.fetcher().fetch_text(path).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
