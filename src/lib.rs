//! Learning Platform
//!
//! Component rendering engine for a static learning-content site.
//!
//! Layout:
//! - `components/`: data model, renderer registry, dispatcher, one renderer per variant
//! - `assets/`: deferred code assets and their loader
//! - `dom/`: the `DomEffects` side-effect boundary and the in-memory document
//! - `widgets/`: accordion, toasts, share modal, deep links, scroll UI, clipboard actions
//! - `site/`: page routing, sidebar, catalog, preferences, the mount pipeline
//!
//! Rendering is pure: JSON in, markup plus a list of deferred work out.
//! Everything that touches a document goes through `DomEffects`.

pub mod assets;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod html;
pub mod ids;
pub mod site;
pub mod url;
pub mod widgets;

// Re-export commonly used types
pub use assets::{AssetFetcher, DeferredAssetLoader, DeferredCodeAsset, LoadState, SiteRootFetcher};
pub use components::{Component, ComponentRegistry, Dispatcher, ModuleDocument, RenderOutput};
pub use config::PlatformConfig;
pub use dom::{DomEffects, MemoryDom};
pub use error::{ContentError, DomError, FetchError, PlatformError, RenderError, WidgetError};
pub use ids::IdGenerator;
pub use site::{ContentMounter, SiteApp};
pub use widgets::{Severity, ToastQueue};
