//! Site glue around the rendering core: page routing, sidebar, catalog,
//! reader preferences and the mount pipeline that ties rendering to the
//! deferred loader and the widgets.

pub mod app;
pub mod catalog;
pub mod mount;
pub mod page;
pub mod preferences;
pub mod sidebar;

pub use app::{PageOutcome, SiteApp};
pub use catalog::{ModuleCatalog, ModuleSummary};
pub use mount::{ContentMounter, ModuleLoad, MountReport};
pub use page::{BreadcrumbItem, PageType};
pub use preferences::{KeyValueStore, MemoryStore, Preferences, Theme};
pub use sidebar::{NavItem, SidebarData};
