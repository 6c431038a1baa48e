//! Component rendering core
//!
//! JSON component records in, markup out. `types` is the data model,
//! `palette` the fixed style tables, `registry` maps tags to renderers and
//! `dispatcher` folds a batch into one string.

pub mod dispatcher;
pub mod palette;
pub mod registry;
pub mod renderers;
pub mod types;

pub use dispatcher::{Dispatcher, RenderOutput};
pub use registry::{ComponentRegistry, ComponentRegistryBuilder, RenderContext, RenderDiagnostic, RenderFn};
pub use types::{Component, ModuleDocument, ModuleNavigation, NavLink};
