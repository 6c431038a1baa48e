//! Interactive widgets
//!
//! Consumers of the ids the renderers allocate. Every widget works through
//! `DomEffects`; the ones with timers spawn tokio tasks and must be driven
//! from inside a runtime.

pub mod accordion;
pub mod code_actions;
pub mod navigation;
pub mod scroll;
pub mod share;
pub mod toast;

pub use accordion::{AccordionController, AccordionGroup};
pub use code_actions::{copy_code, copy_commands, copy_text, toggle_fullscreen};
pub use navigation::{wait_for_element, NavigationOutcome, SectionNavigator};
pub use scroll::{scroll_progress, scroll_to_top, update_scroll_progress, update_scroll_to_top};
pub use share::{ShareData, ShareModalController, ShareNetwork};
pub use toast::{report_unexpected, Severity, Toast, ToastQueue, ToastTimings};
