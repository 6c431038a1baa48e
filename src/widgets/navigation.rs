//! Deep-link navigation: `?section=<id>` scrolls to and highlights a section
//! once it exists in the document.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::toast::ToastQueue;
use crate::config::PlatformConfig;
use crate::dom::DomEffects;
use crate::error::WidgetError;
use crate::url::{query_param, set_query_param};

pub const SECTION_PARAM: &str = "section";
pub const HIGHLIGHT_CLASS: &str = "highlight-section";

/// Resolve once an element with `id` exists, or fail after `timeout`.
///
/// Woken by the document's mutation signal rather than polling on a timer.
pub async fn wait_for_element(
    dom: &dyn DomEffects,
    id: &str,
    timeout: Duration,
) -> Result<(), WidgetError> {
    // subscribe before the first check so no mutation is missed
    let mut mutations = dom.mutations();
    if dom.exists(id) {
        return Ok(());
    }

    let appeared = async {
        loop {
            if mutations.changed().await.is_err() {
                // the document went away; only the timeout can end the wait
                std::future::pending::<()>().await;
            }
            if dom.exists(id) {
                return;
            }
        }
    };

    tokio::time::timeout(timeout, appeared)
        .await
        .map_err(|_| WidgetError::ElementTimeout {
            id: id.to_string(),
            timeout,
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavigationOutcome {
    /// The URL names no section.
    NoSection,
    Navigated { section_id: String, label: String },
    NotFound { section_id: String },
}

#[derive(Clone)]
pub struct SectionNavigator {
    dom: Arc<dyn DomEffects>,
    toasts: ToastQueue,
    scroll_offset: f64,
    wait_timeout: Duration,
    highlight_duration: Duration,
}

impl SectionNavigator {
    pub fn new(dom: Arc<dyn DomEffects>, toasts: ToastQueue, config: &PlatformConfig) -> Self {
        Self {
            dom,
            toasts,
            scroll_offset: config.scroll_offset_px,
            wait_timeout: config.section_wait_timeout(),
            highlight_duration: config.highlight_duration(),
        }
    }

    /// Follow the `section` query parameter of the current URL, if any.
    pub async fn navigate_to_section(&self) -> NavigationOutcome {
        let url = self.dom.current_url();
        let section_id = match query_param(&url, SECTION_PARAM) {
            Some(id) if !id.is_empty() => id,
            _ => return NavigationOutcome::NoSection,
        };

        let found = wait_for_element(self.dom.as_ref(), &section_id, self.wait_timeout).await;
        let label = match found {
            Ok(()) => self.reveal(&section_id),
            Err(e) => {
                tracing::warn!("Section with ID '{}' not found: {}", section_id, e);
                None
            }
        };

        match label {
            Some(label) => NavigationOutcome::Navigated { section_id, label },
            None => {
                self.toasts
                    .warning(&format!("Section '{}' not found", section_id));
                NavigationOutcome::NotFound { section_id }
            }
        }
    }

    /// Scroll to a present section, highlight it and record it in the URL.
    /// Returns the label shown in the toast: the first heading, or the id.
    pub fn reveal(&self, section_id: &str) -> Option<String> {
        let top = self.dom.element_top(section_id)?;
        self.dom.scroll_to((top - self.scroll_offset).max(0.0));

        self.dom.add_class(section_id, HIGHLIGHT_CLASS);
        let dom = self.dom.clone();
        let duration = self.highlight_duration;
        let id = section_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            dom.remove_class(&id, HIGHLIGHT_CLASS);
        });

        let url = set_query_param(&self.dom.current_url(), SECTION_PARAM, section_id);
        self.dom.replace_url(&url);

        let label = self
            .dom
            .first_heading_text(section_id)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| section_id.to_string());
        tracing::info!("Navigated to section {}", section_id);
        self.toasts.info(&format!("Navigated to: {}", label));
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentPart, MemoryDom};
    use crate::widgets::toast::{Severity, ToastTimings};

    fn navigator(url: &str) -> (Arc<MemoryDom>, ToastQueue, SectionNavigator) {
        let dom = Arc::new(MemoryDom::with_url(url));
        let toasts = ToastQueue::new(dom.clone(), ToastTimings::default(), 5);
        let nav = SectionNavigator::new(dom.clone(), toasts.clone(), &PlatformConfig::default());
        (dom, toasts, nav)
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_on_insert() {
        let dom = Arc::new(MemoryDom::new());
        let inserter = dom.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            inserter.append_to(DocumentPart::Body, r#"<div id="late"></div>"#);
        });
        wait_for_element(dom.as_ref(), "late", Duration::from_secs(3))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let dom = MemoryDom::new();
        let err = wait_for_element(&dom, "never", Duration::from_millis(3000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Element never not found within 3000ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_scrolls_highlights_and_toasts() {
        let (dom, toasts, nav) = navigator("http://localhost/modul1.html?section=material-intro");
        dom.append_to(
            DocumentPart::Body,
            r#"<section id="material-intro"><h2>Intro</h2></section>"#,
        );
        dom.set_element_layout("material-intro", 500.0, 200.0);

        let outcome = nav.navigate_to_section().await;
        assert_eq!(
            outcome,
            NavigationOutcome::Navigated {
                section_id: "material-intro".to_string(),
                label: "Intro".to_string()
            }
        );
        assert_eq!(dom.scroll_history(), vec![420.0]);
        assert!(dom.has_class("material-intro", HIGHLIGHT_CLASS));
        assert_eq!(toasts.active()[0].message, "Navigated to: Intro");

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert!(!dom.has_class("material-intro", HIGHLIGHT_CLASS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_section_warns() {
        let (_dom, toasts, nav) = navigator("http://localhost/modul1.html?section=ghost");
        let outcome = nav.navigate_to_section().await;
        assert_eq!(
            outcome,
            NavigationOutcome::NotFound {
                section_id: "ghost".to_string()
            }
        );
        let active = toasts.active();
        assert_eq!(active[0].message, "Section 'ghost' not found");
        assert_eq!(active[0].severity, Severity::Warning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_section_param() {
        let (_dom, toasts, nav) = navigator("http://localhost/modul1.html");
        assert_eq!(nav.navigate_to_section().await, NavigationOutcome::NoSection);
        assert!(toasts.active().is_empty());
    }
}
