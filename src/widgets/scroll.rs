//! Scroll-linked UI: the reading progress bar and the scroll-to-top button.

use crate::dom::{DocumentPart, DomEffects, ScrollMetrics};

pub const SCROLL_INDICATOR_ID: &str = "scroll-indicator";
pub const SCROLL_TO_TOP_ID: &str = "scroll-to-top";

/// Fraction of the scrollable range already scrolled, in `[0, 1]`.
/// A page that does not scroll reports 0.
pub fn scroll_progress(metrics: ScrollMetrics) -> f64 {
    let range = metrics.scroll_height - metrics.client_height;
    if range <= 0.0 || !range.is_finite() {
        return 0.0;
    }
    (metrics.scroll_top / range).clamp(0.0, 1.0)
}

/// Scale the progress bar to the current scroll position, creating it on
/// first use. Returns the progress applied.
pub fn update_scroll_progress(dom: &dyn DomEffects) -> f64 {
    let progress = scroll_progress(dom.scroll_metrics());
    if !dom.exists(SCROLL_INDICATOR_ID) {
        dom.append_to(
            DocumentPart::Body,
            &format!(
                r#"<div id="{}" class="scroll-indicator"></div>"#,
                SCROLL_INDICATOR_ID
            ),
        );
    }
    dom.set_style(
        SCROLL_INDICATOR_ID,
        "transform",
        Some(&format!("scaleX({})", progress)),
    );
    progress
}

/// Show the scroll-to-top button past `threshold` pixels, hide it otherwise.
/// Returns whether it is visible; a page without the button reports false.
pub fn update_scroll_to_top(dom: &dyn DomEffects, threshold: f64) -> bool {
    let visible = dom.scroll_metrics().scroll_top > threshold;
    if !dom.exists(SCROLL_TO_TOP_ID) {
        return false;
    }
    let (add, remove) = if visible {
        (["opacity-100", "visible"], ["opacity-0", "invisible"])
    } else {
        (["opacity-0", "invisible"], ["opacity-100", "visible"])
    };
    for class in add {
        dom.add_class(SCROLL_TO_TOP_ID, class);
    }
    for class in remove {
        dom.remove_class(SCROLL_TO_TOP_ID, class);
    }
    visible
}

/// Append the hidden scroll-to-top button unless the page already has one.
pub fn ensure_scroll_to_top_button(dom: &dyn DomEffects) -> bool {
    if dom.exists(SCROLL_TO_TOP_ID) {
        return false;
    }
    dom.append_to(
        DocumentPart::Body,
        &format!(
            r#"<button id="{}" title="Scroll to top" onclick="scrollToTop()" class="fixed bottom-6 right-6 w-12 h-12 bg-primary-orange hover:bg-accent-orange text-white rounded-full shadow-lg transition-all duration-300 opacity-0 invisible z-50"><i class="fas fa-chevron-up"></i></button>"#,
            SCROLL_TO_TOP_ID
        ),
    );
    true
}

pub fn scroll_to_top(dom: &dyn DomEffects) {
    dom.scroll_to(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use approx::assert_relative_eq;

    fn metrics(scroll_top: f64, scroll_height: f64, client_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    #[test]
    fn test_scroll_progress() {
        assert_relative_eq!(scroll_progress(metrics(500.0, 2000.0, 1000.0)), 0.5);
        assert_relative_eq!(scroll_progress(metrics(1000.0, 2000.0, 1000.0)), 1.0);
        assert_relative_eq!(scroll_progress(metrics(0.0, 800.0, 800.0)), 0.0);
        assert_relative_eq!(scroll_progress(metrics(0.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_indicator_created_once() {
        let dom = MemoryDom::new();
        dom.set_viewport(metrics(250.0, 2000.0, 1000.0));
        assert_relative_eq!(update_scroll_progress(&dom), 0.25);
        update_scroll_progress(&dom);
        assert_eq!(dom.count_with_id(SCROLL_INDICATOR_ID), 1);
        assert_eq!(
            dom.style(SCROLL_INDICATOR_ID, "transform").as_deref(),
            Some("scaleX(0.25)")
        );
    }

    #[test]
    fn test_scroll_to_top_visibility() {
        let dom = MemoryDom::new();
        assert!(!update_scroll_to_top(&dom, 300.0));
        assert!(ensure_scroll_to_top_button(&dom));
        assert!(!ensure_scroll_to_top_button(&dom));

        dom.set_viewport(metrics(301.0, 3000.0, 800.0));
        assert!(update_scroll_to_top(&dom, 300.0));
        assert!(dom.has_class(SCROLL_TO_TOP_ID, "opacity-100"));

        scroll_to_top(&dom);
        assert!(!update_scroll_to_top(&dom, 300.0));
        assert!(dom.has_class(SCROLL_TO_TOP_ID, "invisible"));
    }
}
