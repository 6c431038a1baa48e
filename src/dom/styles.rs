//! Component stylesheet, injected into `<head>` once per document.

use super::{DocumentPart, DomEffects};

pub const STYLE_ELEMENT_ID: &str = "component-styles";

pub const COMPONENT_CSS: &str = r#"
.fullscreen-code {
    position: fixed !important;
    top: 0 !important;
    left: 0 !important;
    width: 100vw !important;
    height: 100vh !important;
    z-index: 9999 !important;
    background: white !important;
    overflow: auto !important;
}
.dark .fullscreen-code { background: #1f2937 !important; }
.fullscreen-code pre { max-height: none !important; height: calc(100vh - 120px) !important; }

.highlight-section {
    animation: highlightPulse 3s ease-in-out;
    border: 2px solid #f97316;
    border-radius: 8px;
    box-shadow: 0 0 20px rgba(249, 115, 22, 0.3);
}
@keyframes highlightPulse {
    0% { box-shadow: 0 0 20px rgba(249, 115, 22, 0.3); }
    50% { box-shadow: 0 0 30px rgba(249, 115, 22, 0.6); }
    100% { box-shadow: 0 0 20px rgba(249, 115, 22, 0.3); }
}

html { scroll-behavior: smooth; }
.component-container { scroll-margin-top: 100px; }
.scroll-mt-20 { scroll-margin-top: 5rem; }

.prose { line-height: 1.7; }
.prose h1, .prose h2, .prose h3, .prose h4, .prose h5, .prose h6 {
    margin-top: 1.5em;
    margin-bottom: 0.5em;
    font-weight: 600;
    color: #c2410c;
}
.dark .prose h1, .dark .prose h2, .dark .prose h3,
.dark .prose h4, .dark .prose h5, .dark .prose h6 { color: #fdba74; }
.prose p { margin-bottom: 1em; }
.prose ul, .prose ol { margin: 1em 0; padding-left: 1.5em; }
.prose li { margin: 0.25em 0; }
.prose code {
    background-color: #fed7aa;
    color: #c2410c;
    padding: 0.125em 0.25em;
    border-radius: 0.25rem;
    font-size: 0.875em;
}
.dark .prose code { background-color: #431407; color: #fdba74; }
.prose a { color: #ea580c; text-decoration: underline; }
.prose a:hover { color: #c2410c; }
.dark .prose a { color: #fb923c; }
.dark .prose a:hover { color: #fdba74; }

@media (max-width: 768px) {
    .grid-cols-1.md\:grid-cols-2,
    .grid-cols-1.md\:grid-cols-3 { grid-template-columns: repeat(1, minmax(0, 1fr)); }
    .scroll-mt-20 { scroll-margin-top: 3rem; }
}
@media (min-width: 768px) {
    .md\:grid-cols-2 { grid-template-columns: repeat(2, minmax(0, 1fr)); }
    .md\:grid-cols-3 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
}

.scroll-indicator {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 3px;
    background: linear-gradient(to right, #f97316, #ea580c);
    transform-origin: left;
    z-index: 9999;
}

button:focus-visible, a:focus-visible { outline: 2px solid #f97316; outline-offset: 2px; }

.animate-fade-in { animation: fadeIn 0.2s ease-out; }
.animate-fade-out { animation: fadeOut 0.2s ease-out; }
.animate-slide-in { animation: slideInModal 0.3s ease-out; }
@keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }
@keyframes fadeOut { from { opacity: 1; } to { opacity: 0; } }
@keyframes slideInModal {
    from { opacity: 0; transform: translateY(-20px) scale(0.95); }
    to { opacity: 1; transform: translateY(0) scale(1); }
}
"#;

/// Insert the component stylesheet unless it is already present.
/// Returns whether it was inserted.
pub fn ensure_component_styles(dom: &dyn DomEffects) -> bool {
    if dom.exists(STYLE_ELEMENT_ID) {
        return false;
    }
    dom.append_to(
        DocumentPart::Head,
        &format!(r#"<style id="{}">{}</style>"#, STYLE_ELEMENT_ID, COMPONENT_CSS),
    );
    tracing::debug!("Injected component stylesheet");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn test_styles_injected_once() {
        let dom = MemoryDom::new();
        assert!(ensure_component_styles(&dom));
        assert!(!ensure_component_styles(&dom));
        assert_eq!(dom.count_with_id(STYLE_ELEMENT_ID), 1);
        assert!(dom.head_html().contains(".highlight-section {"));
    }
}
