//! Module catalog grid (`assets/data/modules.json`).

use serde::{Deserialize, Serialize};

use crate::dom::DomEffects;
use crate::html::{escape_html, handler_arg};
use crate::site::preferences::{KeyValueStore, Preferences};

const BOOKMARKED_CLASS: &str = "text-yellow-500";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCatalog {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub modules: Vec<ModuleSummary>,
}

/// Id of the star icon on a module card.
pub fn bookmark_icon_id(module_id: &str) -> String {
    format!("bookmark-{}", module_id)
}

pub fn render_module_card(module: &ModuleSummary, bookmarked: bool, completed: bool) -> String {
    let title = escape_html(&module.title);
    let banner = match &module.image {
        Some(image) => format!(
            r#"<img src="{}" alt="{}" class="w-full h-48 object-cover">"#,
            escape_html(image),
            title
        ),
        None => r#"<div class="w-full h-48 bg-gradient-to-br from-primary-orange to-accent-orange flex items-center justify-center">
            <i class="fas fa-mobile-alt text-white text-4xl"></i>
        </div>"#
            .to_string(),
    };
    let completed_badge = if completed {
        r#"<span class="text-green-600 dark:text-green-400"><i class="fas fa-check-circle mr-1"></i>Completed</span>"#
    } else {
        ""
    };

    format!(
        r#"
<div class="module-card bg-white dark:bg-gray-800 rounded-lg shadow-md hover:shadow-lg transition-shadow duration-300 overflow-hidden">
    {banner}
    <div class="p-6">
        <div class="flex items-start justify-between mb-3">
            <h3 class="text-lg font-semibold text-gray-900 dark:text-white">{title}</h3>
            <button onclick="toggleBookmark('{id_arg}')" class="text-gray-400 hover:text-yellow-500 transition-colors">
                <i id="{icon_id}" class="fas fa-star{star}"></i>
            </button>
        </div>
        <p class="text-gray-600 dark:text-gray-300 mb-4 line-clamp-3">{description}</p>
        <div class="flex items-center justify-between">
            <a href="{url}" class="inline-flex items-center px-4 py-2 bg-primary-orange text-white rounded-lg hover:bg-accent-orange transition-colors">
                {action}
                <i class="fas fa-arrow-right ml-2"></i>
            </a>
            {completed}
        </div>
    </div>
</div>"#,
        banner = banner,
        title = title,
        id_arg = handler_arg(&module.id),
        icon_id = escape_html(&bookmark_icon_id(&module.id)),
        star = if bookmarked { " text-yellow-500" } else { "" },
        description = escape_html(&module.description),
        url = escape_html(&module.url),
        action = if completed { "Review" } else { "Start Learning" },
        completed = completed_badge,
    )
}

/// The catalog page body, with bookmark and completion state from `prefs`.
pub fn render_catalog<S: KeyValueStore>(catalog: &ModuleCatalog, prefs: &Preferences<S>) -> String {
    let bookmarks = prefs.bookmarks();
    let completed = prefs.completed_modules();
    let cards: String = catalog
        .modules
        .iter()
        .map(|module| {
            render_module_card(
                module,
                bookmarks.contains(&module.id),
                completed.contains(&module.id),
            )
        })
        .collect();

    format!(
        r#"<div class="max-w-7xl mx-auto">
    <div class="text-center mb-8">
        <h1 class="text-3xl font-bold mb-4 text-gray-900 dark:text-white">{}</h1>
        <p class="text-lg text-gray-600 dark:text-gray-300 max-w-2xl mx-auto">{}</p>
    </div>
    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">{}
    </div>
</div>"#,
        escape_html(&catalog.title),
        escape_html(&catalog.description),
        cards
    )
}

/// Bookmark button handler: flip the stored bookmark and the star colour.
pub fn toggle_bookmark<S: KeyValueStore>(
    dom: &dyn DomEffects,
    prefs: &Preferences<S>,
    module_id: &str,
) -> bool {
    let bookmarked = prefs.toggle_bookmark(module_id);
    let icon = bookmark_icon_id(module_id);
    if bookmarked {
        dom.add_class(&icon, BOOKMARKED_CLASS);
    } else {
        dom.remove_class(&icon, BOOKMARKED_CLASS);
    }
    bookmarked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::site::preferences::MemoryStore;
    use serde_json::json;

    fn catalog() -> ModuleCatalog {
        serde_json::from_value(json!({
            "title": "Learning Modules",
            "description": "Step by step",
            "modules": [
                {"id": "modul1", "title": "Pengenalan", "description": "Dasar", "url": "/pages/modul/modul1.html"},
                {"id": "modul2", "title": "Layout", "url": "/pages/modul/modul2.html", "image": "/img/2.png"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_catalog_reflects_preferences() {
        let prefs = Preferences::new(MemoryStore::new());
        prefs.mark_completed("modul1");
        prefs.toggle_bookmark("modul2");

        let html = render_catalog(&catalog(), &prefs);
        assert!(html.contains(r#"<i id="bookmark-modul2" class="fas fa-star text-yellow-500"></i>"#));
        assert!(html.contains(r#"<i id="bookmark-modul1" class="fas fa-star"></i>"#));
        assert!(html.contains("Review"));
        assert!(html.contains("Completed"));
        assert!(html.contains("Start Learning"));
        assert!(html.contains(r#"<img src="/img/2.png" alt="Layout""#));
    }

    #[test]
    fn test_toggle_bookmark_updates_star() {
        let prefs = Preferences::new(MemoryStore::new());
        let dom = MemoryDom::from_body_html("http://localhost/", &render_catalog(&catalog(), &prefs));

        assert!(toggle_bookmark(&dom, &prefs, "modul1"));
        assert!(dom.has_class("bookmark-modul1", BOOKMARKED_CLASS));
        assert!(!toggle_bookmark(&dom, &prefs, "modul1"));
        assert!(!dom.has_class("bookmark-modul1", BOOKMARKED_CLASS));
    }
}
