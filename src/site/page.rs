//! Page routing and the static page chrome: breadcrumb, module prev/next
//! links, error panels and fallback content.

use serde::Serialize;

use crate::components::ModuleNavigation;
use crate::html::escape_html;

pub const HOME_URL: &str = "/index.html";
pub const MODULES_URL: &str = "/pages/modules.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Modules,
    Module,
    About,
    Contact,
}

impl PageType {
    /// Classify a URL path. Anything unrecognised is the home page.
    pub fn from_path(path: &str) -> Self {
        let path = path.to_lowercase();
        if path.contains("index.html")
            || path == "/"
            || path.ends_with("/learning-platform/")
            || path.ends_with("/learning-platform")
        {
            PageType::Home
        } else if path.contains("modules.html") {
            PageType::Modules
        } else if path.contains("modul") {
            PageType::Module
        } else if path.contains("about.html") {
            PageType::About
        } else if path.contains("contact.html") {
            PageType::Contact
        } else {
            PageType::Home
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageType::Home => "Home",
            PageType::Modules => "Modules",
            PageType::Module => "Module",
            PageType::About => "About",
            PageType::Contact => "Contact",
        }
    }

    /// JSON document backing the page. A module page needs a `modulN.html`
    /// path to know which module to load.
    pub fn data_path(&self, path: &str) -> Option<String> {
        match self {
            PageType::Home => Some("/assets/data/homepage.json".to_string()),
            PageType::Modules => Some("/assets/data/modules.json".to_string()),
            PageType::Module => {
                module_number(path).map(|n| format!("/assets/data/content/modul{}.json", n))
            }
            PageType::About => Some("/assets/data/about.json".to_string()),
            PageType::Contact => Some("/assets/data/contact.json".to_string()),
        }
    }
}

/// `N` from the first `modulN.html` in the path.
pub fn module_number(path: &str) -> Option<u32> {
    path.match_indices("modul").find_map(|(pos, _)| {
        let rest = &path[pos + "modul".len()..];
        let digits_len = rest.chars().take_while(char::is_ascii_digit).count();
        if digits_len == 0 || !rest[digits_len..].starts_with(".html") {
            return None;
        }
        rest[..digits_len].parse().ok()
    })
}

// ============================================================================
// Breadcrumb
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub title: String,
    pub url: String,
}

impl BreadcrumbItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Placeholder trail shown until the page content arrives.
pub fn loading_breadcrumb() -> Vec<BreadcrumbItem> {
    vec![BreadcrumbItem::new("Loading...", "#")]
}

/// Trail for a page. `document_title` names the last crumb of module and
/// static pages when the page document provides one.
pub fn breadcrumb_for(page: PageType, path: &str, document_title: Option<&str>) -> Vec<BreadcrumbItem> {
    let home = BreadcrumbItem::new("Home", HOME_URL);
    let modules = BreadcrumbItem::new("Modules", MODULES_URL);
    match page {
        PageType::Home => vec![home],
        PageType::Modules => vec![home, modules],
        PageType::Module => {
            let title = match (document_title, module_number(path)) {
                (Some(title), _) => title.to_string(),
                (None, Some(n)) => format!("Modul {}", n),
                (None, None) => page.title().to_string(),
            };
            vec![home, modules, BreadcrumbItem::new(title, path)]
        }
        PageType::About | PageType::Contact => vec![
            home,
            BreadcrumbItem::new(document_title.unwrap_or(page.title()), path),
        ],
    }
}

/// Links for every crumb but the last, which is plain text.
pub fn render_breadcrumb(items: &[BreadcrumbItem]) -> String {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if index == last {
                format!(
                    r#"<span class="text-gray-500 dark:text-gray-400">{}</span>"#,
                    escape_html(&item.title)
                )
            } else {
                format!(
                    r#"<a href="{}" class="text-primary-orange hover:text-accent-orange transition-colors">{}</a><i class="fas fa-chevron-right text-gray-400 mx-2"></i>"#,
                    escape_html(&item.url),
                    escape_html(&item.title)
                )
            }
        })
        .collect()
}

// ============================================================================
// Module navigation
// ============================================================================

/// Previous/next links under a module. A missing side keeps an empty cell so
/// the other link stays on its own side.
pub fn render_module_navigation(navigation: &ModuleNavigation) -> String {
    let previous = match &navigation.previous {
        Some(link) => format!(
            r#"
    <a href="{url}" class="flex items-center px-6 py-3 bg-gray-100 dark:bg-gray-800 hover:bg-gray-200 dark:hover:bg-gray-700 rounded-lg transition-colors">
        <i class="fas fa-arrow-left mr-3"></i>
        <div>
            <div class="text-sm text-gray-500 dark:text-gray-400">Previous</div>
            <div class="font-medium">{title}</div>
        </div>
    </a>"#,
            url = escape_html(&link.url),
            title = escape_html(&link.title)
        ),
        None => "<div></div>".to_string(),
    };
    let next = match &navigation.next {
        Some(link) => format!(
            r#"
    <a href="{url}" class="flex items-center px-6 py-3 bg-primary-orange text-white hover:bg-accent-orange rounded-lg transition-colors">
        <div class="text-right">
            <div class="text-sm text-orange-100">Next</div>
            <div class="font-medium">{title}</div>
        </div>
        <i class="fas fa-arrow-right ml-3"></i>
    </a>"#,
            url = escape_html(&link.url),
            title = escape_html(&link.title)
        ),
        None => "<div></div>".to_string(),
    };
    format!(
        r#"<div class="module-navigation flex justify-between items-center mt-12 pt-8 border-t border-gray-200 dark:border-gray-700">{}{}
</div>"#,
        previous, next
    )
}

// ============================================================================
// Panels
// ============================================================================

pub const LOADING_PANEL: &str = r#"<div class="flex items-center justify-center py-12">
    <div class="flex items-center space-x-3 text-orange-600">
        <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-orange-600"></div>
        <span class="text-lg">Loading content...</span>
    </div>
</div>"#;

/// Page-level failure with a reload button.
pub fn render_error_panel(message: &str) -> String {
    format!(
        r#"<div class="error-panel max-w-2xl mx-auto text-center py-12">
    <i class="fas fa-exclamation-triangle text-red-500 text-4xl mb-4"></i>
    <h2 class="text-xl font-semibold mb-2 text-gray-900 dark:text-white">Something went wrong</h2>
    <p class="text-gray-600 dark:text-gray-300 mb-6">{}</p>
    <button onclick="window.location.reload()" class="px-6 py-2 bg-primary-orange text-white rounded-lg hover:bg-accent-orange transition-colors">
        Try Again
    </button>
</div>"#,
        escape_html(message)
    )
}

/// Module document failure, with Retry and Go Back.
pub fn render_module_error(message: &str) -> String {
    format!(
        r#"<div class="error-panel p-6 bg-red-50 border border-red-200 rounded-lg">
    <div class="flex items-center mb-4">
        <i class="fas fa-exclamation-triangle text-red-500 text-xl mr-3"></i>
        <h3 class="text-red-800 font-semibold">Failed to Load Module</h3>
    </div>
    <p class="text-red-600 mb-4">{}</p>
    <div class="flex space-x-3">
        <button onclick="location.reload()" class="px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700 transition-colors">
            <i class="fas fa-redo mr-2"></i>Retry
        </button>
        <button onclick="window.history.back()" class="px-4 py-2 border border-red-300 text-red-700 rounded-lg hover:bg-red-50 transition-colors">
            <i class="fas fa-arrow-left mr-2"></i>Go Back
        </button>
    </div>
</div>"#,
        escape_html(message)
    )
}

/// Static content shown when a page's document cannot be loaded.
pub fn fallback_page_html(page: PageType) -> String {
    match page {
        PageType::Home => format!(
            r#"<div class="text-center py-12">
    <h1 class="text-4xl font-bold mb-4 text-gray-900 dark:text-white">Welcome to Mobile Development Platform</h1>
    <p class="text-lg text-gray-600 dark:text-gray-300 mb-8">Learn mobile app development step by step</p>
    <a href="{}" class="inline-flex items-center px-6 py-3 bg-primary-orange text-white rounded-lg hover:bg-accent-orange transition-colors">
        Start Learning <i class="fas fa-arrow-right ml-2"></i>
    </a>
</div>"#,
            MODULES_URL
        ),
        PageType::Modules => r#"<div class="text-center py-12">
    <h1 class="text-3xl font-bold mb-4 text-gray-900 dark:text-white">Learning Modules</h1>
    <p class="text-gray-600 dark:text-gray-300 mb-8">Content is being loaded...</p>
</div>"#
            .to_string(),
        PageType::Module => format!(
            r#"<div class="text-center py-12">
    <h1 class="text-3xl font-bold mb-4 text-gray-900 dark:text-white">Module Content</h1>
    <p class="text-gray-600 dark:text-gray-300 mb-8">Unable to load module content. Please try again later.</p>
    <a href="{}" class="inline-flex items-center px-6 py-3 bg-primary-orange text-white rounded-lg hover:bg-accent-orange transition-colors">
        Back to Modules <i class="fas fa-arrow-left ml-2"></i>
    </a>
</div>"#,
            MODULES_URL
        ),
        PageType::About | PageType::Contact => format!(
            r#"<div class="text-center py-12">
    <h1 class="text-3xl font-bold mb-4 text-gray-900 dark:text-white">{}</h1>
    <p class="text-gray-600 dark:text-gray-300">Content will be available soon.</p>
</div>"#,
            page.title()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NavLink;

    #[test]
    fn test_page_type_from_path() {
        assert_eq!(PageType::from_path("/"), PageType::Home);
        assert_eq!(PageType::from_path("/index.html"), PageType::Home);
        assert_eq!(PageType::from_path("/learning-platform/"), PageType::Home);
        assert_eq!(PageType::from_path("/pages/modules.html"), PageType::Modules);
        assert_eq!(PageType::from_path("/pages/modul/modul3.html"), PageType::Module);
        assert_eq!(PageType::from_path("/pages/About.html"), PageType::About);
        assert_eq!(PageType::from_path("/pages/contact.html"), PageType::Contact);
        assert_eq!(PageType::from_path("/somewhere/else"), PageType::Home);
    }

    #[test]
    fn test_module_number_and_data_path() {
        assert_eq!(module_number("/pages/modul/modul12.html"), Some(12));
        assert_eq!(module_number("/pages/modul/intro.html"), None);
        assert_eq!(
            PageType::Module.data_path("/pages/modul/modul2.html").as_deref(),
            Some("/assets/data/content/modul2.json")
        );
        assert_eq!(PageType::Module.data_path("/pages/modul/x.html"), None);
        assert_eq!(
            PageType::About.data_path("/pages/about.html").as_deref(),
            Some("/assets/data/about.json")
        );
    }

    #[test]
    fn test_breadcrumb() {
        let items = breadcrumb_for(PageType::Module, "/pages/modul/modul2.html", None);
        assert_eq!(items.last().unwrap().title, "Modul 2");

        let html = render_breadcrumb(&items);
        assert!(html.contains(r#"<a href="/index.html""#));
        assert!(html.ends_with(r#"<span class="text-gray-500 dark:text-gray-400">Modul 2</span>"#));

        let about = breadcrumb_for(PageType::About, "/pages/about.html", None);
        assert_eq!(about[1].title, "About");
    }

    #[test]
    fn test_module_navigation_keeps_empty_side() {
        let nav = ModuleNavigation {
            previous: None,
            next: Some(NavLink {
                title: "Modul 2".to_string(),
                url: "/pages/modul/modul2.html".to_string(),
            }),
        };
        let html = render_module_navigation(&nav);
        assert!(html.contains("<div></div>"));
        assert!(html.contains(r#"href="/pages/modul/modul2.html""#));
        assert!(!html.contains("Previous"));
    }

    #[test]
    fn test_panels_escape_messages() {
        assert!(render_module_error("<x>").contains("&lt;x&gt;"));
        assert!(render_error_panel("bad").contains("Something went wrong"));
        assert!(fallback_page_html(PageType::Contact).contains(">Contact</h1>"));
    }
}
