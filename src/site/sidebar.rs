//! Sidebar navigation, rendered from `assets/data/sidebar.json`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::DomEffects;
use crate::html::{display_value, escape_html, handler_arg};
use crate::ids::slugify;
use crate::site::page::{HOME_URL, MODULES_URL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// One navigation entry: a link, or a collapsible group when it has children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Text or number shown as a pill after the title.
    #[serde(default)]
    pub badge: Option<Value>,
    #[serde(default)]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Group id; the slugified title when the data gives none.
    pub fn group_id(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => slugify(&self.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarData {
    pub brand: Brand,
    #[serde(default)]
    pub navigation: Vec<NavItem>,
    /// Small print under the navigation.
    #[serde(default)]
    pub footer: Option<String>,
}

/// Whether a nav link points at the current page. External links never do.
pub fn is_active_nav_item(url: &str, current_path: &str) -> bool {
    if url.is_empty() || url.starts_with("http") {
        return false;
    }
    if current_path == url {
        return true;
    }
    if url == HOME_URL
        && (current_path == "/" || current_path.ends_with('/') || current_path.contains("index.html"))
    {
        return true;
    }
    let last_segment = |path: &str| path.rsplit('/').next().unwrap_or_default().to_string();
    last_segment(url) == last_segment(current_path)
}

fn render_items(items: &[NavItem], current_path: &str) -> String {
    items.iter().map(|item| render_item(item, current_path)).collect()
}

fn render_item(item: &NavItem, current_path: &str) -> String {
    let title = escape_html(&item.title);

    if !item.children.is_empty() {
        let group_id = item.group_id();
        let icon = item
            .icon
            .as_deref()
            .map(|icon| {
                format!(
                    r#"<i class="{} mr-3 text-gray-400 group-hover:text-gray-600 dark:group-hover:text-gray-300"></i>"#,
                    escape_html(icon)
                )
            })
            .unwrap_or_default();
        return format!(
            r#"
<li>
    <button class="w-full flex items-center justify-between px-3 py-2 text-sm font-medium text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700 rounded-lg group" onclick="toggleNavGroup('{arg}')">
        <div class="flex items-center">{icon}<span>{title}</span></div>
        <i class="fas fa-chevron-down transform transition-transform duration-200" id="{id}-chevron"></i>
    </button>
    <ul id="{id}-children" class="ml-6 mt-2 space-y-1 hidden">{children}
    </ul>
</li>"#,
            arg = handler_arg(&group_id),
            icon = icon,
            title = title,
            id = escape_html(&group_id),
            children = render_items(&item.children, current_path),
        );
    }

    let url = item.url.as_deref().unwrap_or("#");
    let active = is_active_nav_item(url, current_path);
    let link_class = if active {
        "bg-primary-orange text-white"
    } else {
        "text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700"
    };
    let icon = item
        .icon
        .as_deref()
        .map(|icon| {
            let color = if active {
                "text-white"
            } else {
                "text-gray-400 group-hover:text-gray-600 dark:group-hover:text-gray-300"
            };
            format!(r#"<i class="{} mr-3 {}"></i>"#, escape_html(icon), color)
        })
        .unwrap_or_default();
    let badge = item
        .badge
        .as_ref()
        .map(display_value)
        .filter(|b| !b.is_empty())
        .map(|b| {
            format!(
                r#"<span class="ml-auto bg-primary-orange text-white text-xs px-2 py-1 rounded-full">{}</span>"#,
                escape_html(&b)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
<li>
    <a href="{url}" class="flex items-center px-3 py-2 text-sm font-medium rounded-lg transition-colors {link_class} group">{icon}<span>{title}</span>{badge}</a>
</li>"#,
        url = escape_html(url),
        link_class = link_class,
        icon = icon,
        title = title,
        badge = badge,
    )
}

fn render_footer(footer: Option<&str>) -> String {
    footer
        .map(|text| {
            format!(
                r#"
<div class="p-4 border-t border-gray-200 dark:border-gray-700">
    <p class="text-xs text-gray-500 dark:text-gray-400 text-center">{}</p>
</div>"#,
                escape_html(text)
            )
        })
        .unwrap_or_default()
}

pub fn render_sidebar(data: &SidebarData, current_path: &str) -> String {
    let brand = &data.brand;
    let logo = brand
        .logo
        .as_deref()
        .map(|logo| {
            format!(
                r#"<img src="{}" alt="{}" class="w-8 h-8">"#,
                escape_html(logo),
                escape_html(&brand.name)
            )
        })
        .unwrap_or_default();
    let subtitle = brand
        .subtitle
        .as_deref()
        .map(|s| {
            format!(
                r#"<p class="text-xs text-gray-500 dark:text-gray-400">{}</p>"#,
                escape_html(s)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="p-6 border-b border-gray-200 dark:border-gray-700">
    <div class="flex items-center space-x-3">{logo}
        <div>
            <h1 class="text-lg font-bold text-gray-900 dark:text-white">{name}</h1>{subtitle}
        </div>
    </div>
</div>
<nav class="flex-1 p-4 overflow-y-auto">
    <ul class="space-y-2">{items}
    </ul>
</nav>{footer}"#,
        logo = logo,
        name = escape_html(&brand.name),
        subtitle = subtitle,
        items = render_items(&data.navigation, current_path),
        footer = render_footer(data.footer.as_deref()),
    )
}

/// Minimal sidebar used when the sidebar document cannot be loaded.
pub fn render_fallback_sidebar() -> String {
    format!(
        r#"<div class="p-6 border-b border-gray-200 dark:border-gray-700">
    <h1 class="text-lg font-bold text-gray-900 dark:text-white">Modul Praktikum</h1>
    <p class="text-xs text-gray-500 dark:text-gray-400">Mobile Development</p>
</div>
<nav class="flex-1 p-4">
    <ul class="space-y-2">
        <li><a href="{home}" class="flex items-center px-3 py-2 text-sm font-medium text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700 rounded-lg"><i class="fas fa-home mr-3"></i>Home</a></li>
        <li><a href="{modules}" class="flex items-center px-3 py-2 text-sm font-medium text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700 rounded-lg"><i class="fas fa-book mr-3"></i>Modules</a></li>
    </ul>
</nav>"#,
        home = HOME_URL,
        modules = MODULES_URL,
    )
}

/// Open or close a navigation group. Returns whether its children are now
/// visible, or `None` when the group is not in the document.
pub fn toggle_nav_group(dom: &dyn DomEffects, group_id: &str) -> Option<bool> {
    let children = format!("{}-children", group_id);
    let chevron = format!("{}-chevron", group_id);
    if !dom.exists(&children) || !dom.exists(&chevron) {
        return None;
    }
    let open = dom.has_class(&children, "hidden");
    if open {
        dom.remove_class(&children, "hidden");
        dom.add_class(&chevron, "rotate-180");
    } else {
        dom.add_class(&children, "hidden");
        dom.remove_class(&chevron, "rotate-180");
    }
    Some(open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use serde_json::json;

    fn sample() -> SidebarData {
        serde_json::from_value(json!({
            "brand": {"name": "Modul Praktikum", "subtitle": "Mobile Development"},
            "navigation": [
                {"title": "Home", "url": "/index.html", "icon": "fas fa-home"},
                {"id": "modules", "title": "Modules", "icon": "fas fa-book", "children": [
                    {"title": "Modul 1", "url": "/pages/modul/modul1.html", "badge": 1},
                    {"title": "Modul 2", "url": "/pages/modul/modul2.html"}
                ]},
                {"title": "GitHub", "url": "https://github.com"}
            ],
            "footer": "© 2025"
        }))
        .unwrap()
    }

    #[test]
    fn test_is_active_nav_item() {
        assert!(is_active_nav_item("/index.html", "/"));
        assert!(is_active_nav_item("/pages/modul/modul1.html", "/pages/modul/modul1.html"));
        assert!(is_active_nav_item("/pages/about.html", "/learning/pages/about.html"));
        assert!(!is_active_nav_item("https://github.com", "/"));
        assert!(!is_active_nav_item("/pages/about.html", "/pages/contact.html"));
    }

    #[test]
    fn test_render_sidebar_marks_active_and_groups() {
        let html = render_sidebar(&sample(), "/pages/modul/modul2.html");
        assert!(html.contains(r#"<ul id="modules-children" class="ml-6 mt-2 space-y-1 hidden">"#));
        assert!(html.contains("toggleNavGroup('modules')"));
        assert!(html.contains(
            r#"<a href="/pages/modul/modul2.html" class="flex items-center px-3 py-2 text-sm font-medium rounded-lg transition-colors bg-primary-orange text-white group">"#
        ));
        assert!(html.contains(">1</span>"));
        assert!(html.contains("© 2025"));
    }

    #[test]
    fn test_toggle_nav_group() {
        let dom = MemoryDom::from_body_html(
            "http://localhost/",
            &render_sidebar(&sample(), "/"),
        );
        assert_eq!(toggle_nav_group(&dom, "modules"), Some(true));
        assert!(dom.has_class("modules-chevron", "rotate-180"));
        assert_eq!(toggle_nav_group(&dom, "modules"), Some(false));
        assert_eq!(toggle_nav_group(&dom, "missing"), None);
    }

    #[test]
    fn test_fallback_sidebar_links() {
        let html = render_fallback_sidebar();
        assert!(html.contains(r#"href="/pages/modules.html""#));
    }
}
