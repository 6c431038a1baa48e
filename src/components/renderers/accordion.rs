//! Accordion section. The markup carries everything `AccordionGroup::from_dom`
//! needs: the `{id}-items` container with `data-accordion` and `data-multiple`,
//! and one `accordion-content` panel per item.

use serde_json::Value;

use super::share_button_if;
use crate::components::palette::AccentTheme;
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, require_array, require_text};
use crate::error::RenderError;
use crate::html::{escape_html, handler_arg};

const VARIANT: &str = "accordionSection";

/// `{accordion_id}-item-{index}`
pub fn item_id(accordion_id: &str, index: usize) -> String {
    format!("{}-item-{}", accordion_id, index)
}

/// Id of the element carrying `data-accordion` and `data-multiple`.
pub fn items_container_id(accordion_id: &str) -> String {
    format!("{}-items", accordion_id)
}

/// Chevron icon id for an item.
pub fn chevron_id(item_id: &str) -> String {
    format!("{}-chevron", item_id)
}

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let items = require_array(data, VARIANT, "items")?;
    let allow_multiple = get_bool(data, "allowMultiple").unwrap_or(false);
    let theme = AccentTheme::lookup(get_str(data, "theme"));
    let shared = get_bool(data, "shared").unwrap_or(false);
    let accordion_id = ctx.section_id(Some(title), "accordion");

    let mut body = String::new();
    for (index, item) in items.iter().enumerate() {
        let item_id = item_id(&accordion_id, index);
        body.push_str(&format!(
            r#"
                    <div class="border border-gray-200 dark:border-gray-700 rounded-lg overflow-hidden hover:border-orange-300 dark:hover:border-orange-600 transition-colors">
                        <button
                            class="accordion-toggle w-full px-6 py-4 text-left flex items-center justify-between bg-gray-50 dark:bg-gray-800 hover:bg-orange-50 dark:hover:bg-gray-700 transition-colors"
                            data-target="{item_id}"
                            onclick="toggleAccordion('{item_arg}', '{group_arg}', {allow_multiple})"
                        >
                            <span class="font-medium text-gray-900 dark:text-white">{title}</span>
                            <i id="{chevron_id}" class="fas fa-chevron-down transform transition-transform duration-200 text-orange-500"></i>
                        </button>
                        <div id="{item_id}" class="accordion-content hidden">
                            <div class="px-6 py-4 border-t border-gray-200 dark:border-gray-700 prose prose-sm dark:prose-invert max-w-none">
                                {content}
                            </div>
                        </div>
                    </div>"#,
            item_id = escape_html(&item_id),
            item_arg = handler_arg(&item_id),
            group_arg = handler_arg(&accordion_id),
            allow_multiple = allow_multiple,
            title = escape_html(get_str(item, "title").unwrap_or_default()),
            chevron_id = escape_html(&chevron_id(&item_id)),
            content = get_str(item, "content").unwrap_or_default(),
        ));
    }

    Ok(format!(
        r#"
            <section id="{id}" class="mb-8 scroll-mt-20">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-2xl font-bold {color}">{title}</h2>{share}
                </div>
                <div id="{items_id}" class="space-y-3" data-accordion="{id}" data-multiple="{allow_multiple}">{body}
                </div>
            </section>
        "#,
        id = escape_html(&accordion_id),
        items_id = escape_html(&items_container_id(&accordion_id)),
        color = theme.heading_color(),
        title = escape_html(title),
        share = share_button_if(shared, &accordion_id, title, "Share this section"),
        allow_multiple = allow_multiple,
        body = body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_accordion_items_start_collapsed() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({
            "title": "FAQ",
            "items": [
                {"title": "Apa itu HTML?", "content": "<p>Bahasa markup</p>"},
                {"title": "Apa itu CSS?", "content": "<p>Bahasa gaya</p>"}
            ]
        });

        let html = render(&data, &mut ctx).unwrap();
        assert!(html.contains(
            r#"<div id="accordion-faq-items" class="space-y-3" data-accordion="accordion-faq" data-multiple="false">"#
        ));
        assert!(html.contains(r#"<div id="accordion-faq-item-0" class="accordion-content hidden">"#));
        assert!(html.contains(r#"<div id="accordion-faq-item-1" class="accordion-content hidden">"#));
        assert!(html.contains("toggleAccordion('accordion-faq-item-1', 'accordion-faq', false)"));
        assert!(html.contains(r#"id="accordion-faq-item-0-chevron""#));
        assert!(html.contains("<p>Bahasa markup</p>"));
    }

    #[test]
    fn test_allow_multiple_flag() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({"title": "Q", "items": [], "allowMultiple": true});
        let html = render(&data, &mut ctx).unwrap();
        assert!(html.contains(r#"data-multiple="true""#));
    }
}
