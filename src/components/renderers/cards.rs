//! Card grid.

use serde_json::Value;

use super::share_button_if;
use crate::components::palette::AccentTheme;
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, get_text, get_u64, require_array, require_text};
use crate::error::RenderError;
use crate::html::escape_html;

const VARIANT: &str = "cardSection";
const DEFAULT_COLUMNS: u64 = 2;
const MAX_COLUMNS: u64 = 3;

/// Requested column count clamped to `[1, 3]`.
pub fn grid_columns(requested: Option<u64>) -> u64 {
    requested.unwrap_or(DEFAULT_COLUMNS).clamp(1, MAX_COLUMNS)
}

fn render_card(card: &Value) -> String {
    let title = get_str(card, "title").unwrap_or_default();
    let image = get_text(card, "image")
        .map(|src| {
            format!(
                r#"
                            <img src="{}" alt="{}" class="w-full h-48 object-cover">"#,
                escape_html(src),
                escape_html(title)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
                        <div class="bg-white dark:bg-gray-800 rounded-lg shadow-md hover:shadow-lg transition-all duration-300 border border-gray-200 dark:border-gray-700 overflow-hidden hover:border-orange-300 dark:hover:border-orange-600">{image}
                            <div class="p-6">
                                <h3 class="text-lg font-semibold mb-3 text-gray-900 dark:text-white">{title}</h3>
                                <p class="text-gray-600 dark:text-gray-300 leading-relaxed">{description}</p>
                            </div>
                        </div>"#,
        image = image,
        title = escape_html(title),
        description = escape_html(get_str(card, "description").unwrap_or_default()),
    )
}

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let cards = require_array(data, VARIANT, "cards")?;
    let columns = grid_columns(get_u64(data, "columns"));
    let theme = AccentTheme::lookup(get_str(data, "theme"));
    let shared = get_bool(data, "shared").unwrap_or(false);
    let section_id = ctx.section_id(Some(title), "cards");

    let body: String = cards.iter().map(render_card).collect();

    Ok(format!(
        r#"
            <section id="{id}" class="mb-8 scroll-mt-20">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-2xl font-bold {color}">{title}</h2>{share}
                </div>
                <div class="grid grid-cols-1 md:grid-cols-{columns} gap-6">{body}
                </div>
            </section>
        "#,
        id = escape_html(&section_id),
        color = theme.heading_color(),
        title = escape_html(title),
        share = share_button_if(shared, &section_id, title, "Share this section"),
        columns = columns,
        body = body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_columns_clamped() {
        assert_eq!(grid_columns(None), 2);
        assert_eq!(grid_columns(Some(0)), 1);
        assert_eq!(grid_columns(Some(3)), 3);
        assert_eq!(grid_columns(Some(12)), 3);
    }

    #[test]
    fn test_cards_render_in_grid() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({
            "title": "Tools",
            "columns": 5,
            "cards": [
                {"title": "VS Code", "description": "Editor", "image": "/img/vscode.png"},
                {"title": "Git", "description": "Version <control>"}
            ]
        });

        let html = render(&data, &mut ctx).unwrap();
        assert!(html.contains("md:grid-cols-3"));
        assert!(html.contains(r#"<img src="/img/vscode.png" alt="VS Code""#));
        assert!(html.contains("Version &lt;control&gt;"));
        assert_eq!(html.matches("<h3 ").count(), 2);
        assert!(html.find("VS Code").unwrap() < html.find("Git").unwrap());
    }
}
