//! Material section: heading plus a prose body.

use serde_json::Value;

use super::share_button_if;
use crate::components::palette::{HeadingLevel, MaterialTheme};
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, require_str, require_text};
use crate::error::RenderError;
use crate::html::escape_html;

const VARIANT: &str = "material";

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let content = require_str(data, VARIANT, "content")?;
    let level = HeadingLevel::lookup(get_str(data, "level"));
    let theme = MaterialTheme::lookup(get_str(data, "theme"));
    let shared = get_bool(data, "shared").unwrap_or(false);
    let material_id = ctx.section_id(Some(title), "material");

    Ok(format!(
        r#"
            <section id="{id}" class="mb-8 scroll-mt-20">
                <div class="flex items-center justify-between mb-4">
                    <{tag} class="{size} {color}">
                        {title}
                    </{tag}>{share}
                </div>
                <div class="prose prose-lg dark:prose-invert max-w-none">
                    {content}
                </div>
            </section>
        "#,
        id = escape_html(&material_id),
        tag = level.tag(),
        size = level.css_class(),
        color = theme.heading_color(),
        title = escape_html(title),
        share = share_button_if(shared, &material_id, title, "Share this section"),
        content = content,
    ))
}
