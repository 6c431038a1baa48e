//! Module header banner.

use serde_json::Value;

use crate::components::palette::HeaderTheme;
use crate::components::registry::RenderContext;
use crate::components::types::{get_str, require_text};
use crate::error::RenderError;
use crate::html::escape_html;

const VARIANT: &str = "moduleHeader";

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let module_name = require_text(data, VARIANT, "moduleName")?;
    let description = require_text(data, VARIANT, "description")?;
    let theme = HeaderTheme::lookup(get_str(data, "theme"));
    let header_id = ctx.section_id(Some(title), "header");

    Ok(format!(
        r#"
            <section id="{id}" class="{background} {text} py-16 px-6 rounded-xl mb-8 shadow-lg">
                <div class="max-w-4xl mx-auto text-center">
                    <div class="inline-block {badge} px-4 py-2 rounded-full text-sm font-medium mb-4">
                        {module_name}
                    </div>
                    <h1 class="text-3xl md:text-5xl font-bold mb-6">{title}</h1>
                    <p class="text-lg md:text-xl {subtitle} max-w-2xl mx-auto leading-relaxed">
                        {description}
                    </p>
                </div>
            </section>
        "#,
        id = escape_html(&header_id),
        background = theme.background(),
        text = theme.text_color(),
        badge = theme.badge(),
        subtitle = theme.subtitle(),
        module_name = escape_html(module_name),
        title = escape_html(title),
        description = escape_html(description),
    ))
}
