//! YouTube embed.

use serde_json::Value;

use super::{description_paragraph, share_button_if};
use crate::components::palette::AccentTheme;
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, get_text, require_text};
use crate::error::RenderError;
use crate::html::escape_html;

const VARIANT: &str = "video";

/// Player URL for a video id. The id is opaque and not validated.
pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?rel=0&modestbranding=1",
        video_id
    )
}

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let video_id = require_text(data, VARIANT, "videoId")?;
    let description = get_text(data, "description");
    let theme = AccentTheme::lookup(get_str(data, "theme"));
    let shared = get_bool(data, "shared").unwrap_or(true);
    let container_id = ctx.section_id(Some(title), "video");

    Ok(format!(
        r#"
            <section id="{id}" class="mb-8 scroll-mt-20">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-xl font-semibold {color}">{title}</h3>{share}
                </div>
                {description}
                <div class="relative pb-[56.25%] bg-gray-200 dark:bg-gray-800 rounded-lg overflow-hidden shadow-lg border-2 border-transparent hover:border-orange-300 transition-colors">
                    <iframe
                        class="absolute inset-0 w-full h-full"
                        src="{src}"
                        title="{title}"
                        frameborder="0"
                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                        allowfullscreen>
                    </iframe>
                </div>
            </section>
        "#,
        id = escape_html(&container_id),
        color = theme.heading_color(),
        title = escape_html(title),
        share = share_button_if(shared, &container_id, title, "Share this video"),
        description = description_paragraph(description, "text-gray-600 dark:text-gray-300 mb-4"),
        src = escape_html(&embed_url(video_id)),
    ))
}
