//! Info box: titled callout with a severity palette.

use serde_json::Value;

use super::share_button_if;
use crate::components::palette::InfoKind;
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, require_str, require_text};
use crate::error::RenderError;
use crate::html::escape_html;

const VARIANT: &str = "info";

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let content = require_str(data, VARIANT, "content")?;
    let kind = InfoKind::lookup(get_str(data, "type"));
    let shared = get_bool(data, "shared").unwrap_or(false);
    let info_id = ctx.section_id(Some(title), "info");

    Ok(format!(
        r#"
            <div id="{id}" class="border-l-4 p-6 mb-6 {style} rounded-r-lg shadow-sm scroll-mt-20">
                <div class="flex items-start justify-between">
                    <div class="flex items-start flex-1">
                        <i class="{icon} text-xl mr-4 mt-1"></i>
                        <div class="flex-1">
                            <h3 class="font-semibold text-lg mb-2">{title}</h3>
                            <div class="prose prose-sm max-w-none">{content}</div>
                        </div>
                    </div>{share}
                </div>
            </div>
        "#,
        id = escape_html(&info_id),
        style = kind.css_class(),
        icon = kind.icon(),
        title = escape_html(title),
        content = content,
        share = share_button_if(shared, &info_id, title, "Share this section"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_info_content_is_verbatim_and_share_optional() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({
            "title": "Tips",
            "content": "<p>Gunakan <code>&lt;div&gt;</code></p>",
            "type": "warning"
        });

        let html = render(&data, &mut ctx).unwrap();
        assert!(html.contains("<p>Gunakan <code>&lt;div&gt;</code></p>"));
        assert!(html.contains("fa-exclamation-triangle"));
        assert!(!html.contains("shareSection"));

        let shared = json!({"title": "Tips", "content": "", "shared": true});
        let html = render(&shared, &mut ctx).unwrap();
        assert!(html.contains("shareSection('info-tips', 'Tips')"));
    }

    #[test]
    fn test_info_requires_content() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let err = render(&json!({"title": "Tips"}), &mut ctx).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingField { variant: "info", field: "content" }
        );
    }
}
