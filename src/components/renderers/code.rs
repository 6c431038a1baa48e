//! Code block. The file body is not part of the markup: the renderer emits a
//! "Loading..." placeholder and records a `DeferredCodeAsset` for the loader.

use serde_json::Value;

use super::{description_paragraph, share_button_if};
use crate::assets::DeferredCodeAsset;
use crate::components::palette::AccentTheme;
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, get_text, require_text};
use crate::error::RenderError;
use crate::html::{escape_html, handler_arg};

const VARIANT: &str = "code";

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let file_path = require_text(data, VARIANT, "filePath")?;
    let title = get_text(data, "title");
    let description = get_text(data, "description");
    let language = get_text(data, "language").unwrap_or("javascript");
    let shared = get_bool(data, "shared").unwrap_or(true);
    let theme = AccentTheme::lookup(get_str(data, "theme"));

    let container_id = ctx.section_id(title, "code");
    let asset = DeferredCodeAsset::new(file_path, ctx.next_id());
    let heading = title.unwrap_or(&asset.file_name);

    let html = format!(
        r#"
            <div id="{container_id}" class="code-block bg-white dark:bg-gray-900 rounded-xl shadow-lg border border-gray-200 dark:border-gray-700 mb-8 overflow-hidden scroll-mt-20">
                <div class="px-6 py-4 border-b border-gray-200 dark:border-gray-700">
                    <div class="flex items-center justify-between">
                        <div>
                            <h3 class="text-xl font-semibold text-gray-900 dark:text-white">{heading}</h3>
                            {description}
                        </div>{share}
                    </div>
                </div>
                <div class="relative">
                    <div class="flex items-center justify-between bg-gray-800 text-white px-4 py-3">
                        <div class="flex items-center space-x-3">
                            <div class="flex space-x-1">
                                <div class="w-3 h-3 bg-red-500 rounded-full"></div>
                                <div class="w-3 h-3 bg-yellow-500 rounded-full"></div>
                                <div class="w-3 h-3 bg-green-500 rounded-full"></div>
                            </div>
                            <span class="text-sm font-mono text-gray-300">{file_name}</span>
                        </div>
                        <div class="flex items-center space-x-2">
                            <a href="{download_href}" download="{file_name}"
                               class="p-2 hover:bg-gray-700 rounded-lg transition-colors group"
                               title="Download File">
                                <i class="fas fa-download text-sm {hover}"></i>
                            </a>
                            <button onclick="copyCodeToClipboard('{code_arg}')"
                                    class="p-2 hover:bg-gray-700 rounded-lg transition-colors group"
                                    title="Copy Code">
                                <i class="fas fa-copy text-sm group-hover:text-green-400"></i>
                            </button>
                            <button onclick="toggleFullscreen('{container_arg}')"
                                    class="p-2 hover:bg-gray-700 rounded-lg transition-colors group"
                                    title="Fullscreen">
                                <i class="fas fa-expand text-sm {hover}"></i>
                            </button>
                        </div>
                    </div>
                    <div id="{loader_id}" class="hidden absolute inset-0 bg-gray-100 dark:bg-gray-800 flex items-center justify-center z-10">
                        <div class="flex items-center space-x-2 text-gray-600 dark:text-gray-400">
                            <div class="animate-spin rounded-full h-5 w-5 border-b-2 border-orange-600"></div>
                            <span>Loading code...</span>
                        </div>
                    </div>
                    <div class="relative">
                        <pre class="!mt-0 !mb-0 overflow-x-auto bg-gray-50 dark:bg-gray-800 p-4" style="max-height: 600px;"><code id="{code_id}" class="language-{language} line-numbers">Loading...</code></pre>
                    </div>
                </div>
            </div>
        "#,
        container_id = escape_html(&container_id),
        heading = escape_html(heading),
        description = description_paragraph(description, "text-gray-600 dark:text-gray-300 mt-1"),
        share = share_button_if(shared, &container_id, heading, "Share this code"),
        file_name = escape_html(&asset.file_name),
        download_href = escape_html(&asset.fetch_path),
        hover = theme.icon_hover(),
        code_arg = handler_arg(&asset.content_id),
        container_arg = handler_arg(&container_id),
        loader_id = escape_html(&asset.loader_id),
        code_id = escape_html(&asset.content_id),
        language = escape_html(language),
    );

    tracing::debug!("Code component {} deferred load of {}", container_id, asset.fetch_path);
    ctx.defer(asset);
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_code_defers_asset_and_shows_placeholder() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let html = render(&json!({"filePath": "./src/a.js"}), &mut ctx).unwrap();
        let (deferred, _) = ctx.into_parts();

        assert_eq!(deferred.len(), 1);
        let asset = &deferred[0];
        assert_eq!(asset.fetch_path, "/src/a.js");
        assert_eq!(asset.file_name, "a.js");
        assert_eq!(asset.loader_id, format!("loader-{}", asset.content_id));

        assert!(html.contains(&format!(
            r#"<code id="{}" class="language-javascript line-numbers">Loading...</code>"#,
            asset.content_id
        )));
        assert!(html.contains(r#"href="/src/a.js" download="a.js""#));
        // shared defaults to true for code
        assert!(html.contains("Share this code"));
    }

    #[test]
    fn test_code_titled_container_id() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({
            "title": "Setup Server",
            "filePath": "assets/code/server.py",
            "language": "python",
            "shared": false
        });
        let html = render(&data, &mut ctx).unwrap();

        assert!(html.contains(r#"id="code-setup-server""#));
        assert!(html.contains("toggleFullscreen('code-setup-server')"));
        assert!(html.contains("language-python"));
        assert!(!html.contains("shareSection"));
    }

    #[test]
    fn test_code_without_file_path() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let err = render(&json!({"title": "x", "filePath": ""}), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "filePath is required for code component");
        assert!(ctx.into_parts().0.is_empty());
    }
}
