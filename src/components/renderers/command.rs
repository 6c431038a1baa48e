//! Terminal-style command listing.

use serde_json::Value;

use super::{description_paragraph, share_button_if};
use crate::components::palette::{AccentTheme, TerminalKind};
use crate::components::registry::RenderContext;
use crate::components::types::{get_bool, get_str, get_text, require_array, require_text};
use crate::error::RenderError;
use crate::html::{escape_html, handler_arg};

const VARIANT: &str = "command";

/// One listed command. Entries may be plain strings or `{command, output?, comment?}`.
struct CommandEntry<'a> {
    command: &'a str,
    output: Option<&'a str>,
    comment: Option<&'a str>,
}

impl<'a> CommandEntry<'a> {
    fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(command) => Self {
                command,
                output: None,
                comment: None,
            },
            _ => Self {
                command: get_str(value, "command").unwrap_or_default(),
                output: get_text(value, "output"),
                comment: get_text(value, "comment"),
            },
        }
    }
}

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let commands = require_array(data, VARIANT, "commands")?;
    let description = get_text(data, "description");
    let terminal = TerminalKind::lookup(get_str(data, "type"));
    let theme = AccentTheme::lookup(get_str(data, "theme"));
    let shared = get_bool(data, "shared").unwrap_or(false);
    let command_id = ctx.section_id(Some(title), "command");

    let mut lines = String::new();
    for (index, entry) in commands.iter().map(CommandEntry::from_value).enumerate() {
        let output = entry
            .output
            .map(|o| format!(r#"<div class="mt-1 ml-6 text-gray-300 whitespace-pre-wrap">{}</div>"#, o))
            .unwrap_or_default();
        let comment = entry
            .comment
            .map(|c| format!(r#"<div class="mt-1 ml-6 text-gray-500 text-xs"># {}</div>"#, escape_html(c)))
            .unwrap_or_default();

        lines.push_str(&format!(
            r#"
                            <div class="mb-2 group">
                                <div class="flex items-center">
                                    <span class="text-gray-400 mr-2">{prompt}</span>
                                    <span id="{cmd_id}" class="command-text flex-1">{command}</span>
                                    <button onclick="copyToClipboard('{command_arg}')"
                                            class="ml-2 opacity-0 group-hover:opacity-100 p-1 hover:bg-gray-700 rounded transition-all"
                                            title="Copy command">
                                        <i class="fas fa-copy text-xs"></i>
                                    </button>
                                </div>{output}{comment}
                            </div>"#,
            prompt = escape_html(terminal.prompt()),
            cmd_id = escape_html(&format!("{}-cmd-{}", command_id, index)),
            command = escape_html(entry.command),
            command_arg = handler_arg(entry.command),
            output = output,
            comment = comment,
        ));
    }

    Ok(format!(
        r#"
            <section id="{id}" class="mb-8 scroll-mt-20">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-xl font-semibold {color}">{title}</h3>{share}
                </div>
                {description}
                <div class="bg-white dark:bg-gray-800 rounded-lg shadow-lg border border-gray-200 dark:border-gray-700 overflow-hidden">
                    <div class="flex items-center justify-between bg-gray-200 dark:bg-gray-700 px-4 py-2">
                        <div class="flex items-center space-x-2">
                            <div class="flex space-x-1">
                                <div class="w-3 h-3 bg-red-500 rounded-full"></div>
                                <div class="w-3 h-3 bg-yellow-500 rounded-full"></div>
                                <div class="w-3 h-3 bg-green-500 rounded-full"></div>
                            </div>
                            <span class="text-sm font-medium text-gray-600 dark:text-gray-300">{label}</span>
                        </div>
                        <button onclick="copyCommandsToClipboard('{id_arg}')"
                                class="p-1 text-gray-500 hover:text-orange-600 rounded transition-colors"
                                title="Copy all commands">
                            <i class="fas fa-copy text-sm"></i>
                        </button>
                    </div>
                    <div class="{terminal} p-4 font-mono text-sm overflow-x-auto">
                        <div id="{id}-content">{lines}
                        </div>
                    </div>
                </div>
            </section>
        "#,
        id = escape_html(&command_id),
        color = theme.heading_color(),
        title = escape_html(title),
        share = share_button_if(shared, &command_id, title, "Share this command"),
        description = description_paragraph(description, "text-gray-600 dark:text-gray-300 mb-4"),
        label = terminal.label(),
        id_arg = handler_arg(&command_id),
        terminal = terminal.css_class(),
        lines = lines,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use serde_json::json;

    #[test]
    fn test_commands_with_output_and_comment() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({
            "title": "Install",
            "type": "powershell",
            "commands": [
                {"command": "npm install", "output": "<b>added 12 packages</b>", "comment": "run once"},
                "npm run dev"
            ]
        });

        let html = render(&data, &mut ctx).unwrap();
        assert!(html.contains(r#"<span id="command-install-cmd-0" class="command-text flex-1">npm install</span>"#));
        assert!(html.contains(r#"<span id="command-install-cmd-1" class="command-text flex-1">npm run dev</span>"#));
        assert!(html.contains("<b>added 12 packages</b>"));
        assert!(html.contains("# run once"));
        assert!(html.contains("PS&gt;"));
        assert!(html.contains("POWERSHELL"));
        assert!(html.contains(r#"id="command-install-content""#));
    }

    #[test]
    fn test_command_text_is_escaped_in_handler() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let data = json!({"title": "Echo", "commands": [{"command": "echo 'hi' > out.txt"}]});
        let html = render(&data, &mut ctx).unwrap();
        assert!(html.contains("copyToClipboard('echo \\&#39;hi\\&#39; &gt; out.txt')"));
    }

    #[test]
    fn test_commands_required() {
        let ids = IdGenerator::new();
        let mut ctx = RenderContext::new(&ids);
        let err = render(&json!({"title": "Install"}), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "commands is required for command component");
    }
}
