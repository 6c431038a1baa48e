//! Clipboard and fullscreen actions behind the code and command block buttons.

use crate::dom::{DocumentPart, DomEffects};
use crate::error::WidgetError;
use crate::widgets::toast::ToastQueue;

pub const FULLSCREEN_CLASS: &str = "fullscreen-code";

/// Id of the element wrapping a command block's lines.
pub fn command_content_id(command_id: &str) -> String {
    format!("{}-content", command_id)
}

fn write_with_feedback(
    dom: &dyn DomEffects,
    toasts: &ToastQueue,
    text: &str,
    success: &str,
    failure: &str,
) -> Result<(), WidgetError> {
    match dom.write_clipboard(text) {
        Ok(()) => {
            toasts.success(success);
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}: {}", failure, e);
            toasts.error(failure);
            Err(e.into())
        }
    }
}

/// Copy the current text of a code element. Returns false when the element
/// does not exist.
pub fn copy_code(dom: &dyn DomEffects, toasts: &ToastQueue, code_id: &str) -> Result<bool, WidgetError> {
    let Some(text) = dom.text_content(code_id) else {
        return Ok(false);
    };
    write_with_feedback(dom, toasts, &text, "Code copied to clipboard!", "Failed to copy code")?;
    Ok(true)
}

/// Copy every command of a command block, one per line, without outputs or
/// comments. Returns false when the block does not exist.
pub fn copy_commands(
    dom: &dyn DomEffects,
    toasts: &ToastQueue,
    command_id: &str,
) -> Result<bool, WidgetError> {
    let content_id = command_content_id(command_id);
    if !dom.exists(&content_id) {
        return Ok(false);
    }
    let commands: Vec<String> = dom
        .descendant_ids_with_class(&content_id, "command-text")
        .iter()
        .filter_map(|id| dom.text_content(id))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    write_with_feedback(
        dom,
        toasts,
        &commands.join("\n"),
        "All commands copied to clipboard!",
        "Failed to copy commands",
    )?;
    Ok(true)
}

pub fn copy_text(dom: &dyn DomEffects, toasts: &ToastQueue, text: &str) -> Result<(), WidgetError> {
    write_with_feedback(dom, toasts, text, "Copied to clipboard!", "Failed to copy")
}

/// Toggle fullscreen on a code block container and lock page scrolling
/// while it is on. Returns the new state, or `None` if the container is gone.
pub fn toggle_fullscreen(dom: &dyn DomEffects, container_id: &str) -> Option<bool> {
    if !dom.exists(container_id) {
        return None;
    }
    let enable = !dom.has_class(container_id, FULLSCREEN_CLASS);
    if enable {
        dom.add_class(container_id, FULLSCREEN_CLASS);
    } else {
        dom.remove_class(container_id, FULLSCREEN_CLASS);
    }
    dom.set_part_class(DocumentPart::Body, "overflow-hidden", enable);
    Some(enable)
}
