//! One renderer per component variant.
//!
//! Every renderer has the `RenderFn` shape: component data in, markup out.
//! Plain-text fields are escaped here; rich-text bodies are trusted author
//! HTML and pass through untouched.

pub mod accordion;
pub mod cards;
pub mod code;
pub mod command;
pub mod header;
pub mod info;
pub mod material;
pub mod table;
pub mod video;

use crate::html::{escape_html, handler_arg};

/// Share affordance calling `shareSection(id, title)`.
pub(crate) fn share_button(section_id: &str, title: &str, label: &str) -> String {
    format!(
        r#"
                    <button onclick="shareSection('{}', '{}')"
                            class="p-2 text-gray-500 hover:text-orange-600 rounded-lg transition-colors"
                            title="{}">
                        <i class="fas fa-share-alt"></i>
                    </button>"#,
        handler_arg(section_id),
        handler_arg(title),
        escape_html(label)
    )
}

/// `share_button` when `shared`, nothing otherwise.
pub(crate) fn share_button_if(shared: bool, section_id: &str, title: &str, label: &str) -> String {
    if shared {
        share_button(section_id, title, label)
    } else {
        String::new()
    }
}

/// Escaped description paragraph, or nothing when absent.
pub(crate) fn description_paragraph(description: Option<&str>, class: &str) -> String {
    match description {
        Some(text) => format!(r#"<p class="{}">{}</p>"#, class, escape_html(text)),
        None => String::new(),
    }
}
