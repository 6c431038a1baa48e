//! Data table. Cells are plain text. Rows whose length differs from the
//! header count render as they are and are reported as `RaggedRow`.

use serde_json::Value;

use super::share_button_if;
use crate::components::palette::AccentTheme;
use crate::components::registry::{RenderContext, RenderDiagnostic};
use crate::components::types::{get_bool, get_str, require_array, require_text};
use crate::error::RenderError;
use crate::html::{display_value, escape_html};

const VARIANT: &str = "table";

fn row_cells(row: &Value) -> Vec<&Value> {
    match row {
        Value::Array(cells) => cells.iter().collect(),
        other => vec![other],
    }
}

pub fn render(data: &Value, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    let title = require_text(data, VARIANT, "title")?;
    let headers = require_array(data, VARIANT, "headers")?;
    let rows = require_array(data, VARIANT, "rows")?;
    let theme = AccentTheme::lookup(get_str(data, "theme"));
    let shared = get_bool(data, "shared").unwrap_or(false);
    let table_id = ctx.section_id(Some(title), "table");

    let head: String = headers
        .iter()
        .map(|h| {
            format!(
                r#"
                                <th class="px-6 py-3 text-left font-medium text-orange-700 dark:text-orange-300">{}</th>"#,
                escape_html(&display_value(h))
            )
        })
        .collect();

    let mut body = String::new();
    for (row_index, row) in rows.iter().enumerate() {
        let cells = row_cells(row);
        if cells.len() != headers.len() {
            tracing::debug!(
                "Table {} row {} has {} cells for {} headers",
                table_id,
                row_index,
                cells.len(),
                headers.len()
            );
            let index = ctx.index();
            ctx.diagnose(RenderDiagnostic::RaggedRow {
                index,
                row: row_index,
                cells: cells.len(),
                headers: headers.len(),
            });
        }

        body.push_str(
            r#"
                            <tr class="hover:bg-orange-50 dark:hover:bg-gray-700 transition-colors">"#,
        );
        for cell in cells {
            body.push_str(&format!(
                r#"
                                <td class="px-6 py-4 text-gray-700 dark:text-gray-300">{}</td>"#,
                escape_html(&display_value(cell))
            ));
        }
        body.push_str(
            r#"
                            </tr>"#,
        );
    }

    Ok(format!(
        r#"
            <section id="{id}" class="mb-8 scroll-mt-20">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-xl font-semibold {color}">{title}</h3>{share}
                </div>
                <div class="overflow-x-auto">
                    <table class="min-w-full bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-lg overflow-hidden shadow-sm">
                        <thead class="bg-orange-50 dark:bg-gray-700">
                            <tr>{head}
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200 dark:divide-gray-700">{body}
                        </tbody>
                    </table>
                </div>
            </section>
        "#,
        id = escape_html(&table_id),
        color = theme.heading_color(),
        title = escape_html(title),
        share = share_button_if(shared, &table_id, title, "Share this table"),
        head = head,
        body = body,
    ))
}
