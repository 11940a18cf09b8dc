//! Printable HTML export
//!
//! A single static template with inline print styles. Every interpolated
//! value goes through [`escape_html`].

use chrono::{DateTime, Utc};

use crate::reports::ReportTable;

const TEMPLATE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 24px; color: #1f2933; }
  h1 { font-size: 20px; margin: 0 0 4px; }
  .generated { color: #616e7c; font-size: 12px; margin-bottom: 16px; }
  ul.notes { padding-left: 18px; font-size: 13px; }
  table { border-collapse: collapse; width: 100%; font-size: 12px; }
  th, td { border: 1px solid #cbd2d9; padding: 4px 8px; text-align: left; }
  th { background: #f5f7fa; }
  tfoot td { font-weight: bold; background: #f5f7fa; }
  @media print { body { margin: 0; } th { -webkit-print-color-adjust: exact; } }
</style>
</head>
<body>
"#;

const TEMPLATE_TAIL: &str = "</body>\n</html>\n";

/// Escape `& < > " '` for text and attribute contexts.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render a table as a standalone printable HTML page.
pub fn to_html(table: &ReportTable, generated_at: DateTime<Utc>) -> String {
    let mut html = TEMPLATE_HEAD.replace("{title}", &escape_html(&table.title));

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&table.title)));
    html.push_str(&format!(
        "<div class=\"generated\">Generated {}</div>\n",
        escape_html(&generated_at.format("%Y-%m-%d %H:%M UTC").to_string())
    ));

    if !table.notes.is_empty() {
        html.push_str("<ul class=\"notes\">\n");
        for note in &table.notes {
            html.push_str(&format!("<li>{}</li>\n", escape_html(note)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<table>\n<thead>\n");
    push_row(&mut html, "th", &table.headers);
    html.push_str("</thead>\n<tbody>\n");
    for row in &table.rows {
        push_row(&mut html, "td", row);
    }
    html.push_str("</tbody>\n");
    if let Some(footer) = &table.footer {
        html.push_str("<tfoot>\n");
        push_row(&mut html, "td", footer);
        html.push_str("</tfoot>\n");
    }
    html.push_str("</table>\n");

    html.push_str(TEMPLATE_TAIL);
    html
}

fn push_row(html: &mut String, cell: &str, values: &[String]) {
    html.push_str("<tr>");
    for value in values {
        html.push_str(&format!("<{cell}>{}</{cell}>", escape_html(value)));
    }
    html.push_str("</tr>\n");
}
