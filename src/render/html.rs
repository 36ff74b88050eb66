//! HTML page generation
//!
//! Produces a self-contained page holding the coloured table. No scripts
//! are needed: every cell carries its background inline.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::color;
use crate::table::HeatmapTable;

const TABLE_CSS: &str = r#"body { font-family: Arial, Helvetica, sans-serif; margin: 20px; color: #222; }
h1 { font-size: 22px; margin: 0 0 12px 0; }
#view { border-collapse: collapse; font-size: 12px; }
#view th { background: #eee; border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
#view td { border: 1px solid #ccc; padding: 0; }
#view td > div { padding: 4px 8px; min-height: 1em; }
.legend { display: flex; margin: 12px 0; font-size: 12px; align-items: center; }
.legend span.swatch { display: inline-block; width: 24px; height: 12px; }
.legend span.label { margin: 0 8px; }
"#;

/// Accumulates page fragments and joins them in a fixed order.
///
/// Body markup comes first, then styles, then scripts.
#[derive(Debug, Default)]
pub struct HtmlDocument {
    html: Vec<String>,
    styles: Vec<String>,
    scripts: Vec<String>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_html(&mut self, text: impl Into<String>) {
        self.html.push(text.into());
    }

    pub fn add_style(&mut self, css: &str) {
        self.styles
            .push(format!("<style type=\"text/css\">\n{css}</style>"));
    }

    pub fn add_script(&mut self, js: &str) {
        self.scripts
            .push(format!("<script type=\"text/javascript\">\n{js}\n</script>"));
    }

    /// Join all fragments with newlines.
    pub fn render(&self) -> String {
        self.html
            .iter()
            .chain(&self.styles)
            .chain(&self.scripts)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render the `<table id="view">` element for `table`.
pub fn render_table(table: &HeatmapTable) -> String {
    let mut out = String::with_capacity(64 * (table.len() + 1) * table.headers.len().max(1));

    out.push_str("<table id=\"view\">\n<thead><tr>");
    for header in &table.headers {
        let _ = write!(out, "<th>{}</th>", html_escape(header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(
                out,
                "<td><div style=\"background-color: {}\">{}</div></td>",
                cell.hex(),
                html_escape(&cell.text)
            );
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}

/// Render a small red → green strip explaining the gradient.
fn render_legend() -> String {
    let swatches: String = color::gradient_stops(9)
        .into_iter()
        .map(|c| {
            format!(
                "<span class=\"swatch\" style=\"background-color: {}\"></span>",
                color::to_hex(c)
            )
        })
        .collect();
    format!(
        "<div class=\"legend\"><span class=\"label\">below band</span>{swatches}\
         <span class=\"label\">above band</span>\
         <span class=\"swatch\" style=\"background-color: {}\"></span>\
         <span class=\"label\">no spread</span></div>",
        color::to_hex(color::NEUTRAL)
    )
}

/// Render a complete standalone page.
pub fn render_page(table: &HeatmapTable, title: &str) -> String {
    let title = html_escape(title);
    let mut doc = HtmlDocument::new();
    doc.add_html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>"
    ));
    doc.add_html(render_legend());
    doc.add_html(render_table(table));
    doc.add_style(TABLE_CSS);
    let mut page = doc.render();
    page.push_str("\n</body>\n</html>\n");
    page
}

/// Render and write a page to `path`.
pub fn write_page(path: &Path, table: &HeatmapTable, title: &str) -> Result<()> {
    std::fs::write(path, render_page(table, title))
        .with_context(|| format!("writing HTML to {}", path.display()))?;
    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{LABEL, NEUTRAL};
    use crate::table::{CellKind, CellView};
    use palette::Srgb;

    fn sample_table() -> HeatmapTable {
        HeatmapTable {
            headers: vec!["pool".into(), "a<b".into()],
            rows: vec![vec![
                CellView {
                    text: "fast & slow".into(),
                    color: LABEL,
                    kind: CellKind::Label,
                },
                CellView {
                    text: "10".into(),
                    color: Srgb::new(255, 0, 0),
                    kind: CellKind::Measurement,
                },
            ]],
        }
    }

    #[test]
    fn test_document_orders_html_styles_scripts() {
        let mut doc = HtmlDocument::new();
        doc.add_script("var x = 1;");
        doc.add_style("p {}");
        doc.add_html("<p>hi</p>");
        assert_eq!(
            doc.render(),
            "<p>hi</p>\n<style type=\"text/css\">\np {}</style>\n<script type=\"text/javascript\">\nvar x = 1;\n</script>"
        );
    }

    #[test]
    fn test_render_table_cells() {
        let html = render_table(&sample_table());
        assert!(html.starts_with("<table id=\"view\">"));
        assert!(html.contains("<th>a&lt;b</th>"));
        assert!(html.contains("<div style=\"background-color: #add8e6\">fast &amp; slow</div>"));
        assert!(html.contains("<div style=\"background-color: #ff0000\">10</div>"));
    }

    #[test]
    fn test_render_page_is_complete() {
        let page = render_page(&sample_table(), "Results <v1>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Results &lt;v1&gt;</title>"));
        assert!(page.contains(&color::to_hex(NEUTRAL)));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_write_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_page(&path, &sample_table(), "t").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("#ff0000"));
    }
}
