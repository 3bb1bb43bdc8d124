//! Export of a grid figure to an output file.
//!
//! The supported format set is a small whitelist; requesting anything else
//! fails with [`TsgError::UnsupportedFormat`] and writes no output. The only
//! baseline format is `html`: a single self-contained document with inline
//! styling, viewable offline in any browser.

use std::path::Path;

use tracing::info;

use crate::errors::{Result, TsgError};
use crate::grid::GridFigure;
use crate::store::write_atomic;

/// Formats accepted by [`export`].
pub const SUPPORTED_FORMATS: &[&str] = &["html"];

/// Export formats, parsed from the caller-supplied format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
}

impl ExportFormat {
    /// Parse a format name against the whitelist. Never falls back.
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "html" => Ok(Self::Html),
            other => Err(TsgError::UnsupportedFormat {
                requested: other.to_string(),
                supported: SUPPORTED_FORMATS.to_vec(),
            }),
        }
    }
}

/// Write the figure to `path` in the requested format.
///
/// The format check happens before anything touches the filesystem, so an
/// unsupported format produces no output file.
pub fn export(figure: &GridFigure, path: &Path, format: &str) -> Result<()> {
    let format = ExportFormat::parse(format)?;
    match format {
        ExportFormat::Html => write_atomic(path, &to_html(figure))?,
    }
    info!(
        path = %path.display(),
        format = ?format,
        rows = figure.day_labels.len(),
        cols = figure.test_labels.len(),
        "exported status grid"
    );
    Ok(())
}

/// Render the figure as a self-contained HTML document.
pub fn to_html(figure: &GridFigure) -> String {
    let n_cols = figure.test_labels.len();
    let mut html = String::with_capacity(4096 + figure.cells.len() * 48);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Test status grid</title>\n<style>\n");
    html.push_str("body { font-family: sans-serif; margin: 20px 20px 20px 50px; }\n");
    html.push_str("table { border-collapse: separate; border-spacing: 1px 0; }\n");
    html.push_str("td.cell { width: 12px; height: 12px; min-width: 12px; padding: 0; }\n");
    html.push_str(
        "th.test { height: 480px; vertical-align: bottom; padding: 0; font-weight: normal; }\n",
    );
    html.push_str(
        "th.test div { writing-mode: vertical-rl; transform: rotate(180deg); \
         white-space: nowrap; font-size: 11px; margin: 0 auto; }\n",
    );
    html.push_str(
        "th.day { text-align: right; padding-right: 6px; font-weight: normal; \
         font-size: 11px; white-space: nowrap; }\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<table style=\"width:{}px\">\n",
        figure.width_px
    ));

    // Test labels along the top edge, rotated, one tick per test.
    html.push_str("<tr><th></th>");
    for label in &figure.test_labels {
        html.push_str(&format!("<th class=\"test\"><div>{}</div></th>", escape(label)));
    }
    html.push_str("</tr>\n");

    // One row per day, most recent first; cells come pre-ordered row-major.
    for (row, day) in figure.day_labels.iter().enumerate() {
        html.push_str(&format!("<tr><th class=\"day\">{}</th>", escape(day)));
        for cell in &figure.cells[row * n_cols..(row + 1) * n_cols] {
            html.push_str(&format!(
                "<td class=\"cell\" style=\"background:{}\" title=\"{} {}\"></td>",
                escape(&cell.color),
                escape(day),
                escape(&figure.test_labels[cell.col]),
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
