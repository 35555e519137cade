use std::io::{self, Write};

use super::{Renderer, PAGE_TITLE};
use crate::gallery::{
    GalleryView, GridRow, MediaSection, OutputCell, Outputs, NO_GENERATIONS_NOTICE,
    NO_MEDIA_NOTICE,
};
use crate::service::Lookup;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; }
.media { display: grid; grid-template-columns: 1fr 2fr; gap: 1.5rem; border-top: 1px solid #ccc; padding-top: 1rem; margin-top: 1rem; }
.grid-row { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-bottom: 1rem; }
img { width: 100%; }
.details { font-size: 0.9rem; }
.notice { padding: 0.75rem; border-radius: 0.25rem; }
.notice.warning { background: #fff3cd; }
.notice.info { background: #e7f1ff; }";

/// Self-contained HTML page. Images are referenced by URL and never fetched here.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer
    }

    fn gallery(&self, gallery: &GalleryView, out: &mut dyn Write) -> io::Result<()> {
        if gallery.is_empty() {
            return writeln!(out, "<div class=\"notice warning\">{}</div>", escape(NO_MEDIA_NOTICE));
        }
        for section in &gallery.sections {
            self.section(section, out)?;
        }
        Ok(())
    }

    fn section(&self, section: &MediaSection, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "<section class=\"media\" data-media-id=\"{}\">",
            escape(&section.media_id.to_string())
        )?;

        writeln!(out, "<div class=\"original\">\n<h4>Original Image</h4>")?;
        if let Some(url) = &section.original_url {
            writeln!(out, "<img src=\"{}\" alt=\"Original image\">", escape(url))?;
        }
        writeln!(out, "</div>")?;

        writeln!(out, "<div class=\"outputs\">\n<h4>Generated Outputs</h4>")?;
        match &section.outputs {
            Outputs::Empty => writeln!(
                out,
                "<div class=\"notice info\">{}</div>",
                escape(NO_GENERATIONS_NOTICE)
            )?,
            Outputs::Grid(rows) => {
                for row in rows {
                    self.row(row, out)?;
                }
            }
        }
        writeln!(out, "</div>\n</section>")
    }

    fn row(&self, row: &GridRow, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "<div class=\"grid-row\">")?;
        for cell in &row.cells {
            self.cell(cell, out)?;
        }
        for _ in 0..row.empty_slots() {
            writeln!(out, "<div class=\"cell empty\"></div>")?;
        }
        writeln!(out, "</div>")
    }

    fn cell(&self, cell: &OutputCell, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "<div class=\"cell\">")?;
        if let Some(url) = &cell.image_url {
            writeln!(out, "<img src=\"{}\" alt=\"Generated output\">", escape(url))?;
        }
        let lines: Vec<String> = cell
            .details
            .lines()
            .iter()
            .map(|(label, value)| format!("<strong>{}:</strong> {}", label, escape(value)))
            .collect();
        writeln!(out, "<p class=\"details\">{}</p>", lines.join("<br>"))?;
        writeln!(out, "</div>")
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, lookup: &Lookup, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">\n<title>{}</title>", PAGE_TITLE)?;
        writeln!(out, "<style>\n{}\n</style>\n</head>\n<body>", STYLE)?;
        writeln!(out, "<h1>{}</h1>", PAGE_TITLE)?;
        writeln!(
            out,
            "<p class=\"query\">User Email: <strong>{}</strong></p>",
            escape(lookup.email())
        )?;
        if let Lookup::Found { gallery, .. } = lookup {
            self.gallery(gallery, out)?;
        }
        writeln!(out, "</body>\n</html>")
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
