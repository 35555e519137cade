use std::io::{self, Write};

use colored::*;

use super::Renderer;
use crate::gallery::{
    GalleryView, GridRow, MediaSection, OutputCell, Outputs, NO_GENERATIONS_NOTICE,
    NO_MEDIA_NOTICE,
};
use crate::service::Lookup;

const RULE_WIDTH: usize = 72;

/// Plain-text gallery for a terminal. Colour follows the `colored` global override.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer
    }

    fn gallery(&self, gallery: &GalleryView, out: &mut dyn Write) -> io::Result<()> {
        if gallery.is_empty() {
            return writeln!(out, "{}", NO_MEDIA_NOTICE.yellow());
        }
        for section in &gallery.sections {
            self.section(section, out)?;
        }
        Ok(())
    }

    fn section(&self, section: &MediaSection, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", "─".repeat(RULE_WIDTH).dimmed())?;
        writeln!(out, "{} {}", "Media".bold(), section.media_id.to_string().dimmed())?;

        writeln!(out, "  {}", "Original Image".bold())?;
        if let Some(url) = &section.original_url {
            writeln!(out, "    {}", url.cyan())?;
        }

        writeln!(out, "  {}", "Generated Outputs".bold())?;
        match &section.outputs {
            Outputs::Empty => writeln!(out, "    {}", NO_GENERATIONS_NOTICE.blue())?,
            Outputs::Grid(rows) => {
                for (index, row) in rows.iter().enumerate() {
                    self.row(index + 1, row, out)?;
                }
            }
        }
        Ok(())
    }

    fn row(&self, number: usize, row: &GridRow, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "    Row {}", number)?;
        for (slot, cell) in row.cells.iter().enumerate() {
            self.cell(slot + 1, cell, out)?;
        }
        for slot in row.cells.len()..row.cells.len() + row.empty_slots() {
            writeln!(out, "      [{}] {}", slot + 1, "(empty)".dimmed())?;
        }
        Ok(())
    }

    fn cell(&self, slot: usize, cell: &OutputCell, out: &mut dyn Write) -> io::Result<()> {
        match &cell.image_url {
            Some(url) => writeln!(out, "      [{}] {}", slot, url.cyan())?,
            None => writeln!(out, "      [{}] {}", slot, "(no image)".dimmed())?,
        }
        for (label, value) in cell.details.lines() {
            writeln!(out, "          {} {}", format!("{}:", label).bold(), value)?;
        }
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, lookup: &Lookup, out: &mut dyn Write) -> io::Result<()> {
        match lookup {
            Lookup::UnknownUser { email } => {
                writeln!(out, "{}", format!("No user registered for '{}'.", email).dimmed())
            }
            Lookup::Found { gallery, .. } => self.gallery(gallery, out),
        }
    }
}
