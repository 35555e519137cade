pub mod html;
pub mod terminal;

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;

use std::io::{self, Write};

use crate::service::Lookup;

pub const PAGE_TITLE: &str = "SMM User Usage";

/// Draws the outcome of a lookup onto some output.
pub trait Renderer {
    fn render(&self, lookup: &Lookup, out: &mut dyn Write) -> io::Result<()>;

    fn render_to_string(&self, lookup: &Lookup) -> io::Result<String> {
        let mut buf = Vec::new();
        self.render(lookup, &mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
