use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::{info, warn};

use super::font_metrics::HELVETICA;
use super::{DocumentRenderer, RenderError};

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page geometry for generated documents. All values in points, text box
/// measured from the top-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub text_left_pt: f32,
    pub text_top_pt: f32,
    pub text_right_pt: f32,
    pub text_bottom_pt: f32,
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_height: f32,
}

impl Default for PageConfig {
    /// A4, text box (50, 50)–(550, 800), Helvetica 11pt.
    fn default() -> Self {
        Self {
            page_width_pt: 595.0,
            page_height_pt: 842.0,
            text_left_pt: 50.0,
            text_top_pt: 50.0,
            text_right_pt: 550.0,
            text_bottom_pt: 800.0,
            font_size_pt: 11.0,
            line_height: 1.2,
        }
    }
}

impl PageConfig {
    /// Usable line width in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        (self.text_right_pt - self.text_left_pt) / self.font_size_pt
    }

    fn line_height_pt(&self) -> f32 {
        self.font_size_pt * self.line_height
    }

    /// Number of lines that fit in the text box.
    pub fn max_lines(&self) -> usize {
        let usable = self.text_bottom_pt - self.text_top_pt;
        (usable / self.line_height_pt()).floor().max(0.0) as usize
    }
}

/// Single-page PDF output using the built-in Helvetica face.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    config: PageConfig,
}

impl PdfRenderer {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Wraps the text to the text box and drops lines below its bottom edge.
    pub fn layout_lines(&self, text: &str) -> Vec<String> {
        let normalized = to_builtin_charset(text);
        let mut lines = HELVETICA.wrap_text(&normalized, self.config.text_width_em());

        let max_lines = self.config.max_lines();
        if lines.len() > max_lines {
            warn!(
                "Document text needs {} lines, only {} fit on the page; dropping the overflow",
                lines.len(),
                max_lines
            );
            lines.truncate(max_lines);
        }
        lines
    }
}

impl DocumentRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render_to_file(&self, text: &str, path: &Path) -> Result<(), RenderError> {
        let config = &self.config;
        let lines = self.layout_lines(text);

        let (doc, page, layer) = PdfDocument::new(
            "Cover Letter",
            pt_to_mm(config.page_width_pt),
            pt_to_mm(config.page_height_pt),
            "Text",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Document(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        // PDF origin is bottom-left; the first baseline sits one font size below the box top.
        let first_baseline = config.page_height_pt - config.text_top_pt - config.font_size_pt;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = first_baseline - i as f32 * config.line_height_pt();
            layer.use_text(
                line.as_str(),
                config.font_size_pt,
                pt_to_mm(config.text_left_pt),
                pt_to_mm(y),
                &font,
            );
        }

        let io_err = |source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| RenderError::Document(e.to_string()))?;

        info!("Rendered {} lines to {}", lines.len(), path.display());
        Ok(())
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt / PT_PER_MM)
}

/// Maps typographic punctuation onto ASCII the built-in fonts can encode.
fn to_builtin_charset(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                out.push('-')
            }
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' => out.push('*'),
            '\u{00A0}' | '\u{2009}' | '\u{202F}' => out.push(' '),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}
