//! PDF serialization of a laid-out [`Document`] using the built-in
//! Helvetica faces, so no font files are needed at runtime.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

use crate::document::{Document, Element, FontStyle, Rgb};
use crate::error::{ReportError, Result};

const LAYER_NAME: &str = "Layer 1";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn load(pdf: &PdfDocumentReference) -> Result<Self> {
        Ok(Self {
            regular: pdf.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: pdf.add_builtin_font(BuiltinFont::HelveticaBold)?,
            italic: pdf.add_builtin_font(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

/// Render the whole document in memory.
#[instrument(skip(document), fields(pages = document.page_count()))]
pub fn render_pdf(document: &Document, title: &str) -> Result<Vec<u8>> {
    if document.pages.is_empty() {
        return Err(ReportError::EmptyDocument);
    }

    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(document.width), Mm(document.height), LAYER_NAME);
    let fonts = Fonts::load(&pdf)?;

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                pdf.add_page(Mm(document.width), Mm(document.height), LAYER_NAME);
            pdf.get_page(page_index).get_layer(layer_index)
        };
        for element in &page.elements {
            draw_element(&layer, element, document.height, &fonts);
        }
    }

    let bytes = pdf.save_to_bytes()?;
    debug!(bytes = bytes.len(), "PDF rendered");
    Ok(bytes)
}

/// Render `document` and write it to `dir/file_name`.
///
/// Rendering completes before anything touches the disk; if the write fails
/// the partially written file is removed.
pub fn save_pdf(document: &Document, title: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let bytes = render_pdf(document, title)?;
    let path = dir.join(file_name);

    if let Err(source) = fs::write(&path, &bytes) {
        error!(path = %path.display(), %source, "Failed to write report");
        let _ = fs::remove_file(&path);
        return Err(ReportError::Io { path, source });
    }

    info!(path = %path.display(), "Report saved");
    Ok(path)
}

fn draw_element(layer: &PdfLayerReference, element: &Element, page_height: f32, fonts: &Fonts) {
    match element {
        Element::Text { y, text, style, .. } => {
            layer.set_fill_color(pdf_color(style.color));
            layer.use_text(
                text.clone(),
                style.size,
                Mm(element.left()),
                Mm(page_height - y),
                fonts.get(style.font),
            );
        }
        Element::Rect { x, y, width, height, fill } => {
            if *width <= 0.0 || *height <= 0.0 {
                return;
            }
            layer.set_fill_color(pdf_color(*fill));
            layer.add_rect(Rect::new(
                Mm(*x),
                Mm(page_height - y - height),
                Mm(x + width),
                Mm(page_height - y),
            ));
        }
    }
}

fn pdf_color(color: Rgb) -> Color {
    let Rgb(r, g, b) = color;
    Color::Rgb(printpdf::Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}
