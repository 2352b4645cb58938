//! PDF ID Card Renderer
//!
//! Draws a card on a single CR80-sized page (3.375in x 2.125in) using the
//! built-in Helvetica faces, so no font files ship with the binary.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::domain::id_card::{IdCard, IdCardRenderer, LineRole};
use crate::error::{RegistryError, RegistryResult};

const CARD_WIDTH_MM: f32 = 85.725;
const CARD_HEIGHT_MM: f32 = 53.975;
const MARGIN_MM: f32 = 5.08;
const PT_TO_MM: f32 = 0.352_778;
/// Rough Helvetica advance width as a fraction of the font size
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfIdCardRenderer;

fn render_error(err: impl std::fmt::Display) -> RegistryError {
    RegistryError::IdCardRendering(err.to_string())
}

impl PdfIdCardRenderer {
    pub fn new() -> Self {
        Self
    }

    fn font_size(role: LineRole) -> f32 {
        match role {
            LineRole::Header => 9.0,
            LineRole::Name => 9.0,
            LineRole::Photo | LineRole::Detail => 7.0,
            LineRole::Footer => 6.0,
        }
    }

    /// x offset that roughly centres `text` on the card
    fn centred_x(text: &str, size: f32) -> f32 {
        let width = text.chars().count() as f32 * size * AVG_GLYPH_WIDTH * PT_TO_MM;
        ((CARD_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
    }
}

impl IdCardRenderer for PdfIdCardRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, card: &IdCard) -> RegistryResult<Vec<u8>> {
        let title = format!("ID Card {}", card.number);
        let (doc, page, layer) =
            PdfDocument::new(title.as_str(), Mm(CARD_WIDTH_MM), Mm(CARD_HEIGHT_MM), "Card");
        let regular: IndirectFontRef = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?;
        let bold: IndirectFontRef = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?;

        let canvas = doc.get_page(page).get_layer(layer);

        let mut y = CARD_HEIGHT_MM - MARGIN_MM;
        let mut previous: Option<LineRole> = None;
        for line in &card.lines {
            let size = Self::font_size(line.role);
            // Gap between sections
            if previous.is_some_and(|p| p != line.role) {
                y -= 1.5;
            }
            y -= size * PT_TO_MM * 1.3;

            let font = match line.role {
                LineRole::Header | LineRole::Name => &bold,
                _ => &regular,
            };
            canvas.use_text(
                line.text.as_str(),
                size,
                Mm(Self::centred_x(&line.text, size)),
                Mm(y.max(1.0)),
                font,
            );
            previous = Some(line.role);
        }

        doc.save_to_bytes().map_err(render_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_x_stays_inside_margin() {
        let long = "x".repeat(200);
        assert_eq!(PdfIdCardRenderer::centred_x(&long, 9.0), MARGIN_MM);
        let short = PdfIdCardRenderer::centred_x("ID", 7.0);
        assert!(short > MARGIN_MM && short < CARD_WIDTH_MM / 2.0);
    }
}
