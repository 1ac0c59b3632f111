use crate::color::Color;
use crate::math::{BoundingBox, Dimensions, Vector2};

/// Font and tint of one text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_name: String,
    pub font_size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font_name: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            font_name: font_name.into(),
            font_size,
            color,
        }
    }
}

/// Where a rasterized text run lives and where it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextDrawData {
    /// Destination rectangle in screen space.
    pub rect: BoundingBox,
    pub uv_top_left: Vector2,
    pub uv_bottom_right: Vector2,
    pub texture_slot: i32,
}

/// Measures and rasterizes text for the layout engine.
///
/// `measure` must report the same size `draw_data` ends up occupying for the same text and
/// style. Both return `None` when the font is unknown or the text cannot be handled, which
/// degrades the element to empty space.
pub trait TextService {
    fn measure(&mut self, text: &str, style: &TextStyle) -> Option<Dimensions>;

    fn draw_data(&mut self, text: &str, style: &TextStyle, position: Vector2) -> Option<TextDrawData>;

    /// Whether `font_name` can be used at all. Only consulted to word warnings.
    fn has_font(&self, _font_name: &str) -> bool {
        true
    }
}
