use crate::color::Color;
use crate::math::Vector2;

/// One instanced unit quad, laid out the way the instance buffer expects it.
///
/// The default value is the blank instance: zero-sized, untextured and hidden.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct GuiInstanceData {
    /// Normalized RGBA.
    pub color: [f32; 4],
    pub position: Vector2,
    pub size: Vector2,
    pub texture_top_left: Vector2,
    pub texture_bottom_right: Vector2,
    /// `-1` when untextured.
    pub texture_slot: i32,
    pub should_texture: i32,
    pub is_visible: i32,
}

impl GuiInstanceData {
    /// Untextured filled rectangle.
    pub fn rect(position: Vector2, size: Vector2, color: Color, visible: bool) -> Self {
        Self {
            color: color.normalized(),
            position,
            size,
            texture_top_left: Vector2::ZERO,
            texture_bottom_right: Vector2::ZERO,
            texture_slot: -1,
            should_texture: 0,
            is_visible: visible as i32,
        }
    }

    /// Rectangle sampling `texture_slot` between the two UV corners, tinted by `color`.
    pub fn textured(
        position: Vector2,
        size: Vector2,
        color: Color,
        texture_slot: i32,
        texture_top_left: Vector2,
        texture_bottom_right: Vector2,
        visible: bool,
    ) -> Self {
        Self {
            color: color.normalized(),
            position,
            size,
            texture_top_left,
            texture_bottom_right,
            texture_slot,
            should_texture: 1,
            is_visible: visible as i32,
        }
    }

    /// Placeholder emitted when an asset is missing, keeping the instance count stable.
    pub fn blank(position: Vector2) -> Self {
        Self {
            position,
            texture_slot: -1,
            ..Default::default()
        }
    }

    pub fn visible(&self) -> bool {
        self.is_visible != 0
    }

    pub fn textures(&self) -> bool {
        self.should_texture != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_hidden_and_empty() {
        let blank = GuiInstanceData::blank(Vector2::new(3.0, 4.0));
        assert!(!blank.visible());
        assert!(!blank.textures());
        assert_eq!(blank.size, Vector2::ZERO);
    }

    #[test]
    fn rect_normalizes_color() {
        let rect = GuiInstanceData::rect(Vector2::ZERO, Vector2::new(1.0, 1.0), Color::WHITE, true);
        assert_eq!(rect.color, [1.0; 4]);
        assert!(rect.visible());
    }
}
