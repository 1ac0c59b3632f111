use crate::color::Color;
use crate::layout::Side;

/// Color and width of one border edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderEdge {
    pub color: Color,
    pub width: f32,
}

impl BorderEdge {
    /// Transparent one-pixel edge. Still drawn, so every node emits the same instances.
    pub const NONE: BorderEdge = BorderEdge {
        color: Color::TRANSPARENT,
        width: 1.0,
    };
}

impl Default for BorderEdge {
    fn default() -> Self {
        Self::NONE
    }
}

/// Resolved border of a node, one edge per side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderProperty {
    pub left: BorderEdge,
    pub top: BorderEdge,
    pub right: BorderEdge,
    pub bottom: BorderEdge,
}

impl BorderProperty {
    pub const NONE: BorderProperty = BorderProperty {
        left: BorderEdge::NONE,
        top: BorderEdge::NONE,
        right: BorderEdge::NONE,
        bottom: BorderEdge::NONE,
    };

    pub fn uniform(color: Color, width: f32) -> Self {
        let edge = BorderEdge { color, width };
        Self {
            left: edge,
            top: edge,
            right: edge,
            bottom: edge,
        }
    }

    /// Overwrites the edges named by `description`, or every edge if it contains [`Side::All`].
    pub fn merge_with(&self, description: &BorderDescription) -> BorderProperty {
        let edge = BorderEdge {
            color: description.color,
            width: description.width,
        };
        if description.sides.contains(&Side::All) {
            return BorderProperty::uniform(edge.color, edge.width);
        }
        let mut merged = *self;
        for side in &description.sides {
            match side {
                Side::Left => merged.left = edge,
                Side::Top => merged.top = edge,
                Side::Right => merged.right = edge,
                Side::Bottom => merged.bottom = edge,
                Side::All => {}
            }
        }
        merged
    }
}

/// A border delta as written by the Border modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderDescription {
    pub sides: Vec<Side>,
    pub color: Color,
    pub width: f32,
}

impl Default for BorderDescription {
    fn default() -> Self {
        Self {
            sides: vec![Side::All],
            color: Color::BLACK,
            width: 2.0,
        }
    }
}

/// Builder for configuring a border delta using a closure.
///
/// Without any side call the border applies to all four sides.
#[derive(Debug, Default)]
pub struct BorderBuilder {
    pub(crate) sides: Vec<Side>,
    pub(crate) color: Option<Color>,
    pub(crate) width: Option<f32>,
}

impl BorderBuilder {
    /// Sets the border color.
    #[inline]
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the border width for every side in the delta.
    #[inline]
    pub fn width(&mut self, width: f32) -> &mut Self {
        self.width = Some(width);
        self
    }

    #[inline]
    pub fn all(&mut self) -> &mut Self {
        self.sides.push(Side::All);
        self
    }

    #[inline]
    pub fn left(&mut self) -> &mut Self {
        self.sides.push(Side::Left);
        self
    }

    #[inline]
    pub fn right(&mut self) -> &mut Self {
        self.sides.push(Side::Right);
        self
    }

    #[inline]
    pub fn top(&mut self) -> &mut Self {
        self.sides.push(Side::Top);
        self
    }

    #[inline]
    pub fn bottom(&mut self) -> &mut Self {
        self.sides.push(Side::Bottom);
        self
    }

    pub(crate) fn into_description(self) -> BorderDescription {
        let defaults = BorderDescription::default();
        BorderDescription {
            sides: if self.sides.is_empty() {
                defaults.sides
            } else {
                self.sides
            },
            color: self.color.unwrap_or(defaults.color),
            width: self.width.unwrap_or(defaults.width),
        }
    }
}
