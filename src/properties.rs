use std::fmt;
use std::rc::Rc;

use crate::border::{BorderDescription, BorderProperty};
use crate::color::Color;
use crate::layout::{Inset, InsetDescription, OptionalSize, SizeToChildren};
use crate::math::Vector2;
use crate::view::View;

/// Maps the position given to a Position modifier to the offset actually used.
pub type Translation = Rc<dyn Fn(Vector2) -> Vector2>;

/// Configuration accumulated from the modifiers wrapping a node.
///
/// Nothing here crosses a container boundary: children start again from
/// [`ViewProperties::reset_for_child`]. Inherited context lives on the propagation stack.
#[derive(Clone)]
pub struct ViewProperties {
    pub background_color: Color,
    /// Text tint. Falls back to the runtime's default foreground color.
    pub foreground_color: Option<Color>,
    pub position: Option<Vector2>,
    pub translation: Option<Translation>,
    pub size: OptionalSize,
    pub margin: Inset,
    pub padding: Inset,
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
    pub border: BorderProperty,
    pub visible: bool,
    pub size_to_children: SizeToChildren,
    pub hover: Option<Rc<View>>,
    pub pressed: Option<Rc<View>>,
}

impl Default for ViewProperties {
    fn default() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            foreground_color: None,
            position: None,
            translation: None,
            size: OptionalSize::default(),
            margin: Inset::ZERO,
            padding: Inset::ZERO,
            font_name: None,
            font_size: None,
            border: BorderProperty::NONE,
            visible: true,
            size_to_children: SizeToChildren::NONE,
            hover: None,
            pressed: None,
        }
    }
}

impl ViewProperties {
    /// Properties a container hands to its children.
    pub fn reset_for_child(&self) -> ViewProperties {
        ViewProperties::default()
    }

    pub fn merge_border_with(mut self, description: &BorderDescription) -> Self {
        self.border = self.border.merge_with(description);
        self
    }

    pub fn merge_margin_with(mut self, description: &InsetDescription) -> Self {
        self.margin = self.margin.merge_with(description);
        self
    }

    pub fn merge_padding_with(mut self, description: &InsetDescription) -> Self {
        self.padding = self.padding.merge_with(description);
        self
    }

    pub fn with_size(mut self, size: OptionalSize) -> Self {
        self.size = self.size.merge_with(&size);
        self
    }

    pub fn with_size_to_children(mut self, size_to_children: SizeToChildren) -> Self {
        self.size_to_children = self.size_to_children.merge_with(size_to_children);
        self
    }

    /// Offset this node pushes onto the propagation stack, after translation.
    pub fn resolved_position(&self) -> Option<Vector2> {
        match (self.position, &self.translation) {
            (None, _) => None,
            (Some(position), None) => Some(position),
            (Some(position), Some(translate)) => Some(translate(position)),
        }
    }

    pub fn has_alternates(&self) -> bool {
        self.hover.is_some() || self.pressed.is_some()
    }

    /// Copy without hover and pressed content, once a container has consumed them.
    pub fn without_alternates(&self) -> ViewProperties {
        ViewProperties {
            hover: None,
            pressed: None,
            ..self.clone()
        }
    }
}

fn same_rc<T: ?Sized>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

impl PartialEq for ViewProperties {
    fn eq(&self, other: &Self) -> bool {
        self.background_color == other.background_color
            && self.foreground_color == other.foreground_color
            && self.position == other.position
            && same_rc(&self.translation, &other.translation)
            && self.size == other.size
            && self.margin == other.margin
            && self.padding == other.padding
            && self.font_name == other.font_name
            && self.font_size == other.font_size
            && self.border == other.border
            && self.visible == other.visible
            && self.size_to_children == other.size_to_children
            && same_rc(&self.hover, &other.hover)
            && same_rc(&self.pressed, &other.pressed)
    }
}

impl fmt::Debug for ViewProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewProperties")
            .field("background_color", &self.background_color)
            .field("foreground_color", &self.foreground_color)
            .field("position", &self.position)
            .field("translation", &self.translation.is_some())
            .field("size", &self.size)
            .field("margin", &self.margin)
            .field("padding", &self.padding)
            .field("font_name", &self.font_name)
            .field("font_size", &self.font_size)
            .field("border", &self.border)
            .field("visible", &self.visible)
            .field("size_to_children", &self.size_to_children)
            .field("hover", &self.hover.is_some())
            .field("pressed", &self.pressed.is_some())
            .finish()
    }
}
