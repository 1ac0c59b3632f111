//! Declarative view descriptions.
//!
//! A [`View`] is a plain value. Modifier methods wrap it in [`View::Modified`] and
//! [`crate::build::build_tree`] folds those wrappers into [`ViewProperties`](crate::properties::ViewProperties).

use std::fmt;
use std::rc::Rc;

use crate::binding::Value;
use crate::border::{BorderBuilder, BorderDescription};
use crate::color::Color;
use crate::layout::{InsetDescription, OptionalSize, SizeToChildren};
use crate::math::Vector2;
use crate::properties::Translation;

/// Callback run after the frame in which a button was clicked.
pub type Action = Rc<dyn Fn()>;

/// A reusable piece of UI that expands into another view.
pub trait Component {
    fn body(&self) -> View;
}

#[derive(Clone)]
pub enum View {
    Text(Value<String>),
    Image {
        name: String,
        pack: String,
    },
    /// Flexible space inside a stack.
    Spacer,
    ZStack(Vec<View>),
    VStack {
        spacing: f32,
        children: Vec<View>,
    },
    HStack {
        spacing: f32,
        children: Vec<View>,
    },
    Group(Vec<View>),
    Button(Button),
    Modified {
        modifier: Modifier,
        content: Box<View>,
    },
    Component(Rc<dyn Component>),
}

/// One configuration delta applied to the wrapped view.
#[derive(Clone)]
pub enum Modifier {
    Position {
        position: Value<Vector2>,
        translation: Option<Translation>,
    },
    Size(OptionalSize),
    Margin(InsetDescription),
    Padding(InsetDescription),
    Font {
        name: Option<String>,
        size: Option<f32>,
    },
    Background(Value<Color>),
    ForegroundColor(Value<Color>),
    Border(BorderDescription),
    SizeToChildren(SizeToChildren),
    Visibility(Value<bool>),
    Hover(Rc<View>),
    Pressed(Rc<View>),
}

/// A view that tracks pointer hover and press, optionally running an action on click.
#[derive(Clone)]
pub struct Button {
    pub(crate) label: Option<String>,
    pub(crate) content: Box<View>,
    pub(crate) action: Option<Action>,
}

impl Button {
    pub fn new(content: View) -> Self {
        Self {
            label: None,
            content: Box::new(content),
            action: None,
        }
    }

    /// Gives the button an id that stays the same wherever it moves in the tree.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn on_click(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }
}

impl From<Button> for View {
    fn from(button: Button) -> Self {
        View::Button(button)
    }
}

impl View {
    pub fn text(content: impl Into<String>) -> View {
        View::Text(Value::Constant(content.into()))
    }

    /// Text read from `content` on every build.
    pub fn text_value(content: Value<String>) -> View {
        View::Text(content)
    }

    pub fn image(name: impl Into<String>, pack: impl Into<String>) -> View {
        View::Image {
            name: name.into(),
            pack: pack.into(),
        }
    }

    pub fn spacer() -> View {
        View::Spacer
    }

    pub fn zstack(children: impl IntoIterator<Item = View>) -> View {
        View::ZStack(children.into_iter().collect())
    }

    pub fn vstack(spacing: f32, children: impl IntoIterator<Item = View>) -> View {
        View::VStack {
            spacing,
            children: children.into_iter().collect(),
        }
    }

    pub fn hstack(spacing: f32, children: impl IntoIterator<Item = View>) -> View {
        View::HStack {
            spacing,
            children: children.into_iter().collect(),
        }
    }

    pub fn group(children: impl IntoIterator<Item = View>) -> View {
        View::Group(children.into_iter().collect())
    }

    pub fn component(component: impl Component + 'static) -> View {
        View::Component(Rc::new(component))
    }

    /// Wraps this view in `modifier`.
    pub fn modified(self, modifier: Modifier) -> View {
        View::Modified {
            modifier,
            content: Box::new(self),
        }
    }

    /// Offsets the view from its parent's cursor.
    pub fn position(self, position: impl Into<Value<Vector2>>) -> View {
        self.modified(Modifier::Position {
            position: position.into(),
            translation: None,
        })
    }

    /// Offsets the view by `translation(position)`.
    pub fn translated(
        self,
        position: impl Into<Value<Vector2>>,
        translation: impl Fn(Vector2) -> Vector2 + 'static,
    ) -> View {
        self.modified(Modifier::Position {
            position: position.into(),
            translation: Some(Rc::new(translation)),
        })
    }

    /// Fixed padding-zone size, ignoring the parent's constraints.
    pub fn size(self, size: impl Into<OptionalSize>) -> View {
        self.modified(Modifier::Size(size.into()))
    }

    pub fn width(self, width: f32) -> View {
        self.size(OptionalSize::width(width))
    }

    pub fn height(self, height: f32) -> View {
        self.size(OptionalSize::height(height))
    }

    pub fn margin(self, margin: impl Into<InsetDescription>) -> View {
        self.modified(Modifier::Margin(margin.into()))
    }

    pub fn padding(self, padding: impl Into<InsetDescription>) -> View {
        self.modified(Modifier::Padding(padding.into()))
    }

    pub fn font(self, name: impl Into<String>, size: f32) -> View {
        self.modified(Modifier::Font {
            name: Some(name.into()),
            size: Some(size),
        })
    }

    pub fn font_size(self, size: f32) -> View {
        self.modified(Modifier::Font {
            name: None,
            size: Some(size),
        })
    }

    pub fn background(self, color: impl Into<Value<Color>>) -> View {
        self.modified(Modifier::Background(color.into()))
    }

    pub fn foreground_color(self, color: impl Into<Value<Color>>) -> View {
        self.modified(Modifier::ForegroundColor(color.into()))
    }

    /// Adds a border, configured through a [`BorderBuilder`].
    /// ```
    /// use quadview::prelude::*;
    /// let view = View::text("ok").border(|b| b.left().right().width(3.0).color(Color::WHITE));
    /// # let _ = view;
    /// ```
    pub fn border(self, f: impl FnOnce(&mut BorderBuilder) -> &mut BorderBuilder) -> View {
        let mut builder = BorderBuilder::default();
        f(&mut builder);
        self.modified(Modifier::Border(builder.into_description()))
    }

    pub fn size_to_children(self, horizontal: bool, vertical: bool) -> View {
        self.modified(Modifier::SizeToChildren(SizeToChildren::new(
            horizontal, vertical,
        )))
    }

    pub fn visible(self, visible: impl Into<Value<bool>>) -> View {
        self.modified(Modifier::Visibility(visible.into()))
    }

    /// Content shown instead of the normal content while the pointer is over the enclosing button.
    pub fn hover(self, content: View) -> View {
        self.modified(Modifier::Hover(Rc::new(content)))
    }

    /// Content shown while the enclosing button is pressed.
    pub fn pressed(self, content: View) -> View {
        self.modified(Modifier::Pressed(Rc::new(content)))
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Text(content) => f.debug_tuple("Text").field(content).finish(),
            View::Image { name, pack } => f
                .debug_struct("Image")
                .field("name", name)
                .field("pack", pack)
                .finish(),
            View::Spacer => f.write_str("Spacer"),
            View::ZStack(children) => f.debug_tuple("ZStack").field(children).finish(),
            View::VStack { spacing, children } => f
                .debug_struct("VStack")
                .field("spacing", spacing)
                .field("children", children)
                .finish(),
            View::HStack { spacing, children } => f
                .debug_struct("HStack")
                .field("spacing", spacing)
                .field("children", children)
                .finish(),
            View::Group(children) => f.debug_tuple("Group").field(children).finish(),
            View::Button(button) => f
                .debug_struct("Button")
                .field("label", &button.label)
                .field("content", &button.content)
                .field("action", &button.action.is_some())
                .finish(),
            View::Modified { modifier, content } => f
                .debug_struct("Modified")
                .field("modifier", modifier)
                .field("content", content)
                .finish(),
            View::Component(_) => f.write_str("Component"),
        }
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Position {
                position,
                translation,
            } => f
                .debug_struct("Position")
                .field("position", position)
                .field("translation", &translation.is_some())
                .finish(),
            Modifier::Size(size) => f.debug_tuple("Size").field(size).finish(),
            Modifier::Margin(margin) => f.debug_tuple("Margin").field(margin).finish(),
            Modifier::Padding(padding) => f.debug_tuple("Padding").field(padding).finish(),
            Modifier::Font { name, size } => f
                .debug_struct("Font")
                .field("name", name)
                .field("size", size)
                .finish(),
            Modifier::Background(color) => f.debug_tuple("Background").field(color).finish(),
            Modifier::ForegroundColor(color) => {
                f.debug_tuple("ForegroundColor").field(color).finish()
            }
            Modifier::Border(border) => f.debug_tuple("Border").field(border).finish(),
            Modifier::SizeToChildren(flags) => {
                f.debug_tuple("SizeToChildren").field(flags).finish()
            }
            Modifier::Visibility(visible) => f.debug_tuple("Visibility").field(visible).finish(),
            Modifier::Hover(content) => f.debug_tuple("Hover").field(content).finish(),
            Modifier::Pressed(content) => f.debug_tuple("Pressed").field(content).finish(),
        }
    }
}
