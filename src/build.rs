use std::fmt;
use std::rc::Rc;

use crate::id::{hash_number, hash_string, InteractionId};
use crate::layout::SizeToChildren;
use crate::properties::ViewProperties;
use crate::view::{Action, Modifier, View};

/// Path hash the root of every tree is built with.
pub const ROOT_SEED: u32 = 0x5eed;

/// A resolved node: every modifier folded into its properties.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text {
        content: String,
        properties: ViewProperties,
    },
    Image {
        name: String,
        pack: String,
        properties: ViewProperties,
    },
    Spacer {
        properties: ViewProperties,
    },
    ZStack {
        children: Vec<Node>,
        properties: ViewProperties,
    },
    VStack {
        spacing: f32,
        children: Vec<Node>,
        properties: ViewProperties,
    },
    HStack {
        spacing: f32,
        children: Vec<Node>,
        properties: ViewProperties,
    },
    Group {
        children: Vec<Node>,
        properties: ViewProperties,
    },
    Button(ButtonNode),
}

#[derive(Clone)]
pub struct ButtonNode {
    pub id: InteractionId,
    pub properties: ViewProperties,
    pub content: Box<Node>,
    pub hover: Option<Box<Node>>,
    pub pressed: Option<Box<Node>>,
    pub action: Option<Action>,
}

impl PartialEq for ButtonNode {
    fn eq(&self, other: &Self) -> bool {
        let same_action = match (&self.action, &other.action) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        self.id == other.id
            && self.properties == other.properties
            && self.content == other.content
            && self.hover == other.hover
            && self.pressed == other.pressed
            && same_action
    }
}

impl fmt::Debug for ButtonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonNode")
            .field("id", &self.id)
            .field("properties", &self.properties)
            .field("content", &self.content)
            .field("hover", &self.hover)
            .field("pressed", &self.pressed)
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl Node {
    pub fn properties(&self) -> &ViewProperties {
        match self {
            Node::Text { properties, .. }
            | Node::Image { properties, .. }
            | Node::Spacer { properties }
            | Node::ZStack { properties, .. }
            | Node::VStack { properties, .. }
            | Node::HStack { properties, .. }
            | Node::Group { properties, .. } => properties,
            Node::Button(button) => &button.properties,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Node::Spacer { .. })
    }

    /// Direct children, alternates of a button included.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::ZStack { children, .. }
            | Node::VStack { children, .. }
            | Node::HStack { children, .. }
            | Node::Group { children, .. } => children.iter().collect(),
            Node::Button(button) => std::iter::once(button.content.as_ref())
                .chain(button.hover.as_deref())
                .chain(button.pressed.as_deref())
                .collect(),
            Node::Text { .. } | Node::Image { .. } | Node::Spacer { .. } => Vec::new(),
        }
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(|child| child.count()).sum::<usize>()
    }
}

/// Resolves `view` into a concrete tree.
///
/// `seed` is the path hash of `view`'s position. Anonymous buttons take their id from it,
/// so the same tree built twice yields the same ids.
pub fn build_tree(view: &View, properties: ViewProperties, seed: u32) -> Node {
    match view {
        View::Text(content) => Node::Text {
            content: content.get(),
            properties,
        },
        View::Image { name, pack } => Node::Image {
            name: name.clone(),
            pack: pack.clone(),
            properties,
        },
        View::Spacer => Node::Spacer { properties },
        View::ZStack(children) => Node::ZStack {
            children: build_children(children, &properties, SizeToChildren::NONE, seed),
            properties,
        },
        View::Group(children) => Node::Group {
            children: build_children(children, &properties, SizeToChildren::NONE, seed),
            properties,
        },
        View::VStack { spacing, children } => Node::VStack {
            spacing: *spacing,
            children: build_children(children, &properties, SizeToChildren::new(false, true), seed),
            properties,
        },
        View::HStack { spacing, children } => Node::HStack {
            spacing: *spacing,
            children: build_children(children, &properties, SizeToChildren::new(true, false), seed),
            properties,
        },
        View::Button(button) => {
            let id = match &button.label {
                Some(label) => InteractionId(hash_string(label, 0)),
                None => InteractionId(seed),
            };
            let alternate = |view: &Option<Rc<View>>, index: u32| {
                view.as_ref().map(|view| {
                    Box::new(build_group(view, &properties, hash_number(index, seed)))
                })
            };
            let hover = alternate(&properties.hover, 1);
            let pressed = alternate(&properties.pressed, 2);
            let content = Box::new(build_group(&button.content, &properties, hash_number(0, seed)));
            Node::Button(ButtonNode {
                id,
                properties: properties.without_alternates(),
                content,
                hover,
                pressed,
                action: button.action.clone(),
            })
        }
        View::Modified { modifier, content } => {
            build_tree(content, apply_modifier(modifier, properties), seed)
        }
        View::Component(component) => build_tree(&component.body(), properties, seed),
    }
}

fn build_children(
    children: &[View],
    parent: &ViewProperties,
    size_to_children: SizeToChildren,
    seed: u32,
) -> Vec<Node> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let properties = parent
                .reset_for_child()
                .with_size_to_children(size_to_children);
            build_tree(child, properties, hash_number(index as u32, seed))
        })
        .collect()
}

/// Button content always sits in its own group, so the three states share one shape.
fn build_group(view: &View, parent: &ViewProperties, seed: u32) -> Node {
    Node::Group {
        children: vec![build_tree(view, parent.reset_for_child(), hash_number(0, seed))],
        properties: parent.reset_for_child(),
    }
}

fn apply_modifier(modifier: &Modifier, properties: ViewProperties) -> ViewProperties {
    match modifier {
        Modifier::Position {
            position,
            translation,
        } => ViewProperties {
            position: Some(position.get()),
            translation: translation.clone(),
            ..properties
        },
        Modifier::Size(size) => properties.with_size(*size),
        Modifier::Margin(margin) => properties.merge_margin_with(margin),
        Modifier::Padding(padding) => properties.merge_padding_with(padding),
        Modifier::Font { name, size } => ViewProperties {
            font_name: name.clone().or(properties.font_name.clone()),
            font_size: size.or(properties.font_size),
            ..properties
        },
        Modifier::Background(color) => ViewProperties {
            background_color: color.get(),
            ..properties
        },
        Modifier::ForegroundColor(color) => ViewProperties {
            foreground_color: Some(color.get()),
            ..properties
        },
        Modifier::Border(border) => properties.merge_border_with(border),
        Modifier::SizeToChildren(flags) => properties.with_size_to_children(*flags),
        Modifier::Visibility(visible) => ViewProperties {
            visible: properties.visible && visible.get(),
            ..properties
        },
        Modifier::Hover(content) => ViewProperties {
            hover: Some(Rc::clone(content)),
            ..properties
        },
        Modifier::Pressed(content) => ViewProperties {
            pressed: Some(Rc::clone(content)),
            ..properties
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Binding, UpdateSignal};
    use crate::color::Color;
    use crate::layout::{Inset, OptionalSize, Side};
    use crate::math::Vector2;
    use crate::view::{Button, Component};

    fn build(view: &View) -> Node {
        build_tree(view, ViewProperties::default(), ROOT_SEED)
    }

    #[test]
    fn modifiers_fold_into_leaf_properties() {
        let view = View::text("hi")
            .padding(4.0)
            .margin((Side::Left, 2.0))
            .background(Color::WHITE)
            .size((30.0, 10.0));

        let Node::Text { content, properties } = build(&view) else {
            panic!("expected a text node");
        };
        assert_eq!(content, "hi");
        assert_eq!(properties.padding, Inset::all(4.0));
        assert_eq!(properties.margin, Inset::new(2.0, 0.0, 0.0, 0.0));
        assert_eq!(properties.background_color, Color::WHITE);
        assert_eq!(properties.size, OptionalSize::fixed(30.0, 10.0));
    }

    #[test]
    fn stacks_reset_children_and_force_their_axis() {
        let view = View::vstack(5.0, [View::text("a"), View::text("b")])
            .background(Color::WHITE)
            .font("Mono", 12.0);

        let Node::VStack { children, properties, .. } = build(&view) else {
            panic!("expected a vstack");
        };
        assert_eq!(properties.font_name.as_deref(), Some("Mono"));
        for child in &children {
            let child = child.properties();
            assert_eq!(child.background_color, Color::TRANSPARENT);
            assert_eq!(child.font_name, None);
            assert!(child.size_to_children.vertical);
            assert!(!child.size_to_children.horizontal);
        }

        let Node::HStack { children, .. } = build(&View::hstack(0.0, [View::spacer()])) else {
            panic!("expected an hstack");
        };
        assert!(children[0].properties().size_to_children.horizontal);
    }

    #[test]
    fn button_consumes_alternates() {
        let view = View::from(Button::new(View::text("idle")))
            .hover(View::text("hover"))
            .background(Color::BLACK);

        let Node::Button(button) = build(&view) else {
            panic!("expected a button");
        };
        assert!(button.hover.is_some());
        assert!(button.pressed.is_none());
        assert!(!button.properties.has_alternates());
        assert_eq!(button.properties.background_color, Color::BLACK);
        assert!(matches!(*button.content, Node::Group { .. }));
    }

    #[test]
    fn build_is_idempotent() {
        let view = View::vstack(
            2.0,
            [
                View::from(Button::new(View::text("one"))),
                View::hstack(0.0, [View::from(Button::new(View::text("two")))]),
                View::from(Button::new(View::text("three")).label("three")),
            ],
        )
        .hover(View::spacer());

        let first = build(&view);
        let second = build(&view);
        assert_eq!(first, second);
        assert_eq!(first.count(), second.count());
    }

    #[test]
    fn button_ids_follow_label_or_path() {
        let labelled = View::from(Button::new(View::spacer()).label("ok"));
        let Node::Button(a) = build(&View::group([labelled.clone()])).children()[0].clone() else {
            panic!("expected a button");
        };
        let Node::Button(b) = build(&View::group([View::spacer(), labelled])).children()[1].clone()
        else {
            panic!("expected a button");
        };
        assert_eq!(a.id, b.id);

        let anonymous = View::group([
            View::from(Button::new(View::spacer())),
            View::from(Button::new(View::spacer())),
        ]);
        let tree = build(&anonymous);
        let ids: Vec<_> = tree
            .children()
            .into_iter()
            .filter_map(|child| match child {
                Node::Button(button) => Some(button.id),
                _ => None,
            })
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn bound_values_are_read_at_build_time() {
        let signal = UpdateSignal::new();
        let offset = Binding::new(Vector2::new(1.0, 2.0), &signal);
        let view = View::spacer().position(offset.value());

        assert_eq!(build(&view).properties().position, Some(Vector2::new(1.0, 2.0)));
        offset.set(Vector2::new(5.0, 5.0));
        assert_eq!(build(&view).properties().position, Some(Vector2::new(5.0, 5.0)));
    }

    struct Badge;

    impl Component for Badge {
        fn body(&self) -> View {
            View::text("badge").padding(2.0)
        }
    }

    #[test]
    fn components_expand_through_body() {
        let node = build(&View::component(Badge).background(Color::WHITE));
        let Node::Text { properties, .. } = node else {
            panic!("expected the component body");
        };
        assert_eq!(properties.padding, Inset::all(2.0));
        assert_eq!(properties.background_color, Color::WHITE);
    }

    #[test]
    fn invisibility_sticks() {
        let node = build(&View::spacer().visible(false).visible(true));
        assert!(!node.properties().visible);
    }
}
