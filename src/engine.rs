use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::build::{ButtonNode, Node};
use crate::color::Color;
use crate::errors::{ErrorType, Warnings};
use crate::images::ImageLookup;
use crate::instance::GuiInstanceData;
use crate::layout::{AutoSizeMode, SizeInformation};
use crate::math::{BoundingBox, Vector2};
use crate::properties::ViewProperties;
use crate::propagation::PropagationStack;
use crate::quadtree::QuadtreeConfig;
use crate::state_tracker::{InteractivityState, StateTracker};
use crate::text::{TextService, TextStyle};
use crate::view::Action;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Zones per spatial-index node before it subdivides.
    pub quadtree_capacity: usize,
    pub quadtree_max_depth: u32,
    /// Font for text without a Font modifier.
    pub default_font_name: String,
    pub default_font_size: f32,
    /// Text tint without a ForegroundColor modifier.
    pub default_foreground_color: Color,
    /// Caches intrinsic sizes within a frame.
    pub memoize_requested_sizes: bool,
    /// Logs instance and zone counts every frame.
    pub debug_mode_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quadtree_capacity: 4,
            quadtree_max_depth: 8,
            default_font_name: String::from("System"),
            default_font_size: 22.0,
            default_foreground_color: Color::WHITE,
            memoize_requested_sizes: false,
            debug_mode_enabled: false,
        }
    }
}

impl Config {
    pub fn quadtree_config(&self) -> QuadtreeConfig {
        QuadtreeConfig {
            capacity: self.quadtree_capacity,
            max_depth: self.quadtree_max_depth,
        }
    }

    /// Style for text carrying `properties`.
    pub fn text_style(&self, properties: &ViewProperties) -> TextStyle {
        TextStyle {
            font_name: properties
                .font_name
                .clone()
                .unwrap_or_else(|| self.default_font_name.clone()),
            font_size: properties.font_size.unwrap_or(self.default_font_size),
            color: properties
                .foreground_color
                .unwrap_or(self.default_foreground_color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SizeKey {
    node: usize,
    max_width: u32,
    max_height: u32,
}

impl SizeKey {
    pub(crate) fn new(node: &Node, max_width: f32, max_height: f32) -> Self {
        Self {
            node: node as *const Node as usize,
            max_width: max_width.to_bits(),
            max_height: max_height.to_bits(),
        }
    }
}

/// State of one render pass over a built tree.
pub struct InstanceBuilder<'a> {
    pub(crate) stack: PropagationStack,
    pub(crate) instances: Vec<GuiInstanceData>,
    pub(crate) text: &'a mut dyn TextService,
    pub(crate) images: &'a dyn ImageLookup,
    pub(crate) tracker: &'a mut StateTracker,
    pub(crate) config: &'a Config,
    pub(crate) warnings: &'a mut Warnings,
    pub(crate) clicked: Vec<Action>,
    pub(crate) size_cache: FxHashMap<SizeKey, Vector2>,
}

impl<'a> InstanceBuilder<'a> {
    pub fn new(
        text: &'a mut dyn TextService,
        images: &'a dyn ImageLookup,
        tracker: &'a mut StateTracker,
        config: &'a Config,
        warnings: &'a mut Warnings,
    ) -> Self {
        Self {
            stack: PropagationStack::new(),
            instances: Vec::new(),
            text,
            images,
            tracker,
            config,
            warnings,
            clicked: Vec::new(),
            size_cache: FxHashMap::default(),
        }
    }

    /// Reuses `buffer`'s allocation for the emitted instances.
    pub fn with_buffer(mut self, mut buffer: Vec<GuiInstanceData>) -> Self {
        buffer.clear();
        self.instances = buffer;
        self
    }

    pub fn stack(&self) -> &PropagationStack {
        &self.stack
    }

    pub fn instances(&self) -> &[GuiInstanceData] {
        &self.instances
    }

    /// Emitted instances and the actions of buttons clicked this frame.
    pub fn finish(self) -> (Vec<GuiInstanceData>, Vec<Action>) {
        (self.instances, self.clicked)
    }

    /// Pushes the context a node establishes for itself: hidden, moved, then inset by its margin.
    fn push_node_context(&mut self, properties: &ViewProperties) {
        if !properties.visible {
            self.stack.push_invisible();
        }
        if let Some(position) = properties.resolved_position() {
            self.stack.push_position(position);
        }
        if !properties.margin.is_zero() {
            self.stack.push_position(properties.margin.offset());
        }
        if properties.size_to_children.any() {
            self.stack.push_auto_size_mode(AutoSizeMode::ToChildren);
        }
    }

    /// Sizes `node` inside a `max_width` x `max_height` box and emits its instances.
    ///
    /// The node's background comes before everything its children emit and its border after.
    /// The propagation stack is left at the depth it was found at.
    pub fn render_tree(&mut self, node: &Node, max_width: f32, max_height: f32) -> SizeInformation {
        let start = self.stack.depth();
        let properties = node.properties();

        self.push_node_context(properties);
        let size = self.final_size(node, max_width, max_height);

        let top = self.stack.top();
        self.instances.push(GuiInstanceData::rect(
            top.position,
            size.padding_zone,
            properties.background_color,
            top.visible,
        ));

        if !properties.padding.is_zero() {
            self.stack.push_position(properties.padding.offset());
        }
        match node {
            Node::VStack {
                spacing, children, ..
            } => self.render_stack(children, *spacing, size.content_zone, Axis::Vertical),
            Node::HStack {
                spacing, children, ..
            } => self.render_stack(children, *spacing, size.content_zone, Axis::Horizontal),
            Node::ZStack { children, .. } | Node::Group { children, .. } => {
                self.stack.reset_for_child();
                for child in children {
                    self.render_tree(child, size.content_zone.x, size.content_zone.y);
                }
            }
            Node::Button(button) => self.render_button(button, size),
            Node::Text { content, .. } => self.emit_text(content, properties),
            Node::Image { name, pack, .. } => self.emit_image(name, pack, size.content_zone),
            Node::Spacer { .. } => {}
        }
        self.stack.pop_to(start);

        self.push_node_context(properties);
        self.emit_border(properties, size.padding_zone);
        self.stack.pop_to(start);

        size
    }

    fn render_stack(&mut self, children: &[Node], spacing: f32, content: Vector2, axis: Axis) {
        self.stack.reset_for_child();

        let mut spacers = 0usize;
        let mut taken = 0.0;
        for child in children {
            if child.is_spacer() {
                spacers += 1;
            } else {
                taken += axis.main(self.final_size(child, content.x, content.y).footprint);
            }
        }
        let gaps = children.len().saturating_sub(1) as f32 * spacing;
        let spacer_size = if spacers == 0 {
            0.0
        } else {
            ((axis.main(content) - taken - gaps) / spacers as f32).max(0.0)
        };

        let mut offset = 0.0;
        for child in children {
            let depth = self.stack.depth();
            self.stack.push_position(axis.vector(offset, 0.0));
            let remaining = (axis.main(content) - offset).max(0.0);
            let (max_width, max_height) = match axis {
                Axis::Vertical => (content.x, remaining),
                Axis::Horizontal => (remaining, content.y),
            };
            let size = self.render_tree(child, max_width, max_height);
            self.stack.pop_to(depth);

            let advance = if child.is_spacer() {
                spacer_size
            } else {
                axis.main(size.footprint)
            };
            offset += advance + spacing;
        }
    }

    /// Registers the button's zone, resolves this frame's state and renders all three states.
    ///
    /// `size` was measured from the state shown on the previous frame, so content that just
    /// became active is laid out in the previous state's box until the next frame.
    fn render_button(&mut self, button: &ButtonNode, size: SizeInformation) {
        self.stack.reset_for_child();
        let top = self.stack.top();
        if top.visible {
            self.tracker.register_interactive_zone(
                button.id,
                BoundingBox::from_origin_size(top.position, size.content_zone),
            );
        }

        let previous = self.tracker.last_known_state(button.id);
        let state = self.tracker.resolve_state(
            button.id,
            button.hover.is_some(),
            button.pressed.is_some(),
        );
        if state != previous {
            self.size_cache.clear();
        }

        let content = size.content_zone;
        self.render_alternate(&button.content, state == InteractivityState::Normal, content);
        if let Some(hover) = &button.hover {
            self.render_alternate(hover, state == InteractivityState::Hover, content);
        }
        if let Some(pressed) = &button.pressed {
            self.render_alternate(pressed, state == InteractivityState::Pressed, content);
        }

        if top.visible && self.tracker.was_clicked(button.id) {
            if let Some(action) = &button.action {
                self.clicked.push(Rc::clone(action));
            }
        }
    }

    /// Renders one of a button's states, hidden unless `active`.
    fn render_alternate(&mut self, node: &Node, active: bool, content: Vector2) {
        let depth = self.stack.depth();
        if !active {
            self.stack.push_invisible();
        }
        self.render_tree(node, content.x, content.y);
        self.stack.pop_to(depth);
    }

    fn emit_text(&mut self, content: &str, properties: &ViewProperties) {
        let top = self.stack.top();
        if !top.visible {
            self.instances.push(GuiInstanceData::blank(top.position));
            return;
        }
        let style = self.config.text_style(properties);
        let instance = match self.text.draw_data(content, &style, top.position) {
            Some(data) => GuiInstanceData::textured(
                Vector2::new(data.rect.x, data.rect.y),
                Vector2::new(data.rect.width, data.rect.height),
                Color::WHITE,
                data.texture_slot,
                data.uv_top_left,
                data.uv_bottom_right,
                true,
            ),
            None => {
                self.report_text_failure(content, &style);
                GuiInstanceData::blank(top.position)
            }
        };
        self.instances.push(instance);
    }

    fn emit_image(&mut self, name: &str, pack: &str, content: Vector2) {
        let top = self.stack.top();
        let instance = match self.images.lookup(name, pack) {
            Some(image) => GuiInstanceData::textured(
                top.position,
                content,
                Color::WHITE,
                image.texture_slot,
                Vector2::new(image.u, image.v),
                Vector2::new(image.u2, image.v2),
                top.visible,
            ),
            None => {
                self.report_missing_image(name, pack);
                GuiInstanceData::blank(top.position)
            }
        };
        self.instances.push(instance);
    }

    /// Left, top, right and bottom edges, inside the padding zone.
    fn emit_border(&mut self, properties: &ViewProperties, padding_zone: Vector2) {
        let top = self.stack.top();
        let origin = top.position;
        let border = &properties.border;
        let width = padding_zone.x.max(0.0);
        let height = padding_zone.y.max(0.0);
        let left = border.left.width.clamp(0.0, width);
        let right = border.right.width.clamp(0.0, width);
        let upper = border.top.width.clamp(0.0, height);
        let lower = border.bottom.width.clamp(0.0, height);

        let edges = [
            (Vector2::ZERO, Vector2::new(left, height), border.left.color),
            (Vector2::ZERO, Vector2::new(width, upper), border.top.color),
            (
                Vector2::new(width - right, 0.0),
                Vector2::new(right, height),
                border.right.color,
            ),
            (
                Vector2::new(0.0, height - lower),
                Vector2::new(width, lower),
                border.bottom.color,
            ),
        ];
        for (offset, size, color) in edges {
            self.instances
                .push(GuiInstanceData::rect(origin + offset, size, color, top.visible));
        }
    }

    pub(crate) fn report_text_failure(&mut self, content: &str, style: &TextStyle) {
        if !self.text.has_font(&style.font_name) {
            self.warnings.report(
                ErrorType::UnknownFont,
                &style.font_name,
                &format!("font '{}' is not loaded", style.font_name),
            );
        } else {
            self.warnings.report(
                ErrorType::UnmeasurableText,
                &format!("{}:{}:{}", style.font_name, style.font_size, content),
                &format!(
                    "could not lay out '{}' with font '{}' at size {}",
                    content, style.font_name, style.font_size
                ),
            );
        }
    }

    pub(crate) fn report_missing_image(&mut self, name: &str, pack: &str) {
        self.warnings.report(
            ErrorType::UnknownImage,
            &format!("{pack}/{name}"),
            &format!("image '{name}' not found in pack '{pack}'"),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub(crate) fn main(&self, v: Vector2) -> f32 {
        match self {
            Axis::Vertical => v.y,
            Axis::Horizontal => v.x,
        }
    }

    pub(crate) fn cross(&self, v: Vector2) -> f32 {
        match self {
            Axis::Vertical => v.x,
            Axis::Horizontal => v.y,
        }
    }

    /// Vector with `main` along this axis.
    pub(crate) fn vector(&self, main: f32, cross: f32) -> Vector2 {
        match self {
            Axis::Vertical => Vector2::new(cross, main),
            Axis::Horizontal => Vector2::new(main, cross),
        }
    }
}
