//! Footprint, padding zone and content zone of a node under a constraint box.

use crate::build::Node;
use crate::engine::{Axis, InstanceBuilder, SizeKey};
use crate::layout::{SizeInformation, SizeToChildren};
use crate::math::Vector2;
use crate::state_tracker::InteractivityState;

impl InstanceBuilder<'_> {
    /// Resolves the three zones of `node` inside a `max_width` x `max_height` box.
    ///
    /// Hidden nodes and spacers take no space. Per axis, an explicit size wins, then
    /// size-to-children, and otherwise the node fills the box minus its margin.
    pub fn final_size(&mut self, node: &Node, max_width: f32, max_height: f32) -> SizeInformation {
        let size_to_children = node.properties().size_to_children;
        self.resolve_size(node, max_width, max_height, size_to_children)
    }

    fn resolve_size(
        &mut self,
        node: &Node,
        max_width: f32,
        max_height: f32,
        size_to_children: SizeToChildren,
    ) -> SizeInformation {
        let properties = node.properties();
        if !self.stack.top().visible || !properties.visible || node.is_spacer() {
            return SizeInformation::ZERO;
        }

        let margin = properties.margin;
        let padding = properties.padding;
        let available = Vector2::new(
            max_width - margin.horizontal(),
            max_height - margin.vertical(),
        );

        let width_from_children = properties.size.width.is_none() && size_to_children.horizontal;
        let height_from_children = properties.size.height.is_none() && size_to_children.vertical;
        let intrinsic = if width_from_children || height_from_children {
            self.requested_size(
                node,
                available.x - padding.horizontal(),
                available.y - padding.vertical(),
            )
        } else {
            Vector2::ZERO
        };

        let width = match properties.size.width {
            Some(width) => width,
            None if width_from_children => intrinsic.x + padding.horizontal(),
            None => available.x,
        };
        let height = match properties.size.height {
            Some(height) => height,
            None if height_from_children => intrinsic.y + padding.vertical(),
            None => available.y,
        };

        SizeInformation::from_padding_zone(Vector2::new(width, height), &margin, &padding)
    }

    /// Size `node`'s content asks for when it has a `max_width` x `max_height` content box.
    pub fn requested_size(&mut self, node: &Node, max_width: f32, max_height: f32) -> Vector2 {
        if !self.config.memoize_requested_sizes {
            return self.measure_content(node, max_width, max_height);
        }
        let key = SizeKey::new(node, max_width, max_height);
        if let Some(size) = self.size_cache.get(&key) {
            return *size;
        }
        let size = self.measure_content(node, max_width, max_height);
        self.size_cache.insert(key, size);
        size
    }

    fn measure_content(&mut self, node: &Node, max_width: f32, max_height: f32) -> Vector2 {
        match node {
            Node::Text {
                content,
                properties,
            } => {
                let style = self.config.text_style(properties);
                match self.text.measure(content, &style) {
                    Some(size) => Vector2::new(size.width, size.height),
                    None => {
                        self.report_text_failure(content, &style);
                        Vector2::ZERO
                    }
                }
            }
            Node::Image { name, pack, .. } => match self.images.lookup(name, pack) {
                Some(image) => Vector2::new(image.width, image.height),
                None => {
                    self.report_missing_image(name, pack);
                    Vector2::ZERO
                }
            },
            Node::Spacer { .. } => Vector2::ZERO,
            Node::ZStack { children, .. } | Node::Group { children, .. } => {
                children.iter().fold(Vector2::ZERO, |largest, child| {
                    let footprint = self.final_size(child, max_width, max_height).footprint;
                    Vector2::new(largest.x.max(footprint.x), largest.y.max(footprint.y))
                })
            }
            Node::VStack {
                spacing, children, ..
            } => self.measure_stack(children, *spacing, max_width, max_height, Axis::Vertical),
            Node::HStack {
                spacing, children, ..
            } => self.measure_stack(children, *spacing, max_width, max_height, Axis::Horizontal),
            Node::Button(button) => {
                let active = match self.tracker.last_known_state(button.id) {
                    InteractivityState::Hover => button.hover.as_deref(),
                    InteractivityState::Pressed => button.pressed.as_deref(),
                    InteractivityState::Normal => None,
                }
                .unwrap_or(&button.content);
                // Each state is wrapped in a group that fills the button; measure what it holds.
                active.children().into_iter().fold(Vector2::ZERO, |largest, child| {
                    let footprint = self
                        .resolve_size(child, max_width, max_height, SizeToChildren::BOTH)
                        .footprint;
                    Vector2::new(largest.x.max(footprint.x), largest.y.max(footprint.y))
                })
            }
        }
    }

    /// Sum of footprints along `axis` plus spacing between children, largest footprint across it.
    fn measure_stack(
        &mut self,
        children: &[Node],
        spacing: f32,
        max_width: f32,
        max_height: f32,
        axis: Axis,
    ) -> Vector2 {
        let limit = axis.main(Vector2::new(max_width, max_height));
        let mut along = 0.0f32;
        let mut across = 0.0f32;
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                along += spacing;
            }
            let remaining = (limit - along).max(0.0);
            let (width, height) = match axis {
                Axis::Vertical => (max_width, remaining),
                Axis::Horizontal => (remaining, max_height),
            };
            let footprint = self.final_size(child, width, height).footprint;
            along += axis.main(footprint);
            across = across.max(axis.cross(footprint));
        }
        axis.vector(along, across)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{build_tree, ROOT_SEED};
    use crate::layout::Side;
    use crate::properties::ViewProperties;
    use crate::testing::{FixedText, Harness};
    use crate::view::{Button, View};

    fn build(view: View) -> Node {
        build_tree(&view, ViewProperties::default(), ROOT_SEED)
    }

    fn size_of(harness: &mut Harness, node: &Node, width: f32, height: f32) -> SizeInformation {
        harness.with_builder(|builder| builder.final_size(node, width, height))
    }

    #[test]
    fn vstack_sums_children_and_spacing() {
        let mut harness = Harness::with_text(FixedText::new(1.0, 0.0).with_height("short", 20.0).with_height("tall", 30.0));
        let node = build(View::vstack(5.0, [View::text("short"), View::text("tall")]).size_to_children(false, true));
        let size = size_of(&mut harness, &node, 400.0, 400.0);
        assert_eq!(size.content_zone.y, 55.0);
        assert_eq!(size.content_zone.x, 400.0);
    }

    #[test]
    fn explicit_size_ignores_the_box() {
        let mut harness = Harness::new();
        let node = build(View::group([]).size((100.0, 50.0)).margin(10.0));
        let size = size_of(&mut harness, &node, 300.0, 300.0);
        assert_eq!(size.footprint, Vector2::new(120.0, 70.0));
        assert_eq!(size.padding_zone, Vector2::new(100.0, 50.0));
        assert_eq!(size_of(&mut harness, &node, 10.0, 10.0), size);
    }

    #[test]
    fn fills_the_box_by_default() {
        let mut harness = Harness::new();
        let node = build(View::group([]).margin((Side::Left, 10.0)).padding(5.0));
        let size = size_of(&mut harness, &node, 200.0, 100.0);
        assert_eq!(size.footprint, Vector2::new(200.0, 100.0));
        assert_eq!(size.padding_zone, Vector2::new(190.0, 100.0));
        assert_eq!(size.content_zone, Vector2::new(180.0, 90.0));
    }

    #[test]
    fn axes_negotiate_independently() {
        let mut harness = Harness::with_text(FixedText::new(10.0, 8.0));
        let node = build(
            View::zstack([View::text("abcd").size_to_children(true, true)])
                .size_to_children(true, false)
                .padding(2.0),
        );
        let size = size_of(&mut harness, &node, 300.0, 300.0);
        assert_eq!(size.padding_zone, Vector2::new(44.0, 300.0));
    }

    #[test]
    fn hidden_nodes_and_spacers_take_no_space() {
        let mut harness = Harness::new();
        let hidden = build(View::group([]).size((10.0, 10.0)).visible(false));
        assert_eq!(size_of(&mut harness, &hidden, 50.0, 50.0), SizeInformation::ZERO);
        let spacer = build(View::spacer().margin(4.0));
        assert_eq!(size_of(&mut harness, &spacer, 50.0, 50.0), SizeInformation::ZERO);
    }

    #[test]
    fn hstack_measures_against_remaining_space() {
        let mut harness = Harness::with_text(FixedText::new(10.0, 12.0));
        let node = build(
            View::hstack(4.0, [View::text("ab"), View::spacer(), View::text("abc").margin(1.0)])
                .size_to_children(true, true),
        );
        let size = size_of(&mut harness, &node, 300.0, 300.0);
        // 20 + 4 + 0 + 4 + 32
        assert_eq!(size.content_zone.x, 60.0);
        // the last text fills vertically: 300 - 2
        assert_eq!(size.footprint.y, 300.0);
    }

    #[test]
    fn zone_ordering_holds_for_non_negative_insets() {
        let mut harness = Harness::with_text(FixedText::new(7.0, 9.0));
        let node = build(
            View::vstack(
                3.0,
                [
                    View::text("one").padding(2.0).margin(1.0),
                    View::hstack(1.0, [View::text("two"), View::text("three").padding(4.0)]).margin(3.0),
                ],
            )
            .padding(5.0)
            .margin(6.0)
            .size_to_children(true, true),
        );
        harness.with_builder(|builder| {
            let mut stack = vec![&node];
            while let Some(current) = stack.pop() {
                let size = builder.final_size(current, 250.0, 250.0);
                assert!(size.content_zone.x <= size.padding_zone.x && size.padding_zone.x <= size.footprint.x);
                assert!(size.content_zone.y <= size.padding_zone.y && size.padding_zone.y <= size.footprint.y);
                stack.extend(current.children());
            }
        });
    }

    #[test]
    fn unmeasurable_text_is_zero_sized() {
        let mut harness = Harness::new();
        let node = build(View::text("?").font("Missing", 10.0).size_to_children(true, true));
        assert_eq!(size_of(&mut harness, &node, 50.0, 50.0), SizeInformation::ZERO);
    }

    #[test]
    fn button_measures_its_active_content() {
        let mut harness = Harness::with_text(FixedText::new(10.0, 10.0));
        let node = build(
            View::from(Button::new(View::text("a")))
                .hover(View::text("hovering"))
                .size_to_children(true, true),
        );
        let idle = size_of(&mut harness, &node, 500.0, 500.0);
        assert_eq!(idle.footprint, Vector2::new(10.0, 10.0));

        let Node::Button(button) = &node else {
            panic!("expected a button");
        };
        harness.tracker.set_pointer_position(Vector2::new(1.0, 1.0));
        harness.frame(&node, 500.0, 500.0);
        assert_eq!(harness.tracker.last_known_state(button.id), InteractivityState::Hover);
        assert_eq!(size_of(&mut harness, &node, 500.0, 500.0).footprint.x, 80.0);
    }

    #[test]
    fn stacked_buttons_each_take_their_content_height() {
        let mut harness = Harness::with_text(FixedText::new(10.0, 10.0));
        let node = build(
            View::vstack(
                0.0,
                [
                    View::from(Button::new(View::text("ok").size_to_children(true, true))),
                    View::from(Button::new(View::text("no"))),
                ],
            )
            .size_to_children(false, true),
        );
        let size = size_of(&mut harness, &node, 300.0, 300.0);
        assert_eq!(size.content_zone.y, 20.0);
        assert_eq!(size.content_zone.x, 300.0);
    }

    #[test]
    fn memoized_sizes_match_unmemoized() {
        let view = View::vstack(2.0, [View::text("a"), View::hstack(1.0, [View::text("bb"), View::text("c")])])
            .size_to_children(true, true);
        let node = build(view);
        let mut plain = Harness::with_text(FixedText::new(3.0, 5.0));
        let mut memo = Harness::with_text(FixedText::new(3.0, 5.0));
        memo.config.memoize_requested_sizes = true;
        let expected = size_of(&mut plain, &node, 100.0, 100.0);
        assert_eq!(size_of(&mut memo, &node, 100.0, 100.0), expected);
        assert_eq!(memo.frame(&node, 100.0, 100.0), plain.frame(&node, 100.0, 100.0));
    }
}
