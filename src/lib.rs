//! Declarative retained-mode UI.
//!
//! A [`View`](view::View) tree is built into concrete [`Node`](build::Node)s, laid out under
//! the viewport's constraints and flattened into [`GuiInstanceData`](instance::GuiInstanceData)
//! records, one per instanced quad, in painter's order.

pub mod binding;
pub mod border;
pub mod build;
pub mod color;
pub mod engine;
pub mod errors;
pub mod id;
pub mod images;
pub mod instance;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod propagation;
pub mod properties;
pub mod quadtree;
pub mod renderer;
pub mod sizing;
pub mod state_tracker;
pub mod text;
pub mod view;

#[cfg(test)]
mod testing;

use macroquad::logging::debug;
use macroquad::math::Mat4;

use crate::binding::{Binding, UpdateSignal};
use crate::build::{build_tree, Node, ROOT_SEED};
use crate::color::Color;
use crate::engine::{Config, InstanceBuilder};
use crate::errors::Warnings;
use crate::images::ImageLookup;
use crate::instance::GuiInstanceData;
use crate::math::{orthographic_projection, BoundingBox, Dimensions, Vector2};
use crate::properties::ViewProperties;
use crate::state_tracker::StateTracker;
use crate::text::TextService;
use crate::view::View;

/// Drives frames for one view tree.
///
/// Everything runs on the caller's thread: input methods only record the latest pointer
/// values, and [`Runtime::frame`] does the whole build and render pass synchronously.
pub struct Runtime {
    root: View,
    config: Config,
    tracker: StateTracker,
    signal: UpdateSignal,
    warnings: Warnings,
    instances: Vec<GuiInstanceData>,
    viewport: Dimensions,
    input_changed: bool,
    viewport_changed: bool,
    rendered: bool,
}

impl Runtime {
    pub fn new(root: View, viewport: Dimensions) -> Self {
        Self::with_config(root, viewport, Config::default())
    }

    pub fn with_config(root: View, viewport: Dimensions, config: Config) -> Self {
        let bounds = BoundingBox::new(0.0, 0.0, viewport.width, viewport.height);
        Self {
            root,
            tracker: StateTracker::new(bounds, config.quadtree_config()),
            config,
            signal: UpdateSignal::new(),
            warnings: Warnings::new(),
            instances: Vec::new(),
            viewport,
            input_changed: false,
            viewport_changed: false,
            rendered: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    pub fn viewport(&self) -> Dimensions {
        self.viewport
    }

    pub fn set_root(&mut self, root: View) {
        self.root = root;
        self.signal.request();
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.config.debug_mode_enabled = enabled;
    }

    pub fn set_memoize_requested_sizes(&mut self, enabled: bool) {
        self.config.memoize_requested_sizes = enabled;
        self.signal.request();
    }

    pub fn set_default_font(&mut self, name: impl Into<String>, size: f32) {
        self.config.default_font_name = name.into();
        self.config.default_font_size = size;
        self.signal.request();
    }

    pub fn set_default_foreground_color(&mut self, color: impl Into<Color>) {
        self.config.default_foreground_color = color.into();
        self.signal.request();
    }

    pub fn set_quadtree_limits(&mut self, capacity: usize, max_depth: u32) {
        self.config.quadtree_capacity = capacity;
        self.config.quadtree_max_depth = max_depth;
        self.tracker.reconfigure(self.config.quadtree_config());
        self.signal.request();
    }

    /// Signal raised by this runtime's bindings.
    pub fn update_signal(&self) -> UpdateSignal {
        self.signal.clone()
    }

    /// Creates a binding that schedules a rebuild whenever it changes.
    pub fn binding<T: Clone + PartialEq>(&self, value: T) -> Binding<T> {
        Binding::new(value, &self.signal)
    }

    pub fn request_update(&self) {
        self.signal.request();
    }

    pub fn needs_update(&self) -> bool {
        !self.rendered || self.input_changed || self.viewport_changed || self.signal.is_requested()
    }

    pub fn pointer_moved(&mut self, position: Vector2) {
        self.tracker.set_pointer_position(position);
        self.input_changed = true;
    }

    pub fn pointer_down(&mut self) {
        self.tracker.set_pointer_down(true);
        self.input_changed = true;
    }

    pub fn pointer_up(&mut self) {
        self.tracker.set_pointer_down(false);
        self.input_changed = true;
    }

    pub fn set_viewport(&mut self, viewport: Dimensions) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.tracker
            .resize(BoundingBox::new(0.0, 0.0, viewport.width, viewport.height));
        self.viewport_changed = true;
    }

    /// Resolves the root view against the current binding values.
    pub fn build(&self) -> Node {
        build_tree(&self.root, ViewProperties::default(), ROOT_SEED)
    }

    /// Builds and renders a frame, then runs the actions of clicked buttons.
    pub fn frame(&mut self, text: &mut dyn TextService, images: &dyn ImageLookup) -> &[GuiInstanceData] {
        self.signal.take();
        self.input_changed = false;
        self.viewport_changed = false;

        self.tracker.begin_frame();
        let tree = self.build();

        let buffer = std::mem::take(&mut self.instances);
        let mut builder = InstanceBuilder::new(
            text,
            images,
            &mut self.tracker,
            &self.config,
            &mut self.warnings,
        )
        .with_buffer(buffer);
        builder.render_tree(&tree, self.viewport.width, self.viewport.height);
        let (instances, actions) = builder.finish();

        if self.config.debug_mode_enabled {
            debug!(
                "frame: {} nodes, {} instances, {} interactive zones",
                tree.count(),
                instances.len(),
                self.tracker.zone_count()
            );
        }

        for action in actions {
            action();
        }
        self.instances = instances;
        self.rendered = true;
        &self.instances
    }

    /// Runs [`Runtime::frame`] only if a binding changed, input arrived or the viewport changed.
    pub fn update_if_required(&mut self, text: &mut dyn TextService, images: &dyn ImageLookup) -> bool {
        if !self.needs_update() {
            return false;
        }
        self.frame(text, images);
        true
    }

    /// Instances of the last frame.
    pub fn instances(&self) -> &[GuiInstanceData] {
        &self.instances
    }

    pub fn projection_matrix(&self) -> Mat4 {
        orthographic_projection(self.viewport.width, self.viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::images::ImagePackRegistry;
    use crate::state_tracker::InteractivityState;
    use crate::testing::FixedText;
    use crate::view::Button;

    fn runtime(root: View, width: f32, height: f32) -> Runtime {
        Runtime::new(root, Dimensions::new(width, height))
    }

    fn frame(runtime: &mut Runtime, text: &mut FixedText) -> Vec<GuiInstanceData> {
        runtime.frame(text, &ImagePackRegistry::new()).to_vec()
    }

    fn button_id(runtime: &Runtime) -> crate::id::InteractionId {
        match runtime.build() {
            Node::Button(button) => button.id,
            other => panic!("expected a button at the root, got {other:?}"),
        }
    }

    #[test]
    fn vstack_sized_to_children_vertically() {
        let mut text = FixedText::new(5.0, 0.0)
            .with_height("first", 20.0)
            .with_height("second", 30.0);
        let mut runtime = runtime(
            View::vstack(5.0, [View::text("first"), View::text("second")]).size_to_children(false, true),
            400.0,
            400.0,
        );
        let instances = frame(&mut runtime, &mut text);
        assert_eq!(instances[0].size, Vector2::new(400.0, 55.0));
        // six instances per text: the second one's fill sits below the first and the gap
        assert_eq!(instances[7].position, Vector2::new(0.0, 25.0));
    }

    #[test]
    fn spacer_takes_the_slack() {
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(
            View::hstack(
                10.0,
                [
                    View::group([]).width(50.0),
                    View::spacer(),
                    View::group([]).width(50.0),
                ],
            ),
            200.0,
            100.0,
        );
        let instances = frame(&mut runtime, &mut text);
        // hstack fill, then five instances per child
        assert_eq!(instances[1].position.x, 0.0);
        assert_eq!(instances[6].position.x, 60.0);
        assert_eq!(instances[11].position.x, 150.0);
        assert_eq!(instances[11].size, Vector2::new(50.0, 100.0));
    }

    #[test]
    fn pressing_a_hover_only_button_shows_hover() {
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(
            View::from(Button::new(View::text("idle")))
                .hover(View::text("hover"))
                .size((100.0, 40.0)),
            300.0,
            300.0,
        );
        runtime.pointer_moved(Vector2::new(20.0, 20.0));
        runtime.pointer_down();
        let instances = frame(&mut runtime, &mut text);

        let id = button_id(&runtime);
        assert_eq!(runtime.tracker().last_known_state(id), InteractivityState::Hover);
        // button fill, content group [1..12), hover group [12..23), button borders
        assert!(!instances[3].visible());
        assert!(instances[14].visible() && instances[14].textures());
    }

    #[test]
    fn explicit_size_with_margin() {
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(View::group([]).size((100.0, 50.0)).margin(10.0), 300.0, 300.0);
        let instances = frame(&mut runtime, &mut text);
        assert_eq!(instances[0].position, Vector2::new(10.0, 10.0));
        assert_eq!(instances[0].size, Vector2::new(100.0, 50.0));
        // right border edge ends at the padding zone's edge
        assert_eq!(instances[3].position.x + instances[3].size.x, 110.0);
    }

    #[test]
    fn overlapping_buttons_are_both_hit() {
        let mut text = FixedText::new(5.0, 10.0);
        let a = Button::new(View::spacer()).label("a");
        let b = Button::new(View::spacer()).label("b");
        let mut runtime = runtime(
            View::zstack([
                View::from(a).hover(View::spacer()).size((60.0, 60.0)),
                View::from(b)
                    .hover(View::spacer())
                    .size((60.0, 60.0))
                    .position(Vector2::new(30.0, 30.0)),
            ]),
            200.0,
            200.0,
        );
        runtime.pointer_moved(Vector2::new(45.0, 45.0));
        frame(&mut runtime, &mut text);

        let tracker = runtime.tracker();
        assert_eq!(tracker.zone_count(), 2);
        assert_eq!(tracker.last_known_state("a".into()), InteractivityState::Hover);
        assert_eq!(tracker.last_known_state("b".into()), InteractivityState::Hover);
    }

    #[test]
    fn shared_edge_belongs_to_one_button() {
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(
            View::hstack(
                0.0,
                [
                    View::from(Button::new(View::spacer()).label("left"))
                        .hover(View::spacer())
                        .width(50.0),
                    View::from(Button::new(View::spacer()).label("right"))
                        .hover(View::spacer())
                        .width(50.0),
                ],
            ),
            100.0,
            20.0,
        );
        runtime.pointer_moved(Vector2::new(50.0, 10.0));
        frame(&mut runtime, &mut text);

        let tracker = runtime.tracker();
        assert_eq!(tracker.last_known_state("left".into()), InteractivityState::Normal);
        assert_eq!(tracker.last_known_state("right".into()), InteractivityState::Hover);
    }

    #[test]
    fn click_runs_action_after_release() {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(
            View::from(Button::new(View::text("go")).on_click(move || counter.set(counter.get() + 1)))
                .size((50.0, 50.0)),
            100.0,
            100.0,
        );

        runtime.pointer_moved(Vector2::new(10.0, 10.0));
        frame(&mut runtime, &mut text);
        runtime.pointer_down();
        frame(&mut runtime, &mut text);
        assert_eq!(clicks.get(), 0);
        runtime.pointer_up();
        frame(&mut runtime, &mut text);
        assert_eq!(clicks.get(), 1);
        frame(&mut runtime, &mut text);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn release_outside_does_not_click() {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(
            View::from(Button::new(View::spacer()).on_click(move || counter.set(counter.get() + 1)))
                .size((50.0, 50.0)),
            100.0,
            100.0,
        );
        runtime.pointer_moved(Vector2::new(10.0, 10.0));
        runtime.pointer_down();
        frame(&mut runtime, &mut text);
        runtime.pointer_moved(Vector2::new(90.0, 90.0));
        runtime.pointer_up();
        frame(&mut runtime, &mut text);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn updates_only_when_something_changed() {
        let mut text = FixedText::new(5.0, 10.0);
        let images = ImagePackRegistry::new();
        let mut runtime = runtime(View::spacer(), 100.0, 100.0);
        let color = runtime.binding(Color::BLACK);
        runtime.set_root(View::group([]).background(color.value()));

        assert!(runtime.update_if_required(&mut text, &images));
        assert!(!runtime.update_if_required(&mut text, &images));

        color.set(Color::BLACK);
        assert!(!runtime.update_if_required(&mut text, &images));

        color.set(Color::WHITE);
        assert!(runtime.update_if_required(&mut text, &images));
        assert_eq!(runtime.instances()[0].color, Color::WHITE.normalized());

        runtime.pointer_moved(Vector2::new(1.0, 1.0));
        assert!(runtime.update_if_required(&mut text, &images));

        runtime.set_viewport(Dimensions::new(100.0, 100.0));
        assert!(!runtime.needs_update());
        runtime.set_viewport(Dimensions::new(120.0, 100.0));
        assert!(runtime.update_if_required(&mut text, &images));
        assert_eq!(runtime.instances()[0].size, Vector2::new(120.0, 100.0));
    }

    #[test]
    fn rebuilds_are_identical() {
        let runtime = runtime(
            View::vstack(
                0.0,
                [
                    View::from(Button::new(View::text("a"))),
                    View::from(Button::new(View::text("b"))).pressed(View::text("B")),
                ],
            ),
            100.0,
            100.0,
        );
        assert_eq!(runtime.build(), runtime.build());
    }

    #[test]
    fn instance_buffer_is_rebuilt_each_frame() {
        let mut text = FixedText::new(5.0, 10.0);
        let mut runtime = runtime(View::group([View::spacer(), View::spacer()]), 100.0, 100.0);
        let first = frame(&mut runtime, &mut text);
        let second = frame(&mut runtime, &mut text);
        assert_eq!(first.len(), 15);
        assert_eq!(first, second);
    }

    #[test]
    fn projection_covers_the_viewport() {
        let runtime = runtime(View::spacer(), 640.0, 480.0);
        let corner = runtime
            .projection_matrix()
            .project_point3(macroquad::math::Vec3::new(640.0, 480.0, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y + 1.0).abs() < 1e-5);
    }
}
