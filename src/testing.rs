//! Fakes for the text and image services, and a harness bundling a render pass's state.

use rustc_hash::FxHashMap;

use crate::build::Node;
use crate::engine::{Config, InstanceBuilder};
use crate::errors::Warnings;
use crate::images::{ImagePack, ImagePackRegistry};
use crate::instance::GuiInstanceData;
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::state_tracker::StateTracker;
use crate::text::{TextDrawData, TextService, TextStyle};

/// Monospaced text: every character is `char_width` wide, every line `line_height` tall.
#[derive(Debug, Clone)]
pub(crate) struct FixedText {
    pub char_width: f32,
    pub line_height: f32,
    pub heights: FxHashMap<String, f32>,
    pub fonts: Vec<String>,
    pub last_style: Option<TextStyle>,
}

impl FixedText {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
            heights: FxHashMap::default(),
            fonts: vec![String::from("System")],
            last_style: None,
        }
    }

    /// Overrides the height reported for `text`.
    pub fn with_height(mut self, text: &str, height: f32) -> Self {
        self.heights.insert(text.to_owned(), height);
        self
    }
}

impl TextService for FixedText {
    fn measure(&mut self, text: &str, style: &TextStyle) -> Option<Dimensions> {
        self.last_style = Some(style.clone());
        if !self.has_font(&style.font_name) {
            return None;
        }
        let height = self.heights.get(text).copied().unwrap_or(self.line_height);
        Some(Dimensions::new(text.chars().count() as f32 * self.char_width, height))
    }

    fn draw_data(&mut self, text: &str, style: &TextStyle, position: Vector2) -> Option<TextDrawData> {
        let size = self.measure(text, style)?;
        Some(TextDrawData {
            rect: BoundingBox::new(position.x, position.y, size.width, size.height),
            uv_top_left: Vector2::ZERO,
            uv_bottom_right: Vector2::new(1.0, 1.0),
            texture_slot: 8,
        })
    }

    fn has_font(&self, font_name: &str) -> bool {
        self.fonts.iter().any(|font| font == font_name)
    }
}

pub(crate) struct Harness {
    pub text: FixedText,
    pub images: ImagePackRegistry,
    pub tracker: StateTracker,
    pub config: Config,
    pub warnings: Warnings,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_text(FixedText::new(8.0, 16.0))
    }

    pub fn with_text(text: FixedText) -> Self {
        let config = Config::default();
        Self {
            text,
            images: ImagePackRegistry::new(),
            tracker: StateTracker::new(
                BoundingBox::new(0.0, 0.0, 1000.0, 1000.0),
                config.quadtree_config(),
            ),
            config,
            warnings: Warnings::new(),
        }
    }

    /// Registers a single-image pack covering its whole texture.
    pub fn add_image(&mut self, pack: &str, name: &str, width: f32, height: f32) {
        let mut image_pack = ImagePack::new(pack, 1, width, height);
        image_pack.insert_rect(name, 0.0, 0.0, width, height);
        self.images.register(image_pack);
    }

    pub fn with_builder<R>(&mut self, f: impl FnOnce(&mut InstanceBuilder<'_>) -> R) -> R {
        let mut builder = InstanceBuilder::new(
            &mut self.text,
            &self.images,
            &mut self.tracker,
            &self.config,
            &mut self.warnings,
        );
        f(&mut builder)
    }

    /// Renders `node` without starting a new frame.
    pub fn render(&mut self, node: &Node, width: f32, height: f32) -> Vec<GuiInstanceData> {
        self.with_builder(|builder| {
            builder.render_tree(node, width, height);
            builder.instances().to_vec()
        })
    }

    /// Advances the pointer and clears the zone index, then renders.
    pub fn frame(&mut self, node: &Node, width: f32, height: f32) -> Vec<GuiInstanceData> {
        self.tracker.begin_frame();
        self.render(node, width, height)
    }
}
