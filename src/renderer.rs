//! Reference backend drawing the instance array with macroquad.

use macroquad::prelude::*;
use rustc_hash::FxHashMap;

use crate::images::{ImageDrawData, ImageLookup, ImagePack, ImagePackRegistry};
use crate::instance::GuiInstanceData;
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::text::{TextDrawData, TextService, TextStyle};

/// First texture slot handed out to rasterized text. Image packs use slots below it.
pub const TEXT_SLOT_BASE: i32 = 1024;

/// Font name that maps to macroquad's built-in font unless a font is registered under it.
pub const SYSTEM_FONT: &str = "System";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RunKey {
    text: String,
    font_name: String,
    font_size: u16,
    color: [u32; 4],
}

impl RunKey {
    fn new(text: &str, style: &TextStyle) -> Self {
        let [r, g, b, a] = style.color.normalized();
        Self {
            text: text.to_owned(),
            font_name: style.font_name.clone(),
            font_size: style.font_size.round() as u16,
            color: [r.to_bits(), g.to_bits(), b.to_bits(), a.to_bits()],
        }
    }
}

struct TextRun {
    slot: i32,
    size: Dimensions,
}

/// Text measured and rasterized with macroquad fonts.
///
/// Each distinct run is rasterized once into its own texture.
#[derive(Default)]
pub struct MacroquadText {
    fonts: FxHashMap<String, Font>,
    runs: FxHashMap<RunKey, TextRun>,
    textures: Vec<Texture2D>,
}

impl MacroquadText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_font(&mut self, name: impl Into<String>, font: Font) {
        self.fonts.insert(name.into(), font);
    }

    pub async fn load_font(&mut self, name: impl Into<String>, path: &str) -> Result<(), macroquad::Error> {
        let font = load_ttf_font(path).await?;
        self.add_font(name, font);
        Ok(())
    }

    /// `Some(None)` means macroquad's built-in font.
    fn font(&self, name: &str) -> Option<Option<&Font>> {
        match self.fonts.get(name) {
            Some(font) => Some(Some(font)),
            None if name == SYSTEM_FONT => Some(None),
            None => None,
        }
    }

    pub fn texture(&self, slot: i32) -> Option<&Texture2D> {
        let index = usize::try_from(slot - TEXT_SLOT_BASE).ok()?;
        self.textures.get(index)
    }

    /// Drops every rasterized run.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.textures.clear();
    }

    fn rasterize(&mut self, text: &str, style: &TextStyle) -> Option<TextRun> {
        let font = self.font(&style.font_name)?;
        let font_size = style.font_size.round() as u16;
        let dimensions = measure_text(text, font, font_size, 1.0);
        if dimensions.width < 1.0 || dimensions.height < 1.0 {
            return None;
        }

        let render_target = render_target_msaa(dimensions.width.ceil() as u32, dimensions.height.ceil() as u32);
        render_target.texture.set_filter(FilterMode::Linear);
        let mut cam = Camera2D::from_display_rect(Rect::new(0.0, 0.0, dimensions.width, dimensions.height));
        cam.render_target = Some(render_target.clone());
        set_camera(&cam);
        clear_background(Color::new(0.0, 0.0, 0.0, 0.0));
        draw_text_ex(
            text,
            0.0,
            dimensions.offset_y,
            TextParams {
                font,
                font_size,
                color: style.color.into(),
                ..Default::default()
            },
        );
        set_default_camera();

        let slot = TEXT_SLOT_BASE + self.textures.len() as i32;
        self.textures.push(render_target.texture);
        Some(TextRun {
            slot,
            size: Dimensions::new(dimensions.width, dimensions.height),
        })
    }
}

impl TextService for MacroquadText {
    fn measure(&mut self, text: &str, style: &TextStyle) -> Option<Dimensions> {
        let font = self.font(&style.font_name)?;
        let measured = measure_text(text, font, style.font_size.round() as u16, 1.0);
        Some(Dimensions::new(measured.width, measured.height))
    }

    fn draw_data(&mut self, text: &str, style: &TextStyle, position: Vector2) -> Option<TextDrawData> {
        let key = RunKey::new(text, style);
        if !self.runs.contains_key(&key) {
            let run = self.rasterize(text, style)?;
            self.runs.insert(key.clone(), run);
        }
        let run = self.runs.get(&key)?;
        Some(TextDrawData {
            rect: BoundingBox::new(position.x, position.y, run.size.width, run.size.height),
            // Render targets come out upside down.
            uv_top_left: Vector2::new(0.0, 1.0),
            uv_bottom_right: Vector2::new(1.0, 0.0),
            texture_slot: run.slot,
        })
    }

    fn has_font(&self, font_name: &str) -> bool {
        self.font(font_name).is_some()
    }
}

/// Image packs with their uploaded textures.
#[derive(Default)]
pub struct MacroquadImages {
    registry: ImagePackRegistry,
    textures: FxHashMap<i32, Texture2D>,
}

impl MacroquadImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pack`, drawn from `texture`.
    pub fn register(&mut self, pack: ImagePack, texture: Texture2D) {
        self.textures.insert(pack.texture_slot, texture);
        self.registry.register(pack);
    }

    pub fn registry(&self) -> &ImagePackRegistry {
        &self.registry
    }

    pub fn texture(&self, slot: i32) -> Option<&Texture2D> {
        self.textures.get(&slot)
    }
}

impl ImageLookup for MacroquadImages {
    fn lookup(&self, name: &str, pack: &str) -> Option<ImageDrawData> {
        self.registry.lookup(name, pack)
    }
}

/// Draws `instances` in order, later instances on top.
pub fn draw_instances(instances: &[GuiInstanceData], text: &MacroquadText, images: &MacroquadImages) {
    for instance in instances.iter().filter(|instance| instance.visible()) {
        let [r, g, b, a] = instance.color;
        let color = Color::new(r, g, b, a);
        let (x, y) = (instance.position.x, instance.position.y);
        let (w, h) = (instance.size.x, instance.size.y);

        if !instance.textures() {
            if a > 0.0 {
                draw_rectangle(x, y, w, h, color);
            }
            continue;
        }

        let texture = if instance.texture_slot >= TEXT_SLOT_BASE {
            text.texture(instance.texture_slot)
        } else {
            images.texture(instance.texture_slot)
        };
        let Some(texture) = texture else {
            warn!("No texture in slot {}", instance.texture_slot);
            continue;
        };

        let top_left = instance.texture_top_left;
        let bottom_right = instance.texture_bottom_right;
        let (tw, th) = (texture.width(), texture.height());
        let source = Rect::new(
            top_left.x.min(bottom_right.x) * tw,
            top_left.y.min(bottom_right.y) * th,
            (bottom_right.x - top_left.x).abs() * tw,
            (bottom_right.y - top_left.y).abs() * th,
        );
        draw_texture_ex(
            texture,
            x,
            y,
            color,
            DrawTextureParams {
                dest_size: Some(Vec2::new(w, h)),
                source: Some(source),
                flip_x: bottom_right.x < top_left.x,
                flip_y: bottom_right.y < top_left.y,
                ..Default::default()
            },
        );
    }
}
