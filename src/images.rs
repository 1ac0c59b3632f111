use rustc_hash::FxHashMap;

/// Location of one image inside a packed texture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubImage {
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    /// Size in pixels, used as the image's intrinsic size.
    pub width: f32,
    pub height: f32,
}

/// Everything needed to draw one image instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageDrawData {
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    pub texture_slot: i32,
    pub width: f32,
    pub height: f32,
}

/// Resolves `(image name, pack name)` pairs. `None` degrades the element to empty space.
pub trait ImageLookup {
    fn lookup(&self, name: &str, pack: &str) -> Option<ImageDrawData>;
}

/// A named set of images sharing one texture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImagePack {
    pub name: String,
    pub texture_slot: i32,
    pub width: f32,
    pub height: f32,
    pub images: FxHashMap<String, SubImage>,
}

impl ImagePack {
    pub fn new(name: impl Into<String>, texture_slot: i32, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            texture_slot,
            width,
            height,
            images: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, image: SubImage) -> &mut Self {
        self.images.insert(name.into(), image);
        self
    }

    /// Adds an image by its pixel rectangle, deriving the UVs from the pack size.
    pub fn insert_rect(&mut self, name: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        let image = SubImage {
            u: x / self.width,
            v: y / self.height,
            u2: (x + width) / self.width,
            v2: (y + height) / self.height,
            width,
            height,
        };
        self.insert(name, image)
    }

    pub fn get(&self, name: &str) -> Option<&SubImage> {
        self.images.get(name)
    }
}

#[cfg(feature = "json")]
mod descriptor {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub(super) struct PackDescriptor {
        pub width: f32,
        pub height: f32,
        pub images: Vec<ImageDescriptor>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct ImageDescriptor {
        pub name: String,
        pub location: Location,
        pub texture_coordinates: TextureCoordinates,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Location {
        #[allow(dead_code)]
        pub x: f32,
        #[allow(dead_code)]
        pub y: f32,
        pub width: f32,
        pub height: f32,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct TextureCoordinates {
        pub u: f32,
        pub v: f32,
        pub u2: f32,
        pub v2: f32,
    }
}

#[cfg(feature = "json")]
impl ImagePack {
    /// Parses the sprite packer's descriptor:
    /// `{ width, height, images: [{ name, location: {x, y, width, height}, textureCoordinates: {u, v, u2, v2} }] }`.
    pub fn from_json(name: impl Into<String>, texture_slot: i32, json: &str) -> Result<Self, serde_json::Error> {
        let descriptor: descriptor::PackDescriptor = serde_json::from_str(json)?;
        let mut pack = ImagePack::new(name, texture_slot, descriptor.width, descriptor.height);
        for image in descriptor.images {
            let coordinates = image.texture_coordinates;
            pack.insert(
                image.name,
                SubImage {
                    u: coordinates.u,
                    v: coordinates.v,
                    u2: coordinates.u2,
                    v2: coordinates.v2,
                    width: image.location.width,
                    height: image.location.height,
                },
            );
        }
        Ok(pack)
    }
}

/// Image packs by name. Implements [`ImageLookup`].
#[derive(Debug, Clone, Default)]
pub struct ImagePackRegistry {
    packs: FxHashMap<String, ImagePack>,
}

impl ImagePackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `pack`, replacing any pack with the same name.
    pub fn register(&mut self, pack: ImagePack) {
        self.packs.insert(pack.name.clone(), pack);
    }

    pub fn pack(&self, name: &str) -> Option<&ImagePack> {
        self.packs.get(name)
    }

    pub fn packs(&self) -> impl Iterator<Item = &ImagePack> {
        self.packs.values()
    }
}

impl ImageLookup for ImagePackRegistry {
    fn lookup(&self, name: &str, pack: &str) -> Option<ImageDrawData> {
        let pack = self.packs.get(pack)?;
        let image = pack.get(name)?;
        Some(ImageDrawData {
            u: image.u,
            v: image.v,
            u2: image.u2,
            v2: image.v2,
            texture_slot: pack.texture_slot,
            width: image.width,
            height: image.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_through_registry() {
        let mut pack = ImagePack::new("ui", 2, 64.0, 32.0);
        pack.insert_rect("arrow", 16.0, 0.0, 16.0, 16.0);
        let mut registry = ImagePackRegistry::new();
        registry.register(pack);

        let arrow = registry.lookup("arrow", "ui").expect("registered image");
        assert_eq!(arrow.texture_slot, 2);
        assert_eq!((arrow.u, arrow.v, arrow.u2, arrow.v2), (0.25, 0.0, 0.5, 0.5));
        assert_eq!((arrow.width, arrow.height), (16.0, 16.0));

        assert!(registry.lookup("arrow", "icons").is_none());
        assert!(registry.lookup("missing", "ui").is_none());
    }

    #[cfg(feature = "json")]
    #[test]
    fn parses_packer_descriptor() {
        let json = r#"{
            "width": 128, "height": 64,
            "images": [{
                "name": "play",
                "location": { "x": 0, "y": 0, "width": 32, "height": 16 },
                "textureCoordinates": { "u": 0.0, "v": 0.0, "u2": 0.25, "v2": 0.25 }
            }]
        }"#;
        let pack = ImagePack::from_json("controls", 1, json).expect("valid descriptor");
        let play = pack.get("play").expect("parsed image");
        assert_eq!(play.u2, 0.25);
        assert_eq!((play.width, play.height), (32.0, 16.0));
        assert!(ImagePack::from_json("broken", 1, "{").is_err());
    }
}
