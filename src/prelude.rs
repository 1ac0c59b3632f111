//! The quadview prelude: a single import for everything you need.
//!
//! ```rust
//! use quadview::prelude::*;
//! ```

// Core types
pub use crate::Runtime;
pub use crate::engine::Config;
pub use crate::view::{Action, Button, Component, Modifier, View};
pub use crate::binding::{Binding, UpdateSignal, Value};
pub use crate::id::InteractionId;
pub use crate::instance::GuiInstanceData;
pub use crate::state_tracker::InteractivityState;

// Geometry and insets
pub use crate::math::{BoundingBox, Dimensions, Vector2};
pub use crate::layout::{Inset, InsetDescription, OptionalSize};
pub use crate::border::BorderBuilder;

// Side, globbed
pub use crate::layout::Side::{self, *};

// Services
pub use crate::text::{TextDrawData, TextService, TextStyle};
pub use crate::images::{ImageDrawData, ImageLookup, ImagePack, ImagePackRegistry, SubImage};

// Macroquad backend
pub use crate::renderer::{draw_instances, MacroquadImages, MacroquadText};

// Macros
pub use crate::sides;

// Full macroquad prelude, with Color shadowed by quadview's version
pub use macroquad::prelude::*;
pub use crate::color::Color;
// Explicit alias for when users need macroquad's Color
pub use macroquad::prelude::Color as MacroquadColor;
