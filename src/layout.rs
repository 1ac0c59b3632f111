use crate::math::Vector2;

/// One side of a box, or all four at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
    /// Overrides every side, whatever else is in the set.
    All,
}

/// Per-side widths used for margin and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Inset {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Inset {
    pub const ZERO: Inset = Inset::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `Inset` with individual values for each side.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Sets the same width for all sides.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Offset of the inner box from the outer box's origin.
    pub fn offset(&self) -> Vector2 {
        Vector2::new(self.left, self.top)
    }

    /// Total width and height taken by the inset.
    pub fn total(&self) -> Vector2 {
        Vector2::new(self.horizontal(), self.vertical())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Overwrites the sides named by `description`, or all of them if it contains [`Side::All`].
    pub fn merge_with(&self, description: &InsetDescription) -> Inset {
        let mut merged = *self;
        let width = description.width;
        if description.sides.contains(&Side::All) {
            return Inset::all(width);
        }
        for side in &description.sides {
            match side {
                Side::Left => merged.left = width,
                Side::Top => merged.top = width,
                Side::Right => merged.right = width,
                Side::Bottom => merged.bottom = width,
                Side::All => {}
            }
        }
        merged
    }
}

/// A margin or padding delta: one width applied to a set of sides.
#[derive(Debug, Clone, PartialEq)]
pub struct InsetDescription {
    pub sides: Vec<Side>,
    pub width: f32,
}

impl InsetDescription {
    pub fn new(sides: impl Into<Vec<Side>>, width: f32) -> Self {
        Self {
            sides: sides.into(),
            width,
        }
    }

    pub fn all(width: f32) -> Self {
        Self::new([Side::All], width)
    }

    pub fn horizontal(width: f32) -> Self {
        Self::new([Side::Left, Side::Right], width)
    }

    pub fn vertical(width: f32) -> Self {
        Self::new([Side::Top, Side::Bottom], width)
    }
}

impl From<f32> for InsetDescription {
    /// Same width on every side.
    fn from(width: f32) -> Self {
        Self::all(width)
    }
}

impl From<(Side, f32)> for InsetDescription {
    fn from((side, width): (Side, f32)) -> Self {
        Self::new([side], width)
    }
}

impl<const N: usize> From<([Side; N], f32)> for InsetDescription {
    fn from((sides, width): ([Side; N], f32)) -> Self {
        Self::new(sides, width)
    }
}

/// The three nested boxes a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeInformation {
    /// Everything, margin included.
    pub footprint: Vector2,
    /// Footprint without the margin.
    pub padding_zone: Vector2,
    /// Padding zone without the padding.
    pub content_zone: Vector2,
}

impl SizeInformation {
    pub const ZERO: SizeInformation = SizeInformation {
        footprint: Vector2::ZERO,
        padding_zone: Vector2::ZERO,
        content_zone: Vector2::ZERO,
    };

    /// Grows the padding zone by `margin` and shrinks it by `padding`.
    pub fn from_padding_zone(padding_zone: Vector2, margin: &Inset, padding: &Inset) -> Self {
        Self {
            footprint: padding_zone + margin.total(),
            padding_zone,
            content_zone: padding_zone - padding.total(),
        }
    }
}

/// Absolute size with each axis set independently.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptionalSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl OptionalSize {
    pub fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }

    pub fn fixed(width: f32, height: f32) -> Self {
        Self::new(Some(width), Some(height))
    }

    pub fn width(width: f32) -> Self {
        Self::new(Some(width), None)
    }

    pub fn height(height: f32) -> Self {
        Self::new(None, Some(height))
    }

    pub fn is_unset(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Axes set in `other` win.
    pub fn merge_with(&self, other: &OptionalSize) -> OptionalSize {
        OptionalSize {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
        }
    }
}

impl From<(f32, f32)> for OptionalSize {
    fn from((width, height): (f32, f32)) -> Self {
        Self::fixed(width, height)
    }
}

impl From<Vector2> for OptionalSize {
    fn from(size: Vector2) -> Self {
        Self::fixed(size.x, size.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeToChildren {
    pub horizontal: bool,
    pub vertical: bool,
}

impl SizeToChildren {
    pub const NONE: SizeToChildren = SizeToChildren::new(false, false);
    pub const BOTH: SizeToChildren = SizeToChildren::new(true, true);

    pub const fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }

    /// Flags only ever get switched on by a merge.
    pub fn merge_with(&self, other: SizeToChildren) -> SizeToChildren {
        SizeToChildren::new(
            self.horizontal || other.horizontal,
            self.vertical || other.vertical,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AutoSizeMode {
    ToChildren,
    #[default]
    ToParent,
}

/// Shorthand for a list of [`Side`]s, e.g. `sides![Left, Right]`.
#[macro_export]
macro_rules! sides {
    ($($side:ident),* $(,)?) => {
        vec![$($crate::layout::Side::$side),*]
    };
}
