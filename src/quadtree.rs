//! Region index for interactive zones.
//!
//! Each node keeps up to `capacity` zones before splitting into four quadrants.
//! A zone that does not fit inside a single quadrant stays at the coarser level.

use rustc_hash::FxHashSet;

use crate::id::InteractionId;
use crate::math::{BoundingBox, Vector2};

/// Configuration for quadtree behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreeConfig {
    /// Zones per node before subdivision
    pub capacity: usize,
    /// Maximum subdivision depth
    pub max_depth: u32,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            max_depth: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneEntry {
    pub id: InteractionId,
    pub rect: BoundingBox,
}

#[derive(Debug, Clone)]
pub struct Quadtree {
    bounds: BoundingBox,
    config: QuadtreeConfig,
    depth: u32,
    entries: Vec<ZoneEntry>,
    /// nw, ne, sw, se
    children: Option<Box<[Quadtree; 4]>>,
}

impl Quadtree {
    pub fn new(bounds: BoundingBox, config: QuadtreeConfig) -> Self {
        Self::with_depth(bounds, config, 0)
    }

    fn with_depth(bounds: BoundingBox, config: QuadtreeConfig, depth: u32) -> Self {
        Self {
            bounds,
            config,
            depth,
            entries: Vec::new(),
            children: None,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }
        let half_width = self.bounds.width / 2.0;
        let half_height = self.bounds.height / 2.0;
        let (x, y) = (self.bounds.x, self.bounds.y);
        let quadrant = |x: f32, y: f32| {
            Quadtree::with_depth(
                BoundingBox::new(x, y, half_width, half_height),
                self.config,
                self.depth + 1,
            )
        };
        self.children = Some(Box::new([
            quadrant(x, y),
            quadrant(x + half_width, y),
            quadrant(x, y + half_height),
            quadrant(x + half_width, y + half_height),
        ]));
    }

    /// Records a zone. Returns false, storing nothing, if `rect` misses the tree's bounds.
    pub fn insert(&mut self, id: InteractionId, rect: BoundingBox) -> bool {
        if !self.bounds.intersects(&rect) {
            return false;
        }

        if self.is_leaf() && self.entries.len() < self.config.capacity {
            self.entries.push(ZoneEntry { id, rect });
            return true;
        }

        if self.depth >= self.config.max_depth {
            self.entries.push(ZoneEntry { id, rect });
            return true;
        }

        self.subdivide();
        if let Some(children) = self.children.as_mut() {
            if let Some(child) = children.iter_mut().find(|c| c.bounds.contains_rect(&rect)) {
                return child.insert(id, rect);
            }
        }
        self.entries.push(ZoneEntry { id, rect });
        true
    }

    /// Ids of every zone containing `point`.
    pub fn query(&self, point: Vector2) -> FxHashSet<InteractionId> {
        let mut hits = FxHashSet::default();
        self.query_into(point, &mut hits);
        hits
    }

    fn query_into(&self, point: Vector2, hits: &mut FxHashSet<InteractionId>) {
        hits.extend(
            self.entries
                .iter()
                .filter(|entry| entry.rect.contains_point(point))
                .map(|entry| entry.id),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.bounds.contains_point(point) {
                    child.query_into(point, hits);
                }
            }
        }
    }

    /// Number of zones stored in this node and below.
    pub fn len(&self) -> usize {
        self.entries.len()
            + self
                .children
                .as_ref()
                .map_or(0, |children| children.iter().map(Quadtree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every zone and collapses the subdivisions.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.children = None;
    }

    /// Replaces the tracked area. Drops all zones.
    pub fn resize(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
        self.reset();
    }
}
