use macroquad::logging::debug;
use rustc_hash::FxHashMap;

use crate::id::InteractionId;
use crate::math::{BoundingBox, Vector2};
use crate::quadtree::{Quadtree, QuadtreeConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum InteractivityState {
    #[default]
    Normal,
    Hover,
    Pressed,
}

/// Pointer button phase, advanced once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PointerState {
    PressedThisFrame,
    Pressed,
    ReleasedThisFrame,
    #[default]
    Released,
}

impl PointerState {
    pub fn is_down(&self) -> bool {
        matches!(self, PointerState::PressedThisFrame | PointerState::Pressed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitResponse {
    pub is_hit: bool,
    pub mouse_down: bool,
}

/// What a zone resolved to on the frame it was last seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneState {
    /// Derived from the hit test alone.
    pub raw: InteractivityState,
    /// What was actually displayed, after falling back for missing content.
    pub effective: InteractivityState,
}

/// Pointer state plus the per-frame index of interactive zones.
#[derive(Debug, Clone)]
pub struct StateTracker {
    zones: Quadtree,
    pointer_position: Vector2,
    pointer_down: bool,
    pointer_state: PointerState,
    current: FxHashMap<InteractionId, ZoneState>,
    previous: FxHashMap<InteractionId, ZoneState>,
}

impl StateTracker {
    pub fn new(bounds: BoundingBox, config: QuadtreeConfig) -> Self {
        Self {
            zones: Quadtree::new(bounds, config),
            pointer_position: Vector2::ZERO,
            pointer_down: false,
            pointer_state: PointerState::Released,
            current: FxHashMap::default(),
            previous: FxHashMap::default(),
        }
    }

    pub fn set_pointer_position(&mut self, position: Vector2) {
        self.pointer_position = position;
    }

    pub fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    pub fn pointer_position(&self) -> Vector2 {
        self.pointer_position
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer_state
    }

    /// Advances the pointer phase and starts a fresh zone index.
    pub fn begin_frame(&mut self) {
        if self.pointer_down {
            match self.pointer_state {
                PointerState::PressedThisFrame => {
                    self.pointer_state = PointerState::Pressed;
                }
                s if s != PointerState::Pressed => {
                    self.pointer_state = PointerState::PressedThisFrame;
                }
                _ => {}
            }
        } else {
            match self.pointer_state {
                PointerState::ReleasedThisFrame => {
                    self.pointer_state = PointerState::Released;
                }
                s if s != PointerState::Released => {
                    self.pointer_state = PointerState::ReleasedThisFrame;
                }
                _ => {}
            }
        }

        self.previous = std::mem::take(&mut self.current);
        self.reset();
    }

    /// Clears the zone index.
    pub fn reset(&mut self) {
        self.zones.reset();
    }

    pub fn resize(&mut self, bounds: BoundingBox) {
        self.zones.resize(bounds);
    }

    /// Rebuilds the zone index with new subdivision limits.
    pub fn reconfigure(&mut self, config: QuadtreeConfig) {
        self.zones = Quadtree::new(self.zones.bounds(), config);
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn register_interactive_zone(&mut self, id: InteractionId, rect: BoundingBox) {
        if !self.zones.insert(id, rect) {
            debug!("interactive zone {:?} at {:?} is outside the tracked area", id, rect);
        }
    }

    pub fn is_interactive_zone_hit(&self, id: InteractionId) -> HitResponse {
        HitResponse {
            is_hit: self.zones.query(self.pointer_position).contains(&id),
            mouse_down: self.pointer_state.is_down(),
        }
    }

    /// Resolves the state to display for `id` this frame.
    ///
    /// A hit with the pointer down shows pressed content, or hover content if there is no
    /// pressed content. A hit with the pointer up shows hover content. Anything without
    /// content to show is displayed as normal.
    pub fn resolve_state(
        &mut self,
        id: InteractionId,
        has_hover: bool,
        has_pressed: bool,
    ) -> InteractivityState {
        let hit = self.is_interactive_zone_hit(id);
        let raw = match (hit.is_hit, hit.mouse_down) {
            (false, _) => InteractivityState::Normal,
            (true, true) => InteractivityState::Pressed,
            (true, false) => InteractivityState::Hover,
        };
        let effective = match raw {
            InteractivityState::Pressed if has_pressed => InteractivityState::Pressed,
            InteractivityState::Pressed | InteractivityState::Hover if has_hover => {
                InteractivityState::Hover
            }
            _ => InteractivityState::Normal,
        };
        self.current.insert(id, ZoneState { raw, effective });
        effective
    }

    /// State `id` is displaying: this frame's if already resolved, else last frame's.
    pub fn last_known_state(&self, id: InteractionId) -> InteractivityState {
        self.current
            .get(&id)
            .or_else(|| self.previous.get(&id))
            .map(|zone| zone.effective)
            .unwrap_or_default()
    }

    /// True when the pointer was released over `id` after being pressed on it.
    pub fn was_clicked(&self, id: InteractionId) -> bool {
        let released_here = self.pointer_state == PointerState::ReleasedThisFrame
            && self.is_interactive_zone_hit(id).is_hit;
        released_here
            && self
                .previous
                .get(&id)
                .is_some_and(|zone| zone.raw == InteractivityState::Pressed)
    }
}
