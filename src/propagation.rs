use crate::errors::{contract_violation, ErrorType};
use crate::layout::AutoSizeMode;
use crate::math::Vector2;

/// Render context inherited from ancestors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagatingRenderProperties {
    /// Absolute screen position of the current cursor.
    pub position: Vector2,
    pub auto_size_mode: AutoSizeMode,
    /// False as soon as any ancestor is hidden.
    pub visible: bool,
}

impl Default for PropagatingRenderProperties {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            auto_size_mode: AutoSizeMode::ToParent,
            visible: true,
        }
    }
}

/// LIFO stack of [`PropagatingRenderProperties`], never empty.
#[derive(Debug, Clone)]
pub struct PropagationStack {
    entries: Vec<PropagatingRenderProperties>,
}

impl Default for PropagationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PropagationStack {
    pub fn new() -> Self {
        Self {
            entries: vec![PropagatingRenderProperties::default()],
        }
    }

    pub fn top(&self) -> PropagatingRenderProperties {
        // The root entry is never popped.
        self.entries[self.entries.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Moves the cursor by `offset` relative to the current one.
    pub fn push_position(&mut self, offset: Vector2) {
        let top = self.top();
        self.entries.push(PropagatingRenderProperties {
            position: top.position + offset,
            ..top
        });
    }

    /// Hides everything pushed after this entry.
    pub fn push_invisible(&mut self) {
        let top = self.top();
        self.entries.push(PropagatingRenderProperties {
            visible: false,
            ..top
        });
    }

    pub fn push_auto_size_mode(&mut self, auto_size_mode: AutoSizeMode) {
        let top = self.top();
        self.entries.push(PropagatingRenderProperties {
            auto_size_mode,
            ..top
        });
    }

    /// Context a container hands to its children: position and visibility only.
    pub fn reset_for_child(&mut self) {
        let top = self.top();
        self.entries.push(PropagatingRenderProperties {
            position: top.position,
            visible: top.visible,
            ..Default::default()
        });
    }

    pub fn pop(&mut self) -> PropagatingRenderProperties {
        if self.entries.len() <= 1 {
            contract_violation(
                ErrorType::PropagationStackUnderflow,
                "attempted to pop the root propagation entry",
            );
        }
        let top = self.top();
        self.entries.truncate(self.entries.len() - 1);
        top
    }

    /// Pops until `depth` entries remain.
    pub fn pop_to(&mut self, depth: usize) {
        while self.entries.len() > depth {
            self.pop();
        }
    }

    /// Drops everything but the root entry.
    pub fn clear(&mut self) {
        self.entries.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_accumulate() {
        let mut stack = PropagationStack::new();
        stack.push_position(Vector2::new(10.0, 5.0));
        stack.push_position(Vector2::new(1.0, 1.0));
        assert_eq!(stack.top().position, Vector2::new(11.0, 6.0));
        stack.pop();
        assert_eq!(stack.top().position, Vector2::new(10.0, 5.0));
    }

    #[test]
    fn invisibility_only_ends_by_popping() {
        let mut stack = PropagationStack::new();
        let start = stack.depth();
        stack.push_invisible();
        stack.reset_for_child();
        stack.push_position(Vector2::new(3.0, 0.0));
        assert!(!stack.top().visible);
        stack.pop_to(start);
        assert!(stack.top().visible);
        assert_eq!(stack.depth(), start);
    }

    #[test]
    fn reset_for_child_restores_auto_size_mode() {
        let mut stack = PropagationStack::new();
        stack.push_position(Vector2::new(2.0, 2.0));
        stack.push_auto_size_mode(AutoSizeMode::ToChildren);
        stack.reset_for_child();
        let top = stack.top();
        assert_eq!(top.auto_size_mode, AutoSizeMode::ToParent);
        assert_eq!(top.position, Vector2::new(2.0, 2.0));
    }

    #[test]
    #[should_panic(expected = "PropagationStackUnderflow")]
    fn popping_the_root_panics() {
        PropagationStack::new().pop();
    }
}
