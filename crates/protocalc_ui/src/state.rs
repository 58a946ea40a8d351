//! Interaction state types shared by editors

use crate::constants::UNDO_STACK_LIMIT;
use crate::{Bounds, Point};

/// Bounded undo stack for any value type
///
/// States are pushed BEFORE a change is made. When the stack grows past its
/// limit the oldest entry is evicted, so new pushes are never rejected.
/// There is no redo history: a popped state is consumed.
///
/// # Example
/// ```
/// use protocalc_ui::UndoStack;
///
/// let mut stack: UndoStack<String> = UndoStack::new(50);
///
/// // Before making a change, push current state
/// stack.push("hello".to_string());
///
/// // Undo hands back the previous state
/// assert_eq!(stack.pop().as_deref(), Some("hello"));
/// assert!(!stack.can_undo());
/// ```
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    /// Stack of states that can be undone, most recent at the end
    undo_stack: Vec<T>,
    /// Maximum history size
    max_history: usize,
}

impl<T> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(UNDO_STACK_LIMIT)
    }
}

impl<T> UndoStack<T> {
    /// Create a new undo stack with specified max history size
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            max_history,
        }
    }

    /// Push a state to the undo stack (call this BEFORE making a change)
    pub fn push(&mut self, state: T) {
        self.undo_stack.push(state);

        // Limit history size
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Take the most recent state, or None if nothing to undo
    pub fn pop(&mut self) -> Option<T> {
        self.undo_stack.pop()
    }

    /// Most recent state without consuming it
    pub fn peek(&self) -> Option<&T> {
        self.undo_stack.last()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Get number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Maximum number of entries retained
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.undo_stack.iter()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}

/// Rectangle drag interaction state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging from `start` to the last seen pointer position (screen space)
    Dragging { start: Point, current: Point },
}

impl DragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Start dragging at the given position
    pub fn start(&mut self, pos: Point) {
        *self = DragState::Dragging {
            start: pos,
            current: pos,
        };
    }

    /// Update the pointer position during a drag
    pub fn update(&mut self, pos: Point) {
        if let DragState::Dragging { current, .. } = self {
            *current = pos;
        }
    }

    /// Rectangle covered by the drag so far
    pub fn rect(&self) -> Option<Bounds> {
        match self {
            DragState::Dragging { start, current } => Some(Bounds::from_corners(*start, *current)),
            DragState::Idle => None,
        }
    }

    /// Stop dragging, returning the final rectangle if a drag was active
    pub fn finish(&mut self) -> Option<Bounds> {
        let rect = self.rect();
        *self = DragState::Idle;
        rect
    }
}
