//! Undo/redo history over whole-surface snapshots.

use crate::error::DesignResult;
use crate::surface::Surface;

/// Two-stack history of serialized surface snapshots.
///
/// The undo stack is seeded with the initial state and never drains
/// past it; the redo stack is cleared on every newly recorded
/// mutation, so history never branches.
#[derive(Debug, Default)]
pub struct HistoryManager {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl HistoryManager {
    /// Create a history seeded with the surface's initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial snapshot cannot be serialized.
    pub fn seeded(surface: &Surface) -> DesignResult<Self> {
        let mut history = Self::default();
        history.undo_stack.push(surface.to_json()?);
        Ok(history)
    }

    /// Record the surface state after a committed mutation.
    ///
    /// A snapshot that fails to serialize is logged and skipped; the
    /// previous history remains intact.
    pub fn record(&mut self, surface: &Surface) {
        match surface.to_json() {
            Ok(snapshot) => {
                self.undo_stack.push(snapshot);
                self.redo_stack.clear();
            }
            Err(e) => tracing::warn!("Skipping history snapshot: {e}"),
        }
    }

    /// Step backward, restoring the previous state into `surface`.
    ///
    /// No-op when only the initial state remains. A corrupt snapshot is
    /// logged and abandoned without mutating the surface or the stacks.
    ///
    /// Returns `true` if a state was restored.
    pub fn undo(&mut self, surface: &mut Surface) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        let previous = &self.undo_stack[self.undo_stack.len() - 2];
        if let Err(e) = surface.apply_snapshot(previous) {
            tracing::warn!("Undo abandoned, corrupt snapshot: {e}");
            return false;
        }
        let current = self.undo_stack.pop().unwrap_or_default();
        self.redo_stack.push(current);
        true
    }

    /// Step forward, restoring the next state into `surface`.
    ///
    /// No-op when the redo stack is empty.
    ///
    /// Returns `true` if a state was restored.
    pub fn redo(&mut self, surface: &mut Surface) -> bool {
        let Some(next) = self.redo_stack.last() else {
            return false;
        };
        if let Err(e) = surface.apply_snapshot(next) {
            tracing::warn!("Redo abandoned, corrupt snapshot: {e}");
            return false;
        }
        let next = self.redo_stack.pop().unwrap_or_default();
        self.undo_stack.push(next);
        true
    }

    /// Whether an undo would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Whether a redo would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries on the undo stack (including the seed).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }
}
