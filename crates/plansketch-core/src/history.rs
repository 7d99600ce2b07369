//! Snapshot-based linear undo/redo.

/// Default number of undo states to keep.
pub const DEFAULT_CAPACITY: usize = 50;

/// Linear undo/redo over full-collection snapshots.
///
/// The owner passes its live collection in; snapshots are value copies, so
/// mutating the live collection afterwards never alters stored history.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    capacity: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> History<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history keeping at most `capacity` undo states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the pre-mutation state (call before making changes).
    pub fn push(&mut self, current: &T) {
        self.undo_stack.push(current.clone());

        // Any new change invalidates forward history
        self.redo_stack.clear();

        if self.undo_stack.len() > self.capacity {
            self.undo_stack.remove(0);
        }
        log::trace!("history push (depth {})", self.undo_stack.len());
    }

    /// Step back. Returns the state to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: &T) -> Option<T> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(snapshot)
    }

    /// Step forward. Returns the state to restore, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: &T) -> Option<T> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of states that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}
