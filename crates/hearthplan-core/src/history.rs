//! Linear, bounded undo/redo log of whole-plan snapshots.

use crate::plan::Plan;

/// Maximum number of snapshots retained; the oldest is evicted beyond this.
pub const MAX_HISTORY: usize = 50;

/// Snapshot log plus a cursor into it. The entry at the cursor always equals
/// the live plan; `undo`/`redo` move the cursor and hand back the snapshot
/// to install.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Plan>,
    cursor: usize,
}

impl History {
    /// Start a fresh log seeded with the initial document state.
    pub fn new(initial: Plan) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Record a new state. Any redo branch beyond the cursor is discarded;
    /// the oldest entry is evicted once the cap is reached.
    pub fn push(&mut self, plan: Plan) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(plan);
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back, returning the snapshot to make live. `None` at the start
    /// of the log.
    pub fn undo(&mut self) -> Option<&Plan> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward, returning the snapshot to make live. `None` at the end
    /// of the log.
    pub fn redo(&mut self) -> Option<&Plan> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Drop everything and reseed, used when a project is loaded or created.
    pub fn reset(&mut self, initial: Plan) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
