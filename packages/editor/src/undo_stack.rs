//! # Undo/Redo Stack
//!
//! Tracks forest history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each step stores the forest as it was before the edit
//! - Snapshots share every untouched subtree with their neighbours, so a step
//!   costs roughly the path from the edited node to its root
//! - Undo swaps the current forest for the stored one and keeps the current
//!   one for redo
//! - New edits clear the redo stack
//! - Supports batched operations (group multiple edits as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let next = mutation.apply(&forest)?;
//! stack.record(forest, mutation.name());
//! forest = next;
//!
//! if let Some(previous) = stack.undo(&forest) {
//!     forest = previous;
//! }
//! ```

use sitecraft_model::WebsiteData;

/// One undo step: the forest to return to, plus what led away from it
#[derive(Debug, Clone)]
pub struct UndoBatch {
    /// Forest to restore
    pub snapshot: WebsiteData,

    /// Names of the edits in this step (in application order)
    pub edits: Vec<String>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl UndoBatch {
    pub fn single(snapshot: WebsiteData, edit: impl Into<String>) -> Self {
        Self {
            snapshot,
            edits: vec![edit.into()],
            description: None,
        }
    }
}

/// Open batch: the snapshot is taken at the first edit
#[derive(Debug, Default)]
struct PendingBatch {
    snapshot: Option<WebsiteData>,
    edits: Vec<String>,
    description: Option<String>,
}

/// Undo/redo stack for forest editing
#[derive(Debug)]
pub struct UndoStack {
    /// Steps that can be undone (most recent last)
    undo_stack: Vec<UndoBatch>,

    /// Steps that can be redone (most recent last)
    redo_stack: Vec<UndoBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<PendingBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record an applied edit. `before` is the forest the edit started from.
    pub fn record(&mut self, before: WebsiteData, edit: impl Into<String>) {
        match &mut self.current_batch {
            Some(batch) => {
                batch.snapshot.get_or_insert(before);
                batch.edits.push(edit.into());
                self.redo_stack.clear();
            }
            None => self.push_batch(UndoBatch::single(before, edit)),
        }
    }

    /// Start a batch of edits (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(PendingBatch::default());
    }

    /// End the current batch and push to undo stack. Empty batches vanish.
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let Some(snapshot) = batch.snapshot {
                self.push_batch(UndoBatch {
                    snapshot,
                    edits: batch.edits,
                    description: batch.description,
                });
            }
        }
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: UndoBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back. Returns the forest to restore; `current` becomes redoable.
    pub fn undo(&mut self, current: &WebsiteData) -> Option<WebsiteData> {
        self.end_batch();
        let batch = self.undo_stack.pop()?;

        self.redo_stack.push(UndoBatch {
            snapshot: current.clone(),
            edits: batch.edits,
            description: batch.description,
        });
        Some(batch.snapshot)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &WebsiteData) -> Option<WebsiteData> {
        let batch = self.redo_stack.pop()?;

        self.undo_stack.push(UndoBatch {
            snapshot: current.clone(),
            edits: batch.edits,
            description: batch.description,
        });
        Some(batch.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
