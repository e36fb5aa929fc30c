//! # Sitecraft Editor
//!
//! Component tree engine for the Sitecraft layout editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: WebsiteData / Tab / Component        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document + mutations                │
//! │  - Pure tree and tab operations             │
//! │  - Selection and post-effects               │
//! │  - Drag-and-drop session                    │
//! │  - Snapshot undo/redo                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: Render implementation → view          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots**: every edit produces a new forest; untouched subtrees are shared
//! 2. **Single writer**: only [`Document`] replaces the forest
//! 3. **Quiet failure**: stale references and guarded edits are no-ops, never panics
//! 4. **Visibility is not structure**: disabled nodes stay in the tree and are
//!    skipped only when rendering
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_editor::{Document, EditorOptions, DropTarget};
//! use sitecraft_model::{ComponentType, PropsPatch};
//!
//! let mut doc = Document::load("site.json", EditorOptions::default())?;
//!
//! let flex = doc.add_component(ComponentType::FlexContainer, PropsPatch::new(), None, Some(0), false)?;
//!
//! let transport = doc.begin_palette_drag(ComponentType::Column, false);
//! doc.drop(&transport, &DropTarget::Node(flex))?;
//!
//! doc.save()?;
//! ```

pub mod drag;
mod document;
mod errors;
pub mod forest;
pub mod layers;
mod mutations;
pub mod palette;
mod post_effects;
pub mod render;
mod selection;
pub mod tabs;
pub mod tree;
mod undo_stack;

pub use document::{Document, DocumentStorage, EditorOptions};
pub use drag::{DragSession, DragSource, DragState, DragTransport, DropIntent, DropRejected, DropTarget};
pub use errors::EditorError;
pub use layers::{layer_outline, LayerEntry};
pub use mutations::{Direction, Mutation, MutationError, MutationResult};
pub use palette::{palette, PaletteCategory, PaletteEntry};
pub use post_effects::{EffectContext, PostEffect, PostEffectEngine, SelectionEffect};
pub use render::{render_page, Render, RenderContext, RenderedPage, StickyOffsets};
pub use selection::Selection;
pub use tabs::TabUpdate;
pub use undo_stack::{UndoBatch, UndoStack};

// Re-export the model for convenience
pub use sitecraft_model::{Component, ComponentType, NodeRef, Props, PropsPatch, Tab, TabStyle, WebsiteData};
