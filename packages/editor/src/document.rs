//! # Document Handle
//!
//! The single writer of a website forest. A `Document` owns the current
//! snapshot together with everything that has to stay in step with it:
//! selection, drag session, undo history and id generation.
//!
//! Documents can be:
//! - **Memory-backed**: templates and tests
//! - **File-backed**: loaded from and saved to a JSON file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Normalize → Edit → Render / Export
//!   ↓        ↓         ↓          ↓
//! JSON   WebsiteData  Mutations  View / JSON
//! ```
//!
//! Every edit goes through [`Document::apply`], which swaps in the next
//! snapshot or reports why nothing changed. It never fails.

use crate::drag::{DragSession, DragTransport, DropIntent, DropRejected, DropTarget};
use crate::layers::{layer_outline, LayerEntry};
use crate::post_effects::PostEffectEngine;
use crate::render::{render_page, Render, RenderedPage, StickyOffsets};
use crate::selection::Selection;
use crate::tabs::TabUpdate;
use crate::undo_stack::UndoStack;
use crate::{forest, Direction, EditorError, Mutation, MutationError, MutationResult};
use sitecraft_model::{Component, ComponentType, IdGenerator, PropsPatch, TabStyle, WebsiteData};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Knobs a host can set when opening a document
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Undo levels to keep (0 = unlimited)
    pub undo_levels: usize,

    /// Seeds generated ids so separate sessions do not collide
    pub session_name: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            undo_levels: 100,
            session_name: "sitecraft".to_string(),
        }
    }
}

/// Storage backend for document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStorage {
    /// In-memory only (templates, tests)
    Memory,

    /// File-backed
    File { path: PathBuf, dirty: bool },
}

/// Editable website document
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each applied change)
    pub version: u64,

    storage: DocumentStorage,
    forest: WebsiteData,
    selection: Selection,
    drag: DragSession,
    undo: UndoStack,
    ids: IdGenerator,
    effects: PostEffectEngine,
    template_mode: bool,
}

impl Document {
    /// Memory-backed document holding the starter forest
    pub fn new(options: EditorOptions) -> Self {
        Self::from_forest(WebsiteData::default(), options)
    }

    pub fn from_forest(forest: WebsiteData, options: EditorOptions) -> Self {
        Self {
            version: 0,
            storage: DocumentStorage::Memory,
            forest,
            selection: Selection::default(),
            drag: DragSession::new(),
            undo: UndoStack::with_max_levels(options.undo_levels),
            ids: IdGenerator::new(&options.session_name),
            effects: PostEffectEngine::new(),
            template_mode: false,
        }
    }

    /// Memory-backed document from template JSON
    pub fn from_json(source: &str, options: EditorOptions) -> Result<Self, EditorError> {
        let forest = WebsiteData::from_json(source)?;
        Ok(Self::from_forest(forest, options))
    }

    /// Load document from file (file-backed)
    pub fn load(path: impl Into<PathBuf>, options: EditorOptions) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let mut doc = Self::from_json(&source, options)?;

        info!(path = %path.display(), tabs = doc.forest.tabs.len(), "loaded document");
        doc.storage = DocumentStorage::File { path, dirty: false };
        Ok(doc)
    }

    pub fn forest(&self) -> &WebsiteData {
        &self.forest
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }

    pub fn storage(&self) -> &DocumentStorage {
        &self.storage
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path, .. } => Some(path.as_path()),
            DocumentStorage::Memory => None,
        }
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory => false,
        }
    }

    pub fn is_template_mode(&self) -> bool {
        self.template_mode
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.forest)?)
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        let json = self.to_json()?;
        match &mut self.storage {
            DocumentStorage::File { path, dirty } => {
                std::fs::write(&*path, json)?;
                *dirty = false;
                debug!(path = %path.display(), "saved document");
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }

    /// Write to `path` and keep the document backed by it
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        self.storage = DocumentStorage::File {
            path: path.into(),
            dirty: true,
        };
        self.save()
    }

    fn mark_changed(&mut self) {
        self.version += 1;
        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }
    }

    /// Swap in `next` without recording history
    fn replace_forest(&mut self, next: WebsiteData, mutation: Option<&Mutation>) -> WebsiteData {
        let before = std::mem::replace(&mut self.forest, next);
        self.effects.settle(mutation, &before, &self.forest, &mut self.selection);
        self.mark_changed();
        before
    }

    /// Apply a mutation. An edit that yields an identical forest still
    /// settles the selection but records nothing.
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        match mutation.apply(&self.forest) {
            Ok(next) if next == self.forest => {
                self.effects.settle(Some(&mutation), &self.forest, &next, &mut self.selection);
                debug!(mutation = mutation.name(), "forest unchanged");
                MutationResult::Noop {
                    reason: MutationError::Unchanged,
                }
            }
            Ok(next) => {
                let before = self.replace_forest(next, Some(&mutation));
                self.undo.record(before, mutation.name());
                debug!(mutation = mutation.name(), version = self.version, "applied");
                MutationResult::Applied { version: self.version }
            }
            Err(reason) => {
                debug!(mutation = mutation.name(), %reason, "mutation was a no-op");
                MutationResult::Noop { reason }
            }
        }
    }

    fn fresh_component_id(&mut self) -> String {
        loop {
            let id = self.ids.next_component_id();
            if !self.forest.contains_id(&id) {
                return id;
            }
        }
    }

    fn fresh_tab_id(&mut self) -> String {
        loop {
            let id = self.ids.next_tab_id();
            if !self.forest.contains_id(&id) {
                return id;
            }
        }
    }

    /// Create a node with its palette defaults plus `overrides`.
    ///
    /// URL bars always go to the cross-tab region; header bars go there when
    /// `cross_tab` is set. Everything else is inserted into the active tab.
    /// Returns the new node's id.
    pub fn add_component(
        &mut self,
        component_type: ComponentType,
        overrides: PropsPatch,
        parent_id: Option<&str>,
        index: Option<usize>,
        cross_tab: bool,
    ) -> Result<String, MutationError> {
        let id = self.fresh_component_id();
        let to_cross_tab = component_type == ComponentType::FakeUrlBar
            || (cross_tab && component_type == ComponentType::WebsiteHeaderBar);
        let component = Component::with_defaults(id.clone(), component_type, overrides);

        let mutation = if to_cross_tab {
            Mutation::AddCrossTabComponent { component }
        } else {
            Mutation::InsertComponent {
                component,
                parent_id: parent_id.map(str::to_string),
                index,
            }
        };

        match self.apply(mutation) {
            MutationResult::Applied { .. } => Ok(id),
            MutationResult::Noop { reason } => Err(reason),
        }
    }

    pub fn remove_component(&mut self, component_id: &str) -> MutationResult {
        self.apply(Mutation::RemoveComponent {
            component_id: component_id.to_string(),
        })
    }

    /// Merge a partial prop update into a node
    pub fn update_component(&mut self, component_id: &str, props: PropsPatch) -> MutationResult {
        self.apply(Mutation::UpdateProps {
            component_id: component_id.to_string(),
            props,
        })
    }

    pub fn move_component_to_position(
        &mut self,
        component_id: &str,
        target_parent_id: Option<&str>,
        target_index: usize,
    ) -> MutationResult {
        self.apply(Mutation::MoveToPosition {
            component_id: component_id.to_string(),
            target_parent_id: target_parent_id.map(str::to_string),
            target_index,
        })
    }

    pub fn move_component(&mut self, component_id: &str, direction: Direction) -> MutationResult {
        self.apply(Mutation::MoveComponent {
            component_id: component_id.to_string(),
            direction,
        })
    }

    /// Cross-tab region first, then the active tab
    pub fn find_component(&self, component_id: &str) -> Option<&Component> {
        forest::find(&self.forest, &self.forest.active_tab_id, component_id)
    }

    /// Append a tab and switch to it. Returns the new tab's id.
    pub fn add_tab(&mut self, label: &str) -> Result<String, MutationError> {
        let tab_id = self.fresh_tab_id();
        match self.apply(Mutation::AddTab {
            tab_id: tab_id.clone(),
            label: label.to_string(),
        }) {
            MutationResult::Applied { .. } => Ok(tab_id),
            MutationResult::Noop { reason } => Err(reason),
        }
    }

    pub fn remove_tab(&mut self, tab_id: &str) -> MutationResult {
        self.apply(Mutation::RemoveTab {
            tab_id: tab_id.to_string(),
        })
    }

    pub fn update_tab(&mut self, tab_id: &str, update: TabUpdate) -> MutationResult {
        self.apply(Mutation::UpdateTab {
            tab_id: tab_id.to_string(),
            update,
        })
    }

    pub fn set_active_tab(&mut self, tab_id: &str) -> MutationResult {
        self.apply(Mutation::SetActiveTab {
            tab_id: tab_id.to_string(),
        })
    }

    pub fn set_tab_style(&mut self, style: TabStyle) -> MutationResult {
        self.apply(Mutation::SetTabStyle { style })
    }

    pub fn set_tab_sticky(&mut self, sticky: bool) -> MutationResult {
        self.apply(Mutation::SetTabSticky { sticky })
    }

    pub fn set_tab_icon(&mut self, url: Option<String>, alt: Option<String>) -> MutationResult {
        self.apply(Mutation::SetTabIcon { url, alt })
    }

    /// Replace the whole forest with a template. History starts over.
    pub fn load_template(&mut self, template: WebsiteData) -> Result<(), EditorError> {
        let template = template.normalized()?;
        self.replace_forest(template, None);
        self.undo.clear();
        self.selection.clear();
        self.template_mode = true;
        info!(tabs = self.forest.tabs.len(), "loaded template");
        Ok(())
    }

    /// Back to the starter forest, leaving template mode
    pub fn reset_to_default(&mut self) {
        self.replace_forest(WebsiteData::default(), None);
        self.undo.clear();
        self.selection.clear();
        self.template_mode = false;
    }

    pub fn select(&mut self, component_id: &str) {
        self.selection.select(component_id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn open_tab_settings(&mut self) {
        self.selection.open_tab_settings();
    }

    pub fn close_tab_settings(&mut self) {
        self.selection.close_tab_settings();
    }

    pub fn selected_component(&self) -> Option<&Component> {
        self.selection
            .selected()
            .and_then(|id| self.find_component(id))
    }

    pub fn begin_palette_drag(&mut self, component_type: ComponentType, cross_tab: bool) -> DragTransport {
        self.drag.begin_palette(component_type, cross_tab)
    }

    pub fn begin_node_drag(&mut self, component_id: &str) -> Result<DragTransport, DropRejected> {
        self.drag.begin_existing(&self.forest, component_id)
    }

    /// Preview a drop target; returns whether it would accept the drop
    pub fn hover(&mut self, target: DropTarget) -> bool {
        self.drag.hover(&self.forest, target)
    }

    /// Resolve a drop and apply it. The drag session ends either way.
    pub fn drop(&mut self, transport: &DragTransport, target: &DropTarget) -> Result<MutationResult, DropRejected> {
        let intent = self.drag.drop(&self.forest, transport, target)?;

        let inserted = match intent {
            DropIntent::Insert {
                component_type,
                parent_id,
                index,
            } => self.add_component(component_type, PropsPatch::new(), parent_id.as_deref(), index, false),
            DropIntent::InsertCrossTab { component_type } => {
                self.add_component(component_type, PropsPatch::new(), None, None, true)
            }
            DropIntent::Move {
                node_id,
                target_parent_id,
                target_index,
            } => return Ok(self.move_component_to_position(&node_id, target_parent_id.as_deref(), target_index)),
        };

        Ok(match inserted {
            Ok(_) => MutationResult::Applied { version: self.version },
            Err(reason) => MutationResult::Noop { reason },
        })
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.undo(&self.forest) {
            Some(previous) => {
                self.replace_forest(previous, None);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undo.redo(&self.forest) {
            Some(next) => {
                self.replace_forest(next, None);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: Option<&str>) {
        self.undo.begin_batch();
        if let Some(description) = description {
            self.undo.set_batch_description(description);
        }
    }

    pub fn end_batch(&mut self) {
        self.undo.end_batch();
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo.undo_description()
    }

    pub fn render<R: Render>(&self, renderer: &mut R, offsets: &StickyOffsets) -> RenderedPage<R::View> {
        render_page(&self.forest, &self.selection, offsets, renderer)
    }

    /// Layer panel rows for the active tab
    pub fn layers(&self) -> Vec<LayerEntry> {
        match self.forest.active_tab() {
            Some(tab) => layer_outline(&tab.content, &self.selection),
            None => Vec::new(),
        }
    }

    /// Layer panel rows for the cross-tab region
    pub fn cross_tab_layers(&self) -> Vec<LayerEntry> {
        layer_outline(&self.forest.cross_tab_components, &self.selection)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
