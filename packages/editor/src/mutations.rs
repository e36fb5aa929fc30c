//! # Forest Mutations
//!
//! Semantic edits to a website forest.
//!
//! ## Design Principles
//!
//! 1. **Pure**: `apply` takes the current forest and returns the next one;
//!    the input snapshot is never touched
//! 2. **Signaled no-ops**: a stale reference or a guarded invariant yields a
//!    [`MutationError`] and the caller keeps the forest it had
//! 3. **Active tab**: component edits target the forest's active tab, with
//!    the cross-tab region searched first where the source editor did so
//!
//! ## Mutation Semantics
//!
//! ### MoveToPosition
//! - Cut and paste of an existing node
//! - Same-parent forward moves land one slot before `target_index`
//! - Refused when the node is missing, the destination is missing, not a
//!   container, or inside the node being moved
//!
//! ### UpdateProps
//! - Shallow merge; `null` clears a key
//!
//! ### RemoveComponent
//! - Removes the node and all of its descendants

use crate::forest;
use crate::tabs::{self, TabUpdate};
use serde::{Deserialize, Serialize};
use sitecraft_model::{Component, PropsPatch, TabStyle, WebsiteData};
use thiserror::Error;

/// Direction of a one-step sibling swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Semantic mutations of the forest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new node into the active tab
    InsertComponent {
        component: Component,
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Remove a node (cross-tab region first, then the active tab)
    RemoveComponent { component_id: String },

    /// Merge a partial prop update into a node
    UpdateProps {
        component_id: String,
        props: PropsPatch,
    },

    /// Relocate an existing node inside the active tab
    MoveToPosition {
        component_id: String,
        #[serde(default)]
        target_parent_id: Option<String>,
        target_index: usize,
    },

    /// Swap a node with its neighbouring sibling
    MoveComponent {
        component_id: String,
        direction: Direction,
    },

    /// Add to the cross-tab region, replacing a node of the same type
    AddCrossTabComponent { component: Component },

    AddTab { tab_id: String, label: String },

    RemoveTab { tab_id: String },

    UpdateTab { tab_id: String, update: TabUpdate },

    SetActiveTab { tab_id: String },

    SetTabStyle { style: TabStyle },

    SetTabSticky { sticky: bool },

    SetTabIcon {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: Option<String>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Tab not found: {0}")]
    TabNotFound(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Node cannot hold children: {0}")]
    NotAContainer(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Node cannot be moved onto itself: {0}")]
    OntoSelf(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Cannot remove the last tab")]
    LastTab,

    #[error("Tab is disabled: {0}")]
    TabDisabled(String),

    #[error("Component type cannot live across tabs: {0}")]
    NotCrossTab(String),

    #[error("Node is already at the edge of its list: {0}")]
    AtBoundary(String),

    #[error("Edit leaves the forest unchanged")]
    Unchanged,
}

impl Mutation {
    /// Apply against `forest`, returning the next snapshot
    pub fn apply(&self, forest: &WebsiteData) -> Result<WebsiteData, MutationError> {
        let active = forest.active_tab_id.as_str();

        match self {
            Mutation::InsertComponent { component, parent_id, index } => {
                forest::insert(forest, active, component.clone(), parent_id.as_deref(), *index)
            }

            Mutation::RemoveComponent { component_id } => forest::remove(forest, active, component_id),

            Mutation::UpdateProps { component_id, props } => {
                forest::update_props(forest, active, component_id, props)
            }

            Mutation::MoveToPosition { component_id, target_parent_id, target_index } => {
                forest::move_to_position(forest, active, component_id, target_parent_id.as_deref(), *target_index)
            }

            Mutation::MoveComponent { component_id, direction } => {
                forest::move_component(forest, active, component_id, *direction)
            }

            Mutation::AddCrossTabComponent { component } => {
                forest::add_cross_tab_component(forest, component.clone())
            }

            Mutation::AddTab { tab_id, label } => tabs::add_tab(forest, tab_id, label),

            Mutation::RemoveTab { tab_id } => tabs::remove_tab(forest, tab_id),

            Mutation::UpdateTab { tab_id, update } => tabs::update_tab(forest, tab_id, update),

            Mutation::SetActiveTab { tab_id } => tabs::set_active_tab(forest, tab_id),

            Mutation::SetTabStyle { style } => Ok(tabs::set_tab_style(forest, *style)),

            Mutation::SetTabSticky { sticky } => Ok(tabs::set_tab_sticky(forest, *sticky)),

            Mutation::SetTabIcon { url, alt } => Ok(tabs::set_tab_icon(forest, url.clone(), alt.clone())),
        }
    }

    /// Debug name for logs and undo descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertComponent { .. } => "insert_component",
            Mutation::RemoveComponent { .. } => "remove_component",
            Mutation::UpdateProps { .. } => "update_props",
            Mutation::MoveToPosition { .. } => "move_to_position",
            Mutation::MoveComponent { .. } => "move_component",
            Mutation::AddCrossTabComponent { .. } => "add_cross_tab_component",
            Mutation::AddTab { .. } => "add_tab",
            Mutation::RemoveTab { .. } => "remove_tab",
            Mutation::UpdateTab { .. } => "update_tab",
            Mutation::SetActiveTab { .. } => "set_active_tab",
            Mutation::SetTabStyle { .. } => "set_tab_style",
            Mutation::SetTabSticky { .. } => "set_tab_sticky",
            Mutation::SetTabIcon { .. } => "set_tab_icon",
        }
    }
}

/// Outcome of applying a mutation through a [`crate::Document`]
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// The forest changed; `version` is the new document version
    Applied { version: u64 },

    /// Nothing happened; the forest is exactly as before
    Noop { reason: MutationError },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }
}
