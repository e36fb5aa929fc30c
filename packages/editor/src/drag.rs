//! # Drag-and-drop session
//!
//! Pointer drags are modelled as a small state machine:
//!
//! ```text
//! Idle --begin_palette / begin_existing--> Dragging --drop / cancel / end--> Idle
//! ```
//!
//! Hovering only records the highlighted target. The only thing carried from
//! drag start to drop is a [`DragTransport`] bag, and [`resolve_drop`] turns
//! that bag plus the release target into a [`DropIntent`] for the tree model.
//!
//! ## Resolution rules
//!
//! - A payload with a type and no id inserts a new node; cross-tab payloads
//!   and URL bars go to the cross-tab region
//! - A payload with an id moves that node
//! - Dropping on a container makes the node its last child
//! - Dropping on any other node makes it a sibling at that node's index
//! - Disabled nodes, and anything beneath them, accept nothing

use crate::tree;
use serde::{Deserialize, Serialize};
use sitecraft_model::{ComponentType, NodeRef, WebsiteData};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, trace};

pub const KEY_COMPONENT_TYPE: &str = "componentType";
pub const KEY_COMPONENT_ID: &str = "componentId";
pub const KEY_IS_CROSS_TAB: &str = "isCrossTab";

/// Flat string bag handed from drag start to drop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragTransport(BTreeMap<String, String>);

impl DragTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`. Empty strings read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|value| value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DragTransport {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A new component from the palette
    PaletteNew {
        component_type: ComponentType,
        is_cross_tab: bool,
    },

    /// A node already in the layer tree
    ExistingNode {
        node_id: String,
        node_type: ComponentType,
    },
}

impl DragSource {
    pub fn to_transport(&self) -> DragTransport {
        let mut transport = DragTransport::new();
        match self {
            DragSource::PaletteNew { component_type, is_cross_tab } => {
                transport.set(KEY_COMPONENT_TYPE, component_type.as_str());
                if *is_cross_tab {
                    transport.set(KEY_IS_CROSS_TAB, "true");
                }
            }
            DragSource::ExistingNode { node_id, node_type } => {
                transport.set(KEY_COMPONENT_ID, node_id.as_str());
                transport.set(KEY_COMPONENT_TYPE, node_type.as_str());
            }
        }
        transport
    }

    /// `None` when the bag carries neither an id nor a type
    pub fn from_transport(transport: &DragTransport) -> Option<Self> {
        let component_type = transport
            .get(KEY_COMPONENT_TYPE)
            .map(|name| ComponentType::from(name.to_string()));

        if let Some(node_id) = transport.get(KEY_COMPONENT_ID) {
            return Some(DragSource::ExistingNode {
                node_id: node_id.to_string(),
                node_type: component_type.unwrap_or_else(|| ComponentType::Unknown(String::new())),
            });
        }

        component_type.map(|component_type| DragSource::PaletteNew {
            component_type,
            is_cross_tab: transport.get(KEY_IS_CROSS_TAB) == Some("true"),
        })
    }
}

/// Where the pointer was released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropTarget {
    /// Onto a node of the active tab
    Node(String),

    /// Into the gap before `index` under `parent_id` (root when absent)
    Gap {
        #[serde(default)]
        parent_id: Option<String>,
        index: usize,
    },

    /// Anywhere on the page outside a node: append to the root list
    Canvas,
}

/// What a drop asks the tree model to do
#[derive(Debug, Clone, PartialEq)]
pub enum DropIntent {
    Insert {
        component_type: ComponentType,
        parent_id: Option<String>,
        index: Option<usize>,
    },

    InsertCrossTab { component_type: ComponentType },

    Move {
        node_id: String,
        target_parent_id: Option<String>,
        target_index: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DropRejected {
    #[error("Drag payload carries no component")]
    EmptyPayload,

    #[error("Dragged node not found: {0}")]
    UnknownSource(String),

    #[error("Drop target not found: {0}")]
    UnknownTarget(String),

    #[error("Drop target is disabled: {0}")]
    Disabled(String),

    #[error("Node dropped onto itself: {0}")]
    OntoSelf(String),

    #[error("Node dropped into its own subtree: {0}")]
    IntoOwnSubtree(String),

    #[error("Drop target cannot hold children: {0}")]
    NotAContainer(String),

    #[error("{parent} does not accept {child}")]
    NotAccepted { parent: String, child: String },
}

/// Insertion point a target resolves to
struct Placement {
    parent: Option<NodeRef>,
    index: Option<usize>,
    onto: Option<String>,
}

impl Placement {
    fn parent_id(&self) -> Option<String> {
        self.parent.as_ref().map(|node| node.id.clone())
    }
}

/// Nodes from the root down to `id`, or `UnknownTarget`. Refuses when any of
/// them is disabled.
fn visible_path(content: &[NodeRef], id: &str) -> Result<Vec<NodeRef>, DropRejected> {
    let path = tree::path_to(content, id).ok_or_else(|| DropRejected::UnknownTarget(id.to_string()))?;
    match path.iter().find(|node| !node.is_visible()) {
        Some(disabled) => Err(DropRejected::Disabled(disabled.id.clone())),
        None => Ok(path),
    }
}

fn placement(content: &[NodeRef], target: &DropTarget) -> Result<Placement, DropRejected> {
    match target {
        DropTarget::Canvas => Ok(Placement {
            parent: None,
            index: None,
            onto: None,
        }),

        DropTarget::Gap { parent_id: None, index } => Ok(Placement {
            parent: None,
            index: Some(*index),
            onto: None,
        }),

        DropTarget::Gap { parent_id: Some(parent_id), index } => {
            let path = visible_path(content, parent_id)?;
            let parent = path.last().cloned().ok_or_else(|| DropRejected::UnknownTarget(parent_id.clone()))?;
            if !parent.is_container() {
                return Err(DropRejected::NotAContainer(parent_id.clone()));
            }
            Ok(Placement {
                parent: Some(parent),
                index: Some(*index),
                onto: None,
            })
        }

        DropTarget::Node(id) => {
            let mut path = visible_path(content, id)?;
            let node = path.pop().ok_or_else(|| DropRejected::UnknownTarget(id.clone()))?;

            if node.is_container() {
                return Ok(Placement {
                    index: Some(node.children().len()),
                    parent: Some(node),
                    onto: Some(id.clone()),
                });
            }

            let parent = path.pop();
            let siblings = match &parent {
                Some(parent) => parent.children(),
                None => content,
            };
            let index = siblings.iter().position(|sibling| sibling.id == *id);
            Ok(Placement {
                parent,
                index,
                onto: Some(id.clone()),
            })
        }
    }
}

fn check_accepts(placement: &Placement, child: &ComponentType) -> Result<(), DropRejected> {
    match &placement.parent {
        Some(parent) if !parent.component_type.accepts_child(child) => Err(DropRejected::NotAccepted {
            parent: parent.component_type.to_string(),
            child: child.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Turn a released drag into an edit against the forest's active tab
pub fn resolve_drop(
    forest: &WebsiteData,
    transport: &DragTransport,
    target: &DropTarget,
) -> Result<DropIntent, DropRejected> {
    let source = DragSource::from_transport(transport).ok_or(DropRejected::EmptyPayload)?;
    let content = forest
        .active_tab()
        .map(|tab| tab.content.as_slice())
        .unwrap_or(&[]);
    let placement = placement(content, target)?;

    match source {
        DragSource::PaletteNew { component_type, is_cross_tab } => {
            if component_type == ComponentType::FakeUrlBar
                || (is_cross_tab && component_type.is_cross_tab_capable())
            {
                return Ok(DropIntent::InsertCrossTab { component_type });
            }

            check_accepts(&placement, &component_type)?;
            Ok(DropIntent::Insert {
                component_type,
                parent_id: placement.parent_id(),
                index: placement.index,
            })
        }

        DragSource::ExistingNode { node_id, .. } => {
            if placement.onto.as_deref() == Some(node_id.as_str()) {
                return Err(DropRejected::OntoSelf(node_id));
            }

            let node = tree::find(content, &node_id).ok_or_else(|| DropRejected::UnknownSource(node_id.clone()))?;
            if let Some(parent) = &placement.parent {
                if tree::subtree_contains(node, &parent.id) {
                    return Err(DropRejected::IntoOwnSubtree(node_id));
                }
            }
            check_accepts(&placement, &node.component_type)?;

            let target_index = placement.index.unwrap_or_else(|| match &placement.parent {
                Some(parent) => parent.children().len(),
                None => content.len(),
            });

            Ok(DropIntent::Move {
                target_parent_id: placement.parent_id(),
                node_id,
                target_index,
            })
        }
    }
}

/// Session state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        hover: Option<DropTarget>,
    },
}

/// Ephemeral drag state owned by the document controller
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<&DragSource> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Start dragging a palette entry
    pub fn begin_palette(&mut self, component_type: ComponentType, is_cross_tab: bool) -> DragTransport {
        self.begin(DragSource::PaletteNew {
            component_type,
            is_cross_tab,
        })
    }

    /// Start dragging a node of the active tab. Disabled nodes stay put.
    pub fn begin_existing(&mut self, forest: &WebsiteData, node_id: &str) -> Result<DragTransport, DropRejected> {
        let node = forest
            .active_tab()
            .and_then(|tab| tree::find(&tab.content, node_id))
            .ok_or_else(|| DropRejected::UnknownSource(node_id.to_string()))?;
        if !node.is_visible() {
            return Err(DropRejected::Disabled(node_id.to_string()));
        }

        Ok(self.begin(DragSource::ExistingNode {
            node_id: node.id.clone(),
            node_type: node.component_type.clone(),
        }))
    }

    fn begin(&mut self, source: DragSource) -> DragTransport {
        trace!(?source, "drag start");
        let transport = source.to_transport();
        self.state = DragState::Dragging { source, hover: None };
        transport
    }

    /// Preview a target. It is highlighted only when a drop there would be
    /// accepted; returns whether it was.
    pub fn hover(&mut self, forest: &WebsiteData, target: DropTarget) -> bool {
        let DragState::Dragging { source, hover } = &mut self.state else {
            return false;
        };

        let accepted = resolve_drop(forest, &source.to_transport(), &target).is_ok();
        *hover = accepted.then_some(target);
        accepted
    }

    pub fn highlighted(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging { hover, .. } => hover.as_ref(),
            DragState::Idle => None,
        }
    }

    /// The node being dragged renders dimmed
    pub fn is_dimmed(&self, id: &str) -> bool {
        matches!(
            &self.state,
            DragState::Dragging { source: DragSource::ExistingNode { node_id, .. }, .. } if node_id == id
        )
    }

    /// Release over `target`. The session ends whether or not the drop is
    /// accepted.
    pub fn drop(
        &mut self,
        forest: &WebsiteData,
        transport: &DragTransport,
        target: &DropTarget,
    ) -> Result<DropIntent, DropRejected> {
        let resolved = resolve_drop(forest, transport, target);
        if let Err(reason) = &resolved {
            debug!(%reason, "drop rejected");
        }
        self.end();
        resolved
    }

    /// Drag ended without a drop
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.end();
        was_dragging
    }

    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}
