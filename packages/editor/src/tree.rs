//! # Tree algorithms
//!
//! Pure operations over an ordered list of root nodes (a tab's content, a
//! container's children, or the cross-tab region).
//!
//! Every walk is depth-first, pre-order and stable, so sibling indices mean
//! the same thing to every operation. Nothing is mutated in place: each edit
//! returns a new list in which only the nodes on the path to the edit are
//! rebuilt. All other subtrees are shared with the input through their
//! [`NodeRef`].

use crate::mutations::{Direction, MutationError};
use sitecraft_model::{Component, NodeRef, PropsPatch};
use std::sync::Arc;

/// Where a node sits: its parent (`None` for a root) and sibling index
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub parent_id: Option<String>,
    pub index: usize,
    pub node: NodeRef,
}

/// First node with `id`, searching depth-first
pub fn find<'a>(nodes: &'a [NodeRef], id: &str) -> Option<&'a NodeRef> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Parent id and index of the node with `id`
pub fn locate(nodes: &[NodeRef], id: &str) -> Option<Location> {
    locate_in(nodes, None, id)
}

fn locate_in(nodes: &[NodeRef], parent_id: Option<&str>, id: &str) -> Option<Location> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            return Some(Location {
                parent_id: parent_id.map(str::to_string),
                index,
                node: Arc::clone(node),
            });
        }
        if let Some(location) = locate_in(node.children(), Some(&node.id), id) {
            return Some(location);
        }
    }
    None
}

/// Nodes from the root down to `id`, inclusive
pub fn path_to(nodes: &[NodeRef], id: &str) -> Option<Vec<NodeRef>> {
    for node in nodes {
        if node.id == id {
            return Some(vec![Arc::clone(node)]);
        }
        if let Some(mut path) = path_to(node.children(), id) {
            path.insert(0, Arc::clone(node));
            return Some(path);
        }
    }
    None
}

/// Whether `id` is `node` itself or anywhere beneath it
pub fn subtree_contains(node: &Component, id: &str) -> bool {
    node.id == id || find(node.children(), id).is_some()
}

fn with_children(node: &Component, children: Vec<NodeRef>) -> Component {
    Component {
        id: node.id.clone(),
        component_type: node.component_type.clone(),
        props: node.props.clone(),
        children: Some(children),
    }
}

fn splice(list: &[NodeRef], index: Option<usize>, node: NodeRef) -> Vec<NodeRef> {
    let mut next = list.to_vec();
    match index {
        Some(index) => next.insert(index.min(next.len()), node),
        None => next.push(node),
    }
    next
}

/// Replace the node with `id` by `f(node)`, rebuilding only its ancestors.
///
/// Returns `Ok(None)` when `id` is not in `nodes`.
pub fn rewrite<F>(nodes: &[NodeRef], id: &str, f: &mut F) -> Result<Option<Vec<NodeRef>>, MutationError>
where
    F: FnMut(&Component) -> Result<Component, MutationError>,
{
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            Some(f(node.as_ref())?)
        } else if let Some(children) = rewrite(node.children(), id, f)? {
            Some(with_children(node, children))
        } else {
            None
        };

        if let Some(replacement) = replacement {
            let mut next = nodes.to_vec();
            next[index] = Arc::new(replacement);
            return Ok(Some(next));
        }
    }
    Ok(None)
}

/// Splice `node` into `parent`'s children. A container without a children
/// list gets one.
fn insert_child(parent: &Component, index: Option<usize>, node: NodeRef) -> Result<Component, MutationError> {
    if !parent.is_container() {
        return Err(MutationError::NotAContainer(parent.id.clone()));
    }
    Ok(with_children(parent, splice(parent.children(), index, node)))
}

/// Insert `node` under `parent_id` (or at the root) at `index`, appending
/// when no index is given. Indices past the end append.
pub fn insert(
    nodes: &[NodeRef],
    parent_id: Option<&str>,
    index: Option<usize>,
    node: NodeRef,
) -> Result<Vec<NodeRef>, MutationError> {
    match parent_id {
        None => Ok(splice(nodes, index, node)),
        Some(parent_id) => rewrite(nodes, parent_id, &mut |parent| {
            insert_child(parent, index, Arc::clone(&node))
        })?
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string())),
    }
}

/// Cut the node with `id` out of the tree, wherever it is
pub fn remove(nodes: &[NodeRef], id: &str) -> Option<(Vec<NodeRef>, NodeRef)> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            let mut next = nodes.to_vec();
            let removed = next.remove(index);
            return Some((next, removed));
        }
        if let Some((children, removed)) = remove(node.children(), id) {
            let mut next = nodes.to_vec();
            next[index] = Arc::new(with_children(node, children));
            return Some((next, removed));
        }
    }
    None
}

/// Shallow-merge `patch` into the props of the node with `id`
pub fn update_props(nodes: &[NodeRef], id: &str, patch: &PropsPatch) -> Option<Vec<NodeRef>> {
    let mut merge = |node: &Component| -> Result<Component, MutationError> {
        let mut updated = node.clone();
        updated.props = node.props.merged(patch);
        Ok(updated)
    };
    rewrite(nodes, id, &mut merge).ok().flatten()
}

/// Relocate an existing node to `target_index` under `target_parent_id`
/// (`None` = root).
///
/// Within the same parent, a node moving forward lands one slot earlier
/// than `target_index`: removing it first shifts every later sibling left.
pub fn move_to(
    nodes: &[NodeRef],
    id: &str,
    target_parent_id: Option<&str>,
    target_index: usize,
) -> Result<Vec<NodeRef>, MutationError> {
    let location = locate(nodes, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    // Validate the destination before cutting so a rejected move never loses the node
    if let Some(parent_id) = target_parent_id {
        if parent_id == id {
            return Err(MutationError::OntoSelf(id.to_string()));
        }
        if subtree_contains(&location.node, parent_id) {
            return Err(MutationError::CycleDetected);
        }
        let parent = find(nodes, parent_id)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
        if !parent.is_container() {
            return Err(MutationError::NotAContainer(parent_id.to_string()));
        }
    }

    let (without, node) = remove(nodes, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    let same_parent = location.parent_id.as_deref() == target_parent_id;
    let adjusted_index = if same_parent && location.index < target_index {
        target_index - 1
    } else {
        target_index
    };

    insert(&without, target_parent_id, Some(adjusted_index), node)
}

/// Swap the node with its previous or next sibling
pub fn swap_with_sibling(nodes: &[NodeRef], id: &str, direction: Direction) -> Result<Vec<NodeRef>, MutationError> {
    let location = locate(nodes, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
    let index = location.index;

    let swap = |siblings: &[NodeRef]| -> Result<Vec<NodeRef>, MutationError> {
        let other = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&next| next < siblings.len()),
        }
        .ok_or_else(|| MutationError::AtBoundary(id.to_string()))?;

        let mut next = siblings.to_vec();
        next.swap(index, other);
        Ok(next)
    };

    match location.parent_id {
        None => swap(nodes),
        Some(parent_id) => rewrite(nodes, &parent_id, &mut |parent| {
            Ok(with_children(parent, swap(parent.children())?))
        })?
        .ok_or(MutationError::NodeNotFound(parent_id)),
    }
}
