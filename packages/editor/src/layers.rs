//! Layer panel outline: a flattened, depth-annotated view of a tree

use crate::selection::Selection;
use serde::Serialize;
use sitecraft_model::{ComponentType, NodeRef};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerEntry {
    pub id: String,
    pub component_type: ComponentType,
    pub label: String,
    pub depth: usize,
    pub index: usize,
    pub parent_id: Option<String>,
    pub enabled: bool,
    pub container: bool,
    pub selected: bool,
}

/// Pre-order listing of `nodes`, disabled nodes included
pub fn layer_outline(nodes: &[NodeRef], selection: &Selection) -> Vec<LayerEntry> {
    let mut entries = Vec::new();
    collect(nodes, None, 0, selection, &mut entries);
    entries
}

fn collect(
    nodes: &[NodeRef],
    parent_id: Option<&str>,
    depth: usize,
    selection: &Selection,
    entries: &mut Vec<LayerEntry>,
) {
    for (index, node) in nodes.iter().enumerate() {
        entries.push(LayerEntry {
            id: node.id.clone(),
            component_type: node.component_type.clone(),
            label: node.display_name().to_string(),
            depth,
            index,
            parent_id: parent_id.map(str::to_string),
            enabled: node.is_visible(),
            container: node.is_container(),
            selected: selection.is_selected(&node.id),
        });
        collect(node.children(), Some(&node.id), depth + 1, selection, entries);
    }
}
