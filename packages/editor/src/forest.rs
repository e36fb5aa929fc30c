//! Component operations on a whole forest
//!
//! Each function takes the current snapshot and the tab to edit, and
//! returns the next snapshot. Tabs other than `tab_id` are shared as-is.

use crate::mutations::{Direction, MutationError};
use crate::tree;
use sitecraft_model::{Component, IdCollector, NodeRef, PropsPatch, Visitor, WebsiteData};
use std::sync::Arc;

fn tab_content<'a>(forest: &'a WebsiteData, tab_id: &str) -> Result<&'a [NodeRef], MutationError> {
    forest
        .tab(tab_id)
        .map(|tab| tab.content.as_slice())
        .ok_or_else(|| MutationError::TabNotFound(tab_id.to_string()))
}

fn replace_content(forest: &WebsiteData, tab_id: &str, content: Vec<NodeRef>) -> WebsiteData {
    let mut next = forest.clone();
    if let Some(tab) = next.tab_mut(tab_id) {
        tab.content = content;
    }
    next
}

/// First id in `node`'s subtree that the forest already uses
fn first_duplicate(forest: &WebsiteData, node: &Component, replacing: Option<&str>) -> Option<String> {
    let mut incoming = IdCollector::default();
    incoming.visit_component(node);
    if let Some(id) = incoming.duplicates.into_iter().next() {
        return Some(id);
    }

    let existing = forest.component_ids();
    let mut clashes: Vec<String> = incoming
        .ids
        .into_iter()
        .filter(|id| Some(id.as_str()) != replacing)
        .filter(|id| existing.contains(id) || forest.tab(id).is_some())
        .collect();
    clashes.sort();
    clashes.into_iter().next()
}

/// Insert `node` into `tab_id`'s tree under `parent_id` (root when absent)
/// at `index` (append when absent).
pub fn insert(
    forest: &WebsiteData,
    tab_id: &str,
    node: Component,
    parent_id: Option<&str>,
    index: Option<usize>,
) -> Result<WebsiteData, MutationError> {
    let content = tab_content(forest, tab_id)?;
    if let Some(id) = first_duplicate(forest, &node, None) {
        return Err(MutationError::DuplicateId(id));
    }

    let content = tree::insert(content, parent_id, index, Arc::new(node))?;
    Ok(replace_content(forest, tab_id, content))
}

/// Remove a node and its subtree. Cross-tab nodes are matched first.
pub fn remove(forest: &WebsiteData, tab_id: &str, node_id: &str) -> Result<WebsiteData, MutationError> {
    if let Some((cross_tab, _)) = tree::remove(&forest.cross_tab_components, node_id) {
        let mut next = forest.clone();
        next.cross_tab_components = cross_tab;
        return Ok(next);
    }

    let (content, _) = tree::remove(tab_content(forest, tab_id)?, node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    Ok(replace_content(forest, tab_id, content))
}

/// Shallow-merge `patch` into a node's props. Cross-tab nodes are matched first.
pub fn update_props(
    forest: &WebsiteData,
    tab_id: &str,
    node_id: &str,
    patch: &PropsPatch,
) -> Result<WebsiteData, MutationError> {
    if let Some(cross_tab) = tree::update_props(&forest.cross_tab_components, node_id, patch) {
        let mut next = forest.clone();
        next.cross_tab_components = cross_tab;
        return Ok(next);
    }

    let content = tree::update_props(tab_content(forest, tab_id)?, node_id, patch)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    Ok(replace_content(forest, tab_id, content))
}

/// Move an existing node of `tab_id` to `target_index` under
/// `target_parent_id` (root when `None`).
pub fn move_to_position(
    forest: &WebsiteData,
    tab_id: &str,
    node_id: &str,
    target_parent_id: Option<&str>,
    target_index: usize,
) -> Result<WebsiteData, MutationError> {
    let content = tree::move_to(tab_content(forest, tab_id)?, node_id, target_parent_id, target_index)?;
    Ok(replace_content(forest, tab_id, content))
}

/// Swap a node with its previous or next sibling
pub fn move_component(
    forest: &WebsiteData,
    tab_id: &str,
    node_id: &str,
    direction: Direction,
) -> Result<WebsiteData, MutationError> {
    let content = tree::swap_with_sibling(tab_content(forest, tab_id)?, node_id, direction)?;
    Ok(replace_content(forest, tab_id, content))
}

/// Look a node up in the cross-tab region, then in `tab_id`'s tree
pub fn find<'a>(forest: &'a WebsiteData, tab_id: &str, node_id: &str) -> Option<&'a Component> {
    tree::find(&forest.cross_tab_components, node_id)
        .or_else(|| {
            forest
                .tab(tab_id)
                .and_then(|tab| tree::find(&tab.content, node_id))
        })
        .map(|node| node.as_ref())
}

/// Add a node to the cross-tab region. A node of the same type already
/// there is replaced in place; otherwise the node is appended.
pub fn add_cross_tab_component(forest: &WebsiteData, node: Component) -> Result<WebsiteData, MutationError> {
    if !node.component_type.is_cross_tab_capable() {
        return Err(MutationError::NotCrossTab(node.component_type.to_string()));
    }

    let existing = forest
        .cross_tab_components
        .iter()
        .position(|other| other.component_type == node.component_type);
    let replacing = existing.map(|index| forest.cross_tab_components[index].id.as_str());

    if let Some(id) = first_duplicate(forest, &node, replacing) {
        return Err(MutationError::DuplicateId(id));
    }

    let mut next = forest.clone();
    match existing {
        Some(index) => next.cross_tab_components[index] = Arc::new(node),
        None => next.cross_tab_components.push(Arc::new(node)),
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitecraft_model::{ComponentType, Tab};

    fn forest() -> WebsiteData {
        let mut data = WebsiteData::single_tab("home", "Home");
        data.tabs.push(
            Tab::new("other", "Other", 2).with_content(vec![Component::new("elsewhere", ComponentType::Image)]),
        );
        data
    }

    fn url_bar(id: &str, text: &str) -> Component {
        let mut node = Component::new(id, ComponentType::FakeUrlBar);
        node.props.set("urlText", json!(text));
        node
    }

    #[test]
    fn test_scenario_flex_with_two_columns() {
        let data = forest();
        let data = insert(&data, "home", Component::new("flex", ComponentType::FlexContainer), None, Some(0)).unwrap();
        let data = insert(&data, "home", Component::new("col-1", ComponentType::Column), Some("flex"), Some(0)).unwrap();
        let data = insert(&data, "home", Component::new("col-2", ComponentType::Column), Some("flex"), Some(0)).unwrap();

        // Both columns went in at index 0, so col-2 sits ahead of col-1
        let flex = &data.tab("home").unwrap().content[0];
        assert_eq!(flex.children()[0].id, "col-2");
        let second = flex.children()[1].id.clone();
        let data = insert(&data, "home", Component::new("para", ComponentType::Paragraph), Some(second.as_str()), None).unwrap();

        let flex = &data.tab("home").unwrap().content[0];
        assert_eq!(flex.component_type, ComponentType::FlexContainer);
        assert_eq!(flex.children().len(), 2);
        assert!(flex.children()[0].children().is_empty());
        assert_eq!(flex.children()[1].children()[0].id, "para");
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let data = forest();

        // Id used in another tab
        assert_eq!(
            insert(&data, "home", Component::new("elsewhere", ComponentType::Title), None, None),
            Err(MutationError::DuplicateId("elsewhere".to_string()))
        );

        // Id repeated inside the incoming subtree
        let twin = Component::new("c", ComponentType::Column)
            .with_children(vec![Component::new("dup", ComponentType::Title), Component::new("dup", ComponentType::Title)]);
        assert_eq!(
            insert(&data, "home", twin, None, None),
            Err(MutationError::DuplicateId("dup".to_string()))
        );
    }

    #[test]
    fn test_insert_into_missing_tab() {
        assert_eq!(
            insert(&forest(), "nope", Component::new("x", ComponentType::Title), None, None),
            Err(MutationError::TabNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_edits_leave_other_tabs_shared() {
        let data = forest();
        let next = insert(&data, "home", Component::new("t", ComponentType::Title), None, None).unwrap();

        assert!(Arc::ptr_eq(&data.tabs[1].content[0], &next.tabs[1].content[0]));
    }

    #[test]
    fn test_remove_prefers_cross_tab() {
        let mut data = forest();
        data.cross_tab_components.push(Arc::new(url_bar("bar", "https://a.test")));

        let next = remove(&data, "home", "bar").unwrap();
        assert!(next.cross_tab_components.is_empty());

        assert_eq!(
            remove(&data, "home", "elsewhere"),
            Err(MutationError::NodeNotFound("elsewhere".to_string()))
        );
    }

    #[test]
    fn test_update_props_reaches_cross_tab() {
        let mut data = forest();
        data.cross_tab_components.push(Arc::new(url_bar("bar", "https://a.test")));

        let patch = PropsPatch::new().with("urlText", json!("https://b.test"));
        let next = update_props(&data, "home", "bar", &patch).unwrap();

        assert_eq!(find(&next, "home", "bar").unwrap().props.get_str("urlText"), Some("https://b.test"));
    }

    #[test]
    fn test_update_props_on_disabled_node() {
        let mut hidden = Component::new("hidden", ComponentType::Paragraph);
        hidden.props.set("enabled", json!(false));
        let data = insert(&forest(), "home", hidden, None, None).unwrap();

        let patch = PropsPatch::new().with("content", json!("still editable"));
        let next = update_props(&data, "home", "hidden", &patch).unwrap();

        let node = find(&next, "home", "hidden").unwrap();
        assert!(!node.is_visible());
        assert_eq!(node.props.get_str("content"), Some("still editable"));
    }

    #[test]
    fn test_find_searches_cross_tab_then_tab() {
        let mut data = forest();
        data.cross_tab_components.push(Arc::new(url_bar("bar", "x")));

        assert!(find(&data, "home", "bar").is_some());
        assert!(find(&data, "other", "elsewhere").is_some());
        assert!(find(&data, "home", "elsewhere").is_none());
    }

    #[test]
    fn test_cross_tab_replaces_same_type() {
        let mut data = forest();
        let header = Component::new("header", ComponentType::WebsiteHeaderBar);
        data.cross_tab_components = vec![Arc::new(url_bar("bar-1", "first")), Arc::new(header)];

        let next = add_cross_tab_component(&data, url_bar("bar-2", "second")).unwrap();

        assert_eq!(next.cross_tab_components.len(), 2);
        assert_eq!(next.cross_tab_components[0].id, "bar-2");
        assert_eq!(next.cross_tab_components[1].id, "header");
    }

    #[test]
    fn test_cross_tab_appends_new_type() {
        let data = forest();
        let next = add_cross_tab_component(&data, url_bar("bar", "x")).unwrap();
        let next = add_cross_tab_component(&next, Component::new("hdr", ComponentType::WebsiteHeaderBar)).unwrap();

        let types: Vec<_> = next.cross_tab_components.iter().map(|n| n.component_type.clone()).collect();
        assert_eq!(types, vec![ComponentType::FakeUrlBar, ComponentType::WebsiteHeaderBar]);
    }

    #[test]
    fn test_cross_tab_rejects_other_types() {
        assert_eq!(
            add_cross_tab_component(&forest(), Component::new("img", ComponentType::Image)),
            Err(MutationError::NotCrossTab("image".to_string()))
        );
    }

    #[test]
    fn test_cross_tab_replacement_may_reuse_id() {
        let mut data = forest();
        data.cross_tab_components.push(Arc::new(url_bar("bar", "old")));

        let next = add_cross_tab_component(&data, url_bar("bar", "new")).unwrap();
        assert_eq!(next.cross_tab_components[0].props.get_str("urlText"), Some("new"));
    }
}
