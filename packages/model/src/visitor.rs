use crate::component::Component;
use crate::website::{Tab, WebsiteData};
use std::collections::HashSet;

/// Visitor pattern for traversing a website forest immutably
///
/// Default implementations walk the whole forest depth-first, pre-order:
/// the cross-tab region first, then every tab in list order, children in
/// their stored order. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_forest(&mut self, forest: &WebsiteData) {
        walk_forest(self, forest);
    }

    fn visit_tab(&mut self, tab: &Tab) {
        walk_tab(self, tab);
    }

    fn visit_component(&mut self, component: &Component) {
        walk_component(self, component);
    }
}

pub fn walk_forest<V: Visitor>(visitor: &mut V, forest: &WebsiteData) {
    for component in &forest.cross_tab_components {
        visitor.visit_component(component);
    }
    for tab in &forest.tabs {
        visitor.visit_tab(tab);
    }
}

pub fn walk_tab<V: Visitor>(visitor: &mut V, tab: &Tab) {
    for component in &tab.content {
        visitor.visit_component(component);
    }
}

pub fn walk_component<V: Visitor>(visitor: &mut V, component: &Component) {
    for child in component.children() {
        visitor.visit_component(child);
    }
}

/// Collects every component id it sees
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: HashSet<String>,
    /// Ids seen more than once
    pub duplicates: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_component(&mut self, component: &Component) {
        if !self.ids.insert(component.id.clone()) {
            self.duplicates.push(component.id.clone());
        }
        walk_component(self, component);
    }
}

/// Counts components, optionally only the visible ones
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub visible_only: bool,
    pub count: usize,
}

impl Visitor for NodeCounter {
    fn visit_component(&mut self, component: &Component) {
        if self.visible_only && !component.is_visible() {
            return;
        }
        self.count += 1;
        walk_component(self, component);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use serde_json::json;

    fn sample() -> WebsiteData {
        let mut hidden = Component::new("col-b", ComponentType::Column);
        hidden.props.set("enabled", json!(false));
        let hidden = hidden.with_children(vec![Component::new("p-2", ComponentType::Paragraph)]);

        let flex = Component::new("flex", ComponentType::FlexContainer).with_children(vec![
            Component::new("col-a", ComponentType::Column)
                .with_children(vec![Component::new("p-1", ComponentType::Paragraph)]),
            hidden,
        ]);

        let mut data = WebsiteData::single_tab("t1", "Home");
        data.tabs[0] = data.tabs[0].clone().with_content(vec![flex]);
        data
    }

    #[test]
    fn test_id_collector_walks_everything() {
        let mut collector = IdCollector::default();
        collector.visit_forest(&sample());

        assert_eq!(collector.ids.len(), 5);
        assert!(collector.ids.contains("p-2"));
        assert!(collector.duplicates.is_empty());
    }

    #[test]
    fn test_counter_skips_disabled_subtrees() {
        let data = sample();

        let mut all = NodeCounter::default();
        all.visit_forest(&data);
        assert_eq!(all.count, 5);

        let mut visible = NodeCounter { visible_only: true, count: 0 };
        visible.visit_forest(&data);
        assert_eq!(visible.count, 3);
    }
}
