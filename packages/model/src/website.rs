//! # Website forest
//!
//! [`WebsiteData`] is the whole editable state: every tab's tree, the
//! cross-tab region rendered above every tab, and the tab bar settings.
//! Its JSON form is the interchange format used by template loading and
//! export.

use crate::component::{Component, ComponentType, NodeRef};
use crate::error::{ModelError, ModelResult};
use crate::visitor::{IdCollector, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

fn default_true() -> bool {
    true
}

/// One tab and the layout tree it holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,

    pub label: String,

    #[serde(default)]
    pub content: Vec<NodeRef>,

    /// Custom layer name for the tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// 1-based rank in the tab bar. Zero means "not assigned yet".
    #[serde(default)]
    pub position: u32,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: Vec::new(),
            name: None,
            enabled: true,
            position,
        }
    }

    pub fn with_content(mut self, content: Vec<Component>) -> Self {
        self.content = content.into_iter().map(NodeRef::new).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Visual style of the tab bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStyle {
    #[default]
    Line,
    Classic,
}

/// The full editable forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteData {
    pub tabs: Vec<Tab>,

    pub active_tab_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_style: Option<TabStyle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_sticky: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_icon_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_icon_alt: Option<String>,

    /// Nodes rendered identically above every tab (URL bar, header bar)
    #[serde(default)]
    pub cross_tab_components: Vec<NodeRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_tab_bar: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_toolbar: Option<bool>,
}

impl WebsiteData {
    /// Forest with a single empty tab
    pub fn single_tab(id: impl Into<String>, label: impl Into<String>) -> Self {
        let tab = Tab::new(id, label, 1);
        Self {
            active_tab_id: tab.id.clone(),
            tabs: vec![tab],
            tab_style: None,
            tab_sticky: None,
            tab_icon_url: None,
            tab_icon_alt: None,
            cross_tab_components: Vec::new(),
            hide_tab_bar: None,
            hide_toolbar: None,
        }
    }

    /// Parse and normalize a template
    pub fn from_json(source: &str) -> ModelResult<Self> {
        let data: WebsiteData = serde_json::from_str(source)?;
        data.normalized()
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Template normalization: fill missing positions from list order, sort
    /// by position, renumber densely from 1, and point `active_tab_id` at a
    /// real tab.
    pub fn normalized(mut self) -> ModelResult<Self> {
        if self.tabs.is_empty() {
            return Err(ModelError::NoTabs);
        }

        for (index, tab) in self.tabs.iter_mut().enumerate() {
            if tab.position == 0 {
                tab.position = index as u32 + 1;
            }
        }
        self.renumber_tabs();

        if self.tab(&self.active_tab_id).is_none() {
            self.active_tab_id = self.tabs[0].id.clone();
        }

        Ok(self)
    }

    /// Stable-sort tabs by position and reassign positions `1..=N`
    pub fn renumber_tabs(&mut self) {
        self.tabs.sort_by_key(|tab| tab.position);
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            tab.position = index as u32 + 1;
        }
    }

    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == tab_id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tab(&self.active_tab_id)
    }

    /// Lowest-positioned tab that is not disabled
    pub fn first_enabled_tab(&self) -> Option<&Tab> {
        self.tabs
            .iter()
            .filter(|tab| tab.enabled)
            .min_by_key(|tab| tab.position)
    }

    pub fn max_position(&self) -> u32 {
        self.tabs.iter().map(|tab| tab.position).max().unwrap_or(0)
    }

    /// Every node id across all tabs and the cross-tab region
    pub fn component_ids(&self) -> HashSet<String> {
        let mut collector = IdCollector::default();
        collector.visit_forest(self);
        collector.ids
    }

    /// Whether any node or tab in the forest already uses `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.tabs.iter().any(|tab| tab.id == id) || self.component_ids().contains(id)
    }

    pub fn cross_tab_of_type(&self, component_type: &ComponentType) -> Option<&NodeRef> {
        self.cross_tab_components
            .iter()
            .find(|node| &node.component_type == component_type)
    }
}

impl Default for WebsiteData {
    /// Starter forest shown before any template is loaded
    fn default() -> Self {
        let mut url_bar = Component::new("fake-url-bar-1", ComponentType::FakeUrlBar);
        url_bar.props.set("urlText", json!("https://example.com"));
        url_bar.props.set("visible", json!(true));
        url_bar.props.set("enabled", json!(true));

        Self {
            tabs: vec![
                Tab::new("tab-introduction", "Introduction", 1),
                Tab::new("tab-about", "About", 2),
                Tab::new("tab-history", "History", 3).disabled(),
            ],
            active_tab_id: "tab-introduction".to_string(),
            tab_style: None,
            tab_sticky: None,
            tab_icon_url: None,
            tab_icon_alt: None,
            cross_tab_components: vec![url_bar.into_ref()],
            hide_tab_bar: None,
            hide_toolbar: None,
        }
    }
}
