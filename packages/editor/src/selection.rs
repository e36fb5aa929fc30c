//! Selection and side panel state
//!
//! At most one node is selected across the whole forest. Opening the tab
//! bar settings and selecting a node exclude each other.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selected_component_id: Option<String>,
    pub show_tab_settings: bool,
}

impl Selection {
    /// Select a node, closing the tab settings panel
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected_component_id = Some(id.into());
        self.show_tab_settings = false;
    }

    /// Show the tab bar settings, dropping any node selection
    pub fn open_tab_settings(&mut self) {
        self.selected_component_id = None;
        self.show_tab_settings = true;
    }

    pub fn close_tab_settings(&mut self) {
        self.show_tab_settings = false;
    }

    pub fn clear(&mut self) {
        self.selected_component_id = None;
        self.show_tab_settings = false;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected_component_id.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_closes_settings() {
        let mut selection = Selection::default();
        selection.open_tab_settings();
        selection.select("p-1");

        assert!(selection.is_selected("p-1"));
        assert!(!selection.show_tab_settings);
    }

    #[test]
    fn test_settings_clear_selection() {
        let mut selection = Selection::default();
        selection.select("p-1");
        selection.open_tab_settings();

        assert_eq!(selection.selected(), None);
        assert!(selection.show_tab_settings);

        selection.close_tab_settings();
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_reselect_replaces() {
        let mut selection = Selection::default();
        selection.select("a");
        selection.select("b");

        assert!(!selection.is_selected("a"));
        assert!(selection.is_selected("b"));
    }
}
