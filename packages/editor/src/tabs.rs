//! # Tab container operations
//!
//! Positions stay a dense `1..=N` sequence across every operation here, and
//! `forest.tabs` is kept sorted by position.

use crate::mutations::MutationError;
use serde::{Deserialize, Serialize};
use sitecraft_model::{Tab, TabStyle, WebsiteData};
use tracing::warn;

/// Partial tab update. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl TabUpdate {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}

/// Append a new empty tab after the last position and make it active
pub fn add_tab(forest: &WebsiteData, tab_id: &str, label: &str) -> Result<WebsiteData, MutationError> {
    if forest.contains_id(tab_id) {
        return Err(MutationError::DuplicateId(tab_id.to_string()));
    }

    let mut next = forest.clone();
    next.tabs.push(Tab::new(tab_id, label, forest.max_position() + 1));
    next.active_tab_id = tab_id.to_string();
    Ok(next)
}

/// Delete a tab, renumber the rest, and re-point activation if needed
pub fn remove_tab(forest: &WebsiteData, tab_id: &str) -> Result<WebsiteData, MutationError> {
    if forest.tab(tab_id).is_none() {
        return Err(MutationError::TabNotFound(tab_id.to_string()));
    }
    if forest.tabs.len() <= 1 {
        return Err(MutationError::LastTab);
    }

    let mut next = forest.clone();
    next.tabs.retain(|tab| tab.id != tab_id);
    next.renumber_tabs();

    if next.active_tab_id == tab_id {
        next.active_tab_id = next.tabs[0].id.clone();
    }
    Ok(next)
}

pub fn update_tab(forest: &WebsiteData, tab_id: &str, update: &TabUpdate) -> Result<WebsiteData, MutationError> {
    let mut next = forest.clone();
    let count = next.tabs.len() as u32;

    let tab = next
        .tab_mut(tab_id)
        .ok_or_else(|| MutationError::TabNotFound(tab_id.to_string()))?;

    if let Some(label) = &update.label {
        tab.label = label.clone();
    }
    if let Some(name) = &update.name {
        tab.name = Some(name.clone());
    }
    if let Some(enabled) = update.enabled {
        tab.enabled = enabled;
    }

    if let Some(requested) = update.position {
        let old = tab.position;
        let target = requested.clamp(1, count.max(1));
        tab.position = target;

        // Only the occupant of the exact target slot moves
        if target != old {
            if let Some(occupant) = next
                .tabs
                .iter_mut()
                .find(|other| other.id != tab_id && other.position == target)
            {
                occupant.position = old;
            }
        }
        next.tabs.sort_by_key(|tab| tab.position);
    }

    if update.enabled == Some(false) && next.active_tab_id == tab_id {
        match next.first_enabled_tab() {
            Some(fallback) => next.active_tab_id = fallback.id.clone(),
            None => warn!(tab_id, "every tab is disabled; keeping the active tab"),
        }
    }

    Ok(next)
}

/// Switch the active tab. Disabled tabs cannot be activated.
pub fn set_active_tab(forest: &WebsiteData, tab_id: &str) -> Result<WebsiteData, MutationError> {
    let tab = forest
        .tab(tab_id)
        .ok_or_else(|| MutationError::TabNotFound(tab_id.to_string()))?;
    if !tab.enabled {
        return Err(MutationError::TabDisabled(tab_id.to_string()));
    }

    let mut next = forest.clone();
    next.active_tab_id = tab_id.to_string();
    Ok(next)
}

pub fn set_tab_style(forest: &WebsiteData, style: TabStyle) -> WebsiteData {
    let mut next = forest.clone();
    next.tab_style = Some(style);
    next
}

pub fn set_tab_sticky(forest: &WebsiteData, sticky: bool) -> WebsiteData {
    let mut next = forest.clone();
    next.tab_sticky = Some(sticky);
    next
}

/// Replace the tab bar icon. `None` clears the field.
pub fn set_tab_icon(forest: &WebsiteData, url: Option<String>, alt: Option<String>) -> WebsiteData {
    let mut next = forest.clone();
    next.tab_icon_url = url;
    next.tab_icon_alt = alt;
    next
}
