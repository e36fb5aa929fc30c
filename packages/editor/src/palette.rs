//! Component palette entries offered as drag sources

use crate::drag::DragSource;
use serde::Serialize;
use sitecraft_model::ComponentType;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaletteCategory {
    Layout,
    Content,
    WebsiteSpecific,
}

impl PaletteCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PaletteCategory::Layout => "Layout",
            PaletteCategory::Content => "Content",
            PaletteCategory::WebsiteSpecific => "Website Specific Components",
        }
    }
}

impl fmt::Display for PaletteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub component_type: ComponentType,
    pub label: &'static str,
    pub category: PaletteCategory,
    pub is_cross_tab: bool,
}

impl PaletteEntry {
    fn new(component_type: ComponentType, category: PaletteCategory) -> Self {
        Self {
            label: static_label(&component_type),
            component_type,
            category,
            is_cross_tab: false,
        }
    }

    fn cross_tab(mut self) -> Self {
        self.is_cross_tab = true;
        self
    }

    pub fn drag_source(&self) -> DragSource {
        DragSource::PaletteNew {
            component_type: self.component_type.clone(),
            is_cross_tab: self.is_cross_tab,
        }
    }
}

fn static_label(component_type: &ComponentType) -> &'static str {
    match component_type {
        ComponentType::FlexContainer => "Flex Container",
        ComponentType::Column => "Column",
        ComponentType::Title => "Title",
        ComponentType::Paragraph => "Paragraph",
        ComponentType::Image => "Image",
        ComponentType::BannerImage => "Banner Image",
        ComponentType::WebsiteHeaderBar => "Website Header Bar",
        ComponentType::FakeUrlBar => "Fake URL Bar",
        _ => "Component",
    }
}

/// Palette entries in display order
pub fn palette() -> Vec<PaletteEntry> {
    use PaletteCategory::*;

    vec![
        PaletteEntry::new(ComponentType::FlexContainer, Layout),
        PaletteEntry::new(ComponentType::Column, Layout),
        PaletteEntry::new(ComponentType::Title, Content),
        PaletteEntry::new(ComponentType::Paragraph, Content),
        PaletteEntry::new(ComponentType::Image, Content),
        PaletteEntry::new(ComponentType::BannerImage, Content),
        PaletteEntry::new(ComponentType::WebsiteHeaderBar, Content),
        PaletteEntry::new(ComponentType::WebsiteHeaderBar, WebsiteSpecific).cross_tab(),
        PaletteEntry::new(ComponentType::FakeUrlBar, WebsiteSpecific).cross_tab(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_categories() {
        let entries = palette();
        assert_eq!(entries.len(), 9);

        let layout: Vec<_> = entries
            .iter()
            .filter(|e| e.category == PaletteCategory::Layout)
            .map(|e| e.label)
            .collect();
        assert_eq!(layout, vec!["Flex Container", "Column"]);
    }

    #[test]
    fn test_cross_tab_entries_only_in_website_section() {
        for entry in palette() {
            assert_eq!(entry.is_cross_tab, entry.category == PaletteCategory::WebsiteSpecific);
            if entry.is_cross_tab {
                assert!(entry.component_type.is_cross_tab_capable());
            }
        }
    }

    #[test]
    fn test_entry_drag_source() {
        let url_bar = palette().pop().unwrap();
        assert_eq!(
            url_bar.drag_source(),
            DragSource::PaletteNew {
                component_type: ComponentType::FakeUrlBar,
                is_cross_tab: true,
            }
        );
    }
}
