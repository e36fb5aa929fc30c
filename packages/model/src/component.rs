//! # Components
//!
//! A component is one typed node of a tab's layout tree. Nodes never point
//! back at their parent; parent and sibling index are recovered by search.
//!
//! Children are held behind [`NodeRef`] (`Arc<Component>`) so that each edit
//! produces a new forest which shares every untouched subtree with the
//! previous one.

use crate::props::{Props, PropsPatch};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Shared handle to an immutable component subtree
pub type NodeRef = Arc<Component>;

/// Every component type the editor knows about
///
/// Types read from a template that the editor does not recognise are kept as
/// [`ComponentType::Unknown`] and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Tab,
    FlexContainer,
    Column,
    Title,
    Paragraph,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Image,
    BannerImage,
    Card,
    FakeUrlBar,
    WebsiteHeaderBar,
    SidebarPage,
    SidebarColumn,
    SidebarContent,
    Unknown(String),
}

impl ComponentType {
    /// All known types, in palette order
    pub const KNOWN: [ComponentType; 19] = [
        ComponentType::Tab,
        ComponentType::FlexContainer,
        ComponentType::Column,
        ComponentType::Title,
        ComponentType::Paragraph,
        ComponentType::H1,
        ComponentType::H2,
        ComponentType::H3,
        ComponentType::H4,
        ComponentType::H5,
        ComponentType::H6,
        ComponentType::Image,
        ComponentType::BannerImage,
        ComponentType::Card,
        ComponentType::FakeUrlBar,
        ComponentType::WebsiteHeaderBar,
        ComponentType::SidebarPage,
        ComponentType::SidebarColumn,
        ComponentType::SidebarContent,
    ];

    /// Wire name used in templates and drag transports
    pub fn as_str(&self) -> &str {
        match self {
            ComponentType::Tab => "tab",
            ComponentType::FlexContainer => "flexContainer",
            ComponentType::Column => "column",
            ComponentType::Title => "title",
            ComponentType::Paragraph => "paragraph",
            ComponentType::H1 => "h1",
            ComponentType::H2 => "h2",
            ComponentType::H3 => "h3",
            ComponentType::H4 => "h4",
            ComponentType::H5 => "h5",
            ComponentType::H6 => "h6",
            ComponentType::Image => "image",
            ComponentType::BannerImage => "bannerImage",
            ComponentType::Card => "card",
            ComponentType::FakeUrlBar => "fakeURLBar",
            ComponentType::WebsiteHeaderBar => "websiteHeaderBar",
            ComponentType::SidebarPage => "sidebarPage",
            ComponentType::SidebarColumn => "sidebarColumn",
            ComponentType::SidebarContent => "sidebarContent",
            ComponentType::Unknown(name) => name,
        }
    }

    /// Human readable label, as shown in the palette and layer list
    pub fn label(&self) -> &str {
        match self {
            ComponentType::Tab => "Tab",
            ComponentType::FlexContainer => "Flex Container",
            ComponentType::Column => "Column",
            ComponentType::Title => "Title",
            ComponentType::Paragraph => "Paragraph",
            ComponentType::H1 => "Heading 1",
            ComponentType::H2 => "Heading 2",
            ComponentType::H3 => "Heading 3",
            ComponentType::H4 => "Heading 4",
            ComponentType::H5 => "Heading 5",
            ComponentType::H6 => "Heading 6",
            ComponentType::Image => "Image",
            ComponentType::BannerImage => "Banner Image",
            ComponentType::Card => "Card",
            ComponentType::FakeUrlBar => "Fake URL Bar",
            ComponentType::WebsiteHeaderBar => "Website Header Bar",
            ComponentType::SidebarPage => "Sidebar Page",
            ComponentType::SidebarColumn => "Sidebar Column",
            ComponentType::SidebarContent => "Sidebar Content",
            ComponentType::Unknown(name) => name,
        }
    }

    /// Container types are the only ones allowed to own children
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ComponentType::FlexContainer
                | ComponentType::Column
                | ComponentType::Card
                | ComponentType::SidebarPage
                | ComponentType::SidebarColumn
        )
    }

    /// Types that may live in the cross-tab region
    pub fn is_cross_tab_capable(&self) -> bool {
        matches!(self, ComponentType::FakeUrlBar | ComponentType::WebsiteHeaderBar)
    }

    /// Whether a node of this type takes `child` when something is dropped on it.
    ///
    /// Cards only hold text content.
    pub fn accepts_child(&self, child: &ComponentType) -> bool {
        match self {
            ComponentType::Card => matches!(child, ComponentType::Title | ComponentType::Paragraph),
            other => other.is_container(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ComponentType::Unknown(_))
    }
}

impl From<String> for ComponentType {
    fn from(value: String) -> Self {
        ComponentType::KNOWN
            .iter()
            .find(|ty| ty.as_str() == value)
            .cloned()
            .unwrap_or(ComponentType::Unknown(value))
    }
}

impl From<ComponentType> for String {
    fn from(value: ComponentType) -> Self {
        match value {
            ComponentType::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ComponentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ComponentType::from(s.to_string()))
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: ComponentType,

    #[serde(default)]
    pub props: Props,

    /// Present only for container types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeRef>>,
}

impl Component {
    /// Create a bare node. Container types get an empty children list.
    pub fn new(id: impl Into<String>, component_type: ComponentType) -> Self {
        let children = component_type.is_container().then(Vec::new);
        Self {
            id: id.into(),
            component_type,
            props: Props::default(),
            children,
        }
    }

    /// Create a node carrying the palette defaults for its type, with
    /// `overrides` merged on top.
    pub fn with_defaults(
        id: impl Into<String>,
        component_type: ComponentType,
        overrides: PropsPatch,
    ) -> Self {
        let mut node = Self::new(id, component_type);
        node.props = crate::defaults::default_props(&node.component_type);
        node.props.merge(overrides);
        node
    }

    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = Some(children.into_iter().map(Arc::new).collect());
        self
    }

    pub fn is_container(&self) -> bool {
        self.component_type.is_container()
    }

    /// Disabled nodes stay in the tree but are never rendered
    pub fn is_visible(&self) -> bool {
        self.props.enabled() != Some(false)
    }

    pub fn children(&self) -> &[NodeRef] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Layer name: the user supplied `name` prop, falling back to the type label
    pub fn display_name(&self) -> &str {
        self.props.name().unwrap_or_else(|| self.component_type.label())
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_wire_names() {
        assert_eq!(ComponentType::FakeUrlBar.as_str(), "fakeURLBar");
        assert_eq!("fakeURLBar".parse::<ComponentType>().unwrap(), ComponentType::FakeUrlBar);
        assert_eq!("flexContainer".parse::<ComponentType>().unwrap(), ComponentType::FlexContainer);

        for ty in ComponentType::KNOWN.iter() {
            assert_eq!(&ComponentType::from(ty.as_str().to_string()), ty);
        }
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let node: Component = serde_json::from_value(json!({
            "id": "x-1",
            "type": "carousel",
            "props": { "speed": 3 }
        }))
        .unwrap();

        assert_eq!(node.component_type, ComponentType::Unknown("carousel".to_string()));
        assert!(!node.is_container());

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["type"], "carousel");
        assert_eq!(back["props"]["speed"], 3);
        assert!(back.get("children").is_none());
    }

    #[test]
    fn test_container_types() {
        let containers: Vec<_> = ComponentType::KNOWN.iter().filter(|t| t.is_container()).collect();
        assert_eq!(
            containers,
            vec![
                &ComponentType::FlexContainer,
                &ComponentType::Column,
                &ComponentType::Card,
                &ComponentType::SidebarPage,
                &ComponentType::SidebarColumn,
            ]
        );

        assert!(Component::new("c", ComponentType::Column).children.is_some());
        assert!(Component::new("p", ComponentType::Paragraph).children.is_none());
    }

    #[test]
    fn test_card_accepts_text_only() {
        assert!(ComponentType::Card.accepts_child(&ComponentType::Title));
        assert!(ComponentType::Card.accepts_child(&ComponentType::Paragraph));
        assert!(!ComponentType::Card.accepts_child(&ComponentType::Image));
        assert!(ComponentType::Column.accepts_child(&ComponentType::Image));
        assert!(!ComponentType::Paragraph.accepts_child(&ComponentType::Title));
    }

    #[test]
    fn test_visibility_follows_enabled_prop() {
        let mut node = Component::new("p", ComponentType::Paragraph);
        assert!(node.is_visible());

        node.props.set("enabled", json!(false));
        assert!(!node.is_visible());

        node.props.set("enabled", json!(true));
        assert!(node.is_visible());
    }

    #[test]
    fn test_display_name_prefers_name_prop() {
        let mut node = Component::new("f", ComponentType::FlexContainer);
        assert_eq!(node.display_name(), "Flex Container");

        node.props.set("name", json!("Hero row"));
        assert_eq!(node.display_name(), "Hero row");
    }
}
