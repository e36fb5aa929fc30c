//! Palette defaults for freshly created components

use crate::component::ComponentType;
use crate::props::Props;
use serde_json::json;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.";

/// Props a component starts with when dropped from the palette
pub fn default_props(component_type: &ComponentType) -> Props {
    let mut props = Props::new();
    props.set("enabled", json!(true));

    let heading = |level: u8| json!(format!("Heading {}", level));

    match component_type {
        ComponentType::Title => {
            props.set("title", json!("Website Title"));
            props.set("logoUrl", json!(""));
            props.set("logoAlt", json!(""));
            props.set("headingLevel", json!("h1"));
        }
        ComponentType::Paragraph => props.set("content", json!(LOREM)),
        ComponentType::H1 => props.set("text", heading(1)),
        ComponentType::H2 => props.set("text", heading(2)),
        ComponentType::H3 => props.set("text", heading(3)),
        ComponentType::H4 => props.set("text", heading(4)),
        ComponentType::H5 => props.set("text", heading(5)),
        ComponentType::H6 => props.set("text", heading(6)),
        ComponentType::Image => {
            props.set("src", json!("https://placehold.co/400x300"));
            props.set("alt", json!("Placeholder image"));
        }
        ComponentType::BannerImage => {
            props.set("src", json!("https://placehold.co/1200x300"));
            props.set("alt", json!("Banner image"));
        }
        ComponentType::WebsiteHeaderBar => {
            props.set("headerTitle", json!("Header Title"));
            props.set("headerBackgroundColor", json!("#f0f0f0"));
            props.set("headerIconUrl", json!("/assets/images/history.png"));
            props.set("headerIconAlt", json!("History icon"));
        }
        ComponentType::FakeUrlBar => {
            props.set("urlText", json!("https://example.com"));
            props.set("visible", json!(true));
        }
        ComponentType::FlexContainer => {
            props.set("gap", json!("gap-4"));
            props.set("columnDistribution", json!("1:1"));
        }
        _ => {}
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_starts_enabled() {
        for ty in ComponentType::KNOWN.iter() {
            assert_eq!(default_props(ty).enabled(), Some(true), "{}", ty);
        }
        assert_eq!(default_props(&ComponentType::Unknown("x".into())).enabled(), Some(true));
    }

    #[test]
    fn test_type_specific_defaults() {
        assert_eq!(default_props(&ComponentType::H3).get_str("text"), Some("Heading 3"));
        assert_eq!(
            default_props(&ComponentType::FakeUrlBar).get_str("urlText"),
            Some("https://example.com")
        );
        assert_eq!(
            default_props(&ComponentType::FlexContainer).column_distribution(),
            Some("1:1")
        );
        assert_eq!(default_props(&ComponentType::Column).len(), 1);
    }
}
