//! # Render boundary
//!
//! The editor never builds markup itself. [`render_page`] walks the visible
//! part of the forest and hands each node, with its already rendered
//! children, to a [`Render`] implementation supplied by the host.
//!
//! Nodes with `enabled: false` and everything beneath them are never passed
//! to the renderer. Neither are nodes of unrecognised type.

use crate::selection::Selection;
use sitecraft_model::{Component, ComponentType, NodeRef, WebsiteData};

/// Per-node facts the renderer cannot derive from the node alone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderContext<'a> {
    pub selected: bool,
    pub parent_id: Option<&'a str>,
    /// Index among the column siblings of a flex container
    pub column_index: Option<usize>,
    /// The parent flex container's `columnDistribution`, for columns only
    pub parent_distribution: Option<&'a str>,
    pub sticky: bool,
    pub sticky_top: Option<&'a str>,
}

impl RenderContext<'_> {
    /// Flex weight of a column under its parent's distribution
    pub fn flex_weight(&self) -> Option<f64> {
        flex_weight(self.parent_distribution?, self.column_index?)
    }
}

/// Host-supplied view builder
pub trait Render {
    type View;

    fn render(&mut self, node: &Component, ctx: &RenderContext<'_>, children: Vec<Self::View>) -> Self::View;
}

/// Sticky `top` offsets measured by the host layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickyOffsets {
    pub url_bar: Option<String>,
    pub header_bar: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage<V> {
    pub cross_tab: Vec<V>,
    pub content: Vec<V>,
}

/// Weight of column `column_index` in a `"1:2:1"` style distribution.
/// Blank or non-numeric parts are skipped.
pub fn flex_weight(distribution: &str, column_index: usize) -> Option<f64> {
    distribution
        .split(':')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<f64>().ok())
        .nth(column_index)
}

fn is_sticky(node: &Component) -> bool {
    match node.component_type {
        ComponentType::FakeUrlBar => node.props.url_bar_sticky(),
        ComponentType::WebsiteHeaderBar => node.props.header_bar_sticky(),
        _ => false,
    }
}

struct PageWalker<'a, R> {
    renderer: &'a mut R,
    selection: &'a Selection,
    offsets: &'a StickyOffsets,
}

impl<'a, R: Render> PageWalker<'a, R> {
    fn render_list(&mut self, nodes: &[NodeRef], parent: Option<&Component>) -> Vec<R::View> {
        let distribution = parent
            .filter(|parent| parent.component_type == ComponentType::FlexContainer)
            .and_then(|parent| parent.props.column_distribution());

        let selection = self.selection;
        let offsets = self.offsets;
        let mut column_counter = 0;
        let mut views = Vec::with_capacity(nodes.len());

        for node in nodes {
            // Disabled columns still take their slot in the distribution
            let column_index = (node.component_type == ComponentType::Column && parent.is_some()).then(|| {
                column_counter += 1;
                column_counter - 1
            });

            if !node.is_visible() || node.component_type.is_unknown() {
                continue;
            }

            let sticky = is_sticky(node);
            let sticky_top = match (&node.component_type, sticky) {
                (ComponentType::FakeUrlBar, true) => offsets.url_bar.as_deref(),
                (ComponentType::WebsiteHeaderBar, true) => offsets.header_bar.as_deref(),
                _ => None,
            };

            let ctx = RenderContext {
                selected: selection.is_selected(&node.id),
                parent_id: parent.map(|parent| parent.id.as_str()),
                column_index,
                parent_distribution: column_index.and(distribution),
                sticky,
                sticky_top,
            };

            let children = self.render_list(node.children(), Some(node.as_ref()));
            views.push(self.renderer.render(node, &ctx, children));
        }

        views
    }
}

/// Render the cross-tab region and the active tab
pub fn render_page<R: Render>(
    forest: &WebsiteData,
    selection: &Selection,
    offsets: &StickyOffsets,
    renderer: &mut R,
) -> RenderedPage<R::View> {
    let mut walker = PageWalker {
        renderer,
        selection,
        offsets,
    };

    let cross_tab = walker.render_list(&forest.cross_tab_components, None);
    let content = match forest.active_tab() {
        Some(tab) => walker.render_list(&tab.content, None),
        None => Vec::new(),
    };

    RenderedPage { cross_tab, content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitecraft_model::Tab;
    use std::sync::Arc;

    /// Renders `type#id[children]` and records every context it saw
    #[derive(Default)]
    struct Outline {
        seen: Vec<(String, bool, Option<usize>, Option<f64>, bool, Option<String>)>,
    }

    impl Render for Outline {
        type View = String;

        fn render(&mut self, node: &Component, ctx: &RenderContext<'_>, children: Vec<String>) -> String {
            self.seen.push((
                node.id.clone(),
                ctx.selected,
                ctx.column_index,
                ctx.flex_weight(),
                ctx.sticky,
                ctx.sticky_top.map(str::to_string),
            ));
            if children.is_empty() {
                format!("{}#{}", node.component_type, node.id)
            } else {
                format!("{}#{}[{}]", node.component_type, node.id, children.join(","))
            }
        }
    }

    fn forest() -> WebsiteData {
        let mut hidden = Component::new("col-2", ComponentType::Column)
            .with_children(vec![Component::new("p-hidden", ComponentType::Paragraph)]);
        hidden.props.set("enabled", json!(false));

        let mut flex = Component::new("flex", ComponentType::FlexContainer).with_children(vec![
            Component::new("col-1", ComponentType::Column)
                .with_children(vec![Component::new("p-1", ComponentType::Paragraph)]),
            hidden,
            Component::new("col-3", ComponentType::Column),
        ]);
        flex.props.set("columnDistribution", json!("1:2:3"));

        let mut url_bar = Component::new("url", ComponentType::FakeUrlBar);
        url_bar.props.set("urlBarSticky", json!(true));

        let mut data = WebsiteData::single_tab("home", "Home");
        data.tabs[0] = Tab::new("home", "Home", 1).with_content(vec![
            flex,
            Component::new("odd", ComponentType::from("mapEmbed".to_string())),
        ]);
        data.cross_tab_components.push(Arc::new(url_bar));
        data
    }

    #[test]
    fn test_flex_weight() {
        assert_eq!(flex_weight("1:2:1", 1), Some(2.0));
        assert_eq!(flex_weight(" 1 : x : 3 ", 1), Some(3.0));
        assert_eq!(flex_weight("1:2", 2), None);
        assert_eq!(flex_weight("", 0), None);
    }

    #[test]
    fn test_disabled_subtrees_are_never_rendered() {
        let mut outline = Outline::default();
        let page = render_page(&forest(), &Selection::default(), &StickyOffsets::default(), &mut outline);

        assert_eq!(page.content, vec!["flexContainer#flex[column#col-1[paragraph#p-1],column#col-3]"]);
        assert!(outline.seen.iter().all(|(id, ..)| id != "col-2" && id != "p-hidden" && id != "odd"));
    }

    #[test]
    fn test_columns_keep_distribution_slot() {
        let mut outline = Outline::default();
        render_page(&forest(), &Selection::default(), &StickyOffsets::default(), &mut outline);

        let col_3 = outline.seen.iter().find(|(id, ..)| id == "col-3").unwrap();
        assert_eq!(col_3.2, Some(2));
        assert_eq!(col_3.3, Some(3.0));

        let paragraph = outline.seen.iter().find(|(id, ..)| id == "p-1").unwrap();
        assert_eq!(paragraph.2, None);
    }

    #[test]
    fn test_cross_tab_sticky_and_selection() {
        let mut selection = Selection::default();
        selection.select("p-1");
        let offsets = StickyOffsets {
            url_bar: Some("0px".to_string()),
            header_bar: None,
        };

        let mut outline = Outline::default();
        let page = render_page(&forest(), &selection, &offsets, &mut outline);
        assert_eq!(page.cross_tab, vec!["fakeURLBar#url"]);

        let url = outline.seen.iter().find(|(id, ..)| id == "url").unwrap();
        assert!(url.4);
        assert_eq!(url.5.as_deref(), Some("0px"));

        let paragraph = outline.seen.iter().find(|(id, ..)| id == "p-1").unwrap();
        assert!(paragraph.1);
    }
}
