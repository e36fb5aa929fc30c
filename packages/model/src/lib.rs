//! # Sitecraft Model
//!
//! Data model of the layout editor: typed components arranged in ordered
//! trees, tabs that each own one tree, and the cross-tab region.
//!
//! ```text
//! WebsiteData
//!  ├─ cross_tab_components: [fakeURLBar, websiteHeaderBar]
//!  └─ tabs: [Tab { content: [Component { children: [...] }] }, ...]
//! ```
//!
//! Everything here is plain data. Edits live in `sitecraft-editor`.

pub mod component;
pub mod defaults;
pub mod error;
pub mod id_generator;
pub mod props;
pub mod visitor;
pub mod website;

pub use component::{Component, ComponentType, NodeRef};
pub use defaults::default_props;
pub use error::{ModelError, ModelResult};
pub use id_generator::IdGenerator;
pub use props::{Props, PropsPatch};
pub use visitor::{IdCollector, NodeCounter, Visitor};
pub use website::{Tab, TabStyle, WebsiteData};
