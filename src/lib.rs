//! Chainable, jQuery-style queries over document tree nodes.
//!
//! Start from one or more nodes, narrow the selection with selector strings,
//! extract text or attribute values, and address the result by index or range:
//!
//! ```ignore
//! let matcher = TagMatcher::new();
//! let page = Selection::new(&doc, &matcher, doc.root().unwrap());
//! let titles = page.query("h1")?;
//! println!("{} -> {:?}", titles.text(), titles.attr("id"));
//! ```
//!
//! The tree and the selector-matching engine are external collaborators,
//! reached through [`TreeModel`] and [`Matcher`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use application::{
    Property, PropertyResolver, PropertyValue, Selection, SelectionError, SelectionResult,
    SettingsError,
};
pub use config::Settings;
pub use domain::{Document, NodeId, NodeSet};
pub use infrastructure::{MatchError, Matcher, TreeModel};
