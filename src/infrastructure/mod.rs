//! Infrastructure layer: boundary traits towards the tree model and matching engine

pub mod error;
pub mod traits;

pub use error::{MatchError, MatchResult};
pub use traits::{Matcher, TreeModel};
