//! Concrete values: splitting, joining and classification.
//!
//! ## Submodules
//!
//! - [`split`]: Top-level fragment splitting and separator-aware joining
//! - [`classify`]: Fragment to token classification

pub mod classify;
pub mod split;

pub use classify::{Classification, classify_fragment, classify_fragments, pick_default_category};
pub use split::{SplitValue, join, separators_of, split, split_value};
