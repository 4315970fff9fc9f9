//! # StyleKit
//!
//! Style property editing on top of the [`vds`] grammar engine. A
//! [`PropertyEditor`] looks a property up in the static property table and
//! turns its value definition syntax into slot option tables and
//! validated edits.
//!
//! ```rust
//! use stylekit_rs::{PropertyEditor, vds::standard_context};
//!
//! let editor = PropertyEditor::new(standard_context(), "aspect-ratio").unwrap();
//! assert_eq!(editor.apply("16", 1, "9").unwrap(), "16 / 9");
//! ```

pub mod editor;
pub mod error;
pub mod log_init;
pub mod properties;

pub use vds;

pub use editor::PropertyEditor;
pub use error::{Result, StyleKitError};
pub use log_init::init_logger;
pub use properties::{PROPERTIES, StyleDefinition, properties, property};
