//! # VDS - CSS Value Definition Syntax Engine
//!
//! Expands W3C-style value definition grammars such as
//! `auto | <length-percentage [0,∞]> | min-content` into the concrete value
//! shapes they allow, classifies the fragments of a value being edited, and
//! maps that value onto per-slot option menus.
//!
//! - **Expansion**: every combinator-free variant of a grammar, with its
//!   canonical form and separators
//! - **Classification**: which token a fragment like `10px` or
//!   `fit-content(10px)` instantiates
//! - **Slots**: the options legal at each fragment position, and the single
//!   edit entry point [`apply_slot_edit`]
//!
//! ## Quick Start
//!
//! ```rust
//! use vds::{apply_slot_edit, build_slot_options, expand, split, standard_context};
//!
//! let ctx = standard_context();
//!
//! let expansion = expand(ctx, "<length> | auto").unwrap();
//! assert_eq!(expansion.variants_canonical(), vec!["auto", "<length>"]);
//!
//! let table = build_slot_options(ctx, "<length> <color>?", "10px").unwrap();
//! assert_eq!(table.len(), 2);
//!
//! let value = apply_slot_edit(ctx, "<length> <color>?", &split("10px"), 1, "red").unwrap();
//! assert_eq!(value, "10px red");
//! ```
//!
//! ## Grammar
//!
//! Combinators, lowest precedence first: `,` (list), `|` (exactly one),
//! `||` (any non-empty subset, any order), `&&` (all, any order) and
//! juxtaposition (sequence, `/` as a slash separator). Bracket groups
//! `[ … ]` and the multipliers `?`, `*`, `+`, `#` and `{m,n}` are supported;
//! unbounded repetition is capped by [`ExpansionLimits::max_repeat`].
//!
//! ## Modules
//!
//! - [`lexer`]: Syntax string lexing
//! - [`tokens`]: Token registry, references, categories and the catalog
//! - [`grammar`]: Combinator tree and variant expansion
//! - [`value`]: Value splitting, joining and classification
//! - [`slots`]: Slot matching and option tables
//! - [`context`]: Grammar context, limits and the expansion cache
//! - [`separator`]: Fragment separators
//! - [`error`]: Error types

pub mod context;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod separator;
pub mod slots;
pub mod tokens;
pub mod value;

pub use context::{
    ExpansionLimits, GrammarContext, GrammarContextBuilder, OPERAND_CEILING, standard_context,
};
pub use error::{Result, VdsError};
pub use grammar::{Expansion, Variant, expand};
pub use separator::{Separator, Separators};
pub use slots::{SlotTable, apply_slot_edit, build_slot_options};
pub use tokens::{
    OptionDefinition, OptionKind, Range, TokenDefinition, TokenParams, TokenRef, TokenRegistry,
    TokenType, TokenTypeRegistry, canonicalize, extract_params,
};
pub use value::{
    Classification, SplitValue, classify_fragment, classify_fragments, join, pick_default_category,
    separators_of, split, split_value,
};
