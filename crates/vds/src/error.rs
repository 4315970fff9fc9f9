//! Error types for grammar expansion and value editing.
//!
//! Two kinds of failure flow through this type. Configuration errors
//! (cyclic token definitions, malformed grammars, missing defaults) mean the
//! static catalog is broken. The remaining variants describe expected
//! conditions during editing, and callers are expected to branch on them
//! and fall back to a plain text editor.

use thiserror::Error;

/// Errors produced by the value definition syntax engine.
///
/// # Examples
///
/// ```rust
/// use vds::{standard_context, split, VdsError};
///
/// let ctx = standard_context();
/// let fragments = split("10px");
/// let result = vds::apply_slot_edit(ctx, "auto | <color>", &fragments, 0, "10px");
/// assert!(matches!(result, Err(VdsError::NoMatchingVariant(_))));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VdsError {
    /// A token reference has no registered definition.
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Expanding a token reached the same token again.
    ///
    /// `chain` lists the tokens on the expansion stack, outermost first.
    #[error("Cyclic token definition for {token}: {}", chain.join(" -> "))]
    CyclicTokenDefinition { token: String, chain: Vec<String> },

    /// A value fragment matched none of the registered token types.
    #[error("Unclassifiable value: {0}")]
    UnclassifiableValue(String),

    /// The value matches no expanded variant, not even as a prefix.
    #[error("No variant of the grammar matches value: {0}")]
    NoMatchingVariant(String),

    /// The grammar string itself could not be parsed.
    #[error("Grammar syntax error: {0}")]
    InvalidSyntax(String),

    /// An `||` or `&&` group has more operands than the configured limit.
    #[error("Combinator group has {operands} operands, limit is {limit}")]
    TooManyOperands { operands: usize, limit: usize },

    /// An edit targeted a slot past the "add next value" position.
    #[error("Slot {slot} is out of range for a value with {len} fragments")]
    SlotOutOfRange { slot: usize, len: usize },

    /// A primitive token has no default literal to back-fill with.
    #[error("No default value registered for token {0}")]
    MissingDefault(String),

    /// The same token key was registered twice.
    #[error("Token {0} is already registered")]
    DuplicateToken(String),

    /// No token type claims a registered primitive token.
    #[error("No token type owns token {0}")]
    UnknownTokenType(String),
}

pub type Result<T> = std::result::Result<T, VdsError>;
