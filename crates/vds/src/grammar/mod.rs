//! Grammar expansion.
//!
//! Turns a raw value definition syntax into the ordered list of concrete,
//! combinator-free [`Variant`]s it allows:
//!
//! ```rust
//! use vds::standard_context;
//!
//! let expansion = vds::expand(standard_context(), "auto | <length> <length>").unwrap();
//! assert_eq!(
//!     expansion.variants_canonical(),
//!     vec!["auto".to_string(), "<length> <length>".to_string()]
//! );
//! ```
//!
//! ## Submodules
//!
//! - [`tree`]: Combinator precedence and the syntax tree
//! - [`expand`]: Tree to variant expansion (cross products, permutations)

pub mod expand;
pub mod tree;

use std::fmt;
use std::sync::Arc;

use crate::context::GrammarContext;
use crate::error::Result;
use crate::grammar::expand::{Expander, join_tokens, normalize};
use crate::separator::Separator;
use crate::tokens::{Range, TokenRef};

/// One concrete reading of a grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Raw token references in order, e.g. `<number [0,∞]>`.
    pub tokens: Vec<String>,
    /// Canonical form of each token, e.g. `<number>`.
    pub canonical: Vec<String>,
    /// Effective numeric range of each token, when it carries one.
    pub ranges: Vec<Option<Range>>,
    /// Separator between token `i` and `i + 1`.
    pub separators: Vec<Separator>,
}

impl Variant {
    pub(crate) fn from_tokens(tokens: Vec<String>, separators: Vec<Separator>) -> Result<Self> {
        let mut canonical = Vec::with_capacity(tokens.len());
        let mut ranges = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let reference = TokenRef::parse(token)?;
            canonical.push(reference.canonical());
            ranges.push(reference.range());
        }
        Ok(Self {
            tokens,
            canonical,
            ranges,
            separators,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The variant as written, e.g. `<number [0,∞]> / <number [0,∞]>`.
    pub fn parsed(&self) -> String {
        join_tokens(&self.tokens, &self.separators)
    }

    /// The canonical form used for matching, e.g. `<number> / <number>`.
    pub fn canonical_form(&self) -> String {
        join_tokens(&self.canonical, &self.separators)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parsed())
    }
}

/// Every variant of one raw syntax string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expansion {
    pub syntax: String,
    pub variants: Vec<Variant>,
    /// Unregistered tokens referenced by the syntax.
    pub unknown_tokens: Vec<String>,
    /// The syntax referenced unknown tokens and was left unexpanded.
    pub opaque: bool,
    /// Variants were dropped to stay within `max_variants`.
    pub truncated: bool,
}

impl Expansion {
    pub fn variants_parsed(&self) -> Vec<String> {
        self.variants.iter().map(Variant::parsed).collect()
    }

    pub fn variants_canonical(&self) -> Vec<String> {
        self.variants.iter().map(Variant::canonical_form).collect()
    }

    pub fn separators_per_variant(&self) -> Vec<Vec<Separator>> {
        self.variants
            .iter()
            .map(|variant| variant.separators.clone())
            .collect()
    }
}

/// Expands `syntax` into its variants, memoized per context.
pub fn expand(ctx: &GrammarContext, syntax: &str) -> Result<Arc<Expansion>> {
    ctx.cached(syntax, || expand_uncached(ctx, syntax))
}

fn expand_uncached(ctx: &GrammarContext, syntax: &str) -> Result<Expansion> {
    let source = syntax.trim();
    let mut expansion = Expansion {
        syntax: source.to_string(),
        ..Expansion::default()
    };
    if source.is_empty() {
        return Ok(expansion);
    }

    let substitution = ctx.tokens().substitute(source)?;
    if !substitution.unknown_tokens.is_empty() {
        log::warn!(
            "grammar `{}` references unknown tokens {:?}; leaving it unexpanded",
            source,
            substitution.unknown_tokens
        );
        expansion.variants = vec![Variant {
            tokens: vec![source.to_string()],
            canonical: vec![source.to_string()],
            ranges: vec![None],
            separators: Vec::new(),
        }];
        expansion.unknown_tokens = substitution.unknown_tokens;
        expansion.opaque = true;
        return Ok(expansion);
    }

    let root = tree::parse(&substitution.items)?;
    let mut expander = Expander::new(ctx.limits());
    let pieces = expander.expand(&root)?;
    expansion.truncated = expander.truncated();

    for piece in &pieces {
        let (tokens, separators) = normalize(piece);
        if tokens.is_empty() {
            continue;
        }
        expansion
            .variants
            .push(Variant::from_tokens(tokens, separators)?);
    }
    log::trace!(
        "grammar `{}` expanded to {} variants",
        source,
        expansion.variants.len()
    );
    Ok(expansion)
}
