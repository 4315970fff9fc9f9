//! Grammar context: registries, limits and the expansion cache.
//!
//! A [`GrammarContext`] bundles everything expansion and classification
//! need. It is built once and only read afterwards; the memo cache is the
//! one piece of interior mutability and is keyed by raw syntax string.
//!
//! ```rust
//! use vds::{ExpansionLimits, GrammarContext, TokenDefinition};
//!
//! let ctx = GrammarContext::builder()
//!     .with_standard_types()
//!     .with_standard_tokens()
//!     .token(TokenDefinition::new("<inset>", "<length> <length>?"))
//!     .limits(ExpansionLimits { max_repeat: 2, ..ExpansionLimits::default() })
//!     .build()
//!     .unwrap();
//! assert!(ctx.tokens().contains("<inset>"));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::error::{Result, VdsError};
use crate::grammar::{self, Expansion};
use crate::tokens::{TokenDefinition, TokenRegistry, TokenType, TokenTypeRegistry};

/// Hard ceiling on [`ExpansionLimits::max_operands`]. `||` over `n` operands
/// enumerates `2^n - 1` subsets and their orderings.
pub const OPERAND_CEILING: usize = 8;

/// Bounds on grammar expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Largest operand count accepted for `||` and `&&` groups. Clamped to
    /// [`OPERAND_CEILING`] when the context is built.
    pub max_operands: usize,
    /// Largest number of variants kept for any one expansion step.
    pub max_variants: usize,
    /// Upper bound substituted for unbounded multipliers.
    pub max_repeat: usize,
    /// Whether expansions are memoized per raw syntax string.
    pub memoize: bool,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_operands: 4,
            max_variants: 4096,
            max_repeat: 4,
            memoize: true,
        }
    }
}

/// Token registry, token type registry and limits, passed by reference into
/// every engine call.
#[derive(Debug)]
pub struct GrammarContext {
    tokens: TokenRegistry,
    types: TokenTypeRegistry,
    limits: ExpansionLimits,
    cache: RwLock<HashMap<String, Arc<Expansion>>>,
}

impl GrammarContext {
    pub fn builder() -> GrammarContextBuilder {
        GrammarContextBuilder::default()
    }

    /// The built-in CSS catalog with the standard token types.
    pub fn standard() -> Self {
        Self::from_parts(
            TokenRegistry::builtin(),
            TokenTypeRegistry::standard(),
            ExpansionLimits::default(),
        )
    }

    fn from_parts(tokens: TokenRegistry, types: TokenTypeRegistry, limits: ExpansionLimits) -> Self {
        Self {
            tokens,
            types,
            limits,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    pub fn types(&self) -> &TokenTypeRegistry {
        &self.types
    }

    pub fn limits(&self) -> &ExpansionLimits {
        &self.limits
    }

    /// The token type owning a canonical token, or `None` when the token is
    /// unknown and the grammar branch must be treated as opaque.
    pub fn classify_token(&self, canonical: &str) -> Option<&dyn TokenType> {
        self.types.owner(canonical, &self.tokens)
    }

    pub fn default_value(&self, canonical: &str) -> Option<String> {
        self.tokens.default_value(canonical)
    }

    /// Expands `syntax` into its variants. See [`grammar::expand`].
    pub fn expand(&self, syntax: &str) -> Result<Arc<Expansion>> {
        grammar::expand(self, syntax)
    }

    /// Looks `syntax` up in the memo cache, computing and storing it on a
    /// miss. Errors are never cached.
    pub(crate) fn cached<F>(&self, syntax: &str, compute: F) -> Result<Arc<Expansion>>
    where
        F: FnOnce() -> Result<Expansion>,
    {
        if !self.limits.memoize {
            return compute().map(Arc::new);
        }

        if let Ok(cache) = self.cache.read() {
            if let Some(expansion) = cache.get(syntax) {
                log::debug!("expansion cache hit for `{}`", syntax);
                return Ok(Arc::clone(expansion));
            }
        }

        log::debug!("expansion cache miss for `{}`", syntax);
        let expansion = Arc::new(compute()?);
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(syntax.to_string(), Arc::clone(&expansion));
        }
        Ok(expansion)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }
}

/// Builder for a [`GrammarContext`] with custom tokens or token types.
#[derive(Debug, Default)]
pub struct GrammarContextBuilder {
    tokens: Vec<TokenDefinition>,
    types: TokenTypeRegistry,
    limits: ExpansionLimits,
}

impl GrammarContextBuilder {
    /// Adds the built-in token types, in classification order.
    pub fn with_standard_types(mut self) -> Self {
        for token_type in TokenTypeRegistry::standard().into_types() {
            self.types.register(token_type);
        }
        self
    }

    /// Adds every token of the built-in catalog.
    pub fn with_standard_tokens(mut self) -> Self {
        self.tokens.extend(TokenRegistry::builtin().iter().cloned());
        self
    }

    pub fn token(mut self, definition: TokenDefinition) -> Self {
        self.tokens.push(definition);
        self
    }

    pub fn token_type(mut self, token_type: Arc<dyn TokenType>) -> Self {
        self.types.register(token_type);
        self
    }

    pub fn limits(mut self, limits: ExpansionLimits) -> Self {
        self.limits = ExpansionLimits {
            max_operands: limits.max_operands.min(OPERAND_CEILING),
            ..limits
        };
        self
    }

    /// Validates the registrations and builds the context.
    ///
    /// Fails on a repeated token key, or on a primitive token that no token
    /// type other than `composed` claims.
    pub fn build(self) -> Result<GrammarContext> {
        let mut tokens = TokenRegistry::new();
        for definition in self.tokens {
            tokens.register(definition)?;
        }

        for definition in tokens.iter().filter(|definition| definition.is_primitive()) {
            let owned = self
                .types
                .iter()
                .filter(|token_type| token_type.key() != "composed")
                .any(|token_type| token_type.owns(&definition.key, &tokens));
            if !owned {
                return Err(VdsError::UnknownTokenType(definition.key.clone()));
            }
        }

        log::debug!(
            "grammar context built with {} tokens and {} token types",
            tokens.len(),
            self.types.len()
        );
        Ok(GrammarContext::from_parts(tokens, self.types, self.limits))
    }
}

static STANDARD: Lazy<GrammarContext> = Lazy::new(GrammarContext::standard);

/// The process-wide standard context, built on first use.
pub fn standard_context() -> &'static GrammarContext {
    &STANDARD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::types::LengthType;

    #[test]
    fn test_standard_context_is_shared() {
        assert!(std::ptr::eq(standard_context(), standard_context()));
        assert!(standard_context().tokens().contains("<length>"));
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let result = GrammarContext::builder()
            .with_standard_types()
            .with_standard_tokens()
            .token(TokenDefinition::new("<length>", "<length>"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            VdsError::DuplicateToken("<length>".to_string())
        );
    }

    #[test]
    fn test_builder_rejects_unowned_primitive() {
        let result = GrammarContext::builder()
            .token_type(Arc::new(LengthType))
            .token(TokenDefinition::new("<angle>", "<angle>").with_default("0deg"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            VdsError::UnknownTokenType("<angle>".to_string())
        );
    }

    #[test]
    fn test_classify_token() {
        let ctx = standard_context();
        assert_eq!(ctx.classify_token("<length>").map(|t| t.key()), Some("length"));
        assert_eq!(ctx.classify_token("auto").map(|t| t.key()), Some("keyword"));
        assert!(ctx.classify_token("<bar>").is_none());
    }

    #[test]
    fn test_cache_hits_return_same_expansion() {
        let ctx = GrammarContext::standard();
        let first = ctx.expand("auto | <length>").unwrap();
        let second = ctx.expand("auto | <length>").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ctx.cache_len(), 1);

        ctx.clear_cache();
        assert_eq!(ctx.cache_len(), 0);
    }

    #[test]
    fn test_operand_limit_is_clamped() {
        let ctx = GrammarContext::builder()
            .with_standard_types()
            .with_standard_tokens()
            .limits(ExpansionLimits {
                max_operands: 64,
                ..ExpansionLimits::default()
            })
            .build()
            .unwrap();
        assert_eq!(ctx.limits().max_operands, OPERAND_CEILING);

        let syntax = ["a", "b", "c", "d", "e", "f", "g", "h", "i"].join(" || ");
        assert_eq!(
            ctx.expand(&syntax).unwrap_err(),
            VdsError::TooManyOperands {
                operands: 9,
                limit: OPERAND_CEILING
            }
        );
    }

    #[test]
    fn test_memoize_disabled() {
        let ctx = GrammarContext::builder()
            .with_standard_types()
            .with_standard_tokens()
            .limits(ExpansionLimits {
                memoize: false,
                ..ExpansionLimits::default()
            })
            .build()
            .unwrap();
        let first = ctx.expand("auto").unwrap();
        let second = ctx.expand("auto").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(ctx.cache_len(), 0);
    }
}
