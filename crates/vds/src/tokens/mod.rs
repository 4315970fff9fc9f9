//! Token registry and canonicalization.
//!
//! The registry maps canonical token keys (`<length>`, `<ratio>`,
//! `fit-content()`) to their [`TokenDefinition`]s and substitutes composed
//! tokens by their defining syntax.
//!
//! ## Submodules
//!
//! - [`catalog`]: The built-in CSS token catalog
//! - [`reference`]: Token reference parsing, canonical forms and ranges
//! - [`types`]: Token categories and the category registry

pub mod catalog;
pub mod reference;
pub mod types;

use std::collections::HashMap;

pub use crate::tokens::reference::{
    Range, TokenParams, TokenRef, canonicalize, extract_params,
};
pub use crate::tokens::types::{
    OptionDefinition, OptionKind, TokenType, TokenTypeRegistry,
};

use crate::error::{Result, VdsError};
use crate::lexer::{SyntaxItem, lex, render};
use crate::tokens::catalog::TOKEN_CATALOG;

/// A registered grammar symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDefinition {
    /// Canonical key, e.g. `<length>` or `fit-content()`.
    pub key: String,
    /// Defining syntax; equal to the key (modulo parameters) for primitives.
    pub syntax: String,
    /// Literal used when a missing fragment has to be back-filled.
    pub default: Option<String>,
}

impl TokenDefinition {
    pub fn new(key: impl Into<String>, syntax: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            syntax: syntax.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// A primitive is defined as itself and is never substituted.
    pub fn is_primitive(&self) -> bool {
        let syntax = self.syntax.trim();
        syntax.is_empty() || canonicalize(syntax).is_ok_and(|canonical| canonical == self.key)
    }
}

/// The result of substituting every composed token in a syntax string.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub items: Vec<SyntaxItem>,
    /// Canonical keys that had no definition, in order of appearance.
    pub unknown_tokens: Vec<String>,
}

impl Substitution {
    pub fn syntax(&self) -> String {
        render(&self.items)
    }
}

/// Catalog of token definitions keyed by canonical token.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, TokenDefinition>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in catalog.
    pub fn builtin() -> Self {
        let tokens = TOKEN_CATALOG
            .entries()
            .map(|(key, entry)| {
                let definition = TokenDefinition {
                    key: key.to_string(),
                    syntax: entry.syntax.to_string(),
                    default: entry.default.map(str::to_string),
                };
                (key.to_string(), definition)
            })
            .collect();
        Self { tokens }
    }

    /// Registers a definition. Keys are unique.
    pub fn register(&mut self, definition: TokenDefinition) -> Result<()> {
        if self.tokens.contains_key(&definition.key) {
            return Err(VdsError::DuplicateToken(definition.key));
        }
        self.tokens.insert(definition.key.clone(), definition);
        Ok(())
    }

    pub fn get(&self, canonical: &str) -> Option<&TokenDefinition> {
        self.tokens.get(canonical)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.tokens.contains_key(canonical)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenDefinition> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The literal a canonical token defaults to. Keywords default to
    /// themselves.
    pub fn default_value(&self, canonical: &str) -> Option<String> {
        if let Some(definition) = self.tokens.get(canonical) {
            return definition.default.clone();
        }
        match TokenRef::parse(canonical) {
            Ok(TokenRef::Keyword(keyword)) => Some(keyword),
            _ => None,
        }
    }

    /// Substitutes every composed token reference in `syntax` and returns the
    /// expanded syntax string.
    ///
    /// Ranges on a reference are appended to every typed reference inside
    /// its definition, so `<ratio [0,10]>` becomes
    /// `<number [0,∞] [0,10]> [ / <number [0,∞] [0,10]> ]?`. When any
    /// referenced token is unregistered the input is returned unchanged.
    pub fn expand(&self, syntax: &str) -> Result<String> {
        let substitution = self.substitute(syntax)?;
        if substitution.unknown_tokens.is_empty() {
            Ok(substitution.syntax())
        } else {
            Ok(syntax.to_string())
        }
    }

    /// Lexes `syntax` and substitutes composed tokens, collecting unknown
    /// references instead of failing on them.
    pub fn substitute(&self, syntax: &str) -> Result<Substitution> {
        let items = lex(syntax)?;
        let mut stack = Vec::new();
        let mut unknown_tokens = Vec::new();
        let items = self.substitute_items(&items, &[], &mut stack, &mut unknown_tokens)?;
        Ok(Substitution {
            items,
            unknown_tokens,
        })
    }

    fn substitute_items(
        &self,
        items: &[SyntaxItem],
        ranges: &[Range],
        stack: &mut Vec<String>,
        unknown: &mut Vec<String>,
    ) -> Result<Vec<SyntaxItem>> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                SyntaxItem::Token(raw) => {
                    let reference = TokenRef::parse(raw)?.with_ranges(ranges);
                    out.extend(self.substitute_token(&reference, stack, unknown)?);
                }
                other => out.push(other.clone()),
            }
        }
        Ok(out)
    }

    fn substitute_token(
        &self,
        reference: &TokenRef,
        stack: &mut Vec<String>,
        unknown: &mut Vec<String>,
    ) -> Result<Vec<SyntaxItem>> {
        if reference.is_keyword() {
            return Ok(vec![SyntaxItem::Token(reference.to_string())]);
        }

        let canonical = reference.canonical();
        let Some(definition) = self.tokens.get(&canonical) else {
            if !unknown.contains(&canonical) {
                unknown.push(canonical);
            }
            return Ok(vec![SyntaxItem::Token(reference.to_string())]);
        };
        if definition.is_primitive() {
            return Ok(vec![SyntaxItem::Token(reference.to_string())]);
        }

        if stack.contains(&canonical) {
            let mut chain = stack.clone();
            chain.push(canonical.clone());
            return Err(VdsError::CyclicTokenDefinition {
                token: canonical,
                chain,
            });
        }

        stack.push(canonical);
        let inner = lex(&definition.syntax)?;
        let expanded = self.substitute_items(&inner, reference.ranges(), stack, unknown)?;
        stack.pop();

        if expanded.len() > 1 {
            let mut grouped = Vec::with_capacity(expanded.len() + 2);
            grouped.push(SyntaxItem::Open);
            grouped.extend(expanded);
            grouped.push(SyntaxItem::Close);
            Ok(grouped)
        } else {
            Ok(expanded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_detection() {
        assert!(TokenDefinition::new("<length>", "<length>").is_primitive());
        assert!(
            TokenDefinition::new("fit-content()", "fit-content(<length>)").is_primitive()
        );
        assert!(TokenDefinition::new("<string>", "").is_primitive());
        assert!(!TokenDefinition::new("<ratio>", "<number> / <number>").is_primitive());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = TokenRegistry::new();
        registry
            .register(TokenDefinition::new("<length>", "<length>"))
            .unwrap();
        assert_eq!(
            registry.register(TokenDefinition::new("<length>", "<length>")),
            Err(VdsError::DuplicateToken("<length>".to_string()))
        );
    }

    #[test]
    fn test_default_values() {
        let registry = TokenRegistry::builtin();
        assert_eq!(registry.default_value("<length>").as_deref(), Some("0px"));
        assert_eq!(registry.default_value("<color>").as_deref(), Some("#ffffff"));
        assert_eq!(registry.default_value("auto").as_deref(), Some("auto"));
        assert_eq!(registry.default_value("<bar>"), None);
    }

    #[test]
    fn test_expand_empty() {
        assert_eq!(TokenRegistry::builtin().expand("").unwrap(), "");
    }

    #[test]
    fn test_expand_wraps_alternatives() {
        let registry = TokenRegistry::builtin();
        assert_eq!(
            registry.expand("auto <length-percentage [0,∞]>").unwrap(),
            "auto [ <length [0,∞]> | <percentage [0,∞]> ]"
        );
    }

    #[test]
    fn test_expand_propagates_ranges() {
        let registry = TokenRegistry::builtin();
        assert_eq!(
            registry.expand("<ratio [0,10]>").unwrap(),
            "[ <number [0,∞] [0,10]> [ / <number [0,∞] [0,10]> ]? ]"
        );
    }

    #[test]
    fn test_expand_unknown_returns_input() {
        let registry = TokenRegistry::builtin();
        assert_eq!(registry.expand("foo || <bar>").unwrap(), "foo || <bar>");
        let substitution = registry.substitute("foo || <bar> | <bar>").unwrap();
        assert_eq!(substitution.unknown_tokens, vec!["<bar>".to_string()]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut registry = TokenRegistry::new();
        registry
            .register(TokenDefinition::new("<a>", "<b> | x"))
            .unwrap();
        registry
            .register(TokenDefinition::new("<b>", "y <a>"))
            .unwrap();
        let err = registry.expand("<a>").unwrap_err();
        assert_eq!(
            err,
            VdsError::CyclicTokenDefinition {
                token: "<a>".to_string(),
                chain: vec!["<a>".to_string(), "<b>".to_string(), "<a>".to_string()],
            }
        );
    }
}
