//! Token categories.
//!
//! Each category (keyword, function, length, number, integer, color, link,
//! composed) is a [`TokenType`] implementation. A category decides which
//! canonical tokens it owns, which value fragments instantiate its tokens,
//! and what option it offers in a slot. The [`TokenTypeRegistry`] keeps the
//! categories in classification order.

use std::fmt;
use std::sync::Arc;

use nom::{
    character::complete::{alpha1, char},
    combinator::{all_consuming, opt},
    sequence::pair,
};

use crate::lexer::{parse_ident, recognize_function};
use crate::tokens::TokenRegistry;
use crate::tokens::catalog::{LENGTH_UNITS, NAMED_COLORS};
use crate::tokens::reference::{TokenRef, parse_number};

/// Whether an option inserts a literal keyword or a typed token's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Keyword,
    Token,
}

/// One selectable choice in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionDefinition {
    /// The literal inserted into the value when the option is picked.
    pub value: String,
    /// Canonical token this option stands for.
    pub token: String,
    /// Category key of the owning token type.
    pub category: String,
    pub kind: OptionKind,
}

/// Behavior shared by every token category.
pub trait TokenType: fmt::Debug + Send + Sync {
    /// Category key, e.g. `"length"`.
    fn key(&self) -> &str;

    /// Lower numbers win when picking a default editor for a slot.
    fn priority(&self) -> u8;

    /// Whether this category owns a canonical token.
    fn owns(&self, canonical: &str, registry: &TokenRegistry) -> bool;

    /// Canonical tokens the fragment instantiates, best guess first.
    ///
    /// An empty list means the fragment does not belong to this category.
    fn classify_value(&self, fragment: &str, registry: &TokenRegistry) -> Vec<String>;

    /// Numeric magnitude of a fragment, used for range checks.
    fn numeric_value(&self, _fragment: &str) -> Option<f64> {
        None
    }

    /// The option offered in a slot for `canonical`.
    fn create_option(&self, canonical: &str, registry: &TokenRegistry) -> OptionDefinition {
        OptionDefinition {
            value: registry
                .default_value(canonical)
                .unwrap_or_else(|| canonical.to_string()),
            token: canonical.to_string(),
            category: self.key().to_string(),
            kind: OptionKind::Token,
        }
    }
}

fn leading_number(fragment: &str) -> Option<f64> {
    parse_number(fragment).ok().map(|(_, value)| value)
}

fn is_integer(fragment: &str) -> bool {
    let digits = fragment.strip_prefix('-').unwrap_or(fragment);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_number(fragment: &str) -> bool {
    matches!(all_consuming(parse_number)(fragment), Ok((_, _)))
}

/// Bare identifiers: `auto`, `min-content`, `-webkit-box`.
#[derive(Debug, Default)]
pub struct KeywordType;

impl TokenType for KeywordType {
    fn key(&self) -> &str {
        "keyword"
    }

    fn priority(&self) -> u8 {
        70
    }

    fn owns(&self, canonical: &str, _registry: &TokenRegistry) -> bool {
        matches!(TokenRef::parse(canonical), Ok(TokenRef::Keyword(_)))
    }

    fn classify_value(&self, fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        let body = fragment.strip_prefix('-').unwrap_or(fragment);
        let starts_alpha = body.chars().next().is_some_and(|c| c.is_ascii_lowercase());
        let valid = body
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if starts_alpha && valid {
            vec![fragment.to_string()]
        } else {
            Vec::new()
        }
    }

    fn create_option(&self, canonical: &str, _registry: &TokenRegistry) -> OptionDefinition {
        OptionDefinition {
            value: canonical.to_string(),
            token: canonical.to_string(),
            category: self.key().to_string(),
            kind: OptionKind::Keyword,
        }
    }
}

/// Registered function-shaped tokens: `fit-content()`, `minmax()`.
///
/// Calls to unregistered functions (`rgb()`, `url()`) fall through to the
/// categories that understand them.
#[derive(Debug, Default)]
pub struct FunctionType;

impl TokenType for FunctionType {
    fn key(&self) -> &str {
        "function"
    }

    fn priority(&self) -> u8 {
        50
    }

    fn owns(&self, canonical: &str, registry: &TokenRegistry) -> bool {
        canonical.ends_with("()")
            && registry
                .get(canonical)
                .is_some_and(|definition| definition.is_primitive())
    }

    fn classify_value(&self, fragment: &str, registry: &TokenRegistry) -> Vec<String> {
        if all_consuming(recognize_function)(fragment).is_err() {
            return Vec::new();
        }
        let Ok((_, name)) = parse_ident(fragment) else {
            return Vec::new();
        };
        let canonical = format!("{}()", name.to_lowercase());
        if self.owns(&canonical, registry) {
            vec![canonical]
        } else {
            Vec::new()
        }
    }
}

/// Quoted strings and `url()` references.
#[derive(Debug, Default)]
pub struct LinkType;

impl TokenType for LinkType {
    fn key(&self) -> &str {
        "link"
    }

    fn priority(&self) -> u8 {
        60
    }

    fn owns(&self, canonical: &str, _registry: &TokenRegistry) -> bool {
        matches!(canonical, "<url>" | "<string>")
    }

    fn classify_value(&self, fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        let quoted = fragment.len() >= 2
            && ((fragment.starts_with('"') && fragment.ends_with('"'))
                || (fragment.starts_with('\'') && fragment.ends_with('\'')));
        if quoted {
            return vec!["<string>".to_string()];
        }
        let lower = fragment.to_lowercase();
        if lower.starts_with("url(") && lower.ends_with(')') {
            return vec!["<url>".to_string()];
        }
        Vec::new()
    }
}

/// Hex, `rgb()`/`rgba()`, `hsl()`/`hsla()` and named colors.
#[derive(Debug, Default)]
pub struct ColorType;

impl ColorType {
    fn is_color(fragment: &str) -> bool {
        let lower = fragment.to_lowercase();
        if let Some(hex) = lower.strip_prefix('#') {
            return matches!(hex.len(), 3 | 4 | 6 | 8)
                && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        let functional = ["rgb(", "rgba(", "hsl(", "hsla("]
            .iter()
            .any(|prefix| lower.starts_with(prefix));
        if functional {
            return lower.ends_with(')');
        }
        NAMED_COLORS.contains(lower.as_str())
    }
}

impl TokenType for ColorType {
    fn key(&self) -> &str {
        "color"
    }

    fn priority(&self) -> u8 {
        40
    }

    fn owns(&self, canonical: &str, _registry: &TokenRegistry) -> bool {
        canonical == "<color>"
    }

    fn classify_value(&self, fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        if Self::is_color(fragment) {
            vec!["<color>".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Integer literals: `^-?\d+$`.
#[derive(Debug, Default)]
pub struct IntegerType;

impl TokenType for IntegerType {
    fn key(&self) -> &str {
        "integer"
    }

    fn priority(&self) -> u8 {
        30
    }

    fn owns(&self, canonical: &str, _registry: &TokenRegistry) -> bool {
        canonical == "<integer>"
    }

    fn classify_value(&self, fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        if is_integer(fragment) {
            vec!["<integer>".to_string()]
        } else {
            Vec::new()
        }
    }

    fn numeric_value(&self, fragment: &str) -> Option<f64> {
        leading_number(fragment)
    }
}

/// Decimal literals. Integers are numbers too.
#[derive(Debug, Default)]
pub struct NumberType;

impl TokenType for NumberType {
    fn key(&self) -> &str {
        "number"
    }

    fn priority(&self) -> u8 {
        20
    }

    fn owns(&self, canonical: &str, _registry: &TokenRegistry) -> bool {
        canonical == "<number>"
    }

    fn classify_value(&self, fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        if is_number(fragment) {
            vec!["<number>".to_string()]
        } else {
            Vec::new()
        }
    }

    fn numeric_value(&self, fragment: &str) -> Option<f64> {
        leading_number(fragment)
    }
}

/// Dimensions: `<length>` (`10px`, `2em`, unitless `0`) and `<percentage>`.
#[derive(Debug, Default)]
pub struct LengthType;

impl TokenType for LengthType {
    fn key(&self) -> &str {
        "length"
    }

    fn priority(&self) -> u8 {
        10
    }

    fn owns(&self, canonical: &str, _registry: &TokenRegistry) -> bool {
        matches!(canonical, "<length>" | "<percentage>")
    }

    fn classify_value(&self, fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        let Ok((rest, value)) = parse_number(fragment) else {
            return Vec::new();
        };
        if rest.is_empty() {
            return if value == 0.0 {
                vec!["<length>".to_string()]
            } else {
                Vec::new()
            };
        }
        if rest == "%" {
            return vec!["<percentage>".to_string()];
        }
        let unit: nom::IResult<&str, (&str, Option<char>)> =
            all_consuming(pair(alpha1, opt(char('%'))))(rest);
        match unit {
            Ok((_, (unit, None))) if LENGTH_UNITS.contains(unit.to_lowercase().as_str()) => {
                vec!["<length>".to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn numeric_value(&self, fragment: &str) -> Option<f64> {
        leading_number(fragment)
    }
}

/// Registered tokens defined in terms of other tokens (`<ratio>`,
/// `<length-percentage>`). They are substituted away before matching, so
/// no value ever classifies as composed.
#[derive(Debug, Default)]
pub struct ComposedType;

impl TokenType for ComposedType {
    fn key(&self) -> &str {
        "composed"
    }

    fn priority(&self) -> u8 {
        100
    }

    fn owns(&self, canonical: &str, registry: &TokenRegistry) -> bool {
        registry
            .get(canonical)
            .is_some_and(|definition| !definition.is_primitive())
    }

    fn classify_value(&self, _fragment: &str, _registry: &TokenRegistry) -> Vec<String> {
        Vec::new()
    }
}

/// Token categories in classification order.
#[derive(Debug, Clone, Default)]
pub struct TokenTypeRegistry {
    types: Vec<Arc<dyn TokenType>>,
}

impl TokenTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in categories, ordered from most to least specific.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FunctionType));
        registry.register(Arc::new(LinkType));
        registry.register(Arc::new(ColorType));
        registry.register(Arc::new(IntegerType));
        registry.register(Arc::new(NumberType));
        registry.register(Arc::new(LengthType));
        registry.register(Arc::new(KeywordType));
        registry.register(Arc::new(ComposedType));
        registry
    }

    /// Appends a category; it is consulted after those already registered.
    pub fn register(&mut self, token_type: Arc<dyn TokenType>) {
        self.types.push(token_type);
    }

    pub fn get(&self, key: &str) -> Option<&dyn TokenType> {
        self.types
            .iter()
            .find(|token_type| token_type.key() == key)
            .map(|token_type| token_type.as_ref())
    }

    /// The category owning a canonical token, if any.
    pub fn owner(&self, canonical: &str, registry: &TokenRegistry) -> Option<&dyn TokenType> {
        self.types
            .iter()
            .find(|token_type| token_type.owns(canonical, registry))
            .map(|token_type| token_type.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn TokenType> {
        self.types.iter().map(|token_type| token_type.as_ref())
    }

    pub(crate) fn into_types(self) -> Vec<Arc<dyn TokenType>> {
        self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
