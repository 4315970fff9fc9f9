//! Value classification.
//!
//! Maps one concrete fragment (`10px`, `auto`, `fit-content(10px)`) to the
//! canonical tokens it instantiates. Token types are consulted in
//! registration order; the first one that accepts the fragment supplies the
//! best guess, and every accepting type contributes an equivalent.

use crate::context::GrammarContext;
use crate::error::{Result, VdsError};
use crate::tokens::OptionDefinition;

/// What a fragment instantiates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Key of the first token type that accepted the fragment.
    pub category: String,
    /// Best-guess canonical token.
    pub token: String,
    /// Every canonical token the fragment is accepted as, best guess first.
    pub equivalents: Vec<String>,
}

impl Classification {
    /// Whether the fragment can stand for `canonical`.
    pub fn accepts(&self, canonical: &str) -> bool {
        self.equivalents.iter().any(|token| token == canonical)
    }
}

/// Classifies one fragment.
///
/// ```rust
/// use vds::{classify_fragment, standard_context};
///
/// let classification = classify_fragment(standard_context(), "0").unwrap();
/// assert_eq!(classification.token, "<integer>");
/// assert!(classification.accepts("<length>"));
/// ```
pub fn classify_fragment(ctx: &GrammarContext, fragment: &str) -> Result<Classification> {
    let fragment = fragment.trim();
    let mut best: Option<(String, String)> = None;
    let mut equivalents: Vec<String> = Vec::new();

    for token_type in ctx.types().iter() {
        let tokens = token_type.classify_value(fragment, ctx.tokens());
        let Some(first) = tokens.first() else {
            continue;
        };
        if best.is_none() {
            best = Some((token_type.key().to_string(), first.clone()));
        }
        for token in tokens {
            if !equivalents.contains(&token) {
                equivalents.push(token);
            }
        }
    }

    match best {
        Some((category, token)) => Ok(Classification {
            category,
            token,
            equivalents,
        }),
        None => Err(VdsError::UnclassifiableValue(fragment.to_string())),
    }
}

/// Best-guess canonical token of each fragment. Fragments no token type
/// accepts are dropped.
pub fn classify_fragments<S: AsRef<str>>(ctx: &GrammarContext, fragments: &[S]) -> Vec<String> {
    fragments
        .iter()
        .filter_map(|fragment| match classify_fragment(ctx, fragment.as_ref()) {
            Ok(classification) => Some(classification.token),
            Err(_) => {
                log::debug!("dropping unclassifiable fragment `{}`", fragment.as_ref());
                None
            }
        })
        .collect()
}

/// The category whose token type has the lowest priority among `options`.
///
/// Categories without a registered token type lose every tie.
pub fn pick_default_category<'a>(
    ctx: &GrammarContext,
    options: &'a [OptionDefinition],
) -> Option<&'a str> {
    options
        .iter()
        .min_by_key(|option| {
            ctx.types()
                .get(&option.category)
                .map_or(u8::MAX, |token_type| token_type.priority())
        })
        .map(|option| option.category.as_str())
}
