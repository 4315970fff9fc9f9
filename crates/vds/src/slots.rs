//! Slot matching and the option table.
//!
//! Reconciles what a grammar allows with what the user has typed. The value
//! is split into fragments, each fragment is classified, and the expanded
//! variants are searched for an exact match, then for one the fragments are
//! a prefix of. The matched variant drives back-filling, serialization and
//! the per-slot option menus.
//!
//! ```rust
//! use vds::{apply_slot_edit, standard_context};
//!
//! let ctx = standard_context();
//! let typed: Vec<String> = Vec::new();
//! let value = apply_slot_edit(ctx, "<length> <length> <color>", &typed, 0, "10px").unwrap();
//! assert_eq!(value, "10px 0px #ffffff");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::context::GrammarContext;
use crate::error::{Result, VdsError};
use crate::grammar::{Expansion, Variant};
use crate::separator::{Separator, Separators};
use crate::tokens::reference::parse_number;
use crate::tokens::{OptionDefinition, OptionKind, Range};
use crate::value::{Classification, classify_fragment, join, split_value};

/// The option menus for one value under one grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTable {
    /// The variant the value was matched against.
    pub variant: Variant,
    /// The value matched the variant exactly, separators included, without
    /// back-filling.
    pub complete: bool,
    /// The value's fragments followed by back-filled defaults.
    pub fragments: Vec<String>,
    /// Separators of the matched variant.
    pub separators: Vec<Separator>,
    /// `fragments` joined with `separators`.
    pub value: String,
    /// Options for each typed fragment, plus the "add next value" slot when
    /// the grammar allows one.
    pub slots: Vec<Vec<OptionDefinition>>,
}

impl SlotTable {
    /// Number of slots, including the trailing "add next value" slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Builds the slot option table for `value` under `syntax`.
///
/// Fails with [`VdsError::UnknownToken`] when the grammar references
/// unregistered tokens, [`VdsError::UnclassifiableValue`] when a fragment
/// matches no token type and [`VdsError::NoMatchingVariant`] when the
/// fragments match no variant, even as a prefix. The separators typed
/// between fragments must be the variant's own: `1px, 2px` does not match
/// `<length> <length>`.
pub fn build_slot_options(ctx: &GrammarContext, syntax: &str, value: &str) -> Result<SlotTable> {
    let expansion = structured_expansion(ctx, syntax)?;
    let typed = split_value(value, Separators::all());
    slot_table(ctx, &expansion, typed.fragments, Some(&typed.separators))
}

/// Replaces fragment `slot` with `new_fragment` and returns the re-serialized
/// value.
///
/// `slot == fragments.len()` appends a fragment. An empty `new_fragment`
/// removes the slot and everything after it; clearing slot 0 returns an
/// empty value rather than the back-filled shortest variant. When the
/// edited fragments match no variant, the fragments after the edited slot
/// are dropped and matching is retried once. Fragments carry no separators,
/// so the matched variant's are used.
pub fn apply_slot_edit<S: AsRef<str>>(
    ctx: &GrammarContext,
    syntax: &str,
    fragments: &[S],
    slot: usize,
    new_fragment: &str,
) -> Result<String> {
    if slot > fragments.len() {
        return Err(VdsError::SlotOutOfRange {
            slot,
            len: fragments.len(),
        });
    }

    let expansion = structured_expansion(ctx, syntax)?;
    let mut edited: Vec<String> = fragments
        .iter()
        .map(|fragment| fragment.as_ref().trim().to_string())
        .collect();
    let new_fragment = new_fragment.trim();
    if new_fragment.is_empty() {
        edited.truncate(slot);
    } else if slot == edited.len() {
        edited.push(new_fragment.to_string());
    } else {
        edited[slot] = new_fragment.to_string();
    }
    if edited.is_empty() {
        log::debug!("edit of slot {} cleared the value", slot);
        return Ok(String::new());
    }

    match slot_table(ctx, &expansion, edited.clone(), None) {
        Ok(table) => Ok(table.value),
        Err(VdsError::NoMatchingVariant(_) | VdsError::UnclassifiableValue(_))
            if edited.len() > slot + 1 =>
        {
            log::debug!(
                "edit of slot {} matched nothing; retrying without trailing fragments",
                slot
            );
            edited.truncate(slot + 1);
            slot_table(ctx, &expansion, edited, None).map(|table| table.value)
        }
        Err(err) => Err(err),
    }
}

fn structured_expansion(ctx: &GrammarContext, syntax: &str) -> Result<Arc<Expansion>> {
    let expansion = ctx.expand(syntax)?;
    if expansion.opaque {
        return Err(VdsError::UnknownToken(expansion.unknown_tokens.join(", ")));
    }
    Ok(expansion)
}

/// `separators` are the ones between the fragments when they came from a
/// typed value; `None` accepts any variant separators.
fn slot_table(
    ctx: &GrammarContext,
    expansion: &Expansion,
    fragments: Vec<String>,
    separators: Option<&[Separator]>,
) -> Result<SlotTable> {
    let classes = fragments
        .iter()
        .map(|fragment| classify_fragment(ctx, fragment))
        .collect::<Result<Vec<_>>>()?;
    let typed_fragments = Typed {
        fragments: &fragments,
        classes: &classes,
        separators,
    };

    let typed_value = join(&fragments, separators.unwrap_or_default());
    let (variant, complete) = find_variant(ctx, expansion, &typed_fragments)
        .ok_or_else(|| VdsError::NoMatchingVariant(typed_value.clone()))?;
    log::debug!(
        "value `{}` matched variant `{}` ({})",
        typed_value,
        variant,
        if complete { "exact" } else { "prefix" }
    );

    let mut filled = fragments.clone();
    for i in fragments.len()..variant.len() {
        filled.push(backfill(ctx, &variant.canonical[i], variant.ranges[i])?);
    }

    let mut slots = Vec::with_capacity(fragments.len() + 1);
    for i in 0..=fragments.len() {
        let options = slot_options(ctx, expansion, &typed_fragments.prefix(i));
        if i == fragments.len() && options.is_empty() {
            break;
        }
        slots.push(options);
    }

    Ok(SlotTable {
        value: join(&filled, &variant.separators),
        separators: variant.separators.clone(),
        variant: variant.clone(),
        complete,
        fragments: filled,
        slots,
    })
}

/// What the user typed: fragments, their classifications and, when known,
/// the separators between them.
struct Typed<'a> {
    fragments: &'a [String],
    classes: &'a [Classification],
    separators: Option<&'a [Separator]>,
}

impl<'a> Typed<'a> {
    fn len(&self) -> usize {
        self.fragments.len()
    }

    /// The first `n` fragments.
    fn prefix(&self, n: usize) -> Typed<'a> {
        let (fragments, classes) = (self.fragments, self.classes);
        Typed {
            fragments: &fragments[..n],
            classes: &classes[..n],
            separators: self
                .separators
                .map(|separators| &separators[..n.saturating_sub(1).min(separators.len())]),
        }
    }
}

/// The first variant matching the fragments exactly, else the first one
/// they are a strict prefix of.
fn find_variant<'a>(
    ctx: &GrammarContext,
    expansion: &'a Expansion,
    typed: &Typed<'_>,
) -> Option<(&'a Variant, bool)> {
    let consistent = |variant: &&Variant| is_consistent(ctx, variant, typed);
    if let Some(variant) = expansion
        .variants
        .iter()
        .filter(|variant| variant.len() == typed.len())
        .find(consistent)
    {
        return Some((variant, true));
    }
    expansion
        .variants
        .iter()
        .filter(|variant| variant.len() > typed.len())
        .find(consistent)
        .map(|variant| (variant, false))
}

/// Whether the first `typed.len()` tokens of `variant` accept the fragments
/// and the variant joins them with the typed separators.
fn is_consistent(ctx: &GrammarContext, variant: &Variant, typed: &Typed<'_>) -> bool {
    variant.len() >= typed.len()
        && separators_agree(variant, typed)
        && typed
            .fragments
            .iter()
            .zip(typed.classes)
            .enumerate()
            .all(|(i, (fragment, class))| {
                accepts(ctx, &variant.canonical[i], variant.ranges[i], fragment, class)
            })
}

fn separators_agree(variant: &Variant, typed: &Typed<'_>) -> bool {
    let Some(separators) = typed.separators else {
        return true;
    };
    let boundaries = typed.len().saturating_sub(1);
    variant.separators.get(..boundaries) == separators.get(..boundaries)
}

fn accepts(
    ctx: &GrammarContext,
    canonical: &str,
    range: Option<Range>,
    fragment: &str,
    class: &Classification,
) -> bool {
    if !class.accepts(canonical) {
        return false;
    }
    let Some(range) = range else {
        return true;
    };
    match ctx
        .classify_token(canonical)
        .and_then(|token_type| token_type.numeric_value(fragment))
    {
        Some(value) => range.contains(value),
        None => true,
    }
}

/// The default literal for a missing fragment, pulled into `range` when it
/// falls outside.
fn backfill(ctx: &GrammarContext, canonical: &str, range: Option<Range>) -> Result<String> {
    let default = ctx
        .default_value(canonical)
        .ok_or_else(|| VdsError::MissingDefault(canonical.to_string()))?;
    let Some(range) = range.filter(|range| range.min <= range.max) else {
        return Ok(default);
    };
    match parse_number(&default) {
        Ok((unit, value)) if !range.contains(value) => {
            let clamped = value.clamp(range.min, range.max);
            if clamped.is_finite() {
                Ok(format!("{}{}", clamped, unit))
            } else {
                Ok(default)
            }
        }
        _ => Ok(default),
    }
}

/// Options at position `slot` across every variant consistent with the
/// fragments before it.
///
/// Keywords are offered individually; other categories contribute one
/// representative option each.
fn slot_options(
    ctx: &GrammarContext,
    expansion: &Expansion,
    before: &Typed<'_>,
) -> Vec<OptionDefinition> {
    let slot = before.len();
    let mut options = Vec::new();
    let mut seen_keywords = HashSet::new();
    let mut seen_categories = HashSet::new();

    for variant in expansion
        .variants
        .iter()
        .filter(|variant| variant.len() > slot)
        .filter(|variant| is_consistent(ctx, variant, before))
    {
        let canonical = &variant.canonical[slot];
        let Some(token_type) = ctx.classify_token(canonical) else {
            continue;
        };
        let option = token_type.create_option(canonical, ctx.tokens());
        let fresh = match option.kind {
            OptionKind::Keyword => seen_keywords.insert(option.value.clone()),
            OptionKind::Token => seen_categories.insert(option.category.clone()),
        };
        if fresh {
            options.push(option);
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::standard_context;
    use crate::value::split;

    fn values(options: &[OptionDefinition]) -> Vec<&str> {
        options.iter().map(|option| option.value.as_str()).collect()
    }

    #[test]
    fn test_exact_match_is_complete() {
        let table = build_slot_options(standard_context(), "auto | <length>", "10px").unwrap();
        assert!(table.complete);
        assert_eq!(table.value, "10px");
        assert_eq!(table.len(), 1);
        assert_eq!(values(&table.slots[0]), vec!["auto", "0px"]);
    }

    #[test]
    fn test_prefix_match_backfills() {
        let table =
            build_slot_options(standard_context(), "<length> <length> <color>", "10px").unwrap();
        assert!(!table.complete);
        assert_eq!(table.fragments, vec!["10px", "0px", "#ffffff"]);
        assert_eq!(table.value, "10px 0px #ffffff");
        assert_eq!(table.len(), 2);
        assert_eq!(table.slots[1][0].token, "<length>");
    }

    #[test]
    fn test_backfill_is_clamped_to_range() {
        let table = build_slot_options(standard_context(), "<integer [1,∞]>", "").unwrap();
        assert_eq!(table.value, "1");
    }

    #[test]
    fn test_range_rejects_out_of_bounds_fragment() {
        let err = build_slot_options(standard_context(), "<length [0,∞]>", "-4px").unwrap_err();
        assert!(matches!(err, VdsError::NoMatchingVariant(_)));
    }

    #[test]
    fn test_unknown_grammar_is_reported() {
        let err = build_slot_options(standard_context(), "foo || <bar>", "foo").unwrap_err();
        assert_eq!(err, VdsError::UnknownToken("<bar>".to_string()));
    }

    #[test]
    fn test_unclassifiable_fragment() {
        let err = build_slot_options(standard_context(), "auto", "@@").unwrap_err();
        assert_eq!(err, VdsError::UnclassifiableValue("@@".to_string()));
    }

    #[test]
    fn test_length_and_percentage_share_one_option() {
        let table =
            build_slot_options(standard_context(), "<length-percentage> | auto", "auto").unwrap();
        assert_eq!(values(&table.slots[0]), vec!["auto", "0px"]);
    }

    #[test]
    fn test_apply_appends_and_replaces() {
        let ctx = standard_context();
        let fragments = split("10px");
        assert_eq!(
            apply_slot_edit(ctx, "<length> <length>?", &fragments, 1, "2em").unwrap(),
            "10px 2em"
        );
        assert_eq!(
            apply_slot_edit(ctx, "<length> <length>?", &fragments, 0, "3rem").unwrap(),
            "3rem"
        );
    }

    #[test]
    fn test_apply_retries_without_trailing_fragments() {
        let ctx = standard_context();
        let fragments = split("10px 20px");
        assert_eq!(
            apply_slot_edit(ctx, "auto | <length> <length>", &fragments, 0, "auto").unwrap(),
            "auto"
        );
    }

    #[test]
    fn test_apply_empty_fragment_removes_tail() {
        let ctx = standard_context();
        let fragments = split("10px 20px");
        assert_eq!(
            apply_slot_edit(ctx, "<length> <length>?", &fragments, 1, "").unwrap(),
            "10px"
        );
    }

    #[test]
    fn test_apply_clearing_first_slot_empties_value() {
        let ctx = standard_context();
        let fragments = split("10px auto");
        assert_eq!(
            apply_slot_edit(ctx, "[ <length> | auto ]{1,4}", &fragments, 0, "").unwrap(),
            ""
        );
    }

    #[test]
    fn test_typed_separators_must_match_variant() {
        let ctx = standard_context();
        assert!(matches!(
            build_slot_options(ctx, "<length> <length>", "1px, 2px"),
            Err(VdsError::NoMatchingVariant(_))
        ));
        assert!(matches!(
            build_slot_options(ctx, "<length>#", "1px 2px"),
            Err(VdsError::NoMatchingVariant(_))
        ));

        let table = build_slot_options(ctx, "<length>#", "1px, 2px").unwrap();
        assert!(table.complete);
        assert_eq!(table.value, "1px, 2px");
    }

    #[test]
    fn test_apply_slot_out_of_range() {
        let fragments = split("10px");
        assert_eq!(
            apply_slot_edit(standard_context(), "<length>+", &fragments, 3, "1px").unwrap_err(),
            VdsError::SlotOutOfRange { slot: 3, len: 1 }
        );
    }
}
