//! Value tokenizer and serializer.
//!
//! Splits a value into its top-level fragments and joins fragments back
//! together. Boundaries inside parentheses or quotes are ignored, so
//! `rgb(0, 0, 0) 10px` is two fragments, not four.

use crate::grammar::expand::join_tokens;
use crate::separator::{Separator, Separators};

/// A value split into fragments and the separator at each boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitValue {
    pub fragments: Vec<String>,
    pub separators: Vec<Separator>,
}

impl SplitValue {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Re-serializes the fragments with their own separators.
    pub fn join(&self) -> String {
        join(&self.fragments, &self.separators)
    }
}

/// Splits `value` on every top-level space, comma and slash.
pub fn split(value: &str) -> Vec<String> {
    split_value(value, Separators::all()).fragments
}

/// The separators recorded at each top-level boundary of `value`.
pub fn separators_of(value: &str) -> Vec<Separator> {
    split_value(value, Separators::all()).separators
}

/// Splits `value` on the top-level separators in `boundaries`.
///
/// Whitespace next to a comma or slash folds into it. When spaces are not a
/// boundary, fragments are trimmed instead.
pub fn split_value(value: &str, boundaries: Separators) -> SplitValue {
    let mut out = SplitValue::default();
    let mut current = String::new();
    let mut pending: Option<Separator> = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    let finish = |current: &mut String, pending: &mut Option<Separator>, out: &mut SplitValue| {
        let fragment = current.trim();
        if !fragment.is_empty() {
            if !out.fragments.is_empty() {
                out.separators.push(pending.take().unwrap_or_default());
            }
            *pending = None;
            out.fragments.push(fragment.to_string());
        }
        current.clear();
    };

    for c in value.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if depth == 0 => match Separator::from_char(c) {
                Some(separator) if boundaries.contains(separator.flag()) => {
                    finish(&mut current, &mut pending, &mut out);
                    pending = Some(Separator::merge(pending, separator));
                }
                _ => current.push(c),
            },
            c => current.push(c),
        }
    }
    finish(&mut current, &mut pending, &mut out);
    out
}

/// Joins fragments, using `separators[i]` between fragment `i` and `i + 1`.
///
/// Missing separators default to a space.
pub fn join<S: AsRef<str>>(fragments: &[S], separators: &[Separator]) -> String {
    join_tokens(fragments, separators)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_split_respects_parentheses() {
        assert_eq!(split("rgb(0, 0, 0) 10px"), vec!["rgb(0, 0, 0)", "10px"]);
        assert_eq!(split("rgba(0,0,0,0.5) 10px"), vec!["rgba(0,0,0,0.5)", "10px"]);
        assert_eq!(
            split("minmax(0px, fit-content(10px)) auto"),
            vec!["minmax(0px, fit-content(10px))", "auto"]
        );
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(
            split("\"Open Sans\", serif"),
            vec!["\"Open Sans\"", "serif"]
        );
        assert_eq!(separators_of("\"Open Sans\", serif"), vec![Separator::Comma]);
    }

    #[test]
    fn test_split_records_separators() {
        let value = split_value("16 / 9", Separators::all());
        assert_eq!(value.fragments, vec!["16", "9"]);
        assert_eq!(value.separators, vec![Separator::Slash]);

        let value = split_value("a,b  c", Separators::all());
        assert_eq!(value.fragments, vec!["a", "b", "c"]);
        assert_eq!(value.separators, vec![Separator::Comma, Separator::Space]);
    }

    #[test]
    fn test_split_with_restricted_boundaries() {
        let value = split_value("10px solid, 2px dashed", Separators::COMMA);
        assert_eq!(value.fragments, vec!["10px solid", "2px dashed"]);
        assert_eq!(value.separators, vec![Separator::Comma]);
    }

    #[test]
    fn test_join_uses_each_separator() {
        let fragments = ["1", "2", "3"];
        assert_eq!(
            join(&fragments, &[Separator::Slash, Separator::Comma]),
            "1 / 2, 3"
        );
        assert_eq!(join(&fragments, &[]), "1 2 3");
    }

    #[test]
    fn test_round_trip_for_serialized_values() {
        for value in ["10px 0px #ffffff", "1 / 2", "a, b c", "rgb(0, 0, 0) 10px"] {
            let split = split_value(value, Separators::all());
            assert_eq!(split.join(), value);
        }
    }
}
