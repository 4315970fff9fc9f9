//! Fragment separators.
//!
//! Every boundary between two fragments of a value (and between two tokens of
//! a variant) is a space, a comma or a slash. [`Separators`] selects which of
//! them the value tokenizer treats as boundaries.

use std::fmt;

use bitflags::bitflags;

/// The character joining two adjacent fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    #[default]
    Space,
    Comma,
    Slash,
}

impl Separator {
    /// The text inserted between two fragments when serializing.
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Comma => ", ",
            Separator::Slash => " / ",
        }
    }

    /// Maps a boundary character to its separator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Separator::Comma),
            '/' => Some(Separator::Slash),
            c if c.is_whitespace() => Some(Separator::Space),
            _ => None,
        }
    }

    /// The flag for this separator in a [`Separators`] set.
    pub fn flag(self) -> Separators {
        match self {
            Separator::Space => Separators::SPACE,
            Separator::Comma => Separators::COMMA,
            Separator::Slash => Separators::SLASH,
        }
    }

    /// Combines a separator already seen at a boundary with a new one.
    ///
    /// Whitespace around a comma or slash does not override it.
    pub(crate) fn merge(previous: Option<Self>, next: Self) -> Self {
        match (previous, next) {
            (Some(previous), Separator::Space) => previous,
            (_, next) => next,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Space => write!(f, "space"),
            Separator::Comma => write!(f, "comma"),
            Separator::Slash => write!(f, "slash"),
        }
    }
}

bitflags! {
    /// A set of separators recognized as fragment boundaries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Separators: u8 {
        const SPACE = 0b001;
        const COMMA = 0b010;
        const SLASH = 0b100;
    }
}

impl Default for Separators {
    fn default() -> Self {
        Separators::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Separator::from_char(' '), Some(Separator::Space));
        assert_eq!(Separator::from_char('\t'), Some(Separator::Space));
        assert_eq!(Separator::from_char(','), Some(Separator::Comma));
        assert_eq!(Separator::from_char('/'), Some(Separator::Slash));
        assert_eq!(Separator::from_char('a'), None);
    }

    #[test]
    fn test_merge_prefers_comma_and_slash() {
        assert_eq!(
            Separator::merge(Some(Separator::Comma), Separator::Space),
            Separator::Comma
        );
        assert_eq!(
            Separator::merge(Some(Separator::Space), Separator::Slash),
            Separator::Slash
        );
        assert_eq!(Separator::merge(None, Separator::Space), Separator::Space);
    }

    #[test]
    fn test_default_set_contains_everything() {
        let set = Separators::default();
        assert!(set.contains(Separator::Space.flag()));
        assert!(set.contains(Separator::Comma.flag()));
        assert!(set.contains(Separator::Slash.flag()));
    }
}
