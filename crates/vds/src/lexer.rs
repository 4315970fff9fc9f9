//! Lexing of value definition syntax strings.
//!
//! A grammar such as `<length [0,∞]> [ / <number> ]? | auto` is turned into a
//! flat list of [`SyntaxItem`]s: token references, bracket delimiters,
//! combinators, separators and multipliers. Both the token registry (for
//! substitution) and the grammar parser (for combinator precedence) work on
//! this list.

use std::fmt;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, pair, preceded, tuple},
};

use crate::error::{Result, VdsError};

/// One lexeme of a value definition syntax string.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxItem {
    /// A token reference: `<length [0,∞]>`, `fit-content(<length>)` or `auto`.
    Token(String),
    /// `[`
    Open,
    /// `]`
    Close,
    /// `|`
    Bar,
    /// `||`
    DoubleBar,
    /// `&&`
    DoubleAmpersand,
    /// `,`
    Comma,
    /// `/`
    Slash,
    /// `?`, `*`, `+`, `#`, `{m,n}` following an operand.
    Multiplier(Multiplier),
}

/// How many times the preceding operand may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplier {
    pub min: usize,
    /// `None` means unbounded; expansion clamps it.
    pub max: Option<usize>,
    /// Repetitions are joined with commas (`#`).
    pub comma: bool,
}

impl Multiplier {
    pub const OPTIONAL: Self = Self {
        min: 0,
        max: Some(1),
        comma: false,
    };
    pub const ZERO_OR_MORE: Self = Self {
        min: 0,
        max: None,
        comma: false,
    };
    pub const ONE_OR_MORE: Self = Self {
        min: 1,
        max: None,
        comma: false,
    };
    pub const COMMA_LIST: Self = Self {
        min: 1,
        max: None,
        comma: true,
    };
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max, self.comma) {
            (0, Some(1), false) => write!(f, "?"),
            (0, None, false) => write!(f, "*"),
            (1, None, false) => write!(f, "+"),
            (1, None, true) => write!(f, "#"),
            (min, max, comma) => {
                if comma {
                    write!(f, "#")?;
                }
                match max {
                    Some(max) if max == min => write!(f, "{{{}}}", min),
                    Some(max) => write!(f, "{{{},{}}}", min, max),
                    None => write!(f, "{{{},}}", min),
                }
            }
        }
    }
}

impl fmt::Display for SyntaxItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxItem::Token(raw) => write!(f, "{}", raw),
            SyntaxItem::Open => write!(f, "["),
            SyntaxItem::Close => write!(f, "]"),
            SyntaxItem::Bar => write!(f, "|"),
            SyntaxItem::DoubleBar => write!(f, "||"),
            SyntaxItem::DoubleAmpersand => write!(f, "&&"),
            SyntaxItem::Comma => write!(f, ","),
            SyntaxItem::Slash => write!(f, "/"),
            SyntaxItem::Multiplier(m) => write!(f, "{}", m),
        }
    }
}

/// Parses an identifier (alphanumeric characters, dashes, and underscores).
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Takes everything up to the `)` that closes an already-consumed `(`.
///
/// Nested parentheses and quoted strings are skipped over. The closing
/// parenthesis itself is left in the remaining input.
pub(crate) fn take_balanced(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&input[i..], &input[..i])),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Recognizes a function-shaped token such as `fit-content(<length>)`.
pub(crate) fn recognize_function(input: &str) -> IResult<&str, &str> {
    recognize(tuple((parse_ident, char('('), take_balanced, char(')'))))(input)
}

fn lex_type_ref(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('<'), is_not(">"), char('>')))(input)
}

fn lex_count(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// `{m}`, `{m,}` or `{m,n}`.
fn lex_braces(input: &str) -> IResult<&str, (usize, Option<usize>)> {
    let (input, (min, rest)) = delimited(
        char('{'),
        pair(lex_count, opt(preceded(char(','), opt(lex_count)))),
        char('}'),
    )(input)?;
    let max = match rest {
        None => Some(min),
        Some(max) => max,
    };
    Ok((input, (min, max)))
}

fn lex_multiplier(input: &str) -> IResult<&str, Multiplier> {
    alt((
        map(char('?'), |_| Multiplier::OPTIONAL),
        map(char('*'), |_| Multiplier::ZERO_OR_MORE),
        map(char('+'), |_| Multiplier::ONE_OR_MORE),
        map(preceded(char('#'), opt(lex_braces)), |braces| match braces {
            Some((min, max)) => Multiplier {
                min,
                max,
                comma: true,
            },
            None => Multiplier::COMMA_LIST,
        }),
        map(lex_braces, |(min, max)| Multiplier {
            min,
            max,
            comma: false,
        }),
    ))(input)
}

fn lex_item(input: &str) -> IResult<&str, SyntaxItem> {
    alt((
        map(tag("||"), |_| SyntaxItem::DoubleBar),
        map(tag("&&"), |_| SyntaxItem::DoubleAmpersand),
        map(char('|'), |_| SyntaxItem::Bar),
        map(char('['), |_| SyntaxItem::Open),
        map(char(']'), |_| SyntaxItem::Close),
        map(char(','), |_| SyntaxItem::Comma),
        map(char('/'), |_| SyntaxItem::Slash),
        map(lex_multiplier, SyntaxItem::Multiplier),
        map(lex_type_ref, |s: &str| SyntaxItem::Token(s.to_string())),
        map(recognize_function, |s: &str| SyntaxItem::Token(s.to_string())),
        map(parse_ident, |s: &str| SyntaxItem::Token(s.to_string())),
    ))(input)
}

/// Splits a syntax string into [`SyntaxItem`]s.
pub fn lex(syntax: &str) -> Result<Vec<SyntaxItem>> {
    let mut items = Vec::new();
    let mut rest = syntax.trim_start();
    while !rest.is_empty() {
        let (remaining, item) = lex_item(rest).map_err(|_| {
            VdsError::InvalidSyntax(format!("unexpected input `{}` in `{}`", rest, syntax))
        })?;
        items.push(item);
        rest = remaining.trim_start();
    }
    Ok(items)
}

/// Renders items back into a syntax string.
///
/// Multipliers and commas attach to the preceding item; everything else is
/// separated by a single space.
pub fn render(items: &[SyntaxItem]) -> String {
    let mut out = String::new();
    for item in items {
        let attached = matches!(item, SyntaxItem::Multiplier(_) | SyntaxItem::Comma);
        if !attached && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&item.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> SyntaxItem {
        SyntaxItem::Token(s.to_string())
    }

    #[test]
    fn test_lex_combinators() {
        let items = lex("a || b && c | d").unwrap();
        assert_eq!(
            items,
            vec![
                token("a"),
                SyntaxItem::DoubleBar,
                token("b"),
                SyntaxItem::DoubleAmpersand,
                token("c"),
                SyntaxItem::Bar,
                token("d"),
            ]
        );
    }

    #[test]
    fn test_lex_type_ref_with_ranges() {
        let items = lex("<number [0,∞] [0,10]>").unwrap();
        assert_eq!(items, vec![token("<number [0,∞] [0,10]>")]);
    }

    #[test]
    fn test_lex_function_keeps_arguments() {
        let items = lex("fit-content(<length-percentage [0,∞]>) | auto").unwrap();
        assert_eq!(items[0], token("fit-content(<length-percentage [0,∞]>)"));
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_lex_group_and_multipliers() {
        let items = lex("<number> [ / <number> ]? <length>{1,2} <color>#").unwrap();
        assert_eq!(items[1], SyntaxItem::Open);
        assert_eq!(items[2], SyntaxItem::Slash);
        assert_eq!(items[5], SyntaxItem::Multiplier(Multiplier::OPTIONAL));
        assert_eq!(
            items[7],
            SyntaxItem::Multiplier(Multiplier {
                min: 1,
                max: Some(2),
                comma: false
            })
        );
        assert_eq!(items[9], SyntaxItem::Multiplier(Multiplier::COMMA_LIST));
    }

    #[test]
    fn test_lex_rejects_garbage() {
        assert!(matches!(lex("a ) b"), Err(VdsError::InvalidSyntax(_))));
        assert!(lex("fit-content(<length>").is_err());
    }

    #[test]
    fn test_render_round_trip() {
        let source = "<number [0,∞]> [ / <number [0,∞]> ]?";
        assert_eq!(render(&lex(source).unwrap()), source);
        assert_eq!(render(&lex("a,b").unwrap()), "a, b");
    }

    #[test]
    fn test_multiplier_display() {
        assert_eq!(Multiplier::OPTIONAL.to_string(), "?");
        assert_eq!(Multiplier::COMMA_LIST.to_string(), "#");
        let braces = Multiplier {
            min: 2,
            max: Some(2),
            comma: false,
        };
        assert_eq!(braces.to_string(), "{2}");
    }
}
