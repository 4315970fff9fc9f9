//! Token references and their canonical forms.
//!
//! A token reference is how a grammar names a primitive symbol:
//!
//! - Keywords: `auto`, `min-content`
//! - Typed references with optional numeric ranges: `<length>`,
//!   `<number [0,∞]>`, `<number [0,∞] [0,10]>`
//! - Function-shaped references: `fit-content(<length-percentage>)`
//!
//! Canonicalization drops everything that does not affect which token is
//! meant: `<length [0,∞]>` becomes `<length>` and
//! `fit-content(<length>)` becomes `fit-content()`.

use std::fmt;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, tuple},
};

use crate::error::{Result, VdsError};
use crate::lexer::{parse_ident, take_balanced};

/// An inclusive numeric bound attached to a typed reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const UNBOUNDED: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The overlap of two ranges.
    pub fn intersect(&self, other: &Range) -> Range {
        Range {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn fmt_bound(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == f64::INFINITY {
        write!(f, "∞")
    } else if value == f64::NEG_INFINITY {
        write!(f, "-∞")
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        fmt_bound(f, self.min)?;
        write!(f, ",")?;
        fmt_bound(f, self.max)?;
        write!(f, "]")
    }
}

/// Parameters embedded in a token reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenParams {
    /// The intersection of every bracketed range on the reference.
    Range { min: f64, max: f64 },
    /// The argument syntax of a function-shaped reference.
    Function { syntax: String },
}

/// A parsed token reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenRef {
    Keyword(String),
    /// `<name ranges*>`; `name` excludes the angle brackets.
    Type { name: String, ranges: Vec<Range> },
    /// `name(args)`
    Function { name: String, args: String },
}

impl TokenRef {
    /// Parses a single token reference.
    pub fn parse(raw: &str) -> Result<TokenRef> {
        let raw = raw.trim();
        all_consuming(parse_token_ref)(raw)
            .map(|(_, reference)| reference)
            .map_err(|_| VdsError::InvalidSyntax(format!("invalid token reference `{}`", raw)))
    }

    /// The canonical key: `<length>`, `fit-content()` or the keyword itself.
    pub fn canonical(&self) -> String {
        match self {
            TokenRef::Keyword(keyword) => keyword.clone(),
            TokenRef::Type { name, .. } => format!("<{}>", name),
            TokenRef::Function { name, .. } => format!("{}()", name),
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenRef::Keyword(_))
    }

    pub fn ranges(&self) -> &[Range] {
        match self {
            TokenRef::Type { ranges, .. } => ranges,
            _ => &[],
        }
    }

    /// The effective range, if the reference carries any.
    pub fn range(&self) -> Option<Range> {
        let ranges = self.ranges();
        if ranges.is_empty() {
            return None;
        }
        Some(
            ranges
                .iter()
                .fold(Range::UNBOUNDED, |acc, range| acc.intersect(range)),
        )
    }

    pub fn params(&self) -> Option<TokenParams> {
        match self {
            TokenRef::Keyword(_) => None,
            TokenRef::Type { .. } => self
                .range()
                .map(|range| TokenParams::Range {
                    min: range.min,
                    max: range.max,
                }),
            TokenRef::Function { args, .. } => Some(TokenParams::Function {
                syntax: args.clone(),
            }),
        }
    }

    /// Returns a copy with `extra` ranges appended after the reference's own.
    ///
    /// Only typed references carry ranges; keywords and functions are
    /// returned unchanged.
    pub fn with_ranges(&self, extra: &[Range]) -> TokenRef {
        match self {
            TokenRef::Type { name, ranges } if !extra.is_empty() => TokenRef::Type {
                name: name.clone(),
                ranges: ranges.iter().chain(extra).copied().collect(),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenRef::Keyword(keyword) => write!(f, "{}", keyword),
            TokenRef::Type { name, ranges } => {
                write!(f, "<{}", name)?;
                for range in ranges {
                    write!(f, " {}", range)?;
                }
                write!(f, ">")
            }
            TokenRef::Function { name, args } => write!(f, "{}({})", name, args),
        }
    }
}

/// Reduces a raw token reference to its canonical form.
pub fn canonicalize(raw: &str) -> Result<String> {
    Ok(TokenRef::parse(raw)?.canonical())
}

/// Parses the optional range or function parameters of a raw reference.
pub fn extract_params(raw: &str) -> Result<Option<TokenParams>> {
    Ok(TokenRef::parse(raw)?.params())
}

/// Parse a floating point or integer number.
pub(crate) fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(alt((char('-'), char('+')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn parse_bound(input: &str) -> IResult<&str, f64> {
    alt((
        map(alt((tag("-∞"), tag_no_case("-inf"))), |_| f64::NEG_INFINITY),
        map(alt((tag("∞"), tag_no_case("inf"))), |_| f64::INFINITY),
        parse_number,
    ))(input)
}

/// `[min,max]`; either bound may be omitted.
fn parse_range(input: &str) -> IResult<&str, Range> {
    map(
        delimited(
            pair(char('['), multispace0),
            separated_pair(
                opt(parse_bound),
                tuple((multispace0, char(','), multispace0)),
                opt(parse_bound),
            ),
            pair(multispace0, char(']')),
        ),
        |(min, max)| Range {
            min: min.unwrap_or(f64::NEG_INFINITY),
            max: max.unwrap_or(f64::INFINITY),
        },
    )(input)
}

fn parse_type_ref(input: &str) -> IResult<&str, TokenRef> {
    let (input, _) = pair(char('<'), multispace0)(input)?;
    let (input, name) =
        take_while1(|c: char| !c.is_whitespace() && c != '[' && c != '>')(input)?;
    let (input, ranges) = many0(preceded(multispace0, parse_range))(input)?;
    let (input, _) = pair(multispace0, char('>'))(input)?;
    Ok((
        input,
        TokenRef::Type {
            name: name.to_string(),
            ranges,
        },
    ))
}

fn parse_function_ref(input: &str) -> IResult<&str, TokenRef> {
    let (input, name) = parse_ident(input)?;
    let (input, args) = delimited(char('('), take_balanced, char(')'))(input)?;
    Ok((
        input,
        TokenRef::Function {
            name: name.to_string(),
            args: args.trim().to_string(),
        },
    ))
}

fn parse_token_ref(input: &str) -> IResult<&str, TokenRef> {
    alt((
        parse_type_ref,
        parse_function_ref,
        map(parse_ident, |s: &str| TokenRef::Keyword(s.to_string())),
    ))(input)
}
