//! Combinator tree construction.
//!
//! Splits a lexed syntax on its lowest-precedence top-level combinator and
//! recurses into each operand. Precedence, lowest first:
//!
//! 1. `,`  alternation list
//! 2. `|`  exactly one
//! 3. `||` any non-empty subset, any order
//! 4. `&&` all, any order
//! 5. juxtaposition (and `/`) sequence

use crate::error::{Result, VdsError};
use crate::lexer::{Multiplier, SyntaxItem, render};
use crate::separator::Separator;

/// How the children of a group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a, b`: every operand, joined with commas.
    List,
    /// `a | b`
    ExactlyOne,
    /// `a || b`
    AnySubset,
    /// `a && b`
    AllAnyOrder,
    /// `a b`
    Sequence,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Token(String),
    Separator(Separator),
    Group {
        combinator: Combinator,
        children: Vec<Node>,
    },
    Repeat {
        node: Box<Node>,
        multiplier: Multiplier,
    },
}

const SPLIT_ORDER: [(Combinator, SyntaxItem); 4] = [
    (Combinator::List, SyntaxItem::Comma),
    (Combinator::ExactlyOne, SyntaxItem::Bar),
    (Combinator::AnySubset, SyntaxItem::DoubleBar),
    (Combinator::AllAnyOrder, SyntaxItem::DoubleAmpersand),
];

/// Builds the combinator tree for a lexed syntax.
pub fn parse(items: &[SyntaxItem]) -> Result<Node> {
    for (combinator, delimiter) in &SPLIT_ORDER {
        let operands = split_top_level(items, delimiter)?;
        if operands.len() < 2 {
            continue;
        }
        if operands.iter().any(|operand| operand.is_empty()) {
            return Err(VdsError::InvalidSyntax(format!(
                "dangling `{}` in `{}`",
                delimiter,
                render(items)
            )));
        }
        let children = operands
            .into_iter()
            .map(parse)
            .collect::<Result<Vec<_>>>()?;
        return Ok(Node::Group {
            combinator: *combinator,
            children,
        });
    }
    parse_sequence(items)
}

fn split_top_level<'a>(
    items: &'a [SyntaxItem],
    delimiter: &SyntaxItem,
) -> Result<Vec<&'a [SyntaxItem]>> {
    let mut operands = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, item) in items.iter().enumerate() {
        match item {
            SyntaxItem::Open => depth += 1,
            SyntaxItem::Close => {
                depth = depth.checked_sub(1).ok_or_else(|| unbalanced(items))?;
            }
            item if depth == 0 && item == delimiter => {
                operands.push(&items[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced(items));
    }
    operands.push(&items[start..]);
    Ok(operands)
}

fn unbalanced(items: &[SyntaxItem]) -> VdsError {
    VdsError::InvalidSyntax(format!("unbalanced brackets in `{}`", render(items)))
}

fn matching_close(items: &[SyntaxItem], open: usize) -> Result<usize> {
    let mut depth = 0usize;
    for (i, item) in items.iter().enumerate().skip(open) {
        match item {
            SyntaxItem::Open => depth += 1,
            SyntaxItem::Close => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(unbalanced(items))
}

fn parse_sequence(items: &[SyntaxItem]) -> Result<Node> {
    let mut children = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let mut node = match &items[i] {
            SyntaxItem::Token(raw) => {
                i += 1;
                Node::Token(raw.clone())
            }
            SyntaxItem::Slash => {
                i += 1;
                Node::Separator(Separator::Slash)
            }
            SyntaxItem::Open => {
                let close = matching_close(items, i)?;
                let inner = parse(&items[i + 1..close])?;
                i = close + 1;
                inner
            }
            other => {
                return Err(VdsError::InvalidSyntax(format!(
                    "unexpected `{}` in `{}`",
                    other,
                    render(items)
                )));
            }
        };
        while let Some(SyntaxItem::Multiplier(multiplier)) = items.get(i) {
            node = Node::Repeat {
                node: Box::new(node),
                multiplier: *multiplier,
            };
            i += 1;
        }
        children.push(node);
    }

    if children.len() == 1 && !matches!(children[0], Node::Separator(_)) {
        return Ok(children.remove(0));
    }
    Ok(Node::Group {
        combinator: Combinator::Sequence,
        children,
    })
}
