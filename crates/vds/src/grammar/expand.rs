//! Expansion of a combinator tree into concrete variants.
//!
//! Each node expands into a list of pieces. A piece is a flat run of token
//! references and explicit separators; adjacent tokens without an explicit
//! separator are space-separated.

use std::collections::HashSet;

use crate::context::ExpansionLimits;
use crate::error::{Result, VdsError};
use crate::grammar::tree::{Combinator, Node};
use crate::lexer::Multiplier;
use crate::separator::Separator;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum PieceItem {
    Token(String),
    Separator(Separator),
}

pub(crate) type Piece = Vec<PieceItem>;

/// Reduces a piece to its tokens and the separator at each boundary.
///
/// Separators before the first or after the last token are dropped; the
/// first explicit separator at a boundary wins over the implicit space.
pub(crate) fn normalize(piece: &[PieceItem]) -> (Vec<String>, Vec<Separator>) {
    let mut tokens = Vec::new();
    let mut separators = Vec::new();
    let mut pending: Option<Separator> = None;
    for item in piece {
        match item {
            PieceItem::Token(token) => {
                if !tokens.is_empty() {
                    separators.push(pending.take().unwrap_or_default());
                }
                pending = None;
                tokens.push(token.clone());
            }
            PieceItem::Separator(separator) => {
                if !tokens.is_empty() && pending.is_none() {
                    pending = Some(*separator);
                }
            }
        }
    }
    (tokens, separators)
}

/// Joins tokens with the text of each separator.
pub(crate) fn join_tokens<S: AsRef<str>>(tokens: &[S], separators: &[Separator]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            let separator = separators.get(i - 1).copied().unwrap_or_default();
            out.push_str(separator.as_str());
        }
        out.push_str(token.as_ref());
    }
    out
}

fn render(piece: &[PieceItem]) -> String {
    let (tokens, separators) = normalize(piece);
    join_tokens(&tokens, &separators)
}

/// Distinct pieces, by rendered form, gathered up to a limit.
struct Accumulator {
    limit: usize,
    seen: HashSet<String>,
    pieces: Vec<(usize, Piece)>,
    overflowed: bool,
}

impl Accumulator {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            pieces: Vec::new(),
            overflowed: false,
        }
    }

    /// Adds the pieces not seen before. Returns `false` once a new piece
    /// no longer fits.
    fn extend(&mut self, pieces: Vec<Piece>) -> bool {
        for piece in pieces {
            let rendered = render(&piece);
            if self.seen.contains(&rendered) {
                continue;
            }
            if self.pieces.len() >= self.limit {
                self.overflowed = true;
                return false;
            }
            let length = rendered.chars().count();
            self.seen.insert(rendered);
            self.pieces.push((length, piece));
        }
        true
    }

    /// The pieces in insertion order.
    fn into_pieces(self) -> Vec<Piece> {
        self.pieces.into_iter().map(|(_, piece)| piece).collect()
    }

    /// The pieces ordered by rendered length, keeping insertion order among
    /// pieces of equal length.
    fn into_sorted(mut self) -> Vec<Piece> {
        self.pieces.sort_by_key(|(length, _)| *length);
        self.into_pieces()
    }
}

/// Every non-empty subset of `0..n`, as sorted index lists, smallest
/// subsets first.
fn subsets(n: usize) -> Vec<Vec<usize>> {
    let Some(end) = u32::try_from(n).ok().and_then(|n| 1usize.checked_shl(n)) else {
        return Vec::new();
    };
    let mut out: Vec<Vec<usize>> = (1..end)
        .map(|mask| (0..n).filter(|bit| mask & (1 << bit) != 0).collect())
        .collect();
    out.sort_by_key(Vec::len);
    out
}

/// Every ordering of `indices`, in lexicographic order of positions.
fn permutations(indices: &[usize]) -> Vec<Vec<usize>> {
    if indices.len() <= 1 {
        return vec![indices.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &first) in indices.iter().enumerate() {
        let mut rest = indices.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

pub(crate) struct Expander<'a> {
    limits: &'a ExpansionLimits,
    truncated: bool,
}

impl<'a> Expander<'a> {
    pub(crate) fn new(limits: &'a ExpansionLimits) -> Self {
        Self {
            limits,
            truncated: false,
        }
    }

    /// Whether any intermediate result was cut at `max_variants`.
    pub(crate) fn truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn expand(&mut self, node: &Node) -> Result<Vec<Piece>> {
        match node {
            Node::Token(raw) => Ok(vec![vec![PieceItem::Token(raw.clone())]]),
            Node::Separator(separator) => Ok(vec![vec![PieceItem::Separator(*separator)]]),
            Node::Group {
                combinator,
                children,
            } => self.expand_group(*combinator, children),
            Node::Repeat { node, multiplier } => self.expand_repeat(node, multiplier),
        }
    }

    fn expand_children(&mut self, children: &[Node]) -> Result<Vec<Vec<Piece>>> {
        children.iter().map(|child| self.expand(child)).collect()
    }

    fn expand_group(&mut self, combinator: Combinator, children: &[Node]) -> Result<Vec<Piece>> {
        if matches!(combinator, Combinator::AnySubset | Combinator::AllAnyOrder) {
            self.check_operands(children.len())?;
        }
        let expanded = self.expand_children(children)?;
        let operands: Vec<&[Piece]> = expanded.iter().map(Vec::as_slice).collect();

        let pieces = match combinator {
            Combinator::Sequence => self.cross(&operands, None),
            Combinator::List => self.cross(&operands, Some(Separator::Comma)),
            Combinator::ExactlyOne => {
                let mut all = Accumulator::new(self.limits.max_variants);
                for pieces in &expanded {
                    if !all.extend(pieces.clone()) {
                        break;
                    }
                }
                self.finish(all).into_sorted()
            }
            Combinator::AnySubset => {
                let mut all = Accumulator::new(self.limits.max_variants);
                'subsets: for subset in subsets(operands.len()) {
                    for order in permutations(&subset) {
                        if !self.extend_ordered(&mut all, &operands, &order) {
                            break 'subsets;
                        }
                    }
                }
                self.finish(all).into_sorted()
            }
            Combinator::AllAnyOrder => {
                let indices: Vec<usize> = (0..operands.len()).collect();
                let mut all = Accumulator::new(self.limits.max_variants);
                for order in permutations(&indices) {
                    if !self.extend_ordered(&mut all, &operands, &order) {
                        break;
                    }
                }
                self.finish(all).into_sorted()
            }
        };
        log::trace!("{:?} group expanded to {} pieces", combinator, pieces.len());
        Ok(pieces)
    }

    fn extend_ordered(&mut self, all: &mut Accumulator, operands: &[&[Piece]], order: &[usize]) -> bool {
        let ordered: Vec<&[Piece]> = order.iter().map(|&i| operands[i]).collect();
        let crossed = self.cross(&ordered, None);
        all.extend(crossed)
    }

    fn expand_repeat(&mut self, node: &Node, multiplier: &Multiplier) -> Result<Vec<Piece>> {
        let limit = self.limits.max_repeat;
        let min = multiplier.min.min(limit);
        let max = multiplier.max.unwrap_or(limit).clamp(min, limit);
        let joiner = multiplier.comma.then_some(Separator::Comma);

        let pieces = self.expand(node)?;
        let mut all = Accumulator::new(self.limits.max_variants);
        for count in min..=max {
            let operands = vec![pieces.as_slice(); count];
            let crossed = self.cross(&operands, joiner);
            if !all.extend(crossed) {
                break;
            }
        }
        Ok(self.finish(all).into_pieces())
    }

    /// The cross product of the operands' pieces, in order, stopping once
    /// `max_variants` pieces are built.
    ///
    /// With a `joiner`, that separator is placed between non-empty operands.
    fn cross(&mut self, operands: &[&[Piece]], joiner: Option<Separator>) -> Vec<Piece> {
        let limit = self.limits.max_variants;
        let mut acc: Vec<Piece> = vec![Vec::new()];
        for pieces in operands {
            let mut next = Vec::with_capacity(acc.len().saturating_mul(pieces.len()).min(limit));
            'fill: for prefix in &acc {
                for piece in pieces.iter() {
                    if next.len() >= limit {
                        self.mark_truncated(limit);
                        break 'fill;
                    }
                    let mut combined = prefix.clone();
                    if let Some(joiner) = joiner {
                        if !prefix.is_empty() && !piece.is_empty() {
                            combined.push(PieceItem::Separator(joiner));
                        }
                    }
                    combined.extend(piece.iter().cloned());
                    next.push(combined);
                }
            }
            acc = next;
        }
        acc
    }

    fn check_operands(&self, operands: usize) -> Result<()> {
        if operands > self.limits.max_operands {
            return Err(VdsError::TooManyOperands {
                operands,
                limit: self.limits.max_operands,
            });
        }
        Ok(())
    }

    fn finish(&mut self, all: Accumulator) -> Accumulator {
        if all.overflowed {
            self.mark_truncated(all.limit);
        }
        all
    }

    fn mark_truncated(&mut self, limit: usize) {
        if !self.truncated {
            log::warn!("grammar expansion truncated at {} variants", limit);
        }
        self.truncated = true;
    }
}
