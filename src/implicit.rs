//! Implicit levels: rules X10, W1-W7, N0-N2, I1 and I2.
//!
//! Every isolated run sequence is resolved on its own. Boundary neutrals stay
//! in the sequence, but are skipped by all the rules and keep the `BN`
//! category. Their levels are fixed up after all sequences are resolved.

use alloc::vec::Vec;

use crate::buffer::CharAnalysis;
use crate::common::next_ltr_level;
use crate::explicit::{Continuation, DirectionalRun};
use crate::sequence::IsolatedRunSequence;
use crate::unicode::{closes_same_bracket, decode_unit, BracketType, UnicodeProperties};
use crate::{BidiCategory, Direction};

/// Bracket pairs nested deeper than this stop the N0 processing
/// of a whole sequence (BD16).
const MAX_BRACKET_DEPTH: usize = 63;

/// An isolated run sequence with its boundary types.
struct Sequence<'a> {
    runs: &'a [DirectionalRun],
    first: usize,
    level: u8,
    sos: BidiCategory,
    eos: BidiCategory,
}

impl<'a> Sequence<'a> {
    /// Rule X10: computes `sos` and `eos` of the sequence starting at `first`.
    fn new(runs: &'a [DirectionalRun], first: usize, base_level: u8) -> Self {
        let level = runs[first].level;

        let level_before = runs[..first]
            .iter()
            .rev()
            .find(|run| run.has_content)
            .map_or(base_level, |run| run.level);

        let mut last = first;
        while let Continuation::Run(next) = runs[last].continuation {
            last = next;
        }

        let level_after = if runs[last].continuation == Continuation::ParagraphEnd {
            base_level
        } else {
            runs[last + 1..]
                .iter()
                .find(|run| run.has_content)
                .map_or(base_level, |run| run.level)
        };

        Sequence {
            runs,
            first,
            level,
            sos: Direction::from_level(level.max(level_before)).category(),
            eos: Direction::from_level(level.max(level_after)).category(),
        }
    }

    #[inline]
    fn iter(&self) -> IsolatedRunSequence<'a> {
        IsolatedRunSequence::new(self.runs, self.first)
    }

    /// The strong category of the embedding direction.
    #[inline]
    fn embedding_category(&self) -> BidiCategory {
        Direction::from_level(self.level).category()
    }
}

/// Resolves categories and levels of all isolated run sequences.
pub(crate) fn resolve_implicit<P: UnicodeProperties>(
    text: &[u32],
    props: &P,
    analysis: &mut [CharAnalysis],
    runs: &[DirectionalRun],
    base_level: u8,
    brackets: &mut Vec<BracketPair>,
) {
    for (i, run) in runs.iter().enumerate() {
        if run.is_continuation {
            continue;
        }

        let seq = Sequence::new(runs, i, base_level);
        log::trace!(
            "isolated run sequence at run {}, level {}, sos {}, eos {}",
            i,
            seq.level,
            seq.sos,
            seq.eos
        );

        resolve_weak_types(&seq, analysis);
        resolve_european_terminators(&seq, analysis);
        resolve_european_numbers(&seq, analysis);
        resolve_brackets(&seq, text, props, analysis, brackets);
        resolve_neutral_types(&seq, analysis);
        assign_levels(&seq, analysis);
    }
}

/// Rules W1, W2, W3 and W4.
fn resolve_weak_types(seq: &Sequence, analysis: &mut [CharAnalysis]) {
    // W1-W3
    let mut last = seq.sos;
    let mut last_strong = seq.sos;
    for pos in seq.iter() {
        let original = analysis[pos].category;
        let mut current = match original {
            BidiCategory::NSM | BidiCategory::BN => last,
            _ => original,
        };

        if current == BidiCategory::EN && last_strong == BidiCategory::AL {
            current = BidiCategory::AN;
        }

        let mut resolved = current;
        match current {
            BidiCategory::L | BidiCategory::R => last_strong = current,
            BidiCategory::AL => {
                last_strong = current;
                resolved = BidiCategory::R;
            }
            _ => {}
        }

        if original != BidiCategory::BN {
            analysis[pos].category = resolved;
        }

        // A mark after an isolate control is a neutral.
        last = if current.is_isolate_control() {
            BidiCategory::ON
        } else {
            current
        };
    }

    // W4
    let mut iter = seq.iter();
    let mut last_pos = match iter.next() {
        Some(pos) => pos,
        None => return,
    };
    let mut last = analysis[last_pos].category;
    let mut second_last = seq.sos;
    for pos in iter {
        let current = analysis[pos].category;
        if current == BidiCategory::BN {
            continue;
        }

        let separated = match last {
            BidiCategory::ES => current == BidiCategory::EN && second_last == BidiCategory::EN,
            BidiCategory::CS => {
                matches!(current, BidiCategory::EN | BidiCategory::AN) && second_last == current
            }
            _ => false,
        };

        if separated {
            last = current;
            analysis[last_pos].category = current;
        }

        second_last = last;
        last = current;
        last_pos = pos;
    }
}

/// Rule W5.
fn resolve_european_terminators(seq: &Sequence, analysis: &mut [CharAnalysis]) {
    let mut iter = seq.iter();
    let mut terminators: Option<IsolatedRunSequence> = None;

    let mark = iter.clone();
    let mut last = match iter.next() {
        Some(pos) => analysis[pos].category,
        None => return,
    };
    if matches!(last, BidiCategory::ET | BidiCategory::BN) {
        terminators = Some(mark);
    }

    loop {
        let mark = iter.clone();
        let pos = match iter.next() {
            Some(pos) => pos,
            None => break,
        };

        let mut current = analysis[pos].category;
        if current == BidiCategory::BN {
            continue;
        }

        if current == BidiCategory::ET {
            if last == BidiCategory::EN {
                current = BidiCategory::EN;
                analysis[pos].category = current;
            } else if terminators.is_none() {
                terminators = Some(mark);
            }
        } else if let Some(start) = terminators.take() {
            if current == BidiCategory::EN {
                for idx in start.take_while(|&idx| idx != pos) {
                    if analysis[idx].category != BidiCategory::BN {
                        analysis[idx].category = BidiCategory::EN;
                    }
                }
            }
        }

        last = current;
    }
}

/// Rules W6 and W7.
fn resolve_european_numbers(seq: &Sequence, analysis: &mut [CharAnalysis]) {
    let mut last_strong = seq.sos;
    for pos in seq.iter() {
        let current = analysis[pos].category;
        match current {
            BidiCategory::ET | BidiCategory::ES | BidiCategory::CS => {
                analysis[pos].category = BidiCategory::ON;
            }
            BidiCategory::L | BidiCategory::R => last_strong = current,
            BidiCategory::EN if last_strong == BidiCategory::L => {
                analysis[pos].category = BidiCategory::L;
            }
            _ => {}
        }
    }
}

/// A matched bracket pair. `close` is `None` until a closing bracket is found.
#[derive(Copy, Clone, Debug)]
pub(crate) struct BracketPair {
    open: usize,
    close: Option<usize>,
}

/// Locates bracket pairs within a sequence (BD16).
///
/// Pairs are sorted by the position of the opening bracket.
/// Returns no pairs when the bracket stack overflows.
fn find_bracket_pairs<P: UnicodeProperties>(
    seq: &Sequence,
    text: &[u32],
    props: &P,
    analysis: &[CharAnalysis],
    pairs: &mut Vec<BracketPair>,
) {
    pairs.clear();

    // The expected closing bracket and the index of the pair.
    let mut stack = [(0u32, 0usize); MAX_BRACKET_DEPTH];
    let mut depth = 0;

    for pos in seq.iter() {
        if analysis[pos].category != BidiCategory::ON {
            continue;
        }

        let cp = text[pos];
        let offset = match props.mirror_offset(cp) {
            Some(offset) => offset,
            None => continue,
        };

        match props.bracket_type(cp) {
            BracketType::Open => {
                if depth == MAX_BRACKET_DEPTH {
                    log::trace!("bracket stack overflow at {}", pos);
                    pairs.clear();
                    return;
                }

                let closing = (cp as i64 + i64::from(offset)) as u32;
                stack[depth] = (closing, pairs.len());
                depth += 1;
                pairs.push(BracketPair {
                    open: pos,
                    close: None,
                });
            }
            BracketType::Close => {
                let matched = stack[..depth]
                    .iter()
                    .rposition(|&(closing, _)| closes_same_bracket(closing, cp));
                if let Some(idx) = matched {
                    pairs[stack[idx].1].close = Some(pos);
                    depth = idx;
                }
            }
            BracketType::None => {}
        }
    }
}

/// Rule N0.
fn resolve_brackets<P: UnicodeProperties>(
    seq: &Sequence,
    text: &[u32],
    props: &P,
    analysis: &mut [CharAnalysis],
    pairs: &mut Vec<BracketPair>,
) {
    find_bracket_pairs(seq, text, props, analysis, pairs);
    if pairs.is_empty() {
        return;
    }

    let embedding = seq.embedding_category();
    let mut last_strong = seq.sos;
    let mut iter = seq.iter();

    for pair in pairs.iter() {
        let close = match pair.close {
            Some(close) => close,
            None => continue,
        };

        let resolved = match contained_direction(analysis, pair.open, close, embedding) {
            None => {
                log::trace!("bracket pair {}/{} stays neutral", pair.open, close);
                continue;
            }
            Some(dir) if dir == embedding => embedding,
            Some(_) => {
                // N0 c: the context before the opening bracket decides.
                while let Some(pos) = iter.peek() {
                    if pos >= pair.open {
                        break;
                    }

                    match analysis[pos].category {
                        BidiCategory::R | BidiCategory::EN | BidiCategory::AN => {
                            last_strong = BidiCategory::R;
                        }
                        BidiCategory::L => last_strong = BidiCategory::L,
                        _ => {}
                    }
                    iter.next();
                }

                last_strong
            }
        };

        log::trace!("bracket pair {}/{} resolved to {}", pair.open, close, resolved);
        analysis[pair.open].category = resolved;
        analysis[close].category = resolved;

        // Marks that follow a bracket take its new type.
        let mut idx = close + 1;
        while idx < text.len() {
            let (cp, width) = decode_unit(text, idx);
            if props.bidi_category(cp) != BidiCategory::NSM {
                break;
            }

            for unit in &mut analysis[idx..idx + width] {
                unit.category = resolved;
            }
            idx += width;
        }
    }
}

/// Returns the strong direction found between two brackets, if any.
///
/// Numbers count as `R`. A direction matching the embedding one wins.
fn contained_direction(
    analysis: &[CharAnalysis],
    open: usize,
    close: usize,
    embedding: BidiCategory,
) -> Option<BidiCategory> {
    let mut isolates = 0usize;
    let mut contained = None;
    for a in &analysis[open + 1..close] {
        let category = a.category;
        if isolates > 0 {
            if category == BidiCategory::PDI {
                isolates -= 1;
            }
            continue;
        }

        let strong = match category {
            BidiCategory::L => BidiCategory::L,
            BidiCategory::R | BidiCategory::AN | BidiCategory::EN => BidiCategory::R,
            BidiCategory::LRI | BidiCategory::RLI | BidiCategory::FSI => {
                isolates += 1;
                continue;
            }
            _ => continue,
        };

        contained = Some(strong);
        if strong == embedding {
            break;
        }
    }

    contained
}

/// Rules N1 and N2.
fn resolve_neutral_types(seq: &Sequence, analysis: &mut [CharAnalysis]) {
    let embedding = seq.embedding_category();
    let mut last_strong = seq.sos;
    let mut neutrals: Option<IsolatedRunSequence> = None;
    let mut iter = seq.iter();

    loop {
        let mark = iter.clone();
        let pos = iter.next();

        let current = pos.map_or(seq.eos, |pos| analysis[pos].category);
        let strong = match current {
            BidiCategory::L => Some(BidiCategory::L),
            BidiCategory::R | BidiCategory::EN | BidiCategory::AN => Some(BidiCategory::R),
            _ => None,
        };

        match strong {
            Some(strong) => {
                if let Some(start) = neutrals.take() {
                    let resolved = if strong == last_strong {
                        strong
                    } else {
                        embedding
                    };

                    for idx in start.take_while(|&idx| Some(idx) != pos) {
                        if analysis[idx].category != BidiCategory::BN {
                            analysis[idx].category = resolved;
                        }
                    }
                }

                last_strong = strong;
            }
            None => {
                if neutrals.is_none() {
                    neutrals = Some(mark);
                }
            }
        }

        if pos.is_none() {
            break;
        }
    }
}

/// Rules I1 and I2.
fn assign_levels(seq: &Sequence, analysis: &mut [CharAnalysis]) {
    let level = seq.level;
    for pos in seq.iter() {
        let a = &mut analysis[pos];
        a.level = match a.category {
            BidiCategory::L => (level + 1) & !1,
            BidiCategory::R => level | 1,
            BidiCategory::AN | BidiCategory::EN => next_ltr_level(level),
            _ => level,
        };
    }
}
