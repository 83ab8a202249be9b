//! Explicit levels and directions: rules X1-X8, with the run list of X10.
//!
//! Instead of removing explicit formatting characters (X9), they are turned
//! into `BN` and keep a place in the run list. This way the output has an
//! entry for every input character.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::buffer::CharAnalysis;
use crate::common::{first_strong_direction, next_ltr_level, next_rtl_level};
use crate::scan::IsolatePair;
use crate::unicode::UnicodeProperties;
use crate::{BidiCategory, Direction, MAX_DEPTH};

/// Where an isolated run sequence goes after a run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Continuation {
    /// The sequence ends with this run.
    None,
    /// The sequence continues with the run at this index.
    Run(usize),
    /// The run precedes an isolate that is never closed,
    /// so the sequence extends to the end of the paragraph.
    ParagraphEnd,
}

/// A maximal range of characters at the same explicit level.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct DirectionalRun {
    pub start: usize,
    /// Inclusive.
    pub end: usize,
    pub level: u8,
    pub continuation: Continuation,
    /// Set when another run continues into this one.
    pub is_continuation: bool,
    /// Set when the run has characters other than `BN`.
    pub has_content: bool,
}

#[derive(Copy, Clone, Debug)]
struct StatusEntry {
    level: u8,
    is_override: bool,
    is_isolate: bool,
    /// The run that ends with the isolate initiator.
    run_before_isolate: Option<usize>,
}

/// The directional status stack (BD16 in spirit, X1-X8 in practice).
///
/// The base entry is never popped.
struct StatusStack {
    entries: SmallVec<[StatusEntry; 16]>,
}

impl StatusStack {
    fn new(base_level: u8) -> Self {
        let mut entries = SmallVec::new();
        entries.push(StatusEntry {
            level: base_level,
            is_override: false,
            is_isolate: false,
            run_before_isolate: None,
        });

        StatusStack { entries }
    }

    #[inline]
    fn top(&self) -> &StatusEntry {
        // The base entry is always present.
        &self.entries[self.entries.len() - 1]
    }

    #[inline]
    fn depth(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn push(&mut self, entry: StatusEntry) {
        self.entries.push(entry);
    }

    #[inline]
    fn pop(&mut self) {
        if self.entries.len() > 1 {
            self.entries.pop();
        }
    }

    /// Drops everything above the base entry, marking the runs before
    /// unterminated isolates as continuing to the end of the paragraph.
    fn unwind(&mut self, runs: &mut [DirectionalRun]) {
        while self.entries.len() > 1 {
            let top = self.top();
            if top.is_isolate {
                if let Some(run) = top.run_before_isolate {
                    runs[run].continuation = Continuation::ParagraphEnd;
                }
            }
            self.entries.pop();
        }
    }
}

/// Splits the text into directional runs.
///
/// Tracks the run being built and how it links to the previous ones.
struct RunBuilder<'a> {
    runs: &'a mut Vec<DirectionalRun>,
    start: usize,
    continuation_from: Option<usize>,
    last_run_with_content: Option<usize>,
    has_content: bool,
}

impl RunBuilder<'_> {
    /// Closes the current run right before `end`.
    ///
    /// Does nothing when the run would be empty.
    fn append(&mut self, end: usize, level: u8) {
        if end <= self.start {
            return;
        }

        let idx = self.runs.len();
        let mut is_continuation = false;
        if let Some(from) = self.continuation_from {
            self.runs[from].continuation = Continuation::Run(idx);
            is_continuation = true;
        } else if let Some(last) = self.last_run_with_content {
            if self.runs[last].level == level {
                self.runs[last].continuation = Continuation::Run(idx);
                is_continuation = true;
            }
        }

        if self.has_content {
            self.last_run_with_content = Some(idx);
        }

        log::trace!("appending run {}..={} at level {}", self.start, end - 1, level);

        self.runs.push(DirectionalRun {
            start: self.start,
            end: end - 1,
            level,
            continuation: Continuation::None,
            is_continuation,
            has_content: self.has_content,
        });

        self.has_content = false;
        self.start = end;
        self.continuation_from = None;
    }
}

/// Resolves explicit levels and builds the run list.
///
/// Categories of explicit formatting characters become `BN`, or the
/// override direction when an override is active. The produced runs cover
/// the whole text.
pub(crate) fn resolve_explicit<P: UnicodeProperties>(
    text: &[u32],
    props: &P,
    analysis: &mut [CharAnalysis],
    pairs: &[IsolatePair],
    base_level: u8,
    runs: &mut Vec<DirectionalRun>,
) {
    runs.clear();

    let len = analysis.len();
    let mut stack = StatusStack::new(base_level);
    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    let mut level = base_level;
    let mut is_override = false;
    let mut next_pair = 0;

    let mut builder = RunBuilder {
        runs,
        start: 0,
        continuation_from: None,
        last_run_with_content: None,
        has_content: false,
    };

    let overridden = |level: u8| Direction::from_level(level).category();

    for i in 0..len {
        let category = analysis[i].category;
        match category {
            BidiCategory::LRE
            | BidiCategory::RLE
            | BidiCategory::LRO
            | BidiCategory::RLO
            | BidiCategory::LRI
            | BidiCategory::RLI
            | BidiCategory::FSI => {
                let is_isolate = category.is_isolate_initiator();
                let is_embedding_override =
                    matches!(category, BidiCategory::LRO | BidiCategory::RLO);

                let is_rtl = match category {
                    BidiCategory::RLE | BidiCategory::RLO | BidiCategory::RLI => true,
                    BidiCategory::FSI => {
                        fsi_direction(analysis, pairs, &mut next_pair, i).is_rtl()
                    }
                    _ => false,
                };

                if is_isolate {
                    // The initiator itself belongs to the outer level.
                    if is_override {
                        analysis[i].category = overridden(level);
                    }
                    builder.has_content = true;
                    builder.last_run_with_content = None;
                }

                let top_level = stack.top().level;
                let new_level = if is_rtl {
                    next_rtl_level(top_level)
                } else {
                    next_ltr_level(top_level)
                };

                if new_level <= MAX_DEPTH && overflow_embeddings == 0 && overflow_isolates == 0 {
                    // The index the run closed below will get.
                    let run_before_isolate = if is_isolate {
                        valid_isolates += 1;
                        Some(builder.runs.len())
                    } else {
                        None
                    };

                    builder.append(if is_isolate { i + 1 } else { i }, level);
                    log::trace!(
                        "push level {} (override: {}, isolate: {})",
                        new_level,
                        is_embedding_override,
                        is_isolate
                    );
                    stack.push(StatusEntry {
                        level: new_level,
                        is_override: is_embedding_override,
                        is_isolate,
                        run_before_isolate,
                    });
                    is_override = is_embedding_override;
                    level = new_level;
                } else if is_isolate {
                    overflow_isolates += 1;
                } else if overflow_isolates == 0 {
                    overflow_embeddings += 1;
                }

                if !is_isolate {
                    analysis[i].category = if is_override {
                        overridden(level)
                    } else {
                        BidiCategory::BN
                    };
                }
            }
            BidiCategory::PDF => {
                analysis[i].category = if is_override {
                    overridden(level)
                } else {
                    BidiCategory::BN
                };

                if overflow_isolates > 0 {
                    // Ignored.
                } else if overflow_embeddings > 0 {
                    overflow_embeddings -= 1;
                } else if !stack.top().is_isolate && stack.depth() >= 2 {
                    builder.append(i + 1, level);
                    stack.pop();
                    is_override = stack.top().is_override;
                    level = stack.top().level;
                    log::trace!("pop PDF, level {}", level);
                }
            }
            BidiCategory::PDI => {
                builder.has_content = true;
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates == 0 {
                    // Unmatched.
                } else {
                    builder.append(i, level);
                    overflow_embeddings = 0;
                    while stack.depth() > 1 && !stack.top().is_isolate {
                        stack.pop();
                    }
                    builder.continuation_from = stack.top().run_before_isolate;
                    stack.pop();
                    is_override = stack.top().is_override;
                    level = stack.top().level;
                    builder.last_run_with_content = None;
                    valid_isolates -= 1;
                    log::trace!(
                        "pop PDI, level {}, continue from {:?}",
                        level,
                        builder.continuation_from
                    );
                }

                if is_override {
                    analysis[i].category = overridden(level);
                }
            }
            BidiCategory::B => {
                // A new paragraph within the text: back to the base level
                // with a clean state. Other `B` characters are no-ops.
                if props.is_paragraph_separator(text[i]) {
                    builder.append(i, level);
                    stack.unwind(&mut builder.runs[..]);
                    builder.continuation_from = None;
                    builder.last_run_with_content = None;
                    valid_isolates = 0;
                    overflow_isolates = 0;
                    overflow_embeddings = 0;
                    is_override = false;
                    level = base_level;
                }
            }
            BidiCategory::BN => {
                if is_override {
                    analysis[i].category = overridden(level);
                }
            }
            _ => {
                builder.has_content = true;
                if is_override {
                    analysis[i].category = overridden(level);
                }
            }
        }
    }

    builder.append(len, level);
    stack.unwind(&mut builder.runs[..]);

    log::debug!("resolved explicit levels, {} runs", builder.runs.len());
}

/// Resolves the direction of an FSI at `pos` from the text it isolates.
///
/// `next_pair` is a cursor into `pairs` that only moves forward.
fn fsi_direction(
    analysis: &[CharAnalysis],
    pairs: &[IsolatePair],
    next_pair: &mut usize,
    pos: usize,
) -> Direction {
    while *next_pair < pairs.len() && pairs[*next_pair].start < pos {
        *next_pair += 1;
    }

    match pairs.get(*next_pair) {
        Some(pair) if pair.start == pos => {
            let inner = &analysis[pair.start + 1..pair.end];
            first_strong_direction(inner.iter().map(|a| a.category)).unwrap_or_default()
        }
        // Nested too deep to be recorded.
        _ => Direction::LeftToRight,
    }
}
