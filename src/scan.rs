//! Character classification and isolate matching.
//!
//! The first pass over a paragraph. Loads the bidi category of every code unit,
//! sets the flags used by the later passes and finds the PDI that matches
//! every isolate initiator (BD9).

use alloc::vec::Vec;

use crate::buffer::{CharAnalysis, CharFlags};
use crate::unicode::{decode_unit, UnicodeProperties};
use crate::BidiCategory;

/// Isolates nested deeper than this are counted, but not recorded.
const MAX_ISOLATE_DEPTH: usize = 128;

/// An isolate initiator and its matching PDI.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct IsolatePair {
    pub start: usize,
    /// The PDI position or the text length when the isolate is never closed.
    pub end: usize,
}

/// Fills `analysis` and `pairs` for `text`.
///
/// `analysis` must have the same length as `text`. Pairs are stored in order
/// of their initiators.
pub(crate) fn scan<P: UnicodeProperties>(
    text: &[u32],
    props: &P,
    analysis: &mut [CharAnalysis],
    pairs: &mut Vec<IsolatePair>,
) {
    debug_assert_eq!(text.len(), analysis.len());

    pairs.clear();

    let len = text.len();
    let mut stack = [0usize; MAX_ISOLATE_DEPTH];
    let mut depth = 0;

    let mut idx = 0;
    while idx < len {
        let pos = idx;
        let (cp, width) = decode_unit(text, idx);
        idx += width;

        if width == 2 {
            analysis[pos + 1] = CharAnalysis {
                category: BidiCategory::NSM,
                ..CharAnalysis::default()
            };
        }

        let category = props.bidi_category(cp);
        let flags = match category {
            // All mirrored characters are neutrals.
            BidiCategory::ON if props.mirror_offset(cp).is_some() => CharFlags::MIRRORED,
            BidiCategory::LRE
            | BidiCategory::RLE
            | BidiCategory::LRO
            | BidiCategory::RLO
            | BidiCategory::PDF
            | BidiCategory::BN => CharFlags::MAYBE_RESET_TO_PARAGRAPH_LEVEL | CharFlags::BN,
            BidiCategory::LRI | BidiCategory::RLI | BidiCategory::FSI => {
                if depth < MAX_ISOLATE_DEPTH {
                    stack[depth] = pairs.len();
                    pairs.push(IsolatePair { start: pos, end: len });
                }
                depth += 1;
                CharFlags::MAYBE_RESET_TO_PARAGRAPH_LEVEL
            }
            BidiCategory::PDI => {
                if depth > 0 {
                    depth -= 1;
                    if depth < MAX_ISOLATE_DEPTH {
                        pairs[stack[depth]].end = pos;
                    }
                }
                CharFlags::MAYBE_RESET_TO_PARAGRAPH_LEVEL
            }
            BidiCategory::WS => CharFlags::MAYBE_RESET_TO_PARAGRAPH_LEVEL,
            BidiCategory::S | BidiCategory::B => {
                if props.is_paragraph_separator(cp) {
                    // A new paragraph closes all open isolates.
                    while depth > 0 {
                        depth -= 1;
                        if depth < MAX_ISOLATE_DEPTH {
                            pairs[stack[depth]].end = pos;
                        }
                    }
                }
                CharFlags::RESET_TO_PARAGRAPH_LEVEL
            }
            _ => CharFlags::empty(),
        };

        analysis[pos] = CharAnalysis {
            category,
            level: 0,
            flags,
        };
    }

    log::trace!("scanned {} units, {} isolate pairs", len, pairs.len());
}
