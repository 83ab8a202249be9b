//! Level cleanup and visual reordering: rules L1 and L2.

use alloc::vec::Vec;
use core::ops::Range;

use crate::buffer::{CharAnalysis, CharFlags};
use crate::unicode::CharExt;

/// Rule L1: resets separators, and whitespace that precedes them or
/// trails the text, to the paragraph level.
pub(crate) fn reset_whitespace_levels(analysis: &mut [CharAnalysis], base_level: u8) {
    let mut reset = true;
    for a in analysis.iter_mut().rev() {
        if a.flags.contains(CharFlags::RESET_TO_PARAGRAPH_LEVEL) {
            a.level = base_level;
            reset = true;
        } else if reset && a.flags.contains(CharFlags::MAYBE_RESET_TO_PARAGRAPH_LEVEL) {
            a.level = base_level;
        } else {
            reset = false;
        }
    }
}

/// Gives boundary neutrals the lower of the levels around them.
///
/// Explicit formatting characters are kept in the text, so they need
/// a level that does not break the runs they are in.
pub(crate) fn propagate_bn_levels(analysis: &mut [CharAnalysis], base_level: u8) {
    let mut last_level = base_level;
    let mut pending: Option<usize> = None;
    for i in 0..analysis.len() {
        if analysis[i].flags.contains(CharFlags::BN) {
            pending.get_or_insert(i);
            analysis[i].level = last_level;
            continue;
        }

        let level = analysis[i].level;
        if let Some(start) = pending.take() {
            if level < last_level {
                for a in &mut analysis[start..i] {
                    a.level = level;
                }
            }
        }

        last_level = level;
    }

    if let Some(start) = pending {
        if base_level < last_level {
            for a in &mut analysis[start..] {
                a.level = base_level;
            }
        }
    }
}

/// Computes the visual order of a line from its resolved levels (rule L2).
///
/// From the highest level down to the lowest odd one, every run of
/// characters at that level or higher is reversed. The `n`th entry of
/// the result is the logical index of the character displayed at the
/// `n`th position from the left.
///
/// # Example
///
/// ```
/// assert_eq!(rustybidi::reorder_visual(&[0, 1, 1, 0]), [0, 2, 1, 3]);
/// assert_eq!(rustybidi::reorder_visual(&[1, 2, 2, 1]), [3, 1, 2, 0]);
/// ```
pub fn reorder_visual(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();

    let (mut low, mut high) = match (levels.iter().min(), levels.iter().max()) {
        (Some(&low), Some(&high)) => (low, high),
        _ => return order,
    };

    // Reversing is only done up to the lowest odd level.
    low |= 1;

    while high >= low {
        let mut i = 0;
        while i < levels.len() {
            if levels[i] < high {
                i += 1;
                continue;
            }

            let start = i;
            while i < levels.len() && levels[i] >= high {
                i += 1;
            }
            order[start..i].reverse();
        }

        high -= 1;
    }

    order
}

/// Returns maximal ranges of characters that share the same level.
///
/// # Example
///
/// ```
/// let runs: Vec<_> = rustybidi::level_runs(&[0, 0, 1, 2, 2]).collect();
/// assert_eq!(runs, [0..2, 2..3, 3..5]);
/// ```
pub fn level_runs(levels: &[u8]) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut start = 0;
    core::iter::from_fn(move || {
        if start >= levels.len() {
            return None;
        }

        let level = levels[start];
        let len = levels[start..]
            .iter()
            .position(|&l| l != level)
            .unwrap_or(levels.len() - start);

        let run = start..start + len;
        start += len;
        Some(run)
    })
}

/// Inverts a visual order.
///
/// Turns a visual-to-logical map, as returned by [`reorder_visual`],
/// into a logical-to-visual one.
pub fn logical_to_visual(visual_to_logical: &[usize]) -> Vec<usize> {
    let mut map = alloc::vec![0; visual_to_logical.len()];
    for (visual, &logical) in visual_to_logical.iter().enumerate() {
        map[logical] = visual;
    }

    map
}

/// Inverts a logical-to-visual map.
///
/// Both maps are permutations, so this is the same operation
/// as [`logical_to_visual`].
#[inline]
pub fn visual_to_logical(logical_to_visual: &[usize]) -> Vec<usize> {
    self::logical_to_visual(logical_to_visual)
}

/// Reorders a single line of characters for display.
///
/// Applies rule L2 to `levels` and rule L4 to characters with
/// a mirrored counterpart at odd levels. Both slices must have
/// the same length.
pub fn reorder_line(chars: &[char], levels: &[u8]) -> Vec<char> {
    debug_assert_eq!(chars.len(), levels.len());

    reorder_visual(levels)
        .into_iter()
        .map(|idx| {
            let c = chars[idx];
            if levels[idx] & 1 == 1 {
                c.mirrored().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
