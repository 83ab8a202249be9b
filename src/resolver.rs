use alloc::vec::Vec;

use crate::buffer::{BidiBuffer, BidiParagraph, CharAnalysis, ResolveFlags};
use crate::common::first_strong_direction;
use crate::explicit::{resolve_explicit, DirectionalRun};
use crate::implicit::{resolve_implicit, BracketPair};
use crate::reorder::{propagate_bn_levels, reset_whitespace_levels};
use crate::scan::{scan, IsolatePair};
use crate::unicode::{decode_unit, UnicodeData, UnicodeProperties};
use crate::{BidiCategory, Direction};

/// Resolves paragraphs, reusing its scratch storage between calls.
///
/// Use [`resolve_buffer`] for a one-off resolution. A resolver is worth
/// keeping around when many paragraphs are processed, or when the
/// character properties come from a custom [`UnicodeProperties`] source.
///
/// # Example
///
/// ```
/// use rustybidi::{BidiBuffer, BidiResolver, Direction};
///
/// let mut resolver = BidiResolver::new();
/// let mut buffer = BidiBuffer::new();
/// buffer.push_str("abc \u{05D0}\u{05D1}");
/// buffer.set_direction(Direction::LeftToRight);
///
/// let paragraph = resolver.resolve(buffer);
/// assert_eq!(paragraph.levels(), [0, 0, 0, 0, 1, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct BidiResolver<P = UnicodeData> {
    props: P,
    pairs: Vec<IsolatePair>,
    runs: Vec<DirectionalRun>,
    brackets: Vec<BracketPair>,
}

impl BidiResolver<UnicodeData> {
    /// Creates a resolver backed by the bundled Unicode tables.
    pub fn new() -> Self {
        Self::with_properties(UnicodeData)
    }
}

impl Default for BidiResolver<UnicodeData> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: UnicodeProperties> BidiResolver<P> {
    /// Creates a resolver that uses custom character properties.
    pub fn with_properties(props: P) -> Self {
        BidiResolver {
            props,
            pairs: Vec::new(),
            runs: Vec::new(),
            brackets: Vec::new(),
        }
    }

    /// Returns the character properties source.
    #[inline]
    pub fn properties(&self) -> &P {
        &self.props
    }

    /// Resolves embedding levels of a paragraph.
    ///
    /// When the buffer has no direction set, it is detected from the text
    /// using rules P2 and P3, falling back to left-to-right.
    pub fn resolve(&mut self, buffer: BidiBuffer) -> BidiParagraph {
        let BidiBuffer {
            text,
            direction,
            flags,
        } = buffer;

        let direction = direction
            .or_else(|| paragraph_direction_in(&text, &self.props))
            .unwrap_or_default();
        let base_level = direction.base_level();

        let mut analysis = Vec::new();
        analysis.resize(text.len(), CharAnalysis::default());

        scan(&text, &self.props, &mut analysis, &mut self.pairs);

        if !flags.contains(ResolveFlags::NO_FAST_PATH)
            && !requires_bidi_in(&text, &self.props, base_level)
        {
            log::debug!("no bidi content in {} units, skipping resolution", text.len());
            for a in &mut analysis {
                if a.category != BidiCategory::BN {
                    a.category = BidiCategory::L;
                }
            }
        } else {
            log::debug!(
                "resolving {} units at paragraph level {}",
                text.len(),
                base_level
            );

            resolve_explicit(
                &text,
                &self.props,
                &mut analysis,
                &self.pairs,
                base_level,
                &mut self.runs,
            );

            if log::log_enabled!(log::Level::Trace) {
                for (i, run) in self.runs.iter().enumerate() {
                    log::trace!(
                        "run {}: {}..={} level {} continuation {:?}",
                        i,
                        run.start,
                        run.end,
                        run.level,
                        run.continuation
                    );
                }
            }

            resolve_implicit(
                &text,
                &self.props,
                &mut analysis,
                &self.runs,
                base_level,
                &mut self.brackets,
            );

            if !flags.contains(ResolveFlags::SKIP_LINE_RESET) {
                reset_whitespace_levels(&mut analysis, base_level);
            }

            propagate_bn_levels(&mut analysis, base_level);
        }

        BidiParagraph {
            text,
            analysis,
            direction,
            flags,
        }
    }
}

/// Resolves a paragraph using the bundled Unicode tables.
///
/// Consumes the buffer and reuses its allocation for the text
/// of the returned paragraph.
pub fn resolve_buffer(buffer: BidiBuffer) -> BidiParagraph {
    BidiResolver::new().resolve(buffer)
}

/// Resolves embedding levels and categories of a single paragraph.
///
/// Returns one level and one category per character. Resolved categories
/// are `L`, `R`, `EN`, `AN` or `BN`.
///
/// # Example
///
/// ```
/// use rustybidi::BidiCategory;
///
/// let text: Vec<char> = "a\u{05D0}1".chars().collect();
/// let (levels, categories) = rustybidi::resolve(&text, false);
/// assert_eq!(levels, [0, 1, 2]);
/// assert_eq!(categories, [BidiCategory::L, BidiCategory::R, BidiCategory::EN]);
/// ```
pub fn resolve(text: &[char], base_rtl: bool) -> (Vec<u8>, Vec<BidiCategory>) {
    let mut buffer = BidiBuffer::new();
    buffer.push_chars(text);
    buffer.set_direction(if base_rtl {
        Direction::RightToLeft
    } else {
        Direction::LeftToRight
    });

    let paragraph = resolve_buffer(buffer);
    (paragraph.levels(), paragraph.categories())
}

/// Checks that a text needs the bidi algorithm at all.
///
/// Left-to-right text without right-to-left characters, Arabic numbers
/// and explicit formatting characters resolves to level 0 everywhere.
pub fn requires_bidi(text: &[char], base_rtl: bool) -> bool {
    let text: Vec<u32> = text.iter().copied().map(u32::from).collect();
    requires_bidi_in(&text, &UnicodeData, u8::from(base_rtl))
}

/// Detects the paragraph direction using rules P2 and P3.
///
/// Returns the direction of the first strong character that is not inside
/// an isolate, or `None` when there is none.
pub fn paragraph_direction(text: &[char]) -> Option<Direction> {
    first_strong_direction(text.iter().map(|&c| UnicodeData.bidi_category(u32::from(c))))
}

pub(crate) fn paragraph_direction_in<P: UnicodeProperties>(
    text: &[u32],
    props: &P,
) -> Option<Direction> {
    first_strong_direction(code_points(text).map(|cp| props.bidi_category(cp)))
}

fn requires_bidi_in<P: UnicodeProperties>(text: &[u32], props: &P, base_level: u8) -> bool {
    if base_level != 0 {
        return true;
    }

    code_points(text)
        .filter(|&cp| cp >= 0x590)
        .any(|cp| match props.bidi_category(cp) {
            BidiCategory::R | BidiCategory::AL | BidiCategory::AN => true,
            category => category.is_embedding_control() || category.is_isolate_control(),
        })
}

/// Iterates over code points, combining surrogate pairs.
fn code_points(text: &[u32]) -> impl Iterator<Item = u32> + '_ {
    let mut idx = 0;
    core::iter::from_fn(move || {
        if idx >= text.len() {
            return None;
        }

        let (cp, width) = decode_unit(text, idx);
        idx += width;
        Some(cp)
    })
}
