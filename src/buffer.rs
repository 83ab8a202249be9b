use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};
use core::ops::Range;

use bitflags::bitflags;

use crate::unicode::{CharExt, UnicodeData};
use crate::{BidiCategory, Direction};

bitflags! {
    /// Per-character properties recorded while scanning the text.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct CharFlags: u8 {
        /// A neutral character with a mirrored counterpart, like `(`.
        const MIRRORED = 1 << 0;
        /// A character that is invisible to the algorithm: explicit embedding
        /// controls and boundary neutrals. Gets the level of its neighbours.
        const BN = 1 << 1;
        /// Whitespace, isolate controls and boundary neutrals. Reset to the
        /// paragraph level when trailing a line or a separator.
        const MAYBE_RESET_TO_PARAGRAPH_LEVEL = 1 << 2;
        /// Segment and paragraph separators. Always reset to the paragraph level.
        const RESET_TO_PARAGRAPH_LEVEL = 1 << 3;
    }
}

bitflags! {
    /// Flags controlling the resolution of a [`BidiBuffer`].
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct ResolveFlags: u32 {
        /// Always run the whole algorithm, even for text that has
        /// no right-to-left characters.
        const NO_FAST_PATH = 1 << 0;
        /// Do not apply rule L1 to the whole paragraph.
        ///
        /// Useful when the text is broken into lines afterwards.
        /// [`BidiParagraph::line_levels`] applies it per line.
        const SKIP_LINE_RESET = 1 << 1;
    }
}

bitflags! {
    /// Flags used for serialization with [`BidiParagraph::serialize`].
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct SerializeFlags: u32 {
        /// Do not serialize resolved categories.
        const NO_CATEGORIES = 1 << 0;
        /// Do not serialize logical indices.
        const NO_INDICES = 1 << 1;
        /// Do not serialize resolved levels.
        const NO_LEVELS = 1 << 2;
        /// Serialize characters in visual order instead of the logical one.
        const VISUAL_ORDER = 1 << 3;
    }
}

/// The resolution state of a single character.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CharAnalysis {
    /// The bidi category.
    ///
    /// Holds the original category after scanning and one of
    /// `L`, `R`, `EN`, `AN` or `BN` once resolved.
    pub category: BidiCategory,
    /// The embedding level.
    pub level: u8,
    /// Scanner flags.
    pub flags: CharFlags,
}

impl Default for CharAnalysis {
    fn default() -> Self {
        CharAnalysis {
            category: BidiCategory::L,
            level: 0,
            flags: CharFlags::empty(),
        }
    }
}

/// A buffer that holds one paragraph of text to be resolved.
///
/// The buffer manages an allocation for the text. This allocation is reused
/// for storing the results in a [`BidiParagraph`]. Once you got the needed
/// information out of the paragraph, call its `.clear()` method to get
/// a fresh `BidiBuffer` back, reusing the original allocation.
///
/// Text is stored as code units: scalar values for `char` input and raw
/// UTF-16 units for [`push_utf16`](BidiBuffer::push_utf16). Results always
/// have one entry per unit.
#[derive(Clone, Default, Debug)]
pub struct BidiBuffer {
    pub(crate) text: Vec<u32>,
    pub(crate) direction: Option<Direction>,
    pub(crate) flags: ResolveFlags,
}

impl BidiBuffer {
    /// Creates a new empty `BidiBuffer`.
    pub fn new() -> Self {
        BidiBuffer::default()
    }

    /// Returns the number of code units in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Checks that buffer contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Pre-allocates space for `size` more code units.
    pub fn reserve(&mut self, size: usize) {
        self.text.reserve(size);
    }

    /// Pushes a string to the buffer.
    pub fn push_str(&mut self, text: &str) {
        self.text.extend(text.chars().map(u32::from));
    }

    /// Pushes characters to the buffer.
    pub fn push_chars(&mut self, text: &[char]) {
        self.text.extend(text.iter().copied().map(u32::from));
    }

    /// Appends a single character.
    pub fn add(&mut self, c: char) {
        self.text.push(u32::from(c));
    }

    /// Pushes UTF-16 code units to the buffer.
    ///
    /// Surrogate pairs are combined during resolution. The trailing unit of a
    /// pair is treated as a nonspacing mark, so it follows the leading one.
    /// Unpaired surrogates are left-to-right.
    pub fn push_utf16(&mut self, text: &[u16]) {
        self.text.extend(text.iter().copied().map(u32::from));
    }

    /// Sets the paragraph direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Lets the resolver pick the paragraph direction
    /// from the first strong character (rules P2 and P3).
    pub fn set_direction_auto(&mut self) {
        self.direction = None;
    }

    /// Returns the paragraph direction.
    ///
    /// `None` when it will be detected from the text.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Detects the paragraph direction using rules P2 and P3, if not set yet.
    ///
    /// Falls back to left-to-right when there are no strong characters.
    pub fn guess_direction(&mut self) {
        if self.direction.is_none() {
            let direction = crate::paragraph_direction_in(&self.text, &UnicodeData);
            self.direction = Some(direction.unwrap_or_default());
        }
    }

    /// Sets resolution flags.
    pub fn set_flags(&mut self, flags: ResolveFlags) {
        self.flags = flags;
    }

    /// Returns resolution flags.
    #[inline]
    pub fn flags(&self) -> ResolveFlags {
        self.flags
    }

    /// Clears the contents of the buffer and resets its properties.
    pub fn clear(&mut self) {
        self.text.clear();
        self.direction = None;
        self.flags = ResolveFlags::default();
    }
}

/// A resolved paragraph.
///
/// An object of this type is obtained through [`resolve_buffer`](crate::resolve_buffer)
/// or [`BidiResolver::resolve`](crate::BidiResolver::resolve).
#[derive(Clone, Debug)]
pub struct BidiParagraph {
    pub(crate) text: Vec<u32>,
    pub(crate) analysis: Vec<CharAnalysis>,
    pub(crate) direction: Direction,
    pub(crate) flags: ResolveFlags,
}

impl BidiParagraph {
    /// Returns the number of resolved code units.
    #[inline]
    pub fn len(&self) -> usize {
        self.analysis.len()
    }

    /// Checks that paragraph contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.analysis.is_empty()
    }

    /// Returns the paragraph direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the paragraph embedding level: 0 or 1.
    #[inline]
    pub fn base_level(&self) -> u8 {
        self.direction.base_level()
    }

    /// Returns the flags the paragraph was resolved with.
    #[inline]
    pub fn flags(&self) -> ResolveFlags {
        self.flags
    }

    /// Returns the per-character resolution results.
    #[inline]
    pub fn analysis(&self) -> &[CharAnalysis] {
        &self.analysis
    }

    /// Returns the resolved level of a character.
    #[inline]
    pub fn level(&self, idx: usize) -> u8 {
        self.analysis[idx].level
    }

    /// Returns the resolved category of a character.
    #[inline]
    pub fn category(&self, idx: usize) -> BidiCategory {
        self.analysis[idx].category
    }

    /// Returns resolved levels of all characters.
    pub fn levels(&self) -> Vec<u8> {
        self.analysis.iter().map(|a| a.level).collect()
    }

    /// Returns resolved categories of all characters.
    pub fn categories(&self) -> Vec<BidiCategory> {
        self.analysis.iter().map(|a| a.category).collect()
    }

    /// Checks that some characters are displayed right-to-left.
    pub fn has_rtl(&self) -> bool {
        self.analysis.iter().any(|a| a.level & 1 == 1)
    }

    /// Returns levels of a single line with rule L1 applied to it.
    ///
    /// Separators and whitespace that trail the line drop to the paragraph
    /// level. Levels computed once by the resolver can be reused for any
    /// choice of line breaks.
    pub fn line_levels(&self, range: Range<usize>) -> Vec<u8> {
        let mut line = self.analysis[range].to_vec();
        crate::reorder::reset_whitespace_levels(&mut line, self.base_level());
        line.iter().map(|a| a.level).collect()
    }

    /// Returns the visual order of a single line.
    ///
    /// The `n`th entry is the paragraph index of the character displayed
    /// at the `n`th position from the left.
    pub fn visual_order(&self, range: Range<usize>) -> Vec<usize> {
        let start = range.start;
        let levels = self.line_levels(range);
        let mut order = crate::reorder_visual(&levels);
        for idx in &mut order {
            *idx += start;
        }

        order
    }

    /// Returns ranges of equal level within a line, in logical order.
    ///
    /// Ranges are paragraph indices.
    pub fn level_runs(&self, range: Range<usize>) -> Vec<Range<usize>> {
        let start = range.start;
        let levels = self.line_levels(range);
        crate::reorder::level_runs(&levels)
            .map(|run| run.start + start..run.end + start)
            .collect()
    }

    /// Returns the glyph a character should be displayed with, applying rule L4.
    ///
    /// Mirrored neutrals at odd levels are replaced by their counterpart.
    /// `None` for trailing surrogate units and invalid code points.
    pub fn display_char(&self, idx: usize) -> Option<char> {
        let (cp, _) = crate::unicode::decode_unit(&self.text, idx);
        if idx > 0 && is_trailing_surrogate(&self.text, idx) {
            return None;
        }

        let c = char::from_u32(cp)?;
        let analysis = &self.analysis[idx];
        if analysis.level & 1 == 1 && analysis.flags.contains(CharFlags::MIRRORED) {
            Some(c.mirrored().unwrap_or(c))
        } else {
            Some(c)
        }
    }

    /// Clears the contents of the paragraph and returns an empty
    /// `BidiBuffer` reusing the existing allocation.
    pub fn clear(mut self) -> BidiBuffer {
        self.text.clear();
        BidiBuffer {
            text: self.text,
            direction: None,
            flags: ResolveFlags::default(),
        }
    }

    /// Converts the paragraph into a human readable representation.
    ///
    /// Each character is written as `CATEGORY=INDEX+LEVEL`, separated by `|`.
    /// Levels alone are written without the `+` sign.
    pub fn serialize(&self, flags: SerializeFlags) -> String {
        Serializer {
            paragraph: self,
            flags,
        }
        .to_string()
    }
}

struct Serializer<'a> {
    paragraph: &'a BidiParagraph,
    flags: SerializeFlags,
}

impl fmt::Display for Serializer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.flags;
        let order: Vec<usize> = if flags.contains(SerializeFlags::VISUAL_ORDER) {
            self.paragraph.visual_order(0..self.paragraph.len())
        } else {
            (0..self.paragraph.len()).collect()
        };

        for (i, &idx) in order.iter().enumerate() {
            if i > 0 {
                f.write_char('|')?;
            }

            let analysis = &self.paragraph.analysis[idx];
            if !flags.contains(SerializeFlags::NO_CATEGORIES) {
                f.write_str(analysis.category.as_str())?;
                if !flags.contains(SerializeFlags::NO_INDICES) {
                    f.write_char('=')?;
                }
            }

            if !flags.contains(SerializeFlags::NO_INDICES) {
                write!(f, "{}", idx)?;
            }

            if !flags.contains(SerializeFlags::NO_LEVELS) {
                if flags.contains(SerializeFlags::NO_CATEGORIES | SerializeFlags::NO_INDICES) {
                    write!(f, "{}", analysis.level)?;
                } else {
                    write!(f, "+{}", analysis.level)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for BidiParagraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serializer = Serializer {
            paragraph: self,
            flags: SerializeFlags::default(),
        };
        fmt::Display::fmt(&serializer, f)
    }
}

fn is_trailing_surrogate(text: &[u32], idx: usize) -> bool {
    (0xDC00..=0xDFFF).contains(&text[idx])
        && (0xD800..=0xDBFF).contains(&text[idx - 1])
}
