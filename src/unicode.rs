use unicode_properties::GeneralCategory;

use crate::BidiCategory;

/// U+2029 PARAGRAPH SEPARATOR.
pub(crate) const PARAGRAPH_SEPARATOR: u32 = 0x2029;

/// The paired bracket type of a character.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BracketType {
    /// Not a bracket.
    None,
    /// An opening bracket, like `(`.
    Open,
    /// A closing bracket, like `)`.
    Close,
}

/// Unicode character properties used by the bidi resolver.
///
/// All methods take raw code units. For UTF-16 input that includes unpaired
/// surrogates, so implementations must not assume a valid `char`.
pub trait UnicodeProperties {
    /// Returns the `Bidi_Class` of a code point.
    fn bidi_category(&self, cp: u32) -> BidiCategory;

    /// Returns the distance to the `Bidi_Mirroring_Glyph` of a code point.
    ///
    /// `None` for characters that have no mirrored counterpart.
    fn mirror_offset(&self, cp: u32) -> Option<i32>;

    /// Returns the paired bracket type of a code point.
    fn bracket_type(&self, cp: u32) -> BracketType;

    /// Checks that a code point starts a new paragraph.
    ///
    /// Only U+2029 does by default. Other `B` characters, like a line feed,
    /// keep the embedding state intact.
    fn is_paragraph_separator(&self, cp: u32) -> bool {
        cp == PARAGRAPH_SEPARATOR
    }
}

impl<T: UnicodeProperties + ?Sized> UnicodeProperties for &T {
    #[inline]
    fn bidi_category(&self, cp: u32) -> BidiCategory {
        (**self).bidi_category(cp)
    }

    #[inline]
    fn mirror_offset(&self, cp: u32) -> Option<i32> {
        (**self).mirror_offset(cp)
    }

    #[inline]
    fn bracket_type(&self, cp: u32) -> BracketType {
        (**self).bracket_type(cp)
    }

    #[inline]
    fn is_paragraph_separator(&self, cp: u32) -> bool {
        (**self).is_paragraph_separator(cp)
    }
}

/// The Unicode Character Database, as shipped with the `unicode-*` crates.
#[derive(Copy, Clone, Default, Debug)]
pub struct UnicodeData;

impl UnicodeProperties for UnicodeData {
    fn bidi_category(&self, cp: u32) -> BidiCategory {
        // Surrogates (and anything that is not a scalar value) are `L`
        // according to `DerivedBidiClass.txt`.
        char::from_u32(cp).map_or(BidiCategory::L, CharExt::bidi_category)
    }

    fn mirror_offset(&self, cp: u32) -> Option<i32> {
        let c = char::from_u32(cp)?;
        let mirrored = c.mirrored()?;
        Some(mirrored as i32 - c as i32)
    }

    fn bracket_type(&self, cp: u32) -> BracketType {
        let c = match char::from_u32(cp) {
            Some(c) => c,
            None => return BracketType::None,
        };

        match c.general_category() {
            GeneralCategory::OpenPunctuation => BracketType::Open,
            GeneralCategory::ClosePunctuation => BracketType::Close,
            _ => BracketType::None,
        }
    }
}

pub trait CharExt {
    fn bidi_category(self) -> BidiCategory;
    fn mirrored(self) -> Option<char>;
    fn general_category(self) -> GeneralCategory;
}

impl CharExt for char {
    fn bidi_category(self) -> BidiCategory {
        use unicode_bidi::BidiClass;

        match unicode_bidi::bidi_class(self) {
            BidiClass::AL => BidiCategory::AL,
            BidiClass::AN => BidiCategory::AN,
            BidiClass::B => BidiCategory::B,
            BidiClass::BN => BidiCategory::BN,
            BidiClass::CS => BidiCategory::CS,
            BidiClass::EN => BidiCategory::EN,
            BidiClass::ES => BidiCategory::ES,
            BidiClass::ET => BidiCategory::ET,
            BidiClass::FSI => BidiCategory::FSI,
            BidiClass::L => BidiCategory::L,
            BidiClass::LRE => BidiCategory::LRE,
            BidiClass::LRI => BidiCategory::LRI,
            BidiClass::LRO => BidiCategory::LRO,
            BidiClass::NSM => BidiCategory::NSM,
            BidiClass::ON => BidiCategory::ON,
            BidiClass::PDF => BidiCategory::PDF,
            BidiClass::PDI => BidiCategory::PDI,
            BidiClass::R => BidiCategory::R,
            BidiClass::RLE => BidiCategory::RLE,
            BidiClass::RLI => BidiCategory::RLI,
            BidiClass::RLO => BidiCategory::RLO,
            BidiClass::S => BidiCategory::S,
            BidiClass::WS => BidiCategory::WS,
        }
    }

    #[inline]
    fn mirrored(self) -> Option<char> {
        unicode_bidi_mirroring::get_mirrored(self)
    }

    #[inline]
    fn general_category(self) -> GeneralCategory {
        unicode_properties::UnicodeGeneralCategory::general_category(self)
    }
}

/// Returns the mirrored counterpart of a character, if any.
///
/// Rule L4: characters resolved to an odd level should be displayed
/// using this glyph.
pub fn mirrored(c: char) -> Option<char> {
    c.mirrored()
}

/// Checks that two closing brackets close the same opening one.
///
/// U+232A and U+3009 are canonically equivalent, so either of them
/// can close U+2329 or U+3008.
#[inline]
pub(crate) fn closes_same_bracket(expected: u32, actual: u32) -> bool {
    expected == actual
        || (expected == 0x3009 && actual == 0x232A)
        || (expected == 0x232A && actual == 0x3009)
}

/// Decodes the code point that starts at `idx`.
///
/// Returns the code point and the number of units it occupies: 2 for a
/// valid surrogate pair, 1 otherwise.
#[inline]
pub(crate) fn decode_unit(text: &[u32], idx: usize) -> (u32, usize) {
    let unit = text[idx];
    if (0xD800..=0xDBFF).contains(&unit) {
        if let Some(&low) = text.get(idx + 1) {
            if (0xDC00..=0xDFFF).contains(&low) {
                let cp = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return (cp, 2);
            }
        }
    }

    (unit, 1)
}
