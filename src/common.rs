use core::fmt;
use core::str::FromStr;

/// The maximum explicit embedding level.
///
/// Explicit embeddings, overrides and isolates that would go deeper than this
/// are counted as overflow and ignored.
pub const MAX_DEPTH: u8 = 125;

/// A bidirectional character category.
///
/// Names and grouping follow
/// [UAX #9, Table 4](https://www.unicode.org/reports/tr9/#Table_Bidirectional_Character_Types).
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BidiCategory {
    /// Left-to-right.
    L,
    /// Right-to-left.
    R,
    /// Right-to-left Arabic.
    AL,
    /// European number.
    EN,
    /// European number separator.
    ES,
    /// European number terminator.
    ET,
    /// Arabic number.
    AN,
    /// Common number separator.
    CS,
    /// Nonspacing mark.
    NSM,
    /// Boundary neutral.
    BN,
    /// Paragraph separator.
    B,
    /// Segment separator.
    S,
    /// Whitespace.
    WS,
    /// Other neutrals.
    ON,
    /// Left-to-right embedding.
    LRE,
    /// Left-to-right override.
    LRO,
    /// Right-to-left embedding.
    RLE,
    /// Right-to-left override.
    RLO,
    /// Pop directional format.
    PDF,
    /// Left-to-right isolate.
    LRI,
    /// Right-to-left isolate.
    RLI,
    /// First strong isolate.
    FSI,
    /// Pop directional isolate.
    PDI,
}

impl BidiCategory {
    /// Checks that category is L, R or AL.
    #[inline]
    pub fn is_strong(self) -> bool {
        matches!(self, BidiCategory::L | BidiCategory::R | BidiCategory::AL)
    }

    /// Checks that category is LRI, RLI or FSI.
    #[inline]
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiCategory::LRI | BidiCategory::RLI | BidiCategory::FSI)
    }

    /// Checks that category is an isolate initiator or PDI.
    #[inline]
    pub fn is_isolate_control(self) -> bool {
        self.is_isolate_initiator() || self == BidiCategory::PDI
    }

    /// Checks that category is LRE, RLE, LRO, RLO or PDF.
    #[inline]
    pub fn is_embedding_control(self) -> bool {
        matches!(
            self,
            BidiCategory::LRE
                | BidiCategory::RLE
                | BidiCategory::LRO
                | BidiCategory::RLO
                | BidiCategory::PDF
        )
    }

    /// Returns the short UAX #9 name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            BidiCategory::L => "L",
            BidiCategory::R => "R",
            BidiCategory::AL => "AL",
            BidiCategory::EN => "EN",
            BidiCategory::ES => "ES",
            BidiCategory::ET => "ET",
            BidiCategory::AN => "AN",
            BidiCategory::CS => "CS",
            BidiCategory::NSM => "NSM",
            BidiCategory::BN => "BN",
            BidiCategory::B => "B",
            BidiCategory::S => "S",
            BidiCategory::WS => "WS",
            BidiCategory::ON => "ON",
            BidiCategory::LRE => "LRE",
            BidiCategory::LRO => "LRO",
            BidiCategory::RLE => "RLE",
            BidiCategory::RLO => "RLO",
            BidiCategory::PDF => "PDF",
            BidiCategory::LRI => "LRI",
            BidiCategory::RLI => "RLI",
            BidiCategory::FSI => "FSI",
            BidiCategory::PDI => "PDI",
        }
    }
}

impl fmt::Display for BidiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BidiCategory {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buf = [0u8; 3];
        if s.is_empty() || s.len() > buf.len() {
            return Err("invalid bidi category");
        }

        buf[..s.len()].copy_from_slice(s.as_bytes());
        buf.make_ascii_uppercase();

        let category = match &buf[..s.len()] {
            b"L" => BidiCategory::L,
            b"R" => BidiCategory::R,
            b"AL" => BidiCategory::AL,
            b"EN" => BidiCategory::EN,
            b"ES" => BidiCategory::ES,
            b"ET" => BidiCategory::ET,
            b"AN" => BidiCategory::AN,
            b"CS" => BidiCategory::CS,
            b"NSM" => BidiCategory::NSM,
            b"BN" => BidiCategory::BN,
            b"B" => BidiCategory::B,
            b"S" => BidiCategory::S,
            b"WS" => BidiCategory::WS,
            b"ON" => BidiCategory::ON,
            b"LRE" => BidiCategory::LRE,
            b"LRO" => BidiCategory::LRO,
            b"RLE" => BidiCategory::RLE,
            b"RLO" => BidiCategory::RLO,
            b"PDF" => BidiCategory::PDF,
            b"LRI" => BidiCategory::LRI,
            b"RLI" => BidiCategory::RLI,
            b"FSI" => BidiCategory::FSI,
            b"PDI" => BidiCategory::PDI,
            _ => return Err("invalid bidi category"),
        };

        Ok(category)
    }
}

/// Defines the direction in which text is to be read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Text is set horizontally from left to right.
    #[default]
    LeftToRight,
    /// Text is set horizontally from right to left.
    RightToLeft,
}

impl Direction {
    /// Returns the direction of text at the given embedding level.
    ///
    /// Even levels are left-to-right, odd ones are right-to-left.
    #[inline]
    pub fn from_level(level: u8) -> Self {
        if level & 1 == 1 {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }

    /// Returns the paragraph embedding level for this direction.
    #[inline]
    pub fn base_level(self) -> u8 {
        match self {
            Direction::LeftToRight => 0,
            Direction::RightToLeft => 1,
        }
    }

    /// Checks that direction is right-to-left.
    #[inline]
    pub fn is_rtl(self) -> bool {
        self == Direction::RightToLeft
    }

    /// Reverses a direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
        }
    }

    /// The strong category matching this direction: `L` or `R`.
    #[inline]
    pub(crate) fn category(self) -> BidiCategory {
        match self {
            Direction::LeftToRight => BidiCategory::L,
            Direction::RightToLeft => BidiCategory::R,
        }
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("invalid direction");
        }

        // Only the first letter matters, just like in `hb-shape`.
        match s.as_bytes()[0].to_ascii_lowercase() {
            b'l' => Ok(Direction::LeftToRight),
            b'r' => Ok(Direction::RightToLeft),
            _ => Err("invalid direction"),
        }
    }
}

/// The smallest even level above `level`.
#[inline]
pub(crate) fn next_ltr_level(level: u8) -> u8 {
    (level + 2) & !1
}

/// The smallest odd level above `level`.
#[inline]
pub(crate) fn next_rtl_level(level: u8) -> u8 {
    (level + 1) | 1
}

/// Rules P2 and P3: the direction of the first strong character,
/// skipping everything between an isolate initiator and its matching PDI.
///
/// Stops at the first paragraph separator.
pub(crate) fn first_strong_direction<I>(categories: I) -> Option<Direction>
where
    I: IntoIterator<Item = BidiCategory>,
{
    let mut isolate_depth = 0usize;
    for category in categories {
        match category {
            BidiCategory::LRI | BidiCategory::RLI | BidiCategory::FSI => isolate_depth += 1,
            BidiCategory::PDI => isolate_depth = isolate_depth.saturating_sub(1),
            BidiCategory::B if isolate_depth == 0 => break,
            BidiCategory::L if isolate_depth == 0 => return Some(Direction::LeftToRight),
            BidiCategory::R | BidiCategory::AL if isolate_depth == 0 => {
                return Some(Direction::RightToLeft)
            }
            _ => {}
        }
    }

    None
}
