/*!
`rustybidi` is an implementation of the
[Unicode Bidirectional Algorithm](https://www.unicode.org/reports/tr9/).

It resolves embedding levels of a paragraph, including explicit embeddings,
isolates and paired brackets, and computes the visual order of its lines.

```
use rustybidi::{BidiBuffer, Direction, SerializeFlags};

let mut buffer = BidiBuffer::new();
buffer.push_str("car \u{05D0}\u{05D1}");
buffer.set_direction(Direction::LeftToRight);

let paragraph = rustybidi::resolve_buffer(buffer);
assert_eq!(paragraph.levels(), [0, 0, 0, 0, 1, 1]);
assert_eq!(paragraph.visual_order(0..paragraph.len()), [0, 1, 2, 3, 5, 4]);
```
*/

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod buffer;
mod common;
mod explicit;
mod implicit;
mod reorder;
mod resolver;
mod scan;
mod sequence;
mod unicode;

pub use crate::buffer::{
    BidiBuffer, BidiParagraph, CharAnalysis, CharFlags, ResolveFlags, SerializeFlags,
};
pub use crate::common::{BidiCategory, Direction, MAX_DEPTH};
pub use crate::reorder::{
    level_runs, logical_to_visual, reorder_line, reorder_visual, visual_to_logical,
};
pub use crate::resolver::{
    paragraph_direction, requires_bidi, resolve, resolve_buffer, BidiResolver,
};
pub use crate::unicode::{mirrored, BracketType, UnicodeData, UnicodeProperties};

pub(crate) use crate::resolver::paragraph_direction_in;
