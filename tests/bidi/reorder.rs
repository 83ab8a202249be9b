use crate::resolve;

#[test]
fn identity_for_ltr() {
    assert_eq!(rustybidi::reorder_visual(&[0, 0, 0, 0]), [0, 1, 2, 3]);
    assert_eq!(rustybidi::reorder_visual(&[2, 2, 2]), [0, 1, 2]);
}

#[test]
fn reversal_for_rtl() {
    assert_eq!(rustybidi::reorder_visual(&[1, 1, 1, 1]), [3, 2, 1, 0]);
    assert_eq!(rustybidi::reorder_visual(&[3, 3]), [1, 0]);
}

#[test]
fn visual_serialization() {
    assert_eq!(
        resolve("abc \u{05D0}\u{05D1}", "--direction ltr --visual --no-categories"),
        "0+0|1+0|2+0|3+0|5+1|4+1"
    );
}

fn paragraph(text: &str, direction: rustybidi::Direction) -> rustybidi::BidiParagraph {
    let mut buffer = rustybidi::BidiBuffer::new();
    buffer.push_str(text);
    buffer.set_direction(direction);
    rustybidi::resolve_buffer(buffer)
}

#[test]
fn lines() {
    let paragraph = paragraph(
        "abc \u{05D0}\u{05D1}\u{05D2} def",
        rustybidi::Direction::LeftToRight,
    );
    assert_eq!(paragraph.levels(), [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0]);
    assert_eq!(
        paragraph.visual_order(0..11),
        [0, 1, 2, 3, 6, 5, 4, 7, 8, 9, 10]
    );

    // Break after the first Hebrew letter.
    assert_eq!(paragraph.visual_order(0..5), [0, 1, 2, 3, 4]);
    assert_eq!(paragraph.visual_order(5..11), [6, 5, 7, 8, 9, 10]);

    assert_eq!(paragraph.level_runs(0..11), [0..4, 4..7, 7..11]);
    assert_eq!(paragraph.level_runs(5..11), [5..7, 7..11]);
}

#[test]
fn line_whitespace() {
    let mut buffer = rustybidi::BidiBuffer::new();
    buffer.push_str("\u{05D0} \u{05D1} \u{05D2}");
    buffer.set_direction(rustybidi::Direction::LeftToRight);
    buffer.set_flags(rustybidi::ResolveFlags::SKIP_LINE_RESET);
    let paragraph = rustybidi::resolve_buffer(buffer);

    assert_eq!(paragraph.levels(), [1, 1, 1, 1, 1]);
    // The space at the end of the first line drops to the paragraph level.
    assert_eq!(paragraph.line_levels(0..2), [1, 0]);
    assert_eq!(paragraph.visual_order(0..2), [0, 1]);
    assert_eq!(paragraph.visual_order(2..5), [4, 3, 2]);
}

#[test]
fn reorder_line() {
    let text = "\u{05D0}(b)c";
    let chars: Vec<char> = text.chars().collect();
    let (levels, _) = rustybidi::resolve(&chars, true);
    assert_eq!(
        rustybidi::reorder_line(&chars, &levels),
        ['c', '(', 'b', ')', '\u{05D0}']
    );
}

#[test]
fn permutations() {
    let order = rustybidi::reorder_visual(&[0, 1, 1, 2, 2, 0]);
    assert_eq!(order, [0, 3, 4, 2, 1, 5]);

    let inverse = rustybidi::logical_to_visual(&order);
    assert_eq!(inverse, [0, 4, 3, 1, 2, 5]);
    assert_eq!(rustybidi::visual_to_logical(&inverse), order);
}

#[test]
fn mirroring() {
    assert_eq!(rustybidi::mirrored('('), Some(')'));
    assert_eq!(rustybidi::mirrored('\u{00AB}'), Some('\u{00BB}'));
    assert_eq!(rustybidi::mirrored('a'), None);
}
