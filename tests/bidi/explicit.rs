use crate::{levels, resolve};

#[test]
fn embedding() {
    // a RLE b PDF c
    assert_eq!(
        resolve("a\u{202B}b\u{202C}c", "--direction ltr"),
        "L=0+0|BN=1+0|L=2+2|BN=3+0|L=4+0"
    );
}

#[test]
fn right_to_left_override() {
    // RLO a b c PDF
    assert_eq!(
        resolve("\u{202E}abc\u{202C}", "--direction ltr"),
        "R=0+0|R=1+1|R=2+1|R=3+1|R=4+0"
    );
    assert_eq!(
        resolve("\u{202E}abc\u{202C}", "--direction ltr --visual --levels"),
        "0|1|1|1|0"
    );
}

#[test]
fn left_to_right_override() {
    // LRO ALEF BET PDF
    assert_eq!(
        resolve("\u{202D}\u{05D0}\u{05D1}\u{202C}", "--direction rtl"),
        "L=0+1|L=1+2|L=2+2|L=3+1"
    );
}

#[test]
fn unmatched_pdf() {
    assert_eq!(resolve("a\u{202C}b", "--direction ltr"), "L=0+0|BN=1+0|L=2+0");
}

#[test]
fn paragraph_separator() {
    // RLE a PS b
    assert_eq!(resolve("\u{202B}a\u{2029}b", "--direction ltr --levels"), "0|2|0|0");
}

#[test]
fn deep_embeddings() {
    let mut text = String::new();
    for _ in 0..200 {
        text.push('\u{202A}');
    }
    text.push('a');
    for _ in 0..200 {
        text.push('\u{202C}');
    }

    let levels = levels(&text, false);
    assert_eq!(levels.len(), 401);
    assert!(levels.iter().all(|&l| l <= rustybidi::MAX_DEPTH));
    assert_eq!(levels[200], 124);
}

#[test]
fn deep_rtl_embeddings() {
    let mut text = String::new();
    for _ in 0..200 {
        text.push('\u{202B}');
    }
    text.push('\u{05D0}');

    let levels = levels(&text, false);
    assert_eq!(levels[200], rustybidi::MAX_DEPTH);
}

#[test]
fn implicit_level_above_deepest_embedding() {
    // Left-to-right text at the deepest odd level is raised one more.
    let mut text = String::new();
    for _ in 0..200 {
        text.push('\u{202B}');
    }
    text.push('a');
    text.push('1');

    let levels = levels(&text, false);
    assert_eq!(levels[200], rustybidi::MAX_DEPTH + 1);
    assert_eq!(levels[201], rustybidi::MAX_DEPTH + 1);
}

#[test]
fn overflow_recovers() {
    // 70 RLE, then enough PDF to close them all, then ALEF.
    let mut text = String::new();
    for _ in 0..70 {
        text.push('\u{202B}');
    }
    for _ in 0..70 {
        text.push('\u{202C}');
    }
    text.push('\u{05D0}');
    text.push('b');

    let levels = levels(&text, false);
    assert_eq!(levels[140], 1);
    assert_eq!(levels[141], 0);
}
