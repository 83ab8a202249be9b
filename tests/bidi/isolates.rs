use crate::{levels, resolve};

#[test]
fn isolate_in_rtl_text() {
    // ALEF LRI a b PDI BET
    assert_eq!(
        resolve("\u{05D0}\u{2066}ab\u{2069}\u{05D1}", "--direction ltr"),
        "R=0+1|R=1+1|L=2+2|L=3+2|R=4+1|R=5+1"
    );
    assert_eq!(
        resolve(
            "\u{05D0}\u{2066}ab\u{2069}\u{05D1}",
            "--direction ltr --visual --no-categories --no-levels"
        ),
        "5|4|2|3|1|0"
    );
}

#[test]
fn containment() {
    // Whatever is inside, the outside does not change.
    for content in ["x", "\u{05D0}", "1", "(\u{05D0})", "\u{0627}1", "b \u{05D0}"] {
        let text = format!("a\u{2067}{}\u{2069}b", content);
        let levels = levels(&text, false);
        let last = levels.len() - 1;
        assert_eq!(levels[0], 0, "{:?}", text);
        assert_eq!(levels[1], 0, "{:?}", text);
        assert_eq!(levels[last - 1], 0, "{:?}", text);
        assert_eq!(levels[last], 0, "{:?}", text);
        assert!(levels[2..last - 1].iter().all(|&l| l >= 1), "{:?}", text);
    }
}

#[test]
fn first_strong_isolate() {
    assert_eq!(resolve("\u{2068}\u{05D0}\u{2069}a", "--direction ltr --levels"), "0|1|0|0");
    assert_eq!(resolve("\u{2068}a\u{2069}\u{05D0}", "--direction rtl --levels"), "1|2|1|1");
    // No strong characters: left-to-right.
    assert_eq!(resolve("\u{2068}1\u{2069}\u{05D0}", "--direction rtl --levels"), "1|2|1|1");
}

#[test]
fn nested_isolates() {
    // a RLI b LRI c PDI PDI
    assert_eq!(
        resolve("a\u{2067}b\u{2066}c\u{2069}\u{2069}", "--direction ltr --levels"),
        "0|0|2|1|2|0|0"
    );
    // Strong text after the outer PDI keeps the inner PDI at its level.
    assert_eq!(
        resolve("a\u{2067}b\u{2066}c\u{2069}\u{2069}d", "--direction ltr --levels"),
        "0|0|2|1|2|1|0|0"
    );
}

#[test]
fn unmatched_pdi() {
    assert_eq!(resolve("a\u{2069}\u{05D0}", "--direction ltr"), "L=0+0|L=1+0|R=2+1");
}

#[test]
fn unterminated_isolate() {
    assert_eq!(resolve("\u{2067}\u{05D0}", "--direction ltr --levels"), "0|1");
    // Trailing whitespace inside the isolate is reset too.
    assert_eq!(resolve("a\u{2067}\u{05D0} ", "--direction ltr --levels"), "0|0|1|0");
}

#[test]
fn isolate_overflow() {
    let mut text = String::new();
    for _ in 0..130 {
        text.push('\u{2066}');
    }
    text.push('a');
    for _ in 0..130 {
        text.push('\u{2069}');
    }

    let levels = levels(&text, false);
    assert_eq!(levels.len(), 261);
    assert!(levels.iter().all(|&l| l <= rustybidi::MAX_DEPTH + 1));
    assert_eq!(levels[130], 124);
}
