use crate::{levels, resolve};

#[test]
fn pure_ltr() {
    assert_eq!(
        resolve("abc def", "--direction ltr"),
        "L=0+0|L=1+0|L=2+0|L=3+0|L=4+0|L=5+0|L=6+0"
    );
    assert_eq!(
        resolve("abc def", "--direction ltr --no-fast-path --levels"),
        "0|0|0|0|0|0|0"
    );
}

#[test]
fn pure_rtl_base() {
    // Every character at level 1.
    assert_eq!(
        resolve("\u{05D0}\u{05D1} \u{05D2}", "--direction rtl --levels"),
        "1|1|1|1"
    );
    assert_eq!(levels("\u{05D0}\u{05D1} \u{05D2}", true), [1, 1, 1, 1]);
}

#[test]
fn neutrals_with_rtl_base() {
    assert_eq!(levels("!? ()-", true), [1, 1, 1, 1, 1, 1]);
    assert_eq!(levels(" ", true), [1]);
    assert_eq!(levels("\u{200D}!", true), [1, 1]);
    assert_eq!(resolve("!? ()-", "--direction rtl --levels"), "1|1|1|1|1|1");
}

#[test]
fn mixed_ltr() {
    // a SPACE ALEF BET SPACE 1 2
    assert_eq!(
        resolve("a \u{05D0}\u{05D1} 12", "--direction ltr"),
        "L=0+0|L=1+0|R=2+1|R=3+1|R=4+1|EN=5+2|EN=6+2"
    );
}

#[test]
fn mixed_rtl() {
    assert_eq!(
        resolve("a \u{05D0}\u{05D1} 12", "--direction rtl"),
        "L=0+2|R=1+1|R=2+1|R=3+1|R=4+1|EN=5+2|EN=6+2"
    );
}

#[test]
fn auto_direction() {
    assert_eq!(resolve("123 \u{05D0}", "--levels"), "2|2|2|1|1");
    assert_eq!(resolve("123 a", "--levels"), "0|0|0|0|0");
    // Neutrals only.
    assert_eq!(resolve("123 !", "--levels"), "0|0|0|0|0");
}

#[test]
fn arabic_numbers() {
    // ARABIC-ALEF 1 2 . 5
    assert_eq!(
        resolve("\u{0627}12.5", ""),
        "R=0+1|AN=1+2|AN=2+2|AN=3+2|AN=4+2"
    );

    // Arabic-Indic digits with a comma.
    assert_eq!(
        resolve("\u{0661},\u{0662}", "--direction ltr"),
        "AN=0+2|AN=1+2|AN=2+2"
    );
}

#[test]
fn european_number_terminators() {
    // $ 1 0 SPACE ALEF
    assert_eq!(
        resolve("$10 \u{05D0}", "--direction rtl"),
        "EN=0+2|EN=1+2|EN=2+2|R=3+1|R=4+1"
    );
    assert_eq!(
        resolve("$10 \u{05D0}", "--direction ltr"),
        "L=0+0|L=1+0|L=2+0|L=3+0|R=4+1"
    );
}

#[test]
fn trailing_whitespace() {
    assert_eq!(resolve("\u{05D0}\u{05D1}  ", "--direction ltr --levels"), "1|1|0|0");
    assert_eq!(resolve("a  ", "--direction rtl --levels"), "2|1|1");
    assert_eq!(
        resolve("a  ", "--direction rtl --levels --skip-line-reset"),
        "2|1|1"
    );
    assert_eq!(
        resolve("\u{05D0} b ", "--direction rtl --levels --skip-line-reset"),
        "1|1|2|1"
    );
}

#[test]
fn segment_separator() {
    // ALEF TAB BET
    assert_eq!(resolve("\u{05D0}\t\u{05D1}", "--direction ltr --levels"), "1|0|1");
    assert_eq!(
        resolve("\u{05D0}\t\u{05D1}", "--direction ltr --levels --skip-line-reset"),
        "1|1|1"
    );
}

#[test]
fn boundary_neutrals() {
    // ALEF ZWJ BET
    assert_eq!(
        resolve("\u{05D0}\u{200D}\u{05D1}", "--direction ltr"),
        "R=0+1|BN=1+1|R=2+1"
    );
    // A trailing one drops to the paragraph level.
    assert_eq!(
        resolve("\u{05D0}\u{200D}", "--direction ltr"),
        "R=0+1|BN=1+0"
    );
}

#[test]
fn empty() {
    assert_eq!(resolve("", ""), "");
    assert_eq!(resolve("", "--direction rtl --no-fast-path"), "");
    assert!(levels("", true).is_empty());
}

#[test]
fn utf16() {
    // PHOENICIAN LETTER ALF SPACE a
    assert_eq!(
        resolve("\u{10900} a", "--utf16 --direction ltr"),
        "R=0+1|R=1+1|L=2+0|L=3+0"
    );
    assert_eq!(
        resolve("\u{10900} a", "--utf16 --direction ltr --visual --no-categories"),
        "1+1|0+1|2+0|3+0"
    );
    // Auto direction sees the decoded character.
    assert_eq!(resolve("\u{10900}", "--utf16 --levels"), "1|1");
}

#[test]
fn lone_surrogates() {
    let mut buffer = rustybidi::BidiBuffer::new();
    buffer.push_utf16(&[0x05D0, 0xDC00, 0xD800]);
    buffer.set_direction(rustybidi::Direction::LeftToRight);
    let paragraph = rustybidi::resolve_buffer(buffer);
    assert_eq!(paragraph.levels(), [1, 0, 0]);
    assert_eq!(paragraph.display_char(1), None);
}

#[test]
fn fast_path_agreement() {
    let texts = [
        "Hello, world!",
        "a (b) [c] {d}",
        "$5.00 + 10% = ?",
        "tab\there\r\nnext",
        "\u{200D}x\u{00AD}y",
        "   ",
    ];

    for text in texts {
        assert_eq!(
            resolve(text, "--direction ltr"),
            resolve(text, "--direction ltr --no-fast-path"),
            "{:?}",
            text
        );
    }
}

#[test]
#[should_panic(expected = "unknown options")]
fn misspelled_option() {
    resolve("a", "--directoin ltr");
}
