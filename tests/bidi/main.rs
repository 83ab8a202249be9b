mod basic;
mod explicit;
mod isolates;
mod reorder;

use rustybidi::{ResolveFlags, SerializeFlags};

struct Args {
    direction: Option<rustybidi::Direction>,
    utf16: bool,
    no_fast_path: bool,
    skip_line_reset: bool,
    visual: bool,
    no_categories: bool,
    no_indices: bool,
    no_levels: bool,
    levels: bool,
}

fn parse_args(args: Vec<std::ffi::OsString>) -> Result<Args, pico_args::Error> {
    let mut parser = pico_args::Arguments::from_vec(args);
    let args = Args {
        direction: parser.opt_value_from_str("--direction")?,
        utf16: parser.contains("--utf16"),
        no_fast_path: parser.contains("--no-fast-path"),
        skip_line_reset: parser.contains("--skip-line-reset"),
        visual: parser.contains("--visual"),
        no_categories: parser.contains("--no-categories"),
        no_indices: parser.contains("--no-indices"),
        no_levels: parser.contains("--no-levels"),
        levels: parser.contains("--levels"),
    };

    let remaining = parser.finish();
    assert!(remaining.is_empty(), "unknown options: {:?}", remaining);

    Ok(args)
}

/// Resolves `text` and serializes the result.
///
/// `--levels` is a shorthand for `--no-categories --no-indices`.
pub fn resolve(text: &str, options: &str) -> String {
    let args = options
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(std::ffi::OsString::from)
        .collect();
    let args = parse_args(args).unwrap();

    let mut buffer = rustybidi::BidiBuffer::new();
    if args.utf16 {
        let units: Vec<u16> = text.encode_utf16().collect();
        buffer.push_utf16(&units);
    } else {
        buffer.push_str(text);
    }

    if let Some(d) = args.direction {
        buffer.set_direction(d);
    }

    let mut resolve_flags = ResolveFlags::default();
    resolve_flags.set(ResolveFlags::NO_FAST_PATH, args.no_fast_path);
    resolve_flags.set(ResolveFlags::SKIP_LINE_RESET, args.skip_line_reset);
    buffer.set_flags(resolve_flags);

    let paragraph = rustybidi::resolve_buffer(buffer);

    let mut format_flags = SerializeFlags::default();
    format_flags.set(SerializeFlags::VISUAL_ORDER, args.visual);
    format_flags.set(SerializeFlags::NO_CATEGORIES, args.no_categories || args.levels);
    format_flags.set(SerializeFlags::NO_INDICES, args.no_indices || args.levels);
    format_flags.set(SerializeFlags::NO_LEVELS, args.no_levels);

    paragraph.serialize(format_flags)
}

/// Resolves levels of a string with a fixed direction.
pub fn levels(text: &str, rtl: bool) -> Vec<u8> {
    let chars: Vec<char> = text.chars().collect();
    rustybidi::resolve(&chars, rtl).0
}
