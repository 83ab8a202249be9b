use std::path::PathBuf;
use std::str::FromStr;

const HELP: &str = "\
USAGE:
    bidi [OPTIONS] [TEXT]

OPTIONS:
    -h, --help                          Show help options
        --version                       Show version number
        --text TEXT                     Set input text
        --text-file PATH                Set input text file
    -u, --unicodes LIST                 Set comma-separated list of input Unicode codepoints
                                        Examples: 'U+05D0,U+0028'
        --direction DIRECTION           Set paragraph direction [default: auto]
                                        [possible values: ltr, rtl, auto]
        --no-fast-path                  Resolve text without right-to-left characters too
        --skip-line-reset               Do not reset trailing whitespace levels
        --visual                        Output characters in visual order
        --no-categories                 Do not output resolved categories
        --no-indices                    Do not output character indices
        --no-levels                     Do not output resolved levels
        --reorder                       Output the reordered text instead

ARGS:
    [TEXT]                              An optional text
";

struct Args {
    help: bool,
    version: bool,
    text: Option<String>,
    text_file: Option<PathBuf>,
    unicodes: Option<String>,
    direction: Option<rustybidi::Direction>,
    no_fast_path: bool,
    skip_line_reset: bool,
    visual: bool,
    no_categories: bool,
    no_indices: bool,
    no_levels: bool,
    reorder: bool,
    free: Vec<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let args = Args {
        help: args.contains(["-h", "--help"]),
        version: args.contains("--version"),
        text: args.opt_value_from_str("--text")?,
        text_file: args.opt_value_from_str("--text-file")?,
        unicodes: args.opt_value_from_fn(["-u", "--unicodes"], parse_unicodes)?,
        direction: args
            .opt_value_from_fn("--direction", parse_direction)?
            .flatten(),
        no_fast_path: args.contains("--no-fast-path"),
        skip_line_reset: args.contains("--skip-line-reset"),
        visual: args.contains("--visual"),
        no_categories: args.contains("--no-categories"),
        no_indices: args.contains("--no-indices"),
        no_levels: args.contains("--no-levels"),
        reorder: args.contains("--reorder"),
        free: args.finish().into_iter().map(|s| s.to_string_lossy().into_owned()).collect(),
    };

    Ok(args)
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    if args.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.help {
        print!("{}", HELP);
        return;
    }

    let text = if let Some(path) = args.text_file {
        match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: failed to read '{}': {}.", path.display(), e);
                std::process::exit(1);
            }
        }
    } else if let Some(text) = args.free.first() {
        text.clone()
    } else if let Some(text) = args.unicodes {
        text
    } else if let Some(text) = args.text {
        text
    } else {
        eprintln!("Error: text is not set.");
        std::process::exit(1);
    };

    let mut buffer = rustybidi::BidiBuffer::new();
    buffer.push_str(text.trim_end_matches(['\r', '\n']));

    if let Some(d) = args.direction {
        buffer.set_direction(d);
    }

    let mut resolve_flags = rustybidi::ResolveFlags::default();
    resolve_flags.set(rustybidi::ResolveFlags::NO_FAST_PATH, args.no_fast_path);
    resolve_flags.set(rustybidi::ResolveFlags::SKIP_LINE_RESET, args.skip_line_reset);
    buffer.set_flags(resolve_flags);

    let paragraph = rustybidi::resolve_buffer(buffer);

    if args.reorder {
        let line: String = paragraph
            .visual_order(0..paragraph.len())
            .into_iter()
            .filter_map(|idx| paragraph.display_char(idx))
            .collect();
        println!("{}", line);
        return;
    }

    let mut format_flags = rustybidi::SerializeFlags::default();
    if args.visual {
        format_flags |= rustybidi::SerializeFlags::VISUAL_ORDER;
    }

    if args.no_categories {
        format_flags |= rustybidi::SerializeFlags::NO_CATEGORIES;
    }

    if args.no_indices {
        format_flags |= rustybidi::SerializeFlags::NO_INDICES;
    }

    if args.no_levels {
        format_flags |= rustybidi::SerializeFlags::NO_LEVELS;
    }

    println!("{}", paragraph.serialize(format_flags));
}

fn parse_unicodes(s: &str) -> Result<String, String> {
    let mut text = String::new();
    for u in s.split(',') {
        let hex = u.strip_prefix("U+").unwrap_or(u);
        let cp = u32::from_str_radix(hex, 16)
            .map_err(|_| format!("'{}' is not a valid codepoint", u))?;

        let c = char::from_u32(cp).ok_or_else(|| format!("{} is not a valid codepoint", u))?;

        text.push(c);
    }

    Ok(text)
}

fn parse_direction(s: &str) -> Result<Option<rustybidi::Direction>, String> {
    if s.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }

    rustybidi::Direction::from_str(s)
        .map(Some)
        .map_err(|e| e.to_string())
}
