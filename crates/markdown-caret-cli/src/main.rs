use anyhow::{Context, Result, bail};
use markdown_caret_config::Config;
use markdown_caret_engine::{
    Position, RopeDocument, TextDocument, append_block, find_start_index, io, replace_lines,
    wrap_text,
};
use std::{env, path::PathBuf, process};

const USAGE: &str = "\
Usage:
  markdown-caret-cli [--write] <file.md> wrap <line> <from-col> <to-col> <before> [after]
  markdown-caret-cli [--write] <file.md> lines <first> <last> <heading|quote|bullet|number|trim>
  markdown-caret-cli [--write] <file.md> append <line> <content>
  markdown-caret-cli tier <width>
  markdown-caret-cli init-config";

/// Built-in per-line rewrites for the `lines` command
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineStyle {
    Heading,
    Quote,
    Bullet,
    Number,
    Trim,
}

impl LineStyle {
    fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "heading" => LineStyle::Heading,
            "quote" => LineStyle::Quote,
            "bullet" => LineStyle::Bullet,
            "number" => LineStyle::Number,
            "trim" => LineStyle::Trim,
            other => bail!("unknown line style '{other}'"),
        })
    }

    fn apply(self, line: &str, index: usize) -> String {
        match self {
            LineStyle::Heading => format!("# {line}"),
            LineStyle::Quote => format!("> {line}"),
            LineStyle::Bullet => format!("- {line}"),
            LineStyle::Number => format!("{}. {line}", index + 1),
            LineStyle::Trim => line.trim().to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Wrap {
        line: usize,
        from: usize,
        to: usize,
        before: String,
        after: Option<String>,
    },
    Lines {
        first: usize,
        last: usize,
        style: LineStyle,
    },
    Append {
        line: usize,
        content: String,
    },
}

#[derive(Debug, PartialEq)]
enum Invocation {
    Edit {
        file: PathBuf,
        write: bool,
        command: Command,
    },
    Tier {
        width: f64,
    },
    InitConfig,
}

fn number(args: &[String], index: usize, what: &str) -> Result<usize> {
    let raw = args
        .get(index)
        .with_context(|| format!("missing {what}"))?;
    raw.parse()
        .with_context(|| format!("{what} must be a non-negative integer, got '{raw}'"))
}

fn text(args: &[String], index: usize, what: &str) -> Result<String> {
    args.get(index)
        .cloned()
        .with_context(|| format!("missing {what}"))
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut args = args.to_vec();

    if args.first().map(String::as_str) == Some("init-config") {
        return Ok(Invocation::InitConfig);
    }

    if args.first().map(String::as_str) == Some("tier") {
        let raw = text(&args, 1, "width")?;
        let width = raw
            .parse()
            .with_context(|| format!("width must be a number, got '{raw}'"))?;
        return Ok(Invocation::Tier { width });
    }

    let write = match args.iter().position(|a| a == "--write") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };

    let file = PathBuf::from(text(&args, 0, "file")?);
    let command = match args.get(1).map(String::as_str) {
        Some("wrap") => Command::Wrap {
            line: number(&args, 2, "line")?,
            from: number(&args, 3, "from-col")?,
            to: number(&args, 4, "to-col")?,
            before: text(&args, 5, "before")?,
            after: args.get(6).cloned(),
        },
        Some("lines") => Command::Lines {
            first: number(&args, 2, "first line")?,
            last: number(&args, 3, "last line")?,
            style: LineStyle::parse(&text(&args, 4, "line style")?)?,
        },
        Some("append") => Command::Append {
            line: number(&args, 2, "line")?,
            content: text(&args, 3, "content")?,
        },
        Some(other) => bail!("unknown command '{other}'"),
        None => bail!("missing command"),
    };

    Ok(Invocation::Edit {
        file,
        write,
        command,
    })
}

fn run_command(doc: &mut RopeDocument, command: &Command) {
    match command {
        Command::Wrap {
            line,
            from,
            to,
            before,
            after,
        } => {
            doc.set_selection(Position::new(*line, *from), Position::new(*line, *to));
            wrap_text(doc, before, after.as_deref());
        }
        Command::Lines { first, last, style } => {
            doc.set_selection(Position::line_start(*first), Position::line_start(*last));
            replace_lines(doc, |line, i| style.apply(line, i));
        }
        Command::Append { line, content } => {
            let cursor = Position::line_start(*line);
            doc.set_selection(cursor, cursor);
            let at = append_block(doc, content);
            doc.set_selection(at, at);
        }
    }
    doc.focus();
}

fn load_config() -> Config {
    match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config is read from {}", Config::config_path().display());
            process::exit(1);
        }
    }
}

/// Write the default config unless a file is already there.
/// Returns the path and whether it was written.
fn init_config() -> Result<(PathBuf, bool)> {
    let path = Config::config_path();
    if path.exists() {
        return Ok((path, false));
    }
    let path = Config::default().save()?;
    Ok((path, true))
}

fn describe_selection(doc: &RopeDocument) -> String {
    let (anchor, head) = doc.selection();
    format!(
        "selection: {}:{} -> {}:{}",
        anchor.line, anchor.column, head.line, head.column
    )
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    match invocation {
        Invocation::InitConfig => {
            let (path, written) = init_config()?;
            if written {
                println!("Wrote default config to {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
            }
        }
        Invocation::Tier { width } => {
            let config = load_config();
            let tier = find_start_index(width, &config.toolbar_breakpoints);
            log::info!(
                "width {width} against breakpoints {:?}",
                config.toolbar_breakpoints
            );
            println!("{tier}");
        }
        Invocation::Edit {
            file,
            write,
            command,
        } => {
            let config = load_config();
            let mut doc = io::read_file(&file)
                .with_context(|| format!("reading {}", file.display()))?
                .with_word_chars(config.word_chars.clone());

            log::info!("applying {command:?} to {}", file.display());
            run_command(&mut doc, &command);

            if write {
                io::write_file(&file, &doc)
                    .with_context(|| format!("writing {}", file.display()))?;
                println!("{}", describe_selection(&doc));
            } else {
                println!("{}", doc.text());
                println!("{}", describe_selection(&doc));
            }
        }
    }

    Ok(())
}
