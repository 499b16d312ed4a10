//! `dofi_headless` - drive a console session without a window
//!
//! Feeds commands to a [`Session`] backed by a tiny echo interpreter and
//! prints the console frame as plain text. Useful for checking wrap and
//! scrollback behaviour at a given screen size.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dofi_headless -- --help
//! echo "print hello" | cargo run --bin dofi_headless
//! cargo run --bin dofi_headless -- --width 64 -c "print a long line of text"
//! ```

use dofi::input::{Event, TextEvent};
use dofi::text::console_text;
use dofi::{Error, Result, ScreenMetrics, ScriptConsole, ScriptHost, Session, set_log_callback};
use std::ffi::OsString;
use std::io::{self, BufRead, Write};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "dofi_headless - run console commands and print the frame

USAGE:
    dofi_headless [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    -c, --command <CMD>     Submit CMD (repeatable). Without any, commands
                            are read from stdin, one per line
    --width <PX>            Screen width in pixels (default: 128)
    --height <PX>           Screen height in pixels (default: 128)
    --font <WxS>            Font cell width and size in pixels (default: 4x5)
    --history <N>           Keep at most N console entries
                            (default: height / font size * 2)
    --all                   Print the whole scrollback, not just what fits
    -v, --verbose           Log diagnostics to stderr

SCRIPT:
    print <text>            Append an output line
    cls                     Clear the console
    run <path>              Run every line of a file
    Statements may be separated with ';'.

EXAMPLES:
    dofi_headless -c 'print hi' -c 'print there'
    dofi_headless --width 64 --font 4x5 < session.txt
";

/// Configuration parsed from command-line arguments.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Screen and font size.
    pub metrics: ScreenMetrics,
    /// Console entry cap override.
    pub history: Option<usize>,
    /// Commands to submit, in order. Empty means read stdin.
    pub commands: Vec<String>,
    /// Print the whole scrollback instead of the visible frame.
    pub print_all: bool,
    /// Log diagnostics to stderr.
    pub verbose: bool,
}

/// Result of CLI parsing.
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut builder = ScreenMetrics::builder();
        let (mut width, mut height) = (config.metrics.width, config.metrics.height);
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();

            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,

                "-c" | "--command" => match args.next() {
                    Some(v) => config.commands.push(v.to_string_lossy().to_string()),
                    None => return ParseResult::Error(format!("{arg_str} requires a value")),
                },

                "--width" | "--height" => {
                    let value = match args.next() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => return ParseResult::Error(format!("{arg_str} requires a value")),
                    };
                    let Some(px) = parse_positive(&value) else {
                        return ParseResult::Error(format!(
                            "Invalid {arg_str} value: {value} (must be positive integer)"
                        ));
                    };
                    if arg_str == "--width" {
                        width = px;
                    } else {
                        height = px;
                    }
                }

                "--font" => {
                    let value = match args.next() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => {
                            return ParseResult::Error(
                                "--font requires a value (e.g., 4x5)".to_string(),
                            );
                        }
                    };
                    match parse_font(&value) {
                        Some((w, s)) => builder = builder.font(w, s),
                        None => {
                            return ParseResult::Error(format!(
                                "Invalid --font: {value} (use WxS format, e.g., 4x5)"
                            ));
                        }
                    }
                }

                "--history" => {
                    let value = match args.next() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => return ParseResult::Error("--history requires a value".to_string()),
                    };
                    match value.parse::<usize>() {
                        Ok(n) => config.history = Some(n),
                        Err(_) => {
                            return ParseResult::Error(format!("Invalid --history value: {value}"));
                        }
                    }
                }

                "--all" => config.print_all = true,
                "-v" | "--verbose" => config.verbose = true,

                other if other.starts_with('-') => {
                    return ParseResult::Error(format!("Unknown option: {other}"));
                }
                other => return ParseResult::Error(format!("Unexpected argument: {other}")),
            }
        }

        match builder.size(width, height).build() {
            Ok(metrics) => config.metrics = metrics,
            Err(err) => return ParseResult::Error(err.to_string()),
        }
        ParseResult::Config(config)
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|&n| n > 0)
}

/// Parse a font string like "4x5" into (cell width, size).
fn parse_font(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once('x')?;
    Some((parse_positive(w)?, parse_positive(h)?))
}

// ============================================================================
// Echo interpreter
// ============================================================================

/// Minimal interpreter: `print`, `cls`, and nothing else.
#[derive(Debug, Default)]
struct EchoHost;

impl ScriptHost for EchoHost {
    fn eval(&mut self, source: &str, console: &mut ScriptConsole<'_>) -> Result<()> {
        for statement in source.split(['\n', ';']).map(str::trim) {
            if statement.is_empty() {
                continue;
            }
            if statement == "cls" {
                console.cls();
            } else if statement == "print" {
                console.print("");
            } else if let Some(text) = statement.strip_prefix("print ") {
                console.print(text);
            } else {
                return Err(Error::Script(format!("unknown statement: {statement}")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> io::Result<()> {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => run(&config),
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            Ok(())
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn run(config: &Config) -> io::Result<()> {
    if config.verbose {
        set_log_callback(|level, message| eprintln!("[{level:?}] {message}"));
    }

    let mut session = Session::new(config.metrics, EchoHost);
    if config.history.is_some() {
        session.set_history_capacity(config.history);
    }

    if config.commands.is_empty() {
        for line in io::stdin().lock().lines() {
            submit_frame(&mut session, &line?);
        }
    } else {
        for command in &config.commands {
            submit_frame(&mut session, command);
        }
    }

    let rows = if config.print_all {
        console_text(session.lines())
    } else {
        session.draw().rows.into_iter().map(|row| row.text).collect()
    };

    let mut out = io::stdout().lock();
    for row in rows {
        writeln!(out, "{row}")?;
    }
    out.flush()
}

/// Type one command and press Enter within a single frame.
fn submit_frame<H: ScriptHost>(session: &mut Session<H>, command: &str) {
    let typed = command.replace(['\r', '\n'], " ");
    session.update(&[Event::Text(TextEvent::new(format!("{typed}\n")))]);
}
