mod config;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use rematch::{parse_regex, Limits, Outcome, Regex};

// Usage: rematch [OPTIONS] <PATTERN> [FILE]...
#[derive(Parser)]
#[command(
    name = "rematch",
    version,
    about = "Print lines matching a minimal regular expression"
)]
struct Cli {
    /// Literals, `.`, `*`, a leading `^` and a trailing `$`
    pattern: String,

    /// Files to search; standard input when empty or `-`
    files: Vec<PathBuf>,

    /// Select non-matching lines
    #[arg(short = 'v', long)]
    invert_match: bool,

    /// Prefix each line with its line number
    #[arg(short = 'n', long)]
    line_number: bool,

    /// Print only a count of selected lines
    #[arg(short, long)]
    count: bool,

    /// Print nothing, report through the exit status only
    #[arg(short, long)]
    quiet: bool,

    /// Maximum nesting depth per line (overrides config)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum match steps per line (overrides config)
    #[arg(long)]
    max_steps: Option<u64>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Totals {
    selected: u64,
    inconclusive: u64,
    errors: u64,
}

impl Totals {
    fn exit_code(&self) -> u8 {
        if self.selected > 0 {
            0
        } else if self.errors > 0 || self.inconclusive > 0 {
            2
        } else {
            1
        }
    }
}

struct Search<'a> {
    regex: &'a Regex,
    limits: Limits,
    invert: bool,
    line_number: bool,
    count: bool,
    quiet: bool,
    show_name: bool,
}

impl Search<'_> {
    /// Searches one input. Read failures are reported and counted in
    /// `totals`; only write failures are returned.
    fn run<R: BufRead, W: Write>(
        &self,
        name: &str,
        reader: R,
        out: &mut W,
        totals: &mut Totals,
    ) -> Result<()> {
        let mut selected = 0u64;

        for (idx, chunk) in reader.split(b'\n').enumerate() {
            let line_no = idx + 1;
            let mut bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("rematch: reading {}: {}", name, e);
                    totals.errors += 1;
                    break;
                }
            };
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    eprintln!("rematch: {}:{}: {}", name, line_no, e.utf8_error());
                    totals.errors += 1;
                    continue;
                }
            };

            let is_selected = match self.regex.evaluate(&line, &self.limits) {
                Outcome::Inconclusive(limit) => {
                    warn!(source = name, line = line_no, %limit, "skipping line");
                    totals.inconclusive += 1;
                    continue;
                }
                outcome => outcome.is_match() != self.invert,
            };
            if !is_selected {
                continue;
            }

            selected += 1;
            if self.quiet || self.count {
                continue;
            }
            if self.show_name {
                write!(out, "{}:", name)?;
            }
            if self.line_number {
                write!(out, "{}:", line_no)?;
            }
            writeln!(out, "{}", line)?;
        }

        if self.count && !self.quiet {
            if self.show_name {
                write!(out, "{}:", name)?;
            }
            writeln!(out, "{}", selected)?;
        }

        debug!(source = name, selected, "finished input");
        totals.selected += selected;
        Ok(())
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = config::load_config(cli.config.as_deref())?;
    let regex = parse_regex(&cli.pattern)?;

    let mut limits = config.limits.to_limits();
    if let Some(max_depth) = cli.max_depth {
        limits = limits.with_max_depth(max_depth);
    }
    if let Some(max_steps) = cli.max_steps {
        limits = limits.with_max_steps(max_steps);
    }
    debug!(?limits, ?regex, "starting search");

    let files = if cli.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.files
    };

    let search = Search {
        regex: &regex,
        limits,
        invert: cli.invert_match,
        line_number: cli.line_number || config.output.line_number,
        count: cli.count,
        quiet: cli.quiet,
        show_name: files.len() > 1,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut totals = Totals::default();

    for path in &files {
        let name = if path == Path::new("-") {
            "(standard input)".to_string()
        } else {
            path.display().to_string()
        };
        let reader = match open_input(path) {
            Ok(reader) => reader,
            Err(e) => {
                eprintln!("rematch: {:#}", e);
                totals.errors += 1;
                continue;
            }
        };
        search.run(&name, reader, &mut out, &mut totals)?;
    }
    out.flush()?;

    debug!(?totals, "search complete");
    Ok(ExitCode::from(totals.exit_code()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("rematch: {:#}", e);
            ExitCode::from(2)
        }
    }
}
