//! Command-line interface for converting a Markdown file into a PowerPoint deck.
//!
//! # Usage
//!
//! ```sh
//! slidemark talk.md out/talk.pptx
//! slidemark talk.md talk.pptx --config deck.yaml --no-diagrams
//! slidemark talk.md talk.pptx --outline -v
//! ```
//!
//! Exit codes: 0 on success, 1 when the input is missing or unreadable or the
//! conversion fails, 2 on a usage error.

use clap::{Parser, ValueEnum};
use slidemark::convert::Converter;
use slidemark::deck::{DeckOptions, RepeatedTitle};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert a Markdown document into a PowerPoint presentation
#[derive(Parser, Debug)]
#[command(name = "slidemark", version)]
struct Args {
    /// Markdown file to convert
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path of the .pptx file to write
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// YAML file with deck options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the slide outline as YAML after writing the deck
    #[arg(long)]
    outline: bool,

    /// Show Mermaid blocks as code instead of rendering them
    #[arg(long)]
    no_diagrams: bool,

    /// Upper bound for one diagram renderer run, in seconds
    #[arg(long, value_name = "SECS")]
    diagram_timeout: Option<u64>,

    /// What to do with level-1 headings after the first
    #[arg(long, value_enum)]
    repeated_title: Option<RepeatedTitleArg>,

    /// Log every mapping decision
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Repeated title policy for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RepeatedTitleArg {
    /// Start a new section
    Section,
    /// Drop the heading
    Ignore,
}

impl From<RepeatedTitleArg> for RepeatedTitle {
    fn from(arg: RepeatedTitleArg) -> Self {
        match arg {
            RepeatedTitleArg::Section => RepeatedTitle::Section,
            RepeatedTitleArg::Ignore => RepeatedTitle::Ignore,
        }
    }
}

impl Args {
    /// Options file (or defaults) with command-line overrides applied.
    fn options(&self) -> slidemark::Result<DeckOptions> {
        let mut options = match &self.config {
            Some(path) => DeckOptions::from_file(path)?,
            None => DeckOptions::default(),
        };
        if self.no_diagrams {
            options = options.with_diagrams(false);
        }
        if let Some(secs) = self.diagram_timeout {
            options = options.with_diagram_timeout(secs);
        }
        if let Some(policy) = self.repeated_title {
            options = options.with_repeated_title(policy.into());
        }
        options.validate()?;
        Ok(options)
    }

    fn log_filter(&self) -> EnvFilter {
        let directive = if self.verbose {
            "slidemark=debug"
        } else if self.quiet {
            "slidemark=warn"
        } else {
            "slidemark=info"
        };
        if self.verbose || self.quiet {
            EnvFilter::new(directive)
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> slidemark::Result<()> {
    let converter = Converter::new(args.options()?);

    if args.outline {
        let (_, outline) = converter.convert_file_with_outline(&args.input, &args.output)?;
        print!("{}", outline.to_yaml()?);
    } else {
        converter.convert_file(&args.input, &args.output)?;
    }

    println!("Wrote {}", args.output.display());
    Ok(())
}
