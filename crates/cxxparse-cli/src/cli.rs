use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cxxparse_lib::Language;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self, stream: Stream) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => match stream {
                Stream::Stdout => std::io::IsTerminal::is_terminal(&std::io::stdout()),
                Stream::Stderr => std::io::IsTerminal::is_terminal(&std::io::stderr()),
            },
        }
    }
}

/// Where colored output is going to be written.
#[derive(Clone, Copy, Debug)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LangChoice {
    C,
    #[value(aliases = ["c++", "cpp"])]
    Cxx,
}

impl From<LangChoice> for Language {
    fn from(choice: LangChoice) -> Self {
        match choice {
            LangChoice::C => Language::C,
            LangChoice::Cxx => Language::Cxx,
        }
    }
}

#[derive(Parser)]
#[command(name = "cxxparse", bin_name = "cxxparse", version)]
#[command(about = "Packrat parser for C++ with GNU, C++/CLI and attributed ATL dialects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the parse tree of a source file
    #[command(after_help = r#"EXAMPLES:
  cxxparse tree main.cc
  cxxparse tree main.cc --spans
  cxxparse tree legacy.c --lang c --json
  cxxparse tree - --rule expression < expr.txt"#)]
    Tree {
        /// Source file (use "-" for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rule to parse from, by name (default: translationUnit)
        #[arg(long, value_name = "RULE")]
        rule: Option<String>,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        output: TreeOutputArgs,
    },

    /// Parse files and report code the parser cannot read
    #[command(after_help = r#"EXAMPLES:
  cxxparse check src/*.cc
  cxxparse check --no-recovery main.cc
  cxxparse check --config cxxparse.json -j 4 src/*.c src/*.cc"#)]
    Check {
        /// Source files
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,

        /// Number of worker threads (default: available parallelism)
        #[arg(short = 'j', long, value_name = "N")]
        jobs: Option<NonZeroUsize>,

        /// Colorize diagnostics
        #[arg(long, default_value = "auto", value_name = "WHEN")]
        color: ColorChoice,
    },

    /// List the grammar rules
    #[command(after_help = r#"EXAMPLES:
  cxxparse rules
  cxxparse rules --reachable --lang c
  cxxparse rules --reachable --config cxxparse.json"#)]
    Rules {
        /// Only list rules reachable from translationUnit in the configured grammar
        #[arg(long)]
        reachable: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct ParseArgs {
    /// Fail on unreadable declarations instead of skipping them
    #[arg(long)]
    pub no_recovery: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source language (inferred from the configured C suffixes otherwise)
    #[arg(short = 'l', long, value_name = "LANG")]
    pub lang: Option<LangChoice>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct TreeOutputArgs {
    /// Print the tree as JSON
    #[arg(long, conflicts_with = "cst")]
    pub json: bool,

    /// Print the rowan syntax tree instead
    #[arg(long)]
    pub cst: bool,

    /// Show token ranges and positions
    #[arg(long)]
    pub spans: bool,

    /// Include the end-of-input leaf
    #[arg(long)]
    pub eof: bool,

    /// Colorize output
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorChoice,
}
