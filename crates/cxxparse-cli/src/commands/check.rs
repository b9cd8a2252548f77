//! Parse files and report code the parser cannot read.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use cxxparse_lib::{Configuration, CxxGrammar, Error, Parser, RecoveredDeclaration, lexer};

use super::source::{display_name, load_configuration, load_source, resolve_language};
use super::{PARSER_MAX_DEPTH, load_grammar, parser_thread};
use crate::cli::{ColorChoice, ParseArgs, Stream};

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub parse: ParseArgs,
    pub jobs: Option<NonZeroUsize>,
    pub color: ColorChoice,
}

/// Result of checking one file.
#[derive(Debug)]
pub struct FileReport {
    pub name: String,
    pub source: String,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    /// Parsed; `recovered` lists the declarations that were skipped.
    Parsed { recovered: Vec<RecoveredDeclaration> },
    Failed(Error),
    /// The file could not be read.
    Unreadable(String),
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        !matches!(self.outcome, Outcome::Parsed { .. })
    }

    pub fn render(&self, colored: bool) -> String {
        match &self.outcome {
            Outcome::Parsed { recovered } => recovered
                .iter()
                .map(|decl| {
                    format!(
                        "{}:{}: C++ parser can't read code. Declaration is skipped.\n",
                        self.name, decl.line
                    )
                })
                .collect(),
            Outcome::Failed(Error::Recognition(err)) => {
                format!("{}\n", err.render(&self.source, Some(&self.name), colored))
            }
            Outcome::Failed(err) => format!("error: {}: {}\n", self.name, err),
            Outcome::Unreadable(msg) => format!("error: {}\n", msg),
        }
    }
}

pub fn run(args: CheckArgs) {
    let config = load_configuration(&args.parse).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let jobs = args
        .jobs
        .map(NonZeroUsize::get)
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, NonZeroUsize::get))
        .min(args.files.len())
        .max(1);

    let reports = check_files(&args.files, &args.parse, &config, jobs);

    let colored = args.color.should_colorize(Stream::Stderr);
    let mut failed = false;
    for report in &reports {
        eprint!("{}", report.render(colored));
        failed |= report.is_failure();
    }

    if failed {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// Checks `files` on `jobs` worker threads. Reports come back in input order.
pub fn check_files(
    files: &[PathBuf],
    args: &ParseArgs,
    config: &Configuration,
    jobs: usize,
) -> Vec<FileReport> {
    let next = AtomicUsize::new(0);

    let mut reports: Vec<(usize, FileReport)> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..jobs)
            .map(|worker| {
                let next = &next;
                parser_thread(format!("check-{worker}"))
                    .spawn_scoped(scope, move || {
                        let mut done = Vec::new();
                        loop {
                            let index = next.fetch_add(1, Ordering::Relaxed);
                            let Some(path) = files.get(index) else {
                                break done;
                            };
                            done.push((index, check_path(path, args, config)));
                        }
                    })
                    .unwrap_or_else(|e| {
                        eprintln!("error: failed to start worker thread: {}", e);
                        std::process::exit(1);
                    })
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    reports.sort_by_key(|(index, _)| *index);
    reports.into_iter().map(|(_, report)| report).collect()
}

fn check_path(path: &Path, args: &ParseArgs, config: &Configuration) -> FileReport {
    let name = display_name(path);
    let source = match load_source(path) {
        Ok(source) => source,
        Err(msg) => {
            return FileReport {
                name,
                source: String::new(),
                outcome: Outcome::Unreadable(msg),
            };
        }
    };

    let language = resolve_language(args, config, path);
    let grammar = load_grammar(&config.grammar_key(language));
    log::debug!("checking {} as {:?}", name, language);
    check_source(name, source, &grammar)
}

/// Parses `source` with `grammar` from the translation unit.
pub fn check_source(name: String, source: String, grammar: &CxxGrammar) -> FileReport {
    let tokens = lexer::lex(&source, grammar.key().language);
    let parsed = Parser::new(grammar, &tokens)
        .max_depth(Some(PARSER_MAX_DEPTH))
        .parse();
    let outcome = match parsed {
        Ok(tree) => Outcome::Parsed {
            recovered: tree.recovered_declarations(),
        },
        Err(err) => Outcome::Failed(err),
    };
    FileReport {
        name,
        source,
        outcome,
    }
}
