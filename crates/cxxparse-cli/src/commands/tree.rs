//! Print the parse tree of a source file.

use std::path::PathBuf;

use cxxparse_core::Colors;
use cxxparse_lib::{Error, ParseTree, Parser, RuleId, lexer};

use super::source::{display_name, load_configuration, load_source, resolve_language};
use super::{PARSER_MAX_DEPTH, load_grammar, on_parser_stack};
use crate::cli::{ParseArgs, Stream, TreeOutputArgs};

pub struct TreeArgs {
    pub file: PathBuf,
    pub rule: Option<String>,
    pub parse: ParseArgs,
    pub output: TreeOutputArgs,
}

/// How the tree is printed.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeFormat {
    pub json: bool,
    pub cst: bool,
    pub spans: bool,
    pub eof: bool,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let config = load_configuration(&args.parse).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let root = match args.rule.as_deref() {
        Some(name) => RuleId::from_name(name).unwrap_or_else(|| {
            eprintln!("error: unknown rule '{}'", name);
            eprintln!();
            eprintln!("Run 'cxxparse rules' for the full list.");
            std::process::exit(1);
        }),
        None => RuleId::TranslationUnit,
    };

    let source = load_source(&args.file).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let language = resolve_language(&args.parse, &config, &args.file);
    let name = display_name(&args.file);
    let format = TreeFormat {
        json: args.output.json,
        cst: args.output.cst,
        spans: args.output.spans,
        eof: args.output.eof,
        color: args.output.color.should_colorize(Stream::Stdout),
    };

    let grammar = load_grammar(&config.grammar_key(language));
    let rendered = on_parser_stack(|| {
        let tokens = lexer::lex(&source, language);
        let tree = Parser::new(&grammar, &tokens)
            .root(root)
            .max_depth(Some(PARSER_MAX_DEPTH))
            .parse()?;
        render(&tree, format)
    });

    match rendered {
        Ok(output) => print!("{}", output),
        Err(Error::Recognition(err)) => {
            let colored = args.output.color.should_colorize(Stream::Stderr);
            eprintln!("{}", err.render(&source, Some(&name), colored));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {}: {}", name, err);
            std::process::exit(1);
        }
    }
}

pub fn render(tree: &ParseTree<'_>, format: TreeFormat) -> Result<String, Error> {
    if format.json {
        return Ok(format!("{:#}\n", tree.to_json()?));
    }
    if format.cst {
        return Ok(format!("{:#?}", tree.to_cst()));
    }
    Ok(tree
        .printer()
        .with_spans(format.spans)
        .with_eof(format.eof)
        .colors(Colors::new(format.color))
        .dump())
}
