//! List the grammar rules.

use std::fmt::Write;

use cxxparse_lib::{CxxGrammar, Language, RuleId};

use super::load_grammar;
use super::source::load_configuration;
use crate::cli::ParseArgs;

pub struct RulesArgs {
    pub reachable: bool,
    pub parse: ParseArgs,
}

pub fn run(args: RulesArgs) {
    if !args.reachable {
        print!("{}", render_registry());
        return;
    }

    let config = load_configuration(&args.parse).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });
    let language = args.parse.lang.map_or(Language::Cxx, Language::from);
    let grammar = load_grammar(&config.grammar_key(language));
    print!("{}", render_reachable(&grammar));
}

/// Every rule in the registry, by index.
pub fn render_registry() -> String {
    let mut out = String::new();
    for rule in RuleId::ALL {
        writeln!(out, "{:>3}  {}", rule.index(), rule).expect("String write never fails");
    }
    out
}

/// Rules the translation unit can reach in `grammar`, with their flags.
pub fn render_reachable(grammar: &CxxGrammar) -> String {
    let reachable = grammar.reachable_from(RuleId::TranslationUnit);
    let mut out = String::new();
    for &rule in &reachable {
        let collapse = grammar.rule(rule).is_some_and(|def| def.collapse);
        let flag = if collapse { "  (collapse)" } else { "" };
        writeln!(out, "{:>3}  {}{}", rule.index(), rule, flag).expect("String write never fails");
    }
    writeln!(
        out,
        "{} of {} rules reachable",
        reachable.len(),
        RuleId::COUNT
    )
    .expect("String write never fails");
    out
}
