pub mod check;
pub mod rules;
pub mod source;
pub mod tree;


use std::sync::Arc;

use cxxparse_lib::{CxxGrammar, GrammarKey};

/// Stack size for parser threads. The engine recurses once per rule
/// invocation, so nested input needs more than the default 2 MiB.
const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Rule nesting allowed on a parser thread, sized for `PARSER_STACK_SIZE`.
pub const PARSER_MAX_DEPTH: u32 = 10_000;

pub fn parser_thread(name: impl Into<String>) -> std::thread::Builder {
    std::thread::Builder::new()
        .name(name.into())
        .stack_size(PARSER_STACK_SIZE)
}

/// Runs `f` on a scoped thread with a stack big enough for the parser.
pub fn on_parser_stack<T: Send>(f: impl FnOnce() -> T + Send) -> T {
    std::thread::scope(|scope| {
        parser_thread("parser")
            .spawn_scoped(scope, f)
            .unwrap_or_else(|e| {
                eprintln!("error: failed to start parser thread: {}", e);
                std::process::exit(1);
            })
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

pub fn load_grammar(key: &GrammarKey) -> Arc<CxxGrammar> {
    CxxGrammar::cached(key).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
