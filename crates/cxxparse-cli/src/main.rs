mod cli;
mod commands;


use clap::Parser;

use cli::{Cli, Command};
use commands::check::CheckArgs;
use commands::rules::RulesArgs;
use commands::tree::TreeArgs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    match Cli::parse().command {
        Command::Tree {
            file,
            rule,
            parse,
            output,
        } => commands::tree::run(TreeArgs {
            file,
            rule,
            parse,
            output,
        }),
        Command::Check {
            files,
            parse,
            jobs,
            color,
        } => commands::check::run(CheckArgs {
            files,
            parse,
            jobs,
            color,
        }),
        Command::Rules { reachable, parse } => {
            commands::rules::run(RulesArgs { reachable, parse })
        }
    }
}
