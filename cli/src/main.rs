mod commands;
mod terminal;

use commands::{CommandLine, Commands, count, list, parse, truncate};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    match commands.command {
        Commands::Parse {
            capture,
            include_local,
            store,
        } => parse::run(&capture, store, include_local),
        Commands::List { store } => list::run(store),
        Commands::Count { store } => count::run(store),
        Commands::Truncate { store } => truncate::run(store),
    }
}
