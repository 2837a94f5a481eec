mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{BlockCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::New { name, force } => commands::new::run(name, force, cli.verbose),
        Commands::Build { path, json } => commands::build::run(path, json, cli.verbose),
        Commands::Status { path, json } => commands::status::run(path, json, cli.verbose),
        Commands::Block(block_cmd) => match block_cmd {
            BlockCommands::Delete { file, index, path } => {
                commands::block::delete(path, file, index, cli.verbose)
            }
            BlockCommands::Insert {
                file,
                partial,
                path,
            } => commands::block::insert(path, file, partial, cli.verbose),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
