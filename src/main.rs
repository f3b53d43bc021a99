use clap::Parser;
use std::process;

use tasklist::cli::{self, Cli, Commands};
use tasklist::config::Config;
use tasklist::{logging, output};

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let config = Config::resolve(cli_args.data_dir.as_deref());
    let log_file = match (&cli_args.command, &config) {
        (Commands::Board, Ok(config)) => Some(config.board_log_path()),
        _ => None,
    };
    if let Err(e) = logging::init(cli_args.verbose, cli_args.quiet, log_file.as_deref()) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            output::report_error(&e, json_output);
            process::exit(1);
        }
    };

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&config, json_output),
        Commands::Add { text } => cli::task::run_add(&config, &text, json_output),
        Commands::Toggle { id } => cli::task::run_toggle(&config, id, json_output),
        Commands::Delete { id } => cli::task::run_delete(&config, id, json_output),
        Commands::List { filter } => cli::task::run_list(&config, &filter, json_output),
        Commands::Status => cli::status::run(&config, json_output),
        Commands::Export => cli::snapshot::run_export(&config, json_output),
        Commands::Reset => cli::snapshot::run_reset(&config, json_output),
        Commands::Board => cli::board::run(&config, json_output),
    };

    process::exit(exit_code);
}
