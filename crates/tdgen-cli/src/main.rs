//! `tdgen`: combined test data generator.

use std::io::{self, IsTerminal};

use clap::Parser;
use tdgen_cli::cli::Cli;
use tdgen_cli::commands::run_generate;
use tdgen_cli::logging::init_logging;
use tdgen_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let show_progress = !cli.generate.no_progress && io::stderr().is_terminal();
    let exit_code = match run_generate(&cli.generate, show_progress) {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
