use clap::Parser;
use sjqbn_fetch_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let args = Cli::parse();

    // The state dir may be unusable; stderr always works.
    if let Err(e) = logging::init_logging(args.verbose, args.log_file) {
        logging::init_logging(args.verbose, false).ok();
        tracing::warn!("file logging unavailable: {:#}", e);
    }

    if let Err(err) = args.run() {
        if cli::is_config_error(&err) {
            println!("{}", err);
        } else {
            eprintln!("sjqbn-fetch error: {:#}", err);
        }
        std::process::exit(cli::exit_code(&err));
    }
}
