use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use weatherterm_lib::cli::{self, Cli};
use weatherterm_lib::infrastructure::{AppConfig, init_logging_with_config};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("weatherterm: error: {e:#}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging_with_config(&config.logging) {
        eprintln!("weatherterm: warning: logging disabled: {e:#}");
    }

    if cli.list_parsers {
        println!("{}", cli::list_parsers());
        return ExitCode::SUCCESS;
    }

    let forecasts = match cli::run(&cli, &config) {
        Ok(forecasts) => forecasts,
        Err(e) => {
            debug!("Request failed: {:?}", e);
            eprintln!("weatherterm: error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match cli::render(&forecasts, cli.json) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("weatherterm: error: {e}");
            ExitCode::FAILURE
        }
    }
}
