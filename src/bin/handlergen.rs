use clap::Parser;
use handlergen::cli::{run_cli, Cli};
use handlergen::logging::init_logging_with_config;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging_with_config(&cli.log_config()) {
        eprintln!("Warning: {err:#}");
    }
    if let Err(err) = run_cli(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
