//! glids - resolve GitLab group and project paths to numeric IDs

use clap::Parser;
use colored::Colorize;

mod catalog;
mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::Cli;
use error::Error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli::run(&cli).await {
        Ok(()) => {}
        Err(Error::Cancelled) => {
            println!("\nOperation cancelled.");
        }
        Err(err) => {
            eprintln!("\n{} {}", "Error:".red(), err);
            if err.api_status() == Some(401) {
                eprintln!("Check that GITLAB_TOKEN is valid and has the read_api scope.");
            }
            std::process::exit(1);
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "glids=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
    log::debug!("Debug logging enabled");
}
