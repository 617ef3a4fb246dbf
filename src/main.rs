use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;
use taskdeck::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let config = match Config::load(cli.api_url.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = taskdeck::tui::run(config).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
