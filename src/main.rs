mod adapters;
mod app;
mod cli;
mod core;
mod global_constants;
mod presentation;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::core::models::ServiceSettings;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_NAME);

    let settings = ServiceSettings::load(cli.config.as_deref())?;
    let app = app::OcrApp::build(settings)?;

    match cli.command {
        Some(Commands::Extract {
            image,
            keyword,
            language,
        }) => {
            let outcome = app.run_single_extraction(&image, language, &keyword).await?;
            println!("Extracted Text:\n{}\n", outcome.extracted_text);
            println!("Search Results:\n{}", outcome.result_text);
        }
        Some(Commands::Serve { bind }) => {
            println!("{}", global_constants::STARTUP_BANNER);
            app.run_server(bind.as_deref()).await?;
        }
        None => {
            println!("{}", global_constants::STARTUP_BANNER);
            app.run_server(None).await?;
        }
    }

    log::info!("[MAIN] Exiting");
    Ok(())
}
