mod aggregator;
mod cli;
mod composer;
mod config;
mod model;
mod parser;
mod pipeline;
mod publisher;
mod render;
mod scraper;
mod server;
mod utils;

#[cfg(test)]
mod testing;

use clap::Parser;
use cli::{Cli, Commands};
use config::{load_config, AppConfig, Credentials};
use model::ReportKind;
use pipeline::Pipeline;
use publisher::{ArtifactWriter, Publisher, TwitterPublisher};
use render::FontRenderer;
use scraper::HttpFetcher;
use server::AppState;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Log panics through tracing as well
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let cli = Cli::parse();

    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve { bind } => {
            let Some(publisher) = twitter_publisher() else {
                return ExitCode::FAILURE;
            };
            let Some(pipeline) = build_pipeline(&config, publisher) else {
                return ExitCode::FAILURE;
            };

            let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            if let Err(e) = server::serve(AppState::new(pipeline), &bind_addr).await {
                error!("Server error on {}: {}", bind_addr, e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Commands::Run { job, dry_run, out_dir } => {
            let publisher: Arc<dyn Publisher> = if dry_run {
                let dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
                info!("Dry run: artifacts go to {}", dir.display());
                Arc::new(ArtifactWriter::new(dir))
            } else {
                match twitter_publisher() {
                    Some(p) => p,
                    None => return ExitCode::FAILURE,
                }
            };
            let Some(pipeline) = build_pipeline(&config, publisher) else {
                return ExitCode::FAILURE;
            };

            let status = pipeline.run(ReportKind::from(job)).await;
            match serde_json::to_string_pretty(&status) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize status: {}", e),
            }
            if status.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Credentials are checked up front so a bad deployment fails at startup, not at the first trigger.
fn twitter_publisher() -> Option<Arc<dyn Publisher>> {
    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Credential error: {}", e);
            return None;
        }
    };
    match TwitterPublisher::new(credentials) {
        Ok(p) => Some(Arc::new(p)),
        Err(e) => {
            error!("Failed to build publisher: {}", e);
            None
        }
    }
}

fn build_pipeline(config: &AppConfig, publisher: Arc<dyn Publisher>) -> Option<Pipeline> {
    let fetcher = match HttpFetcher::new(config.fetch_timeout) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return None;
        }
    };

    let renderer = FontRenderer::new(&config.font_path);
    if !renderer.font_path().exists() {
        warn!(
            "⚠️ Font not found at {}; every update will fail until it is provided",
            renderer.font_path().display()
        );
    }

    Some(Pipeline::new(
        Arc::new(fetcher),
        Arc::new(renderer),
        publisher,
        config,
    ))
}
