use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

mod crawler;
mod engine;
mod env;
mod process;
mod storage;
mod ui;
mod util;

use crate::crawler::Crawler;
use crate::storage::{LauncherConfig, StorageManager};

#[derive(Parser, Debug)]
#[command(
    name = "Cafe Launcher",
    author,
    version,
    about = "Game launcher with the latest cafe notices"
)]
struct Cli {
    /// Print launcher version and exit without starting the UI.
    #[arg(long)]
    version_only: bool,

    /// Cafe article listing to crawl instead of the configured one.
    #[arg(long)]
    listing_url: Option<String>,

    /// Crawl the listing, print the articles as JSON and exit.
    #[arg(long)]
    crawl_only: bool,

    /// With --crawl-only, print just the article at this position.
    #[arg(long, requires = "crawl_only")]
    article: Option<usize>,

    /// Save the effective configuration to launcher.json and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.version_only {
        println!("Cafe Launcher {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let storage = StorageManager::new();
    let mut config = storage.read_config();
    if let Some(url) = cli.listing_url {
        config.listing_url = url;
    }

    if cli.write_config {
        return match storage.write_config(&config) {
            Ok(()) => {
                info!("config written to {}", storage.config_path().display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    if cli.crawl_only {
        return match crawl_to_stdout(&config, cli.article) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    match run_ui(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("ui: {err}");
            ExitCode::FAILURE
        }
    }
}

fn crawl_to_stdout(config: &LauncherConfig, index: Option<usize>) -> Result<(), String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let json = runtime.block_on(async {
        let crawler = Crawler::spawn(reqwest::Client::new(), config.listing_url.clone());
        match index {
            Some(index) => {
                let article = crawler.article(index).await.map_err(|e| e.to_string())?;
                serde_json::to_string_pretty(&article).map_err(|e| e.to_string())
            }
            None => {
                let articles = crawler.article_list().await.map_err(|e| e.to_string())?;
                serde_json::to_string_pretty(&articles).map_err(|e| e.to_string())
            }
        }
    })?;
    println!("{json}");
    Ok(())
}

fn run_ui(config: LauncherConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(eframe::egui::vec2(960.0, 640.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Cafe Launcher",
        options,
        Box::new(|cc| Ok(Box::new(ui::LauncherApp::new(cc, config)))),
    )
}
