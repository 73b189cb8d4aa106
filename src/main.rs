use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui::ViewportBuilder;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod bookmarks;
mod comment_html;
mod config;
mod domains;
mod error;
mod hn_client;
mod item;
mod listing;
mod models;
mod ranking;
mod routes;
mod store;
#[cfg(test)]
mod test_support;
mod theme;

use crate::app::ScoutApp;
use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::hn_client::HackerNewsClient;
use crate::routes::Route;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse recent Hacker News stories ranked by engagement and age")]
struct Args {
    /// Route to open, e.g. `/2?time=7&domain=github.com` or `/item/8863`
    #[arg(default_value = "/1")]
    route: String,

    /// Path to a config.toml
    #[arg(long, env = "HN_SCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the saved-posts database
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long)]
    api_base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(url) = args.api_base_url {
        config.api_base_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout_secs = secs;
    }

    init_tracing(&config.log_filter);
    info!("Starting HN Scout v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let data_dir = config.resolved_data_dir()?;
    let bookmarks = BookmarkStore::new(store::open_default(&data_dir));
    let api = HackerNewsClient::new(&config.api_base_url, config.request_timeout())?;
    let initial_route = Route::parse(&args.route);

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("HN Scout"),
        ..Default::default()
    };

    eframe::run_native(
        "HN Scout",
        options,
        Box::new(move |cc| {
            let is_dark_mode = cc
                .storage
                .and_then(|storage| storage.get_string("is_dark_mode"))
                .and_then(|value| value.parse::<bool>().ok())
                .unwrap_or(true);

            Ok(Box::new(ScoutApp::new(
                cc.egui_ctx.clone(),
                Arc::new(api),
                bookmarks,
                initial_route,
                is_dark_mode,
            )))
        }),
    )
    .map_err(|e| anyhow!("Failed to run the UI: {e}"))
}
