mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{config::normalize_base_url, load_settings, AdminPanel, HttpAdminService};
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::ui::AdminConsoleApp;

#[derive(Parser, Debug)]
struct Args {
    /// Backend base url; overrides admin.toml and APP__API_BASE_URL.
    #[arg(long, env = "ADMIN_API_URL")]
    api_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = normalize_base_url(&api_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build backend runtime")?;
    let service = HttpAdminService::new(&settings.api_base_url)
        .with_context(|| format!("cannot use api url {}", settings.api_base_url))?;
    let mut panel = AdminPanel::new(Arc::new(service), runtime.handle().clone());
    panel.mount();
    tracing::info!(api_base_url = %settings.api_base_url, "admin console starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Project Admin Console")
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    let api_base_url = settings.api_base_url.clone();
    eframe::run_native(
        "Project Admin Console",
        options,
        Box::new(move |_cc| Ok(Box::new(AdminConsoleApp::new(panel, runtime, api_base_url)))),
    )
    .map_err(|err| anyhow!("admin console exited with error: {err}"))
}
