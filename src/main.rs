//! Karwan Back Office.
//!
//! A keyboard-driven desktop console for administering a Hajj/Umrah
//! travel booking platform. The backend owns all state; this client
//! fetches, renders, validates and writes back over REST.

mod api;
mod app;
mod domain;
mod services;
mod ui;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::api::{ApiClient, ApiConfig};
use crate::app::events::{CommandBus, EventBus};
use crate::app::App;
use crate::services::RequestService;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("karwan=info")),
        )
        .init();

    let config = ApiConfig::from_env().context("invalid API configuration")?;
    tracing::info!(base_url = %config.base_url, "starting Karwan Back Office");

    let client = Arc::new(ApiClient::new(&config).context("failed to build HTTP client")?);

    let (commands, command_rx) = CommandBus::channel();
    let (events, event_rx) = EventBus::channel();

    // The request worker lives on its own tokio runtime; the UI thread
    // belongs to gpui.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to start request runtime")?;
    runtime.spawn(RequestService::new(client, events).run(command_rx));

    App::run(commands, event_rx)
}
