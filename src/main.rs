// SPDX-License-Identifier: GPL-3.0-only
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use ota_status::app;
use ota_status::config::Config;
use ota_status::events::EventBus;
use ota_status::logging::setup_logging;
use ota_status::manifest::{FileManifestRepository, ManifestRepository};
use ota_status::properties::{PropertyStore, SystemPropertyStore};
use ota_status::refresh::{CompatibilityProbe, RefreshOrchestrator};
use ota_status::session::{LogSink, Session};
use ota_status::state::{MemoryStateStore, StateStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    setup_logging(&config.log_level)?;

    info!("Starting ota-status v{}", env!("CARGO_PKG_VERSION"));

    let properties: Arc<dyn PropertyStore> =
        Arc::new(SystemPropertyStore::new(config.properties_path.clone()));
    info!(path = %config.properties_path.display(), "Reading system properties");

    let repository: Arc<dyn ManifestRepository> =
        Arc::new(FileManifestRepository::open(config.manifest_path.clone()).await);

    let state: Arc<dyn StateStore> = match &config.state_path {
        Some(path) => Arc::new(MemoryStateStore::from_seed_file(path)?),
        None => Arc::new(MemoryStateStore::default()),
    };

    let bus = Arc::new(EventBus::new());

    let orchestrator = RefreshOrchestrator::new(
        CompatibilityProbe::new(Arc::clone(&properties), config.compatibility_marker.clone()),
        Arc::clone(&repository),
        Arc::clone(&bus),
        config.refresh_timeout(),
    );

    let mut session = Session::new(
        Arc::clone(&properties),
        Arc::clone(&repository),
        Arc::clone(&state),
        Arc::clone(&bus),
        config.version_property.clone(),
    );

    let device = session.device_info();
    info!(
        device = %device.device_name().unwrap_or_else(|| "unknown device".to_string()),
        os_version = %device.os_version,
        build_date = device.build_date.as_deref().unwrap_or("-"),
        platform = device.platform_release.as_deref().unwrap_or("-"),
        "Device information"
    );

    let mut sink = LogSink;
    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal (Ctrl+C)");
            }
            Err(err) => {
                error!(error = %err, "Unable to listen for shutdown signal");
            }
        }
    };

    app::run(&mut session, &orchestrator, &mut sink, shutdown).await;

    info!("Shutdown complete");
    Ok(())
}
