//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and service creation
//! to reduce duplication across command handlers.

use std::future::Future;

use tracing::info;

use skytrack::config::ConfigFile;
use skytrack::http::AsyncReqwestClient;
use skytrack::logging::{init_logging, LoggingGuard};
use skytrack::overlay::OverlayService;

use crate::error::CliError;

/// Global flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub debug: bool,
    pub stdout_logging: bool,
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    runtime: tokio::runtime::Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new(options: RunOptions) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let logging_guard =
            init_logging(&config.logging.file, options.stdout_logging, options.debug)
                .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            logging_guard,
            config,
            runtime,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("SkyTrack v{}", skytrack::VERSION);
        info!("SkyTrack CLI: {} command", command);
    }

    /// Create an overlay service from the loaded configuration.
    pub fn create_service(&self) -> Result<OverlayService<AsyncReqwestClient>, CliError> {
        let http_client =
            AsyncReqwestClient::with_timeout(self.config.download.timeout_duration())?;

        Ok(
            OverlayService::with_metadata_url(http_client, &self.config.radar.metadata_url)
                .with_max_track_points(self.config.track.max_points),
        )
    }

    /// Drive a future to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
