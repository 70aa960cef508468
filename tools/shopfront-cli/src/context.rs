//! Shared CLI context: config, output, and the storefront client.

use crate::config::CliConfig;
use crate::output::Output;
use anyhow::{bail, Result};
use shopfront_sdk::{FileStore, RequestState, Status, Storefront};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Everything a command handler needs.
pub struct Context {
    pub output: Output,
    pub storefront: Storefront,
}

impl Context {
    /// Load config, apply overrides, and build the storefront (restoring
    /// any persisted session and cart).
    pub fn load(
        config_path: Option<&str>,
        base_url_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let config = CliConfig::load(config_path)?;
        let base_url = base_url_override
            .or(config.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut builder = Storefront::builder(&base_url);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = config.storage_dir {
            builder = builder.storage(FileStore::new(dir)?);
        }
        let storefront = builder.build()?;

        output.debug(&format!("using API at {base_url}"));
        Ok(Self { output, storefront })
    }

    /// Bail unless an admin session is active.
    pub fn require_admin(&self) -> Result<()> {
        if !self.storefront.store().is_admin() {
            bail!("this command requires an admin account (try `shopfront login`)");
        }
        Ok(())
    }
}

/// Unwrap a completed slice: fulfilled yields the payload, failed yields
/// its message as the command error.
pub fn take<T>(state: RequestState<T>) -> Result<T> {
    match state.status {
        Status::Fulfilled => state
            .data
            .ok_or_else(|| anyhow::anyhow!("response payload missing")),
        Status::Failed => bail!(state
            .error
            .map(|e| e.message)
            .unwrap_or_else(|| "request failed".to_string())),
        status => bail!("request did not complete (status: {status})"),
    }
}
