// src/lib.rs
//! Terminal client for the AI resume screening service

/// Crate-wide structured logging entry point, backed by `tracing`
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod debounce;
pub mod errors;
pub mod session;
pub mod state;
pub mod types;
pub mod utils;
pub mod views;

use anyhow::Result;

pub use config::ClientConfig;
pub use controller::{FailurePolicy, Operation, ScreenerController};
pub use core::{ScreeningApi, ServiceClient};
pub use errors::ControllerError;
pub use state::{Page, ViewState};

/// Controller wired to the HTTP client for `config`
pub fn connect(config: &ClientConfig) -> Result<ScreenerController<ServiceClient>> {
    let client = ServiceClient::new(config)?;
    app_log!(
        info,
        "Using screening service at {} (app path {})",
        client.base_url(),
        config.base_path
    );
    Ok(ScreenerController::from_config(client, config))
}
