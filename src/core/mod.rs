// src/core/mod.rs
//! Transport and file system services used by the controller

pub mod fs_ops;
pub mod service_client;

pub use fs_ops::FsOps;
pub use service_client::{ScreeningApi, ServiceClient};
