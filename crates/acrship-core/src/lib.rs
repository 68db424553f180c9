//! Core types and configuration for acrship.
//!
//! This crate defines the deployment parameters ([`DeploymentConfig`]),
//! the optional `acrship.toml` settings file ([`AcrshipSettings`]),
//! the command-line override parser ([`parse_overrides`]), and shared error types.

pub mod config;
pub mod error;
pub mod overrides;

pub use config::{AcrshipSettings, AzureSettings, DeploymentConfig};
pub use error::{Error, Result};
pub use overrides::parse_overrides;
