//! servicify-core - Core library for servicify
//!
//! Resolves service descriptors, renders systemd units, and drives
//! systemctl/journalctl. The CLI in `packages/cli-rust` is a thin dispatcher
//! over this crate.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod platform;
pub mod privilege;
pub mod setup;
pub mod version;

pub use config::{Config, load_config};
pub use descriptor::{DescriptorRequest, ServiceDescriptor};
pub use error::ServiceError;
pub use platform::{ServiceManager, get_service_manager};
pub use version::{get_version, get_version_long};
