//! Configuration module for the attachment filer.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Time zone selection for rendered dates
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, MailboxConfig, OptionsConfig, StorageConfig};
pub use modes::TimeZoneMode;
pub use validation::{unrecognized_placeholders, validate_config};
