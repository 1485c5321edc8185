//! Filing module.
//!
//! This module provides:
//! - Placeholder assembly for a single attachment
//! - The filing run over flagged threads
//! - Run statistics

pub mod placeholders;
pub mod run;
pub mod state;

pub use placeholders::{build_placeholders, sender_domain, RECOGNIZED_PLACEHOLDERS};
pub use run::{Filer, FilerSettings};
pub use state::RunState;
