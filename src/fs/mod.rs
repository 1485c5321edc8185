//! Filesystem module.
//!
//! Provides:
//! - Path template rendering and extension lookup
//! - The storage capability and idempotent destination placement
//! - A local directory storage backend

pub mod local;
pub mod naming;
pub mod paths;
pub mod storage;

pub use local::LocalStorage;
pub use naming::{
    flatten_separators, render_template, resolve_extension, template_placeholders, PlaceholderValue,
};
pub use paths::{get_or_make_folder, place, split_destination, Placement};
pub use storage::Storage;
