//! Configuration validation logic.

use std::collections::HashMap;
use std::path::Path;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::filer::placeholders::RECOGNIZED_PLACEHOLDERS;
use crate::fs::naming::{render_template, template_placeholders, PlaceholderValue};
use crate::mailbox::MAX_BATCH_SIZE;

/// Validate the entire configuration.
///
/// Unrecognized template placeholders are reported as warnings only.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_required_path("mailbox.maildir", config.mailbox.maildir.as_deref())?;
    validate_required_path("storage.root", config.storage.root.as_deref())?;
    validate_root_label(&config.mailbox.root_label)?;
    validate_batch_size(config.mailbox.batch_size)?;
    validate_path_template(&config.storage.path_template)?;

    for token in unrecognized_placeholders(&config.storage.path_template) {
        tracing::warn!(
            "Placeholder '${}' is not recognized and will be kept as-is",
            token
        );
    }

    Ok(())
}

/// Validate that a required directory setting is present.
pub fn validate_required_path(field: &str, path: Option<&Path>) -> Result<()> {
    match path {
        None => Err(Error::MissingConfig(field.to_string())),
        Some(path) if path.as_os_str().is_empty() => Err(Error::MissingConfig(field.to_string())),
        Some(_) => Ok(()),
    }
}

/// Validate the root label name.
pub fn validate_root_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(Error::MissingConfig("mailbox.root_label".to_string()));
    }

    if label.starts_with('/') || label.ends_with('/') {
        return Err(Error::ConfigValidation {
            field: "mailbox.root_label".to_string(),
            message: format!("Label '{}' must not start or end with '/'", label),
        });
    }

    Ok(())
}

/// Validate the thread page size.
pub fn validate_batch_size(batch_size: usize) -> Result<()> {
    if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
        return Err(Error::ConfigValidation {
            field: "mailbox.batch_size".to_string(),
            message: format!(
                "Batch size must be between 1 and {} (got {})",
                MAX_BATCH_SIZE, batch_size
            ),
        });
    }

    Ok(())
}

/// Validate the shape of the destination path template.
pub fn validate_path_template(template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::MissingConfig("storage.path_template".to_string()));
    }

    if template.ends_with('/') {
        return Err(Error::ConfigValidation {
            field: "storage.path_template".to_string(),
            message: "Template must end with a file name, not '/'".to_string(),
        });
    }

    Ok(())
}

/// Placeholders in `template` that no recognized key would replace.
pub fn unrecognized_placeholders(template: &str) -> Vec<String> {
    let blanks: HashMap<&str, PlaceholderValue> = RECOGNIZED_PLACEHOLDERS
        .iter()
        .map(|key| (*key, PlaceholderValue::Text(String::new())))
        .collect();

    let residue = render_template(template, &blanks);
    template_placeholders(&residue)
        .into_iter()
        .map(str::to_string)
        .collect()
}
