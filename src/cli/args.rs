//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, TimeZoneMode};

/// Attachment filer CLI.
#[derive(Parser, Debug)]
#[command(
    name = "attachment-filer",
    version,
    about = "File attachments of flagged mail into a templated folder layout",
    long_about = "Scans a label and its sub-labels for flagged messages, saves their attachments \
                  under a path rendered from a template, and clears the flag afterwards.\n\n\
                  Template placeholders: $name $ext $domain $sublabel $y $m $d $h $i $s $mc $ac"
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root label to scan, together with its sub-labels.
    #[arg(short, long)]
    pub label: Option<String>,

    /// Destination path template.
    #[arg(short, long)]
    pub template: Option<String>,

    /// Root of the Maildir tree.
    #[arg(short, long, env = "ATTACHMENT_FILER_MAILDIR")]
    pub maildir: Option<PathBuf>,

    /// Directory destination paths are resolved from.
    #[arg(short = 'd', long = "directory", env = "ATTACHMENT_FILER_DIRECTORY")]
    pub storage_root: Option<PathBuf>,

    /// Threads fetched per page (1 to 500).
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Time zone dates are rendered in (local or utc).
    #[arg(long, value_name = "ZONE")]
    pub timezone: Option<TimeZoneMode>,

    /// Show where attachments would be saved without writing or unflagging.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(label) = self.label {
            config.mailbox.root_label = label;
        }

        if let Some(template) = self.template {
            config.storage.path_template = template;
        }

        if let Some(maildir) = self.maildir {
            config.mailbox.maildir = Some(maildir);
        }

        if let Some(root) = self.storage_root {
            config.storage.root = Some(root);
        }

        if let Some(batch_size) = self.batch_size {
            config.mailbox.batch_size = batch_size;
        }

        if let Some(timezone) = self.timezone {
            config.options.timezone = timezone;
        }

        // Boolean flags (only override if set to non-default)
        if self.dry_run {
            config.options.dry_run = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides() {
        let args = Args::parse_from([
            "attachment-filer",
            "--label",
            "Bills",
            "--maildir",
            "/mail",
            "-d",
            "/drive",
            "--batch-size",
            "100",
            "--timezone",
            "UTC",
            "--dry-run",
        ]);
        let mut config = Config::default();

        args.merge_into_config(&mut config);

        assert_eq!(config.mailbox.root_label, "Bills");
        assert_eq!(config.mailbox.maildir, Some(PathBuf::from("/mail")));
        assert_eq!(config.storage.root, Some(PathBuf::from("/drive")));
        assert_eq!(config.mailbox.batch_size, 100);
        assert_eq!(config.options.timezone, TimeZoneMode::Utc);
        assert!(config.options.dry_run);
    }

    #[test]
    fn test_merge_keeps_file_values() {
        let args = Args::parse_from(["attachment-filer"]);
        let mut config = Config::default();
        config.mailbox.root_label = "Receipts".to_string();
        config.options.dry_run = true;

        args.merge_into_config(&mut config);

        assert_eq!(config.mailbox.root_label, "Receipts");
        assert!(config.options.dry_run);
        assert_eq!(config.options.timezone, TimeZoneMode::Local);
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let result = Args::try_parse_from(["attachment-filer", "--timezone", "mars"]);

        assert!(result.is_err());
    }
}
