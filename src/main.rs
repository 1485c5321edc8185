//! Attachment Filer - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use attachment_filer::{
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    filer::{Filer, FilerSettings},
    fs::LocalStorage,
    mailbox::MaildirMailbox,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_stats,
        print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Mailbox(_) => ExitCode::from(exit_codes::MAILBOX_ERROR as u8),
                Error::Storage(_) | Error::InvalidFilename(_) => {
                    ExitCode::from(exit_codes::STORAGE_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = match Config::locate(args.config.as_deref()) {
        Some(path) => {
            print_info(&format!("Using configuration {}", path.display()));
            Config::load(&path)?
        }
        None => {
            print_warning("No configuration file found, using defaults with CLI arguments");
            Config::default()
        }
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let (Some(maildir), Some(storage_root)) =
        (config.mailbox.maildir.clone(), config.storage.root.clone())
    else {
        return Err(Error::MissingConfig("mailbox.maildir / storage.root".into()));
    };

    print_config_summary(
        &maildir.display().to_string(),
        &config.mailbox.root_label,
        &storage_root.display().to_string(),
        &config.storage.path_template,
        &config.options.timezone.to_string(),
        config.options.dry_run,
    );

    let filer = Filer::new(
        FilerSettings::from(&config),
        MaildirMailbox::new(maildir),
        LocalStorage::new(storage_root),
    );

    let state = filer.run().await?;
    print_run_stats(&state);

    Ok(())
}
