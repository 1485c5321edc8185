//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Attachment Filer                                  ║
║     Flagged mail attachments, filed by template       ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    maildir: &str,
    root_label: &str,
    storage_root: &str,
    template: &str,
    timezone: &str,
    dry_run: bool,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Maildir:   {}", maildir);
    println!("  Label:     {}", root_label);
    println!("  Storage:   {}", storage_root);
    println!("  Template:  {}", template);
    println!("  Dates in:  {}", timezone);
    if dry_run {
        println!("  Mode:      {}", style("dry run").yellow());
    }
    println!();
}
