//! Statistics reporting.

use console::style;

use crate::filer::RunState;

/// Print statistics for a filing run.
pub fn print_run_stats(state: &RunState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Labels scanned:     {}", state.labels_scanned);
    println!("  Flagged threads:    {}", state.threads_found);
    println!("  Messages processed: {}", state.messages_processed);
    println!("  Saved:              {}", style(state.attachments_saved).green());
    if state.attachments_skipped > 0 {
        println!(
            "  Skipped:            {} (already exist)",
            style(state.attachments_skipped).yellow()
        );
    }
    if state.attachments_rejected > 0 {
        println!(
            "  Rejected:           {} (invalid file name)",
            style(state.attachments_rejected).red()
        );
    }
    if state.attachments_planned > 0 {
        println!("  Planned (dry run):  {}", state.attachments_planned);
    }
    println!("  Flags cleared:      {}", state.messages_marked_done);
    println!("{}", style("═".repeat(50)).dim());
}
