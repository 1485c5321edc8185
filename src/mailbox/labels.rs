//! Label hierarchy selection.

use crate::mailbox::types::Label;

/// Separator between label hierarchy levels.
pub const LABEL_SEPARATOR: char = '/';

/// Whether `name` is `root` itself or one of its sub-labels.
pub fn is_in_hierarchy(root: &str, name: &str) -> bool {
    name == root
        || name
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with(LABEL_SEPARATOR))
}

/// The labels equal to `root` or nested below it, in input order.
pub fn sub_labels<'a>(root: &'a str, labels: &'a [Label]) -> impl Iterator<Item = &'a Label> + 'a {
    labels
        .iter()
        .filter(move |label| is_in_hierarchy(root, &label.name))
}

/// The part of a label name below `root`.
///
/// Empty for the root label itself and for labels outside the hierarchy.
pub fn sub_label_suffix<'a>(root: &str, name: &'a str) -> &'a str {
    name.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix(LABEL_SEPARATOR))
        .unwrap_or("")
}
