//! Placeholder values for one attachment.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

use crate::config::TimeZoneMode;
use crate::fs::naming::{flatten_separators, resolve_extension, PlaceholderValue};
use crate::mailbox::{Attachment, Message};

/// Every key a path template may reference.
pub const RECOGNIZED_PLACEHOLDERS: [&str; 12] = [
    "name", "ext", "domain", "sublabel", "y", "m", "d", "h", "i", "s", "mc", "ac",
];

/// Domain part of a sender address, trailing non-letters stripped.
///
/// `Billing <billing@example.com>` gives `example.com`. Returns `None` when
/// the sender has no `@`.
pub fn sender_domain(sender: &str) -> Option<String> {
    let after_at = sender.split('@').nth(1)?;
    Some(
        after_at
            .trim_end_matches(|c: char| !c.is_ascii_alphabetic())
            .to_string(),
    )
}

/// Zero-padded `[y, m, d, h, i, s]` of a timestamp.
fn date_fields<Tz: TimeZone>(date: &DateTime<Tz>) -> [String; 6] {
    [
        format!("{:04}", date.year()),
        format!("{:02}", date.month()),
        format!("{:02}", date.day()),
        format!("{:02}", date.hour()),
        format!("{:02}", date.minute()),
        format!("{:02}", date.second()),
    ]
}

fn received_fields(received_at: &DateTime<Utc>, zone: TimeZoneMode) -> [String; 6] {
    match zone {
        TimeZoneMode::Local => date_fields(&received_at.with_timezone(&Local)),
        TimeZoneMode::Utc => date_fields(received_at),
    }
}

/// Build the placeholder set for the `attachment_index`-th attachment of the
/// `message_index`-th message of a thread found under `sub_label`.
///
/// `/` in the attachment name is replaced in `$name` and `$ext`, so only the
/// template and the sub-label decide the folder structure.
pub fn build_placeholders(
    sub_label: &str,
    message: &Message,
    message_index: usize,
    attachment: &Attachment,
    attachment_index: usize,
    zone: TimeZoneMode,
) -> HashMap<&'static str, PlaceholderValue> {
    let domain = sender_domain(&message.sender).unwrap_or_else(|| {
        tracing::warn!(
            "Sender '{}' has no domain, using an empty $domain",
            message.sender
        );
        String::new()
    });

    let [y, m, d, h, i, s] = received_fields(&message.received_at, zone);

    let values: [(&'static str, PlaceholderValue); 12] = [
        ("name", flatten_separators(&attachment.name).into()),
        ("ext", flatten_separators(&resolve_extension(&attachment.name)).into()),
        ("domain", domain.into()),
        ("sublabel", sub_label.into()),
        ("y", y.into()),
        ("m", m.into()),
        ("d", d.into()),
        ("h", h.into()),
        ("i", i.into()),
        ("s", s.into()),
        ("mc", message_index.into()),
        ("ac", attachment_index.into()),
    ];

    HashMap::from(values)
}
