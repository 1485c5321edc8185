//! Filename generation: extension lookup and path template rendering.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Extension reported for names without a usable dot suffix.
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// Value substituted for a `$key` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderValue {
    Text(String),
    Number(usize),
}

impl fmt::Display for PlaceholderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderValue::Text(text) => f.write_str(text),
            PlaceholderValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for PlaceholderValue {
    fn from(text: String) -> Self {
        PlaceholderValue::Text(text)
    }
}

impl From<&str> for PlaceholderValue {
    fn from(text: &str) -> Self {
        PlaceholderValue::Text(text.to_string())
    }
}

impl From<usize> for PlaceholderValue {
    fn from(n: usize) -> Self {
        PlaceholderValue::Number(n)
    }
}

/// Get the lowercased extension of a file name.
///
/// Returns [`UNKNOWN_EXTENSION`] when the name has no dot or ends with one.
pub fn resolve_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(dot_pos) if dot_pos + 1 < name.len() => name[dot_pos + 1..].to_lowercase(),
        _ => UNKNOWN_EXTENSION.to_string(),
    }
}

/// Replace `/` in a substituted value so it cannot add path segments.
pub fn flatten_separators(value: &str) -> String {
    value.replace('/', "_")
}

/// Substitute `$key` placeholders in a path template.
///
/// Keys are tried longest first, so `$mc` is never read as `$m` followed by
/// a literal `c`. Substituted values are copied verbatim and never scanned for
/// further placeholders. Tokens with no matching key are left as they are.
pub fn render_template(template: &str, values: &HashMap<&str, PlaceholderValue>) -> String {
    let mut keys: Vec<&str> = values
        .keys()
        .copied()
        .filter(|key| !key.is_empty())
        .collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        rendered.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match keys.iter().find(|key| after.starts_with(**key)) {
            Some(key) => {
                rendered.push_str(&values[*key].to_string());
                rest = &after[key.len()..];
            }
            None => {
                rendered.push('$');
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// List the `$word` tokens of a template, in order of first appearance.
pub fn template_placeholders(template: &str) -> Vec<&str> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new(r"\$([A-Za-z]+)").expect("valid token regex"));

    let mut found: Vec<&str> = Vec::new();
    for captures in token.captures_iter(template) {
        if let Some(name) = captures.get(1) {
            if !found.contains(&name.as_str()) {
                found.push(name.as_str());
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, PlaceholderValue)]) -> HashMap<&'static str, PlaceholderValue> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_flatten_separators() {
        assert_eq!(flatten_separators("a.b/c"), "a.b_c");
        assert_eq!(flatten_separators("../../etc"), ".._.._etc");
        assert_eq!(flatten_separators("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn test_resolve_extension() {
        assert_eq!(resolve_extension("report.PDF"), "pdf");
        assert_eq!(resolve_extension("archive.tar.gz"), "gz");
        assert_eq!(resolve_extension(".bashrc"), "bashrc");
    }

    #[test]
    fn test_resolve_extension_unknown() {
        assert_eq!(resolve_extension("README"), "unknown");
        assert_eq!(resolve_extension("trailing."), "unknown");
        assert_eq!(resolve_extension(""), "unknown");
    }

    #[test]
    fn test_render_longest_key_first() {
        let v = values(&[("m", "03".into()), ("mc", 2usize.into())]);
        assert_eq!(render_template("$mc-$m", &v), "2-03");
        assert_eq!(render_template("$m$mc$m", &v), "03203");
    }

    #[test]
    fn test_render_unknown_tokens_untouched() {
        let v = values(&[("y", "2024".into())]);
        assert_eq!(render_template("$y/$foo/$", &v), "2024/$foo/$");
    }

    #[test]
    fn test_render_values_not_rescanned() {
        let v = values(&[("name", "a$y.pdf".into()), ("y", "2024".into())]);
        assert_eq!(render_template("$y/$name", &v), "2024/a$y.pdf");
    }

    #[test]
    fn test_render_every_occurrence() {
        let v = values(&[
            ("y", "2024".into()),
            ("m", "03".into()),
            ("d", "05".into()),
            ("domain", "example.com".into()),
        ]);
        assert_eq!(
            render_template("$y/$m/$y$m$d-$domain", &v),
            "2024/03/20240305-example.com"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let v = values(&[("ac", 1usize.into()), ("a", "x".into())]);
        let first = render_template("$a-$ac-$a", &v);
        assert_eq!(first, "x-1-x");
        assert_eq!(render_template("$a-$ac-$a", &v), first);
    }

    #[test]
    fn test_template_placeholders() {
        assert_eq!(
            template_placeholders("Docs/$y/$m/$sublabel/$y$m$d-$domain.$ext"),
            vec!["y", "m", "sublabel", "d", "domain", "ext"]
        );
        assert!(template_placeholders("plain/path.pdf").is_empty());
    }
}
