//! Output path templating.
//!
//! | Token                | Value            |
//! |----------------------|------------------|
//! | `{width}`, `{w}`     | resolved width   |
//! | `{height}`, `{h}`    | resolved height  |
//! | `{format}`, `{f}`    | resolved format  |
//! | `{id}`, `{i}`        | element id       |
//!
//! Tokens match case-insensitively. A token whose value is unset, and any
//! other `{...}`, is left as written.

use super::spec::Output;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{(width|w|height|h|format|f|id|i)\}").expect("token pattern is valid")
});

/// Substitute every placeholder in `template` with values from `output`.
pub fn expand_template(template: &str, output: &Output) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            let name = caps[1].to_ascii_lowercase();
            let value = match name.as_bytes()[0] {
                b'w' => output.width.map(|w| w.to_string()),
                b'h' => output.height.map(|h| h.to_string()),
                b'f' => Some(output.format.clone()),
                _ => output.id.clone(),
            };
            value.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
