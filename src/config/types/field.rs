//! Dotted config key used to locate diagnostics.

/// A key in `rsvg.toml`, e.g. `plugins.rsvg.program`.
///
/// Sections expose their keys as `FIELDS` constants so diagnostics never
/// spell one by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}
