//! Utility functions and types.

use std::fmt;

/// Redacts a value before it reaches `Debug` or log output.
///
/// - Empty values are rendered as `EMPTY`.
/// - Secrets created with [`Redact::secret`] are always rendered as `***`.
/// - Identifiers with fewer than 12 characters are rendered as `***`.
/// - Longer identifiers keep their first and last three characters, so that
///   users can tell different keys apart without leaking them.
#[derive(Clone, Copy)]
pub struct Redact<'a> {
    value: &'a str,
    reveal_edges: bool,
}

impl<'a> Redact<'a> {
    /// Redact a secret value. No part of it is ever shown.
    pub fn secret(value: &'a str) -> Self {
        Redact {
            value,
            reveal_edges: false,
        }
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact {
            value,
            reveal_edges: true,
        }
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::from(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact::from(value.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = self.value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if !self.reveal_edges || length < 12 || !self.value.is_ascii() {
            f.write_str("***")
        } else {
            f.write_str(&self.value[..3])?;
            f.write_str("***")?;
            f.write_str(&self.value[length - 3..])
        }
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
