//! Structural validation of a candidate theme configuration.
//!
//! Theme files are written by theme authors, not by this program, so the
//! document arriving from disk is loosely typed: sections may be missing,
//! fields may be empty, the whole file may be something else entirely.  The
//! view process must never promote such a document to the active theme.
//!
//! # Accumulation, not short-circuiting
//!
//! The validator collects *every* problem it can find before producing its
//! verdict, split into two categories:
//!
//! - **missing** – a required section is absent altogether;
//! - **invalid** – a section is present but incomplete, with the offending
//!   sub-field names joined into one message per section.
//!
//! A theme author fixing a broken skin sees the full list in a single log
//! line instead of replaying the load once per field.  Further required
//! sections slot into the same two lists as the skin format grows.

use serde_json::Value;

use crate::config::keys::THEME_CONFIGURATION;

/// Outcome of validating one candidate theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeValidation {
    missing: Vec<String>,
    invalid: Vec<String>,
}

impl ThemeValidation {
    /// `true` only when no problems were detected in any category.
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Sections that are absent altogether.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Sections that are present but incomplete.
    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    /// Renders the human-readable diagnostic block for logging.
    ///
    /// Returns an empty string for a valid outcome; callers only log the
    /// report when [`is_valid`](Self::is_valid) returned `false`.
    pub fn report(&self) -> String {
        if self.is_valid() {
            return String::new();
        }
        let mut out = format!("Invalid {THEME_CONFIGURATION} file:\n");
        if !self.missing.is_empty() {
            out.push_str(&format!("\tMissing fields: {}\n", self.missing.join(", ")));
        }
        if !self.invalid.is_empty() {
            out.push_str("\tInvalid fields:\n");
            for entry in &self.invalid {
                out.push_str(&format!("\t\t{entry}\n"));
            }
        }
        out
    }
}

/// Validates a candidate theme configuration before activation.
///
/// The candidate must contain a top-level `main` section, and that section
/// must contain a non-empty `layout` field.  A `null` or absent `main` is
/// reported as missing; a `main` of the wrong shape or without a usable
/// `layout` is reported as invalid.
pub fn validate_theme(candidate: &Value) -> ThemeValidation {
    let mut verdict = ThemeValidation::default();

    match candidate.get("main") {
        None | Some(Value::Null) => verdict.missing.push("main".to_string()),
        Some(main) => {
            // Collect every missing sub-field of the page, then fold them
            // into a single invalid entry for the section.
            let mut page_missing: Vec<&str> = Vec::new();
            if !has_usable_layout(main) {
                page_missing.push("layout");
            }
            if !page_missing.is_empty() {
                verdict
                    .invalid
                    .push(format!("missing field {} in page main", page_missing.join(", ")));
            }
        }
    }

    verdict
}

/// A usable `layout` is a present, non-null, non-empty-string value.
fn has_usable_layout(main: &Value) -> bool {
    match main.get("layout") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
