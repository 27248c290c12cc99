//! Free-form JSON text fields (schema payload, destinations).
//!
//! The field never rejects input: it stores whatever was typed and only
//! flags text that does not parse. Turning text into a document is left to
//! the payload builder, which is where invalid text becomes a hard error.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Parse structured text into a document.
pub fn parse_document(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text)
}

/// Canonical pretty form of a document (two-space indent).
pub fn serialize_document(doc: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

// ---------------------------------------------------------------------------
// FieldError
// ---------------------------------------------------------------------------

/// Advisory error state shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Raised while typing.
    InvalidJson,
    /// Raised by an explicit format request.
    CannotFormat,
}

impl FieldError {
    pub fn message(self) -> &'static str {
        match self {
            FieldError::InvalidJson => "Invalid JSON format",
            FieldError::CannotFormat => "Cannot format: Invalid JSON",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// StructuredTextField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredTextField {
    text: String,
    error: Option<FieldError>,
}

impl StructuredTextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.on_edit(text);
        field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Store `text` verbatim and refresh the advisory error flag.
    pub fn on_edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.error = if self.is_blank() || parse_document(&self.text).is_ok() {
            None
        } else {
            Some(FieldError::InvalidJson)
        };
    }

    /// Replace the text with its pretty-printed form.
    ///
    /// Returns `false` and flags [`FieldError::CannotFormat`] when the text
    /// does not parse; the text is left as typed. Formatting a blank field
    /// is a no-op.
    pub fn format(&mut self) -> bool {
        if self.is_blank() {
            self.error = None;
            return true;
        }
        match parse_document(&self.text).and_then(|doc| serialize_document(&doc)) {
            Ok(pretty) => {
                self.text = pretty;
                self.error = None;
                true
            }
            Err(_) => {
                self.error = Some(FieldError::CannotFormat);
                false
            }
        }
    }

    /// The parsed document; `Ok(None)` for a blank field.
    pub fn document(&self) -> serde_json::Result<Option<Value>> {
        if self.is_blank() {
            return Ok(None);
        }
        parse_document(&self.text).map(Some)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
