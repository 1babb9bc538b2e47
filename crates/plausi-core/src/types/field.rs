//! Field specifications for rule inputs
//!
//! Every rule declares an ordered list of `FieldSpec`s describing the
//! inputs its predicate reads. The declaration order is the display
//! order and also decides which missing field is reported first.

use serde::{Deserialize, Serialize};

/// Declared kind of a rule input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Boolean field (accepted raw tokens: "true" / "false")
    Boolean,

    /// Finite floating-point number
    Number,

    /// Member of a fixed option set
    Choice {
        /// The declared options, in display order
        options: Vec<String>,
    },
}

impl FieldKind {
    /// Create a choice kind from string literals
    pub fn choice(options: &[&str]) -> Self {
        FieldKind::Choice {
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the kind name as a string
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Number => "number",
            FieldKind::Choice { .. } => "choice",
        }
    }
}

/// A single input field of a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within its rule
    pub name: String,

    /// Display label
    pub label: String,

    /// Declared kind
    pub kind: FieldKind,

    /// Default numeric value for threshold-style fields.
    /// A field with a default is optional at validation time; every
    /// other field is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

impl FieldSpec {
    /// Create a new field spec
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            default: None,
        }
    }

    /// Shorthand for a boolean field
    pub fn boolean(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    /// Shorthand for a number field
    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Shorthand for a choice field
    pub fn choice(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(name, label, FieldKind::choice(options))
    }

    /// Set a default value, making the field optional
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether the caller must supply this field
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}
