//! Type system for Plausi
//!
//! This module contains the runtime type system:
//! - Value types
//! - Field specifications
//! - Input records

pub mod field;
pub mod record;
pub mod value;

pub use field::{FieldKind, FieldSpec};
pub use record::InputRecord;
pub use value::Value;
