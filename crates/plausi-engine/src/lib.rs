//! Plausi Engine
//!
//! Owns the fixed catalog of plausibility rules and evaluates them
//! against caller-supplied input records. The engine is synchronous and
//! stateless between calls: every evaluation is a pure function of the
//! rule's predicate and the record handed in.
//!
//! # Example
//!
//! ```
//! use plausi_engine::Engine;
//! use std::collections::HashMap;
//!
//! let engine = Engine::new().unwrap();
//!
//! let mut raw = HashMap::new();
//! raw.insert(
//!     "isSuppressedUntilNextVideoUpdate".to_string(),
//!     "true".to_string(),
//! );
//!
//! let result = engine
//!     .check("suppressed-until-next-video-update", &raw)
//!     .unwrap();
//! assert!(result.outcome);
//! assert_eq!(result.action, "Disqualifies for AEB");
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod eval;
pub mod report;
pub mod validator;

// Re-export main types
pub use catalog::Catalog;
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use report::{BatchEntry, Outcome, Summary};

// Re-export commonly used types from the core crate
pub use plausi_core::{EvaluationResult, InputRecord, RuleInfo, Value};
