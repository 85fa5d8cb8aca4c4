//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types and diagnostics    |
//! | `field`  | Config keys used to locate diagnostics       |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, Severity};
pub use field::FieldPath;
