//! Domain models and types for Meteo.
//!
//! The domain layer provides:
//! - **Cell types** ([`Column`], [`CellAddress`], [`CellValue`])
//! - **Error types** ([`MeteoError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MeteoError>`]:
//!
//! ```rust
//! use meteo::domain::Result;
//!
//! fn read_report(path: &str) -> Result<String> {
//!     // Errors are automatically converted using the ? operator
//!     Ok(std::fs::read_to_string(path)?)
//! }
//! ```

pub mod cell;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use cell::{CellAddress, CellValue, Column, DATE_DISPLAY};
pub use errors::MeteoError;
pub use result::Result;
