//! Result type alias for Meteo

use super::errors::MeteoError;

/// Result type alias for Meteo operations
///
/// # Examples
///
/// ```
/// use meteo::domain::result::Result;
/// use meteo::domain::errors::MeteoError;
///
/// fn failing_function() -> Result<()> {
///     Err(MeteoError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MeteoError>;
