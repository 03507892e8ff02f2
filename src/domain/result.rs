//! Result type alias for Relex

use super::errors::RelexError;

/// Result type alias for Relex operations
///
/// # Examples
///
/// ```
/// use relex::domain::result::Result;
/// use relex::domain::errors::RelexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RelexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RelexError>;
