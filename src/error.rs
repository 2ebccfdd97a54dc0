//! Error types for HTML to PDF conversion.
//!
//! This module provides [`ConvertError`], a unified error type for all
//! conversion operations, and a convenient [`Result`] type alias.
//!
//! # Example
//!
//! ```rust
//! use wkhtml2pdf::{ConvertError, Result};
//!
//! fn produce_pdf() -> Result<Vec<u8>> {
//!     // Your logic here...
//!     Err(ConvertError::Configuration("example error".to_string()))
//! }
//!
//! match produce_pdf() {
//!     Ok(pdf) => println!("Generated {} bytes", pdf.len()),
//!     Err(ConvertError::Timeout(t)) => println!("Renderer timed out after {:?}", t),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::time::Duration;

/// Errors that can occur while driving the wkhtmltopdf subprocess.
///
/// Each variant maps to one stage of the conversion pipeline and carries
/// context about what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The renderer executable path is unset, empty, or not found on disk.
    ///
    /// # Common Causes
    ///
    /// - wkhtmltopdf is not installed
    /// - The configured path points at the wrong location
    /// - `WKHTMLTOPDF_PATH` is set but stale
    ///
    /// Not retryable without operator intervention.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wkhtml2pdf::ConvertError;
    ///
    /// let error = ConvertError::Configuration(
    ///     "file '/usr/bin/wkhtmltopdf' not found".to_string()
    /// );
    /// println!("{}", error); // "Configuration error: file '/usr/bin/wkhtmltopdf' not found"
    /// ```
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The renderer exited with a non-zero status.
    ///
    /// The message embeds the full text the renderer wrote to its standard
    /// error stream, which for wkhtmltopdf usually names the offending page
    /// element or network fetch.
    ///
    /// Retryable only if the input or environment changed.
    #[error("HTML to PDF conversion failed. Renderer output:\n{0}")]
    Conversion(String),

    /// The combined wait for process exit and stream draining exceeded the
    /// configured bound.
    ///
    /// The subprocess is force-killed as part of handling this error, so no
    /// renderer process outlives the conversion call. Retryable with a larger
    /// timeout.
    #[error("HTML to PDF conversion did not finish within {0:?}")]
    Timeout(Duration),

    /// An I/O operation on the subprocess pipes or the output file failed.
    ///
    /// After a reported-successful exit this means the output file is missing
    /// or unreadable, which is a system-level anomaly rather than a rendering
    /// problem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience conversion from [`String`] to [`ConvertError::Configuration`].
///
/// Allows using the `?` operator with functions that return `String` errors
/// in contexts expecting [`ConvertError`].
impl From<String> for ConvertError {
    fn from(msg: String) -> Self {
        ConvertError::Configuration(msg)
    }
}

/// Convenience conversion from `&str` to [`ConvertError::Configuration`].
impl From<&str> for ConvertError {
    fn from(msg: &str) -> Self {
        ConvertError::Configuration(msg.to_string())
    }
}

/// Result type alias using [`ConvertError`].
///
/// This is the standard result type returned by most conversion operations.
///
/// # Example
///
/// ```rust
/// use wkhtml2pdf::Result;
///
/// fn my_function() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvertError>;

// ============================================================================
// Unit Tests
// ============================================================================
