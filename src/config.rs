//! Configuration for the converter: renderer location and default timeout.
//!
//! This module provides [`ConverterOptions`] and [`ConverterOptionsBuilder`]
//! for configuring where the wkhtmltopdf executable lives and how long a
//! single conversion may run before it is force-killed.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wkhtml2pdf::ConverterOptionsBuilder;
//!
//! let options = ConverterOptionsBuilder::new()
//!     .wkhtmltopdf_path("/usr/local/bin/wkhtmltopdf")
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .expect("Invalid configuration");
//!
//! assert_eq!(options.timeout, Duration::from_secs(30));
//! ```
//!
//! # Environment Configuration
//!
//! When the `env-config` feature is enabled, you can load configuration
//! from environment variables and an optional `app.env` file:
//!
//! ```rust,ignore
//! use wkhtml2pdf::config::env::from_env;
//!
//! let options = from_env()?;
//! ```
//!
//! See [`mod@env`] module for available environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default conversion timeout when none is configured: 60 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for [`PdfConverter`](crate::PdfConverter).
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `wkhtmltopdf_path` | *(required)* | Path to the wkhtmltopdf executable |
/// | `timeout` | 60s | Per-conversion wall-clock bound |
///
/// The path is only checked for existence at conversion time, so options can
/// be built on a machine where the renderer is not yet installed.
///
/// # Example
///
/// ```rust
/// use wkhtml2pdf::ConverterOptions;
///
/// let options = ConverterOptions::new("/usr/bin/wkhtmltopdf");
/// assert_eq!(options.timeout.as_secs(), 60);
/// ```
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Path to the wkhtmltopdf executable.
    pub wkhtmltopdf_path: PathBuf,

    /// Default wall-clock bound for one conversion.
    ///
    /// Covers process exit plus draining of both output streams. A
    /// per-call override can be passed to
    /// [`PdfConverter::convert`](crate::PdfConverter::convert).
    pub timeout: Duration,
}

impl ConverterOptions {
    /// Create options with the given renderer path and the 60 second
    /// default timeout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wkhtml2pdf::ConverterOptions;
    ///
    /// let options = ConverterOptions::new("/opt/wkhtmltox/bin/wkhtmltopdf");
    /// assert!(options.wkhtmltopdf_path.ends_with("wkhtmltopdf"));
    /// ```
    pub fn new(wkhtmltopdf_path: impl Into<PathBuf>) -> Self {
        Self {
            wkhtmltopdf_path: wkhtmltopdf_path.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Builder for [`ConverterOptions`] with validation.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use wkhtml2pdf::ConverterOptionsBuilder;
///
/// let options = ConverterOptionsBuilder::new()
///     .wkhtmltopdf_path("/usr/bin/wkhtmltopdf")
///     .timeout_millis(45_000)
///     .build()
///     .unwrap();
///
/// assert_eq!(options.timeout, Duration::from_secs(45));
/// ```
///
/// # Validation
///
/// The [`build()`](Self::build) method validates:
/// - `wkhtmltopdf_path` must be set and non-empty
/// - `timeout` must be greater than zero
pub struct ConverterOptionsBuilder {
    wkhtmltopdf_path: Option<PathBuf>,
    timeout: Duration,
}

impl ConverterOptionsBuilder {
    /// Create a new builder with the default timeout and no path.
    pub fn new() -> Self {
        Self {
            wkhtmltopdf_path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the wkhtmltopdf executable path (required).
    pub fn wkhtmltopdf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.wkhtmltopdf_path = Some(path.into());
        self
    }

    /// Set the default conversion timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default conversion timeout in milliseconds.
    ///
    /// Convenience for configuration sources that carry integral
    /// millisecond values.
    pub fn timeout_millis(mut self, millis: u64) -> Self {
        self.timeout = Duration::from_millis(millis);
        self
    }

    /// Build and validate the options.
    ///
    /// # Errors
    ///
    /// - Returns error if the renderer path is unset or empty
    /// - Returns error if the timeout is zero
    ///
    /// # Example
    ///
    /// ```rust
    /// use wkhtml2pdf::ConverterOptionsBuilder;
    ///
    /// // Missing path fails at build time
    /// let result = ConverterOptionsBuilder::new().build();
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> std::result::Result<ConverterOptions, String> {
        let path = match self.wkhtmltopdf_path {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return Err("wkhtmltopdf_path must be set and non-empty".to_string()),
        };

        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }

        Ok(ConverterOptions {
            wkhtmltopdf_path: path,
            timeout: self.timeout,
        })
    }
}

impl Default for ConverterOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Environment Configuration (feature-gated)
// ============================================================================

/// Environment-based configuration loading.
///
/// This module is only available when the `env-config` feature is enabled.
///
/// # Environment File
///
/// This module uses `dotenvy` to load environment variables from an `app.env`
/// file in the current directory. The file is optional - if not found,
/// environment variables and defaults are used.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `WKHTMLTOPDF_PATH` | String | *(required)* | Path to the wkhtmltopdf executable |
/// | `CONVERT_TIMEOUT_MS` | u64 | 60000 | Conversion timeout in milliseconds |
///
/// # Example `app.env` File
///
/// ```text
/// # Renderer Configuration
/// WKHTMLTOPDF_PATH=/usr/local/bin/wkhtmltopdf
/// CONVERT_TIMEOUT_MS=60000
/// ```
#[cfg(feature = "env-config")]
pub mod env {
    use super::*;
    use crate::error::ConvertError;

    /// Default environment file name.
    pub const ENV_FILE_NAME: &str = "app.env";

    /// Load environment variables from `app.env` file.
    ///
    /// Call this early in your application startup to ensure environment
    /// variables are loaded before any configuration functions are called.
    ///
    /// This function is automatically called by [`from_env`], but you can
    /// call it explicitly if you need to load the file earlier or check
    /// for errors.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)` if the file was found and loaded successfully
    /// - `Err(dotenvy::Error)` if the file was not found or couldn't be parsed
    pub fn load_env_file() -> Result<std::path::PathBuf, dotenvy::Error> {
        dotenvy::from_filename(ENV_FILE_NAME)
    }

    /// Load converter options from environment variables.
    ///
    /// Reads `WKHTMLTOPDF_PATH` and `CONVERT_TIMEOUT_MS`, loading an
    /// `app.env` file first if one is present (via `dotenvy`).
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Configuration`] if `WKHTMLTOPDF_PATH` is not
    /// set or the resulting options fail validation.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use wkhtml2pdf::config::env::from_env;
    ///
    /// unsafe { std::env::set_var("WKHTMLTOPDF_PATH", "/usr/bin/wkhtmltopdf"); }
    /// let options = from_env()?;
    /// ```
    pub fn from_env() -> Result<ConverterOptions, ConvertError> {
        // Load app.env file if present (ignore errors if not found)
        match load_env_file() {
            Ok(path) => {
                log::info!("📄 Loaded configuration from: {:?}", path);
            }
            Err(e) => {
                log::debug!(
                    "No {} file found or failed to load: {} (using environment variables and defaults)",
                    ENV_FILE_NAME,
                    e
                );
            }
        }

        let path = std::env::var("WKHTMLTOPDF_PATH").map_err(|_| {
            ConvertError::Configuration("WKHTMLTOPDF_PATH environment variable is not set".to_string())
        })?;

        let timeout_ms = std::env::var("CONVERT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60_000u64);

        log::info!("🔧 Loading converter configuration from environment:");
        log::info!("   - wkhtmltopdf path: {}", path);
        log::info!("   - Timeout: {}ms", timeout_ms);

        ConverterOptionsBuilder::new()
            .wkhtmltopdf_path(path)
            .timeout_millis(timeout_ms)
            .build()
            .map_err(ConvertError::Configuration)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
