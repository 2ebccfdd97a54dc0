//! Convenient imports for common usage patterns.
//!
//! This module re-exports the most commonly used types from `wkhtml2pdf`,
//! allowing you to quickly get started with a single import.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wkhtml2pdf::prelude::*;
//! ```
//!
//! This imports:
//!
//! - [`PdfConverter`] - The conversion entry point
//! - [`PdfDocument`] - Per-request document carrier
//! - [`PaperType`] - Page sizes for `--page-size`
//! - [`ConverterOptions`] / [`ConverterOptionsBuilder`] - Configuration
//! - [`ConvertEvent`] / [`ConvertObserver`] / [`ChannelObserver`] - Notifications
//! - [`ConvertError`] / [`Result`] - Error handling
//!
//! # Example
//!
//! ```rust,no_run
//! use wkhtml2pdf::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut converter = PdfConverter::new("/usr/bin/wkhtmltopdf");
//!     let mut events = converter.events();
//!
//!     converter
//!         .convert(PdfDocument::new("doc-1", "<html/>"), None)
//!         .await;
//!
//!     let _ = events.recv().await;
//! }
//! ```

// Core types
pub use crate::config::{ConverterOptions, ConverterOptionsBuilder, DEFAULT_TIMEOUT};
pub use crate::converter::PdfConverter;
pub use crate::document::{PaperType, PdfDocument};
pub use crate::error::{ConvertError, Result};
pub use crate::event::{ChannelObserver, ConvertEvent, ConvertObserver};

// Feature-gated exports
#[cfg(feature = "env-config")]
pub use crate::config::env::from_env;

// Re-export Arc for convenience (commonly needed when subscribing observers)
pub use std::sync::Arc;
