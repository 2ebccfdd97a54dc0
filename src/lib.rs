//! # wkhtml2pdf
//!
//! Async wkhtmltopdf driver for HTML to PDF conversion.
//!
//! This crate converts an HTML document into a PDF by running the external
//! `wkhtmltopdf` executable as a one-shot subprocess: the HTML is streamed
//! over stdin, the renderer writes the PDF to a temporary file, and the file
//! is read back into memory and handed to the caller. The crate's job is the
//! subprocess orchestration (argument encoding, deadlock-free pipe
//! draining, timeout enforcement with forced kill, and guaranteed cleanup)
//! not HTML parsing or PDF generation itself.
//!
//! ## Features
//!
//! - **Stdin Streaming**: HTML is piped to the renderer, no input file needed
//! - **Deadlock-Free Draining**: stdout and stderr are drained concurrently
//!   with the stdin write, so the renderer never blocks on a full pipe
//! - **Timeout Enforcement**: one wall-clock bound covers process exit plus
//!   both stream drains; on expiry the renderer is force-killed
//! - **Guaranteed Cleanup**: the temporary output file and line buffers are
//!   released on every path, including timeout/kill
//! - **Notification Delivery**: exactly one `Completed` or `Failed` event per
//!   request, via observers or a channel
//! - **Concurrent Calls**: each conversion owns its own process and temp
//!   file; calls share no mutable state
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             Your Application                │
//! └─────────────────┬───────────────────────────┘
//!                   │ convert(document)
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │               PdfConverter                  │
//! │   resolves path + timeout, builds args,     │
//! │   allocates temp path, delivers events      │
//! └─────────────────┬───────────────────────────┘
//!                   │ run(html, timeout)
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │              ConvertProcess                 │
//! │ ┌─────────────┐ ┌─────────────┐             │
//! │ │stdout reader│ │stderr reader│  stdin ───▶ │
//! │ └─────────────┘ └─────────────┘  writer     │
//! │        wait(exit + both drains) ≤ timeout   │
//! └─────────────────┬───────────────────────────┘
//!                   │ temp file ──▶ bytes
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │        wkhtmltopdf (external process)       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wkhtml2pdf::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut converter = PdfConverter::new("/usr/bin/wkhtmltopdf");
//!     let mut events = converter.events();
//!
//!     let document = PdfDocument::new("hello-1", "<html><body><h1>Hello</h1></body></html>")
//!         .paper_type(PaperType::A4);
//!
//!     converter.convert(document, None).await;
//!
//!     match events.recv().await {
//!         Some(ConvertEvent::Completed { id, bytes }) => {
//!             println!("{}: generated {} bytes", id, bytes.len());
//!         }
//!         Some(ConvertEvent::Failed { id, error }) => {
//!             eprintln!("{}: {}", id, error);
//!         }
//!         None => {}
//!     }
//! }
//! ```
//!
//! ## Environment Configuration
//!
//! When the `env-config` feature is enabled (default), the converter can be
//! configured from environment variables (loaded from an `app.env` file or
//! the system environment):
//!
//! ```rust,ignore
//! use wkhtml2pdf::{config, PdfConverter};
//!
//! let options = config::env::from_env()?;
//! let converter = PdfConverter::from_options(options);
//! ```
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `WKHTMLTOPDF_PATH` | String | *(required)* | Path to the wkhtmltopdf executable |
//! | `CONVERT_TIMEOUT_MS` | u64 | 60000 | Conversion timeout in milliseconds |
//!
//! ## Error Handling
//!
//! Failures are delivered through the `Failed` notification, never thrown
//! out of [`PdfConverter::convert`], so concurrent requests stay isolated:
//!
//! | Variant | Meaning | Retryable? |
//! |---------|---------|------------|
//! | [`ConvertError::Configuration`] | Renderer path unset/missing | After operator fix |
//! | [`ConvertError::Conversion`] | Renderer exited non-zero | If input/environment changed |
//! | [`ConvertError::Timeout`] | Bound exceeded, renderer killed | With a larger timeout |
//! | [`ConvertError::Io`] | Output file missing/unreadable | System anomaly |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `env-config` | Enable environment-based configuration (default) |

#![doc(html_root_url = "https://docs.rs/wkhtml2pdf/0.3.1")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// Modules
// ============================================================================

pub mod capture;
pub mod config;
pub mod converter;
pub mod document;
pub mod error;
pub mod event;
pub mod prelude;

// Internal modules (not publicly exposed)
pub(crate) mod args;
pub(crate) mod process;

// ============================================================================
// Re-exports (Public API)
// ============================================================================

// Core types
pub use config::{ConverterOptions, ConverterOptionsBuilder, DEFAULT_TIMEOUT};
pub use converter::PdfConverter;
pub use document::{PaperType, PdfDocument};
pub use error::{ConvertError, Result};
pub use event::{ChannelObserver, ConvertEvent, ConvertObserver};

// Feature-gated re-exports
#[cfg(feature = "env-config")]
pub use config::env::from_env;
