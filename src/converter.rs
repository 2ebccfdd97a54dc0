//! The public conversion entry point.
//!
//! [`PdfConverter`] resolves the renderer location and default timeout once
//! at construction, then accepts any number of independent
//! [`convert`](PdfConverter::convert) calls. Each call owns its own renderer
//! subprocess and temporary output file; calls share nothing but the
//! converter's configuration and observer list, so they can run concurrently
//! without coordination.
//!
//! # Example
//!
//! ```rust,no_run
//! use wkhtml2pdf::{ConvertEvent, PaperType, PdfConverter, PdfDocument};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut converter = PdfConverter::new("/usr/bin/wkhtmltopdf");
//!     let mut events = converter.events();
//!
//!     let document = PdfDocument::new("invoice-42", "<html><body>Hello</body></html>")
//!         .paper_type(PaperType::A4)
//!         .extra_param("orientation", "Landscape")
//!         .cookie("session", "abc123");
//!
//!     converter.convert(document, None).await;
//!
//!     if let Some(ConvertEvent::Completed { id, bytes }) = events.recv().await {
//!         std::fs::write(format!("{id}.pdf"), bytes).unwrap();
//!     }
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use crate::args::ProcessArgs;
use crate::config::{ConverterOptions, DEFAULT_TIMEOUT};
use crate::document::PdfDocument;
use crate::error::ConvertError;
use crate::event::{ChannelObserver, ConvertEvent, ConvertObserver};
use crate::process::ConvertProcess;

/// Converts HTML documents to PDF by driving the wkhtmltopdf executable.
///
/// Outcomes are reported through the observer surface (see
/// [`subscribe`](Self::subscribe) and [`events`](Self::events)), never as a
/// return value: `convert` delivers exactly one
/// [`Completed`](ConvertEvent::Completed) or one
/// [`Failed`](ConvertEvent::Failed) notification per request and swallows
/// every conversion-category failure, so one request's failure cannot
/// propagate into another caller's control flow.
///
/// # Construction
///
/// - [`PdfConverter::new`]: bare renderer path, 60 second default timeout.
/// - [`PdfConverter::from_options`]: path plus default timeout from
///   [`ConverterOptions`] (or [`config::env::from_env`](crate::config::env)
///   with the `env-config` feature).
pub struct PdfConverter {
    wkhtmltopdf_path: PathBuf,
    default_timeout: Duration,
    observers: Vec<Arc<dyn ConvertObserver>>,
}

impl PdfConverter {
    /// Create a converter for the renderer at the given path with the
    /// 60 second default timeout.
    ///
    /// The path is checked at conversion time, not here, so a converter can
    /// be constructed before the renderer is installed.
    pub fn new(wkhtmltopdf_path: impl Into<PathBuf>) -> Self {
        Self {
            wkhtmltopdf_path: wkhtmltopdf_path.into(),
            default_timeout: DEFAULT_TIMEOUT,
            observers: Vec::new(),
        }
    }

    /// Create a converter from structured options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use wkhtml2pdf::{ConverterOptionsBuilder, PdfConverter};
    ///
    /// let options = ConverterOptionsBuilder::new()
    ///     .wkhtmltopdf_path("/usr/bin/wkhtmltopdf")
    ///     .timeout_millis(30_000)
    ///     .build()
    ///     .unwrap();
    ///
    /// let converter = PdfConverter::from_options(options);
    /// ```
    pub fn from_options(options: ConverterOptions) -> Self {
        Self {
            wkhtmltopdf_path: options.wkhtmltopdf_path,
            default_timeout: options.timeout,
            observers: Vec::new(),
        }
    }

    /// Register an observer for conversion notifications.
    ///
    /// Observers registered here also receive the renderer's incremental
    /// output and error lines; see [`ConvertObserver`].
    pub fn subscribe(&mut self, observer: Arc<dyn ConvertObserver>) {
        self.observers.push(observer);
    }

    /// Subscribe a channel-backed observer and return its receiver.
    ///
    /// Convenience over [`subscribe`](Self::subscribe) +
    /// [`ChannelObserver::channel`] for callers who prefer `recv()`-style
    /// consumption of [`ConvertEvent`]s.
    pub fn events(&mut self) -> UnboundedReceiver<ConvertEvent> {
        let (observer, receiver) = ChannelObserver::channel();
        self.subscribe(observer);
        receiver
    }

    /// Convert one document, reporting the outcome through the observers.
    ///
    /// `timeout` overrides the converter's default for this call only.
    ///
    /// The call returns once the renderer subprocess has fully exited (or
    /// been killed), both of its output streams are drained, the temporary
    /// output file is removed, and exactly one terminal notification has
    /// been delivered. Configuration, renderer, timeout and I/O failures are
    /// all surfaced through [`ConvertEvent::Failed`]; they never escape this
    /// method.
    pub async fn convert(&self, document: PdfDocument, timeout: Option<Duration>) {
        let timeout = timeout.unwrap_or(self.default_timeout);

        // Fail fast on a missing renderer: one Failed notification, no
        // launch attempt.
        if self.wkhtmltopdf_path.as_os_str().is_empty() || !self.wkhtmltopdf_path.exists() {
            let error = ConvertError::Configuration(format!(
                "file '{}' not found. Check that wkhtmltopdf is installed.",
                self.wkhtmltopdf_path.display()
            ));
            log::error!("❌ Conversion '{}' failed: {}", document.id, error);
            self.notify_failed(&document.id, &error);
            return;
        }

        // Unique per invocation so concurrent calls never collide.
        let output_path = std::env::temp_dir().join(format!("{}.pdf", Uuid::new_v4()));
        log::debug!(
            "📄 Converting document '{}' (paper: {}, timeout: {:?}, output: {:?})",
            document.id,
            document.paper_type,
            timeout,
            output_path
        );

        let args = Self::build_args(&document);

        let result = match ConvertProcess::new(
            &self.wkhtmltopdf_path,
            &output_path,
            &args,
            self.observers.clone(),
        ) {
            Ok(mut process) => process.run(&document.html, timeout).await,
            Err(e) => Err(e),
        };

        // run() already removed the file on all of its paths; this covers
        // the session-construction-failure path.
        if output_path.exists() {
            let _ = tokio::fs::remove_file(&output_path).await;
        }

        match result {
            Ok(bytes) => {
                log::info!("✅ Document '{}' converted ({} bytes)", document.id, bytes.len());
                self.notify_completed(&document.id, &bytes);
            }
            Err(error) => {
                log::error!("❌ Conversion '{}' failed: {}", document.id, error);
                self.notify_failed(&document.id, &error);
            }
        }
    }

    /// Merge document attributes into the renderer argument list.
    ///
    /// Order: `page-size` from the paper type, then every extra parameter,
    /// then each cookie under a `cookie <name>` flag. An extra parameter
    /// named `page-size` overrides the paper type (last write wins).
    fn build_args(document: &PdfDocument) -> ProcessArgs {
        let mut args = ProcessArgs::new();
        args.insert("page-size", document.paper_type.as_str());

        for (name, value) in &document.extra_params {
            args.insert(name.as_str(), value.as_str());
        }

        for (name, value) in &document.cookies {
            args.insert(format!("cookie {name}"), value.as_str());
        }

        args
    }

    fn notify_completed(&self, id: &str, bytes: &[u8]) {
        for observer in &self.observers {
            observer.on_completed(id, bytes);
        }
    }

    fn notify_failed(&self, id: &str, error: &ConvertError) {
        for observer in &self.observers {
            observer.on_failed(id, error);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
