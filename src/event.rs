//! Conversion notifications: the observer surface of the converter.
//!
//! A conversion reports its outcome through notifications rather than a
//! return value, so concurrent requests stay independent: one request's
//! failure never surfaces as an error from another caller's `convert` call.
//!
//! Two delivery styles are supported:
//!
//! - implement [`ConvertObserver`] and register it with
//!   [`PdfConverter::subscribe`](crate::PdfConverter::subscribe), or
//! - call [`PdfConverter::events`](crate::PdfConverter::events) to receive
//!   [`ConvertEvent`]s over an unbounded channel.
//!
//! Either way, exactly one of `Completed` / `Failed` is delivered per
//! request, and only after the renderer subprocess has fully exited (or been
//! killed) and both of its output streams have been drained.
//!
//! # Example
//!
//! ```rust,no_run
//! use wkhtml2pdf::{ConvertEvent, PdfConverter, PdfDocument};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut converter = PdfConverter::new("/usr/bin/wkhtmltopdf");
//! let mut events = converter.events();
//!
//! converter.convert(PdfDocument::new("doc-1", "<html/>"), None).await;
//!
//! match events.recv().await {
//!     Some(ConvertEvent::Completed { id, bytes }) => {
//!         println!("{}: {} bytes of PDF", id, bytes.len());
//!     }
//!     Some(ConvertEvent::Failed { id, error }) => {
//!         eprintln!("{}: {}", id, error);
//!     }
//!     _ => {}
//! }
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::ConvertError;

// ============================================================================
// ConvertEvent
// ============================================================================

/// A terminal notification for one conversion request.
#[derive(Debug)]
pub enum ConvertEvent {
    /// The conversion succeeded.
    Completed {
        /// The request's correlation id.
        id: String,
        /// The produced PDF, exactly the output file's final content.
        bytes: Vec<u8>,
    },

    /// The conversion failed.
    ///
    /// Carries every failure category (configuration, renderer exit status,
    /// timeout, I/O), none of which escape `convert` as an error.
    Failed {
        /// The request's correlation id.
        id: String,
        /// What went wrong.
        error: ConvertError,
    },
}

impl ConvertEvent {
    /// The correlation id this event belongs to.
    pub fn id(&self) -> &str {
        match self {
            ConvertEvent::Completed { id, .. } => id,
            ConvertEvent::Failed { id, .. } => id,
        }
    }
}

// ============================================================================
// ConvertObserver
// ============================================================================

/// Receives conversion notifications.
///
/// [`on_completed`](Self::on_completed) and [`on_failed`](Self::on_failed)
/// are terminal: for a given request exactly one of them fires, exactly once.
/// The line hooks fire as the renderer produces output and default to no-ops;
/// delivery is fire-and-forget with no backpressure, so implementations must
/// not block.
pub trait ConvertObserver: Send + Sync {
    /// The conversion for `id` produced the given PDF bytes.
    fn on_completed(&self, id: &str, bytes: &[u8]);

    /// The conversion for `id` failed.
    fn on_failed(&self, id: &str, error: &ConvertError);

    /// The renderer wrote a line to its standard output.
    fn on_output_line(&self, _line: &str) {}

    /// The renderer wrote a line to its standard error.
    fn on_error_line(&self, _line: &str) {}
}

// ============================================================================
// ChannelObserver
// ============================================================================

/// A [`ConvertObserver`] that forwards terminal events over an unbounded
/// channel.
///
/// This is the channel-flavored form of the observer surface: subscribe once,
/// then `recv()` events wherever is convenient. Line notifications are not
/// forwarded; they are available to direct trait implementations only.
///
/// Dropped receivers are tolerated; sends to a closed channel are discarded.
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<ConvertEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiver its events arrive on.
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<ConvertEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }
}

impl ConvertObserver for ChannelObserver {
    fn on_completed(&self, id: &str, bytes: &[u8]) {
        let _ = self.sender.send(ConvertEvent::Completed {
            id: id.to_string(),
            bytes: bytes.to_vec(),
        });
    }

    fn on_failed(&self, id: &str, error: &ConvertError) {
        // ConvertError is not Clone (it may wrap an io::Error); rebuild an
        // equivalent value for the channel.
        let error = match error {
            ConvertError::Configuration(msg) => ConvertError::Configuration(msg.clone()),
            ConvertError::Conversion(msg) => ConvertError::Conversion(msg.clone()),
            ConvertError::Timeout(t) => ConvertError::Timeout(*t),
            ConvertError::Io(e) => {
                ConvertError::Io(std::io::Error::new(e.kind(), e.to_string()))
            }
        };
        let _ = self.sender.send(ConvertEvent::Failed {
            id: id.to_string(),
            error,
        });
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
