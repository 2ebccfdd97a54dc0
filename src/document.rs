//! Request carrier types: the document to convert and its page geometry.
//!
//! This module provides [`PdfDocument`], the immutable per-conversion request,
//! and [`PaperType`], the page sizes wkhtmltopdf accepts for `--page-size`.
//!
//! # Example
//!
//! ```rust
//! use wkhtml2pdf::{PaperType, PdfDocument};
//!
//! let document = PdfDocument::new("invoice-42", "<html><body>Hello</body></html>")
//!     .paper_type(PaperType::Letter)
//!     .cookie("session", "abc123")
//!     .extra_param("orientation", "Landscape");
//!
//! assert_eq!(document.id, "invoice-42");
//! assert_eq!(document.paper_type, PaperType::Letter);
//! ```

use std::fmt;

// ============================================================================
// PaperType
// ============================================================================

/// Page sizes accepted by wkhtmltopdf's `--page-size` flag.
///
/// Covers the ISO A/B series sizes and the North American sizes the renderer
/// supports. The string form is exactly what the renderer expects on its
/// command line.
///
/// # Example
///
/// ```rust
/// use wkhtml2pdf::PaperType;
///
/// assert_eq!(PaperType::A4.as_str(), "A4");
/// assert_eq!(PaperType::Tabloid.to_string(), "Tabloid");
/// assert_eq!(PaperType::default(), PaperType::A4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaperType {
    /// ISO A3 (297 × 420 mm).
    A3,
    /// ISO A4 (210 × 297 mm). The default.
    #[default]
    A4,
    /// ISO A5 (148 × 210 mm).
    A5,
    /// ISO B4 (250 × 353 mm).
    B4,
    /// ISO B5 (176 × 250 mm).
    B5,
    /// US Letter (8.5 × 11 in).
    Letter,
    /// US Legal (8.5 × 14 in).
    Legal,
    /// US Tabloid (11 × 17 in).
    Tabloid,
}

impl PaperType {
    /// The renderer's command-line spelling of this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperType::A3 => "A3",
            PaperType::A4 => "A4",
            PaperType::A5 => "A5",
            PaperType::B4 => "B4",
            PaperType::B5 => "B5",
            PaperType::Letter => "Letter",
            PaperType::Legal => "Legal",
            PaperType::Tabloid => "Tabloid",
        }
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PdfDocument
// ============================================================================

/// One HTML to PDF conversion request.
///
/// A document is built once, submitted to
/// [`PdfConverter::convert`](crate::PdfConverter::convert), and consumed by
/// that call. The `id` is a caller-supplied correlation token carried
/// verbatim on the resulting [`Completed`](crate::ConvertEvent::Completed) or
/// [`Failed`](crate::ConvertEvent::Failed) notification, which is how callers
/// match notifications to requests under concurrent conversions.
///
/// Cookies and extra parameters are kept as ordered pairs so the generated
/// argument list is deterministic: `page-size` first, then extra parameters
/// in insertion order, then cookies in insertion order.
///
/// # Example
///
/// ```rust
/// use wkhtml2pdf::{PaperType, PdfDocument};
///
/// let document = PdfDocument::new("report-7", "<h1>Q3</h1>")
///     .paper_type(PaperType::A4)
///     .extra_param("orientation", "Landscape")
///     .cookie("session", "abc");
///
/// assert_eq!(document.extra_params.len(), 1);
/// assert_eq!(document.cookies.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PdfDocument {
    /// Caller-supplied correlation token, echoed on every notification.
    pub id: String,

    /// The HTML payload, streamed to the renderer over stdin.
    pub html: String,

    /// Page size passed as `--page-size`.
    pub paper_type: PaperType,

    /// Cookies passed as `--cookie <name> <value>`, in insertion order.
    pub cookies: Vec<(String, String)>,

    /// Additional renderer flags passed as `--<name> <value>`, in insertion
    /// order.
    ///
    /// An extra parameter named `page-size` overrides [`Self::paper_type`]
    /// (last write wins).
    pub extra_params: Vec<(String, String)>,
}

impl PdfDocument {
    /// Create a document with the given correlation id and HTML payload.
    pub fn new(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
            paper_type: PaperType::default(),
            cookies: Vec::new(),
            extra_params: Vec::new(),
        }
    }

    /// Set the page size (default: [`PaperType::A4`]).
    pub fn paper_type(mut self, paper_type: PaperType) -> Self {
        self.paper_type = paper_type;
        self
    }

    /// Append a cookie sent to the renderer as `--cookie <name> <value>`.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Append an extra renderer flag sent as `--<name> <value>`.
    ///
    /// See the wkhtmltopdf manual for the available flags (`orientation`,
    /// `margin-top`, `encoding`, ...). A flag named `page-size` overrides the
    /// document's [`paper_type`](Self::paper_type); last write wins.
    pub fn extra_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((name.into(), value.into()));
        self
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
