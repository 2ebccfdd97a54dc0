//! Ordered renderer argument construction.
//!
//! wkhtmltopdf is invoked as:
//!
//! ```text
//! <renderer-path> [--flag value]... - <output-file-path>
//! ```
//!
//! where the literal `-` tells the renderer to read the HTML from stdin.
//! [`ProcessArgs`] holds the `(flag, value)` pairs in insertion order and
//! renders them into discrete argv tokens, so values containing spaces never
//! need shell quoting.

use std::ffi::OsString;
use std::path::Path;

/// An ordered list of `(flag, value)` pairs for the renderer command line.
///
/// Flags are stored without the leading `--`. A flag may contain spaces
/// ("cookie session"), in which case each word becomes its own argv token:
/// this is how wkhtmltopdf's two-argument options such as
/// `--cookie <name> <value>` are expressed.
///
/// Inserting a flag that is already present replaces its value in place
/// (last write wins), keeping the original position so the rendered argument
/// order stays deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProcessArgs {
    pairs: Vec<(String, String)>,
}

impl ProcessArgs {
    /// Create an empty argument list.
    pub(crate) fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Insert a flag, replacing the value of an existing flag with the same
    /// name (last write wins).
    pub(crate) fn insert(&mut self, flag: impl Into<String>, value: impl Into<String>) {
        let flag = flag.into();
        let value = value.into();

        if let Some(existing) = self.pairs.iter_mut().find(|(f, _)| *f == flag) {
            log::debug!("Argument '{}' overridden: '{}' -> '{}'", flag, existing.1, value);
            existing.1 = value;
        } else {
            self.pairs.push((flag, value));
        }
    }

    /// Number of `(flag, value)` pairs.
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    /// The stored pairs, in insertion order.
    pub(crate) fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Render the full argv: every `--flag value` pair in order, then the
    /// stdin marker `-`, then the output file path.
    pub(crate) fn to_argv(&self, output_path: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = Vec::with_capacity(self.pairs.len() * 2 + 2);

        for (flag, value) in &self.pairs {
            // Multi-word flags ("cookie session") expand to one token per
            // word, with "--" prefixed to the first.
            let mut words = flag.split_whitespace();
            if let Some(first) = words.next() {
                argv.push(OsString::from(format!("--{first}")));
            }
            for word in words {
                argv.push(OsString::from(word));
            }
            argv.push(OsString::from(value));
        }

        argv.push(OsString::from("-"));
        argv.push(output_path.as_os_str().to_os_string());

        argv
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
