//! Shared test helpers: stand-in renderer executables.
//!
//! The real wkhtmltopdf binary is not available on CI, so the integration
//! tests drive small `/bin/sh` scripts that honor the same command-line
//! contract: flags, the `-` stdin marker, and the output file path as the
//! last argument.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// A stand-in renderer script living in its own unique temp directory.
///
/// The directory (script included) is removed on drop.
pub struct FakeRenderer {
    dir: PathBuf,
    /// Path to the executable script.
    pub path: PathBuf,
}

impl FakeRenderer {
    /// Write `script` to a fresh temp directory and mark it executable.
    pub fn new(script: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("wkhtml2pdf-it-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create fake renderer dir");
        let path = dir.join("renderer.sh");
        fs::write(&path, script).expect("write fake renderer script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("chmod fake renderer script");
        Self { dir, path }
    }

    /// A renderer that consumes stdin and copies it verbatim to the output
    /// file (the last argument).
    pub fn echoing() -> Self {
        Self::new(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > \"$out\"\n",
        )
    }

    /// A renderer that consumes stdin and writes a fixed payload.
    pub fn fixed(payload: &str) -> Self {
        Self::new(&format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf '%s' '{payload}' > \"$out\"\n"
        ))
    }

    /// A renderer that dumps its argv, one token per line, to the output
    /// file. Used to assert end-to-end argument construction.
    pub fn argv_dumping() -> Self {
        Self::new(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf '%s\\n' \"$@\" > \"$out\"\n",
        )
    }

    /// A renderer that writes a diagnostic to stderr and exits non-zero.
    pub fn failing(stderr_line: &str, code: u8) -> Self {
        Self::new(&format!(
            "#!/bin/sh\n\
             cat > /dev/null\n\
             echo '{stderr_line}' >&2\n\
             exit {code}\n"
        ))
    }

    /// A renderer that sleeps for `seconds` without ever reading its stdin,
    /// for exercising the timeout bound over the stdin write.
    pub fn stalling(seconds: u32) -> Self {
        Self::new(&format!(
            "#!/bin/sh\n\
             sleep {seconds}\n"
        ))
    }

    /// A renderer that hangs for `seconds` after consuming stdin, for
    /// exercising the timeout/kill path.
    pub fn hanging(seconds: u32) -> Self {
        Self::new(&format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf 'partial' > \"$out\"\n\
             sleep {seconds}\n"
        ))
    }
}

impl Drop for FakeRenderer {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}
