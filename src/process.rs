//! One wkhtmltopdf invocation: spawn, drain, feed, wait, kill, clean up.
//!
//! [`ConvertProcess`] owns the full lifecycle of a single renderer run. The
//! ordering inside [`run`](ConvertProcess::run) is load-bearing:
//!
//! 1. Spawn with stdin, stdout and stderr all piped.
//! 2. Start two reader tasks, one per output stream. The renderer blocks if
//!    either pipe fills while nobody drains it, so the readers must be
//!    running before (and while) the HTML is written to stdin.
//! 3. Write the HTML to stdin, then close it: the renderer's `-` input mode
//!    reads until end-of-input.
//! 4. Await process exit and both reader completions together, under one
//!    wall-clock bound. On expiry the child is force-killed.
//! 5. Clear the line buffers and delete the output file on every exit path.
//!
//! A reader task finishing is that stream's end-of-stream signal; awaiting
//! the two task handles alongside `Child::wait` is the combined wait the
//! timeout bounds.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::args::ProcessArgs;
use crate::capture;
use crate::error::{ConvertError, Result};
use crate::event::ConvertObserver;

/// Which renderer stream a reader task drains.
#[derive(Clone, Copy)]
enum StreamKind {
    Output,
    Error,
}

/// A single renderer subprocess invocation.
///
/// Created per conversion and never reused; the owning converter call is the
/// only holder. The line buffers and the output file are released inside
/// [`run`](Self::run) on every path (success, renderer failure, and
/// timeout/kill alike) rather than from `Drop`.
pub(crate) struct ConvertProcess {
    command: Command,
    output_path: PathBuf,
    output_lines: Arc<Mutex<Vec<String>>>,
    error_lines: Arc<Mutex<Vec<String>>>,
    observers: Vec<Arc<dyn ConvertObserver>>,
}

impl ConvertProcess {
    /// Prepare an invocation of the renderer at `renderer_path` writing to
    /// `output_path` with the given arguments.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Configuration`] if the renderer path is empty or does
    /// not exist on disk.
    pub(crate) fn new(
        renderer_path: &Path,
        output_path: &Path,
        args: &ProcessArgs,
        observers: Vec<Arc<dyn ConvertObserver>>,
    ) -> Result<Self> {
        if renderer_path.as_os_str().is_empty() {
            return Err(ConvertError::Configuration(
                "wkhtmltopdf application path must not be empty".to_string(),
            ));
        }

        if !renderer_path.exists() {
            return Err(ConvertError::Configuration(format!(
                "file '{}' not found. Check that wkhtmltopdf is installed.",
                renderer_path.display()
            )));
        }

        let mut command = Command::new(renderer_path);
        command
            .args(args.to_argv(output_path))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Safety net only; the timeout path kills explicitly.
            .kill_on_drop(true);

        Ok(Self {
            command,
            output_path: output_path.to_path_buf(),
            output_lines: Arc::new(Mutex::new(Vec::new())),
            error_lines: Arc::new(Mutex::new(Vec::new())),
            observers,
        })
    }

    /// Run the renderer to completion and return the produced PDF bytes.
    ///
    /// `input` is streamed to the renderer's stdin as UTF-8 plus a trailing
    /// newline; `timeout` bounds the combined wait for process exit and both
    /// stream drains.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::Conversion`]: non-zero exit; the message embeds the
    ///   renderer's captured stderr.
    /// - [`ConvertError::Timeout`]: bound exceeded; the child is killed.
    /// - [`ConvertError::Io`]: spawn failure, or output file missing or
    ///   unreadable after a reported-successful exit.
    pub(crate) async fn run(&mut self, input: &str, timeout: Duration) -> Result<Vec<u8>> {
        let result = self.drive(input, timeout).await;

        // Guaranteed cleanup, on every path including timeout/kill.
        self.output_lines.lock().unwrap().clear();
        self.error_lines.lock().unwrap().clear();
        match tokio::fs::remove_file(&self.output_path).await {
            Ok(()) => log::debug!("🧹 Removed temporary output file {:?}", self.output_path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "⚠️ Failed to remove temporary output file {:?}: {}",
                self.output_path,
                e
            ),
        }

        result
    }

    async fn drive(&mut self, input: &str, timeout: Duration) -> Result<Vec<u8>> {
        log::debug!("🚀 Spawning renderer for output {:?}", self.output_path);
        let mut child = self.command.spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("renderer stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("renderer stderr was not captured"))?;

        // Readers first: the renderer must never block on a full pipe while
        // it waits for its stdin.
        let mut output_task = self.spawn_line_reader(stdout, StreamKind::Output);
        let mut error_task = self.spawn_line_reader(stderr, StreamKind::Error);

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("renderer stdin was not captured"))?;
        // The write runs as its own task so the timeout below bounds it too:
        // a renderer that stalls without reading its stdin would otherwise
        // block write_all forever once the payload exceeds the OS pipe
        // buffer. Dropping stdin at task end is the end-of-input signal for
        // `-` mode, also when the input was empty.
        let payload = (!input.is_empty()).then(|| format!("{input}\n"));
        let mut writer_task = tokio::spawn(async move {
            if let Some(payload) = payload {
                let written = async {
                    stdin.write_all(payload.as_bytes()).await?;
                    stdin.flush().await
                }
                .await;

                match written {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                        // The renderer exited without reading its stdin, e.g.
                        // on a usage error; its exit status decides the
                        // outcome.
                        log::debug!("Renderer closed stdin early, deferring to exit status");
                    }
                    Err(e) => {
                        log::warn!("⚠️ Writing HTML to renderer stdin failed: {}", e);
                    }
                }
            }
            drop(stdin);
        });

        // One bound over all completions: the stdin write, process exit and
        // both drains. A renderer that exits without draining its stdin
        // closes the pipe, which unblocks the writer with BrokenPipe, so
        // awaiting the writer first cannot outlast the child.
        let waited = tokio::time::timeout(timeout, async {
            let _ = (&mut writer_task).await;
            let status = child.wait().await;
            let _ = (&mut output_task).await;
            let _ = (&mut error_task).await;
            status
        })
        .await;

        match waited {
            Ok(status) => {
                let status = status?;
                if !status.success() {
                    let renderer_output = self.error_lines.lock().unwrap().join("\n");
                    log::warn!("❌ Renderer exited with {}", status);
                    return Err(ConvertError::Conversion(renderer_output));
                }
                log::debug!("Renderer exited cleanly");
            }
            Err(_elapsed) => {
                log::warn!("⏰ Renderer did not finish within {:?}, killing it", timeout);
                // Best-effort: a child that exited between the timeout and
                // the kill makes start_kill fail, which is fine.
                if let Err(e) = child.start_kill() {
                    log::debug!("Kill after timeout failed (child already exited?): {}", e);
                }
                let _ = child.wait().await;
                // Reaping the child closes the pipes: the readers finish
                // promptly and a writer still blocked on a full pipe gets
                // BrokenPipe. Abort the writer anyway so a pathological
                // platform cannot stall the cleanup.
                writer_task.abort();
                let _ = writer_task.await;
                let _ = output_task.await;
                let _ = error_task.await;
                return Err(ConvertError::Timeout(timeout));
            }
        }

        let mut file = tokio::fs::File::open(&self.output_path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ConvertError::Io(io::Error::new(
                    e.kind(),
                    format!(
                        "renderer reported success but output file '{}' is missing",
                        self.output_path.display()
                    ),
                ))
            } else {
                ConvertError::Io(e)
            }
        })?;

        Ok(capture::read_all_restoring(&mut file).await?)
    }

    /// Start a task that drains one renderer stream line by line.
    ///
    /// Each line is appended to the stream's buffer and forwarded to the
    /// observers (fire-and-forget). The returned handle completes when the
    /// stream reaches end-of-stream.
    fn spawn_line_reader<R>(&self, stream: R, kind: StreamKind) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let lines = match kind {
            StreamKind::Output => Arc::clone(&self.output_lines),
            StreamKind::Error => Arc::clone(&self.error_lines),
        };
        let observers = self.observers.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(stream).lines();
            loop {
                match reader.next_line().await {
                    Ok(Some(line)) => {
                        for observer in &observers {
                            match kind {
                                StreamKind::Output => observer.on_output_line(&line),
                                StreamKind::Error => observer.on_error_line(&line),
                            }
                        }
                        lines.lock().unwrap().push(line);
                    }
                    Ok(None) => break,
                    Err(e) => {
                        log::debug!("Renderer stream read ended with error: {}", e);
                        break;
                    }
                }
            }
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// A stand-in renderer: a /bin/sh script in a unique temp directory.
    struct FakeRenderer {
        dir: PathBuf,
        path: PathBuf,
    }

    impl FakeRenderer {
        fn new(script: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("wkhtml2pdf-proc-{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join("renderer.sh");
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            Self { dir, path }
        }

        fn output_path(&self) -> PathBuf {
            self.dir.join("out.pdf")
        }
    }

    impl Drop for FakeRenderer {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn page_size_args() -> ProcessArgs {
        let mut args = ProcessArgs::new();
        args.insert("page-size", "A4");
        args
    }

    /// Verifies that an empty renderer path is rejected at construction.
    #[test]
    fn test_new_rejects_empty_path() {
        let result = ConvertProcess::new(
            Path::new(""),
            Path::new("/tmp/out.pdf"),
            &page_size_args(),
            Vec::new(),
        );
        assert!(matches!(result, Err(ConvertError::Configuration(_))));
    }

    /// Verifies that a nonexistent renderer path is rejected at construction.
    #[test]
    fn test_new_rejects_missing_executable() {
        let result = ConvertProcess::new(
            Path::new("/nonexistent/wkhtmltopdf"),
            Path::new("/tmp/out.pdf"),
            &page_size_args(),
            Vec::new(),
        );
        match result {
            Err(ConvertError::Configuration(msg)) => {
                assert!(msg.contains("/nonexistent/wkhtmltopdf"));
                assert!(msg.contains("not found"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    /// Verifies the success path: the renderer consumes stdin, writes the
    /// output file, and run() returns exactly those bytes and removes the
    /// file afterwards.
    #[tokio::test]
    async fn test_run_success_returns_file_bytes() {
        let renderer = FakeRenderer::new(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf 'PDFDATA' > \"$out\"\n",
        );
        let output_path = renderer.output_path();

        let mut process =
            ConvertProcess::new(&renderer.path, &output_path, &page_size_args(), Vec::new())
                .unwrap();
        let bytes = process
            .run("<html><body>hi</body></html>", Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(bytes, b"PDFDATA");
        assert!(!output_path.exists(), "output file should be removed after run");
        assert!(process.output_lines.lock().unwrap().is_empty());
        assert!(process.error_lines.lock().unwrap().is_empty());
    }

    /// Verifies that a non-zero exit produces a Conversion error embedding
    /// the captured stderr text, and the output file is removed.
    #[tokio::test]
    async fn test_run_nonzero_exit() {
        let renderer = FakeRenderer::new(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf 'partial' > \"$out\"\n\
             echo 'Error: could not load page' >&2\n\
             exit 3\n",
        );
        let output_path = renderer.output_path();

        let mut process =
            ConvertProcess::new(&renderer.path, &output_path, &page_size_args(), Vec::new())
                .unwrap();
        let result = process.run("<html/>", Duration::from_secs(10)).await;

        match result {
            Err(ConvertError::Conversion(msg)) => {
                assert!(msg.contains("could not load page"), "stderr text missing: {}", msg);
            }
            other => panic!("Expected Conversion error, got {:?}", other.map(|b| b.len())),
        }
        assert!(!output_path.exists(), "partial output must not be left behind");
    }

    /// Verifies the timeout path: the child is killed, a Timeout error names
    /// the bound, and a partially written output file is removed.
    #[tokio::test]
    async fn test_run_timeout_kills_child() {
        let renderer = FakeRenderer::new(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf 'partial' > \"$out\"\n\
             sleep 10\n",
        );
        let output_path = renderer.output_path();

        let started = std::time::Instant::now();
        let mut process =
            ConvertProcess::new(&renderer.path, &output_path, &page_size_args(), Vec::new())
                .unwrap();
        let result = process.run("<html/>", Duration::from_millis(300)).await;
        let elapsed = started.elapsed();

        match result {
            Err(ConvertError::Timeout(t)) => assert_eq!(t, Duration::from_millis(300)),
            other => panic!("Expected Timeout error, got {:?}", other.map(|b| b.len())),
        }
        assert!(
            elapsed < Duration::from_secs(5),
            "kill must not wait for the child's sleep, took {:?}",
            elapsed
        );
        assert!(!output_path.exists(), "partial output must not be left behind");
        assert!(process.error_lines.lock().unwrap().is_empty());
    }

    /// Verifies that the timeout also bounds the stdin write: a renderer
    /// that never reads its stdin leaves the writer blocked once the payload
    /// exceeds the OS pipe buffer, and the kill path must still fire.
    #[tokio::test]
    async fn test_run_timeout_covers_stdin_write() {
        let renderer = FakeRenderer::new("#!/bin/sh\nsleep 8\n");
        let output_path = renderer.output_path();

        // Well past the 64 KiB Linux pipe buffer.
        let big_html = "x".repeat(4 * 1024 * 1024);

        let started = std::time::Instant::now();
        let mut process =
            ConvertProcess::new(&renderer.path, &output_path, &page_size_args(), Vec::new())
                .unwrap();
        let result = process.run(&big_html, Duration::from_millis(300)).await;
        let elapsed = started.elapsed();

        match result {
            Err(ConvertError::Timeout(t)) => assert_eq!(t, Duration::from_millis(300)),
            other => panic!("Expected Timeout error, got {:?}", other.map(|b| b.len())),
        }
        assert!(
            elapsed < Duration::from_secs(3),
            "run must not block on the stdin write, took {:?}",
            elapsed
        );
    }

    /// Verifies that empty input still closes stdin, so a renderer reading
    /// until end-of-input does not hang.
    #[tokio::test]
    async fn test_run_empty_input_closes_stdin() {
        let renderer = FakeRenderer::new(
            "#!/bin/sh\n\
             for arg in \"$@\"; do out=\"$arg\"; done\n\
             cat > /dev/null\n\
             printf 'EMPTYOK' > \"$out\"\n",
        );
        let output_path = renderer.output_path();

        let mut process =
            ConvertProcess::new(&renderer.path, &output_path, &page_size_args(), Vec::new())
                .unwrap();
        let bytes = process.run("", Duration::from_secs(10)).await.unwrap();

        assert_eq!(bytes, b"EMPTYOK");
    }

    /// Verifies that a successful exit without an output file surfaces as an
    /// Io error naming the missing file.
    #[tokio::test]
    async fn test_run_missing_output_file() {
        let renderer = FakeRenderer::new(
            "#!/bin/sh\n\
             cat > /dev/null\n\
             exit 0\n",
        );
        let output_path = renderer.output_path();

        let mut process =
            ConvertProcess::new(&renderer.path, &output_path, &page_size_args(), Vec::new())
                .unwrap();
        let result = process.run("<html/>", Duration::from_secs(10)).await;

        match result {
            Err(ConvertError::Io(e)) => {
                assert!(e.to_string().contains("missing"), "unexpected message: {}", e);
            }
            other => panic!("Expected Io error, got {:?}", other.map(|b| b.len())),
        }
    }
}
