//! Stream materialization: read a byte stream of unknown length into memory.
//!
//! The renderer writes its PDF to a file whose size is unknown until the
//! process exits, so the final read uses a doubling-growth loop instead of a
//! length-prefixed allocation: read in 4096-byte chunks, and whenever the
//! buffer fills exactly, probe for one more byte before doubling capacity.
//! The probe matters: a stream of exactly 4096 bytes must not trigger a
//! pointless doubling.
//!
//! [`read_all_restoring`] additionally records the stream position on entry
//! and restores it before returning, on success and error alike, so a caller
//! handing over a partially consumed seekable stream gets it back where it
//! left it.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use wkhtml2pdf::capture;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> std::io::Result<()> {
//! let mut stream = Cursor::new(b"%PDF-1.7 ...".to_vec());
//! let bytes = capture::read_all(&mut stream).await?;
//! assert_eq!(bytes, b"%PDF-1.7 ...");
//! # Ok(())
//! # }
//! ```

use std::io::{self, SeekFrom};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// Chunk size for the growth loop.
pub const CHUNK_SIZE: usize = 4096;

/// Read a stream to its end, starting at the current position.
///
/// Returns a buffer trimmed to exactly the number of bytes read; a stream
/// already at end-of-stream yields an empty buffer. The buffer starts at
/// [`CHUNK_SIZE`] and doubles only when full with at least one more byte
/// available.
///
/// # Errors
///
/// Any I/O error from the underlying reads is propagated; bytes read before
/// the error are discarded.
pub async fn read_all<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total_read = 0usize;

    loop {
        let bytes_read = reader.read(&mut buffer[total_read..]).await?;
        if bytes_read == 0 {
            break;
        }
        total_read += bytes_read;

        if total_read == buffer.len() {
            // Probe a single byte before growing: if the stream ended right
            // at the buffer boundary, no doubling is needed.
            let mut probe = [0u8; 1];
            if reader.read(&mut probe).await? == 0 {
                break;
            }
            buffer.resize(buffer.len() * 2, 0);
            buffer[total_read] = probe[0];
            total_read += 1;
        }
    }

    buffer.truncate(total_read);
    Ok(buffer)
}

/// Read a seekable stream to its end, restoring its position afterwards.
///
/// The position observed on entry is restored on every path, including when
/// the read itself fails. Reading starts at the current position, so a stream
/// of length `L` positioned at offset `p` yields `L - p` bytes.
///
/// # Example
///
/// ```rust
/// use std::io::{Cursor, SeekFrom};
/// use tokio::io::AsyncSeekExt;
/// use wkhtml2pdf::capture;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> std::io::Result<()> {
/// let mut stream = Cursor::new(vec![0u8; 100]);
/// stream.seek(SeekFrom::Start(60)).await?;
///
/// let bytes = capture::read_all_restoring(&mut stream).await?;
/// assert_eq!(bytes.len(), 40);
/// assert_eq!(stream.position(), 60); // position restored
/// # Ok(())
/// # }
/// ```
pub async fn read_all_restoring<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + AsyncSeek + Unpin + ?Sized,
{
    let original_position = reader.stream_position().await?;

    let result = read_all(reader).await;

    // Restore on success and error alike. A restore failure on an otherwise
    // successful read is still a failure: the caller was promised the
    // position back.
    let restored = reader.seek(SeekFrom::Start(original_position)).await;

    match (result, restored) {
        (Ok(bytes), Ok(_)) => Ok(bytes),
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(e),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
