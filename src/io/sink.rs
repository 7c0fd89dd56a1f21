//! Output byte streams with transparent gzip encoding
//!
//! [`ByteSink`] is the write counterpart to [`ByteSource`]: a file or the
//! process's standard output, with an orthogonal gzip encode layer chosen
//! at open time (explicit flag or recognized suffix). Output is buffered;
//! [`ByteSink::flush`] forces it down, [`ByteSink::close`] finalizes the
//! gzip stream exactly once.
//!
//! [`ByteSource`]: crate::io::ByteSource

use crate::error::{Result, SeqioError};
use crate::io::source::has_gzip_suffix;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a sink's bytes go
#[derive(Debug, Clone)]
pub enum SinkTarget {
    /// Named file on disk, created (truncated) at open
    Path(PathBuf),
    /// The process's standard output; never compressed by suffix inference
    Stdout,
}

impl SinkTarget {
    /// Create a file-backed target
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }
}

enum SinkWriter {
    Plain(BufWriter<Box<dyn Write + Send>>),
    Gzip(GzEncoder<BufWriter<Box<dyn Write + Send>>>),
}

/// Writable byte stream over a file or standard output
///
/// A sink opened for writing never accepts reads (there is no read surface
/// on this type). [`ByteSink::tell`] reports cumulative uncompressed bytes
/// accepted since open.
pub struct ByteSink {
    writer: Option<SinkWriter>,
    offset: u64,
}

impl ByteSink {
    /// Open a sink for writing
    ///
    /// `compressed` forces a gzip encode layer regardless of name; when
    /// unset, a recognized suffix (`.gz`, `.gzip`, `.bgz`) selects it.
    /// Standard output honors only the explicit flag.
    pub fn open(target: SinkTarget, compressed: bool) -> Result<Self> {
        let (raw, compressed): (Box<dyn Write + Send>, bool) = match &target {
            SinkTarget::Path(path) => {
                let compressed = compressed || has_gzip_suffix(path);
                log::debug!("opened sink {:?} (compressed: {})", path, compressed);
                (Box::new(File::create(path)?), compressed)
            }
            SinkTarget::Stdout => {
                log::debug!("opened sink to standard output (compressed: {})", compressed);
                (Box::new(io::stdout()), compressed)
            }
        };
        let writer = if compressed {
            SinkWriter::Gzip(GzEncoder::new(BufWriter::new(raw), Compression::default()))
        } else {
            SinkWriter::Plain(BufWriter::new(raw))
        };
        Ok(Self {
            writer: Some(writer),
            offset: 0,
        })
    }

    /// Open a sink to a file path, inferring compression from the suffix
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(SinkTarget::from_path(path), false)
    }

    /// Whether the sink has not been closed yet
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Cumulative uncompressed bytes accepted since open
    pub fn tell(&self) -> u64 {
        self.offset
    }

    /// Append bytes to the sink
    ///
    /// # Errors
    ///
    /// [`SeqioError::ClosedHandle`] after [`ByteSink::close`];
    /// [`SeqioError::Io`] on underlying write failure.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            SeqioError::ClosedHandle("write on a closed sink".to_string())
        })?;
        match writer {
            SinkWriter::Plain(w) => w.write_all(data)?,
            SinkWriter::Gzip(w) => w.write_all(data)?,
        }
        self.offset += data.len() as u64;
        Ok(())
    }

    /// Force buffered output to the underlying resource
    ///
    /// For a gzip sink this flushes the compressor without finalizing the
    /// stream. A no-op once closed.
    pub fn flush(&mut self) -> Result<()> {
        match self.writer.as_mut() {
            Some(SinkWriter::Plain(w)) => Ok(w.flush()?),
            Some(SinkWriter::Gzip(w)) => Ok(w.flush()?),
            None => Ok(()),
        }
    }

    /// Flush, finalize any gzip stream, and release the resource
    ///
    /// Closing twice is a no-op. Prefer calling this over relying on
    /// `Drop`, which can only close best-effort.
    pub fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            None => Ok(()),
            Some(SinkWriter::Plain(mut w)) => {
                w.flush()?;
                log::debug!("closed sink after {} bytes", self.offset);
                Ok(())
            }
            Some(SinkWriter::Gzip(encoder)) => {
                let mut inner = encoder.finish()?;
                inner.flush()?;
                log::debug!("closed gzip sink after {} uncompressed bytes", self.offset);
                Ok(())
            }
        }
    }
}

impl Drop for ByteSink {
    fn drop(&mut self) {
        // Best-effort close; callers wanting the error call close() themselves.
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_plain_write_and_offset() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fa");

        let mut sink = ByteSink::from_path(&path).unwrap();
        sink.write_bytes(b">r\n").unwrap();
        sink.write_bytes(b"ACGT\n").unwrap();
        assert_eq!(sink.tell(), 8);
        sink.close().unwrap();
        sink.close().unwrap(); // idempotent

        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, b">r\nACGT\n");
    }

    #[test]
    fn test_write_after_close_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fa");

        let mut sink = ByteSink::from_path(&path).unwrap();
        sink.close().unwrap();

        let result = sink.write_bytes(b"late");
        assert!(matches!(result, Err(SeqioError::ClosedHandle(_))));
        // flush on a closed sink is a no-op, not an error
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn test_gzip_sink_by_suffix_round_trips() {
        use flate2::read::MultiGzDecoder;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fa.gz");

        let mut sink = ByteSink::from_path(&path).unwrap();
        sink.write_bytes(b">r\nACGTACGT\n").unwrap();
        sink.close().unwrap();

        // File carries the gzip magic
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[31, 139]);

        let mut decoded = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, ">r\nACGTACGT\n");
    }

    #[test]
    fn test_explicit_compression_flag_overrides_suffix() {
        use flate2::read::MultiGzDecoder;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fa");

        let mut sink = ByteSink::open(SinkTarget::from_path(&path), true).unwrap();
        sink.write_bytes(b"payload\n").unwrap();
        sink.close().unwrap();

        let mut decoded = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "payload\n");
    }
}
