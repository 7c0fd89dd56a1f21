//! Input byte streams with transparent gzip decoding
//!
//! [`ByteSource`] wraps exactly one of: a named file on disk, or the
//! process's standard input, with an orthogonal gzip decode layer. It
//! implements [`BufRead`], so callers parse byte-by-byte out of the
//! internal buffer without re-reading; every `consume` advances the
//! cumulative decoded-byte offset reported by [`ByteSource::tell`].

use crate::error::{Result, SeqioError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// File-name suffixes treated as gzip, matched case-insensitively.
/// Suffix inference is a pre-open decision; file contents are never sniffed.
const GZIP_SUFFIXES: &[&str] = &["gz", "gzip", "bgz"];

/// Check whether a path carries a recognized compressed-file suffix
pub(crate) fn has_gzip_suffix(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| GZIP_SUFFIXES.iter().any(|s| ext.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}

/// Where a source's bytes come from
#[derive(Debug, Clone)]
pub enum SourceTarget {
    /// Named file on disk
    Path(PathBuf),
    /// The process's standard input; never compressed by suffix inference
    /// and never resettable
    Stdin,
}

impl SourceTarget {
    /// Create a file-backed target
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }
}

/// Readable byte stream over a file or standard input
///
/// A source opened for reading never accepts writes (there is no write
/// surface on this type). Offsets count decoded bytes, so for an
/// uncompressed file the offset after full consumption equals the file
/// size reported by [`ByteSource::size`].
pub struct ByteSource {
    target: SourceTarget,
    compressed: bool,
    reader: Option<Box<dyn BufRead + Send>>,
    offset: u64,
    size: Option<u64>,
}

fn open_reader(path: &Path, compressed: bool) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    if compressed {
        // MultiGzDecoder handles multi-member gzip files, which
        // concatenated bioinformatics outputs commonly are.
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

impl ByteSource {
    /// Open a source for reading
    ///
    /// `compressed` forces a gzip decode layer regardless of name; when
    /// unset, a recognized suffix (`.gz`, `.gzip`, `.bgz`) selects it.
    /// Standard input honors only the explicit flag.
    pub fn open(target: SourceTarget, compressed: bool) -> Result<Self> {
        match target {
            SourceTarget::Path(path) => {
                let compressed = compressed || has_gzip_suffix(&path);
                let size = std::fs::metadata(&path)?.len();
                let reader = open_reader(&path, compressed)?;
                log::debug!(
                    "opened source {:?} (compressed: {}, {} bytes on disk)",
                    path,
                    compressed,
                    size
                );
                Ok(Self {
                    target: SourceTarget::Path(path),
                    compressed,
                    reader: Some(reader),
                    offset: 0,
                    size: Some(size),
                })
            }
            SourceTarget::Stdin => {
                let reader: Box<dyn BufRead + Send> = if compressed {
                    Box::new(BufReader::new(MultiGzDecoder::new(io::stdin())))
                } else {
                    Box::new(BufReader::new(io::stdin()))
                };
                log::debug!("opened source from standard input (compressed: {})", compressed);
                Ok(Self {
                    target: SourceTarget::Stdin,
                    compressed,
                    reader: Some(reader),
                    offset: 0,
                    size: None,
                })
            }
        }
    }

    /// Open a source from a file path, inferring compression from the suffix
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(SourceTarget::from_path(path), false)
    }

    /// Whether the source has not been closed yet
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Cumulative decoded bytes consumed since open or the last reset
    pub fn tell(&self) -> u64 {
        self.offset
    }

    /// Total byte length of the underlying resource, when known
    ///
    /// `None` for standard input. For compressed files this is the on-disk
    /// (compressed) length.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Peek at the next byte without consuming it
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.fill_buf()?.first().copied())
    }

    /// Rewind to the start of the resource and zero the offset
    ///
    /// # Errors
    ///
    /// [`SeqioError::UnsupportedOperation`] when the source is standard
    /// input (not seekable) or already closed.
    pub fn reset(&mut self) -> Result<()> {
        if self.reader.is_none() {
            return Err(SeqioError::UnsupportedOperation(
                "reset on a closed source".to_string(),
            ));
        }
        match &self.target {
            SourceTarget::Stdin => Err(SeqioError::UnsupportedOperation(
                "standard input is not seekable".to_string(),
            )),
            SourceTarget::Path(path) => {
                // Reopening (rather than seeking) restarts the gzip decoder
                // from a clean state for compressed sources.
                self.reader = Some(open_reader(path, self.compressed)?);
                self.offset = 0;
                log::debug!("reset source {:?}", path);
                Ok(())
            }
        }
    }

    /// Release the underlying resource; closing twice is a no-op
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            log::debug!("closed source after {} bytes", self.offset);
        }
    }

    fn reader_mut(&mut self) -> io::Result<&mut Box<dyn BufRead + Send>> {
        self.reader
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "source is closed"))
    }
}

impl Read for ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader_mut()?.read(buf)?;
        self.offset += n as u64;
        Ok(n)
    }
}

impl BufRead for ByteSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader_mut()?.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if let Some(reader) = self.reader.as_mut() {
            reader.consume(amt);
            self.offset += amt as u64;
        }
    }
}
