//! Single-handle façade over the parser and writer
//!
//! [`SeqFile`] bundles open-target resolution (file path, or `-`/empty for
//! the standard streams), mode dispatch, and the full read/write surface
//! behind one handle. A handle is either a reader or a writer for its whole
//! life; calling an operation of the other mode fails with
//! [`SeqioError::InvalidMode`] and leaves the handle usable.

use crate::error::{Result, SeqioError};
use crate::io::{ByteSink, ByteSource, Format, RecordParser, RecordWriter, SinkTarget, SourceTarget};
use crate::record::SeqRecord;
use std::str::FromStr;

/// Direction a [`SeqFile`] is opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Records flow out of the handle
    Read,
    /// Records flow into the handle
    Write,
}

impl FromStr for Mode {
    type Err = SeqioError;

    /// Accepts `"r"` / `"read"` and `"w"` / `"write"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" | "read" => Ok(Mode::Read),
            "w" | "write" => Ok(Mode::Write),
            other => Err(SeqioError::InvalidMode(format!(
                "unknown mode '{}', expected 'r' or 'w'",
                other
            ))),
        }
    }
}

enum Inner {
    Reader(RecordParser),
    Writer(RecordWriter),
}

/// One open sequence file (or standard stream)
///
/// # Example
///
/// ```no_run
/// use seqio::{Mode, SeqFile};
///
/// # fn main() -> seqio::Result<()> {
/// let mut input = SeqFile::open("reads.fq.gz", Mode::Read, false, None)?;
/// let mut output = SeqFile::open("reads.fa", Mode::Write, false, None)?;
///
/// for record in input.records() {
///     let record = record?;
///     output.write_fasta(&record)?;
/// }
/// output.close()?;
/// # Ok(())
/// # }
/// ```
pub struct SeqFile {
    inner: Inner,
}

impl SeqFile {
    /// Open a path in the given mode
    ///
    /// An empty path or `"-"` binds the handle to the matching standard
    /// stream. `compressed` forces a gzip layer; otherwise a recognized
    /// suffix (`.gz`, `.gzip`, `.bgz`) selects it, and standard streams
    /// stay uncompressed. A non-empty `valid_chars` restricts the sequence
    /// bytes a reader accepts; it is ignored in write mode.
    pub fn open(
        path: &str,
        mode: Mode,
        compressed: bool,
        valid_chars: Option<&str>,
    ) -> Result<Self> {
        let stdio = path.is_empty() || path == "-";
        let inner = match mode {
            Mode::Read => {
                let target = if stdio {
                    SourceTarget::Stdin
                } else {
                    SourceTarget::from_path(path)
                };
                let source = ByteSource::open(target, compressed)?;
                Inner::Reader(RecordParser::new(source, valid_chars))
            }
            Mode::Write => {
                let target = if stdio {
                    SinkTarget::Stdout
                } else {
                    SinkTarget::from_path(path)
                };
                let sink = ByteSink::open(target, compressed)?;
                Inner::Writer(RecordWriter::new(sink))
            }
        };
        Ok(Self { inner })
    }

    /// Open a path for reading, inferring compression from the suffix
    pub fn reader(path: &str) -> Result<Self> {
        Self::open(path, Mode::Read, false, None)
    }

    /// Open a path for writing, inferring compression from the suffix
    pub fn writer(path: &str) -> Result<Self> {
        Self::open(path, Mode::Write, false, None)
    }

    /// Read records from the process's standard input
    pub fn stdin(valid_chars: Option<&str>) -> Result<Self> {
        Self::open("-", Mode::Read, false, valid_chars)
    }

    /// Write records to the process's standard output
    pub fn stdout() -> Result<Self> {
        Self::open("-", Mode::Write, false, None)
    }

    /// Whether this handle serves reads
    pub fn readable(&self) -> bool {
        matches!(self.inner, Inner::Reader(_))
    }

    /// Whether this handle serves writes
    pub fn writable(&self) -> bool {
        matches!(self.inner, Inner::Writer(_))
    }

    fn parser_mut(&mut self) -> Result<&mut RecordParser> {
        match &mut self.inner {
            Inner::Reader(parser) => Ok(parser),
            Inner::Writer(_) => Err(SeqioError::InvalidMode(
                "handle was opened for writing".to_string(),
            )),
        }
    }

    fn writer_mut(&mut self) -> Result<&mut RecordWriter> {
        match &mut self.inner {
            Inner::Writer(writer) => Ok(writer),
            Inner::Reader(_) => Err(SeqioError::InvalidMode(
                "handle was opened for reading".to_string(),
            )),
        }
    }

    /// Read the next record, auto-sensing its format
    ///
    /// `Ok(None)` at end of stream, terminally.
    pub fn read_one(&mut self) -> Result<Option<SeqRecord>> {
        self.parser_mut()?.read_one()
    }

    /// Read the next record, requiring FASTA
    pub fn read_fasta(&mut self) -> Result<Option<SeqRecord>> {
        self.parser_mut()?.read_fasta()
    }

    /// Read the next record, requiring FASTQ
    pub fn read_fastq(&mut self) -> Result<Option<SeqRecord>> {
        self.parser_mut()?.read_fastq()
    }

    /// Iterate over the remaining records
    ///
    /// Each item is a [`Result`]; iteration naturally stops at end of
    /// stream. On a write handle every item is an
    /// [`SeqioError::InvalidMode`] error.
    pub fn records(&mut self) -> Records<'_> {
        Records { file: self }
    }

    /// Write one record from its parts
    ///
    /// Serialized as FASTQ when `quality` is present, FASTA otherwise.
    pub fn write_one(
        &mut self,
        name: &str,
        sequence: &[u8],
        quality: Option<&[u8]>,
        comment: Option<&str>,
    ) -> Result<()> {
        let mut record = SeqRecord::new(name, sequence.to_vec());
        if let Some(comment) = comment {
            record = record.with_comment(comment);
        }
        if let Some(quality) = quality {
            record = record.with_quality(quality.to_vec());
        }
        self.writer_mut()?.write_one(&record)
    }

    /// Write a record as FASTA, ignoring any quality it carries
    pub fn write_fasta(&mut self, record: &SeqRecord) -> Result<()> {
        self.writer_mut()?.write_fasta(record)
    }

    /// Write a record as FASTQ; fails without touching the output when the
    /// quality length disagrees with the sequence length
    pub fn write_fastq(&mut self, record: &SeqRecord) -> Result<()> {
        self.writer_mut()?.write_fastq(record)
    }

    /// Write a record, dispatching on whether it carries quality
    pub fn write_record(&mut self, record: &SeqRecord) -> Result<()> {
        self.writer_mut()?.write_one(record)
    }

    /// Format sensed so far on a read handle
    ///
    /// `None` before the first record boundary has been seen, and always
    /// `None` on write handles.
    pub fn format(&self) -> Option<Format> {
        match &self.inner {
            Inner::Reader(parser) => parser.format(),
            Inner::Writer(_) => None,
        }
    }

    /// Cumulative bytes through the handle
    ///
    /// Decoded bytes consumed for readers, uncompressed bytes accepted for
    /// writers. Zeroed by [`SeqFile::reset`].
    pub fn tell(&self) -> u64 {
        match &self.inner {
            Inner::Reader(parser) => parser.tell(),
            Inner::Writer(writer) => writer.tell(),
        }
    }

    /// Total byte length of the underlying resource, when known
    ///
    /// Known only for file-backed read handles; `None` for standard
    /// streams and for write handles, whose resource is still being
    /// produced.
    pub fn size(&self) -> Option<u64> {
        match &self.inner {
            Inner::Reader(parser) => parser.size(),
            Inner::Writer(_) => None,
        }
    }

    /// Rewind a read handle to the start of its resource
    ///
    /// After a reset the next read yields the first record again.
    ///
    /// # Errors
    ///
    /// [`SeqioError::UnsupportedOperation`] on write handles, standard
    /// input, or a closed handle.
    pub fn reset(&mut self) -> Result<()> {
        match &mut self.inner {
            Inner::Reader(parser) => parser.reset(),
            Inner::Writer(_) => Err(SeqioError::UnsupportedOperation(
                "reset on a write handle".to_string(),
            )),
        }
    }

    /// Force buffered output down on a write handle
    ///
    /// A no-op on read handles and on closed handles.
    pub fn flush(&mut self) -> Result<()> {
        match &mut self.inner {
            Inner::Reader(_) => Ok(()),
            Inner::Writer(writer) => writer.flush(),
        }
    }

    /// Whether the handle has not been closed yet
    pub fn is_open(&self) -> bool {
        match &self.inner {
            Inner::Reader(parser) => parser.is_open(),
            Inner::Writer(writer) => writer.is_open(),
        }
    }

    /// Release the underlying resource; closing twice is a no-op
    ///
    /// On a write handle this flushes and finalizes any gzip stream.
    pub fn close(&mut self) -> Result<()> {
        match &mut self.inner {
            Inner::Reader(parser) => {
                parser.close();
                Ok(())
            }
            Inner::Writer(writer) => writer.close(),
        }
    }
}

/// Iterator over the remaining records of a read handle
///
/// Returned by [`SeqFile::records`].
pub struct Records<'a> {
    file: &'a mut SeqFile,
}

impl Iterator for Records<'_> {
    type Item = Result<SeqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.file.read_one() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
