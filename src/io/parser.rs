//! Streaming FASTA/FASTQ parser
//!
//! [`RecordParser`] consumes a [`ByteSource`] and emits [`SeqRecord`]
//! values on demand. The format is sensed from the marker byte at each
//! record boundary (`>` FASTA, `@` FASTQ) and drives an explicit state
//! walk: boundary, header, sequence body, and for FASTQ the `+` quality
//! header and quality body. A record is either emitted complete and
//! validated, or the call fails; no partial record is ever returned.
//!
//! Offsets are byte-exact: after each emitted record,
//! [`RecordParser::tell`] equals the decoded bytes consumed through the
//! end of that record, and the marker that terminates a FASTA body is
//! left unconsumed for the next call.

use crate::error::{Result, SeqioError};
use crate::io::source::ByteSource;
use crate::record::SeqRecord;
use std::io::BufRead;

/// Record format sensed from the marker byte at a record boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `>`-marked records: header line plus one or more sequence lines
    Fasta,
    /// `@`-marked records: header, sequence, `+` separator, quality
    Fastq,
}

/// Byte membership table built from a configured valid-character string
#[derive(Clone)]
struct CharSet {
    allowed: [bool; 256],
}

impl CharSet {
    /// Empty input means "no restriction" and yields `None`.
    fn new(chars: &str) -> Option<Self> {
        if chars.is_empty() {
            return None;
        }
        let mut allowed = [false; 256];
        for &byte in chars.as_bytes() {
            allowed[byte as usize] = true;
        }
        Some(Self { allowed })
    }

    fn contains(&self, byte: u8) -> bool {
        self.allowed[byte as usize]
    }
}

/// Streaming parser emitting one record per call
///
/// # Example
///
/// ```no_run
/// use seqio::{ByteSource, RecordParser};
///
/// # fn main() -> seqio::Result<()> {
/// let source = ByteSource::from_path("reads.fq.gz")?;
/// let mut parser = RecordParser::new(source, None);
///
/// while let Some(record) = parser.read_one()? {
///     println!("{}: {} bp at offset {}", record.name, record.len(), parser.tell());
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecordParser {
    source: ByteSource,
    format: Option<Format>,
    valid_chars: Option<CharSet>,
    at_end: bool,
    /// Set after a mid-record failure; parsing does not resume mid-record.
    poisoned: bool,
    /// Reusable line buffer, terminator stripped
    line: Vec<u8>,
    line_number: usize,
}

impl RecordParser {
    /// Create a parser over a source
    ///
    /// A non-empty `valid_chars` restricts which sequence bytes are
    /// accepted; any byte outside the set fails the parse with
    /// [`SeqioError::InvalidCharacter`].
    pub fn new(source: ByteSource, valid_chars: Option<&str>) -> Self {
        Self {
            source,
            format: None,
            valid_chars: valid_chars.and_then(CharSet::new),
            at_end: false,
            poisoned: false,
            line: Vec::with_capacity(256),
            line_number: 0,
        }
    }

    /// Format sensed so far, `None` before the first record boundary
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Cumulative decoded bytes consumed since open or the last reset
    pub fn tell(&self) -> u64 {
        self.source.tell()
    }

    /// Total byte length of the underlying resource, when known
    pub fn size(&self) -> Option<u64> {
        self.source.size()
    }

    /// Whether the underlying source has not been closed
    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    /// Release the underlying source; idempotent
    pub fn close(&mut self) {
        self.source.close();
    }

    /// Rewind the source and return the state machine to the boundary
    ///
    /// Two passes over a freshly reset source yield identical records.
    /// Fails under the same conditions as [`ByteSource::reset`].
    pub fn reset(&mut self) -> Result<()> {
        self.source.reset()?;
        self.format = None;
        self.at_end = false;
        self.poisoned = false;
        self.line_number = 0;
        Ok(())
    }

    /// Read the next record, auto-sensing its format
    ///
    /// Returns `Ok(None)` at end of stream, and keeps returning it once
    /// the end has been reached.
    pub fn read_one(&mut self) -> Result<Option<SeqRecord>> {
        let format = match self.peek_format()? {
            None => return Ok(None),
            Some(format) => format,
        };
        let result = match format {
            Format::Fasta => self.parse_fasta_record(),
            Format::Fastq => self.parse_fastq_record(),
        };
        match result {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                self.poisoned = true;
                Err(e)
            }
        }
    }

    /// Read the next record, requiring FASTA
    ///
    /// # Errors
    ///
    /// [`SeqioError::InvalidFormat`] when the sensed marker is FASTQ.
    pub fn read_fasta(&mut self) -> Result<Option<SeqRecord>> {
        match self.peek_format()? {
            None => Ok(None),
            Some(Format::Fasta) => self.read_one(),
            Some(Format::Fastq) => Err(SeqioError::InvalidFormat {
                line: self.line_number + 1,
                msg: "requested FASTA but the stream holds a FASTQ record".to_string(),
            }),
        }
    }

    /// Read the next record, requiring FASTQ
    ///
    /// # Errors
    ///
    /// [`SeqioError::InvalidFormat`] when the sensed marker is FASTA.
    pub fn read_fastq(&mut self) -> Result<Option<SeqRecord>> {
        match self.peek_format()? {
            None => Ok(None),
            Some(Format::Fastq) => self.read_one(),
            Some(Format::Fasta) => Err(SeqioError::InvalidFormat {
                line: self.line_number + 1,
                msg: "requested FASTQ but the stream holds a FASTA record".to_string(),
            }),
        }
    }

    /// Advance past blank lines to the next record boundary and sense the
    /// format without consuming the marker
    ///
    /// Returns `None` once the end of the stream has been reached.
    pub fn peek_format(&mut self) -> Result<Option<Format>> {
        if !self.source.is_open() {
            return Err(SeqioError::ClosedHandle(
                "read on a closed handle".to_string(),
            ));
        }
        if self.poisoned {
            return Err(SeqioError::InvalidFormat {
                line: self.line_number,
                msg: "parser aborted by an earlier error".to_string(),
            });
        }
        if self.at_end {
            return Ok(None);
        }
        loop {
            match self.source.peek_byte()? {
                None => {
                    self.at_end = true;
                    return Ok(None);
                }
                Some(b'\n') => {
                    self.source.consume(1);
                    self.line_number += 1;
                }
                Some(b'\r') => {
                    self.source.consume(1);
                }
                Some(b'>') => {
                    self.format.get_or_insert(Format::Fasta);
                    return Ok(Some(Format::Fasta));
                }
                Some(b'@') => {
                    self.format.get_or_insert(Format::Fastq);
                    return Ok(Some(Format::Fastq));
                }
                Some(other) => {
                    return Err(SeqioError::InvalidFormat {
                        line: self.line_number + 1,
                        msg: format!(
                            "expected '>' or '@' record marker, got '{}'",
                            other as char
                        ),
                    });
                }
            }
        }
    }

    /// Read the next line into the reusable buffer, stripping the trailing
    /// `\n` and any `\r` before it. Returns `false` at end of stream.
    fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self.source.read_until(b'\n', &mut self.line)?;
        if n == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        Ok(true)
    }

    /// Consume the header line (marker byte included) and split it into
    /// the name token and the trimmed comment remainder
    fn read_header(&mut self) -> Result<(String, Option<String>)> {
        if !self.next_line()? {
            return Err(SeqioError::InvalidFormat {
                line: self.line_number,
                msg: "stream ended at a record marker".to_string(),
            });
        }
        let header = String::from_utf8_lossy(&self.line[1..]).into_owned();
        let mut parts = header.splitn(2, [' ', '\t']);
        let name = parts.next().unwrap_or("").to_string();
        let comment = parts
            .next()
            .map(|rest| rest.trim().to_string())
            .filter(|rest| !rest.is_empty());
        Ok((name, comment))
    }

    fn validate_line(&self, line_number: usize, bytes: &[u8]) -> Result<()> {
        if let Some(valid) = &self.valid_chars {
            for &byte in bytes {
                if !valid.contains(byte) {
                    return Err(SeqioError::InvalidCharacter {
                        byte,
                        line: line_number,
                    });
                }
            }
        }
        Ok(())
    }

    /// Header, then sequence lines until a `>` at line start or end of
    /// stream; the terminating marker belongs to the next record.
    fn parse_fasta_record(&mut self) -> Result<SeqRecord> {
        let (name, comment) = self.read_header()?;
        let mut sequence = Vec::new();
        loop {
            match self.source.peek_byte()? {
                None | Some(b'>') => break,
                _ => {
                    if !self.next_line()? {
                        break;
                    }
                    self.validate_line(self.line_number, &self.line)?;
                    sequence.extend_from_slice(&self.line);
                }
            }
        }
        Ok(SeqRecord {
            name,
            comment,
            sequence,
            quality: None,
        })
    }

    /// Header, sequence lines until the `+` separator, the separator line
    /// itself (contents discarded), then quality bytes until they reach the
    /// sequence length.
    fn parse_fastq_record(&mut self) -> Result<SeqRecord> {
        let (name, comment) = self.read_header()?;
        let mut sequence = Vec::new();
        loop {
            match self.source.peek_byte()? {
                None => {
                    return Err(SeqioError::InvalidFormat {
                        line: self.line_number,
                        msg: format!("record '{}' ended before its '+' quality header", name),
                    });
                }
                Some(b'+') => break,
                _ => {
                    if !self.next_line()? {
                        return Err(SeqioError::InvalidFormat {
                            line: self.line_number,
                            msg: format!("record '{}' ended before its '+' quality header", name),
                        });
                    }
                    self.validate_line(self.line_number, &self.line)?;
                    sequence.extend_from_slice(&self.line);
                }
            }
        }
        // '+' separator line; any text after the marker is discarded
        self.next_line()?;
        let mut quality = Vec::new();
        while quality.len() < sequence.len() {
            if !self.next_line()? {
                return Err(SeqioError::InvalidFormat {
                    line: self.line_number,
                    msg: format!(
                        "record '{}' ended with {} of {} quality bytes",
                        name,
                        quality.len(),
                        sequence.len()
                    ),
                });
            }
            quality.extend_from_slice(&self.line);
        }
        if quality.len() != sequence.len() {
            return Err(SeqioError::LengthMismatch {
                sequence: sequence.len(),
                quality: quality.len(),
            });
        }
        Ok(SeqRecord {
            name,
            comment,
            sequence,
            quality: Some(quality),
        })
    }
}

impl Iterator for RecordParser {
    type Item = Result<SeqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_one() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
