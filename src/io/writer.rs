//! Streaming FASTA/FASTQ writer
//!
//! [`RecordWriter`] serializes [`SeqRecord`] values onto a [`ByteSink`].
//! FASTA records are written with the sequence on a single line; FASTQ
//! records use the four-line layout with a bare `+` separator. A FASTQ
//! record whose quality length disagrees with its sequence length is
//! rejected before any byte reaches the sink.

use crate::error::{Result, SeqioError};
use crate::io::sink::ByteSink;
use crate::record::SeqRecord;

/// Streaming writer serializing one record per call
///
/// # Example
///
/// ```no_run
/// use seqio::{ByteSink, RecordWriter, SeqRecord};
///
/// # fn main() -> seqio::Result<()> {
/// let sink = ByteSink::from_path("out.fa.gz")?;
/// let mut writer = RecordWriter::new(sink);
///
/// let record = SeqRecord::new("read1", b"ACGT".to_vec());
/// writer.write_fasta(&record)?;
/// writer.close()?;
/// # Ok(())
/// # }
/// ```
pub struct RecordWriter {
    sink: ByteSink,
}

impl RecordWriter {
    /// Create a writer over a sink
    pub fn new(sink: ByteSink) -> Self {
        Self { sink }
    }

    /// Cumulative uncompressed bytes written since open
    pub fn tell(&self) -> u64 {
        self.sink.tell()
    }

    /// Whether the underlying sink has not been closed
    pub fn is_open(&self) -> bool {
        self.sink.is_open()
    }

    /// Serialize a record as FASTA, ignoring any quality it carries
    ///
    /// Layout: `>name[ comment]\n` then the whole sequence on one line.
    pub fn write_fasta(&mut self, record: &SeqRecord) -> Result<()> {
        self.write_header(b'>', record)?;
        self.sink.write_bytes(&record.sequence)?;
        self.sink.write_bytes(b"\n")
    }

    /// Serialize a record as FASTQ
    ///
    /// A record without quality, or with quality of a different length
    /// than its sequence, fails with [`SeqioError::LengthMismatch`] before
    /// anything is written.
    pub fn write_fastq(&mut self, record: &SeqRecord) -> Result<()> {
        let quality = record.quality.as_deref().unwrap_or(&[]);
        if quality.len() != record.sequence.len() {
            return Err(SeqioError::LengthMismatch {
                sequence: record.sequence.len(),
                quality: quality.len(),
            });
        }
        self.write_header(b'@', record)?;
        self.sink.write_bytes(&record.sequence)?;
        self.sink.write_bytes(b"\n+\n")?;
        self.sink.write_bytes(quality)?;
        self.sink.write_bytes(b"\n")
    }

    /// Serialize a record, picking FASTQ when it carries quality and FASTA
    /// otherwise
    pub fn write_one(&mut self, record: &SeqRecord) -> Result<()> {
        if record.quality.is_some() {
            self.write_fastq(record)
        } else {
            self.write_fasta(record)
        }
    }

    fn write_header(&mut self, marker: u8, record: &SeqRecord) -> Result<()> {
        self.sink.write_bytes(&[marker])?;
        self.sink.write_bytes(record.name.as_bytes())?;
        if let Some(comment) = record.comment.as_deref() {
            if !comment.is_empty() {
                self.sink.write_bytes(b" ")?;
                self.sink.write_bytes(comment.as_bytes())?;
            }
        }
        self.sink.write_bytes(b"\n")
    }

    /// Force buffered output down; a no-op once closed
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Flush, finalize any gzip stream, and release the sink; idempotent
    pub fn close(&mut self) -> Result<()> {
        self.sink.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::sink::SinkTarget;

    fn writer_to(path: &std::path::Path) -> RecordWriter {
        RecordWriter::new(ByteSink::open(SinkTarget::from_path(path), false).unwrap())
    }

    #[test]
    fn test_fasta_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fa");

        let mut writer = writer_to(&path);
        writer
            .write_fasta(&SeqRecord::new("read1", b"ACGT".to_vec()).with_comment("sample=7"))
            .unwrap();
        writer
            .write_fasta(&SeqRecord::new("read2", b"GATTACA".to_vec()))
            .unwrap();
        writer.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ">read1 sample=7\nACGT\n>read2\nGATTACA\n");
    }

    #[test]
    fn test_fastq_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fq");

        let mut writer = writer_to(&path);
        let record = SeqRecord::new("read1", b"GATTACA".to_vec())
            .with_quality(b"IIIIIII".to_vec());
        writer.write_fastq(&record).unwrap();
        writer.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "@read1\nGATTACA\n+\nIIIIIII\n");
    }

    #[test]
    fn test_write_one_dispatches_on_quality() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut writer = writer_to(&path);
        writer
            .write_one(&SeqRecord::new("a", b"ACGT".to_vec()))
            .unwrap();
        writer
            .write_one(&SeqRecord::new("b", b"TT".to_vec()).with_quality(b"II".to_vec()))
            .unwrap();
        writer.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ">a\nACGT\n@b\nTT\n+\nII\n");
    }

    #[test]
    fn test_fastq_length_mismatch_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fq");

        let mut writer = writer_to(&path);
        // 13 sequence bytes, 12 quality bytes
        let record = SeqRecord::new("bad", b"ACGGGGGGGTTTT".to_vec())
            .with_quality(b"IIIIIIIIIIII".to_vec());
        let result = writer.write_fastq(&record);
        assert!(matches!(
            result,
            Err(SeqioError::LengthMismatch {
                sequence: 13,
                quality: 12
            })
        ));
        assert_eq!(writer.tell(), 0);

        // Missing quality is the same failure for the FASTQ path
        let result = writer.write_fastq(&SeqRecord::new("bad2", b"AC".to_vec()));
        assert!(matches!(result, Err(SeqioError::LengthMismatch { .. })));

        writer.close().unwrap();
        let content = std::fs::read(&path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_fasta_ignores_quality() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.fa");

        let mut writer = writer_to(&path);
        let record = SeqRecord::new("r", b"ACGT".to_vec()).with_quality(b"IIII".to_vec());
        writer.write_fasta(&record).unwrap();
        writer.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ">r\nACGT\n");
    }
}
