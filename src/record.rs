//! Sequence record type and derived operations
//!
//! A [`SeqRecord`] is a fully detached copy of one FASTA/FASTQ record: it
//! holds no reference to the file or stream that produced it, and two
//! records with identical fields compare equal. The derived operations
//! (case folding, reversal, homopolymer compression, substring extraction,
//! k-mer enumeration) are plain methods over the stored bytes.

use crate::error::{Result, SeqioError};
use crate::kmer::Kmers;

/// One FASTA or FASTQ record
///
/// Fields are public and freely mutable; [`SeqRecord::len`] always reflects
/// the current sequence, with no cached state to invalidate.
///
/// # Examples
///
/// ```
/// use seqio::SeqRecord;
///
/// let mut record = SeqRecord::new("read1", b"ACGGGGGGGTTTT".to_vec());
/// assert_eq!(record.len(), 13);
/// assert_eq!(record.hpc_compress(), b"ACGT");
///
/// record.sequence = b"ACGT".to_vec();
/// assert_eq!(record.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    /// Record identifier (first whitespace-delimited token of the header,
    /// without the `>`/`@` marker)
    pub name: String,
    /// Remainder of the header line after the name; `None` and `Some("")`
    /// are equivalent
    pub comment: Option<String>,
    /// Base sequence
    pub sequence: Vec<u8>,
    /// Quality scores, present only for FASTQ records
    pub quality: Option<Vec<u8>>,
}

impl SeqRecord {
    /// Create a new record with no comment or quality
    pub fn new(name: impl Into<String>, sequence: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            sequence,
            quality: None,
        }
    }

    /// Attach a header comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = if comment.is_empty() {
            None
        } else {
            Some(comment)
        };
        self
    }

    /// Attach a quality string
    pub fn with_quality(mut self, quality: Vec<u8>) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Character count of the sequence
    ///
    /// Recomputed on every call, so it is coherent immediately after any
    /// mutation of [`SeqRecord::sequence`].
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the record has an empty sequence
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Sequence with all letters uppercased; non-letters pass through
    pub fn upper(&self) -> Vec<u8> {
        self.sequence.to_ascii_uppercase()
    }

    /// Sequence with all letters lowercased; non-letters pass through
    pub fn lower(&self) -> Vec<u8> {
        self.sequence.to_ascii_lowercase()
    }

    /// Uppercase the stored sequence in place
    pub fn make_upper(&mut self) {
        self.sequence.make_ascii_uppercase();
    }

    /// Lowercase the stored sequence in place
    pub fn make_lower(&mut self) {
        self.sequence.make_ascii_lowercase();
    }

    /// Sequence with byte order reversed (not a complement)
    ///
    /// # Examples
    ///
    /// ```
    /// use seqio::SeqRecord;
    ///
    /// let record = SeqRecord::new("r", b"ACGGGGGGGTTTT".to_vec());
    /// assert_eq!(record.reverse(), b"TTTTGGGGGGGCA");
    /// ```
    pub fn reverse(&self) -> Vec<u8> {
        self.sequence.iter().rev().copied().collect()
    }

    /// Reverse the stored sequence in place
    pub fn make_reverse(&mut self) {
        self.sequence.reverse();
    }

    /// Homopolymer-run compression
    ///
    /// Collapses each maximal run of an identical byte to a single
    /// occurrence (`AACCCGT` → `ACGT`). Returns the compressed copy; the
    /// stored sequence is never mutated.
    pub fn hpc_compress(&self) -> Vec<u8> {
        let mut compressed = Vec::with_capacity(self.sequence.len());
        let mut last: Option<u8> = None;
        for &base in &self.sequence {
            if last != Some(base) {
                compressed.push(base);
                last = Some(base);
            }
        }
        compressed
    }

    /// Substring `[start, start + length)`
    ///
    /// # Errors
    ///
    /// Returns [`SeqioError::OutOfRange`] when the window extends past the
    /// end of the sequence.
    pub fn subseq(&self, start: usize, length: usize) -> Result<Vec<u8>> {
        let end = start.checked_add(length).ok_or(SeqioError::OutOfRange {
            start,
            end: usize::MAX,
            len: self.len(),
        })?;
        if end > self.len() {
            return Err(SeqioError::OutOfRange {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(self.sequence[start..end].to_vec())
    }

    /// Lazy k-mer windows over the current sequence value
    ///
    /// The sequence is captured at call time: mutating
    /// [`SeqRecord::sequence`] afterwards does not affect an already
    /// created [`Kmers`].
    ///
    /// # Errors
    ///
    /// Returns [`SeqioError::InvalidArgument`] if `k == 0` or
    /// `k > self.len()`. With `k == self.len()` the iterator yields exactly
    /// one element equal to the whole sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqio::SeqRecord;
    ///
    /// # fn main() -> seqio::Result<()> {
    /// let record = SeqRecord::new("r", b"ATGCAT".to_vec());
    /// let kmers: Vec<_> = record.kmers(3)?.collect();
    /// assert_eq!(kmers.len(), 4);
    /// assert_eq!(kmers[0], b"ATG");
    /// # Ok(())
    /// # }
    /// ```
    pub fn kmers(&self, k: usize) -> Result<Kmers> {
        if k == 0 {
            return Err(SeqioError::InvalidArgument(
                "k-mer window must be at least 1".to_string(),
            ));
        }
        if k > self.len() {
            return Err(SeqioError::InvalidArgument(format!(
                "k-mer window ({}) exceeds record length ({})",
                k,
                self.len()
            )));
        }
        Ok(Kmers::new(self.sequence.clone(), k))
    }
}
