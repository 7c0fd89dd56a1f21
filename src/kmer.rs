//! Lazy sliding-window k-mer iteration
//!
//! A [`Kmers`] value is created from [`SeqRecord::kmers`] and owns a copy
//! of the sequence taken at creation time. It is a plain finite iterator:
//! single pass, stride 1, `N - k + 1` windows for a sequence of length `N`.
//!
//! [`SeqRecord::kmers`]: crate::SeqRecord::kmers

/// Lazy iterator over overlapping fixed-length windows of a sequence
///
/// The sequence text is captured, not referenced: later mutation of the
/// record that produced this iterator has no effect on it. A consumed
/// iterator is not restartable; call [`SeqRecord::kmers`] again for a
/// fresh pass.
///
/// [`SeqRecord::kmers`]: crate::SeqRecord::kmers
///
/// # Examples
///
/// ```
/// use seqio::SeqRecord;
///
/// # fn main() -> seqio::Result<()> {
/// let record = SeqRecord::new("r", b"ATGCATGC".to_vec());
/// let kmers: Vec<_> = record.kmers(3)?.collect();
///
/// assert_eq!(kmers.len(), 6);
/// assert_eq!(kmers[0], b"ATG");
/// assert_eq!(kmers[5], b"TGC");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Kmers {
    sequence: Vec<u8>,
    k: usize,
    index: usize,
}

impl Kmers {
    /// Invariant upheld by the caller: `1 <= k <= sequence.len()`.
    pub(crate) fn new(sequence: Vec<u8>, k: usize) -> Self {
        debug_assert!(k >= 1 && k <= sequence.len());
        Self {
            sequence,
            k,
            index: 0,
        }
    }

    /// Window length this iterator was created with
    pub fn k(&self) -> usize {
        self.k
    }
}

impl Iterator for Kmers {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index + self.k > self.sequence.len() {
            return None;
        }
        let kmer = self.sequence[self.index..self.index + self.k].to_vec();
        self.index += 1;
        Some(kmer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.sequence.len() + 1).saturating_sub(self.k + self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Kmers {}
