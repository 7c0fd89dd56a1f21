//! seqio: streaming FASTA/FASTQ reader and writer with transparent gzip
//!
//! # Overview
//!
//! seqio reads and writes sequence files one record at a time in constant
//! memory, over plain or gzip-compressed files and the standard streams.
//! The format of each record is sensed from its marker byte, so FASTA and
//! FASTQ (and mixed streams) go through the same read path.
//!
//! ## Key Features
//!
//! - **Streaming**: one record in memory at a time, any file size
//! - **Transparent gzip**: suffix-inferred or forced, on both ends
//! - **Byte-exact offsets**: `tell()` after each record, `reset()` to rewind
//! - **Record operations**: case folding, reversal, homopolymer
//!   compression, substrings, k-mer iteration
//!
//! ## Quick Start
//!
//! ```no_run
//! use seqio::SeqFile;
//!
//! # fn main() -> seqio::Result<()> {
//! let mut file = SeqFile::reader("reads.fq.gz")?;
//!
//! for record in file.records() {
//!     let record = record?;
//!     println!("{}\t{}", record.name, record.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`file`]: the [`SeqFile`] handle (open modes, standard streams)
//! - [`io`]: byte sources/sinks and the streaming record codecs
//! - [`record`]: the [`SeqRecord`] type and its derived operations
//! - [`kmer`]: lazy sliding-window k-mer iteration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod file;
pub mod io;
pub mod kmer;
pub mod record;

// Re-export commonly used types
pub use error::{Result, SeqioError};
pub use file::{Mode, Records, SeqFile};
pub use io::{ByteSink, ByteSource, Format, RecordParser, RecordWriter, SinkTarget, SourceTarget};
pub use kmer::Kmers;
pub use record::SeqRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
