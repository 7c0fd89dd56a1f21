//! Byte streams and streaming record codecs
//!
//! Two layers live here. The byte layer ([`ByteSource`], [`ByteSink`])
//! hides where bytes come from or go (file or standard stream) and whether
//! they pass through gzip. The record layer ([`RecordParser`],
//! [`RecordWriter`]) turns those byte streams into [`SeqRecord`] values
//! and back.
//!
//! [`SeqRecord`]: crate::SeqRecord

mod parser;
mod sink;
mod source;
mod writer;

pub use parser::{Format, RecordParser};
pub use sink::{ByteSink, SinkTarget};
pub use source::{ByteSource, SourceTarget};
pub use writer::RecordWriter;
