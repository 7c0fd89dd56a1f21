//! End-to-end tests over real files: write, read back, convert, rewind.

use seqio::{Format, Mode, Result, SeqFile, SeqRecord, SeqioError};
use std::io::Write;
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> String {
    let path = dir.path().join(name);
    std::fs::File::create(&path).unwrap().write_all(data).unwrap();
    path.to_str().unwrap().to_string()
}

fn sample_records(n: usize) -> Vec<SeqRecord> {
    (0..n)
        .map(|i| {
            let seq = b"ACGT".repeat(i + 1);
            let qual = vec![b'I'; seq.len()];
            SeqRecord::new(format!("read_{}", i), seq)
                .with_comment(format!("index={}", i))
                .with_quality(qual)
        })
        .collect()
}

#[test]
fn test_fastq_gz_to_fasta_conversion() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let fq_path = dir.path().join("reads.fq.gz");
    let fq_path = fq_path.to_str().unwrap();
    let fa_path = dir.path().join("reads.fa");
    let fa_path = fa_path.to_str().unwrap();

    let records = sample_records(5);
    let mut out = SeqFile::writer(fq_path).unwrap();
    for record in &records {
        out.write_fastq(record).unwrap();
    }
    out.close().unwrap();

    // Convert: read the gzip FASTQ, write plain FASTA
    let mut input = SeqFile::reader(fq_path).unwrap();
    let mut output = SeqFile::writer(fa_path).unwrap();
    let mut count = 0;
    while let Some(record) = input.read_one().unwrap() {
        output.write_fasta(&record).unwrap();
        count += 1;
    }
    assert_eq!(count, 5);
    assert_eq!(input.format(), Some(Format::Fastq));
    output.close().unwrap();

    let mut converted = SeqFile::reader(fa_path).unwrap();
    let got: Vec<_> = converted.records().collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(converted.format(), Some(Format::Fasta));
    assert_eq!(got.len(), 5);
    for (original, converted) in records.iter().zip(&got) {
        assert_eq!(converted.name, original.name);
        assert_eq!(converted.comment, original.comment);
        assert_eq!(converted.sequence, original.sequence);
        assert_eq!(converted.quality, None);
    }
}

#[test]
fn test_round_trip_preserves_records_plain_and_gzip() {
    init_logging();
    let dir = TempDir::new().unwrap();

    for (name, n) in [("a.fq", 0usize), ("b.fq", 1), ("c.fq.gz", 7), ("d.fq.gz", 0)] {
        let path = dir.path().join(name);
        let path = path.to_str().unwrap();
        let records = sample_records(n);

        let mut out = SeqFile::writer(path).unwrap();
        for record in &records {
            out.write_fastq(record).unwrap();
        }
        out.close().unwrap();

        let mut input = SeqFile::reader(path).unwrap();
        let got: Vec<_> = input.records().collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(got, records, "round trip through {}", name);
    }
}

#[test]
fn test_offsets_are_monotone_and_end_at_size() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "reads.fa",
        b">a\nACGT\n>b two words\nGATTACA\n>c\nTT\n",
    );

    let mut file = SeqFile::reader(&path).unwrap();
    assert_eq!(file.tell(), 0);

    let mut last = 0;
    while let Some(_record) = file.read_one().unwrap() {
        assert!(file.tell() >= last);
        last = file.tell();
    }
    // Uncompressed file: decoded offset equals on-disk size once drained
    assert_eq!(file.tell(), file.size().unwrap());
}

#[test]
fn test_reset_replays_gzip_stream() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reads.fq.gz");
    let path = path.to_str().unwrap();

    let records = sample_records(4);
    let mut out = SeqFile::writer(path).unwrap();
    for record in &records {
        out.write_fastq(record).unwrap();
    }
    out.close().unwrap();

    let mut input = SeqFile::reader(path).unwrap();
    let first: Vec<_> = input.records().collect::<Result<Vec<_>>>().unwrap();

    input.reset().unwrap();
    assert_eq!(input.tell(), 0);
    let second: Vec<_> = input.records().collect::<Result<Vec<_>>>().unwrap();

    assert_eq!(first, records);
    assert_eq!(second, records);
}

#[test]
fn test_mixed_format_stream_reads_per_record() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "mixed.txt", b">a\nACGT\n@b\nTT\n+\nII\n>c\nGG\n");

    let mut file = SeqFile::reader(&path).unwrap();
    let records: Vec<_> = file.records().collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].quality, None);
    assert_eq!(records[1].quality.as_deref(), Some(&b"II"[..]));
    assert_eq!(records[2].name, "c");
    // format() reports the first marker sensed
    assert_eq!(file.format(), Some(Format::Fasta));
}

#[test]
fn test_open_mode_parsing_and_misuse() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "in.fa", b">a\nACGT\n");

    let mode: Mode = "r".parse().unwrap();
    let mut file = SeqFile::open(&path, mode, false, None).unwrap();
    assert!(matches!(
        file.write_one("x", b"AC", None, None),
        Err(SeqioError::InvalidMode(_))
    ));
    assert_eq!(file.read_one().unwrap().unwrap().name, "a");

    let err = "rw".parse::<Mode>();
    assert!(matches!(err, Err(SeqioError::InvalidMode(_))));
}

#[test]
fn test_missing_input_file_is_io_error() {
    init_logging();
    let result = SeqFile::reader("/nonexistent/path/reads.fq");
    assert!(matches!(result, Err(SeqioError::Io(_))));
}

#[test]
fn test_forced_compression_flag() {
    init_logging();
    let dir = TempDir::new().unwrap();
    // No recognizable suffix; compression forced both ways
    let path = dir.path().join("opaque.dat");
    let path = path.to_str().unwrap();

    let mut out = SeqFile::open(path, Mode::Write, true, None).unwrap();
    out.write_one("r", b"GATTACA", Some(b"IIIIIII"), None).unwrap();
    out.close().unwrap();

    let raw = std::fs::read(path).unwrap();
    assert_eq!(&raw[..2], &[31, 139]);

    let mut input = SeqFile::open(path, Mode::Read, true, None).unwrap();
    let record = input.read_fastq().unwrap().unwrap();
    assert_eq!(record.sequence, b"GATTACA");
    assert!(input.read_one().unwrap().is_none());
}

#[test]
fn test_derived_operations_on_parsed_record() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "in.fa", b">r\nACGGGGGGGTTTT\n");

    let mut file = SeqFile::reader(&path).unwrap();
    let record = file.read_fasta().unwrap().unwrap();

    assert_eq!(record.len(), 13);
    assert_eq!(record.hpc_compress(), b"ACGT");
    assert_eq!(record.reverse(), b"TTTTGGGGGGGCA");
    assert_eq!(record.subseq(2, 5).unwrap(), b"GGGGG");
    let kmers: Vec<_> = record.kmers(12).unwrap().collect();
    assert_eq!(kmers, vec![b"ACGGGGGGGTTT".to_vec(), b"CGGGGGGGTTTT".to_vec()]);
}
