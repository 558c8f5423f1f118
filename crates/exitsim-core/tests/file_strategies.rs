//! File strategy tests for exitsim core.
// crates/exitsim-core/tests/file_strategies.rs
// ============================================================================
// Module: File Strategy Tests
// Description: Extension lookup and properties read/write coverage.
// Purpose: Ensure unsupported types fail early and bad values are dropped.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::float_cmp,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use exitsim_core::DiagnosticKind;
use exitsim_core::FileStrategyError;
use exitsim_core::IoContext;
use exitsim_core::PropertiesFile;
use exitsim_core::RecordingDiagnosticSink;
use exitsim_core::files::OUTPUT_HEADER;
use exitsim_core::reader_for_path;
use exitsim_core::writer_for_path;

// ============================================================================
// SECTION: Strategy Lookup
// ============================================================================

#[test]
fn readers_exist_for_text_properties_and_ini() {
    for name in ["in.txt", "in.properties", "in.ini"] {
        assert!(reader_for_path(Path::new(name)).is_ok(), "{name}");
    }
}

#[test]
fn text_files_are_not_writable() {
    let err = writer_for_path(Path::new("out.txt")).err().expect("unsupported");
    assert!(matches!(
        err,
        FileStrategyError::UnsupportedFileType { direction: "write", ref extension } if extension == "txt"
    ));
}

#[test]
fn unknown_extensions_are_rejected() {
    let err = reader_for_path(Path::new("in.json")).err().expect("unsupported");
    assert_eq!(err.to_string(), "no strategy to read files with extension json");
}

#[test]
fn paths_without_extension_are_rejected() {
    let err = reader_for_path(Path::new("input")).err().expect("missing extension");
    assert!(matches!(err, FileStrategyError::MissingExtension(_)));
}

// ============================================================================
// SECTION: Properties Files
// ============================================================================

#[test]
fn parse_skips_comments_and_drops_non_numbers() {
    let sink = RecordingDiagnosticSink::new();
    let text = "# comment\n! also comment\n\nx1=1.5\n x2 = -2 \nname=alpha\nx3: 4e2\nflag\n";
    let values = PropertiesFile::parse(text, Path::new("in.properties"), &sink);

    assert_eq!(
        values,
        BTreeMap::from([
            ("x1".to_string(), 1.5),
            ("x2".to_string(), -2.0),
            ("x3".to_string(), 400.0),
        ])
    );
    let warnings = sink.events_of(DiagnosticKind::ConversionWarning);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].message.contains("'alpha'"), "message: {}", warnings[0].message);
}

#[test]
fn read_resolves_against_the_io_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("a/b")).expect("mkdir");
    fs::write(dir.path().join("a/b/c.properties"), "x1=0.25\n").expect("write input");
    let io = IoContext::new(dir.path());
    let sink = RecordingDiagnosticSink::new();

    let reader = reader_for_path(Path::new("a/b/c.properties")).expect("reader");
    let values = reader.read(&io, Path::new("a/b/c.properties"), &sink).expect("read");
    assert_eq!(values.get("x1"), Some(&0.25));
}

#[test]
fn read_tolerates_bytes_that_are_not_utf8() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("input.properties"), b"# caf\xe9 inputs\nx1=1\nx2=2\xe9\n")
        .expect("write input");
    let io = IoContext::new(dir.path());
    let sink = RecordingDiagnosticSink::new();

    let reader = reader_for_path(Path::new("input.properties")).expect("reader");
    let values = reader.read(&io, Path::new("input.properties"), &sink).expect("read");
    assert_eq!(values, BTreeMap::from([("x1".to_string(), 1.0)]));
    let warnings = sink.events_of(DiagnosticKind::ConversionWarning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].fields["key"], "x2");
}

#[test]
fn read_of_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let io = IoContext::new(dir.path());
    let sink = RecordingDiagnosticSink::new();

    let reader = reader_for_path(Path::new("absent.properties")).expect("reader");
    let err = reader.read(&io, Path::new("absent.properties"), &sink).expect_err("missing");
    assert!(matches!(err, FileStrategyError::Io { direction: "read", .. }));
}

#[test]
fn written_files_start_with_header_and_sort_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let io = IoContext::new(dir.path());
    let values = BTreeMap::from([("f2".to_string(), 0.5), ("f1".to_string(), 124.98)]);

    let writer = writer_for_path(Path::new("out.ini")).expect("writer");
    writer.write(&io, &values, Path::new("out.ini")).expect("write");

    let text = fs::read_to_string(dir.path().join("out.ini")).expect("read output");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![OUTPUT_HEADER, "f1=124.98", "f2=0.5"]);
}
