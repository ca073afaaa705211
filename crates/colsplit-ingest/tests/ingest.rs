use std::fs;
use std::path::PathBuf;

use colsplit_ingest::{DetectedEncoding, IngestOptions, read_csv_file};

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("colsplit_ingest_{stamp}_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn loads_spreadsheet_export() {
    let path = temp_file(
        "contacts.csv",
        b"\xEF\xBB\xBFLast Name,email,First Name,Phone\r\n\
          Doe,jd@example.com,John,555-0100\r\n\
          Roe,,Rita,\r\n",
    );
    let loaded = read_csv_file(&path, &IngestOptions::default()).expect("read csv");

    assert_eq!(loaded.encoding, DetectedEncoding::Utf8Bom);
    assert_eq!(
        loaded.columns,
        vec!["email", "First Name", "Last Name", "Phone"]
    );
    assert_eq!(loaded.total_rows(), 2);
    assert_eq!(loaded.base_name().as_deref(), Some("contacts"));

    let second = loaded.dataset.record(1).expect("second row");
    assert_eq!(second.get("First Name"), Some("Rita"));
    assert_eq!(second.get("email"), Some(""));

    cleanup(&path);
}

#[test]
fn loads_tab_separated_file() {
    let path = temp_file("report.tsv", b"id\tscore\n1\t9.5\n2\t7\n");
    let loaded = read_csv_file(&path, &IngestOptions::default()).expect("read tsv");

    assert_eq!(loaded.delimiter, b'\t');
    assert_eq!(loaded.columns, vec!["id", "score"]);
    assert_eq!(loaded.dataset.record(0).and_then(|r| r.get("score")), Some("9.5"));

    cleanup(&path);
}

#[test]
fn header_only_file_has_columns_and_no_rows() {
    let path = temp_file("empty.csv", b"zeta,Alpha,beta\n");
    let loaded = read_csv_file(&path, &IngestOptions::default()).expect("read csv");

    assert_eq!(loaded.columns, vec!["Alpha", "beta", "zeta"]);
    assert_eq!(loaded.total_rows(), 0);

    cleanup(&path);
}

#[test]
fn multiline_quoted_cells_stay_in_one_record() {
    let path = temp_file("notes.csv", b"id,note\n1,\"line one\nline two\"\n2,plain\n");
    let loaded = read_csv_file(&path, &IngestOptions::default()).expect("read csv");

    assert_eq!(loaded.total_rows(), 2);
    assert_eq!(
        loaded.dataset.record(0).and_then(|r| r.get("note")),
        Some("line one\nline two")
    );

    cleanup(&path);
}
