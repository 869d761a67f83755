//! Output file tests: CSV and JSON written to disk and read back.

use page_details::export::write_records;
use page_details::{OutputFormat, PageRecord};

#[path = "helpers.rs"]
mod helpers;

use helpers::extracted_record;

#[test]
fn test_csv_output_header_and_rows() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("out.csv");

    let mut failed = PageRecord::new("https://example.com/gone");
    failed.http_code = Some(404);
    failed.http_type = "Request Error (HTTPError)".to_string();
    failed.error = "Skipped".to_string();
    let records = vec![
        extracted_record("https://example.com/docs/intro", "Intro"),
        failed,
    ];

    write_records(&path, &records, OutputFormat::Csv).expect("CSV export should succeed");

    let mut reader = csv::Reader::from_path(&path).expect("should open CSV output");
    let headers: Vec<String> = reader
        .headers()
        .expect("should have headers")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, PageRecord::FIELD_NAMES.to_vec());

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows should parse");
    assert_eq!(rows.len(), 2);

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .unwrap_or_else(|| panic!("missing column {name}"))
    };
    assert_eq!(&rows[0][column("httpCode")], "200");
    assert_eq!(&rows[0][column("title")], "Intro");
    assert_eq!(&rows[0][column("scopeLinksInternal")], "5");
    assert_eq!(&rows[1][column("httpCode")], "404");
    assert_eq!(&rows[1][column("httpType")], "Request Error (HTTPError)");
    assert_eq!(&rows[1][column("scopeSelector")], "");
}

#[test]
fn test_json_output_is_array_of_records() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("out.json");
    let records = vec![extracted_record("https://example.com/", "Home")];

    write_records(&path, &records, OutputFormat::Json).expect("JSON export should succeed");

    let content = std::fs::read_to_string(&path).expect("should read JSON output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    let array = value.as_array().expect("top level should be an array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["url"], "https://example.com/");
    assert_eq!(array[0]["scopeH1"], "Home");
    assert_eq!(array[0]["contentCount"], serde_json::Value::Null);
    for key in PageRecord::FIELD_NAMES {
        assert!(array[0].get(key).is_some(), "missing key {key}");
    }
}
