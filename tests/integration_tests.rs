use delimwrite::{
    encode, table, to_path, to_string, to_string_with_options, to_writer_with_options, Column,
    DelimOptions, Delimiter, Error, Table,
};
use std::fs;

fn mixed_table() -> Table {
    table! {
        "flag" => vec![Some(true), Some(false), None],
        "count" => vec![Some(10), Some(-3), None],
        "value" => vec![Some(0.25), Some(f64::NAN), None],
        "label" => vec![Some("plain"), Some("with \"quotes\""), None],
    }
}

#[test]
fn test_mixed_types() {
    let csv = to_string(&mixed_table()).unwrap();
    println!("Mixed table:\n{}", csv);

    assert_eq!(
        csv,
        "flag,count,value,label\n\
         TRUE,10,0.25,plain\n\
         FALSE,-3,NaN,\"with \"\"quotes\"\"\"\n\
         NA,NA,NA,NA\n"
    );
}

#[test]
fn test_header_toggle_line_counts() {
    let data = table! { "a" => vec![1], "b" => vec!["x"] };

    let without = to_string_with_options(&data, &DelimOptions::new().with_header(false)).unwrap();
    assert_eq!(without.lines().count(), 1);
    assert_eq!(without, "1,x\n");

    let with = to_string_with_options(&data, &DelimOptions::new()).unwrap();
    assert_eq!(with.lines().count(), 2);
    assert_eq!(with.lines().next(), Some("a,b"));
}

#[test]
fn test_row_and_column_order_preserved() {
    let data = table! {
        "z" => vec![3, 2, 1],
        "a" => vec!["c", "b", "a"],
    };
    let csv = to_string(&data).unwrap();
    assert_eq!(csv, "z,a\n3,c\n2,b\n1,a\n");
}

#[test]
fn test_no_trailing_delimiter_and_final_newline() {
    let data = table! { "a" => vec![1, 2], "b" => vec![3, 4], "c" => vec![5, 6] };
    let csv = to_string(&data).unwrap();
    assert!(csv.ends_with('\n'));
    for line in csv.lines() {
        assert!(!line.ends_with(','));
        assert!(!line.ends_with('\r'));
    }
}

#[test]
fn test_zero_columns_writes_nothing() {
    assert_eq!(to_string(&Table::new()).unwrap(), "");
}

#[test]
fn test_idempotent() {
    let data = mixed_table();
    let first = encode(&data, "", &DelimOptions::new()).unwrap();
    let second = encode(&data, "", &DelimOptions::new()).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_tab_delimiter() {
    let data = table! { "a b" => vec!["x,y"], "c\td" => vec!["p\tq"] };
    let tsv = to_string_with_options(&data, &DelimOptions::tsv()).unwrap();
    assert_eq!(tsv, "a b\t\"c\td\"\nx,y\t\"p\tq\"\n");
}

#[test]
fn test_custom_single_char_delimiter() {
    let data = table! { "a" => vec![1.5], "b" => vec![2.5] };
    let options = DelimOptions::new().with_delimiter(Delimiter::Other(' '));
    assert_eq!(to_string_with_options(&data, &options).unwrap(), "a b\n1.5 2.5\n");
}

#[test]
fn test_invalid_delimiter_rejected() {
    let data = table! { "a" => vec![1] };
    let options = DelimOptions::new().with_delimiter('\n');
    let err = to_string_with_options(&data, &options).unwrap_err();
    assert!(matches!(err, Error::InvalidDelimiter('\n')));
}

#[test]
fn test_length_mismatch_rejected() {
    let mut data = Table::new();
    data.insert("a", Column::from(vec![1, 2]));
    data.insert("b", Column::from(vec![1, 2, 3]));
    let err = to_string(&data).unwrap_err();
    println!("Error: {}", err);
    assert!(err.to_string().contains("'b'"));
}

#[test]
fn test_unsupported_type_error_names_type() {
    let data = table! {
        "ok" => vec![1],
        "z" => Column::Complex(vec![(1.0, 2.0)]),
    };
    let err = to_string(&data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Don't know how to handle vector of type complex."
    );
}

#[test]
fn test_writer_keeps_partial_output_on_type_error() {
    let data = table! {
        "ok" => vec![7],
        "z" => Column::Raw(vec![1]),
    };
    let mut buffer = Vec::new();
    let result = to_writer_with_options(&mut buffer, &data, &DelimOptions::new());
    assert!(result.is_err());
    assert_eq!(buffer, b"ok,z\n7,");
}

#[test]
fn test_file_truncate_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let data = table! { "id" => vec![1, 2] };

    fs::write(&path, "stale contents that must disappear\n").unwrap();
    to_path(&path, &data, &DelimOptions::new()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "id\n1\n2\n");

    let append = DelimOptions::new().with_header(false).with_append(true);
    to_path(&path, &data, &append).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "id\n1\n2\n1\n2\n");
}

#[test]
fn test_append_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.csv");
    let data = table! { "x" => vec![true] };
    to_path(&path, &data, &DelimOptions::new().with_append(true)).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\nTRUE\n");
}

#[test]
fn test_encode_to_file_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encoded.csv");
    let data = mixed_table();

    let returned = encode(&data, path.to_str().unwrap(), &DelimOptions::new()).unwrap();
    assert_eq!(returned, "");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        encode(&data, "", &DelimOptions::new()).unwrap()
    );
}

#[test]
fn test_open_failure_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let data = table! { "x" => vec![1] };

    let err = encode(&data, path.to_str().unwrap(), &DelimOptions::new()).unwrap_err();
    println!("Error: {}", err);
    match &err {
        Error::Open { path: p, .. } => assert_eq!(p, &path),
        other => panic!("Expected open error, got {:?}", other),
    }
    assert!(err.to_string().contains("out.csv"));
    assert!(!path.exists());
}

#[test]
fn test_file_keeps_partial_output_on_type_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    let data = table! {
        "a" => vec![1],
        "b" => Column::Raw(vec![0]),
    };

    assert!(to_path(&path, &data, &DelimOptions::new()).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,");
}

#[test]
fn test_rejected_input_leaves_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kept.csv");
    fs::write(&path, "precious\n").unwrap();

    let mut mismatched = Table::new();
    mismatched.insert("a", Column::from(vec![1, 2]));
    mismatched.insert("b", Column::from(vec![1]));
    let err = to_path(&path, &mismatched, &DelimOptions::new()).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "precious\n");

    let data = table! { "a" => vec![1] };
    let options = DelimOptions::new().with_delimiter('"');
    let err = encode(&data, path.to_str().unwrap(), &options).unwrap_err();
    assert!(matches!(err, Error::InvalidDelimiter('"')));
    assert_eq!(fs::read_to_string(&path).unwrap(), "precious\n");
}

#[test]
fn test_rejected_input_does_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.csv");
    let data = table! { "a" => vec![1] };
    let options = DelimOptions::new().with_delimiter('\r').with_append(true);

    assert!(to_path(&path, &data, &options).is_err());
    assert!(!path.exists());
}

#[test]
fn test_options_from_json() {
    let json = r#"{"delimiter": "semicolon", "na": "", "header": false}"#;
    let options: DelimOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.delimiter, Delimiter::Semicolon);
    assert!(!options.append);

    let data = table! { "a" => vec![Some(1), None], "b" => vec![Some("x;y"), None] };
    assert_eq!(
        to_string_with_options(&data, &options).unwrap(),
        "1;\"x;y\"\n;\n"
    );
}

#[test]
fn test_options_json_round_trip() {
    let options = DelimOptions::new()
        .with_delimiter(Delimiter::Other(':'))
        .with_na("NULL")
        .with_append(true);
    let json = serde_json::to_string(&options).unwrap();
    let back: DelimOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(options, back);
}
