use super::error::InputError;
use crate::config::columns;
use crate::domain::AddressRecord;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read every facility row from a CSV file with a header row.
///
/// The header must contain the name and address columns; any other
/// columns are ignored. Values are trimmed, short rows yield empty fields.
pub fn read_records(path: &Path) -> Result<Vec<AddressRecord>, InputError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_records(file)
}

pub fn parse_records<R: Read>(reader: R) -> Result<Vec<AddressRecord>, InputError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| malformed(source, 1))?
        .clone();
    let name_idx = column_index(&headers, columns::NAME)?;
    let address_idx = column_index(&headers, columns::ADDRESS)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        // header is line 1
        let row = row.map_err(|source| malformed(source, i as u64 + 2))?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        records.push(AddressRecord::new(field(name_idx), field(address_idx)));
    }

    Ok(records)
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, InputError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or(InputError::MissingColumn { column })
}

fn malformed(source: csv::Error, fallback_line: u64) -> InputError {
    let line = source
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);
    InputError::Malformed { line, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_records_in_order() {
        let csv = "番号,施設名,所在地,電話\n\
                   1,杉並第一小学校, 東京都杉並区阿佐谷北1-3-3 ,03-0000-0000\n\
                   2,杉並第二小学校,東京都杉並区高円寺北2-1-3,\n";
        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                AddressRecord::new("杉並第一小学校", "東京都杉並区阿佐谷北1-3-3"),
                AddressRecord::new("杉並第二小学校", "東京都杉並区高円寺北2-1-3"),
            ]
        );
    }

    #[test]
    fn test_bom_and_short_rows() {
        let csv = "\u{feff}施設名,所在地\nテスト施設\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records, vec![AddressRecord::new("テスト施設", "")]);
    }

    #[test]
    fn test_missing_address_column() {
        let csv = "施設名,住所\nA,B\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            InputError::MissingColumn { column } if column == columns::ADDRESS
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = parse_records("施設名,所在地\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut bytes = "施設名,所在地\n".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b',', b'x', b'\n']);
        let err = parse_records(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, InputError::Malformed { .. }));
    }

    #[test]
    fn test_read_records_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_records(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, InputError::NotFound { .. }));
    }

    #[test]
    fn test_read_records_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sites.csv");
        fs::write(&path, "施設名,所在地\n杉並区役所,東京都杉並区阿佐谷南1-15-1\n").unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "杉並区役所");
    }
}
