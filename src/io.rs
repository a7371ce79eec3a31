//! CSV source and sink for `(identifier, frequency)` rows
//!
//! Input needs a header row naming at least the identifier and frequency
//! columns; other columns are ignored. Output has exactly those two columns.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::item::FrequencyItem;

/// Failure reading or writing tabular data
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}` in header")]
    MissingColumn(String),

    /// Frequency cell that is not a non-negative number (`row` is 1-based,
    /// header excluded)
    #[error("row {row}: invalid frequency `{value}`")]
    InvalidFrequency { row: u64, value: String },
}

/// Read frequency items from CSV
pub fn read_frequency_items<R: Read>(
    reader: R,
    id_column: &str,
    frequency_column: &str,
) -> Result<Vec<FrequencyItem>, IoError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?;
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| IoError::MissingColumn(name.to_string()))
    };
    let id_idx = column(id_column)?;
    let freq_idx = column(frequency_column)?;

    let mut items = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i as u64 + 1;
        let id = record.get(id_idx).unwrap_or_default();
        let raw = record.get(freq_idx).unwrap_or_default();
        items.push(FrequencyItem::new(id, parse_frequency(row, raw)?));
    }

    debug!(rows = items.len(), id_column, frequency_column, "frequency items read");
    Ok(items)
}

/// Read frequency items from a CSV file
pub fn read_frequency_file(
    path: impl AsRef<Path>,
    id_column: &str,
    frequency_column: &str,
) -> Result<Vec<FrequencyItem>, IoError> {
    let file = File::open(path)?;
    read_frequency_items(file, id_column, frequency_column)
}

/// Write a sample as two-column CSV
pub fn write_sample<W: Write>(
    writer: W,
    sample: &[FrequencyItem],
    id_column: &str,
    frequency_column: &str,
) -> Result<(), IoError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([id_column, frequency_column])?;
    for item in sample {
        wtr.write_record([item.id.as_str(), item.frequency.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a sample to a CSV file, replacing any existing file
pub fn write_sample_file(
    path: impl AsRef<Path>,
    sample: &[FrequencyItem],
    id_column: &str,
    frequency_column: &str,
) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_sample(file, sample, id_column, frequency_column)
}

fn parse_frequency(row: u64, raw: &str) -> Result<f64, IoError> {
    match raw.trim().parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Ok(f),
        _ => Err(IoError::InvalidFrequency {
            row,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "desc_md5_cs,title,doc_occur_count\n\
                       a1,first,3\n\
                       b2,second,10\n\
                       c3,third,0\n";

    #[test]
    fn test_read_named_columns() {
        let items = read_frequency_items(CSV.as_bytes(), "desc_md5_cs", "doc_occur_count").unwrap();
        assert_eq!(
            items,
            vec![
                FrequencyItem::new("a1", 3.0),
                FrequencyItem::new("b2", 10.0),
                FrequencyItem::new("c3", 0.0),
            ]
        );
    }

    #[test]
    fn test_missing_column() {
        let err = read_frequency_items(CSV.as_bytes(), "id", "doc_occur_count").unwrap_err();
        assert!(matches!(err, IoError::MissingColumn(ref c) if c == "id"));
    }

    #[test]
    fn test_invalid_frequency() {
        let data = "id,frequency\nx,1\ny,-4\n";
        let err = read_frequency_items(data.as_bytes(), "id", "frequency").unwrap_err();
        assert!(matches!(err, IoError::InvalidFrequency { row: 2, ref value } if value == "-4"));

        let data = "id,frequency\nx,many\n";
        assert!(read_frequency_items(data.as_bytes(), "id", "frequency").is_err());
    }

    #[test]
    fn test_write_sample() {
        let sample = vec![FrequencyItem::new("a", 2.0), FrequencyItem::new("b", 0.5)];
        let mut out = Vec::new();
        write_sample(&mut out, &sample, "id", "frequency").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,frequency\na,2\nb,0.5\n");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        let sample = vec![FrequencyItem::new("k", 7.0)];

        write_sample_file(&path, &sample, "key", "count").unwrap();
        let back = read_frequency_file(&path, "key", "count").unwrap();
        assert_eq!(back, sample);
    }
}
