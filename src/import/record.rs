//! Collection export rows.
//!
//! One row per owned release, as produced by the Discogs collection CSV
//! export. Only the columns below are read; any other column is ignored and
//! any of these that is missing reads as an empty string.

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectionRecord {
    #[serde(rename = "Catalog#")]
    pub catalog_number: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Format")]
    pub format: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Released")]
    pub released: String,
    #[serde(rename = "Date Added")]
    pub date_added: String,
    #[serde(rename = "Collection Media Condition")]
    pub media_condition: String,
    #[serde(rename = "Collection Notes")]
    pub notes: String,
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl CollectionRecord {
    pub fn catalog_number(&self) -> Option<&str> {
        non_empty(&self.catalog_number)
    }

    pub fn release_date(&self) -> Option<&str> {
        non_empty(&self.released)
    }

    pub fn notes(&self) -> Option<&str> {
        non_empty(&self.notes)
    }
}

/// Fields are decoded as lossy UTF-8: invalid bytes become U+FFFD instead
/// of failing the row.
fn decode_lossy(row: &csv::ByteRecord) -> StringRecord {
    row.iter()
        .map(|field| String::from_utf8_lossy(field))
        .collect()
}

/// Decodes every row of a headed CSV stream. Values are trimmed and blank
/// lines skipped. Only an unreadable header or stream fails the read.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<CollectionRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = decode_lossy(
        csv_reader
            .byte_headers()
            .context("Failed to read CSV header")?,
    );

    let mut records = Vec::new();
    for (idx, row) in csv_reader.byte_records().enumerate() {
        let row = row.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
        if row.iter().any(|field| std::str::from_utf8(field).is_err()) {
            warn!("CSV row {} is not valid UTF-8, replacing bad bytes", idx + 1);
        }
        let record: CollectionRecord = decode_lossy(&row)
            .deserialize(Some(&headers))
            .with_context(|| format!("Failed to decode CSV row {}", idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<CollectionRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Cannot open {:?}", path))?;
    parse_records(file).with_context(|| format!("Cannot parse {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Catalog#,Artist,Title,Label,Format,Rating,Released,release_id,CollectionFolder,Date Added,Collection Media Condition,Collection Sleeve Condition,Collection Notes";

    #[test]
    fn parses_export_rows_and_ignores_extra_columns() {
        let csv = format!(
            "{}\n\
             WARP LP 39 , Aphex Twin ,Selected Ambient Works 85-92,Warp Records,\"Vinyl, LP, Album\",5,1992,1234,Uncategorized,2021-03-04 10:11:12,Near Mint (NM or M-),Very Good Plus (VG+), first press \n",
            HEADER
        );
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.catalog_number(), Some("WARP LP 39"));
        assert_eq!(record.artist, "Aphex Twin");
        assert_eq!(record.format, "Vinyl, LP, Album");
        assert_eq!(record.rating, "5");
        assert_eq!(record.release_date(), Some("1992"));
        assert_eq!(record.date_added, "2021-03-04 10:11:12");
        assert_eq!(record.media_condition, "Near Mint (NM or M-)");
        assert_eq!(record.notes(), Some("first press"));
    }

    #[test]
    fn empty_fields_read_as_absent() {
        let csv = format!("{}\n,Artist,Title,,,,,,,,,,\n", HEADER);
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].catalog_number(), None);
        assert_eq!(records[0].release_date(), None);
        assert_eq!(records[0].notes(), None);
        assert_eq!(records[0].label, "");
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let csv = "Artist,Title\nBurial,Untrue\n\nKode9,Memories of the Future\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "Memories of the Future");
        assert_eq!(records[1].format, "");
        assert_eq!(records[1].media_condition, "");
    }

    #[test]
    fn invalid_utf8_in_one_row_keeps_the_others() {
        let mut csv = format!("{}\n", HEADER).into_bytes();
        csv.extend_from_slice(b"C1,Plaid,Double Figure,Warp Records,Vinyl,,,,,,,,\n");
        csv.extend_from_slice(b"C2,Plaid,Spokes \xC3\x28,Warp Records,Vinyl,,,,,,,,\n");
        csv.extend_from_slice(b"C3,Plaid,Scintilli,Warp Records,Vinyl,,,,,,,,\n");

        let records = parse_records(csv.as_slice()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Double Figure");
        assert_eq!(records[1].title, "Spokes \u{FFFD}(");
        assert_eq!(records[1].catalog_number(), Some("C2"));
        assert_eq!(records[2].title, "Scintilli");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_records("/definitely/not/here.csv").is_err());
    }
}
