//! Scraped-data directory conventions and CSV readers.
//!
//! All per-season files live under `{data_dir}/{year}/division_{division}/`
//! with a fixed stem per data type; the school-id list is global. Box-score
//! files deserialize into string maps because their stat columns vary by
//! year; everything else has a typed row struct in `models`.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::StringRecord;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

/// Path of a per-season scrape file: `{year}/division_{division}/{stem}.csv`.
pub fn scrape_file_path(data_dir: &Path, year: i64, division: i64, stem: &str) -> PathBuf {
    data_dir
        .join(year.to_string())
        .join(format!("division_{division}"))
        .join(format!("{stem}.csv"))
}

/// Path of the global school-id list.
pub fn school_ids_path(data_dir: &Path) -> PathBuf {
    data_dir.join("school_ids.csv")
}

/// Read a CSV file into typed rows.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_rows_from(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Read typed rows from any reader; the seam the tests feed strings through.
pub fn read_rows_from<T: DeserializeOwned, R: std::io::Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Read a CSV file into one string map per row, headers lowercased.
/// Box-score files need this because their stat columns differ by year.
pub fn read_string_maps(path: &Path) -> Result<Vec<FxHashMap<String, String>>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_string_maps_from(file).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn read_string_maps_from<R: std::io::Read>(reader: R) -> Result<Vec<FxHashMap<String, String>>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut map = FxHashMap::default();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(i) {
                map.insert(header.clone(), value.to_string());
            }
        }
        rows.push(map);
    }
    Ok(rows)
}

/// Read a CSV file into raw records, header skipped. The innings file has a
/// variable number of trailing columns, one per inning played.
pub fn read_raw_records(path: &Path) -> Result<Vec<StringRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_raw_records_from(file).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn read_raw_records_from<R: std::io::Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record?);
    }
    Ok(records)
}
