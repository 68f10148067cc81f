//! Safety checks on the database path.
//!
//! The loader never deletes a database (re-running on an existing file is
//! the normal idempotence path), but a mistyped argument could still point
//! the database at the scraped-data tree and scribble over an input.

use std::path::Path;

use anyhow::{bail, Result};

/// Validates that the database path does not collide with the scraped-data
/// inputs.
///
/// Checks:
/// - The database cannot live inside the data directory.
/// - The database cannot be a `.csv` file.
pub fn validate_database_path(database: &Path, data_dir: &Path) -> Result<()> {
    if database.starts_with(data_dir) {
        bail!(
            "Safety check failed: database '{}' is inside the data directory '{}'",
            database.display(),
            data_dir.display()
        );
    }

    let is_csv = database
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        bail!(
            "Safety check failed: database '{}' looks like a scraped input file",
            database.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_database_path() {
        let database = PathBuf::from("/data/ncaa.db");
        let data_dir = PathBuf::from("/data/scraped-data");
        assert!(validate_database_path(&database, &data_dir).is_ok());
    }

    #[test]
    fn test_database_inside_data_dir_blocked() {
        let database = PathBuf::from("/data/scraped-data/ncaa.db");
        let data_dir = PathBuf::from("/data/scraped-data");
        let result = validate_database_path(&database, &data_dir);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("inside the data directory"));
    }

    #[test]
    fn test_csv_path_blocked() {
        let database = PathBuf::from("/data/school_ids.csv");
        let data_dir = PathBuf::from("/data/scraped-data");
        assert!(validate_database_path(&database, &data_dir).is_err());
    }
}
