//! Conference load for one (year, division).

use anyhow::Result;
use rusqlite::types::Value;

use crate::aliases::canonical_conference_name;
use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{ConferenceRow, LoadStats};

/// Copy a division's conference list. Independent rows are skipped because
/// the per-division Independent conferences are seeded up front.
pub fn copy_conferences(
    db: &mut Database,
    rows: &[ConferenceRow],
    division: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let existing = db.conference_ids(division)?;
    let mut names = KeySet::from_existing(existing.into_keys());

    let mut batch = Vec::new();
    for row in rows {
        let name = canonical_conference_name(&row.conference_name, division);
        if name == "Independent" {
            continue;
        }
        if !names.claim(name.to_string()) {
            continue;
        }
        batch.push(vec![Value::Text(name.to_string()), Value::Integer(division)]);
    }

    db.bulk_insert("conference", &["name", "division"], &batch)?;
    stats.new_conferences += batch.len();
    println!("Copying conferences... {} new conferences.", batch.len());
    Ok(batch.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> ConferenceRow {
        ConferenceRow {
            conference_name: name.to_string(),
        }
    }

    #[test]
    fn test_copy_conferences_skips_independent_and_dedupes() {
        let mut db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        let mut stats = LoadStats::default();

        let rows = vec![row("CAA"), row("Div. I Independent"), row("CAA"), row("SEC")];
        assert_eq!(copy_conferences(&mut db, &rows, 1, &mut stats).unwrap(), 2);
        // Seeded 4 + CAA + SEC
        assert_eq!(db.count("conference").unwrap(), 6);

        // Re-run adds nothing.
        assert_eq!(copy_conferences(&mut db, &rows, 1, &mut stats).unwrap(), 0);
    }

    #[test]
    fn test_mountain_west_stored_per_division() {
        let mut db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        let mut stats = LoadStats::default();

        copy_conferences(&mut db, &[row("Mountain West")], 1, &mut stats).unwrap();
        let ids = db.conference_ids(1).unwrap();
        assert!(ids.contains_key("MWC"));
        assert!(!ids.contains_key("Mountain West"));
    }

    #[test]
    fn test_same_name_allowed_across_divisions() {
        let mut db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        let mut stats = LoadStats::default();

        copy_conferences(&mut db, &[row("GLIAC")], 2, &mut stats).unwrap();
        copy_conferences(&mut db, &[row("GLIAC")], 3, &mut stats).unwrap();
        assert!(db.conference_ids(2).unwrap().contains_key("GLIAC"));
        assert!(db.conference_ids(3).unwrap().contains_key("GLIAC"));
    }
}
