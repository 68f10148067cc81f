//! Head-coach reference-table load.

use anyhow::Result;
use rusqlite::types::Value;

use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{CoachRow, LoadStats};
use crate::resolve::parse_source_id;

/// Copy the coach list for one (year, division). The site reuses coach ids
/// across years, so the natural key is (ncaa_id, first, last).
pub fn copy_coaches(db: &mut Database, rows: &[CoachRow], stats: &mut LoadStats) -> Result<usize> {
    let mut keys = KeySet::from_existing(db.coach_keys()?);

    let mut batch = Vec::new();
    for row in rows {
        let Some(sid) = parse_source_id(&row.coach_id) else {
            continue;
        };
        let Some((first, last)) = row.coach_name.trim().split_once(' ') else {
            continue;
        };
        if !keys.claim((sid, first.to_string(), last.to_string())) {
            continue;
        }
        let alma_mater = row.alma_mater.trim();
        batch.push(vec![
            Value::Integer(sid),
            Value::Text(first.to_string()),
            Value::Text(last.to_string()),
            if alma_mater.is_empty() {
                Value::Null
            } else {
                Value::Text(alma_mater.to_string())
            },
            parse_source_id(&row.year_graduated).map_or(Value::Null, Value::Integer),
        ]);
    }

    db.bulk_insert(
        "coach",
        &["ncaa_id", "first_name", "last_name", "alma_mater", "year_graduated"],
        &batch,
    )?;
    stats.new_coaches += batch.len();
    println!("Copying coaches... {} new coaches.", batch.len());
    Ok(batch.len())
}
