//! Stadium reference-table load.

use anyhow::Result;
use rusqlite::types::Value;

use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{LoadStats, StadiumRow};

fn parse_count(raw: &str) -> Option<i64> {
    let cleaned = raw.replace(',', "");
    cleaned.trim().parse().ok()
}

/// Copy the stadium list for one (year, division). Stadiums have no source
/// ID; the name is the natural key.
pub fn copy_stadiums(db: &mut Database, rows: &[StadiumRow], stats: &mut LoadStats) -> Result<usize> {
    let mut names = KeySet::from_existing(db.stadium_ids()?.into_keys());

    let mut batch = Vec::new();
    for row in rows {
        if row.stadium_name.is_empty() {
            continue;
        }
        if !names.claim(row.stadium_name.clone()) {
            continue;
        }
        batch.push(vec![
            Value::Text(row.stadium_name.clone()),
            parse_count(&row.capacity).map_or(Value::Null, Value::Integer),
            parse_count(&row.year_built).map_or(Value::Null, Value::Integer),
        ]);
    }

    db.bulk_insert("stadium", &["name", "capacity", "year_built"], &batch)?;
    stats.new_stadiums += batch.len();
    println!("Copying stadiums... {} new stadiums.", batch.len());
    Ok(batch.len())
}
