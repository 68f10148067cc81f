//! Umpire load and per-game officiating assignments.
//!
//! The site never assigns umpires an id, so they are matched by
//! (first, last) alone. Two umpires sharing a name collapse into one row;
//! known fragility, carried deliberately.

use anyhow::Result;
use rusqlite::types::Value;

use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{GameInfoRow, LoadStats};
use crate::names::split_umpire_name;
use crate::resolve::parse_source_id;

/// The four officiating positions of a game row, in column order.
fn officials(row: &GameInfoRow) -> [(&'static str, &str); 4] {
    [
        ("hp", row.hp_official.as_str()),
        ("1b", row.first_base_official.as_str()),
        ("2b", row.second_base_official.as_str()),
        ("3b", row.third_base_official.as_str()),
    ]
}

/// Copy new umpires from a division's game file. Malformed names
/// (single-token, empty, scrape leftovers) are skipped.
pub fn copy_umpires(db: &mut Database, rows: &[GameInfoRow], stats: &mut LoadStats) -> Result<usize> {
    let mut names = KeySet::from_existing(db.umpire_ids()?.into_keys());

    let mut batch = Vec::new();
    for row in rows {
        for (_, official) in officials(row) {
            let Some((first, last)) = split_umpire_name(official) else {
                continue;
            };
            if !names.claim((first.clone(), last.clone())) {
                continue;
            }
            batch.push(vec![Value::Text(first), Value::Text(last)]);
        }
    }

    db.bulk_insert("umpire", &["first_name", "last_name"], &batch)?;
    stats.new_umpires += batch.len();
    println!("Copying umpires... {} new umpires.", batch.len());
    Ok(batch.len())
}

/// Assign umpires to games. A game that already has any assignment is
/// skipped whole, so a re-run never doubles a crew.
pub fn create_game_umpires(
    db: &mut Database,
    rows: &[GameInfoRow],
    stats: &mut LoadStats,
) -> Result<usize> {
    let game_ids = db.game_ids()?;
    let umpire_ids = db.umpire_ids()?;
    let mut assigned = KeySet::from_existing(db.umpire_game_ids()?);

    let mut batch = Vec::new();
    for row in rows {
        let Some(&game_id) = parse_source_id(&row.game_id)
            .and_then(|sid| game_ids.get(&sid))
        else {
            continue;
        };
        if !assigned.claim(game_id) {
            continue;
        }
        for (position, official) in officials(row) {
            let Some(key) = split_umpire_name(official) else {
                continue;
            };
            let Some(&umpire_id) = umpire_ids.get(&key) else {
                continue;
            };
            batch.push(vec![
                Value::Integer(game_id),
                Value::Integer(umpire_id),
                Value::Text(position.to_string()),
            ]);
        }
    }

    db.bulk_insert("game_umpire", &["game_id", "umpire_id", "position"], &batch)?;
    stats.new_umpire_games += batch.len();
    println!("Assigning umpires... {} assignments.", batch.len());
    Ok(batch.len())
}
