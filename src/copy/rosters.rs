//! Player and roster load from the per-season roster file.

use anyhow::Result;
use rusqlite::types::Value;

use crate::aliases::canonical_school_name;
use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{LoadStats, PlayerClass, RosterRow};
use crate::names::split_name;
use crate::resolve::parse_source_id;

/// Copy new players from a roster file. Players are keyed by source ID;
/// rows without one are left for the box-score pass, which can fall back
/// to name matching. Nameless rows are counted and dropped.
pub fn copy_players(db: &mut Database, rows: &[RosterRow], stats: &mut LoadStats) -> Result<usize> {
    let mut ids = KeySet::from_existing(db.player_ids()?.into_keys());

    let mut batch = Vec::new();
    for row in rows {
        let Some(sid) = parse_source_id(&row.player_id) else {
            continue;
        };
        let Some(name) = split_name(&row.player_name) else {
            stats.nameless_players += 1;
            continue;
        };
        if !ids.claim(sid) {
            continue;
        }
        batch.push(vec![
            Value::Integer(sid),
            Value::Text(name.first),
            Value::Text(name.last),
        ]);
    }

    db.bulk_insert("player", &["ncaa_id", "first_name", "last_name"], &batch)?;
    stats.new_players += batch.len();
    println!("Copying players... {} new players.", batch.len());
    Ok(batch.len())
}

/// Create roster rows tying players to their year's team. Runs after
/// `copy_players`, so every row with a parseable player ID has a player.
pub fn create_rosters(
    db: &mut Database,
    rows: &[RosterRow],
    year: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let teams = db.team_snapshot(year)?;
    let player_ids = db.player_ids()?;
    let mut keys = KeySet::from_existing(db.roster_keys()?);

    let mut unknown_schools = 0usize;
    let mut batch = Vec::new();
    for row in rows {
        let Some(player_sid) = parse_source_id(&row.player_id) else {
            continue;
        };
        let Some(&player_id) = player_ids.get(&player_sid) else {
            continue;
        };
        let school = canonical_school_name(&row.school_name);
        let Some(team_id) = teams.resolve(parse_source_id(&row.school_id), school) else {
            unknown_schools += 1;
            continue;
        };
        if !keys.claim((team_id, player_id)) {
            continue;
        }
        batch.push(vec![
            Value::Integer(team_id),
            Value::Integer(player_id),
            Value::Text(PlayerClass::from_code(&row.class).as_str().to_string()),
        ]);
    }

    db.bulk_insert("roster", &["team_id", "player_id", "class"], &batch)?;
    stats.new_roster_rows += batch.len();
    stats.unknown_schools += unknown_schools;
    println!(
        "Creating rosters... {} new roster rows, {} rows with unknown school.",
        batch.len(),
        unknown_schools
    );
    Ok(batch.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player_id: &str, name: &str, class: &str) -> RosterRow {
        RosterRow {
            school_id: "97".to_string(),
            school_name: "Fresno State".to_string(),
            player_id: player_id.to_string(),
            player_name: name.to_string(),
            class: class.to_string(),
        }
    }

    fn db_with_team() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        let school_id = db.add_school("Fresno State", Some(97)).unwrap();
        db.create_team(2019, school_id).unwrap();
        db
    }

    #[test]
    fn test_copy_players_and_rosters_idempotent() {
        let mut db = db_with_team();
        let mut stats = LoadStats::default();
        let rows = vec![
            row("1001", "Smith, John", "Fr"),
            row("1002", "Jones, Mike", "sr"),
        ];

        assert_eq!(copy_players(&mut db, &rows, &mut stats).unwrap(), 2);
        assert_eq!(create_rosters(&mut db, &rows, 2019, &mut stats).unwrap(), 2);
        assert_eq!(copy_players(&mut db, &rows, &mut stats).unwrap(), 0);
        assert_eq!(create_rosters(&mut db, &rows, 2019, &mut stats).unwrap(), 0);

        let class: String = db
            .connection()
            .query_row(
                "SELECT roster.class FROM roster
                 JOIN player ON player.id = roster.player_id
                 WHERE player.ncaa_id = 1001",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(class, "freshman");
    }

    #[test]
    fn test_empty_id_and_name_contribute_nothing() {
        let mut db = db_with_team();
        let mut stats = LoadStats::default();
        let rows = vec![row("", "", "")];

        assert_eq!(copy_players(&mut db, &rows, &mut stats).unwrap(), 0);
        assert_eq!(create_rosters(&mut db, &rows, 2019, &mut stats).unwrap(), 0);
        assert_eq!(db.count("player").unwrap(), 0);
        assert_eq!(db.count("roster").unwrap(), 0);
    }

    #[test]
    fn test_nameless_player_counted() {
        let mut db = db_with_team();
        let mut stats = LoadStats::default();
        // A bare comma leaves no last name.
        let rows = vec![row("1001", ", John", "Fr")];

        assert_eq!(copy_players(&mut db, &rows, &mut stats).unwrap(), 0);
        assert_eq!(stats.nameless_players, 1);
    }

    #[test]
    fn test_duplicate_source_ids_inserted_once() {
        let mut db = db_with_team();
        let mut stats = LoadStats::default();
        let rows = vec![row("1001", "Smith, John", "Fr"), row("1001", "Smith, John", "Fr")];

        assert_eq!(copy_players(&mut db, &rows, &mut stats).unwrap(), 1);
        assert_eq!(create_rosters(&mut db, &rows, 2019, &mut stats).unwrap(), 1);
    }

    #[test]
    fn test_unknown_school_counted() {
        let mut db = db_with_team();
        let mut stats = LoadStats::default();
        let mut bad = row("1001", "Smith, John", "Fr");
        bad.school_id = "5".to_string();
        bad.school_name = "Nowhere State".to_string();

        copy_players(&mut db, &[bad.clone()], &mut stats).unwrap();
        assert_eq!(create_rosters(&mut db, &[bad], 2019, &mut stats).unwrap(), 0);
        assert_eq!(stats.unknown_schools, 1);
    }
}
