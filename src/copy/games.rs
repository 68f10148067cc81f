//! Game and inning load.
//!
//! Game files name opponents that never appear in the NCAA school list
//! (exhibition and non-NCAA opponents), so this pass is the one place a
//! school or team is created on the fly instead of skipped.

use anyhow::Result;
use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;

use crate::aliases::canonical_school_name;
use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{GameInfoRow, LoadStats};
use crate::resolve::parse_source_id;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{2})/(\d{2})/(\d{4})").unwrap());

/// Normalize a scraped "MM/DD/YYYY" date to ISO "YYYY-MM-DD".
fn parse_date(raw: &str) -> Option<String> {
    let caps = DATE_RE.captures(raw)?;
    Some(format!("{}-{}-{}", &caps[3], &caps[1], &caps[2]))
}

fn parse_attendance(raw: &str) -> Option<i64> {
    raw.replace(',', "").trim().parse().ok()
}

/// Copy a division's game file. Away and home teams are resolved by
/// aliased school name; a miss creates the school (without ncaa_id) and
/// its team for the year.
pub fn copy_games(
    db: &mut Database,
    rows: &[GameInfoRow],
    year: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let mut game_ids = KeySet::from_existing(db.game_ids()?.into_keys());
    let mut school_ids = db.school_name_ids()?;
    let mut team_ids = db.team_name_ids(year)?;

    let mut batch = Vec::new();
    for row in rows {
        let Some(game_sid) = parse_source_id(&row.game_id) else {
            continue;
        };
        let away = canonical_school_name(&row.away_school_name);
        let home = canonical_school_name(&row.home_school_name);
        if away.is_empty() || home.is_empty() {
            continue;
        }
        // Claim only after validation, so a rejected row does not shadow a
        // later valid row carrying the same game ID.
        if !game_ids.claim(game_sid) {
            continue;
        }
        let away_team = team_for_school(db, away, year, &mut school_ids, &mut team_ids, stats)?;
        let home_team = team_for_school(db, home, year, &mut school_ids, &mut team_ids, stats)?;

        let location = row.location.trim();
        batch.push(vec![
            Value::Integer(game_sid),
            Value::Integer(away_team),
            Value::Integer(home_team),
            parse_date(&row.date).map_or(Value::Null, Value::Text),
            if location.is_empty() {
                Value::Null
            } else {
                Value::Text(location.to_string())
            },
            parse_attendance(&row.attendance).map_or(Value::Null, Value::Integer),
        ]);
    }

    db.bulk_insert(
        "game",
        &["ncaa_id", "away_team_id", "home_team_id", "date", "location", "attendance"],
        &batch,
    )?;
    stats.new_games += batch.len();
    println!("Copying games... {} new games.", batch.len());
    Ok(batch.len())
}

/// Team id for a canonical school name, creating school and team as needed.
fn team_for_school(
    db: &Database,
    name: &str,
    year: i64,
    school_ids: &mut rustc_hash::FxHashMap<String, i64>,
    team_ids: &mut rustc_hash::FxHashMap<String, i64>,
    stats: &mut LoadStats,
) -> Result<i64> {
    if let Some(&team_id) = team_ids.get(name) {
        return Ok(team_id);
    }
    let school_id = match school_ids.get(name) {
        Some(&id) => id,
        None => {
            let id = db.add_school(name, None)?;
            school_ids.insert(name.to_string(), id);
            stats.schools_added_from_games += 1;
            id
        }
    };
    let team_id = db.create_team(year, school_id)?;
    team_ids.insert(name.to_string(), team_id);
    stats.teams_added_from_games += 1;
    Ok(team_id)
}

/// Copy per-inning line scores. The innings file is variable width: after
/// `game_id, school_id, school_name` there is one runs column per inning
/// played. Keyed by (game, team) so a re-run never duplicates a line.
pub fn copy_game_innings(
    db: &mut Database,
    records: &[StringRecord],
    year: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let game_ids = db.game_ids()?;
    let teams = db.team_snapshot(year)?;
    let mut keys = KeySet::from_existing(db.inning_keys()?);

    let mut unknown_schools = 0usize;
    let mut batch = Vec::new();
    for record in records {
        let Some(game_sid) = record.get(0).and_then(parse_source_id) else {
            continue;
        };
        let Some(&game_id) = game_ids.get(&game_sid) else {
            continue;
        };
        let school_sid = record.get(1).and_then(parse_source_id);
        let name = canonical_school_name(record.get(2).unwrap_or(""));
        let Some(team_id) = teams.resolve(school_sid, name) else {
            unknown_schools += 1;
            continue;
        };
        if !keys.claim((game_id, team_id)) {
            continue;
        }
        for (i, cell) in record.iter().skip(3).enumerate() {
            batch.push(vec![
                Value::Integer(game_id),
                Value::Integer(team_id),
                Value::Integer(i as i64 + 1),
                cell.trim().parse().map_or(Value::Null, Value::Integer),
            ]);
        }
    }

    db.bulk_insert("inning", &["game_id", "team_id", "inning", "runs"], &batch)?;
    stats.new_innings += batch.len();
    stats.unknown_schools += unknown_schools;
    println!(
        "Copying innings... {} inning lines, {} rows with unknown school.",
        batch.len(),
        unknown_schools
    );
    Ok(batch.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, away: &str, home: &str) -> GameInfoRow {
        GameInfoRow {
            game_id: id.to_string(),
            away_school_name: away.to_string(),
            home_school_name: home.to_string(),
            date: "04/12/2019".to_string(),
            location: "Beiden Field".to_string(),
            attendance: "2,134".to_string(),
            hp_official: String::new(),
            first_base_official: String::new(),
            second_base_official: String::new(),
            third_base_official: String::new(),
        }
    }

    fn db_with_teams() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        for (sid, name) in [(97, "Fresno State"), (98, "Nevada")] {
            let school_id = db.add_school(name, Some(sid)).unwrap();
            db.create_team(2019, school_id).unwrap();
        }
        db
    }

    #[test]
    fn test_copy_games_idempotent() {
        let mut db = db_with_teams();
        let mut stats = LoadStats::default();
        let rows = vec![game("5001", "Nevada", "Fresno State")];

        assert_eq!(copy_games(&mut db, &rows, 2019, &mut stats).unwrap(), 1);
        assert_eq!(copy_games(&mut db, &rows, 2019, &mut stats).unwrap(), 0);

        let (date, attendance): (String, i64) = db
            .connection()
            .query_row("SELECT date, attendance FROM game", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(date, "2019-04-12");
        assert_eq!(attendance, 2134);
    }

    #[test]
    fn test_blank_names_do_not_shadow_a_later_valid_row() {
        let mut db = db_with_teams();
        let mut stats = LoadStats::default();
        // Same game ID twice: a mangled row first, then the real one.
        let rows = vec![
            game("5001", "", "Fresno State"),
            game("5001", "Nevada", "Fresno State"),
        ];

        assert_eq!(copy_games(&mut db, &rows, 2019, &mut stats).unwrap(), 1);
        assert_eq!(db.count("game").unwrap(), 1);
    }

    #[test]
    fn test_unknown_opponent_created_on_the_fly() {
        let mut db = db_with_teams();
        let mut stats = LoadStats::default();
        let rows = vec![
            game("5001", "Vanguard", "Fresno State"),
            game("5002", "Vanguard", "Nevada"),
        ];

        copy_games(&mut db, &rows, 2019, &mut stats).unwrap();
        assert_eq!(stats.schools_added_from_games, 1);
        assert_eq!(stats.teams_added_from_games, 1);
        assert_eq!(db.count("game").unwrap(), 2);

        let ncaa_id: Option<i64> = db
            .connection()
            .query_row("SELECT ncaa_id FROM school WHERE name = 'Vanguard'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(ncaa_id, None);
    }

    #[test]
    fn test_copy_game_innings() {
        let mut db = db_with_teams();
        let mut stats = LoadStats::default();
        copy_games(&mut db, &[game("5001", "Nevada", "Fresno State")], 2019, &mut stats).unwrap();

        let records = vec![
            StringRecord::from(vec!["5001", "98", "Nevada", "0", "2", "1"]),
            StringRecord::from(vec!["5001", "97", "Fresno State", "3", "0", ""]),
        ];
        assert_eq!(copy_game_innings(&mut db, &records, 2019, &mut stats).unwrap(), 6);
        assert_eq!(copy_game_innings(&mut db, &records, 2019, &mut stats).unwrap(), 0);

        let runs: Option<i64> = db
            .connection()
            .query_row(
                "SELECT runs FROM inning WHERE inning = 3 AND team_id =
                 (SELECT id FROM team WHERE school_id =
                  (SELECT id FROM school WHERE ncaa_id = 97))",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(runs, None);
    }
}
