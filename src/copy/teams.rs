//! Season team creation from the conference-membership file.

use anyhow::Result;
use rusqlite::types::Value;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::aliases::{canonical_conference_name, canonical_school_name};
use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{CoachRow, ConferenceTeamRow, LoadStats, StadiumRow};
use crate::resolve::parse_source_id;

/// Create one team row per (year, school) from a division's conference
/// membership list, linking coach and stadium where the reference files
/// name one for the school. A record whose school or conference cannot be
/// resolved is skipped and counted; the names are reported at the end of
/// the phase.
pub fn create_teams(
    db: &mut Database,
    rows: &[ConferenceTeamRow],
    coaches: &[CoachRow],
    stadiums: &[StadiumRow],
    year: i64,
    division: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let schools = db.school_snapshot()?;
    let teams = db.team_snapshot(year)?;
    let conference_ids = db.conference_ids(division)?;
    let coach_by_school = coach_links(db, coaches)?;
    let stadium_by_school = stadium_links(db, stadiums)?;

    let mut claimed_schools: KeySet<i64> = KeySet::new();
    let mut unknown_schools: FxHashSet<String> = FxHashSet::default();
    let mut unknown_conferences: FxHashSet<String> = FxHashSet::default();

    let mut batch = Vec::new();
    for row in rows {
        let name = canonical_school_name(&row.school_name);
        let sid = parse_source_id(&row.school_id);

        let Some(school_id) = schools.resolve(sid, name) else {
            unknown_schools.insert(name.to_string());
            continue;
        };
        let conference = canonical_conference_name(&row.conference_name, division);
        let Some(&conference_id) = conference_ids.get(conference) else {
            unknown_conferences.insert(conference.to_string());
            continue;
        };
        if teams.resolve(sid, name).is_some() {
            continue;
        }
        if !claimed_schools.claim(school_id) {
            continue;
        }

        let coach_id = sid.and_then(|s| coach_by_school.get(&s).copied());
        let stadium_id = sid.and_then(|s| stadium_by_school.get(&s).copied());
        batch.push(vec![
            Value::Integer(year),
            Value::Integer(conference_id),
            Value::Integer(school_id),
            coach_id.map_or(Value::Null, Value::Integer),
            stadium_id.map_or(Value::Null, Value::Integer),
        ]);
    }

    db.bulk_insert(
        "team",
        &["year", "conference_id", "school_id", "coach_id", "stadium_id"],
        &batch,
    )?;
    stats.new_teams += batch.len();
    stats.unknown_schools += unknown_schools.len();
    stats.unknown_conferences += unknown_conferences.len();
    println!("Creating teams... {} new teams.", batch.len());
    if !unknown_schools.is_empty() {
        println!("  unknown schools skipped: {:?}", unknown_schools);
    }
    if !unknown_conferences.is_empty() {
        println!("  unknown conferences skipped: {:?}", unknown_conferences);
    }
    Ok(batch.len())
}

/// School source ID -> internal coach id, from the per-season coach file.
fn coach_links(db: &Database, coaches: &[CoachRow]) -> Result<FxHashMap<i64, i64>> {
    let coach_ids = db.coach_ids()?;
    let mut links = FxHashMap::default();
    for row in coaches {
        let (Some(school_sid), Some(coach_sid)) =
            (parse_source_id(&row.school_id), parse_source_id(&row.coach_id))
        else {
            continue;
        };
        if let Some(&id) = coach_ids.get(&coach_sid) {
            links.insert(school_sid, id);
        }
    }
    Ok(links)
}

/// School source ID -> internal stadium id, from the per-season stadium file.
fn stadium_links(db: &Database, stadiums: &[StadiumRow]) -> Result<FxHashMap<i64, i64>> {
    let stadium_ids = db.stadium_ids()?;
    let mut links = FxHashMap::default();
    for row in stadiums {
        let Some(school_sid) = parse_source_id(&row.school_id) else {
            continue;
        };
        if let Some(&id) = stadium_ids.get(&row.stadium_name) {
            links.insert(school_sid, id);
        }
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(school_id: &str, school: &str, conference: &str) -> ConferenceTeamRow {
        ConferenceTeamRow {
            school_id: school_id.to_string(),
            school_name: school.to_string(),
            conference_name: conference.to_string(),
        }
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        db.add_school("Fresno State", Some(97)).unwrap();
        db
    }

    #[test]
    fn test_create_teams_idempotent() {
        let mut db = seeded_db();
        let mut stats = LoadStats::default();
        let rows = vec![member("97", "Fresno State", "Div. I Independent")];

        assert_eq!(create_teams(&mut db, &rows, &[], &[], 2019, 1, &mut stats).unwrap(), 1);
        assert_eq!(create_teams(&mut db, &rows, &[], &[], 2019, 1, &mut stats).unwrap(), 0);
        // A new year is a new team.
        assert_eq!(create_teams(&mut db, &rows, &[], &[], 2020, 1, &mut stats).unwrap(), 1);
    }

    #[test]
    fn test_unknown_school_and_conference_counted() {
        let mut db = seeded_db();
        let mut stats = LoadStats::default();
        let rows = vec![
            member("5", "Nowhere State", "SEC"),
            member("97", "Fresno State", "Nonexistent League"),
        ];

        assert_eq!(create_teams(&mut db, &rows, &[], &[], 2019, 1, &mut stats).unwrap(), 0);
        assert_eq!(stats.unknown_schools, 1);
        assert_eq!(stats.unknown_conferences, 1);
    }

    #[test]
    fn test_coach_and_stadium_linked() {
        let mut db = seeded_db();
        let mut stats = LoadStats::default();
        let coaches = vec![CoachRow {
            school_id: "97".to_string(),
            coach_id: "77".to_string(),
            coach_name: "Mike Batesole".to_string(),
            alma_mater: String::new(),
            year_graduated: String::new(),
        }];
        let stadiums = vec![StadiumRow {
            school_id: "97".to_string(),
            stadium_name: "Beiden Field".to_string(),
            capacity: "3,575".to_string(),
            year_built: "1966".to_string(),
        }];
        crate::copy::coaches::copy_coaches(&mut db, &coaches, &mut stats).unwrap();
        crate::copy::stadiums::copy_stadiums(&mut db, &stadiums, &mut stats).unwrap();

        let rows = vec![member("97", "Fresno State", "Mountain West")];
        crate::copy::conferences::copy_conferences(
            &mut db,
            &[crate::models::ConferenceRow {
                conference_name: "Mountain West".to_string(),
            }],
            1,
            &mut stats,
        )
        .unwrap();
        create_teams(&mut db, &rows, &coaches, &stadiums, 2019, 1, &mut stats).unwrap();

        let (coach_id, stadium_id): (Option<i64>, Option<i64>) = db
            .connection()
            .query_row("SELECT coach_id, stadium_id FROM team", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert!(coach_id.is_some());
        assert!(stadium_id.is_some());
    }
}
