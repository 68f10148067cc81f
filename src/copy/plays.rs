//! Play-by-play load with fuzzy batter resolution.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;
use rustc_hash::FxHashMap;

use crate::aliases::canonical_school_name;
use crate::db::Database;
use crate::fuzzy::best_roster_match;
use crate::models::{LoadStats, PlayByPlayRow};
use crate::progress::file_progress;
use crate::resolve::parse_source_id;

static PITCH_COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-3]-[0-2] ?[SFBK]*$").unwrap());

/// Split a pitch-sequence annotation like "(2-1 BBS)" off the end of a
/// play's text. Parentheticals that are not a count ("(error by ss)")
/// stay in the text.
fn split_pitches(text: &str) -> (String, Option<String>) {
    let trimmed = text.trim();
    if let Some(open) = trimmed.rfind('(') {
        if trimmed.ends_with(')') {
            let inner = &trimmed[open + 1..trimmed.len() - 1];
            if PITCH_COUNT_RE.is_match(inner) {
                return (trimmed[..open].trim().to_string(), Some(inner.to_string()));
            }
        }
    }
    (trimmed.to_string(), None)
}

/// The batter mention at the head of a play: the leading run of
/// capitalized tokens ("Smith singled..." or "J. Smith reached...").
fn leading_mention(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .take_while(|t| t.chars().next().is_some_and(|c| c.is_uppercase()))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Copy a division's play-by-play file. Inning-summary rows are dropped;
/// ordering restarts per half-inning. The batter mention is resolved
/// against the batting team's roster with the fuzzy matcher and stored
/// without further verification. Games that already have play-by-play are
/// skipped whole.
pub fn copy_play_by_play(
    db: &mut Database,
    rows: &[PlayByPlayRow],
    year: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let game_ids = db.game_ids()?;
    let teams = db.team_snapshot(year)?;
    let rosters = db.team_rosters(year)?;
    let loaded = db.pbp_game_ids()?;

    let pb = file_progress(rows.len() as u64, "Copying play-by-play");
    let mut unknown_schools = 0usize;
    let mut ord: FxHashMap<(i64, i64, String), i64> = FxHashMap::default();
    let mut batch = Vec::new();
    for row in rows {
        pb.inc(1);
        let Some(&game_id) = parse_source_id(&row.game_id)
            .and_then(|sid| game_ids.get(&sid))
        else {
            continue;
        };
        if loaded.contains(&game_id) {
            continue;
        }
        // Inning-summary rows ("R: 2 H: 3 E: 0 ...") are not plays.
        if row.pbp_type.trim() == "inning_summary" {
            continue;
        }
        let school = canonical_school_name(&row.school_name);
        let Some(team_id) = teams.resolve(parse_source_id(&row.school_id), school) else {
            unknown_schools += 1;
            continue;
        };
        let Ok(inning) = row.inning.trim().parse::<i64>() else {
            continue;
        };
        let side = row.side.trim().to_lowercase();

        let (text, pitches) = split_pitches(&row.pbp_text);
        if text.is_empty() {
            continue;
        }
        let next = ord.entry((game_id, inning, side.clone())).or_insert(0);
        *next += 1;

        let roster_id = leading_mention(&text)
            .and_then(|mention| {
                let candidates = rosters.get(&team_id).map_or(&[][..], |v| v.as_slice());
                best_roster_match(&mention, candidates)
            })
            .map(|m| m.roster_id);
        match roster_id {
            Some(_) => stats.pbp_mentions_matched += 1,
            None => stats.pbp_mentions_unmatched += 1,
        }

        batch.push(vec![
            Value::Integer(game_id),
            Value::Integer(team_id),
            Value::Integer(inning),
            Value::Text(side),
            Value::Integer(*next),
            Value::Text(text),
            pitches.map_or(Value::Null, Value::Text),
            roster_id.map_or(Value::Null, Value::Integer),
        ]);
    }

    db.bulk_insert(
        "play_by_play",
        &["game_id", "team_id", "inning", "side", "ord", "text", "pitches", "roster_id"],
        &batch,
    )?;
    pb.finish_and_clear();
    stats.new_pbp_lines += batch.len();
    stats.unknown_schools += unknown_schools;
    println!(
        "Copying play-by-play... {} lines, {} rows with unknown school.",
        batch.len(),
        unknown_schools
    );
    Ok(batch.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game_id: &str, inning: &str, side: &str, text: &str) -> PlayByPlayRow {
        PlayByPlayRow {
            game_id: game_id.to_string(),
            school_name: "Fresno State".to_string(),
            school_id: "97".to_string(),
            inning: inning.to_string(),
            pbp_type: "play".to_string(),
            side: side.to_string(),
            pbp_text: text.to_string(),
        }
    }

    fn db_with_roster() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        let school = db.add_school("Fresno State", Some(97)).unwrap();
        let team = db.create_team(2019, school).unwrap();
        let player = db.add_player(Some(1001), "John", "Smith").unwrap();
        db.create_roster(team, player, "junior").unwrap();
        db.connection()
            .execute(
                "INSERT INTO game(ncaa_id, away_team_id, home_team_id) VALUES(5001, ?1, ?1)",
                [team],
            )
            .unwrap();
        db
    }

    #[test]
    fn test_split_pitches() {
        let (text, pitches) = split_pitches("Smith struck out swinging. (2-2 KSBBF)");
        assert_eq!(text, "Smith struck out swinging.");
        assert_eq!(pitches.as_deref(), Some("2-2 KSBBF"));

        let (text, pitches) = split_pitches("Smith reached on an error (error by ss)");
        assert_eq!(text, "Smith reached on an error (error by ss)");
        assert_eq!(pitches, None);
    }

    #[test]
    fn test_leading_mention() {
        assert_eq!(leading_mention("Smith singled to left."), Some("Smith".to_string()));
        assert_eq!(
            leading_mention("J. Smith walked."),
            Some("J. Smith".to_string())
        );
        assert_eq!(leading_mention("struck out looking"), None);
    }

    #[test]
    fn test_ord_restarts_per_half_inning() {
        let mut db = db_with_roster();
        let mut stats = LoadStats::default();
        let rows = vec![
            play("5001", "1", "top", "Smith singled to left. (1-0 B)"),
            play("5001", "1", "top", "Smith stole second."),
            play("5001", "2", "top", "Smith flied out to cf."),
        ];
        assert_eq!(copy_play_by_play(&mut db, &rows, 2019, &mut stats).unwrap(), 3);

        let ords: Vec<(i64, i64)> = db
            .connection()
            .prepare("SELECT inning, ord FROM play_by_play ORDER BY inning, ord")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(ords, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_inning_summary_rows_dropped() {
        let mut db = db_with_roster();
        let mut stats = LoadStats::default();
        let mut summary = play("5001", "1", "top", "R: 2 H: 3 E: 0 LOB: 1");
        summary.pbp_type = "inning_summary".to_string();
        let rows = vec![
            play("5001", "1", "top", "Smith singled to left."),
            summary,
            play("5001", "1", "top", "Smith stole second."),
        ];

        assert_eq!(copy_play_by_play(&mut db, &rows, 2019, &mut stats).unwrap(), 2);
        // The summary did not consume an ordering slot either.
        let max_ord: i64 = db
            .connection()
            .query_row("SELECT MAX(ord) FROM play_by_play", [], |r| r.get(0))
            .unwrap();
        assert_eq!(max_ord, 2);
    }

    #[test]
    fn test_mention_resolved_and_game_skipped_on_rerun() {
        let mut db = db_with_roster();
        let mut stats = LoadStats::default();
        let rows = vec![play("5001", "1", "top", "Smith singled to left. (1-0 B)")];

        copy_play_by_play(&mut db, &rows, 2019, &mut stats).unwrap();
        assert_eq!(stats.pbp_mentions_matched, 1);

        let (pitches, roster_id): (String, Option<i64>) = db
            .connection()
            .query_row("SELECT pitches, roster_id FROM play_by_play", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(pitches, "1-0 B");
        assert!(roster_id.is_some());

        assert_eq!(copy_play_by_play(&mut db, &rows, 2019, &mut stats).unwrap(), 0);
    }
}
