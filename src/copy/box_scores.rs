//! Box-score load: game positions plus hitting, pitching, and fielding
//! lines.
//!
//! Box-score files are the messiest scrape output: stat columns come and
//! go across years, headers drift, and cells hold stray footnote markers.
//! Rows deserialize to string maps and a per-stat-type column map
//! translates whatever headers the year used into the schema columns.

use anyhow::Result;
use rusqlite::types::Value;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::aliases::canonical_school_name;
use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{LoadStats, StatType};
use crate::names::split_name;
use crate::progress::file_progress;
use crate::resolve::parse_source_id;

type Row = FxHashMap<String, String>;

/// Schema column -> source header aliases, newest first.
type ColumnMap = &'static [(&'static str, &'static [&'static str])];

const HITTING_COLUMNS: ColumnMap = &[
    ("ab", &["ab"]),
    ("h", &["h"]),
    ("dbl", &["2b"]),
    ("tpl", &["3b"]),
    ("hr", &["hr"]),
    ("bb", &["bb"]),
    ("ibb", &["ibb"]),
    ("hbp", &["hbp"]),
    ("r", &["r"]),
    ("rbi", &["rbi"]),
    ("k", &["k", "so"]),
    ("sf", &["sf"]),
    ("sh", &["sh"]),
    ("dp", &["opp dp", "dp"]),
    ("sb", &["sb"]),
    ("cs", &["cs"]),
];

const PITCHING_COLUMNS: ColumnMap = &[
    ("app", &["app"]),
    ("gs", &["gs"]),
    ("ord", &["ordappeared", "ord appeared"]),
    ("w", &["w"]),
    ("l", &["l"]),
    ("sv", &["sv"]),
    ("ip", &["ip"]),
    ("p", &["pitches"]),
    ("bf", &["bf"]),
    ("h", &["h"]),
    ("dbl", &["2b-a"]),
    ("tpl", &["3b-a"]),
    ("hr", &["hr-a"]),
    ("bb", &["bb"]),
    ("ibb", &["ibb"]),
    ("hbp", &["hb", "hbp"]),
    ("r", &["r"]),
    ("er", &["er"]),
    ("ir", &["inh run", "ir"]),
    ("irs", &["inh run score", "irs"]),
    ("fo", &["fo"]),
    ("go", &["go"]),
    ("k", &["so", "k"]),
    ("kl", &["kl"]),
    ("sf", &["sfa", "sf"]),
    ("sh", &["sha", "sh"]),
    ("bk", &["bk"]),
    ("wp", &["wp"]),
    ("cg", &["cg"]),
    ("sho", &["sho"]),
];

const FIELDING_COLUMNS: ColumnMap = &[
    ("po", &["po"]),
    ("a", &["a"]),
    ("e", &["e"]),
    ("pb", &["pb"]),
    ("ci", &["ci"]),
    ("sb", &["sba", "sb"]),
    ("cs", &["csb", "cs"]),
    ("dp", &["dp"]),
    ("tp", &["tp"]),
];

fn column_map(stat_type: StatType) -> ColumnMap {
    match stat_type {
        StatType::Hitting => HITTING_COLUMNS,
        StatType::Pitching => PITCHING_COLUMNS,
        StatType::Fielding => FIELDING_COLUMNS,
    }
}

/// Convert one stat cell. An absent column is NULL, a blank cell is 0,
/// and a cell with footnote markers keeps its digits.
fn stat_value(row: &Row, aliases: &[&str]) -> Value {
    let Some(raw) = aliases.iter().find_map(|a| row.get(*a)) else {
        return Value::Null;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Integer(0);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Real(f);
    }
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if let Ok(n) = digits.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(f) = digits.parse::<f64>() {
        return Value::Real(f);
    }
    Value::Null
}

// Multi-character codes first so "cf" is not consumed as "c" + "f".
const POSITION_CODES: [&str; 13] =
    ["1b", "2b", "3b", "ss", "lf", "cf", "rf", "dh", "dp", "ph", "pr", "c", "p"];

/// Parse a compound position string like "prlf" into individual codes.
/// "dp" (designated player) is stored as "dh".
pub fn parse_positions(raw: &str) -> Vec<&'static str> {
    let mut remaining = raw.trim().to_lowercase();
    let mut positions = Vec::new();
    for code in POSITION_CODES {
        while let Some(i) = remaining.find(code) {
            remaining.replace_range(i..i + code.len(), "");
            positions.push(if code == "dp" { "dh" } else { code });
        }
    }
    positions
}

/// Resolver shared by the positions and box-score passes: player source ID
/// first, (first, last, team) name lookup second.
struct RosterLookup {
    by_source_id: FxHashMap<i64, i64>,
    by_name: FxHashMap<(String, String, i64), i64>,
}

impl RosterLookup {
    fn load(db: &Database, year: i64) -> Result<Self> {
        Ok(Self {
            by_source_id: db.roster_source_ids(year)?,
            by_name: db.roster_name_index(year)?,
        })
    }

    fn resolve(&self, player_sid: Option<i64>, player_name: &str, team_id: i64) -> Option<i64> {
        if let Some(sid) = player_sid {
            if let Some(&id) = self.by_source_id.get(&sid) {
                return Some(id);
            }
        }
        let name = split_name(player_name)?;
        self.by_name.get(&(name.first, name.last, team_id)).copied()
    }
}

fn row_team(row: &Row, teams: &crate::resolve::EntitySnapshot) -> Option<(i64, String)> {
    let name = canonical_school_name(row.get("school_name").map_or("", |s| s.as_str()));
    let sid = row.get("school_id").and_then(|s| parse_source_id(s));
    match teams.resolve(sid, name) {
        Some(team_id) => Some((team_id, name.to_string())),
        None => None,
    }
}

/// Create game-position rows from the fielding box score, filling roster
/// holes on the way: a known player missing a roster row gets one, an
/// unknown player gets a player row too. Roster files miss transfers and
/// mid-season additions; the box scores are authoritative about who
/// actually played.
pub fn create_game_positions(
    db: &mut Database,
    rows: &[Row],
    year: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let teams = db.team_snapshot(year)?;
    let game_ids = db.game_ids()?;
    let player_ids = db.player_ids()?;
    let mut rosters = RosterLookup::load(db, year)?;
    let mut keys = KeySet::from_existing(db.game_position_keys()?);

    let mut unknown_schools: FxHashSet<String> = FxHashSet::default();
    let mut batch = Vec::new();
    for row in rows {
        let Some(&game_id) = row
            .get("game_id")
            .and_then(|s| parse_source_id(s))
            .and_then(|sid| game_ids.get(&sid))
        else {
            continue;
        };
        let Some((team_id, _)) = row_team(row, &teams) else {
            unknown_schools.insert(
                canonical_school_name(row.get("school_name").map_or("", |s| s.as_str()))
                    .to_string(),
            );
            continue;
        };
        let player_name = row.get("player").map_or("", |s| s.as_str());
        let player_sid = row.get("player_id").and_then(|s| parse_source_id(s));

        let roster_id = match rosters.resolve(player_sid, player_name, team_id) {
            Some(id) => id,
            None => {
                let Some(name) = split_name(player_name) else {
                    stats.nameless_players += 1;
                    continue;
                };
                let player_id = match player_sid.and_then(|sid| player_ids.get(&sid)) {
                    Some(&id) => id,
                    None => {
                        stats.players_added_from_box_scores += 1;
                        db.add_player(player_sid, &name.first, &name.last)?
                    }
                };
                let roster_id = db.create_roster(team_id, player_id, "n/a")?;
                stats.rosters_added_from_box_scores += 1;
                if let Some(sid) = player_sid {
                    rosters.by_source_id.insert(sid, roster_id);
                }
                rosters.by_name.insert((name.first, name.last, team_id), roster_id);
                roster_id
            }
        };

        if !keys.claim((game_id, roster_id)) {
            continue;
        }
        for position in parse_positions(row.get("pos").map_or("", |s| s.as_str())) {
            batch.push(vec![
                Value::Integer(game_id),
                Value::Integer(roster_id),
                Value::Text(position.to_string()),
            ]);
        }
    }

    db.bulk_insert("game_position", &["game_id", "roster_id", "position"], &batch)?;
    stats.new_positions += batch.len();
    stats.unknown_schools += unknown_schools.len();
    println!("Creating game positions... {} position rows.", batch.len());
    if !unknown_schools.is_empty() {
        println!("  unknown schools skipped: {:?}", unknown_schools);
    }
    Ok(batch.len())
}

/// Copy one stat type's box-score lines, keyed by (game, roster). Runs
/// after the positions pass, so roster holes have already been filled
/// from the fielding file; a player appearing only in hitting or pitching
/// with no resolvable roster is counted and skipped.
pub fn copy_box_scores(
    db: &mut Database,
    rows: &[Row],
    stat_type: StatType,
    year: i64,
    stats: &mut LoadStats,
) -> Result<usize> {
    let teams = db.team_snapshot(year)?;
    let game_ids = db.game_ids()?;
    let rosters = RosterLookup::load(db, year)?;
    let mut keys = KeySet::from_existing(db.box_line_keys(stat_type)?);
    let columns = column_map(stat_type);

    let pb = file_progress(rows.len() as u64, &format!("Copying {} lines", stat_type.as_str()));
    let mut unresolved = 0usize;
    let mut batch = Vec::new();
    for row in rows {
        pb.inc(1);
        let Some(&game_id) = row
            .get("game_id")
            .and_then(|s| parse_source_id(s))
            .and_then(|sid| game_ids.get(&sid))
        else {
            continue;
        };
        let Some((team_id, _)) = row_team(row, &teams) else {
            unresolved += 1;
            continue;
        };
        let player_name = row.get("player").map_or("", |s| s.as_str());
        let player_sid = row.get("player_id").and_then(|s| parse_source_id(s));
        let Some(roster_id) = rosters.resolve(player_sid, player_name, team_id) else {
            unresolved += 1;
            continue;
        };
        if !keys.claim((game_id, roster_id)) {
            continue;
        }

        let mut values = vec![Value::Integer(game_id), Value::Integer(roster_id)];
        for (_, aliases) in columns {
            values.push(stat_value(row, aliases));
        }
        batch.push(values);
    }

    pb.finish_and_clear();
    let mut insert_columns = vec!["game_id", "roster_id"];
    insert_columns.extend(columns.iter().map(|(col, _)| *col));
    db.bulk_insert(stat_type.table(), &insert_columns, &batch)?;
    stats.add_box_lines(stat_type, batch.len());
    stats.unresolved_rosters += unresolved;
    println!(
        "Copying {} lines... {} new lines, {} unresolved.",
        stat_type.as_str(),
        batch.len(),
        unresolved
    );
    Ok(batch.len())
}
