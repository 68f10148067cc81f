//! SQLite session for the NCAA baseball database.
//!
//! The session object owns the connection and is passed explicitly into
//! every copier; there is no ambient global state. Snapshot queries read
//! whole tables into hash maps once per load pass so the copiers never
//! issue per-record existence queries. Batch writes go through
//! `bulk_insert`, one transaction per entity batch with a cached prepared
//! statement.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::Connection;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::fuzzy::RosterCandidate;
use crate::models::StatType;
use crate::resolve::EntitySnapshot;

pub const DEFAULT_CONFERENCE_NAME: &str = "Other";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS school (
        id INTEGER PRIMARY KEY,
        ncaa_id INTEGER UNIQUE,
        name TEXT NOT NULL UNIQUE,
        nickname TEXT,
        url TEXT
    );

    CREATE TABLE IF NOT EXISTS conference (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        division INTEGER,
        UNIQUE(name, division)
    );

    CREATE TABLE IF NOT EXISTS coach (
        id INTEGER PRIMARY KEY,
        ncaa_id INTEGER,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        alma_mater TEXT,
        year_graduated INTEGER
    );

    CREATE TABLE IF NOT EXISTS stadium (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        capacity INTEGER,
        year_built INTEGER
    );

    CREATE TABLE IF NOT EXISTS team (
        id INTEGER PRIMARY KEY,
        year INTEGER NOT NULL,
        conference_id INTEGER NOT NULL REFERENCES conference(id),
        school_id INTEGER NOT NULL REFERENCES school(id),
        coach_id INTEGER REFERENCES coach(id),
        stadium_id INTEGER REFERENCES stadium(id),
        UNIQUE(year, school_id)
    );

    CREATE TABLE IF NOT EXISTS player (
        id INTEGER PRIMARY KEY,
        ncaa_id INTEGER,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS roster (
        id INTEGER PRIMARY KEY,
        team_id INTEGER NOT NULL REFERENCES team(id),
        player_id INTEGER NOT NULL REFERENCES player(id),
        class TEXT NOT NULL,
        UNIQUE(team_id, player_id)
    );

    CREATE TABLE IF NOT EXISTS game (
        id INTEGER PRIMARY KEY,
        ncaa_id INTEGER NOT NULL UNIQUE,
        away_team_id INTEGER NOT NULL REFERENCES team(id),
        home_team_id INTEGER NOT NULL REFERENCES team(id),
        date TEXT,
        location TEXT,
        attendance INTEGER
    );

    CREATE TABLE IF NOT EXISTS inning (
        game_id INTEGER NOT NULL REFERENCES game(id),
        team_id INTEGER NOT NULL REFERENCES team(id),
        inning INTEGER NOT NULL,
        runs INTEGER
    );

    CREATE TABLE IF NOT EXISTS game_position (
        game_id INTEGER NOT NULL REFERENCES game(id),
        roster_id INTEGER NOT NULL REFERENCES roster(id),
        position TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hitting_line (
        game_id INTEGER NOT NULL REFERENCES game(id),
        roster_id INTEGER NOT NULL REFERENCES roster(id),
        ab INTEGER, h INTEGER, dbl INTEGER, tpl INTEGER, hr INTEGER,
        bb INTEGER, ibb INTEGER, hbp INTEGER, r INTEGER, rbi INTEGER,
        k INTEGER, sf INTEGER, sh INTEGER, dp INTEGER, sb INTEGER,
        cs INTEGER
    );

    CREATE TABLE IF NOT EXISTS pitching_line (
        game_id INTEGER NOT NULL REFERENCES game(id),
        roster_id INTEGER NOT NULL REFERENCES roster(id),
        app INTEGER, gs INTEGER, ord INTEGER, w INTEGER, l INTEGER,
        sv INTEGER, ip REAL, p INTEGER, bf INTEGER, h INTEGER,
        dbl INTEGER, tpl INTEGER, hr INTEGER, bb INTEGER, ibb INTEGER,
        hbp INTEGER, r INTEGER, er INTEGER, ir INTEGER, irs INTEGER,
        fo INTEGER, go INTEGER, k INTEGER, kl INTEGER, sf INTEGER,
        sh INTEGER, bk INTEGER, wp INTEGER, cg INTEGER, sho INTEGER
    );

    CREATE TABLE IF NOT EXISTS fielding_line (
        game_id INTEGER NOT NULL REFERENCES game(id),
        roster_id INTEGER NOT NULL REFERENCES roster(id),
        po INTEGER, a INTEGER, e INTEGER, pb INTEGER, ci INTEGER,
        sb INTEGER, cs INTEGER, dp INTEGER, tp INTEGER
    );

    CREATE TABLE IF NOT EXISTS umpire (
        id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        UNIQUE(first_name, last_name)
    );

    CREATE TABLE IF NOT EXISTS game_umpire (
        game_id INTEGER NOT NULL REFERENCES game(id),
        umpire_id INTEGER NOT NULL REFERENCES umpire(id),
        position TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS play_by_play (
        game_id INTEGER NOT NULL REFERENCES game(id),
        team_id INTEGER NOT NULL REFERENCES team(id),
        inning INTEGER NOT NULL,
        side TEXT NOT NULL,
        ord INTEGER NOT NULL,
        text TEXT NOT NULL,
        pitches TEXT,
        roster_id INTEGER REFERENCES roster(id)
    );
";

/// Owned database session, threaded through every copier.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        Self::init(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;
             PRAGMA temp_store = MEMORY;",
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Seed the conference table with the default conference and the three
    /// per-division Independent rows. Safe to call every run.
    pub fn seed_default_conferences(&self) -> Result<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM conference WHERE name = ?1)",
            [DEFAULT_CONFERENCE_NAME],
            |row| row.get(0),
        )?;
        if !exists {
            self.conn.execute(
                "INSERT INTO conference(name, division) VALUES
                 (?1, NULL), ('Independent', 1), ('Independent', 2), ('Independent', 3)",
                [DEFAULT_CONFERENCE_NAME],
            )?;
        }
        Ok(())
    }

    pub fn default_conference_id(&self) -> Result<i64> {
        let id = self.conn.query_row(
            "SELECT id FROM conference WHERE name = ?1",
            [DEFAULT_CONFERENCE_NAME],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    // ========================================================================
    // Snapshot queries (one table scan each, taken at the start of a pass)
    // ========================================================================

    /// Schools keyed by source ID and by canonical name.
    pub fn school_snapshot(&self) -> Result<EntitySnapshot> {
        let mut snap = EntitySnapshot::new();
        let mut stmt = self.conn.prepare("SELECT id, ncaa_id, name FROM school")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let ncaa_id: Option<i64> = row.get(1)?;
            let name: String = row.get(2)?;
            snap.insert(ncaa_id, &name, id);
        }
        Ok(snap)
    }

    /// School nickname/url profiles keyed by internal id, for the
    /// update-if-changed refresh.
    pub fn school_profiles(&self) -> Result<FxHashMap<i64, (Option<String>, Option<String>)>> {
        let mut stmt = self.conn.prepare("SELECT id, nickname, url FROM school")?;
        let mut rows = stmt.query([])?;
        let mut profiles = FxHashMap::default();
        while let Some(row) = rows.next()? {
            profiles.insert(row.get::<_, i64>(0)?, (row.get(1)?, row.get(2)?));
        }
        Ok(profiles)
    }

    /// Conference name -> id for one division, plus the NULL-division
    /// default conference.
    pub fn conference_ids(&self, division: i64) -> Result<FxHashMap<String, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, id FROM conference WHERE division = ?1 OR division IS NULL",
        )?;
        let mut rows = stmt.query([division])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, String>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    pub fn stadium_ids(&self) -> Result<FxHashMap<String, i64>> {
        let mut stmt = self.conn.prepare("SELECT name, id FROM stadium")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, String>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    /// Coach source ID -> internal id.
    pub fn coach_ids(&self) -> Result<FxHashMap<i64, i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT ncaa_id, id FROM coach WHERE ncaa_id IS NOT NULL")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, i64>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    /// Coach (ncaa_id, first, last) natural keys already present.
    pub fn coach_keys(&self) -> Result<FxHashSet<(i64, String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT ncaa_id, first_name, last_name FROM coach WHERE ncaa_id IS NOT NULL")?;
        let mut rows = stmt.query([])?;
        let mut keys = FxHashSet::default();
        while let Some(row) = rows.next()? {
            keys.insert((row.get(0)?, row.get(1)?, row.get(2)?));
        }
        Ok(keys)
    }

    /// Teams for one year, keyed by school source ID and school name.
    pub fn team_snapshot(&self, year: i64) -> Result<EntitySnapshot> {
        let mut stmt = self.conn.prepare(
            "SELECT team.id, school.ncaa_id, school.name
             FROM team JOIN school ON school.id = team.school_id
             WHERE team.year = ?1",
        )?;
        let mut rows = stmt.query([year])?;
        let mut snap = EntitySnapshot::new();
        while let Some(row) = rows.next()? {
            let team_id: i64 = row.get(0)?;
            let school_ncaa_id: Option<i64> = row.get(1)?;
            let school_name: String = row.get(2)?;
            snap.insert(school_ncaa_id, &school_name, team_id);
        }
        Ok(snap)
    }

    /// Player source ID -> internal id (players without one are omitted).
    pub fn player_ids(&self) -> Result<FxHashMap<i64, i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT ncaa_id, id FROM player WHERE ncaa_id IS NOT NULL")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, i64>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    /// (team_id, player_id) roster natural keys already present.
    pub fn roster_keys(&self) -> Result<FxHashSet<(i64, i64)>> {
        let mut stmt = self.conn.prepare("SELECT team_id, player_id FROM roster")?;
        let mut rows = stmt.query([])?;
        let mut keys = FxHashSet::default();
        while let Some(row) = rows.next()? {
            keys.insert((row.get(0)?, row.get(1)?));
        }
        Ok(keys)
    }

    /// Player source ID -> roster id, restricted to teams of one year.
    pub fn roster_source_ids(&self, year: i64) -> Result<FxHashMap<i64, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT player.ncaa_id, roster.id
             FROM roster
             JOIN player ON player.id = roster.player_id
             JOIN team ON team.id = roster.team_id
             WHERE team.year = ?1 AND player.ncaa_id IS NOT NULL",
        )?;
        let mut rows = stmt.query([year])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, i64>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    /// (first, last, team_id) -> roster id for one year, the name-based
    /// fallback when a box-score row has no usable player ID.
    pub fn roster_name_index(&self, year: i64) -> Result<FxHashMap<(String, String, i64), i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT player.first_name, player.last_name, roster.team_id, roster.id
             FROM roster
             JOIN player ON player.id = roster.player_id
             JOIN team ON team.id = roster.team_id
             WHERE team.year = ?1",
        )?;
        let mut rows = stmt.query([year])?;
        let mut index = FxHashMap::default();
        while let Some(row) = rows.next()? {
            index.insert((row.get(0)?, row.get(1)?, row.get(2)?), row.get(3)?);
        }
        Ok(index)
    }

    /// Roster candidates per team for one year, for fuzzy mention matching.
    pub fn team_rosters(&self, year: i64) -> Result<FxHashMap<i64, Vec<RosterCandidate>>> {
        let mut stmt = self.conn.prepare(
            "SELECT roster.team_id, roster.id, player.first_name, player.last_name
             FROM roster
             JOIN player ON player.id = roster.player_id
             JOIN team ON team.id = roster.team_id
             WHERE team.year = ?1",
        )?;
        let mut rows = stmt.query([year])?;
        let mut rosters: FxHashMap<i64, Vec<RosterCandidate>> = FxHashMap::default();
        while let Some(row) = rows.next()? {
            let team_id: i64 = row.get(0)?;
            rosters.entry(team_id).or_default().push(RosterCandidate {
                roster_id: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
            });
        }
        Ok(rosters)
    }

    /// School name -> internal id. Mutable in the games pass, which creates
    /// schools for opponents the id scrape never saw.
    pub fn school_name_ids(&self) -> Result<FxHashMap<String, i64>> {
        let mut stmt = self.conn.prepare("SELECT name, id FROM school")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, String>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    /// School name -> team id for one year.
    pub fn team_name_ids(&self, year: i64) -> Result<FxHashMap<String, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT school.name, team.id
             FROM team JOIN school ON school.id = team.school_id
             WHERE team.year = ?1",
        )?;
        let mut rows = stmt.query([year])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, String>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    /// Game source ID -> internal id.
    pub fn game_ids(&self) -> Result<FxHashMap<i64, i64>> {
        let mut stmt = self.conn.prepare("SELECT ncaa_id, id FROM game")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get::<_, i64>(0)?, row.get(1)?);
        }
        Ok(ids)
    }

    pub fn inning_keys(&self) -> Result<FxHashSet<(i64, i64)>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT game_id, team_id FROM inning")?;
        let mut rows = stmt.query([])?;
        let mut keys = FxHashSet::default();
        while let Some(row) = rows.next()? {
            keys.insert((row.get(0)?, row.get(1)?));
        }
        Ok(keys)
    }

    pub fn game_position_keys(&self) -> Result<FxHashSet<(i64, i64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT game_id, roster_id FROM game_position")?;
        let mut rows = stmt.query([])?;
        let mut keys = FxHashSet::default();
        while let Some(row) = rows.next()? {
            keys.insert((row.get(0)?, row.get(1)?));
        }
        Ok(keys)
    }

    pub fn box_line_keys(&self, stat_type: StatType) -> Result<FxHashSet<(i64, i64)>> {
        let sql = format!("SELECT game_id, roster_id FROM {}", stat_type.table());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut keys = FxHashSet::default();
        while let Some(row) = rows.next()? {
            keys.insert((row.get(0)?, row.get(1)?));
        }
        Ok(keys)
    }

    /// Umpires keyed by (first, last); there is no source ID for umpires.
    pub fn umpire_ids(&self) -> Result<FxHashMap<(String, String), i64>> {
        let mut stmt = self.conn.prepare("SELECT first_name, last_name, id FROM umpire")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashMap::default();
        while let Some(row) = rows.next()? {
            ids.insert((row.get(0)?, row.get(1)?), row.get(2)?);
        }
        Ok(ids)
    }

    /// Games that already have umpire assignments.
    pub fn umpire_game_ids(&self) -> Result<FxHashSet<i64>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT game_id FROM game_umpire")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashSet::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get(0)?);
        }
        Ok(ids)
    }

    /// Games that already have play-by-play loaded.
    pub fn pbp_game_ids(&self) -> Result<FxHashSet<i64>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT game_id FROM play_by_play")?;
        let mut rows = stmt.query([])?;
        let mut ids = FxHashSet::default();
        while let Some(row) = rows.next()? {
            ids.insert(row.get(0)?);
        }
        Ok(ids)
    }

    // ========================================================================
    // Single-row inserts (used when a required relation must exist mid-pass)
    // ========================================================================

    /// Insert a school discovered outside the school-id scrape (usually a
    /// non-NCAA opponent found in a game file). Returns the new internal id.
    pub fn add_school(&self, name: &str, ncaa_id: Option<i64>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO school(ncaa_id, name) VALUES(?1, ?2)",
            rusqlite::params![ncaa_id, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_school_profile(
        &self,
        ncaa_id: i64,
        name: &str,
        nickname: &str,
        url: &str,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO school(ncaa_id, name, nickname, url) VALUES(?1, ?2, ?3, ?4)",
            rusqlite::params![ncaa_id, name, nickname, url],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_school_profile(&self, school_id: i64, nickname: &str, url: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE school SET nickname = ?1, url = ?2 WHERE id = ?3",
            rusqlite::params![nickname, url, school_id],
        )?;
        Ok(())
    }

    /// Create a team in the default conference for a school with no
    /// conference listing (opponents discovered from game files).
    pub fn create_team(&self, year: i64, school_id: i64) -> Result<i64> {
        let conference_id = self.default_conference_id()?;
        self.conn.execute(
            "INSERT INTO team(year, conference_id, school_id) VALUES(?1, ?2, ?3)",
            rusqlite::params![year, conference_id, school_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_player(
        &self,
        ncaa_id: Option<i64>,
        first_name: &str,
        last_name: &str,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO player(ncaa_id, first_name, last_name) VALUES(?1, ?2, ?3)",
            rusqlite::params![ncaa_id, first_name, last_name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn create_roster(&self, team_id: i64, player_id: i64, class: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO roster(team_id, player_id, class) VALUES(?1, ?2, ?3)",
            rusqlite::params![team_id, player_id, class],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ========================================================================
    // Bulk insert
    // ========================================================================

    /// Write one entity batch in a single transaction. Each row must match
    /// `columns` in length and order.
    pub fn bulk_insert(&mut self, table: &str, columns: &[&str], rows: &[Vec<Value>]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let placeholders: Vec<String> =
            (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {}({}) VALUES({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                debug_assert_eq!(row.len(), columns.len());
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Compact and re-analyze after a full load.
    pub fn optimize(&self) -> Result<()> {
        self.conn.execute_batch("VACUUM; ANALYZE;")?;
        Ok(())
    }

    /// Row count for one table, used by the pass report and tests.
    pub fn count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_default_conferences_once() {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        db.seed_default_conferences().unwrap();
        assert_eq!(db.count("conference").unwrap(), 4);
        assert!(db.default_conference_id().unwrap() > 0);
    }

    #[test]
    fn test_school_snapshot_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let id = db.add_school("New York Tech", Some(123)).unwrap();
        let snap = db.school_snapshot().unwrap();
        assert_eq!(snap.resolve_source_id(123), Some(id));
        assert_eq!(snap.resolve_name("New York Tech"), Some(id));
    }

    #[test]
    fn test_bulk_insert_writes_all_rows() {
        let mut db = Database::open_in_memory().unwrap();
        let rows = vec![
            vec![Value::Integer(1), Value::Text("Alpha".into())],
            vec![Value::Integer(2), Value::Text("Beta".into())],
        ];
        db.bulk_insert("school", &["ncaa_id", "name"], &rows).unwrap();
        assert_eq!(db.count("school").unwrap(), 2);
    }

    #[test]
    fn test_create_team_uses_default_conference() {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_conferences().unwrap();
        let school_id = db.add_school("Somewhere", None).unwrap();
        let team_id = db.create_team(2019, school_id).unwrap();
        let snap = db.team_snapshot(2019).unwrap();
        assert_eq!(snap.resolve_name("Somewhere"), Some(team_id));
        assert!(db.team_snapshot(2020).unwrap().is_empty());
    }
}
