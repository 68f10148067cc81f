//! Row structs for the scraped CSV files and the per-pass load report.
//!
//! Each CSV type deserializes into its own struct via serde. Numeric-looking
//! fields stay `String` at this layer because the site leaves them blank or
//! malformed often enough that parsing belongs at the reconciliation
//! boundary, not in the reader.

use serde::{Deserialize, Serialize};

// ============================================================================
// CSV Row Types
// ============================================================================

/// Row of the global `school_ids.csv` produced by the school-id scrape.
#[derive(Clone, Debug, Deserialize)]
pub struct SchoolIdRow {
    pub school_id: String,
    pub school_name: String,
}

/// Row of `team_info.csv`: nickname and website per school per year.
#[derive(Clone, Debug, Deserialize)]
pub struct TeamInfoRow {
    pub school_id: String,
    pub school_name: String,
    pub nickname: String,
    pub website: String,
}

/// Row of `conferences.csv`.
#[derive(Clone, Debug, Deserialize)]
pub struct ConferenceRow {
    pub conference_name: String,
}

/// Row of `conference_teams.csv`: school-to-conference membership for a year.
#[derive(Clone, Debug, Deserialize)]
pub struct ConferenceTeamRow {
    pub school_id: String,
    pub school_name: String,
    pub conference_name: String,
}

/// Row of `coaches.csv`.
#[derive(Clone, Debug, Deserialize)]
pub struct CoachRow {
    pub school_id: String,
    pub coach_id: String,
    pub coach_name: String,
    pub alma_mater: String,
    pub year_graduated: String,
}

/// Row of `stadiums.csv`.
#[derive(Clone, Debug, Deserialize)]
pub struct StadiumRow {
    pub school_id: String,
    pub stadium_name: String,
    pub capacity: String,
    pub year_built: String,
}

/// Row of `rosters.csv`. Player names arrive "Last, First".
#[derive(Clone, Debug, Deserialize)]
pub struct RosterRow {
    pub school_id: String,
    pub school_name: String,
    pub player_id: String,
    pub player_name: String,
    pub class: String,
}

/// Row of `game_info.csv`, including the four officiating assignments.
#[derive(Clone, Debug, Deserialize)]
pub struct GameInfoRow {
    pub game_id: String,
    pub away_school_name: String,
    pub home_school_name: String,
    pub date: String,
    pub location: String,
    pub attendance: String,
    #[serde(default)]
    pub hp_official: String,
    #[serde(default, rename = "1b_official")]
    pub first_base_official: String,
    #[serde(default, rename = "2b_official")]
    pub second_base_official: String,
    #[serde(default, rename = "3b_official")]
    pub third_base_official: String,
}

/// Row of `play_by_play.csv`.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayByPlayRow {
    pub game_id: String,
    pub school_name: String,
    pub school_id: String,
    pub inning: String,
    pub pbp_type: String,
    pub side: String,
    pub pbp_text: String,
}

// ============================================================================
// Enumerations
// ============================================================================

/// Roster classification. The site uses two-letter codes; anything it left
/// blank or mangled is stored as "n/a".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerClass {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Unknown,
}

impl PlayerClass {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "fr" => PlayerClass::Freshman,
            "so" => PlayerClass::Sophomore,
            "jr" => PlayerClass::Junior,
            "sr" => PlayerClass::Senior,
            _ => PlayerClass::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerClass::Freshman => "freshman",
            PlayerClass::Sophomore => "sophomore",
            PlayerClass::Junior => "junior",
            PlayerClass::Senior => "senior",
            PlayerClass::Unknown => "n/a",
        }
    }
}

/// The three box-score stat families, each with its own table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatType {
    Hitting,
    Pitching,
    Fielding,
}

impl StatType {
    pub const ALL: [StatType; 3] = [StatType::Hitting, StatType::Pitching, StatType::Fielding];

    pub fn as_str(self) -> &'static str {
        match self {
            StatType::Hitting => "hitting",
            StatType::Pitching => "pitching",
            StatType::Fielding => "fielding",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            StatType::Hitting => "hitting_line",
            StatType::Pitching => "pitching_line",
            StatType::Fielding => "fielding_line",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            StatType::Hitting => "box_score_hitting",
            StatType::Pitching => "box_score_pitching",
            StatType::Fielding => "box_score_fielding",
        }
    }
}

// ============================================================================
// Load Report
// ============================================================================

/// Aggregate counters for one load run, reported at exit and optionally
/// written as JSON.
#[derive(Default, Debug, Clone, Serialize)]
pub struct LoadStats {
    // Reference tables
    pub new_schools: usize,
    pub schools_updated: usize,
    pub new_conferences: usize,
    pub new_stadiums: usize,
    pub new_coaches: usize,

    // Season tables
    pub new_teams: usize,
    pub new_players: usize,
    pub new_roster_rows: usize,

    // Game tables
    pub new_games: usize,
    pub new_innings: usize,
    pub new_positions: usize,
    pub new_hitting_lines: usize,
    pub new_pitching_lines: usize,
    pub new_fielding_lines: usize,
    pub new_umpires: usize,
    pub new_umpire_games: usize,
    pub new_pbp_lines: usize,

    // Records created on the fly while resolving foreign keys
    pub schools_added_from_games: usize,
    pub teams_added_from_games: usize,
    pub players_added_from_box_scores: usize,
    pub rosters_added_from_box_scores: usize,

    // Fuzzy mention resolution
    pub pbp_mentions_matched: usize,
    pub pbp_mentions_unmatched: usize,

    // Skips, counted per failure class and reported, never fatal
    pub unknown_conferences: usize,
    pub unknown_schools: usize,
    pub nameless_players: usize,
    pub unresolved_rosters: usize,

    pub elapsed_seconds: f64,
}

impl LoadStats {
    pub fn add_box_lines(&mut self, stat_type: StatType, count: usize) {
        match stat_type {
            StatType::Hitting => self.new_hitting_lines += count,
            StatType::Pitching => self.new_pitching_lines += count,
            StatType::Fielding => self.new_fielding_lines += count,
        }
    }

    /// Log the report to stderr in JSON form.
    pub fn log(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[LOAD STATS]\n{}", json);
        }
    }

    /// Write the report to a JSON file.
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_class_codes() {
        assert_eq!(PlayerClass::from_code("Fr"), PlayerClass::Freshman);
        assert_eq!(PlayerClass::from_code("SO"), PlayerClass::Sophomore);
        assert_eq!(PlayerClass::from_code("jr"), PlayerClass::Junior);
        assert_eq!(PlayerClass::from_code("sr"), PlayerClass::Senior);
        assert_eq!(PlayerClass::from_code(""), PlayerClass::Unknown);
        assert_eq!(PlayerClass::from_code("N/A"), PlayerClass::Unknown);
        assert_eq!(PlayerClass::Unknown.as_str(), "n/a");
    }
}
