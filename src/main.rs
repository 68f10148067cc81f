use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ncaa_load::copy::{box_scores, coaches, conferences, games, plays, rosters, schools, stadiums, teams, umpires};
use ncaa_load::db::Database;
use ncaa_load::models::{LoadStats, StatType};
use ncaa_load::{files, progress, safety};

#[derive(Parser)]
#[command(name = "ncaa-load")]
#[command(about = "Load scraped NCAA baseball CSV files into a SQLite database")]
struct Args {
    /// Scraped-data directory ({year}/division_{division}/{type}.csv)
    data_dir: PathBuf,

    /// Database file, created if missing; re-runs are idempotent
    database: PathBuf,

    /// Years to load: a single year or an inclusive range like 2012..2021
    #[arg(long, default_value = "2012..2021")]
    years: String,

    /// Divisions to load (comma-separated)
    #[arg(long, default_value = "1,2,3")]
    divisions: String,

    /// Hide progress bars for log-friendly output
    #[arg(long)]
    log_only: bool,

    /// Write the load report as JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn parse_years(raw: &str) -> Result<Vec<i64>> {
    if let Some((start, end)) = raw.split_once("..") {
        let start: i64 = start.trim().parse().context("invalid start year")?;
        let end: i64 = end.trim().parse().context("invalid end year")?;
        if start > end {
            bail!("year range {raw} is backwards");
        }
        return Ok((start..=end).collect());
    }
    Ok(vec![raw.trim().parse().context("invalid year")?])
}

fn parse_divisions(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(|d| {
            let division: i64 = d.trim().parse().context("invalid division")?;
            if !(1..=3).contains(&division) {
                bail!("division {division} is not 1, 2, or 3");
            }
            Ok(division)
        })
        .collect()
}

/// Read a per-season file, or report and skip when the scrape never
/// produced it. Partial scrapes are normal; a re-run picks them up.
fn read_or_skip<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    if !path.exists() {
        println!("  {} missing, skipping.", path.display());
        return Ok(None);
    }
    Ok(Some(files::read_rows(path)?))
}

fn read_maps_or_skip(path: &Path) -> Result<Option<Vec<rustc_hash::FxHashMap<String, String>>>> {
    if !path.exists() {
        println!("  {} missing, skipping.", path.display());
        return Ok(None);
    }
    Ok(Some(files::read_string_maps(path)?))
}

fn load_division(
    db: &mut Database,
    data_dir: &Path,
    year: i64,
    division: i64,
    stats: &mut LoadStats,
) -> Result<()> {
    println!("\n=== {year} division {division} ===");
    let path = |stem: &str| files::scrape_file_path(data_dir, year, division, stem);

    if let Some(rows) = read_or_skip(&path("conferences"))? {
        conferences::copy_conferences(db, &rows, division, stats)?;
    }
    if let Some(rows) = read_or_skip(&path("team_info"))? {
        schools::refresh_schools(db, &rows, stats)?;
    }

    let stadium_rows = read_or_skip(&path("stadiums"))?.unwrap_or_default();
    stadiums::copy_stadiums(db, &stadium_rows, stats)?;
    let coach_rows = read_or_skip(&path("coaches"))?.unwrap_or_default();
    coaches::copy_coaches(db, &coach_rows, stats)?;

    if let Some(rows) = read_or_skip(&path("conference_teams"))? {
        teams::create_teams(db, &rows, &coach_rows, &stadium_rows, year, division, stats)?;
    }

    if let Some(rows) = read_or_skip(&path("rosters"))? {
        rosters::copy_players(db, &rows, stats)?;
        rosters::create_rosters(db, &rows, year, stats)?;
    }

    if let Some(rows) = read_or_skip(&path("game_info"))? {
        games::copy_games(db, &rows, year, stats)?;
        umpires::copy_umpires(db, &rows, stats)?;
        umpires::create_game_umpires(db, &rows, stats)?;
    }
    let innings_path = path("game_innings");
    if innings_path.exists() {
        let records = files::read_raw_records(&innings_path)?;
        games::copy_game_innings(db, &records, year, stats)?;
    } else {
        println!("  {} missing, skipping.", innings_path.display());
    }

    if let Some(rows) = read_maps_or_skip(&path(StatType::Fielding.file_stem()))? {
        box_scores::create_game_positions(db, &rows, year, stats)?;
    }
    for stat_type in StatType::ALL {
        if let Some(rows) = read_maps_or_skip(&path(stat_type.file_stem()))? {
            box_scores::copy_box_scores(db, &rows, stat_type, year, stats)?;
        }
    }

    if let Some(rows) = read_or_skip(&path("play_by_play"))? {
        plays::copy_play_by_play(db, &rows, year, stats)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    progress::set_log_only(args.log_only);

    let years = parse_years(&args.years)?;
    let divisions = parse_divisions(&args.divisions)?;
    safety::validate_database_path(&args.database, &args.data_dir)?;

    let start = Instant::now();
    println!("Opening database: {}", args.database.display());
    let mut db = Database::open(&args.database)?;
    db.seed_default_conferences()?;

    let mut stats = LoadStats::default();
    let school_ids = files::school_ids_path(&args.data_dir);
    if let Some(rows) = read_or_skip(&school_ids)? {
        schools::copy_schools(&mut db, &rows, &mut stats)?;
    }

    for &year in &years {
        for &division in &divisions {
            load_division(&mut db, &args.data_dir, year, division, &mut stats)?;
        }
    }

    let spinner = progress::spinner("Optimizing database");
    db.optimize()?;
    spinner.finish_and_clear();

    let elapsed = start.elapsed();
    stats.elapsed_seconds = elapsed.as_secs_f64();

    println!("\n{:=<60}", "");
    println!("Load complete!");
    println!("  Schools: {}", db.count("school")?);
    println!("  Teams: {}", db.count("team")?);
    println!("  Games: {}", db.count("game")?);
    println!("  Elapsed: {}", progress::format_duration(elapsed));
    println!("{:=<60}", "");
    stats.log();

    if let Some(stats_path) = args.stats {
        stats.write_to_file(&stats_path)?;
        println!("Stats written to {}", stats_path.display());
    }

    Ok(())
}
