//! School list load and per-year nickname/url refresh.

use anyhow::Result;
use rusqlite::types::Value;

use crate::aliases::canonical_school_name;
use crate::db::Database;
use crate::loader::KeySet;
use crate::models::{LoadStats, SchoolIdRow, TeamInfoRow};
use crate::resolve::parse_source_id;

/// Copy the global school-id list into the school table. Only ncaa_id and
/// name are known at this point; nicknames and urls come later from the
/// per-year team-info files.
pub fn copy_schools(db: &mut Database, rows: &[SchoolIdRow], stats: &mut LoadStats) -> Result<usize> {
    let snapshot = db.school_snapshot()?;
    let mut claimed_ids: KeySet<i64> = KeySet::new();
    let mut claimed_names: KeySet<String> = KeySet::new();

    let mut batch = Vec::new();
    for row in rows {
        let name = canonical_school_name(&row.school_name);
        let source_id = parse_source_id(&row.school_id);

        let exists = match source_id {
            Some(sid) => snapshot.contains_source_id(sid) || snapshot.contains_name(name),
            None => snapshot.contains_name(name),
        };
        if exists {
            continue;
        }
        if let Some(sid) = source_id {
            if !claimed_ids.claim(sid) {
                continue;
            }
        }
        if !claimed_names.claim(name.to_string()) {
            continue;
        }

        batch.push(vec![
            source_id.map_or(Value::Null, Value::Integer),
            Value::Text(name.to_string()),
        ]);
    }

    db.bulk_insert("school", &["ncaa_id", "name"], &batch)?;
    stats.new_schools += batch.len();
    println!("Copying schools... {} new schools.", batch.len());
    Ok(batch.len())
}

/// Refresh nickname and url for schools seen in a year's team-info file.
/// Known schools are updated only when something changed; schools missing
/// from the id list are inserted with their profile.
pub fn refresh_schools(db: &mut Database, rows: &[TeamInfoRow], stats: &mut LoadStats) -> Result<()> {
    let snapshot = db.school_snapshot()?;
    let profiles = db.school_profiles()?;

    let mut inserted = 0usize;
    let mut updated = 0usize;
    for row in rows {
        let name = canonical_school_name(&row.school_name);
        let source_id = parse_source_id(&row.school_id);
        // Some nicknames repeat the school name; strip it out.
        let nickname = row.nickname.replace(name, "").trim().to_string();

        match snapshot.resolve(source_id, name) {
            Some(school_id) => {
                let (current_nickname, current_url) =
                    profiles.get(&school_id).cloned().unwrap_or((None, None));
                if current_nickname.as_deref() != Some(nickname.as_str())
                    || current_url.as_deref() != Some(row.website.as_str())
                {
                    db.update_school_profile(school_id, &nickname, &row.website)?;
                    updated += 1;
                }
            }
            None => {
                if let Some(sid) = source_id {
                    db.add_school_profile(sid, name, &nickname, &row.website)?;
                    inserted += 1;
                }
            }
        }
    }

    stats.new_schools += inserted;
    stats.schools_updated += updated;
    println!(
        "Adding nicknames and urls to schools... {} schools updated, {} added.",
        updated, inserted
    );
    Ok(())
}
