//! Known name corrections for the source site's inconsistent spellings.
//!
//! The stats site refers to the same school by different names on different
//! pages and in different years. Every scraped school name passes through
//! `canonical_school_name` before any existence check, so a school never
//! appears under two spellings in the database.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Scraped school-name variant -> canonical name.
pub static SCHOOL_NAME_CHANGES: Lazy<FxHashMap<&str, &str>> = Lazy::new(|| {
    let mut m = FxHashMap::default();
    m.insert("NYIT", "New York Tech");
    m.insert("Wheeling Jesuit", "Wheeling");
    m.insert("Cal St. LA", "Cal State LA");
    m.insert("California (PA)", "Cal U (PA)");
    m.insert("Robert Morris-Peoria", "Roosevelt-Peoria");
    m.insert("Incarnate Word", "UIW");
    m.insert("LIU Brooklyn", "LIU");
    m.insert("Coastal Caro.", "Coastal Carolina");
    m.insert("Loyola Marymount", "LMU (CA)");
    m.insert("Appalachian St.", "App State");
    m.insert("La.-Monroe", "ULM");
    m
});

/// Resolve a scraped school name to its canonical spelling.
pub fn canonical_school_name(name: &str) -> &str {
    SCHOOL_NAME_CHANGES.get(name).copied().unwrap_or(name)
}

/// Resolve a scraped conference name to the name stored in the database.
///
/// The site lists several flavors of independent schedule ("Div. I
/// Independent" etc.); all of them map to the seeded "Independent" rows.
/// "Mountain West" and "MWC" are ambiguous across divisions and are fixed
/// up by division number.
pub fn canonical_conference_name(name: &str, division: i64) -> &str {
    if name.contains("Independent") {
        return "Independent";
    }
    if division == 1 && name == "Mountain West" {
        return "MWC";
    }
    if division == 3 && name == "MWC" {
        return "Midwest Conference";
    }
    name
}
