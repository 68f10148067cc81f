//! Name parsing and folding for scraped people names.
//!
//! Player names arrive as "Last, First", sometimes with a Jr./II/III/IV/V
//! suffix attached to either part. Umpire names arrive as "First Last" and
//! occasionally carry trailing markup from the scrape.

use any_ascii::any_ascii;
use unicode_normalization::UnicodeNormalization;

const SUFFIXES: [&str; 5] = ["Jr.", "II", "III", "IV", "V"];

/// A person name split into parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitName {
    pub first: String,
    pub last: String,
    pub suffix: Option<String>,
}

/// Split a "Last, First" scraped name.
///
/// Returns `None` when the last name is empty (some box-score rows carry a
/// bare comma). A missing first name becomes "N/A" because the schema
/// requires one.
pub fn split_name(name: &str) -> Option<SplitName> {
    let (last_raw, first_raw) = match name.split_once(',') {
        Some((l, f)) => (l.trim().to_string(), f.trim().to_string()),
        None => (name.trim().to_string(), String::new()),
    };

    let mut first = first_raw;
    let mut last = last_raw;
    let mut suffix = None;
    for sfx in SUFFIXES {
        let leading = format!("{sfx}, ");
        if first.starts_with(&leading) {
            suffix = Some(sfx.trim_end_matches('.').to_string());
            first = first.replacen(&leading, "", 1);
        }
        let trailing = format!(" {sfx}");
        if last.ends_with(&trailing) {
            suffix = Some(sfx.trim_end_matches('.').to_string());
            last.truncate(last.len() - trailing.len());
        }
    }

    if last.is_empty() {
        return None;
    }
    if first.is_empty() {
        first = "N/A".to_string();
    }
    Some(SplitName { first, last, suffix })
}

/// Split an umpire name of the form "First Last".
///
/// The scrape sometimes leaves an html-attribute tail on the last name;
/// anything from `\">` on is dropped. Single-token names are rejected.
pub fn split_umpire_name(name: &str) -> Option<(String, String)> {
    let (first, rest) = name.split_once(' ')?;
    let last = rest.split("\\\">").next().unwrap_or(rest).trim();
    if first.is_empty() || last.is_empty() {
        return None;
    }
    Some((first.to_string(), last.to_string()))
}

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0xFE20..=0xFE2F)
}

/// Fold a name to lowercase ASCII: NFKD decomposition, strip combining
/// marks, transliterate the rest. "Peña" and "Pena" compare equal after
/// folding, which matters because play-by-play text drops accents the
/// roster pages keep.
pub fn fold_name(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    any_ascii(&stripped).to_lowercase()
}
