//! Fuzzy matching of play-by-play name mentions against a team roster.
//!
//! Play-by-play text refers to players by fragments ("Smith singled", "J.
//! Smith"), never by id. For each candidate roster entry we find the longest
//! contiguous substring shared between the case-folded mention and the
//! candidate's folded "first last" name; the longest match wins, with ties
//! broken by Jaro-Winkler similarity over the full strings. There is no
//! confidence threshold: the best available candidate is returned even when
//! the match is weak, and two players sharing a last name are resolved by
//! the heuristic alone. Accepted risk, not a bug.

use strsim::jaro_winkler;

use crate::names::fold_name;

/// A roster candidate offered to the matcher.
#[derive(Clone, Debug)]
pub struct RosterCandidate {
    pub roster_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Best match for a mention, with the evidence behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct MentionMatch {
    pub roster_id: i64,
    pub match_len: usize,
    pub similarity: f64,
}

/// Length of the longest contiguous substring shared by `a` and `b`.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // One-row DP over b per character of a.
    let mut prev = vec![0usize; b.len() + 1];
    let mut best = 0;
    for &ca in &a {
        let mut row = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                row[j + 1] = prev[j] + 1;
                best = best.max(row[j + 1]);
            }
        }
        prev = row;
    }
    best
}

/// Resolve a free-text mention to the best-matching roster entry.
///
/// Returns `None` when the candidate set is empty or no candidate shares a
/// single character with the mention (some mentions are just jersey
/// numbers).
pub fn best_roster_match(mention: &str, candidates: &[RosterCandidate]) -> Option<MentionMatch> {
    let mention_folded = fold_name(mention);

    let mut best: Option<(i64, usize, String)> = None;
    for candidate in candidates {
        let full_name = format!(
            "{} {}",
            fold_name(&candidate.first_name),
            fold_name(&candidate.last_name)
        );
        let len = longest_common_substring(&mention_folded, &full_name);
        if len == 0 {
            continue;
        }
        match &best {
            None => best = Some((candidate.roster_id, len, full_name)),
            Some((_, best_len, best_name)) => {
                if len > *best_len {
                    best = Some((candidate.roster_id, len, full_name));
                } else if len == *best_len {
                    let old = jaro_winkler(best_name, &mention_folded);
                    let new = jaro_winkler(&full_name, &mention_folded);
                    if new > old {
                        best = Some((candidate.roster_id, len, full_name));
                    }
                }
            }
        }
    }

    best.map(|(roster_id, match_len, full_name)| MentionMatch {
        roster_id,
        match_len,
        similarity: jaro_winkler(&full_name, &mention_folded),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, first: &str, last: &str) -> RosterCandidate {
        RosterCandidate {
            roster_id: id,
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_longest_common_substring() {
        assert_eq!(longest_common_substring("smith", "john smith"), 5);
        assert_eq!(longest_common_substring("abc", "xyz"), 0);
        assert_eq!(longest_common_substring("", "anything"), 0);
        assert_eq!(longest_common_substring("banana", "ananas"), 5);
    }

    #[test]
    fn test_exact_last_name_wins() {
        let roster = vec![candidate(1, "John", "Smith"), candidate(2, "Mike", "Jones")];
        let m = best_roster_match("Smith", &roster).unwrap();
        assert_eq!(m.roster_id, 1);
        assert_eq!(m.match_len, 5);
    }

    #[test]
    fn test_tie_broken_by_jaro_winkler() {
        // Both candidates share the 5-char substring "smith" with the
        // mention. Jaro-Winkler over the full names decides: "smithson lee"
        // starts with the mention itself, so its prefix boost beats
        // "john smith", whose match sits at the end of the name.
        let roster = vec![
            candidate(1, "John", "Smith"),
            candidate(2, "Smithson", "Lee"),
        ];
        let m = best_roster_match("Smith", &roster).unwrap();
        assert_eq!(m.roster_id, 2);
    }

    #[test]
    fn test_longer_mention_outranks_tie_break() {
        // "J. Smith" shares " smith" (6 chars) with "john smith" but only
        // "smith" (5) with "smithson lee"; the longer substring wins before
        // any similarity comparison happens.
        let roster = vec![
            candidate(1, "John", "Smith"),
            candidate(2, "Smithson", "Lee"),
        ];
        let m = best_roster_match("J. Smith", &roster).unwrap();
        assert_eq!(m.roster_id, 1);
        assert_eq!(m.match_len, 6);
    }

    #[test]
    fn test_no_overlap_returns_none() {
        let roster = vec![candidate(1, "John", "Smith")];
        assert_eq!(best_roster_match("44", &roster), None);
        assert_eq!(best_roster_match("Smith", &[]), None);
    }

    #[test]
    fn test_accent_folded_mention() {
        let roster = vec![candidate(1, "José", "Peña"), candidate(2, "Bob", "Ward")];
        let m = best_roster_match("Pena", &roster).unwrap();
        assert_eq!(m.roster_id, 1);
    }
}
