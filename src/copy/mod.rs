//! Copiers: one reconciliation routine per entity type.
//!
//! Every copier follows the same shape: take the pre-load snapshot of the
//! target table, alias-normalize each scraped row, resolve foreign keys by
//! source ID with name fallback, claim the natural key, and bulk-insert the
//! rows that survived. Skips are counted, never fatal.

pub mod box_scores;
pub mod coaches;
pub mod conferences;
pub mod games;
pub mod plays;
pub mod rosters;
pub mod schools;
pub mod stadiums;
pub mod teams;
pub mod umpires;
