//! NCAA baseball scrape loader - shared modules for the binary and tests.

pub mod aliases;
pub mod copy;
pub mod db;
pub mod files;
pub mod fuzzy;
pub mod loader;
pub mod models;
pub mod names;
pub mod progress;
pub mod resolve;
pub mod safety;
