//! giglog Library
//!
//! Data-quality tooling for gig-work logs: duplicate detection over shifts,
//! places, addresses, names and services, and parsing of dictated trip
//! entries into structured fields.

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod records;
pub mod utils;
pub mod voice;
