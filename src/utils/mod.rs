//! Utility modules

pub mod address;
pub mod fuzzy;

pub use address::shorten_address;
pub use fuzzy::{
    find_best_match, find_matches, normalize_label, CandidateMatcher, FuzzyMatch,
    FuzzyResolver,
};
