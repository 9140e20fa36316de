//! Core processing modules
//!
//! Text normalization shared by the transcript parser.

pub mod text_normalizer;

pub use text_normalizer::TextNormalizer;
