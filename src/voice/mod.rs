//! Voice trip entry
//!
//! Turns a dictated sentence ("I have a DoorDash pickup from McDonald's, pay is
//! $8 and tip $3") into the fields of a trip form.

pub mod parser;
pub mod patterns;
pub mod result;

pub use parser::{parse_transcript, ReferenceLists, VoiceParser};
pub use result::{Field, VoiceParseResult};
