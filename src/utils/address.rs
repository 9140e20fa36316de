//! Street address shortening
//!
//! Spoken addresses arrive with full street words ("123 north main street").
//! Abbreviating them brings them closer to the stored address list.

/// Number of comma-separated parts kept by default.
pub const DEFAULT_ADDRESS_PARTS: usize = 2;

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("north", "N"),
    ("south", "S"),
    ("east", "E"),
    ("west", "W"),
    ("northeast", "NE"),
    ("northwest", "NW"),
    ("southeast", "SE"),
    ("southwest", "SW"),
    ("street", "St"),
    ("avenue", "Ave"),
    ("boulevard", "Blvd"),
    ("drive", "Dr"),
    ("road", "Rd"),
    ("lane", "Ln"),
    ("court", "Ct"),
    ("place", "Pl"),
    ("parkway", "Pkwy"),
    ("highway", "Hwy"),
    ("circle", "Cir"),
    ("terrace", "Ter"),
    ("square", "Sq"),
    ("trail", "Trl"),
];

/// Abbreviate street words in a single address part.
pub fn abbreviate_part(part: &str) -> String {
    part.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            ABBREVIATIONS
                .iter()
                .find(|(full, _)| *full == lower)
                .map(|(_, short)| short.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Abbreviate an address and keep its first `parts` comma-separated parts.
///
/// Empty parts are dropped before counting.
pub fn shorten_address_to(address: &str, parts: usize) -> String {
    address
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(parts)
        .map(abbreviate_part)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Abbreviate an address and keep the street and city.
pub fn shorten_address(address: &str) -> String {
    shorten_address_to(address, DEFAULT_ADDRESS_PARTS)
}
