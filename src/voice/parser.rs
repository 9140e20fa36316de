//! Voice Transcript Parser
//!
//! Runs the rule cascade from [`super::patterns`] over a normalized transcript
//! and fills a sparse [`VoiceParseResult`]. Tokens naming a service, type,
//! place or address are resolved against the caller's reference lists.

use super::patterns::{Rule, RULES};
use super::result::{Field, VoiceParseResult};
use crate::config::Config;
use crate::core::TextNormalizer;
use crate::error::{GigError, GigResult};
use crate::utils::{shorten_address, CandidateMatcher, FuzzyResolver};
use regex::Captures;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Known values a transcript token can resolve to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceLists {
    pub services: Vec<String>,
    pub types: Vec<String>,
    pub places: Vec<String>,
    pub addresses: Vec<String>,
}

impl ReferenceLists {
    /// Load lists from a JSON file (`{"services": [...], "places": [...]}`)
    pub fn from_json_file(path: &Path) -> GigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GigError::ReferenceLists(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
            && self.types.is_empty()
            && self.places.is_empty()
            && self.addresses.is_empty()
    }
}

/// Transcript parser with an injected candidate matcher.
pub struct VoiceParser<M = FuzzyResolver> {
    matcher: M,
    normalizer: TextNormalizer,
}

impl VoiceParser<FuzzyResolver> {
    pub fn new() -> Self {
        Self::with_matcher(FuzzyResolver::default())
    }

    /// Parser using the configured cutoff and corrections
    pub fn from_config(config: &Config) -> Self {
        Self::with_matcher(FuzzyResolver::new(config.match_cutoff))
            .with_corrections(config.voice_corrections.clone())
    }
}

impl Default for VoiceParser<FuzzyResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: CandidateMatcher> VoiceParser<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            matcher,
            normalizer: TextNormalizer::default(),
        }
    }

    /// Apply user corrections ("door dash" -> "DoorDash") before matching
    pub fn with_corrections(mut self, corrections: HashMap<String, String>) -> Self {
        self.normalizer = TextNormalizer::new(corrections);
        self
    }

    /// Parse one transcript. Never fails; unrecognized input yields an empty result.
    pub fn parse(&self, transcript: &str, lists: &ReferenceLists) -> VoiceParseResult {
        let mut result = VoiceParseResult::default();
        let text = self.normalizer.normalize(transcript);
        if text.is_empty() {
            return result;
        }

        for rule in RULES.iter() {
            // Earlier rules win; a combined rule needs all of its fields free
            if rule.fields.iter().any(|f| result.has(*f))
                || rule.suppressed_by.iter().any(|f| result.has(*f))
            {
                continue;
            }
            let Some(caps) = rule.find(&text) else {
                continue;
            };
            debug!(
                "Voice rule {:?} matched '{}'",
                rule.kind,
                caps.get(0).map_or("", |m| m.as_str())
            );
            self.apply(rule, &caps, lists, &mut result);
        }

        debug!("Parsed {} field(s) from '{}'", result.len(), text);
        result
    }

    fn apply(
        &self,
        rule: &Rule,
        caps: &Captures<'_>,
        lists: &ReferenceLists,
        result: &mut VoiceParseResult,
    ) {
        for field in rule.fields {
            let Some(raw) = caps.name(field.key()).map(|m| m.as_str().trim()) else {
                continue;
            };
            if raw.is_empty() || result.has(*field) {
                continue;
            }
            self.set_field(*field, raw, lists, result);
        }
    }

    fn set_field(
        &self,
        field: Field,
        raw: &str,
        lists: &ReferenceLists,
        result: &mut VoiceParseResult,
    ) {
        match field {
            Field::Service => {
                result.service = self.matcher.find_best_match(raw, &lists.services);
            }
            Field::Type => {
                result.trip_type = Some(
                    self.matcher
                        .find_best_match(raw, &lists.types)
                        .unwrap_or_else(|| raw.to_lowercase()),
                );
            }
            Field::Place => {
                let cleaned = raw.trim_end_matches(|c: char| matches!(c, '.' | ',' | '-'));
                result.place = self.matcher.find_best_match(cleaned, &lists.places);
            }
            Field::Name => result.name = Some(title_case(raw)),
            Field::PickupAddress => result.pickup_address = self.resolve_address(raw, lists),
            Field::DropoffAddress => result.dropoff_address = self.resolve_address(raw, lists),
            Field::Pay => result.pay = self.normalizer.parse_amount(raw),
            Field::Tip => result.tip = self.normalizer.parse_amount(raw),
            Field::Bonus => result.bonus = self.normalizer.parse_amount(raw),
            Field::Cash => result.cash = self.normalizer.parse_amount(raw),
            Field::Distance => result.distance = self.normalizer.parse_amount(raw),
            Field::StartOdometer => result.start_odometer = self.reading(raw),
            Field::EndOdometer => result.end_odometer = self.reading(raw),
            Field::UnitNumber => {
                result.unit_number = Some(match self.normalizer.parse_number(raw) {
                    Some(n) => n.to_string(),
                    None => raw.to_uppercase(),
                });
            }
            Field::OrderNumber => result.order_number = Some(raw.to_string()),
        }
    }

    fn resolve_address(&self, raw: &str, lists: &ReferenceLists) -> Option<String> {
        let cleaned = shorten_address(raw.trim_end_matches(|c: char| matches!(c, '.' | ',')));
        if cleaned.is_empty() {
            return None;
        }
        Some(
            self.matcher
                .find_best_match(&cleaned, &lists.addresses)
                .unwrap_or(cleaned),
        )
    }

    /// Odometer readings are whole units
    fn reading(&self, raw: &str) -> Option<u64> {
        let value = self.normalizer.parse_amount(raw)?.floor();
        (value >= 0.0 && value <= u64::MAX as f64).then(|| value as u64)
    }
}

/// "j d" -> "J D". Capitals after the first letter are kept ("McDonald").
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a transcript with the default fuzzy resolver.
pub fn parse_transcript(transcript: &str, lists: &ReferenceLists) -> VoiceParseResult {
    VoiceParser::new().parse(transcript, lists)
}
