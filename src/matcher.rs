//! Fuzzy Record Matcher
//!
//! Partitions records of one kind into duplicate groups.
//!
//! Grouping is greedy and anchor-based: the first unprocessed record becomes the
//! anchor and every later unprocessed record is compared against the anchor only,
//! never against members already added. Chained similarity (A~B, B~C, A≁C) can
//! therefore yield groups whose members are not all mutually similar, and an
//! atypical anchor can miss a group. Diagnostic output depends on this exact
//! behavior.

use crate::records::{Address, Keyed, Name, Place, RecordRef, Region, Service, Shift};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Similarity rule for one record kind.
#[derive(Debug, Clone, Copy)]
pub struct MatchRule {
    /// Identities shorter than this (in chars, after trim) are never compared
    pub min_len: usize,
    /// Compares two trimmed, lower-cased identities
    pub similar: fn(&str, &str) -> bool,
}

impl MatchRule {
    pub const PLACE: MatchRule = MatchRule {
        min_len: 2,
        similar: equal_or_contains,
    };

    pub const ADDRESS: MatchRule = MatchRule {
        min_len: 5,
        similar: address_similar,
    };

    pub const NAME: MatchRule = MatchRule {
        min_len: 2,
        similar: exact,
    };

    pub const SERVICE: MatchRule = MatchRule {
        min_len: 2,
        similar: equal_or_contains,
    };

    pub const REGION: MatchRule = MatchRule {
        min_len: 1,
        similar: exact,
    };
}

/// Case-insensitive, trimmed equality.
pub fn exact(a: &str, b: &str) -> bool {
    a == b
}

/// Equal, or one contains the other.
pub fn equal_or_contains(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}

/// Substring rule with comma-part suppression: different first parts with an
/// identical second part ("123 Main St, Springfield" vs "456 Main St,
/// Springfield") are never a match.
pub fn address_similar(a: &str, b: &str) -> bool {
    let a_parts: Vec<&str> = a.split(',').map(str::trim).collect();
    let b_parts: Vec<&str> = b.split(',').map(str::trim).collect();

    if a_parts[0] != b_parts[0]
        && a_parts.len() > 1
        && b_parts.len() > 1
        && a_parts[1] == b_parts[1]
    {
        return false;
    }

    equal_or_contains(a, b)
}

/// Duplicate groups found in one pass.
///
/// `items` is the concatenation of `groups` in group order.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroups<'a, T> {
    pub items: Vec<&'a T>,
    pub groups: Vec<Vec<&'a T>>,
}

impl<T> Default for DuplicateGroups<'_, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl<'a, T> DuplicateGroups<'a, T> {
    fn push_group(&mut self, group: Vec<&'a T>) {
        self.items.extend(group.iter().copied());
        self.groups.push(group);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Convert to kind-erased record references
    pub fn into_refs(self) -> (Vec<RecordRef<'a>>, Vec<Vec<RecordRef<'a>>>)
    where
        &'a T: Into<RecordRef<'a>>,
    {
        let items = self.items.into_iter().map(Into::into).collect();
        let groups = self
            .groups
            .into_iter()
            .map(|g| g.into_iter().map(Into::into).collect())
            .collect();
        (items, groups)
    }
}

/// Group records with the greedy anchor scan.
pub fn group_by_anchor<'a, T: Keyed>(records: &'a [T], rule: MatchRule) -> DuplicateGroups<'a, T> {
    // None marks identities too short to take part
    let keys: Vec<Option<String>> = records
        .iter()
        .map(|r| {
            let trimmed = r.identity().trim();
            (trimmed.chars().count() >= rule.min_len).then(|| trimmed.to_lowercase())
        })
        .collect();

    let mut result = DuplicateGroups::default();
    let mut processed: HashSet<usize> = HashSet::new();

    for i in 0..records.len() {
        if processed.contains(&i) {
            continue;
        }
        let Some(anchor) = keys[i].as_deref() else {
            continue;
        };

        let mut group = vec![&records[i]];
        for j in (i + 1)..records.len() {
            if processed.contains(&j) {
                continue;
            }
            let Some(candidate) = keys[j].as_deref() else {
                continue;
            };
            if (rule.similar)(anchor, candidate) {
                group.push(&records[j]);
                processed.insert(j);
            }
        }

        if group.len() > 1 {
            processed.insert(i);
            result.push_group(group);
        }
    }

    result
}

/// Shifts sharing an exact `key`, groups in first-seen key order.
///
/// Shifts with an empty key are not grouped.
pub fn find_duplicate_shifts(shifts: &[Shift]) -> DuplicateGroups<'_, Shift> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<Vec<&Shift>> = Vec::new();

    for shift in shifts {
        if shift.key.is_empty() {
            continue;
        }
        match index.get(shift.key.as_str()) {
            Some(&slot) => buckets[slot].push(shift),
            None => {
                index.insert(shift.key.as_str(), buckets.len());
                buckets.push(vec![shift]);
            }
        }
    }

    let mut result = DuplicateGroups::default();
    for bucket in buckets.into_iter().filter(|b| b.len() > 1) {
        result.push_group(bucket);
    }

    debug!(
        "Duplicate shifts: {} groups, {} items",
        result.groups.len(),
        result.items.len()
    );
    result
}

pub fn find_duplicate_places(places: &[Place]) -> DuplicateGroups<'_, Place> {
    let result = group_by_anchor(places, MatchRule::PLACE);
    debug!("Duplicate places: {} groups", result.groups.len());
    result
}

pub fn find_duplicate_addresses(addresses: &[Address]) -> DuplicateGroups<'_, Address> {
    let result = group_by_anchor(addresses, MatchRule::ADDRESS);
    debug!("Duplicate addresses: {} groups", result.groups.len());
    result
}

pub fn find_duplicate_names(names: &[Name]) -> DuplicateGroups<'_, Name> {
    let result = group_by_anchor(names, MatchRule::NAME);
    debug!("Duplicate names: {} groups", result.groups.len());
    result
}

pub fn find_duplicate_services(services: &[Service]) -> DuplicateGroups<'_, Service> {
    let result = group_by_anchor(services, MatchRule::SERVICE);
    debug!("Duplicate services: {} groups", result.groups.len());
    result
}

pub fn find_duplicate_regions(regions: &[Region]) -> DuplicateGroups<'_, Region> {
    let result = group_by_anchor(regions, MatchRule::REGION);
    debug!("Duplicate regions: {} groups", result.groups.len());
    result
}
