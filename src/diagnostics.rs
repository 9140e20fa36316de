//! Data Diagnostics
//!
//! Runs the integrity checks over a loaded gig log: duplicate detection per
//! record kind plus simple predicate filters (empty shifts, orphaned trips,
//! missing durations, trips whose place has no start address).

use crate::error::{GigError, GigResult};
use crate::matcher::{
    find_duplicate_addresses, find_duplicate_names, find_duplicate_places,
    find_duplicate_regions, find_duplicate_services, find_duplicate_shifts, DuplicateGroups,
};
use crate::records::{
    Address, Name, Place, RecordKind, RecordRef, Region, Service, Shift, Trip, TripAddressGap,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Every record list of a gig log export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub shifts: Vec<Shift>,
    pub trips: Vec<Trip>,
    pub places: Vec<Place>,
    pub addresses: Vec<Address>,
    pub names: Vec<Name>,
    pub services: Vec<Service>,
    pub regions: Vec<Region>,
}

impl Dataset {
    pub fn from_json_str(content: &str) -> GigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a dataset from a JSON export on disk
    pub fn from_json_file(path: &Path) -> GigResult<Self> {
        if !path.exists() {
            return Err(GigError::Dataset(format!(
                "dataset not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&content)?;
        info!(
            "📂 Loaded {} shifts, {} trips from {}",
            dataset.shifts.len(),
            dataset.trips.len(),
            path.display()
        );
        Ok(dataset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One line of the diagnostic report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic<'a> {
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub item_kind: RecordKind,
    pub count: usize,
    pub items: Vec<RecordRef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Vec<RecordRef<'a>>>,
}

impl<'a> Diagnostic<'a> {
    /// A flat finding; severity is `Info` when nothing was found.
    fn flat(
        name: &'static str,
        description: &'static str,
        item_kind: RecordKind,
        problem: Severity,
        items: Vec<RecordRef<'a>>,
    ) -> Self {
        Self {
            name,
            description,
            severity: if items.is_empty() { Severity::Info } else { problem },
            item_kind,
            count: items.len(),
            items,
            groups: Vec::new(),
        }
    }

    fn duplicates<T>(
        name: &'static str,
        description: &'static str,
        item_kind: RecordKind,
        found: DuplicateGroups<'a, T>,
    ) -> Self
    where
        &'a T: Into<RecordRef<'a>>,
    {
        let (items, groups) = found.into_refs();
        Self {
            groups,
            ..Self::flat(name, description, item_kind, Severity::Warning, items)
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Shifts with no start, no finish and no trips
pub fn find_empty_shifts(shifts: &[Shift]) -> Vec<&Shift> {
    shifts
        .iter()
        .filter(|s| s.start.is_empty() && s.finish.is_empty() && s.trips == 0 && s.total_trips == 0)
        .collect()
}

/// Trips whose shift key is unknown, unless excluded
pub fn find_orphaned_trips<'a>(trips: &'a [Trip], shifts: &[Shift]) -> Vec<&'a Trip> {
    let shift_keys: HashSet<&str> = shifts.iter().map(|s| s.key.as_str()).collect();
    trips
        .iter()
        .filter(|t| !t.key.is_empty() && !shift_keys.contains(t.key.as_str()) && !t.exclude)
        .collect()
}

/// Shifts with start and finish times but no computed duration
pub fn find_shifts_without_duration(shifts: &[Shift]) -> Vec<&Shift> {
    shifts
        .iter()
        .filter(|s| !is_blank(&s.start) && !is_blank(&s.finish) && is_blank(&s.time))
        .collect()
}

/// Trips with pickup and dropoff times but no computed duration
pub fn find_trips_without_duration(trips: &[Trip]) -> Vec<&Trip> {
    trips
        .iter()
        .filter(|t| !is_blank(&t.pickup_time) && !is_blank(&t.dropoff_time) && is_blank(&t.duration))
        .collect()
}

/// Trips naming a place but lacking a start address, with the addresses on
/// record for that place (empty when the place is unknown).
pub fn find_trips_with_place_no_address<'a>(
    trips: &'a [Trip],
    places: &'a [Place],
) -> Vec<TripAddressGap<'a>> {
    // Later entries win for repeated place names
    let by_name: HashMap<&str, &'a Place> = places.iter().map(|p| (p.place.as_str(), p)).collect();
    trips
        .iter()
        .filter(|t| !is_blank(&t.place) && is_blank(&t.start_address))
        .map(|trip| TripAddressGap {
            trip,
            available_addresses: by_name
                .get(trip.place.as_str())
                .copied()
                .map_or(&[][..], |p| p.addresses.as_slice()),
        })
        .collect()
}

fn refs<'a, T>(records: Vec<&'a T>) -> Vec<RecordRef<'a>>
where
    &'a T: Into<RecordRef<'a>>,
{
    records.into_iter().map(Into::into).collect()
}

/// Run every check over the dataset, in report order.
pub fn run_diagnostics(data: &Dataset) -> Vec<Diagnostic<'_>> {
    let report = vec![
        Diagnostic::duplicates(
            "Duplicate Shifts",
            "Shifts with identical keys",
            RecordKind::Shift,
            find_duplicate_shifts(&data.shifts),
        ),
        Diagnostic::flat(
            "Empty Shifts",
            "Shifts with zero trips and no start/finish times",
            RecordKind::Shift,
            Severity::Warning,
            refs(find_empty_shifts(&data.shifts)),
        ),
        Diagnostic::flat(
            "Orphaned Trips",
            "Trips not associated with any shift",
            RecordKind::Trip,
            Severity::Error,
            refs(find_orphaned_trips(&data.trips, &data.shifts)),
        ),
        Diagnostic::flat(
            "Shifts Missing Duration",
            "Shifts with start and finish times but no duration",
            RecordKind::Shift,
            Severity::Warning,
            refs(find_shifts_without_duration(&data.shifts)),
        ),
        Diagnostic::flat(
            "Trips Missing Duration",
            "Trips with pickup and dropoff times but no duration",
            RecordKind::Trip,
            Severity::Warning,
            refs(find_trips_without_duration(&data.trips)),
        ),
        Diagnostic::duplicates(
            "Duplicate Places",
            "Places with different casing or variations",
            RecordKind::Place,
            find_duplicate_places(&data.places),
        ),
        Diagnostic::duplicates(
            "Duplicate Addresses",
            "Addresses with different casing or partial matches",
            RecordKind::Address,
            find_duplicate_addresses(&data.addresses),
        ),
        Diagnostic::duplicates(
            "Duplicate Names",
            "Names with different casing",
            RecordKind::Name,
            find_duplicate_names(&data.names),
        ),
        Diagnostic::duplicates(
            "Duplicate Services",
            "Services with different casing or variations",
            RecordKind::Service,
            find_duplicate_services(&data.services),
        ),
        Diagnostic::duplicates(
            "Duplicate Regions",
            "Regions with different casing",
            RecordKind::Region,
            find_duplicate_regions(&data.regions),
        ),
        Diagnostic::flat(
            "Trip Places Missing Address",
            "Trips with a place but no start address",
            RecordKind::Trip,
            Severity::Warning,
            find_trips_with_place_no_address(&data.trips, &data.places)
                .into_iter()
                .map(RecordRef::from)
                .collect(),
        ),
    ];

    for d in &report {
        debug!("{}: {} ({:?})", d.name, d.count, d.severity);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(key: &str, start: &str, finish: &str, time: &str, trips: u32) -> Shift {
        Shift {
            key: key.to_string(),
            start: start.to_string(),
            finish: finish.to_string(),
            time: time.to_string(),
            trips,
            ..Default::default()
        }
    }

    fn trip(key: &str, exclude: bool) -> Trip {
        Trip {
            key: key.to_string(),
            exclude,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_shifts() {
        let shifts = vec![
            shift("a", "", "", "", 0),
            shift("b", "09:00", "", "", 0),
            shift("c", "", "", "", 2),
        ];
        let empty = find_empty_shifts(&shifts);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].key, "a");
    }

    #[test]
    fn test_orphaned_trips() {
        let shifts = vec![shift("s1", "", "", "", 0)];
        let trips = vec![
            trip("s1", false),
            trip("s2", false),
            trip("s3", true),
            trip("", false),
        ];
        let orphans = find_orphaned_trips(&trips, &shifts);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].key, "s2");
    }

    #[test]
    fn test_missing_durations() {
        let shifts = vec![
            shift("a", "09:00", "17:00", "", 0),
            shift("b", "09:00", "17:00", "8:00", 0),
            shift("c", "09:00", " ", "", 0),
        ];
        assert_eq!(find_shifts_without_duration(&shifts).len(), 1);

        let trips = vec![
            Trip {
                pickup_time: "10:00".to_string(),
                dropoff_time: "10:20".to_string(),
                ..Default::default()
            },
            Trip {
                pickup_time: "10:00".to_string(),
                dropoff_time: "10:20".to_string(),
                duration: "0:20".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(find_trips_without_duration(&trips).len(), 1);
    }

    #[test]
    fn test_report_on_empty_dataset_is_all_info() {
        let data = Dataset::default();
        let report = run_diagnostics(&data);
        assert_eq!(report.len(), 11);
        assert!(report
            .iter()
            .all(|d| d.severity == Severity::Info && d.count == 0));
    }

    #[test]
    fn test_trips_with_place_no_address() {
        let places = vec![
            Place {
                place: "Store A".to_string(),
                addresses: vec![Address {
                    address: "123 Main".to_string(),
                    trips: 2,
                }],
                ..Default::default()
            },
            Place {
                place: "Store B".to_string(),
                ..Default::default()
            },
        ];
        let with_place = |place: &str, start: &str| Trip {
            place: place.to_string(),
            start_address: start.to_string(),
            ..Default::default()
        };
        let trips = vec![
            with_place("Store A", ""),
            with_place("Store A", "123 Main"),
            with_place("  ", ""),
            with_place("Unknown Diner", " "),
            with_place("Store B", ""),
        ];

        let gaps = find_trips_with_place_no_address(&trips, &places);
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0].trip.place, "Store A");
        assert_eq!(gaps[0].available_addresses.len(), 1);
        assert_eq!(gaps[0].available_addresses[0].address, "123 Main");
        assert_eq!(gaps[1].trip.place, "Unknown Diner");
        assert!(gaps[1].available_addresses.is_empty());
        assert!(gaps[2].available_addresses.is_empty());
    }

    #[test]
    fn test_orphans_are_errors() {
        let data = Dataset {
            trips: vec![trip("missing", false)],
            ..Default::default()
        };
        let report = run_diagnostics(&data);
        let orphans = report
            .iter()
            .find(|d| d.name == "Orphaned Trips")
            .expect("Orphaned Trips diagnostic missing");
        assert_eq!(orphans.severity, Severity::Error);
        assert_eq!(orphans.count, 1);
        assert_eq!(orphans.item_kind, RecordKind::Trip);
    }

    #[test]
    fn test_dataset_from_json() {
        let json = r#"{"shifts":[{"key":"k1","totalTrips":3}],"places":[{"place":"Costco"}]}"#;
        let data = Dataset::from_json_str(json).expect("Failed to parse dataset");
        assert_eq!(data.shifts[0].total_trips, 3);
        assert_eq!(data.places.len(), 1);
        assert!(data.trips.is_empty());
    }

    #[test]
    fn test_missing_dataset_file() {
        let err = Dataset::from_json_file(Path::new("/nonexistent/giglog.json")).unwrap_err();
        assert!(matches!(err, GigError::Dataset(_)));
    }
}
