//! Record Types
//!
//! The entities a gig log holds. They are loaded read-only from a JSON export
//! and never mutated by matching or diagnostics.

use serde::{Deserialize, Serialize, Serializer};

/// A work shift. `key` identifies the shift and is what trips point back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shift {
    pub key: String,
    pub date: String,
    pub service: String,
    pub region: String,
    pub start: String,
    pub finish: String,
    /// Computed duration, blank until calculated
    pub time: String,
    pub trips: u32,
    pub total_trips: u32,
}

/// A single trip, linked to its shift through `key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trip {
    pub key: String,
    pub date: String,
    pub service: String,
    #[serde(rename = "type")]
    pub trip_type: String,
    pub place: String,
    pub name: String,
    pub pickup_time: String,
    pub dropoff_time: String,
    pub duration: String,
    pub start_address: String,
    pub end_address: String,
    pub exclude: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    pub place: String,
    pub trips: u32,
    /// Addresses this place has been picked up from
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address: String,
    pub trips: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Name {
    pub name: String,
    pub trips: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub service: String,
    pub trips: u32,
    pub shifts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Region {
    pub region: String,
    pub trips: u32,
    pub shifts: u32,
}

/// A trip with a place but no start address, plus the addresses known for
/// that place. Serializes as the trip with an `availableAddresses` list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripAddressGap<'a> {
    #[serde(flatten)]
    pub trip: &'a Trip,
    #[serde(serialize_with = "address_strings")]
    pub available_addresses: &'a [Address],
}

fn address_strings<S: Serializer>(addresses: &&[Address], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(addresses.iter().map(|a| a.address.as_str()))
}

/// The field a record is matched on.
pub trait Keyed {
    fn identity(&self) -> &str;
}

impl Keyed for Shift {
    fn identity(&self) -> &str {
        &self.key
    }
}

impl Keyed for Trip {
    fn identity(&self) -> &str {
        &self.key
    }
}

impl Keyed for Place {
    fn identity(&self) -> &str {
        &self.place
    }
}

impl Keyed for Address {
    fn identity(&self) -> &str {
        &self.address
    }
}

impl Keyed for Name {
    fn identity(&self) -> &str {
        &self.name
    }
}

impl Keyed for Service {
    fn identity(&self) -> &str {
        &self.service
    }
}

impl Keyed for Region {
    fn identity(&self) -> &str {
        &self.region
    }
}

impl Keyed for TripAddressGap<'_> {
    fn identity(&self) -> &str {
        &self.trip.key
    }
}

/// Kind of record a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Shift,
    Trip,
    Place,
    Address,
    Name,
    Service,
    Region,
}

/// A borrowed record of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordRef<'a> {
    Shift(&'a Shift),
    Trip(&'a Trip),
    Place(&'a Place),
    Address(&'a Address),
    Name(&'a Name),
    Service(&'a Service),
    Region(&'a Region),
    TripAddressGap(TripAddressGap<'a>),
}

impl RecordRef<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRef::Shift(_) => RecordKind::Shift,
            RecordRef::Trip(_) => RecordKind::Trip,
            RecordRef::Place(_) => RecordKind::Place,
            RecordRef::Address(_) => RecordKind::Address,
            RecordRef::Name(_) => RecordKind::Name,
            RecordRef::Service(_) => RecordKind::Service,
            RecordRef::Region(_) => RecordKind::Region,
            RecordRef::TripAddressGap(_) => RecordKind::Trip,
        }
    }

    pub fn identity(&self) -> &str {
        match self {
            RecordRef::Shift(r) => r.identity(),
            RecordRef::Trip(r) => r.identity(),
            RecordRef::Place(r) => r.identity(),
            RecordRef::Address(r) => r.identity(),
            RecordRef::Name(r) => r.identity(),
            RecordRef::Service(r) => r.identity(),
            RecordRef::Region(r) => r.identity(),
            RecordRef::TripAddressGap(r) => r.identity(),
        }
    }
}

impl<'a> From<&'a Shift> for RecordRef<'a> {
    fn from(r: &'a Shift) -> Self {
        RecordRef::Shift(r)
    }
}

impl<'a> From<&'a Trip> for RecordRef<'a> {
    fn from(r: &'a Trip) -> Self {
        RecordRef::Trip(r)
    }
}

impl<'a> From<&'a Place> for RecordRef<'a> {
    fn from(r: &'a Place) -> Self {
        RecordRef::Place(r)
    }
}

impl<'a> From<&'a Address> for RecordRef<'a> {
    fn from(r: &'a Address) -> Self {
        RecordRef::Address(r)
    }
}

impl<'a> From<&'a Name> for RecordRef<'a> {
    fn from(r: &'a Name) -> Self {
        RecordRef::Name(r)
    }
}

impl<'a> From<&'a Service> for RecordRef<'a> {
    fn from(r: &'a Service) -> Self {
        RecordRef::Service(r)
    }
}

impl<'a> From<&'a Region> for RecordRef<'a> {
    fn from(r: &'a Region) -> Self {
        RecordRef::Region(r)
    }
}

impl<'a> From<TripAddressGap<'a>> for RecordRef<'a> {
    fn from(r: TripAddressGap<'a>) -> Self {
        RecordRef::TripAddressGap(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_deserializes_camel_case_with_defaults() {
        let json = r#"{"key":"2024-01-01-0-DoorDash","type":"Pickup","pickupTime":"10:00","exclude":true}"#;
        let trip: Trip = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(trip.key, "2024-01-01-0-DoorDash");
        assert_eq!(trip.trip_type, "Pickup");
        assert_eq!(trip.pickup_time, "10:00");
        assert!(trip.exclude);
        assert!(trip.duration.is_empty());
    }

    #[test]
    fn test_record_ref_serializes_untagged() {
        let place = Place {
            place: "Starbucks".to_string(),
            trips: 3,
            ..Default::default()
        };
        let value = serde_json::to_value(RecordRef::from(&place)).expect("Failed to serialize");
        assert_eq!(
            value,
            serde_json::json!({"place": "Starbucks", "trips": 3, "addresses": []})
        );
    }

    #[test]
    fn test_place_addresses_deserialize() {
        let json = r#"{"place":"Store A","addresses":[{"address":"123 Main","lastTrip":""}]}"#;
        let place: Place = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(place.addresses.len(), 1);
        assert_eq!(place.addresses[0].address, "123 Main");
    }

    #[test]
    fn test_trip_address_gap_serializes_flat() {
        let trip = Trip {
            key: "2024-01-01-0-DoorDash".to_string(),
            place: "Store A".to_string(),
            ..Default::default()
        };
        let addresses = vec![Address {
            address: "123 Main".to_string(),
            trips: 4,
        }];
        let gap = TripAddressGap {
            trip: &trip,
            available_addresses: &addresses,
        };
        let r = RecordRef::from(gap);
        assert_eq!(r.kind(), RecordKind::Trip);
        assert_eq!(r.identity(), "2024-01-01-0-DoorDash");

        let value = serde_json::to_value(r).expect("Failed to serialize");
        assert_eq!(value["place"], "Store A");
        assert_eq!(value["type"], "");
        assert_eq!(value["availableAddresses"], serde_json::json!(["123 Main"]));
    }

    #[test]
    fn test_record_ref_kind_and_identity() {
        let name = Name {
            name: "Jeremy".to_string(),
            trips: 0,
        };
        let r = RecordRef::from(&name);
        assert_eq!(r.kind(), RecordKind::Name);
        assert_eq!(r.identity(), "Jeremy");
    }
}
