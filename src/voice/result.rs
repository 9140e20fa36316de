//! Parsed voice trip entry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields a transcript can fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Service,
    Type,
    Place,
    Name,
    PickupAddress,
    DropoffAddress,
    Pay,
    Tip,
    Bonus,
    Cash,
    Distance,
    StartOdometer,
    EndOdometer,
    UnitNumber,
    OrderNumber,
}

impl Field {
    /// Key used in the serialized result
    pub fn key(&self) -> &'static str {
        match self {
            Field::Service => "service",
            Field::Type => "type",
            Field::Place => "place",
            Field::Name => "name",
            Field::PickupAddress => "pickupAddress",
            Field::DropoffAddress => "dropoffAddress",
            Field::Pay => "pay",
            Field::Tip => "tip",
            Field::Bonus => "bonus",
            Field::Cash => "cash",
            Field::Distance => "distance",
            Field::StartOdometer => "startOdometer",
            Field::EndOdometer => "endOdometer",
            Field::UnitNumber => "unitNumber",
            Field::OrderNumber => "orderNumber",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sparse set of fields extracted from one transcript.
///
/// Only fields with a successful match are present; absent fields are omitted
/// from the serialized form, never written as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceParseResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_odometer: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_odometer: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
}

impl VoiceParseResult {
    /// Whether `field` holds a value
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Service => self.service.is_some(),
            Field::Type => self.trip_type.is_some(),
            Field::Place => self.place.is_some(),
            Field::Name => self.name.is_some(),
            Field::PickupAddress => self.pickup_address.is_some(),
            Field::DropoffAddress => self.dropoff_address.is_some(),
            Field::Pay => self.pay.is_some(),
            Field::Tip => self.tip.is_some(),
            Field::Bonus => self.bonus.is_some(),
            Field::Cash => self.cash.is_some(),
            Field::Distance => self.distance.is_some(),
            Field::StartOdometer => self.start_odometer.is_some(),
            Field::EndOdometer => self.end_odometer.is_some(),
            Field::UnitNumber => self.unit_number.is_some(),
            Field::OrderNumber => self.order_number.is_some(),
        }
    }

    /// Present fields, in declaration order
    pub fn fields(&self) -> Vec<Field> {
        ALL_FIELDS.iter().copied().filter(|f| self.has(*f)).collect()
    }

    pub fn len(&self) -> usize {
        self.fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const ALL_FIELDS: [Field; 15] = [
    Field::Service,
    Field::Type,
    Field::Place,
    Field::Name,
    Field::PickupAddress,
    Field::DropoffAddress,
    Field::Pay,
    Field::Tip,
    Field::Bonus,
    Field::Cash,
    Field::Distance,
    Field::StartOdometer,
    Field::EndOdometer,
    Field::UnitNumber,
    Field::OrderNumber,
];
