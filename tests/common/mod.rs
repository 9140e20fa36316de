#![allow(dead_code)]

use giglog::diagnostics::Dataset;
use giglog::voice::ReferenceLists;
use std::path::{Path, PathBuf};

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Dropdown lists shaped like a real gig log
pub fn reference_lists() -> ReferenceLists {
    ReferenceLists {
        services: strings(&["DoorDash", "Uber", "Uber Eats", "Lyft", "Instacart"]),
        types: strings(&["Pickup", "Delivery", "Shopping", "Ride", "Dropoff"]),
        places: strings(&["McDonald's", "Starbucks", "Costco", "Taco Bell"]),
        addresses: strings(&["123 Main St", "456 Elm Ave"]),
    }
}

/// Case-insensitive exact lookup, standing in for the fuzzy resolver
pub fn exact_matcher(input: &str, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find(|c| c.eq_ignore_ascii_case(input.trim()))
        .cloned()
}

pub fn sample_dataset() -> Dataset {
    let json = r#"{
        "shifts": [
            {"key": "2024-03-01-0-DoorDash", "start": "09:00", "finish": "13:00", "time": "4:00", "trips": 2},
            {"key": "2024-03-01-0-DoorDash", "start": "09:00", "finish": "13:00", "time": "4:00", "trips": 2},
            {"key": "2024-03-02-0-Uber", "start": "17:00", "finish": "21:00", "time": "", "trips": 1},
            {"key": "2024-03-03-0-Lyft"}
        ],
        "trips": [
            {"key": "2024-03-01-0-DoorDash", "place": "McDonald's", "pickupTime": "09:10", "dropoffTime": "09:30", "duration": "0:20"},
            {"key": "2024-03-02-0-Uber", "pickupTime": "17:05", "dropoffTime": "17:40"},
            {"key": "2024-02-28-0-Uber"},
            {"key": "2024-02-27-0-Uber", "exclude": true}
        ],
        "places": [
            {"place": "Walmart"},
            {"place": "Walmart Supercenter"},
            {"place": "Costco"},
            {"place": "McDonald's", "addresses": [{"address": "55 Pine St", "lastTrip": "2024-03-01"}]},
            {"place": "a"},
            {"place": "ab"}
        ],
        "addresses": [
            {"address": "123 Main St, Springfield"},
            {"address": "456 Main St, Springfield"},
            {"address": "789 Oak Ave"},
            {"address": "789 oak ave, Springfield"}
        ],
        "names": [
            {"name": "Jeremy"},
            {"name": "JEREMY"},
            {"name": "Jeremy S"}
        ],
        "services": [
            {"service": "Uber"},
            {"service": "Uber Eats"},
            {"service": "DoorDash"}
        ],
        "regions": [
            {"region": "Downtown"},
            {"region": "downtown "},
            {"region": "Airport"}
        ]
    }"#;
    Dataset::from_json_str(json).expect("Failed to parse sample dataset")
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}
