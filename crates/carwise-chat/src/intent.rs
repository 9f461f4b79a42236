//! Intent matchers.
//!
//! Each matcher is a pure function of a normalized query and the knowledge
//! base. It returns `Some(reply)` when its intent applies and `None`
//! otherwise. [`Intent::PRIORITY`] fixes the order they are tried in; the
//! first reply wins.

use carwise_core::{BodyType, VehicleRecord};
use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeBase;
use crate::response;

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey"];

/// Driving-usage keywords and the body type each one maps to, in match order.
const USAGE_MAP: &[(&str, BodyType)] = &[
    ("city", BodyType::Hatchback),
    ("urban", BodyType::Hatchback),
    ("family", BodyType::Mpv),
    ("kids", BodyType::Mpv),
    ("highway", BodyType::Sedan),
    ("long distance", BodyType::Sedan),
    ("outstation", BodyType::Sedan),
];

/// Seat counts the seat matcher recognizes, in match order.
const SEAT_OPTIONS: &[u32] = &[5, 7];

const MAINTENANCE_WORDS: &[&str] = &["service", "maintenance"];

/// A category of query the advisor can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Explain,
    Comparison,
    DrivingUsage,
    SeatCount,
    Maintenance,
    VehicleInfo,
}

impl Intent {
    /// Dispatch order. Greeting shadows everything, so any query containing
    /// "hi" is answered with the help text.
    pub const PRIORITY: [Intent; 7] = [
        Intent::Greeting,
        Intent::Explain,
        Intent::Comparison,
        Intent::DrivingUsage,
        Intent::SeatCount,
        Intent::Maintenance,
        Intent::VehicleInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Explain => "explain",
            Intent::Comparison => "comparison",
            Intent::DrivingUsage => "driving_usage",
            Intent::SeatCount => "seat_count",
            Intent::Maintenance => "maintenance",
            Intent::VehicleInfo => "vehicle_info",
        }
    }

    /// Run this intent's matcher. `query` must be normalized.
    pub fn evaluate(self, query: &str, kb: &KnowledgeBase) -> Option<String> {
        match self {
            Intent::Greeting => greeting(query, kb),
            Intent::Explain => explain(query, kb),
            Intent::Comparison => comparison(query, kb),
            Intent::DrivingUsage => driving_usage(query, kb),
            Intent::SeatCount => seat_count(query, kb),
            Intent::Maintenance => maintenance(query, kb),
            Intent::VehicleInfo => vehicle_info(query, kb),
        }
    }
}

// =============================================================================
// Matchers
// =============================================================================

pub fn greeting(query: &str, _kb: &KnowledgeBase) -> Option<String> {
    GREETING_WORDS
        .iter()
        .any(|w| query.contains(w))
        .then(|| response::GREETING.to_string())
}

pub fn explain(query: &str, kb: &KnowledgeBase) -> Option<String> {
    if !query.contains("why") {
        return None;
    }
    kb.find_vehicle(query).map(response::explanation)
}

/// Fewer than two recognized models yields the guidance text, not `None`:
/// the user did ask for a comparison.
pub fn comparison(query: &str, kb: &KnowledgeBase) -> Option<String> {
    if !query.contains("compare") {
        return None;
    }
    match kb.find_vehicles(query).as_slice() {
        [first, second, ..] => Some(response::comparison(first, second)),
        _ => Some(response::COMPARISON_GUIDANCE.to_string()),
    }
}

pub fn driving_usage(query: &str, kb: &KnowledgeBase) -> Option<String> {
    let (keyword, body) = USAGE_MAP.iter().find(|(kw, _)| query.contains(kw))?;
    let rows: Vec<&VehicleRecord> = kb
        .vehicles()
        .iter()
        .filter(|v| v.body_type == *body)
        .collect();
    if rows.is_empty() {
        return Some(response::NO_SUITABLE_CARS.to_string());
    }
    Some(response::usage_listing(body, keyword, &rows))
}

pub fn seat_count(query: &str, kb: &KnowledgeBase) -> Option<String> {
    let seats = SEAT_OPTIONS
        .iter()
        .copied()
        .find(|n| query.contains(&format!("{} seater", n)))?;
    let rows: Vec<&VehicleRecord> = kb.vehicles().iter().filter(|v| v.seats == seats).collect();
    if rows.is_empty() {
        return Some(response::NO_SEAT_MATCH.to_string());
    }
    Some(response::seat_listing(seats, &rows))
}

pub fn maintenance(query: &str, kb: &KnowledgeBase) -> Option<String> {
    if !MAINTENANCE_WORDS.iter().any(|w| query.contains(w)) {
        return None;
    }
    Some(
        kb.find_schedule(query)
            .map(response::maintenance_schedule)
            .unwrap_or_else(|| response::SPECIFY_MODEL.to_string()),
    )
}

pub fn vehicle_info(query: &str, kb: &KnowledgeBase) -> Option<String> {
    kb.find_vehicle(query).map(response::vehicle_info)
}
