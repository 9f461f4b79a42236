use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Fuel a vehicle runs on.
///
/// Unknown labels are kept verbatim (lowercased) so a catalog can carry fuels
/// the rules do not branch on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
    Other(String),
}

impl FuelType {
    /// Lowercase label as it appears in replies.
    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Hybrid => "hybrid",
            FuelType::Electric => "electric",
            FuelType::Other(label) => label,
        }
    }
}

impl From<String> for FuelType {
    fn from(raw: String) -> Self {
        let label = raw.trim().to_lowercase();
        match label.as_str() {
            "petrol" | "gasoline" => FuelType::Petrol,
            "diesel" => FuelType::Diesel,
            "hybrid" => FuelType::Hybrid,
            "electric" | "ev" => FuelType::Electric,
            _ => FuelType::Other(label),
        }
    }
}

impl From<FuelType> for String {
    fn from(fuel: FuelType) -> Self {
        fuel.as_str().to_string()
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body style of a vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyType {
    Hatchback,
    Sedan,
    Mpv,
    Suv,
    Other(String),
}

impl BodyType {
    /// Lowercase label as it appears in the dataset and replies.
    pub fn as_str(&self) -> &str {
        match self {
            BodyType::Hatchback => "hatchback",
            BodyType::Sedan => "sedan",
            BodyType::Mpv => "mpv",
            BodyType::Suv => "suv",
            BodyType::Other(label) => label,
        }
    }
}

impl From<String> for BodyType {
    fn from(raw: String) -> Self {
        let label = raw.trim().to_lowercase();
        match label.as_str() {
            "hatchback" => BodyType::Hatchback,
            "sedan" => BodyType::Sedan,
            "mpv" => BodyType::Mpv,
            "suv" => BodyType::Suv,
            _ => BodyType::Other(label),
        }
    }
}

impl From<BodyType> for String {
    fn from(body: BodyType) -> Self {
        body.as_str().to_string()
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Records
// =============================================================================

/// One row of the vehicle specification catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub brand: String,
    pub model: String,
    /// Free-form engine description, e.g. "1.5L".
    pub engine: String,
    pub fuel: FuelType,
    pub seats: u32,
    #[serde(rename = "type")]
    pub body_type: BodyType,
}

impl VehicleRecord {
    /// "Brand Model" as written in the catalog.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// One row of the maintenance schedule catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub brand: String,
    pub model: String,
    pub engine_oil_km: u32,
    pub major_service_km: u32,
    pub battery_years: f64,
    pub tyre_rotation_km: u32,
}

impl MaintenanceRecord {
    /// "Brand Model" as written in the catalog.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}
