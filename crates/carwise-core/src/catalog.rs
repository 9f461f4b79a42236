//! Dataset loader for the vehicle and maintenance catalogs.
//!
//! Both catalogs are delimited files with a header row. Header names are
//! trimmed and lowercased before the required columns are checked, so
//! `" Brand"` and `"brand"` are the same column. Rows keep file order, which
//! is the tie-break order for every lookup downstream.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::LoadError;
use crate::types::{MaintenanceRecord, VehicleRecord};

/// Columns every vehicle catalog must carry.
pub const VEHICLE_COLUMNS: &[&str] = &["brand", "model", "engine", "fuel", "seats", "type"];

/// Columns every maintenance catalog must carry.
pub const MAINTENANCE_COLUMNS: &[&str] = &[
    "brand",
    "model",
    "engine_oil_km",
    "major_service_km",
    "battery_years",
    "tyre_rotation_km",
];

/// The two read-only tables the matchers consult.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    vehicles: Vec<VehicleRecord>,
    maintenance: Vec<MaintenanceRecord>,
}

impl Catalogs {
    /// Build catalogs from already-parsed rows.
    pub fn new(vehicles: Vec<VehicleRecord>, maintenance: Vec<MaintenanceRecord>) -> Self {
        Self {
            vehicles,
            maintenance,
        }
    }

    /// Load both catalogs from files on disk.
    pub fn load(vehicles_path: &Path, maintenance_path: &Path) -> Result<Self, LoadError> {
        let vehicles = load_table(vehicles_path, VEHICLE_COLUMNS)?;
        let maintenance = load_table(maintenance_path, MAINTENANCE_COLUMNS)?;
        info!(
            vehicles = vehicles.len(),
            maintenance = maintenance.len(),
            "Catalogs loaded"
        );
        Ok(Self::new(vehicles, maintenance))
    }

    /// Load both catalogs from in-memory readers.
    pub fn from_readers<V: Read, M: Read>(vehicles: V, maintenance: M) -> Result<Self, LoadError> {
        let vehicles = parse_table(vehicles, "vehicle catalog", VEHICLE_COLUMNS)?;
        let maintenance = parse_table(maintenance, "maintenance catalog", MAINTENANCE_COLUMNS)?;
        Ok(Self::new(vehicles, maintenance))
    }

    /// Vehicle rows in file order.
    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    /// Maintenance rows in file order.
    pub fn maintenance(&self) -> &[MaintenanceRecord] {
        &self.maintenance
    }
}

/// Read one table from `path`, checking `required` columns.
pub fn load_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Read {
        source_name: source_name.clone(),
        source,
    })?;
    parse_table(file, &source_name, required)
}

/// Parse one table from any reader.
///
/// `source_name` only labels errors.
pub fn parse_table<T: DeserializeOwned, R: Read>(
    reader: R,
    source_name: &str,
    required: &[&str],
) -> Result<Vec<T>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: StringRecord = rdr
        .headers()
        .map_err(|e| malformed(source_name, &e))?
        .iter()
        .map(normalize_column)
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            source_name: source_name.to_string(),
            columns: missing,
        });
    }

    rdr.set_headers(headers);
    rdr.deserialize()
        .map(|row| row.map_err(|e| malformed(source_name, &e)))
        .collect()
}

/// Column names compare trimmed and lowercased.
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

fn malformed(source_name: &str, err: &csv::Error) -> LoadError {
    LoadError::Malformed {
        source_name: source_name.to_string(),
        line: err.position().map(|p| p.line()),
        message: err.to_string(),
    }
}
