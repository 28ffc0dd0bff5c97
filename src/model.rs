// 🌱 Data Model - Calculation records and emission factors
// One CarbonCalculation per user session; factors are read-only reference data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// TRANSPORTATION
// ============================================================================

/// Transport modes with region-independent emission factors.
/// Wire names are SCREAMING_SNAKE (original API contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportationType {
    Car,
    Motorcycle,
    PublicTransport,
    Bicycle,
}

impl TransportationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportationType::Car => "CAR",
            TransportationType::Motorcycle => "MOTORCYCLE",
            TransportationType::PublicTransport => "PUBLIC_TRANSPORT",
            TransportationType::Bicycle => "BICYCLE",
        }
    }
}

impl std::fmt::Display for TransportationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransportationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAR" => Ok(TransportationType::Car),
            "MOTORCYCLE" => Ok(TransportationType::Motorcycle),
            "PUBLIC_TRANSPORT" => Ok(TransportationType::PublicTransport),
            "BICYCLE" => Ok(TransportationType::Bicycle),
            other => Err(format!("Unknown transportation type: {}", other)),
        }
    }
}

/// One monthly transportation habit: a mode plus the distance ridden per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportationEntry {
    #[serde(rename = "type")]
    pub transportation_type: TransportationType,
    #[serde(rename = "monthlyDistance")]
    pub monthly_distance: f64,
}

impl TransportationEntry {
    pub fn new(transportation_type: TransportationType, monthly_distance: f64) -> Self {
        TransportationEntry {
            transportation_type,
            monthly_distance,
        }
    }
}

// ============================================================================
// CALCULATION RECORD
// ============================================================================

/// One calculation per user session.
///
/// Created with the contact fields only; the usage inputs and the four
/// derived emissions are filled in by the update-info operation. The
/// derived fields stay `None` until a computation has succeeded, and
/// re-running update-info overwrites all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonCalculation {
    /// Stable identity, assigned by the store on first save - never changes
    pub id: String,

    pub name: String,
    pub email: String,
    pub phone_number: String,
    /// Region/state code keying the energy and solid-waste factors
    pub uf: String,

    /// Monthly energy consumption (kWh)
    pub energy_consumption: f64,
    pub transportation: Vec<TransportationEntry>,
    /// Monthly solid waste production (kg)
    pub solid_waste_production: f64,
    /// Fraction of waste recycled, 0.0..=1.0
    pub recycle_percentage: f64,

    // Derived fields - absent until update-info succeeds
    pub energy_emission: Option<f64>,
    pub transportation_emission: Option<f64>,
    pub solid_waste_emission: Option<f64>,
    pub total_emission: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CarbonCalculation {
    /// Create a fresh record with contact fields only.
    /// The id is left empty; the store assigns it on save.
    pub fn new(name: &str, email: &str, uf: &str, phone_number: &str) -> Self {
        let now = Utc::now();

        CarbonCalculation {
            id: String::new(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            uf: uf.to_string(),
            energy_consumption: 0.0,
            transportation: Vec::new(),
            solid_waste_production: 0.0,
            recycle_percentage: 0.0,
            energy_emission: None,
            transportation_emission: None,
            solid_waste_emission: None,
            total_emission: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True once update-info has run at least once.
    pub fn is_computed(&self) -> bool {
        self.total_emission.is_some()
    }
}

// ============================================================================
// EMISSION FACTORS (read-only reference data)
// ============================================================================

/// kWh → emission multiplier, keyed by UF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEmissionFactor {
    pub uf: String,
    pub factor: f64,
}

/// km → emission multiplier, keyed by transport mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportationEmissionFactor {
    #[serde(rename = "type")]
    pub transportation_type: TransportationType,
    pub factor: f64,
}

/// kg → emission multipliers for the recyclable / non-recyclable waste
/// streams, keyed by UF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidWasteEmissionFactor {
    pub uf: String,
    pub recyclable_factor: f64,
    pub non_recyclable_factor: f64,
}

// ============================================================================
// RESULT VIEW
// ============================================================================

/// Presentation view of a computed record: the four emissions rounded
/// to 2 decimal places. Fields stay null until update-info has run,
/// so callers can tell "never computed" apart from a genuine zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub energy: Option<f64>,
    pub transportation: Option<f64>,
    pub solid_waste: Option<f64>,
    pub total: Option<f64>,
}

/// Round to 2 decimal places for presentation only.
/// Stored emissions keep full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CalculationResult {
    pub fn from_record(record: &CarbonCalculation) -> Self {
        CalculationResult {
            energy: record.energy_emission.map(round2),
            transportation: record.transportation_emission.map(round2),
            solid_waste: record.solid_waste_emission.map(round2),
            total: record.total_emission.map(round2),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_computed_fields() {
        let record = CarbonCalculation::new("João Silva", "joao@email.com", "SP", "11999999999");

        assert!(record.id.is_empty());
        assert!(record.energy_emission.is_none());
        assert!(record.transportation_emission.is_none());
        assert!(record.solid_waste_emission.is_none());
        assert!(record.total_emission.is_none());
        assert!(!record.is_computed());
    }

    #[test]
    fn test_transportation_type_wire_names() {
        let json = serde_json::to_string(&TransportationType::PublicTransport).unwrap();
        assert_eq!(json, "\"PUBLIC_TRANSPORT\"");

        let parsed: TransportationType = serde_json::from_str("\"CAR\"").unwrap();
        assert_eq!(parsed, TransportationType::Car);
    }

    #[test]
    fn test_transportation_entry_wire_format() {
        let entry = TransportationEntry::new(TransportationType::Car, 150.0);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["type"], "CAR");
        assert_eq!(json["monthlyDistance"], 150.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(97.234567), 97.23);
        assert_eq!(round2(6.012345), 6.01);
        assert_eq!(round2(21.345678), 21.35);
        assert_eq!(round2(124.592590), 124.59);
    }

    #[test]
    fn test_result_from_uncomputed_record_is_null() {
        let record = CarbonCalculation::new("Maria", "maria@email.com", "RJ", "21988888888");
        let result = CalculationResult::from_record(&record);

        assert!(result.energy.is_none());
        assert!(result.total.is_none());
    }
}
