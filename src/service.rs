// 🧮 Carbon Calculation Service - validation → lookup → arithmetic → persistence
// Three operations: start a record, update its usage inputs (recomputing the
// emissions), fetch the computed result

use crate::error::{CalcError, CalcResult};
use crate::factors::{
    EnergyFactorRegistry, SolidWasteFactorRegistry, TransportationFactorRegistry,
};
use crate::model::{CalculationResult, CarbonCalculation, TransportationEntry};
use crate::store::CalculationStore;
use crate::validators;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// REQUESTS
// ============================================================================

/// Start-calculation request. Contact fields are optional on the wire so the
/// validators can report missing fields explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCalcRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub uf: Option<String>,
    pub phone_number: Option<String>,
}

/// Update-info request: the usage inputs that drive the computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalcInfoRequest {
    pub id: String,
    pub energy_consumption: f64,
    pub solid_waste_total: f64,
    pub recycle_percentage: f64,
    #[serde(default)]
    pub transportation: Vec<TransportationEntry>,
}

// ============================================================================
// PURE COMPUTATION
// ============================================================================

/// energy emission = consumption × per-UF factor
pub fn energy_emission(
    energy_consumption: f64,
    uf: &str,
    factors: &EnergyFactorRegistry,
) -> CalcResult<f64> {
    let factor = factors
        .find_by_uf(uf)
        .ok_or_else(|| CalcError::EnergyFactorNotFound(uf.to_string()))?;

    Ok(energy_consumption * factor.factor)
}

/// transportation emission = Σ distance × per-mode factor.
/// An empty list is exactly 0.0 and performs no lookup; an unknown mode
/// fails fast with no partial sum.
pub fn transportation_emission(
    entries: &[TransportationEntry],
    factors: &TransportationFactorRegistry,
) -> CalcResult<f64> {
    if entries.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;

    for entry in entries {
        let factor = factors
            .find_by_type(entry.transportation_type)
            .ok_or(CalcError::TransportationFactorNotFound(
                entry.transportation_type,
            ))?;

        total += entry.monthly_distance * factor.factor;
    }

    Ok(total)
}

/// Split the waste stream by recycle percentage and weigh each portion by
/// its own factor:
/// emission = W·p·recyclable + W·(1−p)·nonRecyclable
pub fn solid_waste_emission_split(
    solid_waste_total: f64,
    recycle_percentage: f64,
    recyclable_factor: f64,
    non_recyclable_factor: f64,
) -> f64 {
    let recyclable_waste = solid_waste_total * recycle_percentage;
    let non_recyclable_waste = solid_waste_total * (1.0 - recycle_percentage);

    recyclable_waste * recyclable_factor + non_recyclable_waste * non_recyclable_factor
}

pub fn solid_waste_emission(
    solid_waste_total: f64,
    recycle_percentage: f64,
    uf: &str,
    factors: &SolidWasteFactorRegistry,
) -> CalcResult<f64> {
    let factor = factors
        .find_by_uf(uf)
        .ok_or_else(|| CalcError::SolidWasteFactorNotFound(uf.to_string()))?;

    Ok(solid_waste_emission_split(
        solid_waste_total,
        recycle_percentage,
        factor.recyclable_factor,
        factor.non_recyclable_factor,
    ))
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct CarbonCalculationService {
    store: Arc<dyn CalculationStore>,
    energy_factors: EnergyFactorRegistry,
    transportation_factors: TransportationFactorRegistry,
    solid_waste_factors: SolidWasteFactorRegistry,
}

impl CarbonCalculationService {
    /// Service over the given store, with the seeded reference factors.
    pub fn new(store: Arc<dyn CalculationStore>) -> Self {
        Self::with_registries(
            store,
            EnergyFactorRegistry::new(),
            TransportationFactorRegistry::new(),
            SolidWasteFactorRegistry::new(),
        )
    }

    /// Service with explicit registries (tests seed their own factors).
    pub fn with_registries(
        store: Arc<dyn CalculationStore>,
        energy_factors: EnergyFactorRegistry,
        transportation_factors: TransportationFactorRegistry,
        solid_waste_factors: SolidWasteFactorRegistry,
    ) -> Self {
        CarbonCalculationService {
            store,
            energy_factors,
            transportation_factors,
            solid_waste_factors,
        }
    }

    /// Validate the four contact fields (name → email → UF → phone; email
    /// validity includes uniqueness), then create and persist an empty
    /// record. Returns the new identifier. Nothing is persisted if any
    /// validator rejects.
    pub fn start_calculation(&self, request: &StartCalcRequest) -> CalcResult<String> {
        validators::validate_name(request.name.as_deref())?;
        validators::validate_email(request.email.as_deref(), self.store.as_ref())?;
        validators::validate_uf(request.uf.as_deref())?;
        validators::validate_phone_number(request.phone_number.as_deref())?;

        // Validators above guarantee all four fields are present
        let record = CarbonCalculation::new(
            request.name.as_deref().unwrap_or_default(),
            request.email.as_deref().unwrap_or_default(),
            request.uf.as_deref().unwrap_or_default(),
            request.phone_number.as_deref().unwrap_or_default(),
        );

        let saved = self.store.save(record)?;

        Ok(saved.id)
    }

    /// Overwrite the usage inputs on an existing record, recompute the three
    /// emissions and their total, and persist the result. Either the whole
    /// record is recomputed and saved, or nothing is written.
    ///
    /// Always returns true on success; every failure path is an error.
    pub fn update_info(&self, request: &UpdateCalcInfoRequest) -> CalcResult<bool> {
        let record = self
            .store
            .find_by_id(&request.id)?
            .ok_or_else(|| CalcError::CalculationNotFound(request.id.clone()))?;

        validators::validate_recycle_percentage(request.recycle_percentage)?;

        let updated = self.apply_update(record, request)?;
        self.store.save(updated)?;

        Ok(true)
    }

    /// Fetch the computed result, rounded to 2 decimal places. The fields
    /// are null until update-info has run (caller-ordering contract).
    pub fn get_result(&self, id: &str) -> CalcResult<CalculationResult> {
        let record = self
            .store
            .find_by_id(id)?
            .ok_or_else(|| CalcError::CalculationNotFound(id.to_string()))?;

        Ok(CalculationResult::from_record(&record))
    }

    /// Pure transform: (existing record, new inputs) → recomputed record.
    /// No store access, so the arithmetic is testable in isolation.
    fn apply_update(
        &self,
        mut record: CarbonCalculation,
        request: &UpdateCalcInfoRequest,
    ) -> CalcResult<CarbonCalculation> {
        record.energy_consumption = request.energy_consumption;
        record.solid_waste_production = request.solid_waste_total;
        record.recycle_percentage = request.recycle_percentage;
        record.transportation = request.transportation.clone();

        let energy = energy_emission(record.energy_consumption, &record.uf, &self.energy_factors)?;
        let transportation =
            transportation_emission(&record.transportation, &self.transportation_factors)?;
        let solid_waste = solid_waste_emission(
            record.solid_waste_production,
            record.recycle_percentage,
            &record.uf,
            &self.solid_waste_factors,
        )?;

        record.energy_emission = Some(energy);
        record.transportation_emission = Some(transportation);
        record.solid_waste_emission = Some(solid_waste);
        // Exact sum; rounding only happens at presentation
        record.total_emission = Some(energy + transportation + solid_waste);

        Ok(record)
    }
}

// ============================================================================
// TESTS
// ============================================================================
