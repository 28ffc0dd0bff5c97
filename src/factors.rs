// 📊 Emission Factor Registries - Read-only reference data
// Keyed lookups: UF → energy factor, transport mode → distance factor,
// UF → solid-waste factor pair. Seeded with the reference dataset at startup.

use crate::model::{
    EnergyEmissionFactor, SolidWasteEmissionFactor, TransportationEmissionFactor,
    TransportationType,
};
use std::collections::HashMap;
use std::sync::RwLock;

// ============================================================================
// REFERENCE DATASET
// ============================================================================

/// Per-UF reference factors: (uf, energy kWh factor, solid waste recyclable
/// factor, solid waste non-recyclable factor), one row per Brazilian UF.
const UF_FACTORS: &[(&str, f64, f64, f64)] = &[
    ("AC", 0.55, 0.38, 0.87),
    ("AL", 0.50, 0.41, 0.90),
    ("AP", 0.56, 0.37, 0.88),
    ("AM", 0.58, 0.36, 0.89),
    ("BA", 0.48, 0.40, 0.91),
    ("CE", 0.49, 0.39, 0.92),
    ("DF", 0.44, 0.43, 0.93),
    ("ES", 0.46, 0.42, 0.92),
    ("GO", 0.43, 0.41, 0.90),
    ("MA", 0.52, 0.38, 0.89),
    ("MT", 0.45, 0.40, 0.88),
    ("MS", 0.44, 0.40, 0.89),
    ("MG", 0.45, 0.43, 0.92),
    ("PA", 0.54, 0.37, 0.87),
    ("PB", 0.50, 0.39, 0.91),
    ("PR", 0.41, 0.44, 0.93),
    ("PE", 0.51, 0.40, 0.92),
    ("PI", 0.52, 0.38, 0.90),
    ("RJ", 0.46, 0.43, 0.95),
    ("RN", 0.49, 0.39, 0.90),
    ("RS", 0.42, 0.44, 0.94),
    ("RO", 0.55, 0.37, 0.86),
    ("RR", 0.57, 0.36, 0.87),
    ("SC", 0.41, 0.45, 0.93),
    ("SP", 0.47, 0.42, 0.94),
    ("SE", 0.50, 0.40, 0.91),
    ("TO", 0.53, 0.38, 0.88),
];

/// Per-mode transportation factors (emission per km)
const TRANSPORTATION_FACTORS: &[(TransportationType, f64)] = &[
    (TransportationType::Car, 0.19),
    (TransportationType::Motorcycle, 0.09),
    (TransportationType::PublicTransport, 0.04),
    (TransportationType::Bicycle, 0.0),
];

// ============================================================================
// ENERGY FACTOR REGISTRY
// ============================================================================

pub struct EnergyFactorRegistry {
    factors: RwLock<HashMap<String, EnergyEmissionFactor>>,
}

impl EnergyFactorRegistry {
    /// Registry seeded with the reference dataset.
    pub fn new() -> Self {
        let registry = Self::empty();

        for &(uf, factor, _, _) in UF_FACTORS {
            registry.insert(EnergyEmissionFactor {
                uf: uf.to_string(),
                factor,
            });
        }

        registry
    }

    /// Empty registry, for tests that seed their own factors.
    pub fn empty() -> Self {
        EnergyFactorRegistry {
            factors: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, factor: EnergyEmissionFactor) {
        let mut factors = self.factors.write().unwrap();
        factors.insert(factor.uf.clone(), factor);
    }

    pub fn find_by_uf(&self, uf: &str) -> Option<EnergyEmissionFactor> {
        let factors = self.factors.read().unwrap();
        factors.get(uf).cloned()
    }
}

impl Default for EnergyFactorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TRANSPORTATION FACTOR REGISTRY
// ============================================================================

pub struct TransportationFactorRegistry {
    factors: RwLock<HashMap<TransportationType, TransportationEmissionFactor>>,
}

impl TransportationFactorRegistry {
    pub fn new() -> Self {
        let registry = Self::empty();

        for &(transportation_type, factor) in TRANSPORTATION_FACTORS {
            registry.insert(TransportationEmissionFactor {
                transportation_type,
                factor,
            });
        }

        registry
    }

    pub fn empty() -> Self {
        TransportationFactorRegistry {
            factors: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, factor: TransportationEmissionFactor) {
        let mut factors = self.factors.write().unwrap();
        factors.insert(factor.transportation_type, factor);
    }

    pub fn find_by_type(
        &self,
        transportation_type: TransportationType,
    ) -> Option<TransportationEmissionFactor> {
        let factors = self.factors.read().unwrap();
        factors.get(&transportation_type).cloned()
    }
}

impl Default for TransportationFactorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SOLID WASTE FACTOR REGISTRY
// ============================================================================

pub struct SolidWasteFactorRegistry {
    factors: RwLock<HashMap<String, SolidWasteEmissionFactor>>,
}

impl SolidWasteFactorRegistry {
    pub fn new() -> Self {
        let registry = Self::empty();

        for &(uf, _, recyclable_factor, non_recyclable_factor) in UF_FACTORS {
            registry.insert(SolidWasteEmissionFactor {
                uf: uf.to_string(),
                recyclable_factor,
                non_recyclable_factor,
            });
        }

        registry
    }

    pub fn empty() -> Self {
        SolidWasteFactorRegistry {
            factors: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, factor: SolidWasteEmissionFactor) {
        let mut factors = self.factors.write().unwrap();
        factors.insert(factor.uf.clone(), factor);
    }

    pub fn find_by_uf(&self, uf: &str) -> Option<SolidWasteEmissionFactor> {
        let factors = self.factors.read().unwrap();
        factors.get(uf).cloned()
    }
}

impl Default for SolidWasteFactorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_registry_seeds_all_ufs() {
        let registry = EnergyFactorRegistry::new();

        let sp = registry.find_by_uf("SP").unwrap();
        assert_eq!(sp.factor, 0.47);

        for &(uf, _, _, _) in UF_FACTORS {
            assert!(registry.find_by_uf(uf).is_some(), "missing UF {}", uf);
        }
    }

    #[test]
    fn test_energy_registry_unknown_uf() {
        let registry = EnergyFactorRegistry::new();
        assert!(registry.find_by_uf("XX").is_none());
    }

    #[test]
    fn test_transportation_registry_defaults() {
        let registry = TransportationFactorRegistry::new();

        assert_eq!(
            registry.find_by_type(TransportationType::Car).unwrap().factor,
            0.19
        );
        assert_eq!(
            registry
                .find_by_type(TransportationType::Bicycle)
                .unwrap()
                .factor,
            0.0
        );
    }

    #[test]
    fn test_transportation_registry_empty_has_no_entries() {
        let registry = TransportationFactorRegistry::empty();
        assert!(registry.find_by_type(TransportationType::Car).is_none());
    }

    #[test]
    fn test_solid_waste_registry_factor_pair() {
        let registry = SolidWasteFactorRegistry::new();

        let sp = registry.find_by_uf("SP").unwrap();
        assert_eq!(sp.recyclable_factor, 0.42);
        assert_eq!(sp.non_recyclable_factor, 0.94);
    }
}
