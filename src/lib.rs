// Carbon Calc - Core Library
// Estimated personal carbon emissions from energy use, transportation
// habits, and solid waste, using per-UF emission factors.
// Exposes all modules for use in the CLI, API server, and tests.

pub mod error;
pub mod factors;
pub mod model;
pub mod service;
pub mod store;
pub mod validators;

// Re-export commonly used types
pub use error::{CalcError, CalcResult, ErrorKind};
pub use factors::{EnergyFactorRegistry, SolidWasteFactorRegistry, TransportationFactorRegistry};
pub use model::{
    CalculationResult, CarbonCalculation, EnergyEmissionFactor, SolidWasteEmissionFactor,
    TransportationEmissionFactor, TransportationEntry, TransportationType,
};
pub use service::{
    energy_emission, solid_waste_emission, solid_waste_emission_split, transportation_emission,
    CarbonCalculationService, StartCalcRequest, UpdateCalcInfoRequest,
};
pub use store::{CalculationStore, MemoryStore, SqliteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
