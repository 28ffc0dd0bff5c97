// ⚠️ Error Taxonomy - One enum, kind + message
// Every failure the core can surface, classified for the HTTP boundary

use crate::model::TransportationType;
use thiserror::Error;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Broad classification consumed by the boundary layer.
/// The core never talks HTTP status codes; it only says which of these
/// a failure is, and the boundary maps it (404 / 400 / 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced record or emission-factor key does not exist
    NotFound,
    /// Validator rejection (null/missing field, wrong length, bad format, range)
    BadRequest,
    /// Store collaborator failed
    Storage,
}

// ============================================================================
// CALC ERROR
// ============================================================================

/// All failures surfaced by validators, factor lookups, and the service.
///
/// Each variant carries enough context (the offending id or key) to be
/// actionable downstream without re-deriving it.
#[derive(Debug, Error)]
pub enum CalcError {
    // ------------------------------------------------------------------------
    // Not-found
    // ------------------------------------------------------------------------
    #[error("Carbon Calculation not found for id: {0}")]
    CalculationNotFound(String),

    #[error("Energy Emission Factor not found for UF: {0}")]
    EnergyFactorNotFound(String),

    #[error("Transportation Emission Factor not found for transport type: {0}")]
    TransportationFactorNotFound(TransportationType),

    #[error("Solid Waste Emission Factor not found for UF: {0}")]
    SolidWasteFactorNotFound(String),

    // ------------------------------------------------------------------------
    // Bad input - name
    // ------------------------------------------------------------------------
    #[error("This name is null")]
    NullName,

    #[error("This name is shorter than 3 characters")]
    NameTooShort,

    // ------------------------------------------------------------------------
    // Bad input - email
    // ------------------------------------------------------------------------
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Email already exists")]
    EmailAlreadyExists,

    // ------------------------------------------------------------------------
    // Bad input - UF
    // ------------------------------------------------------------------------
    #[error("This UF is null")]
    NullUf,

    #[error("The state code must be exactly 2 characters long")]
    InvalidUfLength,

    #[error("UF must be in uppercase")]
    UfNotUppercase,

    // ------------------------------------------------------------------------
    // Bad input - phone number
    // ------------------------------------------------------------------------
    #[error("This phone number is null")]
    NullPhoneNumber,

    #[error("This phone number is shorter than 11 characters")]
    InvalidPhoneNumberLength,

    #[error("Invalid phone number. The phone number contains non-numeric characters.")]
    InvalidPhoneNumber,

    // ------------------------------------------------------------------------
    // Bad input - recycle percentage
    // ------------------------------------------------------------------------
    #[error("Invalid Recycle Percentage. The percentage must be between 0 and 1.")]
    InvalidRecyclePercentage,

    // ------------------------------------------------------------------------
    // Store
    // ------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::CalculationNotFound(_)
            | CalcError::EnergyFactorNotFound(_)
            | CalcError::TransportationFactorNotFound(_)
            | CalcError::SolidWasteFactorNotFound(_) => ErrorKind::NotFound,

            CalcError::NullName
            | CalcError::NameTooShort
            | CalcError::InvalidEmail
            | CalcError::EmailAlreadyExists
            | CalcError::NullUf
            | CalcError::InvalidUfLength
            | CalcError::UfNotUppercase
            | CalcError::NullPhoneNumber
            | CalcError::InvalidPhoneNumberLength
            | CalcError::InvalidPhoneNumber
            | CalcError::InvalidRecyclePercentage => ErrorKind::BadRequest,

            CalcError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<rusqlite::Error> for CalcError {
    fn from(err: rusqlite::Error) -> Self {
        CalcError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::Storage(err.to_string())
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_carry_the_key() {
        let err = CalcError::CalculationNotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "Carbon Calculation not found for id: abc-123");

        let err = CalcError::EnergyFactorNotFound("XX".to_string());
        assert_eq!(err.to_string(), "Energy Emission Factor not found for UF: XX");

        let err = CalcError::TransportationFactorNotFound(TransportationType::Car);
        assert_eq!(
            err.to_string(),
            "Transportation Emission Factor not found for transport type: CAR"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            CalcError::CalculationNotFound("x".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(CalcError::NullName.kind(), ErrorKind::BadRequest);
        assert_eq!(CalcError::EmailAlreadyExists.kind(), ErrorKind::BadRequest);
        assert_eq!(
            CalcError::InvalidRecyclePercentage.kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            CalcError::Storage("disk on fire".to_string()).kind(),
            ErrorKind::Storage
        );
    }
}
