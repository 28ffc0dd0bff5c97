// ✅ Field Validators - Five independent predicate checks
// Each validator returns Ok(()) or the specific CalcError for its first
// failing rule; check order within a validator is fixed (null → length → format)

use crate::error::{CalcError, CalcResult};
use crate::store::CalculationStore;
use regex::Regex;
use std::sync::OnceLock;

/// Original wire-contract email pattern: local@domain.tld
const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Name: present and at least 3 characters.
pub fn validate_name(name: Option<&str>) -> CalcResult<()> {
    let name = name.ok_or(CalcError::NullName)?;

    if name.chars().count() < 3 {
        return Err(CalcError::NameTooShort);
    }

    Ok(())
}

/// Phone number: present, exactly 11 characters, digits only.
pub fn validate_phone_number(phone_number: Option<&str>) -> CalcResult<()> {
    let phone_number = phone_number.ok_or(CalcError::NullPhoneNumber)?;

    if phone_number.chars().count() != 11 {
        return Err(CalcError::InvalidPhoneNumberLength);
    }

    if !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(CalcError::InvalidPhoneNumber);
    }

    Ok(())
}

/// UF (state code): present, exactly 2 characters, uppercase.
pub fn validate_uf(uf: Option<&str>) -> CalcResult<()> {
    let uf = uf.ok_or(CalcError::NullUf)?;

    if uf.chars().count() != 2 {
        return Err(CalcError::InvalidUfLength);
    }

    if uf != uf.to_uppercase() {
        return Err(CalcError::UfNotUppercase);
    }

    Ok(())
}

/// Recycle percentage: 0.0..=1.0, bounds inclusive.
pub fn validate_recycle_percentage(percentage: f64) -> CalcResult<()> {
    if !(0.0..=1.0).contains(&percentage) {
        return Err(CalcError::InvalidRecyclePercentage);
    }

    Ok(())
}

/// Email: valid local@domain.tld format, then unique across all records.
/// The uniqueness check is an explicit store query so the rule stays
/// testable against an injected store.
pub fn validate_email(email: Option<&str>, store: &dyn CalculationStore) -> CalcResult<()> {
    let email = email.ok_or(CalcError::InvalidEmail)?;

    if !email_regex().is_match(email) {
        return Err(CalcError::InvalidEmail);
    }

    if store.exists_by_email(email)? {
        return Err(CalcError::EmailAlreadyExists);
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CarbonCalculation;
    use crate::store::MemoryStore;

    #[test]
    fn test_name_null() {
        assert!(matches!(validate_name(None), Err(CalcError::NullName)));
    }

    #[test]
    fn test_name_too_short() {
        assert!(matches!(
            validate_name(Some("Jo")),
            Err(CalcError::NameTooShort)
        ));
        assert!(validate_name(Some("Joa")).is_ok());
        assert!(validate_name(Some("João Silva")).is_ok());
    }

    #[test]
    fn test_phone_null_checked_before_length() {
        // A missing phone always raises the null error, never the length error
        assert!(matches!(
            validate_phone_number(None),
            Err(CalcError::NullPhoneNumber)
        ));
    }

    #[test]
    fn test_phone_length_checked_before_digits() {
        // "abc" fails on length (3 chars), not on the digit rule
        assert!(matches!(
            validate_phone_number(Some("abc")),
            Err(CalcError::InvalidPhoneNumberLength)
        ));
        assert!(matches!(
            validate_phone_number(Some("123")),
            Err(CalcError::InvalidPhoneNumberLength)
        ));
        assert!(matches!(
            validate_phone_number(Some("119999999990")),
            Err(CalcError::InvalidPhoneNumberLength)
        ));
    }

    #[test]
    fn test_phone_non_numeric() {
        assert!(matches!(
            validate_phone_number(Some("1199999999a")),
            Err(CalcError::InvalidPhoneNumber)
        ));
        assert!(validate_phone_number(Some("11999999999")).is_ok());
    }

    #[test]
    fn test_uf_null() {
        assert!(matches!(validate_uf(None), Err(CalcError::NullUf)));
    }

    #[test]
    fn test_uf_length() {
        assert!(matches!(
            validate_uf(Some("S")),
            Err(CalcError::InvalidUfLength)
        ));
        assert!(matches!(
            validate_uf(Some("SPP")),
            Err(CalcError::InvalidUfLength)
        ));
    }

    #[test]
    fn test_uf_uppercase() {
        assert!(matches!(
            validate_uf(Some("sp")),
            Err(CalcError::UfNotUppercase)
        ));
        assert!(matches!(
            validate_uf(Some("Sp")),
            Err(CalcError::UfNotUppercase)
        ));
        assert!(validate_uf(Some("SP")).is_ok());
        assert!(validate_uf(Some("RJ")).is_ok());
    }

    #[test]
    fn test_recycle_percentage_bounds_inclusive() {
        assert!(validate_recycle_percentage(0.0).is_ok());
        assert!(validate_recycle_percentage(0.5).is_ok());
        assert!(validate_recycle_percentage(1.0).is_ok());

        assert!(matches!(
            validate_recycle_percentage(1.5),
            Err(CalcError::InvalidRecyclePercentage)
        ));
        assert!(matches!(
            validate_recycle_percentage(-0.5),
            Err(CalcError::InvalidRecyclePercentage)
        ));
    }

    #[test]
    fn test_email_format() {
        let store = MemoryStore::new();

        assert!(validate_email(Some("joao@email.com"), &store).is_ok());
        assert!(validate_email(Some("a.b+c@sub.domain.org"), &store).is_ok());

        assert!(matches!(
            validate_email(Some("email-invalido"), &store),
            Err(CalcError::InvalidEmail)
        ));
        assert!(matches!(
            validate_email(Some("joao@"), &store),
            Err(CalcError::InvalidEmail)
        ));
        assert!(matches!(
            validate_email(Some("@email.com"), &store),
            Err(CalcError::InvalidEmail)
        ));
        assert!(matches!(
            validate_email(None, &store),
            Err(CalcError::InvalidEmail)
        ));
    }

    #[test]
    fn test_email_uniqueness_checked_after_format() {
        let store = MemoryStore::new();
        store
            .save(CarbonCalculation::new(
                "João Silva",
                "existente@email.com",
                "SP",
                "11999999999",
            ))
            .unwrap();

        assert!(matches!(
            validate_email(Some("existente@email.com"), &store),
            Err(CalcError::EmailAlreadyExists)
        ));
        assert!(validate_email(Some("novo@email.com"), &store).is_ok());
    }
}
