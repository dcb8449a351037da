use chrono::NaiveDate;

use crate::error::{SaleRule, ValidationError};
use crate::seller::{Sale, SellerDraft};

/// Validator for seller drafts.
///
/// Validation accumulates: every broken rule is reported, not just the
/// first one. In partial mode (`require_all = false`) only supplied fields
/// are checked, except that a supplied name or address must still be
/// non-empty. Format rules always run on supplied non-empty values.
pub struct Validator;

impl Validator {
    /// Validate a draft, collecting all violations.
    pub fn validate_draft(draft: &SellerDraft, require_all: bool) -> Vec<ValidationError> {
        let mut violations = Vec::new();

        match &draft.name {
            None if require_all => violations.push(ValidationError::NameRequired),
            Some(name) if name.trim().is_empty() => violations.push(ValidationError::NameRequired),
            _ => {}
        }
        match &draft.email {
            None if require_all => violations.push(ValidationError::EmailRequired),
            Some(email) if email.is_empty() && require_all => {
                violations.push(ValidationError::EmailRequired)
            }
            _ => {}
        }
        if draft.age.is_none() && require_all {
            violations.push(ValidationError::AgeRequired);
        }
        match &draft.hire_date {
            None if require_all => violations.push(ValidationError::HireDateRequired),
            Some(date) if date.is_empty() && require_all => {
                violations.push(ValidationError::HireDateRequired)
            }
            _ => {}
        }
        match &draft.phone {
            None if require_all => violations.push(ValidationError::PhoneRequired),
            Some(phone) if phone.is_empty() && require_all => {
                violations.push(ValidationError::PhoneRequired)
            }
            _ => {}
        }
        match &draft.address {
            None if require_all => violations.push(ValidationError::AddressRequired),
            Some(address) if address.is_empty() => {
                violations.push(ValidationError::AddressRequired)
            }
            _ => {}
        }

        if let Some(email) = &draft.email {
            if !email.is_empty() && !Self::is_valid_email(email) {
                violations.push(ValidationError::EmailFormat);
            }
        }

        if let Some(age) = draft.age {
            if age < 18 {
                violations.push(ValidationError::AgeTooLow);
            }
            if age > 100 {
                violations.push(ValidationError::AgeTooHigh);
            }
        }

        if let Some(date) = &draft.hire_date {
            if !date.is_empty() && !Self::is_valid_date(date) {
                violations.push(ValidationError::HireDateFormat);
            }
        }

        if let Some(phone) = &draft.phone {
            if !phone.is_empty() && !Self::is_valid_phone(phone) {
                violations.push(ValidationError::PhoneFormat);
            }
        }

        if let Some(sales) = &draft.sales {
            for (idx, sale) in sales.iter().enumerate() {
                for rule in Self::validate_sale(sale) {
                    violations.push(ValidationError::Sale {
                        index: idx + 1,
                        rule,
                    });
                }
            }
        }

        violations
    }

    /// Validate a single sale entry, collecting all broken rules.
    pub fn validate_sale(sale: &Sale) -> Vec<SaleRule> {
        let mut rules = Vec::new();
        if sale.instrument_name.trim().is_empty() {
            rules.push(SaleRule::InstrumentNameRequired);
        }
        if sale.amount.is_nan() || sale.amount <= 0.0 {
            rules.push(SaleRule::AmountNotPositive);
        }
        if !Self::is_valid_date(&sale.sale_date) {
            rules.push(SaleRule::DateFormat);
        }
        rules
    }

    /// Strict ISO date check (YYYY-MM-DD), including calendar validity.
    pub fn is_valid_date(value: &str) -> bool {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    }

    /// Phone numbers may contain digits, whitespace, and `+ - ( )`.
    pub fn is_valid_phone(value: &str) -> bool {
        value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
    }

    /// Syntactic email check: one `@`, non-empty local part, and a domain
    /// with an interior dot. No deliverability lookup.
    pub fn is_valid_email(value: &str) -> bool {
        if value.contains(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return false;
        }
        domain.contains('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> SellerDraft {
        SellerDraft {
            name: Some("Kari Holm".to_string()),
            email: Some("kari@example.com".to_string()),
            age: Some(40),
            hire_date: Some("2019-11-02".to_string()),
            phone: Some("+47 (22) 33-44-55".to_string()),
            address: Some("Bryggen 4, Bergen".to_string()),
            sales: None,
            total_sales: None,
        }
    }

    #[test]
    fn test_complete_draft_passes() {
        assert!(Validator::validate_draft(&full_draft(), true).is_empty());
    }

    #[test]
    fn test_all_required_fields_reported_at_once() {
        let violations = Validator::validate_draft(&SellerDraft::default(), true);
        assert_eq!(
            violations,
            vec![
                ValidationError::NameRequired,
                ValidationError::EmailRequired,
                ValidationError::AgeRequired,
                ValidationError::HireDateRequired,
                ValidationError::PhoneRequired,
                ValidationError::AddressRequired,
            ]
        );
    }

    #[test]
    fn test_partial_mode_skips_missing_fields() {
        let draft = SellerDraft {
            phone: Some("999 88 777".to_string()),
            ..Default::default()
        };
        assert!(Validator::validate_draft(&draft, false).is_empty());
    }

    #[test]
    fn test_partial_mode_still_checks_supplied_values() {
        let draft = SellerDraft {
            phone: Some("call me!".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Validator::validate_draft(&draft, false),
            vec![ValidationError::PhoneFormat]
        );
    }

    #[test]
    fn test_supplied_empty_name_fails_in_partial_mode() {
        let draft = SellerDraft {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Validator::validate_draft(&draft, false),
            vec![ValidationError::NameRequired]
        );
    }

    #[test]
    fn test_supplied_empty_address_fails_in_partial_mode() {
        let draft = SellerDraft {
            address: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            Validator::validate_draft(&draft, false),
            vec![ValidationError::AddressRequired]
        );
    }

    #[test]
    fn test_age_bounds() {
        let mut draft = full_draft();
        draft.age = Some(17);
        assert_eq!(
            Validator::validate_draft(&draft, true),
            vec![ValidationError::AgeTooLow]
        );

        draft.age = Some(18);
        assert!(Validator::validate_draft(&draft, true).is_empty());

        draft.age = Some(100);
        assert!(Validator::validate_draft(&draft, true).is_empty());

        draft.age = Some(101);
        assert_eq!(
            Validator::validate_draft(&draft, true),
            vec![ValidationError::AgeTooHigh]
        );
    }

    #[test]
    fn test_valid_dates() {
        assert!(Validator::is_valid_date("2024-02-29"));
        assert!(Validator::is_valid_date("1999-12-31"));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(!Validator::is_valid_date("2023-02-29"));
        assert!(!Validator::is_valid_date("2023-13-01"));
        assert!(!Validator::is_valid_date("01-02-2023"));
        assert!(!Validator::is_valid_date("2023/01/02"));
        assert!(!Validator::is_valid_date("yesterday"));
        assert!(!Validator::is_valid_date(""));
    }

    #[test]
    fn test_valid_phones() {
        assert!(Validator::is_valid_phone("+47 22 33 44 55"));
        assert!(Validator::is_valid_phone("(555) 123-4567"));
        assert!(Validator::is_valid_phone("999"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!Validator::is_valid_phone("555-CALL"));
        assert!(!Validator::is_valid_phone("+47.22.33"));
    }

    #[test]
    fn test_valid_emails() {
        assert!(Validator::is_valid_email("a@b.co"));
        assert!(Validator::is_valid_email("first.last@sub.example.com"));
        assert!(Validator::is_valid_email("x+tag@example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!Validator::is_valid_email("plainaddress"));
        assert!(!Validator::is_valid_email("@example.com"));
        assert!(!Validator::is_valid_email("user@"));
        assert!(!Validator::is_valid_email("user@nodot"));
        assert!(!Validator::is_valid_email("user@@example.com"));
        assert!(!Validator::is_valid_email("user@.example.com"));
        assert!(!Validator::is_valid_email("user@example..com"));
        assert!(!Validator::is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_empty_email_skips_format_check_in_partial_mode() {
        let draft = SellerDraft {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(Validator::validate_draft(&draft, false).is_empty());
    }

    #[test]
    fn test_empty_email_is_required_violation_when_all_required() {
        let mut draft = full_draft();
        draft.email = Some(String::new());
        assert_eq!(
            Validator::validate_draft(&draft, true),
            vec![ValidationError::EmailRequired]
        );
    }

    #[test]
    fn test_sale_violations_carry_one_based_index() {
        let mut draft = full_draft();
        draft.sales = Some(vec![
            Sale::new("Violin", 100.0, "2023-05-01"),
            Sale::new("", -5.0, "not-a-date"),
        ]);

        let violations = Validator::validate_draft(&draft, true);
        assert_eq!(
            violations,
            vec![
                ValidationError::Sale {
                    index: 2,
                    rule: SaleRule::InstrumentNameRequired,
                },
                ValidationError::Sale {
                    index: 2,
                    rule: SaleRule::AmountNotPositive,
                },
                ValidationError::Sale {
                    index: 2,
                    rule: SaleRule::DateFormat,
                },
            ]
        );
    }

    #[test]
    fn test_sale_amount_must_be_positive() {
        let zero = Sale::new("Flute", 0.0, "2023-01-01");
        assert_eq!(
            Validator::validate_sale(&zero),
            vec![SaleRule::AmountNotPositive]
        );

        let nan = Sale::new("Flute", f64::NAN, "2023-01-01");
        assert_eq!(
            Validator::validate_sale(&nan),
            vec![SaleRule::AmountNotPositive]
        );

        let positive = Sale::new("Flute", 0.01, "2023-01-01");
        assert!(Validator::validate_sale(&positive).is_empty());
    }
}
