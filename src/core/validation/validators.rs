//! Reusable field validators

use crate::core::error::ValidationError;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;
use validator::ValidateEmail;

/// Accepts `+1234567890`, `123-456-7890`, `(123) 456-7890`, `123.456.7890`
/// and similar: optional country code, optional parenthesised area code,
/// space/dot/hyphen separators.
const PHONE_PATTERN: &str = r"^(\+?\d{1,3}[-.\s]?)?(\(?\d{3}\)?[-.\s]?)?\d{3}[-.\s]?\d{4}$";

/// Longest accepted email address
pub const MAX_EMAIL_LEN: usize = 254;
/// Longest accepted phone number, separators included
pub const MAX_PHONE_LEN: usize = 15;
/// Longest accepted customer name
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
/// Longest accepted product name
pub const MAX_PRODUCT_NAME_LEN: usize = 255;
/// Digits allowed in a stored amount (two of them after the point)
pub const AMOUNT_DIGITS: u32 = 10;

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).unwrap())
}

/// Validator: string must be a syntactically valid `local@domain` address
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().count() <= MAX_EMAIL_LEN && email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            email: email.to_string(),
        })
    }
}

/// Validator: phone is absent, or at most [`MAX_PHONE_LEN`] characters and
/// matches the accepted pattern
pub fn validate_phone(phone: Option<&str>) -> bool {
    match phone {
        None | Some("") => true,
        Some(phone) => phone.chars().count() <= MAX_PHONE_LEN && phone_regex().is_match(phone),
    }
}

/// Validator: `value` has at most `max` characters
pub fn validate_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, len });
    }
    Ok(())
}

/// True when `amount`, rounded to cents, fits [`AMOUNT_DIGITS`] digits
pub fn fits_amount(amount: Decimal) -> bool {
    let limit = Decimal::from(10u64.pow(AMOUNT_DIGITS - 2));
    amount.round_dp(2).abs() < limit
}

/// Validator: price must be strictly positive
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    if !fits_amount(price) {
        return Err(ValidationError::AmountTooLarge { field: "price" });
    }
    Ok(())
}

/// Validator: stock must not be negative
pub fn validate_stock(stock: i32) -> Result<(), ValidationError> {
    if stock < 0 {
        Err(ValidationError::NegativeStock)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // === validate_email() ===

    #[test]
    fn test_email_plain_address_is_valid() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.co.uk").is_ok());
    }

    #[test]
    fn test_email_without_at_is_invalid() {
        let err = validate_email("alice.example.com").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidEmail {
                email: "alice.example.com".into()
            }
        );
    }

    #[test]
    fn test_email_missing_parts_is_invalid() {
        assert!(validate_email("").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("alice@@example.com").is_err());
        assert!(validate_email("alice smith@example.com").is_err());
    }

    // === validate_phone() ===

    #[test]
    fn test_phone_absent_is_valid() {
        assert!(validate_phone(None));
        assert!(validate_phone(Some("")));
    }

    #[test]
    fn test_phone_accepted_shapes() {
        for phone in [
            "+1234567890",
            "123-456-7890",
            "(123) 456-7890",
            "123.456.7890",
            "123 456 7890",
            "4567890",
            "+1 123 456 7890",
        ] {
            assert!(validate_phone(Some(phone)), "{phone} should be accepted");
        }
    }

    #[test]
    fn test_phone_length_limit() {
        let fifteen = "+1 123 456 7890";
        let sixteen = "+12 123 456 7890";
        assert_eq!(fifteen.len(), 15);
        assert_eq!(sixteen.len(), 16);

        assert!(validate_phone(Some(fifteen)));
        assert!(!validate_phone(Some(sixteen)));
        assert!(!validate_phone(Some("+1 (123) 456-7890")));
    }

    #[test]
    fn test_email_length_limit() {
        let address = |last_label: usize| {
            format!(
                "{}@{}.{}.{}.com",
                "a".repeat(64),
                "b".repeat(62),
                "c".repeat(62),
                "d".repeat(last_label)
            )
        };
        assert_eq!(address(59).len(), MAX_EMAIL_LEN);
        assert_eq!(address(60).len(), MAX_EMAIL_LEN + 1);

        assert!(validate_email(&address(59)).is_ok());
        assert!(validate_email(&address(60)).is_err());
    }

    // === validate_length() ===

    #[test]
    fn test_length_boundaries() {
        let hundred = "N".repeat(100);
        assert!(validate_length("name", &hundred, MAX_CUSTOMER_NAME_LEN).is_ok());
        assert_eq!(
            validate_length("name", &format!("{}N", hundred), MAX_CUSTOMER_NAME_LEN),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100,
                len: 101
            })
        );
        // Characters, not bytes
        assert!(validate_length("name", &"é".repeat(100), MAX_CUSTOMER_NAME_LEN).is_ok());
    }

    #[test]
    fn test_phone_rejected_shapes() {
        for phone in ["12345", "phone", "123-45-67890", "+1-800-FLOWERS", "123_456_7890"] {
            assert!(!validate_phone(Some(phone)), "{phone} should be rejected");
        }
    }

    // === validate_price() / validate_stock() ===

    #[test]
    fn test_price_must_be_positive() {
        assert!(validate_price(Decimal::from_str("0.01").unwrap()).is_ok());
        assert_eq!(
            validate_price(Decimal::ZERO),
            Err(ValidationError::NonPositivePrice)
        );
        assert!(validate_price(Decimal::from_str("-3.50").unwrap()).is_err());
    }

    #[test]
    fn test_price_must_fit_ten_digits() {
        assert!(validate_price(Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert_eq!(
            validate_price(Decimal::from_str("100000000.00").unwrap()),
            Err(ValidationError::AmountTooLarge { field: "price" })
        );
        // Rounds up past the limit
        assert!(validate_price(Decimal::from_str("99999999.999").unwrap()).is_err());
    }

    #[test]
    fn test_stock_must_not_be_negative() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(42).is_ok());
        assert_eq!(validate_stock(-1), Err(ValidationError::NegativeStock));
    }
}
