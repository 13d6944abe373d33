//! Input validation
//!
//! Standalone checks applied by the operations layer before anything is
//! persisted. They accept or reject; none of them rewrites its input.

pub mod validators;

pub use validators::{
    AMOUNT_DIGITS, MAX_CUSTOMER_NAME_LEN, MAX_EMAIL_LEN, MAX_PHONE_LEN, MAX_PRODUCT_NAME_LEN,
    fits_amount, validate_email, validate_length, validate_phone, validate_price, validate_stock,
};
