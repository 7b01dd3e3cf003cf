use std::borrow::Cow;
use validator::ValidationError;

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

/// OTP codes are exactly six ASCII digits.
pub fn validate_otp_code(value: &str) -> Result<(), ValidationError> {
    if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_otp");
        error.message = Some(Cow::from("Code must be 6 digits"));
        Err(error)
    }
}
