//! Field validators shared by the request DTOs.
//!
//! Plugged into `#[validate(custom(function = ...))]` attributes in the db
//! models; kept here so they carry no database dependency.

use chrono::NaiveDate;
use validator::ValidationError;

/// Accepted `release_date` layout, e.g. `10-20-2016`.
pub const RELEASE_DATE_FORMAT: &str = "%m-%d-%Y";

/// Upper bound accepted for an actor's age.
pub const MAX_AGE: i32 = 150;

/// Reject values that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Reject release dates that are not calendar dates in `MM-DD-YYYY` form.
///
/// The value is stored as given, so surrounding whitespace is rejected.
pub fn valid_release_date(value: &str) -> Result<(), ValidationError> {
    if value.trim() != value {
        return Err(ValidationError::new("release_date_format"));
    }
    NaiveDate::parse_from_str(value, RELEASE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("release_date_format"))
}

/// Flatten `validator` errors into one line suitable for logs.
pub fn describe(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{field}: {}", codes.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}
