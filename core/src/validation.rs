use crate::{
    error::{FieldError, Result, ToDoError},
    models::{expiry_format::parse_expiry, NewToDo, ToDoPayload},
};

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Inclusive bounds for `CompletePercent`
pub const MIN_COMPLETE_PERCENT: f64 = 0.0;
pub const MAX_COMPLETE_PERCENT: f64 = 100.0;

/// Validation utilities for to-do input
pub struct ToDoValidator;

impl ToDoValidator {
    /// Validate a title
    ///
    /// Titles must be present, contain something other than whitespace, be
    /// free of NUL characters and be at most 100 characters long.
    pub fn validate_title(title: Option<&str>) -> std::result::Result<(), FieldError> {
        let title = match title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(FieldError::new("Title", "The Title field is required.")),
        };

        if title.contains('\0') {
            return Err(nul_character_error("Title"));
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(FieldError::new(
                "Title",
                format!("The field Title must be a string with a maximum length of {MAX_TITLE_LENGTH}."),
            ));
        }

        Ok(())
    }

    /// Validate an optional description (at most 500 characters, no NUL)
    pub fn validate_description(description: Option<&str>) -> std::result::Result<(), FieldError> {
        match description {
            Some(text) if text.contains('\0') => Err(nul_character_error("Description")),
            Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => Err(FieldError::new(
                "Description",
                format!(
                    "The field Description must be a string with a maximum length of {MAX_DESCRIPTION_LENGTH}."
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Validate completion percentage, 0 to 100 inclusive. NaN is rejected.
    pub fn validate_complete_percent(percent: f64) -> std::result::Result<(), FieldError> {
        if (MIN_COMPLETE_PERCENT..=MAX_COMPLETE_PERCENT).contains(&percent) {
            Ok(())
        } else {
            Err(FieldError::new(
                "CompletePercent",
                format!(
                    "The field CompletePercent must be between {MIN_COMPLETE_PERCENT} and {MAX_COMPLETE_PERCENT}."
                ),
            ))
        }
    }

    /// Validate a complete request body and turn it into [`NewToDo`].
    ///
    /// All rules run; every failing field is reported, not only the first.
    ///
    /// # Returns
    /// * `Ok(NewToDo)` - If every field is valid
    /// * `Err(ToDoError::Validation)` - With one entry per failing field
    pub fn validate(payload: ToDoPayload) -> Result<NewToDo> {
        let mut errors = Vec::new();

        if let Err(error) = Self::validate_title(payload.title.as_deref()) {
            errors.push(error);
        }
        if let Err(error) = Self::validate_description(payload.description.as_deref()) {
            errors.push(error);
        }

        let complete_percent = payload.complete_percent.unwrap_or(MIN_COMPLETE_PERCENT);
        if let Err(error) = Self::validate_complete_percent(complete_percent) {
            errors.push(error);
        }

        let expiry = match payload.expiry.as_deref() {
            None => {
                errors.push(FieldError::new("Expiry", "The Expiry field is required."));
                None
            }
            Some(raw) => {
                let parsed = parse_expiry(raw);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        "Expiry",
                        format!("The value '{raw}' is not a valid date-time."),
                    ));
                }
                parsed
            }
        };

        match (payload.title, expiry) {
            (Some(title), Some(expiry)) if errors.is_empty() => Ok(NewToDo {
                title,
                description: payload.description,
                expiry,
                complete_percent,
                is_done: payload.is_done.unwrap_or(false),
            }),
            _ => Err(ToDoError::Validation(errors)),
        }
    }
}

// SQLite string functions stop at the first NUL, so the table's CHECK
// constraints would see a different value than the one validated here.
fn nul_character_error(field: &str) -> FieldError {
    FieldError::new(field, format!("The field {field} must not contain NUL characters."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_payload() -> ToDoPayload {
        ToDoPayload {
            title: Some("Test".to_string()),
            description: Some("Test description".to_string()),
            expiry: Some("2026-10-16T00:00:00".to_string()),
            complete_percent: Some(0.0),
            is_done: None,
        }
    }

    fn fields(error: &ToDoError) -> Vec<&str> {
        error.field_errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_titles() {
        assert!(ToDoValidator::validate_title(Some("Buy milk")).is_ok());
        assert!(ToDoValidator::validate_title(Some("A")).is_ok());
        assert!(ToDoValidator::validate_title(Some(&"a".repeat(100))).is_ok());
        // Length counts characters, not bytes
        assert!(ToDoValidator::validate_title(Some(&"é".repeat(100))).is_ok());
    }

    #[test]
    fn test_invalid_titles() {
        // Missing
        assert!(ToDoValidator::validate_title(None).is_err());

        // Empty
        assert!(ToDoValidator::validate_title(Some("")).is_err());

        // Only whitespace
        assert!(ToDoValidator::validate_title(Some("   ")).is_err());

        // Too long
        let error = ToDoValidator::validate_title(Some(&"a".repeat(101))).unwrap_err();
        assert_eq!(error.field, "Title");
        assert!(error.message.contains("100"));

        // Embedded NUL, leading or not
        for title in ["\0Buy milk", "Buy\0milk", "\0"] {
            let error = ToDoValidator::validate_title(Some(title)).unwrap_err();
            assert_eq!(error.field, "Title");
        }
    }

    #[test]
    fn test_descriptions() {
        assert!(ToDoValidator::validate_description(None).is_ok());
        assert!(ToDoValidator::validate_description(Some("")).is_ok());
        assert!(ToDoValidator::validate_description(Some(&"d".repeat(500))).is_ok());
        assert!(ToDoValidator::validate_description(Some(&"d".repeat(501))).is_err());

        let error = ToDoValidator::validate_description(Some("\0hidden")).unwrap_err();
        assert_eq!(error.field, "Description");
    }

    #[test]
    fn test_complete_percent_bounds() {
        assert!(ToDoValidator::validate_complete_percent(0.0).is_ok());
        assert!(ToDoValidator::validate_complete_percent(55.5).is_ok());
        assert!(ToDoValidator::validate_complete_percent(100.0).is_ok());

        assert!(ToDoValidator::validate_complete_percent(-0.1).is_err());
        assert!(ToDoValidator::validate_complete_percent(100.1).is_err());
        assert!(ToDoValidator::validate_complete_percent(f64::NAN).is_err());
        assert!(ToDoValidator::validate_complete_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_valid_payload() {
        let new = ToDoValidator::validate(valid_payload()).unwrap();
        assert_eq!(new.title, "Test");
        assert_eq!(new.description.as_deref(), Some("Test description"));
        assert_eq!(
            new.expiry,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(new.complete_percent, 0.0);
        assert!(!new.is_done);
    }

    #[test]
    fn test_validate_applies_defaults() {
        let payload = ToDoPayload {
            complete_percent: None,
            description: None,
            ..valid_payload()
        };
        let new = ToDoValidator::validate(payload).unwrap();
        assert_eq!(new.complete_percent, 0.0);
        assert_eq!(new.description, None);
    }

    #[test]
    fn test_validate_keeps_done_flag() {
        let payload = ToDoPayload {
            is_done: Some(true),
            ..valid_payload()
        };
        assert!(ToDoValidator::validate(payload).unwrap().is_done);
    }

    #[test]
    fn test_validate_empty_title() {
        let payload = ToDoPayload {
            title: Some(String::new()),
            complete_percent: Some(50.0),
            ..valid_payload()
        };
        let error = ToDoValidator::validate(payload).unwrap_err();
        assert!(error.is_validation());
        assert_eq!(fields(&error), vec!["Title"]);
    }

    #[test]
    fn test_validate_reports_every_failing_field() {
        let payload = ToDoPayload {
            title: None,
            description: Some("x".repeat(501)),
            expiry: None,
            complete_percent: Some(150.0),
            is_done: None,
        };
        let error = ToDoValidator::validate(payload).unwrap_err();
        assert_eq!(
            fields(&error),
            vec!["Title", "Description", "CompletePercent", "Expiry"]
        );
    }

    #[test]
    fn test_validate_unparseable_expiry() {
        let payload = ToDoPayload {
            expiry: Some("next tuesday".to_string()),
            ..valid_payload()
        };
        let error = ToDoValidator::validate(payload).unwrap_err();
        assert_eq!(fields(&error), vec!["Expiry"]);
        assert!(error.field_errors()[0].message.contains("next tuesday"));
    }
}
