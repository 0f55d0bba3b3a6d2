//! Field-level validation results for request bodies.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(skip)]
    pub object: &'static str,
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field error in object '{}' on field '{}': {}",
            self.object, self.field, self.message
        )
    }
}

/// Every field error found on one object. Empty means the object is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors {
    object: &'static str,
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(object: &'static str) -> Self {
        Self {
            object,
            errors: Vec::new(),
        }
    }

    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError {
            object: self.object,
            field,
            message,
        });
    }

    /// Records an error unless `value` is present and non-empty. Returns the
    /// value, or an empty string when an error was recorded.
    pub fn require_non_empty(&mut self, field: &'static str, value: Option<String>) -> String {
        match value {
            None => {
                self.add(field, "must not be null");
                String::new()
            }
            Some(value) if value.is_empty() => {
                self.add(field, "must not be empty");
                value
            }
            Some(value) => value,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s): ", self.errors.len())?;
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_fields_are_reported_in_order() {
        let mut errors = ValidationErrors::new("employee");
        let first = errors.require_non_empty("firstName", Some("Richard".into()));
        let last = errors.require_non_empty("lastName", Some(String::new()));
        let role = errors.require_non_empty("role", None);

        assert_eq!(first, "Richard");
        assert!(last.is_empty() && role.is_empty());
        assert!(errors.has_field("lastName"));
        assert!(errors.has_field("role"));
        assert!(!errors.has_field("firstName"));
        assert_eq!(
            errors.to_string(),
            "Validation failed with 2 error(s): \
             Field error in object 'employee' on field 'lastName': must not be empty; \
             Field error in object 'employee' on field 'role': must not be null"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn whitespace_is_not_empty() {
        let mut errors = ValidationErrors::new("employee");
        errors.require_non_empty("role", Some(" ".into()));
        assert!(errors.into_result().is_ok());
    }
}
