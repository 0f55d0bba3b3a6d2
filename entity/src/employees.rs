use std::fmt;

use sea_orm::entity::prelude::*;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name '{0}' must contain a first and a last name separated by a space")]
    MissingLastName(String),
}

impl Model {
    /// Full display name, `first_name` and `last_name` joined by a single space.
    pub fn name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// Splits `name` at the first space. Everything after it becomes the last
    /// name, so `"Mary Ann Evans"` yields `("Mary", "Ann Evans")`.
    pub fn set_name(&mut self, name: &str) -> Result<(), NameError> {
        let (first, last) = split_name(name)?;
        self.first_name = first;
        self.last_name = last;
        Ok(())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Employee(id={}, firstName={}, lastName={}, role={})",
            self.id, self.first_name, self.last_name, self.role
        )
    }
}

/// An employee that may not have been stored yet.
///
/// `id` is `None` until the store assigns one. A draft carrying an id asks the
/// store to overwrite that record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl Draft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: role.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl From<Model> for Draft {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
        }
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}

fn split_name(name: &str) -> Result<(String, String), NameError> {
    match name.split_once(' ') {
        Some((first, last)) if !first.is_empty() && !last.is_empty() => {
            Ok((first.to_string(), last.to_string()))
        }
        _ => Err(NameError::MissingLastName(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bilbo() -> Model {
        Model {
            id: 1,
            first_name: "Bilbo".into(),
            last_name: "Baggins".into(),
            role: "burglar".into(),
        }
    }

    #[test]
    fn name_joins_first_and_last() {
        assert_eq!(bilbo().name(), "Bilbo Baggins");
        assert_eq!(Draft::new("Jon", "Snow", "night's watch").name(), "Jon Snow");
    }

    #[test]
    fn set_name_splits_on_first_space() {
        let mut employee = bilbo();
        employee.set_name("Frodo Baggins").unwrap();
        assert_eq!(employee.first_name, "Frodo");
        assert_eq!(employee.last_name, "Baggins");
    }

    #[test]
    fn set_name_keeps_multi_word_last_names() {
        let mut employee = bilbo();
        employee.set_name("Ursula Le Guin").unwrap();
        assert_eq!(employee.first_name, "Ursula");
        assert_eq!(employee.last_name, "Le Guin");
    }

    #[test]
    fn set_name_rejects_single_word_instead_of_panicking() {
        let mut employee = bilbo();
        let err = employee.set_name("Cher").unwrap_err();
        assert_eq!(err, NameError::MissingLastName("Cher".into()));
        assert_eq!(employee.name(), "Bilbo Baggins");
    }

    #[test]
    fn draft_from_model_keeps_identity() {
        let draft = Draft::from(bilbo());
        assert_eq!(draft.id, Some(1));
        assert_eq!(draft, Draft::new("Bilbo", "Baggins", "burglar").with_id(1));
    }
}
