pub mod employees;

pub use employees::{Draft as EmployeeDraft, Model as Employee, NameError};
