//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions and helpers in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod student;
#[cfg(test)]
pub mod test_support;
