//! Service layer providing the class registry and its CRUD operations.
//! - Owns the in-memory collection and its locking discipline.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod registry;
