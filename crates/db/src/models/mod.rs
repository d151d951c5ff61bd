//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the DTO used to insert it.

pub mod character;
pub mod poem;
pub mod rating;
