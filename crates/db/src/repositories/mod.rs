//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod character_repo;
pub mod poem_repo;
pub mod rating_repo;

pub use character_repo::CharacterRepo;
pub use poem_repo::PoemRepo;
pub use rating_repo::RatingRepo;
