//! Shared domain logic for the poem generation service.
//!
//! Types, validation rules and pure helpers; no network or filesystem access
//! happens here.

pub mod character;
pub mod config;
pub mod error;
pub mod poem;
pub mod prompt;
pub mod share;
pub mod types;
pub mod upload;
