//! Request handlers, one module per resource.

pub mod character;
pub mod poem;
pub mod root;
pub mod share;
pub mod upload;
