//! Request guards.
//!
//! - [`api_key::ApiKey`] -- Checks the `X-API-Key` header against the configured secret.

pub mod api_key;
