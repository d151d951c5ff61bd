//! Client for the hosted text-generation endpoint.
//!
//! Wraps a single Hugging Face style inference URL: the prompt goes out as
//! `{"inputs", "parameters"}`, the reply is a list of
//! `{"generated_text"}` candidates of which the first is used.

mod client;
mod settings;

pub use client::{GenerationParameters, InferenceClient, InferenceError};
pub use settings::{InferenceSettings, DEFAULT_GENERATION_API_URL};
