//! Google Gemini text generator.
//!
//! Implements `TextGenerator` via the Generative Language API
//! `generateContent` endpoint.

mod api;
mod client;
mod config;

pub use client::GeminiGenerator;
pub use config::GeminiConfig;
