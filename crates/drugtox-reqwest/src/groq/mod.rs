//! Groq completion provider.

mod client;
mod config;
mod wire;

pub use client::{GroqClient, TRACING_TARGET};
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_TIMEOUT, DEFAULT_VISION_MODEL,
    DEFAULT_VISION_TIMEOUT, GroqConfig,
};
