mod client;
mod types;

pub use client::{GeminiClient, GenerativeClient};
#[cfg(test)]
pub use client::MockGenerativeClient;
pub use types::*;
