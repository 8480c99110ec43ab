pub mod registry;
pub mod traits;

// Advice provider implementations
pub mod gemini;
