//! Level Server Library
//!
//! Async entry points around the procedural core:
//! - Remote generate-and-repair through a pluggable `LevelSource` (Gemini over HTTP)
//! - Prompt and structured-output schema for the external generator
//! - Runtime configuration (JSON file + environment overrides)
//! - HTTP/JSON API for archetypes, candidate repair and remote generation
//! - Request metrics (Prometheus + JSON export)

pub mod api; // HTTP/JSON API endpoints
pub mod config; // ServerConfig, GeminiConfig
pub mod generation; // generate_level / try_generate_level
pub mod metrics; // Server metrics (Prometheus + JSON export)
pub mod prompt; // Generator prompt + response schema
pub mod source; // LevelSource trait + GeminiSource

// Re-export commonly used types
pub use api::{build_router, ApiState};
pub use config::{ConfigError, GeminiConfig, ServerConfig};
pub use generation::{generate_level, try_generate_level, GenerateError};
pub use source::{GeminiSource, LevelRequest, LevelSource, SourceError};
