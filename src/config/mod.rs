//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment (CHECK_URL, RETRY_COUNT, ...) or config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WatchdogConfig (validated, immutable)
//!     → owned by the watchdog for the life of the process
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Probe and restart options are mandatory, observability has defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod command;
pub mod loader;
pub mod schema;
pub mod validation;

pub use command::CommandLine;
pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{LogFormat, ObservabilityConfig, WatchdogConfig};
pub use validation::ValidationError;
