//! Configuration types and parsing
//!
//! The firmware embeds `airglow.toml` and parses it at boot with the
//! minimal no-alloc parser in [`parser`].

pub mod parser;
pub mod types;

pub use parser::{parse_config, ConfigError};
pub use types::*;
