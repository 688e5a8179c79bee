//! Configuration loading and parsing for jumpgen.
//!
//! This module handles:
//! - TOML config file parsing and validation
//! - Resolving defaults, file values and command-line overrides
//! - The config file template written by `config init`

pub mod cascade;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{load_config, load_settings, resolve_settings, user_config_path};
pub use parser::{parse_config_file, parse_config_str};
pub use template::generate_init_template;
pub use types::{Config, LoadedConfig, Overrides, Settings};
