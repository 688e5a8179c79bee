//! Jumpgen - generate bastion-proxied SSH config fragments.
//!
//! This library provides the core functionality for jumpgen, including:
//! - Configuration file parsing and settings resolution
//! - Host block extraction and bastion selection
//! - Rewriting fragments into per-bastion proxy variants
//! - Snapshot/rollback of the proxy directory around each generation
//!
//! # Example
//!
//! ```no_run
//! use jumpgen_cli::config::{Overrides, load_settings};
//! use jumpgen_cli::proxy::generate_proxies;
//!
//! let (settings, _source) = load_settings(None, &Overrides::default()).unwrap();
//! let tree = generate_proxies(&settings).unwrap();
//!
//! for bastion in &tree.bastions {
//!     println!("{}", settings.output_dir().join(bastion).display());
//! }
//! ```

pub mod config;
pub mod error;
pub mod hosts;
pub mod proxy;
pub mod swap;

pub use error::{JumpgenError, Result};
