//! Host block extraction and bastion selection for jumpgen.
//!
//! This module handles:
//! - Enumerating fragment files in the configuration directory
//! - Scanning fragments for `Host` blocks
//! - Picking out the hosts that act as bastions

pub mod bastion;
pub mod fragments;
pub mod scanner;

pub use bastion::{find_bastions, is_bastion, select_bastions};
pub use fragments::{Fragment, HostRecord, collect_host_blocks, list_fragments};
pub use scanner::{HostBlock, HostBlocks, host_blocks};
