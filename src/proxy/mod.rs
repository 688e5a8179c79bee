//! Proxy configuration generation for jumpgen.
//!
//! This module handles:
//! - Rewriting `Host` lines for a bastion
//! - Building the per-bastion proxy tree
//! - Regenerating the top-level include file
//! - Running the whole build inside a snapshot of the proxy dir

pub mod builder;
pub mod include;
pub mod rewriter;

pub use builder::{ProxyTree, build_proxy_tree};
pub use include::{render_include, write_include_file};
pub use rewriter::{HostLineRewriter, rewrite_host_line};

use crate::config::Settings;
use crate::error::Result;
use crate::swap::{SwapPaths, run_swapped};

/// Regenerate the proxy tree and include file described by `settings`.
///
/// The previous proxy dir is restored if anything fails.
pub fn generate_proxies(settings: &Settings) -> Result<ProxyTree> {
	let paths = SwapPaths {
		output: settings.output_dir(),
		backup: settings.backup_dir(),
	};
	run_swapped(paths, |output_dir| build_proxy_tree(settings, output_dir))
}
