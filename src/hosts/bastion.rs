use crate::error::Result;
use crate::hosts::fragments::{Fragment, list_fragments};
use crate::hosts::scanner::{HostBlock, host_blocks};
use std::collections::BTreeSet;
use std::path::Path;

/// Check whether a host block defines a bastion.
///
/// The `Host` keyword is matched case-insensitively by the scanner; the
/// marker itself is a case-sensitive substring test on each pattern.
pub fn is_bastion(block: &HostBlock<'_>, marker: &str) -> bool {
	block.patterns().any(|pattern| pattern.contains(marker))
}

/// Bastion identifiers defined across `fragments`, in traversal order.
///
/// Duplicates are kept: a bastion defined twice shows up twice.
pub fn select_bastions(fragments: &[Fragment], marker: &str) -> Result<Vec<String>> {
	let mut bastions = Vec::new();
	for fragment in fragments {
		let content = fragment.read()?;
		for block in host_blocks(&content).filter(|b| is_bastion(b, marker)) {
			tracing::debug!(bastion = block.name(), fragment = %fragment.name, "found bastion");
			bastions.push(block.name().to_string());
		}
	}
	Ok(bastions)
}

/// Enumerate the fragments of `config_dir` and select its bastions.
pub fn find_bastions(
	config_dir: &Path,
	ignored: &BTreeSet<String>,
	marker: &str,
) -> Result<Vec<String>> {
	let fragments = list_fragments(config_dir, ignored)?;
	select_bastions(&fragments, marker)
}
