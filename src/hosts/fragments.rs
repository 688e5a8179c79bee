use crate::error::{JumpgenError, Result};
use crate::hosts::scanner::host_blocks;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A fragment file directly inside the configuration directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
	/// File name, reused for every proxy variant.
	pub name: String,

	/// Full path of the fragment.
	pub path: PathBuf,
}

impl Fragment {
	/// Read the full contents of the fragment.
	pub fn read(&self) -> Result<String> {
		std::fs::read_to_string(&self.path).map_err(|source| JumpgenError::FragmentReadError {
			path: self.path.clone(),
			source,
		})
	}
}

/// A host block together with the fragment it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
	/// Name of the source fragment.
	pub fragment: String,

	/// Raw block text.
	pub block: String,
}

impl HostRecord {
	/// Display name of the host: the first pattern on its `Host` line.
	pub fn name(&self) -> &str {
		host_blocks(&self.block)
			.next()
			.map(|b| b.name())
			.unwrap_or_default()
	}
}

/// List fragment files in `config_dir`.
///
/// Only regular files (symlinks are followed) directly inside the
/// directory are returned, skipping any name in `ignored`. The result is
/// sorted by file name.
pub fn list_fragments(config_dir: &Path, ignored: &BTreeSet<String>) -> Result<Vec<Fragment>> {
	let read_dir_error = |source| JumpgenError::ReadDirError {
		path: config_dir.to_path_buf(),
		source,
	};

	let mut fragments = Vec::new();
	for entry in std::fs::read_dir(config_dir).map_err(read_dir_error)? {
		let entry = entry.map_err(read_dir_error)?;
		let path = entry.path();

		let name = match entry.file_name().into_string() {
			Ok(name) => name,
			Err(raw) => {
				tracing::warn!(name = ?raw, "skipping entry with non UTF-8 name");
				continue;
			}
		};

		if ignored.contains(&name) {
			tracing::debug!(%name, "ignoring entry");
			continue;
		}

		match std::fs::metadata(&path) {
			Ok(meta) if meta.is_file() => fragments.push(Fragment { name, path }),
			Ok(_) => tracing::debug!(%name, "skipping non-file entry"),
			Err(e) => tracing::debug!(%name, error = %e, "skipping unreadable entry"),
		}
	}

	fragments.sort_by(|a, b| a.name.cmp(&b.name));
	Ok(fragments)
}

/// Collect every host block across the fragments of `config_dir`.
///
/// Blocks are returned in fragment order, then file order.
pub fn collect_host_blocks(config_dir: &Path, ignored: &BTreeSet<String>) -> Result<Vec<HostRecord>> {
	let mut records = Vec::new();
	for fragment in list_fragments(config_dir, ignored)? {
		let content = fragment.read()?;
		records.extend(host_blocks(&content).map(|block| HostRecord {
			fragment: fragment.name.clone(),
			block: block.text().to_string(),
		}));
	}
	Ok(records)
}
