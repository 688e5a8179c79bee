use crate::error::{JumpgenError, Result};
use std::path::{Path, PathBuf};

/// Locations swapped by a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPaths {
	/// Directory being regenerated.
	pub output: PathBuf,

	/// Where the previous `output` is parked while regenerating.
	pub backup: PathBuf,
}

/// Handle on a parked output directory.
///
/// Taking a snapshot moves the current output directory (if any) to the
/// backup location and creates a fresh, empty output directory. The
/// handle must then be consumed by [`Snapshot::commit`] or
/// [`Snapshot::rollback`].
#[must_use = "a snapshot must be committed or rolled back"]
#[derive(Debug)]
pub struct Snapshot {
	paths: SwapPaths,
	has_backup: bool,
}

impl Snapshot {
	/// Park the current output directory and create an empty one.
	///
	/// A backup left behind by an earlier aborted run is deleted first.
	pub fn take(paths: SwapPaths) -> Result<Self> {
		if paths.backup.exists() {
			tracing::warn!(path = %paths.backup.display(), "removing stale backup");
			remove_dir(&paths.backup)?;
		}

		let has_backup = paths.output.exists();
		if has_backup {
			rename(&paths.output, &paths.backup)?;
		}

		if let Err(source) = std::fs::create_dir(&paths.output) {
			let err = JumpgenError::CreateDirError {
				path: paths.output.clone(),
				source,
			};
			if has_backup {
				return Err(restore_parked(&paths, err));
			}
			return Err(err);
		}

		tracing::info!(
			output = %paths.output.display(),
			backup = has_backup,
			"snapshot taken"
		);
		Ok(Snapshot { paths, has_backup })
	}

	/// The fresh output directory to build into.
	pub fn output_dir(&self) -> &Path {
		&self.paths.output
	}

	/// Whether a previous output directory was parked.
	pub fn has_backup(&self) -> bool {
		self.has_backup
	}

	/// Keep the new output directory and discard the backup.
	pub fn commit(self) -> Result<()> {
		if self.has_backup {
			remove_dir(&self.paths.backup)?;
		}
		tracing::info!(output = %self.paths.output.display(), "snapshot committed");
		Ok(())
	}

	/// Discard the new output directory and restore the parked one.
	///
	/// Without a backup the output directory is simply removed, returning
	/// to the state before the snapshot was taken.
	pub fn rollback(self) -> Result<()> {
		if self.paths.output.exists() {
			remove_dir(&self.paths.output)?;
		}
		if self.has_backup {
			rename(&self.paths.backup, &self.paths.output)?;
		}
		tracing::info!(output = %self.paths.output.display(), "snapshot rolled back");
		Ok(())
	}
}

/// Move the parked backup back after `cause` stopped a snapshot, returning
/// the error to report.
fn restore_parked(paths: &SwapPaths, cause: JumpgenError) -> JumpgenError {
	match rename(&paths.backup, &paths.output) {
		Ok(()) => cause,
		Err(source) => JumpgenError::RollbackFailed {
			output: paths.output.clone(),
			cause: Box::new(cause),
			source: Box::new(source),
		},
	}
}

fn remove_dir(path: &Path) -> Result<()> {
	std::fs::remove_dir_all(path).map_err(|source| JumpgenError::RemoveDirError {
		path: path.to_path_buf(),
		source,
	})
}

fn rename(from: &Path, to: &Path) -> Result<()> {
	std::fs::rename(from, to).map_err(|source| JumpgenError::RenameError {
		from: from.to_path_buf(),
		to: to.to_path_buf(),
		source,
	})
}
