//! Transactional regeneration of a directory tree.
//!
//! A run moves through `Snapshotting -> Building -> Committing` or
//! `Snapshotting -> Building -> RollingBack`. Whichever way it ends, the
//! output directory holds either the complete new tree or exactly the
//! tree that was there before.

pub mod snapshot;

pub use snapshot::{Snapshot, SwapPaths};

use crate::error::{JumpgenError, Result};
use std::path::Path;

/// Run `build` against a fresh output directory, keeping its result only
/// if it succeeds.
///
/// On failure the previous output directory is restored and the build
/// error is returned. If restoring fails too, both errors are reported
/// through [`JumpgenError::RollbackFailed`]. Errors before `build` runs
/// come back as [`JumpgenError::SnapshotFailed`], and errors after it
/// succeeded as [`JumpgenError::CommitFailed`].
pub fn run_swapped<T, F>(paths: SwapPaths, build: F) -> Result<T>
where
	F: FnOnce(&Path) -> Result<T>,
{
	let output = paths.output.clone();
	let snapshot = Snapshot::take(paths).map_err(|err| match err {
		JumpgenError::RollbackFailed { .. } => err,
		source => JumpgenError::SnapshotFailed {
			output: output.clone(),
			source: Box::new(source),
		},
	})?;

	match build(snapshot.output_dir()) {
		Ok(value) => {
			snapshot
				.commit()
				.map_err(|source| JumpgenError::CommitFailed {
					output,
					source: Box::new(source),
				})?;
			Ok(value)
		}
		Err(cause) => {
			tracing::info!(error = %cause, "build failed, rolling back");
			match snapshot.rollback() {
				Ok(()) => Err(cause),
				Err(source) => Err(JumpgenError::RollbackFailed {
					output,
					cause: Box::new(cause),
					source: Box::new(source),
				}),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn paths(root: &Path) -> SwapPaths {
		SwapPaths {
			output: root.join("proxy"),
			backup: root.join("proxy-copy"),
		}
	}

	#[test]
	fn test_success_keeps_new_tree() {
		let dir = tempfile::tempdir().unwrap();
		let p = paths(dir.path());
		fs::create_dir_all(&p.output).unwrap();
		fs::write(p.output.join("old"), "old").unwrap();

		let value = run_swapped(p.clone(), |out| {
			fs::write(out.join("new"), "new").unwrap();
			Ok(7)
		})
		.unwrap();

		assert_eq!(value, 7);
		assert!(p.output.join("new").exists());
		assert!(!p.output.join("old").exists());
		assert!(!p.backup.exists());
	}

	#[test]
	fn test_failure_restores_old_tree() {
		let dir = tempfile::tempdir().unwrap();
		let p = paths(dir.path());
		fs::create_dir_all(&p.output).unwrap();
		fs::write(p.output.join("old"), "old").unwrap();

		let result: Result<()> = run_swapped(p.clone(), |out| {
			fs::write(out.join("new"), "new").unwrap();
			Err(JumpgenError::InvalidBastionName {
				name: "x/y".to_string(),
			})
		});

		assert!(matches!(
			result,
			Err(JumpgenError::InvalidBastionName { .. })
		));
		assert_eq!(fs::read_to_string(p.output.join("old")).unwrap(), "old");
		assert!(!p.output.join("new").exists());
		assert!(!p.backup.exists());
	}

	#[test]
	fn test_failed_rollback_reports_both_errors() {
		let dir = tempfile::tempdir().unwrap();
		let p = paths(dir.path());
		fs::create_dir_all(&p.output).unwrap();

		let result: Result<()> = run_swapped(p.clone(), |_| {
			// Pull the backup away so the restore has nothing to rename.
			fs::remove_dir_all(dir.path().join("proxy-copy")).unwrap();
			Err(JumpgenError::HomeDirectoryNotFound)
		});

		match result.unwrap_err() {
			JumpgenError::RollbackFailed { output, cause, source } => {
				assert_eq!(output, p.output);
				assert!(matches!(*cause, JumpgenError::HomeDirectoryNotFound));
				assert!(matches!(*source, JumpgenError::RenameError { .. }));
			}
			other => panic!("Expected RollbackFailed, got {other:?}"),
		}
	}

	#[test]
	fn test_snapshot_failure_skips_build() {
		let dir = tempfile::tempdir().unwrap();
		let p = paths(&dir.path().join("missing"));

		let result: Result<()> = run_swapped(p.clone(), |_| panic!("build must not run"));

		match result.unwrap_err() {
			JumpgenError::SnapshotFailed { output, source } => {
				assert_eq!(output, p.output);
				assert!(matches!(*source, JumpgenError::CreateDirError { .. }));
			}
			other => panic!("Expected SnapshotFailed, got {other:?}"),
		}
	}

	#[test]
	fn test_commit_failure_keeps_new_tree() {
		let dir = tempfile::tempdir().unwrap();
		let p = paths(dir.path());
		fs::create_dir_all(&p.output).unwrap();

		let result: Result<()> = run_swapped(p.clone(), |out| {
			fs::write(out.join("new"), "new").unwrap();
			fs::remove_dir_all(dir.path().join("proxy-copy")).unwrap();
			Ok(())
		});

		match result.unwrap_err() {
			JumpgenError::CommitFailed { output, source } => {
				assert_eq!(output, p.output);
				assert!(matches!(*source, JumpgenError::RemoveDirError { .. }));
			}
			other => panic!("Expected CommitFailed, got {other:?}"),
		}
		assert!(p.output.join("new").exists());
	}
}
