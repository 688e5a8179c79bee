use crate::error::{JumpgenError, Result};
use std::io::Write;
use std::path::Path;

/// Render the `include` line for the top-level SSH config.
///
/// The first glob covers the fragments themselves, followed by one glob
/// per bastion subdirectory of the proxy dir.
pub fn render_include(prefix: &str, proxy_dir: &str, bastions: &[String]) -> String {
	let mut globs = vec![format!("{prefix}/*")];
	globs.extend(
		bastions
			.iter()
			.map(|bastion| format!("{prefix}/{proxy_dir}/{bastion}/*")),
	);
	format!("include {}\n", globs.join(" "))
}

/// Replace the include file with `content`.
///
/// The content goes to a temporary file next to the target which is then
/// renamed over it, so the previous include file survives a failed write.
pub fn write_include_file(path: &Path, content: &str) -> Result<()> {
	let write_error = |source| JumpgenError::WriteError {
		path: path.to_path_buf(),
		source,
	};

	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut file = tempfile::NamedTempFile::new_in(parent).map_err(write_error)?;
	file.write_all(content.as_bytes()).map_err(write_error)?;
	file.as_file().sync_all().map_err(write_error)?;
	file.persist(path).map_err(|e| write_error(e.error))?;

	tracing::debug!(path = %path.display(), "wrote include file");
	Ok(())
}
