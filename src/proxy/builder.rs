use crate::config::Settings;
use crate::error::{JumpgenError, Result};
use crate::hosts::{list_fragments, select_bastions};
use crate::proxy::include::{render_include, write_include_file};
use crate::proxy::rewriter::HostLineRewriter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Summary of a successful proxy tree build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTree {
	/// Bastions that received a subdirectory, in traversal order.
	pub bastions: Vec<String>,

	/// Fragment file names copied into every bastion subdirectory.
	pub fragments: Vec<String>,

	/// The regenerated include file.
	pub include_file: PathBuf,
}

/// Build the proxy variants of every fragment into `output_dir`.
///
/// `output_dir` must already exist and be empty. For each bastion a
/// subdirectory named after it is created, holding one rewritten copy of
/// every fragment. The include file is only regenerated once the whole
/// tree has been written. Any error aborts the build and leaves the
/// partial tree for the caller to discard.
pub fn build_proxy_tree(settings: &Settings, output_dir: &Path) -> Result<ProxyTree> {
	let fragments = list_fragments(&settings.config_dir, &settings.ignored_names())?;
	let bastions = select_bastions(&fragments, &settings.bastion_marker)?;
	let rewriter = HostLineRewriter::new()?;

	let contents = fragments
		.iter()
		.map(|fragment| fragment.read().map(|content| (fragment, content)))
		.collect::<Result<Vec<_>>>()?;

	for bastion in &bastions {
		let dir = bastion_dir(output_dir, bastion)?;
		std::fs::create_dir(&dir).map_err(|source| JumpgenError::CreateDirError {
			path: dir.clone(),
			source,
		})?;

		for (fragment, content) in &contents {
			let target = dir.join(&fragment.name);
			write_new_file(&target, &rewriter.rewrite(content, bastion))?;
		}

		tracing::debug!(%bastion, files = contents.len(), "wrote proxy variants");
	}

	let include = render_include(&settings.include_prefix, &settings.proxy_dir, &bastions);
	write_include_file(&settings.include_file, &include)?;

	Ok(ProxyTree {
		bastions,
		fragments: fragments.iter().map(|f| f.name.clone()).collect(),
		include_file: settings.include_file.clone(),
	})
}

/// Subdirectory for `bastion`, refusing names that would leave `output_dir`.
fn bastion_dir(output_dir: &Path, bastion: &str) -> Result<PathBuf> {
	let mut components = Path::new(bastion).components();
	match (components.next(), components.next()) {
		(Some(Component::Normal(_)), None) if !bastion.contains('\\') => {
			Ok(output_dir.join(bastion))
		}
		_ => Err(JumpgenError::InvalidBastionName {
			name: bastion.to_string(),
		}),
	}
}

/// Write a file that must not exist yet.
fn write_new_file(path: &Path, content: &str) -> Result<()> {
	let write_error = |source| JumpgenError::WriteError {
		path: path.to_path_buf(),
		source,
	};

	let mut file = OpenOptions::new()
		.write(true)
		.create_new(true)
		.open(path)
		.map_err(write_error)?;
	file.write_all(content.as_bytes()).map_err(write_error)
}
