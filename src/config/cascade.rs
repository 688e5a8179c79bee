use crate::config::parser::parse_config_file;
use crate::config::types::{
	Config, DEFAULT_BACKUP_SUFFIX, DEFAULT_BASTION_MARKER, DEFAULT_PROXY_DIR, LoadedConfig,
	Overrides, Settings,
};
use crate::error::{JumpgenError, Result};
use std::path::{Component, Path, PathBuf};

/// Name of the user config file in the home directory.
pub const USER_CONFIG_NAME: &str = ".jumpgen.toml";

/// Load the config file for this run.
///
/// An explicit path must exist. Without one, `~/.jumpgen.toml` is used
/// when present and skipped silently otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<LoadedConfig>> {
	if let Some(path) = explicit {
		let config = parse_config_file(path)?;
		return Ok(Some(LoadedConfig {
			config,
			path: path.to_path_buf(),
		}));
	}

	let path = user_config_path()?;
	if !path.exists() {
		tracing::debug!(path = %path.display(), "no user config file");
		return Ok(None);
	}

	let config = parse_config_file(&path)?;
	Ok(Some(LoadedConfig { config, path }))
}

/// Resolve the effective settings.
///
/// The cascade order is:
/// 1. Built-in defaults rooted at `home`
/// 2. Values from the config file, if any
/// 3. Command-line overrides
pub fn resolve_settings(
	config: Option<&Config>,
	overrides: &Overrides,
	home: &Path,
) -> Result<Settings> {
	let file = config.cloned().unwrap_or_default();
	file.validate()?;

	let ssh_dir = home.join(".ssh");

	let config_dir = match &overrides.config_dir {
		Some(path) => override_path(path, home)?,
		None => file
			.config_dir
			.map(|p| expand_home(&p, home))
			.unwrap_or_else(|| ssh_dir.join("config.d")),
	};

	let include_file = match &overrides.include_file {
		Some(path) => override_path(path, home)?,
		None => file
			.include_file
			.map(|p| expand_home(&p, home))
			.unwrap_or_else(|| ssh_dir.join("config")),
	};

	let include_prefix = match file.include_prefix {
		Some(prefix) => prefix.trim_end_matches('/').to_string(),
		None => default_include_prefix(&config_dir, &ssh_dir),
	};

	Ok(Settings {
		config_dir,
		include_file,
		include_prefix,
		proxy_dir: file
			.proxy_dir
			.unwrap_or_else(|| DEFAULT_PROXY_DIR.to_string()),
		backup_suffix: file
			.backup_suffix
			.unwrap_or_else(|| DEFAULT_BACKUP_SUFFIX.to_string()),
		ignore: file.ignore.unwrap_or_else(|| vec![".DS_Store".to_string()]),
		bastion_marker: file
			.bastion_marker
			.unwrap_or_else(|| DEFAULT_BASTION_MARKER.to_string()),
	})
}

/// Convenience function to load the config file and resolve settings.
pub fn load_settings(
	explicit: Option<&Path>,
	overrides: &Overrides,
) -> Result<(Settings, Option<PathBuf>)> {
	let loaded = load_config(explicit)?;
	let home = dirs::home_dir().ok_or(JumpgenError::HomeDirectoryNotFound)?;
	let settings = resolve_settings(loaded.as_ref().map(|l| &l.config), overrides, &home)?;
	Ok((settings, loaded.map(|l| l.path)))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(JumpgenError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(USER_CONFIG_NAME))
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path, home: &Path) -> PathBuf {
	match path.strip_prefix("~") {
		Ok(rest) => home.join(rest),
		Err(_) => path.to_path_buf(),
	}
}

/// Command-line paths are relative to the working directory, so pin them
/// down before they end up in the include line.
fn override_path(path: &Path, home: &Path) -> Result<PathBuf> {
	let expanded = expand_home(path, home);
	std::path::absolute(&expanded).map_err(|source| JumpgenError::PathResolveError {
		path: expanded,
		source,
	})
}

/// Config dir relative to `~/.ssh`, where ssh looks up relative include
/// paths, or absolute when it lives elsewhere.
fn default_include_prefix(config_dir: &Path, ssh_dir: &Path) -> String {
	let relative = config_dir
		.strip_prefix(ssh_dir)
		.ok()
		.filter(|rel| rel.components().all(|c| matches!(c, Component::Normal(_))));

	match relative {
		Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
		Some(rel) => rel
			.components()
			.map(|c| c.as_os_str().to_string_lossy())
			.collect::<Vec<_>>()
			.join("/"),
		None => config_dir.to_string_lossy().trim_end_matches('/').to_string(),
	}
}
