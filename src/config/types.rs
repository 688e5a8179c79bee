use crate::error::JumpgenError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Default name of the proxy output directory inside the config dir.
pub const DEFAULT_PROXY_DIR: &str = "proxy";

/// Default suffix appended to the proxy dir name for its backup.
pub const DEFAULT_BACKUP_SUFFIX: &str = "-copy";

/// Default substring that marks a host pattern as a bastion.
pub const DEFAULT_BASTION_MARKER: &str = "bastion";

/// Top-level configuration from a `.jumpgen.toml` file.
///
/// Every key is optional; unset keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Directory holding the per-host fragment files.
	pub config_dir: Option<PathBuf>,

	/// Top-level file that receives the generated `include` directive.
	pub include_file: Option<PathBuf>,

	/// Path text used for glob entries in the include file.
	pub include_prefix: Option<String>,

	/// Name of the proxy output directory inside `config_dir`.
	pub proxy_dir: Option<String>,

	/// Suffix appended to `proxy_dir` to name its backup.
	pub backup_suffix: Option<String>,

	/// Entry names in `config_dir` that are never treated as fragments.
	pub ignore: Option<Vec<String>>,

	/// Substring identifying bastion host patterns.
	pub bastion_marker: Option<String>,
}

/// A loaded configuration with its source path for display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub config_dir: Option<PathBuf>,
	pub include_file: Option<PathBuf>,
}

/// Fully resolved settings with explicit paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub config_dir: PathBuf,
	pub include_file: PathBuf,
	pub include_prefix: String,
	pub proxy_dir: String,
	pub backup_suffix: String,
	pub ignore: Vec<String>,
	pub bastion_marker: String,
}

impl Settings {
	/// Path of the proxy output directory.
	pub fn output_dir(&self) -> PathBuf {
		self.config_dir.join(&self.proxy_dir)
	}

	/// Path of the transient proxy backup directory.
	pub fn backup_dir(&self) -> PathBuf {
		self.config_dir.join(self.backup_name())
	}

	fn backup_name(&self) -> String {
		format!("{}{}", self.proxy_dir, self.backup_suffix)
	}

	/// Entry names skipped when enumerating fragment files.
	///
	/// Always contains the proxy dir and its backup name.
	pub fn ignored_names(&self) -> BTreeSet<String> {
		let mut names: BTreeSet<String> = self.ignore.iter().cloned().collect();
		names.insert(self.proxy_dir.clone());
		names.insert(self.backup_name());
		names
	}
}

impl Config {
	/// Validate values that would otherwise escape the config dir or
	/// produce an unusable layout.
	pub fn validate(&self) -> Result<(), JumpgenError> {
		if let Some(ref name) = self.proxy_dir {
			validate_entry_name("proxy-dir", name)?;
		}

		if let Some(ref suffix) = self.backup_suffix {
			if suffix.is_empty() {
				return Err(invalid("backup-suffix", "must not be empty"));
			}
			if suffix.contains(['/', '\\']) {
				return Err(invalid("backup-suffix", "must not contain path separators"));
			}
		}

		if let Some(ref names) = self.ignore {
			for name in names {
				validate_entry_name("ignore", name)?;
			}
		}

		if let Some(ref marker) = self.bastion_marker
			&& marker.trim().is_empty()
		{
			return Err(invalid("bastion-marker", "must not be empty"));
		}

		if let Some(ref prefix) = self.include_prefix
			&& prefix.chars().any(char::is_whitespace)
		{
			return Err(invalid("include-prefix", "must not contain whitespace"));
		}

		Ok(())
	}
}

fn validate_entry_name(key: &str, name: &str) -> Result<(), JumpgenError> {
	if name.is_empty() || name == "." || name == ".." {
		return Err(invalid(key, &format!("`{name}` is not a file name")));
	}
	if name.contains(['/', '\\']) || Path::new(name).components().count() != 1 {
		return Err(invalid(
			key,
			&format!("`{name}` must be a single path component"),
		));
	}
	Ok(())
}

fn invalid(key: &str, reason: &str) -> JumpgenError {
	JumpgenError::InvalidSetting {
		key: key.to_string(),
		reason: reason.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings() -> Settings {
		Settings {
			config_dir: PathBuf::from("/home/user/.ssh/config.d"),
			include_file: PathBuf::from("/home/user/.ssh/config"),
			include_prefix: "config.d".to_string(),
			proxy_dir: "proxy".to_string(),
			backup_suffix: "-copy".to_string(),
			ignore: vec![".DS_Store".to_string()],
			bastion_marker: "bastion".to_string(),
		}
	}

	#[test]
	fn test_layout_paths() {
		let s = settings();
		assert_eq!(s.output_dir(), Path::new("/home/user/.ssh/config.d/proxy"));
		assert_eq!(
			s.backup_dir(),
			Path::new("/home/user/.ssh/config.d/proxy-copy")
		);
	}

	#[test]
	fn test_ignored_names_include_reserved() {
		let names = settings().ignored_names();
		assert!(names.contains("proxy"));
		assert!(names.contains("proxy-copy"));
		assert!(names.contains(".DS_Store"));
		assert_eq!(names.len(), 3);
	}

	#[test]
	fn test_validate_rejects_nested_proxy_dir() {
		let config = Config {
			proxy_dir: Some("a/b".to_string()),
			..Default::default()
		};
		match config.validate().unwrap_err() {
			JumpgenError::InvalidSetting { key, .. } => assert_eq!(key, "proxy-dir"),
			other => panic!("Expected InvalidSetting, got {other:?}"),
		}
	}

	#[test]
	fn test_validate_rejects_empty_suffix() {
		let config = Config {
			backup_suffix: Some(String::new()),
			..Default::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_validate_rejects_dotdot_ignore() {
		let config = Config {
			ignore: Some(vec!["..".to_string()]),
			..Default::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_validate_default_is_ok() {
		assert!(Config::default().validate().is_ok());
	}
}
