use crate::config::types::Config;
use crate::error::{JumpgenError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			JumpgenError::ConfigNotFound {
				path: path.to_path_buf(),
			}
		} else {
			JumpgenError::ConfigReadError {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| JumpgenError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(config.config_dir.is_none());
		assert!(config.include_file.is_none());
		assert!(config.proxy_dir.is_none());
		assert!(config.ignore.is_none());
	}

	#[test]
	fn test_parse_full_config() {
		let content = r#"
config-dir = "~/.ssh/hosts.d"
include-file = "~/.ssh/config"
include-prefix = "hosts.d"
proxy-dir = "jump"
backup-suffix = ".bak"
ignore = [".DS_Store", "README"]
bastion-marker = "jump"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.config_dir, Some(PathBuf::from("~/.ssh/hosts.d")));
		assert_eq!(config.include_file, Some(PathBuf::from("~/.ssh/config")));
		assert_eq!(config.include_prefix.as_deref(), Some("hosts.d"));
		assert_eq!(config.proxy_dir.as_deref(), Some("jump"));
		assert_eq!(config.backup_suffix.as_deref(), Some(".bak"));
		assert_eq!(
			config.ignore,
			Some(vec![".DS_Store".to_string(), "README".to_string()])
		);
		assert_eq!(config.bastion_marker.as_deref(), Some("jump"));
	}

	#[test]
	fn test_parse_invalid_toml() {
		let path = PathBuf::from("test.toml");
		match parse_config_str("proxy-dir = [[[", &path).unwrap_err() {
			JumpgenError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("test.toml"));
			}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_unknown_key_is_rejected() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("proxy-folder = \"proxy\"", &path);
		assert!(matches!(
			result,
			Err(JumpgenError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_parse_runs_validation() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("proxy-dir = \"../escape\"", &path);
		assert!(matches!(result, Err(JumpgenError::InvalidSetting { .. })));
	}

	#[test]
	fn test_parse_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.toml");
		match parse_config_file(&path).unwrap_err() {
			JumpgenError::ConfigNotFound { path: p } => assert_eq!(p, path),
			other => panic!("Expected ConfigNotFound, got {other:?}"),
		}
	}
}
