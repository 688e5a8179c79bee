use std::path::PathBuf;

/// Library-level structured errors for jumpgen.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum JumpgenError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid value for `{key}`: {reason}")]
	InvalidSetting { key: String, reason: String },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Bastion name cannot be used as a directory name: {name}")]
	InvalidBastionName { name: String },

	#[error("Failed to list directory: {path}")]
	ReadDirError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read fragment file: {path}")]
	FragmentReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to create directory: {path}")]
	CreateDirError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve path: {path}")]
	PathResolveError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to remove directory: {path}")]
	RemoveDirError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to move {from} to {to}")]
	RenameError {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to prepare {output} for regeneration")]
	SnapshotFailed {
		output: PathBuf,
		#[source]
		source: Box<JumpgenError>,
	},

	#[error("Regenerated {output} but failed to discard its backup")]
	CommitFailed {
		output: PathBuf,
		#[source]
		source: Box<JumpgenError>,
	},

	#[error("Rollback failed, {output} may be inconsistent (generation error: {cause})")]
	RollbackFailed {
		output: PathBuf,
		cause: Box<JumpgenError>,
		#[source]
		source: Box<JumpgenError>,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using JumpgenError.
pub type Result<T> = std::result::Result<T, JumpgenError>;
