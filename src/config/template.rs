/// Generate a commented `.jumpgen.toml` template.
///
/// Every key is commented out, so the template resolves to the defaults.
pub fn generate_init_template() -> String {
	r#"# jumpgen configuration
#
# All keys are optional. A leading "~/" expands to your home directory.

# Directory holding one SSH config fragment per file.
# config-dir = "~/.ssh/config.d"

# File that receives the generated `include` line. It is overwritten on
# every `jumpgen proxy` run.
# include-file = "~/.ssh/config"

# Path written in the include globs. Defaults to config-dir relative to
# ~/.ssh, or the absolute config-dir when it lives elsewhere.
# include-prefix = "config.d"

# Directory (inside config-dir) that holds one subdirectory per bastion.
# proxy-dir = "proxy"

# Suffix for the backup taken while regenerating proxy-dir.
# backup-suffix = "-copy"

# Entries in config-dir that are never read as fragments.
# ignore = [".DS_Store"]

# Hosts whose patterns contain this substring are bastions.
# bastion-marker = "bastion"
"#
	.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_config_str;
	use std::path::Path;

	#[test]
	fn test_template_parses_to_defaults() {
		let template = generate_init_template();
		let config = parse_config_str(&template, Path::new("template.toml")).unwrap();
		assert!(config.config_dir.is_none());
		assert!(config.proxy_dir.is_none());
	}

	#[test]
	fn test_template_mentions_every_key() {
		let template = generate_init_template();
		for key in [
			"config-dir",
			"include-file",
			"include-prefix",
			"proxy-dir",
			"backup-suffix",
			"ignore",
			"bastion-marker",
		] {
			assert!(template.contains(key), "missing {key}");
		}
	}
}
