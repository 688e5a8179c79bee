use crate::error::{JumpgenError, Result};
use regex::{Captures, Regex};

/// Matches a `Host` line: indentation, keyword as written, pattern list.
const HOST_LINE_PATTERN: &str = r"(?im)^([ \t]*)(host)[ \t]+([^\n]*\S)[ \t]*";

/// Indentation of the emitted `proxyJump` line, relative to the `Host` line.
const PROXY_JUMP_INDENT: &str = "    ";

/// Rewrites every `Host` line of a fragment for one bastion.
#[derive(Debug, Clone)]
pub struct HostLineRewriter {
	pattern: Regex,
}

impl HostLineRewriter {
	pub fn new() -> Result<Self> {
		let pattern =
			Regex::new(HOST_LINE_PATTERN).map_err(|source| JumpgenError::InvalidRegex {
				pattern: HOST_LINE_PATTERN.to_string(),
				source,
			})?;
		Ok(HostLineRewriter { pattern })
	}

	/// Rewrite all `Host` lines in `content` to route through `bastion`.
	///
	/// Everything other than the `Host` lines is copied through unchanged.
	pub fn rewrite(&self, content: &str, bastion: &str) -> String {
		self.pattern
			.replace_all(content, |caps: &Captures| {
				rewrite_host_line(&caps[1], &caps[2], &caps[3], bastion)
			})
			.into_owned()
	}
}

/// Build the replacement for one `Host` line.
///
/// Each pattern becomes `{bastion}-{pattern}` and a `proxyJump` line is
/// placed directly under the rewritten `Host` line. `keyword` is emitted
/// exactly as captured.
pub fn rewrite_host_line(indent: &str, keyword: &str, patterns: &str, bastion: &str) -> String {
	let prefixed: Vec<String> = patterns
		.split_whitespace()
		.map(|pattern| format!("{bastion}-{pattern}"))
		.collect();

	format!(
		"{indent}{keyword} {}\n{indent}{PROXY_JUMP_INDENT}proxyJump {bastion}",
		prefixed.join(" ")
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rewriter() -> HostLineRewriter {
		HostLineRewriter::new().unwrap()
	}

	#[test]
	fn test_rewrite_host_line() {
		assert_eq!(
			rewrite_host_line("", "Host", "web web.internal", "bastion1"),
			"Host bastion1-web bastion1-web.internal\n    proxyJump bastion1"
		);
	}

	#[test]
	fn test_rewrite_single_block() {
		assert_eq!(
			rewriter().rewrite("Host web\n  User x\n", "bastion1"),
			"Host bastion1-web\n    proxyJump bastion1\n  User x\n"
		);
	}

	#[test]
	fn test_rewrite_preserves_keyword_case() {
		assert_eq!(
			rewriter().rewrite("host a\n  User x\nHOST b\n  User y\n", "jb"),
			"host jb-a\n    proxyJump jb\n  User x\nHOST jb-b\n    proxyJump jb\n  User y\n"
		);
	}

	#[test]
	fn test_rewrite_collapses_pattern_whitespace() {
		assert_eq!(
			rewriter().rewrite("Host  a\t b  \n  User x", "jb"),
			"Host jb-a jb-b\n    proxyJump jb\n  User x"
		);
	}

	#[test]
	fn test_rewrite_drops_trailing_blanks_before_crlf() {
		assert_eq!(
			rewriter().rewrite("Host a \t\r\n  User x\r\n", "jb"),
			"Host jb-a\n    proxyJump jb\r\n  User x\r\n"
		);
	}

	#[test]
	fn test_rewrite_leaves_other_lines_alone() {
		let content = "# Host in a comment\nHostName example.com\n  Hostname web\nMatch host x\n";
		assert_eq!(rewriter().rewrite(content, "jb"), content);
	}

	#[test]
	fn test_rewrite_bare_host_line() {
		// Rewriting is line based, unlike block extraction.
		assert_eq!(
			rewriter().rewrite("Host lonely\n", "jb"),
			"Host jb-lonely\n    proxyJump jb\n"
		);
	}

	#[test]
	fn test_rewrite_indented_host_line() {
		assert_eq!(
			rewriter().rewrite("  Host web\n      User x\n", "jb"),
			"  Host jb-web\n      proxyJump jb\n      User x\n"
		);
	}

	#[test]
	fn test_rewrite_keeps_wildcards() {
		assert_eq!(
			rewriter().rewrite("Host *.prod !db.prod\n  User x\n", "jb"),
			"Host jb-*.prod jb-!db.prod\n    proxyJump jb\n  User x\n"
		);
	}
}
