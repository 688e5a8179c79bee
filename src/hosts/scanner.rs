/// A `Host` line plus the indented option lines that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostBlock<'a> {
	text: &'a str,
	header: &'a str,
}

impl<'a> HostBlock<'a> {
	/// The whole block, from the `Host` keyword to the end of the last
	/// option line (no trailing newline).
	pub fn text(&self) -> &'a str {
		self.text
	}

	/// The `Host` line with its leading indentation removed.
	pub fn header(&self) -> &'a str {
		self.header
	}

	/// Host patterns listed on the `Host` line.
	pub fn patterns(&self) -> impl Iterator<Item = &'a str> + 'a {
		self.header.split_whitespace().skip(1)
	}

	/// Display name of the block: its first host pattern.
	pub fn name(&self) -> &'a str {
		self.patterns().next().unwrap_or_default()
	}
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
	OutsideBlock,
	InBlockHeader {
		start: usize,
		indent: usize,
	},
	InBlockBody {
		start: usize,
		end: usize,
		indent: usize,
	},
}

/// Lazy iterator over the host blocks of a fragment file.
///
/// A `Host` line only opens a block once a line indented deeper than it
/// follows; a `Host` line with no option lines yields nothing. Blank lines
/// inside a block are skipped. The block closes on the next non-blank line
/// that is not indented deeper than its `Host` line.
#[derive(Debug, Clone)]
pub struct HostBlocks<'a> {
	content: &'a str,
	pos: usize,
	state: ScanState,
}

/// Scan fragment content for host blocks, in file order.
pub fn host_blocks(content: &str) -> HostBlocks<'_> {
	HostBlocks {
		content,
		pos: 0,
		state: ScanState::OutsideBlock,
	}
}

impl<'a> HostBlocks<'a> {
	fn block(&self, start: usize, end: usize) -> HostBlock<'a> {
		let text = &self.content[start..end];
		let header = text.lines().next().unwrap_or_default().trim();
		HostBlock {
			text: text.trim_start(),
			header,
		}
	}
}

impl<'a> Iterator for HostBlocks<'a> {
	type Item = HostBlock<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if self.pos >= self.content.len() {
				let state = std::mem::replace(&mut self.state, ScanState::OutsideBlock);
				return match state {
					ScanState::InBlockBody { start, end, .. } => Some(self.block(start, end)),
					_ => None,
				};
			}

			let rest = &self.content[self.pos..];
			let line_len = rest.find('\n').unwrap_or(rest.len());
			let raw = &rest[..line_len];
			let line = raw.strip_suffix('\r').unwrap_or(raw);
			let line_end = self.pos + line.len();
			let next_pos = (self.pos + line_len + 1).min(self.content.len());

			if line.trim().is_empty() && !matches!(self.state, ScanState::OutsideBlock) {
				self.pos = next_pos;
				continue;
			}

			match self.state {
				ScanState::OutsideBlock => {
					if let Some(indent) = header_indent(line) {
						self.state = ScanState::InBlockHeader {
							start: self.pos,
							indent,
						};
					}
					self.pos = next_pos;
				}
				ScanState::InBlockHeader { start, indent } => {
					if is_option_line(line, indent) {
						self.state = ScanState::InBlockBody {
							start,
							end: line_end,
							indent,
						};
						self.pos = next_pos;
					} else {
						// Bare `Host` line: drop it and rescan this line.
						self.state = ScanState::OutsideBlock;
					}
				}
				ScanState::InBlockBody { start, end, indent } => {
					if is_option_line(line, indent) {
						self.state = ScanState::InBlockBody {
							start,
							end: line_end,
							indent,
						};
						self.pos = next_pos;
					} else {
						self.state = ScanState::OutsideBlock;
						return Some(self.block(start, end));
					}
				}
			}
		}
	}
}

/// Indentation of `line` if it is a `Host` line with at least one pattern.
fn header_indent(line: &str) -> Option<usize> {
	let trimmed = line.trim_start();
	let mut tokens = trimmed.split_whitespace();
	let keyword = tokens.next()?;
	if keyword.eq_ignore_ascii_case("host") && tokens.next().is_some() {
		Some(line.len() - trimmed.len())
	} else {
		None
	}
}

fn is_option_line(line: &str, header_indent: usize) -> bool {
	let trimmed = line.trim_start();
	!trimmed.is_empty() && line.len() - trimmed.len() > header_indent
}
