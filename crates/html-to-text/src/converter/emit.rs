//! Output buffer for the tree walker.
//!
//! Tracks word spacing, the length of the current line and the active blockquote
//! prefix. Text written inside a blockquote is wrapped at [`MAX_LINE_LEN`] code points
//! and every line, natural or wrapped, is re-quoted.

/// Maximum line width, in code points, for text inside a blockquote.
pub const MAX_LINE_LEN: usize = 74;

/// Text emission buffer.
#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    output: String,
    prefix: String,
    ends_with_space: bool,
    line_length: usize,
    quote_depth: usize,
}

impl TextBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Buffer that behaves as if it already ended in whitespace, so the first
    /// emission gets no separating space.
    pub(crate) fn without_leading_space() -> Self {
        Self {
            ends_with_space: true,
            ..Self::default()
        }
    }

    /// Number of code points written since the last newline, prefix excluded.
    pub(crate) const fn line_length(&self) -> usize {
        self.line_length
    }

    #[cfg(test)]
    pub(crate) const fn quote_depth(&self) -> usize {
        self.quote_depth
    }

    #[cfg(test)]
    pub(crate) fn as_str(&self) -> &str {
        &self.output
    }

    pub(crate) fn into_string(self) -> String {
        self.output
    }

    /// Enter a blockquote and return the new depth.
    pub(crate) fn enter_quote(&mut self, text_only: bool) -> usize {
        self.quote_depth += 1;
        self.prefix = quote_prefix(self.quote_depth, text_only);
        self.quote_depth
    }

    /// Leave a blockquote, recomputing the prefix for the enclosing depth.
    pub(crate) fn leave_quote(&mut self, text_only: bool) {
        self.quote_depth = self.quote_depth.saturating_sub(1);
        self.prefix = quote_prefix(self.quote_depth, text_only);
    }

    /// Append `data`, inserting word spacing and re-quoting every new line.
    ///
    /// `wrap` enables quote-region line wrapping; it only has an effect while a
    /// blockquote is open.
    pub(crate) fn emit(&mut self, data: &str, wrap: bool) {
        if data.is_empty() {
            return;
        }

        let lines = if wrap && self.quote_depth > 0 {
            break_long_lines(data, self.line_length)
        } else {
            vec![data.to_string()]
        };

        for line in &lines {
            let (Some(first), Some(last)) = (line.chars().next(), line.chars().next_back()) else {
                continue;
            };
            if !first.is_whitespace() && !self.ends_with_space && !data.starts_with('.') {
                self.output.push(' ');
                self.line_length += 1;
            }
            self.ends_with_space = last.is_whitespace();

            for c in line.chars() {
                self.output.push(c);
                self.line_length += 1;
                if c == '\n' {
                    self.line_length = 0;
                    self.output.push_str(&self.prefix);
                }
            }
        }
    }
}

/// Prefix written after each newline at `depth`; empty outside quotes and in text-only mode.
pub(crate) fn quote_prefix(depth: usize, text_only: bool) -> String {
    if depth == 0 || text_only {
        return String::new();
    }
    let mut prefix = ">".repeat(depth);
    prefix.push(' ');
    prefix
}

/// Split `data` so no line exceeds [`MAX_LINE_LEN`] code points, given that the
/// current line already holds `existing` of them.
///
/// Breaks at the last whitespace before the limit; when there is none, at the first
/// whitespace after it, so a word is never split. Whitespace at a break is consumed.
/// Every returned segment except the last ends with a newline.
pub(crate) fn break_long_lines(data: &str, existing: usize) -> Vec<String> {
    let chars: Vec<char> = data.chars().collect();
    let mut lines = Vec::new();
    let mut existing = existing;

    if existing >= MAX_LINE_LEN {
        lines.push("\n".to_string());
        existing = 0;
    }

    let mut rest = chars.as_slice();
    while rest.len() + existing > MAX_LINE_LEN {
        let limit = MAX_LINE_LEN - existing;
        let mut cut = (0..=limit)
            .rev()
            .find(|&i| rest[i].is_whitespace())
            .or_else(|| (limit..rest.len()).find(|&i| rest[i].is_whitespace()))
            .unwrap_or(rest.len());

        let mut line: String = rest[..cut].iter().collect();
        line.push('\n');
        lines.push(line);

        while cut < rest.len() && rest[cut].is_whitespace() {
            cut += 1;
        }
        rest = &rest[cut..];
        existing = 0;
    }

    if !rest.is_empty() {
        lines.push(rest.iter().collect());
    }
    lines
}
