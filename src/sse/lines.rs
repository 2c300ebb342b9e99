//! Line splitting with carry-over between chunks.

/// Accumulates decoded text and hands out complete `\n`-terminated lines.
///
/// After every [`push`](LineBuffer::push) the buffer holds no newline: only a
/// trailing partial line can remain.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text and return every line it completes, without the `\n`.
    ///
    /// A `\r` before the newline is kept; JSON parsing treats it as whitespace.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        // `pending` holds no newline, so only the new text needs scanning.
        let Some(offset) = text.rfind('\n') else {
            self.pending.push_str(text);
            return Vec::new();
        };
        let last_newline = self.pending.len() + offset;
        self.pending.push_str(text);

        let lines = self.pending[..last_newline]
            .split('\n')
            .map(str::to_string)
            .collect();
        self.pending.drain(..=last_newline);
        lines
    }

    /// Take the trailing partial line, if there is one.
    pub fn take_remaining(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }

    /// The partial line held so far.
    pub fn pending(&self) -> &str {
        &self.pending
    }
}
