//! Streaming UTF-8 decoding.

use std::borrow::Cow;

/// UTF-8 byte-order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a sequence of byte chunks as one UTF-8 text.
///
/// A multi-byte character split across two chunks is held back until the
/// rest of it arrives. Invalid sequences decode to U+FFFD. A byte-order mark
/// at the very start of the input is dropped, even when it is split across
/// chunks; anywhere else it is kept as U+FEFF.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    /// Leading bytes of a character that is not complete yet (at most 3).
    pending: Vec<u8>,
    /// The start of the input has been checked for a byte-order mark.
    bom_checked: bool,
}

impl Utf8StreamDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes: Cow<'_, [u8]> = if self.pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let mut rest: &[u8] = &bytes;
        if !self.bom_checked {
            if rest.len() < BOM.len() && BOM.starts_with(rest) {
                // Too short to tell yet.
                self.pending = rest.to_vec();
                return String::new();
            }
            self.bom_checked = true;
            rest = rest.strip_prefix(BOM).unwrap_or(rest);
        }

        let mut out = String::with_capacity(rest.len());

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            // Truncated character at the end of the chunk.
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush at end of input. A dangling partial character becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Whether bytes of an incomplete character are being held back.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
