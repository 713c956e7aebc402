//! Byte-level text helpers for line splitting and trimming
//!
//! Input is handled as raw bytes so that both UTF-8 and Shift_JIS pass
//! through untouched. In both encodings the ASCII whitespace bytes never
//! occur inside a multibyte character, so trimming and splitting at the
//! byte level is safe.

/// Whitespace trimmed from line ends: space, tab, CR, LF.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Trim surrounding whitespace from a byte slice.
pub fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_space(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !is_space(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Split input into lines at LF boundaries, dropping every CR byte.
///
/// The final segment is kept even when empty; callers skip empty lines
/// after trimming.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    for &b in bytes {
        match b {
            b'\r' => {}
            b'\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(b),
        }
    }
    lines.push(current);
    lines
}
