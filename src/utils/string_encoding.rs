// src/utils/string_encoding.rs

/// Decode a fixed-width text block up to the first NUL byte.
///
/// WFM stores labels and unit names as fixed-size byte blocks; content past
/// the terminator is unspecified and ignored.
pub fn text_until_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).to_string()
}

/// Return the last run of ASCII digits in `s`, parsed as an integer.
///
/// Fallback used when a version string does not carry the expected
/// `WFM#nnn` tag.
pub fn last_digit_run(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    let mut end = None;
    for (i, b) in bytes.iter().enumerate().rev() {
        if b.is_ascii_digit() {
            end = Some(i + 1);
            break;
        }
    }
    let end = end?;
    let mut start = end;
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }
    s[start..end].parse().ok()
}
