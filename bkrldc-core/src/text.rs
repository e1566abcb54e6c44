//! Full-width character handling for Big5 bulletin text.

/// Ideographic (full-width) space, used as a column separator in the bulletin.
pub const FULLWIDTH_SPACE: char = '\u{3000}';

/// Map full-width digits `０`-`９` to ASCII, leaving everything else as is.
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            _ => c,
        })
        .collect()
}

/// Turn full-width spaces and line breaks into ASCII spaces and trim.
pub fn normalize_line(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            FULLWIDTH_SPACE | '\n' | '\r' => ' ',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
