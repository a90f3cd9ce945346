// Cursor and word helpers shared by the analyzers

/// Byte that continues a LogQL identifier
pub fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Clamp `cursor` to the text and move it back onto a char boundary
pub fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// Start of the word run ending at `cursor`; `cursor` itself when there is none
pub fn word_start(text: &str, cursor: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = cursor;
    while start > 0 && is_word_byte(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// Text between the last line break before `cursor` and `cursor`
pub fn line_before(text: &str, cursor: usize) -> &str {
    let before = &text[..cursor];
    match before.rfind('\n') {
        Some(newline) => &before[newline + 1..],
        None => before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor("abc", 10), 3);
        assert_eq!(clamp_cursor("abc", 1), 1);
        // 'é' is two bytes
        assert_eq!(clamp_cursor("{é", 2), 1);
        assert_eq!(clamp_cursor("", 4), 0);
    }

    #[test]
    fn test_word_start() {
        assert_eq!(word_start("{} | js", 7), 5);
        assert_eq!(word_start("{} | ", 5), 5);
        assert_eq!(word_start("line_fo", 7), 0);
        assert_eq!(word_start("rate(", 5), 5);
    }

    #[test]
    fn test_line_before() {
        assert_eq!(line_before("{job=\"a\"}\n| js", 14), "| js");
        assert_eq!(line_before("{job", 4), "{job");
        assert_eq!(line_before("a\n", 2), "");
    }
}
