//! Byte offset to line/character conversion

use crate::types::{Position, Range};

/// Line start table for one document
///
/// Characters are counted in Unicode scalar values, lines are split on `\n`.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of byte `offset`, clamped to the document
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let character = self.text[start..offset].chars().count();
        Position::new(line as u32, character as u32)
    }

    /// Range covering bytes `[from, to)`
    pub fn range(&self, from: usize, to: usize) -> Range {
        Range::new(self.position(from), self.position(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("{job=\"x\"}");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position::new(0, 0));
        assert_eq!(index.position(9), Position::new(0, 9));
        assert_eq!(index.position(100), Position::new(0, 9));
    }

    #[test]
    fn test_multi_line() {
        let index = LineIndex::new("{job=\"x\"}\n| json\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position(9), Position::new(0, 9));
        assert_eq!(index.position(10), Position::new(1, 0));
        assert_eq!(index.position(12), Position::new(1, 2));
        assert_eq!(index.position(17), Position::new(2, 0));
    }

    #[test]
    fn test_multibyte_characters() {
        // 'é' takes two bytes but one character
        let index = LineIndex::new("{é=\"x\"}");
        assert_eq!(index.position(3), Position::new(0, 2));
        assert_eq!(index.position(2), Position::new(0, 1));
        assert_eq!(
            index.range(0, 3),
            Range::new(Position::new(0, 0), Position::new(0, 2))
        );
    }
}
