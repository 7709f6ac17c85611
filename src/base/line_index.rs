//! Byte offset to line/column conversion.

use text_size::TextSize;

/// A zero-based line/column pair. `col` is a byte offset from line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Maps byte offsets of one text to line/column pairs.
///
/// Built once per source text; lookups are a binary search over line starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line. Always starts with 0.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines, counting a trailing empty line after a final `\n`.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    /// Convert an offset into a line/column pair.
    ///
    /// The end-of-text offset is valid; anything beyond it is `None`.
    pub fn line_col(&self, offset: TextSize) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        Some(LineCol::new(line as u32, col.into()))
    }

    /// Convert a line/column pair back into an offset.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        let end = self
            .line_starts
            .get(line_col.line as usize + 1)
            .copied()
            .unwrap_or(self.len);
        let offset = start + TextSize::new(line_col.col);
        (offset <= end).then_some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("enum A {}");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(TextSize::new(0)), Some(LineCol::new(0, 0)));
        assert_eq!(index.line_col(TextSize::new(5)), Some(LineCol::new(0, 5)));
        assert_eq!(index.line_col(TextSize::new(9)), Some(LineCol::new(0, 9)));
        assert_eq!(index.line_col(TextSize::new(10)), None);
    }

    #[test]
    fn test_multi_line() {
        let index = LineIndex::new("enum A {\n  X\n}\n");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(TextSize::new(8)), Some(LineCol::new(0, 8)));
        assert_eq!(index.line_col(TextSize::new(9)), Some(LineCol::new(1, 0)));
        assert_eq!(index.line_col(TextSize::new(11)), Some(LineCol::new(1, 2)));
        assert_eq!(index.line_col(TextSize::new(13)), Some(LineCol::new(2, 0)));
        assert_eq!(index.line_col(TextSize::new(15)), Some(LineCol::new(3, 0)));
    }

    #[test]
    fn test_crlf_stays_on_previous_line() {
        let index = LineIndex::new("a\r\nb");
        assert_eq!(index.line_col(TextSize::new(1)), Some(LineCol::new(0, 1)));
        assert_eq!(index.line_col(TextSize::new(3)), Some(LineCol::new(1, 0)));
    }

    #[test]
    fn test_offset_roundtrip() {
        let text = "enum Season {\n    WINTER,\n    SPRING\n}";
        let index = LineIndex::new(text);
        for offset in 0..=text.len() as u32 {
            let offset = TextSize::new(offset);
            let lc = index.line_col(offset).unwrap();
            assert_eq!(index.offset(lc), Some(offset));
        }
    }

    #[test]
    fn test_offset_rejects_column_past_line_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(LineCol::new(0, 3)), Some(TextSize::new(3)));
        assert_eq!(index.offset(LineCol::new(0, 4)), None);
        assert_eq!(index.offset(LineCol::new(5, 0)), None);
    }
}
