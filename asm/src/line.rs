use crate::{
    error::LineError,
    parser::{self, Stmt},
};

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    idx: usize,
    raw: String,
}

impl SourceLine {
    pub fn new(idx: usize, raw: &str) -> Self {
        Self {
            idx,
            raw: raw.to_string(),
        }
    }

    /// Zero-based line index.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// One-based line number, for display.
    pub fn no(&self) -> usize {
        self.idx + 1
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn classify(&self) -> Result<Stmt<'_>, LineError> {
        parser::classify(&self.raw)
    }
}

/// Split source text into numbered lines with trailing whitespace removed.
pub fn read_lines(text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| SourceLine::new(idx, raw.trim_end()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines() {
        let lines = read_lines("a: DATA 1   \r\n\n  JUMP a\t\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].raw(), "a: DATA 1");
        assert_eq!(lines[1].raw(), "");
        assert_eq!(lines[2].raw(), "  JUMP a");
        assert_eq!(lines[2].idx(), 2);
        assert_eq!(lines[2].no(), 3);
    }
}
