use color_print::ceprintln;
use std::fmt;

use crate::{error::LineError, line::SourceLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgKind {
    Error(LineError),
    Note(String),
}

/// Diagnostic attached to one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msg {
    pub kind: MsgKind,
    pub idx: usize,
    pub raw: String,
}

impl Msg {
    pub fn error(err: LineError, line: &SourceLine) -> Self {
        Msg {
            kind: MsgKind::Error(err),
            idx: line.idx(),
            raw: line.raw().to_string(),
        }
    }

    pub fn note(msg: String, line: &SourceLine) -> Self {
        Msg {
            kind: MsgKind::Note(msg),
            idx: line.idx(),
            raw: line.raw().to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, MsgKind::Error(_))
    }

    pub fn line_error(&self) -> Option<&LineError> {
        match &self.kind {
            MsgKind::Error(err) => Some(err),
            MsgKind::Note(_) => None,
        }
    }

    /// Print to stderr with the offending source line.
    pub fn diag(&self, path: &str) {
        match &self.kind {
            MsgKind::Error(err) => ceprintln!("<red,bold>error</>: {}", err),
            MsgKind::Note(msg) => ceprintln!("<green,bold>note</>: {}", msg),
        }
        ceprintln!("     <blue>--></> <underline>{}:{}</>", path, self.idx + 1);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", self.idx + 1, self.raw);
        ceprintln!("      <blue>|</>");
    }
}

impl fmt::Display for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MsgKind::Error(err) => write!(f, "line {}: error: {}", self.idx + 1, err),
            MsgKind::Note(msg) => write!(f, "line {}: note: {}", self.idx + 1, msg),
        }
    }
}

pub fn error_count(msgs: &[Msg]) -> usize {
    msgs.iter().filter(|msg| msg.is_error()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        let line = SourceLine::new(1, "JUMP nowhere");
        let err = Msg::error(LineError::UndefinedSymbol("nowhere".to_string()), &line);
        assert_eq!(err.idx, 1);
        assert_eq!(err.to_string(), "line 2: error: Undefined label: `nowhere`");

        let note = Msg::note("first defined here".to_string(), &SourceLine::new(0, "a:"));
        assert_eq!(note.to_string(), "line 1: note: first defined here");
        assert_eq!(error_count(&[err, note]), 1);
    }
}
