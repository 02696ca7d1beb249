use thiserror::Error;

use crate::msg::Msg;

/// Defect found on a single source line. Collected, never fatal by itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Syntax Error: Cannot parse")]
    Syntax,

    #[error("Duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("Undefined label: `{0}`")]
    UndefinedSymbol(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Too many errors; abandoning")]
    TooManyErrors(Vec<Msg>),

    #[error("{} error(s) found; no output written", crate::msg::error_count(.0))]
    Rejected(Vec<Msg>),

    #[error("Invalid config file: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize symbol table")]
    Symbols(#[source] serde_yaml::Error),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Per-line diagnostics carried by a rejected assembly.
    pub fn msgs(&self) -> &[Msg] {
        match self {
            Error::TooManyErrors(msgs) | Error::Rejected(msgs) => msgs,
            _ => &[],
        }
    }
}
