//! Label resolution for DM2018W assembly.
//!
//! Symbolic instructions such as `JUMP loop` or `STORE r1, counter` are
//! rewritten into fully specified instructions that address their operand
//! relative to the program counter (`r15`). The work is done in two passes
//! over the same lines: [`build_table`] binds labels to word addresses, then
//! [`resolve`] rewrites every symbolic line with those addresses.

pub mod config;
pub mod cursor;
pub mod error;
pub mod label;
pub mod line;
pub mod msg;
pub mod parser;
pub mod resolve;
pub mod table;
pub mod util;

use arch::Addr;

pub use config::Config;
pub use error::{Error, LineError};
pub use label::{Binding, SymbolTable};
pub use line::{read_lines, SourceLine};
pub use msg::Msg;
pub use parser::{classify, Form, Kind, Stmt};
pub use resolve::{resolve, Pass2};
pub use table::{build_table, Pass1};

/// Resolved program, one output line per source line.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub table: SymbolTable,
    pub lines: Vec<String>,
    pub addrs: Vec<Option<Addr>>,
}

/// Run both passes. Output is only produced when neither pass reported an
/// error; otherwise every diagnostic is handed back in the error.
pub fn assemble(lines: &[SourceLine], config: &Config) -> Result<Assembly, Error> {
    let pass1 = build_table(lines, config)?;
    if pass1.error_count() > 0 {
        return Err(Error::Rejected(pass1.msgs));
    }

    let pass2 = resolve(lines, &pass1.table);
    if !pass2.is_clean() {
        return Err(Error::Rejected(pass2.msgs));
    }

    Ok(Assembly {
        table: pass1.table,
        lines: pass2.lines,
        addrs: pass2.addrs,
    })
}
