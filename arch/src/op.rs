use strum::{Display, EnumIter, EnumString};

/// Opcodes that may take a label operand instead of a register triple.
/// Spelling is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display)]
pub enum SymOp {
    STORE,
    LOAD,
    JUMP,
}

impl SymOp {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Not a symbolic op: {s}")),
        }
    }

    /// Opcode of the fully specified instruction this op is rewritten to.
    /// A jump is an addition to the program counter.
    pub fn lowered(self) -> &'static str {
        match self {
            SymOp::STORE => "STORE",
            SymOp::LOAD => "LOAD",
            SymOp::JUMP => "ADD",
        }
    }
}
