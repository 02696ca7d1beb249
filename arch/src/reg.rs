use std::fmt;

/// General purpose register `r<n>`.
///
/// The register file itself is not modelled here; any number that fits in
/// a `u16` is accepted so that range checks stay with the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reg(pub u16);

impl Reg {
    /// Always reads as zero.
    pub const ZERO: Reg = Reg(0);
    /// Holds the program counter.
    pub const PC: Reg = Reg(15);

    pub fn parse(s: &str) -> Result<Self, String> {
        if !Reg::is_name(s) {
            return Err(format!("Unknown reg name: {s}"));
        }
        match s[1..].parse::<u16>() {
            Ok(n) => Ok(Reg(n)),
            Err(_) => Err(format!("Register out of range: {s}")),
        }
    }

    /// True for anything shaped like a register name, in range or not.
    pub fn is_name(s: &str) -> bool {
        match s.strip_prefix('r') {
            Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
            None => false,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
