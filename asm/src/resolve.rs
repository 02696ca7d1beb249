use arch::{op::SymOp, pc_relative, reg::Reg, Addr};

use crate::{
    error::LineError,
    label::SymbolTable,
    line::SourceLine,
    msg::Msg,
    parser::{Form, Symbolic},
};

/// Result of the second pass. `lines[i]` and `addrs[i]` describe source line `i`.
#[derive(Debug, Clone)]
pub struct Pass2 {
    pub lines: Vec<String>,
    pub addrs: Vec<Option<Addr>>,
    pub msgs: Vec<Msg>,
}

impl Pass2 {
    pub fn is_clean(&self) -> bool {
        self.msgs.is_empty()
    }
}

/// Second pass: rewrite symbolic lines into PC-relative fully specified
/// instructions and pass everything else through verbatim.
///
/// Addresses are counted exactly as in the first pass, so every line keeps
/// the address the table was built with. A line that cannot be resolved is
/// left as written and reported in `msgs`.
pub fn resolve(lines: &[SourceLine], table: &SymbolTable) -> Pass2 {
    let mut out = Vec::with_capacity(lines.len());
    let mut addrs = Vec::with_capacity(lines.len());
    let mut msgs = Vec::new();
    let mut addr: Addr = 0;

    for line in lines {
        log::trace!("pass 2 line {} addr {}: {}", line.idx(), addr, line.raw());
        let stmt = match line.classify() {
            Ok(stmt) => stmt,
            Err(err) => {
                msgs.push(Msg::error(err, line));
                out.push(line.raw().to_string());
                addrs.push(None);
                continue;
            }
        };

        let text = match &stmt.form {
            Form::Symbolic(sym) => match rewrite(stmt.label, sym, addr, table) {
                Ok(text) => text,
                Err(err) => {
                    msgs.push(Msg::error(err, line));
                    line.raw().to_string()
                }
            },
            Form::Comment | Form::Full(_) | Form::Data(_) => line.raw().to_string(),
        };
        out.push(text);

        if stmt.occupies() {
            addrs.push(Some(addr));
            addr += 1;
        } else {
            addrs.push(None);
        }
    }

    Pass2 {
        lines: out,
        addrs,
        msgs,
    }
}

/// Fully specified text for a symbolic instruction at `addr`.
///
/// ```text
/// STORE r1, var   ->  STORE r1,r0,r15[<rel>]  # Access variable 'var'
/// JUMP/Z loop     ->  ADD/Z r15,r0,r15[<rel>] #Jump to loop
/// ```
///
/// Only a jump keeps its predicate.
pub fn rewrite(
    label: Option<&str>,
    sym: &Symbolic<'_>,
    addr: Addr,
    table: &SymbolTable,
) -> Result<String, LineError> {
    let target = table
        .addr(sym.symbol)
        .ok_or_else(|| LineError::UndefinedSymbol(sym.symbol.to_string()))?;
    let rel = pc_relative(target, addr);

    let label = label.map(|l| format!("{l}: ")).unwrap_or_default();
    Ok(match sym.op {
        SymOp::STORE | SymOp::LOAD => {
            let rd = match sym.target {
                Some(reg) => reg.text.to_string(),
                None => Reg::ZERO.to_string(),
            };
            format!(
                "{label}{} {rd},{},{}[{rel}]  # Access variable '{}'",
                sym.op.lowered(),
                Reg::ZERO,
                Reg::PC,
                sym.symbol
            )
        }
        SymOp::JUMP => {
            let pred = sym.predicate.map(|p| format!("/{p}")).unwrap_or_default();
            format!(
                "{label}{}{pred} {},{},{}[{rel}] #Jump to {}",
                sym.op.lowered(),
                Reg::PC,
                Reg::ZERO,
                Reg::PC,
                sym.symbol
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, line::read_lines, parser::classify, table::build_table};

    fn run(src: &str) -> Pass2 {
        let lines = read_lines(src);
        let pass1 = build_table(&lines, &Config::default()).unwrap();
        assert_eq!(pass1.error_count(), 0, "{:?}", pass1.msgs);
        resolve(&lines, &pass1.table)
    }

    #[test]
    fn test_self_reference() {
        let p = run("loop: STORE r1, loop");
        assert!(p.is_clean());
        assert_eq!(
            p.lines,
            vec!["loop: STORE r1,r0,r15[0]  # Access variable 'loop'"]
        );
    }

    #[test]
    fn test_jump_forward() {
        let p = run("JUMP end\nDATA 1\nend: DATA 2\n");
        assert_eq!(p.lines[0], "ADD r15,r0,r15[2] #Jump to end");
        assert_eq!(p.lines[1], "DATA 1");
    }

    #[test]
    fn test_jump_backward_with_predicate() {
        let p = run("top: ADD r1,r1,r2\n# spin\nSUB r3,r3,r2\nJUMP/P top\n");
        assert_eq!(p.lines[3], "ADD/P r15,r0,r15[-2] #Jump to top");
        assert_eq!(p.lines[1], "# spin");
    }

    #[test]
    fn test_load_default_target() {
        let p = run("LOAD counter\ncounter: DATA 0\n");
        assert_eq!(p.lines[0], "LOAD r0,r0,r15[1]  # Access variable 'counter'");
    }

    #[test]
    fn test_store_load_drop_predicate() {
        let p = run("x: DATA\nSTORE/Z r4,x\nLOAD/P x\n");
        assert_eq!(p.lines[1], "STORE r4,r0,r15[-1]  # Access variable 'x'");
        assert_eq!(p.lines[2], "LOAD r0,r0,r15[-2]  # Access variable 'x'");
    }

    #[test]
    fn test_wide_numbers_pass_through() {
        let p = run(
            "big: DATA 99999999999999999999999\nADD r70000,r1,r2[-99999999999999999999]\nSTORE r70000, big\n",
        );
        assert!(p.is_clean());
        assert_eq!(p.lines[0], "big: DATA 99999999999999999999999");
        assert_eq!(p.lines[1], "ADD r70000,r1,r2[-99999999999999999999]");
        assert_eq!(p.lines[2], "STORE r70000,r0,r15[-2]  # Access variable 'big'");
        assert_eq!(p.addrs, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_rewrite_is_full_form() {
        let p = run("a:\n  LOAD r2,val # fetch\nval: DATA 0x10\n");
        let stmt = classify(&p.lines[1]).unwrap();
        match stmt.form {
            Form::Full(full) => {
                assert_eq!(full.opcode, "LOAD");
                assert_eq!(full.target.value, Some(Reg(2)));
                assert_eq!(full.src1.value, Some(Reg::ZERO));
                assert_eq!(full.src2.value, Some(Reg::PC));
                assert_eq!(full.offset.and_then(|o| o.value), Some(1));
            }
            other => panic!("expected Full, got {:?}", other),
        }
    }

    #[test]
    fn test_addresses_match_pass1() {
        let src = "# c\nstart: DATA 1\n\nJUMP start\nmid:\nADD r1,r2,r3\n";
        let lines = read_lines(src);
        let pass1 = build_table(&lines, &Config::default()).unwrap();
        let p = resolve(&lines, &pass1.table);
        assert_eq!(p.addrs, vec![None, Some(0), None, Some(1), None, Some(2)]);
        assert_eq!(pass1.table.addr("start"), p.addrs[1]);
        assert_eq!(pass1.table.addr("mid"), Some(2));
        assert_eq!(p.lines.len(), lines.len());
    }

    #[test]
    fn test_undefined_symbol() {
        let lines = read_lines("JUMP nowhere\nDATA 1\n");
        let p = resolve(&lines, &SymbolTable::new());
        assert!(!p.is_clean());
        assert_eq!(
            p.msgs[0].line_error(),
            Some(&LineError::UndefinedSymbol("nowhere".to_string()))
        );
        assert_eq!(p.lines[0], "JUMP nowhere");
        assert_eq!(p.addrs, vec![Some(0), Some(1)]);
    }
}
