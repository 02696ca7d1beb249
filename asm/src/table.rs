use arch::Addr;

use crate::{
    config::Config,
    error::{Error, LineError},
    label::{Binding, SymbolTable},
    line::SourceLine,
    msg::{self, Msg},
};

/// Result of the first pass.
#[derive(Debug, Clone)]
pub struct Pass1 {
    pub table: SymbolTable,
    pub msgs: Vec<Msg>,
}

impl Pass1 {
    /// Anything non-zero means the second pass must not run.
    pub fn error_count(&self) -> usize {
        msg::error_count(&self.msgs)
    }
}

/// First pass: bind every label to the address of the next word.
///
/// Errors are collected per line and the scan carries on, until their count
/// exceeds `config.error_limit`; then the pass stops at once with
/// `Error::TooManyErrors`.
pub fn build_table(lines: &[SourceLine], config: &Config) -> Result<Pass1, Error> {
    let mut table = SymbolTable::new();
    let mut msgs = Vec::new();
    let mut errors = 0;
    let mut addr: Addr = 0;

    for line in lines {
        log::trace!("pass 1 line {} addr {}: {}", line.idx(), addr, line.raw());
        match line.classify() {
            Ok(stmt) => {
                if let Some(label) = stmt.label {
                    let binding = Binding {
                        addr,
                        line: line.idx(),
                    };
                    if let Err(prev) = table.insert(label, binding) {
                        errors += 1;
                        let err = LineError::DuplicateLabel(label.to_string());
                        msgs.push(Msg::error(err, line));
                        if let Some(first) = lines.iter().find(|l| l.idx() == prev.line) {
                            msgs.push(Msg::note(
                                format!("`{}` first defined here, at address {}", label, prev.addr),
                                first,
                            ));
                        }
                    }
                }
                if stmt.occupies() {
                    addr += 1;
                }
            }
            Err(err) => {
                errors += 1;
                msgs.push(Msg::error(err, line));
            }
        }

        if errors > config.error_limit {
            log::debug!("pass 1 abandoned at line {} with {} errors", line.idx(), errors);
            return Err(Error::TooManyErrors(msgs));
        }
    }

    log::debug!(
        "pass 1 done: {} label(s), {} word(s), {} error(s)",
        table.len(),
        addr,
        errors
    );
    Ok(Pass1 { table, msgs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::read_lines;

    fn pass1(src: &str) -> Pass1 {
        build_table(&read_lines(src), &Config::default()).unwrap()
    }

    #[test]
    fn test_comments_do_not_advance() {
        let p = pass1("# header\n\na: DATA 1\n; note\nb: DATA 2\nc:\n");
        assert_eq!(p.error_count(), 0);
        assert_eq!(p.table.addr("a"), Some(0));
        assert_eq!(p.table.addr("b"), Some(1));
        assert_eq!(p.table.addr("c"), Some(2));
    }

    #[test]
    fn test_label_binds_before_own_word() {
        let p = pass1("ADD r1,r2,r3\nhere: JUMP here\nthere: # lone\nDATA\n");
        assert_eq!(p.table.get("here"), Some(&Binding { addr: 1, line: 1 }));
        assert_eq!(p.table.get("there"), Some(&Binding { addr: 2, line: 2 }));
    }

    #[test]
    fn test_duplicate_label() {
        let p = pass1("a: DATA 1\na: DATA 2\n");
        assert_eq!(p.error_count(), 1);
        assert_eq!(p.table.addr("a"), Some(0));
        assert_eq!(
            p.msgs[0].line_error(),
            Some(&LineError::DuplicateLabel("a".to_string()))
        );
        assert_eq!(p.msgs[0].idx, 1);
        // note points back at the first definition
        assert!(!p.msgs[1].is_error());
        assert_eq!(p.msgs[1].idx, 0);
    }

    #[test]
    fn test_duplicate_still_occupies() {
        let p = pass1("a: DATA 1\na: DATA 2\nb: DATA 3\n");
        assert_eq!(p.table.addr("b"), Some(2));
    }

    #[test]
    fn test_syntax_error_collected() {
        let p = pass1("DATA 1\nnonsense here\nb: DATA 2\n");
        assert_eq!(p.error_count(), 1);
        assert_eq!(p.msgs[0].line_error(), Some(&LineError::Syntax));
        assert_eq!(p.msgs[0].idx, 1);
        // the bad line takes no word
        assert_eq!(p.table.addr("b"), Some(1));
    }

    #[test]
    fn test_error_limit_reached_but_not_exceeded() {
        let src = "bad\n".repeat(5);
        let p = pass1(&src);
        assert_eq!(p.error_count(), 5);
    }

    #[test]
    fn test_error_limit_exceeded() {
        let src = format!("{}late: DATA 1\n", "bad\n".repeat(8));
        let err = build_table(&read_lines(&src), &Config::default()).unwrap_err();
        match err {
            Error::TooManyErrors(msgs) => {
                assert_eq!(msgs.len(), 6);
                assert_eq!(msgs.last().unwrap().idx, 5);
            }
            other => panic!("expected TooManyErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_limit() {
        let config = Config { error_limit: 0 };
        let err = build_table(&read_lines("DATA 1\nbad\nDATA 2\n"), &config).unwrap_err();
        assert_eq!(err.msgs().len(), 1);
    }
}
