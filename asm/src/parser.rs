use arch::{op::SymOp, reg::Reg};
use std::fmt;

use crate::{cursor::Cursor, error::LineError};

// ----------------------------------------------------------------------------
// Statement

/// Syntactic form of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Comment,
    Full,
    Data,
    Symbolic,
}

/// A classified line. Every form may carry a label and a trailing comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt<'a> {
    pub label: Option<&'a str>,
    pub form: Form<'a>,
    pub comment: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form<'a> {
    Comment,
    Full(Full<'a>),
    Data(Data<'a>),
    Symbolic(Symbolic<'a>),
}

/// Numeric token as written. `value` is `None` when the digits do not fit
/// in `T`; the line still matches and is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lit<'a, T> {
    pub text: &'a str,
    pub value: Option<T>,
}

impl<T> fmt::Display for Lit<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// `opcode[/predicate] rT,rS1,rS2[offset]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Full<'a> {
    pub opcode: &'a str,
    pub predicate: Option<&'a str>,
    pub target: Lit<'a, Reg>,
    pub src1: Lit<'a, Reg>,
    pub src2: Lit<'a, Reg>,
    pub offset: Option<Lit<'a, i64>>,
}

/// `DATA [value]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data<'a> {
    pub value: Option<Lit<'a, u64>>,
}

/// `(STORE|LOAD|JUMP)[/predicate] [rT,] symbol`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbolic<'a> {
    pub op: SymOp,
    pub predicate: Option<&'a str>,
    pub target: Option<Lit<'a, Reg>>,
    pub symbol: &'a str,
}

impl Form<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Form::Comment => Kind::Comment,
            Form::Full(_) => Kind::Full,
            Form::Data(_) => Kind::Data,
            Form::Symbolic(_) => Kind::Symbolic,
        }
    }

    /// Whether the line takes up a word of memory.
    pub fn occupies(&self) -> bool {
        !matches!(self, Form::Comment)
    }
}

impl Stmt<'_> {
    pub fn kind(&self) -> Kind {
        self.form.kind()
    }

    pub fn occupies(&self) -> bool {
        self.form.occupies()
    }
}

/// Classify one line. The forms are tried in a fixed order and the first one
/// that matches the whole line wins; Full and Data come before Symbolic
/// because a malformed register list can still read as a symbolic operand.
pub fn classify(line: &str) -> Result<Stmt<'_>, LineError> {
    let cur = Cursor::new(line);
    full(cur)
        .or_else(|| data(cur))
        .or_else(|| symbolic(cur))
        .or_else(|| comment(cur))
        .ok_or(LineError::Syntax)
}

// ----------------------------------------------------------------------------
// Forms

fn full(mut cur: Cursor<'_>) -> Option<Stmt<'_>> {
    let label = label(&mut cur);
    cur.skip_ws();
    let opcode = cur.take_while(|c| c.is_ascii_alphabetic());
    if opcode.is_empty() {
        return None;
    }
    let predicate = predicate(&mut cur)?;
    if !cur.skip_ws() {
        return None;
    }
    let target = reg(&mut cur)?;
    comma(&mut cur)?;
    let src1 = reg(&mut cur)?;
    comma(&mut cur)?;
    let src2 = reg(&mut cur)?;
    let offset = offset(&mut cur)?;
    let comment = tail(&mut cur)?;
    Some(Stmt {
        label,
        form: Form::Full(Full {
            opcode,
            predicate,
            target,
            src1,
            src2,
            offset,
        }),
        comment,
    })
}

fn data(mut cur: Cursor<'_>) -> Option<Stmt<'_>> {
    let label = label(&mut cur);
    cur.skip_ws();
    if !cur.eat_str("DATA") {
        return None;
    }
    cur.skip_ws();
    let value = value(&mut cur)?;
    let comment = tail(&mut cur)?;
    Some(Stmt {
        label,
        form: Form::Data(Data { value }),
        comment,
    })
}

fn symbolic(mut cur: Cursor<'_>) -> Option<Stmt<'_>> {
    let label = label(&mut cur);
    cur.skip_ws();
    let op = SymOp::parse(cur.take_while(|c| c.is_ascii_alphabetic())).ok()?;
    let predicate = predicate(&mut cur)?;
    if !cur.skip_ws() {
        return None;
    }
    let target = target(&mut cur);
    let symbol = ident(&mut cur)?;
    if Reg::is_name(symbol) {
        return None;
    }
    let comment = tail(&mut cur)?;
    Some(Stmt {
        label,
        form: Form::Symbolic(Symbolic {
            op,
            predicate,
            target,
            symbol,
        }),
        comment,
    })
}

fn comment(mut cur: Cursor<'_>) -> Option<Stmt<'_>> {
    let label = label(&mut cur);
    let comment = tail(&mut cur)?;
    Some(Stmt {
        label,
        form: Form::Comment,
        comment,
    })
}

// ----------------------------------------------------------------------------
// Pieces

/// `name:` at the very start of the line.
fn label<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let mut c = *cur;
    let name = ident(&mut c)?;
    if !c.eat(':') {
        return None;
    }
    *cur = c;
    Some(name)
}

fn ident<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    if !cur.peek()?.is_ascii_alphabetic() {
        return None;
    }
    Some(cur.take_while(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Outer `None` is a mismatch; inner `None` means no predicate was written.
fn predicate<'a>(cur: &mut Cursor<'a>) -> Option<Option<&'a str>> {
    if !cur.eat('/') {
        return Some(None);
    }
    match cur.take_while(|c| c.is_ascii_alphabetic()) {
        "" => None,
        pred => Some(Some(pred)),
    }
}

fn reg<'a>(cur: &mut Cursor<'a>) -> Option<Lit<'a, Reg>> {
    let mut c = *cur;
    let start = c.pos();
    if !c.eat('r') || c.take_while(|ch| ch.is_ascii_digit()).is_empty() {
        return None;
    }
    let text = c.since(start);
    *cur = c;
    Some(Lit {
        text,
        value: Reg::parse(text).ok(),
    })
}

fn comma(cur: &mut Cursor<'_>) -> Option<()> {
    if !cur.eat(',') {
        return None;
    }
    cur.skip_ws();
    Some(())
}

/// Optional leading `rT,` of a symbolic operand.
fn target<'a>(cur: &mut Cursor<'a>) -> Option<Lit<'a, Reg>> {
    let mut c = *cur;
    let reg = reg(&mut c)?;
    comma(&mut c)?;
    *cur = c;
    Some(reg)
}

fn offset<'a>(cur: &mut Cursor<'a>) -> Option<Option<Lit<'a, i64>>> {
    if !cur.eat('[') {
        return Some(None);
    }
    let start = cur.pos();
    cur.eat('-');
    if cur.take_while(|c| c.is_ascii_digit()).is_empty() {
        return None;
    }
    let text = cur.since(start);
    if !cur.eat(']') {
        return None;
    }
    Some(Some(Lit {
        text,
        value: text.parse::<i64>().ok(),
    }))
}

/// `0x` hex or decimal.
fn value<'a>(cur: &mut Cursor<'a>) -> Option<Option<Lit<'a, u64>>> {
    let start = cur.pos();
    let value = if cur.eat_str("0x") {
        let digits = cur.take_while(|c| c.is_ascii_hexdigit());
        if digits.is_empty() {
            return None;
        }
        u64::from_str_radix(digits, 16).ok()
    } else {
        match cur.take_while(|c| c.is_ascii_digit()) {
            "" => return Some(None),
            digits => digits.parse::<u64>().ok(),
        }
    };
    Some(Some(Lit {
        text: cur.since(start),
        value,
    }))
}

/// Optional `#` or `;` comment, then end of line.
fn tail<'a>(cur: &mut Cursor<'a>) -> Option<Option<&'a str>> {
    cur.skip_ws();
    let comment = match cur.peek() {
        Some('#') | Some(';') => Some(cur.take_rest()),
        _ => None,
    };
    cur.is_end().then_some(comment)
}
