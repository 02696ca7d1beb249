use color_print::cformat;

use crate::{line::SourceLine, Assembly};

/// One listing row: address, line number, resolved text.
pub fn format_row(line: &SourceLine, asm: &Assembly) -> String {
    let idx = line.idx();
    let addr = match asm.addrs.get(idx).copied().flatten() {
        Some(addr) => cformat!("<green>{:0>4X}</>", addr),
        None => " ".repeat(4),
    };
    let text = asm.lines.get(idx).map(String::as_str).unwrap_or("");
    let text = if text == line.raw() {
        text.to_string()
    } else {
        cformat!("<yellow>{}</>", text)
    };
    format!("| {} | {:>4} | {}", addr, line.no(), text)
}

/// Print the resolved program and its symbol table to stderr.
pub fn print_dump(path: &str, lines: &[SourceLine], asm: &Assembly) {
    let rule = "+------+------+----------------------------------------------";
    eprintln!("{}", rule);
    eprintln!("| {:<58}", path);
    eprintln!("{}", rule);
    for line in lines {
        eprintln!("{}", format_row(line, asm));
    }
    eprintln!("{}", rule);
    for (name, binding) in asm.table.iter() {
        eprintln!(
            "{}",
            cformat!(
                "| <green>{:0>4X}</> | {:>4} | <cyan>{}</>",
                binding.addr,
                binding.line + 1,
                name
            )
        );
    }
    eprintln!("{}", rule);
}
