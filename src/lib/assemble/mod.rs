mod member_ref;
mod mnemonic;
mod parse_bytecode;
mod parse_literal;
mod span;
mod tokenize;

use crate::lib::bytecode::Instruction;
pub use parse_bytecode::parse_bytecode;
pub use span::Error;
pub use span::SyntaxError;

#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblerOptions {
    /// Report every bad line instead of stopping at the first one.
    pub keep_going: bool,
}

/// Parse a listing with one instruction per line.
pub fn assemble(source: &str, opts: AssemblerOptions) -> Result<Vec<Instruction>, Error> {
    let mut instrs = Vec::new();
    let mut errors = Vec::new();

    for (line_no, line) in source.lines().enumerate() {
        match parse_bytecode(line) {
            Ok(Some(ins)) => instrs.push(ins),
            Ok(None) => {}
            Err(err) => {
                errors.push((line_no, err));
                if !opts.keep_going {
                    break;
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(instrs)
    } else {
        Err(Error(errors))
    }
}
