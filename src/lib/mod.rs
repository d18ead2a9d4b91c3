mod assemble;
mod bytecode;
mod classfile;
mod disassemble;
mod types;

pub use assemble::assemble;
pub use assemble::AssemblerOptions;
pub use assemble::Error as AssembleError;
pub use disassemble::DisassemblerOptions;

use bytecode::Instruction;

/// Render instructions in canonical form, one per line, with labels flush left.
pub fn format_listing(instrs: &[Instruction]) -> Vec<u8> {
    let mut out = String::with_capacity(instrs.len() * 24);
    for ins in instrs {
        if !matches!(ins, Instruction::Label(_)) {
            out.push_str("    ");
        }
        out.push_str(&ins.to_string());
        out.push('\n');
    }
    out.into_bytes()
}

/// Parse a listing and write it out as a class with a single static method.
/// Returns the internal class name alongside the text.
pub fn disassemble(
    source: &str,
    asm_opts: AssemblerOptions,
    opts: &DisassemblerOptions,
) -> Result<(String, Vec<u8>), AssembleError> {
    let instrs = assemble(source, asm_opts)?;
    let class = disassemble::build_class(instrs, opts);

    let mut out = Vec::with_capacity(1000 + source.len() * 2);
    disassemble::write_class(&mut out, &class).expect("Internal error - please report this!");
    Ok((opts.class_name.clone(), out))
}
