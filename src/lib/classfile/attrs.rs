use super::cpool::Const;
use super::cpool::ConstantPool;
use crate::lib::bytecode::Instruction;
use crate::lib::types::ClassName;

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub stack: u16,
    pub locals: u16,
    pub instructions: Vec<Instruction>,
}
impl Code {
    /// Build a code attribute, sizing the locals to cover every slot the code touches.
    pub fn new(stack: u16, instructions: Vec<Instruction>) -> Self {
        let locals = instructions
            .iter()
            .filter_map(|ins| match ins {
                Instruction::Load { slot, ty } | Instruction::Store { slot, ty } => {
                    Some(*slot as u32 + if ty.is_wide() { 2 } else { 1 })
                }
                _ => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            stack,
            locals: locals.min(u16::MAX as u32) as u16,
            instructions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Code(Code),
    ConstantValue(Const),
    Deprecated,
    Exceptions(Vec<ClassName>),
    Signature(String),
    SourceFile(String),
    Synthetic,
}
impl Attribute {
    pub fn name(&self) -> &'static str {
        use Attribute::*;
        match self {
            Attribute::Code(_) => "Code",
            ConstantValue(_) => "ConstantValue",
            Deprecated => "Deprecated",
            Exceptions(_) => "Exceptions",
            Signature(_) => "Signature",
            SourceFile(_) => "SourceFile",
            Synthetic => "Synthetic",
        }
    }

    /// Add the attribute name and every constant the attribute refers to.
    pub fn add_to_pool(&self, pool: &mut ConstantPool) {
        pool.utf8(self.name());

        use Attribute::*;
        match self {
            Attribute::Code(code) => {
                for ins in &code.instructions {
                    if let Some(c) = Const::of_instruction(ins) {
                        pool.add(c);
                    }
                }
            }
            ConstantValue(c) => {
                pool.add(c.clone());
            }
            Exceptions(classes) => {
                for cls in classes {
                    pool.class(cls.internal());
                }
            }
            Signature(s) | SourceFile(s) => {
                pool.utf8(s);
            }
            Deprecated | Synthetic => {}
        }
    }
}
