use std::fmt;
use std::fmt::Display;

use crate::lib::types::ClassName;
use crate::lib::types::FunctionSignature;
use crate::lib::types::ValueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvokeMode {
    Virtual,
    Interface,
    Special,
    Static,
}
impl InvokeMode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            InvokeMode::Virtual => "invokevirtual",
            InvokeMode::Interface => "invokeinterface",
            InvokeMode::Special => "invokespecial",
            InvokeMode::Static => "invokestatic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMode {
    Static,
    Instance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Load {
        slot: u16,
        ty: ValueType,
    },
    Store {
        slot: u16,
        ty: ValueType,
    },
    /// Holds the array type, not the element type.
    ArrayLoad(ValueType),
    ArrayStore(ValueType),
    Invoke {
        owner: ClassName,
        name: String,
        sig: FunctionSignature,
        mode: InvokeMode,
    },
    Return(Option<ValueType>),
    GetField {
        owner: ClassName,
        name: String,
        ty: ValueType,
        mode: FieldMode,
    },
    PutField {
        owner: ClassName,
        name: String,
        ty: ValueType,
        mode: FieldMode,
    },
    LoadConst(Constant),
    Goto(String),
    Label(String),
}

fn local(f: &mut fmt::Formatter, ty: &ValueType, op: &str, slot: u16) -> fmt::Result {
    if slot <= 3 {
        write!(f, "{}{}_{}", ty.local_prefix(), op, slot)
    } else {
        write!(f, "{}{} {}", ty.local_prefix(), op, slot)
    }
}

fn array_elem(ty: &ValueType) -> char {
    match ty {
        ValueType::Array(elem) => elem.array_prefix(),
        other => other.array_prefix(),
    }
}

/// Decimal text that always contains a `.`, so `ldc` reads it back as a float.
fn float_text(v: f32) -> String {
    let s = format!("{:?}", v);
    if s.contains('.') {
        s
    } else if s.contains('e') {
        s.replacen('e', ".0e", 1)
    } else {
        // inf and NaN have no ldc spelling, and the parser never produces them
        s
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constant::Int(-1) => f.write_str("iconst_m1"),
            Constant::Int(v @ 0..=5) => write!(f, "iconst_{}", v),
            Constant::Int(v) => {
                if i8::try_from(*v).is_ok() {
                    write!(f, "bipush {}", v)
                } else {
                    write!(f, "sipush {}", v)
                }
            }
            Constant::Long(v @ 0..=1) => write!(f, "lconst_{}", v),
            Constant::Long(v) => write!(f, "ldc {}", v),
            Constant::Float(v) => write!(f, "ldc {}", float_text(*v)),
            Constant::Str(s) => write!(f, "ldc \"{}\"", s),
        }
    }
}

/// Renders the canonical assembly text for the instruction, which the line
/// parser reads back to an equal value.
impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match self {
            Load { slot, ty } => local(f, ty, "load", *slot),
            Store { slot, ty } => local(f, ty, "store", *slot),
            ArrayLoad(ty) => write!(f, "{}aload", array_elem(ty)),
            ArrayStore(ty) => write!(f, "{}astore", array_elem(ty)),
            Invoke { owner, name, sig, mode } => {
                write!(f, "{} {}.{}:{}", mode.mnemonic(), owner.internal(), name, sig.descriptor())
            }
            Return(None) => f.write_str("return"),
            Return(Some(ty)) => write!(f, "{}return", ty.local_prefix()),
            GetField { owner, name, ty, mode } => {
                let op = match mode {
                    FieldMode::Static => "getstatic",
                    FieldMode::Instance => "getfield",
                };
                write!(f, "{} {}.{}:{}", op, owner.internal(), name, ty.descriptor())
            }
            PutField { owner, name, ty, mode } => {
                let op = match mode {
                    FieldMode::Static => "putstatic",
                    FieldMode::Instance => "putfield",
                };
                write!(f, "{} {}.{}:{}", op, owner.internal(), name, ty.descriptor())
            }
            LoadConst(c) => c.fmt(f),
            Goto(target) => write!(f, "goto {}", target),
            Label(name) => write!(f, "{}:", name),
        }
    }
}
