use std::collections::HashMap;

use crate::lib::bytecode::Constant;
use crate::lib::bytecode::Instruction;
use crate::lib::bytecode::InvokeMode;

/// A constant pool entry. References to other entries are held by value and
/// resolved to pool indexes when the pool is printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Const {
    Null, // 0 unused
    Utf8(String),
    Int(i32),
    Float(u32),
    Long(i64),
    Double(u64),
    Class(String),
    Str(String),
    NameAndType(String, String),
    Field(String, String, String),
    Method(String, String, String),
    InterfaceMethod(String, String, String),
}
impl Const {
    pub fn float(v: f32) -> Self {
        Const::Float(v.to_bits())
    }

    pub fn double(v: f64) -> Self {
        Const::Double(v.to_bits())
    }

    /// The pool constant an instruction loads through `ldc` or refers to as a member.
    pub fn of_instruction(ins: &Instruction) -> Option<Self> {
        use Instruction::*;
        Some(match ins {
            Invoke { owner, name, sig, mode } => {
                let (owner, name, desc) = (owner.internal().to_owned(), name.clone(), sig.descriptor());
                if *mode == InvokeMode::Interface {
                    Const::InterfaceMethod(owner, name, desc)
                } else {
                    Const::Method(owner, name, desc)
                }
            }
            GetField { owner, name, ty, .. } | PutField { owner, name, ty, .. } => {
                Const::Field(owner.internal().to_owned(), name.clone(), ty.descriptor())
            }
            LoadConst(Constant::Str(s)) => Const::Str(s.clone()),
            LoadConst(Constant::Float(v)) => Const::float(*v),
            LoadConst(Constant::Long(v)) if !(0..=1).contains(v) => Const::Long(*v),
            _ => return None,
        })
    }
}

#[derive(Debug)]
pub struct ConstantPool {
    entries: Vec<Const>,
    lookup: HashMap<Const, usize>,
}
impl ConstantPool {
    pub fn new() -> Self {
        Self {
            entries: vec![Const::Null],
            lookup: HashMap::new(),
        }
    }

    /// Insert `c` (and the entries it refers to, first) unless already present.
    /// Returns the position of `c`.
    pub fn add(&mut self, c: Const) -> usize {
        if let Some(ind) = self.lookup.get(&c) {
            return *ind;
        }

        use Const::*;
        match &c {
            Null => return 0,
            Class(name) | Str(name) => {
                self.add(Utf8(name.clone()));
            }
            NameAndType(name, desc) => {
                self.add(Utf8(name.clone()));
                self.add(Utf8(desc.clone()));
            }
            Field(cls, name, desc) | Method(cls, name, desc) | InterfaceMethod(cls, name, desc) => {
                self.add(Class(cls.clone()));
                self.add(NameAndType(name.clone(), desc.clone()));
            }
            Utf8(_) | Int(_) | Float(_) | Long(_) | Double(_) => {}
        }

        let ind = self.entries.len();
        self.entries.push(c.clone());
        self.lookup.insert(c, ind);
        ind
    }

    pub fn utf8(&mut self, s: &str) -> usize {
        self.add(Const::Utf8(s.to_owned()))
    }

    pub fn class(&mut self, name: &str) -> usize {
        self.add(Const::Class(name.to_owned()))
    }

    /// All entries in insertion order, including the reserved null entry at position 0.
    pub fn entries(&self) -> &[Const] {
        &self.entries
    }

    /// Number of real (non-null) entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|c| **c != Const::Null).count()
    }
}
impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}
