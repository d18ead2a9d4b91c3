use std::fmt;
use std::fmt::Display;

use crate::lib::assemble::SyntaxError;

/// A class referenced by its internal (slash separated) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);
impl ClassName {
    pub fn new(internal: impl Into<String>) -> Self {
        Self(internal.into())
    }

    pub fn java_lang_object() -> Self {
        Self::new("java/lang/Object")
    }

    pub fn internal(&self) -> &str {
        &self.0
    }
}
impl Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, part) in self.0.split('/').enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    pub name: String,
    pub bounds: Vec<ValueType>,
}
impl TypeVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}
/// Prints the variable together with its bounds, e.g. `T extends java.lang.Number`.
impl Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, b) in self.bounds.iter().enumerate() {
            f.write_str(if i == 0 { " extends " } else { " & " })?;
            b.fmt(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub type_params: Vec<TypeVariable>,
    pub params: Vec<ValueType>,
    pub ret: Box<ValueType>,
}
impl FunctionSignature {
    pub fn new(params: Vec<ValueType>, ret: ValueType) -> Self {
        Self {
            type_params: Vec::new(),
            params,
            ret: Box::new(ret),
        }
    }

    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        if !self.type_params.is_empty() {
            out.push('<');
            for tv in &self.type_params {
                out.push_str(&tv.name);
                out.push(':');
                for (i, b) in tv.bounds.iter().enumerate() {
                    if i > 0 {
                        out.push(':');
                    }
                    b.write_descriptor(out);
                }
            }
            out.push('>');
        }
        out.push('(');
        for p in &self.params {
            p.write_descriptor(out);
        }
        out.push(')');
        self.ret.write_descriptor(out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    Short,
    Byte,
    Void,
    Array(Box<ValueType>),
    Class(ClassName),
    Function(FunctionSignature),
    Variable(TypeVariable),
}
impl ValueType {
    /// The canonical object reference type.
    pub fn object() -> Self {
        ValueType::Class(ClassName::java_lang_object())
    }

    pub fn array(elem: ValueType) -> Self {
        ValueType::Array(Box::new(elem))
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, ValueType::Long | ValueType::Double)
    }

    /// Opcode prefix for the array element instructions (`baload`, `castore`, ...).
    pub fn array_prefix(&self) -> char {
        use ValueType::*;
        match self {
            Int => 'i',
            Long => 'l',
            Float => 'f',
            Double => 'd',
            Bool | Byte => 'b',
            Char => 'c',
            Short => 's',
            Void | Array(_) | Class(_) | Function(_) | Variable(_) => 'a',
        }
    }

    /// Opcode prefix for local variable and return instructions. Sub-int values
    /// live in int slots, so they share the `i` forms.
    pub fn local_prefix(&self) -> char {
        use ValueType::*;
        match self {
            Bool | Byte | Char | Short => 'i',
            _ => self.array_prefix(),
        }
    }

    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        use ValueType::*;
        match self {
            Int => out.push('I'),
            Long => out.push('J'),
            Float => out.push('F'),
            Double => out.push('D'),
            Bool => out.push('Z'),
            Char => out.push('C'),
            Short => out.push('S'),
            Byte => out.push('B'),
            Void => out.push('V'),
            Array(elem) => {
                out.push('[');
                elem.write_descriptor(out);
            }
            Class(name) => {
                out.push('L');
                out.push_str(name.internal());
                out.push(';');
            }
            Function(sig) => sig.write_descriptor(out),
            Variable(tv) => {
                out.push('T');
                out.push_str(&tv.name);
                out.push(';');
            }
        }
    }
}
/// Java source style rendering. Type variables print without their bounds.
impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ValueType::*;
        match self {
            Int => f.write_str("int"),
            Long => f.write_str("long"),
            Float => f.write_str("float"),
            Double => f.write_str("double"),
            Bool => f.write_str("boolean"),
            Char => f.write_str("char"),
            Short => f.write_str("short"),
            Byte => f.write_str("byte"),
            Void => f.write_str("void"),
            Array(elem) => write!(f, "{}[]", elem),
            Class(name) => name.fmt(f),
            Function(sig) => {
                f.write_str("(")?;
                for (i, p) in sig.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    p.fmt(f)?;
                }
                write!(f, "){}", sig.ret)
            }
            Variable(tv) => f.write_str(&tv.name),
        }
    }
}

/// Map the one letter type prefix of an opcode mnemonic to its type.
pub fn parse_type(c: char) -> Result<ValueType, SyntaxError> {
    Ok(match c {
        'l' => ValueType::Long,
        'i' => ValueType::Int,
        'f' => ValueType::Float,
        'd' => ValueType::Double,
        'b' => ValueType::Bool,
        'c' => ValueType::Char,
        's' => ValueType::Short,
        'a' => ValueType::object(),
        _ => return SyntaxError::s(format!("invalid bytecode type: {}", c)),
    })
}

struct DescriptorParser<'a> {
    source: &'a str,
    rest: &'a str,
}
impl<'a> DescriptorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, rest: source }
    }

    fn err<T>(&self, msg: &str) -> Result<T, SyntaxError> {
        let pos = self.source.len() - self.rest.len();
        SyntaxError::s(format!("invalid descriptor {:?} at offset {}: {}", self.source, pos, msg))
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn expect(&mut self, c: char) -> Result<(), SyntaxError> {
        if self.next() == Some(c) {
            Ok(())
        } else {
            self.err(&format!("expected '{}'", c))
        }
    }

    fn finish(&self) -> Result<(), SyntaxError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            self.err("unexpected trailing characters")
        }
    }

    /// Read up to (and consume) the terminating `;` of a class name or type variable.
    fn name(&mut self) -> Result<&'a str, SyntaxError> {
        let end = match self.rest.find(|c| matches!(c, ';' | '<' | '.' | '[' | ':' | '(' | ')')) {
            Some(end) => end,
            None => return self.err("unterminated name"),
        };
        let (name, rest) = self.rest.split_at(end);
        if name.is_empty() {
            return self.err("empty name");
        }
        self.rest = rest;
        match self.next() {
            Some(';') => Ok(name),
            Some('<') => self.err("generic type arguments are not supported"),
            _ => self.err("invalid character in name"),
        }
    }

    fn field_type(&mut self) -> Result<ValueType, SyntaxError> {
        use ValueType::*;
        Ok(match self.next() {
            Some('B') => Byte,
            Some('C') => Char,
            Some('D') => Double,
            Some('F') => Float,
            Some('I') => Int,
            Some('J') => Long,
            Some('S') => Short,
            Some('Z') => Bool,
            Some('[') => ValueType::array(self.field_type()?),
            Some('L') => Class(ClassName::new(self.name()?)),
            Some('T') => Variable(TypeVariable::new(self.name()?)),
            Some(_) => return self.err("invalid type character"),
            None => return self.err("unexpected end of descriptor"),
        })
    }

    fn return_type(&mut self) -> Result<ValueType, SyntaxError> {
        if self.peek() == Some('V') {
            self.next();
            Ok(ValueType::Void)
        } else {
            self.field_type()
        }
    }

    fn type_params(&mut self) -> Result<Vec<TypeVariable>, SyntaxError> {
        let mut vars = Vec::new();
        self.expect('<')?;
        while self.peek() != Some('>') {
            let end = match self.rest.find(':') {
                Some(end) if end > 0 => end,
                _ => return self.err("expected type parameter name"),
            };
            let mut tv = TypeVariable::new(&self.rest[..end]);
            self.rest = &self.rest[end + 1..];
            if matches!(self.peek(), Some('L' | 'T' | '[')) {
                tv.bounds.push(self.field_type()?);
            }
            while self.peek() == Some(':') {
                self.next();
                tv.bounds.push(self.field_type()?);
            }
            vars.push(tv);
        }
        self.expect('>')?;
        if vars.is_empty() {
            return self.err("empty type parameter list");
        }
        Ok(vars)
    }

    fn method(&mut self) -> Result<FunctionSignature, SyntaxError> {
        let type_params = if self.peek() == Some('<') { self.type_params()? } else { Vec::new() };
        self.expect('(')?;
        let mut params = Vec::new();
        while self.peek() != Some(')') {
            params.push(self.field_type()?);
        }
        self.expect(')')?;
        let ret = self.return_type()?;
        Ok(FunctionSignature {
            type_params,
            params,
            ret: Box::new(ret),
        })
    }
}

/// Parse a single field descriptor such as `I`, `[J` or `Ljava/lang/String;`.
pub fn parse_descriptor(s: &str) -> Result<ValueType, SyntaxError> {
    let mut p = DescriptorParser::new(s);
    let t = p.field_type()?;
    p.finish()?;
    Ok(t)
}

pub fn parse_class_descriptor(s: &str) -> Result<ClassName, SyntaxError> {
    let mut p = DescriptorParser::new(s);
    p.expect('L')?;
    let name = p.name()?;
    p.finish()?;
    Ok(ClassName::new(name))
}

/// Parse a method descriptor, optionally preceded by a `<T:bound;>` type parameter list.
pub fn parse_method_descriptor(s: &str) -> Result<FunctionSignature, SyntaxError> {
    let mut p = DescriptorParser::new(s);
    let sig = p.method()?;
    p.finish()?;
    Ok(sig)
}
