use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use std::io;

use super::string::escape;
use crate::lib::classfile::cpool::Const;
use crate::lib::classfile::cpool::ConstantPool;

struct LazyPrint<F>(F);
impl<F: Fn(&mut fmt::Formatter) -> fmt::Result> Display for LazyPrint<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (self.0)(f)
    }
}

pub(super) enum RefOrString<'a> {
    Ref(usize),
    Str(Cow<'a, str>),
}
impl Display for RefOrString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RefOrString::Ref(ind) => write!(f, "#{}", ind),
            RefOrString::Str(s) => f.write_str(s),
        }
    }
}

fn float_text(bits: u32) -> String {
    let f = f32::from_bits(bits);
    if f.is_nan() {
        "+NaNf".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "+Infinityf" } else { "-Infinityf" }.to_string()
    } else {
        format!("{:e}f", f)
    }
}

fn double_text(bits: u64) -> String {
    let f = f64::from_bits(bits);
    if f.is_nan() {
        "+NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "+Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{:e}", f)
    }
}

/// Resolves constants to the `#n` numbers shown in the pool listing. The
/// numbering is computed once, so the listing and every attribute agree.
pub(super) struct RefPrinter<'a> {
    lines: Vec<(usize, &'a Const)>,
    index: HashMap<&'a Const, usize>,
}
impl<'a> RefPrinter<'a> {
    pub(super) fn new(pool: &'a ConstantPool) -> Self {
        let lines: Vec<_> = pool
            .entries()
            .iter()
            .filter(|c| **c != Const::Null)
            .enumerate()
            .map(|(i, c)| (i + 1, c))
            .collect();

        let mut index = HashMap::with_capacity(lines.len());
        for (ind, c) in lines.iter().copied() {
            index.entry(c).or_insert(ind);
        }
        Self { lines, index }
    }

    fn lookup(&self, c: &Const) -> Option<usize> {
        self.index.get(c).copied()
    }

    pub(super) fn utf<'s>(&self, s: &'s str) -> RefOrString<'s> {
        match self.lookup(&Const::Utf8(s.to_owned())) {
            Some(ind) => RefOrString::Ref(ind),
            None => RefOrString::Str(escape(s)),
        }
    }

    pub(super) fn cls<'s>(&self, name: &'s str) -> RefOrString<'s> {
        match self.lookup(&Const::Class(name.to_owned())) {
            Some(ind) => RefOrString::Ref(ind),
            None => RefOrString::Str(escape(name)),
        }
    }

    fn nat<'s>(&'s self, name: &'s str, desc: &'s str) -> impl Display + 's {
        LazyPrint(move |f: &mut fmt::Formatter| {
            match self.lookup(&Const::NameAndType(name.to_owned(), desc.to_owned())) {
                Some(ind) => RefOrString::Ref(ind).fmt(f),
                None => write!(f, "{} {}", self.utf(name), self.utf(desc)),
            }
        })
    }

    /// The entry text of `c`, with the entries it depends on shown as references.
    pub(super) fn entry<'s>(&'s self, c: &'s Const) -> impl Display + 's {
        LazyPrint(move |f: &mut fmt::Formatter| {
            use Const::*;
            match c {
                Null => f.write_str("Null"),
                Utf8(s) => write!(f, "Utf8 {}", escape(s)),
                Int(v) => write!(f, "Int {}", v),
                Float(v) => write!(f, "Float {}", float_text(*v)),
                Long(v) => write!(f, "Long {}L", v),
                Double(v) => write!(f, "Double {}", double_text(*v)),
                Class(name) => write!(f, "Class {}", self.utf(name)),
                Str(s) => write!(f, "String {}", self.utf(s)),
                NameAndType(name, desc) => write!(f, "NameAndType {} {}", self.utf(name), self.utf(desc)),
                Field(cls, name, desc) => write!(f, "Field {} {}", self.cls(cls), self.nat(name, desc)),
                Method(cls, name, desc) => write!(f, "Method {} {}", self.cls(cls), self.nat(name, desc)),
                InterfaceMethod(cls, name, desc) => {
                    write!(f, "InterfaceMethod {} {}", self.cls(cls), self.nat(name, desc))
                }
            }
        })
    }

    /// `#n` if `c` is in the pool, otherwise its entry text inline.
    pub(super) fn cpref<'s>(&'s self, c: &'s Const) -> impl Display + 's {
        LazyPrint(move |f: &mut fmt::Formatter| match self.lookup(c) {
            Some(ind) => RefOrString::Ref(ind).fmt(f),
            None => self.entry(c).fmt(f),
        })
    }

    pub(super) fn print_const_defs(&self, mut w: impl io::Write) -> io::Result<()> {
        for (ind, c) in self.lines.iter().copied() {
            writeln!(w, "#{}\t{}", ind, self.entry(c))?;
        }
        Ok(())
    }
}
