use std::io::Result;
use std::io::Write;

use super::refprinter::RefPrinter;
use crate::lib::bytecode::Instruction;
use crate::lib::classfile::attrs::Attribute;
use crate::lib::classfile::attrs::Code;
use crate::lib::classfile::flags::Flags;
use crate::lib::classfile::ClassFile;
use crate::lib::classfile::Field;
use crate::lib::classfile::Method;

static INDENT_BUF: &str = "                                        ";

struct Writer<'a, W: Write> {
    w: W,
    rp: &'a RefPrinter<'a>,
    indentlevel: usize,
    sol: &'static str,
}
impl<'a, W: Write> Writer<'a, W> {
    fn new(w: W, rp: &'a RefPrinter<'a>) -> Self {
        Self {
            w,
            rp,
            indentlevel: 0,
            sol: "",
        }
    }

    fn indent(level: usize) -> &'static str {
        &INDENT_BUF[0..std::cmp::min(level * 2, INDENT_BUF.len())]
    }

    fn enter_block(&mut self) {
        self.indentlevel += 1;
        self.sol = Self::indent(self.indentlevel);
    }

    fn exit_block(&mut self) {
        debug_assert!(self.indentlevel > 0);
        self.indentlevel = self.indentlevel.saturating_sub(1);
        self.sol = Self::indent(self.indentlevel);
    }

    fn field(&mut self, f: &Field) -> Result<()> {
        writeln!(self.w, "{}{}{} {};", self.sol, Flags(&f.modifiers), f.ty, f.name)?;
        for a in &f.attrs {
            self.attr(a)?;
        }
        Ok(())
    }

    fn method(&mut self, m: &Method) -> Result<()> {
        write!(self.w, "{}{}", self.sol, Flags(&m.modifiers))?;
        if !m.sig.type_params.is_empty() {
            self.w.write_all(b"<")?;
            for (i, tv) in m.sig.type_params.iter().enumerate() {
                if i > 0 {
                    self.w.write_all(b", ")?;
                }
                write!(self.w, "{}", tv)?;
            }
            self.w.write_all(b"> ")?;
        }
        write!(self.w, "{} {}(", m.sig.ret, m.name)?;
        for (i, p) in m.sig.params.iter().enumerate() {
            if i > 0 {
                self.w.write_all(b", ")?;
            }
            write!(self.w, "{}", p)?;
        }
        writeln!(self.w, ");")?;

        for a in &m.attrs {
            self.attr(a)?;
        }
        Ok(())
    }

    fn attr(&mut self, a: &Attribute) -> Result<()> {
        let rp = self.rp;
        write!(self.w, "{}", self.sol)?;

        use Attribute::*;
        match a {
            Attribute::Code(code) => self.code(code)?,
            ConstantValue(c) => write!(self.w, ".constantvalue {}", rp.cpref(c))?,
            Deprecated => write!(self.w, ".deprecated")?,
            Exceptions(classes) => {
                write!(self.w, ".exceptions")?;
                for cls in classes {
                    write!(self.w, " {}", rp.cls(cls.internal()))?;
                }
            }
            Signature(s) => write!(self.w, ".signature {}", rp.utf(s))?,
            SourceFile(s) => write!(self.w, ".sourcefile {}", rp.utf(s))?,
            Synthetic => write!(self.w, ".synthetic")?,
        }
        writeln!(self.w)
    }

    fn code(&mut self, code: &Code) -> Result<()> {
        writeln!(self.w, ".code stack {} locals {}", code.stack, code.locals)?;
        let label_sol = self.sol;
        self.enter_block();
        for ins in &code.instructions {
            let sol = if let Instruction::Label(_) = ins { label_sol } else { self.sol };
            writeln!(self.w, "{}{}", sol, ins)?;
        }
        self.exit_block();
        write!(self.w, "{}.end code", self.sol)
    }
}

/// Write the text form of `c`: the numbered constant pool, then the class
/// header and its members.
pub fn write_class(mut w: impl Write, c: &ClassFile) -> Result<()> {
    let rp = RefPrinter::new(&c.pool);
    rp.print_const_defs(&mut w)?;
    writeln!(w)?;

    write!(w, "{}class {} ", Flags(&c.modifiers), c.name)?;
    if let Some(sup) = &c.superclass {
        write!(w, " extends {}", sup)?;
    }
    if !c.interfaces.is_empty() {
        w.write_all(b" implements ")?;
        for (i, cls) in c.interfaces.iter().enumerate() {
            if i > 0 {
                w.write_all(b", ")?;
            }
            write!(w, "{}", cls)?;
        }
    }
    writeln!(w)?;

    let mut d = Writer::new(w, &rp);
    for a in &c.attrs {
        d.attr(a)?;
    }
    writeln!(d.w, " {{")?;

    d.enter_block();
    for f in &c.fields {
        d.field(f)?;
    }
    if !c.fields.is_empty() {
        writeln!(d.w)?;
    }
    for m in &c.methods {
        d.method(m)?;
        writeln!(d.w)?;
    }
    d.exit_block();

    writeln!(d.w, "}}")?;
    d.w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::assemble::assemble;
    use crate::lib::assemble::parse_bytecode;
    use crate::lib::assemble::AssemblerOptions;
    use crate::lib::classfile::cpool::Const;
    use crate::lib::classfile::flags::Modifier;
    use crate::lib::types::parse_method_descriptor;
    use crate::lib::types::ClassName;
    use crate::lib::types::FunctionSignature;
    use crate::lib::types::ValueType;

    fn render(c: &ClassFile) -> String {
        let mut out = Vec::new();
        write_class(&mut out, c).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pool_listing() {
        let mut c = ClassFile::new(ClassName::new("A"));
        c.pool.add(Const::Int(42));
        c.pool.add(Const::double(1.5));
        c.pool.utf8("a b");

        let out = render(&c);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[..4], ["#1\tInt 42", "#2\tDouble 1.5e0", "#3\tUtf8 \"a b\"", ""]);
        assert_eq!(out.lines().filter(|l| l.starts_with('#')).count(), c.pool.len());
    }

    #[test]
    fn test_empty_class() {
        let c = ClassFile::new(ClassName::new("pkg/Empty"));
        assert_eq!(render(&c), "\nclass pkg.Empty \n {\n}\n");
    }

    #[test]
    fn test_header() {
        let mut c = ClassFile::new(ClassName::new("pkg/Foo"));
        c.modifiers = vec![Modifier::Public, Modifier::Final];
        c.superclass = Some(ClassName::java_lang_object());
        c.interfaces = vec![ClassName::new("java/lang/Runnable"), ClassName::new("java/io/Serializable")];
        c.attrs.push(Attribute::Deprecated);

        let out = render(&c);
        assert_eq!(
            out,
            "\npublic final class pkg.Foo  extends java.lang.Object implements java.lang.Runnable, java.io.Serializable\n\
             .deprecated\n {\n}\n"
        );
    }

    #[test]
    fn test_members() {
        let mut c = ClassFile::new(ClassName::new("P"));
        c.fields.push(Field {
            modifiers: vec![Modifier::Private, Modifier::Static],
            ty: ValueType::array(ValueType::Long),
            name: "xs".to_owned(),
            attrs: vec![Attribute::ConstantValue(Const::Int(3)), Attribute::Synthetic],
        });
        c.methods.push(Method {
            modifiers: vec![Modifier::Public],
            sig: parse_method_descriptor("<T:Ljava/lang/Number;U:>(TT;I)TU;").unwrap(),
            name: "conv".to_owned(),
            attrs: vec![Attribute::Exceptions(vec![ClassName::new("java/io/IOException")])],
        });
        c.methods.push(Method {
            modifiers: vec![],
            sig: FunctionSignature::new(vec![], ValueType::Void),
            name: "run".to_owned(),
            attrs: vec![],
        });

        let out = render(&c);
        let expected = "\nclass P \n {\n  \
            private static long[] xs;\n  \
            .constantvalue Int 3\n  \
            .synthetic\n\
            \n  \
            public <T extends java.lang.Number, U> U conv(T, int);\n  \
            .exceptions java/io/IOException\n\
            \n  \
            void run();\n\
            \n\
            }\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_code_block() {
        let src = "getstatic java/lang/System.out:Ljava/io/PrintStream;\nldc \"hi\"\n\
                   invokevirtual java/io/PrintStream.println:(Ljava/lang/String;)V\nL0:\ngoto L0\n";
        let code = assemble(src, AssemblerOptions::default()).unwrap();

        let mut c = ClassFile::new(ClassName::new("Hello"));
        c.methods.push(Method {
            modifiers: vec![Modifier::Public, Modifier::Static],
            sig: FunctionSignature::new(vec![], ValueType::Void),
            name: "main".to_owned(),
            attrs: vec![Attribute::Code(Code::new(2, code))],
        });
        c.attrs.push(Attribute::SourceFile("Hello.java".to_owned()));
        c.fill_pool();

        let out = render(&c);
        let body = &out[out.find("\nclass").unwrap() + 1..];
        let sourcefile = c.pool.entries()[1..]
            .iter()
            .position(|e| *e == Const::Utf8("Hello.java".into()))
            .unwrap()
            + 1;
        let expected = format!(
            "class Hello \n.sourcefile #{}\n {{\n  \
             public static void main();\n  \
             .code stack 2 locals 0\n    \
             getstatic java/lang/System.out:Ljava/io/PrintStream;\n    \
             ldc \"hi\"\n    \
             invokevirtual java/io/PrintStream.println:(Ljava/lang/String;)V\n  \
             L0:\n    \
             goto L0\n  \
             .end code\n\
             \n\
             }}\n",
            sourcefile
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_code_reparses() {
        let src = "aload_0\nlstore 7\niconst_m1\nbipush 100\nsipush -3000\nlconst_1\n\
                   ldc 123456789012\nldc 0.25\nldc \"a b\"\nsaload\ndastore\n\
                   getfield pkg/Point.x:I\nputstatic pkg/Config.names:[Ljava/lang/String;\n\
                   invokeinterface java/util/List.size:()I\ninvokespecial java/lang/Object.<init>:()V\n\
                   Loop:\ngoto Loop\nfreturn\nreturn\n";
        let instrs = assemble(src, AssemblerOptions::default()).unwrap();
        let code = Code::new(4, instrs);

        let mut c = ClassFile::new(ClassName::new("pkg/Body"));
        c.methods.push(Method {
            modifiers: vec![Modifier::Static],
            sig: FunctionSignature::new(vec![], ValueType::Void),
            name: "body".to_owned(),
            attrs: vec![Attribute::Code(code.clone())],
        });
        c.fill_pool();

        let out = render(&c);
        let body: Vec<_> = out
            .lines()
            .skip_while(|l| !l.trim_start().starts_with(".code "))
            .skip(1)
            .take_while(|l| l.trim() != ".end code")
            .collect();
        let reparsed: Vec<_> = body.iter().map(|l| parse_bytecode(l).unwrap().unwrap()).collect();
        assert_eq!(reparsed, code.instructions);
    }
}
