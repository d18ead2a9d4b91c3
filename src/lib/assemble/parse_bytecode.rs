use super::mnemonic::classify;
use super::mnemonic::Family;
use super::parse_literal;
use super::span::SpanBounds;
use super::span::SyntaxError;
use super::tokenize::tokenize;
use crate::lib::bytecode::Constant;
use crate::lib::bytecode::FieldMode;
use crate::lib::bytecode::Instruction;
use crate::lib::bytecode::InvokeMode;
use crate::lib::types::parse_descriptor;
use crate::lib::types::parse_method_descriptor;
use crate::lib::types::parse_type;
use crate::lib::types::ValueType;

pub(super) struct LineParser<'a> {
    line: &'a str,
    tokens: Vec<&'a str>,
}
impl<'a> LineParser<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            tokens: tokenize(line),
        }
    }

    pub(super) fn bounds(&self, tok: &str) -> SpanBounds {
        SpanBounds::new(tok, self.line)
    }

    pub(super) fn err<T>(&self, msg: &str, tok: &str) -> Result<T, SyntaxError> {
        Err(SyntaxError::new(msg).at(self.bounds(tok)))
    }

    fn kind(&self) -> &'a str {
        self.tokens[0]
    }

    fn wrong_arity<T>(&self) -> Result<T, SyntaxError> {
        let extra = self.tokens.get(1).copied().unwrap_or(self.kind());
        self.err("wrong number of arguments", extra)
    }

    fn arity(&self, ok: bool) -> Result<(), SyntaxError> {
        if ok {
            Ok(())
        } else {
            self.wrong_arity()
        }
    }

    fn int<T>(&self, s: &str, tok: &str) -> Result<T, SyntaxError>
    where
        T: std::str::FromStr,
        T: TryFrom<i64>,
    {
        parse_literal::int(s).ok_or_else(|| SyntaxError::new(format!("invalid integer: {}", s)).at(self.bounds(tok)))
    }

    /// Type selected by the first character of the mnemonic.
    fn prefix_type(&self) -> Result<ValueType, SyntaxError> {
        let kind = self.kind();
        let c = kind.chars().next().unwrap_or(' ');
        parse_type(c).map_err(|e| e.at(self.bounds(&kind[..c.len_utf8()])))
    }

    /// Everything after the first `_` of the mnemonic, if any.
    fn fused_operand(&self) -> Option<&'a str> {
        self.kind().split_once('_').map(|(_, rest)| rest)
    }

    fn parse(&self) -> Result<Option<Instruction>, SyntaxError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let kind = self.kind();
        let ins = match classify(kind) {
            Some(Family::LoadStore) => self.load_store()?,
            Some(Family::ArrayLoadStore) => self.array_load_store()?,
            Some(Family::Invoke) => self.invoke()?,
            Some(Family::Return) => self.ret()?,
            Some(Family::Field) => self.field()?,
            Some(Family::Const) => self.constant()?,
            None if kind == "goto" && self.tokens.len() == 2 => Instruction::Goto(self.tokens[1].to_owned()),
            None if self.tokens.len() == 1 && kind.len() > 1 && kind.ends_with(':') => {
                Instruction::Label(kind[..kind.len() - 1].to_owned())
            }
            None => return self.err("syntax error", kind),
        };
        Ok(Some(ins))
    }

    fn load_store(&self) -> Result<Instruction, SyntaxError> {
        let kind = self.kind();
        let ty = self.prefix_type()?;
        let slot = match self.tokens.len() {
            1 => match self.fused_operand() {
                Some(digits) => self.int(digits, kind)?,
                None => return self.err("slot argument required", kind),
            },
            2 => self.int(self.tokens[1], self.tokens[1])?,
            _ => return self.wrong_arity(),
        };

        if kind[1..].starts_with("store") {
            Ok(Instruction::Store { slot, ty })
        } else {
            Ok(Instruction::Load { slot, ty })
        }
    }

    fn array_load_store(&self) -> Result<Instruction, SyntaxError> {
        self.arity(self.tokens.len() == 1)?;
        let ty = ValueType::array(self.prefix_type()?);
        if self.kind()[2..].starts_with("store") {
            Ok(Instruction::ArrayStore(ty))
        } else {
            Ok(Instruction::ArrayLoad(ty))
        }
    }

    fn invoke(&self) -> Result<Instruction, SyntaxError> {
        self.arity(self.tokens.len() == 2)?;
        let mode = match self.kind() {
            "invokevirtual" => InvokeMode::Virtual,
            "invokeinterface" => InvokeMode::Interface,
            "invokespecial" => InvokeMode::Special,
            _ => InvokeMode::Static,
        };

        let r = self.member_ref(self.tokens[1])?;
        let sig = parse_method_descriptor(r.desc).map_err(|e| e.at(self.bounds(r.desc)))?;
        Ok(Instruction::Invoke {
            owner: r.owner,
            name: r.name.to_owned(),
            sig,
            mode,
        })
    }

    fn ret(&self) -> Result<Instruction, SyntaxError> {
        self.arity(self.tokens.len() == 1)?;
        if self.kind() == "return" {
            Ok(Instruction::Return(None))
        } else {
            Ok(Instruction::Return(Some(self.prefix_type()?)))
        }
    }

    fn field(&self) -> Result<Instruction, SyntaxError> {
        self.arity(self.tokens.len() == 2)?;
        let r = self.member_ref(self.tokens[1])?;
        let ty = parse_descriptor(r.desc).map_err(|e| e.at(self.bounds(r.desc)))?;
        let (owner, name) = (r.owner, r.name.to_owned());

        Ok(match self.kind() {
            "getstatic" => Instruction::GetField {
                owner,
                name,
                ty,
                mode: FieldMode::Static,
            },
            "getfield" => Instruction::GetField {
                owner,
                name,
                ty,
                mode: FieldMode::Instance,
            },
            "putfield" => Instruction::PutField {
                owner,
                name,
                ty,
                mode: FieldMode::Instance,
            },
            _ => Instruction::PutField {
                owner,
                name,
                ty,
                mode: FieldMode::Static,
            },
        })
    }

    fn constant(&self) -> Result<Instruction, SyntaxError> {
        let kind = self.kind();
        let c = match self.tokens.len() {
            1 => {
                let ty = self.prefix_type()?;
                let digits = match self.fused_operand() {
                    Some(digits) => digits,
                    None => return self.err("constant argument required", kind),
                };
                let invalid = || SyntaxError::new(format!("invalid integer: {}", digits)).at(self.bounds(kind));
                match ty {
                    ValueType::Int => Constant::Int(parse_literal::fused_int(digits).ok_or_else(invalid)?),
                    ValueType::Long => Constant::Long(parse_literal::fused_int(digits).ok_or_else(invalid)?),
                    _ => return self.err("syntax error", kind),
                }
            }
            2 if kind.starts_with("ldc") => self.ldc_operand(self.tokens[1])?,
            2 => Constant::Int(self.int(self.tokens[1], self.tokens[1])?),
            _ => return self.wrong_arity(),
        };
        Ok(Instruction::LoadConst(c))
    }

    fn ldc_operand(&self, tok: &str) -> Result<Constant, SyntaxError> {
        if tok.starts_with('"') {
            if tok.len() < 2 || !tok.ends_with('"') {
                return self.err("unterminated string constant", tok);
            }
            Ok(Constant::Str(tok[1..tok.len() - 1].to_owned()))
        } else if tok.contains('.') {
            // Any decimal point means float. ldc never produces a double.
            match parse_literal::float(tok) {
                Some(v) if v.is_finite() => Ok(Constant::Float(v)),
                Some(_) => self.err(&format!("float out of range: {}", tok), tok),
                None => self.err(&format!("invalid float: {}", tok), tok),
            }
        } else {
            Ok(Constant::Long(self.int(tok, tok)?))
        }
    }
}

/// Parse one line of assembly. Blank lines produce no instruction.
pub fn parse_bytecode(line: &str) -> Result<Option<Instruction>, SyntaxError> {
    LineParser::new(line).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::assemble::mnemonic::FAMILIES;
    use crate::lib::types::ClassName;
    use crate::lib::types::FunctionSignature;

    fn parse(line: &str) -> Instruction {
        parse_bytecode(line).unwrap().unwrap()
    }

    fn parse_err(line: &str) -> SyntaxError {
        parse_bytecode(line).unwrap_err()
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse_bytecode("").unwrap(), None);
        assert_eq!(parse_bytecode("   \t ").unwrap(), None);
    }

    #[test]
    fn test_unknown() {
        let err = parse_err("garbage");
        assert_eq!(err.msg(), "syntax error");
        assert_eq!(err.span(), Some(SpanBounds { start: 0, end: 7 }));
        assert_eq!(parse_err("goto").msg(), "syntax error");
        assert_eq!(parse_err("goto a b").msg(), "syntax error");
        assert_eq!(parse_err("L1: nop").msg(), "syntax error");
        assert_eq!(parse_err(":").msg(), "syntax error");
        assert_eq!(parse_err("IRETURN").msg(), "syntax error");
    }

    #[test]
    fn test_load_store() {
        assert_eq!(parse("istore_2"), Instruction::Store { slot: 2, ty: ValueType::Int });
        assert_eq!(parse("istore 7"), Instruction::Store { slot: 7, ty: ValueType::Int });
        assert_eq!(parse("aload_0"), Instruction::Load { slot: 0, ty: ValueType::object() });
        assert_eq!(parse("dload 0x10"), Instruction::Load { slot: 16, ty: ValueType::Double });

        assert_eq!(parse_err("istore").msg(), "slot argument required");
        assert_eq!(parse_err("istore x").msg(), "invalid integer: x");
        assert_eq!(parse_err("istore -1").msg(), "invalid integer: -1");
        assert_eq!(parse_err("istore 1 2").msg(), "wrong number of arguments");
    }

    #[test]
    fn test_array_load_store() {
        assert_eq!(parse("iaload"), Instruction::ArrayLoad(ValueType::array(ValueType::Int)));
        assert_eq!(parse("bastore"), Instruction::ArrayStore(ValueType::array(ValueType::Bool)));
        assert_eq!(parse("aaload"), Instruction::ArrayLoad(ValueType::array(ValueType::object())));
        assert_eq!(parse_err("iaload 1").msg(), "wrong number of arguments");
    }

    #[test]
    fn test_invoke() {
        assert_eq!(
            parse("invokevirtual Foo.bar:(I)V"),
            Instruction::Invoke {
                owner: ClassName::new("Foo"),
                name: "bar".to_owned(),
                sig: FunctionSignature::new(vec![ValueType::Int], ValueType::Void),
                mode: InvokeMode::Virtual,
            }
        );
        match parse("invokespecial java/lang/Object.<init>:()V") {
            Instruction::Invoke { owner, name, mode, .. } => {
                assert_eq!(owner, ClassName::java_lang_object());
                assert_eq!(name, "<init>");
                assert_eq!(mode, InvokeMode::Special);
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse("invokestatic Foo.baz:(J)J") {
            Instruction::Invoke { mode, .. } => assert_eq!(mode, InvokeMode::Static),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(parse_err("invokevirtual").msg(), "wrong number of arguments");
        assert_eq!(parse_err("invokevirtual Foo.bar:(I)V extra").msg(), "wrong number of arguments");
        let err = parse_err("invokevirtual Foo.bar:(Q)V");
        assert!(err.msg().starts_with("invalid descriptor"), "{}", err);
        assert_eq!(err.span(), Some(SpanBounds { start: 22, end: 26 }));
    }

    #[test]
    fn test_field() {
        assert_eq!(
            parse("getstatic java/lang/System.out:Ljava/io/PrintStream;"),
            Instruction::GetField {
                owner: ClassName::new("java/lang/System"),
                name: "out".to_owned(),
                ty: ValueType::Class(ClassName::new("java/io/PrintStream")),
                mode: FieldMode::Static,
            }
        );
        assert_eq!(
            parse("putfield Point.x:I"),
            Instruction::PutField {
                owner: ClassName::new("Point"),
                name: "x".to_owned(),
                ty: ValueType::Int,
                mode: FieldMode::Instance,
            }
        );
        assert!(matches!(parse("getfield A.b:J"), Instruction::GetField { mode: FieldMode::Instance, .. }));
        assert!(matches!(parse("putstatic A.b:J"), Instruction::PutField { mode: FieldMode::Static, .. }));
        assert!(parse_err("getfield A.b:(I)V").msg().starts_with("invalid descriptor"));
        assert_eq!(parse_err("getfield A.b:I c").msg(), "wrong number of arguments");
    }

    #[test]
    fn test_return() {
        assert_eq!(parse("return"), Instruction::Return(None));
        assert_eq!(parse("ireturn"), Instruction::Return(Some(ValueType::Int)));
        assert_eq!(parse("areturn"), Instruction::Return(Some(ValueType::object())));
        assert_eq!(parse_err("return 1").msg(), "wrong number of arguments");
    }

    #[test]
    fn test_constants() {
        use Constant::*;
        assert_eq!(parse(r#"ldc "x""#), Instruction::LoadConst(Str("x".to_owned())));
        assert_eq!(parse(r#"ldc "hello world""#), Instruction::LoadConst(Str("hello world".to_owned())));
        assert_eq!(parse(r#"ldc """#), Instruction::LoadConst(Str(String::new())));
        assert_eq!(parse("ldc 3.14"), Instruction::LoadConst(Float(3.14)));
        assert_eq!(parse("ldc 3.14f"), Instruction::LoadConst(Float(3.14)));
        assert_eq!(parse("ldc 0.5D"), Instruction::LoadConst(Float(0.5)));
        assert_eq!(parse("ldc 42"), Instruction::LoadConst(Long(42)));
        assert_eq!(parse("ldc2_w -7"), Instruction::LoadConst(Long(-7)));
        assert_eq!(parse("iconst_m1"), Instruction::LoadConst(Int(-1)));
        assert_eq!(parse("iconst_3"), Instruction::LoadConst(Int(3)));
        assert_eq!(parse("lconst_1"), Instruction::LoadConst(Long(1)));
        assert_eq!(parse("bipush -12"), Instruction::LoadConst(Int(-12)));
        assert_eq!(parse("sipush 300"), Instruction::LoadConst(Int(300)));

        assert_eq!(parse_err(r#"ldc "abc"#).msg(), "unterminated string constant");
        assert_eq!(parse_err(r#"ldc ""#).msg(), "unterminated string constant");
        assert_eq!(parse_err("ldc 1.2.3").msg(), "invalid float: 1.2.3");
        let err = parse_err("ldc 1.0e39");
        assert_eq!(err.msg(), "float out of range: 1.0e39");
        assert_eq!(err.span(), Some(SpanBounds { start: 4, end: 10 }));
        assert_eq!(parse_err("ldc -1.0e39").msg(), "float out of range: -1.0e39");
        assert_eq!(parse_err("ldc abc").msg(), "invalid integer: abc");
        assert_eq!(parse_err("ldc").msg(), "constant argument required");
        assert_eq!(parse_err("bipush").msg(), "constant argument required");
        assert_eq!(parse_err("sipush 99999999999").msg(), "invalid integer: 99999999999");
        assert_eq!(parse_err("ldc 1 2").msg(), "wrong number of arguments");
    }

    #[test]
    fn test_labels() {
        assert_eq!(parse("L1:"), Instruction::Label("L1".to_owned()));
        assert_eq!(parse("goto L1"), Instruction::Goto("L1".to_owned()));
        // targets are not resolved here
        assert_eq!(parse("goto nowhere"), Instruction::Goto("nowhere".to_owned()));

        // a label needs a name
        let err = parse_err("  :");
        assert_eq!(err.msg(), "syntax error");
        assert_eq!(err.span(), Some(SpanBounds { start: 2, end: 3 }));
    }

    /// A valid operand list for every mnemonic in the table.
    fn sample_line(family: Family, mnemonic: &str) -> String {
        let operand = match family {
            Family::LoadStore if mnemonic.contains('_') => "",
            Family::LoadStore => " 5",
            Family::ArrayLoadStore | Family::Return => "",
            Family::Field => " pkg/Point.x:[J",
            Family::Invoke => " java/util/Map.put:(Ljava/lang/Object;Ljava/lang/Object;)Ljava/lang/Object;",
            Family::Const => match mnemonic {
                "bipush" => " -100",
                "sipush" => " 1000",
                "ldc" => " \"a b c\"",
                "ldc_w" => " 0.5",
                "ldc2_w" => " 123456789012",
                _ => "",
            },
        };
        format!("{}{}", mnemonic, operand)
    }

    #[test]
    fn test_roundtrip() {
        let mut lines: Vec<String> = Vec::new();
        for (family, names) in FAMILIES.iter() {
            for name in names.iter() {
                lines.push(sample_line(*family, name));
            }
        }
        lines.extend(["ldc 3.0e38", "ldc 0x1.8p1", "iload 0", "goto L7", "L7:"].map(String::from));

        for line in &lines {
            let ins = parse(line);
            let text = ins.to_string();
            assert_eq!(parse(&text), ins, "{} -> {}", line, text);
        }
    }
}
