use super::parse_bytecode::LineParser;
use super::span::SyntaxError;
use crate::lib::types::parse_class_descriptor;
use crate::lib::types::ClassName;

/// The `Owner.name:descriptor` operand of field and invoke instructions.
pub(super) struct MemberRef<'a> {
    pub owner: ClassName,
    pub name: &'a str,
    pub desc: &'a str,
}

impl<'a> LineParser<'a> {
    pub(super) fn member_ref(&self, tok: &'a str) -> Result<MemberRef<'a>, SyntaxError> {
        let (owner, rest) = match tok.split_once('.') {
            Some(parts) => parts,
            None => return self.err("missing '.' between owner and member name", tok),
        };
        let (name, desc) = match rest.split_once(':') {
            Some(parts) => parts,
            None => return self.err("missing ':' between member name and descriptor", rest),
        };

        if owner.is_empty() {
            return self.err("empty owner class in member reference", tok);
        }
        if name.is_empty() {
            return self.err("empty member name in member reference", rest);
        }
        if desc.is_empty() {
            return self.err("empty descriptor in member reference", tok);
        }

        let owner = parse_class_descriptor(&format!("L{};", owner)).map_err(|e| e.at(self.bounds(owner)))?;
        Ok(MemberRef { owner, name, desc })
    }
}

#[cfg(test)]
mod tests {
    use crate::lib::assemble::parse_bytecode;
    use crate::lib::assemble::span::SpanBounds;

    fn err(line: &str) -> (String, Option<SpanBounds>) {
        let e = parse_bytecode(line).unwrap_err();
        (e.msg().to_owned(), e.span())
    }

    #[test]
    fn test_malformed_member_refs() {
        let (msg, span) = err("getfield Foo");
        assert_eq!(msg, "missing '.' between owner and member name");
        assert_eq!(span, Some(SpanBounds { start: 9, end: 12 }));

        let (msg, span) = err("getfield Foo.bar");
        assert_eq!(msg, "missing ':' between member name and descriptor");
        assert_eq!(span, Some(SpanBounds { start: 13, end: 16 }));

        assert_eq!(err("getfield .bar:I").0, "empty owner class in member reference");
        assert_eq!(err("invokestatic Foo.:()V").0, "empty member name in member reference");
        assert_eq!(err("getfield Foo.bar:").0, "empty descriptor in member reference");

        let (msg, span) = err("getfield Fo;o.bar:I");
        assert!(msg.starts_with("invalid descriptor"), "{}", msg);
        assert_eq!(span, Some(SpanBounds { start: 9, end: 13 }));
    }

    #[test]
    fn test_nested_class_owner() {
        assert!(parse_bytecode("getstatic java/util/Map$Entry.X:I").is_ok());
    }
}
