use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Private,
    Protected,
    Public,
    Static,
    Abstract,
    Final,
    Super,
    Bridge,
    Enum,
    Synthetic,
    Native,
    StrictFp,
    Synchronized,
    Transient,
    Volatile,
}
impl Modifier {
    pub fn keyword(self) -> &'static str {
        use Modifier::*;
        match self {
            Private => "private",
            Protected => "protected",
            Public => "public",
            Static => "static",
            Abstract => "abstract",
            Final => "final",
            Super => "super",
            Bridge => "bridge",
            Enum => "enum",
            Synthetic => "synthetic",
            Native => "native",
            StrictFp => "strictfp",
            Synchronized => "synchronized",
            Transient => "transient",
            Volatile => "volatile",
        }
    }
}

/// Prints each modifier followed by a space, in list order.
pub(crate) struct Flags<'a>(pub &'a [Modifier]);
impl fmt::Display for Flags<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for m in self.0 {
            f.write_str(m.keyword())?;
            f.write_str(" ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_keep_order() {
        use Modifier::*;
        assert_eq!(Flags(&[Static, Public, Final]).to_string(), "static public final ");
        assert_eq!(Flags(&[]).to_string(), "");
        assert_eq!(Flags(&[StrictFp, Synchronized]).to_string(), "strictfp synchronized ");
    }
}
