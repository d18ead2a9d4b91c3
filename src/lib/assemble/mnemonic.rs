use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    LoadStore,
    ArrayLoadStore,
    Field,
    Invoke,
    Return,
    Const,
}

static LOAD_STORE: &[&str] = &[
    "iload", "lload", "fload", "dload", "aload", "istore", "lstore", "fstore", "dstore", "astore", "iload_0",
    "iload_1", "iload_2", "iload_3", "lload_0", "lload_1", "lload_2", "lload_3", "fload_0", "fload_1", "fload_2",
    "fload_3", "dload_0", "dload_1", "dload_2", "dload_3", "aload_0", "aload_1", "aload_2", "aload_3", "istore_0",
    "istore_1", "istore_2", "istore_3", "lstore_0", "lstore_1", "lstore_2", "lstore_3", "fstore_0", "fstore_1",
    "fstore_2", "fstore_3", "dstore_0", "dstore_1", "dstore_2", "dstore_3", "astore_0", "astore_1", "astore_2",
    "astore_3",
];
static ARRAY_LOAD_STORE: &[&str] = &[
    "iaload", "laload", "faload", "daload", "aaload", "baload", "caload", "saload", "iastore", "lastore", "fastore",
    "dastore", "aastore", "bastore", "castore", "sastore",
];
static FIELD: &[&str] = &["getstatic", "getfield", "putstatic", "putfield"];
static INVOKE: &[&str] = &["invokespecial", "invokevirtual", "invokeinterface", "invokestatic"];
static RETURN: &[&str] = &["return", "areturn", "ireturn", "lreturn", "freturn", "dreturn"];
static CONST: &[&str] = &[
    "iconst_m1", "iconst_0", "iconst_1", "iconst_2", "iconst_3", "iconst_4", "iconst_5", "lconst_0", "lconst_1",
    "bipush", "sipush", "ldc", "ldc_w", "ldc2_w",
];

pub(super) static FAMILIES: [(Family, &[&str]); 6] = [
    (Family::LoadStore, LOAD_STORE),
    (Family::ArrayLoadStore, ARRAY_LOAD_STORE),
    (Family::Field, FIELD),
    (Family::Invoke, INVOKE),
    (Family::Return, RETURN),
    (Family::Const, CONST),
];

lazy_static! {
    static ref MNEMONICS: HashMap<&'static str, Family> = {
        let mut m = HashMap::new();
        for (family, names) in FAMILIES.iter() {
            for name in names.iter() {
                let prev = m.insert(*name, *family);
                debug_assert!(prev.is_none(), "{} belongs to more than one family", name);
            }
        }
        m
    };
}

/// Look up the instruction family of a mnemonic. Matching is case sensitive.
pub fn classify(mnemonic: &str) -> Option<Family> {
    MNEMONICS.get(mnemonic).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_families_disjoint() {
        let mut seen = HashSet::new();
        for (_, names) in FAMILIES.iter() {
            for name in names.iter() {
                assert!(seen.insert(*name), "{} appears twice", name);
            }
        }
        assert_eq!(seen.len(), MNEMONICS.len());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("istore"), Some(Family::LoadStore));
        assert_eq!(classify("aload_0"), Some(Family::LoadStore));
        assert_eq!(classify("caload"), Some(Family::ArrayLoadStore));
        assert_eq!(classify("putstatic"), Some(Family::Field));
        assert_eq!(classify("invokeinterface"), Some(Family::Invoke));
        assert_eq!(classify("return"), Some(Family::Return));
        assert_eq!(classify("ldc_w"), Some(Family::Const));
        assert_eq!(classify("iconst_m1"), Some(Family::Const));

        assert_eq!(classify("ISTORE"), None);
        assert_eq!(classify("goto"), None);
        assert_eq!(classify("nop"), None);
        assert_eq!(classify(""), None);
    }
}
