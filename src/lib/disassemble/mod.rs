mod refprinter;
mod string;
mod writer;

use crate::lib::bytecode::Instruction;
use crate::lib::classfile::attrs::Attribute;
use crate::lib::classfile::attrs::Code;
use crate::lib::classfile::flags::Modifier;
use crate::lib::classfile::ClassFile;
use crate::lib::classfile::Method;
use crate::lib::types::ClassName;
use crate::lib::types::FunctionSignature;
use crate::lib::types::ValueType;
pub use writer::write_class;

#[derive(Debug, Clone)]
pub struct DisassemblerOptions {
    /// Internal name of the generated class.
    pub class_name: String,
    pub superclass: Option<String>,
    pub method_name: String,
    pub max_stack: u16,
}
impl Default for DisassemblerOptions {
    fn default() -> Self {
        Self {
            class_name: "Main".to_owned(),
            superclass: Some("java/lang/Object".to_owned()),
            method_name: "main".to_owned(),
            max_stack: 16,
        }
    }
}

fn source_file(class_name: &str) -> String {
    let simple = class_name.rsplit('/').next().unwrap_or(class_name);
    let outer = simple.split('$').next().unwrap_or(simple);
    format!("{}.java", outer)
}

/// Wrap an instruction listing into a class with one `public static void`
/// method holding it, and fill the constant pool.
pub fn build_class(instrs: Vec<Instruction>, opts: &DisassemblerOptions) -> ClassFile {
    let mut c = ClassFile::new(ClassName::new(opts.class_name.as_str()));
    c.modifiers = vec![Modifier::Public, Modifier::Super];
    c.superclass = opts.superclass.as_deref().map(ClassName::new);
    c.methods.push(Method {
        modifiers: vec![Modifier::Public, Modifier::Static],
        sig: FunctionSignature::new(Vec::new(), ValueType::Void),
        name: opts.method_name.clone(),
        attrs: vec![Attribute::Code(Code::new(opts.max_stack, instrs))],
    });
    c.attrs.push(Attribute::SourceFile(source_file(&opts.class_name)));
    c.fill_pool();
    c
}
