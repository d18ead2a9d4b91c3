pub mod attrs;
pub mod cpool;
pub mod flags;

use crate::lib::types::ClassName;
use crate::lib::types::FunctionSignature;
use crate::lib::types::ValueType;
use attrs::Attribute;
use cpool::Const;
use cpool::ConstantPool;
use flags::Modifier;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub modifiers: Vec<Modifier>,
    pub ty: ValueType,
    pub name: String,
    pub attrs: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub modifiers: Vec<Modifier>,
    pub sig: FunctionSignature,
    pub name: String,
    pub attrs: Vec<Attribute>,
}

#[derive(Debug)]
pub struct ClassFile {
    pub modifiers: Vec<Modifier>,
    pub name: ClassName,
    pub superclass: Option<ClassName>,
    pub interfaces: Vec<ClassName>,
    pub attrs: Vec<Attribute>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub pool: ConstantPool,
}
impl ClassFile {
    pub fn new(name: ClassName) -> Self {
        Self {
            modifiers: Vec::new(),
            name,
            superclass: None,
            interfaces: Vec::new(),
            attrs: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            pool: ConstantPool::new(),
        }
    }

    /// Populate the constant pool with everything the class refers to, in the
    /// order a compiler would emit it: this class, superclass, interfaces,
    /// fields, methods, then class attributes.
    pub fn fill_pool(&mut self) {
        let pool = &mut self.pool;
        pool.class(self.name.internal());
        if let Some(sup) = &self.superclass {
            pool.class(sup.internal());
        }
        for i in &self.interfaces {
            pool.class(i.internal());
        }

        for f in &self.fields {
            pool.utf8(&f.name);
            pool.utf8(&f.ty.descriptor());
            for a in &f.attrs {
                a.add_to_pool(pool);
            }
        }

        for m in &self.methods {
            pool.utf8(&m.name);
            pool.utf8(&m.sig.descriptor());
            for a in &m.attrs {
                a.add_to_pool(pool);
            }
        }

        for a in &self.attrs {
            a.add_to_pool(pool);
        }
        debug_assert!(pool.entries()[0] == Const::Null);
    }
}
