//! Backend intermediate representation
//!
//! Functions of labeled basic blocks over virtual registers, with an
//! LLVM-flavoured text rendering in `display`.  The semantic pass emits into
//! this module through [`builder::FunctionBuilder`]; the driver writes the
//! rendered module to `output.ll`.  The text form is deterministic: same AST
//! in, same bytes out.

pub mod builder;
pub mod display;
pub mod inst;
pub mod types;
pub mod value;

pub use self::inst::*;
pub use self::types::*;
pub use self::value::*;

/// A whole translation unit: extern declarations, globals, then functions,
/// each list in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub externs: Vec<ExternFunction>,
    pub globals: Vec<GlobalVar>,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Module::default()
    }
}

/// `declare` entry for a function defined outside the module
#[derive(Debug, Clone)]
pub struct ExternFunction {
    pub name: String,
    pub param_types: Vec<Type>,
    pub return_type: Type,
}

/// Module-level variable, always zero-initialized.
#[derive(Debug, Clone)]
pub struct GlobalVar {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(name: String, params: Vec<Parameter>, return_type: Type) -> Self {
        Function {
            name,
            params,
            return_type,
            blocks: Vec::new(),
        }
    }

    pub fn find_block_mut(&mut self, label: &str) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|bb| bb.label == label)
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub label: String,
    pub instructions: Vec<Instruction>,
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    pub fn new(label: String) -> Self {
        BasicBlock {
            label,
            instructions: Vec::new(),
            terminator: None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }
}
