// IR values and virtual registers

use crate::ir::Type;
use std::fmt;

/// Anything an instruction can take as an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Const(Constant),
    Reg(VirtualReg),
    Global(String),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Const(c) => c.ty(),
            Value::Reg(r) => r.ty.clone(),
            // Globals are always pointers; the emitter tracks the pointee
            // type in its symbol table, so the bare type never matters here.
            Value::Global(_) => Type::Ptr(Box::new(Type::Int)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Const(c) => write!(f, "{}", c),
            Value::Reg(r) => write!(f, "%{}", r.id),
            Value::Global(name) => write!(f, "@{}", name),
        }
    }
}

/// Compile-time constants
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i32),
    Float(f32),
    Bool(bool),
}

impl Constant {
    pub fn ty(&self) -> Type {
        match self {
            Constant::Int(_) => Type::Int,
            Constant::Float(_) => Type::Float,
            Constant::Bool(_) => Type::Bool,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constant::Int(n) => write!(f, "{}", n),
            // LLVM renders float constants in double hex; a plain decimal
            // with a forced fraction keeps the text readable and parseable.
            Constant::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Constant::Bool(b) => write!(f, "{}", *b as u8),
        }
    }
}

/// An SSA register, numbered per function.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualReg {
    pub id: usize,
    pub ty: Type,
}

impl VirtualReg {
    pub fn new(id: usize, ty: Type) -> Self {
        VirtualReg { id, ty }
    }
}
