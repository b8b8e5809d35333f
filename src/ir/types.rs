// IR type system

use std::fmt;

/// Types carried by IR values. `Ptr` only ever points at a first-class type
/// (allocas and globals); there are no aggregates in MiniC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Int,
    Float,
    Bool,
    Ptr(Box<Type>),
}

impl Type {
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn ptr_to(inner: Type) -> Self {
        Type::Ptr(Box::new(inner))
    }

    pub fn deref(&self) -> Option<&Type> {
        match self {
            Type::Ptr(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Int => write!(f, "i32"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "i1"),
            Type::Ptr(inner) => write!(f, "{}*", inner),
        }
    }
}
