// IR instruction definitions

use crate::ir::{Type, Value, VirtualReg};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Instruction {
    Binary {
        result: VirtualReg,
        op: BinaryOp,
        left: Value,
        right: Value,
    },
    Alloca {
        result: VirtualReg,
        ty: Type,
    },
    Load {
        result: VirtualReg,
        ptr: Value,
    },
    Store {
        value: Value,
        ptr: Value,
    },
    Cast {
        result: VirtualReg,
        op: CastOp,
        value: Value,
    },
    Call {
        result: Option<VirtualReg>,
        func: String,
        args: Vec<Value>,
    },
    /// Merge of values flowing in from predecessor blocks; only emitted at
    /// the join point of `&&` / `||`.
    Phi {
        result: VirtualReg,
        incoming: Vec<(Value, String)>,
    },
}

#[derive(Debug, Clone)]
pub enum Terminator {
    Ret(Option<Value>),
    Br(String),
    CondBr {
        cond: Value,
        true_label: String,
        false_label: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    SDiv,
    SRem,
    FAdd,
    FSub,
    FMul,
    FDiv,
    ICmp(Predicate),
    FCmp(Predicate),
    /// Only used for boolean complement (`xor i1 x, true`)
    Xor,
}

/// Comparison predicates. The same set serves `icmp` (signed) and `fcmp`
/// (ordered), which is all MiniC needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn mnemonic(&self) -> String {
        match self {
            BinaryOp::Add => "add".to_string(),
            BinaryOp::Sub => "sub".to_string(),
            BinaryOp::Mul => "mul".to_string(),
            BinaryOp::SDiv => "sdiv".to_string(),
            BinaryOp::SRem => "srem".to_string(),
            BinaryOp::FAdd => "fadd".to_string(),
            BinaryOp::FSub => "fsub".to_string(),
            BinaryOp::FMul => "fmul".to_string(),
            BinaryOp::FDiv => "fdiv".to_string(),
            BinaryOp::ICmp(p) => format!("icmp {}", p.icmp_name()),
            BinaryOp::FCmp(p) => format!("fcmp {}", p.fcmp_name()),
            BinaryOp::Xor => "xor".to_string(),
        }
    }
}

impl Predicate {
    fn icmp_name(&self) -> &'static str {
        match self {
            Predicate::Eq => "eq",
            Predicate::Ne => "ne",
            Predicate::Lt => "slt",
            Predicate::Le => "sle",
            Predicate::Gt => "sgt",
            Predicate::Ge => "sge",
        }
    }

    fn fcmp_name(&self) -> &'static str {
        match self {
            Predicate::Eq => "oeq",
            Predicate::Ne => "one",
            Predicate::Lt => "olt",
            Predicate::Le => "ole",
            Predicate::Gt => "ogt",
            Predicate::Ge => "oge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOp {
    /// i1 -> i32 zero extension
    ZExt,
    /// signed i32 -> float
    SiToFp,
}

impl fmt::Display for CastOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CastOp::ZExt => write!(f, "zext"),
            CastOp::SiToFp => write!(f, "sitofp"),
        }
    }
}
