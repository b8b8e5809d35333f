// IR text rendering, close enough to LLVM assembly to read as such

use crate::ir::*;
use std::fmt;

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for ext in &self.externs {
            writeln!(f, "{}", ext)?;
        }
        if !self.externs.is_empty() {
            writeln!(f)?;
        }

        for global in &self.globals {
            writeln!(f, "{}", global)?;
        }
        if !self.globals.is_empty() {
            writeln!(f)?;
        }

        for (i, func) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", func)?;
        }

        Ok(())
    }
}

impl fmt::Display for ExternFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "declare {} @{}(", self.return_type, self.name)?;
        for (i, ty) in self.param_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GlobalVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let zero = match self.ty {
            Type::Float => "0.0",
            _ => "0",
        };
        write!(f, "@{} = global {} {}", self.name, self.ty, zero)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "define {} @{}(", self.return_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} %{}", param.ty, i)?;
        }
        writeln!(f, ") {{")?;

        for (i, bb) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", bb.label)?;
            for inst in &bb.instructions {
                writeln!(f, "  {}", inst)?;
            }
            if let Some(term) = &bb.terminator {
                writeln!(f, "  {}", term)?;
            }
        }

        write!(f, "}}")
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Binary {
                result,
                op,
                left,
                right,
            } => {
                write!(
                    f,
                    "%{} = {} {} {}, {}",
                    result.id,
                    op.mnemonic(),
                    left.ty(),
                    left,
                    right
                )
            }
            Instruction::Alloca { result, ty } => {
                write!(f, "%{} = alloca {}", result.id, ty)
            }
            Instruction::Load { result, ptr } => {
                write!(
                    f,
                    "%{} = load {}, {}* {}",
                    result.id, result.ty, result.ty, ptr
                )
            }
            Instruction::Store { value, ptr } => {
                write!(f, "store {} {}, {}* {}", value.ty(), value, value.ty(), ptr)
            }
            Instruction::Cast { result, op, value } => {
                write!(
                    f,
                    "%{} = {} {} {} to {}",
                    result.id,
                    op,
                    value.ty(),
                    value,
                    result.ty
                )
            }
            Instruction::Call { result, func, args } => {
                let ret_ty = match result {
                    Some(r) => r.ty.clone(),
                    None => Type::Void,
                };
                if let Some(r) = result {
                    write!(f, "%{} = ", r.id)?;
                }
                write!(f, "call {} @{}(", ret_ty, func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", arg.ty(), arg)?;
                }
                write!(f, ")")
            }
            Instruction::Phi { result, incoming } => {
                write!(f, "%{} = phi {} ", result.id, result.ty)?;
                for (i, (val, label)) in incoming.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[ {}, %{} ]", val, label)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Terminator::Ret(Some(val)) => write!(f, "ret {} {}", val.ty(), val),
            Terminator::Ret(None) => write!(f, "ret void"),
            Terminator::Br(label) => write!(f, "br label %{}", label),
            Terminator::CondBr {
                cond,
                true_label,
                false_label,
            } => {
                write!(
                    f,
                    "br i1 {}, label %{}, label %{}",
                    cond, true_label, false_label
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_minimal_function() {
        let mut func = Function::new("main".to_string(), Vec::new(), Type::Int);
        let mut entry = BasicBlock::new("entry".to_string());
        entry.terminator = Some(Terminator::Ret(Some(Value::Const(Constant::Int(0)))));
        func.blocks.push(entry);

        let text = format!("{}", func);
        assert_eq!(text, "define i32 @main() {\nentry:\n  ret i32 0\n}");
    }

    #[test]
    fn test_render_extern_and_global() {
        let module = Module {
            externs: vec![ExternFunction {
                name: "print_int".to_string(),
                param_types: vec![Type::Int],
                return_type: Type::Int,
            }],
            globals: vec![GlobalVar {
                name: "g".to_string(),
                ty: Type::Float,
            }],
            functions: Vec::new(),
        };
        let text = format!("{}", module);
        assert!(text.contains("declare i32 @print_int(i32)"));
        assert!(text.contains("@g = global float 0.0"));
    }

    #[test]
    fn test_render_phi_and_cmp() {
        let inst = Instruction::Phi {
            result: VirtualReg::new(5, Type::Bool),
            incoming: vec![
                (Value::Const(Constant::Bool(true)), "lhs".to_string()),
                (Value::Reg(VirtualReg::new(4, Type::Bool)), "rhs".to_string()),
            ],
        };
        assert_eq!(format!("{}", inst), "%5 = phi i1 [ 1, %lhs ], [ %4, %rhs ]");

        let cmp = Instruction::Binary {
            result: VirtualReg::new(2, Type::Bool),
            op: BinaryOp::FCmp(Predicate::Ne),
            left: Value::Reg(VirtualReg::new(1, Type::Float)),
            right: Value::Const(Constant::Float(0.0)),
        };
        assert_eq!(format!("{}", cmp), "%2 = fcmp one float %1, 0.0");
    }
}
