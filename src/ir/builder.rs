//! Incremental construction of one IR function
//!
//! [`FunctionBuilder`] owns the function being emitted, a fresh-register
//! counter, and an insertion point.  Parameters occupy registers `%0..%n`;
//! every later register comes from [`FunctionBuilder::fresh`].
//!
//! Instructions pushed after the current block has been terminated are
//! dropped.  That happens legitimately: `return` in the middle of a block
//! terminates it, and the rest of the block's statements still get emitted
//! by the driver.  The resulting dead code never reaches the output.

use crate::ir::{
    BasicBlock, Constant, Function, Instruction, Parameter, Terminator, Type, Value, VirtualReg,
};

pub struct FunctionBuilder {
    func: Function,
    next_reg: usize,
    next_label: usize,
    current: usize,
}

impl FunctionBuilder {
    /// Start a function. The entry block exists and is current.
    pub fn new(name: &str, params: Vec<Parameter>, return_type: Type) -> Self {
        let next_reg = params.len();
        let mut func = Function::new(name.to_string(), params, return_type);
        func.blocks.push(BasicBlock::new("entry".to_string()));
        FunctionBuilder {
            func,
            next_reg,
            next_label: 0,
            current: 0,
        }
    }

    /// Register holding the i-th parameter on entry
    pub fn param_reg(&self, index: usize) -> VirtualReg {
        VirtualReg::new(index, self.func.params[index].ty.clone())
    }

    /// Allocate a fresh register of the given type
    pub fn fresh(&mut self, ty: Type) -> VirtualReg {
        let reg = VirtualReg::new(self.next_reg, ty);
        self.next_reg += 1;
        reg
    }

    /// Create a new (empty, not yet current) block; `hint` names what it is
    /// for, e.g. `if.then`.
    pub fn new_block(&mut self, hint: &str) -> String {
        let label = format!("{}.{}", hint, self.next_label);
        self.next_label += 1;
        self.func.blocks.push(BasicBlock::new(label.clone()));
        label
    }

    /// Move the insertion point to the named block.
    ///
    /// Labels only come from [`FunctionBuilder::new_block`], so a miss is a
    /// driver bug; insertion falls back to the entry block rather than
    /// panicking.
    pub fn position_at(&mut self, label: &str) {
        self.current = self
            .func
            .blocks
            .iter()
            .position(|bb| bb.label == label)
            .unwrap_or(0);
    }

    /// Label of the block instructions currently go into. Phi nodes record
    /// this as the incoming edge.
    pub fn current_label(&self) -> String {
        self.func.blocks[self.current].label.clone()
    }

    pub fn is_terminated(&self) -> bool {
        self.func.blocks[self.current].is_terminated()
    }

    /// Append an instruction to the current block (dropped if the block
    /// already has a terminator).
    pub fn push(&mut self, inst: Instruction) {
        let bb = &mut self.func.blocks[self.current];
        if !bb.is_terminated() {
            bb.instructions.push(inst);
        }
    }

    /// Set the current block's terminator (first one wins).
    pub fn terminate(&mut self, term: Terminator) {
        let bb = &mut self.func.blocks[self.current];
        if !bb.is_terminated() {
            bb.terminator = Some(term);
        }
    }

    /// Seal the function: any block still missing a terminator gets a
    /// default return (zero of the return type, or `ret void`).
    pub fn finish(mut self) -> Function {
        let default_ret = match self.func.return_type {
            Type::Void => Terminator::Ret(None),
            Type::Int => Terminator::Ret(Some(Value::Const(Constant::Int(0)))),
            Type::Float => Terminator::Ret(Some(Value::Const(Constant::Float(0.0)))),
            Type::Bool => Terminator::Ret(Some(Value::Const(Constant::Bool(false)))),
            Type::Ptr(_) => Terminator::Ret(None),
        };
        for bb in &mut self.func.blocks {
            if !bb.is_terminated() {
                bb.terminator = Some(default_ret.clone());
            }
        }
        self.func
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_start_after_params() {
        let params = vec![
            Parameter {
                name: "x".to_string(),
                ty: Type::Int,
            },
            Parameter {
                name: "y".to_string(),
                ty: Type::Float,
            },
        ];
        let mut b = FunctionBuilder::new("f", params, Type::Int);
        assert_eq!(b.param_reg(0).id, 0);
        assert_eq!(b.param_reg(1).id, 1);
        assert_eq!(b.fresh(Type::Int).id, 2);
        assert_eq!(b.fresh(Type::Bool).id, 3);
    }

    #[test]
    fn test_unterminated_blocks_get_default_return() {
        let mut b = FunctionBuilder::new("f", Vec::new(), Type::Float);
        let extra = b.new_block("merge");
        b.position_at(&extra);
        let func = b.finish();
        for bb in &func.blocks {
            match bb.terminator {
                Some(Terminator::Ret(Some(Value::Const(Constant::Float(x))))) => {
                    assert_eq!(x, 0.0)
                }
                ref other => panic!("expected default float return, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_instructions_after_terminator_are_dropped() {
        let mut b = FunctionBuilder::new("f", Vec::new(), Type::Void);
        b.terminate(Terminator::Ret(None));
        let dead = b.fresh(Type::Int);
        b.push(Instruction::Alloca {
            result: dead,
            ty: Type::Int,
        });
        let func = b.finish();
        assert!(func.blocks[0].instructions.is_empty());
    }

    #[test]
    fn test_block_labels_are_unique() {
        let mut b = FunctionBuilder::new("f", Vec::new(), Type::Void);
        let a = b.new_block("if.then");
        let c = b.new_block("if.then");
        assert_ne!(a, c);
    }
}
