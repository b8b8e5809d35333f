//! Semantic analysis and IR emission
//!
//! One pass over the AST, one handler per node kind.  Each expression
//! handler returns the emitted [`ir::Value`] together with its MiniC type;
//! the caller decides which implicit conversions (from [`types`]) apply and
//! asks [`Codegen`] to materialize them as cast or compare instructions.
//!
//! The first semantic error aborts the pass: every handler returns
//! `Result<_, CompileError>` and nothing catches it before the driver.
//! Scopes are popped before an error propagates, so a [`Codegen`] that
//! failed still has a balanced scope stack.

pub mod scope;
pub mod types;

use crate::diagnostics::CompileError;
use crate::ir::{
    self, builder::FunctionBuilder, BinaryOp, CastOp, Constant, Instruction, Parameter, Predicate,
    Terminator,
};
use crate::parser::ast::{
    BinOp, Block, Decl, Expr, ExternDecl, Function, Program, SourceLocation, Stmt, Type, UnOp,
};
use log::debug;
use self::scope::{FunctionInfo, ScopeStack, VariableInfo};
use self::types::{implicit_conversion, promote, Conversion, ConversionContext};

/// Compile a parsed program into an IR module.
pub fn compile(program: &Program) -> Result<ir::Module, CompileError> {
    let mut cg = Codegen::new();
    cg.emit_program(program)?;
    Ok(cg.into_module())
}

fn lower_type(ty: Type) -> ir::Type {
    match ty {
        Type::Int => ir::Type::Int,
        Type::Float => ir::Type::Float,
        Type::Bool => ir::Type::Bool,
        Type::Void => ir::Type::Void,
    }
}

/// The emission driver: symbol tables plus the module under construction.
pub struct Codegen {
    module: ir::Module,
    scopes: ScopeStack,
    /// Names of functions declared without a body, in source order
    prototypes: Vec<String>,
    /// Return type of the function currently being emitted
    current_return: Type,
    current_name: String,
}

impl Codegen {
    pub fn new() -> Self {
        Codegen {
            module: ir::Module::new(),
            scopes: ScopeStack::new(),
            prototypes: Vec::new(),
            current_return: Type::Void,
            current_name: String::new(),
        }
    }

    pub fn into_module(self) -> ir::Module {
        self.module
    }

    /// The symbol environment, exposed for scope-balance assertions.
    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    // ===== Top level =====

    pub fn emit_program(&mut self, program: &Program) -> Result<(), CompileError> {
        for ext in &program.externs {
            self.emit_extern(ext)?;
        }
        for decl in &program.decls {
            match decl {
                Decl::Var(v) => {
                    self.scopes.declare_global(
                        &v.name,
                        VariableInfo {
                            slot: ir::Value::Global(v.name.clone()),
                            ty: v.ty,
                            is_global: true,
                            decl_loc: v.loc,
                        },
                    )?;
                    self.module.globals.push(ir::GlobalVar {
                        name: v.name.clone(),
                        ty: lower_type(v.ty),
                    });
                }
                Decl::Func(f) => self.emit_function(f)?,
            }
        }

        // Prototypes that never got a body become declares, like externs.
        for name in std::mem::take(&mut self.prototypes) {
            let info = match self.scopes.lookup_function(&name) {
                Some(info) if !info.has_body => info,
                _ => continue,
            };
            if self.module.externs.iter().any(|e| e.name == name) {
                continue;
            }
            self.module.externs.push(ir::ExternFunction {
                name,
                param_types: info.param_types.iter().map(|t| lower_type(*t)).collect(),
                return_type: lower_type(info.return_type),
            });
        }

        // A file may both `extern`-declare and define the same function
        // (the declaration makes mutual recursion parse in one pass); the
        // definition wins in the output.
        let defined: Vec<String> = self.module.functions.iter().map(|f| f.name.clone()).collect();
        self.module.externs.retain(|e| !defined.contains(&e.name));

        debug!(
            "emitted module: {} declares, {} globals, {} functions",
            self.module.externs.len(),
            self.module.globals.len(),
            self.module.functions.len()
        );
        Ok(())
    }

    fn emit_extern(&mut self, ext: &ExternDecl) -> Result<(), CompileError> {
        self.scopes.declare_function(
            &ext.name,
            FunctionInfo {
                param_types: ext.params.iter().map(|p| p.ty).collect(),
                return_type: ext.return_type,
                decl_loc: ext.loc,
                has_body: false,
            },
        )?;
        self.module.externs.push(ir::ExternFunction {
            name: ext.name.clone(),
            param_types: ext.params.iter().map(|p| lower_type(p.ty)).collect(),
            return_type: lower_type(ext.return_type),
        });
        Ok(())
    }

    fn emit_function(&mut self, f: &Function) -> Result<(), CompileError> {
        // Recorded before the body so the function can call itself, and so
        // mutual recursion resolves through an earlier prototype.
        self.scopes.declare_function(
            &f.name,
            FunctionInfo {
                param_types: f.params.iter().map(|p| p.ty).collect(),
                return_type: f.return_type,
                decl_loc: f.loc,
                has_body: f.body.is_some(),
            },
        )?;

        let body = match &f.body {
            Some(body) => body,
            None => {
                self.prototypes.push(f.name.clone());
                return Ok(());
            }
        };

        debug!("emitting function '{}'", f.name);
        self.current_return = f.return_type;
        self.current_name = f.name.clone();

        let params: Vec<Parameter> = f
            .params
            .iter()
            .map(|p| Parameter {
                name: p.name.clone(),
                ty: lower_type(p.ty),
            })
            .collect();
        let mut builder = FunctionBuilder::new(&f.name, params, lower_type(f.return_type));

        self.scopes.push_scope();
        let result = self.emit_function_body(f, body, &mut builder);
        self.scopes.pop_scope();
        result?;

        self.module.functions.push(builder.finish());
        Ok(())
    }

    /// Spill parameters to stack slots, then emit the body block.
    fn emit_function_body(
        &mut self,
        f: &Function,
        body: &Block,
        builder: &mut FunctionBuilder,
    ) -> Result<(), CompileError> {
        for (i, param) in f.params.iter().enumerate() {
            let slot = builder.fresh(ir::Type::ptr_to(lower_type(param.ty)));
            builder.push(Instruction::Alloca {
                result: slot.clone(),
                ty: lower_type(param.ty),
            });
            builder.push(Instruction::Store {
                value: ir::Value::Reg(builder.param_reg(i)),
                ptr: ir::Value::Reg(slot.clone()),
            });
            self.scopes.declare_local(
                &param.name,
                VariableInfo {
                    slot: ir::Value::Reg(slot),
                    ty: param.ty,
                    is_global: false,
                    decl_loc: param.loc,
                },
            )?;
        }
        self.emit_block(body, builder)
    }

    // ===== Statements =====

    fn emit_block(&mut self, block: &Block, builder: &mut FunctionBuilder) -> Result<(), CompileError> {
        self.scopes.push_scope();
        let result = self.emit_block_inner(block, builder);
        self.scopes.pop_scope();
        result
    }

    fn emit_block_inner(
        &mut self,
        block: &Block,
        builder: &mut FunctionBuilder,
    ) -> Result<(), CompileError> {
        for decl in &block.decls {
            let slot = builder.fresh(ir::Type::ptr_to(lower_type(decl.ty)));
            builder.push(Instruction::Alloca {
                result: slot.clone(),
                ty: lower_type(decl.ty),
            });
            self.scopes.declare_local(
                &decl.name,
                VariableInfo {
                    slot: ir::Value::Reg(slot),
                    ty: decl.ty,
                    is_global: false,
                    decl_loc: decl.loc,
                },
            )?;
        }
        for stmt in &block.stmts {
            self.emit_stmt(stmt, builder)?;
        }
        Ok(())
    }

    fn emit_stmt(&mut self, stmt: &Stmt, builder: &mut FunctionBuilder) -> Result<(), CompileError> {
        match stmt {
            Stmt::Expr { expr, .. } => {
                if let Some(e) = expr {
                    self.emit_expr(e, builder)?;
                }
                Ok(())
            }
            Stmt::Block(block) => self.emit_block(block, builder),
            Stmt::If {
                cond,
                then_block,
                else_block,
                ..
            } => {
                let cond_val = self.emit_condition(cond, builder)?;

                let then_label = builder.new_block("if.then");
                let else_label = else_block.as_ref().map(|_| builder.new_block("if.else"));
                let end_label = builder.new_block("if.end");
                let false_target = else_label.unwrap_or_else(|| end_label.clone());

                builder.terminate(Terminator::CondBr {
                    cond: cond_val,
                    true_label: then_label.clone(),
                    false_label: false_target.clone(),
                });

                builder.position_at(&then_label);
                self.emit_block(then_block, builder)?;
                builder.terminate(Terminator::Br(end_label.clone()));

                if let Some(else_b) = else_block {
                    builder.position_at(&false_target);
                    self.emit_block(else_b, builder)?;
                    builder.terminate(Terminator::Br(end_label.clone()));
                }

                builder.position_at(&end_label);
                Ok(())
            }
            Stmt::While { cond, body, .. } => {
                let cond_label = builder.new_block("while.cond");
                let body_label = builder.new_block("while.body");
                let end_label = builder.new_block("while.end");

                builder.terminate(Terminator::Br(cond_label.clone()));

                builder.position_at(&cond_label);
                let cond_val = self.emit_condition(cond, builder)?;
                builder.terminate(Terminator::CondBr {
                    cond: cond_val,
                    true_label: body_label.clone(),
                    false_label: end_label.clone(),
                });

                builder.position_at(&body_label);
                self.emit_stmt(body, builder)?;
                builder.terminate(Terminator::Br(cond_label));

                builder.position_at(&end_label);
                Ok(())
            }
            Stmt::Return { value, loc } => self.emit_return(value.as_ref(), *loc, builder),
        }
    }

    fn emit_return(
        &mut self,
        value: Option<&Expr>,
        loc: SourceLocation,
        builder: &mut FunctionBuilder,
    ) -> Result<(), CompileError> {
        match (self.current_return, value) {
            (Type::Void, None) => {
                builder.terminate(Terminator::Ret(None));
                Ok(())
            }
            (Type::Void, Some(v)) => Err(CompileError::new(
                format!(
                    "void function '{}' should not return a value",
                    self.current_name
                ),
                v.location(),
            )),
            (_, None) => Err(CompileError::new(
                format!(
                    "non-void function '{}' should return a value",
                    self.current_name
                ),
                loc,
            )),
            (ret_ty, Some(v)) => {
                let (val, ty) = self.emit_expr(v, builder)?;
                let val = self.convert(
                    val,
                    ty,
                    ret_ty,
                    ConversionContext::Value,
                    v.location(),
                    builder,
                )?;
                builder.terminate(Terminator::Ret(Some(val)));
                Ok(())
            }
        }
    }

    // ===== Expressions =====

    /// Emit an expression and its MiniC type. The value is in value
    /// position; truthiness contexts go through [`Codegen::emit_condition`].
    fn emit_expr(
        &mut self,
        expr: &Expr,
        builder: &mut FunctionBuilder,
    ) -> Result<(ir::Value, Type), CompileError> {
        match expr {
            Expr::IntLit(n, _) => Ok((ir::Value::Const(Constant::Int(*n)), Type::Int)),
            Expr::FloatLit(x, _) => Ok((ir::Value::Const(Constant::Float(*x)), Type::Float)),
            Expr::BoolLit(b, _) => Ok((ir::Value::Const(Constant::Bool(*b)), Type::Bool)),

            Expr::Variable { name, loc } => {
                let info = self.scopes.lookup(name).ok_or_else(|| {
                    CompileError::new(
                        format!("use of undeclared identifier '{}'", name),
                        *loc,
                    )
                })?;
                let ty = info.ty;
                let slot = info.slot.clone();
                let result = builder.fresh(lower_type(ty));
                builder.push(Instruction::Load {
                    result: result.clone(),
                    ptr: slot,
                });
                Ok((ir::Value::Reg(result), ty))
            }

            Expr::Assign { name, value, loc } => {
                let info = self.scopes.lookup(name).ok_or_else(|| {
                    CompileError::new(
                        format!("use of undeclared identifier '{}'", name),
                        *loc,
                    )
                })?;
                let var_ty = info.ty;
                let slot = info.slot.clone();
                let (val, ty) = self.emit_expr(value, builder)?;
                let val = self.convert(
                    val,
                    ty,
                    var_ty,
                    ConversionContext::Value,
                    value.location(),
                    builder,
                )?;
                builder.push(Instruction::Store {
                    value: val.clone(),
                    ptr: slot,
                });
                // An assignment is an expression; it yields the stored value
                Ok((val, var_ty))
            }

            Expr::Unary { op, operand, loc } => match op {
                UnOp::Not => {
                    // `!x` is a truthiness test on x followed by complement
                    let val = self.emit_condition(operand, builder)?;
                    let result = builder.fresh(ir::Type::Bool);
                    builder.push(Instruction::Binary {
                        result: result.clone(),
                        op: BinaryOp::Xor,
                        left: val,
                        right: ir::Value::Const(Constant::Bool(true)),
                    });
                    Ok((ir::Value::Reg(result), Type::Bool))
                }
                UnOp::Neg => {
                    let (val, ty) = self.emit_expr(operand, builder)?;
                    if ty == Type::Void {
                        return Err(CompileError::new(
                            "invalid argument type 'void' to unary expression",
                            *loc,
                        ));
                    }
                    // Negation is numeric; a bool operand widens to int
                    let (val, ty) = if ty == Type::Bool {
                        (
                            self.convert(
                                val,
                                Type::Bool,
                                Type::Int,
                                ConversionContext::Value,
                                *loc,
                                builder,
                            )?,
                            Type::Int,
                        )
                    } else {
                        (val, ty)
                    };
                    let (op, zero) = match ty {
                        Type::Float => (BinaryOp::FSub, Constant::Float(0.0)),
                        _ => (BinaryOp::Sub, Constant::Int(0)),
                    };
                    let result = builder.fresh(lower_type(ty));
                    builder.push(Instruction::Binary {
                        result: result.clone(),
                        op,
                        left: ir::Value::Const(zero),
                        right: val,
                    });
                    Ok((ir::Value::Reg(result), ty))
                }
            },

            Expr::Binary { op, lhs, rhs, loc } => match op {
                BinOp::And | BinOp::Or => self.emit_short_circuit(*op, lhs, rhs, builder),
                BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                    self.emit_arithmetic(*op, lhs, rhs, *loc, builder)
                }
                _ => self.emit_comparison(*op, lhs, rhs, *loc, builder),
            },

            Expr::Call { name, args, loc } => self.emit_call(name, args, *loc, builder),
        }
    }

    /// Emit an expression in conditional context: the result is an i1.
    fn emit_condition(
        &mut self,
        expr: &Expr,
        builder: &mut FunctionBuilder,
    ) -> Result<ir::Value, CompileError> {
        let (val, ty) = self.emit_expr(expr, builder)?;
        self.convert(
            val,
            ty,
            Type::Bool,
            ConversionContext::Condition,
            expr.location(),
            builder,
        )
    }

    /// `&&` / `||` as control flow: evaluate the left side, branch, and
    /// merge with a phi of the short-circuit constant and the right side.
    fn emit_short_circuit(
        &mut self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
        builder: &mut FunctionBuilder,
    ) -> Result<(ir::Value, Type), CompileError> {
        let lhs_val = self.emit_condition(lhs, builder)?;
        let lhs_label = builder.current_label();

        let (hint, short_const) = match op {
            BinOp::And => ("land", false),
            _ => ("lor", true),
        };
        let rhs_label = builder.new_block(&format!("{}.rhs", hint));
        let end_label = builder.new_block(&format!("{}.end", hint));

        // && falls through to the right side on true, || on false
        let (true_label, false_label) = match op {
            BinOp::And => (rhs_label.clone(), end_label.clone()),
            _ => (end_label.clone(), rhs_label.clone()),
        };
        builder.terminate(Terminator::CondBr {
            cond: lhs_val,
            true_label,
            false_label,
        });

        builder.position_at(&rhs_label);
        let rhs_val = self.emit_condition(rhs, builder)?;
        // The right side may itself have branched; the phi edge comes from
        // whatever block we ended up in.
        let rhs_end = builder.current_label();
        builder.terminate(Terminator::Br(end_label.clone()));

        builder.position_at(&end_label);
        let result = builder.fresh(ir::Type::Bool);
        builder.push(Instruction::Phi {
            result: result.clone(),
            incoming: vec![
                (ir::Value::Const(Constant::Bool(short_const)), lhs_label),
                (rhs_val, rhs_end),
            ],
        });
        Ok((ir::Value::Reg(result), Type::Bool))
    }

    fn emit_arithmetic(
        &mut self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
        loc: SourceLocation,
        builder: &mut FunctionBuilder,
    ) -> Result<(ir::Value, Type), CompileError> {
        let (lv, lt) = self.emit_expr(lhs, builder)?;
        let (rv, rt) = self.emit_expr(rhs, builder)?;
        let common = promote(lt, rt, loc)?;

        if op == BinOp::Mod && common == Type::Float {
            return Err(CompileError::new(
                format!("invalid operands to binary expression ('{}' and '{}')", lt, rt),
                loc,
            ));
        }

        let lv = self.convert(lv, lt, common, ConversionContext::Value, lhs.location(), builder)?;
        let rv = self.convert(rv, rt, common, ConversionContext::Value, rhs.location(), builder)?;

        let ir_op = match (op, common == Type::Float) {
            (BinOp::Add, false) => BinaryOp::Add,
            (BinOp::Sub, false) => BinaryOp::Sub,
            (BinOp::Mul, false) => BinaryOp::Mul,
            (BinOp::Div, false) => BinaryOp::SDiv,
            (BinOp::Mod, false) => BinaryOp::SRem,
            (BinOp::Add, true) => BinaryOp::FAdd,
            (BinOp::Sub, true) => BinaryOp::FSub,
            (BinOp::Mul, true) => BinaryOp::FMul,
            _ => BinaryOp::FDiv,
        };
        let result = builder.fresh(lower_type(common));
        builder.push(Instruction::Binary {
            result: result.clone(),
            op: ir_op,
            left: lv,
            right: rv,
        });
        Ok((ir::Value::Reg(result), common))
    }

    fn emit_comparison(
        &mut self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
        loc: SourceLocation,
        builder: &mut FunctionBuilder,
    ) -> Result<(ir::Value, Type), CompileError> {
        let (lv, lt) = self.emit_expr(lhs, builder)?;
        let (rv, rt) = self.emit_expr(rhs, builder)?;
        let common = promote(lt, rt, loc)?;

        let lv = self.convert(lv, lt, common, ConversionContext::Value, lhs.location(), builder)?;
        let rv = self.convert(rv, rt, common, ConversionContext::Value, rhs.location(), builder)?;

        let pred = match op {
            BinOp::Eq => Predicate::Eq,
            BinOp::Ne => Predicate::Ne,
            BinOp::Lt => Predicate::Lt,
            BinOp::Le => Predicate::Le,
            BinOp::Gt => Predicate::Gt,
            _ => Predicate::Ge,
        };
        let ir_op = if common == Type::Float {
            BinaryOp::FCmp(pred)
        } else {
            BinaryOp::ICmp(pred)
        };
        let result = builder.fresh(ir::Type::Bool);
        builder.push(Instruction::Binary {
            result: result.clone(),
            op: ir_op,
            left: lv,
            right: rv,
        });
        Ok((ir::Value::Reg(result), Type::Bool))
    }

    fn emit_call(
        &mut self,
        name: &str,
        args: &[Expr],
        loc: SourceLocation,
        builder: &mut FunctionBuilder,
    ) -> Result<(ir::Value, Type), CompileError> {
        let info = self
            .scopes
            .lookup_function(name)
            .ok_or_else(|| {
                CompileError::new(format!("call to undeclared function '{}'", name), loc)
            })?
            .clone();

        let expected = info.param_types.len();
        if args.len() > expected {
            // Point at the first argument that should not be there
            return Err(CompileError::new(
                format!(
                    "too many arguments to function call, expected {}, have {}",
                    expected,
                    args.len()
                ),
                args[expected].location(),
            )
            .with_note(format!("'{}' declared here", name), info.decl_loc));
        }
        if args.len() < expected {
            return Err(CompileError::new(
                format!(
                    "too few arguments to function call, expected {}, have {}",
                    expected,
                    args.len()
                ),
                loc,
            )
            .with_note(format!("'{}' declared here", name), info.decl_loc));
        }

        let mut arg_vals = Vec::with_capacity(args.len());
        for (arg, &param_ty) in args.iter().zip(&info.param_types) {
            let (val, ty) = self.emit_expr(arg, builder)?;
            let val = self.convert(
                val,
                ty,
                param_ty,
                ConversionContext::Value,
                arg.location(),
                builder,
            )?;
            arg_vals.push(val);
        }

        let result = if info.return_type == Type::Void {
            builder.push(Instruction::Call {
                result: None,
                func: name.to_string(),
                args: arg_vals,
            });
            // A void call has no value; any attempt to use it fails in the
            // caller's conversion step.
            ir::Value::Const(Constant::Int(0))
        } else {
            let reg = builder.fresh(lower_type(info.return_type));
            builder.push(Instruction::Call {
                result: Some(reg.clone()),
                func: name.to_string(),
                args: arg_vals,
            });
            ir::Value::Reg(reg)
        };
        Ok((result, info.return_type))
    }

    /// Materialize one implicit conversion as instructions.
    fn convert(
        &mut self,
        value: ir::Value,
        from: Type,
        to: Type,
        context: ConversionContext,
        loc: SourceLocation,
        builder: &mut FunctionBuilder,
    ) -> Result<ir::Value, CompileError> {
        match implicit_conversion(from, to, context, loc)? {
            Conversion::None => Ok(value),
            Conversion::BoolToInt => Ok(self.cast(value, CastOp::ZExt, ir::Type::Int, builder)),
            Conversion::BoolToFloat => {
                let widened = self.cast(value, CastOp::ZExt, ir::Type::Int, builder);
                Ok(self.cast(widened, CastOp::SiToFp, ir::Type::Float, builder))
            }
            Conversion::IntToFloat => {
                Ok(self.cast(value, CastOp::SiToFp, ir::Type::Float, builder))
            }
            Conversion::IntToBool => {
                let result = builder.fresh(ir::Type::Bool);
                builder.push(Instruction::Binary {
                    result: result.clone(),
                    op: BinaryOp::ICmp(Predicate::Ne),
                    left: value,
                    right: ir::Value::Const(Constant::Int(0)),
                });
                Ok(ir::Value::Reg(result))
            }
            Conversion::FloatToBool => {
                let result = builder.fresh(ir::Type::Bool);
                builder.push(Instruction::Binary {
                    result: result.clone(),
                    op: BinaryOp::FCmp(Predicate::Ne),
                    left: value,
                    right: ir::Value::Const(Constant::Float(0.0)),
                });
                Ok(ir::Value::Reg(result))
            }
        }
    }

    fn cast(
        &mut self,
        value: ir::Value,
        op: CastOp,
        to: ir::Type,
        builder: &mut FunctionBuilder,
    ) -> ir::Value {
        let result = builder.fresh(to);
        builder.push(Instruction::Cast {
            result: result.clone(),
            op,
            value,
        });
        ir::Value::Reg(result)
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Codegen::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn compile_source(source: &str) -> Result<ir::Module, CompileError> {
        compile(&parse(source).unwrap())
    }

    #[test]
    fn test_undeclared_identifier() {
        let err = compile_source("int main() { return x; }").unwrap_err();
        assert_eq!(err.message, "use of undeclared identifier 'x'");
    }

    #[test]
    fn test_undeclared_function() {
        let err = compile_source("int main() { return f(); }").unwrap_err();
        assert_eq!(err.message, "call to undeclared function 'f'");
    }

    #[test]
    fn test_narrowing_assignment_rejected() {
        let err = compile_source("int main() { int x; x = 1.5; return x; }").unwrap_err();
        assert_eq!(err.message, "cannot implicitly convert 'float' to 'int'");
    }

    #[test]
    fn test_widening_assignment_allowed() {
        assert!(compile_source("int main() { float x; x = 1; x = true; return 0; }").is_ok());
    }

    #[test]
    fn test_int_condition_allowed_bool_param_not() {
        assert!(compile_source("int main() { if (3) { return 1; } return 0; }").is_ok());

        let err = compile_source(
            "int f(bool b) { return 0; } int main() { return f(3); }",
        )
        .unwrap_err();
        assert_eq!(
            err.message,
            "cannot implicitly convert 'int' to 'bool' outside a condition"
        );
    }

    #[test]
    fn test_void_return_mismatch() {
        let err = compile_source("void f() { return 1; } int main() { return 0; }").unwrap_err();
        assert_eq!(err.message, "void function 'f' should not return a value");

        let err = compile_source("int main() { return; }").unwrap_err();
        assert_eq!(err.message, "non-void function 'main' should return a value");
    }

    #[test]
    fn test_recursion_allowed() {
        assert!(compile_source(
            "int fact(int n) { if (n <= 1) { return 1; } return n * fact(n - 1); }\
             int main() { return fact(5); }"
        )
        .is_ok());
    }

    #[test]
    fn test_short_circuit_emits_phi() {
        let module = compile_source(
            "bool f(bool a, bool b) { return a && b; } int main() { return 0; }",
        )
        .unwrap();
        let text = format!("{}", module);
        assert!(text.contains("phi i1"));
        assert!(text.contains("land.rhs"));
    }

    #[test]
    fn test_scope_stack_balanced_after_success_and_failure() {
        let program = parse(
            "int main() { int a; { int a; { int a; while (a < 3) { a = a + 1; } } } return a; }",
        )
        .unwrap();
        let mut cg = Codegen::new();
        cg.emit_program(&program).unwrap();
        assert_eq!(cg.scopes().depth(), 0);
        let (pushes, pops) = cg.scopes().push_pop_counts();
        assert_eq!(pushes, pops);

        let bad = parse("int main() { { int x; x = y; } return 0; }").unwrap();
        let mut cg = Codegen::new();
        assert!(cg.emit_program(&bad).is_err());
        assert_eq!(cg.scopes().depth(), 0);
        let (pushes, pops) = cg.scopes().push_pop_counts();
        assert_eq!(pushes, pops);
    }
}
