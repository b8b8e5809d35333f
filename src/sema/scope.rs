//! Symbol tables: block scopes, globals, functions
//!
//! Variables live in a stack of block scopes over one global map; an inner
//! declaration silently shadows an outer one, but redeclaring a name in the
//! *same* scope is an error.  Functions live in a single flat map keyed by
//! name (no overloading); a function may be declared any number of times
//! with the same signature but defined only once.
//!
//! The driver pushes a scope for every function and every block, and pops it
//! before propagating any error, so the stack is balanced even on the
//! failure path.  `pushes`/`pops` exist so tests can check that.

use crate::diagnostics::CompileError;
use crate::ir;
use crate::parser::ast::{SourceLocation, Type};
use rustc_hash::FxHashMap;

/// Where a variable lives and what it is
#[derive(Debug, Clone)]
pub struct VariableInfo {
    /// Pointer to the variable's storage (alloca register or global)
    pub slot: ir::Value,
    pub ty: Type,
    pub is_global: bool,
    pub decl_loc: SourceLocation,
}

/// Everything recorded about a function name
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub param_types: Vec<Type>,
    pub return_type: Type,
    pub decl_loc: SourceLocation,
    pub has_body: bool,
}

impl FunctionInfo {
    fn same_signature(&self, other: &FunctionInfo) -> bool {
        self.param_types == other.param_types && self.return_type == other.return_type
    }
}

/// The complete symbol environment for one compilation
#[derive(Debug, Default)]
pub struct ScopeStack {
    globals: FxHashMap<String, VariableInfo>,
    scopes: Vec<FxHashMap<String, VariableInfo>>,
    functions: FxHashMap<String, FunctionInfo>,
    pushes: usize,
    pops: usize,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
        self.pushes += 1;
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        self.pops += 1;
    }

    /// Number of block scopes currently open
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Total pushes and pops so far, for balance checks
    pub fn push_pop_counts(&self) -> (usize, usize) {
        (self.pushes, self.pops)
    }

    /// Declare a variable in the innermost scope. Shadowing an outer scope
    /// is fine; a duplicate in the same scope is fatal.
    pub fn declare_local(&mut self, name: &str, info: VariableInfo) -> Result<(), CompileError> {
        let scope = match self.scopes.last_mut() {
            Some(s) => s,
            None => {
                return Err(CompileError::new(
                    format!("Variable '{}' declared outside any scope", name),
                    info.decl_loc,
                ))
            }
        };
        if let Some(prev) = scope.get(name) {
            return Err(CompileError::new(
                format!("redefinition of '{}'", name),
                info.decl_loc,
            )
            .with_note("previous declaration is here", prev.decl_loc));
        }
        scope.insert(name.to_string(), info);
        Ok(())
    }

    pub fn declare_global(&mut self, name: &str, info: VariableInfo) -> Result<(), CompileError> {
        if let Some(prev) = self.globals.get(name) {
            return Err(CompileError::new(
                format!("redefinition of '{}'", name),
                info.decl_loc,
            )
            .with_note("previous declaration is here", prev.decl_loc));
        }
        self.globals.insert(name.to_string(), info);
        Ok(())
    }

    /// Resolve a variable: innermost scope outward, then globals.
    pub fn lookup(&self, name: &str) -> Option<&VariableInfo> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.globals.get(name))
    }

    /// Record a function declaration or definition.
    ///
    /// Repeated declarations must agree on the signature; at most one
    /// occurrence may carry a body. The entry is recorded before the body
    /// is processed, which is what makes recursion (and mutual recursion,
    /// via prototypes) resolvable.
    pub fn declare_function(&mut self, name: &str, info: FunctionInfo) -> Result<(), CompileError> {
        match self.functions.get_mut(name) {
            None => {
                self.functions.insert(name.to_string(), info);
                Ok(())
            }
            Some(prev) => {
                if !prev.same_signature(&info) {
                    return Err(CompileError::new(
                        format!("conflicting types for '{}'", name),
                        info.decl_loc,
                    )
                    .with_note("previous declaration is here", prev.decl_loc));
                }
                if prev.has_body && info.has_body {
                    return Err(CompileError::new(
                        format!("redefinition of '{}'", name),
                        info.decl_loc,
                    )
                    .with_note("previous definition is here", prev.decl_loc));
                }
                if info.has_body {
                    prev.has_body = true;
                    prev.decl_loc = info.decl_loc;
                }
                Ok(())
            }
        }
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.get(name)
    }
}
