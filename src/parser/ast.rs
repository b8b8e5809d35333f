// AST (Abstract Syntax Tree) definitions for the MiniC front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The four MiniC types. `Void` is only valid as a function return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Bool,
    Void,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical (short-circuit)
    And,
    Or,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{}", s)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Not => write!(f, "!"),
        }
    }
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub loc: SourceLocation,
}

/// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    IntLit(i32, SourceLocation),
    FloatLit(f32, SourceLocation),
    BoolLit(bool, SourceLocation),
    Variable {
        name: String,
        loc: SourceLocation,
    },
    Assign {
        name: String,
        value: Box<Expr>,
        loc: SourceLocation,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        loc: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        loc: SourceLocation,
    },
    Call {
        name: String,
        args: Vec<Expr>,
        loc: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLit(_, loc)
            | Expr::FloatLit(_, loc)
            | Expr::BoolLit(_, loc)
            | Expr::Variable { loc, .. }
            | Expr::Assign { loc, .. }
            | Expr::Binary { loc, .. }
            | Expr::Unary { loc, .. }
            | Expr::Call { loc, .. } => *loc,
        }
    }
}

/// Statements
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `expr ;` or a bare `;` (expr is `None`)
    Expr {
        expr: Option<Expr>,
        loc: SourceLocation,
    },
    Block(Block),
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
        loc: SourceLocation,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
        loc: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        loc: SourceLocation,
    },
}

impl Stmt {
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Expr { loc, .. }
            | Stmt::If { loc, .. }
            | Stmt::While { loc, .. }
            | Stmt::Return { loc, .. } => *loc,
            Stmt::Block(b) => b.loc,
        }
    }
}

/// Local variable declaration (also used for globals at the top level)
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: Type,
    pub name: String,
    pub loc: SourceLocation,
}

/// `{ local_decls stmt_list }` — declarations come before statements
#[derive(Debug, Clone)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
    pub loc: SourceLocation,
}

/// Function declaration or definition (`body` is `None` for a prototype)
#[derive(Debug, Clone)]
pub struct Function {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    pub loc: SourceLocation,
}

/// `extern type_spec IDENT ( params ) ;`
#[derive(Debug, Clone)]
pub struct ExternDecl {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Param>,
    pub loc: SourceLocation,
}

/// Top-level declaration
#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Func(Function),
}

/// Top-level program structure: extern list followed by declaration list
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub externs: Vec<ExternDecl>,
    pub decls: Vec<Decl>,
    pub loc: SourceLocation,
}

// ===== Pretty printer =====
//
// Renders the tree with box-drawing connectors.  The `is_last` flag is
// threaded through each recursive call (it is not stored on the nodes) so a
// child knows whether to draw `├─` or `└─` and whether its own subtree still
// needs a `│` rail at this depth.  Output is deterministic and used for
// golden tests.

fn write_node(out: &mut String, prefix: &str, is_last: bool, label: &str) {
    out.push_str(prefix);
    out.push_str(if is_last { "└─ " } else { "├─ " });
    out.push_str(label);
    out.push('\n');
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    let mut p = String::from(prefix);
    p.push_str(if is_last { "   " } else { "│  " });
    p
}

impl Program {
    /// Render the whole tree as an indented string
    pub fn to_tree_string(&self) -> String {
        let mut out = String::from("Program\n");
        let total = self.externs.len() + self.decls.len();
        let mut index = 0;
        for ext in &self.externs {
            index += 1;
            ext.write_tree(&mut out, "", index == total);
        }
        for decl in &self.decls {
            index += 1;
            decl.write_tree(&mut out, "", index == total);
        }
        out
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}

impl ExternDecl {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        write_node(
            out,
            prefix,
            is_last,
            &format!("ExternDef: ({}) {}", self.return_type, self.name),
        );
        let child = child_prefix(prefix, is_last);
        let n = self.params.len();
        for (i, p) in self.params.iter().enumerate() {
            write_node(
                out,
                &child,
                i + 1 == n,
                &format!("Param: ({}) {}", p.ty, p.name),
            );
        }
    }
}

impl Decl {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        match self {
            Decl::Var(v) => v.write_tree(out, prefix, is_last),
            Decl::Func(f) => f.write_tree(out, prefix, is_last),
        }
    }
}

impl VarDecl {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        write_node(
            out,
            prefix,
            is_last,
            &format!("VariableDeclaration: ({}) {}", self.ty, self.name),
        );
    }
}

impl Function {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        write_node(
            out,
            prefix,
            is_last,
            &format!("FunctionDef: ({}) {}", self.return_type, self.name),
        );
        let child = child_prefix(prefix, is_last);
        let n = self.params.len() + usize::from(self.body.is_some());
        for (i, p) in self.params.iter().enumerate() {
            write_node(
                out,
                &child,
                i + 1 == n,
                &format!("Param: ({}) {}", p.ty, p.name),
            );
        }
        if let Some(body) = &self.body {
            body.write_tree(out, &child, true);
        }
    }
}

impl Block {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        write_node(out, prefix, is_last, "BlockStmt:");
        let child = child_prefix(prefix, is_last);
        let n = self.decls.len() + self.stmts.len();
        let mut index = 0;
        for decl in &self.decls {
            index += 1;
            decl.write_tree(out, &child, index == n);
        }
        for stmt in &self.stmts {
            index += 1;
            stmt.write_tree(out, &child, index == n);
        }
    }
}

impl Stmt {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        match self {
            Stmt::Expr { expr, .. } => {
                write_node(out, prefix, is_last, "ExprStmt:");
                if let Some(e) = expr {
                    e.write_tree(out, &child_prefix(prefix, is_last), true);
                }
            }
            Stmt::Block(b) => b.write_tree(out, prefix, is_last),
            Stmt::If {
                cond,
                then_block,
                else_block,
                ..
            } => {
                write_node(out, prefix, is_last, "IfStmt:");
                let child = child_prefix(prefix, is_last);

                write_node(out, &child, false, "Condition:");
                cond.write_tree(out, &child_prefix(&child, false), true);

                let then_last = else_block.is_none();
                write_node(out, &child, then_last, "ThenBlock:");
                then_block.write_tree(out, &child_prefix(&child, then_last), true);
                if let Some(else_b) = else_block {
                    write_node(out, &child, true, "ElseBlock:");
                    else_b.write_tree(out, &child_prefix(&child, true), true);
                }
            }
            Stmt::While { cond, body, .. } => {
                write_node(out, prefix, is_last, "WhileStmt:");
                let child = child_prefix(prefix, is_last);
                write_node(out, &child, false, "Condition:");
                cond.write_tree(out, &child_prefix(&child, false), true);
                write_node(out, &child, true, "Body:");
                body.write_tree(out, &child_prefix(&child, true), true);
            }
            Stmt::Return { value, .. } => {
                write_node(out, prefix, is_last, "ReturnStmt:");
                if let Some(v) = value {
                    v.write_tree(out, &child_prefix(prefix, is_last), true);
                }
            }
        }
    }
}

impl Expr {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        match self {
            Expr::IntLit(n, _) => {
                write_node(out, prefix, is_last, &format!("IntLit: {}", n));
            }
            Expr::FloatLit(x, _) => {
                write_node(out, prefix, is_last, &format!("FloatLit: {}", x));
            }
            Expr::BoolLit(b, _) => {
                write_node(out, prefix, is_last, &format!("BoolLit: {}", b));
            }
            Expr::Variable { name, .. } => {
                write_node(out, prefix, is_last, &format!("VariableCall: {}", name));
            }
            Expr::Assign { name, value, .. } => {
                write_node(
                    out,
                    prefix,
                    is_last,
                    &format!("VariableAssignment: {}", name),
                );
                value.write_tree(out, &child_prefix(prefix, is_last), true);
            }
            Expr::Binary { op, lhs, rhs, .. } => {
                write_node(out, prefix, is_last, &format!("BinaryOperation: {}", op));
                let child = child_prefix(prefix, is_last);
                lhs.write_tree(out, &child, false);
                rhs.write_tree(out, &child, true);
            }
            Expr::Unary { op, operand, .. } => {
                write_node(out, prefix, is_last, &format!("UnaryOperation: {}", op));
                operand.write_tree(out, &child_prefix(prefix, is_last), true);
            }
            Expr::Call { name, args, .. } => {
                write_node(out, prefix, is_last, &format!("FunctionCall: {}", name));
                let child = child_prefix(prefix, is_last);
                let n = args.len();
                for (i, arg) in args.iter().enumerate() {
                    arg.write_tree(out, &child, i + 1 == n);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_binary_tree_rendering() {
        // (1 - 2) - 3, the left-associative shape
        let inner = Expr::Binary {
            op: BinOp::Sub,
            lhs: Box::new(Expr::IntLit(1, loc())),
            rhs: Box::new(Expr::IntLit(2, loc())),
            loc: loc(),
        };
        let expr = Expr::Binary {
            op: BinOp::Sub,
            lhs: Box::new(inner),
            rhs: Box::new(Expr::IntLit(3, loc())),
            loc: loc(),
        };

        let mut out = String::new();
        expr.write_tree(&mut out, "", true);
        let expected = "\
└─ BinaryOperation: -
   ├─ BinaryOperation: -
   │  ├─ IntLit: 1
   │  └─ IntLit: 2
   └─ IntLit: 3
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_program_rendering_is_deterministic() {
        let program = Program {
            externs: vec![ExternDecl {
                return_type: Type::Int,
                name: "print_int".to_string(),
                params: vec![Param {
                    name: "X".to_string(),
                    ty: Type::Int,
                    loc: loc(),
                }],
                loc: loc(),
            }],
            decls: vec![Decl::Var(VarDecl {
                ty: Type::Float,
                name: "g".to_string(),
                loc: loc(),
            })],
            loc: loc(),
        };

        let first = program.to_tree_string();
        let second = program.to_tree_string();
        assert_eq!(first, second);
        assert!(first.starts_with("Program\n"));
        assert!(first.contains("├─ ExternDef: (int) print_int"));
        assert!(first.contains("│  └─ Param: (int) X"));
        assert!(first.contains("└─ VariableDeclaration: (float) g"));
    }
}
