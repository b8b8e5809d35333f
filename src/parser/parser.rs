//! Recursive-descent parser for MiniC
//!
//! One function per nonterminal.  Nullable productions decide whether to
//! derive epsilon by checking the current token against the production's
//! FIRST set (or the FOLLOW set, for list tails); those predicates are the
//! `starts_*` / `follows_*` helpers below.
//!
//! The grammar is LL(1) except for statements beginning with an identifier,
//! where `peek_next` looks one extra token ahead for `=` to pick the
//! assignment production.  That is the only two-token lookahead in the
//! parser.
//!
//! The first structural mismatch is fatal: `expect` builds a
//! [`CompileError`] naming what was required and what was found, and the
//! error propagates out through every caller.  There is no recovery.

use super::ast::*;
use super::lexer::{Token, TokenKind};
use crate::diagnostics::CompileError;
use log::debug;

/// Parser for MiniC token streams
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    // ===== Token stream access =====

    /// Current token. The lexer always terminates the stream with `Eof`,
    /// so the fallback is only reachable on an empty stream.
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.position)
            .unwrap_or_else(|| self.tokens.last().unwrap_or(&EOF_FALLBACK))
    }

    /// One token past the current one. Used only for assignment
    /// disambiguation.
    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.position + 1)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `msg`
    fn expect(&mut self, kind: TokenKind, msg: &str) -> Result<Token, CompileError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            Err(CompileError::new(
                format!("{}, found {}", msg, found),
                found.loc,
            ))
        }
    }

    // ===== FIRST / FOLLOW predicates =====

    fn is_type_spec(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Int | TokenKind::Float | TokenKind::Bool | TokenKind::Void
        )
    }

    fn is_var_type(kind: TokenKind) -> bool {
        matches!(kind, TokenKind::Int | TokenKind::Float | TokenKind::Bool)
    }

    /// FIRST(program) = FIRST(extern_list) ∪ FIRST(decl_list)
    fn starts_program(kind: TokenKind) -> bool {
        kind == TokenKind::Extern || Self::is_type_spec(kind)
    }

    /// FIRST(stmt), used to end the local declaration list inside a block
    fn starts_stmt(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Ident
                | TokenKind::IntLit
                | TokenKind::FloatLit
                | TokenKind::BoolLit
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::LParen
                | TokenKind::Semicolon
                | TokenKind::LBrace
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return
        )
    }

    // ===== Grammar productions =====

    /// program ::= extern_list decl_list
    pub fn parse_program(&mut self) -> Result<Program, CompileError> {
        let loc = self.peek().loc;

        // A program that cannot start is reported the way the linker would
        // complain about it.
        if !Self::starts_program(self.peek().kind) {
            return Err(CompileError::new("undefined reference to 'main'", loc));
        }

        let externs = self.parse_extern_list()?;
        let decls = self.parse_decl_list()?;

        if !self.check(TokenKind::Eof) {
            let found = self.peek();
            return Err(CompileError::new(
                format!("Expected declaration, found {}", found),
                found.loc,
            ));
        }

        debug!(
            "parsed program: {} externs, {} declarations",
            externs.len(),
            decls.len()
        );

        Ok(Program {
            externs,
            decls,
            loc,
        })
    }

    /// extern_list ::= extern_decl extern_list | epsilon
    fn parse_extern_list(&mut self) -> Result<Vec<ExternDecl>, CompileError> {
        let mut externs = Vec::new();
        while self.check(TokenKind::Extern) {
            externs.push(self.parse_extern_decl()?);
        }
        Ok(externs)
    }

    /// extern_decl ::= "extern" type_spec IDENT "(" params ")" ";"
    fn parse_extern_decl(&mut self) -> Result<ExternDecl, CompileError> {
        self.expect(TokenKind::Extern, "Expected 'extern'")?;
        let return_type = self.parse_type_spec()?;
        let name_tok = self.expect(TokenKind::Ident, "Expected function name")?;
        self.expect(TokenKind::LParen, "Expected '(' after function name")?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen, "Expected ')' after parameters")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after extern declaration")?;

        Ok(ExternDecl {
            return_type,
            name: name_tok.lexeme,
            params,
            loc: name_tok.loc,
        })
    }

    /// decl_list ::= decl decl_list | epsilon (FOLLOW = EOF)
    fn parse_decl_list(&mut self) -> Result<Vec<Decl>, CompileError> {
        let mut decls = Vec::new();
        while Self::is_type_spec(self.peek().kind) {
            decls.push(self.parse_decl()?);
        }
        Ok(decls)
    }

    /// decl ::= var_type IDENT ";"
    ///        | type_spec IDENT "(" params ")" (block | ";")
    ///
    /// Both alternatives share the `type IDENT` prefix; the token after the
    /// name picks the production. `void` can only introduce a function.
    fn parse_decl(&mut self) -> Result<Decl, CompileError> {
        let ty = self.parse_type_spec()?;
        let name_tok = self.expect(TokenKind::Ident, "Expected identifier in declaration")?;

        if self.check(TokenKind::Semicolon) {
            if ty == Type::Void {
                return Err(CompileError::new(
                    format!("Variable '{}' may not have void type", name_tok.lexeme),
                    name_tok.loc,
                ));
            }
            self.advance();
            return Ok(Decl::Var(VarDecl {
                ty,
                name: name_tok.lexeme,
                loc: name_tok.loc,
            }));
        }

        self.expect(TokenKind::LParen, "Expected ';' or '(' after identifier")?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen, "Expected ')' after parameters")?;

        let body = if self.match_kind(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_block()?)
        };

        Ok(Decl::Func(Function {
            return_type: ty,
            name: name_tok.lexeme,
            params,
            body,
            loc: name_tok.loc,
        }))
    }

    fn parse_type_spec(&mut self) -> Result<Type, CompileError> {
        let token = self.peek();
        let ty = match token.kind {
            TokenKind::Int => Type::Int,
            TokenKind::Float => Type::Float,
            TokenKind::Bool => Type::Bool,
            TokenKind::Void => Type::Void,
            _ => {
                return Err(CompileError::new(
                    format!("Expected type specifier, found {}", token),
                    token.loc,
                ))
            }
        };
        self.advance();
        Ok(ty)
    }

    /// params ::= param_list | "void" | epsilon
    ///
    /// A lone `(void)` means no parameters.
    fn parse_params(&mut self) -> Result<Vec<Param>, CompileError> {
        if self.check(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        if self.check(TokenKind::Void) && self.peek_next().map(|t| t.kind) == Some(TokenKind::RParen)
        {
            self.advance();
            return Ok(Vec::new());
        }

        let mut params = vec![self.parse_param()?];
        while self.match_kind(TokenKind::Comma) {
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    /// param ::= var_type IDENT
    fn parse_param(&mut self) -> Result<Param, CompileError> {
        let token = self.peek().clone();
        if !Self::is_var_type(token.kind) {
            return Err(CompileError::new(
                format!("Expected parameter type, found {}", token),
                token.loc,
            ));
        }
        let ty = self.parse_type_spec()?;
        let name_tok = self.expect(TokenKind::Ident, "Expected parameter name")?;
        Ok(Param {
            name: name_tok.lexeme,
            ty,
            loc: name_tok.loc,
        })
    }

    /// block ::= "{" local_decls stmt_list "}"
    fn parse_block(&mut self) -> Result<Block, CompileError> {
        let open = self.expect(TokenKind::LBrace, "Expected '{'")?;

        // local_decls derives epsilon when the current token is in
        // FOLLOW(local_decls) = FIRST(stmt_list) ∪ { '}' }
        let mut decls = Vec::new();
        while Self::is_var_type(self.peek().kind) {
            let ty = self.parse_type_spec()?;
            let name_tok = self.expect(TokenKind::Ident, "Expected identifier in declaration")?;
            self.expect(TokenKind::Semicolon, "Expected ';' after declaration")?;
            decls.push(VarDecl {
                ty,
                name: name_tok.lexeme,
                loc: name_tok.loc,
            });
        }

        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if !Self::starts_stmt(self.peek().kind) {
                let found = self.peek();
                return Err(CompileError::new(
                    format!("Expected statement or '}}', found {}", found),
                    found.loc,
                ));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "Expected '}'")?;

        Ok(Block {
            decls,
            stmts,
            loc: open.loc,
        })
    }

    /// stmt ::= expr_stmt | block | if_stmt | while_stmt | return_stmt
    fn parse_stmt(&mut self) -> Result<Stmt, CompileError> {
        match self.peek().kind {
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// expr_stmt ::= expr ";" | ";"
    fn parse_expr_stmt(&mut self) -> Result<Stmt, CompileError> {
        let loc = self.peek().loc;
        if self.match_kind(TokenKind::Semicolon) {
            return Ok(Stmt::Expr { expr: None, loc });
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after expression")?;
        Ok(Stmt::Expr {
            expr: Some(expr),
            loc,
        })
    }

    /// if_stmt ::= "if" "(" expr ")" block ("else" block)?
    ///
    /// Both branches require braces.
    fn parse_if_stmt(&mut self) -> Result<Stmt, CompileError> {
        let if_tok = self.expect(TokenKind::If, "Expected 'if'")?;
        self.expect(TokenKind::LParen, "Expected '(' after 'if'")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition")?;
        let then_block = self.parse_block()?;
        let else_block = if self.match_kind(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
            loc: if_tok.loc,
        })
    }

    /// while_stmt ::= "while" "(" expr ")" stmt
    ///
    /// Unlike `if`, the body is any statement, braced or not.
    fn parse_while_stmt(&mut self) -> Result<Stmt, CompileError> {
        let while_tok = self.expect(TokenKind::While, "Expected 'while'")?;
        self.expect(TokenKind::LParen, "Expected '(' after 'while'")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition")?;
        let body = self.parse_stmt()?;
        Ok(Stmt::While {
            cond,
            body: Box::new(body),
            loc: while_tok.loc,
        })
    }

    /// return_stmt ::= "return" ";" | "return" expr ";"
    fn parse_return_stmt(&mut self) -> Result<Stmt, CompileError> {
        let ret_tok = self.expect(TokenKind::Return, "Expected 'return'")?;
        if self.match_kind(TokenKind::Semicolon) {
            return Ok(Stmt::Return {
                value: None,
                loc: ret_tok.loc,
            });
        }
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after return value")?;
        Ok(Stmt::Return {
            value: Some(value),
            loc: ret_tok.loc,
        })
    }

    // ===== Expressions =====
    //
    // One function per precedence level, lowest first.  Each level loops on
    // its own operators, so chains associate to the left.

    /// expr ::= IDENT "=" expr | logic_or
    pub fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        if self.check(TokenKind::Ident)
            && self.peek_next().map(|t| t.kind) == Some(TokenKind::Assign)
        {
            let name_tok = self.advance();
            self.advance(); // '='
            let value = self.parse_expr()?;
            return Ok(Expr::Assign {
                name: name_tok.lexeme,
                value: Box::new(value),
                loc: name_tok.loc,
            });
        }
        self.parse_logic_or()
    }

    /// logic_or ::= logic_and ("||" logic_and)*
    fn parse_logic_or(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_logic_and()?;
        while self.check(TokenKind::OrOr) {
            let op_tok = self.advance();
            let rhs = self.parse_logic_and()?;
            expr = Expr::Binary {
                op: BinOp::Or,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                loc: op_tok.loc,
            };
        }
        Ok(expr)
    }

    /// logic_and ::= equality ("&&" equality)*
    fn parse_logic_and(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_equality()?;
        while self.check(TokenKind::AndAnd) {
            let op_tok = self.advance();
            let rhs = self.parse_equality()?;
            expr = Expr::Binary {
                op: BinOp::And,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                loc: op_tok.loc,
            };
        }
        Ok(expr)
    }

    /// equality ::= relational (("==" | "!=") relational)*
    fn parse_equality(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_relational()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            let op_tok = self.advance();
            let rhs = self.parse_relational()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                loc: op_tok.loc,
            };
        }
        Ok(expr)
    }

    /// relational ::= additive (("<" | "<=" | ">" | ">=") additive)*
    fn parse_relational(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            let op_tok = self.advance();
            let rhs = self.parse_additive()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                loc: op_tok.loc,
            };
        }
        Ok(expr)
    }

    /// additive ::= multiply (("+" | "-") multiply)*
    fn parse_additive(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_multiply()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let op_tok = self.advance();
            let rhs = self.parse_multiply()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                loc: op_tok.loc,
            };
        }
        Ok(expr)
    }

    /// multiply ::= unary (("*" | "/" | "%") unary)*
    fn parse_multiply(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let op_tok = self.advance();
            let rhs = self.parse_unary()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                loc: op_tok.loc,
            };
        }
        Ok(expr)
    }

    /// unary ::= ("-" | "!") unary | primary
    fn parse_unary(&mut self) -> Result<Expr, CompileError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            _ => return self.parse_primary(),
        };
        let op_tok = self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            loc: op_tok.loc,
        })
    }

    /// primary ::= "(" expr ")" | IDENT | IDENT "(" arg_list ")" | literal
    fn parse_primary(&mut self) -> Result<Expr, CompileError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            TokenKind::IntLit => {
                self.advance();
                let value = token.lexeme.parse::<i32>().map_err(|_| {
                    CompileError::new(
                        format!("Invalid integer literal: {}", token.lexeme),
                        token.loc,
                    )
                })?;
                Ok(Expr::IntLit(value, token.loc))
            }
            TokenKind::FloatLit => {
                self.advance();
                let value = token.lexeme.parse::<f32>().map_err(|_| {
                    CompileError::new(
                        format!("Invalid float literal: {}", token.lexeme),
                        token.loc,
                    )
                })?;
                Ok(Expr::FloatLit(value, token.loc))
            }
            TokenKind::BoolLit => {
                self.advance();
                Ok(Expr::BoolLit(token.lexeme == "true", token.loc))
            }
            TokenKind::Ident => {
                self.advance();
                if self.match_kind(TokenKind::LParen) {
                    let args = self.parse_arg_list()?;
                    self.expect(TokenKind::RParen, "Expected ')' after arguments")?;
                    Ok(Expr::Call {
                        name: token.lexeme,
                        args,
                        loc: token.loc,
                    })
                } else {
                    Ok(Expr::Variable {
                        name: token.lexeme,
                        loc: token.loc,
                    })
                }
            }
            _ => Err(CompileError::new(
                format!("Expected expression, found {}", token),
                token.loc,
            )),
        }
    }

    /// arg_list ::= expr ("," expr)* | epsilon
    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, CompileError> {
        if self.check(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut args = vec![self.parse_expr()?];
        while self.match_kind(TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        Ok(args)
    }
}

static EOF_FALLBACK: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    loc: SourceLocation { line: 0, column: 0 },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_parse_minimal_program() {
        let program = parse("int main() { return 0; }").unwrap();
        assert!(program.externs.is_empty());
        assert_eq!(program.decls.len(), 1);
        match &program.decls[0] {
            Decl::Func(f) => {
                assert_eq!(f.name, "main");
                assert_eq!(f.return_type, Type::Int);
                assert!(f.params.is_empty());
                assert!(f.body.is_some());
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let program = parse("int main() { return 1 - 2 - 3; }").unwrap();
        let tree = program.to_tree_string();
        // (1 - 2) - 3: the nested operation is the *left* child
        let expected = "\
Program
└─ FunctionDef: (int) main
   └─ BlockStmt:
      └─ ReturnStmt:
         └─ BinaryOperation: -
            ├─ BinaryOperation: -
            │  ├─ IntLit: 1
            │  └─ IntLit: 2
            └─ IntLit: 3
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_assignment_right_associative() {
        let program = parse("int main() { int a; int b; a = b = 3; return a; }").unwrap();
        let tree = program.to_tree_string();
        assert!(tree.contains("VariableAssignment: a"));
        assert!(tree.contains("VariableAssignment: b"));
        // b's assignment must sit under a's
        let a_pos = tree.find("VariableAssignment: a").unwrap();
        let b_pos = tree.find("VariableAssignment: b").unwrap();
        assert!(a_pos < b_pos);
    }

    #[test]
    fn test_assignment_vs_equality_disambiguation() {
        let program = parse("int main() { int a; a = 1; a == 1; return a; }").unwrap();
        let tree = program.to_tree_string();
        assert!(tree.contains("VariableAssignment: a"));
        assert!(tree.contains("BinaryOperation: =="));
    }

    #[test]
    fn test_void_params_collapse() {
        let program = parse("int f(void) { return 1; } int main() { return f(); }").unwrap();
        match &program.decls[0] {
            Decl::Func(f) => assert!(f.params.is_empty()),
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_void_parameter_name_rejected() {
        let err = parse("int f(void x) { return 1; }").unwrap_err();
        assert!(err.message.contains("Expected parameter type"));
    }

    #[test]
    fn test_extern_declaration() {
        let program = parse("extern int print_int(int X); int main() { return 0; }").unwrap();
        assert_eq!(program.externs.len(), 1);
        assert_eq!(program.externs[0].name, "print_int");
        assert_eq!(program.externs[0].params.len(), 1);
        assert_eq!(program.externs[0].params[0].name, "X");
    }

    #[test]
    fn test_empty_input_reports_missing_main() {
        let err = parse("").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'main'");
    }

    #[test]
    fn test_garbage_start_reports_missing_main() {
        let err = parse("42;").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'main'");
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("int main() { return 0; } }").unwrap_err();
        assert!(err.message.starts_with("Expected declaration"));
        assert!(err.message.contains("'}'"));
    }

    #[test]
    fn test_if_requires_braces() {
        let err = parse("int main() { if (1) return 0; return 1; }").unwrap_err();
        assert!(err.message.contains("Expected '{'"));
    }

    #[test]
    fn test_while_body_may_be_unbraced() {
        let program = parse("int main() { int i; i = 0; while (i < 3) i = i + 1; return i; }");
        assert!(program.is_ok());
    }

    #[test]
    fn test_local_decls_must_precede_statements() {
        let err = parse("int main() { int a; a = 1; int b; return a; }").unwrap_err();
        // `int` after a statement is not in FIRST(stmt)
        assert!(err.message.contains("'int'"));
    }

    #[test]
    fn test_void_variable_rejected() {
        let err = parse("void x; int main() { return 0; }").unwrap_err();
        assert!(err.message.contains("may not have void type"));
    }

    #[test]
    fn test_missing_semicolon_location() {
        let err = parse("int main() { return 0 }").unwrap_err();
        assert!(err.message.contains("Expected ';'"));
        assert!(err.message.contains("'}'"));
        assert_eq!(err.location.line, 1);
        assert_eq!(err.location.column, 23);
    }

    #[test]
    fn test_function_prototype_then_definition() {
        let program = parse("int f(int x); int f(int x) { return x; } int main() { return f(1); }")
            .unwrap();
        assert_eq!(program.decls.len(), 3);
        match &program.decls[0] {
            Decl::Func(f) => assert!(f.body.is_none()),
            other => panic!("expected prototype, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        let program = parse("int main() { return 1 + 2 * 3; }").unwrap();
        let tree = program.to_tree_string();
        let add = tree.find("BinaryOperation: +").unwrap();
        let mul = tree.find("BinaryOperation: *").unwrap();
        // * nests under +
        assert!(add < mul);
    }

    #[test]
    fn test_unary_chain() {
        let program = parse("int main() { bool b; b = !!true; return 0; }").unwrap();
        let tree = program.to_tree_string();
        assert_eq!(tree.matches("UnaryOperation: !").count(), 2);
    }
}
