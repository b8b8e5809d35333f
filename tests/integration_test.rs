// End-to-end tests for the MiniC compiler pipeline

use minicc::diagnostics::Reporter;
use minicc::parser::parse;
use minicc::sema;

fn compile(source: &str) -> Result<minicc::ir::Module, minicc::diagnostics::CompileError> {
    let program = parse(source)?;
    sema::compile(&program)
}

#[test]
fn test_full_pipeline_produces_ir() {
    let source = r#"
        extern int print_int(int X);

        int add(int a, int b) {
            return a + b;
        }

        int main() {
            print_int(add(3, 4));
            return 0;
        }
    "#;

    let module = compile(source).expect("compilation failed");
    let text = format!("{}", module);
    assert!(text.contains("declare i32 @print_int(i32)"));
    assert!(text.contains("define i32 @add(i32 %0, i32 %1)"));
    assert!(text.contains("define i32 @main()"));
}

#[test]
fn test_tree_output_is_deterministic() {
    let source = r#"
        extern int print_int(int X);
        float g;
        int main() {
            int x;
            x = 1 + 2 * 3;
            if (x > 5) {
                print_int(x);
            } else {
                print_int(0);
            }
            return x;
        }
    "#;

    let first = parse(source).expect("parse failed").to_tree_string();
    let second = parse(source).expect("parse failed").to_tree_string();
    assert_eq!(first, second);
    assert!(first.starts_with("Program\n"));
    assert!(first.contains("ExternDef: (int) print_int"));
    assert!(first.contains("VariableDeclaration: (float) g"));
    assert!(first.contains("IfStmt:"));
    assert!(first.contains("ThenBlock:"));
    assert!(first.contains("ElseBlock:"));
}

#[test]
fn test_left_associative_chain_tree() {
    let program = parse("int main() { return 1 - 2 - 3; }").expect("parse failed");
    let tree = program.to_tree_string();
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
fn test_shadowing_resolves_innermost() {
    // The inner x absorbs the assignment; the outer x keeps its value and
    // the program still typechecks with different types per scope.
    let source = r#"
        int main() {
            int x;
            x = 1;
            {
                float x;
                x = 2.5;
            }
            return x;
        }
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn test_same_scope_redefinition_rejected() {
    let source = "int main() { int x; int x; return 0; }";
    let err = compile(source).expect_err("should reject duplicate");
    assert_eq!(err.message, "redefinition of 'x'");
    let note = err.note.expect("missing note");
    assert_eq!(note.message, "previous declaration is here");
}

#[test]
fn test_widening_through_the_lattice() {
    let source = r#"
        float take_float(float x) { return x; }
        int take_int(int x) { return x; }

        int main() {
            float f;
            int i;
            f = true;
            f = 1;
            i = true;
            take_float(7);
            take_float(false);
            take_int(true);
            return 0;
        }
    "#;
    let module = compile(source).expect("widening should be legal");
    let text = format!("{}", module);
    // true -> float goes through zext then sitofp
    assert!(text.contains("zext i1"));
    assert!(text.contains("sitofp i32"));
}

#[test]
fn test_narrowing_rejected_with_location() {
    let source = "int main() {\n    int x;\n    x = 2.5;\n    return x;\n}";
    let err = compile(source).expect_err("narrowing must fail");
    assert_eq!(err.message, "cannot implicitly convert 'float' to 'int'");
    assert_eq!(err.location.line, 3);

    let reporter = Reporter::new("narrow.c", source);
    let rendered = reporter.render(&err);
    assert!(rendered.starts_with("narrow.c:3:9: error: cannot implicitly convert"));
    assert!(rendered.contains("^~~~~"));
    assert!(rendered.ends_with("1 error generated.\n"));
}

#[test]
fn test_condition_context_asymmetry() {
    // int is a fine condition...
    assert!(compile("int main() { int x; x = 3; if (x) { return 1; } return 0; }").is_ok());
    assert!(compile("int main() { float f; f = 0.5; while (f) { f = f - 1.0; } return 0; }")
        .is_ok());

    // ...but not a fine bool value
    let err = compile("bool f(bool b) { return b; } int main() { bool r; r = f(3); return 0; }")
        .expect_err("int argument for bool parameter must fail");
    assert_eq!(
        err.message,
        "cannot implicitly convert 'int' to 'bool' outside a condition"
    );
}

#[test]
fn test_mutual_recursion_via_extern() {
    let source = r#"
        extern int print_int(int X);
        extern int hofstadterMale(int n);

        int hofstadterFemale(int n) {
            if (n == 0) {
                return 1;
            } else {
                return (n - hofstadterMale(hofstadterFemale(n - 1)));
            }
        }

        int hofstadterMale(int n) {
            if (n == 0) {
                return 0;
            } else {
                return (n - hofstadterFemale(hofstadterMale(n - 1)));
            }
        }
    "#;
    let module = compile(source).expect("mutual recursion should compile");
    let text = format!("{}", module);
    // The forward declaration is subsumed by the definition
    assert!(!text.contains("declare i32 @hofstadterMale"));
    assert!(text.contains("define i32 @hofstadterMale(i32 %0)"));
    assert!(text.contains("define i32 @hofstadterFemale(i32 %0)"));
}

#[test]
fn test_mutual_recursion_via_prototype() {
    let source = r#"
        int odd(int n);

        int even(int n) {
            if (n == 0) { return 1; }
            return odd(n - 1);
        }

        int odd(int n) {
            if (n == 0) { return 0; }
            return even(n - 1);
        }

        int main() { return even(10); }
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn test_signature_mismatch_across_declarations() {
    let source = "int f(int x); float f(int x) { return 0.0; } int main() { return 0; }";
    let err = compile(source).expect_err("signature mismatch must fail");
    assert_eq!(err.message, "conflicting types for 'f'");
    assert_eq!(err.note.expect("missing note").message, "previous declaration is here");
}

#[test]
fn test_too_many_arguments_points_at_first_extra() {
    let source = "int f(int x) { return x; }\nint main() { return f(1, 2); }";
    let err = compile(source).expect_err("arity mismatch must fail");
    assert_eq!(
        err.message,
        "too many arguments to function call, expected 1, have 2"
    );
    // caret on the extra argument `2`
    assert_eq!(err.location.line, 2);
    assert_eq!(err.location.column, 26);
    let note = err.note.expect("missing note");
    assert_eq!(note.message, "'f' declared here");
    assert_eq!(note.location.line, 1);
}

#[test]
fn test_too_few_arguments_points_at_call() {
    let source = "int f(int x, int y) { return x + y; }\nint main() { return f(1); }";
    let err = compile(source).expect_err("arity mismatch must fail");
    assert_eq!(
        err.message,
        "too few arguments to function call, expected 2, have 1"
    );
    assert_eq!(err.location.line, 2);
    assert_eq!(err.note.expect("missing note").message, "'f' declared here");
}

#[test]
fn test_variables_and_functions_are_separate_namespaces() {
    let source = r#"
        int nested(int x) { return x; }

        int main() {
            int nested;
            nested = 5;
            return nested(nested);
        }
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn test_deeply_nested_blocks() {
    let source = "int f(int x) { {{{{{{{{{{{return x;}}}}}}}}}}} } int main() { return f(5); }";
    assert!(compile(source).is_ok());
}

#[test]
fn test_scope_example_with_while_shadowing() {
    let source = r#"
        int example_scope() {
            int x;
            int y;
            x = 2 + 3;
            y = 2;
            while (y > 0) {
                int x;
                bool cond;
                cond = true;
                while (cond) {
                    x = 17;
                    cond = false;
                }
                x = 2;
                y = y - x;
            }
            return x;
        }
        int main() { return example_scope(); }
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn test_bool_arithmetic_stays_bool() {
    let source = r#"
        bool true_plus_true() {
            return true + true;
        }
        int main() {
            bool b;
            b = true - true;
            return b == false;
        }
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn test_widening_matrix_program() {
    let source = r#"
        extern int print_int(int X);
        extern float print_float(float X);

        bool widening_casts() {
            float bin_3;
            int bin_6;
            float bin_7;
            int bin_8;
            bool bin_9;
            int assign_bi;

            bin_3 = 4.0 + true;
            bin_6 = 3 + true;
            bin_7 = true + 1.0;
            bin_8 = true + 1;
            bin_9 = true - true;
            assign_bi = true;

            print_float(bin_3);
            print_int(bin_6);
            print_int(bin_9);

            return (
                (bin_3 == 5.0) &&
                (bin_6 == 4) &&
                (bin_7 == 2.0) &&
                (bin_8 == 2) &&
                (bin_9 == false) &&
                (assign_bi == 1)
            );
        }

        int main() {
            if (widening_casts()) {
                return 0;
            }
            return 1;
        }
    "#;
    assert!(compile(source).is_ok());
}

#[test]
fn test_short_circuit_lowering() {
    let source = r#"
        bool both(bool a, bool b) { return a && b; }
        bool either(bool a, bool b) { return a || b; }
        int main() { return 0; }
    "#;
    let module = compile(source).expect("compilation failed");
    let text = format!("{}", module);
    assert!(text.contains("land.rhs"));
    assert!(text.contains("lor.rhs"));
    // && merges false from the short path, || merges true
    assert!(text.contains("phi i1 [ 0, %entry ]"));
    assert!(text.contains("phi i1 [ 1, %entry ]"));
}

#[test]
fn test_ir_output_is_deterministic() {
    let source = r#"
        float g;
        int main() {
            int i;
            i = 0;
            while (i < 10) {
                g = g + 1.5;
                i = i + 1;
            }
            return i;
        }
    "#;
    let first = format!("{}", compile(source).expect("compile failed"));
    let second = format!("{}", compile(source).expect("compile failed"));
    assert_eq!(first, second);
    assert!(first.contains("@g = global float 0.0"));
    assert!(first.contains("while.cond"));
    assert!(first.contains("while.body"));
    assert!(first.contains("while.end"));
}

#[test]
fn test_undeclared_identifier_diagnostic_rendering() {
    let source = "int main() {\n    return y;\n}";
    let err = compile(source).expect_err("must fail");
    let rendered = Reporter::new("undecl.c", source).render(&err);
    assert_eq!(
        rendered,
        "undecl.c:2:12: error: use of undeclared identifier 'y'\n\
         2 |     return y;\n  \
           |            ^~~~~\n\
         1 error generated.\n"
    );
}

#[test]
fn test_missing_main_parse_error() {
    let err = parse("this is not minic").expect_err("must fail");
    assert_eq!(err.message, "undefined reference to 'main'");
}

#[test]
fn test_output_file_written() {
    use std::fs;
    use std::process::Command;

    let dir = tempfile::tempdir().expect("tempdir failed");
    let input = dir.path().join("prog.c");
    fs::write(&input, "int main() { return 42; }").expect("write failed");

    let exe = env!("CARGO_BIN_EXE_minicc");
    let output = Command::new(exe)
        .arg(&input)
        .current_dir(dir.path())
        .output()
        .expect("failed to run compiler");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Parsing Finished"));
    assert!(stdout.contains("FunctionDef: (int) main"));

    let ll = fs::read_to_string(dir.path().join("output.ll")).expect("output.ll missing");
    assert!(ll.contains("define i32 @main()"));
    assert!(ll.contains("ret i32 42"));
}

#[test]
fn test_compile_error_exits_nonzero() {
    use std::fs;
    use std::process::Command;

    let dir = tempfile::tempdir().expect("tempdir failed");
    let input = dir.path().join("bad.c");
    fs::write(&input, "int main() { return x; }").expect("write failed");

    let exe = env!("CARGO_BIN_EXE_minicc");
    let output = Command::new(exe)
        .arg(&input)
        .current_dir(dir.path())
        .output()
        .expect("failed to run compiler");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: use of undeclared identifier 'x'"));
    assert!(stderr.contains("1 error generated."));
}
