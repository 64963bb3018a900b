// Integration tests for the translator

use cpp2pas::parser::lexer::TokenKind;
use cpp2pas::parser::parse::ParseError;
use cpp2pas::semantic::SemanticErrorKind;
use cpp2pas::{parse_only, run_pipeline, tokenize, TranslateOptions, TranslateWarning};

fn translate(source: &str) -> cpp2pas::PipelineOutput {
    run_pipeline(source, &TranslateOptions::default()).expect("Translation failed")
}

fn optimized(source: &str) -> cpp2pas::PipelineOutput {
    let options = TranslateOptions {
        optimize: true,
        ..TranslateOptions::default()
    };
    run_pipeline(source, &options).expect("Translation failed")
}

fn kinds(output: &cpp2pas::PipelineOutput) -> Vec<SemanticErrorKind> {
    output.diagnostics.iter().map(|d| d.kind.clone()).collect()
}

#[test]
fn test_declarations_and_assignments_in_main() {
    let source = r#"
        int main() {
            int a;
            float b;
            string s;
            a = 1;
            b = 2.5;
            s = "text";
        }
    "#;

    let output = translate(source);
    assert_eq!(output.error_count(), 0, "{:?}", output.diagnostic_messages());
    assert_eq!(
        output.target_text,
        "program translated;\n\
         var a: integer;\n\
         var b: real;\n\
         var s: string;\n\
         \n\
         begin\n   \
            a := 1;\n   \
            b := 2.5;\n   \
            s := 'text';\n\
         end. {END OF translated}\n"
    );
}

#[test]
fn test_output_statement() {
    let source = r#"
        int main() {
            int x;
            x = 5;
            cout << "v" << x;
        }
    "#;

    let output = translate(source);
    assert_eq!(output.error_count(), 0);
    assert!(output.target_text.contains("var x: integer;\n"));
    assert!(output.target_text.contains("   x := 5;\n"));
    assert!(output.target_text.contains("   writeln('v', x);\n"));
}

#[test]
fn test_optimize_drops_only_unused_variables() {
    let source = r#"
        int counter;
        int main() {
            int used;
            int spare;
            float ghost;
            used = 3;
            cout << used;
        }
    "#;

    let output = optimized(source);
    assert!(output.target_text.contains("var used: integer;"));
    assert!(!output.target_text.contains("spare"));
    assert!(!output.target_text.contains("ghost"));
    assert!(!output.target_text.contains("counter"));
    assert_eq!(
        output.removal_log,
        vec![
            "removed unused variable declaration 'counter' in scope 'global'",
            "removed unused variable declaration 'spare' in scope 'main'",
            "removed unused variable declaration 'ghost' in scope 'main'",
        ]
    );

    let plain = translate(source);
    assert!(plain.removal_log.is_empty());
    for name in ["counter", "used", "spare", "ghost"] {
        assert!(plain.target_text.contains(&format!("var {}:", name)), "{}", name);
    }
}

#[test]
fn test_undeclared_identifiers_are_reported_per_use() {
    let source = r#"
        int main() {
            int a;
            a = b + c;
            cout << b;
        }
    "#;

    let output = translate(source);
    assert_eq!(
        kinds(&output),
        vec![
            SemanticErrorKind::UndeclaredIdentifier("b".into()),
            SemanticErrorKind::UndeclaredIdentifier("c".into()),
            SemanticErrorKind::UndeclaredIdentifier("b".into()),
        ]
    );
    assert!(output.target_text.contains("a := b + c;"));
    assert!(output.target_text.ends_with("end. {END OF translated}\n"));
}

#[test]
fn test_redeclaration_versus_shadowing() {
    let clash = translate("int main() { int x; int x; }");
    assert_eq!(
        kinds(&clash),
        vec![SemanticErrorKind::Redeclaration("x".into())]
    );
    assert_eq!(clash.target_text.matches("var x: integer;").count(), 1);

    let shadow = translate(
        r#"
        int x;
        void show(int x) {
            cout << x;
        }
        int main() {
            float x;
            x = 1.5;
            show(2);
        }
    "#,
    );
    assert_eq!(shadow.error_count(), 0, "{:?}", shadow.diagnostic_messages());
    assert_eq!(shadow.target_text.matches("var x:").count(), 1);
    assert!(shadow.target_text.starts_with("program translated;\nvar x: real;\n"));
    assert!(shadow.target_text.contains("procedure show(x: integer);\nbegin\n   writeln(x);\n"));
    assert!(shadow.target_text.contains("   x := 1.5;\n   show(2);\n"));
    assert_eq!(
        shadow.warnings,
        vec![TranslateWarning::ShadowedGlobal("x".into())]
    );
}

#[test]
fn test_repeated_parameter_name() {
    let output = translate("void f(int a, int a) { }\nint main() { f(1, 2); }");
    assert_eq!(kinds(&output), vec![SemanticErrorKind::Redeclaration("a".into())]);
    assert!(output.target_text.contains("procedure f(a: integer; a: integer);"));
}

#[test]
fn test_indexing_and_sequences_count_as_uses() {
    let source = r#"
        int main() {
            int[3] v;
            int[2] w;
            int[2] idle;
            int i;
            int x;
            w = [i, 1];
            x = v[i];
            cout << x;
        }
    "#;

    let output = optimized(source);
    assert_eq!(output.error_count(), 0, "{:?}", output.diagnostic_messages());
    for name in ["v", "w", "i", "x"] {
        assert!(
            output.target_text.contains(&format!("var {}: integer;", name)),
            "{} dropped from:\n{}",
            name,
            output.target_text
        );
    }
    assert!(!output.target_text.contains("idle"));
    assert_eq!(
        output.removal_log,
        vec!["removed unused variable declaration 'idle' in scope 'main'"]
    );
    assert!(output.target_text.contains("   w := [i, 1];\n   x := v[i];\n"));
}

#[test]
fn test_function_definitions_at_program_level() {
    let clash = translate("void h() { }\nint main() { void h() { } h(); }");
    assert_eq!(clash.target_text.matches("procedure h;").count(), 1);
    assert_eq!(
        clash.warnings,
        vec![TranslateWarning::DuplicateFunction("h".into())]
    );

    let guarded = translate("int main() { }\nif (1 < 2) { void g() { } }");
    assert_eq!(guarded.error_count(), 0, "{:?}", guarded.diagnostic_messages());
    assert!(guarded.target_text.contains("\nprocedure g;\nbegin\nend; {END OF g}\n"));
}

#[test]
fn test_integer_literal_wider_than_machine_word() {
    let output = translate("int main() { int x; x = 99999999999999999999; }");
    assert!(output.target_text.contains("   x := 99999999999999999999;\n"));
}

#[test]
fn test_comment_containing_brace() {
    let output = translate("int main() {\n    // keep } balanced\n}");
    assert!(output.target_text.contains("   (* keep } balanced *)\n"));
}

#[test]
fn test_no_terminator_before_else() {
    let source = r#"
        int main() {
            int a;
            int b;
            int x;
            if (a < b) {
                x = 1;
            } else {
                x = 2;
            }
            while (x > 0) {
                if (x == 1) {
                    x = 0;
                }
                else {
                    x = x - 1;
                }
            }
        }
    "#;

    let output = translate(source);
    let lines: Vec<&str> = output.target_text.lines().map(str::trim).collect();
    let mut elses = 0;
    for pair in lines.windows(2) {
        if pair[1] == "else" {
            elses += 1;
            assert_eq!(pair[0], "end", "terminator before else in:\n{}", output.target_text);
        }
    }
    assert_eq!(elses, 2);
    assert!(output.target_text.contains("   if (a < b) then\n   begin\n      x := 1;\n   end\n   else\n"));
    assert!(output.target_text.contains("         x := x - 1;\n      end;\n   end;\n"));
}

#[test]
fn test_missing_main_still_translates() {
    let source = "int x;\nx = 5;\ncout << x;\n";

    let output = translate(source);
    assert_eq!(kinds(&output), vec![SemanticErrorKind::MissingMain]);
    assert_eq!(
        output.diagnostic_messages(),
        vec!["Semantic error at line 4, column 1: No 'main' function found"]
    );
    assert_eq!(
        output.target_text,
        "program translated;\nvar x: integer;\n\nbegin\n   x := 5;\n   writeln(x);\nend. {END OF translated}\n"
    );
}

#[test]
fn test_translation_is_deterministic() {
    let source = r#"
        int total;
        int add(int a, int b) {
            int sum;
            sum = a + b;
            return sum;
        }
        int main() {
            int z;
            int unused;
            z = add(1, q);
        }
    "#;

    let first = optimized(source);
    let second = optimized(source);
    assert_eq!(first.target_text, second.target_text);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.removal_log, second.removal_log);
}

#[test]
fn test_full_program() {
    let source = r#"
        // reads numbers until zero
        int limit;
        int square(int n) {
            return n * n;
        }
        void report(int value, string label) {
            cout << label << value;
        }
        int main() {
            int i = 0, total = 0;
            cin >> limit;
            while (i < limit && not (i == 7)) {
                total = total + square(i);
                i = i + 1;
            }
            report(total, "total");
            return 0;
        }
    "#;

    let output = translate(source);
    assert_eq!(output.error_count(), 0, "{:?}", output.diagnostic_messages());
    assert_eq!(
        output.target_text,
        "program translated;\n\
         var limit: integer;\n\
         var i: integer;\n\
         var total: integer;\n\
         \n\
         function square(n: integer): integer;\n\
         begin\n   \
            Exit(n * n);\n\
         end; {END OF square}\n\
         \n\
         procedure report(value: integer; label: string);\n\
         begin\n   \
            writeln(label, value);\n\
         end; {END OF report}\n\
         \n\
         begin\n   \
            { reads numbers until zero }\n   \
            i := 0;\n   \
            total := 0;\n   \
            readln(limit);\n   \
            while ((i < limit) and not (i = 7)) do\n   \
            begin\n      \
               total := total + square(i);\n      \
               i := i + 1;\n   \
            end;\n   \
            report(total, 'total');\n   \
            Exit(0);\n\
         end. {END OF translated}\n"
    );
}

#[test]
fn test_lexical_errors_are_fatal() {
    for source in [
        "int main() { int x = 1abc; }",
        "int main() { cout << \"open; }",
        "int main() { int x; x = 1 @ 2; }",
        "int main() { if (a | b) { } }",
    ] {
        let err = run_pipeline(source, &TranslateOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)), "{}: {:?}", source, err);
        assert!(err.to_string().starts_with("Lexical error at line 1"));
    }
}

#[test]
fn test_syntax_error_reports_location() {
    let err = parse_only("int main() {\n    x = 1\n}").unwrap_err();
    assert_eq!(err.location().line, 3);
    assert!(err.to_string().contains("Expected ';' after statement, found '}'"), "{}", err);
}

#[test]
fn test_token_stream() {
    let kinds: Vec<TokenKind> = tokenize("cout << x;\n")
        .map(|t| t.expect("Lexing failed").kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Cout,
            TokenKind::Shl,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_ast_dump() {
    let program = parse_only("int main() { x = 1 + 2; }").expect("Parsing failed");
    let dump = program.to_string();
    assert!(dump.starts_with("Program\n+- Function int main\n"));
    assert!(dump.contains("BinaryOp '+'"));
}
