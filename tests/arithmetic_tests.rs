use cpp2pas::{run_pipeline, TranslateOptions};
use std::fs;
use std::path::Path;

#[test]
fn test_arithmetic_translation() {
    let path = Path::new("demos/arithmetic.cpp");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let output = run_pipeline(&source, &TranslateOptions::default()).expect("Translation failed");
    assert_eq!(output.error_count(), 0, "{:?}", output.diagnostic_messages());

    println!("Translation:\n{}", output.target_text);

    let text = &output.target_text;
    assert!(text.contains("var a: integer;\nvar b: integer;\nvar ratio: real;\nvar same: boolean;\nvar rest: integer;\n"));
    assert!(text.contains("   a := 7;\n   b := 3;\n"));
    assert!(text.contains("   rest := a mod b;\n"));
    assert!(text.contains("   ratio := (a + b) * 2.0 / b;\n"));
    assert!(text.contains("   same := ((a = b) or (a <> -b));\n"));
    assert!(text.contains("   a := a - (b - 1);\n"));
    assert!(text.contains("   { print everything }\n"));
    assert!(text.contains("   writeln('ratio', ratio);\n"));
}

#[test]
fn test_arithmetic_optimized_keeps_everything_used() {
    let path = Path::new("demos/arithmetic.cpp");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let options = TranslateOptions {
        optimize: true,
        ..TranslateOptions::default()
    };
    let output = run_pipeline(&source, &options).expect("Translation failed");
    assert!(output.removal_log.is_empty(), "{:?}", output.removal_log);
}
