// SPDX-License-Identifier: Apache-2.0
//
// End-to-end properties of `normalize` on complete contracts.

use coverage_preprocessor::{normalize, Phase, PreprocessError, Preprocessor};
use pretty_assertions::assert_eq;

fn contract(body: &str) -> String {
    format!("pragma solidity ^0.8.0;\ncontract C {{\n    function f() public {{\n        {body}\n    }}\n}}\n")
}

#[test]
fn test_bare_if_consequent_is_bracketed_in_place() {
    let out = normalize(&contract("if (c) doX();\n        next();")).unwrap();
    assert_eq!(out, contract("if (c) {doX();}\n        next();"));
}

#[test]
fn test_if_and_else_both_bracketed() {
    let out = normalize(&contract("if (a) foo(); else bar();")).unwrap();
    assert_eq!(out, contract("if (a) {foo();} else {bar();}"));
}

#[test]
fn test_nested_bare_bodies() {
    let out = normalize(&contract("for (;;) if (x) y();")).unwrap();
    assert_eq!(out, contract("for (;;) {if (x) {y();}}"));
}

#[test]
fn test_already_bracketed_is_byte_identical() {
    let src = contract("if (c) { doX(); }\n        while (k) { k--; }");
    assert_eq!(normalize(&src).unwrap(), src);
}

#[test]
fn test_wrapping_is_idempotent() {
    let src = contract("if (a) foo(); else if (b) bar(); else while (z) baz();\n        for (;;) if (q) r();");
    let once = normalize(&src).unwrap();
    let result = Preprocessor::default().run(&once).unwrap();
    assert_eq!(result.bodies_wrapped, 0);
    assert_eq!(result.output, once);
}

#[test]
fn test_view_replaced_with_same_width() {
    let src = "contract C {\n    function f() public view returns (uint) { return 1; }\n}\n";
    let out = normalize(src).unwrap();
    assert_eq!(
        out,
        "contract C {\n    function f() public      returns (uint) { return 1; }\n}\n"
    );
}

#[test]
fn test_pure_and_constant_removed() {
    let src = r#"pragma solidity ^0.4.24;
contract Old {
    function a() public pure returns (uint) { return 1; }
    function b() public constant returns (uint) { return 2; }
}
"#;
    let out = normalize(src).unwrap();
    assert_eq!(out.len(), src.len());
    assert!(out.contains("function a() public      returns (uint)"));
    assert!(out.contains("function b() public          returns (uint)"));
    assert!(!out.contains("pure"));
    assert!(!out.contains("constant"));
}

#[test]
fn test_multiline_declaration_keeps_line_layout() {
    let src = r#"contract C {
    uint total;
    function f()
        public
        view
        returns (uint)
    {
        return total;
    }
}
"#;
    let out = normalize(src).unwrap();
    assert_eq!(out.lines().count(), src.lines().count());
    for (before, after) in src.lines().zip(out.lines()) {
        assert_eq!(before.len(), after.len());
    }
    assert!(out.contains("\n            \n        returns (uint)"));
}

#[test]
fn test_payable_is_untouched() {
    let src = "contract C {\n    function f() public payable { }\n}\n";
    assert_eq!(normalize(src).unwrap(), src);
}

#[test]
fn test_strip_length_invariant_after_wrapping() {
    let src = contract("if (ok) emit Done();");
    let src = src.replace("function f() public", "function f() public view");
    let result = Preprocessor::default().run(&src).unwrap();
    assert_eq!(result.bodies_wrapped, 1);
    assert_eq!(result.modifiers_stripped, 1);
    assert_eq!(result.output.len(), src.len() + 2);
}

#[test]
fn test_offsets_after_multibyte_text() {
    let src = "// héllo wörld\ncontract C {\n    function f() public view { if (a) b(); }\n}\n";
    let out = normalize(src).unwrap();
    assert_eq!(
        out,
        "// héllo wörld\ncontract C {\n    function f() public      { if (a) {b();} }\n}\n"
    );
}

#[test]
fn test_modifier_and_constructor_bodies_are_wrapped() {
    let src = r#"contract C {
    uint count;
    modifier tick() { if (count > 0) count -= 1; _; }
    constructor() { while (count < 3) count += 1; }
}
"#;
    let out = normalize(src).unwrap();
    assert!(out.contains("if (count > 0) {count -= 1;} _;"));
    assert!(out.contains("while (count < 3) {count += 1;}"));
}

#[test]
fn test_parse_failure_is_an_error_not_text() {
    let err = normalize("contract C { function f() public { if (x) doX() } }").unwrap_err();
    match err {
        PreprocessError::Parse { phase, diagnostics } => {
            assert_eq!(phase, Phase::BlockWrap);
            assert!(!diagnostics.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}
