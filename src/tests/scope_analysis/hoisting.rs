use speculoos::prelude::*;

use super::{bindings_named, only_binding, scope_kind_of};
use crate::{
    error::ResolveError,
    scope::{analyze, build, resolve, BindingKind, DiagnosticKind, ScopeKind},
    tests::helpers::{parse, tracing_subscribe},
};

#[test]
fn test_var_hoists_out_of_blocks() {
    tracing_subscribe();

    let code = "
        function f() {
            console.log(hoisted);
            if (true) {
                var hoisted = 1;
            }
        }
        f();
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let hoisted = only_binding(&scope_manager, "hoisted");
    assert_that!(&scope_kind_of(&scope_manager, hoisted)).is_equal_to(ScopeKind::Function);
    assert_that!(&hoisted.kind).is_equal_to(BindingKind::Var);
    assert_that!(&hoisted.uses).has_length(1);
}

#[test]
fn test_use_before_declaration_resolves() {
    let code = "a(); function a() {} console.log(b); var b = 1;";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "a").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "b").uses).has_length(1);
}

#[test]
fn test_function_declaration_in_block_binds_to_block() {
    let code = "{ function inner() {} } inner();";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let inner = only_binding(&scope_manager, "inner");
    assert_that!(&scope_kind_of(&scope_manager, inner)).is_equal_to(ScopeKind::Block);
    assert_that!(&inner.uses).is_empty();
}

#[test]
fn test_redeclared_var_merges() {
    let code = "var x = 1;\nvar x = 2;\nconsole.log(x);";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let x = only_binding(&scope_manager, "x");
    assert_that!(&x.identifiers).has_length(2);
    assert_that!(&x.defs).has_length(2);
    assert_that!(&x.uses).has_length(1);
    assert_that!(&x.declaration_node().unwrap().start_position().row).is_equal_to(0);
    assert_that!(&scope_manager.diagnostics).is_empty();
}

#[test]
fn test_parameter_and_var_merge() {
    let code = "function f(a) { var a; return a; } f();";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let a = only_binding(&scope_manager, "a");
    assert_that!(&a.kind).is_equal_to(BindingKind::Parameter);
    assert_that!(&a.uses).has_length(1);
}

#[test]
fn test_block_scoped_redeclaration_is_diagnosed() {
    let code = "let y = 1;\nlet y = 2;\ny;";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let y = only_binding(&scope_manager, "y");
    assert_that!(&y.identifiers).has_length(1);
    assert_that!(&y.uses).has_length(1);

    assert_that!(&scope_manager.diagnostics).has_length(1);
    let diagnostic = &scope_manager.diagnostics[0];
    assert_that!(&diagnostic.kind).is_equal_to(DiagnosticKind::Redeclaration);
    assert_that!(&diagnostic.name).is_equal_to(Some("y".to_owned()));
    assert_that!(&diagnostic.site.line).is_equal_to(2);
}

#[test]
fn test_parameter_default_does_not_see_body_bindings() {
    let code = "
        const x = 1;
        function f(a = x) {
            const x = 2;
            return a + x;
        }
        f();
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let bindings = bindings_named(&scope_manager, "x");
    assert_that!(&bindings).has_length(2);
    let (outer, inner) = (bindings[0], bindings[1]);
    assert_that!(&scope_kind_of(&scope_manager, outer)).is_equal_to(ScopeKind::Module);
    assert_that!(&outer.uses).has_length(1);
    assert_that!(&inner.uses).has_length(1);
}

#[test]
fn test_build_populates_no_uses_and_resolve_runs_once() {
    let code = "const a = 1; a; a;";
    let ast = parse(code);

    let mut scope_manager = build(&ast, code);
    assert_that!(&only_binding(&scope_manager, "a").uses).is_empty();
    assert_that!(&scope_manager.is_resolved()).is_false();

    assert_that!(&resolve(&mut scope_manager, ast.root_node())).is_ok();
    assert_that!(&only_binding(&scope_manager, "a").uses).has_length(2);

    assert_eq!(
        resolve(&mut scope_manager, ast.root_node()),
        Err(ResolveError::AlreadyResolved)
    );
    assert_that!(&only_binding(&scope_manager, "a").uses).has_length(2);
}
